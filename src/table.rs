use crate::error::{PageError, PageResult};
use crate::node::{escape, Node};

/// Column-width layout used when the caller does not supply one.
pub const DEFAULT_COLUMNS: [u32; 3] = [10, 60, 30];

/// Cell content: nothing, literal text (escaped), or a builder callback
/// invoked with the cell.
pub enum Content<'a> {
    Empty,
    Text(String),
    Build(Box<dyn FnOnce(&mut Node) + 'a>),
}

impl<'a> Content<'a> {
    pub fn build(builder: impl FnOnce(&mut Node) + 'a) -> Content<'a> {
        Content::Build(Box::new(builder))
    }

    fn apply(self, cell: &mut Node) {
        match self {
            Content::Empty => {}
            Content::Text(text) => {
                cell.text(text);
            }
            Content::Build(builder) => builder(cell),
        }
    }
}

impl From<&str> for Content<'static> {
    fn from(text: &str) -> Self {
        Content::Text(text.to_string())
    }
}

impl From<String> for Content<'static> {
    fn from(text: String) -> Self {
        Content::Text(text)
    }
}

/// A table-based panel: a title row, section headers, labeled key/value rows
/// with optional action buttons and help text, centered rows, and separators.
///
/// Rows are emitted strictly in call order.
pub struct SectionTable<'t> {
    tbody: &'t mut Node,
    columns: Vec<u32>,
}

impl<'t> SectionTable<'t> {
    /// Build the panel scaffolding under `target`: a colgroup matching the
    /// column-width percentages and the title row.
    ///
    /// Fails with [`PageError::MissingRequiredData`] when `columns` is empty.
    pub fn new(target: &'t mut Node, title: &str, columns: &[u32]) -> PageResult<Self> {
        if columns.is_empty() {
            return Err(PageError::MissingRequiredData {
                widget: "SectionTable".to_string(),
                reason: "at least one column is required".to_string(),
            });
        }

        let tbody = target
            .div()
            .class("main")
            .table()
            .class("paleyellow")
            .attr("align", "center")
            .tbody();

        let colgroup = tbody.colgroup();
        for width in columns {
            colgroup.col().attr("width", format!("{}%", width));
        }

        let heading = tbody.tr().td();
        heading.class("h1").attr("colspan", columns.len().to_string());
        let h1 = heading.h1();
        h1.text(title);
        h1.span().class("right");

        Ok(SectionTable {
            tbody,
            columns: columns.to_vec(),
        })
    }

    pub fn with_default_columns(target: &'t mut Node, title: &str) -> PageResult<Self> {
        SectionTable::new(target, title, &DEFAULT_COLUMNS)
    }

    /// The right-aligned slot inside the title row, for callers that want to
    /// put controls next to the title. `Some` for any table built by `new`.
    pub fn title_right(&mut self) -> Option<&mut Node> {
        self.tbody
            .element_at_mut(1)
            .and_then(Node::first_element_mut)
            .and_then(Node::first_element_mut)
            .and_then(Node::last_element_mut)
    }

    /// A section header row spanning all columns, with an optional trailing
    /// annotation.
    pub fn add_section(&mut self, title: &str, extra: Option<&str>) {
        let h2 = self
            .tbody
            .tr()
            .td()
            .class("h2")
            .attr("colspan", self.columns.len().to_string())
            .h2();
        h2.text(title);
        if let Some(extra) = extra {
            h2.span().text(extra);
        }
    }

    /// A labeled key/value row. The heading is escaped with its spaces made
    /// non-breaking; the value cell spans the remaining columns. Buttons are
    /// appended after the value, and a description adds one full-width help
    /// row directly below.
    pub fn add_item(
        &mut self,
        heading: &str,
        value: Content,
        description: Option<&str>,
        buttons: &[(&str, &str)],
    ) {
        let row = self.tbody.tr();
        row.class("item");
        row.td()
            .class("name")
            .raw_html(format!("{}:", escape(heading).replace(' ', "&nbsp;")));
        let cell = row.td();
        cell.class("value")
            .attr("colspan", (self.columns.len() - 1).to_string());
        let content = cell.pre();
        value.apply(content);
        if !buttons.is_empty() {
            let holder = content.div();
            holder.class("buttons");
            for (label, onclick) in buttons {
                holder.button().attr("onclick", *onclick).text(*label);
            }
        }
        if let Some(description) = description {
            self.tbody
                .tr()
                .class("help")
                .td()
                .attr("colspan", self.columns.len().to_string())
                .text(description);
        }
    }

    /// A single full-width centered row; returns the cell for further
    /// mutation.
    pub fn add_centered(&mut self, content: Content) -> &mut Node {
        let cell = self
            .tbody
            .tr()
            .class("centered")
            .td();
        cell.attr("colspan", self.columns.len().to_string());
        content.apply(cell);
        cell
    }

    /// A full-width empty divider row.
    pub fn add_separator(&mut self) {
        self.tbody
            .tr()
            .class("separator")
            .td()
            .attr("colspan", self.columns.len().to_string())
            .div();
    }
}
