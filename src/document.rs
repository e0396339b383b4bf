use std::collections::BTreeMap;

use crate::error::{PageError, PageResult};
use crate::node::{escape, Node};

/// A stylesheet or script declaration with an explicit serialization order.
///
/// For external resources `url` is an URL; for internal ones it carries the
/// stylesheet/script source text. Entries are serialized in ascending `order`,
/// insertion order on ties, and duplicates are kept as-is (no implicit dedup).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceRef {
    pub url: String,
    pub order: i32,
    pub use_static: bool,
}

/// Semantic navigation hints emitted as `<link rel=...>` document metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LinkRel {
    Home,
    Contents,
    Index,
    Help,
    Up,
}

impl LinkRel {
    pub fn as_str(self) -> &'static str {
        match self {
            LinkRel::Home => "home",
            LinkRel::Contents => "contents",
            LinkRel::Index => "index",
            LinkRel::Help => "help",
            LinkRel::Up => "up",
        }
    }

    /// The semantic rel for a navigation link label, if it has one.
    pub fn for_label(label: &str) -> Option<LinkRel> {
        match label {
            "Home" => Some(LinkRel::Home),
            "Dashboard" => Some(LinkRel::Contents),
            "Branches" => Some(LinkRel::Index),
            "Tutorial" => Some(LinkRel::Help),
            "Back to Review" => Some(LinkRel::Up),
            _ => None,
        }
    }
}

/// Root render context for one response: the element tree plus document-scoped
/// resource and metadata declarations.
///
/// A `Document` is created at request entry, threaded through the composer and
/// widget calls, serialized exactly once with [`Document::render`], and then
/// discarded. After `render` every mutating accessor fails with
/// [`PageError::UseAfterFinalize`]; a `&mut Node` obtained earlier cannot
/// outlive the `render` call under borrow rules, so the accessor checks cover
/// every mutation path.
#[derive(Debug)]
pub struct Document {
    title: Option<String>,
    links: BTreeMap<LinkRel, String>,
    external_stylesheets: Vec<ResourceRef>,
    internal_stylesheets: Vec<ResourceRef>,
    external_scripts: Vec<ResourceRef>,
    internal_scripts: Vec<ResourceRef>,
    static_prefix: Option<String>,
    head: Node,
    body: Node,
    finalized: bool,
}

impl Document {
    pub fn new() -> Self {
        Document {
            title: None,
            links: BTreeMap::new(),
            external_stylesheets: Vec::new(),
            internal_stylesheets: Vec::new(),
            external_scripts: Vec::new(),
            internal_scripts: Vec::new(),
            static_prefix: None,
            head: Node::new("head"),
            body: Node::new("body"),
            finalized: false,
        }
    }

    /// Prefix applied to static external resource URLs at serialization time
    /// (cache-busting deployments set this from configuration).
    pub fn set_static_prefix(&mut self, prefix: impl Into<String>) {
        self.static_prefix = Some(prefix.into());
    }

    fn check_open(&self) -> PageResult<()> {
        if self.finalized {
            Err(PageError::UseAfterFinalize)
        } else {
            Ok(())
        }
    }

    pub fn head_mut(&mut self) -> PageResult<&mut Node> {
        self.check_open()?;
        Ok(&mut self.head)
    }

    pub fn body_mut(&mut self) -> PageResult<&mut Node> {
        self.check_open()?;
        Ok(&mut self.body)
    }

    /// Document title; last write wins.
    pub fn set_title(&mut self, title: impl Into<String>) -> PageResult<()> {
        self.check_open()?;
        self.title = Some(title.into());
        Ok(())
    }

    /// Register a semantic link; last write wins per rel.
    pub fn set_link(&mut self, rel: LinkRel, url: impl Into<String>) -> PageResult<()> {
        self.check_open()?;
        self.links.insert(rel, url.into());
        Ok(())
    }

    // ─── Resource registration ───────────────────────────────────────────────

    pub fn add_external_stylesheet(&mut self, url: impl Into<String>) -> PageResult<()> {
        self.add_external_stylesheet_with(url, 0, true)
    }

    pub fn add_external_stylesheet_with(
        &mut self,
        url: impl Into<String>,
        order: i32,
        use_static: bool,
    ) -> PageResult<()> {
        self.check_open()?;
        self.external_stylesheets.push(ResourceRef {
            url: url.into(),
            order,
            use_static,
        });
        Ok(())
    }

    pub fn add_internal_stylesheet(&mut self, css: impl Into<String>) -> PageResult<()> {
        self.add_internal_stylesheet_with(css, 0)
    }

    pub fn add_internal_stylesheet_with(
        &mut self,
        css: impl Into<String>,
        order: i32,
    ) -> PageResult<()> {
        self.check_open()?;
        self.internal_stylesheets.push(ResourceRef {
            url: css.into(),
            order,
            use_static: false,
        });
        Ok(())
    }

    pub fn add_external_script(&mut self, url: impl Into<String>) -> PageResult<()> {
        self.add_external_script_with(url, 0, true)
    }

    pub fn add_external_script_with(
        &mut self,
        url: impl Into<String>,
        order: i32,
        use_static: bool,
    ) -> PageResult<()> {
        self.check_open()?;
        self.external_scripts.push(ResourceRef {
            url: url.into(),
            order,
            use_static,
        });
        Ok(())
    }

    pub fn add_internal_script(&mut self, source: impl Into<String>) -> PageResult<()> {
        self.add_internal_script_with(source, 0)
    }

    pub fn add_internal_script_with(
        &mut self,
        source: impl Into<String>,
        order: i32,
    ) -> PageResult<()> {
        self.check_open()?;
        self.internal_scripts.push(ResourceRef {
            url: source.into(),
            order,
            use_static: false,
        });
        Ok(())
    }

    // ─── Serialization ───────────────────────────────────────────────────────

    /// Serialize the whole document once. A second call, like any mutation
    /// after the first, fails with [`PageError::UseAfterFinalize`].
    pub fn render(&mut self) -> PageResult<String> {
        self.check_open()?;
        self.finalized = true;

        let mut out = String::from("<!DOCTYPE html>\n<html>");
        out.push_str("<head>");
        if let Some(title) = &self.title {
            out.push_str("<title>");
            out.push_str(&escape(title));
            out.push_str("</title>");
        }
        for (rel, url) in &self.links {
            out.push_str(&format!(
                "<link rel=\"{}\" href=\"{}\">",
                rel.as_str(),
                escape(url)
            ));
        }
        for resource in in_order(&self.external_stylesheets) {
            out.push_str(&format!(
                "<link rel=\"stylesheet\" href=\"{}\">",
                escape(&self.resolve(resource))
            ));
        }
        for resource in in_order(&self.internal_stylesheets) {
            out.push_str("<style>");
            out.push_str(&resource.url);
            out.push_str("</style>");
        }
        for resource in in_order(&self.external_scripts) {
            out.push_str(&format!(
                "<script src=\"{}\"></script>",
                escape(&self.resolve(resource))
            ));
        }
        for resource in in_order(&self.internal_scripts) {
            out.push_str("<script>");
            out.push_str(&resource.url);
            out.push_str("</script>");
        }
        for child in self.head.children() {
            if let crate::node::Child::Element(node) = child {
                out.push_str(&node.to_html());
            }
        }
        out.push_str("</head>");
        self.body.write(&mut out);
        out.push_str("</html>");
        Ok(out)
    }

    fn resolve(&self, resource: &ResourceRef) -> String {
        match (&self.static_prefix, resource.use_static) {
            (Some(prefix), true) => format!("{}{}", prefix, resource.url),
            _ => resource.url.clone(),
        }
    }
}

impl Default for Document {
    fn default() -> Self {
        Document::new()
    }
}

/// Ascending `order`, stable on ties (insertion order).
fn in_order(resources: &[ResourceRef]) -> Vec<&ResourceRef> {
    let mut sorted: Vec<&ResourceRef> = resources.iter().collect();
    sorted.sort_by_key(|resource| resource.order);
    sorted
}
