use std::collections::BTreeMap;

use crate::error::{PageError, PageResult};

/// Element names the builder will accept.
///
/// Every tag factory on [`Node`] uses a name from this list; the dynamic
/// [`Node::element`] entry point rejects anything outside it, so a tag name can
/// never be injected through dynamically constructed strings. Sorted, looked up
/// by binary search.
const ALLOWED_TAGS: &[&str] = &[
    "a", "b", "blink", "body", "br", "button", "caption", "code", "col",
    "colgroup", "div", "em", "fieldset", "form", "h1", "h2", "h3", "h4",
    "head", "hr", "i", "img", "input", "label", "legend", "li", "link",
    "meta", "noscript", "ol", "optgroup", "option", "p", "pre", "script",
    "select", "span", "strong", "style", "table", "tbody", "td", "textarea",
    "tfoot", "th", "thead", "title", "tr", "u", "ul",
];

/// Elements serialized without a closing tag (when they have no children).
const VOID_TAGS: &[&str] = &["br", "col", "hr", "img", "input", "link", "meta"];

fn allowed_tag(tag: &str) -> Option<&'static str> {
    ALLOWED_TAGS
        .binary_search(&tag)
        .ok()
        .map(|index| ALLOWED_TAGS[index])
}

/// An attribute value.
///
/// Boolean-style attributes (`disabled`, `selected`) are modeled explicitly:
/// `Flag` renders as the bare attribute name, and a falsy boolean attribute is
/// simply never stored, so it can never leak into the output as `attr=""`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttrValue {
    Text(String),
    Flag,
}

/// One child of an element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Child {
    Element(Node),
    /// Entity-escaped at serialization time.
    Text(String),
    /// Inserted verbatim. See [`Node::raw_html`].
    Raw(String),
}

/// One element in the constructed HTML tree.
///
/// A node is exclusively owned by its parent; tag factories append a new child
/// and hand back a `&mut` reference to it, so call chains read as nested
/// construction:
///
/// ```ignore
/// let cell = target.table().tr().td();
/// cell.class("value").text("hello");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    tag: &'static str,
    attributes: BTreeMap<String, AttrValue>,
    children: Vec<Child>,
}

impl Node {
    pub(crate) fn new(tag: &'static str) -> Self {
        Node {
            tag,
            attributes: BTreeMap::new(),
            children: Vec::new(),
        }
    }

    /// Create a detached root element, for building a fragment outside a
    /// full document. Fails with [`PageError::InvalidTag`] for names outside
    /// the allowed set.
    pub fn root(tag: &str) -> PageResult<Node> {
        match allowed_tag(tag) {
            Some(tag) => Ok(Node::new(tag)),
            None => Err(PageError::InvalidTag {
                tag: tag.to_string(),
            }),
        }
    }

    pub fn tag(&self) -> &str {
        self.tag
    }

    /// Append a child element with a dynamically supplied tag name.
    ///
    /// Fails with [`PageError::InvalidTag`] for names outside the allowed set.
    pub fn element(&mut self, tag: &str) -> PageResult<&mut Node> {
        match allowed_tag(tag) {
            Some(tag) => Ok(self.append(tag)),
            None => Err(PageError::InvalidTag {
                tag: tag.to_string(),
            }),
        }
    }

    fn append(&mut self, tag: &'static str) -> &mut Node {
        self.children.push(Child::Element(Node::new(tag)));
        match self.children.last_mut() {
            Some(Child::Element(node)) => node,
            _ => unreachable!(),
        }
    }

    // ─── Tag factories (closed set) ──────────────────────────────────────────

    pub fn a(&mut self) -> &mut Node { self.append("a") }
    pub fn b(&mut self) -> &mut Node { self.append("b") }
    pub fn blink(&mut self) -> &mut Node { self.append("blink") }
    pub fn button(&mut self) -> &mut Node { self.append("button") }
    pub fn col(&mut self) -> &mut Node { self.append("col") }
    pub fn colgroup(&mut self) -> &mut Node { self.append("colgroup") }
    pub fn div(&mut self) -> &mut Node { self.append("div") }
    pub fn h1(&mut self) -> &mut Node { self.append("h1") }
    pub fn h2(&mut self) -> &mut Node { self.append("h2") }
    pub fn h3(&mut self) -> &mut Node { self.append("h3") }
    pub fn li(&mut self) -> &mut Node { self.append("li") }
    pub fn noscript(&mut self) -> &mut Node { self.append("noscript") }
    pub fn optgroup(&mut self) -> &mut Node { self.append("optgroup") }
    pub fn option(&mut self) -> &mut Node { self.append("option") }
    pub fn pre(&mut self) -> &mut Node { self.append("pre") }
    pub fn select(&mut self) -> &mut Node { self.append("select") }
    pub fn span(&mut self) -> &mut Node { self.append("span") }
    pub fn table(&mut self) -> &mut Node { self.append("table") }
    pub fn tbody(&mut self) -> &mut Node { self.append("tbody") }
    pub fn td(&mut self) -> &mut Node { self.append("td") }
    pub fn th(&mut self) -> &mut Node { self.append("th") }
    pub fn tr(&mut self) -> &mut Node { self.append("tr") }
    pub fn ul(&mut self) -> &mut Node { self.append("ul") }

    // ─── Attributes ──────────────────────────────────────────────────────────

    /// Set the `class` attribute.
    pub fn class(&mut self, class: impl Into<String>) -> &mut Self {
        self.attr("class", class)
    }

    /// Set an attribute; setting the same name again overwrites (last write
    /// wins). Attributes serialize in name order.
    pub fn attr(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.attributes
            .insert(name.into(), AttrValue::Text(value.into()));
        self
    }

    /// Set an attribute only when a value is present; `None` omits the
    /// attribute entirely (it is never rendered as `attr=""`).
    pub fn attr_opt(&mut self, name: impl Into<String>, value: Option<&str>) -> &mut Self {
        if let Some(value) = value {
            self.attr(name, value);
        }
        self
    }

    /// Set a boolean-style attribute (`disabled`, `selected`, ...), rendered
    /// as the bare attribute name.
    pub fn flag(&mut self, name: impl Into<String>) -> &mut Self {
        self.attributes.insert(name.into(), AttrValue::Flag);
        self
    }

    /// Set a boolean-style attribute when `on` is true; omit it otherwise.
    pub fn flag_if(&mut self, name: impl Into<String>, on: bool) -> &mut Self {
        if on {
            self.flag(name);
        }
        self
    }

    pub fn attribute(&self, name: &str) -> Option<&AttrValue> {
        self.attributes.get(name)
    }

    // ─── Content ─────────────────────────────────────────────────────────────

    /// Append a text run. Entity-escaped at serialization time.
    pub fn text(&mut self, text: impl Into<String>) -> &mut Self {
        self.children.push(Child::Text(text.into()));
        self
    }

    /// Append pre-escaped markup, inserted verbatim at serialization time.
    ///
    /// This is the trusted-HTML escape hatch: the caller asserts the content is
    /// already safe. Everything else goes through [`Node::text`], which escapes
    /// by default.
    pub fn raw_html(&mut self, html: impl Into<String>) -> &mut Self {
        self.children.push(Child::Raw(html.into()));
        self
    }

    pub fn children(&self) -> &[Child] {
        &self.children
    }

    // ─── Navigation ──────────────────────────────────────────────────────────

    /// The `index`-th element child (text and raw runs are not counted).
    pub fn element_at_mut(&mut self, index: usize) -> Option<&mut Node> {
        self.children
            .iter_mut()
            .filter_map(|child| match child {
                Child::Element(node) => Some(node),
                _ => None,
            })
            .nth(index)
    }

    pub fn first_element_mut(&mut self) -> Option<&mut Node> {
        self.element_at_mut(0)
    }

    pub fn last_element_mut(&mut self) -> Option<&mut Node> {
        self.children.iter_mut().rev().find_map(|child| match child {
            Child::Element(node) => Some(node),
            _ => None,
        })
    }

    pub fn element_count(&self) -> usize {
        self.children
            .iter()
            .filter(|child| matches!(child, Child::Element(_)))
            .count()
    }

    // ─── Serialization ───────────────────────────────────────────────────────

    /// Serialize this subtree to markup.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write(&mut out);
        out
    }

    pub(crate) fn write(&self, out: &mut String) {
        out.push('<');
        out.push_str(self.tag);
        for (name, value) in &self.attributes {
            out.push(' ');
            out.push_str(name);
            if let AttrValue::Text(value) = value {
                out.push_str("=\"");
                out.push_str(&escape(value));
                out.push('"');
            }
        }
        out.push('>');
        if self.children.is_empty() && VOID_TAGS.contains(&self.tag) {
            return;
        }
        for child in &self.children {
            match child {
                Child::Element(node) => node.write(out),
                Child::Text(text) => out.push_str(&escape(text)),
                Child::Raw(html) => out.push_str(html),
            }
        }
        out.push_str("</");
        out.push_str(self.tag);
        out.push('>');
    }
}

/// Entity-escape text for safe insertion into markup or attribute values.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_covers_markup_characters() {
        assert_eq!(escape("a < b & \"c\""), "a &lt; b &amp; &quot;c&quot;");
        assert_eq!(escape("plain"), "plain");
    }

    #[test]
    fn allowed_tags_are_sorted() {
        let mut sorted = ALLOWED_TAGS.to_vec();
        sorted.sort_unstable();
        assert_eq!(sorted, ALLOWED_TAGS);
    }

    #[test]
    fn dynamic_element_rejects_unknown_tags() {
        let mut node = Node::new("div");
        let err = node.element("marquee").unwrap_err();
        assert_eq!(
            err,
            PageError::InvalidTag {
                tag: "marquee".to_string()
            }
        );
        assert!(node.element("span").is_ok());
    }

    #[test]
    fn void_elements_have_no_closing_tag() {
        let mut group = Node::new("colgroup");
        group.col().attr("width", "10%");
        assert_eq!(group.to_html(), "<colgroup><col width=\"10%\"></colgroup>");
    }
}
