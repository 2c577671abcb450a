//! Structured markup fragments with automatic escaping.
//!
//! Templates build a tree of [`Node`]s instead of formatting strings. Text and
//! attribute values are escaped when the tree is serialized, so a record field
//! can never be interpreted as markup. The only unescaped content is
//! [`Node::Raw`], reserved for output of a trusted Markdown converter.
//!
//! # Example
//!
//! ```
//! use labsite::ui::fragment::{Element, Node};
//!
//! let card = Element::new("h3")
//!     .class("publication-title")
//!     .text("<script>alert(1)</script>");
//!
//! assert_eq!(
//!     Node::from(card).to_html(),
//!     r#"<h3 class="publication-title">&lt;script&gt;alert(1)&lt;/script&gt;</h3>"#
//! );
//! ```

use std::fmt::Write as _;

/// Elements that never have children or a closing tag.
const VOID_ELEMENTS: &[&str] = &["br", "hr", "img", "input", "link", "meta"];

/// One node of a markup fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    /// Plain text, escaped on output.
    Text(String),
    /// Pre-rendered trusted markup, emitted verbatim.
    Raw(String),
}

impl Node {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// Serializes this node and its descendants.
    #[must_use]
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        match self {
            Self::Text(text) => out.push_str(&html_escape::encode_text(text)),
            Self::Raw(markup) => out.push_str(markup),
            Self::Element(element) => element.write_html(out),
        }
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Self::Element(element)
    }
}

/// Serializes a sequence of sibling nodes.
#[must_use]
pub fn to_html(nodes: &[Node]) -> String {
    let mut out = String::new();
    for node in nodes {
        node.write_html(&mut out);
    }
    out
}

/// An element with attributes and children, built fluently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    tag: &'static str,
    attributes: Vec<(&'static str, String)>,
    children: Vec<Node>,
}

impl Element {
    #[must_use]
    pub const fn new(tag: &'static str) -> Self {
        Self {
            tag,
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    #[must_use]
    pub const fn tag(&self) -> &'static str {
        self.tag
    }

    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
    }

    #[must_use]
    pub fn children(&self) -> &[Node] {
        &self.children
    }

    #[must_use]
    pub fn attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.attributes.push((name, value.into()));
        self
    }

    #[must_use]
    pub fn class(self, class: impl Into<String>) -> Self {
        self.attr("class", class)
    }

    #[must_use]
    pub fn id(self, id: impl Into<String>) -> Self {
        self.attr("id", id)
    }

    #[must_use]
    pub fn child(mut self, node: impl Into<Node>) -> Self {
        self.children.push(node.into());
        self
    }

    /// Appends a child only when one is given.
    #[must_use]
    pub fn maybe_child(mut self, node: Option<impl Into<Node>>) -> Self {
        if let Some(node) = node {
            self.children.push(node.into());
        }
        self
    }

    #[must_use]
    pub fn children_from<N: Into<Node>>(mut self, nodes: impl IntoIterator<Item = N>) -> Self {
        self.children.extend(nodes.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn text(self, text: impl Into<String>) -> Self {
        self.child(Node::Text(text.into()))
    }

    /// A hyperlink, or `None` when the URL's scheme is not allowed.
    #[must_use]
    pub fn link(href: &str, label: impl Into<String>) -> Option<Self> {
        safe_url(href).map(|href| Self::new("a").attr("href", href).text(label))
    }

    fn write_html(&self, out: &mut String) {
        out.push('<');
        out.push_str(self.tag);
        for (name, value) in &self.attributes {
            let _ = write!(
                out,
                " {name}=\"{}\"",
                html_escape::encode_double_quoted_attribute(value)
            );
        }
        out.push('>');

        if VOID_ELEMENTS.contains(&self.tag) {
            return;
        }

        for child in &self.children {
            child.write_html(out);
        }
        let _ = write!(out, "</{}>", self.tag);
    }
}

/// Returns the URL if it is safe to place in an `href`.
///
/// Accepts `http`, `https` and `mailto` URLs plus relative references
/// (paths, fragments, queries). Anything carrying another scheme, such as
/// `javascript:` or `data:`, is rejected.
#[must_use]
pub fn safe_url(url: &str) -> Option<&str> {
    let trimmed = url.trim();
    if trimmed.is_empty() {
        return None;
    }

    let lower = trimmed.to_ascii_lowercase();
    if ["http://", "https://", "mailto:"]
        .iter()
        .any(|scheme| lower.starts_with(scheme))
    {
        return Some(trimmed);
    }

    // A colon before any '/', '?' or '#' means the reference names a scheme.
    let scheme_end = lower.find(|c| matches!(c, '/' | '?' | '#')).unwrap_or(lower.len());
    if lower[..scheme_end].contains(':') {
        return None;
    }

    Some(trimmed)
}
