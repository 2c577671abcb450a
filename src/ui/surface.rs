//! The host document the renderer writes into.
//!
//! A page is a set of named regions (`publications-container`, `no-results`,
//! `bibtex-modal`, ...). The renderer only ever replaces a region's content
//! wholesale, toggles its visibility, or flips a class on it, which is what
//! makes rendering idempotent.
//!
//! [`Document`] is the in-memory implementation used by the `labsite` binary
//! and by tests.

use super::fragment::{self, Node};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Write as _;

/// Operations the renderer needs from its host.
///
/// Every method is a no-op returning `false` when the region does not exist,
/// so pages that omit a region degrade silently.
pub trait Surface {
    fn has_region(&self, id: &str) -> bool;

    /// Replaces the region's content with `nodes`.
    fn replace(&mut self, id: &str, nodes: &[Node]) -> bool;

    fn set_hidden(&mut self, id: &str, hidden: bool) -> bool;

    fn set_class(&mut self, id: &str, class: &str, enabled: bool) -> bool;
}

/// State of one region in a [`Document`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Region {
    pub html: String,
    pub hidden: bool,
    pub classes: BTreeSet<String>,
    /// Number of content replacements so far.
    pub writes: usize,
}

/// In-memory document made of named regions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    regions: BTreeMap<String, Region>,
}

impl Document {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A document containing the given empty, visible regions.
    #[must_use]
    pub fn with_regions<'a>(ids: impl IntoIterator<Item = &'a str>) -> Self {
        let mut document = Self::new();
        for id in ids {
            document.add_region(id);
        }
        document
    }

    pub fn add_region(&mut self, id: &str) {
        self.regions.entry(id.to_string()).or_default();
    }

    #[must_use]
    pub fn region(&self, id: &str) -> Option<&Region> {
        self.regions.get(id)
    }

    /// Content of a region, empty if it does not exist.
    #[must_use]
    pub fn html(&self, id: &str) -> &str {
        self.regions.get(id).map_or("", |r| r.html.as_str())
    }

    #[must_use]
    pub fn is_hidden(&self, id: &str) -> bool {
        self.regions.get(id).is_some_and(|r| r.hidden)
    }

    #[must_use]
    pub fn has_class(&self, id: &str, class: &str) -> bool {
        self.regions.get(id).is_some_and(|r| r.classes.contains(class))
    }

    /// Serializes every region as a `<section>`, in id order.
    #[must_use]
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        for (id, region) in &self.regions {
            let _ = write!(out, "<section id=\"{}\"", html_escape::encode_double_quoted_attribute(id));
            if !region.classes.is_empty() {
                let classes: Vec<&str> = region.classes.iter().map(String::as_str).collect();
                let _ = write!(out, " class=\"{}\"", classes.join(" "));
            }
            if region.hidden {
                out.push_str(" hidden");
            }
            out.push('>');
            out.push_str(&region.html);
            out.push_str("</section>\n");
        }
        out
    }
}

impl Surface for Document {
    fn has_region(&self, id: &str) -> bool {
        self.regions.contains_key(id)
    }

    fn replace(&mut self, id: &str, nodes: &[Node]) -> bool {
        let Some(region) = self.regions.get_mut(id) else {
            return false;
        };
        region.html = fragment::to_html(nodes);
        region.writes += 1;
        true
    }

    fn set_hidden(&mut self, id: &str, hidden: bool) -> bool {
        let Some(region) = self.regions.get_mut(id) else {
            return false;
        };
        region.hidden = hidden;
        true
    }

    fn set_class(&mut self, id: &str, class: &str, enabled: bool) -> bool {
        let Some(region) = self.regions.get_mut(id) else {
            return false;
        };
        if enabled {
            region.classes.insert(class.to_string());
        } else {
            region.classes.remove(class);
        }
        true
    }
}
