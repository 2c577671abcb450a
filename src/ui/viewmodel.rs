//! View model types representing renderable page state.
//!
//! A [`PageViewModel`] is computed from the page state by
//! `PageState::compute_viewmodel` and consumed by [`super::render`]. It holds
//! display-ready data only: cards are already built, labels already resolved.

use super::cards::PageLayout;
use super::fragment::Node;

/// Everything the renderer needs for one list page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageViewModel {
    pub layout: PageLayout,
    pub body: ListBody,
    /// Current content of the search box.
    pub search_text: String,
    pub filters: Vec<FilterControl>,
    /// `None` when the page has no citation panel.
    pub citation: Option<CitationViewModel>,
}

/// What the list area shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListBody {
    /// The collection is still being fetched.
    Loading,
    /// At least one visible item.
    Cards(Vec<Node>),
    /// Loaded, but nothing matches the criteria.
    Empty { message: String },
    /// The collection could not be loaded.
    Failed { message: String },
}

/// One dropdown and its options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterControl {
    pub field: &'static str,
    /// Raw value of the selected option (`"all"` when unrestricted).
    pub selected: String,
    /// `(value, label)` pairs after the leading "all" option.
    pub options: Vec<(String, String)>,
}

/// Citation panel contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CitationViewModel {
    pub open: bool,
    pub text: String,
    pub copy_label: &'static str,
    pub copied: bool,
    /// Shown after a failed copy.
    pub fallback: Option<&'static str>,
}
