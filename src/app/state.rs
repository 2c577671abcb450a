//! Per-page application state and view model computation.
//!
//! [`PageState`] is the single owner of everything mutable on a list page: the
//! lifecycle status, the [`CollectionView`] with its criteria, the raw search
//! box text (which runs ahead of the applied criteria while a debounce is
//! pending), and the citation panel. Only the event handler mutates it.
//!
//! # Example
//!
//! ```
//! use labsite::app::{PageSettings, PageState};
//! use labsite::domain::Publication;
//! use labsite::ui::{ListBody, Taxonomy};
//!
//! let state: PageState<Publication> = PageState::new(Taxonomy::builtin(), PageSettings::default());
//! let vm = state.compute_viewmodel();
//! assert_eq!(vm.body, ListBody::Loading);
//! ```

use super::debounce::Debouncer;
use super::modes::{CopyStatus, PageStatus};
use crate::domain::{Criteria, Item, ALL};
use crate::source::LoadReport;
use crate::ui::viewmodel::{CitationViewModel, FilterControl, ListBody, PageViewModel};
use crate::ui::{cards, Card, Taxonomy};
use crate::view::CollectionView;
use std::time::Duration;

/// Shown after a failed clipboard write.
pub const COPY_FALLBACK: &str = "Failed to copy BibTeX. Please copy manually.";

/// Timing knobs for a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSettings {
    /// Quiet period after the last keystroke before the search applies.
    pub debounce: Duration,
    /// How long "Copied!" stays on the copy button.
    pub copy_feedback: Duration,
}

impl Default for PageSettings {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(300),
            copy_feedback: Duration::from_millis(2000),
        }
    }
}

/// Citation panel state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CitationPanel {
    pub open: bool,
    pub text: String,
    pub copy: CopyStatus,
}

/// State of one list page.
#[derive(Debug, Clone)]
pub struct PageState<I: Item> {
    pub status: PageStatus,

    /// Loaded collection, criteria and visible subset. Empty until loaded.
    pub view: CollectionView<I>,

    /// Current content of the search box. Applied to the criteria when the
    /// debounce fires, on a dropdown change, or never if reset first.
    pub search_input: String,

    pub search_debounce: Debouncer,

    pub citation: CitationPanel,

    pub copy_reset: Debouncer,

    pub labels: Taxonomy,
}

impl<I: Item> PageState<I> {
    #[must_use]
    pub fn new(labels: Taxonomy, settings: PageSettings) -> Self {
        Self {
            status: PageStatus::Unloaded,
            view: CollectionView::new(Vec::new()),
            search_input: String::new(),
            search_debounce: Debouncer::new(settings.debounce),
            citation: CitationPanel::default(),
            copy_reset: Debouncer::new(settings.copy_feedback),
            labels,
        }
    }

    /// Installs a loaded collection, keeping any criteria chosen while loading.
    ///
    /// The items are moved out of `report`.
    pub fn install(&mut self, report: &mut LoadReport<I>) {
        let criteria = self.view.criteria().clone();
        let mut view = CollectionView::new(std::mem::take(&mut report.items));
        *view.criteria_mut() = criteria;
        view.recompute();
        self.view = view;

        self.status = if report.failed {
            PageStatus::LoadFailed
        } else {
            PageStatus::Loaded
        };

        tracing::debug!(
            status = ?self.status,
            items = self.view.items().len(),
            diagnostics = report.diagnostics.len(),
            "collection installed"
        );
    }

    /// Copies the search box text into the criteria and recomputes.
    pub fn apply_search(&mut self) {
        let text = self.search_input.clone();
        self.view.criteria_mut().set_search_text(&text);
        self.view.recompute();
    }

    /// Clears the search box and every criterion.
    pub fn reset(&mut self) {
        self.search_input.clear();
        self.search_debounce.cancel();
        self.view.reset();
    }
}

impl<I: Card> PageState<I> {
    /// Builds the display-ready model for the renderer.
    #[must_use]
    pub fn compute_viewmodel(&self) -> PageViewModel {
        let layout = I::LAYOUT;

        let body = match self.status {
            PageStatus::Unloaded | PageStatus::Loading => ListBody::Loading,
            PageStatus::LoadFailed => ListBody::Failed {
                message: format!("Failed to load {}. Please try again later.", I::COLLECTION),
            },
            PageStatus::Loaded if self.view.is_empty() => ListBody::Empty {
                message: format!("No {} match the current filters.", I::COLLECTION),
            },
            PageStatus::Loaded => ListBody::Cards(cards::cards(&self.view, &self.labels)),
        };

        let filters = <I::Criteria as Criteria<I>>::FIELDS
            .iter()
            .map(|&field| FilterControl {
                field,
                selected: self
                    .view
                    .criteria()
                    .selection(field)
                    .unwrap_or_else(|| ALL.to_string()),
                options: I::filter_options(&self.view, field, &self.labels),
            })
            .collect();

        let citation = layout.citation.map(|_| CitationViewModel {
            open: self.citation.open,
            text: self.citation.text.clone(),
            copy_label: self.citation.copy.label(),
            copied: self.citation.copy == CopyStatus::Copied,
            fallback: (self.citation.copy == CopyStatus::Failed).then_some(COPY_FALLBACK),
        });

        PageViewModel {
            layout,
            body,
            search_text: self.search_input.clone(),
            filters,
            citation,
        }
    }
}
