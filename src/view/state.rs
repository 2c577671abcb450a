//! Per-page view state.
//!
//! [`CollectionView`] owns the immutable full collection, the current criteria
//! and sort order, and the derived visible subset. It is the only place the
//! derived subset is mutated: every change goes through [`CollectionView::recompute`].
//!
//! # Example
//!
//! ```
//! use labsite::domain::{Criteria, Publication};
//! use labsite::view::CollectionView;
//!
//! let items: Vec<Publication> = serde_json::from_str(r#"[
//!     {"id": "a", "title": "A", "year": 2023, "type": "journal"},
//!     {"id": "b", "title": "B", "year": 2021, "type": "conference"},
//!     {"id": "c", "title": "C", "year": 2023, "type": "conference"}
//! ]"#).unwrap();
//!
//! let mut view = CollectionView::new(items);
//! view.criteria_mut().select("type", "conference").unwrap();
//! view.recompute();
//!
//! let ids: Vec<&str> = view.visible().map(|p| p.id.as_str()).collect();
//! assert_eq!(ids, ["c", "b"]);
//! ```

use super::{filter, sort};
use crate::domain::{Direction, Item, SortField};

/// Full collection plus the filtered, sorted view of it.
#[derive(Debug, Clone)]
pub struct CollectionView<I: Item> {
    /// Every loaded item, in load order. Never mutated after construction.
    items: Vec<I>,

    /// Current filter criteria. Mutated only through [`Self::criteria_mut`] and
    /// [`Self::reset`].
    criteria: I::Criteria,

    sort_field: SortField,
    direction: Direction,

    /// Indices into `items` for the visible subset, in display order.
    visible: Vec<usize>,
}

impl<I: Item> CollectionView<I> {
    /// Creates a view with default criteria, sorted by the collection's default
    /// key, most recent first.
    #[must_use]
    pub fn new(items: Vec<I>) -> Self {
        let mut view = Self {
            items,
            criteria: I::Criteria::default(),
            sort_field: I::DEFAULT_SORT,
            direction: Direction::Descending,
            visible: Vec::new(),
        };
        view.recompute();
        view
    }

    #[must_use]
    pub fn items(&self) -> &[I] {
        &self.items
    }

    #[must_use]
    pub const fn criteria(&self) -> &I::Criteria {
        &self.criteria
    }

    /// Mutable criteria. Callers must [`recompute`](Self::recompute) afterwards.
    pub fn criteria_mut(&mut self) -> &mut I::Criteria {
        &mut self.criteria
    }

    #[must_use]
    pub const fn sort_order(&self) -> (SortField, Direction) {
        (self.sort_field, self.direction)
    }

    /// Changes the ordering key. Callers must [`recompute`](Self::recompute) afterwards.
    pub fn set_sort(&mut self, field: SortField, direction: Direction) {
        self.sort_field = field;
        self.direction = direction;
    }

    /// Restores default criteria and ordering and recomputes.
    pub fn reset(&mut self) {
        self.criteria = I::Criteria::default();
        self.sort_field = I::DEFAULT_SORT;
        self.direction = Direction::Descending;
        self.recompute();
    }

    /// Re-derives the visible subset: filter, then stable sort.
    pub fn recompute(&mut self) {
        let _span = tracing::debug_span!(
            "recompute",
            collection = I::COLLECTION,
            total_items = self.items.len(),
            sort = ?self.sort_field
        )
        .entered();

        let mut positions = filter::filter(&self.items, &self.criteria);
        sort::sort(&self.items, &mut positions, self.sort_field, self.direction);
        self.visible = positions;

        tracing::debug!(visible_count = self.visible.len(), "view recomputed");
    }

    /// Visible items in display order.
    pub fn visible(&self) -> impl ExactSizeIterator<Item = &I> + '_ {
        self.visible.iter().map(|&i| &self.items[i])
    }

    #[must_use]
    pub fn visible_len(&self) -> usize {
        self.visible.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.visible.is_empty()
    }

    /// Looks an id up in the full collection, ignoring the current filters.
    #[must_use]
    pub fn find(&self, id: &str) -> Option<&I> {
        self.items.iter().find(|item| item.id() == id)
    }

    /// Distinct years across the full collection, newest first.
    #[must_use]
    pub fn year_options(&self) -> Vec<i32> {
        let mut years: Vec<i32> = self.items.iter().map(I::year).collect();
        years.sort_unstable_by(|a, b| b.cmp(a));
        years.dedup();
        years
    }

    /// Values seen for a set-valued or scalar facet, in first-seen order.
    ///
    /// Used to populate dropdowns whose options come from the data rather than
    /// from a fixed list.
    #[must_use]
    pub fn facet_options<F>(&self, values: F) -> Vec<String>
    where
        F: Fn(&I) -> Vec<&str>,
    {
        let mut seen: Vec<String> = Vec::new();
        for item in &self.items {
            for value in values(item) {
                if !seen.iter().any(|s| s == value) {
                    seen.push(value.to_string());
                }
            }
        }
        seen
    }

    /// First `limit` items in default order, regardless of current criteria.
    #[must_use]
    pub fn recent(&self, limit: usize) -> Vec<&I> {
        let mut positions: Vec<usize> = (0..self.items.len()).collect();
        sort::sort(&self.items, &mut positions, I::DEFAULT_SORT, Direction::Descending);
        positions.into_iter().take(limit).map(|i| &self.items[i]).collect()
    }
}
