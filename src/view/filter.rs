//! Conjunctive filtering of a collection against its criteria.

use crate::domain::{Criteria, Item};

/// Normalized search needle: trimmed and lowercased. Empty means "match all".
#[must_use]
pub fn normalize_query(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// True when any free-text field contains the (already normalized) needle.
#[must_use]
pub fn matches_search<I: Item>(item: &I, needle: &str) -> bool {
    needle.is_empty()
        || item
            .search_fields()
            .iter()
            .any(|field| field.to_lowercase().contains(needle))
}

/// Returns the positions of every item that satisfies all active criteria.
///
/// Relative order of `items` is preserved. Positions are indices into `items`,
/// so callers can keep referring to the immutable full collection.
#[must_use]
pub fn filter<I: Item>(items: &[I], criteria: &I::Criteria) -> Vec<usize> {
    let needle = normalize_query(criteria.search_text());

    items
        .iter()
        .enumerate()
        .filter(|(_, item)| matches_search(*item, &needle) && criteria.matches_facets(item))
        .map(|(index, _)| index)
        .collect()
}
