//! Stable, type-aware ordering.
//!
//! Years compare as integers and dates as calendar dates, never as strings.
//! Items without a value for the requested key always go last, whichever the
//! direction.

use crate::domain::{Direction, Item, SortField, SortValue};
use std::cmp::Ordering;

/// Compares two sort values of the same field.
///
/// `Missing` orders after everything. Mismatched variants (which a single
/// field never produces) compare equal so the stable sort keeps their order.
#[must_use]
pub fn compare_values(a: SortValue<'_>, b: SortValue<'_>, direction: Direction) -> Ordering {
    let natural = match (a, b) {
        (SortValue::Missing, SortValue::Missing) => return Ordering::Equal,
        (SortValue::Missing, _) => return Ordering::Greater,
        (_, SortValue::Missing) => return Ordering::Less,
        (SortValue::Number(x), SortValue::Number(y)) => x.cmp(&y),
        (SortValue::Date(x), SortValue::Date(y)) => x.cmp(&y),
        (SortValue::Text(x), SortValue::Text(y)) => x.to_lowercase().cmp(&y.to_lowercase()),
        _ => Ordering::Equal,
    };

    match direction {
        Direction::Ascending => natural,
        Direction::Descending => natural.reverse(),
    }
}

/// Reorders `positions` (indices into `items`) by `field`.
///
/// Uses a stable sort, so ties keep the order the filter produced.
pub fn sort<I: Item>(items: &[I], positions: &mut [usize], field: SortField, direction: Direction) {
    positions.sort_by(|&a, &b| {
        compare_values(items[a].sort_value(field), items[b].sort_value(field), direction)
    });
}
