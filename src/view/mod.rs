//! The fetch → filter/sort → render core, minus the fetching and rendering.
//!
//! - [`filter`]: conjunctive predicates over search text and dropdowns
//! - [`sort`]: stable ordering with typed comparators
//! - [`state`]: [`CollectionView`], the per-page owner of criteria and derived subset

pub mod filter;
pub mod sort;
pub mod state;

pub use state::CollectionView;
