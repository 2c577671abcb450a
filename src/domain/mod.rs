//! Domain layer: collection records, filter criteria and errors.
//!
//! Nothing in here knows about HTTP, timers or markup. The view, source and ui
//! layers are generic over the [`Item`] and [`Criteria`] traits defined in
//! [`item`].
//!
//! # Organization
//!
//! - [`error`]: Error types and result alias
//! - [`item`]: Shared traits, selections and sort values
//! - [`fields`]: Lenient year/date decoders for the JSON data files
//! - [`publication`], [`news`], [`project`]: The three collections

pub mod error;
pub mod fields;
pub mod item;
pub mod news;
pub mod project;
pub mod publication;

pub use error::{Result, SiteError};
pub use item::{Criteria, Direction, Item, Selection, SortField, SortValue, ALL};
pub use news::{NewsCriteria, NewsEntry};
pub use project::{Project, ProjectCriteria};
pub use publication::{Publication, PublicationCriteria};
