//! Rendering layer: from view models to escaped markup in a host document.
//!
//! # Architecture
//!
//! ```text
//! PageState → compute_viewmodel → PageViewModel → render → Surface
//! ```
//!
//! # Modules
//!
//! - [`fragment`]: node tree with automatic escaping and link sanitizing
//! - [`surface`]: the [`Surface`] trait and the in-memory [`Document`]
//! - [`cards`]: per-collection templates and page layouts
//! - [`labels`]: taxonomy display labels
//! - [`viewmodel`]: display-ready page state
//! - [`renderer`]: writes a view model into a surface
//! - [`markdown`]: frontmatter parsing and Markdown pages

pub mod cards;
pub mod fragment;
pub mod labels;
pub mod markdown;
pub mod renderer;
pub mod surface;
pub mod viewmodel;

pub use cards::{format_long_date, Card, CitationLayout, PageLayout};
pub use fragment::{Element, Node};
pub use labels::Taxonomy;
pub use renderer::{render, render_recent};
pub use surface::{Document, Surface};
pub use viewmodel::{CitationViewModel, FilterControl, ListBody, PageViewModel};
