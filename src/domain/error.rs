//! Error types for the site scripts.
//!
//! This module defines the centralized error type [`SiteError`] and a type alias
//! [`Result`] used throughout the crate. Most variants never reach the page:
//! the data source downgrades fetch and parse failures to an empty collection,
//! and the controller swallows lookup misses. See the propagation notes on each
//! variant.

use thiserror::Error;

/// The main error type for site operations.
///
/// # Examples
///
/// ```
/// use labsite::SiteError;
///
/// let err = SiteError::LookupMiss("smith2023".to_string());
/// assert_eq!(err.to_string(), "No item with id: smith2023");
/// ```
#[derive(Debug, Error)]
pub enum SiteError {
    /// Network, HTTP status or filesystem failure while reading a resource.
    ///
    /// Caught at the data source boundary and logged; the page shows an empty
    /// collection with a "failed to load" message.
    #[error("Fetch error: {0}")]
    Fetch(String),

    /// Malformed JSON payload, missing collection field, or an item that lacks a
    /// required field or has an unparseable year/date.
    ///
    /// Whole-payload parse errors empty the collection; per-item errors only drop
    /// the offending item.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Requested item id is not in the collection.
    ///
    /// Treated as a no-op by the controller (the citation panel stays closed).
    #[error("No item with id: {0}")]
    LookupMiss(String),

    /// Clipboard capability unavailable or permission denied.
    ///
    /// Surfaced to the user as a "copy manually" fallback line.
    #[error("Clipboard error: {0}")]
    Clipboard(String),

    /// Configuration value is invalid or a config file could not be parsed.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A specialized `Result` type for site operations.
pub type Result<T> = std::result::Result<T, SiteError>;
