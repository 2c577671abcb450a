//! Labsite: client-side behaviour for a static academic lab website.
//!
//! The site is a handful of static pages plus three JSON collections
//! (publications, news, projects). This crate provides:
//! - One generic fetch → filter/sort → render pipeline shared by every list page
//! - Debounced free-text search and immediate dropdown filters
//! - A citation panel with clipboard copy and a manual-copy fallback
//! - Escaped, structured markup for every card (no field is ever markup)
//! - Markdown blog pages with frontmatter, navigation menu and anchor helpers

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Host Shim (main.rs)                                │  ← stdin commands
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← Controller
//! │  - Event handling, page state machine               │
//! │  - Debounce and copy-label timers                   │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ View Layer    │   │ Source Layer  │
//! │ (ui/)         │   │ (view/)       │   │ (source/)     │
//! │ - Fragments   │   │ - Filter      │   │ - HTTP/file   │
//! │ - Cards       │   │ - Sort        │   │ - Envelope    │
//! │ - Surface     │   │ - Visible set │   │   decoding    │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain Layer (domain/)                             │
//! │  - Publication, NewsEntry, Project, criteria        │
//! │  - Error types                                      │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`app`]: Controller with event/action model and the page runtime
//! - [`domain`]: Collection records, criteria and errors
//! - [`source`]: Fetching and decoding collections
//! - [`view`]: Filtering, sorting and the visible subset
//! - [`ui`]: Markup fragments, cards, surfaces and Markdown pages
//! - [`observability`]: Tracing setup with optional OTLP file export
//!
//! # Example
//!
//! ```rust
//! use labsite::app::{handle_event, Event};
//! use labsite::domain::Publication;
//! use labsite::source::decode;
//! use labsite::{initialize, Config};
//!
//! let payload = r#"{"publications": [
//!     {"id": "a", "title": "Alpha", "year": 2023, "type": "journal"},
//!     {"id": "b", "title": "Beta", "year": 2021, "type": "conference"},
//!     {"id": "c", "title": "Gamma", "year": 2023, "type": "conference"}
//! ]}"#;
//!
//! let mut state = initialize::<Publication>(&Config::default());
//! handle_event(&mut state, &mut Event::LoadStarted)?;
//! handle_event(&mut state, &mut Event::Loaded(decode(payload)))?;
//! handle_event(&mut state, &mut Event::SelectFilter { field: "type".into(), value: "conference".into() })?;
//!
//! let ids: Vec<&str> = state.view.visible().map(|p| p.id.as_str()).collect();
//! assert_eq!(ids, ["c", "b"]);
//! # Ok::<(), labsite::SiteError>(())
//! ```

pub mod app;
pub mod domain;
pub mod observability;
pub mod source;
pub mod ui;
pub mod view;

pub use app::{handle_event, Action, Event, PageRuntime, PageSettings, PageState};
pub use domain::{Result, SiteError};

use domain::Item;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;
use ui::Taxonomy;

/// Which list page the host is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageKind {
    #[default]
    Publications,
    News,
    Projects,
}

impl FromStr for PageKind {
    type Err = SiteError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "publications" => Ok(Self::Publications),
            "news" => Ok(Self::News),
            "projects" => Ok(Self::Projects),
            other => Err(SiteError::Config(format!("unknown page '{other}'"))),
        }
    }
}

impl fmt::Display for PageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Publications => "publications",
            Self::News => "news",
            Self::Projects => "projects",
        })
    }
}

/// Site configuration.
///
/// Built from `key=value` pairs with [`Config::from_map`] or from a TOML file
/// with [`Config::from_toml_file`].
///
/// # Example
///
/// ```toml
/// base = "https://lab.example.org/"
/// page = "news"
/// debounce_ms = 300
/// trace_level = "debug"
/// trace_file = "/tmp/labsite-otlp.json"
/// labels_file = "labels.toml"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// URL or directory that `data/<collection>.json` is resolved against.
    ///
    /// Default: `"."`
    pub base: String,

    /// Page to drive. Default: publications.
    pub page: PageKind,

    /// Quiet period after the last keystroke before the search applies.
    ///
    /// Default: 300
    pub debounce_ms: u64,

    /// How long the "Copied!" label stays up. Default: 2000
    pub copy_feedback_ms: u64,

    /// Items in a "recent" list. Default: 3
    pub recent_limit: usize,

    /// `EnvFilter` directive, e.g. `"debug"` or `"labsite=trace"`.
    ///
    /// Default: `"info"`
    pub trace_level: Option<String>,

    /// File receiving OTLP JSON span lines. No file export when unset.
    pub trace_file: Option<String>,

    /// TOML file with taxonomy label overrides. See [`ui::labels`].
    pub labels_file: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base: ".".to_string(),
            page: PageKind::default(),
            debounce_ms: 300,
            copy_feedback_ms: 2000,
            recent_limit: 3,
            trace_level: None,
            trace_file: None,
            labels_file: None,
        }
    }
}

impl Config {
    /// Parses configuration from string pairs.
    ///
    /// Lenient: unknown keys are ignored and unparseable values keep their
    /// defaults.
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use labsite::{Config, PageKind};
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("page".to_string(), "news".to_string());
    /// map.insert("debounce_ms".to_string(), "soon".to_string());
    ///
    /// let config = Config::from_map(&map);
    /// assert_eq!(config.page, PageKind::News);
    /// assert_eq!(config.debounce_ms, 300);
    /// ```
    #[must_use]
    pub fn from_map(map: &BTreeMap<String, String>) -> Self {
        let defaults = Self::default();

        Self {
            base: map
                .get("base")
                .map(|s| s.trim())
                .filter(|s| !s.is_empty())
                .map_or(defaults.base, String::from),
            page: parsed(map, "page").unwrap_or(defaults.page),
            debounce_ms: parsed(map, "debounce_ms").unwrap_or(defaults.debounce_ms),
            copy_feedback_ms: parsed(map, "copy_feedback_ms").unwrap_or(defaults.copy_feedback_ms),
            recent_limit: parsed(map, "recent_limit").unwrap_or(defaults.recent_limit),
            trace_level: map.get("trace_level").cloned(),
            trace_file: map.get("trace_file").cloned(),
            labels_file: map.get("labels_file").cloned(),
        }
    }

    /// Reads a TOML config file. Missing keys take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`SiteError::Config`] if the file cannot be read, is not valid
    /// TOML, or has unknown keys or mistyped values.
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            SiteError::Config(format!("failed to read config file {}: {e}", path.display()))
        })?;
        toml::from_str(&contents).map_err(|e| {
            SiteError::Config(format!("failed to parse config file {}: {e}", path.display()))
        })
    }

    #[must_use]
    pub const fn settings(&self) -> PageSettings {
        PageSettings {
            debounce: Duration::from_millis(self.debounce_ms),
            copy_feedback: Duration::from_millis(self.copy_feedback_ms),
        }
    }

    /// Built-in labels, merged with `labels_file` when it loads.
    #[must_use]
    pub fn labels(&self) -> Taxonomy {
        self.labels_file.as_ref().map_or_else(Taxonomy::builtin, |file| {
            Taxonomy::from_file(file).unwrap_or_else(|e| {
                tracing::warn!(labels_file = %file, error = %e, "failed to load labels, using built-in");
                Taxonomy::builtin()
            })
        })
    }
}

fn parsed<T>(map: &BTreeMap<String, String>, key: &str) -> Option<T>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    let raw = map.get(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::debug!(key, value = %raw, error = %e, "invalid config value, using default");
            None
        }
    }
}

/// Creates the state for one list page.
///
/// The page starts `Unloaded`; feed it `Event::LoadStarted` and then the
/// load result, or hand it to a [`PageRuntime`].
pub fn initialize<I: Item>(config: &Config) -> PageState<I> {
    tracing::debug!(collection = I::COLLECTION, base = %config.base, "initializing page");
    PageState::new(config.labels(), config.settings())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn map_parsing_is_lenient() {
        let map: BTreeMap<String, String> = [
            ("base", "https://lab.example.org/"),
            ("page", "blog"),
            ("recent_limit", "5"),
            ("trace_level", "debug"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        let config = Config::from_map(&map);
        assert_eq!(config.base, "https://lab.example.org/");
        assert_eq!(config.page, PageKind::Publications);
        assert_eq!(config.recent_limit, 5);
        assert_eq!(config.trace_level.as_deref(), Some("debug"));
    }

    #[test]
    fn toml_file_is_strict() {
        let mut good = tempfile::NamedTempFile::new().unwrap();
        writeln!(good, "page = \"projects\"\ndebounce_ms = 150").unwrap();
        let config = Config::from_toml_file(good.path()).unwrap();
        assert_eq!(config.page, PageKind::Projects);
        assert_eq!(config.settings().debounce, Duration::from_millis(150));
        assert_eq!(config.copy_feedback_ms, 2000);

        let mut bad = tempfile::NamedTempFile::new().unwrap();
        writeln!(bad, "debounce = 150").unwrap();
        assert!(matches!(Config::from_toml_file(bad.path()), Err(SiteError::Config(_))));
    }

    #[test]
    fn missing_labels_file_falls_back() {
        let config = Config {
            labels_file: Some("/nonexistent/labels.toml".to_string()),
            ..Config::default()
        };
        assert_eq!(config.labels(), Taxonomy::builtin());
    }
}
