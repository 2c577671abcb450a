//! Display labels for taxonomy values.
//!
//! Tags, news categories, publication types and project statuses are stored
//! as machine values (`llm-theory-of-mind`, `hiring`). [`Taxonomy`] maps them
//! to human labels. Unknown values are displayed verbatim rather than
//! rejected.
//!
//! # TOML Format
//!
//! ```toml
//! [tags]
//! llm-theory-of-mind = "LLM & ToM"
//!
//! [categories]
//! hiring = "Hiring"
//!
//! [types]
//! conference = "Conference"
//!
//! [statuses]
//! active = "Active"
//! ```
//!
//! A file loaded with [`Taxonomy::from_file`] extends the built-in labels; its
//! entries win on conflict.
//!
//! # Example
//!
//! ```
//! use labsite::ui::Taxonomy;
//!
//! let labels = Taxonomy::default();
//! assert_eq!(labels.tag("game-theory"), "Game Theory");
//! assert_eq!(labels.tag("quantum-widgets"), "quantum-widgets");
//! ```

use crate::domain::error::{Result, SiteError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

const BUILTIN: &str = include_str!("../../labels/default.toml");

/// Value-to-label maps, one per taxonomy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Taxonomy {
    #[serde(default)]
    pub tags: BTreeMap<String, String>,
    #[serde(default)]
    pub categories: BTreeMap<String, String>,
    #[serde(default)]
    pub types: BTreeMap<String, String>,
    #[serde(default)]
    pub statuses: BTreeMap<String, String>,
}

impl Default for Taxonomy {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Taxonomy {
    /// No labels at all: every value displays verbatim.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            tags: BTreeMap::new(),
            categories: BTreeMap::new(),
            types: BTreeMap::new(),
            statuses: BTreeMap::new(),
        }
    }

    /// The labels shipped with the crate.
    #[must_use]
    pub fn builtin() -> Self {
        toml::from_str(BUILTIN).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "built-in labels failed to parse, showing raw values");
            Self::empty()
        })
    }

    /// Built-in labels extended with overrides from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`SiteError::Config`] if the file cannot be read or parsed.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            SiteError::Config(format!("failed to read labels file {}: {e}", path.display()))
        })?;
        let overrides: Self = toml::from_str(&contents).map_err(|e| {
            SiteError::Config(format!("failed to parse labels file {}: {e}", path.display()))
        })?;

        let mut labels = Self::builtin();
        labels.merge(overrides);
        Ok(labels)
    }

    pub fn merge(&mut self, other: Self) {
        self.tags.extend(other.tags);
        self.categories.extend(other.categories);
        self.types.extend(other.types);
        self.statuses.extend(other.statuses);
    }

    #[must_use]
    pub fn tag<'a>(&'a self, value: &'a str) -> &'a str {
        lookup(&self.tags, value)
    }

    #[must_use]
    pub fn category<'a>(&'a self, value: &'a str) -> &'a str {
        lookup(&self.categories, value)
    }

    #[must_use]
    pub fn kind<'a>(&'a self, value: &'a str) -> &'a str {
        lookup(&self.types, value)
    }

    #[must_use]
    pub fn status<'a>(&'a self, value: &'a str) -> &'a str {
        lookup(&self.statuses, value)
    }
}

fn lookup<'a>(map: &'a BTreeMap<String, String>, value: &'a str) -> &'a str {
    map.get(value).map_or(value, String::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_maps_known_values() {
        let labels = Taxonomy::builtin();
        assert_eq!(labels.tag("llm-theory-of-mind"), "LLM & ToM");
        assert_eq!(labels.category("hiring"), "Hiring");
        assert_eq!(labels.kind("conference"), "conference");
        assert_eq!(Taxonomy::empty().tag("game-theory"), "game-theory");
    }

    #[test]
    fn file_overrides_extend_builtin() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("labels.toml");
        std::fs::write(&path, "[tags]\ngame-theory = \"Games\"\n[statuses]\nactive = \"Active\"\n").unwrap();

        let labels = Taxonomy::from_file(&path).unwrap();
        assert_eq!(labels.tag("game-theory"), "Games");
        assert_eq!(labels.tag("chemical-ai"), "Chemical AI");
        assert_eq!(labels.status("active"), "Active");
    }

    #[test]
    fn unreadable_file_is_a_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("labels.toml");
        std::fs::write(&path, "[tags\n").unwrap();
        assert!(matches!(Taxonomy::from_file(&path), Err(SiteError::Config(_))));
        assert!(matches!(
            Taxonomy::from_file(dir.path().join("missing.toml")),
            Err(SiteError::Config(_))
        ));
    }
}
