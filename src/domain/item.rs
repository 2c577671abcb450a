//! Shared item model used by every collection.
//!
//! Publications, news entries and projects all implement [`Item`]; their filter
//! state implements [`Criteria`]. The generic view, filter and sort layers only
//! ever talk to these two traits, so one pipeline serves every list page.

use crate::domain::error::{Result, SiteError};
use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use std::fmt;
use std::str::FromStr;

/// Sentinel used by dropdowns for "no restriction".
pub const ALL: &str = "all";

/// A single classification criterion: either the `"all"` sentinel or an exact value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection<T> {
    All,
    Only(T),
}

impl<T> Default for Selection<T> {
    fn default() -> Self {
        Self::All
    }
}

impl<T> Selection<T> {
    #[must_use]
    pub const fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }
}

impl<T: PartialEq> Selection<T> {
    /// Exact match against a scalar field. A missing field only matches `All`.
    #[must_use]
    pub fn matches(&self, value: Option<&T>) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => value.is_some_and(|v| v == wanted),
        }
    }
}

impl Selection<String> {
    /// Membership test against a set-valued field such as tags.
    #[must_use]
    pub fn contained_in(&self, values: &[String]) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => values.iter().any(|v| v == wanted),
        }
    }
}

impl<T> FromStr for Selection<T>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    type Err = SiteError;

    fn from_str(raw: &str) -> Result<Self> {
        let raw = raw.trim();
        if raw.is_empty() || raw == ALL {
            return Ok(Self::All);
        }
        raw.parse::<T>()
            .map(Self::Only)
            .map_err(|e| SiteError::Parse(format!("invalid selection '{raw}': {e}")))
    }
}

impl<T: fmt::Display> fmt::Display for Selection<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str(ALL),
            Self::Only(value) => value.fmt(f),
        }
    }
}

/// Fields a collection can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Title,
    Year,
    Date,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ascending,
    Descending,
}

/// Typed sort value produced by an item for a given [`SortField`].
///
/// Values of the same variant compare by their natural type (numbers
/// numerically, dates chronologically, text case-insensitively).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortValue<'a> {
    Text(&'a str),
    Number(i64),
    Date(NaiveDate),
    Missing,
}

/// A record in one of the site's JSON collections.
pub trait Item: DeserializeOwned + Clone + fmt::Debug + Send + Sync + 'static {
    /// Filter state for this collection.
    type Criteria: Criteria<Self>;

    /// Name of the array field in the JSON envelope, also the resource name.
    const COLLECTION: &'static str;

    /// Key the page is ordered by when it first loads (always descending).
    const DEFAULT_SORT: SortField;

    fn id(&self) -> &str;

    /// Mutable id, used by the loader to assign derived ids.
    fn id_mut(&mut self) -> &mut String;

    fn title(&self) -> &str;

    /// Calendar year of the item, used for the year dropdown.
    fn year(&self) -> i32;

    /// Free-text fields searched by the search box.
    fn search_fields(&self) -> Vec<&str>;

    fn sort_value(&self, field: SortField) -> SortValue<'_>;

    /// Optional plain-text citation shown in the citation panel.
    fn citation(&self) -> Option<&str> {
        None
    }

    /// Checks invariants serde cannot express.
    ///
    /// # Errors
    ///
    /// Returns [`SiteError::Parse`] when a required field is blank.
    fn validate(&self) -> Result<()> {
        if self.title().trim().is_empty() {
            return Err(SiteError::Parse(format!(
                "{} item '{}' has an empty title",
                Self::COLLECTION,
                self.id()
            )));
        }
        Ok(())
    }
}

/// Filter criteria for a collection of `I`.
///
/// Each implementor holds the search text plus one [`Selection`] per dropdown.
/// `Default` is the untouched page state.
pub trait Criteria<I>: Default + Clone + fmt::Debug + PartialEq + Send + Sync + 'static {
    /// Dropdown field names in display order.
    const FIELDS: &'static [&'static str];

    fn search_text(&self) -> &str;

    fn set_search_text(&mut self, text: &str);

    /// True when every classification criterion accepts the item.
    fn matches_facets(&self, item: &I) -> bool;

    /// Updates one dropdown criterion from its raw option value.
    ///
    /// # Errors
    ///
    /// Returns [`SiteError::Config`] for an unknown field and
    /// [`SiteError::Parse`] for a value of the wrong type.
    fn select(&mut self, field: &str, value: &str) -> Result<()>;

    /// Current raw option value of a dropdown, `None` for an unknown field.
    fn selection(&self, field: &str) -> Option<String>;
}

pub(crate) fn unknown_field(collection: &str, field: &str) -> SiteError {
    SiteError::Config(format!("{collection} has no filter named '{field}'"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_sentinel_and_blank_parse_to_all() {
        assert_eq!("all".parse::<Selection<i32>>().unwrap(), Selection::All);
        assert_eq!("".parse::<Selection<i32>>().unwrap(), Selection::All);
        assert_eq!("2021".parse::<Selection<i32>>().unwrap(), Selection::Only(2021));
        assert!("twenty".parse::<Selection<i32>>().is_err());
    }

    #[test]
    fn missing_field_only_matches_all() {
        let only: Selection<String> = Selection::Only("talk".into());
        assert!(!only.matches(None));
        assert!(Selection::<String>::All.matches(None));
        assert!(only.matches(Some(&"talk".to_string())));
    }

    #[test]
    fn set_membership() {
        let tags = vec!["game-theory".to_string(), "chemical-ai".to_string()];
        assert!(Selection::Only("chemical-ai".to_string()).contained_in(&tags));
        assert!(!Selection::Only("nlp".to_string()).contained_in(&tags));
        assert!(!Selection::Only("nlp".to_string()).contained_in(&[]));
    }

    #[test]
    fn display_round_trips_option_values() {
        assert_eq!(Selection::<i32>::All.to_string(), "all");
        assert_eq!(Selection::Only(2019).to_string(), "2019");
    }
}
