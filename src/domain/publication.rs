//! Publication records and their filter criteria.
//!
//! Publications are filtered by year, type (journal, conference, ...) and
//! research theme (one of the item's tags), and searched across title,
//! authors, venue and abstract.

use super::fields;
use super::item::{unknown_field, Criteria, Item, Selection, SortField, SortValue};
use crate::domain::error::Result;
use serde::Deserialize;

/// One entry of `data/publications.json`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Publication {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub authors: String,
    #[serde(default)]
    pub venue: String,
    #[serde(deserialize_with = "fields::year")]
    pub year: i32,
    /// Publication type, e.g. `journal` or `conference`.
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, rename = "abstract")]
    pub abstract_text: Option<String>,
    #[serde(default)]
    pub pdf: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub project: Option<String>,
    #[serde(default)]
    pub bibtex: Option<String>,
}

impl Item for Publication {
    type Criteria = PublicationCriteria;

    const COLLECTION: &'static str = "publications";
    const DEFAULT_SORT: SortField = SortField::Year;

    fn id(&self) -> &str {
        &self.id
    }

    fn id_mut(&mut self) -> &mut String {
        &mut self.id
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn year(&self) -> i32 {
        self.year
    }

    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.title.as_str(), self.authors.as_str(), self.venue.as_str()];
        if let Some(text) = &self.abstract_text {
            fields.push(text);
        }
        fields
    }

    fn sort_value(&self, field: SortField) -> SortValue<'_> {
        match field {
            SortField::Title => SortValue::Text(&self.title),
            SortField::Year => SortValue::Number(i64::from(self.year)),
            SortField::Date => SortValue::Missing,
        }
    }

    fn citation(&self) -> Option<&str> {
        self.bibtex.as_deref().filter(|b| !b.trim().is_empty())
    }
}

/// Search box plus the year, type and theme dropdowns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PublicationCriteria {
    pub search_text: String,
    pub year: Selection<i32>,
    pub kind: Selection<String>,
    pub theme: Selection<String>,
}

impl Criteria<Publication> for PublicationCriteria {
    const FIELDS: &'static [&'static str] = &["year", "type", "theme"];

    fn search_text(&self) -> &str {
        &self.search_text
    }

    fn set_search_text(&mut self, text: &str) {
        text.clone_into(&mut self.search_text);
    }

    fn matches_facets(&self, item: &Publication) -> bool {
        self.year.matches(Some(&item.year))
            && self.kind.matches(item.kind.as_ref())
            && self.theme.contained_in(&item.tags)
    }

    fn select(&mut self, field: &str, value: &str) -> Result<()> {
        match field {
            "year" => self.year = value.parse()?,
            "type" => self.kind = value.parse()?,
            "theme" => self.theme = value.parse()?,
            other => return Err(unknown_field(Publication::COLLECTION, other)),
        }
        Ok(())
    }

    fn selection(&self, field: &str) -> Option<String> {
        match field {
            "year" => Some(self.year.to_string()),
            "type" => Some(self.kind.to_string()),
            "theme" => Some(self.theme.to_string()),
            _ => None,
        }
    }
}
