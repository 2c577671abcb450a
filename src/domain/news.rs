//! News entries and their category filter.

use super::fields;
use super::item::{unknown_field, Criteria, Item, Selection, SortField, SortValue};
use crate::domain::error::Result;
use chrono::{Datelike, NaiveDate};
use serde::Deserialize;

/// One entry of `data/news.json`.
///
/// News files are often written without ids; the loader derives one from the
/// entry's position when `id` is absent.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewsEntry {
    #[serde(default)]
    pub id: String,
    pub title: String,
    #[serde(deserialize_with = "fields::date")]
    pub date: NaiveDate,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub link: Option<String>,
}

impl NewsEntry {
    /// Whether the link leaves the site (opened in a new tab).
    #[must_use]
    pub fn is_external_link(&self) -> bool {
        self.link.as_deref().is_some_and(|l| l.starts_with("http"))
    }
}

impl Item for NewsEntry {
    type Criteria = NewsCriteria;

    const COLLECTION: &'static str = "news";
    const DEFAULT_SORT: SortField = SortField::Date;

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
        self.date.year()
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![self.title.as_str(), self.description.as_str()]
    }

    fn sort_value(&self, field: SortField) -> SortValue<'_> {
        match field {
            SortField::Title => SortValue::Text(&self.title),
            SortField::Year => SortValue::Number(i64::from(self.date.year())),
            SortField::Date => SortValue::Date(self.date),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewsCriteria {
    pub search_text: String,
    pub category: Selection<String>,
}

impl Criteria<NewsEntry> for NewsCriteria {
    const FIELDS: &'static [&'static str] = &["category"];

    fn search_text(&self) -> &str {
        &self.search_text
    }

    fn set_search_text(&mut self, text: &str) {
        text.clone_into(&mut self.search_text);
    }

    fn matches_facets(&self, item: &NewsEntry) -> bool {
        self.category.matches(item.category.as_ref())
    }

    fn select(&mut self, field: &str, value: &str) -> Result<()> {
        match field {
            "category" => self.category = value.parse()?,
            other => return Err(unknown_field(NewsEntry::COLLECTION, other)),
        }
        Ok(())
    }

    fn selection(&self, field: &str) -> Option<String> {
        (field == "category").then(|| self.category.to_string())
    }
}
