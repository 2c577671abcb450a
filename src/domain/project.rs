//! Research project records.
//!
//! Projects are listed on the landing and projects pages and can be narrowed by
//! tag and status (e.g. `active`, `completed`).

use super::fields;
use super::item::{unknown_field, Criteria, Item, Selection, SortField, SortValue};
use crate::domain::error::Result;
use serde::Deserialize;

/// One entry of `data/projects.json`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Project {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(deserialize_with = "fields::year")]
    pub year: i32,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
}

impl Item for Project {
    type Criteria = ProjectCriteria;

    const COLLECTION: &'static str = "projects";
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
        vec![self.title.as_str(), self.description.as_str()]
    }

    fn sort_value(&self, field: SortField) -> SortValue<'_> {
        match field {
            SortField::Title => SortValue::Text(&self.title),
            SortField::Year => SortValue::Number(i64::from(self.year)),
            SortField::Date => SortValue::Missing,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectCriteria {
    pub search_text: String,
    pub tag: Selection<String>,
    pub status: Selection<String>,
}

impl Criteria<Project> for ProjectCriteria {
    const FIELDS: &'static [&'static str] = &["tag", "status"];

    fn search_text(&self) -> &str {
        &self.search_text
    }

    fn set_search_text(&mut self, text: &str) {
        text.clone_into(&mut self.search_text);
    }

    fn matches_facets(&self, item: &Project) -> bool {
        self.tag.contained_in(&item.tags) && self.status.matches(item.status.as_ref())
    }

    fn select(&mut self, field: &str, value: &str) -> Result<()> {
        match field {
            "tag" => self.tag = value.parse()?,
            "status" => self.status = value.parse()?,
            other => return Err(unknown_field(Project::COLLECTION, other)),
        }
        Ok(())
    }

    fn selection(&self, field: &str) -> Option<String> {
        match field {
            "tag" => Some(self.tag.to_string()),
            "status" => Some(self.status.to_string()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_and_status_must_both_match() {
        let project: Project = serde_json::from_str(
            r#"{"id": "p1", "title": "Reaction prediction", "year": "2022",
                "status": "active", "tags": ["chemical-ai"]}"#,
        )
        .unwrap();
        let mut c = ProjectCriteria::default();
        c.select("tag", "chemical-ai").unwrap();
        assert!(c.matches_facets(&project));
        c.select("status", "completed").unwrap();
        assert!(!c.matches_facets(&project));
    }

    #[test]
    fn year_is_required() {
        assert!(serde_json::from_str::<Project>(r#"{"id": "p", "title": "t"}"#).is_err());
    }
}
