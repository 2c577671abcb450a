//! Decoding of collection envelopes.
//!
//! A collection file is a JSON object with one array field named after the
//! collection:
//!
//! ```json
//! { "publications": [ { "id": "lee2023", "title": "...", "year": 2023 } ] }
//! ```
//!
//! The envelope either decodes or the whole load fails. Items are decoded one
//! at a time: a bad item is dropped with a diagnostic and its siblings still
//! load.

use crate::domain::error::SiteError;
use crate::domain::Item;
use serde_json::Value;
use std::collections::HashSet;

/// Outcome of loading one collection.
///
/// Never an error: a failed load is an empty `items` with `failed` set and the
/// cause in `diagnostics`.
#[derive(Debug)]
pub struct LoadReport<I> {
    pub items: Vec<I>,
    /// Every problem encountered, whole-payload or per item.
    pub diagnostics: Vec<SiteError>,
    /// True when nothing could be loaded because the fetch or the envelope failed.
    pub failed: bool,
}

impl<I> LoadReport<I> {
    #[must_use]
    pub fn failure(error: SiteError) -> Self {
        Self {
            items: Vec::new(),
            diagnostics: vec![error],
            failed: true,
        }
    }
}

/// Decodes a collection payload, dropping invalid and duplicate items.
#[must_use]
pub fn decode<I: Item>(payload: &str) -> LoadReport<I> {
    let _span = tracing::debug_span!("decode_collection", collection = I::COLLECTION).entered();

    let root: Value = match serde_json::from_str(payload) {
        Ok(root) => root,
        Err(e) => {
            return LoadReport::failure(SiteError::Parse(format!(
                "{}: malformed JSON: {e}",
                I::COLLECTION
            )))
        }
    };

    let entries = match root {
        Value::Object(mut map) => match map.remove(I::COLLECTION) {
            Some(Value::Array(entries)) => entries,
            Some(_) => {
                return LoadReport::failure(SiteError::Parse(format!(
                    "{0}: field '{0}' is not an array",
                    I::COLLECTION
                )))
            }
            None => {
                return LoadReport::failure(SiteError::Parse(format!(
                    "{0}: missing field '{0}'",
                    I::COLLECTION
                )))
            }
        },
        _ => {
            return LoadReport::failure(SiteError::Parse(format!(
                "{}: top level is not an object",
                I::COLLECTION
            )))
        }
    };

    let mut decoded = Vec::with_capacity(entries.len());
    let mut diagnostics = Vec::new();

    for (position, entry) in entries.into_iter().enumerate() {
        match serde_json::from_value::<I>(entry) {
            Ok(item) => decoded.push((position, item)),
            Err(e) => {
                tracing::warn!(position, error = %e, "dropping invalid item");
                diagnostics.push(SiteError::Parse(format!(
                    "{}[{position}]: {e}",
                    I::COLLECTION
                )));
            }
        }
    }

    let explicit: HashSet<String> = decoded
        .iter()
        .map(|(_, item)| item.id())
        .filter(|id| !id.trim().is_empty())
        .map(String::from)
        .collect();
    let mut items = Vec::with_capacity(decoded.len());
    let mut seen_ids = HashSet::new();

    for (position, mut item) in decoded {
        if item.id().trim().is_empty() {
            *item.id_mut() = derived_id::<I>(position, &explicit, &seen_ids);
        }

        if let Err(e) = item.validate() {
            tracing::warn!(position, error = %e, "dropping invalid item");
            diagnostics.push(e);
            continue;
        }

        if !seen_ids.insert(item.id().to_string()) {
            tracing::warn!(position, id = %item.id(), "dropping duplicate id");
            diagnostics.push(SiteError::Parse(format!(
                "{}[{position}]: duplicate id '{}'",
                I::COLLECTION,
                item.id()
            )));
            continue;
        }

        items.push(item);
    }

    tracing::debug!(
        loaded = items.len(),
        dropped = diagnostics.len(),
        "collection decoded"
    );

    LoadReport {
        items,
        diagnostics,
        failed: false,
    }
}

/// `<collection>-<position>`, suffixed with `-<n>` while it collides with an
/// id written in the file or already handed out.
fn derived_id<I: Item>(position: usize, explicit: &HashSet<String>, seen: &HashSet<String>) -> String {
    let base = format!("{}-{position}", I::COLLECTION);
    let taken = |id: &str| explicit.contains(id) || seen.contains(id);
    if !taken(&base) {
        return base;
    }
    let mut n = 1;
    loop {
        let candidate = format!("{base}-{n}");
        if !taken(&candidate) {
            return candidate;
        }
        n += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{NewsEntry, Publication};

    #[test]
    fn malformed_json_fails_the_load() {
        let report = decode::<Publication>("{ not json");
        assert!(report.failed);
        assert!(report.items.is_empty());
        assert!(matches!(report.diagnostics[..], [SiteError::Parse(_)]));
    }

    #[test]
    fn missing_array_fails_the_load() {
        assert!(decode::<Publication>(r#"{"news": []}"#).failed);
        assert!(decode::<Publication>(r#"{"publications": {}}"#).failed);
        assert!(decode::<Publication>("[]").failed);
    }

    #[test]
    fn bad_items_are_dropped_individually() {
        let report = decode::<Publication>(
            r#"{"publications": [
                {"id": "ok", "title": "Fine", "year": 2020},
                {"id": "bad-year", "title": "Broken", "year": "someday"},
                {"id": "no-title", "year": 2020},
                {"id": "blank", "title": "  ", "year": 2020}
            ]}"#,
        );
        assert!(!report.failed);
        assert_eq!(report.items.len(), 1);
        assert_eq!(report.items[0].id, "ok");
        assert_eq!(report.diagnostics.len(), 3);
    }

    #[test]
    fn duplicate_ids_keep_the_first() {
        let report = decode::<Publication>(
            r#"{"publications": [
                {"id": "x", "title": "First", "year": 2020},
                {"id": "x", "title": "Second", "year": 2021}
            ]}"#,
        );
        assert_eq!(report.items.len(), 1);
        assert_eq!(report.items[0].title, "First");
        assert_eq!(report.diagnostics.len(), 1);
    }

    #[test]
    fn news_without_ids_get_positional_ids() {
        let report = decode::<NewsEntry>(
            r#"{"news": [
                {"title": "A", "date": "2024-01-01"},
                {"title": "B", "date": "2024-02-01"}
            ]}"#,
        );
        let ids: Vec<&str> = report.items.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, ["news-0", "news-1"]);
    }

    #[test]
    fn derived_ids_never_shadow_written_ids() {
        let report = decode::<NewsEntry>(
            r#"{"news": [
                {"title": "A", "date": "2024-01-01"},
                {"id": "news-0", "title": "B", "date": "2024-02-01"},
                {"id": "news-0-1", "title": "C", "date": "2024-03-01"}
            ]}"#,
        );
        assert!(report.diagnostics.is_empty());
        let ids: Vec<&str> = report.items.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, ["news-0-2", "news-0", "news-0-1"]);
    }
}
