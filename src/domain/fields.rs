//! Lenient field decoders for hand-edited JSON data files.
//!
//! Years show up both as numbers (`2023`) and strings (`"2023"`), and dates as
//! either plain calendar dates or full timestamps. Anything else is rejected so
//! the loader can drop the item with a parse diagnostic.

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum RawYear {
    Number(i64),
    Text(String),
}

/// Deserializes a year given as an integer or an integer string.
///
/// # Errors
///
/// Fails for fractional numbers, out-of-range values and non-numeric strings.
pub fn year<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = RawYear::deserialize(deserializer)?;
    let value = match raw {
        RawYear::Number(n) => n,
        RawYear::Text(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| serde::de::Error::custom(format!("year '{s}' is not an integer")))?,
    };
    i32::try_from(value).map_err(|_| serde::de::Error::custom(format!("year {value} out of range")))
}

/// Parses `YYYY-MM-DD`, falling back to the date part of an RFC 3339 timestamp.
#[must_use]
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
}

/// Deserializes a calendar date via [`parse_date`].
///
/// # Errors
///
/// Fails when the string is neither a calendar date nor an RFC 3339 timestamp.
pub fn date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_date(&raw).ok_or_else(|| serde::de::Error::custom(format!("invalid date '{raw}'")))
}
