//! Schema normalization for heterogeneous upstream records.
//!
//! Each upstream returns JSON records under its own field names: DOAB uses
//! `Year`/`Author(s)/Contributors`/`Title`/`URL`, DOAJ uses `Authors`, and
//! both have been observed emitting lowercase variants. A [`SchemaMap`]
//! describes one schema variant's key names; [`normalize`] applies it to a
//! raw JSON value and always yields a complete [`Record`].
//!
//! Normalization is total: partial or malformed upstream records are
//! expected and degrade to placeholders rather than failing the batch.

use serde_json::Value;

use crate::models::{Record, PLACEHOLDER};

/// Field-name mapping for one upstream schema variant.
///
/// Key candidates are tried in order; the first key present in the raw
/// record wins. Adding a new upstream means adding a new map here, without
/// touching the encoders.
#[derive(Debug, Clone, Copy)]
pub struct SchemaMap {
    pub year: &'static [&'static str],
    pub authors: &'static [&'static str],
    pub title: &'static [&'static str],
    pub url: &'static [&'static str],
}

/// DOAB book records
pub const DOAB_SCHEMA: SchemaMap = SchemaMap {
    year: &["Year", "year"],
    authors: &["Author(s)/Contributors", "authors", "Authors"],
    title: &["Title", "title"],
    url: &["URL", "url"],
};

/// DOAJ article records
pub const DOAJ_SCHEMA: SchemaMap = SchemaMap {
    year: &["Year", "year"],
    authors: &["Authors", "authors", "Author(s)/Contributors"],
    title: &["Title", "title"],
    url: &["URL", "url"],
};

fn lookup<'a>(raw: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    keys.iter().find_map(|key| raw.get(key))
}

/// Coerce a JSON value to a publication year.
///
/// Accepts integers and numeric strings, including date-like strings such
/// as "2023-05-15" (only the leading digits are considered). Anything else
/// is absent.
fn coerce_year(value: Option<&Value>) -> Option<i32> {
    match value? {
        Value::Number(n) => n.as_i64().and_then(|y| i32::try_from(y).ok()),
        Value::String(s) => {
            let s = s.trim();
            let lead: String = s.chars().take_while(|c| c.is_ascii_digit()).collect();
            lead.parse::<i32>().ok().filter(|_| !lead.is_empty())
        }
        _ => None,
    }
}

/// Coerce a JSON value to an author display string.
///
/// Sequences are joined with ", "; scalar strings pass through; anything
/// else (or absence) becomes the placeholder dash.
fn coerce_authors(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) if !s.trim().is_empty() => s.clone(),
        Some(Value::Array(items)) => {
            let names: Vec<&str> = items
                .iter()
                .filter_map(|v| v.as_str())
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .collect();
            if names.is_empty() {
                PLACEHOLDER.to_string()
            } else {
                names.join(", ")
            }
        }
        _ => PLACEHOLDER.to_string(),
    }
}

fn coerce_title(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        _ => String::new(),
    }
}

fn coerce_url(value: Option<&Value>) -> Option<String> {
    match value {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s.clone()),
        _ => None,
    }
}

/// Map one raw upstream record into canonical form.
///
/// Total over all JSON inputs: a record that is not even an object yields a
/// fully-placeholder [`Record`].
pub fn normalize(raw: &Value, schema: &SchemaMap) -> Record {
    Record {
        year: coerce_year(lookup(raw, schema.year)),
        authors: coerce_authors(lookup(raw, schema.authors)),
        title: coerce_title(lookup(raw, schema.title)),
        url: coerce_url(lookup(raw, schema.url)),
    }
}

/// Normalize every element of a raw JSON array, in order.
pub fn normalize_all(raw: &[Value], schema: &SchemaMap) -> Vec<Record> {
    raw.iter().map(|r| normalize(r, schema)).collect()
}
