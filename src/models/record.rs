//! Canonical record model representing a search result from any source.

use serde::{Deserialize, Serialize};

/// Sentinel rendered in place of a missing field.
///
/// Downstream encoders rely on fields always being present as typed values;
/// absence is represented by this placeholder (or an empty string for titles),
/// never by an omitted key.
pub const PLACEHOLDER: &str = "—";

/// The source/catalog where the record was found
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceType {
    Doab,
    Doaj,
    Mock,
}

impl SourceType {
    /// Returns the display name of the source
    pub fn name(&self) -> &str {
        match self {
            SourceType::Doab => "DOAB",
            SourceType::Doaj => "DOAJ",
            SourceType::Mock => "Mock Catalog",
        }
    }

    /// Returns the source identifier (for CLI flags and registry keys)
    pub fn id(&self) -> &str {
        match self {
            SourceType::Doab => "doab",
            SourceType::Doaj => "doaj",
            SourceType::Mock => "mock",
        }
    }

    /// Caption used for hyperlink cells in document export
    pub fn link_label(&self) -> &'static str {
        match self {
            SourceType::Doaj => "View",
            SourceType::Doab | SourceType::Mock => "View Book",
        }
    }
}

impl std::fmt::Display for SourceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A bibliographic record in canonical form.
///
/// Every record that leaves the normalizer has all four fields present as
/// typed values. Encoders may therefore render fields without presence
/// checks: a missing year is `None`, missing authors are the placeholder
/// dash, a missing title is the empty string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Publication year, when the upstream supplied a parseable one
    pub year: Option<i32>,

    /// Authors/contributors as one comma-joined display string
    pub authors: String,

    /// Title text (may be empty, never absent)
    pub title: String,

    /// Absolute URL of the record's landing page, when non-empty upstream
    pub url: Option<String>,
}

impl Record {
    /// Create a record with a title; remaining fields start at their
    /// explicit absent values.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            year: None,
            authors: PLACEHOLDER.to_string(),
            title: title.into(),
            url: None,
        }
    }

    /// Year rendered for display and export ("—" when unknown)
    pub fn year_display(&self) -> String {
        match self.year {
            Some(y) => y.to_string(),
            None => PLACEHOLDER.to_string(),
        }
    }

    /// URL rendered for text export (empty string when absent)
    pub fn url_display(&self) -> &str {
        self.url.as_deref().unwrap_or("")
    }

    /// Whether the record carries a link target
    pub fn has_url(&self) -> bool {
        self.url.is_some()
    }
}

/// Builder for constructing records in tests and mock catalogs
#[derive(Debug, Clone)]
pub struct RecordBuilder {
    record: Record,
}

impl RecordBuilder {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            record: Record::new(title),
        }
    }

    pub fn year(mut self, year: i32) -> Self {
        self.record.year = Some(year);
        self
    }

    pub fn authors(mut self, authors: impl Into<String>) -> Self {
        self.record.authors = authors.into();
        self
    }

    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.record.url = Some(url.into());
        self
    }

    pub fn build(self) -> Record {
        self.record
    }
}
