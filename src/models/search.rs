//! Search request and response models.

use serde::{Deserialize, Serialize};

use crate::models::Record;

/// Search query parameters
///
/// `start_year <= end_year` is the caller's responsibility; the core never
/// reorders the bounds. An inverted range simply matches nothing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchQuery {
    /// Subject/topic to search for
    pub subject: String,

    /// Inclusive lower publication-year bound
    pub start_year: i32,

    /// Inclusive upper publication-year bound
    pub end_year: i32,

    /// Maximum number of results to return
    pub limit: usize,
}

impl Default for SearchQuery {
    fn default() -> Self {
        Self {
            subject: String::new(),
            start_year: 2020,
            end_year: 2025,
            limit: 50,
        }
    }
}

impl SearchQuery {
    /// Create a new search query for a subject
    pub fn new(subject: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            ..Default::default()
        }
    }

    /// Set the inclusive year range
    pub fn years(mut self, start: i32, end: i32) -> Self {
        self.start_year = start;
        self.end_year = end;
        self
    }

    /// Set the result cap
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }
}

/// One query's result set: an ordered sequence of canonical records.
///
/// Immutable once produced; a new query replaces it wholesale rather than
/// merging into it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    /// Records found, in upstream order
    pub records: Vec<Record>,

    /// Source of the results
    pub source: String,

    /// Subject that was searched
    pub subject: String,

    /// Total number of results upstream reported (may exceed returned count)
    pub total_results: Option<usize>,
}

impl SearchResponse {
    /// Create a new search response
    pub fn new(records: Vec<Record>, source: impl Into<String>, subject: impl Into<String>) -> Self {
        Self {
            records,
            source: source.into(),
            subject: subject.into(),
            total_results: None,
        }
    }

    /// Set total results
    pub fn total_results(mut self, total: usize) -> Self {
        self.total_results = Some(total);
        self
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RecordBuilder;

    #[test]
    fn test_query_builder() {
        let query = SearchQuery::new("Computer Science").years(2021, 2025).limit(20);

        assert_eq!(query.subject, "Computer Science");
        assert_eq!(query.start_year, 2021);
        assert_eq!(query.end_year, 2025);
        assert_eq!(query.limit, 20);
    }

    #[test]
    fn test_response_preserves_order() {
        let records = vec![
            RecordBuilder::new("First").year(2022).build(),
            RecordBuilder::new("Second").year(2021).build(),
        ];
        let response = SearchResponse::new(records, "DOAB", "history").total_results(240);

        assert_eq!(response.len(), 2);
        assert_eq!(response.records[0].title, "First");
        assert_eq!(response.total_results, Some(240));
    }
}
