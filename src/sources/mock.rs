//! Mock source with a small built-in catalog.
//!
//! Useful for demos and offline testing. Applies the same year-range,
//! title-substring, and limit semantics the real upstreams advertise, so
//! the rest of the pipeline behaves identically against it.

use async_trait::async_trait;
use std::sync::Mutex;

use crate::filter;
use crate::models::{Record, RecordBuilder, SearchQuery, SearchResponse};
use crate::sources::{Source, SourceCapabilities, SourceError};

/// A mock source backed by a fixed catalog, with an optional injected
/// response for tests.
#[derive(Debug, Default)]
pub struct MockSource {
    search_response: Mutex<Option<SearchResponse>>,
}

impl MockSource {
    /// Create a new mock source.
    pub fn new() -> Self {
        Self {
            search_response: Mutex::new(None),
        }
    }

    /// Set the search response to return instead of the catalog.
    pub fn set_search_response(&self, response: SearchResponse) {
        let mut guard = self.search_response.lock().unwrap();
        *guard = Some(response);
    }

    /// Clear the configured response, falling back to the catalog.
    pub fn clear_response(&self) {
        let mut guard = self.search_response.lock().unwrap();
        *guard = None;
    }

    fn catalog() -> Vec<Record> {
        vec![
            RecordBuilder::new("Advanced Computer Science Concepts")
                .year(2023)
                .authors("John Smith, Jane Doe")
                .url("https://example.com/book1")
                .build(),
            RecordBuilder::new("Modern Web Development Practices")
                .year(2022)
                .authors("Alice Johnson")
                .url("https://example.com/book2")
                .build(),
            RecordBuilder::new("Data Structures and Algorithms")
                .year(2021)
                .authors("Bob Wilson, Carol Brown")
                .url("https://example.com/book3")
                .build(),
            RecordBuilder::new("A Concise History of Computing")
                .year(2021)
                .authors("Dana Lee")
                .url("https://example.com/book4")
                .build(),
            RecordBuilder::new("Oral History Field Methods")
                .year(2019)
                .authors("Evan Park")
                .build(),
        ]
    }
}

#[async_trait]
impl Source for MockSource {
    fn id(&self) -> &str {
        "mock"
    }

    fn name(&self) -> &str {
        "Mock Source"
    }

    fn capabilities(&self) -> SourceCapabilities {
        SourceCapabilities::SEARCH
    }

    async fn search(&self, query: &SearchQuery) -> Result<SearchResponse, SourceError> {
        if query.subject.trim().is_empty() {
            return Err(SourceError::InvalidRequest(
                "Search subject must not be empty".to_string(),
            ));
        }

        {
            let guard = self.search_response.lock().unwrap();
            if let Some(response) = &*guard {
                return Ok(response.clone());
            }
        }

        let records = filter::apply(Self::catalog(), query);
        Ok(SearchResponse::new(records, self.name(), &query.subject))
    }
}

/// Helper to build a record for tests.
pub fn make_record(year: i32, authors: &str, title: &str) -> Record {
    RecordBuilder::new(title)
        .year(year)
        .authors(authors)
        .url(format!("http://example.com/{}", title.to_lowercase().replace(' ', "-")))
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_catalog_is_filtered_by_query() {
        let source = MockSource::new();
        let query = SearchQuery::new("history").years(2021, 2022);
        let response = source.search(&query).await.unwrap();

        assert_eq!(response.len(), 1);
        assert_eq!(response.records[0].title, "A Concise History of Computing");
    }

    #[tokio::test]
    async fn test_limit_truncates_results() {
        let source = MockSource::new();
        let query = SearchQuery::new("a").years(2019, 2023).limit(2);
        let response = source.search(&query).await.unwrap();
        assert_eq!(response.len(), 2);
    }

    #[tokio::test]
    async fn test_injected_response_wins() {
        let source = MockSource::new();
        let injected = SearchResponse::new(
            vec![make_record(2020, "A. Author", "Injected Result")],
            "Mock Source",
            "anything",
        );
        source.set_search_response(injected);

        let response = source.search(&SearchQuery::new("history")).await.unwrap();
        assert_eq!(response.records[0].title, "Injected Result");

        source.clear_response();
        let response = source.search(&SearchQuery::new("history")).await.unwrap();
        assert!(response
            .records
            .iter()
            .all(|r| r.title.to_lowercase().contains("history")));
    }
}
