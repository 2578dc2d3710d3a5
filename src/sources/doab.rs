//! DOAB (Directory of Open Access Books) source implementation.
//!
//! Talks to the hosted DOAB scrape API, which filters by subject and year
//! range server-side and returns a JSON object `{ "books": [...] }` with
//! records in the DOAB schema (`Year`, `Author(s)/Contributors`, `Title`,
//! `URL`). No API key required.

use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

use crate::models::{SearchQuery, SearchResponse};
use crate::normalize::{normalize_all, DOAB_SCHEMA};
use crate::sources::{Source, SourceCapabilities, SourceError};
use crate::utils::{api_retry_config, with_retry, HttpClient};

/// DOAB book source
#[derive(Debug, Clone)]
pub struct DoabSource {
    client: Arc<HttpClient>,
    base_url: String,
}

impl DoabSource {
    /// Default hosted endpoint
    pub const DEFAULT_BASE_URL: &'static str = "https://doab-scrapper-api.onrender.com";

    pub fn new() -> Self {
        Self::with_base_url(Self::DEFAULT_BASE_URL)
    }

    /// Point the source at a different endpoint (used by tests)
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self::with_options(HttpClient::new(), base_url)
    }

    /// Use a preconfigured HTTP client and endpoint
    pub fn with_options(client: HttpClient, base_url: impl Into<String>) -> Self {
        Self {
            client: Arc::new(client),
            base_url: base_url.into(),
        }
    }

    /// HTTP client this source issues requests with
    pub fn client(&self) -> &HttpClient {
        &self.client
    }
}

impl Default for DoabSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Source for DoabSource {
    fn id(&self) -> &str {
        "doab"
    }

    fn name(&self) -> &str {
        "DOAB"
    }

    fn capabilities(&self) -> SourceCapabilities {
        SourceCapabilities::SEARCH | SourceCapabilities::UPSTREAM_FILTER
    }

    async fn search(&self, query: &SearchQuery) -> Result<SearchResponse, SourceError> {
        if query.subject.trim().is_empty() {
            return Err(SourceError::InvalidRequest(
                "Search subject must not be empty".to_string(),
            ));
        }

        let url = format!(
            "{}/scrape?query={}&start_year={}&end_year={}&limit={}",
            self.base_url,
            urlencoding::encode(&query.subject),
            query.start_year,
            query.end_year,
            query.limit
        );

        let client = Arc::clone(&self.client);
        let url_for_retry = url.clone();

        let body = with_retry(api_retry_config(), || {
            let client = Arc::clone(&client);
            let url = url_for_retry.clone();
            async move {
                let response = client
                    .get(&url)
                    .header("Accept", "application/json")
                    .send()
                    .await
                    .map_err(|e| SourceError::Network(format!("Failed to search DOAB: {}", e)))?;

                if !response.status().is_success() {
                    let status = response.status();
                    let text = response.text().await.unwrap_or_default();
                    return Err(SourceError::Api(format!(
                        "DOAB API returned status {}: {}",
                        status, text
                    )));
                }

                let json: Value = response
                    .json()
                    .await
                    .map_err(|e| SourceError::Parse(format!("Failed to parse DOAB response: {}", e)))?;

                Ok(json)
            }
        })
        .await?;

        let raw = body
            .get("books")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default();

        let records = normalize_all(&raw, &DOAB_SCHEMA);
        Ok(SearchResponse::new(records, self.name(), &query.subject))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_search_parses_doab_body() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/scrape")
            .match_query(mockito::Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"books": [
                    {"Year": "2022", "Author(s)/Contributors": "Alice Johnson",
                     "Title": "Modern History Practices", "URL": "https://example.com/book2"},
                    {"Title": "No Metadata At All"}
                ]}"#,
            )
            .create_async()
            .await;

        let source = DoabSource::with_base_url(server.url());
        let query = SearchQuery::new("history").years(2021, 2025).limit(10);
        let response = source.search(&query).await.unwrap();

        assert_eq!(response.len(), 2);
        assert_eq!(response.records[0].year, Some(2022));
        assert_eq!(response.records[0].authors, "Alice Johnson");
        assert_eq!(response.records[1].year, None);
        assert_eq!(response.records[1].url, None);
    }

    #[tokio::test]
    async fn test_search_surfaces_api_error() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/scrape")
            .match_query(mockito::Matcher::Any)
            .with_status(404)
            .with_body("not found")
            .create_async()
            .await;

        let source = DoabSource::with_base_url(server.url());
        let result = source.search(&SearchQuery::new("history")).await;
        assert!(matches!(result, Err(SourceError::Api(_))));
    }

    #[tokio::test]
    async fn test_empty_subject_rejected_before_fetch() {
        let source = DoabSource::with_base_url("http://unreachable.invalid");
        let result = source.search(&SearchQuery::new("  ")).await;
        assert!(matches!(result, Err(SourceError::InvalidRequest(_))));
    }
}
