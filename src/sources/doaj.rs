//! DOAJ (Directory of Open Access Journals) source implementation.
//!
//! Talks to the hosted DOAJ search API, which returns a bare JSON array of
//! article records. Field names differ from the DOAB schema (`Authors`
//! instead of `Author(s)/Contributors`), which the normalizer papers over.

use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

use crate::models::{SearchQuery, SearchResponse};
use crate::normalize::{normalize_all, DOAJ_SCHEMA};
use crate::sources::{Source, SourceCapabilities, SourceError};
use crate::utils::{api_retry_config, with_retry, HttpClient};

/// DOAJ article source
#[derive(Debug, Clone)]
pub struct DoajSource {
    client: Arc<HttpClient>,
    base_url: String,
}

impl DoajSource {
    /// Default hosted endpoint
    pub const DEFAULT_BASE_URL: &'static str = "https://doaj-api.onrender.com";

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

impl Default for DoajSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Source for DoajSource {
    fn id(&self) -> &str {
        "doaj"
    }

    fn name(&self) -> &str {
        "DOAJ"
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
            "{}/search?query={}&year_from={}&year_to={}&size={}",
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
                    .map_err(|e| SourceError::Network(format!("Failed to search DOAJ: {}", e)))?;

                if !response.status().is_success() {
                    let status = response.status();
                    let text = response.text().await.unwrap_or_default();
                    return Err(SourceError::Api(format!(
                        "DOAJ API returned status {}: {}",
                        status, text
                    )));
                }

                let json: Value = response
                    .json()
                    .await
                    .map_err(|e| SourceError::Parse(format!("Failed to parse DOAJ response: {}", e)))?;

                Ok(json)
            }
        })
        .await?;

        let raw = body.as_array().cloned().unwrap_or_default();
        let records = normalize_all(&raw, &DOAJ_SCHEMA);
        Ok(SearchResponse::new(records, self.name(), &query.subject))
    }
}
