//! Search source plugins with extensible trait-based architecture.
//!
//! This module defines the [`Source`] trait that all bibliographic sources
//! implement. New sources can be added by implementing this trait and
//! registering them with the [`SourceRegistry`]; each source pairs with a
//! [`crate::normalize::SchemaMap`] so encoders never see raw upstream shapes.
//!
//! # Feature Flags
//!
//! Individual sources can be disabled at compile time using Cargo features:
//!
//! - `doab` - Enable the DOAB books source (default: enabled)
//! - `doaj` - Enable the DOAJ articles source (default: enabled)
//!
//! The mock catalog source is always compiled; it is the only path that
//! applies the local query filter.

#[cfg(feature = "source-doab")]
mod doab;
#[cfg(feature = "source-doaj")]
mod doaj;
mod registry;

pub mod mock;

#[cfg(feature = "source-doab")]
pub use doab::DoabSource;
#[cfg(feature = "source-doaj")]
pub use doaj::DoajSource;
pub use mock::MockSource;
pub use registry::{SourceCapabilities, SourceRegistry};

use crate::models::{SearchQuery, SearchResponse};
use async_trait::async_trait;

/// The Source trait defines the interface for all search source plugins.
///
/// # Implementing a New Source
///
/// 1. Create a struct that implements `Source`
/// 2. Implement `id`, `name`, and `search`
/// 3. Add a `SchemaMap` for the upstream's field names in `normalize`
/// 4. Register the source in `SourceRegistry::new()`
#[async_trait]
pub trait Source: Send + Sync + std::fmt::Debug {
    /// Unique identifier for this source (used in CLI flags, e.g. "doab")
    fn id(&self) -> &str;

    /// Human-readable name of this source
    fn name(&self) -> &str;

    /// Describe the capabilities of this source
    fn capabilities(&self) -> SourceCapabilities {
        SourceCapabilities::SEARCH
    }

    /// Whether this source filters results server-side.
    ///
    /// When false the caller is expected to apply the local query filter to
    /// the raw result set.
    fn filters_upstream(&self) -> bool {
        self.capabilities()
            .contains(SourceCapabilities::UPSTREAM_FILTER)
    }

    /// Search for records matching the query
    async fn search(&self, query: &SearchQuery) -> Result<SearchResponse, SourceError>;
}

/// Errors that can occur when interacting with a source
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// Network or HTTP error
    #[error("Network error: {0}")]
    Network(String),

    /// Parsing error (malformed JSON body)
    #[error("Parse error: {0}")]
    Parse(String),

    /// Invalid request parameters
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// API error from the source (non-success status)
    #[error("API error: {0}")]
    Api(String),

    /// Source not found in the registry
    #[error("Source not found: {0}")]
    NotFound(String),

    /// IO error (file system)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<reqwest::Error> for SourceError {
    fn from(err: reqwest::Error) -> Self {
        SourceError::Network(err.to_string())
    }
}

impl From<serde_json::Error> for SourceError {
    fn from(err: serde_json::Error) -> Self {
        SourceError::Parse(format!("JSON: {}", err))
    }
}
