//! # oashelf
//!
//! Search open-access books (DOAB) and journal articles (DOAJ) and export
//! the results as CSV or Word documents.
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`models`]: Core data structures (Record, SearchQuery, SearchResponse)
//! - [`normalize`]: Schema maps that fold upstream shapes into canonical records
//! - [`filter`]: Local year-range/title/limit query filtering
//! - [`sources`]: Search source plugins with extensible trait-based architecture
//! - [`export`]: CSV and DOCX encoders plus the export orchestrator
//! - [`utils`]: HTTP client, retry, and display utilities
//! - [`config`]: Configuration management

pub mod config;
pub mod export;
pub mod filter;
pub mod models;
pub mod normalize;
pub mod sources;
pub mod ui;
pub mod utils;

// Re-export commonly used types
pub use export::{Export, ExportFormat};
pub use models::{Record, SearchQuery, SearchResponse};
pub use sources::{Source, SourceRegistry};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
