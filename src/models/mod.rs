//! Core data structures shared across sources and exporters.

mod record;
mod search;

pub use record::{Record, RecordBuilder, SourceType, PLACEHOLDER};
pub use search::{SearchQuery, SearchResponse};
