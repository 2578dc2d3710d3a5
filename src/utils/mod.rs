//! Utility modules supporting search and export operations.
//!
//! - [`HttpClient`]: shared HTTP client with sensible defaults
//! - [`RetryConfig`] / [`with_retry`]: retry with exponential backoff for
//!   transient upstream failures
//! - [`truncate_with_ellipsis`]: unicode-aware truncation for table cells

mod display;
mod http;
mod retry;

pub use display::truncate_with_ellipsis;
pub use http::HttpClient;
pub use retry::{api_retry_config, with_retry, RetryConfig, TransientError};
