//! Gateway trait for retrieving raw JSON payloads.

use crate::error::AppError;
use async_trait::async_trait;
use serde_json::Value;

/// Retrieves one JSON document from an upstream endpoint.
///
/// # Implementations
///
/// - [`crate::infrastructure::http::HttpFetcher`] - reqwest-backed GET
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PayloadFetcher: Send + Sync {
    /// Fetches and parses the payload.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Transport`] when the request cannot be completed,
    /// [`AppError::UpstreamStatus`] on a non-success status and
    /// [`AppError::Malformed`] when the body is not JSON.
    async fn fetch(&self) -> Result<Value, AppError>;

    /// Endpoint description used in logs.
    fn endpoint(&self) -> String;
}
