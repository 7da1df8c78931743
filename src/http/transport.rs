//! Transport abstraction
//!
//! The page fetcher only ever sees this trait. Implementations perform a
//! single round trip and report the HTTP status as data; only failures to
//! complete the exchange at all are returned as errors.

use crate::error::Result;
use crate::types::Endpoint;
use async_trait::async_trait;
use std::time::Duration;

/// Raw outcome of one HTTP exchange
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    /// HTTP status code
    pub status: u16,
    /// Response body
    pub body: String,
    /// Parsed `Retry-After` header, if the server sent one
    pub retry_after: Option<Duration>,
}

impl RawResponse {
    /// Create a response without a retry hint
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
            retry_after: None,
        }
    }

    /// Create a 200 response
    pub fn ok(body: impl Into<String>) -> Self {
        Self::new(200, body)
    }

    /// Attach a retry hint
    #[must_use]
    pub fn with_retry_after(mut self, delay: Duration) -> Self {
        self.retry_after = Some(delay);
        self
    }

    /// Whether the status is 2xx
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Executes one request against a list endpoint
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send `params` to `endpoint` and return the raw response
    async fn execute(&self, endpoint: Endpoint, params: &[(String, String)]) -> Result<RawResponse>;
}
