//! Page fetcher trait and the transport-backed implementation

use super::retry::RetryPolicy;
use crate::decode::{parse_error_body, PageDecoder};
use crate::error::{Error, Result};
use crate::http::{RawResponse, Transport};
use crate::model::ListResponse;
use crate::query::{Operation, QuerySpec, Request};
use crate::types::ContinuationToken;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Longest slice of an unstructured error body kept in the error message
const MAX_ERROR_BODY: usize = 256;

/// One successfully fetched page
#[derive(Debug, Clone, PartialEq)]
pub struct FetchedPage<T> {
    /// Items in server order
    pub items: Vec<T>,
    /// Token for the next page; `None` when this was the last one
    pub next_token: Option<ContinuationToken>,
    /// Server's estimate of the total result count
    pub total_results: Option<u32>,
}

impl<T> FetchedPage<T> {
    /// A page with items and an optional next token
    pub fn new(items: Vec<T>, next_token: Option<ContinuationToken>) -> Self {
        Self {
            items,
            next_token,
            total_results: None,
        }
    }

    /// Whether another page follows
    pub fn has_next(&self) -> bool {
        self.next_token.as_ref().is_some_and(|t| !t.is_empty())
    }
}

/// Fetches one page of a query.
///
/// Implementations own their retry behaviour: an error returned from
/// `fetch` is final for the stream.
#[async_trait]
pub trait PageFetcher<T: Send + 'static>: Send + Sync {
    /// Fetch the page identified by `token` (`None` for the first page)
    async fn fetch(
        &self,
        spec: &QuerySpec,
        token: Option<&ContinuationToken>,
    ) -> Result<FetchedPage<T>>;
}

/// Page fetcher on top of an injected transport and decoder
pub struct RemoteFetcher<T> {
    transport: Arc<dyn Transport>,
    decoder: Arc<dyn PageDecoder<T>>,
    retry: RetryPolicy,
}

impl<T> RemoteFetcher<T> {
    /// Create a fetcher with the default retry policy
    pub fn new(transport: Arc<dyn Transport>, decoder: Arc<dyn PageDecoder<T>>) -> Self {
        Self {
            transport,
            decoder,
            retry: RetryPolicy::default(),
        }
    }

    /// Set the retry policy
    #[must_use]
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Get the retry policy
    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.retry
    }

    /// One round trip. On failure, also returns the server's retry hint.
    async fn attempt(
        &self,
        request: &Request,
    ) -> std::result::Result<ListResponse<T>, (Error, Option<Duration>)> {
        let response = self
            .transport
            .execute(request.endpoint, &request.params)
            .await
            .map_err(|e| (e, None))?;

        if !response.is_success() {
            return Err((remote_error(&response), response.retry_after));
        }

        self.decoder.decode(&response.body).map_err(|e| (e, None))
    }
}

#[async_trait]
impl<T: Send + 'static> PageFetcher<T> for RemoteFetcher<T> {
    async fn fetch(
        &self,
        spec: &QuerySpec,
        token: Option<&ContinuationToken>,
    ) -> Result<FetchedPage<T>> {
        let request = spec.request(token)?;
        let mut attempt = 0;

        loop {
            attempt += 1;

            match self.attempt(&request).await {
                Ok(list) => {
                    if spec.operation() == Operation::ById {
                        let requested = request.param("id").map_or(0, |ids| ids.split(',').count());
                        if list.items.len() < requested {
                            debug!(
                                requested,
                                found = list.items.len(),
                                "some requested ids were not found"
                            );
                        }
                    }

                    return Ok(FetchedPage {
                        next_token: spec.next_token(token, list.next_page_token),
                        total_results: list.page_info.map(|p| p.total_results),
                        items: list.items,
                    });
                }
                Err((err, hint)) if err.is_retryable() && self.retry.should_retry(attempt) => {
                    let delay = self.retry.backoff_with_hint(attempt, hint);
                    warn!(
                        endpoint = %request.endpoint,
                        error = %err,
                        "Fetch failed, attempt {}/{}, retrying in {:?}",
                        attempt,
                        self.retry.max_attempts,
                        delay
                    );
                    tokio::time::sleep(delay).await;
                }
                Err((err, _)) => {
                    if attempt > 1 {
                        warn!(endpoint = %request.endpoint, "Giving up after {attempt} attempts");
                    }
                    return Err(err);
                }
            }
        }
    }
}

impl<T> std::fmt::Debug for RemoteFetcher<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteFetcher")
            .field("retry", &self.retry)
            .finish_non_exhaustive()
    }
}

/// Build a `Remote` error from a non-2xx response
fn remote_error(response: &RawResponse) -> Error {
    if let Some(body) = parse_error_body(&response.body) {
        return Error::remote(response.status, body.reason, body.message);
    }

    let reason = reqwest::StatusCode::from_u16(response.status)
        .ok()
        .and_then(|s| s.canonical_reason())
        .unwrap_or("unknown");
    let mut message = response.body.trim().to_string();
    if message.len() > MAX_ERROR_BODY {
        let cut = (0..=MAX_ERROR_BODY)
            .rev()
            .find(|i| message.is_char_boundary(*i))
            .unwrap_or(0);
        message.truncate(cut);
        message.push_str("...");
    }
    Error::remote(response.status, reason, message)
}
