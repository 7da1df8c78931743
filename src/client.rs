//! YouTube client
//!
//! Entry point for callers: validates parameters, builds the query and
//! starts one paginator task per call.

use crate::config::ClientConfig;
use crate::decode::{JsonDecoder, PageDecoder};
use crate::error::Result;
use crate::fetch::{RemoteFetcher, RetryPolicy};
use crate::http::{HttpTransport, Transport};
use crate::model::{SearchResult, Video};
use crate::pagination::{PageStream, Paginator};
use crate::query::{QuerySpec, SearchParam};
use std::sync::Arc;
use tracing::{debug, info};

/// Streams results from the YouTube Data API list endpoints.
///
/// A client is cheap to clone; clones share the HTTP connection pool,
/// credentials and rate limiter. Every operation must be called from
/// within a tokio runtime.
#[derive(Clone)]
pub struct Client {
    transport: Arc<dyn Transport>,
    search_decoder: Arc<dyn PageDecoder<SearchResult>>,
    video_decoder: Arc<dyn PageDecoder<Video>>,
    retry: RetryPolicy,
    channel_capacity: usize,
}

impl Client {
    /// Create a client talking HTTP to the configured endpoint
    pub fn new(config: ClientConfig) -> Result<Self> {
        config.validate()?;
        let transport = HttpTransport::from_client_config(&config)?;
        debug!(
            base_url = %config.base_url,
            rate_limited = transport.has_rate_limiter(),
            "HTTP transport ready"
        );
        Ok(Self::assemble(Arc::new(transport), &config))
    }

    /// Create a client on top of a custom transport.
    ///
    /// Credentials in `config` are not used; the transport is expected to
    /// authenticate its own requests.
    pub fn with_transport(transport: Arc<dyn Transport>, config: ClientConfig) -> Result<Self> {
        config.validate_settings()?;
        Ok(Self::assemble(transport, &config))
    }

    fn assemble(transport: Arc<dyn Transport>, config: &ClientConfig) -> Self {
        Self {
            transport,
            search_decoder: Arc::new(JsonDecoder::<SearchResult>::new()),
            video_decoder: Arc::new(JsonDecoder::<Video>::new()),
            retry: RetryPolicy::from(&config.retry),
            channel_capacity: config.channel_capacity.max(1),
        }
    }

    /// Replace the decoder for search results
    #[must_use]
    pub fn with_search_decoder(mut self, decoder: Arc<dyn PageDecoder<SearchResult>>) -> Self {
        self.search_decoder = decoder;
        self
    }

    /// Replace the decoder for video listings
    #[must_use]
    pub fn with_video_decoder(mut self, decoder: Arc<dyn PageDecoder<Video>>) -> Self {
        self.video_decoder = decoder;
        self
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

    /// Search for videos, channels and playlists.
    ///
    /// Exactly one of `query` or `related_to_video` must be set.
    pub fn search(&self, param: &SearchParam) -> Result<PageStream<SearchResult>> {
        let spec = QuerySpec::search(param)?;
        self.start(spec, self.search_decoder.clone())
    }

    /// List the currently trending videos
    pub fn most_popular(&self, param: &SearchParam) -> Result<PageStream<Video>> {
        let spec = QuerySpec::most_popular(param)?;
        self.start(spec, self.video_decoder.clone())
    }

    /// Look up videos by id.
    ///
    /// Ids the service does not know are left out of the results.
    pub fn by_id<I, S>(&self, ids: I) -> Result<PageStream<Video>>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let spec = QuerySpec::by_id(ids)?;
        self.start(spec, self.video_decoder.clone())
    }

    fn start<T: Send + 'static>(
        &self,
        spec: QuerySpec,
        decoder: Arc<dyn PageDecoder<T>>,
    ) -> Result<PageStream<T>> {
        info!(
            operation = %spec.operation(),
            page_size = spec.page_size(),
            max_pages = spec.max_pages(),
            "Starting stream"
        );

        let fetcher = RemoteFetcher::new(self.transport.clone(), decoder).with_retry(self.retry);
        Paginator::new(spec, Arc::new(fetcher)).spawn(self.channel_capacity)
    }
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("retry", &self.retry)
            .field("channel_capacity", &self.channel_capacity)
            .finish_non_exhaustive()
    }
}
