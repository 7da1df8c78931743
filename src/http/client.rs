//! reqwest-backed transport
//!
//! Provides the default [`Transport`]:
//! - Base URL + endpoint path joining
//! - Credentials applied per request
//! - Shared throttle before every request
//! - Timeout classification

use super::throttle::Throttle;
use super::transport::{RawResponse, Transport};
use crate::auth::{Authenticator, Credentials};
use crate::config::{ClientConfig, RateLimitConfig, DEFAULT_BASE_URL};
use crate::error::{Error, Result};
use crate::types::Endpoint;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Response};
use std::collections::HashMap;
use std::time::Duration;
use tracing::debug;

/// Configuration for the HTTP transport
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Base URL for all requests
    pub base_url: String,
    /// Request timeout
    pub timeout: Duration,
    /// Connection timeout
    pub connect_timeout: Duration,
    /// Rate limiter configuration
    pub rate_limit: RateLimitConfig,
    /// Default headers for all requests
    pub default_headers: HashMap<String, String>,
    /// User agent string
    pub user_agent: String,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            rate_limit: RateLimitConfig::default(),
            default_headers: HashMap::new(),
            user_agent: format!("youtube-pager/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl HttpClientConfig {
    /// Create a new config builder
    pub fn builder() -> HttpClientConfigBuilder {
        HttpClientConfigBuilder::default()
    }

    /// Derive transport settings from a client config
    pub fn from_client_config(config: &ClientConfig) -> Self {
        let mut http = Self {
            base_url: config.base_url.clone(),
            timeout: config.http.timeout(),
            connect_timeout: config.http.connect_timeout(),
            rate_limit: config.rate_limit.clone(),
            ..Default::default()
        };
        if let Some(agent) = &config.http.user_agent {
            http.user_agent.clone_from(agent);
        }
        http
    }
}

/// Builder for HTTP transport config
#[derive(Default)]
pub struct HttpClientConfigBuilder {
    config: HttpClientConfig,
}

impl HttpClientConfigBuilder {
    /// Set the base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = url.into();
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set the rate limit
    pub fn rate_limit(mut self, config: RateLimitConfig) -> Self {
        self.config.rate_limit = config;
        self
    }

    /// Disable rate limiting
    pub fn no_rate_limit(mut self) -> Self {
        self.config.rate_limit = RateLimitConfig::disabled();
        self
    }

    /// Add a default header
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.default_headers.insert(key.into(), value.into());
        self
    }

    /// Set user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Build the config
    pub fn build(self) -> HttpClientConfig {
        self.config
    }
}

/// Default transport on top of a reqwest client.
///
/// Cheap to share: wrap it in an `Arc` and hand it to any number of
/// streams. It holds no per-request state.
pub struct HttpTransport {
    client: Client,
    base_url: String,
    timeout: Duration,
    authenticator: Authenticator,
    throttle: Throttle,
}

impl HttpTransport {
    /// Create a transport with the given config and credentials
    pub fn new(config: HttpClientConfig, credentials: Credentials) -> Result<Self> {
        let base = url::Url::parse(&config.base_url)?;
        if base.cannot_be_a_base() {
            return Err(Error::config(format!(
                "base_url '{}' cannot be used as a base",
                config.base_url
            )));
        }

        let mut headers = HeaderMap::new();
        for (key, value) in &config.default_headers {
            let name = HeaderName::from_bytes(key.as_bytes())
                .map_err(|e| Error::config(format!("invalid header name '{key}': {e}")))?;
            let value = HeaderValue::from_str(value)
                .map_err(|e| Error::config(format!("invalid value for header '{key}': {e}")))?;
            headers.insert(name, value);
        }

        let client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(&config.user_agent)
            .default_headers(headers)
            .build()
            .map_err(|e| Error::config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            timeout: config.timeout,
            authenticator: Authenticator::new(credentials),
            throttle: Throttle::new(&config.rate_limit),
        })
    }

    /// Create a transport from a full client config
    pub fn from_client_config(config: &ClientConfig) -> Result<Self> {
        Self::new(
            HttpClientConfig::from_client_config(config),
            config.credentials()?,
        )
    }

    /// Check if rate limiting is enabled
    pub fn has_rate_limiter(&self) -> bool {
        self.throttle.is_enabled()
    }

    /// Build full URL for an endpoint
    pub fn endpoint_url(&self, endpoint: Endpoint) -> String {
        format!("{}/{}", self.base_url, endpoint.path())
    }

    fn classify_send_error(&self, e: reqwest::Error) -> Error {
        if e.is_timeout() {
            Error::Timeout {
                timeout_ms: self.timeout.as_millis() as u64,
            }
        } else if e.is_connect() {
            Error::transport(format!("connection failed: {e}"))
        } else {
            Error::Http(e)
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(&self, endpoint: Endpoint, params: &[(String, String)]) -> Result<RawResponse> {
        self.throttle.acquire().await;

        let url = self.endpoint_url(endpoint);
        let req = self.client.get(&url).query(params);
        let req = self.authenticator.apply(req);

        let response = req.send().await.map_err(|e| self.classify_send_error(e))?;
        let status = response.status().as_u16();
        let retry_after = extract_retry_after(&response);
        let body = response
            .text()
            .await
            .map_err(|e| Error::transport(format!("failed to read response body: {e}")))?;

        debug!(%endpoint, status, bytes = body.len(), "request completed");

        Ok(RawResponse {
            status,
            body,
            retry_after,
        })
    }
}

impl std::fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTransport")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("credentials", self.authenticator.credentials())
            .field("throttle", &self.throttle)
            .finish_non_exhaustive()
    }
}

/// Extract retry-after header value (delay-seconds form only)
fn extract_retry_after(response: &Response) -> Option<Duration> {
    response
        .headers()
        .get("retry-after")
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.trim().parse::<u64>().ok())
        .map(Duration::from_secs)
}
