//! Client configuration
//!
//! Configuration can be loaded from a YAML (or JSON) file, from the
//! environment, or built in code. Every section has defaults so a config
//! file only needs to carry the credentials.
//!
//! ```yaml
//! api_key: AIza...
//! http:
//!   timeout_seconds: 20
//! retry:
//!   max_attempts: 5
//!   backoff_type: exponential
//! rate_limit:
//!   requests_per_second: 5
//! ```

use crate::auth::Credentials;
use crate::error::{Error, Result, ResultExt};
use crate::types::BackoffType;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Default YouTube Data API base URL
pub const DEFAULT_BASE_URL: &str = "https://www.googleapis.com/youtube/v3";

/// Environment variable holding an API key
pub const ENV_API_KEY: &str = "YOUTUBE_API_KEY";

/// Environment variable holding an OAuth2 access token
pub const ENV_OAUTH_TOKEN: &str = "YOUTUBE_OAUTH_TOKEN";

/// Environment variable overriding the API base URL
pub const ENV_BASE_URL: &str = "YOUTUBE_API_BASE_URL";

// ============================================================================
// Top-Level Client Config
// ============================================================================

/// Complete client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// API key, sent as the `key` query parameter
    #[serde(default)]
    pub api_key: Option<String>,

    /// OAuth2 access token, sent as a bearer token
    #[serde(default)]
    pub oauth_token: Option<String>,

    /// Base URL for API requests
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// HTTP client configuration
    #[serde(default)]
    pub http: HttpConfig,

    /// Retry configuration for page fetches
    #[serde(default)]
    pub retry: RetryConfig,

    /// Rate limiting configuration, shared by all streams of a client
    #[serde(default)]
    pub rate_limit: RateLimitConfig,

    /// Capacity of each stream's page channel
    #[serde(default = "default_channel_capacity")]
    pub channel_capacity: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            oauth_token: None,
            base_url: default_base_url(),
            http: HttpConfig::default(),
            retry: RetryConfig::default(),
            rate_limit: RateLimitConfig::default(),
            channel_capacity: default_channel_capacity(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_channel_capacity() -> usize {
    1
}

impl ClientConfig {
    /// Create a config authenticated with an API key
    pub fn with_api_key(key: impl Into<String>) -> Self {
        Self {
            api_key: Some(key.into()),
            ..Default::default()
        }
    }

    /// Create a config authenticated with an OAuth2 access token
    pub fn with_oauth_token(token: impl Into<String>) -> Self {
        Self {
            oauth_token: Some(token.into()),
            ..Default::default()
        }
    }

    /// Set the base URL
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the retry configuration
    #[must_use]
    pub fn retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    /// Set the rate limit configuration
    #[must_use]
    pub fn rate_limit(mut self, rate_limit: RateLimitConfig) -> Self {
        self.rate_limit = rate_limit;
        self
    }

    /// Set the page channel capacity
    #[must_use]
    pub fn channel_capacity(mut self, capacity: usize) -> Self {
        self.channel_capacity = capacity;
        self
    }

    /// Load a config from a YAML or JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_yaml(&content)
    }

    /// Parse a config from a YAML (or JSON) string
    pub fn from_yaml(content: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(content)?;
        Ok(config)
    }

    /// Build a config from the process environment
    pub fn from_env() -> Self {
        Self::default().merge_env_with(|key| std::env::var(key).ok())
    }

    /// Overlay environment variables on top of this config
    #[must_use]
    pub fn merge_env(self) -> Self {
        self.merge_env_with(|key| std::env::var(key).ok())
    }

    /// Overlay variables resolved by `lookup` on top of this config
    #[must_use]
    pub fn merge_env_with<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(key) = non_empty(ENV_API_KEY) {
            self.api_key = Some(key);
        }
        if let Some(token) = non_empty(ENV_OAUTH_TOKEN) {
            self.oauth_token = Some(token);
        }
        if let Some(url) = non_empty(ENV_BASE_URL) {
            self.base_url = url;
        }
        self
    }

    /// Resolve the credentials to use for requests.
    ///
    /// An OAuth2 token wins over an API key when both are present.
    pub fn credentials(&self) -> Result<Credentials> {
        let token = self.oauth_token.as_deref().map(str::trim);
        let key = self.api_key.as_deref().map(str::trim);

        match (token, key) {
            (Some(token), _) if !token.is_empty() => Ok(Credentials::bearer(token)),
            (_, Some(key)) if !key.is_empty() => Ok(Credentials::api_key(key)),
            (Some(_), _) | (_, Some(_)) => Err(Error::config("credentials must not be blank")),
            (None, None) => Err(Error::missing_field("api_key")),
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        self.credentials()?;
        self.validate_settings()
    }

    /// Validate everything except credentials
    pub fn validate_settings(&self) -> Result<()> {
        let base = url::Url::parse(&self.base_url)?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(Error::config(format!(
                "base_url must be http(s), got '{}'",
                base.scheme()
            )));
        }
        if self.channel_capacity == 0 {
            return Err(Error::config("channel_capacity must be at least 1"));
        }
        if self.http.timeout_seconds == 0 {
            return Err(Error::config("http.timeout_seconds must be positive"));
        }
        if self.retry.max_attempts == 0 {
            return Err(Error::config("retry.max_attempts must be at least 1"));
        }
        if self.rate_limit.enabled && self.rate_limit.requests_per_second == 0 {
            return Err(Error::config(
                "rate_limit.requests_per_second must be positive",
            ));
        }
        Ok(())
    }
}

// ============================================================================
// HTTP Config
// ============================================================================

/// HTTP client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    /// Connection timeout in seconds
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_seconds: u64,

    /// User agent override
    #[serde(default)]
    pub user_agent: Option<String>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: default_timeout(),
            connect_timeout_seconds: default_connect_timeout(),
            user_agent: None,
        }
    }
}

impl HttpConfig {
    /// Request timeout as a duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    /// Connect timeout as a duration
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_seconds)
    }
}

fn default_timeout() -> u64 {
    30
}

fn default_connect_timeout() -> u64 {
    10
}

// ============================================================================
// Retry Config
// ============================================================================

/// Retry configuration for page fetches
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Total attempts per page, including the first one
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Delay before the first retry, in milliseconds
    #[serde(default = "default_initial_backoff_ms")]
    pub initial_backoff_ms: u64,

    /// Upper bound on any single delay, in milliseconds
    #[serde(default = "default_max_backoff_ms")]
    pub max_backoff_ms: u64,

    /// Backoff strategy
    #[serde(default)]
    pub backoff_type: BackoffType,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            initial_backoff_ms: default_initial_backoff_ms(),
            max_backoff_ms: default_max_backoff_ms(),
            backoff_type: BackoffType::default(),
        }
    }
}

fn default_max_attempts() -> u32 {
    3
}

fn default_initial_backoff_ms() -> u64 {
    100
}

fn default_max_backoff_ms() -> u64 {
    10_000
}

// ============================================================================
// Rate Limit Config
// ============================================================================

/// Rate limiting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitConfig {
    /// Whether outgoing requests are throttled at all
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Maximum number of requests per second
    #[serde(default = "default_rps")]
    pub requests_per_second: u32,

    /// Burst size (max tokens in bucket)
    #[serde(default = "default_burst")]
    pub burst_size: u32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            requests_per_second: default_rps(),
            burst_size: default_burst(),
        }
    }
}

impl RateLimitConfig {
    /// A config with throttling switched off
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Default::default()
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_rps() -> u32 {
    10
}

fn default_burst() -> u32 {
    10
}
