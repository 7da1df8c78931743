//! Error types for youtube-pager
//!
//! This module defines the error hierarchy for the whole crate.
//! All public APIs return `Result<T, Error>` where Error is defined here.
//!
//! Errors fall into two groups. Parameter and configuration errors are
//! returned synchronously and mean a stream never started. Transport,
//! remote and decode errors happen while a stream is running and are
//! delivered inside the terminal [`Page`](crate::pagination::Page).

use thiserror::Error;

/// The main error type for youtube-pager
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Caller Errors
    // ============================================================================
    #[error("Invalid parameter '{field}': {message}")]
    InvalidParameter { field: String, message: String },

    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Missing required config field: {field}")]
    MissingConfigField { field: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ============================================================================
    // Transport Errors
    // ============================================================================
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Transport error: {message}")]
    Transport { message: String },

    #[error("Request timeout after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    // ============================================================================
    // Remote Errors
    // ============================================================================
    #[error("Remote error {status} ({reason}): {message}")]
    Remote {
        status: u16,
        reason: String,
        message: String,
    },

    // ============================================================================
    // Decode Errors
    // ============================================================================
    #[error("Failed to decode response: {message}")]
    Decode { message: String },

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ============================================================================
    // Generic Errors
    // ============================================================================
    #[error("{0}")]
    Other(String),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

impl Error {
    /// Create an invalid parameter error
    pub fn invalid_param(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a missing field error
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingConfigField {
            field: field.into(),
        }
    }

    /// Create a transport error
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Create a remote (HTTP status) error
    pub fn remote(status: u16, reason: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Remote {
            status,
            reason: reason.into(),
            message: message.into(),
        }
    }

    /// Create a decode error
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Check if this error is retryable
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::Http(e) => !e.is_decode() && !e.is_builder(),
            Error::Transport { .. } | Error::Timeout { .. } => true,
            Error::Remote { status, .. } => is_retryable_status(*status),
            _ => false,
        }
    }

    /// Check if this error was caused by the caller's parameters
    pub fn is_invalid_parameter(&self) -> bool {
        matches!(self, Error::InvalidParameter { .. })
    }

    /// Check if this error is a configuration error
    pub fn is_config(&self) -> bool {
        matches!(
            self,
            Error::Config { .. }
                | Error::MissingConfigField { .. }
                | Error::YamlParse(_)
                | Error::InvalidUrl(_)
        )
    }

    /// Check if this error came from decoding a payload
    pub fn is_decode(&self) -> bool {
        matches!(self, Error::Decode { .. } | Error::JsonParse(_))
    }

    /// HTTP status reported by the remote service, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Remote { status, .. } => Some(*status),
            Error::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Check if an HTTP status code is retryable
pub(crate) fn is_retryable_status(status: u16) -> bool {
    status == 429 || (500..600).contains(&status)
}

/// Result type alias for youtube-pager
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context with a closure (lazy evaluation)
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", f(), inner))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::invalid_param("max_results_per_page", "must be between 1 and 50");
        assert_eq!(
            err.to_string(),
            "Invalid parameter 'max_results_per_page': must be between 1 and 50"
        );

        let err = Error::missing_field("api_key");
        assert_eq!(err.to_string(), "Missing required config field: api_key");

        let err = Error::remote(403, "quotaExceeded", "The request cannot be completed");
        assert_eq!(
            err.to_string(),
            "Remote error 403 (quotaExceeded): The request cannot be completed"
        );
    }

    #[test]
    fn test_is_retryable() {
        assert!(Error::transport("connection reset").is_retryable());
        assert!(Error::Timeout { timeout_ms: 1000 }.is_retryable());
        assert!(Error::remote(429, "rateLimitExceeded", "").is_retryable());
        assert!(Error::remote(500, "backendError", "").is_retryable());
        assert!(Error::remote(503, "", "").is_retryable());

        assert!(!Error::remote(400, "badRequest", "").is_retryable());
        assert!(!Error::remote(403, "quotaExceeded", "").is_retryable());
        assert!(!Error::remote(404, "notFound", "").is_retryable());
        assert!(!Error::decode("bad payload").is_retryable());
        assert!(!Error::invalid_param("ids", "empty").is_retryable());
        assert!(!Error::config("test").is_retryable());
    }

    #[test]
    fn test_error_classification() {
        assert!(Error::invalid_param("ids", "empty").is_invalid_parameter());
        assert!(Error::config("no credentials").is_config());
        assert!(Error::missing_field("api_key").is_config());
        assert!(Error::decode("oops").is_decode());
        assert_eq!(Error::remote(404, "notFound", "").status(), Some(404));
        assert_eq!(Error::decode("oops").status(), None);
    }

    #[test]
    fn test_result_context() {
        let result: Result<()> = Err(Error::config("inner"));
        let with_context = result.with_context(|| "outer".to_string());
        assert!(with_context
            .unwrap_err()
            .to_string()
            .contains("outer: Configuration error: inner"));
    }
}
