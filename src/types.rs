//! Common types used throughout youtube-pager
//!
//! This module contains shared type definitions, type aliases,
//! and small value types used across multiple modules.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

// ============================================================================
// Type Aliases
// ============================================================================

/// Ordered key-value map with string keys and values
pub type StringMap = BTreeMap<String, String>;

/// Request query parameters, in the order they are sent
pub type QueryParams = Vec<(String, String)>;

// ============================================================================
// Continuation Token
// ============================================================================

/// Opaque cursor issued by the remote service to fetch the next page.
///
/// The paginator never looks inside a token, it only threads it through.
/// An empty token means there are no further pages.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContinuationToken(String);

impl ContinuationToken {
    /// Wrap a raw token string
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Convert an optional server token, treating `""` as absent
    pub fn from_server(token: Option<String>) -> Option<Self> {
        token.filter(|t| !t.is_empty()).map(Self)
    }

    /// Raw token value
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the token signals the end of the result set
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ContinuationToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// Endpoint
// ============================================================================

/// Remote list endpoint addressed by a request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// `GET /search`
    Search,
    /// `GET /videos`
    Videos,
}

impl Endpoint {
    /// Path segment relative to the API base URL
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::Search => "search",
            Endpoint::Videos => "videos",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

// ============================================================================
// Backoff Type
// ============================================================================

/// Backoff strategy for retries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackoffType {
    /// Constant delay between retries
    Constant,
    /// Linear increase in delay
    Linear,
    /// Exponential increase in delay
    #[default]
    Exponential,
}

// ============================================================================
// Log Level
// ============================================================================

/// Log level for the command-line front end
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl From<LogLevel> for tracing::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => tracing::Level::TRACE,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Error => tracing::Level::ERROR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_continuation_token_from_server() {
        assert_eq!(ContinuationToken::from_server(None), None);
        assert_eq!(ContinuationToken::from_server(Some(String::new())), None);
        assert_eq!(
            ContinuationToken::from_server(Some("CAIQAA".to_string())),
            Some(ContinuationToken::new("CAIQAA"))
        );
    }

    #[test]
    fn test_continuation_token_serde_transparent() {
        let token = ContinuationToken::new("CAUQAA");
        assert_eq!(serde_json::to_string(&token).unwrap(), "\"CAUQAA\"");
        assert_eq!(token.to_string(), "CAUQAA");
    }

    #[test]
    fn test_endpoint_path() {
        assert_eq!(Endpoint::Search.path(), "search");
        assert_eq!(Endpoint::Videos.to_string(), "videos");
    }

    #[test]
    fn test_backoff_type_default() {
        assert_eq!(BackoffType::default(), BackoffType::Exponential);
        let parsed: BackoffType = serde_json::from_str("\"linear\"").unwrap();
        assert_eq!(parsed, BackoffType::Linear);
    }

    #[test]
    fn test_log_level_conversion() {
        let level: tracing::Level = LogLevel::Warn.into();
        assert_eq!(level, tracing::Level::WARN);
    }
}
