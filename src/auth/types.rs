//! Credential types

use std::fmt;

/// Query parameter the YouTube Data API reads the API key from
pub const API_KEY_PARAM: &str = "key";

/// Credentials attached to every request
#[derive(Clone, PartialEq, Eq)]
pub enum Credentials {
    /// API key, sent as `?key=...`
    ApiKey(String),

    /// OAuth2 access token, sent as `Authorization: Bearer ...`
    Bearer(String),
}

impl Credentials {
    /// Create API key credentials
    pub fn api_key(key: impl Into<String>) -> Self {
        Self::ApiKey(key.into())
    }

    /// Create bearer token credentials
    pub fn bearer(token: impl Into<String>) -> Self {
        Self::Bearer(token.into())
    }

    /// Short, non-secret description for logs
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ApiKey(_) => "api_key",
            Self::Bearer(_) => "bearer",
        }
    }
}

// Secrets never reach log output.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ApiKey(_) => f.write_str("ApiKey(***)"),
            Self::Bearer(_) => f.write_str("Bearer(***)"),
        }
    }
}
