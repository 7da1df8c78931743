//! Authenticator implementation
//!
//! Applies credentials to reqwest request builders.

use super::types::{Credentials, API_KEY_PARAM};
use reqwest::RequestBuilder;

/// Authenticator handles applying credentials to HTTP requests
#[derive(Debug, Clone)]
pub struct Authenticator {
    credentials: Credentials,
}

impl Authenticator {
    /// Create a new authenticator with the given credentials
    pub fn new(credentials: Credentials) -> Self {
        Self { credentials }
    }

    /// Apply authentication to a request builder
    pub fn apply(&self, req: RequestBuilder) -> RequestBuilder {
        match &self.credentials {
            Credentials::ApiKey(key) => req.query(&[(API_KEY_PARAM, key.as_str())]),
            Credentials::Bearer(token) => req.bearer_auth(token),
        }
    }

    /// Get the credentials
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }
}
