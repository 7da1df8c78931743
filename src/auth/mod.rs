//! Authentication module
//!
//! Supports: API key (query parameter) and OAuth2 bearer token
//!
//! The `Authenticator` applies credentials to outgoing requests. It holds
//! no mutable state, so one instance is shared by every stream of a client.

mod authenticator;
mod types;

pub use authenticator::Authenticator;
pub use types::{Credentials, API_KEY_PARAM};

#[cfg(test)]
mod tests;
