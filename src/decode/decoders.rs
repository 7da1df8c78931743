//! Decoder implementations

use super::types::PageDecoder;
use crate::error::{Error, Result};
use crate::model::ListResponse;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::fmt;
use std::marker::PhantomData;

// ============================================================================
// JSON Decoder
// ============================================================================

/// serde_json decoder for any list payload shape
pub struct JsonDecoder<T> {
    _shape: PhantomData<fn() -> T>,
}

impl<T> JsonDecoder<T> {
    /// Create a new JSON decoder
    pub fn new() -> Self {
        Self {
            _shape: PhantomData,
        }
    }
}

impl<T> Default for JsonDecoder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for JsonDecoder<T> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for JsonDecoder<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JsonDecoder")
            .field("shape", &std::any::type_name::<T>())
            .finish()
    }
}

impl<T: DeserializeOwned> PageDecoder<T> for JsonDecoder<T> {
    fn decode(&self, body: &str) -> Result<ListResponse<T>> {
        if body.trim().is_empty() {
            return Err(Error::decode("empty response body"));
        }
        serde_json::from_str(body).map_err(|e| Error::Decode {
            message: format!("Failed to parse JSON: {e}"),
        })
    }
}

// ============================================================================
// Error Envelope
// ============================================================================

/// Structured error returned by Google APIs on non-2xx responses
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteErrorBody {
    /// `errors[0].reason`, e.g. `quotaExceeded`
    pub reason: String,
    /// Human-readable message
    pub message: String,
}

#[derive(Deserialize)]
struct Envelope {
    error: EnvelopeError,
}

#[derive(Deserialize)]
struct EnvelopeError {
    #[serde(default)]
    message: String,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    errors: Vec<EnvelopeDetail>,
}

#[derive(Deserialize)]
struct EnvelopeDetail {
    #[serde(default)]
    reason: String,
}

/// Parse the `{"error": {...}}` envelope, if the body carries one
pub fn parse_error_body(body: &str) -> Option<RemoteErrorBody> {
    let envelope: Envelope = serde_json::from_str(body).ok()?;
    let error = envelope.error;

    let reason = error
        .errors
        .into_iter()
        .map(|d| d.reason)
        .find(|r| !r.is_empty())
        .or(error.status)
        .unwrap_or_default();

    Some(RemoteErrorBody {
        reason,
        message: error.message,
    })
}
