//! Decoder traits

use crate::error::Result;
use crate::model::ListResponse;

/// Decodes a raw list payload into typed records.
///
/// Any failure must be reported as [`Error::Decode`](crate::Error::Decode);
/// decode failures end the stream without retries.
pub trait PageDecoder<T>: Send + Sync {
    /// Decode one response body
    fn decode(&self, body: &str) -> Result<ListResponse<T>>;
}
