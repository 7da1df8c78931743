//! Response decoder module
//!
//! # Overview
//!
//! A decoder turns one raw response body into a typed [`ListResponse`].
//! Decoders are injected per response shape, so callers can swap in their
//! own (for example to read recorded fixtures or a different payload
//! format) without touching the pagination engine.
//!
//! [`ListResponse`]: crate::model::ListResponse

mod decoders;
mod types;

pub use decoders::{parse_error_body, JsonDecoder, RemoteErrorBody};
pub use types::PageDecoder;
