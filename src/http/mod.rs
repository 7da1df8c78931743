//! HTTP transport module
//!
//! One request, one response. Retries are the page fetcher's job, so
//! nothing in this module ever repeats a request.
//!
//! # Features
//!
//! - **Transport trait**: the seam the page fetcher talks to, easy to mock
//! - **Rate Limiting**: token bucket throttle shared by all streams (governor)
//! - **Authentication**: API key or bearer token via the auth module

mod client;
mod throttle;
mod transport;

pub use client::{HttpClientConfig, HttpClientConfigBuilder, HttpTransport};
pub use throttle::Throttle;
pub use transport::{RawResponse, Transport};
