//! Page fetching module
//!
//! One fetch is one logical page: a transport round trip, error
//! classification, decoding, and retries for transient failures.
//!
//! # Features
//!
//! - **Retry policy**: bounded attempts with constant, linear or exponential backoff
//! - **Error classification**: transport, remote (with the API's error reason), decode
//! - **Retry-After**: honoured for throttled responses

mod fetcher;
mod retry;

pub use fetcher::{FetchedPage, PageFetcher, RemoteFetcher};
pub use retry::RetryPolicy;
