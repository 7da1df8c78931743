// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::ref_option)]
#![allow(clippy::unused_self)]
#![allow(clippy::struct_excessive_bools)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::match_wildcard_for_single_variants)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # youtube-pager
//!
//! Streaming, rate-limited pagination over the YouTube Data API v3 list
//! endpoints.
//!
//! ## Features
//!
//! - **Streams, not lists**: every query is a `futures::Stream` of pages,
//!   fetched lazily by a background task with backpressure
//! - **Three operations**: text / related-video search, trending videos,
//!   lookup by id (batched transparently)
//! - **Retries**: transient transport and server errors are retried with
//!   exponential backoff, honouring `Retry-After`
//! - **Rate Limiting**: one token bucket shared by all streams of a client
//! - **Cancellation**: dropping a stream stops its task within one fetch
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use futures::StreamExt;
//! use youtube_pager::{Client, ClientConfig, SearchParam};
//!
//! #[tokio::main]
//! async fn main() -> youtube_pager::Result<()> {
//!     let client = Client::new(ClientConfig::from_env())?;
//!
//!     let param = SearchParam::new()
//!         .query("James Bond Best scenes")
//!         .max_page(2)
//!         .max_results_per_page(2);
//!
//!     let mut pages = client.search(&param)?;
//!     while let Some(page) = pages.next().await {
//!         for result in page.into_result()? {
//!             println!("{}", result.snippet.title);
//!         }
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  Client    search() / most_popular() / by_id() → PageStream<T>  │
//! └─────────────────────────────────────────────────────────────────┘
//!                                │ QuerySpec
//! ┌──────────────────────────────┴──────────────────────────────────┐
//! │  Paginator task ──▶ bounded channel ──▶ PageStream / ItemStream │
//! └─────────────────────────────────────────────────────────────────┘
//!                                │ fetch(spec, token)
//! ┌──────────┬───────────────────┴───────┬───────────┬─────────────┐
//! │  Fetch   │   HTTP                    │  Decode   │   Auth      │
//! ├──────────┼───────────────────────────┼───────────┼─────────────┤
//! │ Retry    │ Transport trait           │ JSON      │ API key     │
//! │ Backoff  │ Rate limit (governor)     │ Error body│ OAuth token │
//! └──────────┴───────────────────────────┴───────────┴─────────────┘
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]
#![allow(missing_docs)] // TODO: Add docs before 1.0 release

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Client configuration (file and environment)
pub mod config;

/// API key and OAuth token credentials
pub mod auth;

/// HTTP transport with rate limiting
pub mod http;

/// Wire types for the list endpoints
pub mod model;

/// Response decoders
pub mod decode;

/// Query parameters, validation and endpoint dispatch
pub mod query;

/// Single-page fetching with retry
pub mod fetch;

/// Paginator task and page streams
pub mod pagination;

/// High-level client
pub mod client;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

// Re-export commonly used types
pub use client::Client;
pub use config::ClientConfig;
pub use model::{SearchResult, Video};
pub use pagination::{ItemStream, Page, PageStream};
pub use query::{QuerySpec, SearchParam};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
