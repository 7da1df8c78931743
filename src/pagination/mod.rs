//! Pagination module
//!
//! Drives a [`PageFetcher`](crate::fetch::PageFetcher) page by page and
//! hands the results to the caller as a stream.
//!
//! # Overview
//!
//! Every query runs on its own tokio task. The task fetches a page, sends
//! it over a bounded channel and only then fetches the next one, so a slow
//! consumer holds the producer back. The stream ends when the token runs
//! out, the page bound is reached, a fetch fails (after one error page) or
//! the consumer goes away.
//!
//! ```text
//! Start ──▶ Fetching ──ok──▶ Emitting ──more──▶ Fetching ...
//!              │                 │
//!              err               last / bound
//!              ▼                 ▼
//!           Failed             Done          (Cancelled: consumer gone)
//! ```

mod paginator;
mod stream;
mod types;

pub use paginator::Paginator;
pub use stream::{ItemStream, PageStream};
pub use types::{Page, PaginationState, PaginatorState};

#[cfg(test)]
mod tests;
