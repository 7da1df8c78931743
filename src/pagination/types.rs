//! Pagination types
//!
//! The page handed to consumers and the bookkeeping of a running paginator.

use crate::error::{Error, Result};
use crate::types::ContinuationToken;
use std::fmt;

/// One batch of results.
///
/// A page carries either items or an error. An error page is always the
/// last page of its stream.
#[derive(Debug)]
pub struct Page<T> {
    /// 1-based position of the page in its stream
    pub number: u32,
    /// Items in server order (empty on error pages)
    pub items: Vec<T>,
    /// Server's estimate of the total result count
    pub total_results: Option<u32>,
    /// Terminal error, if fetching this page failed
    pub err: Option<Error>,
}

impl<T> Page<T> {
    /// A successful page
    pub fn new(number: u32, items: Vec<T>) -> Self {
        Self {
            number,
            items,
            total_results: None,
            err: None,
        }
    }

    /// The terminal page of a stream whose fetch failed
    pub fn failed(number: u32, err: Error) -> Self {
        Self {
            number,
            items: Vec::new(),
            total_results: None,
            err: Some(err),
        }
    }

    /// Set the total results estimate
    #[must_use]
    pub fn with_total_results(mut self, total: Option<u32>) -> Self {
        self.total_results = total;
        self
    }

    /// Whether this page carries an error
    pub fn is_err(&self) -> bool {
        self.err.is_some()
    }

    /// Number of items on the page
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the page has no items
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Split into items or the error
    pub fn into_result(self) -> Result<Vec<T>> {
        match self.err {
            Some(err) => Err(err),
            None => Ok(self.items),
        }
    }
}

/// Where a paginator is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaginatorState {
    /// Nothing fetched yet
    #[default]
    Start,
    /// A fetch is in flight
    Fetching,
    /// A page is being handed to the consumer
    Emitting,
    /// Token exhausted or page bound reached
    Done,
    /// A fetch failed; the error page was the last one
    Failed,
    /// The consumer closed or dropped the stream
    Cancelled,
}

impl PaginatorState {
    /// Whether no further pages can follow
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done | Self::Failed | Self::Cancelled)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Fetching => "fetching",
            Self::Emitting => "emitting",
            Self::Done => "done",
            Self::Failed => "failed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for PaginatorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tracks pagination progress; returned by the task when it ends
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaginationState {
    /// Pages delivered to the consumer (error pages excluded)
    pub pages_fetched: u32,
    /// Items delivered to the consumer
    pub items_fetched: u64,
    /// Token for the next page to fetch
    pub token: Option<ContinuationToken>,
    /// Current machine state
    pub state: PaginatorState,
}

impl PaginationState {
    /// Create a new pagination state
    pub fn new() -> Self {
        Self::default()
    }

    /// Move to `state`
    pub fn transition(&mut self, state: PaginatorState) {
        self.state = state;
    }

    /// Record a delivered page and the token that follows it
    pub fn record_page(&mut self, items: usize, next_token: Option<ContinuationToken>) {
        self.pages_fetched += 1;
        self.items_fetched += items as u64;
        self.token = next_token.filter(|t| !t.is_empty());
    }

    /// Whether another page is available
    pub fn has_next(&self) -> bool {
        self.token.is_some()
    }

    /// Number the next page will carry
    pub fn next_page_number(&self) -> u32 {
        self.pages_fetched + 1
    }
}
