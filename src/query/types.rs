//! Query types
//!
//! Caller-facing parameters and the request a spec resolves to.

use crate::types::{Endpoint, QueryParams, StringMap};
use std::fmt;

/// The list operations the client supports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Text search or related-video search
    Search,
    /// Trending (`chart=mostPopular`) video listing
    MostPopular,
    /// Lookup of specific videos by id
    ById,
}

impl Operation {
    /// Endpoint the operation is served from
    pub fn endpoint(&self) -> Endpoint {
        match self {
            Operation::Search => Endpoint::Search,
            Operation::MostPopular | Operation::ById => Endpoint::Videos,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Search => "search",
            Operation::MostPopular => "most_popular",
            Operation::ById => "by_id",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parameters for search and trending listings.
///
/// ```rust
/// use youtube_pager::query::SearchParam;
///
/// let param = SearchParam::new()
///     .query("James Bond Best scenes")
///     .max_page(2)
///     .max_results_per_page(2);
/// assert_eq!(param.max_page, 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchParam {
    /// Free-text query (`q`)
    pub query: Option<String>,
    /// Video id to find related videos for (`relatedToVideoId`)
    pub related_to_video: Option<String>,
    /// Maximum number of pages to fetch (0 = until the results run out)
    pub max_page: u32,
    /// Page size (`maxResults`); defaults to the service maximum when unset
    pub max_results_per_page: Option<u32>,
    /// Extra request parameters such as `regionCode` or `order`
    pub filters: StringMap,
}

impl SearchParam {
    /// Create empty parameters
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the text query
    #[must_use]
    pub fn query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    /// Search for videos related to `video_id`
    #[must_use]
    pub fn related_to(mut self, video_id: impl Into<String>) -> Self {
        self.related_to_video = Some(video_id.into());
        self
    }

    /// Set the page bound
    #[must_use]
    pub fn max_page(mut self, pages: u32) -> Self {
        self.max_page = pages;
        self
    }

    /// Set the page size
    #[must_use]
    pub fn max_results_per_page(mut self, size: u32) -> Self {
        self.max_results_per_page = Some(size);
        self
    }

    /// Add an extra request parameter
    #[must_use]
    pub fn filter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.insert(key.into(), value.into());
        self
    }
}

/// One concrete request: where to send it and with which parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub endpoint: Endpoint,
    pub params: QueryParams,
}

impl Request {
    /// Value of a parameter, if present
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}
