//! Query specification: validation and endpoint dispatch

use super::types::{Operation, Request, SearchParam};
use crate::error::{Error, Result};
use crate::types::{ContinuationToken, StringMap};

/// Largest page size the list endpoints accept
pub const MAX_PAGE_SIZE: u32 = 50;

/// Parameters the engine sets itself; filters may not override them
pub const RESERVED_PARAMS: &[&str] = &[
    "part",
    "pageToken",
    "maxResults",
    "q",
    "relatedToVideoId",
    "id",
    "chart",
    "key",
];

const SEARCH_PART: &str = "snippet";
const VIDEO_PART: &str = "snippet,statistics";

/// Immutable description of one logical multi-page query.
///
/// Built only through the validating constructors, so holding a
/// `QuerySpec` means its invariants hold:
/// - `page_size` is within `1..=50`
/// - `Search` has exactly one of query text / related video id
/// - `ById` has at least one id
/// - filters never collide with reserved parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuerySpec {
    operation: Operation,
    query_text: Option<String>,
    related_to_video_id: Option<String>,
    ids: Vec<String>,
    page_size: u32,
    max_pages: u32,
    filters: StringMap,
}

impl QuerySpec {
    /// Build a text or related-video search
    pub fn search(param: &SearchParam) -> Result<Self> {
        let query_text = non_blank(param.query.as_deref());
        let related = non_blank(param.related_to_video.as_deref());

        match (&query_text, &related) {
            (Some(_), Some(_)) => {
                return Err(Error::invalid_param(
                    "related_to_video",
                    "query and related_to_video are mutually exclusive",
                ))
            }
            (None, None) => {
                return Err(Error::invalid_param(
                    "query",
                    "one of query or related_to_video is required",
                ))
            }
            _ => {}
        }

        let filters = validate_filters(&param.filters)?;
        if related.is_some() {
            if let Some(kind) = filters.get("type") {
                if kind != "video" {
                    return Err(Error::invalid_param(
                        "filters",
                        format!("related_to_video requires type=video, got type={kind}"),
                    ));
                }
            }
        }

        Ok(Self {
            operation: Operation::Search,
            query_text,
            related_to_video_id: related,
            ids: Vec::new(),
            page_size: validate_page_size(param.max_results_per_page)?,
            max_pages: param.max_page,
            filters,
        })
    }

    /// Build a trending (most popular) video listing
    pub fn most_popular(param: &SearchParam) -> Result<Self> {
        if non_blank(param.query.as_deref()).is_some() {
            return Err(Error::invalid_param(
                "query",
                "not supported for most popular listings",
            ));
        }
        if non_blank(param.related_to_video.as_deref()).is_some() {
            return Err(Error::invalid_param(
                "related_to_video",
                "not supported for most popular listings",
            ));
        }

        Ok(Self {
            operation: Operation::MostPopular,
            query_text: None,
            related_to_video_id: None,
            ids: Vec::new(),
            page_size: validate_page_size(param.max_results_per_page)?,
            max_pages: param.max_page,
            filters: validate_filters(&param.filters)?,
        })
    }

    /// Build a lookup of videos by id, batched in pages of 50 ids
    pub fn by_id<I, S>(ids: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::by_id_batched(ids, MAX_PAGE_SIZE)
    }

    /// Build a lookup of videos by id, `batch_size` ids per request
    pub fn by_id_batched<I, S>(ids: I, batch_size: u32) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let ids: Vec<String> = ids.into_iter().map(|id| id.into().trim().to_string()).collect();

        if ids.is_empty() {
            return Err(Error::invalid_param("ids", "at least one id is required"));
        }
        if let Some(pos) = ids.iter().position(String::is_empty) {
            return Err(Error::invalid_param(
                "ids",
                format!("id at position {pos} is blank"),
            ));
        }
        if let Some(bad) = ids.iter().find(|id| id.contains(',')) {
            return Err(Error::invalid_param(
                "ids",
                format!("id '{bad}' must not contain ','"),
            ));
        }

        Ok(Self {
            operation: Operation::ById,
            query_text: None,
            related_to_video_id: None,
            ids,
            page_size: validate_page_size(Some(batch_size))?,
            max_pages: 0,
            filters: StringMap::new(),
        })
    }

    pub fn operation(&self) -> Operation {
        self.operation
    }

    pub fn query_text(&self) -> Option<&str> {
        self.query_text.as_deref()
    }

    pub fn related_to_video_id(&self) -> Option<&str> {
        self.related_to_video_id.as_deref()
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Page bound; 0 means unbounded
    pub fn max_pages(&self) -> u32 {
        self.max_pages
    }

    pub fn filters(&self) -> &StringMap {
        &self.filters
    }

    /// Whether `pages_fetched` pages exhaust the page bound
    pub fn page_limit_reached(&self, pages_fetched: u32) -> bool {
        self.max_pages > 0 && pages_fetched >= self.max_pages
    }

    /// Resolve the request for the page identified by `token`
    pub fn request(&self, token: Option<&ContinuationToken>) -> Result<Request> {
        let mut params = Vec::new();

        match self.operation {
            Operation::Search => {
                params.push(param("part", SEARCH_PART));
                if let Some(q) = &self.query_text {
                    params.push(param("q", q));
                }
                if let Some(related) = &self.related_to_video_id {
                    params.push(param("relatedToVideoId", related));
                    if !self.filters.contains_key("type") {
                        params.push(param("type", "video"));
                    }
                }
                params.push(param("maxResults", self.page_size.to_string()));
            }
            Operation::MostPopular => {
                params.push(param("part", VIDEO_PART));
                params.push(param("chart", "mostPopular"));
                params.push(param("maxResults", self.page_size.to_string()));
            }
            Operation::ById => {
                let offset = self.batch_offset(token)?;
                let end = (offset + self.page_size as usize).min(self.ids.len());
                params.push(param("part", VIDEO_PART));
                params.push(param("id", self.ids[offset..end].join(",")));
            }
        }

        for (key, value) in &self.filters {
            params.push(param(key, value));
        }

        if self.operation != Operation::ById {
            if let Some(token) = token.filter(|t| !t.is_empty()) {
                params.push(param("pageToken", token.as_str()));
            }
        }

        Ok(Request {
            endpoint: self.operation.endpoint(),
            params,
        })
    }

    /// Token for the page after the one fetched with `current`.
    ///
    /// Search and trending listings pass the server's token through. Id
    /// lookups are not paginated by the service, so the next batch offset
    /// is issued here instead.
    pub fn next_token(
        &self,
        current: Option<&ContinuationToken>,
        server_token: Option<String>,
    ) -> Option<ContinuationToken> {
        match self.operation {
            Operation::Search | Operation::MostPopular => {
                ContinuationToken::from_server(server_token)
            }
            Operation::ById => {
                let next = self.batch_offset(current).ok()? + self.page_size as usize;
                (next < self.ids.len()).then(|| ContinuationToken::new(next.to_string()))
            }
        }
    }

    fn batch_offset(&self, token: Option<&ContinuationToken>) -> Result<usize> {
        let Some(token) = token.filter(|t| !t.is_empty()) else {
            return Ok(0);
        };
        match token.as_str().parse::<usize>() {
            Ok(offset) if offset < self.ids.len() => Ok(offset),
            _ => Err(Error::invalid_param(
                "page_token",
                format!("'{token}' is not a valid id batch offset"),
            )),
        }
    }
}

fn param(key: &str, value: impl Into<String>) -> (String, String) {
    (key.to_string(), value.into())
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn validate_page_size(size: Option<u32>) -> Result<u32> {
    match size {
        None => Ok(MAX_PAGE_SIZE),
        Some(size) if (1..=MAX_PAGE_SIZE).contains(&size) => Ok(size),
        Some(size) => Err(Error::invalid_param(
            "max_results_per_page",
            format!("must be between 1 and {MAX_PAGE_SIZE}, got {size}"),
        )),
    }
}

fn validate_filters(filters: &StringMap) -> Result<StringMap> {
    for key in filters.keys() {
        if key.trim().is_empty() {
            return Err(Error::invalid_param("filters", "filter keys must not be blank"));
        }
        if RESERVED_PARAMS.contains(&key.as_str()) {
            return Err(Error::invalid_param(
                "filters",
                format!("'{key}' is set by the client and cannot be used as a filter"),
            ));
        }
    }
    Ok(filters.clone())
}
