//! Types shared by the search and videos payloads

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Envelope returned by every `*.list` endpoint.
///
/// See: <https://developers.google.com/youtube/v3/docs/search/list#response>
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListResponse<T> {
    /// Identifies the API resource's type, e.g. `youtube#searchListResponse`
    #[serde(default)]
    pub kind: String,
    /// Etag of this resource
    #[serde(default)]
    pub etag: String,
    /// Token for the next page; absent or empty on the last page
    #[serde(default)]
    pub next_page_token: Option<String>,
    /// Token for the previous page
    #[serde(default)]
    pub prev_page_token: Option<String>,
    /// Paging details
    #[serde(default)]
    pub page_info: Option<PageInfo>,
    /// The resources on this page, in server order
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
}

impl<T> ListResponse<T> {
    /// A response carrying `items` and an optional next token
    pub fn new(items: Vec<T>, next_page_token: Option<String>) -> Self {
        Self {
            kind: String::new(),
            etag: String::new(),
            next_page_token,
            prev_page_token: None,
            page_info: None,
            items,
        }
    }
}

/// Paging details for lists of resources.
///
/// See: <https://developers.google.com/youtube/v3/docs/pageInfo>
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    /// The total number of results in the result set (an approximation for search)
    #[serde(default)]
    pub total_results: u32,
    /// The number of results included in the API response
    #[serde(default)]
    pub results_per_page: u32,
}

/// Basic details about a video, channel or playlist
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snippet {
    /// Creation / upload time
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
    /// Channel that published the resource
    #[serde(default)]
    pub channel_id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub thumbnails: Thumbnails,
    #[serde(default)]
    pub channel_title: String,
    /// Keyword tags (videos only)
    #[serde(default)]
    pub tags: Vec<String>,
    /// Video category (videos only)
    #[serde(default)]
    pub category_id: Option<String>,
    /// `none`, `upcoming` or `live`
    #[serde(default)]
    pub live_broadcast_content: Option<String>,
}

/// Thumbnail images keyed by resolution
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Thumbnails {
    #[serde(default)]
    pub default: Option<Thumbnail>,
    #[serde(default)]
    pub medium: Option<Thumbnail>,
    #[serde(default)]
    pub high: Option<Thumbnail>,
    #[serde(default)]
    pub standard: Option<Thumbnail>,
    #[serde(default)]
    pub maxres: Option<Thumbnail>,
}

impl Thumbnails {
    /// Highest resolution thumbnail available
    pub fn best(&self) -> Option<&Thumbnail> {
        self.maxres
            .as_ref()
            .or(self.standard.as_ref())
            .or(self.high.as_ref())
            .or(self.medium.as_ref())
            .or(self.default.as_ref())
    }
}

/// A single thumbnail image
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thumbnail {
    pub url: String,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
}

/// Counts are sent as JSON strings (`"viewCount": "1234"`); accept numbers too.
pub(crate) fn count_from_str<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Count {
        Text(String),
        Number(u64),
    }

    match Option::<Count>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Count::Number(n)) => Ok(Some(n)),
        Some(Count::Text(s)) => s
            .trim()
            .parse()
            .map(Some)
            .map_err(|e| serde::de::Error::custom(format!("invalid count '{s}': {e}"))),
    }
}
