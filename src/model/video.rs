//! `videos` resource types
//!
//! See: <https://developers.google.com/youtube/v3/docs/videos#resource>

use super::common::{count_from_str, Snippet};
use serde::{Deserialize, Serialize};

/// A `video` resource represents a YouTube video.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Video {
    /// `youtube#video`
    #[serde(default)]
    pub kind: String,
    #[serde(default)]
    pub etag: String,
    /// The ID that YouTube uses to uniquely identify the video.
    pub id: String,
    #[serde(default)]
    pub snippet: Snippet,
    /// Present when `part` includes `statistics`
    #[serde(default)]
    pub statistics: Option<VideoStatistics>,
    /// Present when `part` includes `contentDetails`
    #[serde(default)]
    pub content_details: Option<VideoContentDetails>,
}

impl Video {
    /// View count, zero when statistics were not requested or are hidden
    pub fn view_count(&self) -> u64 {
        self.statistics
            .as_ref()
            .and_then(|s| s.view_count)
            .unwrap_or_default()
    }
}

/// Statistics about the video.
///
/// See: <https://developers.google.com/youtube/v3/docs/videos#statistics>
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoStatistics {
    /// The number of times the video has been viewed.
    #[serde(default, deserialize_with = "count_from_str")]
    pub view_count: Option<u64>,
    /// The number of users who have indicated that they liked the video.
    #[serde(default, deserialize_with = "count_from_str")]
    pub like_count: Option<u64>,
    /// Only visible to the video owner.
    #[serde(default, deserialize_with = "count_from_str")]
    pub dislike_count: Option<u64>,
    /// Deprecated upstream, always 0.
    #[serde(default, deserialize_with = "count_from_str")]
    pub favorite_count: Option<u64>,
    /// The number of comments for the video.
    #[serde(default, deserialize_with = "count_from_str")]
    pub comment_count: Option<u64>,
}

/// Duration and format details
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoContentDetails {
    /// ISO 8601 duration, e.g. `PT4M13S`
    #[serde(default)]
    pub duration: Option<String>,
    /// `2d` or `3d`
    #[serde(default)]
    pub dimension: Option<String>,
    /// `hd` or `sd`
    #[serde(default)]
    pub definition: Option<String>,
    /// Whether captions are available (`"true"` / `"false"` on the wire)
    #[serde(default)]
    pub caption: Option<String>,
}
