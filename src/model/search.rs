//! `search` resource types
//!
//! See: <https://developers.google.com/youtube/v3/docs/search#resource>

use super::common::Snippet;
use serde::{Deserialize, Serialize};

/// One search hit. Depending on `id.kind` it points at a video, a channel
/// or a playlist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    /// `youtube#searchResult`
    #[serde(default)]
    pub kind: String,
    #[serde(default)]
    pub etag: String,
    pub id: ResourceId,
    #[serde(default)]
    pub snippet: Snippet,
}

impl SearchResult {
    /// The id of whatever resource this hit refers to
    pub fn resource_id(&self) -> Option<&str> {
        self.id.value()
    }
}

/// Identifies the resource matching a search request
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceId {
    /// `youtube#video`, `youtube#channel` or `youtube#playlist`
    #[serde(default)]
    pub kind: String,
    #[serde(default)]
    pub video_id: Option<String>,
    #[serde(default)]
    pub channel_id: Option<String>,
    #[serde(default)]
    pub playlist_id: Option<String>,
}

impl ResourceId {
    /// The populated discriminant, whichever it is
    pub fn value(&self) -> Option<&str> {
        self.video_id
            .as_deref()
            .or(self.channel_id.as_deref())
            .or(self.playlist_id.as_deref())
    }

    pub fn is_video(&self) -> bool {
        self.video_id.is_some()
    }

    pub fn is_channel(&self) -> bool {
        self.channel_id.is_some()
    }

    pub fn is_playlist(&self) -> bool {
        self.playlist_id.is_some()
    }
}
