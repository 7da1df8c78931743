//! Resource types
//!
//! Read-only DTOs for the YouTube Data API v3 payloads this crate
//! consumes. Field names follow the wire format through serde renames;
//! everything not needed to identify a record is optional or defaulted so
//! that sparse `part` selections still decode.

mod common;
mod search;
mod video;

pub use common::{ListResponse, PageInfo, Snippet, Thumbnail, Thumbnails};
pub use search::{ResourceId, SearchResult};
pub use video::{Video, VideoContentDetails, VideoStatistics};
