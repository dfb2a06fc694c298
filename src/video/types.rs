use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A resolved video identity, produced by URL parsing and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoReference {
    /// 11-character opaque token assigned by YouTube
    pub video_id: String,
    /// Whether the URL used the Shorts path shape
    pub is_short: bool,
}

impl VideoReference {
    /// URL handed to the extractor. Shorts keep their path shape so the
    /// extractor sees the same product surface the caller asked about.
    pub fn canonical_url(&self) -> String {
        if self.is_short {
            format!("https://www.youtube.com/shorts/{}", self.video_id)
        } else {
            format!("https://www.youtube.com/watch?v={}", self.video_id)
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Thumbnail {
    pub url: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Snippet {
    pub published_at: Option<String>,
    pub channel_id: Option<String>,
    pub channel_url: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub thumbnails: BTreeMap<String, Thumbnail>,
    pub channel_title: Option<String>,
    pub tags: Vec<String>,
}

/// Counters keep YouTube's own convention of string-typed decimal values.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    pub view_count: Option<String>,
    pub like_count: Option<String>,
    pub comment_count: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ContentDetails {
    /// ISO-8601 duration, e.g. `PT10M30S`. Kept verbatim when unparseable.
    pub duration: Option<String>,
    /// Parsed total in seconds; 0 when the duration is absent or unparseable
    pub duration_seconds: u64,
    pub definition: Option<String>,
    pub captions_available: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChannelInfo {
    pub id: Option<String>,
    pub title: Option<String>,
    pub subscriber_count: Option<String>,
    pub url: Option<String>,
}

/// The fixed response shape. Every leaf the extractor did not report stays
/// `null` rather than being invented.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VideoMetadata {
    pub video_id: String,
    pub is_short: bool,
    pub snippet: Snippet,
    pub statistics: Statistics,
    pub content_details: ContentDetails,
    pub channel: ChannelInfo,
}
