//! Wire types for the `YouTube` Data API v3 responses we consume.

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Title and description of a video, from `videos.list` (`part=snippet`).
#[derive(Debug, Clone, Deserialize)]
pub struct VideoDetails {
    pub title: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CommentThreadListResponse {
    #[serde(default)]
    pub items: Vec<CommentThread>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CommentThread {
    pub snippet: CommentThreadSnippet,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CommentThreadSnippet {
    pub top_level_comment: TopLevelComment,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TopLevelComment {
    pub snippet: CommentSnippet,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CommentSnippet {
    #[serde(default)]
    pub text_display: String,
    #[serde(default)]
    pub author_display_name: String,
    #[serde(default)]
    pub like_count: u64,
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct VideoListResponse {
    #[serde(default)]
    pub items: Vec<VideoItem>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct VideoItem {
    pub snippet: VideoDetails,
}
