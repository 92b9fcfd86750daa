use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single top-level viewer comment on a video.
///
/// Immutable once fetched; the prompt builder reads these in the order the
/// comments API returned them (relevance order).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub text: String,
    pub author: String,
    pub like_count: u64,
    /// Publication timestamp when the API provides one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_at: Option<DateTime<Utc>>,
}

/// A video resolved from a user-supplied URL.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoReference {
    pub url: String,
    pub video_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}
