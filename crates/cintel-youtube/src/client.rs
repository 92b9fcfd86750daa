//! HTTP client for the `YouTube` Data API v3.
//!
//! Wraps `reqwest` with API key management, typed response deserialization,
//! and flattening of the nested comment-thread snippets into the flat
//! [`Comment`] record the rest of the pipeline consumes.

use std::time::Duration;

use reqwest::{Client, Url};

use cintel_core::Comment;

use crate::error::YoutubeError;
use crate::types::{CommentThreadListResponse, VideoDetails, VideoListResponse};

const DEFAULT_BASE_URL: &str = "https://www.googleapis.com/youtube/v3/";

/// The API rejects `maxResults` above 100 on `commentThreads.list`.
const MAX_RESULTS_CAP: u32 = 100;

/// Client for the `YouTube` Data API v3.
///
/// Manages the HTTP client, API key, and base URL. Use [`YoutubeClient::new`]
/// for production or [`YoutubeClient::with_base_url`] to point at a mock
/// server in tests.
pub struct YoutubeClient {
    client: Client,
    api_key: String,
    base_url: Url,
}

impl YoutubeClient {
    /// Creates a new client pointed at the production `YouTube` Data API.
    ///
    /// # Errors
    ///
    /// Returns [`YoutubeError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, timeout_secs: u64) -> Result<Self, YoutubeError> {
        Self::with_base_url(api_key, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`YoutubeError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`YoutubeError::InvalidBaseUrl`] if
    /// `base_url` does not parse.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, YoutubeError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("cintel/0.1 (competitive-intelligence)")
            .build()?;

        // Normalise: ensure the base URL ends with exactly one slash so that
        // resource segments append to the path rather than replacing the last
        // segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised)
            .map_err(|_| YoutubeError::InvalidBaseUrl(base_url.to_string()))?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url,
        })
    }

    /// Fetches top-level comments for one video, in the API's relevance
    /// order.
    ///
    /// Issues a single `commentThreads.list` request (`part=snippet`,
    /// top-level comments only, first page). Never returns more than
    /// `max_results` comments; the API-side cap of 100 also applies.
    ///
    /// # Errors
    ///
    /// - [`YoutubeError::Api`] if the API returns a non-2xx status.
    /// - [`YoutubeError::Http`] on network failure.
    /// - [`YoutubeError::Deserialize`] if the response does not match the
    ///   expected shape.
    pub async fn list_comments(
        &self,
        video_id: &str,
        max_results: u32,
    ) -> Result<Vec<Comment>, YoutubeError> {
        let capped = max_results.clamp(1, MAX_RESULTS_CAP);
        let url = self.build_url(
            "commentThreads",
            &[
                ("part", "snippet"),
                ("videoId", video_id),
                ("maxResults", &capped.to_string()),
                ("order", "relevance"),
            ],
        );

        let body = self.request_json(&url).await?;
        let parsed: CommentThreadListResponse =
            serde_json::from_value(body).map_err(|e| YoutubeError::Deserialize {
                context: format!("commentThreads.list(videoId={video_id})"),
                source: e,
            })?;

        let comments = parsed
            .items
            .into_iter()
            .take(capped as usize)
            .map(|thread| {
                let snippet = thread.snippet.top_level_comment.snippet;
                Comment {
                    text: snippet.text_display,
                    author: snippet.author_display_name,
                    like_count: snippet.like_count,
                    published_at: snippet.published_at,
                }
            })
            .collect();

        Ok(comments)
    }

    /// Fetches the snippet (title, description) for one video.
    ///
    /// Returns `Ok(None)` when the API reports no such video.
    ///
    /// # Errors
    ///
    /// - [`YoutubeError::Api`] if the API returns a non-2xx status.
    /// - [`YoutubeError::Http`] on network failure.
    /// - [`YoutubeError::Deserialize`] if the response does not match the
    ///   expected shape.
    pub async fn get_video(&self, video_id: &str) -> Result<Option<VideoDetails>, YoutubeError> {
        let url = self.build_url("videos", &[("part", "snippet"), ("id", video_id)]);

        let body = self.request_json(&url).await?;
        let parsed: VideoListResponse =
            serde_json::from_value(body).map_err(|e| YoutubeError::Deserialize {
                context: format!("videos.list(id={video_id})"),
                source: e,
            })?;

        Ok(parsed.items.into_iter().next().map(|item| item.snippet))
    }

    /// Builds the full request URL with properly percent-encoded query
    /// parameters, appending the API key last.
    fn build_url(&self, resource: &str, extra: &[(&str, &str)]) -> Url {
        let mut url = self.base_url.clone();
        // The base URL is guaranteed http(s) by the constructor, so path
        // segments are always available.
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(resource);
        }
        {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in extra {
                pairs.append_pair(k, v);
            }
            pairs.append_pair("key", &self.api_key);
        }
        url
    }

    /// Sends a GET request and parses the response body as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`YoutubeError::Api`] for non-2xx statuses, carrying the
    /// upstream error message when the body contains one.
    async fn request_json(&self, url: &Url) -> Result<serde_json::Value, YoutubeError> {
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(YoutubeError::Api {
                status: status.as_u16(),
                message: extract_api_error(&body),
            });
        }

        serde_json::from_str(&body).map_err(|e| YoutubeError::Deserialize {
            context: url.path().to_string(),
            source: e,
        })
    }
}

/// Pulls `error.message` out of a `YouTube` error payload, falling back to
/// the raw body text.
fn extract_api_error(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.get("error")
                .and_then(|e| e.get("message"))
                .and_then(serde_json::Value::as_str)
                .map(ToOwned::to_owned)
        })
        .unwrap_or_else(|| body.trim().to_string())
}
