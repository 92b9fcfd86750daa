//! `YouTube` Data API v3 client for cintel.
//!
//! Fetches top-level comment threads and video snippets for one video id,
//! and parses user-supplied video URLs into ids. One request per call, no
//! pagination beyond the first page, no retries.

mod client;
mod error;
mod types;
mod url;

pub use client::YoutubeClient;
pub use error::YoutubeError;
pub use types::VideoDetails;
pub use url::extract_video_id;
