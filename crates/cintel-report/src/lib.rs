//! Report rendering for cintel.
//!
//! Turns an analysis plus request metadata into a downloadable artifact:
//! either a fixed-layout plain-text document or a paginated PDF. Rendering
//! is a pure function of its inputs — the only timestamp embedded is the
//! one carried in [`ReportMeta`], so identical inputs reproduce identical
//! bytes.

mod pdf;
pub mod sections;
mod text;

pub use pdf::render_pdf;
pub use text::render_text;

use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use thiserror::Error;

/// Request metadata rendered into every report header.
#[derive(Debug, Clone)]
pub struct ReportMeta {
    pub competitor_name: String,
    pub generated_at: DateTime<Utc>,
    pub total_comments: u64,
    pub total_videos: u64,
}

/// An immutable, ready-to-download artifact. Never persisted; streamed to
/// the caller and dropped.
#[derive(Debug, Clone)]
pub struct RenderedReport {
    pub bytes: Vec<u8>,
    pub filename: String,
    pub content_type: &'static str,
}

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("PDF generation error: {0}")]
    Pdf(String),
}

static UNSAFE_FILENAME_CHARS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[^\w\-.]").expect("filename pattern is valid")
});

/// Replace anything outside `[A-Za-z0-9_\-.]` with underscores so the
/// competitor name is safe inside a Content-Disposition filename.
#[must_use]
pub fn sanitize_filename_component(name: &str) -> String {
    UNSAFE_FILENAME_CHARS.replace_all(name, "_").into_owned()
}
