//! The analysis pipeline: URL → video ids → comments → insights.
//!
//! The two external API clients sit behind capability traits so the
//! pipeline (and its tests) never care which concrete client is wired in.
//! Clients are constructed once at startup and shared read-only across
//! requests; the pipeline itself holds no mutable state.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use cintel_claude::{ClaudeClient, ClaudeError};
use cintel_core::{Analysis, AnalysisMode, Comment, VideoReference};
use cintel_youtube::{extract_video_id, VideoDetails, YoutubeClient, YoutubeError};

/// Capability: fetch comments and snippets for one video id.
#[async_trait]
pub trait CommentSource: Send + Sync {
    async fn top_level_comments(
        &self,
        video_id: &str,
        limit: u32,
    ) -> Result<Vec<Comment>, YoutubeError>;

    async fn video_details(&self, video_id: &str) -> Result<Option<VideoDetails>, YoutubeError>;
}

#[async_trait]
impl CommentSource for YoutubeClient {
    async fn top_level_comments(
        &self,
        video_id: &str,
        limit: u32,
    ) -> Result<Vec<Comment>, YoutubeError> {
        self.list_comments(video_id, limit).await
    }

    async fn video_details(&self, video_id: &str) -> Result<Option<VideoDetails>, YoutubeError> {
        self.get_video(video_id).await
    }
}

/// Capability: turn a competitor name plus comments into an analysis.
#[async_trait]
pub trait InsightProvider: Send + Sync {
    async fn analyze(
        &self,
        competitor_name: &str,
        comments: &[Comment],
        mode: AnalysisMode,
    ) -> Result<Analysis, ClaudeError>;
}

#[async_trait]
impl InsightProvider for ClaudeClient {
    async fn analyze(
        &self,
        competitor_name: &str,
        comments: &[Comment],
        mode: AnalysisMode,
    ) -> Result<Analysis, ClaudeError> {
        self.analyze_comments(competitor_name, comments, mode).await
    }
}

/// Errors that abort one pipeline run. Display strings double as the
/// user-facing `{error}` payloads.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Invalid YouTube URL")]
    NoVideoId,

    #[error("No comments found for the provided URLs")]
    NoComments,

    #[error("AI analysis failed: {0}")]
    Analysis(#[from] ClaudeError),
}

/// Everything `/analyze` needs to build its response.
#[derive(Debug)]
pub struct AnalysisOutcome {
    pub analysis: Analysis,
    pub videos: Vec<VideoReference>,
    pub total_comments: u64,
}

pub struct AnalysisPipeline {
    source: Arc<dyn CommentSource>,
    provider: Arc<dyn InsightProvider>,
    mode: AnalysisMode,
    comment_limit: u32,
}

impl AnalysisPipeline {
    pub fn new(
        source: Arc<dyn CommentSource>,
        provider: Arc<dyn InsightProvider>,
        mode: AnalysisMode,
        comment_limit: u32,
    ) -> Self {
        Self {
            source,
            provider,
            mode,
            comment_limit,
        }
    }

    /// Run one full analysis over the given URLs.
    ///
    /// URLs without a recognizable video id are skipped; per-video fetch
    /// failures degrade to an empty comment set for that video with a
    /// warning, so one bad video never sinks a multi-URL request. The
    /// generation call happens once, over all collected comments.
    ///
    /// # Errors
    ///
    /// - [`PipelineError::NoVideoId`] when no URL yields a video id — the
    ///   comments API is never called in that case.
    /// - [`PipelineError::NoComments`] when every video came back empty —
    ///   the generation API is never called in that case.
    /// - [`PipelineError::Analysis`] when the generation request fails.
    pub async fn run(
        &self,
        competitor_name: &str,
        urls: &[String],
    ) -> Result<AnalysisOutcome, PipelineError> {
        let mut videos = Vec::new();
        let mut all_comments: Vec<Comment> = Vec::new();

        for url in urls {
            let Some(video_id) = extract_video_id(url) else {
                tracing::warn!(url = %url, "skipping URL with no recognizable video id");
                continue;
            };

            let title = match self.source.video_details(&video_id).await {
                Ok(details) => details.map(|d| d.title),
                Err(e) => {
                    tracing::warn!(error = %e, video_id = %video_id, "video lookup failed");
                    None
                }
            };
            videos.push(VideoReference {
                url: url.clone(),
                video_id: video_id.clone(),
                title,
            });

            match self
                .source
                .top_level_comments(&video_id, self.comment_limit)
                .await
            {
                Ok(comments) => {
                    tracing::debug!(video_id = %video_id, count = comments.len(), "fetched comments");
                    all_comments.extend(comments);
                }
                Err(e) => {
                    tracing::warn!(
                        error = %e,
                        video_id = %video_id,
                        "comment fetch failed, continuing with none for this video"
                    );
                }
            }
        }

        if videos.is_empty() {
            return Err(PipelineError::NoVideoId);
        }
        if all_comments.is_empty() {
            return Err(PipelineError::NoComments);
        }

        let analysis = self
            .provider
            .analyze(competitor_name, &all_comments, self.mode)
            .await?;

        Ok(AnalysisOutcome {
            analysis,
            total_comments: all_comments.len() as u64,
            videos,
        })
    }
}
