use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Extension, Json,
};
use serde::{Deserialize, Serialize};

use cintel_core::{Analysis, VideoReference};

use super::{error_response, AppState, CONFIG_ERROR_MESSAGE};
use crate::middleware::RequestId;
use crate::pipeline::PipelineError;

/// Request body for `POST /analyze`.
///
/// Accepts both field spellings the form variants send: a single
/// `video_url` or a `urls` array, and `competitor_name` or `product_name`.
#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default, alias = "product_name")]
    pub competitor_name: Option<String>,
    #[serde(default)]
    pub video_url: Option<String>,
    #[serde(default)]
    pub urls: Option<Vec<String>>,
}

impl AnalyzeRequest {
    /// All requested URLs, trimmed, empty entries dropped, `video_url`
    /// first.
    fn requested_urls(&self) -> Vec<String> {
        let mut urls = Vec::new();
        if let Some(url) = &self.video_url {
            if !url.trim().is_empty() {
                urls.push(url.trim().to_string());
            }
        }
        if let Some(list) = &self.urls {
            urls.extend(
                list.iter()
                    .map(|u| u.trim().to_string())
                    .filter(|u| !u.is_empty()),
            );
        }
        urls
    }
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub analysis: Analysis,
    pub total_comments: u64,
    pub total_videos: u64,
    pub competitor_name: String,
    /// Echoed back only for single-URL requests, the way the single-video
    /// form expects.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
    pub videos: Vec<VideoReference>,
}

pub async fn analyze(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(req): Json<AnalyzeRequest>,
) -> Response {
    let Some(pipeline) = state.pipeline.clone() else {
        return error_response(StatusCode::SERVICE_UNAVAILABLE, CONFIG_ERROR_MESSAGE);
    };

    let competitor_name = req
        .competitor_name
        .as_deref()
        .unwrap_or("")
        .trim()
        .to_string();
    let urls = req.requested_urls();
    if competitor_name.is_empty() || urls.is_empty() {
        return error_response(
            StatusCode::BAD_REQUEST,
            "Please provide both video URL and competitor name",
        );
    }

    match pipeline.run(&competitor_name, &urls).await {
        Ok(outcome) => {
            let video_url = (urls.len() == 1).then(|| urls[0].clone());
            Json(AnalyzeResponse {
                analysis: outcome.analysis,
                total_comments: outcome.total_comments,
                total_videos: outcome.videos.len() as u64,
                competitor_name,
                video_url,
                videos: outcome.videos,
            })
            .into_response()
        }
        Err(e @ (PipelineError::NoVideoId | PipelineError::NoComments)) => {
            error_response(StatusCode::BAD_REQUEST, e.to_string())
        }
        Err(e) => {
            tracing::error!(error = %e, request_id = %req_id.0, "analysis pipeline failed");
            error_response(StatusCode::BAD_GATEWAY, e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn requested_urls_merges_single_and_list_fields() {
        let req: AnalyzeRequest = serde_json::from_value(serde_json::json!({
            "video_url": " https://youtu.be/one ",
            "urls": ["https://youtu.be/two", "", "  "]
        }))
        .expect("deserialize");
        assert_eq!(
            req.requested_urls(),
            vec![
                "https://youtu.be/one".to_string(),
                "https://youtu.be/two".to_string()
            ]
        );
    }

    #[test]
    fn product_name_alias_maps_to_competitor_name() {
        let req: AnalyzeRequest =
            serde_json::from_value(serde_json::json!({ "product_name": "Acme" }))
                .expect("deserialize");
        assert_eq!(req.competitor_name.as_deref(), Some("Acme"));
    }
}
