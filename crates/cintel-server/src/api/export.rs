use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use serde::Deserialize;

use cintel_core::Analysis;
use cintel_report::{render_pdf, render_text, RenderedReport, ReportMeta};

use super::{error_response, AppState, CONFIG_ERROR_MESSAGE};

/// Request body for the export routes: the client posts back the
/// `/analyze` response it cached. Everything except the analysis itself is
/// optional and defaults to zero/empty, matching what older form variants
/// send.
#[derive(Debug, Deserialize)]
pub struct ExportRequest {
    #[serde(default)]
    pub analysis: Option<Analysis>,
    #[serde(default)]
    pub total_comments: u64,
    #[serde(default)]
    pub total_videos: u64,
    #[serde(default, alias = "product_name")]
    pub competitor_name: Option<String>,
}

#[derive(Clone, Copy)]
enum ReportFormat {
    Text,
    Pdf,
}

pub async fn export_report(
    State(state): State<AppState>,
    Json(req): Json<ExportRequest>,
) -> Response {
    render_export(&state, req, ReportFormat::Text)
}

pub async fn export_pdf(State(state): State<AppState>, Json(req): Json<ExportRequest>) -> Response {
    render_export(&state, req, ReportFormat::Pdf)
}

fn render_export(state: &AppState, req: ExportRequest, format: ReportFormat) -> Response {
    if !state.config.is_configured() {
        return error_response(StatusCode::SERVICE_UNAVAILABLE, CONFIG_ERROR_MESSAGE);
    }

    let Some(analysis) = req.analysis else {
        return error_response(StatusCode::BAD_REQUEST, "No analysis data to export");
    };

    let meta = ReportMeta {
        competitor_name: req.competitor_name.unwrap_or_default(),
        generated_at: Utc::now(),
        total_comments: req.total_comments,
        total_videos: req.total_videos,
    };

    let rendered = match format {
        ReportFormat::Text => render_text(&meta, &analysis),
        ReportFormat::Pdf => render_pdf(&meta, &analysis),
    };

    match rendered {
        Ok(report) => download_response(report),
        Err(e) => {
            tracing::error!(error = %e, "report rendering failed");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to generate report")
        }
    }
}

/// Stream the artifact straight to the caller; nothing is stored.
fn download_response(report: RenderedReport) -> Response {
    let headers = [
        (header::CONTENT_TYPE, report.content_type.to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", report.filename),
        ),
    ];
    (StatusCode::OK, headers, report.bytes).into_response()
}
