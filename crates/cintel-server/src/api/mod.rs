mod analyze;
mod export;

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, HeaderName, Method, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;

use cintel_core::AppConfig;

use crate::middleware::request_id;
use crate::pipeline::AnalysisPipeline;

/// Message returned by every route when either API credential is missing.
pub(super) const CONFIG_ERROR_MESSAGE: &str = "Environment variables not configured";

const INDEX_PAGE: &str = include_str!("../../templates/index.html");

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    /// `None` when credentials are missing; handlers then answer with a
    /// uniform configuration error instead of partially working.
    pub pipeline: Option<Arc<AnalysisPipeline>>,
}

/// Flat `{error}` payload; the shape the browser form expects on every
/// failure path.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

pub(super) fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
        .into_response()
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([
            header::CONTENT_TYPE,
            HeaderName::from_static("x-request-id"),
        ])
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/analyze", post(analyze::analyze))
        .route("/export-report", post(export::export_report))
        .route("/export-pdf", post(export::export_pdf))
        .layer(
            ServiceBuilder::new()
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id)),
        )
        .with_state(state)
}

async fn index(State(state): State<AppState>) -> Html<String> {
    if state.config.is_configured() {
        Html(INDEX_PAGE.to_string())
    } else {
        Html(config_error_page(&state.config))
    }
}

/// Minimal status page shown instead of the form when credentials are
/// missing, listing which one(s) need to be set.
fn config_error_page(config: &AppConfig) -> String {
    let flag = |present: bool| if present { "set" } else { "MISSING" };
    format!(
        "<!DOCTYPE html>\n<html>\n<head><title>Competitor Intelligence Analyzer</title></head>\n\
        <body>\n<h1>Competitor Intelligence Analyzer</h1>\n\
        <p><strong>Configuration Error</strong>: missing required environment variables.</p>\n\
        <ul>\n\
        <li>YOUTUBE_API_KEY: {}</li>\n\
        <li>ANTHROPIC_API_KEY: {}</li>\n\
        </ul>\n\
        <p>Set both variables and restart the service.</p>\n\
        </body>\n</html>\n",
        flag(config.youtube_api_key.is_some()),
        flag(config.anthropic_api_key.is_some()),
    )
}

#[derive(Debug, Serialize)]
struct HealthData {
    status: &'static str,
    youtube: &'static str,
    claude: &'static str,
}

async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let credential = |present: bool| if present { "configured" } else { "missing" };
    let data = HealthData {
        status: if state.config.is_configured() {
            "ok"
        } else {
            "degraded"
        },
        youtube: credential(state.config.youtube_api_key.is_some()),
        claude: credential(state.config.anthropic_api_key.is_some()),
    };

    let status = if state.config.is_configured() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (status, Json(data))
}
