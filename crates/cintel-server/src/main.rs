mod api;
mod middleware;
mod pipeline;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use cintel_claude::ClaudeClient;
use cintel_core::AppConfig;
use cintel_youtube::YoutubeClient;

use crate::{
    api::{build_app, AppState},
    pipeline::AnalysisPipeline,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = Arc::new(cintel_core::load_app_config()?);
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let pipeline = build_pipeline(&config)?;
    if pipeline.is_none() {
        tracing::warn!(
            "YOUTUBE_API_KEY and/or ANTHROPIC_API_KEY not set; \
             every route will answer with a configuration error"
        );
    }

    let app = build_app(AppState {
        config: Arc::clone(&config),
        pipeline,
    });

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, env = %config.env, "cintel-server listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

/// Construct both external API clients once at startup and wire them into
/// the pipeline. Missing credentials yield `None`; the service still starts
/// and degrades uniformly instead of partially failing.
fn build_pipeline(config: &AppConfig) -> anyhow::Result<Option<Arc<AnalysisPipeline>>> {
    let (Some(youtube_key), Some(anthropic_key)) = (
        config.youtube_api_key.as_deref(),
        config.anthropic_api_key.as_deref(),
    ) else {
        return Ok(None);
    };

    let youtube = YoutubeClient::new(youtube_key, config.youtube_timeout_secs)?;
    let claude = ClaudeClient::new(
        anthropic_key,
        &config.claude_model,
        config.claude_max_tokens,
        config.claude_timeout_secs,
    )?;

    Ok(Some(Arc::new(AnalysisPipeline::new(
        Arc::new(youtube),
        Arc::new(claude),
        config.analysis_mode,
        config.comment_limit,
    ))))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to listen for ctrl-c");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
