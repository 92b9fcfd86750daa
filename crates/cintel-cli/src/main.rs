use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use cintel_claude::ClaudeClient;
use cintel_report::{render_pdf, render_text, ReportMeta};
use cintel_youtube::YoutubeClient;

#[derive(Debug, Parser)]
#[command(name = "cintel-cli")]
#[command(about = "Run one competitor comment analysis from the command line")]
struct Cli {
    /// Competitor or product name to analyze
    #[arg(long)]
    competitor: String,

    /// Video URL to pull comments from; repeat for multiple videos
    #[arg(long = "url", required = true)]
    urls: Vec<String>,

    /// Report format used with --output
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Write the rendered report to this path; without it the analysis is
    /// printed to stdout
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Pdf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let config = cintel_core::load_app_config_from_env()?;

    let (Some(youtube_key), Some(anthropic_key)) = (
        config.youtube_api_key.as_deref(),
        config.anthropic_api_key.as_deref(),
    ) else {
        anyhow::bail!("YOUTUBE_API_KEY and ANTHROPIC_API_KEY must both be set");
    };

    let youtube = YoutubeClient::new(youtube_key, config.youtube_timeout_secs)?;
    let claude = ClaudeClient::new(
        anthropic_key,
        &config.claude_model,
        config.claude_max_tokens,
        config.claude_timeout_secs,
    )?;

    let mut comments = Vec::new();
    let mut total_videos: u64 = 0;
    for url in &cli.urls {
        let Some(video_id) = cintel_youtube::extract_video_id(url) else {
            tracing::warn!(url = %url, "skipping URL with no recognizable video id");
            continue;
        };
        total_videos += 1;

        match youtube.list_comments(&video_id, config.comment_limit).await {
            Ok(batch) => {
                tracing::info!(video_id = %video_id, count = batch.len(), "fetched comments");
                comments.extend(batch);
            }
            Err(e) => {
                tracing::warn!(error = %e, video_id = %video_id, "comment fetch failed");
            }
        }
    }

    anyhow::ensure!(total_videos > 0, "no URL contained a recognizable video id");
    anyhow::ensure!(!comments.is_empty(), "no comments found for the provided URLs");

    let total_comments = comments.len() as u64;
    let analysis = claude
        .analyze_comments(&cli.competitor, &comments, config.analysis_mode)
        .await?;

    match cli.output {
        Some(path) => {
            let meta = ReportMeta {
                competitor_name: cli.competitor.clone(),
                generated_at: chrono::Utc::now(),
                total_comments,
                total_videos,
            };
            let report = match cli.format {
                Format::Text => render_text(&meta, &analysis)?,
                Format::Pdf => render_pdf(&meta, &analysis)?,
            };
            std::fs::write(&path, &report.bytes)?;
            println!("wrote {} ({} bytes)", path.display(), report.bytes.len());
        }
        None => match analysis.raw_text() {
            Some(text) => println!("{text}"),
            None => println!("{}", serde_json::to_string_pretty(&analysis)?),
        },
    }

    Ok(())
}
