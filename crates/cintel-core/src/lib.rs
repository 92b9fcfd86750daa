//! Shared domain types and configuration for cintel.
//!
//! Holds the data model passed between the YouTube fetcher, the Claude
//! insight extractor, and the report renderers, plus the env-var backed
//! application configuration loaded once at startup.

mod analysis;
mod app_config;
mod config;
mod types;

pub use analysis::{
    Analysis, InsightEntry, KeyThemes, ProductInsights, SentimentSummary, StructuredAnalysis,
    Theme,
};
pub use app_config::{AnalysisMode, AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use types::{Comment, VideoReference};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
