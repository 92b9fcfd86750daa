use std::net::SocketAddr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// How the generation API response is interpreted.
///
/// Chosen once per deployment; the two modes use different prompt templates
/// and produce different [`crate::Analysis`] variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisMode {
    /// The raw response text is the analysis verbatim.
    FreeText,
    /// A JSON object is extracted from the response and parsed into
    /// [`crate::StructuredAnalysis`], falling back to raw text.
    Structured,
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    /// Comments-API credential. `None` degrades all routes to a
    /// configuration-error response rather than failing startup.
    pub youtube_api_key: Option<String>,
    /// Generation-API credential, same degradation rule.
    pub anthropic_api_key: Option<String>,
    pub analysis_mode: AnalysisMode,
    pub claude_model: String,
    pub claude_max_tokens: u32,
    pub comment_limit: u32,
    pub youtube_timeout_secs: u64,
    pub claude_timeout_secs: u64,
}

impl AppConfig {
    /// Both external credentials are present.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.youtube_api_key.is_some() && self.anthropic_api_key.is_some()
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field(
                "youtube_api_key",
                &self.youtube_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field(
                "anthropic_api_key",
                &self.anthropic_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("analysis_mode", &self.analysis_mode)
            .field("claude_model", &self.claude_model)
            .field("claude_max_tokens", &self.claude_max_tokens)
            .field("comment_limit", &self.comment_limit)
            .field("youtube_timeout_secs", &self.youtube_timeout_secs)
            .field("claude_timeout_secs", &self.claude_timeout_secs)
            .finish()
    }
}
