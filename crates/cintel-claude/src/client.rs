//! HTTP client for the Anthropic Messages API.

use std::time::Duration;

use reqwest::{Client, Url};
use serde::Deserialize;
use serde_json::json;

use cintel_core::{Analysis, AnalysisMode, Comment};

use crate::error::ClaudeError;
use crate::extract::interpret_response;
use crate::prompt::build_prompt;

const DEFAULT_BASE_URL: &str = "https://api.anthropic.com/";
const ANTHROPIC_VERSION: &str = "2023-06-01";

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: String,
}

/// Client for the Anthropic Messages API.
///
/// Holds the model id and output-token budget alongside the HTTP client so
/// every analysis request is issued with the same, fixed generation
/// parameters. Use [`ClaudeClient::with_base_url`] to point at a mock server
/// in tests.
pub struct ClaudeClient {
    client: Client,
    api_key: String,
    base_url: Url,
    model: String,
    max_tokens: u32,
}

impl ClaudeClient {
    /// Creates a new client pointed at the production Anthropic API.
    ///
    /// # Errors
    ///
    /// Returns [`ClaudeError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        api_key: &str,
        model: &str,
        max_tokens: u32,
        timeout_secs: u64,
    ) -> Result<Self, ClaudeError> {
        Self::with_base_url(api_key, model, max_tokens, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`ClaudeError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`ClaudeError::InvalidBaseUrl`] if
    /// `base_url` does not parse.
    pub fn with_base_url(
        api_key: &str,
        model: &str,
        max_tokens: u32,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, ClaudeError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("cintel/0.1 (competitive-intelligence)")
            .build()?;

        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised)
            .map_err(|_| ClaudeError::InvalidBaseUrl(base_url.to_string()))?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url,
            model: model.to_owned(),
            max_tokens,
        })
    }

    /// Runs one full analysis: builds the prompt, sends a single generation
    /// request, and interprets the response per the deployment's mode.
    ///
    /// Parse failures are not errors — they degrade inside the returned
    /// [`Analysis`]. Only transport and API failures surface as `Err`.
    ///
    /// # Errors
    ///
    /// - [`ClaudeError::Api`] if the API returns a non-2xx status.
    /// - [`ClaudeError::Http`] on network failure or timeout.
    /// - [`ClaudeError::Deserialize`] / [`ClaudeError::EmptyResponse`] if
    ///   the response envelope is malformed.
    pub async fn analyze_comments(
        &self,
        competitor_name: &str,
        comments: &[Comment],
        mode: AnalysisMode,
    ) -> Result<Analysis, ClaudeError> {
        let prompt = build_prompt(competitor_name, comments, mode);
        let text = self.create_message(&prompt).await?;
        Ok(interpret_response(&text, mode))
    }

    /// Sends exactly one `POST /v1/messages` request and returns the text of
    /// the first text content block. Never retried.
    ///
    /// # Errors
    ///
    /// See [`ClaudeClient::analyze_comments`].
    pub async fn create_message(&self, prompt: &str) -> Result<String, ClaudeError> {
        let url = self.messages_url();

        let response = self
            .client
            .post(url.clone())
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&json!({
                "model": self.model,
                "max_tokens": self.max_tokens,
                "messages": [{ "role": "user", "content": prompt }],
            }))
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(ClaudeError::Api {
                status: status.as_u16(),
                message: body.trim().to_string(),
            });
        }

        let parsed: MessagesResponse =
            serde_json::from_str(&body).map_err(|e| ClaudeError::Deserialize {
                context: url.path().to_string(),
                source: e,
            })?;

        parsed
            .content
            .into_iter()
            .find(|block| block.kind == "text")
            .map(|block| block.text)
            .ok_or(ClaudeError::EmptyResponse)
    }

    fn messages_url(&self) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push("v1").push("messages");
        }
        url
    }
}
