use thiserror::Error;

/// Errors returned by the Anthropic Messages API client.
#[derive(Debug, Error)]
pub enum ClaudeError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API returned a non-2xx status; the raw upstream body is kept for
    /// diagnosis.
    #[error("Anthropic API error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// The configured base URL could not be parsed.
    #[error("invalid base URL '{0}'")]
    InvalidBaseUrl(String),

    /// The response parsed but contained no text content block.
    #[error("empty response: no text content block")]
    EmptyResponse,

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}
