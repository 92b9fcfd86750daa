//! Anthropic Messages API client and insight extraction for cintel.
//!
//! Builds the fixed analysis prompt from fetched comments, sends exactly one
//! generation request per analysis, and interprets the response either as
//! free text or as an embedded JSON object with a raw-text fallback.

mod client;
mod error;
pub mod extract;
pub mod prompt;

pub use client::ClaudeClient;
pub use error::ClaudeError;
pub use extract::interpret_response;
pub use prompt::{build_prompt, MAX_PROMPT_COMMENTS};
