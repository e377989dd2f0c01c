//! Completion error types.

use thiserror::Error;

/// Errors from the chat-completion endpoint. Any of these means "no persona".
#[derive(Debug, Error)]
pub enum LlmError {
    /// No API key configured.
    #[error("no API key configured (set PERSONA_LLM__API_KEY)")]
    MissingApiKey,

    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Endpoint returned a non-success status code.
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Endpoint returned a 429 Too Many Requests response.
    #[error("rate limited, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    /// Response body was not a chat completion.
    #[error("parse error: {0}")]
    Parse(String),

    /// The completion had no text.
    #[error("model returned an empty completion")]
    EmptyCompletion,
}
