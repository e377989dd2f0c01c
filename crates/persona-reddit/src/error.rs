//! Reddit client error types.

use thiserror::Error;

/// Errors that can occur when talking to the Reddit API.
#[derive(Debug, Error)]
pub enum RedditError {
    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Reddit returned a non-success status code.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error message or response body.
        message: String,
    },

    /// Credentials were rejected or no token could be obtained.
    #[error("authentication failed: {0}")]
    Auth(String),

    /// Failed to parse a Reddit response.
    #[error("parse error: {0}")]
    Parse(String),

    /// Reddit returned a 429 Too Many Requests response.
    #[error("rate limited, retry after {retry_after_secs}s")]
    RateLimited {
        /// Seconds to wait before retrying.
        retry_after_secs: u64,
    },
}
