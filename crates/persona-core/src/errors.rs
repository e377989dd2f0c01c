//! Cross-cutting error types for reddit-persona.
//!
//! Fetch and completion errors live in `persona-reddit` and `persona-llm`.
//! The binary converges everything into `anyhow::Error`.

use std::path::PathBuf;

use thiserror::Error;

/// A profile URL could not be turned into a usable username.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolutionError {
    /// Nothing left after stripping slashes and the `user/` marker.
    #[error("profile URL '{url}' does not name a user")]
    Empty { url: String },

    /// The extracted name contains characters Reddit never allows in a username.
    #[error("'{name}' is not a valid Reddit username")]
    InvalidName { name: String },
}

/// Writing the persona report to disk failed.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to write report to {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
