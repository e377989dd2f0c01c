//! # persona-llm
//!
//! Persona generation over an OpenAI-compatible chat-completion API.
//!
//! - [`prompt`]: one labeled block per post/comment, capped at
//!   `max_prompt_items`, joined and rendered into the configurable template
//! - [`CompletionClient`]: one system + one user message, fixed
//!   temperature and `max_tokens`, first choice returned
//! - [`PersonaSummarizer`]: the two above wired together

mod client;
mod error;
pub mod prompt;
mod summarizer;

pub use client::CompletionClient;
pub use error::LlmError;
pub use prompt::{BLOCK_SEPARATOR, PromptTemplate, build_prompt, content_blocks};
pub use summarizer::PersonaSummarizer;
