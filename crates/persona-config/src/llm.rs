//! Chat-completion (LLM) configuration.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Placeholder replaced by the concatenated content blocks.
pub const CONTENT_PLACEHOLDER: &str = "{content}";

/// Placeholder replaced by the profiled username.
pub const USERNAME_PLACEHOLDER: &str = "{username}";

pub const DEFAULT_SYSTEM_PROMPT: &str =
    "You are a skilled analyst that creates detailed user personas from social media content.";

pub const DEFAULT_PROMPT_TEMPLATE: &str = "\
Build a detailed user persona for the Reddit user u/{username} from the posts and comments below.

Structure the persona with these sections:
- Overview: a short paragraph summarizing who this person appears to be
- Demographics: age range, occupation, location (only when the content supports it; otherwise say \"unknown\")
- Interests and hobbies
- Personality traits
- Tone and communication style
- Values and motivations
- Frustrations and pain points
- Goals and needs

For every characteristic, cite the post or comment that supports it (quote a short fragment and name the subreddit).
Do not invent details that the content does not support.

Content:

{content}";

const fn default_temperature() -> f32 {
    0.7
}

const fn default_max_tokens() -> u32 {
    2000
}

const fn default_timeout_secs() -> u64 {
    120
}

const fn default_max_prompt_items() -> usize {
    20
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_model() -> String {
    "gpt-4".to_string()
}

fn default_system_prompt() -> String {
    DEFAULT_SYSTEM_PROMPT.to_string()
}

fn default_prompt_template() -> String {
    DEFAULT_PROMPT_TEMPLATE.to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LlmConfig {
    /// Bearer token for the completion endpoint.
    #[serde(default)]
    pub api_key: String,

    /// OpenAI-compatible API root; `/chat/completions` is appended.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Output-length cap sent as `max_tokens`.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// System-role instruction.
    #[serde(default = "default_system_prompt")]
    pub system_prompt: String,

    /// User-role template; must contain `{content}`, may contain `{username}`.
    #[serde(default = "default_prompt_template")]
    pub prompt_template: String,

    /// Number of content blocks included in the prompt, posts first.
    #[serde(default = "default_max_prompt_items")]
    pub max_prompt_items: usize,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_base_url(),
            model: default_model(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            timeout_secs: default_timeout_secs(),
            system_prompt: default_system_prompt(),
            prompt_template: default_prompt_template(),
            max_prompt_items: default_max_prompt_items(),
        }
    }
}

impl LlmConfig {
    /// Check if an API key is present.
    pub fn is_configured(&self) -> bool {
        !self.api_key.is_empty()
    }

    /// Reject values the completion endpoint or prompt builder cannot use.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(invalid("llm.temperature", "must be between 0.0 and 2.0"));
        }
        if self.max_tokens == 0 {
            return Err(invalid("llm.max_tokens", "must be greater than 0"));
        }
        if self.max_prompt_items == 0 {
            return Err(invalid("llm.max_prompt_items", "must be greater than 0"));
        }
        if self.model.trim().is_empty() {
            return Err(invalid("llm.model", "must not be empty"));
        }
        if !self.prompt_template.contains(CONTENT_PLACEHOLDER) {
            return Err(invalid(
                "llm.prompt_template",
                "must contain the {content} placeholder",
            ));
        }
        Ok(())
    }
}

fn invalid(field: &str, reason: &str) -> ConfigError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        reason: reason.to_string(),
    }
}
