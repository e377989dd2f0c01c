//! Persona generation: prompt assembly plus one completion call.

use persona_config::LlmConfig;
use persona_core::{ContentBundle, UserIdentifier};

use crate::client::CompletionClient;
use crate::error::LlmError;
use crate::prompt::{PromptTemplate, build_prompt};

/// Turns a [`ContentBundle`] into free-text persona via the completion endpoint.
pub struct PersonaSummarizer {
    client: CompletionClient,
    system_prompt: String,
    template: PromptTemplate,
    max_prompt_items: usize,
}

impl PersonaSummarizer {
    /// Build from the `[llm]` configuration section.
    ///
    /// # Errors
    ///
    /// Returns [`LlmError::Http`] if the HTTP client fails to build.
    pub fn new(config: &LlmConfig) -> Result<Self, LlmError> {
        Ok(Self {
            client: CompletionClient::new(config)?,
            system_prompt: config.system_prompt.clone(),
            template: PromptTemplate::new(config.prompt_template.clone()),
            max_prompt_items: config.max_prompt_items,
        })
    }

    #[must_use]
    pub const fn max_prompt_items(&self) -> usize {
        self.max_prompt_items
    }

    /// The exact user-role prompt that [`Self::summarize`] would send.
    #[must_use]
    pub fn prompt(&self, user: &UserIdentifier, bundle: &ContentBundle) -> String {
        build_prompt(&self.template, user, bundle, self.max_prompt_items)
    }

    /// Generate a persona for `user` from `bundle`.
    ///
    /// No retry, no fallback model: any failure means no persona.
    ///
    /// # Errors
    ///
    /// Returns the [`LlmError`] from the completion call.
    pub async fn summarize(
        &self,
        user: &UserIdentifier,
        bundle: &ContentBundle,
    ) -> Result<String, LlmError> {
        let prompt = self.prompt(user, bundle);
        tracing::debug!(
            user = %user,
            blocks = bundle.len().min(self.max_prompt_items),
            model = self.client.model(),
            "summarizing content"
        );
        self.client.complete(&self.system_prompt, &prompt).await
    }
}
