//! # persona-config
//!
//! Layered configuration loading for reddit-persona using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`PERSONA_*` prefix, `__` as separator)
//! 2. Project-level `./reddit-persona.toml`
//! 3. User-level `~/.config/reddit-persona/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `PERSONA_LLM__API_KEY` -> `llm.api_key`,
//! `PERSONA_REDDIT__CLIENT_ID` -> `reddit.client_id`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use persona_config::PersonaConfig;
//!
//! let config = PersonaConfig::load_with_dotenv().expect("config");
//!
//! if !config.llm.is_configured() {
//!     eprintln!("set PERSONA_LLM__API_KEY");
//! }
//! ```

mod error;
mod general;
mod llm;
mod reddit;

pub use error::ConfigError;
pub use general::GeneralConfig;
pub use llm::{
    CONTENT_PLACEHOLDER, DEFAULT_PROMPT_TEMPLATE, DEFAULT_SYSTEM_PROMPT, LlmConfig,
    USERNAME_PLACEHOLDER,
};
pub use reddit::{MAX_PAGE_SIZE, RedditConfig};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Project-local config file, relative to the working directory.
pub const LOCAL_CONFIG_FILE: &str = "reddit-persona.toml";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PersonaConfig {
    #[serde(default)]
    pub reddit: RedditConfig,
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default)]
    pub general: GeneralConfig,
}

impl PersonaConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] for `.env` support.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Figment`] if a source fails to parse and
    /// [`ConfigError::InvalidValue`] if the merged result fails validation.
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment().extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration after reading `.env` from the current directory.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment directly or add providers on top.
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(LOCAL_CONFIG_FILE);
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment.merge(Env::prefixed("PERSONA_").split("__"))
    }

    /// Validate cross-field constraints after extraction.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] naming the offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.reddit.fetch_limit == 0 {
            return Err(ConfigError::InvalidValue {
                field: "reddit.fetch_limit".to_string(),
                reason: "must be greater than 0".to_string(),
            });
        }
        self.llm.validate()
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("reddit-persona").join("config.toml"))
    }
}
