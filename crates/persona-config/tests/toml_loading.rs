//! Integration tests for TOML configuration loading.
//!
//! Uses figment::Jail for sandboxed files, working directory and env vars.

use figment::Jail;
use persona_config::{ConfigError, PersonaConfig};
use pretty_assertions::assert_eq;

/// Point the user-global config lookup into the jail.
fn isolate(jail: &mut Jail) {
    let dir = jail.directory().display().to_string();
    jail.set_env("XDG_CONFIG_HOME", &dir);
    jail.set_env("HOME", &dir);
}

#[test]
fn loads_project_local_file() {
    Jail::expect_with(|jail| {
        isolate(jail);
        jail.create_file(
            "reddit-persona.toml",
            r#"
[reddit]
client_id = "toml-id"
client_secret = "toml-secret"
user_agent = "persona-test/1.0"
fetch_limit = 250

[llm]
api_key = "sk-toml"
model = "gpt-4o-mini"
temperature = 0.2
max_tokens = 800
max_prompt_items = 5

[general]
output_dir = "reports"
"#,
        )?;

        let config = PersonaConfig::load().expect("config loads");
        assert!(config.reddit.is_configured());
        assert_eq!(config.reddit.user_agent, "persona-test/1.0");
        assert_eq!(config.reddit.fetch_limit, 250);
        assert_eq!(config.llm.api_key, "sk-toml");
        assert_eq!(config.llm.model, "gpt-4o-mini");
        assert_eq!(config.llm.max_tokens, 800);
        assert_eq!(config.llm.max_prompt_items, 5);
        assert_eq!(config.general.output_dir, "reports");
        // untouched fields keep their defaults
        assert_eq!(config.llm.base_url, "https://api.openai.com/v1");
        assert_eq!(config.reddit.timeout_secs, 30);
        Ok(())
    });
}

#[test]
fn loads_user_global_file() {
    Jail::expect_with(|jail| {
        isolate(jail);
        jail.create_dir("reddit-persona")?;
        jail.create_file(
            "reddit-persona/config.toml",
            r#"
[llm]
model = "from-global"
"#,
        )?;

        let config = PersonaConfig::load().expect("config loads");
        assert_eq!(config.llm.model, "from-global");
        Ok(())
    });
}

#[test]
fn project_file_beats_global_file() {
    Jail::expect_with(|jail| {
        isolate(jail);
        jail.create_dir("reddit-persona")?;
        jail.create_file("reddit-persona/config.toml", "[llm]\nmodel = \"global\"\n")?;
        jail.create_file("reddit-persona.toml", "[llm]\nmodel = \"local\"\n")?;

        let config = PersonaConfig::load().expect("config loads");
        assert_eq!(config.llm.model, "local");
        Ok(())
    });
}

#[test]
fn custom_prompt_template_is_loaded_verbatim() {
    Jail::expect_with(|jail| {
        isolate(jail);
        jail.create_file(
            "reddit-persona.toml",
            r#"
[llm]
prompt_template = """
Summarize {username} for a marketing audience.
{content}
"""
"#,
        )?;

        let config = PersonaConfig::load().expect("config loads");
        assert_eq!(
            config.llm.prompt_template,
            "Summarize {username} for a marketing audience.\n{content}\n"
        );
        Ok(())
    });
}

#[test]
fn invalid_values_fail_validation() {
    Jail::expect_with(|jail| {
        isolate(jail);
        jail.create_file("reddit-persona.toml", "[llm]\nprompt_template = \"no placeholder\"\n")?;

        let err = PersonaConfig::load().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
        Ok(())
    });
}

#[test]
fn malformed_toml_is_a_figment_error() {
    Jail::expect_with(|jail| {
        isolate(jail);
        jail.create_file("reddit-persona.toml", "[llm\nmodel = ")?;

        let err = PersonaConfig::load().unwrap_err();
        assert!(matches!(err, ConfigError::Figment(_)));
        Ok(())
    });
}
