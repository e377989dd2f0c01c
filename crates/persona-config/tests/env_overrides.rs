use figment::Jail;
use persona_config::PersonaConfig;
use pretty_assertions::assert_eq;

#[test]
fn env_vars_fill_credentials() {
    Jail::expect_with(|jail| {
        jail.set_env("XDG_CONFIG_HOME", jail.directory().display().to_string());
        jail.set_env("PERSONA_REDDIT__CLIENT_ID", "env-id");
        jail.set_env("PERSONA_REDDIT__CLIENT_SECRET", "env-secret");
        jail.set_env("PERSONA_LLM__API_KEY", "sk-env");

        let config = PersonaConfig::load().expect("config loads");
        assert!(config.reddit.is_configured());
        assert_eq!(config.reddit.client_id, "env-id");
        assert_eq!(config.llm.api_key, "sk-env");
        Ok(())
    });
}

#[test]
fn env_beats_project_file() {
    Jail::expect_with(|jail| {
        jail.set_env("XDG_CONFIG_HOME", jail.directory().display().to_string());
        jail.create_file(
            "reddit-persona.toml",
            "[llm]\nmodel = \"from-file\"\nmax_tokens = 100\n",
        )?;
        jail.set_env("PERSONA_LLM__MODEL", "from-env");

        let config = PersonaConfig::load().expect("config loads");
        assert_eq!(config.llm.model, "from-env");
        assert_eq!(config.llm.max_tokens, 100);
        Ok(())
    });
}

#[test]
fn numeric_env_values_are_parsed() {
    Jail::expect_with(|jail| {
        jail.set_env("XDG_CONFIG_HOME", jail.directory().display().to_string());
        jail.set_env("PERSONA_REDDIT__FETCH_LIMIT", "25");
        jail.set_env("PERSONA_LLM__MAX_PROMPT_ITEMS", "7");
        jail.set_env("PERSONA_LLM__TEMPERATURE", "1.1");

        let config = PersonaConfig::load().expect("config loads");
        assert_eq!(config.reddit.fetch_limit, 25);
        assert_eq!(config.llm.max_prompt_items, 7);
        assert!((config.llm.temperature - 1.1).abs() < 1e-6);
        Ok(())
    });
}
