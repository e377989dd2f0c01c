//! `.env` values flow through the env layer. Kept in its own test binary:
//! dotenvy writes to the process environment, which the jail does not restore.

use figment::Jail;
use persona_config::PersonaConfig;
use pretty_assertions::assert_eq;

#[test]
fn dotenv_file_supplies_credentials_below_real_env() {
    Jail::expect_with(|jail| {
        jail.set_env("XDG_CONFIG_HOME", jail.directory().display().to_string());
        jail.set_env("PERSONA_LLM__MODEL", "from-env");
        jail.create_file(
            ".env",
            "PERSONA_LLM__API_KEY=sk-dotenv\nPERSONA_LLM__MODEL=from-dotenv\n",
        )?;

        let config = PersonaConfig::load_with_dotenv().expect("config loads");
        assert_eq!(config.llm.api_key, "sk-dotenv");
        assert_eq!(config.llm.model, "from-env");
        assert!(config.llm.is_configured());
        Ok(())
    });
}
