use anyhow::Context;
use persona_config::PersonaConfig;

use crate::cli::Cli;

/// Load layered config (`.env`, TOML files, env vars) and apply CLI overrides.
pub fn load_config(cli: &Cli) -> anyhow::Result<PersonaConfig> {
    let mut config = PersonaConfig::load_with_dotenv().context("failed to load configuration")?;
    apply_overrides(&mut config, cli);
    config
        .validate()
        .context("invalid configuration after applying command-line overrides")?;
    warn_unconfigured(&config);
    Ok(config)
}

fn apply_overrides(config: &mut PersonaConfig, cli: &Cli) {
    if let Some(limit) = cli.limit {
        config.reddit.fetch_limit = limit;
    }
    if let Some(max_items) = cli.max_prompt_items {
        config.llm.max_prompt_items = max_items;
    }
    if let Some(model) = &cli.model {
        config.llm.model.clone_from(model);
    }
    if let Some(dir) = &cli.output_dir {
        config.general.output_dir.clone_from(dir);
    }
}

/// Emit warnings for missing credentials and likely mistyped env var keys.
pub fn warn_unconfigured(config: &PersonaConfig) {
    for warning in collect_unconfigured_warnings(config, std::env::vars()) {
        tracing::warn!("{warning}");
    }
    if !config.reddit.is_configured() {
        tracing::info!("no Reddit credentials configured; using public listings");
    }
}

fn collect_unconfigured_warnings<I>(config: &PersonaConfig, env: I) -> Vec<String>
where
    I: IntoIterator<Item = (String, String)>,
{
    let env_keys = env.into_iter().map(|(key, _)| key).collect::<Vec<_>>();
    let mut warnings = Vec::new();

    if !config.llm.is_configured() {
        if has_single_underscore(&env_keys, "PERSONA_LLM") {
            warnings.push(
                "LLM API key appears unset while PERSONA_LLM_* env vars exist. Use double underscores (example: PERSONA_LLM__API_KEY)."
                    .to_string(),
            );
        } else {
            warnings.push(
                "No LLM API key configured (PERSONA_LLM__API_KEY); persona generation will fail."
                    .to_string(),
            );
        }
    }

    if !config.reddit.is_configured() && has_single_underscore(&env_keys, "PERSONA_REDDIT") {
        warnings.push(
            "Reddit credentials appear unset while PERSONA_REDDIT_* env vars exist. Use double underscores (example: PERSONA_REDDIT__CLIENT_ID)."
                .to_string(),
        );
    }

    warnings
}

/// `PERSONA_LLM_API_KEY` style keys: prefix followed by one underscore, not two.
fn has_single_underscore(keys: &[String], prefix: &str) -> bool {
    keys.iter().any(|key| {
        key.strip_prefix(prefix)
            .is_some_and(|rest| rest.starts_with('_') && !rest.starts_with("__"))
    })
}
