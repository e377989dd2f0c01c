use anyhow::Context;
use clap::Parser;
use persona_core::ReportWriter;
use persona_llm::PersonaSummarizer;
use persona_reddit::RedditClient;

mod bootstrap;
mod cli;
mod pipeline;
mod progress;
mod ui;

use pipeline::{Orchestrator, RunOutcome};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    match run().await {
        Ok(outcome) => std::process::exit(outcome.exit_code()),
        Err(error) => {
            eprintln!("reddit-persona error: {error:#}");
            std::process::exit(1);
        }
    }
}

async fn run() -> anyhow::Result<RunOutcome> {
    let cli = cli::Cli::parse();
    init_tracing(cli.quiet, cli.verbose)?;
    ui::init(cli.quiet);

    let config = bootstrap::load_config(&cli)?;

    println!("Reddit User Persona Generator");
    println!("-----------------------------");

    let profile_url = match &cli.profile_url {
        Some(url) => url.clone(),
        None => cli::prompt_profile_url(&mut std::io::stdin().lock(), &mut std::io::stdout())?,
    };

    let source = RedditClient::new(&config.reddit).context("failed to build Reddit client")?;
    let summarizer =
        PersonaSummarizer::new(&config.llm).context("failed to build completion client")?;
    let writer = ReportWriter::new(&config.general.output_dir);
    tracing::debug!(
        authenticated = source.is_authenticated(),
        fetch_limit = config.reddit.fetch_limit,
        max_prompt_items = summarizer.max_prompt_items(),
        output_dir = %writer.output_dir().display(),
        "starting persona run"
    );

    let mut orchestrator = Orchestrator::new(
        source,
        summarizer,
        writer,
        config.reddit.fetch_limit as usize,
        std::io::stdout(),
    );
    orchestrator.run(&profile_url).await
}

fn init_tracing(quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("PERSONA_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}
