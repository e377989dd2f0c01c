use std::io::{BufRead, Write};

use anyhow::Context;
use clap::Parser;

/// Top-level CLI parser for the `reddit-persona` binary.
#[derive(Debug, Parser)]
#[command(
    name = "reddit-persona",
    version,
    about = "Generate a user persona from a Reddit profile's posts and comments"
)]
pub struct Cli {
    /// Reddit profile URL (prompted for when omitted)
    pub profile_url: Option<String>,

    /// Max posts, and separately max comments, to fetch
    #[arg(short, long)]
    pub limit: Option<u32>,

    /// Max content items included in the prompt
    #[arg(long)]
    pub max_prompt_items: Option<usize>,

    /// Completion model name
    #[arg(short, long)]
    pub model: Option<String>,

    /// Directory the report is written into
    #[arg(short, long)]
    pub output_dir: Option<String>,

    /// Quiet mode (errors only in logs, no spinners)
    #[arg(short, long)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long)]
    pub verbose: bool,
}

/// Ask for the profile URL on stdin. Returns the trimmed line.
pub fn prompt_profile_url<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> anyhow::Result<String> {
    write!(output, "Enter Reddit profile URL: ").context("failed to write prompt")?;
    output.flush().context("failed to flush prompt")?;

    let mut line = String::new();
    input
        .read_line(&mut line)
        .context("failed to read profile URL from stdin")?;
    Ok(line.trim().to_string())
}
