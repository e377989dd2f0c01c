//! Persona pipeline: resolve → fetch → summarize → write.
//!
//! ```text
//! ResolvingProfile ─┬─> Unresolvable
//!                   └─> FetchingContent ─┬─> NoContent
//!                                        └─> Summarizing ─┬─> SummarizationFailed
//!                                                         └─> WritingReport ─> Done
//! ```
//!
//! Every step is awaited before the next begins; no stage is re-entered.
//! Fetch errors are downgraded to empty results, summarizer errors end the
//! run without a report, and report I/O errors are fatal.

use std::fmt;
use std::future::Future;
use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use persona_core::{
    Comment, ContentBundle, ContentKind, PersonaReport, Post, ReportWriter, UserIdentifier,
    resolve_profile,
};
use persona_llm::{LlmError, PersonaSummarizer};
use persona_reddit::{FetchOutcome, RedditClient};

use crate::progress::Progress;

// ── Seams ──────────────────────────────────────────────────────────

/// Where a user's posts and comments come from.
pub trait ContentSource {
    fn fetch_posts(
        &self,
        user: &UserIdentifier,
        limit: usize,
    ) -> impl Future<Output = FetchOutcome<Post>>;

    fn fetch_comments(
        &self,
        user: &UserIdentifier,
        limit: usize,
    ) -> impl Future<Output = FetchOutcome<Comment>>;
}

/// Turns fetched content into persona text.
pub trait Summarizer {
    fn summarize(
        &self,
        user: &UserIdentifier,
        bundle: &ContentBundle,
    ) -> impl Future<Output = Result<String, LlmError>>;
}

impl ContentSource for RedditClient {
    fn fetch_posts(
        &self,
        user: &UserIdentifier,
        limit: usize,
    ) -> impl Future<Output = FetchOutcome<Post>> {
        Self::fetch_posts(self, user, limit)
    }

    fn fetch_comments(
        &self,
        user: &UserIdentifier,
        limit: usize,
    ) -> impl Future<Output = FetchOutcome<Comment>> {
        Self::fetch_comments(self, user, limit)
    }
}

impl Summarizer for PersonaSummarizer {
    fn summarize(
        &self,
        user: &UserIdentifier,
        bundle: &ContentBundle,
    ) -> impl Future<Output = Result<String, LlmError>> {
        Self::summarize(self, user, bundle)
    }
}

// ── States ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    ResolvingProfile,
    FetchingContent,
    Summarizing,
    WritingReport,
    Done,
    Unresolvable,
    NoContent,
    SummarizationFailed,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::ResolvingProfile => "resolving_profile",
            Self::FetchingContent => "fetching_content",
            Self::Summarizing => "summarizing",
            Self::WritingReport => "writing_report",
            Self::Done => "done",
            Self::Unresolvable => "unresolvable",
            Self::NoContent => "no_content",
            Self::SummarizationFailed => "summarization_failed",
        };
        f.write_str(name)
    }
}

/// How a run ended, short of a fatal error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    Saved(PathBuf),
    Unresolvable,
    NoContent,
    SummarizationFailed,
}

impl RunOutcome {
    /// Process exit code for this terminal state. Fatal errors exit with 1.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Saved(_) => 0,
            Self::Unresolvable => 2,
            Self::NoContent => 3,
            Self::SummarizationFailed => 4,
        }
    }
}

// ── Orchestrator ───────────────────────────────────────────────────

pub struct Orchestrator<S, M, W> {
    source: S,
    summarizer: M,
    writer: ReportWriter,
    fetch_limit: usize,
    out: W,
    stage: Stage,
}

impl<S, M, W> Orchestrator<S, M, W>
where
    S: ContentSource,
    M: Summarizer,
    W: Write,
{
    pub const fn new(
        source: S,
        summarizer: M,
        writer: ReportWriter,
        fetch_limit: usize,
        out: W,
    ) -> Self {
        Self {
            source,
            summarizer,
            writer,
            fetch_limit,
            out,
            stage: Stage::ResolvingProfile,
        }
    }

    #[must_use]
    pub const fn stage(&self) -> Stage {
        self.stage
    }

    fn enter(&mut self, stage: Stage) {
        tracing::debug!(from = %self.stage, to = %stage, "pipeline stage");
        self.stage = stage;
    }

    /// Run the whole pipeline for one profile URL.
    ///
    /// # Errors
    ///
    /// Returns an error only for fatal failures: the report could not be
    /// written, or user-facing output could not be printed.
    pub async fn run(&mut self, profile_url: &str) -> anyhow::Result<RunOutcome> {
        self.enter(Stage::ResolvingProfile);
        let user = match resolve_profile(profile_url) {
            Ok(user) => user,
            Err(error) => {
                tracing::warn!(%error, "could not resolve profile url");
                writeln!(
                    self.out,
                    "Could not access Reddit profile. Please check the URL and try again."
                )?;
                self.enter(Stage::Unresolvable);
                return Ok(RunOutcome::Unresolvable);
            }
        };

        self.enter(Stage::FetchingContent);
        writeln!(self.out, "\nScraping content for {}...", user.handle())?;
        let bundle = self.fetch(&user).await;

        if bundle.is_empty() {
            writeln!(self.out, "No posts or comments found for this user.")?;
            self.enter(Stage::NoContent);
            return Ok(RunOutcome::NoContent);
        }
        writeln!(
            self.out,
            "Found {} posts and {} comments.",
            bundle.posts.len(),
            bundle.comments.len()
        )?;

        self.enter(Stage::Summarizing);
        writeln!(self.out, "\nAnalyzing content and generating persona...")?;
        let spinner = Progress::spinner("Generating persona...");
        let persona = match self.summarizer.summarize(&user, &bundle).await {
            Ok(persona) => {
                spinner.finish_clear();
                persona
            }
            Err(error) => {
                spinner.finish_err("persona generation failed");
                tracing::error!(%error, "error with LLM analysis");
                writeln!(self.out, "Failed to generate persona.")?;
                self.enter(Stage::SummarizationFailed);
                return Ok(RunOutcome::SummarizationFailed);
            }
        };

        writeln!(self.out, "\n=== USER PERSONA ===\n")?;
        writeln!(self.out, "{persona}")?;

        self.enter(Stage::WritingReport);
        let report = PersonaReport::new(user, persona, bundle);
        let path = self
            .writer
            .write(&report)
            .context("failed to save persona report")?;
        writeln!(self.out, "Persona saved to {}", path.display())?;

        self.enter(Stage::Done);
        Ok(RunOutcome::Saved(path))
    }

    /// Posts, then comments. A failure on one does not skip the other.
    async fn fetch(&self, user: &UserIdentifier) -> ContentBundle {
        let spinner = Progress::spinner("Fetching posts...");
        let posts = self.source.fetch_posts(user, self.fetch_limit).await;
        spinner.set_message("Fetching comments...");
        let comments = self.source.fetch_comments(user, self.fetch_limit).await;
        spinner.finish_clear();

        ContentBundle::new(
            keep_fetched(ContentKind::Post, posts),
            keep_fetched(ContentKind::Comment, comments),
        )
    }
}

/// Keep whatever arrived; log the error that cut the fetch short, if any.
fn keep_fetched<T>(kind: ContentKind, outcome: FetchOutcome<T>) -> Vec<T> {
    let (items, error) = outcome.into_parts();
    if let Some(error) = error {
        tracing::warn!(
            kind = %kind,
            kept = items.len(),
            %error,
            "error fetching content; continuing with what was fetched"
        );
    }
    items
}
