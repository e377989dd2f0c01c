//! Flat-text persona report.
//!
//! Layout, top to bottom: the persona text, a `RAW DATA REFERENCES` header,
//! the numbered post listing, then the numbered comment listing. Each entry
//! ends with a 50-character rule line.

use std::fmt;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local, TimeZone};

use crate::errors::ReportError;
use crate::model::{PersonaReport, UserIdentifier};

const RULE_WIDTH: usize = 50;
const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const FILENAME_STAMP: &str = "%Y%m%d_%H%M%S";

/// Report file name for `identifier` at time `at`, second resolution.
///
/// Two calls within the same second for the same user produce the same name.
#[must_use]
pub fn report_filename<Tz: TimeZone>(identifier: &UserIdentifier, at: &DateTime<Tz>) -> String
where
    Tz::Offset: fmt::Display,
{
    format!(
        "reddit_persona_{identifier}_{}.txt",
        at.format(FILENAME_STAMP)
    )
}

/// Human-readable date for an epoch timestamp in `tz`.
#[must_use]
pub fn format_epoch<Tz: TimeZone>(epoch_secs: f64, tz: &Tz) -> String
where
    Tz::Offset: fmt::Display,
{
    #[allow(clippy::cast_possible_truncation)]
    let secs = epoch_secs.floor() as i64;
    DateTime::from_timestamp(secs, 0).map_or_else(
        || format!("invalid timestamp {epoch_secs}"),
        |utc| utc.with_timezone(tz).format(DATE_FORMAT).to_string(),
    )
}

/// Render the full report text, with dates shown in `tz`.
#[must_use]
pub fn render_report<Tz: TimeZone>(report: &PersonaReport, tz: &Tz) -> String
where
    Tz::Offset: fmt::Display,
{
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = render_into(&mut out, report, tz);
    out
}

fn render_into<Tz: TimeZone>(
    out: &mut impl fmt::Write,
    report: &PersonaReport,
    tz: &Tz,
) -> fmt::Result
where
    Tz::Offset: fmt::Display,
{
    let rule = "-".repeat(RULE_WIDTH);

    out.write_str(&report.persona)?;
    out.write_str("\n\n=== RAW DATA REFERENCES ===\n\n")?;

    out.write_str("=== POSTS ===\n")?;
    for (i, post) in report.bundle.posts.iter().enumerate() {
        writeln!(out, "{}. {}", i + 1, post.title)?;
        writeln!(out, "   Subreddit: r/{}", post.subreddit)?;
        writeln!(out, "   URL: {}", post.url)?;
        writeln!(out, "   Date: {}", format_epoch(post.created_utc, tz))?;
        writeln!(out, "{rule}")?;
    }

    out.write_str("\n=== COMMENTS ===\n")?;
    for (i, comment) in report.bundle.comments.iter().enumerate() {
        writeln!(out, "{}. Comment in r/{}", i + 1, comment.subreddit)?;
        writeln!(out, "   URL: {}", comment.url)?;
        writeln!(out, "   Date: {}", format_epoch(comment.created_utc, tz))?;
        writeln!(out, "{rule}")?;
    }

    Ok(())
}

/// Writes one report file per run into a fixed directory.
#[derive(Debug, Clone)]
pub struct ReportWriter {
    output_dir: PathBuf,
}

impl ReportWriter {
    #[must_use]
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    #[must_use]
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Write `report` stamped with the current local time.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Io`] if the directory cannot be created or the
    /// file cannot be written.
    pub fn write(&self, report: &PersonaReport) -> Result<PathBuf, ReportError> {
        self.write_at(report, &Local::now())
    }

    /// Write `report` as if the current time were `now`; dates use `now`'s zone.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Io`] if the directory cannot be created or the
    /// file cannot be written.
    pub fn write_at<Tz: TimeZone>(
        &self,
        report: &PersonaReport,
        now: &DateTime<Tz>,
    ) -> Result<PathBuf, ReportError>
    where
        Tz::Offset: fmt::Display,
    {
        std::fs::create_dir_all(&self.output_dir).map_err(|source| ReportError::Io {
            path: self.output_dir.clone(),
            source,
        })?;

        let path = self
            .output_dir
            .join(report_filename(&report.identifier, now));
        let body = render_report(report, &now.timezone());

        std::fs::write(&path, body).map_err(|source| ReportError::Io {
            path: path.clone(),
            source,
        })?;

        tracing::info!(path = %path.display(), "persona report written");
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::fixtures::{comment, post};
    use crate::model::ContentBundle;

    fn alice() -> UserIdentifier {
        UserIdentifier::new("alice").unwrap()
    }

    #[test]
    fn filename_embeds_user_and_second_stamp() {
        let at = Utc.with_ymd_and_hms(2024, 3, 9, 7, 5, 1).unwrap();
        assert_eq!(
            report_filename(&alice(), &at),
            "reddit_persona_alice_20240309_070501.txt"
        );
    }

    #[test]
    fn filenames_within_one_second_collide() {
        let a = Utc.timestamp_opt(1_700_000_000, 1_000).unwrap();
        let b = Utc.timestamp_opt(1_700_000_000, 900_000_000).unwrap();
        assert_eq!(report_filename(&alice(), &a), report_filename(&alice(), &b));
    }

    #[test]
    fn epoch_formats_in_given_zone() {
        assert_eq!(format_epoch(1_700_000_000.0, &Utc), "2023-11-14 22:13:20");
        assert_eq!(format_epoch(1_700_000_000.75, &Utc), "2023-11-14 22:13:20");
        let plus_two = chrono::FixedOffset::east_opt(2 * 3600).unwrap();
        assert_eq!(format_epoch(0.0, &plus_two), "1970-01-01 02:00:00");
    }

    #[test]
    fn render_exact_layout() {
        let report = PersonaReport::new(
            alice(),
            "Alice likes Rust.".to_string(),
            ContentBundle::new(
                vec![post("hello", "rust", 1_700_000_000.0)],
                vec![comment("nice", "golang", 1_700_000_060.0)],
            ),
        );

        let rule = "-".repeat(50);
        let expected = format!(
            "Alice likes Rust.\n\n=== RAW DATA REFERENCES ===\n\n\
             === POSTS ===\n\
             1. hello\n   Subreddit: r/rust\n   URL: https://reddit.com/r/rust/comments/hello\n   Date: 2023-11-14 22:13:20\n{rule}\n\
             \n=== COMMENTS ===\n\
             1. Comment in r/golang\n   URL: https://reddit.com/r/golang/comments/abc/x/nice\n   Date: 2023-11-14 22:14:20\n{rule}\n"
        );
        assert_eq!(render_report(&report, &Utc), expected);
    }

    #[test]
    fn render_with_no_comments_leaves_empty_section() {
        let report = PersonaReport::new(
            alice(),
            "persona".to_string(),
            ContentBundle::new(vec![post("a", "rust", 0.0), post("b", "rust", 0.0)], vec![]),
        );
        let text = render_report(&report, &Utc);
        assert!(text.ends_with("\n=== COMMENTS ===\n"));
        assert!(text.contains("1. a\n"));
        assert!(text.contains("2. b\n"));
    }
}
