//! # persona-core
//!
//! Content model, profile resolution, and report writing for reddit-persona.
//!
//! This crate provides the types shared across all reddit-persona crates:
//! - [`UserIdentifier`] and the profile URL resolver
//! - Post/comment records and the [`ContentBundle`] handed from fetch to summary
//! - [`PersonaReport`] and the flat-text [`ReportWriter`]
//! - Cross-cutting error types and the shared `Retry-After` parser

pub mod errors;
pub mod model;
pub mod ratelimit;
pub mod report;
pub mod resolver;

pub use errors::{ReportError, ResolutionError};
pub use model::{Comment, ContentBundle, ContentItem, ContentKind, PersonaReport, Post, UserIdentifier};
pub use ratelimit::{DEFAULT_RETRY_AFTER_SECS, retry_after_secs};
pub use report::{ReportWriter, render_report, report_filename};
pub use resolver::resolve_profile;
