//! Domain types: who is being profiled and what they wrote.
//!
//! Posts and comments carry different flags, so they are separate structs;
//! [`ContentItem`] is the tagged view used wherever both kinds are walked
//! together (prompt assembly, report listing).

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::ResolutionError;

// ---------------------------------------------------------------------------
// UserIdentifier
// ---------------------------------------------------------------------------

/// A validated Reddit username.
///
/// Only `[A-Za-z0-9_-]` is accepted, which also rules out path separators.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserIdentifier(String);

impl UserIdentifier {
    /// Validate `name` as a Reddit username.
    ///
    /// # Errors
    ///
    /// Returns [`ResolutionError::Empty`] for an empty name and
    /// [`ResolutionError::InvalidName`] when any character falls outside
    /// the username alphabet.
    pub fn new(name: impl Into<String>) -> Result<Self, ResolutionError> {
        let name = name.into();
        if name.is_empty() {
            return Err(ResolutionError::Empty { url: name });
        }
        if !name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            return Err(ResolutionError::InvalidName { name });
        }
        Ok(Self(name))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Display handle, e.g. `u/alice`.
    #[must_use]
    pub fn handle(&self) -> String {
        format!("u/{}", self.0)
    }
}

impl fmt::Display for UserIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for UserIdentifier {
    type Error = ResolutionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<UserIdentifier> for String {
    fn from(value: UserIdentifier) -> Self {
        value.0
    }
}

// ---------------------------------------------------------------------------
// Content
// ---------------------------------------------------------------------------

/// Which listing an item came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentKind {
    Post,
    Comment,
}

impl ContentKind {
    /// Label used in prompt blocks.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Post => "POST",
            Self::Comment => "COMMENT",
        }
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A submission authored by the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub title: String,
    /// Self-text body; empty for link posts.
    pub text: String,
    /// Subreddit display name without the `r/` prefix.
    pub subreddit: String,
    pub score: i64,
    /// Link target for link posts, the post itself for self posts.
    pub url: String,
    pub permalink: String,
    pub created_utc: f64,
    pub is_original_content: bool,
}

/// A comment authored by the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub text: String,
    pub subreddit: String,
    pub score: i64,
    /// Absolute permalink (`https://reddit.com/r/.../comment/...`).
    pub url: String,
    pub created_utc: f64,
    /// Whether the user also authored the submission being commented on.
    pub is_submitter: bool,
}

/// Borrowed, tagged view over one post or comment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ContentItem<'a> {
    Post(&'a Post),
    Comment(&'a Comment),
}

impl<'a> ContentItem<'a> {
    #[must_use]
    pub const fn kind(&self) -> ContentKind {
        match self {
            Self::Post(_) => ContentKind::Post,
            Self::Comment(_) => ContentKind::Comment,
        }
    }

    /// Subreddit of the underlying item; borrows the bundle, not the view.
    #[must_use]
    pub fn subreddit(&self) -> &'a str {
        match *self {
            Self::Post(post) => &post.subreddit,
            Self::Comment(comment) => &comment.subreddit,
        }
    }
}

/// Everything fetched for one user, newest first within each kind.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContentBundle {
    pub posts: Vec<Post>,
    pub comments: Vec<Comment>,
}

impl ContentBundle {
    #[must_use]
    pub const fn new(posts: Vec<Post>, comments: Vec<Comment>) -> Self {
        Self { posts, comments }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.posts.is_empty() && self.comments.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.posts.len() + self.comments.len()
    }

    /// All items in fetch order: every post, then every comment.
    pub fn items(&self) -> impl Iterator<Item = ContentItem<'_>> {
        self.posts
            .iter()
            .map(ContentItem::Post)
            .chain(self.comments.iter().map(ContentItem::Comment))
    }
}

// ---------------------------------------------------------------------------
// PersonaReport
// ---------------------------------------------------------------------------

/// Generated persona plus the content it was generated from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonaReport {
    pub identifier: UserIdentifier,
    pub persona: String,
    pub bundle: ContentBundle,
}

impl PersonaReport {
    #[must_use]
    pub const fn new(identifier: UserIdentifier, persona: String, bundle: ContentBundle) -> Self {
        Self {
            identifier,
            persona,
            bundle,
        }
    }
}
