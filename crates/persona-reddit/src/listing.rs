//! User listings: wire format, mapping, and `after`-cursor pagination.

use std::future::Future;

use persona_core::{Comment, Post};
use serde::Deserialize;

use crate::error::RedditError;
use crate::FetchOutcome;

/// Absolute origin used for comment permalinks.
const PERMALINK_ORIGIN: &str = "https://reddit.com";

// ── Wire format ────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub(crate) struct Listing<T> {
    pub data: ListingData<T>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ListingData<T> {
    pub children: Vec<Child<T>>,
    #[serde(default)]
    pub after: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Child<T> {
    pub kind: String,
    pub data: T,
}

/// A `t3` (submission) as returned by `/user/<name>/submitted`.
#[derive(Debug, Deserialize)]
pub(crate) struct LinkData {
    title: String,
    #[serde(default)]
    selftext: String,
    subreddit: String,
    #[serde(default)]
    score: i64,
    #[serde(default)]
    url: String,
    permalink: String,
    created_utc: f64,
    #[serde(default)]
    is_original_content: bool,
}

/// A `t1` (comment) as returned by `/user/<name>/comments`.
#[derive(Debug, Deserialize)]
pub(crate) struct CommentData {
    body: String,
    subreddit: String,
    #[serde(default)]
    score: i64,
    permalink: String,
    created_utc: f64,
    #[serde(default)]
    is_submitter: bool,
}

/// One listing endpoint and the item type it yields.
pub(crate) trait ListingKind {
    type Wire: serde::de::DeserializeOwned;
    type Item;

    /// Path segment under `/user/<name>/`.
    const ENDPOINT: &'static str;
    /// Reddit "thing" prefix of the expected children.
    const THING: &'static str;

    fn map(wire: Self::Wire) -> Self::Item;
}

pub(crate) struct Submitted;
pub(crate) struct Comments;

impl ListingKind for Submitted {
    type Wire = LinkData;
    type Item = Post;

    const ENDPOINT: &'static str = "submitted";
    const THING: &'static str = "t3";

    fn map(wire: LinkData) -> Post {
        let permalink_url = format!("{PERMALINK_ORIGIN}{}", wire.permalink);
        Post {
            title: wire.title,
            text: wire.selftext,
            subreddit: wire.subreddit,
            score: wire.score,
            url: if wire.url.is_empty() {
                permalink_url
            } else {
                wire.url
            },
            permalink: wire.permalink,
            created_utc: wire.created_utc,
            is_original_content: wire.is_original_content,
        }
    }
}

impl ListingKind for Comments {
    type Wire = CommentData;
    type Item = Comment;

    const ENDPOINT: &'static str = "comments";
    const THING: &'static str = "t1";

    fn map(wire: CommentData) -> Comment {
        Comment {
            text: wire.body,
            subreddit: wire.subreddit,
            score: wire.score,
            url: format!("{PERMALINK_ORIGIN}{}", wire.permalink),
            created_utc: wire.created_utc,
            is_submitter: wire.is_submitter,
        }
    }
}

/// One fetched page, already mapped to domain items.
#[derive(Debug)]
pub(crate) struct Page<T> {
    pub items: Vec<T>,
    pub after: Option<String>,
}

/// Parse a listing body into a page of `K::Item`, dropping children of
/// any other thing kind.
pub(crate) fn parse_page<K: ListingKind>(body: &str) -> Result<Page<K::Item>, RedditError> {
    let listing: Listing<serde_json::Value> =
        serde_json::from_str(body).map_err(|e| RedditError::Parse(e.to_string()))?;

    let mut items = Vec::with_capacity(listing.data.children.len());
    for child in listing.data.children {
        if child.kind != K::THING {
            tracing::debug!(kind = %child.kind, expected = K::THING, "skipping listing child");
            continue;
        }
        let wire: K::Wire = serde_json::from_value(child.data)
            .map_err(|e| RedditError::Parse(format!("{} child: {e}", K::THING)))?;
        items.push(K::map(wire));
    }

    Ok(Page {
        items,
        after: listing.data.after.filter(|cursor| !cursor.is_empty()),
    })
}

/// Follow the `after` cursor until `limit` items are collected or the
/// listing runs out.
///
/// `fetch_page(after, page_size)` performs one request. A failure on the
/// first page yields [`FetchOutcome::Failed`]; a failure after some items
/// were collected yields [`FetchOutcome::Partial`].
pub(crate) async fn paginate<T, F, Fut>(
    limit: usize,
    page_cap: usize,
    mut fetch_page: F,
) -> FetchOutcome<T>
where
    F: FnMut(Option<String>, usize) -> Fut,
    Fut: Future<Output = Result<Page<T>, RedditError>>,
{
    let mut items = Vec::new();
    let mut after = None;

    while items.len() < limit {
        let room = limit - items.len();
        let page_size = room.min(page_cap);

        let page = match fetch_page(after.take(), page_size).await {
            Ok(page) => page,
            Err(error) if items.is_empty() => return FetchOutcome::Failed(error),
            Err(error) => return FetchOutcome::Partial { items, error },
        };

        let exhausted = page.items.is_empty() || page.after.is_none();
        items.extend(page.items.into_iter().take(room));
        if exhausted {
            break;
        }
        after = page.after;
    }

    FetchOutcome::Complete(items)
}
