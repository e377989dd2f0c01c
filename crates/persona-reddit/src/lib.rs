//! # persona-reddit
//!
//! Reddit HTTP client that fetches a user's most recent posts and comments.
//!
//! Two modes:
//! - **App-only OAuth** when a client id/secret is configured: requests go to
//!   `oauth.reddit.com` with a bearer token from the `client_credentials` grant.
//! - **Anonymous** otherwise: the public `.json` listings on `www.reddit.com`.
//!
//! Posts and comments are fetched independently. Each fetch returns a
//! [`FetchOutcome`] so the caller decides how to combine partial results.

mod auth;
mod error;
mod http;
mod listing;

pub use error::RedditError;

use std::time::Duration;

use listing::{Comments, ListingKind, Page, Submitted, paginate, parse_page};
use persona_config::{MAX_PAGE_SIZE, RedditConfig};
use persona_core::{Comment, Post, UserIdentifier};
use tokio::sync::OnceCell;

// ── Types ──────────────────────────────────────────────────────────

/// Result of fetching one content type.
#[derive(Debug)]
pub enum FetchOutcome<T> {
    /// Every requested page arrived.
    Complete(Vec<T>),
    /// Some pages arrived before a later request failed.
    Partial { items: Vec<T>, error: RedditError },
    /// The first request failed; nothing was fetched.
    Failed(RedditError),
}

impl<T> FetchOutcome<T> {
    #[must_use]
    pub fn items(&self) -> &[T] {
        match self {
            Self::Complete(items) | Self::Partial { items, .. } => items,
            Self::Failed(_) => &[],
        }
    }

    #[must_use]
    pub const fn error(&self) -> Option<&RedditError> {
        match self {
            Self::Complete(_) => None,
            Self::Partial { error, .. } | Self::Failed(error) => Some(error),
        }
    }

    /// Split into whatever was fetched plus the error that stopped it, if any.
    #[must_use]
    pub fn into_parts(self) -> (Vec<T>, Option<RedditError>) {
        match self {
            Self::Complete(items) => (items, None),
            Self::Partial { items, error } => (items, Some(error)),
            Self::Failed(error) => (Vec::new(), Some(error)),
        }
    }
}

// ── Client ─────────────────────────────────────────────────────────

/// HTTP client for a user's Reddit listings.
pub struct RedditClient {
    http: reqwest::Client,
    config: RedditConfig,
    token: OnceCell<String>,
}

impl RedditClient {
    /// Create a client from the `[reddit]` configuration section.
    ///
    /// # Errors
    ///
    /// Returns [`RedditError::Http`] if the underlying `reqwest::Client`
    /// fails to build (e.g. an invalid user agent).
    pub fn new(config: &RedditConfig) -> Result<Self, RedditError> {
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            http,
            config: config.clone(),
            token: OnceCell::new(),
        })
    }

    /// Whether requests go through app-only OAuth.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.config.is_configured()
    }

    /// Fetch up to `limit` of the user's newest posts.
    pub async fn fetch_posts(&self, user: &UserIdentifier, limit: usize) -> FetchOutcome<Post> {
        self.fetch_listing::<Submitted>(user, limit).await
    }

    /// Fetch up to `limit` of the user's newest comments.
    pub async fn fetch_comments(
        &self,
        user: &UserIdentifier,
        limit: usize,
    ) -> FetchOutcome<Comment> {
        self.fetch_listing::<Comments>(user, limit).await
    }

    async fn fetch_listing<K: ListingKind>(
        &self,
        user: &UserIdentifier,
        limit: usize,
    ) -> FetchOutcome<K::Item> {
        tracing::debug!(user = %user, endpoint = K::ENDPOINT, limit, "fetching listing");
        let outcome = paginate(limit, MAX_PAGE_SIZE as usize, move |after, page_size| {
            self.fetch_page::<K>(user, after, page_size)
        })
        .await;
        tracing::debug!(
            user = %user,
            endpoint = K::ENDPOINT,
            fetched = outcome.items().len(),
            failed = outcome.error().is_some(),
            "listing fetch finished"
        );
        outcome
    }

    async fn fetch_page<K: ListingKind>(
        &self,
        user: &UserIdentifier,
        after: Option<String>,
        page_size: usize,
    ) -> Result<Page<K::Item>, RedditError> {
        let bearer = self.bearer().await?;
        let url = listing_url(
            &self.config,
            bearer.is_some(),
            user,
            K::ENDPOINT,
            page_size,
            after.as_deref(),
        );

        let mut request = self.http.get(&url);
        if let Some(token) = bearer {
            request = request.bearer_auth(token);
        }
        let resp = http::check_response(request.send().await?).await?;
        parse_page::<K>(&resp.text().await?)
    }
}

/// Build the listing URL for one page.
fn listing_url(
    config: &RedditConfig,
    authenticated: bool,
    user: &UserIdentifier,
    endpoint: &str,
    page_size: usize,
    after: Option<&str>,
) -> String {
    let (base, suffix) = if authenticated {
        (config.api_base.trim_end_matches('/'), "")
    } else {
        (config.public_base.trim_end_matches('/'), ".json")
    };
    let mut url = format!(
        "{base}/user/{}/{endpoint}{suffix}?sort=new&limit={page_size}&raw_json=1",
        urlencoding::encode(user.as_str())
    );
    if let Some(cursor) = after {
        url.push_str("&after=");
        url.push_str(&urlencoding::encode(cursor));
    }
    url
}
