//! Reddit API configuration.

use serde::{Deserialize, Serialize};

/// Reddit caps a single listing page at 100 items.
pub const MAX_PAGE_SIZE: u32 = 100;

const fn default_fetch_limit() -> u32 {
    100
}

const fn default_timeout_secs() -> u64 {
    30
}

fn default_user_agent() -> String {
    "reddit-persona/0.1".to_string()
}

fn default_api_base() -> String {
    "https://oauth.reddit.com".to_string()
}

fn default_public_base() -> String {
    "https://www.reddit.com".to_string()
}

fn default_auth_url() -> String {
    "https://www.reddit.com/api/v1/access_token".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RedditConfig {
    /// OAuth application client id (script or web app).
    #[serde(default)]
    pub client_id: String,

    /// OAuth application client secret.
    #[serde(default)]
    pub client_secret: String,

    /// User-Agent sent with every request. Reddit throttles generic agents.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Maximum number of posts, and separately of comments, to fetch.
    #[serde(default = "default_fetch_limit")]
    pub fetch_limit: u32,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Base URL for authenticated requests.
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// Base URL for anonymous `.json` listings, used without credentials.
    #[serde(default = "default_public_base")]
    pub public_base: String,

    /// Token endpoint for the `client_credentials` grant.
    #[serde(default = "default_auth_url")]
    pub auth_url: String,
}

impl Default for RedditConfig {
    fn default() -> Self {
        Self {
            client_id: String::new(),
            client_secret: String::new(),
            user_agent: default_user_agent(),
            fetch_limit: default_fetch_limit(),
            timeout_secs: default_timeout_secs(),
            api_base: default_api_base(),
            public_base: default_public_base(),
            auth_url: default_auth_url(),
        }
    }
}

impl RedditConfig {
    /// Check if OAuth credentials are present.
    pub fn is_configured(&self) -> bool {
        !self.client_id.is_empty() && !self.client_secret.is_empty()
    }
}
