//! Application-only OAuth (`client_credentials` grant).

use serde::Deserialize;

use crate::error::RedditError;
use crate::http::check_response;
use crate::RedditClient;

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
    error: Option<String>,
}

impl RedditClient {
    /// Bearer token for authenticated requests, or `None` when the client
    /// runs against the public endpoints.
    ///
    /// The token is requested once and reused for the client's lifetime.
    /// A failed request is not cached, so the next listing asks again.
    pub(crate) async fn bearer(&self) -> Result<Option<&str>, RedditError> {
        if !self.config.is_configured() {
            return Ok(None);
        }
        let token = self
            .token
            .get_or_try_init(|| self.request_token())
            .await?;
        Ok(Some(token.as_str()))
    }

    async fn request_token(&self) -> Result<String, RedditError> {
        tracing::debug!(url = %self.config.auth_url, "requesting reddit app token");
        let resp = self
            .http
            .post(&self.config.auth_url)
            .basic_auth(&self.config.client_id, Some(&self.config.client_secret))
            .header(
                reqwest::header::CONTENT_TYPE,
                "application/x-www-form-urlencoded",
            )
            .body("grant_type=client_credentials")
            .send()
            .await?;
        let body = check_response(resp).await?.text().await?;
        parse_token(&body)
    }
}

fn parse_token(body: &str) -> Result<String, RedditError> {
    let token: TokenResponse =
        serde_json::from_str(body).map_err(|e| RedditError::Parse(format!("token response: {e}")))?;
    match (token.access_token, token.error) {
        (Some(access), _) if !access.is_empty() => Ok(access),
        (_, Some(error)) => Err(RedditError::Auth(error)),
        _ => Err(RedditError::Auth(
            "token response has no access_token".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_access_token() {
        let body = r#"{"access_token": "abc123", "token_type": "bearer", "expires_in": 86400, "scope": "*"}"#;
        assert_eq!(parse_token(body).unwrap(), "abc123");
    }

    #[test]
    fn error_field_is_auth_error() {
        let err = parse_token(r#"{"error": "invalid_grant"}"#).unwrap_err();
        assert!(matches!(err, RedditError::Auth(ref msg) if msg == "invalid_grant"));
    }

    #[test]
    fn missing_token_is_auth_error() {
        assert!(matches!(
            parse_token(r#"{"access_token": ""}"#),
            Err(RedditError::Auth(_))
        ));
    }

    #[test]
    fn non_json_is_parse_error() {
        assert!(matches!(parse_token("nope"), Err(RedditError::Parse(_))));
    }
}
