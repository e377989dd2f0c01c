//! Status-code checks shared by the token and listing requests.

use persona_core::retry_after_secs;

use crate::error::RedditError;

/// Check an HTTP response for common error conditions.
///
/// - **401** → [`RedditError::Auth`]
/// - **429** → [`RedditError::RateLimited`], from `Retry-After` or
///   `x-ratelimit-reset`, falling back to 60 s
/// - **other non-success** → [`RedditError::Api`] with the response body
pub async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, RedditError> {
    let status = resp.status();
    if status == reqwest::StatusCode::UNAUTHORIZED {
        return Err(RedditError::Auth(
            "Reddit rejected the access token (401)".to_string(),
        ));
    }
    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
        return Err(RedditError::RateLimited {
            retry_after_secs: parse_retry_after(&resp),
        });
    }
    if !status.is_success() {
        return Err(RedditError::Api {
            status: status.as_u16(),
            message: resp.text().await.unwrap_or_default(),
        });
    }
    Ok(resp)
}

fn parse_retry_after(resp: &reqwest::Response) -> u64 {
    retry_after_secs([
        header(resp, reqwest::header::RETRY_AFTER.as_str()),
        header(resp, "x-ratelimit-reset"),
    ])
}

fn header<'a>(resp: &'a reqwest::Response, name: &str) -> Option<&'a str> {
    resp.headers().get(name).and_then(|v| v.to_str().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mock_response(status: u16, headers: &[(&str, &str)]) -> reqwest::Response {
        let mut builder = ::http::Response::builder().status(status);
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        reqwest::Response::from(builder.body("boom").unwrap())
    }

    #[test]
    fn retry_after_header_wins() {
        let resp = mock_response(429, &[("Retry-After", "120"), ("x-ratelimit-reset", "5")]);
        assert_eq!(parse_retry_after(&resp), 120);
    }

    #[test]
    fn ratelimit_reset_is_used_and_rounded_up() {
        let resp = mock_response(429, &[("x-ratelimit-reset", "42.3")]);
        assert_eq!(parse_retry_after(&resp), 43);
    }

    #[test]
    fn retry_after_defaults() {
        assert_eq!(parse_retry_after(&mock_response(429, &[])), 60);
        let garbage = mock_response(429, &[("Retry-After", "soon")]);
        assert_eq!(parse_retry_after(&garbage), 60);
    }

    #[tokio::test]
    async fn unauthorized_is_auth_error() {
        let err = check_response(mock_response(401, &[])).await.unwrap_err();
        assert!(matches!(err, RedditError::Auth(_)));
    }

    #[tokio::test]
    async fn too_many_requests_is_rate_limited() {
        let err = check_response(mock_response(429, &[("Retry-After", "30")]))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            RedditError::RateLimited {
                retry_after_secs: 30
            }
        ));
    }

    #[tokio::test]
    async fn not_found_keeps_status_and_body() {
        let err = check_response(mock_response(404, &[])).await.unwrap_err();
        match err {
            RedditError::Api { status, message } => {
                assert_eq!(status, 404);
                assert_eq!(message, "boom");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn success_passes_through() {
        assert!(check_response(mock_response(200, &[])).await.is_ok());
    }
}
