//! OpenAI-compatible chat-completion client.

use std::time::Duration;

use persona_config::LlmConfig;
use persona_core::retry_after_secs;
use serde::{Deserialize, Serialize};

use crate::error::LlmError;

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    model: Option<String>,
    choices: Vec<Choice>,
    #[serde(default)]
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Option<ResponseMessage>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    prompt_tokens: u32,
    completion_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// Single-shot chat completion with fixed sampling parameters.
pub struct CompletionClient {
    http: reqwest::Client,
    config: LlmConfig,
}

impl CompletionClient {
    /// Create a client from the `[llm]` configuration section.
    ///
    /// # Errors
    ///
    /// Returns [`LlmError::Http`] if the underlying `reqwest::Client` fails to build.
    pub fn new(config: &LlmConfig) -> Result<Self, LlmError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            http,
            config: config.clone(),
        })
    }

    #[must_use]
    pub fn model(&self) -> &str {
        &self.config.model
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/chat/completions",
            self.config.base_url.trim_end_matches('/')
        )
    }

    fn build_request<'a>(&'a self, system: &'a str, prompt: &'a str) -> ChatRequest<'a> {
        ChatRequest {
            model: &self.config.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
        }
    }

    /// Send `system` + `prompt` and return the first choice's text.
    ///
    /// # Errors
    ///
    /// Returns [`LlmError::MissingApiKey`] before any request when no key is
    /// configured, transport/status/parse errors from the call, and
    /// [`LlmError::EmptyCompletion`] when the model returns no text.
    pub async fn complete(&self, system: &str, prompt: &str) -> Result<String, LlmError> {
        if !self.config.is_configured() {
            return Err(LlmError::MissingApiKey);
        }

        let request = self.build_request(system, prompt);
        tracing::debug!(
            model = %self.config.model,
            prompt_chars = prompt.len(),
            "requesting chat completion"
        );

        let response = self
            .http
            .post(self.endpoint())
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(LlmError::RateLimited {
                retry_after_secs: parse_retry_after(&response),
            });
        }
        let text = response.text().await?;
        if !status.is_success() {
            return Err(api_error(status.as_u16(), &text));
        }

        parse_completion(&text)
    }
}

fn parse_retry_after(resp: &reqwest::Response) -> u64 {
    retry_after_secs([resp
        .headers()
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())])
}

/// Prefer the provider's `error.message` over the raw body.
fn api_error(status: u16, body: &str) -> LlmError {
    let message = serde_json::from_str::<ErrorEnvelope>(body)
        .map_or_else(|_| body.trim().to_string(), |envelope| envelope.error.message);
    LlmError::Api { status, message }
}

fn parse_completion(body: &str) -> Result<String, LlmError> {
    let response: ChatResponse =
        serde_json::from_str(body).map_err(|e| LlmError::Parse(format!("chat response: {e}")))?;

    if let Some(usage) = &response.usage {
        tracing::debug!(
            model = response.model.as_deref().unwrap_or("unknown"),
            prompt_tokens = usage.prompt_tokens,
            completion_tokens = usage.completion_tokens,
            "completion usage"
        );
    }

    let choice = response
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| LlmError::Parse("response has no choices".to_string()))?;

    if choice.finish_reason.as_deref() == Some("length") {
        tracing::warn!("completion hit the max_tokens cap; persona may be cut short");
    }

    choice
        .message
        .and_then(|message| message.content)
        .map(|content| content.trim().to_string())
        .filter(|content| !content.is_empty())
        .ok_or(LlmError::EmptyCompletion)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn config() -> LlmConfig {
        LlmConfig {
            api_key: "sk-test".into(),
            base_url: "https://llm.example.com/v1/".into(),
            model: "gpt-4".into(),
            temperature: 0.7,
            max_tokens: 2000,
            ..Default::default()
        }
    }

    #[test]
    fn request_body_has_roles_and_sampling() {
        let client = CompletionClient::new(&config()).unwrap();
        let body =
            serde_json::to_value(client.build_request("be an analyst", "describe u/alice")).unwrap();

        assert_eq!(body["model"], "gpt-4");
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][0]["content"], "be an analyst");
        assert_eq!(body["messages"][1]["role"], "user");
        assert_eq!(body["messages"][1]["content"], "describe u/alice");
        assert_eq!(body["max_tokens"], 2000);
        let temperature = body["temperature"].as_f64().unwrap();
        assert!((temperature - 0.7).abs() < 1e-6);
    }

    #[test]
    fn endpoint_joins_base_url() {
        let client = CompletionClient::new(&config()).unwrap();
        assert_eq!(
            client.endpoint(),
            "https://llm.example.com/v1/chat/completions"
        );
    }

    #[test]
    fn parses_first_choice() {
        let body = r#"{
            "model": "gpt-4-0613",
            "choices": [
                {"message": {"role": "assistant", "content": "  Persona text \n"}, "finish_reason": "stop"},
                {"message": {"role": "assistant", "content": "second"}, "finish_reason": "stop"}
            ],
            "usage": {"prompt_tokens": 900, "completion_tokens": 400, "total_tokens": 1300}
        }"#;
        assert_eq!(parse_completion(body).unwrap(), "Persona text");
    }

    #[test]
    fn empty_or_missing_content_is_empty_completion() {
        let blank = r#"{"choices": [{"message": {"content": "   "}}]}"#;
        assert!(matches!(parse_completion(blank), Err(LlmError::EmptyCompletion)));

        let null = r#"{"choices": [{"message": {"content": null}}]}"#;
        assert!(matches!(parse_completion(null), Err(LlmError::EmptyCompletion)));
    }

    #[test]
    fn no_choices_is_parse_error() {
        assert!(matches!(
            parse_completion(r#"{"choices": []}"#),
            Err(LlmError::Parse(_))
        ));
        assert!(matches!(parse_completion("not json"), Err(LlmError::Parse(_))));
    }

    #[test]
    fn api_error_prefers_provider_message() {
        let err = api_error(
            401,
            r#"{"error": {"message": "Incorrect API key provided", "type": "invalid_request_error"}}"#,
        );
        match err {
            LlmError::Api { status, message } => {
                assert_eq!(status, 401);
                assert_eq!(message, "Incorrect API key provided");
            }
            other => panic!("unexpected error: {other}"),
        }

        assert!(matches!(
            api_error(502, "Bad Gateway\n"),
            LlmError::Api { status: 502, ref message } if message == "Bad Gateway"
        ));
    }

    fn rate_limited(headers: &[(&str, &str)]) -> reqwest::Response {
        let mut builder = ::http::Response::builder().status(429);
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        reqwest::Response::from(builder.body("").unwrap())
    }

    #[test]
    fn retry_after_parses_header() {
        assert_eq!(parse_retry_after(&rate_limited(&[("Retry-After", "17")])), 17);
        assert_eq!(parse_retry_after(&rate_limited(&[("Retry-After", "2.5")])), 3);
    }

    #[test]
    fn retry_after_defaults_when_absent_or_garbled() {
        assert_eq!(parse_retry_after(&rate_limited(&[])), 60);
        assert_eq!(parse_retry_after(&rate_limited(&[("Retry-After", "later")])), 60);
    }

    #[tokio::test]
    async fn missing_key_fails_before_request() {
        let client = CompletionClient::new(&LlmConfig::default()).unwrap();
        let err = client.complete("system", "prompt").await.unwrap_err();
        assert!(matches!(err, LlmError::MissingApiKey));
    }
}
