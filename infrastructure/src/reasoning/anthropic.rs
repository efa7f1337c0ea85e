//! Anthropic Messages API reasoning gateway
//!
//! Implements [`ReasoningPort`] over `POST {base_url}/v1/messages`. Transient
//! failures (rate limits, 5xx, connection drops, timeouts) are retried with
//! exponential backoff.

use crate::config::FileReasoningConfig;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use symptom_application::{ReasoningError, ReasoningPort, ReasoningRequest};
use tracing::{debug, warn};

/// Maximum number of attempts per request.
const MAX_RETRIES: u32 = 3;

/// First backoff delay, doubled on every further attempt.
const BASE_RETRY_DELAY_MS: u64 = 1000;

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f64,
    system: &'a str,
    messages: Vec<ApiMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ApiMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorResponse {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// Reasoning backend talking to the Anthropic Messages API
pub struct AnthropicReasoningGateway {
    client: reqwest::Client,
    api_key: Option<String>,
    api_key_env: String,
    endpoint: String,
    api_version: String,
    model: String,
    max_tokens: u32,
    default_temperature: f64,
    default_system_prompt: String,
    base_retry_delay: Duration,
}

impl AnthropicReasoningGateway {
    /// Build a gateway from the `[reasoning]` section.
    ///
    /// A missing API key is not an error here; every call then fails with
    /// [`ReasoningError::MissingApiKey`].
    pub fn new(config: &FileReasoningConfig) -> Result<Self, ReasoningError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| ReasoningError::Other(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_key: config.resolve_api_key(),
            api_key_env: config.api_key_env.clone(),
            endpoint: format!("{}/v1/messages", config.base_url.trim_end_matches('/')),
            api_version: config.api_version.clone(),
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            default_temperature: config.temperature,
            default_system_prompt: config.system_prompt.clone(),
            base_retry_delay: Duration::from_millis(BASE_RETRY_DELAY_MS),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    fn build_body<'a>(&'a self, request: &'a ReasoningRequest) -> MessagesRequest<'a> {
        MessagesRequest {
            model: &self.model,
            max_tokens: self.max_tokens,
            temperature: request.temperature.unwrap_or(self.default_temperature),
            system: request
                .system_prompt
                .as_deref()
                .unwrap_or(&self.default_system_prompt),
            messages: vec![ApiMessage {
                role: "user",
                content: &request.prompt,
            }],
        }
    }

    /// Execute a request with exponential backoff retry logic.
    async fn execute_with_retry(
        &self,
        api_key: &str,
        body: &MessagesRequest<'_>,
    ) -> Result<String, ReasoningError> {
        let mut last_error = None;

        for attempt in 0..MAX_RETRIES {
            if attempt > 0 {
                // 1s, 2s, ...
                let delay = self.base_retry_delay * (1 << (attempt - 1));
                tokio::time::sleep(delay).await;
                debug!(
                    attempt = attempt + 1,
                    delay_ms = delay.as_millis() as u64,
                    "Retrying Anthropic request after transient failure"
                );
            }

            match self.execute_request(api_key, body).await {
                Ok(text) => return Ok(text),
                Err(err) if is_transient_error(&err) => {
                    warn!(
                        attempt = attempt + 1,
                        max_retries = MAX_RETRIES,
                        error = %err,
                        "Transient error, will retry"
                    );
                    last_error = Some(err);
                }
                Err(err) => return Err(err),
            }
        }

        Err(last_error.unwrap_or_else(|| {
            ReasoningError::Other("Max retries exceeded with no error captured".to_string())
        }))
    }

    /// Execute a single request (no retry logic).
    async fn execute_request(
        &self,
        api_key: &str,
        body: &MessagesRequest<'_>,
    ) -> Result<String, ReasoningError> {
        let response = self
            .client
            .post(&self.endpoint)
            .header("x-api-key", api_key)
            .header("anthropic-version", &self.api_version)
            .header("content-type", "application/json")
            .json(body)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error response".to_string());
            let message = serde_json::from_str::<ApiErrorResponse>(&error_text)
                .map(|e| e.error.message)
                .unwrap_or(error_text);

            return Err(ReasoningError::HttpStatus {
                status: status.as_u16(),
                message,
            });
        }

        let text = response.text().await.map_err(map_transport_error)?;
        extract_text(&text)
    }
}

#[async_trait]
impl ReasoningPort for AnthropicReasoningGateway {
    async fn try_reason(&self, request: &ReasoningRequest) -> Result<String, ReasoningError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| ReasoningError::MissingApiKey(self.api_key_env.clone()))?;

        let body = self.build_body(request);
        self.execute_with_retry(api_key, &body).await
    }
}

/// Concatenate the text blocks of a Messages API response body.
fn extract_text(body: &str) -> Result<String, ReasoningError> {
    let parsed: MessagesResponse = serde_json::from_str(body)
        .map_err(|e| ReasoningError::MalformedResponse(e.to_string()))?;

    let text: String = parsed
        .content
        .into_iter()
        .filter(|block| block.kind == "text")
        .filter_map(|block| block.text)
        .collect();

    if text.is_empty() {
        return Err(ReasoningError::MalformedResponse(
            "response contained no text content".to_string(),
        ));
    }
    Ok(text)
}

fn map_transport_error(e: reqwest::Error) -> ReasoningError {
    if e.is_timeout() {
        ReasoningError::Timeout
    } else if e.is_connect() {
        ReasoningError::ConnectionError(e.to_string())
    } else {
        ReasoningError::Other(e.to_string())
    }
}

/// Check if an error is transient and should be retried.
fn is_transient_error(error: &ReasoningError) -> bool {
    match error {
        ReasoningError::ConnectionError(_) | ReasoningError::Timeout => true,
        ReasoningError::HttpStatus { status, .. } => *status >= 500 || *status == 429,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gateway(api_key: Option<&str>) -> AnthropicReasoningGateway {
        let config = FileReasoningConfig {
            api_key: api_key.map(String::from),
            api_key_env: "SYMPTOM_QUORUM_TEST_UNSET_KEY".to_string(),
            base_url: "http://127.0.0.1:9/".to_string(),
            ..Default::default()
        };
        AnthropicReasoningGateway::new(&config).unwrap()
    }

    #[test]
    fn test_endpoint_strips_trailing_slash() {
        assert_eq!(gateway(None).endpoint, "http://127.0.0.1:9/v1/messages");
    }

    #[test]
    fn test_body_uses_defaults() {
        let gw = gateway(Some("sk-test"));
        let request = ReasoningRequest::new("List conditions");
        let body = serde_json::to_value(gw.build_body(&request)).unwrap();

        assert_eq!(body["model"], "claude-3-5-sonnet-20241022");
        assert_eq!(body["max_tokens"], 4096);
        assert_eq!(body["temperature"], 0.7);
        assert_eq!(body["system"], "You are a medical research assistant.");
        assert_eq!(body["messages"][0]["role"], "user");
        assert_eq!(body["messages"][0]["content"], "List conditions");
    }

    #[test]
    fn test_body_uses_request_overrides() {
        let gw = gateway(Some("sk-test"));
        let request = ReasoningRequest::new("Debate")
            .with_system_prompt("You are moderating.")
            .with_temperature(0.3);
        let body = serde_json::to_value(gw.build_body(&request)).unwrap();

        assert_eq!(body["temperature"], 0.3);
        assert_eq!(body["system"], "You are moderating.");
    }

    #[test]
    fn test_extract_text_joins_text_blocks() {
        let body = r#"{"content":[{"type":"text","text":"1. Anemia"},{"type":"tool_use","id":"x"},{"type":"text","text":"\n2. Hypothyroidism"}]}"#;
        assert_eq!(extract_text(body).unwrap(), "1. Anemia\n2. Hypothyroidism");
    }

    #[test]
    fn test_extract_text_rejects_empty_or_invalid() {
        assert!(matches!(
            extract_text(r#"{"content":[]}"#),
            Err(ReasoningError::MalformedResponse(_))
        ));
        assert!(matches!(
            extract_text("not json"),
            Err(ReasoningError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_is_transient_error() {
        assert!(is_transient_error(&ReasoningError::HttpStatus {
            status: 429,
            message: "rate limited".to_string()
        }));
        assert!(is_transient_error(&ReasoningError::HttpStatus {
            status: 529,
            message: "overloaded".to_string()
        }));
        assert!(is_transient_error(&ReasoningError::Timeout));
        assert!(!is_transient_error(&ReasoningError::HttpStatus {
            status: 400,
            message: "bad request".to_string()
        }));
        assert!(!is_transient_error(&ReasoningError::MissingApiKey(
            "ANTHROPIC_API_KEY".to_string()
        )));
    }

    #[tokio::test]
    async fn test_missing_key_fails_without_request() {
        let gw = gateway(None);
        assert!(!gw.has_api_key());

        let err = gw
            .try_reason(&ReasoningRequest::new("hello"))
            .await
            .unwrap_err();
        assert!(matches!(err, ReasoningError::MissingApiKey(ref env) if env == "SYMPTOM_QUORUM_TEST_UNSET_KEY"));

        let text = gw.reason(ReasoningRequest::new("hello")).await;
        assert!(text.starts_with("Error: "));
    }
}
