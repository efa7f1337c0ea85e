//! Reasoning port
//!
//! Defines the interface for getting free-text completions from a language
//! model.

use async_trait::async_trait;
use symptom_domain::SearchResult;
use symptom_domain::core::text::REASONING_ERROR_PREFIX;
use thiserror::Error;
use tracing::{debug, warn};

/// Errors that can occur inside a reasoning backend
#[derive(Error, Debug)]
pub enum ReasoningError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("HTTP {status}: {message}")]
    HttpStatus { status: u16, message: String },

    #[error("API key not found (set {0})")]
    MissingApiKey(String),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Timeout")]
    Timeout,

    #[error("Other error: {0}")]
    Other(String),
}

/// One completion request
#[derive(Debug, Clone, PartialEq)]
pub struct ReasoningRequest {
    pub prompt: String,
    /// Backend default when `None`
    pub system_prompt: Option<String>,
    /// Backend default when `None`
    pub temperature: Option<f64>,
}

impl ReasoningRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            system_prompt: None,
            temperature: None,
        }
    }

    pub fn with_system_prompt(mut self, system_prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(system_prompt.into());
        self
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = Some(temperature);
        self
    }
}

/// Port for language-model reasoning
///
/// Adapters implement [`try_reason`](Self::try_reason). Agents call
/// [`reason`](Self::reason), which never fails: a backend error comes back as
/// text starting with `"Error: "` and downstream parsers treat it as having
/// no structured fields.
#[async_trait]
pub trait ReasoningPort: Send + Sync {
    /// Run one completion, surfacing backend errors
    async fn try_reason(&self, request: &ReasoningRequest) -> Result<String, ReasoningError>;

    /// Run one completion, embedding any error in the returned text
    async fn reason(&self, request: ReasoningRequest) -> String {
        debug!(
            "Reasoning on prompt of {} chars",
            request.prompt.chars().count()
        );
        match self.try_reason(&request).await {
            Ok(text) => {
                debug!("Reasoning returned {} chars", text.chars().count());
                text
            }
            Err(e) => {
                warn!("Reasoning failed: {}", e);
                format!("{}{}", REASONING_ERROR_PREFIX, e)
            }
        }
    }

    /// Run one completion with research results appended as context
    ///
    /// Each result becomes a `Source: <citation>` block; blocks are
    /// separated by a blank line.
    async fn reason_with_context(
        &self,
        request: ReasoningRequest,
        context: &[SearchResult],
    ) -> String {
        let context_text = context
            .iter()
            .map(|result| {
                let citation = if result.citation.is_empty() {
                    "Unknown"
                } else {
                    result.citation.as_str()
                };
                format!("Source: {}\n{}", citation, result.content)
            })
            .collect::<Vec<_>>()
            .join("\n\n");

        let prompt = format!("{}\n\nContext:\n{}", request.prompt, context_text);
        self.reason(ReasoningRequest { prompt, ..request }).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct RecordingReasoner {
        result: Result<String, String>,
        prompts: Mutex<Vec<String>>,
    }

    impl RecordingReasoner {
        fn ok(text: &str) -> Self {
            Self {
                result: Ok(text.to_string()),
                prompts: Mutex::new(Vec::new()),
            }
        }

        fn failing(message: &str) -> Self {
            Self {
                result: Err(message.to_string()),
                prompts: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl ReasoningPort for RecordingReasoner {
        async fn try_reason(&self, request: &ReasoningRequest) -> Result<String, ReasoningError> {
            self.prompts.lock().unwrap().push(request.prompt.clone());
            self.result.clone().map_err(ReasoningError::Other)
        }
    }

    #[tokio::test]
    async fn test_reason_passes_text_through() {
        let reasoner = RecordingReasoner::ok("PROBABILITY: 0.4");
        let text = reasoner.reason(ReasoningRequest::new("assess")).await;
        assert_eq!(text, "PROBABILITY: 0.4");
    }

    #[tokio::test]
    async fn test_reason_embeds_error() {
        let reasoner = RecordingReasoner::failing("rate limited");
        let text = reasoner.reason(ReasoningRequest::new("assess")).await;
        assert_eq!(text, "Error: Other error: rate limited");
    }

    #[tokio::test]
    async fn test_reason_with_context_format() {
        let reasoner = RecordingReasoner::ok("ok");
        let context = vec![
            SearchResult::new("t1", "https://a.example", "").with_content("first"),
            SearchResult {
                content: "second".to_string(),
                ..Default::default()
            },
        ];

        reasoner
            .reason_with_context(ReasoningRequest::new("Summarize"), &context)
            .await;

        let prompts = reasoner.prompts.lock().unwrap();
        assert_eq!(
            prompts[0],
            "Summarize\n\nContext:\nSource: https://a.example\nfirst\n\nSource: Unknown\nsecond"
        );
    }

    #[test]
    fn test_request_builder() {
        let request = ReasoningRequest::new("p")
            .with_system_prompt("s")
            .with_temperature(0.4);
        assert_eq!(request.system_prompt.as_deref(), Some("s"));
        assert_eq!(request.temperature, Some(0.4));
    }
}
