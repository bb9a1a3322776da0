//! Anthropic messages wire shape.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{endpoint_url, Message, Provider, ProviderKind, ProviderRequest, RequestBody};
use crate::ai::completion::{CompletionRequest, CompletionResult};
use crate::ai::config::ProviderConfig;
use crate::ai::error::AiError;

/// Value sent in the `anthropic-version` header.
pub const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Claude API request body.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct ClaudeRequest {
    /// Model identifier.
    pub model: String,
    /// Token budget for the completion.
    pub max_tokens: u32,
    /// Sampling temperature.
    pub temperature: f64,
    /// System prompt, sent outside the message list.
    pub system: String,
    /// The single user turn.
    pub messages: Vec<Message>,
}

/// Claude API response content block.
#[derive(Deserialize, Debug)]
struct Content {
    #[serde(default)]
    text: Option<String>,
}

/// Claude API response.
#[derive(Deserialize, Debug)]
struct ClaudeResponse {
    #[serde(default)]
    content: Vec<Content>,
}

/// Messages provider: the system prompt is a top-level field and only the
/// user turn goes in the message list.
#[derive(Clone, Copy, Debug, Default)]
pub struct ClaudeProvider;

impl Provider for ClaudeProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Claude
    }

    fn default_base_url(&self) -> &'static str {
        "https://api.anthropic.com"
    }

    fn default_model(&self) -> &'static str {
        "claude-3-opus-20240229"
    }

    fn build_request(
        &self,
        config: &ProviderConfig,
        request: &CompletionRequest,
    ) -> ProviderRequest {
        let body = ClaudeRequest {
            model: config.model.clone(),
            max_tokens: request.effective_max_tokens(config.max_tokens),
            temperature: config.temperature,
            system: request.system_prompt.clone(),
            messages: vec![Message::new("user", request.user_content.as_str())],
        };

        ProviderRequest {
            url: endpoint_url(&config.base_url, "/v1/messages"),
            headers: vec![
                ("x-api-key", config.api_key().to_string()),
                ("anthropic-version", ANTHROPIC_VERSION.to_string()),
            ],
            body: RequestBody::Claude(body),
        }
    }

    fn extract_text(&self, body: &str) -> Result<CompletionResult, AiError> {
        let response: ClaudeResponse = serde_json::from_str(body).map_err(|e| {
            debug!(error = %e, "Claude response did not match the messages shape");
            AiError::EmptyCompletion {
                provider: self.kind(),
            }
        })?;

        debug!(
            content_count = response.content.len(),
            "Received Claude API response"
        );

        let text = response
            .content
            .first()
            .and_then(|block| block.text.as_deref());

        CompletionResult::from_extracted(self.kind(), text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn config() -> ProviderConfig {
        ProviderConfig::new(ProviderKind::Claude, "ant-key")
            .unwrap()
            .with_base_url("http://127.0.0.1:9000/")
    }

    #[test]
    fn request_matches_messages_shape() {
        let request = CompletionRequest::new("Summarize the PR.", "abc123 feat: x");
        let rendered = ClaudeProvider.build_request(&config(), &request);

        assert_eq!(rendered.url, "http://127.0.0.1:9000/v1/messages");
        assert_eq!(rendered.header("x-api-key"), Some("ant-key"));
        assert_eq!(rendered.header("anthropic-version"), Some("2023-06-01"));
        assert_eq!(rendered.header("authorization"), None);
        assert_eq!(
            serde_json::to_value(&rendered.body).unwrap(),
            json!({
                "model": "claude-3-opus-20240229",
                "max_tokens": 500,
                "temperature": 0.7,
                "system": "Summarize the PR.",
                "messages": [
                    { "role": "user", "content": "abc123 feat: x" },
                ],
            })
        );
    }

    #[test]
    fn extracts_first_content_text() {
        let result = ClaudeProvider
            .extract_text(r#"{"content":[{"type":"text","text":"Release v2"}]}"#)
            .unwrap();
        assert_eq!(result.text, "Release v2");
    }

    #[test]
    fn missing_levels_are_empty_completions() {
        for body in [
            r#"{"content":[]}"#,
            r#"{"content":[{"type":"text"}]}"#,
            r#"{"content":[{"text":""}]}"#,
            r#"{"content":"oops"}"#,
            r#"{"id":"msg_1"}"#,
            "",
        ] {
            let err = ClaudeProvider.extract_text(body).unwrap_err();
            assert!(
                matches!(err, AiError::EmptyCompletion { provider: ProviderKind::Claude }),
                "body {body:?} gave {err:?}"
            );
        }
    }

    #[test]
    fn override_replaces_max_tokens() {
        let request = CompletionRequest::new("sys", "log").with_max_tokens(1000);
        let rendered = ClaudeProvider.build_request(&config(), &request);
        assert_eq!(rendered.body.max_tokens(), 1000);
    }

    #[test]
    fn extraction_is_idempotent() {
        let body = r#"{"content":[{"type":"text","text":"chore: bump deps"}]}"#;
        let first = ClaudeProvider.extract_text(body).unwrap();
        let second = ClaudeProvider.extract_text(body).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.text, "chore: bump deps");
    }
}
