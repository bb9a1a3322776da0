//! OpenAI chat/completions wire shape.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{endpoint_url, Message, Provider, ProviderKind, ProviderRequest, RequestBody};
use crate::ai::completion::{CompletionRequest, CompletionResult};
use crate::ai::config::ProviderConfig;
use crate::ai::error::AiError;

/// OpenAI API request body.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct OpenAiRequest {
    /// Model identifier.
    pub model: String,
    /// Sampling temperature.
    pub temperature: f64,
    /// Token budget for the completion.
    pub max_tokens: u32,
    /// System turn followed by the user turn.
    pub messages: Vec<Message>,
}

/// OpenAI API response choice.
#[derive(Deserialize, Debug)]
struct Choice {
    #[serde(default)]
    message: Option<ResponseMessage>,
}

/// OpenAI API response message.
#[derive(Deserialize, Debug)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

/// OpenAI API response.
#[derive(Deserialize, Debug)]
struct OpenAiResponse {
    #[serde(default)]
    choices: Vec<Choice>,
    #[serde(default)]
    model: Option<String>,
}

/// Chat/completions provider: system and user turns share one message list,
/// authenticated with a bearer token.
#[derive(Clone, Copy, Debug, Default)]
pub struct OpenAiProvider;

impl Provider for OpenAiProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::OpenAi
    }

    fn default_base_url(&self) -> &'static str {
        "https://api.openai.com"
    }

    fn default_model(&self) -> &'static str {
        "gpt-4o"
    }

    fn build_request(
        &self,
        config: &ProviderConfig,
        request: &CompletionRequest,
    ) -> ProviderRequest {
        let body = OpenAiRequest {
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: request.effective_max_tokens(config.max_tokens),
            messages: vec![
                Message::new("system", request.system_prompt.as_str()),
                Message::new("user", request.user_content.as_str()),
            ],
        };

        ProviderRequest {
            url: endpoint_url(&config.base_url, "/v1/chat/completions"),
            headers: vec![(
                "Authorization",
                format!("Bearer {}", config.api_key()),
            )],
            body: RequestBody::OpenAi(body),
        }
    }

    fn extract_text(&self, body: &str) -> Result<CompletionResult, AiError> {
        let response: OpenAiResponse = serde_json::from_str(body).map_err(|e| {
            debug!(error = %e, "OpenAI response did not match the chat/completions shape");
            AiError::EmptyCompletion {
                provider: self.kind(),
            }
        })?;

        debug!(
            choice_count = response.choices.len(),
            model = ?response.model,
            "Received OpenAI API response"
        );

        let text = response
            .choices
            .first()
            .and_then(|choice| choice.message.as_ref())
            .and_then(|message| message.content.as_deref());

        CompletionResult::from_extracted(self.kind(), text)
    }
}
