//! Request and result values exchanged with the completion client.

use crate::ai::error::AiError;
use crate::ai::provider::ProviderKind;

/// A single prompt+content pair to send to a provider.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompletionRequest {
    /// System prompt (instructions).
    pub system_prompt: String,
    /// User content, e.g. a diff or a commit log.
    pub user_content: String,
    /// Replaces the configured token budget when set.
    pub max_tokens_override: Option<u32>,
}

impl CompletionRequest {
    /// Creates a request that uses the configured token budget.
    pub fn new(system_prompt: impl Into<String>, user_content: impl Into<String>) -> Self {
        Self {
            system_prompt: system_prompt.into(),
            user_content: user_content.into(),
            max_tokens_override: None,
        }
    }

    /// Overrides the token budget for this request.
    #[must_use]
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens_override = Some(max_tokens);
        self
    }

    /// Returns the budget to send, given the configured default.
    pub fn effective_max_tokens(&self, configured: u32) -> u32 {
        self.max_tokens_override.unwrap_or(configured)
    }
}

/// Text extracted from a successful provider response.
///
/// The text is trimmed and never empty.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompletionResult {
    /// The completion text.
    pub text: String,
}

impl CompletionResult {
    /// Builds a result from the raw extracted field, trimming whitespace.
    ///
    /// A missing or blank field becomes [`AiError::EmptyCompletion`].
    pub fn from_extracted(provider: ProviderKind, text: Option<&str>) -> Result<Self, AiError> {
        match text.map(str::trim) {
            Some(text) if !text.is_empty() => Ok(Self {
                text: text.to_string(),
            }),
            _ => Err(AiError::EmptyCompletion { provider }),
        }
    }
}

impl std::fmt::Display for CompletionResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}
