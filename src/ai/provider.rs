//! Provider abstraction: one implementation per AI backend wire shape.

pub mod claude;
pub mod openai;

use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::ai::completion::{CompletionRequest, CompletionResult};
use crate::ai::config::ProviderConfig;
use crate::ai::error::AiError;

pub use claude::{ClaudeProvider, ClaudeRequest};
pub use openai::{OpenAiProvider, OpenAiRequest};

/// Identifier of a supported AI backend.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ProviderKind {
    /// OpenAI chat/completions API.
    #[default]
    OpenAi,
    /// Anthropic messages API.
    Claude,
}

impl ProviderKind {
    /// All supported providers, default first.
    pub const ALL: [Self; 2] = [Self::OpenAi, Self::Claude];

    /// Parses a provider selector (`"openai"`, `"claude"`), ignoring case.
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "openai" => Some(Self::OpenAi),
            "claude" => Some(Self::Claude),
            _ => None,
        }
    }

    /// Lowercase selector accepted by [`ProviderKind::parse`].
    pub fn id(self) -> &'static str {
        match self {
            Self::OpenAi => "openai",
            Self::Claude => "claude",
        }
    }

    /// Prefix of this provider's settings keys (`OPENAI_API_KEY`, ...).
    pub fn env_prefix(self) -> &'static str {
        match self {
            Self::OpenAi => "OPENAI",
            Self::Claude => "CLAUDE",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OpenAi => write!(f, "OpenAI"),
            Self::Claude => write!(f, "Claude"),
        }
    }
}

/// Chat message shared by both request shapes.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct Message {
    /// `"system"` or `"user"`.
    pub role: String,
    /// Message text.
    pub content: String,
}

impl Message {
    /// Creates a message with the given role.
    pub fn new(role: &str, content: impl Into<String>) -> Self {
        Self {
            role: role.to_string(),
            content: content.into(),
        }
    }
}

/// Request body for one of the supported wire shapes.
#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(untagged)]
pub enum RequestBody {
    /// Chat/completions body.
    OpenAi(OpenAiRequest),
    /// Messages body.
    Claude(ClaudeRequest),
}

impl RequestBody {
    /// Token budget carried by the body.
    pub fn max_tokens(&self) -> u32 {
        match self {
            Self::OpenAi(body) => body.max_tokens,
            Self::Claude(body) => body.max_tokens,
        }
    }
}

/// A fully rendered outbound HTTP request.
#[derive(Clone, Debug, PartialEq)]
pub struct ProviderRequest {
    /// Absolute endpoint URL.
    pub url: String,
    /// Provider-specific headers (auth, versioning). Content type is set by the client.
    pub headers: Vec<(&'static str, String)>,
    /// Body, serialized as JSON by the client.
    pub body: RequestBody,
}

impl ProviderRequest {
    /// Looks up a header value by name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Wire-level behaviour of an AI backend.
///
/// Implementations are stateless; all inputs arrive through the
/// [`ProviderConfig`] and the [`CompletionRequest`].
pub trait Provider: Send + Sync {
    /// Identifier of this provider.
    fn kind(&self) -> ProviderKind;

    /// Public API host used when no base URL is configured.
    fn default_base_url(&self) -> &'static str;

    /// Model used when none is configured.
    fn default_model(&self) -> &'static str;

    /// Renders the provider-specific request.
    fn build_request(&self, config: &ProviderConfig, request: &CompletionRequest)
        -> ProviderRequest;

    /// Extracts completion text from a 200 response body.
    fn extract_text(&self, body: &str) -> Result<CompletionResult, AiError>;
}

/// Returns the implementation registered for `kind`.
pub fn provider_for(kind: ProviderKind) -> &'static dyn Provider {
    match kind {
        ProviderKind::OpenAi => &OpenAiProvider,
        ProviderKind::Claude => &ClaudeProvider,
    }
}

/// Validates a raw HTTP response and extracts its completion text.
///
/// Anything other than 200 is an [`AiError::UpstreamHttp`] carrying the body.
pub fn extract_response(
    provider: &dyn Provider,
    status: u16,
    body: &str,
) -> Result<CompletionResult, AiError> {
    if status != 200 {
        return Err(AiError::UpstreamHttp {
            provider: provider.kind(),
            status,
            body: body.to_string(),
        });
    }

    let result = provider.extract_text(body);
    if let Ok(ref completion) = result {
        debug!(
            response_len = completion.text.len(),
            "Successfully extracted text content from {} API response",
            provider.kind()
        );
    }
    result
}

/// Joins a base URL and an endpoint path, tolerating a trailing slash.
pub(crate) fn endpoint_url(base_url: &str, path: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!(ProviderKind::parse("OpenAI"), Some(ProviderKind::OpenAi));
        assert_eq!(ProviderKind::parse(" claude "), Some(ProviderKind::Claude));
        assert_eq!(ProviderKind::parse("gemini"), None);
        assert_eq!(ProviderKind::parse(""), None);
    }

    #[test]
    fn registry_returns_matching_kind() {
        for kind in ProviderKind::ALL {
            assert_eq!(provider_for(kind).kind(), kind);
            assert_eq!(ProviderKind::parse(kind.id()), Some(kind));
        }
    }

    #[test]
    fn non_200_is_upstream_error_for_every_provider() {
        for kind in ProviderKind::ALL {
            let err = extract_response(provider_for(kind), 500, "boom").unwrap_err();
            assert_eq!(err.status(), Some(500));
            match err {
                AiError::UpstreamHttp { provider, body, .. } => {
                    assert_eq!(provider, kind);
                    assert_eq!(body, "boom");
                }
                other => panic!("unexpected error: {other:?}"),
            }
        }
    }

    #[test]
    fn created_status_is_not_success() {
        let err = extract_response(provider_for(ProviderKind::OpenAi), 201, "{}").unwrap_err();
        assert_eq!(err.status(), Some(201));
    }

    #[test]
    fn endpoint_url_strips_trailing_slash() {
        assert_eq!(
            endpoint_url("http://localhost:8080/", "/v1/messages"),
            "http://localhost:8080/v1/messages"
        );
        assert_eq!(
            endpoint_url("https://api.openai.com", "/v1/chat/completions"),
            "https://api.openai.com/v1/chat/completions"
        );
    }
}
