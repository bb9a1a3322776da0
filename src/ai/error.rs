//! Error taxonomy for AI completion calls.

use thiserror::Error;

use crate::ai::provider::ProviderKind;

/// Errors raised while resolving a provider or completing a request.
///
/// Every variant is terminal for the call that produced it; nothing is
/// retried internally.
#[derive(Error, Debug)]
pub enum AiError {
    /// Missing or invalid configuration (API key, provider, numeric setting).
    #[error("{0}")]
    Configuration(String),

    /// The provider could not be reached (timeout, DNS, connection reset).
    #[error("{provider} API request failed: {source}")]
    Transport {
        /// Provider the request was addressed to.
        provider: ProviderKind,
        /// Underlying HTTP client error.
        #[source]
        source: reqwest::Error,
    },

    /// The provider answered with a non-200 status.
    #[error("{provider} API request failed with status code {status}: {body}")]
    UpstreamHttp {
        /// Provider that answered.
        provider: ProviderKind,
        /// HTTP status code.
        status: u16,
        /// Raw response body, kept for diagnostics.
        body: String,
    },

    /// The provider answered 200 but no usable text could be extracted.
    #[error("{provider} API returned an empty response")]
    EmptyCompletion {
        /// Provider that answered.
        provider: ProviderKind,
    },
}

impl AiError {
    /// Returns the upstream HTTP status code, if this is an [`AiError::UpstreamHttp`].
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::UpstreamHttp { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns `true` for configuration failures, which never touch the network.
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }
}
