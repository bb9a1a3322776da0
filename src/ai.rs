//! AI completion client for commit messages and pull request summaries.
//!
//! A [`CompletionClient`] is built once from an [`AiConfig`], resolves one
//! [`Provider`](provider::Provider) and sends every request through
//! [`CompletionClient::complete`].

pub mod client;
pub mod completion;
pub mod config;
pub mod error;
pub mod prompts;
pub mod provider;

pub use client::CompletionClient;
pub use completion::{CompletionRequest, CompletionResult};
pub use config::{AiConfig, ProviderConfig, ProviderSettings};
pub use error::AiError;
pub use prompts::PromptTemplates;
pub use provider::{provider_for, ProviderKind};
