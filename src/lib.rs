//! # ai-git
//!
//! AI-generated commit messages and pull request summaries.
//!
//! The [`ai`] module holds the completion client: it resolves one provider
//! (OpenAI or Claude) from configuration, renders that provider's request,
//! and turns the HTTP response into plain text. [`git`] and [`cli`] are the
//! thin layers that feed it diffs and commit logs.
//!
//! ## Quick Start
//!
//! ```no_run
//! use ai_git::ai::{AiConfig, CompletionClient};
//!
//! # async fn run() -> Result<(), ai_git::ai::AiError> {
//! let client = CompletionClient::new(&AiConfig::from_env()?)?;
//! let message = client.generate_commit_message("diff --git a/x b/x").await?;
//! println!("{message}");
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod ai;
pub mod cli;
pub mod git;
pub mod utils;

pub use crate::cli::Cli;

/// The current version of ai-git.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
