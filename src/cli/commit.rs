//! `commit` command: generate a commit message for the staged changes.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;

use crate::ai::{AiConfig, CompletionClient};
use crate::cli::{enter_working_dir, prompt};
use crate::utils::check_ai_command_prerequisites;

/// Generates an AI-powered commit message based on your staged changes.
#[derive(Parser)]
pub struct CommitCommand {
    /// Commit with this message instead of generating one.
    #[arg(short, long)]
    pub message: Option<String>,

    /// Use the generated message without asking for confirmation.
    #[arg(short, long)]
    pub yes: bool,

    /// AI model to use (overrides environment configuration).
    #[arg(long)]
    pub model: Option<String>,

    /// Run as if started in this directory.
    #[arg(long, value_name = "DIR")]
    pub working_dir: Option<PathBuf>,
}

impl CommitCommand {
    /// Executes the commit command.
    pub async fn execute(self) -> Result<()> {
        enter_working_dir(self.working_dir.as_deref())?;
        let repo = check_ai_command_prerequisites()?;

        if !repo.has_staged_changes()? {
            bail!("No staged changes found. Please stage your changes with `git add` first.");
        }

        if let Some(message) = self.message {
            repo.commit_with_message(&message)?;
            println!("✅ Changes committed successfully!");
            return Ok(());
        }

        let config = AiConfig::from_env()?.with_model_override(self.model);
        let client = CompletionClient::new(&config)?;

        let diff = repo.staged_diff()?;
        if diff.trim().is_empty() {
            bail!("No changes detected in staged files.");
        }

        eprintln!(
            "Analyzing your changes with {} ({})...",
            client.provider(),
            client.config().model
        );
        let generated = client
            .generate_commit_message(&diff)
            .await
            .context("Error generating commit message")?;

        println!("Generated commit message:\n\n{generated}\n");

        let accepted =
            self.yes || prompt::confirm("Do you want to use this commit message?", true)?;
        let message = if accepted {
            generated.text
        } else {
            let edited = prompt::ask("Enter your preferred commit message")?;
            if edited.is_empty() {
                bail!("Commit aborted.");
            }
            edited
        };

        repo.commit_with_message(&message)?;
        println!("✅ Changes committed successfully!");
        Ok(())
    }
}
