//! CLI interface for ai-git.

use std::path::Path;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

pub mod commit;
pub mod pr_summary;
pub mod prompt;

/// ai-git: AI-generated commit messages and pull request summaries.
#[derive(Parser)]
#[command(name = "ai-git")]
#[command(about = "AI-generated commit messages and pull request summaries", long_about = None)]
#[command(version)]
pub struct Cli {
    /// The main command to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Generates a commit message for the staged changes and commits.
    Commit(commit::CommitCommand),
    /// Generates a pull request summary from the commits between two branches.
    #[command(name = "pr-summary")]
    PrSummary(pr_summary::PrSummaryCommand),
}

impl Cli {
    /// Executes the CLI command.
    pub async fn execute(self) -> Result<()> {
        match self.command {
            Commands::Commit(cmd) => cmd.execute().await,
            Commands::PrSummary(cmd) => cmd.execute().await,
        }
    }
}

/// Changes the process working directory when `--working-dir` is given.
pub(crate) fn enter_working_dir(dir: Option<&Path>) -> Result<()> {
    if let Some(dir) = dir {
        std::env::set_current_dir(dir)
            .with_context(|| format!("Failed to change directory to {}", dir.display()))?;
    }
    Ok(())
}
