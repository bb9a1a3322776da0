//! `pr-summary` command: describe the commits between two branches.

use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use arboard::Clipboard;
use clap::Parser;

use crate::ai::{AiConfig, CompletionClient};
use crate::cli::enter_working_dir;
use crate::utils::check_ai_command_prerequisites;

/// Generates an AI-powered PR summary based on commits between branches.
#[derive(Parser)]
pub struct PrSummaryCommand {
    /// Base branch (default: current branch).
    pub base: Option<String>,

    /// Head branch (default: current branch).
    pub head: Option<String>,

    /// Generate a release summary for merging to the main branch.
    #[arg(long)]
    pub main: bool,

    /// Copy the summary to the clipboard (on Linux, waits until it is pasted).
    #[arg(long)]
    pub copy: bool,

    /// Save the summary to this file.
    #[arg(long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// AI model to use (overrides environment configuration).
    #[arg(long)]
    pub model: Option<String>,

    /// Run as if started in this directory.
    #[arg(long, value_name = "DIR")]
    pub working_dir: Option<PathBuf>,
}

impl PrSummaryCommand {
    /// Executes the pr-summary command.
    pub async fn execute(self) -> Result<()> {
        enter_working_dir(self.working_dir.as_deref())?;
        let repo = check_ai_command_prerequisites()?;

        let config = AiConfig::from_env()?.with_model_override(self.model);
        let client = CompletionClient::new(&config)?;

        let (base, head) = match (self.base, self.head) {
            (Some(base), Some(head)) => (base, head),
            (base, head) => {
                let current = repo.get_current_branch()?;
                (
                    base.unwrap_or_else(|| current.clone()),
                    head.unwrap_or(current),
                )
            }
        };

        eprintln!("Generating PR summary for changes between {base} and {head}...");

        let commits = repo.commit_log(&base, &head)?;
        if commits.trim().is_empty() {
            bail!("No commits found between {base} and {head}.");
        }

        if self.main {
            eprintln!("Generating summary for main branch merge...");
        }

        let summary = client
            .generate_pr_summary(&commits, self.main)
            .await
            .context("Error generating PR summary")?;

        println!("\n{summary}\n");

        if let Some(path) = self.output {
            fs::write(&path, &summary.text)
                .with_context(|| format!("Failed to write summary to {}", path.display()))?;
            eprintln!("✅ Summary saved to {}", path.display());
        }

        if self.copy {
            copy_to_clipboard(&summary.text)?;
            eprintln!("✅ Summary copied to clipboard!");
        }

        Ok(())
    }
}

/// Copies text to the system clipboard.
///
/// On Linux the selection is served by this process, so the call blocks
/// until another client (a paste or a clipboard manager) takes ownership.
fn copy_to_clipboard(text: &str) -> Result<()> {
    let mut clipboard = Clipboard::new().context("Clipboard unavailable")?;

    #[cfg(target_os = "linux")]
    {
        use arboard::SetExtLinux;

        eprintln!("Waiting for the clipboard contents to be pasted or picked up...");
        clipboard
            .set()
            .wait()
            .text(text)
            .context("Failed to copy summary to clipboard")?;
    }

    #[cfg(not(target_os = "linux"))]
    clipboard
        .set_text(text)
        .context("Failed to copy summary to clipboard")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::thread;
    use std::time::Duration;

    use super::*;

    #[test]
    #[ignore = "needs a display server"]
    fn copied_text_outlives_the_copy_call() {
        let owner = thread::spawn(|| copy_to_clipboard("## Summary\n\n- feat: x"));
        thread::sleep(Duration::from_millis(200));

        let mut reader = Clipboard::new().unwrap();
        assert_eq!(reader.get_text().unwrap(), "## Summary\n\n- feat: x");

        // Taking ownership releases the waiting copy.
        reader.set_text("released").unwrap();
        owner.join().unwrap().unwrap();
    }
}
