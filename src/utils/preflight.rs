//! Preflight validation checks for early failure detection.
//!
//! Commands call these before doing any work so that a missing `git`
//! binary or a wrong working directory fails with a clear message.

use std::process::Command;

use anyhow::{bail, Context, Result};

use crate::git::GitRepository;

/// Validates that the `git` binary is installed and on `PATH`.
pub fn check_git_installed() -> Result<()> {
    match Command::new("git").arg("--version").output() {
        Ok(output) if output.status.success() => Ok(()),
        _ => bail!("Git is not installed or not in your PATH."),
    }
}

/// Opens the repository at the current directory.
pub fn check_git_repository() -> Result<GitRepository> {
    GitRepository::open()
        .context("Not a Git repository. Please run this command in a Git repository.")
}

/// Combined preflight check for AI commands.
///
/// Validates:
/// - `git` availability
/// - Git repository access
pub fn check_ai_command_prerequisites() -> Result<GitRepository> {
    check_git_installed()?;
    check_git_repository()
}
