//! Git repository operations.

use std::path::Path;
use std::process::Command;

use anyhow::{bail, Context, Result};
use git2::{Diff, DiffFormat, ErrorCode, Repository, Sort};
use tracing::debug;

/// Git repository wrapper.
pub struct GitRepository {
    repo: Repository,
}

impl GitRepository {
    /// Opens the repository containing the current directory.
    pub fn open() -> Result<Self> {
        Self::open_at(".")
    }

    /// Opens the repository containing `path`.
    pub fn open_at<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Repository::discover(path).context("Not in a git repository")?;

        Ok(Self { repo })
    }

    /// Returns the working directory, if the repository is not bare.
    pub fn workdir(&self) -> Option<&Path> {
        self.repo.workdir()
    }

    /// Returns the current branch name.
    pub fn get_current_branch(&self) -> Result<String> {
        let head = self.repo.head().context("Failed to get HEAD reference")?;

        if let Some(name) = head.shorthand() {
            if name != "HEAD" {
                return Ok(name.to_string());
            }
        }

        bail!("Repository is in detached HEAD state")
    }

    /// Returns `true` when the index differs from HEAD.
    pub fn has_staged_changes(&self) -> Result<bool> {
        Ok(self.staged_diff_object()?.deltas().len() > 0)
    }

    /// Returns the staged changes as patch text (`git diff --cached`).
    ///
    /// The result is empty when nothing is staged.
    pub fn staged_diff(&self) -> Result<String> {
        let diff = self.staged_diff_object()?;

        let mut patch = String::new();
        diff.print(DiffFormat::Patch, |_delta, _hunk, line| {
            let content = std::str::from_utf8(line.content()).unwrap_or("<binary>\n");
            if matches!(line.origin(), '+' | '-' | ' ') {
                patch.push(line.origin());
            }
            patch.push_str(content);
            true
        })
        .context("Failed to format staged diff")?;

        debug!(diff_len = patch.len(), "Collected staged diff");
        Ok(patch)
    }

    /// Returns the log of commits reachable from `head` but not from `base`,
    /// newest first, one `"<short hash> <subject>\n<body>"` entry per commit.
    pub fn commit_log(&self, base: &str, head: &str) -> Result<String> {
        let base_commit = self
            .repo
            .revparse_single(base)
            .and_then(|obj| obj.peel_to_commit())
            .with_context(|| format!("Failed to resolve base reference: {base}"))?;
        let head_commit = self
            .repo
            .revparse_single(head)
            .and_then(|obj| obj.peel_to_commit())
            .with_context(|| format!("Failed to resolve head reference: {head}"))?;

        let mut walker = self.repo.revwalk().context("Failed to create revwalk")?;
        walker
            .set_sorting(Sort::TOPOLOGICAL | Sort::TIME)
            .context("Failed to configure revwalk")?;
        walker
            .push(head_commit.id())
            .context("Failed to push head commit")?;
        walker
            .hide(base_commit.id())
            .context("Failed to hide base commit")?;

        let mut entries = Vec::new();
        for oid in walker {
            let oid = oid.context("Failed to get commit OID from walker")?;
            let commit = self
                .repo
                .find_commit(oid)
                .context("Failed to find commit")?;
            let short = commit
                .as_object()
                .short_id()
                .context("Failed to abbreviate commit id")?;

            entries.push(format!(
                "{} {}\n{}",
                short.as_str().unwrap_or_default(),
                commit.summary().unwrap_or_default(),
                commit.body().unwrap_or_default().trim_end()
            ));
        }

        debug!(commit_count = entries.len(), %base, %head, "Collected commit log");
        Ok(entries.join("\n"))
    }

    /// Commits the index with `message` through the `git` CLI so hooks run.
    pub fn commit_with_message(&self, message: &str) -> Result<()> {
        let workdir = self
            .workdir()
            .context("Cannot commit in a bare repository")?;

        let output = Command::new("git")
            .args(["commit", "-m", message])
            .current_dir(workdir)
            .output()
            .context("Failed to run git commit")?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let stdout = String::from_utf8_lossy(&output.stdout);
            let detail = if stderr.trim().is_empty() {
                stdout.trim().to_string()
            } else {
                stderr.trim().to_string()
            };
            bail!("git commit failed: {detail}");
        }

        Ok(())
    }

    /// Diff between the HEAD tree and the index; an unborn HEAD diffs
    /// against the empty tree.
    fn staged_diff_object(&self) -> Result<Diff<'_>> {
        let head_tree = match self.repo.head() {
            Ok(head) => Some(head.peel_to_tree().context("Failed to get HEAD tree")?),
            Err(e) if matches!(e.code(), ErrorCode::UnbornBranch | ErrorCode::NotFound) => None,
            Err(e) => return Err(e).context("Failed to get HEAD reference"),
        };

        self.repo
            .diff_tree_to_index(head_tree.as_ref(), None, None)
            .context("Failed to diff HEAD against the index")
    }
}
