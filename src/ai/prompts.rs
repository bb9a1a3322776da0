//! System prompt templates for the two generation intents.

/// Default system prompt for commit message generation.
pub const COMMIT_MESSAGE_PROMPT: &str = "Generate a clear, conventional commit message based on the following git diff. \
Follow the Conventional Commits specification (https://www.conventionalcommits.org/). \
The message should have a type (feat, fix, docs, style, refactor, perf, test, chore), \
an optional scope, and a concise description. \
If there are breaking changes, include a '!' after the type/scope. \
Keep the message under 100 characters. \
Return ONLY the commit message without any additional text or formatting.";

/// Default system prompt for a regular pull request description.
pub const PR_SUMMARY_PROMPT: &str = "Generate a comprehensive pull request description based on the following commits. \
Include: \n\
1. A clear title summarizing the changes\n\
2. A brief overview of what was changed and why\n\
3. A bulleted list of key changes\n\
4. Any breaking changes or important notes for reviewers\n\
Format the response in Markdown.";

/// Default system prompt for a release summary when merging to main.
pub const PR_MAIN_SUMMARY_PROMPT: &str = "Generate a comprehensive release summary for merging to the main branch. \
Based on the following list of merged PRs, create: \n\
1. A clear release title\n\
2. A summary of the major changes in this release\n\
3. A categorized list of changes (Features, Bug Fixes, Performance, etc.)\n\
4. Include links to all the merged PRs\n\
Format the response in Markdown.";

/// The set of system prompts used by the completion client.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PromptTemplates {
    /// Prompt for commit messages.
    pub commit_message: String,
    /// Prompt for regular PR descriptions.
    pub pr_summary: String,
    /// Prompt for release / merge-to-main summaries.
    pub pr_main_summary: String,
}

impl Default for PromptTemplates {
    fn default() -> Self {
        Self {
            commit_message: COMMIT_MESSAGE_PROMPT.to_string(),
            pr_summary: PR_SUMMARY_PROMPT.to_string(),
            pr_main_summary: PR_MAIN_SUMMARY_PROMPT.to_string(),
        }
    }
}

impl PromptTemplates {
    /// Picks the PR template for the kind of merge being summarized.
    pub fn pr_template(&self, is_main_branch_merge: bool) -> &str {
        if is_main_branch_merge {
            &self.pr_main_summary
        } else {
            &self.pr_summary
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pr_template_follows_merge_flag() {
        let prompts = PromptTemplates::default();
        assert_eq!(prompts.pr_template(true), PR_MAIN_SUMMARY_PROMPT);
        assert_eq!(prompts.pr_template(false), PR_SUMMARY_PROMPT);
    }

    #[test]
    fn default_prompts_are_distinct() {
        let prompts = PromptTemplates::default();
        assert_ne!(prompts.commit_message, prompts.pr_summary);
        assert_ne!(prompts.pr_summary, prompts.pr_main_summary);
        assert!(prompts.pr_main_summary.contains("release"));
    }
}
