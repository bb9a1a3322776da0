//! Completion client: the single dispatch point for every AI call.

use reqwest::Client;
use tracing::{debug, info};

use crate::ai::completion::{CompletionRequest, CompletionResult};
use crate::ai::config::{AiConfig, ProviderConfig};
use crate::ai::error::AiError;
use crate::ai::prompts::PromptTemplates;
use crate::ai::provider::{extract_response, provider_for, Provider, ProviderKind};

/// PR summaries get this multiple of the configured token budget.
pub const PR_SUMMARY_BUDGET_FACTOR: u32 = 2;

/// Client bound to one resolved provider.
pub struct CompletionClient {
    http: Client,
    config: ProviderConfig,
    provider: &'static dyn Provider,
    prompts: PromptTemplates,
}

impl CompletionClient {
    /// Resolves the configured provider and builds a client for it.
    ///
    /// Configuration problems (for example a missing API key) are reported
    /// here, before any request is made.
    pub fn new(config: &AiConfig) -> Result<Self, AiError> {
        let provider_config = config.resolve()?;
        Self::with_provider_config(provider_config, config.prompts.clone())
    }

    /// Builds a client from an already resolved provider configuration.
    ///
    /// The API key was validated when `config` was constructed.
    pub fn with_provider_config(
        config: ProviderConfig,
        prompts: PromptTemplates,
    ) -> Result<Self, AiError> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|source| AiError::Transport {
                provider: config.name,
                source,
            })?;

        Ok(Self {
            http,
            provider: provider_for(config.name),
            config,
            prompts,
        })
    }

    /// Provider this client talks to.
    pub fn provider(&self) -> ProviderKind {
        self.config.name
    }

    /// Resolved provider configuration.
    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }

    /// Request used by [`generate_commit_message`](Self::generate_commit_message).
    pub fn commit_message_request(&self, diff: &str) -> CompletionRequest {
        CompletionRequest::new(self.prompts.commit_message.as_str(), diff)
    }

    /// Request used by [`generate_pr_summary`](Self::generate_pr_summary).
    pub fn pr_summary_request(&self, commits: &str, is_main_branch_merge: bool) -> CompletionRequest {
        let budget = self
            .config
            .max_tokens
            .saturating_mul(PR_SUMMARY_BUDGET_FACTOR);
        CompletionRequest::new(self.prompts.pr_template(is_main_branch_merge), commits)
            .with_max_tokens(budget)
    }

    /// Generates a commit message for a staged diff.
    pub async fn generate_commit_message(&self, diff: &str) -> Result<CompletionResult, AiError> {
        self.complete(&self.commit_message_request(diff)).await
    }

    /// Generates a pull request description from a commit log.
    ///
    /// `is_main_branch_merge` selects the release summary template.
    pub async fn generate_pr_summary(
        &self,
        commits: &str,
        is_main_branch_merge: bool,
    ) -> Result<CompletionResult, AiError> {
        self.complete(&self.pr_summary_request(commits, is_main_branch_merge))
            .await
    }

    /// Sends one request to the configured provider and extracts the text.
    pub async fn complete(&self, request: &CompletionRequest) -> Result<CompletionResult, AiError> {
        let kind = self.provider.kind();
        let rendered = self.provider.build_request(&self.config, request);

        debug!(
            system_prompt_len = request.system_prompt.len(),
            user_content_len = request.user_content.len(),
            model = %self.config.model,
            "Preparing {kind} API request"
        );
        info!(
            url = %rendered.url,
            model = %self.config.model,
            max_tokens = request.effective_max_tokens(self.config.max_tokens),
            "Sending request to {kind} API"
        );

        let mut builder = self.http.post(&rendered.url);
        for (name, value) in &rendered.headers {
            builder = builder.header(*name, value);
        }

        let transport = |source: reqwest::Error| AiError::Transport {
            provider: kind,
            source,
        };
        let response = builder
            .json(&rendered.body)
            .send()
            .await
            .map_err(transport)?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(transport)?;

        debug!(status, body_len = body.len(), "Received {kind} API response");

        extract_response(self.provider, status, &body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::prompts::{PR_MAIN_SUMMARY_PROMPT, PR_SUMMARY_PROMPT};

    fn client(kind: ProviderKind) -> CompletionClient {
        let config = ProviderConfig::new(kind, "key")
            .unwrap()
            .with_max_tokens(400)
            .unwrap();
        CompletionClient::with_provider_config(config, PromptTemplates::default()).unwrap()
    }

    #[test]
    fn pr_summary_doubles_budget_and_picks_template() {
        let client = client(ProviderKind::Claude);

        let release = client.pr_summary_request("log", true);
        assert_eq!(release.system_prompt, PR_MAIN_SUMMARY_PROMPT);
        assert_eq!(release.max_tokens_override, Some(800));

        let regular = client.pr_summary_request("log", false);
        assert_eq!(regular.system_prompt, PR_SUMMARY_PROMPT);
        assert_eq!(regular.max_tokens_override, Some(800));
        assert_eq!(regular.user_content, "log");
    }

    #[test]
    fn commit_request_uses_base_budget() {
        let client = client(ProviderKind::OpenAi);
        let request = client.commit_message_request("diff");
        assert_eq!(request.max_tokens_override, None);
        assert_eq!(request.effective_max_tokens(client.config().max_tokens), 400);
    }

    #[test]
    fn missing_key_fails_before_building_http_client() {
        let err = CompletionClient::new(&AiConfig::default()).err().unwrap();
        assert!(err.is_configuration());
    }
}
