//! Provider configuration and resolution.
//!
//! Raw settings are collected once per process into an [`AiConfig`] and
//! resolved into a single typed [`ProviderConfig`] when the client is built.

use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

use reqwest::header::HeaderValue;
use tracing::warn;

use crate::ai::error::AiError;
use crate::ai::prompts::PromptTemplates;
use crate::ai::provider::{provider_for, ProviderKind};
use crate::utils::settings::Settings;

/// Settings key selecting the active provider.
pub const PROVIDER_KEY: &str = "AI_PROVIDER";
/// Settings key overriding the commit message prompt.
pub const COMMIT_MESSAGE_PROMPT_KEY: &str = "AI_COMMIT_MESSAGE_PROMPT";
/// Settings key overriding the PR summary prompt.
pub const PR_SUMMARY_PROMPT_KEY: &str = "AI_PR_SUMMARY_PROMPT";
/// Settings key overriding the release summary prompt.
pub const PR_MAIN_SUMMARY_PROMPT_KEY: &str = "AI_PR_MAIN_SUMMARY_PROMPT";

/// Default sampling temperature.
pub const DEFAULT_TEMPERATURE: f64 = 0.7;
/// Default token budget for a commit message.
pub const DEFAULT_MAX_TOKENS: u32 = 500;
/// HTTP request timeout for AI API calls.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Resolved, validated settings for exactly one provider.
#[derive(Clone, PartialEq)]
pub struct ProviderConfig {
    /// Which backend this configuration targets.
    pub name: ProviderKind,
    api_key: String,
    /// Model identifier.
    pub model: String,
    /// Sampling temperature in `[0, 2]`.
    pub temperature: f64,
    /// Base token budget.
    pub max_tokens: u32,
    /// API base URL, without the endpoint path.
    pub base_url: String,
    /// Whole-request timeout, connect through body.
    pub timeout: Duration,
}

impl ProviderConfig {
    /// Creates a configuration with the provider's defaults.
    ///
    /// Fails with [`AiError::Configuration`] when the key is blank or
    /// cannot be sent as an HTTP header value.
    pub fn new(name: ProviderKind, api_key: impl Into<String>) -> Result<Self, AiError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(missing_key_error(name));
        }
        if HeaderValue::from_str(&api_key).is_err() {
            return Err(AiError::Configuration(format!(
                "Invalid value for {}_API_KEY: the key contains characters that cannot be sent in an HTTP header",
                name.env_prefix()
            )));
        }

        let provider = provider_for(name);
        Ok(Self {
            name,
            api_key,
            model: provider.default_model().to_string(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
            base_url: provider.default_base_url().to_string(),
            timeout: REQUEST_TIMEOUT,
        })
    }

    /// Returns the secret API key.
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Sets the model identifier.
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets the temperature, which must lie in `[0, 2]`.
    pub fn with_temperature(mut self, temperature: f64) -> Result<Self, AiError> {
        if !(0.0..=2.0).contains(&temperature) {
            return Err(AiError::Configuration(format!(
                "{} temperature must be between 0 and 2, got {temperature}",
                self.name
            )));
        }
        self.temperature = temperature;
        Ok(self)
    }

    /// Sets the base token budget, which must be positive.
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Result<Self, AiError> {
        if max_tokens == 0 {
            return Err(AiError::Configuration(format!(
                "{} max tokens must be a positive integer",
                self.name
            )));
        }
        self.max_tokens = max_tokens;
        Ok(self)
    }

    /// Points the client at a different API host.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Sets the whole-request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("name", &self.name)
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Unvalidated settings for one provider, as read from the environment.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProviderSettings {
    /// API key.
    pub api_key: Option<String>,
    /// Model identifier.
    pub model: Option<String>,
    /// Temperature, still as text.
    pub temperature: Option<String>,
    /// Token budget, still as text.
    pub max_tokens: Option<String>,
    /// API base URL.
    pub base_url: Option<String>,
}

impl ProviderSettings {
    /// Reads `<PREFIX>_API_KEY`, `<PREFIX>_MODEL`, ... through `lookup`.
    fn from_lookup<F>(kind: ProviderKind, lookup: &F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let prefix = kind.env_prefix();
        let get = |suffix: &str| lookup(&format!("{prefix}_{suffix}"));

        let api_key = match kind {
            ProviderKind::Claude => get("API_KEY").or_else(|| lookup("ANTHROPIC_API_KEY")),
            ProviderKind::OpenAi => get("API_KEY"),
        };

        Self {
            api_key,
            model: get("MODEL"),
            temperature: get("TEMPERATURE"),
            max_tokens: get("MAX_TOKENS"),
            base_url: get("BASE_URL"),
        }
    }

    /// Validates these settings into a [`ProviderConfig`].
    pub fn resolve(&self, kind: ProviderKind) -> Result<ProviderConfig, AiError> {
        let api_key = non_blank(self.api_key.as_deref()).ok_or_else(|| missing_key_error(kind))?;
        let mut config = ProviderConfig::new(kind, api_key)?;

        if let Some(model) = non_blank(self.model.as_deref()) {
            config = config.with_model(model);
        }
        if let Some(raw) = non_blank(self.temperature.as_deref()) {
            let key = format!("{}_TEMPERATURE", kind.env_prefix());
            let temperature = raw.parse::<f64>().map_err(|_| invalid_value(&key, raw))?;
            config = config
                .with_temperature(temperature)
                .map_err(|_| invalid_value(&key, raw))?;
        }
        if let Some(raw) = non_blank(self.max_tokens.as_deref()) {
            let key = format!("{}_MAX_TOKENS", kind.env_prefix());
            let max_tokens = raw.parse::<u32>().map_err(|_| invalid_value(&key, raw))?;
            config = config
                .with_max_tokens(max_tokens)
                .map_err(|_| invalid_value(&key, raw))?;
        }
        if let Some(base_url) = non_blank(self.base_url.as_deref()) {
            config = config.with_base_url(base_url);
        }

        Ok(config)
    }
}

/// All AI configuration for one process: provider selector, per-provider
/// settings and prompt templates.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AiConfig {
    /// Raw provider selector; unset means the default provider.
    pub provider: Option<String>,
    /// Settings for each known provider.
    pub providers: HashMap<ProviderKind, ProviderSettings>,
    /// System prompts.
    pub prompts: PromptTemplates,
}

impl AiConfig {
    /// Loads configuration from the environment, falling back to the
    /// settings file.
    pub fn from_env() -> Result<Self, AiError> {
        let settings = Settings::load().map_err(|e| AiError::Configuration(format!("{e:#}")))?;
        Ok(Self::from_lookup(|key| settings.get_env_var(key)))
    }

    /// Builds configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let providers = ProviderKind::ALL
            .into_iter()
            .map(|kind| (kind, ProviderSettings::from_lookup(kind, &lookup)))
            .collect();

        let defaults = PromptTemplates::default();
        let prompt = |key: &str, default: String| {
            lookup(key)
                .filter(|value| !value.trim().is_empty())
                .unwrap_or(default)
        };
        let prompts = PromptTemplates {
            commit_message: prompt(COMMIT_MESSAGE_PROMPT_KEY, defaults.commit_message),
            pr_summary: prompt(PR_SUMMARY_PROMPT_KEY, defaults.pr_summary),
            pr_main_summary: prompt(PR_MAIN_SUMMARY_PROMPT_KEY, defaults.pr_main_summary),
        };

        Self {
            provider: lookup(PROVIDER_KEY),
            providers,
            prompts,
        }
    }

    /// Returns the provider named by the selector.
    ///
    /// An unset selector and an unrecognized one both fall back to
    /// [`ProviderKind::default`]; the latter logs a warning.
    pub fn selected_provider(&self) -> ProviderKind {
        match non_blank(self.provider.as_deref()) {
            None => ProviderKind::default(),
            Some(name) => ProviderKind::parse(name).unwrap_or_else(|| {
                let fallback = ProviderKind::default();
                warn!(
                    provider = %name,
                    fallback = fallback.id(),
                    "Unrecognized {PROVIDER_KEY}, using the default provider"
                );
                fallback
            }),
        }
    }

    /// Replaces the model of the selected provider.
    #[must_use]
    pub fn with_model_override(mut self, model: Option<String>) -> Self {
        if let Some(model) = model {
            let kind = self.selected_provider();
            self.providers.entry(kind).or_default().model = Some(model);
        }
        self
    }

    /// Resolves the selected provider into a validated [`ProviderConfig`].
    pub fn resolve(&self) -> Result<ProviderConfig, AiError> {
        let kind = self.selected_provider();
        self.providers
            .get(&kind)
            .cloned()
            .unwrap_or_default()
            .resolve(kind)
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn missing_key_error(kind: ProviderKind) -> AiError {
    AiError::Configuration(format!(
        "{kind} API key is not set. Please set the {}_API_KEY environment variable.",
        kind.env_prefix()
    ))
}

fn invalid_value(key: &str, raw: &str) -> AiError {
    AiError::Configuration(format!("Invalid value for {key}: '{raw}'"))
}
