//! Configuration for the remote summarizer.

use std::fmt;

use crate::security::SecretString;
use crate::summarizer::retry::RetryPolicy;

/// Environment variable holding the model API key.
pub const ENV_API_KEY: &str = "OPENAI_API_KEY";

/// Environment variable overriding the model name.
pub const ENV_MODEL: &str = "LEGAL_LENS_MODEL";

/// Environment variable overriding the API root.
pub const ENV_API_BASE: &str = "LEGAL_LENS_API_BASE";

pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";
pub const DEFAULT_MAX_TOKENS: u32 = 1000;
pub const DEFAULT_TEMPERATURE: f32 = 0.3;

/// Settings for calling the remote chat-completion endpoint.
///
/// Without an API key the remote path is skipped and every document is
/// summarized by the rule engine.
#[derive(Clone)]
pub struct RemoteConfig {
    /// Bearer credential (secret)
    pub api_key: Option<SecretString>,

    /// Model identifier
    pub model: String,

    /// API root, without the `/chat/completions` suffix
    pub base_url: String,

    /// Completion token budget
    pub max_tokens: u32,

    /// Sampling temperature
    pub temperature: f32,

    /// Rate-limit retry policy
    pub retry: RetryPolicy,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_API_BASE.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
            retry: RetryPolicy::default(),
        }
    }
}

impl RemoteConfig {
    /// Create a new config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using an arbitrary variable lookup.
    ///
    /// Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let mut config = Self::default();
        if let Some(key) = read(ENV_API_KEY) {
            config.api_key = Some(SecretString::new(key));
        }
        if let Some(model) = read(ENV_MODEL) {
            config.model = model;
        }
        if let Some(base) = read(ENV_API_BASE) {
            config.base_url = base;
        }
        config
    }

    /// Set the API key.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(SecretString::new(api_key));
        self
    }

    /// Set the model.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the API root.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Whether a credential is configured.
    pub fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }
}

impl fmt::Debug for RemoteConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RemoteConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("max_tokens", &self.max_tokens)
            .field("temperature", &self.temperature)
            .field("retry", &self.retry)
            .finish()
    }
}
