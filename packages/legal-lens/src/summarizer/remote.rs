//! Remote model summarizer with rate-limit backoff.

use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, warn};

use super::prompts::summary_prompt;
use super::retry::RetryPolicy;
use super::Summarizer;
use crate::error::{BackendError, RemoteError, RemoteResult};
use crate::traits::backend::{ChatBackend, CompletionRequest, Sleeper, TokioSleeper};
use crate::types::config::RemoteConfig;
use crate::types::summary::{ExtractedText, SummaryOrigin, SummaryResult};

/// Summarizes through a chat-completion backend.
///
/// Without a backend (no credential) every call returns
/// [`RemoteError::MissingCredential`] and nothing is sent.
pub struct RemoteSummarizer {
    backend: Option<Arc<dyn ChatBackend>>,
    sleeper: Arc<dyn Sleeper>,
    model: String,
    max_tokens: u32,
    temperature: f32,
    retry: RetryPolicy,
}

impl RemoteSummarizer {
    /// Summarizer over an explicit backend.
    pub fn new(backend: Arc<dyn ChatBackend>, config: &RemoteConfig) -> Self {
        Self {
            backend: Some(backend),
            ..Self::without_backend(config)
        }
    }

    /// Summarizer with no credential; always reports
    /// [`RemoteError::MissingCredential`].
    pub fn without_backend(config: &RemoteConfig) -> Self {
        Self {
            backend: None,
            sleeper: Arc::new(TokioSleeper),
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
            retry: config.retry,
        }
    }

    /// OpenAI-backed summarizer, or one without a backend when the config
    /// has no API key.
    #[cfg(feature = "openai")]
    pub fn from_config(config: &RemoteConfig) -> Self {
        match crate::ai::OpenAIBackend::from_config(config) {
            Some(backend) => Self::new(Arc::new(backend), config),
            None => Self::without_backend(config),
        }
    }

    /// Replace the timer used for backoff.
    pub fn with_sleeper(mut self, sleeper: Arc<dyn Sleeper>) -> Self {
        self.sleeper = sleeper;
        self
    }

    fn request_for(&self, text: &ExtractedText) -> CompletionRequest {
        CompletionRequest {
            model: self.model.clone(),
            prompt: summary_prompt(text.as_str()),
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        }
    }

    /// Send `request`, waiting `delay_for(attempt)` after each rate-limited
    /// attempt. Any other failure returns at once.
    async fn complete_with_retry(
        &self,
        backend: &dyn ChatBackend,
        request: &CompletionRequest,
    ) -> RemoteResult<Value> {
        let max_attempts = self.retry.max_attempts;

        for attempt in 1..=max_attempts {
            match backend.complete(request).await {
                Ok(body) => {
                    debug!(attempt, model = %request.model, "Remote completion succeeded");
                    return Ok(body);
                }
                Err(BackendError::RateLimited) => {
                    let delay = self.retry.delay_for(attempt);
                    warn!(
                        attempt,
                        max_attempts,
                        delay_ms = delay.as_millis() as u64,
                        "Rate limited by remote model, backing off"
                    );
                    self.sleeper.sleep(delay).await;
                }
                Err(BackendError::Transport(message)) => {
                    return Err(RemoteError::Transport(message));
                }
            }
        }

        Err(RemoteError::RateLimitExhausted {
            attempts: max_attempts,
        })
    }
}

#[async_trait]
impl Summarizer for RemoteSummarizer {
    async fn summarize(&self, text: &ExtractedText) -> RemoteResult<SummaryResult> {
        let backend = self
            .backend
            .as_deref()
            .ok_or(RemoteError::MissingCredential)?;

        let request = self.request_for(text);
        let body = self.complete_with_retry(backend, &request).await?;

        Ok(parse_summary(&body))
    }

    fn origin(&self) -> SummaryOrigin {
        SummaryOrigin::Remote
    }
}

/// Read the summary out of a chat-completion body.
///
/// Any shape problem yields [`SummaryResult::degraded`] rather than an error;
/// callers decide whether a degraded result is usable.
pub fn parse_summary(body: &Value) -> SummaryResult {
    match try_parse_summary(body) {
        Ok(summary) => summary,
        Err(e) => {
            warn!(error = %e, "Could not parse remote summary, using placeholder");
            SummaryResult::degraded()
        }
    }
}

fn try_parse_summary(body: &Value) -> RemoteResult<SummaryResult> {
    let content = body
        .pointer("/choices/0/message/content")
        .and_then(Value::as_str)
        .ok_or_else(|| {
            RemoteError::MalformedResponse("no choices[0].message.content string".into())
        })?;

    let json = strip_code_fence(content);
    if json.is_empty() {
        return Err(RemoteError::MalformedResponse("empty message content".into()));
    }

    let summary: SummaryResult =
        serde_json::from_str(json).map_err(|e| RemoteError::MalformedResponse(e.to_string()))?;

    Ok(summary.with_key_point_cap())
}

/// Remove a surrounding Markdown code fence, if any.
fn strip_code_fence(content: &str) -> &str {
    let trimmed = content.trim();
    let inner = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .unwrap_or(trimmed);
    inner.strip_suffix("```").unwrap_or(inner).trim()
}
