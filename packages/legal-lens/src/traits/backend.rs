//! Remote model access and timer traits.

use async_trait::async_trait;
use std::time::Duration;

use crate::error::BackendError;

/// One chat-completion request, as the remote summarizer builds it.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub model: String,
    pub prompt: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

/// Sends a single chat-completion request.
///
/// Returns the raw response body; the caller validates its shape.
/// Implementations must report HTTP 429 as [`BackendError::RateLimited`]
/// and must not retry on their own.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    async fn complete(&self, request: &CompletionRequest)
        -> Result<serde_json::Value, BackendError>;
}

/// Suspends the current task, used for backoff delays.
#[async_trait]
pub trait Sleeper: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

/// Real timer backed by `tokio::time::sleep`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}
