//! Testing utilities including mock implementations.
//!
//! These let applications exercise the pipeline without network access or
//! real backoff delays.

use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, RwLock};
use std::time::Duration;

use crate::error::{BackendError, FetchError, FetchResult, RemoteResult};
use crate::summarizer::Summarizer;
use crate::traits::{
    backend::{ChatBackend, CompletionRequest, Sleeper},
    fetcher::DocumentFetcher,
};
use crate::types::summary::{ExtractedText, SummaryOrigin, SummaryResult};

/// Wrap `content` in a minimal chat-completion response body.
pub fn chat_body(content: &str) -> Value {
    json!({
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": content },
            "finish_reason": "stop"
        }]
    })
}

/// A mock fetcher serving predefined pages.
///
/// Unknown URLs answer with HTTP 404.
#[derive(Default)]
pub struct MockFetcher {
    pages: Arc<RwLock<HashMap<String, String>>>,
    calls: Arc<RwLock<Vec<String>>>,
}

impl MockFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `markup` for `url`.
    pub fn with_page(self, url: impl Into<String>, markup: impl Into<String>) -> Self {
        self.pages.write().unwrap().insert(url.into(), markup.into());
        self
    }

    /// URLs fetched so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.read().unwrap().clone()
    }
}

#[async_trait]
impl DocumentFetcher for MockFetcher {
    async fn fetch(&self, url: &str) -> FetchResult<String> {
        self.calls.write().unwrap().push(url.to_string());

        self.pages
            .read()
            .unwrap()
            .get(url)
            .cloned()
            .ok_or_else(|| FetchError::Status {
                url: url.to_string(),
                status: 404,
            })
    }

    fn name(&self) -> &str {
        "mock"
    }
}

/// A mock chat backend replaying queued outcomes.
///
/// Each call pops the next outcome; an empty queue answers with a transport
/// error.
#[derive(Default)]
pub struct MockChatBackend {
    outcomes: Arc<RwLock<VecDeque<Result<Value, BackendError>>>>,
    requests: Arc<RwLock<Vec<CompletionRequest>>>,
}

impl MockChatBackend {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(self, outcome: Result<Value, BackendError>) -> Self {
        self.outcomes.write().unwrap().push_back(outcome);
        self
    }

    /// Queue a raw response body.
    pub fn with_response(self, body: Value) -> Self {
        self.push(Ok(body))
    }

    /// Queue a well-formed response carrying `summary`.
    pub fn with_summary(self, summary: &SummaryResult) -> Self {
        let content = serde_json::to_string(summary).unwrap();
        self.with_response(chat_body(&content))
    }

    /// Queue an HTTP 429.
    pub fn with_rate_limit(self) -> Self {
        self.push(Err(BackendError::RateLimited))
    }

    /// Queue a non-retryable failure.
    pub fn with_transport_error(self, message: impl Into<String>) -> Self {
        self.push(Err(BackendError::Transport(message.into())))
    }

    /// Requests received so far.
    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.read().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.read().unwrap().len()
    }
}

#[async_trait]
impl ChatBackend for MockChatBackend {
    async fn complete(&self, request: &CompletionRequest) -> Result<Value, BackendError> {
        self.requests.write().unwrap().push(request.clone());

        self.outcomes
            .write()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(BackendError::Transport("no mock response queued".into())))
    }
}

/// A sleeper that records requested delays and returns immediately.
#[derive(Default)]
pub struct RecordingSleeper {
    durations: Arc<RwLock<Vec<Duration>>>,
}

impl RecordingSleeper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delays requested so far, in order.
    pub fn durations(&self) -> Vec<Duration> {
        self.durations.read().unwrap().clone()
    }
}

#[async_trait]
impl Sleeper for RecordingSleeper {
    async fn sleep(&self, duration: Duration) {
        self.durations.write().unwrap().push(duration);
    }
}

/// A summarizer returning a fixed outcome and counting calls.
pub struct MockSummarizer {
    outcome: Box<dyn Fn() -> RemoteResult<SummaryResult> + Send + Sync>,
    calls: Arc<RwLock<usize>>,
}

impl MockSummarizer {
    /// Always succeed with `summary`.
    pub fn returning(summary: SummaryResult) -> Self {
        Self::with_outcome(move || Ok(summary.clone()))
    }

    /// Produce each result from `outcome`.
    pub fn with_outcome(
        outcome: impl Fn() -> RemoteResult<SummaryResult> + Send + Sync + 'static,
    ) -> Self {
        Self {
            outcome: Box::new(outcome),
            calls: Arc::new(RwLock::new(0)),
        }
    }

    pub fn call_count(&self) -> usize {
        *self.calls.read().unwrap()
    }
}

#[async_trait]
impl Summarizer for MockSummarizer {
    async fn summarize(&self, _text: &ExtractedText) -> RemoteResult<SummaryResult> {
        *self.calls.write().unwrap() += 1;
        (self.outcome)()
    }

    fn origin(&self) -> SummaryOrigin {
        SummaryOrigin::Remote
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_backend_replays_in_order() {
        let backend = MockChatBackend::new()
            .with_rate_limit()
            .with_response(chat_body("{}"));
        let request = CompletionRequest {
            model: "m".into(),
            prompt: "p".into(),
            max_tokens: 1,
            temperature: 0.0,
        };

        assert!(matches!(
            backend.complete(&request).await,
            Err(BackendError::RateLimited)
        ));
        assert!(backend.complete(&request).await.is_ok());
        assert!(matches!(
            backend.complete(&request).await,
            Err(BackendError::Transport(_))
        ));
        assert_eq!(backend.call_count(), 3);
    }

    #[tokio::test]
    async fn test_recording_sleeper_does_not_wait() {
        let sleeper = RecordingSleeper::new();
        sleeper.sleep(Duration::from_secs(3600)).await;
        assert_eq!(sleeper.durations(), vec![Duration::from_secs(3600)]);
    }
}
