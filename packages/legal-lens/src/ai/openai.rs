//! OpenAI implementation of the chat backend.
//!
//! # Example
//!
//! ```rust,ignore
//! use legal_lens::ai::OpenAIBackend;
//!
//! let backend = OpenAIBackend::new(OpenAIClient::new("sk-..."));
//! let remote = RemoteSummarizer::new(Arc::new(backend), &config);
//! ```

use async_trait::async_trait;
use openai_client::{ChatRequest, Message, OpenAIClient, OpenAIError};
use serde_json::Value;

use crate::error::BackendError;
use crate::traits::backend::{ChatBackend, CompletionRequest};
use crate::types::config::RemoteConfig;

/// [`ChatBackend`] over [`OpenAIClient`].
#[derive(Clone)]
pub struct OpenAIBackend {
    client: OpenAIClient,
}

impl OpenAIBackend {
    pub fn new(client: OpenAIClient) -> Self {
        Self { client }
    }

    /// Build from config; `None` when no API key is set.
    pub fn from_config(config: &RemoteConfig) -> Option<Self> {
        let api_key = config.api_key.as_ref()?;
        let client = OpenAIClient::new(api_key.expose()).with_base_url(&config.base_url);
        Some(Self::new(client))
    }

    pub fn base_url(&self) -> &str {
        self.client.base_url()
    }
}

#[async_trait]
impl ChatBackend for OpenAIBackend {
    async fn complete(&self, request: &CompletionRequest) -> Result<Value, BackendError> {
        let chat = ChatRequest::new(&request.model)
            .message(Message::user(&request.prompt))
            .max_tokens(request.max_tokens)
            .temperature(request.temperature);

        self.client
            .chat_completion_raw(&chat)
            .await
            .map_err(into_backend_error)
    }
}

fn into_backend_error(error: OpenAIError) -> BackendError {
    if error.is_rate_limited() {
        BackendError::RateLimited
    } else {
        BackendError::Transport(error.to_string())
    }
}
