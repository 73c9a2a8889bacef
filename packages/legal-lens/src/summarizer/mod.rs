//! Summarization strategies.
//!
//! Two implementations sit behind [`Summarizer`]:
//! - [`RemoteSummarizer`]: asks a chat model, with rate-limit backoff
//! - [`RuleBasedSummarizer`]: keyword rules, never fails
//!
//! The [`Analyzer`](crate::pipeline::Analyzer) tries the first and falls back
//! to the second on any [`RemoteError`](crate::error::RemoteError).

pub mod prompts;
pub mod remote;
pub mod retry;
pub mod rule_based;

pub use remote::{parse_summary, RemoteSummarizer};
pub use retry::RetryPolicy;
pub use rule_based::RuleBasedSummarizer;

use async_trait::async_trait;

use crate::error::RemoteResult;
use crate::types::summary::{ExtractedText, SummaryOrigin, SummaryResult};

/// Turns bounded document text into a [`SummaryResult`].
#[async_trait]
pub trait Summarizer: Send + Sync {
    async fn summarize(&self, text: &ExtractedText) -> RemoteResult<SummaryResult>;

    /// Reported alongside results this summarizer produced.
    fn origin(&self) -> SummaryOrigin;
}
