//! Legal Document Discovery and Risk Summarization
//!
//! Finds links to legal documents (privacy policies, terms of service,
//! cookie policies, license agreements) among a page's anchors, fetches the
//! documents, and summarizes each into key points, risks and
//! recommendations.
//!
//! # Usage
//!
//! ```rust,ignore
//! use legal_lens::{Analyzer, HttpFetcher, MemoryCache, RemoteConfig, RemoteSummarizer};
//!
//! let config = RemoteConfig::from_env();
//! let analyzer = Analyzer::new(HttpFetcher::new()?, MemoryCache::new())
//!     .with_remote(Arc::new(RemoteSummarizer::from_config(&config)));
//!
//! for link in analyzer.scan(&anchors) {
//!     let analysis = analyzer.analyze(&link.url).await?;
//!     println!("{}: {} risks", link.document_type, analysis.summary.risks.len());
//! }
//! ```
//!
//! Summaries come from a chat model when an API key is configured, and from
//! a deterministic keyword engine otherwise or whenever the model fails.
//!
//! # Modules
//!
//! - [`classifier`] - Legal link selection and typing
//! - [`extractor`] - Visible text from document markup
//! - [`summarizer`] - Remote and rule-based summarizers
//! - [`pipeline`] - The [`Analyzer`] orchestrator
//! - [`traits`] - Fetcher, chat backend, sleeper and cache seams
//! - [`stores`] - Cache implementations
//! - [`fetchers`] - HTTP document fetcher
//! - [`testing`] - Mock implementations for testing

pub mod classifier;
pub mod error;
pub mod extractor;
pub mod fetchers;
pub mod pipeline;
pub mod security;
pub mod stores;
pub mod summarizer;
pub mod testing;
pub mod traits;
pub mod types;

#[cfg(feature = "openai")]
pub mod ai;

// Re-export core types at crate root
pub use error::{BackendError, FetchError, FetchResult, RemoteError, RemoteResult};
pub use traits::{
    backend::{ChatBackend, CompletionRequest, Sleeper, TokioSleeper},
    cache::{normalize_url, SummaryCache},
    fetcher::DocumentFetcher,
};
pub use types::{
    config::RemoteConfig,
    link::{Anchor, CandidateLink, DocumentType, Priority},
    summary::{Analysis, ExtractedText, RiskFinding, Severity, SummaryOrigin, SummaryResult},
};

pub use classifier::{anchors_from_markup, classify_links};
pub use extractor::{extract_text, ContentExtractor};
pub use fetchers::HttpFetcher;
pub use pipeline::Analyzer;
pub use security::SecretString;
pub use stores::MemoryCache;
pub use summarizer::{RemoteSummarizer, RetryPolicy, RuleBasedSummarizer, Summarizer};

#[cfg(feature = "openai")]
pub use ai::OpenAIBackend;

// Re-export testing utilities
pub use testing::{MockChatBackend, MockFetcher, RecordingSleeper};
