//! Trait seams of the pipeline.
//!
//! - `DocumentFetcher`: retrieve markup by URL
//! - `ChatBackend` / `Sleeper`: remote model access and backoff timing
//! - `SummaryCache`: per-session result storage

pub mod backend;
pub mod cache;
pub mod fetcher;
