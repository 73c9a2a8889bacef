//! Orchestration of scan, fetch, summarize and cache.

mod analyzer;

pub use analyzer::Analyzer;
