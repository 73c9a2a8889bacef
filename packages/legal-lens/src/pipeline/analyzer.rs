//! The analyzer - the main entry point for the pipeline.

use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::classifier::classify_links;
use crate::error::{FetchResult, RemoteError};
use crate::extractor::ContentExtractor;
use crate::summarizer::{RuleBasedSummarizer, Summarizer};
use crate::traits::{cache::SummaryCache, fetcher::DocumentFetcher};
use crate::types::{
    link::{Anchor, CandidateLink},
    summary::{Analysis, ExtractedText, SummaryOrigin, SummaryResult},
};

/// Finds legal links and summarizes the documents behind them.
///
/// Summaries come from the remote summarizer when one is attached and it
/// produces a usable result, otherwise from the rule engine. Every computed
/// summary is stored in the cache for the rest of the session.
///
/// # Example
///
/// ```rust,ignore
/// let analyzer = Analyzer::new(HttpFetcher::new()?, MemoryCache::new())
///     .with_remote(Arc::new(RemoteSummarizer::from_config(&config)));
///
/// let links = analyzer.scan(&anchors);
/// let analysis = analyzer.analyze(&links[0].url).await?;
/// ```
pub struct Analyzer<F: DocumentFetcher, C: SummaryCache> {
    extractor: ContentExtractor<F>,
    cache: C,
    remote: Option<Arc<dyn Summarizer>>,
    fallback: RuleBasedSummarizer,
}

impl<F: DocumentFetcher, C: SummaryCache> Analyzer<F, C> {
    /// Analyzer using only the rule engine.
    pub fn new(fetcher: F, cache: C) -> Self {
        Self {
            extractor: ContentExtractor::new(fetcher),
            cache,
            remote: None,
            fallback: RuleBasedSummarizer::new(),
        }
    }

    /// Try `remote` before the rule engine.
    pub fn with_remote(mut self, remote: Arc<dyn Summarizer>) -> Self {
        self.remote = Some(remote);
        self
    }

    pub fn cache(&self) -> &C {
        &self.cache
    }

    pub fn fetcher(&self) -> &F {
        self.extractor.fetcher()
    }

    /// Classify a page's anchors into candidate legal links.
    pub fn scan<'a, I>(&self, anchors: I) -> Vec<CandidateLink>
    where
        I: IntoIterator<Item = &'a Anchor>,
    {
        classify_links(anchors)
    }

    /// Summarize the document at `url`.
    ///
    /// Served from the cache when present; otherwise fetched, extracted and
    /// summarized. Only retrieval failures are returned as errors.
    pub async fn analyze(&self, url: &str) -> FetchResult<Analysis> {
        if let Some(summary) = self.cache.get(url).await {
            debug!(url = %url, "Summary cache hit");
            return Ok(Analysis {
                url: url.to_string(),
                summary,
                origin: SummaryOrigin::Cached,
            });
        }

        let text = self.extractor.fetch_text(url).await?;
        let (summary, origin) = self.compute_and_store(url, &text).await;

        Ok(Analysis {
            url: url.to_string(),
            summary,
            origin,
        })
    }

    /// Analyze every link, in order, keeping per-link failures.
    pub async fn analyze_all(&self, links: &[CandidateLink]) -> Vec<FetchResult<Analysis>> {
        let mut results = Vec::with_capacity(links.len());
        for link in links {
            results.push(self.analyze(&link.url).await);
        }
        results
    }

    /// Cached summary for `url`, or compute one from `text` and cache it.
    ///
    /// Never fails. Concurrent calls for one URL are not deduplicated: both
    /// may compute, and the last store wins.
    pub async fn get_or_compute(&self, url: &str, text: &str) -> SummaryResult {
        if let Some(summary) = self.cache.get(url).await {
            debug!(url = %url, "Summary cache hit");
            return summary;
        }

        self.compute_and_store(url, text).await.0
    }

    async fn compute_and_store(&self, url: &str, text: &str) -> (SummaryResult, SummaryOrigin) {
        let text = ExtractedText::new(text);
        if text.is_truncated() {
            debug!(url = %url, "Document text truncated for summarization");
        }

        let (summary, origin) = self.summarize(url, &text).await;
        self.cache.store(url, summary.clone()).await;

        info!(
            url = %url,
            origin = %origin,
            key_points = summary.key_points.len(),
            risks = summary.risks.len(),
            "Document analyzed"
        );

        (summary, origin)
    }

    async fn summarize(&self, url: &str, text: &ExtractedText) -> (SummaryResult, SummaryOrigin) {
        if let Some(remote) = &self.remote {
            match remote.summarize(text).await {
                Ok(summary) if summary.is_usable() => return (summary, remote.origin()),
                Ok(_) => {
                    warn!(url = %url, "Remote summary unusable, falling back to rule-based");
                }
                Err(RemoteError::MissingCredential) => {
                    info!(url = %url, "No API credential configured, using rule-based summary");
                }
                Err(e) => {
                    warn!(url = %url, error = %e, "Remote summary failed, falling back to rule-based");
                }
            }
        }

        (
            self.fallback.summarize_text(text.as_str()),
            SummaryOrigin::RuleBased,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FetchError;
    use crate::stores::MemoryCache;
    use crate::testing::{MockFetcher, MockSummarizer};
    use crate::types::link::DocumentType;

    const TERMS_URL: &str = "https://x.com/terms";
    const TERMS_HTML: &str = "<html><body><script>track()</script>\
        <p>We are not liable for damages. We may share information with partners.</p></body></html>";

    fn remote_summary() -> SummaryResult {
        SummaryResult {
            key_points: vec!["Remote point".into()],
            risks: vec![],
            recommendations: vec!["Remote advice".into()],
        }
    }

    fn analyzer() -> Analyzer<MockFetcher, MemoryCache> {
        Analyzer::new(
            MockFetcher::new().with_page(TERMS_URL, TERMS_HTML),
            MemoryCache::new(),
        )
    }

    #[test]
    fn test_scan_classifies_anchors() {
        let anchors = vec![
            Anchor::new("Privacy Policy", "https://x.com/privacy"),
            Anchor::new("Read more", "https://x.com/about"),
        ];

        let links = analyzer().scan(&anchors);
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].document_type, DocumentType::PrivacyPolicy);
    }

    #[tokio::test]
    async fn test_rule_based_without_remote() {
        let analysis = analyzer().analyze(TERMS_URL).await.unwrap();

        assert_eq!(analysis.origin, SummaryOrigin::RuleBased);
        assert_eq!(analysis.summary.risks.len(), 2);
    }

    #[tokio::test]
    async fn test_remote_result_is_used_when_usable() {
        let remote = Arc::new(MockSummarizer::returning(remote_summary()));
        let analyzer = analyzer().with_remote(remote.clone());

        let analysis = analyzer.analyze(TERMS_URL).await.unwrap();

        assert_eq!(analysis.origin, SummaryOrigin::Remote);
        assert_eq!(analysis.summary, remote_summary());
        assert_eq!(remote.call_count(), 1);
    }

    #[tokio::test]
    async fn test_second_analyze_is_cached() {
        let remote = Arc::new(MockSummarizer::returning(remote_summary()));
        let analyzer = analyzer().with_remote(remote.clone());

        let first = analyzer.analyze(TERMS_URL).await.unwrap();
        let second = analyzer.analyze(TERMS_URL).await.unwrap();

        assert_eq!(second.origin, SummaryOrigin::Cached);
        assert_eq!(first.summary, second.summary);
        assert_eq!(remote.call_count(), 1);
        assert_eq!(analyzer.fetcher().calls().len(), 1);
    }

    #[tokio::test]
    async fn test_degraded_remote_falls_back() {
        let remote = Arc::new(MockSummarizer::returning(SummaryResult::degraded()));
        let analyzer = analyzer().with_remote(remote);

        let summary = analyzer.get_or_compute(TERMS_URL, "We are not liable for anything at all.").await;

        assert!(!summary.is_degraded());
        assert_eq!(summary.risks[0].description, "Company limits liability");
    }

    #[tokio::test]
    async fn test_empty_remote_falls_back() {
        let remote = Arc::new(MockSummarizer::returning(SummaryResult::default()));
        let analyzer = analyzer().with_remote(remote);

        let summary = analyzer.get_or_compute(TERMS_URL, "").await;
        assert_eq!(summary.recommendations.len(), 4);
    }

    #[tokio::test]
    async fn test_remote_error_falls_back() {
        let remote = Arc::new(MockSummarizer::with_outcome(|| {
            Err(RemoteError::Transport("connection reset".into()))
        }));
        let analyzer = analyzer().with_remote(remote);

        let analysis = analyzer.analyze(TERMS_URL).await.unwrap();
        assert_eq!(analysis.origin, SummaryOrigin::RuleBased);
    }

    #[tokio::test]
    async fn test_fetch_error_surfaces_and_caches_nothing() {
        let analyzer = analyzer();

        let err = analyzer.analyze("https://x.com/gone").await.unwrap_err();

        assert!(matches!(err, FetchError::Status { status: 404, .. }));
        assert!(analyzer.cache().is_empty().await);
    }

    #[tokio::test]
    async fn test_analyze_all_keeps_per_link_failures() {
        let links = vec![
            CandidateLink {
                url: TERMS_URL.into(),
                display_text: "Terms".into(),
                document_type: DocumentType::TermsOfService,
            },
            CandidateLink {
                url: "https://x.com/gone".into(),
                display_text: "Privacy".into(),
                document_type: DocumentType::PrivacyPolicy,
            },
        ];

        let results = analyzer().analyze_all(&links).await;
        assert!(results[0].is_ok());
        assert!(results[1].is_err());
    }
}
