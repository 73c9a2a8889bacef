//! Summary cache trait.

use async_trait::async_trait;

use crate::types::summary::SummaryResult;

/// Per-session store of computed summaries, keyed by document URL.
///
/// No TTL and no eviction; a second `store` for the same key replaces the
/// first (last write wins).
#[async_trait]
pub trait SummaryCache: Send + Sync {
    /// Get the stored summary for a URL.
    async fn get(&self, url: &str) -> Option<SummaryResult>;

    /// Store a summary, replacing any previous one.
    async fn store(&self, url: &str, summary: SummaryResult);

    /// Number of stored summaries.
    async fn len(&self) -> usize;

    async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Drop everything (end of session).
    async fn clear(&self);
}

/// Cache key for a document URL.
///
/// Parses the URL and drops its fragment so `/terms` and `/terms#section-3`
/// share one entry. Strings that are not URLs are used trimmed.
pub fn normalize_url(url: &str) -> String {
    let trimmed = url.trim();
    match url::Url::parse(trimmed) {
        Ok(mut parsed) => {
            parsed.set_fragment(None);
            parsed.to_string()
        }
        Err(_) => trimmed.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_drops_fragment() {
        assert_eq!(
            normalize_url("https://x.com/terms#liability"),
            normalize_url("https://x.com/terms")
        );
    }

    #[test]
    fn test_normalize_keeps_query_and_case_of_path() {
        assert_eq!(
            normalize_url(" https://X.com/Terms?v=2 "),
            "https://x.com/Terms?v=2"
        );
    }

    #[test]
    fn test_normalize_non_url() {
        assert_eq!(normalize_url("  not a url "), "not a url");
    }
}
