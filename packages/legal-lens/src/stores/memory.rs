//! In-memory summary cache.

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::traits::cache::{normalize_url, SummaryCache};
use crate::types::summary::SummaryResult;

/// Session cache of summaries, keyed by [`normalize_url`].
///
/// Lives as long as the value; dropping it ends the session.
#[derive(Default)]
pub struct MemoryCache {
    summaries: RwLock<HashMap<String, SummaryResult>>,
}

impl MemoryCache {
    /// Create a new empty cache.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SummaryCache for MemoryCache {
    async fn get(&self, url: &str) -> Option<SummaryResult> {
        self.summaries.read().await.get(&normalize_url(url)).cloned()
    }

    async fn store(&self, url: &str, summary: SummaryResult) {
        self.summaries
            .write()
            .await
            .insert(normalize_url(url), summary);
    }

    async fn len(&self) -> usize {
        self.summaries.read().await.len()
    }

    async fn clear(&self) {
        self.summaries.write().await.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(point: &str) -> SummaryResult {
        SummaryResult {
            key_points: vec![point.to_string()],
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_store_and_get() {
        let cache = MemoryCache::new();
        assert!(cache.is_empty().await);

        cache.store("https://x.com/terms", summary("a")).await;

        assert_eq!(cache.get("https://x.com/terms").await, Some(summary("a")));
        assert_eq!(cache.get("https://x.com/privacy").await, None);
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn test_fragment_shares_entry() {
        let cache = MemoryCache::new();
        cache.store("https://x.com/terms#section-2", summary("a")).await;

        assert_eq!(cache.get("https://x.com/terms").await, Some(summary("a")));
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn test_last_write_wins() {
        let cache = MemoryCache::new();
        cache.store("https://x.com/terms", summary("first")).await;
        cache.store("https://x.com/terms", summary("second")).await;

        assert_eq!(cache.get("https://x.com/terms").await, Some(summary("second")));
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn test_clear() {
        let cache = MemoryCache::new();
        cache.store("https://x.com/a", summary("a")).await;
        cache.store("https://x.com/b", summary("b")).await;

        cache.clear().await;
        assert!(cache.is_empty().await);
    }
}
