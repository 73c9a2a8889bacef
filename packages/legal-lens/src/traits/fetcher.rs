//! Document retrieval trait.

use async_trait::async_trait;

use crate::error::FetchResult;

/// Retrieves raw markup for a URL.
///
/// Implementations report every retrieval failure as a
/// [`crate::error::FetchError`]; an empty body is a success.
#[async_trait]
pub trait DocumentFetcher: Send + Sync {
    /// Fetch the document body as text.
    async fn fetch(&self, url: &str) -> FetchResult<String>;

    /// Name for logging.
    fn name(&self) -> &str;
}
