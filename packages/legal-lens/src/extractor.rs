//! Content extraction - from fetched markup to plain text.

use scraper::{Html, Selector};
use tracing::debug;

use crate::error::FetchResult;
use crate::traits::fetcher::DocumentFetcher;

/// Elements whose content is never shown to a reader.
const HIDDEN_ELEMENTS: &[&str] = &["script", "style", "noscript"];

/// Strip script and style blocks and return the remaining visible text of
/// the document body.
///
/// Head content such as `<title>` is not part of the result. Inter-element
/// whitespace is kept as-is. Markup without any text yields an empty string.
pub fn extract_text(markup: &str) -> String {
    let document = Html::parse_document(markup);
    let selector = Selector::parse("body").ok();
    let body = selector
        .as_ref()
        .and_then(|selector| document.select(selector).next());
    let root = match body {
        Some(body) => *body,
        None => document.tree.root(),
    };
    let mut text = String::new();

    for node in root.descendants() {
        let Some(fragment) = node.value().as_text() else {
            continue;
        };
        let hidden = node.ancestors().any(|ancestor| {
            ancestor
                .value()
                .as_element()
                .is_some_and(|el| HIDDEN_ELEMENTS.contains(&el.name()))
        });
        if !hidden {
            text.push_str(fragment);
        }
    }

    text
}

/// Fetches legal documents and extracts their text.
pub struct ContentExtractor<F: DocumentFetcher> {
    fetcher: F,
}

impl<F: DocumentFetcher> ContentExtractor<F> {
    pub fn new(fetcher: F) -> Self {
        Self { fetcher }
    }

    /// Access the underlying fetcher.
    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Retrieve `url` and return its visible text.
    ///
    /// Only retrieval failures are errors; an empty document is `Ok("")`.
    pub async fn fetch_text(&self, url: &str) -> FetchResult<String> {
        let markup = self.fetcher.fetch(url).await?;
        let text = extract_text(&markup);

        debug!(
            url = %url,
            fetcher = self.fetcher.name(),
            markup_length = markup.len(),
            text_length = text.len(),
            "Extracted document text"
        );

        Ok(text)
    }
}
