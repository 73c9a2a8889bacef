//! Typed errors for the analysis pipeline.
//!
//! Uses `thiserror` for library errors (not `anyhow`) so callers can tell
//! a user-facing fetch failure from a remote failure that only triggers
//! the rule-based fallback.

use thiserror::Error;

/// Retrieving a legal document failed.
///
/// This is the only error that escapes [`crate::Analyzer::analyze`] and is
/// meant to be shown to the user.
#[derive(Debug, Error)]
pub enum FetchError {
    /// URL could not be parsed
    #[error("invalid document URL: {url}")]
    InvalidUrl { url: String },

    /// Transport-level failure (DNS, TLS, timeout, connection reset)
    #[error("failed to fetch {url}: {source}")]
    Http {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Server answered with a non-success status
    #[error("failed to fetch {url}: HTTP {status}")]
    Status { url: String, status: u16 },
}

impl FetchError {
    /// URL of the document that could not be retrieved.
    pub fn url(&self) -> &str {
        match self {
            Self::InvalidUrl { url } | Self::Http { url, .. } | Self::Status { url, .. } => url,
        }
    }
}

/// What a chat backend reports for a single attempt.
#[derive(Debug, Error)]
pub enum BackendError {
    /// HTTP 429; eligible for retry with backoff
    #[error("rate limited")]
    RateLimited,

    /// Any other failure; never retried
    #[error("transport error: {0}")]
    Transport(String),
}

/// Why the remote summarizer could not produce a result.
///
/// Every variant sends the orchestrator to the rule-based summarizer.
#[derive(Debug, Error)]
pub enum RemoteError {
    /// No API key configured; the remote path is not attempted
    #[error("no API credential configured")]
    MissingCredential,

    /// Non-retryable failure calling the model
    #[error("remote call failed: {0}")]
    Transport(String),

    /// Every attempt was rejected with a rate limit
    #[error("rate limited on all {attempts} attempts")]
    RateLimitExhausted { attempts: u32 },

    /// Response did not contain a summary in the expected shape
    #[error("malformed remote response: {0}")]
    MalformedResponse(String),
}

/// Result type alias for fetch operations.
pub type FetchResult<T> = std::result::Result<T, FetchError>;

/// Result type alias for remote summarization.
pub type RemoteResult<T> = std::result::Result<T, RemoteError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_error_reports_url() {
        let err = FetchError::Status {
            url: "https://x.com/terms".into(),
            status: 404,
        };
        assert_eq!(err.url(), "https://x.com/terms");
        assert_eq!(err.to_string(), "failed to fetch https://x.com/terms: HTTP 404");
    }

    #[test]
    fn test_rate_limit_exhausted_message() {
        let err = RemoteError::RateLimitExhausted { attempts: 3 };
        assert_eq!(err.to_string(), "rate limited on all 3 attempts");
    }
}
