//! Error types for news-extract.
//!
//! [`Error`] is what callers of the coordinator see. [`FetchError`] describes
//! transport failures and [`EngineError`] covers failures inside a single
//! extraction strategy, which the coordinator absorbs as "no content".

use std::time::Duration;

/// Error type returned by the extraction coordinator.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The request URL is not a well-formed absolute http(s) URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Fetching the page failed (transport error, timeout, bad status).
    #[error("Fetch failed: {0}")]
    Fetch(#[from] FetchError),

    /// Every extraction strategy came back empty or below the word threshold.
    #[error("No extractable content found")]
    NoContentExtracted,
}

impl Error {
    /// Whether this failure happened before any extraction was attempted.
    #[must_use]
    pub fn is_fetch_error(&self) -> bool {
        matches!(self, Self::Fetch(_))
    }

    /// Short message suitable for showing to an end user.
    #[must_use]
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::InvalidUrl(_) => "That does not look like a valid article link.",
            Self::Fetch(_) => "Could not download the article. Please try again later.",
            Self::NoContentExtracted => "Could not extract the article text from this page.",
        }
    }
}

/// Errors produced while retrieving markup over the network.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// Underlying HTTP client error (connection refused, TLS, decoding).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The request did not complete within the configured timeout.
    #[error("Timeout after {0:?}")]
    Timeout(Duration),

    /// The server answered with a non-success status code.
    #[error("Unexpected status code: {0}")]
    Status(u16),

    /// The response is not an HTML document.
    #[error("Invalid content type: {0}")]
    InvalidContentType(String),

    /// The response body exceeds the configured size limit.
    #[error("Content too large: {0} bytes")]
    ContentTooLarge(usize),

    /// The HTTP client could not be built or the fetcher failed internally.
    #[error("Fetcher error: {0}")]
    Client(String),
}

/// Failure inside one extraction strategy.
///
/// Never surfaced to callers: the coordinator logs it and tries the next
/// strategy.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// The markup could not be turned into a usable document.
    #[error("HTML parsing failed: {0}")]
    Parse(String),

    /// General extraction failure.
    #[error("Extraction failed: {0}")]
    Extraction(String),
}

/// Result type alias for coordinator operations.
pub type Result<T> = std::result::Result<T, Error>;
