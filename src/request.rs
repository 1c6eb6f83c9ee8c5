//! Extraction requests.

use url::Url;

use crate::error::{Error, Result};
use crate::url_utils;

/// One article to extract: where it lives and, optionally, its markup.
///
/// The URL is validated on construction and the request is immutable
/// afterwards.
///
/// ```rust
/// use news_extract::ExtractionRequest;
///
/// let request = ExtractionRequest::new("https://example.com/news/1")?;
/// assert!(request.markup().is_none());
///
/// assert!(ExtractionRequest::new("/relative/path").is_err());
/// # Ok::<(), news_extract::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct ExtractionRequest {
    url: Url,
    markup: Option<String>,
}

impl ExtractionRequest {
    /// Request that will fetch the page at `url`.
    pub fn new(url: &str) -> Result<Self> {
        Ok(Self {
            url: parse_article_url(url)?,
            markup: None,
        })
    }

    /// Request for markup the caller already holds.
    ///
    /// The URL is still validated: it is used for metadata and logging.
    pub fn with_markup(url: &str, markup: impl Into<String>) -> Result<Self> {
        Ok(Self {
            url: parse_article_url(url)?,
            markup: Some(markup.into()),
        })
    }

    /// Article URL.
    #[must_use]
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Pre-fetched markup, if any.
    #[must_use]
    pub fn markup(&self) -> Option<&str> {
        self.markup.as_deref()
    }
}

fn parse_article_url(url: &str) -> Result<Url> {
    url_utils::parse_url(url).ok_or_else(|| Error::InvalidUrl(url.trim().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_http_and_https() {
        assert!(ExtractionRequest::new("http://example.com/a").is_ok());
        let request = ExtractionRequest::new("  https://example.com/b  ").unwrap();
        assert_eq!(request.url().as_str(), "https://example.com/b");
        let request = ExtractionRequest::new("HTTPS://example.com/news/1").unwrap();
        assert_eq!(request.url().scheme(), "https");
    }

    #[test]
    fn rejects_malformed_urls() {
        for bad in ["", "example.com/a", "ftp://example.com/file", "https://", "/news/1"] {
            let err = ExtractionRequest::new(bad).unwrap_err();
            assert!(matches!(err, Error::InvalidUrl(_)), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn keeps_prefetched_markup() {
        let request =
            ExtractionRequest::with_markup("https://example.com/a", "<p>hi</p>").unwrap();
        assert_eq!(request.markup(), Some("<p>hi</p>"));
    }
}
