//! Markup retrieval.
//!
//! [`Fetcher`] is the transport seam: the coordinator only needs "URL in,
//! markup out". [`HttpFetcher`] is the default reqwest-based implementation.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, CONTENT_TYPE};
use reqwest::redirect::Policy;
use tracing::debug;
use url::Url;

use crate::encoding;
use crate::error::FetchError;
use crate::options::FetchOptions;

/// Source of raw page markup.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Fetch the markup behind `url`, decoded to UTF-8.
    async fn fetch(&self, url: &Url) -> Result<String, FetchError>;
}

/// HTTP fetcher with timeouts, a redirect limit, a browser-like user agent
/// and charset-aware decoding.
///
/// Rejects non-2xx responses, non-HTML content types and bodies larger than
/// `FetchOptions::max_content_size`.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
    options: FetchOptions,
}

impl HttpFetcher {
    pub fn new(options: &FetchOptions) -> Result<Self, FetchError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8"),
        );
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.7,*;q=0.5"));

        let client = reqwest::Client::builder()
            .timeout(options.timeout)
            .connect_timeout(options.connect_timeout)
            .redirect(Policy::limited(options.max_redirects))
            .user_agent(options.user_agent.as_str())
            .default_headers(headers)
            .gzip(true)
            .brotli(true)
            .build()
            .map_err(|e| FetchError::Client(e.to_string()))?;

        Ok(Self {
            client,
            options: options.clone(),
        })
    }

    #[must_use]
    pub fn options(&self) -> &FetchOptions {
        &self.options
    }

    fn map_request_error(&self, err: reqwest::Error) -> FetchError {
        if err.is_timeout() {
            FetchError::Timeout(self.options.timeout)
        } else {
            FetchError::Http(err)
        }
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &Url) -> Result<String, FetchError> {
        let mut response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| self.map_request_error(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        if let Some(ct) = content_type.as_deref() {
            if !is_html_content_type(ct) {
                return Err(FetchError::InvalidContentType(ct.to_string()));
            }
        }

        let limit = self.options.max_content_size;
        if let Some(len) = response.content_length() {
            let len = usize::try_from(len).unwrap_or(usize::MAX);
            if len > limit {
                return Err(FetchError::ContentTooLarge(len));
            }
        }

        // Content-Length may be missing or wrong.
        let mut body: Vec<u8> = Vec::new();
        while let Some(chunk) = response.chunk().await.map_err(|e| self.map_request_error(e))? {
            if body.len() + chunk.len() > limit {
                return Err(FetchError::ContentTooLarge(body.len() + chunk.len()));
            }
            body.extend_from_slice(&chunk);
        }

        debug!(url = %url, bytes = body.len(), status = status.as_u16(), "fetched");
        Ok(encoding::decode_body(&body, content_type.as_deref()))
    }
}

/// HTML, XHTML and XML documents. An empty header value is accepted too.
fn is_html_content_type(content_type: &str) -> bool {
    let mime = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    mime.is_empty() || matches!(mime.as_str(), "text/html" | "application/xhtml+xml" | "application/xml" | "text/xml")
}
