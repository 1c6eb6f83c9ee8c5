//! # news-extract
//!
//! Article text and metadata extraction for news pages.
//!
//! Raw page markup is reduced to clean article text plus title, author,
//! publication date and description. A precision engine tuned for editorial
//! pages runs first; a structural fallback engine runs when it yields
//! nothing usable.
//!
//! ## Quick Start
//!
//! ```rust
//! use news_extract::extract;
//!
//! let body = vec!["word"; 40].join(" ");
//! let html = format!(
//!     "<html><head><title>My Article</title></head>\
//!      <body><nav>Home</nav><article><p>{body}</p></article></body></html>"
//! );
//!
//! let result = extract(&html)?;
//! assert_eq!(result.metadata.title.as_deref(), Some("My Article"));
//! assert_eq!(result.word_count, 40);
//! # Ok::<(), news_extract::Error>(())
//! ```
//!
//! Fetching is async and goes through [`Extractor`]:
//!
//! ```rust,no_run
//! # async fn demo() -> news_extract::Result<()> {
//! let extractor = news_extract::Extractor::new()?;
//! let article = extractor.extract_url("https://example.com/politics/vote").await?;
//! println!("{}", article.excerpt(280));
//! # Ok(()) }
//! ```
//!
//! ## Features
//!
//! - **Content extraction**: content rules, density scoring and link-density
//!   gating find the article body
//! - **Metadata extraction**: JSON-LD, meta tags and DOM bylines
//! - **Fallback**: structural container search when the primary engine fails
//! - **`readability`** (cargo feature): an extra Readability strategy

mod coordinator;
mod error;
mod options;
mod patterns;
mod request;
mod result;

/// DOM operations adapter over `dom_query`.
pub mod dom;

/// Element tree utilities from `html-cleaning`.
pub mod etree;

/// Selector rules for content finding and boilerplate detection.
pub mod selector;

/// Document cleaning and filtered text collection.
pub mod html_processing;

/// Extraction strategies (primary, fallback, readability).
pub mod extractor;

/// Metadata extraction (JSON-LD, HTML meta tags, DOM).
pub mod metadata;

/// URL validation helpers.
pub mod url_utils;

/// Character encoding detection and transcoding.
pub mod encoding;

/// Link density testing for boilerplate detection.
pub mod link_density;

/// Markup retrieval.
pub mod fetch;

/// Text normalization and word counting.
pub mod text;

pub use coordinator::{Extractor, ExtractorBuilder};
pub use error::{EngineError, Error, FetchError, Result};
pub use extractor::{Extraction, ExtractionStrategy, FallbackEngine, PrimaryEngine};
#[cfg(feature = "readability")]
pub use extractor::ReadabilityEngine;
pub use fetch::{Fetcher, HttpFetcher};
pub use options::{FetchOptions, Options, DEFAULT_USER_AGENT};
pub use request::ExtractionRequest;
pub use result::{ArticleMetadata, ArticleResult, SourceEngine};

/// Extract an article from markup with default options.
///
/// Runs the primary engine, then the fallback engine. No network access.
pub fn extract(markup: &str) -> Result<ArticleResult> {
    extract_with_options(markup, None, &Options::default())
}

/// Extract an article from markup with custom options.
///
/// ```rust
/// use news_extract::{extract_with_options, Error, Options};
///
/// let html = "<html><body><article><p>Too short.</p></article></body></html>";
/// let options = Options { min_word_count: 50, ..Options::default() };
/// let err = extract_with_options(html, None, &options).unwrap_err();
/// assert!(matches!(err, Error::NoContentExtracted));
/// ```
pub fn extract_with_options(markup: &str, url: Option<&url::Url>, options: &Options) -> Result<ArticleResult> {
    let strategies = coordinator::default_strategies(options);
    coordinator::run_strategies(&strategies, options, markup, url)
}

/// Extract an article from raw bytes, detecting the character encoding
/// from a BOM or `<meta charset>` declaration.
///
/// ```rust
/// use news_extract::{extract_bytes, Options};
///
/// let mut html = b"<html><head><meta charset=\"ISO-8859-1\"></head><body><article><p>Caf\xE9".to_vec();
/// html.extend_from_slice(" au lait".repeat(30).as_bytes());
/// html.extend_from_slice(b"</p></article></body></html>");
/// let result = extract_bytes(&html, &Options::default())?;
/// assert!(result.text.starts_with("Café"));
/// # Ok::<(), news_extract::Error>(())
/// ```
pub fn extract_bytes(html: &[u8], options: &Options) -> Result<ArticleResult> {
    let markup = encoding::transcode_to_utf8(html);
    extract_with_options(&markup, None, options)
}
