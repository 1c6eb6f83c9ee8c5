//! Extraction coordinator.
//!
//! [`Extractor`] obtains markup (from the request or the [`Fetcher`]), runs
//! the strategies in priority order and returns the first substantial
//! result as an [`ArticleResult`].

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use futures::stream::{self, StreamExt};
use tracing::{debug, info, instrument, warn};
use url::Url;

use crate::error::{Error, FetchError, Result};
use crate::extractor::{ExtractionStrategy, FallbackEngine, PrimaryEngine};
use crate::fetch::{Fetcher, HttpFetcher};
use crate::request::ExtractionRequest;
use crate::result::{ArticleMetadata, ArticleResult};
use crate::text;
use crate::url_utils;
use crate::Options;

/// Fetch-then-extract pipeline.
///
/// ```rust,no_run
/// # async fn demo() -> news_extract::Result<()> {
/// use news_extract::Extractor;
///
/// let extractor = Extractor::new()?;
/// let article = extractor.extract_url("https://example.com/news/story").await?;
/// println!("{} ({} words)", article.metadata.title.unwrap_or_default(), article.word_count);
/// # Ok(()) }
/// ```
pub struct Extractor {
    options: Options,
    fetcher: Arc<dyn Fetcher>,
    strategies: Vec<Box<dyn ExtractionStrategy>>,
}

impl fmt::Debug for Extractor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let engines: Vec<_> = self.strategies.iter().map(|s| s.name()).collect();
        f.debug_struct("Extractor")
            .field("options", &self.options)
            .field("strategies", &engines)
            .finish_non_exhaustive()
    }
}

impl Extractor {
    /// Extractor with default options, the HTTP fetcher and the default
    /// strategies (primary, then fallback).
    pub fn new() -> Result<Self> {
        Self::builder().build()
    }

    #[must_use]
    pub fn builder() -> ExtractorBuilder {
        ExtractorBuilder::default()
    }

    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Extract the article behind `request`.
    ///
    /// Uses the request's markup when present, otherwise fetches the URL,
    /// bounded by `Options::fetch.timeout`. A fetch failure returns
    /// [`Error::Fetch`] without running any strategy.
    #[instrument(
        skip_all,
        fields(url = %request.url(), host = %url_utils::extract_hostname(request.url()).unwrap_or_default())
    )]
    pub async fn extract(&self, request: &ExtractionRequest) -> Result<ArticleResult> {
        let started = Instant::now();

        let markup = match request.markup() {
            Some(markup) => Cow::Borrowed(markup),
            None => Cow::Owned(self.fetch(request.url()).await?),
        };

        let result = self.extract_markup(&markup, Some(request.url()));
        let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
        match &result {
            Ok(article) => info!(
                engine = %article.source_engine,
                words = article.word_count,
                elapsed_ms,
                "article extracted"
            ),
            Err(err) => warn!(error = %err, elapsed_ms, "no article extracted"),
        }
        result
    }

    /// Parse `url` and extract the article behind it.
    pub async fn extract_url(&self, url: &str) -> Result<ArticleResult> {
        let request = ExtractionRequest::new(url)?;
        self.extract(&request).await
    }

    /// Extract many URLs with at most `concurrency` in flight.
    ///
    /// Returns one entry per input, in input order. A failing article does
    /// not affect the others.
    pub async fn extract_all<I, S>(&self, urls: I, concurrency: usize) -> Vec<(String, Result<ArticleResult>)>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        stream::iter(urls.into_iter().map(Into::into))
            .map(|url: String| async move {
                let result = self.extract_url(&url).await;
                (url, result)
            })
            .buffered(concurrency.max(1))
            .collect()
            .await
    }

    /// Run the strategies over already-fetched markup.
    ///
    /// The first strategy whose normalized text reaches
    /// `Options::min_word_count` words wins. Metadata from rejected
    /// strategies fills fields the winner left empty.
    pub fn extract_markup(&self, markup: &str, url: Option<&Url>) -> Result<ArticleResult> {
        run_strategies(&self.strategies, &self.options, markup, url)
    }

    async fn fetch(&self, url: &Url) -> Result<String> {
        let timeout = self.options.fetch.timeout;
        match tokio::time::timeout(timeout, self.fetcher.fetch(url)).await {
            Ok(Ok(markup)) => Ok(markup),
            Ok(Err(err)) => {
                warn!(error = %err, "fetch failed");
                Err(err.into())
            }
            Err(_) => {
                warn!(timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX), "fetch timed out");
                Err(FetchError::Timeout(timeout).into())
            }
        }
    }
}

/// Configures an [`Extractor`].
///
/// Without explicit strategies the primary and fallback engines are used,
/// built from the final options. [`with_strategy`](Self::with_strategy)
/// appends after them.
#[derive(Default)]
pub struct ExtractorBuilder {
    options: Option<Options>,
    fetcher: Option<Arc<dyn Fetcher>>,
    strategies: Option<Vec<Box<dyn ExtractionStrategy>>>,
    extra_strategies: Vec<Box<dyn ExtractionStrategy>>,
}

impl ExtractorBuilder {
    #[must_use]
    pub fn options(mut self, options: Options) -> Self {
        self.options = Some(options);
        self
    }

    /// Replace the HTTP fetcher.
    #[must_use]
    pub fn fetcher<F: Fetcher + 'static>(mut self, fetcher: F) -> Self {
        self.fetcher = Some(Arc::new(fetcher));
        self
    }

    /// Use a fetcher shared with other extractors.
    #[must_use]
    pub fn shared_fetcher(mut self, fetcher: Arc<dyn Fetcher>) -> Self {
        self.fetcher = Some(fetcher);
        self
    }

    /// Append a strategy after the configured ones.
    #[must_use]
    pub fn with_strategy<S: ExtractionStrategy + 'static>(mut self, strategy: S) -> Self {
        self.extra_strategies.push(Box::new(strategy));
        self
    }

    /// Replace the default strategy list.
    #[must_use]
    pub fn strategies(mut self, strategies: Vec<Box<dyn ExtractionStrategy>>) -> Self {
        self.strategies = Some(strategies);
        self
    }

    /// Build the extractor. Fails only when the default HTTP client cannot
    /// be created.
    pub fn build(self) -> Result<Extractor> {
        let options = self.options.unwrap_or_default();

        let fetcher: Arc<dyn Fetcher> = match self.fetcher {
            Some(fetcher) => fetcher,
            None => Arc::new(HttpFetcher::new(&options.fetch)?),
        };

        let mut strategies = self.strategies.unwrap_or_else(|| default_strategies(&options));
        strategies.extend(self.extra_strategies);

        Ok(Extractor {
            options,
            fetcher,
            strategies,
        })
    }
}

/// Try `strategies` in order; see [`Extractor::extract_markup`].
pub(crate) fn run_strategies(
    strategies: &[Box<dyn ExtractionStrategy>],
    options: &Options,
    markup: &str,
    url: Option<&Url>,
) -> Result<ArticleResult> {
    let mut carried = ArticleMetadata::default();

    for strategy in strategies {
        let engine = strategy.name();
        match strategy.attempt(markup, url) {
            Ok(extraction) => {
                let text = text::normalize(&extraction.text);
                if text::is_substantial(&text, options.min_word_count) {
                    let metadata = extraction.metadata.merge(&carried);
                    return Ok(ArticleResult::new(text, metadata, engine));
                }
                debug!(
                    engine = %engine,
                    words = text::word_count(&text),
                    min_words = options.min_word_count,
                    has_metadata = !extraction.metadata.is_empty(),
                    "strategy output rejected"
                );
                if !extraction.metadata.is_empty() {
                    carried = carried.merge(&extraction.metadata);
                }
            }
            Err(err) => debug!(engine = %engine, error = %err, "strategy failed"),
        }
    }

    Err(Error::NoContentExtracted)
}

pub(crate) fn default_strategies(options: &Options) -> Vec<Box<dyn ExtractionStrategy>> {
    vec![
        Box::new(PrimaryEngine::new(options.clone())),
        Box::new(FallbackEngine::new(options.clone())),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::result::SourceEngine;

    #[test]
    fn test_default_strategy_order() {
        let extractor = Extractor::new().unwrap();
        let engines: Vec<_> = extractor.strategies.iter().map(|s| s.name()).collect();
        assert_eq!(engines, vec![SourceEngine::Primary, SourceEngine::Fallback]);
    }

    #[test]
    fn test_builder_options_flow_into_engines() {
        let options = Options {
            min_word_count: 5,
            ..Options::default()
        };
        let extractor = Extractor::builder().options(options).build().unwrap();
        assert_eq!(extractor.options().min_word_count, 5);

        let html = "<html><body><article><p>One two three four five six.</p></article></body></html>";
        let article = extractor.extract_markup(html, None).unwrap();
        assert_eq!(article.word_count, 6);
    }

    #[test]
    fn test_empty_page_has_no_content() {
        let extractor = Extractor::new().unwrap();
        let err = extractor.extract_markup("<html><body></body></html>", None).unwrap_err();
        assert!(matches!(err, Error::NoContentExtracted));
    }
}
