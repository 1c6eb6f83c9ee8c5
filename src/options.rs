//! Configuration options for fetching and extraction.
//!
//! The `Options` struct controls extraction behavior, allowing users to
//! tune the precision/recall tradeoff and the minimum size of a usable
//! article. `FetchOptions` carries the HTTP settings used by the default
//! fetcher and by the coordinator's fetch timeout.

use std::time::Duration;

/// Default user agent sent by [`crate::HttpFetcher`].
///
/// A realistic browser string: many news sites serve stripped or blocked
/// pages to unknown agents.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36";

/// Configuration options for content extraction.
///
/// All fields are public for easy configuration. Use `Default::default()`
/// for standard settings.
///
/// # Example
///
/// ```rust
/// use news_extract::Options;
///
/// let options = Options {
///     min_word_count: 50,
///     favor_precision: false,
///     ..Options::default()
/// };
/// assert_eq!(options.fetch.max_redirects, 10);
/// ```
#[derive(Debug, Clone)]
pub struct Options {
    /// Minimum number of words for an extraction to count as real content.
    ///
    /// Strategy outputs below this are treated like empty output: the
    /// coordinator moves on to the next strategy and, if none qualifies,
    /// reports `NoContentExtracted`. Short news briefs run to a few dozen
    /// words, so the default stays low.
    ///
    /// Default: `20`
    pub min_word_count: usize,

    /// Tune the primary engine for higher precision.
    ///
    /// Raises the heuristic content score threshold (`5000` instead of
    /// `min_content_score`) and tightens the single-link density shortcut.
    ///
    /// Default: `true`
    pub favor_precision: bool,

    /// Minimum score for a density-scored content candidate when
    /// `favor_precision` is off.
    ///
    /// Default: `1000`
    pub min_content_score: i64,

    /// Maximum share of link text in the primary engine's output.
    ///
    /// Output above this ratio is a link list, not an article.
    ///
    /// Default: `0.5`
    pub max_link_density: f64,

    /// Minimum length (characters) of a JSON-LD `articleBody` before it may
    /// replace DOM-extracted text.
    ///
    /// Default: `500`
    pub min_structured_body_len: usize,

    /// Author names to filter out of metadata.
    ///
    /// Names containing any of these strings (case-insensitive) are dropped.
    ///
    /// Default: empty
    pub author_blacklist: Vec<String>,

    /// HTTP settings for fetching markup.
    pub fetch: FetchOptions,
}

impl Options {
    /// Score threshold the primary engine applies to heuristic candidates.
    #[must_use]
    pub fn content_score_threshold(&self) -> i64 {
        if self.favor_precision {
            5000
        } else {
            self.min_content_score
        }
    }
}

impl Default for Options {
    fn default() -> Self {
        Self {
            min_word_count: 20,
            favor_precision: true,
            min_content_score: 1000,
            max_link_density: 0.5,
            min_structured_body_len: 500,
            author_blacklist: Vec::new(),
            fetch: FetchOptions::default(),
        }
    }
}

/// HTTP settings for the fetch step.
#[derive(Debug, Clone)]
pub struct FetchOptions {
    /// Upper bound on the whole fetch (connect, headers and body).
    ///
    /// Default: 30 seconds
    pub timeout: Duration,

    /// Upper bound on establishing the connection.
    ///
    /// Default: 10 seconds
    pub connect_timeout: Duration,

    /// User agent header.
    ///
    /// Default: [`DEFAULT_USER_AGENT`]
    pub user_agent: String,

    /// Maximum redirects to follow.
    ///
    /// Default: `10`
    pub max_redirects: usize,

    /// Maximum response body size in bytes.
    ///
    /// Default: 10 MiB
    pub max_content_size: usize,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            max_redirects: 10,
            max_content_size: 10 * 1024 * 1024,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documentation() {
        let options = Options::default();
        assert_eq!(options.min_word_count, 20);
        assert!(options.favor_precision);
        assert_eq!(options.fetch.timeout, Duration::from_secs(30));
        assert!(options.author_blacklist.is_empty());
    }

    #[test]
    fn precision_raises_score_threshold() {
        let precise = Options::default();
        let relaxed = Options {
            favor_precision: false,
            min_content_score: 700,
            ..Options::default()
        };

        assert_eq!(precise.content_score_threshold(), 5000);
        assert_eq!(relaxed.content_score_threshold(), 700);
    }
}
