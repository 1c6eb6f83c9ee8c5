//! Result types for extraction output.
//!
//! This module defines the structured output of the pipeline: the article
//! text, which engine produced it, and the metadata found on the page.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::text;

/// Extraction engine that produced an [`ArticleResult`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceEngine {
    /// Precision extraction tuned for editorial pages.
    Primary,
    /// Structural tag/class heuristics.
    Fallback,
    /// Mozilla Readability port.
    #[cfg(feature = "readability")]
    Readability,
}

impl SourceEngine {
    /// Lowercase engine name, as used in logs and JSON output.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Fallback => "fallback",
            #[cfg(feature = "readability")]
            Self::Readability => "readability",
        }
    }
}

impl std::fmt::Display for SourceEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Metadata extracted from an article page.
///
/// Every field is optional. `None` means the page did not expose the value;
/// empty strings are never stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ArticleMetadata {
    /// Article headline.
    pub title: Option<String>,

    /// Author name(s).
    pub author: Option<String>,

    /// Publication date.
    pub published_date: Option<DateTime<Utc>>,

    /// Summary or meta description.
    pub description: Option<String>,
}

impl ArticleMetadata {
    /// Whether no field is known.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.author.is_none()
            && self.published_date.is_none()
            && self.description.is_none()
    }

    /// Fill fields missing here with the values known in `other`.
    #[must_use]
    pub fn merge(mut self, other: &ArticleMetadata) -> ArticleMetadata {
        if self.title.is_none() {
            self.title.clone_from(&other.title);
        }
        if self.author.is_none() {
            self.author.clone_from(&other.author);
        }
        if self.published_date.is_none() {
            self.published_date = other.published_date;
        }
        if self.description.is_none() {
            self.description.clone_from(&other.description);
        }
        self
    }
}

/// A successfully extracted article.
///
/// `text` is never empty and `word_count` always equals
/// [`text::word_count`] of `text`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArticleResult {
    /// Normalized article body.
    pub text: String,

    /// Metadata found on the page.
    pub metadata: ArticleMetadata,

    /// Engine whose output was accepted.
    pub source_engine: SourceEngine,

    /// Number of whitespace-separated words in `text`.
    pub word_count: usize,
}

impl ArticleResult {
    /// Assemble a result, computing the word count from the text.
    #[must_use]
    pub fn new(text: String, metadata: ArticleMetadata, source_engine: SourceEngine) -> Self {
        let word_count = text::word_count(&text);
        Self {
            text,
            metadata,
            source_engine,
            word_count,
        }
    }

    /// Sentence-bounded preview of the article, at most `max_chars` long
    /// (plus an ellipsis when cut mid-sentence).
    #[must_use]
    pub fn excerpt(&self, max_chars: usize) -> String {
        text::truncate_by_sentences(&text::collapse_whitespace(&self.text), max_chars)
    }
}
