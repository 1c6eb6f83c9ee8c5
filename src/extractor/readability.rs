//! Readability strategy, backed by `dom_smoothie` (a port of Mozilla
//! Readability).
//!
//! Not part of the default strategy list. Add it with
//! [`crate::ExtractorBuilder::with_strategy`].

use dom_smoothie::Readability;
use url::Url;

use super::{Extraction, ExtractionStrategy};
use crate::dom;
use crate::error::EngineError;
use crate::html_processing;
use crate::result::{ArticleMetadata, SourceEngine};

#[derive(Debug, Clone, Copy, Default)]
pub struct ReadabilityEngine;

impl ExtractionStrategy for ReadabilityEngine {
    fn name(&self) -> SourceEngine {
        SourceEngine::Readability
    }

    fn attempt(&self, markup: &str, url: Option<&Url>) -> Result<Extraction, EngineError> {
        if markup.trim().is_empty() {
            return Ok(Extraction::default());
        }

        let doc = dom::parse(markup);
        let mut reader = Readability::with_document(doc, url.map(Url::as_str), None)
            .map_err(|e| EngineError::Parse(e.to_string()))?;
        let article = reader
            .parse()
            .map_err(|e| EngineError::Extraction(e.to_string()))?;

        let content_doc = dom::parse(&article.content);
        let text = html_processing::visible_text(&content_doc.select("body"));

        let metadata = ArticleMetadata {
            title: Some(article.title.trim().to_string()).filter(|t| !t.is_empty()),
            author: article.byline.map(|b| b.trim().to_string()).filter(|b| !b.is_empty()),
            published_date: None,
            description: article.excerpt.map(|e| e.trim().to_string()).filter(|e| !e.is_empty()),
        };

        Ok(Extraction::new(text, metadata))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_readability_extracts_article() {
        let para = "The committee published its findings on Monday after a year of hearings. ".repeat(8);
        let html = format!(
            "<html><head><title>Findings published</title></head><body>\
             <div class=\"nav\"><a href=\"/\">Home</a></div>\
             <article><h1>Findings published</h1><p>{para}</p><p>{para}</p></article></body></html>"
        );
        let result = ReadabilityEngine.attempt(&html, None).unwrap();
        assert!(result.text.contains("committee published its findings"));
        assert_eq!(ReadabilityEngine.name(), SourceEngine::Readability);
    }

    #[test]
    fn test_readability_empty_markup() {
        assert!(ReadabilityEngine.attempt("", None).unwrap().text.is_empty());
    }
}
