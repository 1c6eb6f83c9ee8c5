//! Fallback extraction engine.
//!
//! Structural extraction for pages the primary engine cannot read: strip
//! non-content tags and boilerplate blocks, pick the first container that
//! looks like the article, and return its visible text.

use dom_query::{Document, Selection};
use url::Url;

use super::{Extraction, ExtractionStrategy};
use crate::dom;
use crate::error::EngineError;
use crate::html_processing;
use crate::metadata;
use crate::patterns::CONTENT_CLASS;
use crate::result::SourceEngine;
use crate::selector::discard::find_discardable;
use crate::selector::utils::{attr, class, has_token, id, is_one_of_tags, tag};
use crate::selector::{self, content};
use crate::Options;

/// Elements that never hold article text.
const BASIC_CLEANING_SELECTOR: &str =
    "script, style, nav, footer, header, aside, iframe, noscript, form, svg";

/// Class tokens of generic article containers.
const CONTAINER_CLASS_TOKENS: &[&str] = &["content", "article", "post", "entry-content"];

/// Ids of generic article containers.
const CONTAINER_IDS: &[&str] = &["content", "article", "post"];

/// Denylist-based structural engine.
#[derive(Debug, Clone, Default)]
pub struct FallbackEngine {
    options: Options,
}

impl FallbackEngine {
    #[must_use]
    pub fn new(options: Options) -> Self {
        Self { options }
    }
}

impl ExtractionStrategy for FallbackEngine {
    fn name(&self) -> SourceEngine {
        SourceEngine::Fallback
    }

    fn attempt(&self, markup: &str, _url: Option<&Url>) -> Result<Extraction, EngineError> {
        if markup.trim().is_empty() {
            return Ok(Extraction::default());
        }

        let doc = dom::parse(markup);
        let metadata = metadata::extract_metadata_light(&doc, &self.options);

        basic_cleaning(&doc);

        let text = find_container(&doc)
            .map(|container| html_processing::visible_text(&container))
            .unwrap_or_default();
        Ok(Extraction::new(text, metadata))
    }
}

/// Remove non-content tags, then every block a discard rule matches.
fn basic_cleaning(doc: &Document) {
    doc.select(BASIC_CLEANING_SELECTOR).remove();

    let body = doc.select("body");
    for sel in find_discardable(&body).into_iter().rev() {
        sel.remove();
    }
}

/// First matching container, most specific first. Listing pages have none.
fn find_container(doc: &Document) -> Option<Selection<'_>> {
    let body = doc.select("body");
    if content::is_listing_page(&body) {
        return None;
    }

    selector::query(&body, |sel| tag(sel) == "article")
        .or_else(|| selector::query(&body, |sel| tag(sel) == "main"))
        .or_else(|| selector::query(&body, |sel| attr(sel, "role") == "main"))
        .or_else(|| selector::query(&body, is_class_container))
        .or_else(|| selector::query(&body, is_id_container))
        .or_else(|| largest_content_block(doc))
}

fn is_class_container(sel: &Selection) -> bool {
    let class = class(sel);
    tag(sel) == "div" && CONTAINER_CLASS_TOKENS.iter().any(|token| has_token(&class, token))
}

fn is_id_container(sel: &Selection) -> bool {
    tag(sel) == "div" && CONTAINER_IDS.contains(&id(sel).trim())
}

/// Largest text-bearing `div`/`section` whose class or id contains a
/// content word.
fn largest_content_block(doc: &Document) -> Option<Selection<'_>> {
    doc.select("div, section")
        .nodes()
        .iter()
        .map(|node| Selection::from(*node))
        .filter(|sel| is_one_of_tags(sel, &["div", "section"]))
        .filter(|sel| {
            let name = format!(
                "{} {}",
                sel.attr("class").unwrap_or_default(),
                sel.attr("id").unwrap_or_default()
            );
            CONTENT_CLASS.is_match(&name)
        })
        .map(|sel| {
            let len = dom::text_len(&sel);
            (sel, len)
        })
        .filter(|(_, len)| *len > 0)
        .max_by_key(|(_, len)| *len)
        .map(|(sel, _)| sel)
}
