//! Primary extraction engine.
//!
//! Precision-oriented extraction tuned for editorial pages:
//!
//! 1. metadata and JSON-LD `articleBody` are read from the untouched document
//! 2. the document is cleaned (`html_processing::doc_cleaning`)
//! 3. the content node is found with the content rules, or else with
//!    density scoring over `div`/`section`/`article`/`main`; listing pages
//!    have none
//! 4. filtered text is collected from that node
//! 5. navigation-like or link-heavy output is dropped
//! 6. a substantial JSON-LD body replaces empty or much shorter DOM text

use dom_query::{Document, Selection};
use tracing::debug;
use url::Url;

use super::{Extraction, ExtractionStrategy};
use crate::dom;
use crate::error::EngineError;
use crate::html_processing;
use crate::link_density::link_density;
use crate::metadata;
use crate::patterns;
use crate::result::SourceEngine;
use crate::selector;
use crate::text;
use crate::Options;

/// Minimum share of body text the density-scored candidate must hold.
const MIN_CANDIDATE_COVERAGE: f64 = 0.3;

/// Navigation keywords at the start of the output that mark a menu.
const NAV_KEYWORD_LIMIT: usize = 3;

/// Characters inspected by the navigation check.
const NAV_PREFIX_CHARS: usize = 100;

/// Precision engine. See the module docs for the pipeline.
#[derive(Debug, Clone, Default)]
pub struct PrimaryEngine {
    options: Options,
}

impl PrimaryEngine {
    #[must_use]
    pub fn new(options: Options) -> Self {
        Self { options }
    }

    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }
}

impl ExtractionStrategy for PrimaryEngine {
    fn name(&self) -> SourceEngine {
        SourceEngine::Primary
    }

    fn attempt(&self, markup: &str, _url: Option<&Url>) -> Result<Extraction, EngineError> {
        if markup.trim().is_empty() {
            return Ok(Extraction::default());
        }

        let doc = dom::parse(markup);
        let metadata = metadata::extract_metadata(&doc, &self.options);
        let structured_body = metadata::extract_article_body(&doc);

        html_processing::doc_cleaning(&doc);

        let dom_text = match find_content_node(&doc, &self.options) {
            Some(node) => {
                let collected = html_processing::collect_text(&node, &self.options, metadata.title.as_deref());
                self.precision_gate(&node, collected)
            }
            None => {
                debug!("primary: no content node");
                String::new()
            }
        };

        let text = choose_text(dom_text, structured_body.as_deref(), &self.options);
        Ok(Extraction::new(text, metadata))
    }
}

impl PrimaryEngine {
    /// Drop output that reads as navigation or is dominated by links.
    fn precision_gate(&self, node: &Selection, collected: String) -> String {
        if collected.is_empty() {
            return collected;
        }
        if looks_like_navigation(&collected) {
            debug!("primary: output starts like a navigation menu");
            return String::new();
        }
        let density = link_density(node);
        if density > self.options.max_link_density {
            debug!(link_density = density, "primary: output is link-dense");
            return String::new();
        }
        collected
    }
}

/// Content node from the content rules, else the best density-scored
/// candidate.
fn find_content_node<'a>(doc: &'a Document, options: &Options) -> Option<Selection<'a>> {
    let body = doc.select("body");
    if body.length() == 0 {
        return None;
    }
    if selector::content::is_listing_page(&body) {
        debug!("primary: listing page");
        return None;
    }

    selector::content::find_content(&body).or_else(|| find_heuristic_content_node(doc, &body, options))
}

/// Score every `div`, `section`, `article` and `main` by text density and
/// structure.
///
/// The best candidate must reach `Options::content_score_threshold` and hold
/// at least 30% of the body text; otherwise there is no content node.
fn find_heuristic_content_node<'a>(
    doc: &'a Document,
    body: &Selection<'a>,
    options: &Options,
) -> Option<Selection<'a>> {
    let body_len = dom::text_len(body);
    if body_len == 0 {
        return None;
    }

    let mut best_score: i64 = 0;
    let mut best: Option<(Selection<'a>, usize)> = None;

    for tag in ["div", "section", "article", "main"] {
        for node in doc.select(tag).nodes() {
            let el = Selection::from(*node);

            if el.attr("class").is_some_and(|c| patterns::is_boilerplate_name(&c))
                || el.attr("id").is_some_and(|i| patterns::is_boilerplate_name(&i))
            {
                continue;
            }

            let cleaned = text::collapse_whitespace(&dom::text_content(&el));
            let text_len = cleaned.chars().count();
            if text_len == 0 {
                continue;
            }

            let score = score_content_node(&el, &cleaned, text_len, element_depth(&el));
            if score > best_score {
                best_score = score;
                best = Some((el, text_len));
            }
        }
    }

    if best_score < options.content_score_threshold() {
        debug!(best_score, "primary: no candidate reached the score threshold");
        return None;
    }

    let (node, text_len) = best?;
    let coverage = text_len as f64 / body_len as f64;
    (coverage >= MIN_CANDIDATE_COVERAGE).then_some(node)
}

/// Text length, paragraphs, headings and sentences raise the score; links
/// lower it. Link-dense candidates are halved.
fn score_content_node(el: &Selection, cleaned_text: &str, text_len: usize, depth: i64) -> i64 {
    let text_len = to_i64(text_len);
    let sentence_count = count_sentences(cleaned_text);

    let paragraphs = el.select("p");
    let p_count = to_i64(paragraphs.length());
    let substantive_p_count = to_i64(paragraphs.iter().filter(|p| dom::text_len(p) >= 100).count());
    let h_count = to_i64(el.select("h1, h2, h3, h4, h5, h6").length());

    let links = el.select("a");
    let a_count = to_i64(links.length());
    let link_text_len: i64 = links.iter().map(|a| to_i64(dom::text_len(&a))).sum();
    let density = link_text_len as f64 / text_len as f64;

    let effective_text_len = text_len.min(8000);
    let effective_sentence_count = sentence_count.min(effective_text_len / 50);

    let mut score = effective_text_len;
    score = score.saturating_add(p_count.saturating_mul(200));
    score = score.saturating_add(h_count.saturating_mul(100));
    score = score.saturating_add(substantive_p_count.saturating_mul(300));
    score = score.saturating_add(effective_sentence_count.saturating_mul(50));
    score = score.saturating_sub(a_count.saturating_mul(50));
    score = score.saturating_add(depth.saturating_mul(10));

    if density > 0.5 {
        score /= 2;
    }
    score
}

fn element_depth(el: &Selection) -> i64 {
    let mut depth: i64 = 0;
    let mut current = el.parent();
    while current.length() > 0 {
        if dom::tag_name(&current).as_deref() == Some("body") {
            break;
        }
        depth = depth.saturating_add(1);
        current = current.parent();
    }
    depth
}

fn count_sentences(text: &str) -> i64 {
    let mut count: i64 = 0;
    let mut prev_term = false;
    for ch in text.chars() {
        let is_term = matches!(ch, '.' | '!' | '?');
        if is_term && !prev_term {
            count = count.saturating_add(1);
        }
        prev_term = is_term;
    }
    count
}

fn to_i64(n: usize) -> i64 {
    i64::try_from(n).unwrap_or(i64::MAX)
}

/// Whether the first characters of `text` hold several menu keywords.
fn looks_like_navigation(text: &str) -> bool {
    let prefix: String = text
        .chars()
        .take(NAV_PREFIX_CHARS)
        .map(|c| if c.is_alphanumeric() { c.to_ascii_lowercase() } else { ' ' })
        .collect();
    let padded = format!(" {} ", text::collapse_whitespace(&prefix));

    patterns::NAV_KEYWORDS
        .iter()
        .filter(|kw| padded.contains(&format!(" {kw} ")))
        .count()
        >= NAV_KEYWORD_LIMIT
}

/// DOM text, unless a substantial JSON-LD body is clearly better.
fn choose_text(dom_text: String, structured_body: Option<&str>, options: &Options) -> String {
    let Some(body) = structured_body else {
        return dom_text;
    };

    let body = if body.contains('<') {
        text::strip_markup(body)
    } else {
        text::normalize(body)
    };
    let body_len = body.chars().count();
    if body_len < options.min_structured_body_len {
        return dom_text;
    }

    let dom_len = dom_text.chars().count();
    if dom_len == 0 || dom_len.saturating_mul(2) < body_len {
        debug!(dom_len, body_len, "primary: using JSON-LD articleBody");
        return body;
    }
    dom_text
}
