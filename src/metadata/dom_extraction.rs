//! DOM-based metadata extraction.
//!
//! Fallback metadata search over the document body using CSS selectors and
//! heuristics, used for fields that JSON-LD and meta tags did not provide.

use chrono::{DateTime, Utc};
use dom_query::{Document, Selection};

use crate::dom;
use crate::etree;
use crate::metadata::meta_tags::{parse_meta_date, validate_metadata_name};
use crate::patterns::{BYLINE_PREFIX, EMAIL, TITLE_SEPARATOR};
use crate::result::ArticleMetadata;
use crate::Options;

/// Headline selectors tried after `<h1>`.
const TITLE_SELECTORS: &str = "[itemprop='headline'], .entry-title, .post-title, .article-title, .headline";

/// Byline selectors, most specific first.
const AUTHOR_SELECTORS: &[&str] = &[
    "[rel='author']",
    "[itemprop='author'] [itemprop='name']",
    "[itemprop='author']",
    ".byline-name",
    ".author-name",
    ".byline",
    ".article-author",
    ".post-author",
];

/// Date selectors after `<time>`.
const DATE_SELECTORS: &[&str] = &[
    "[itemprop='datePublished']",
    ".published",
    ".publish-date",
    ".post-date",
    ".entry-date",
    ".article-date",
    ".date",
];

/// Extract the article title from `<title>`, dropping a site-name suffix.
///
/// The longest separator-delimited part wins when it is longer than ten
/// characters, otherwise the whole title is kept.
#[must_use]
pub fn examine_title_element(doc: &Document) -> Option<String> {
    let title_elem = doc.select("title");
    if title_elem.is_empty() {
        return None;
    }

    let title = dom::text_content(&title_elem).trim().to_string();
    if title.is_empty() {
        return None;
    }

    let parts: Vec<&str> = TITLE_SEPARATOR.split(&title).collect();
    if parts.len() > 1 {
        if let Some(part) = parts.iter().map(|p| p.trim()).max_by_key(|p| p.chars().count()) {
            if part.chars().count() > 10 {
                return Some(part.to_string());
            }
        }
    }

    Some(title)
}

/// Title from `<h1>`, headline selectors, then `<title>`.
#[must_use]
pub fn extract_dom_title(doc: &Document, original: ArticleMetadata, _opts: &Options) -> ArticleMetadata {
    let mut result = original;
    if result.title.is_some() {
        return result;
    }

    for h1 in doc.select("h1").nodes() {
        let text = element_text(&Selection::from(*h1));
        let len = text.chars().count();
        if len > 5 && len < 200 {
            result.title = Some(text);
            return result;
        }
    }

    for node in doc.select(TITLE_SELECTORS).nodes() {
        let text = element_text(&Selection::from(*node));
        if text.chars().count() > 5 {
            result.title = Some(text);
            return result;
        }
    }

    result.title = examine_title_element(doc);
    result
}

/// Author from byline elements.
#[must_use]
pub fn extract_dom_author(doc: &Document, original: ArticleMetadata, _opts: &Options) -> ArticleMetadata {
    let mut result = original;
    if result.author.is_some() {
        return result;
    }

    for selector in AUTHOR_SELECTORS {
        for node in doc.select(selector).nodes() {
            let elem = Selection::from(*node);
            // `<meta itemprop="author" content="...">` inside the body
            let raw = dom::get_attribute(&elem, "content").unwrap_or_else(|| element_text(&elem));
            if let Some(name) = normalize_author(&raw) {
                result.author = Some(name);
                return result;
            }
        }
    }

    result
}

/// Publication date from `<time datetime>`, `<time>` text or date classes.
#[must_use]
pub fn extract_dom_date(doc: &Document, original: ArticleMetadata, _opts: &Options) -> ArticleMetadata {
    let mut result = original;
    if result.published_date.is_some() {
        return result;
    }

    result.published_date = find_time_element_date(doc).or_else(|| find_selector_date(doc));
    result
}

fn find_time_element_date(doc: &Document) -> Option<DateTime<Utc>> {
    doc.select("time").nodes().iter().find_map(|node| {
        let time = Selection::from(*node);
        dom::get_attribute(&time, "datetime")
            .and_then(|d| parse_meta_date(&d))
            .or_else(|| parse_meta_date(&element_text(&time)))
    })
}

fn find_selector_date(doc: &Document) -> Option<DateTime<Utc>> {
    DATE_SELECTORS.iter().find_map(|selector| {
        doc.select(selector).nodes().iter().find_map(|node| {
            let elem = Selection::from(*node);
            dom::get_attribute(&elem, "content")
                .or_else(|| dom::get_attribute(&elem, "datetime"))
                .and_then(|d| parse_meta_date(&d))
                .or_else(|| parse_meta_date(&element_text(&elem)))
        })
    })
}

/// Clean a byline: drop "By" prefixes, emails and handles, then validate.
fn normalize_author(raw: &str) -> Option<String> {
    let name = BYLINE_PREFIX.replace(raw.trim(), "");
    let name = EMAIL.replace_all(&name, "");
    let name = name
        .split_whitespace()
        .filter(|w| !w.starts_with('@'))
        .collect::<Vec<_>>()
        .join(" ");
    let name = name.trim_matches(|c: char| c == ',' || c == '|' || c.is_whitespace());

    validate_metadata_name(name).then(|| name.to_string())
}

fn element_text(sel: &Selection) -> String {
    etree::iter_text(sel, " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    fn run<F>(html: &str, f: F) -> ArticleMetadata
    where
        F: Fn(&Document, ArticleMetadata, &Options) -> ArticleMetadata,
    {
        f(&dom::parse(html), ArticleMetadata::default(), &Options::default())
    }

    #[test]
    fn test_examine_title_element_strips_site_name() {
        let doc = dom::parse("<html><head><title>Storm hits the coast | Daily News</title></head></html>");
        assert_eq!(examine_title_element(&doc).as_deref(), Some("Storm hits the coast"));
    }

    #[test]
    fn test_examine_title_element_keeps_short_title() {
        let doc = dom::parse("<html><head><title>T</title></head></html>");
        assert_eq!(examine_title_element(&doc).as_deref(), Some("T"));
        let doc = dom::parse("<html><head><title>Hi - News</title></head></html>");
        assert_eq!(examine_title_element(&doc).as_deref(), Some("Hi - News"));
    }

    #[test]
    fn test_dom_title_prefers_h1() {
        let result = run(
            "<html><head><title>Page | Site</title></head><body><h1>The Real Headline</h1></body></html>",
            extract_dom_title,
        );
        assert_eq!(result.title.as_deref(), Some("The Real Headline"));
    }

    #[test]
    fn test_dom_title_falls_back_to_title_element() {
        let result = run("<html><head><title>T</title></head><body><h1>Hi</h1></body></html>", extract_dom_title);
        assert_eq!(result.title.as_deref(), Some("T"));
    }

    #[test]
    fn test_dom_author_from_byline() {
        let result = run(
            r#"<body><div class="byline">By Maria Garcia maria@example.com</div></body>"#,
            extract_dom_author,
        );
        assert_eq!(result.author.as_deref(), Some("Maria Garcia"));
    }

    #[test]
    fn test_dom_author_rejects_junk() {
        let result = run(r#"<body><a rel="author">https://example.com/staff</a></body>"#, extract_dom_author);
        assert!(result.author.is_none());
    }

    #[test]
    fn test_dom_date_from_time_element() {
        let result = run(
            r#"<body><time datetime="2023-11-02T08:00:00Z">Nov 2</time></body>"#,
            extract_dom_date,
        );
        let date = result.published_date.unwrap();
        assert_eq!((date.year(), date.month(), date.day()), (2023, 11, 2));
    }

    #[test]
    fn test_dom_date_from_class() {
        let result = run(r#"<body><span class="post-date">2022-06-30</span></body>"#, extract_dom_date);
        assert!(result.published_date.is_some());
    }
}
