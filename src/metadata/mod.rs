//! Metadata extraction.
//!
//! Title, author, publication date and description are read from three
//! sources in priority order: JSON-LD, HTML meta tags, then the DOM. Each
//! source only fills fields the previous ones left empty.

pub mod dom_extraction;
pub mod json_ld;
pub mod meta_tags;

use dom_query::Document;

use crate::result::ArticleMetadata;
use crate::text;
use crate::Options;

pub use dom_extraction::{examine_title_element, extract_dom_author, extract_dom_date, extract_dom_title};
pub use json_ld::{extract_article_body, extract_json_ld};
pub use meta_tags::{examine_meta, parse_meta_date, validate_metadata_name};

/// Extract all metadata from an uncleaned document.
///
/// ```rust
/// use news_extract::{dom, metadata, Options};
///
/// let doc = dom::parse(r#"<html><head><title>Budget vote delayed | Herald</title>
///     <meta name="author" content="Ana Ruiz"></head><body></body></html>"#);
/// let meta = metadata::extract_metadata(&doc, &Options::default());
/// assert_eq!(meta.title.as_deref(), Some("Budget vote delayed"));
/// assert_eq!(meta.author.as_deref(), Some("Ana Ruiz"));
/// ```
#[must_use]
pub fn extract_metadata(doc: &Document, opts: &Options) -> ArticleMetadata {
    let mut metadata = ArticleMetadata::default();

    metadata = json_ld::extract_json_ld(doc, metadata, opts);
    metadata = meta_tags::examine_meta(doc, metadata, opts);

    metadata = dom_extraction::extract_dom_title(doc, metadata, opts);
    metadata = dom_extraction::extract_dom_author(doc, metadata, opts);
    metadata = dom_extraction::extract_dom_date(doc, metadata, opts);

    metadata = post_process_metadata(metadata);

    if metadata.author.as_deref().is_some_and(|a| is_blacklisted_author(a, opts)) {
        metadata.author = None;
    }

    metadata
}

/// Title and description only, from meta tags and the DOM.
#[must_use]
pub fn extract_metadata_light(doc: &Document, opts: &Options) -> ArticleMetadata {
    let full = meta_tags::examine_meta(doc, ArticleMetadata::default(), opts);
    let mut metadata = ArticleMetadata {
        title: full.title,
        description: full.description,
        ..ArticleMetadata::default()
    };

    if metadata.title.is_none() {
        metadata = dom_extraction::extract_dom_title(doc, metadata, opts);
    }

    post_process_metadata(metadata)
}

/// Trim values, strip stray markup, and turn blanks into `None`.
fn post_process_metadata(metadata: ArticleMetadata) -> ArticleMetadata {
    ArticleMetadata {
        title: clean_field(metadata.title, true),
        author: clean_field(metadata.author, false),
        published_date: metadata.published_date,
        description: clean_field(metadata.description, true),
    }
}

fn clean_field(value: Option<String>, strip_markup: bool) -> Option<String> {
    let value = value?;
    let cleaned = if strip_markup {
        text::strip_markup(&value)
    } else {
        text::collapse_whitespace(&value)
    };
    (!cleaned.is_empty()).then_some(cleaned)
}

/// Case-insensitive substring match against `Options::author_blacklist`.
fn is_blacklisted_author(author: &str, opts: &Options) -> bool {
    let author_lower = author.to_lowercase();
    opts.author_blacklist
        .iter()
        .any(|blocked| !blocked.is_empty() && author_lower.contains(&blocked.to_lowercase()))
}
