//! HTML meta tag extraction.
//!
//! Reads standard `<meta name>` tags, Open Graph and Twitter cards, Dublin
//! Core and the article tags news CMSs emit (`article:published_time`,
//! `parsely-*`, `sailthru.*`).

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use dom_query::{Document, Selection};

use crate::dom;
use crate::result::ArticleMetadata;
use crate::Options;

/// Fill missing metadata fields from `<meta>` tags.
///
/// The first usable value for a field wins; fields already set in
/// `original` are left alone.
#[must_use]
pub fn examine_meta(doc: &Document, original: ArticleMetadata, _opts: &Options) -> ArticleMetadata {
    let mut result = original;

    for node in doc.select("meta").nodes() {
        let meta = Selection::from(*node);

        let name = dom::get_attribute(&meta, "name")
            .or_else(|| dom::get_attribute(&meta, "property"))
            .or_else(|| dom::get_attribute(&meta, "itemprop"))
            .unwrap_or_default()
            .to_lowercase();
        let content = dom::get_attribute(&meta, "content").unwrap_or_default();

        if name.is_empty() || content.trim().is_empty() {
            continue;
        }

        match name.as_str() {
            "author" | "article:author" | "dc.creator" | "byl" | "sailthru.author"
            | "parsely-author" => {
                if result.author.is_none() && validate_metadata_name(&content) {
                    result.author = Some(content);
                }
            }

            "og:title" | "twitter:title" | "dc.title" | "sailthru.title" | "parsely-title"
            | "headline" => {
                if result.title.is_none() {
                    result.title = Some(content);
                }
            }

            "description" | "og:description" | "twitter:description" | "dc.description" => {
                if result.description.is_none() {
                    result.description = Some(content);
                }
            }

            "article:published_time" | "og:article:published_time" | "article:published"
            | "article.published" | "article:created" | "date" | "dc.date" | "dc.date.issued"
            | "dcterms.created" | "datepublished" | "sailthru.date" | "parsely-pub-date"
            | "pubdate" | "publish_date" | "publishdate" | "timestamp" => {
                if result.published_date.is_none() {
                    result.published_date = parse_meta_date(&content);
                }
            }

            _ => {}
        }
    }

    result
}

/// Whether a metadata value looks like a real person's name.
///
/// Rejects URLs, handles, JSON fragments, ids and very short or long values.
#[must_use]
pub fn validate_metadata_name(name: &str) -> bool {
    let name = name.trim();

    if name.chars().count() < 2 || name.chars().count() > 120 {
        return false;
    }
    if name.len() > 20 && !name.contains(' ') {
        return false;
    }
    if name.starts_with("http://") || name.starts_with("https://") || name.starts_with("www.") {
        return false;
    }
    if name.contains(".com") || name.contains(".org") || name.contains(".net") {
        return false;
    }
    if name.starts_with('{') || name.starts_with('[') || name.starts_with('@') {
        return false;
    }
    if name.chars().filter(char::is_ascii_digit).count() > 3 {
        return false;
    }

    let special_count = name
        .chars()
        .filter(|c| !c.is_alphanumeric() && !c.is_whitespace() && !matches!(c, '-' | '\'' | '.' | ','))
        .count();
    special_count <= 2
}

/// Parse a date from meta tags, JSON-LD or `<time>` elements.
///
/// Supports RFC 3339, ISO 8601 without offset, and common date-only forms.
#[must_use]
pub fn parse_meta_date(date_str: &str) -> Option<DateTime<Utc>> {
    let date_str = date_str.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(date_str) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_str(date_str, "%Y-%m-%dT%H:%M:%S%z") {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(date_str) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(date_str, fmt) {
            return Some(dt.and_utc());
        }
    }

    let formats = [
        "%Y-%m-%d",
        "%Y/%m/%d",
        "%d.%m.%Y",
        "%B %d, %Y", // January 15, 2024
        "%b %d, %Y", // Jan 15, 2024
        "%d %B %Y",  // 15 January 2024
    ];
    for fmt in formats {
        if let Ok(date) = NaiveDate::parse_from_str(date_str, fmt) {
            return Some(date.and_hms_opt(0, 0, 0)?.and_utc());
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    fn meta(html: &str) -> ArticleMetadata {
        examine_meta(&dom::parse(html), ArticleMetadata::default(), &Options::default())
    }

    #[test]
    fn test_standard_meta_tags() {
        let result = meta(
            r#"<html><head>
            <meta name="author" content="John Smith">
            <meta name="description" content="A test article.">
            <meta property="og:title" content="OG Title">
            <meta property="article:published_time" content="2024-01-15T10:30:00+02:00">
            </head><body></body></html>"#,
        );

        assert_eq!(result.author.as_deref(), Some("John Smith"));
        assert_eq!(result.description.as_deref(), Some("A test article."));
        assert_eq!(result.title.as_deref(), Some("OG Title"));
        let date = result.published_date.unwrap();
        assert_eq!(date.hour(), 8);
    }

    #[test]
    fn test_first_value_wins() {
        let result = meta(
            r#"<meta property="og:description" content="First"><meta name="description" content="Second">"#,
        );
        assert_eq!(result.description.as_deref(), Some("First"));
    }

    #[test]
    fn test_existing_fields_are_kept() {
        let doc = dom::parse(r#"<meta property="og:title" content="OG Title">"#);
        let original = ArticleMetadata {
            title: Some("Known".to_string()),
            ..ArticleMetadata::default()
        };
        let result = examine_meta(&doc, original, &Options::default());
        assert_eq!(result.title.as_deref(), Some("Known"));
    }

    #[test]
    fn test_invalid_author_is_ignored() {
        let result = meta(r#"<meta name="author" content="https://facebook.com/newsroom">"#);
        assert!(result.author.is_none());
    }

    #[test]
    fn test_validate_metadata_name() {
        assert!(validate_metadata_name("Jane O'Neil"));
        assert!(validate_metadata_name("Smith, John"));
        assert!(!validate_metadata_name("J"));
        assert!(!validate_metadata_name("@newsdesk"));
        assert!(!validate_metadata_name("user123456"));
    }

    #[test]
    fn test_parse_meta_date_formats() {
        let date = parse_meta_date("2024-03-05").unwrap();
        assert_eq!((date.year(), date.month(), date.day()), (2024, 3, 5));
        assert!(parse_meta_date("March 5, 2024").is_some());
        assert!(parse_meta_date("Tue, 05 Mar 2024 10:00:00 GMT").is_some());
        assert!(parse_meta_date("2024-03-05T10:00:00.123").is_some());
        assert!(parse_meta_date("yesterday").is_none());
    }
}
