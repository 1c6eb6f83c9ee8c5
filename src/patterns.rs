//! Compiled regex patterns and keyword lists for content extraction.
//!
//! All patterns are compiled once using `LazyLock`. Patterns are grouped by
//! their purpose in the pipeline.

#![allow(clippy::expect_used)]

use std::sync::LazyLock;

use regex::Regex;

// =============================================================================
// Boilerplate Detection Patterns
// =============================================================================

/// Matches class/id tokens indicating navigation elements.
///
/// `nav` only matches as a whole token or at a token edge, so layout
/// containers like `in-page-nav-container` are left alone. Generic
/// `header`/`footer` are not matched: `article-header` is content.
pub static NAVIGATION_CLASS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(^nav$|^nav[-_]|[-_]nav$|navbar|navigation|top[-_]?nav|main[-_]?menu|site[-_]?nav|\bmenu\b|site[-_]?footer|site[-_]?header|page[-_]?header|page[-_]?footer|breadcrumb(?:s)?|crumb(?:s)?)",
    )
    .expect("NAVIGATION_CLASS regex")
});

/// Matches whole class/id tokens indicating advertisements.
pub static ADVERTISEMENT_CLASS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(ad|ads|advert|advertisement|sponsor|sponsored|promo)$")
        .expect("ADVERTISEMENT_CLASS regex")
});

/// Matches class/id tokens indicating boilerplate blocks around an article.
pub static BOILERPLATE_CLASS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(comment|shar(?:e|ing)|social|related|recommend(?:ed)?|\bfooter\b|site[-_]?footer|copyright|legal|disclaimer|more[-_]?from|you[-_]?may[-_]?like|taboola|outbrain|mgid|revcontent|zergnet|cookie[-_]?consent|privacy[-_]?consent|gdpr[-_]?consent|cookie[-_]?notice|cookie[-_]?banner|consent[-_]?banner|\blogin\b|\bsignin\b|\bsign[-_]?in\b|\bsignup\b|\bsign[-_]?up\b|\bsubscribe\b|subscription|newsletter|paywall|trending|popular|most[-_]?read|top[-_]?stories|\bbyline\b|photo[-_]?credit|image[-_]?credit|caption|addtoany|shareaholic|share[-_]?btn|social[-_]?btn|post[-_]?meta|entry[-_]?meta|tag[-_]?cloud|category[-_]?list|filed[-_]?under)",
    )
    .expect("BOILERPLATE_CLASS regex")
});

// =============================================================================
// Content Identification Patterns
// =============================================================================

/// Matches class/id names likely to contain main content.
pub static CONTENT_CLASS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(article|content|post|entry|story|text|body|main)")
        .expect("CONTENT_CLASS regex")
});

// =============================================================================
// Metadata Patterns
// =============================================================================

/// Separators between an article title and the site name in `<title>`.
pub static TITLE_SEPARATOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\s*[\|–—·]\s*|\s+-\s+|\s*:\s+").expect("TITLE_SEPARATOR regex")
});

/// Leading byline prefixes ("By", "Written by").
pub static BYLINE_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*(?:written\s+by|posted\s+by|by)\s*:?\s+").expect("BYLINE_PREFIX regex")
});

/// Email addresses inside author strings.
pub static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\S+@\S+\.\S+").expect("EMAIL regex")
});

// =============================================================================
// Keyword Lists
// =============================================================================

/// Words that open navigation menus rather than articles.
pub const NAV_KEYWORDS: &[&str] = &[
    "home", "about", "contact", "menu", "search", "login", "log in", "sign in", "sign up",
    "subscribe", "register", "news", "sports", "business", "politics", "opinion", "weather",
    "privacy", "terms", "skip to",
];

/// Position words that mark a real sidebar (`left-sidebar`) rather than a
/// theme namespace (`newspaper-x-sidebar`).
const SIDEBAR_POSITION_WORDS: &[&str] = &["left", "right", "primary", "secondary", "main", "widget"];

/// Suffixes that make an `author-*` token an author box rather than a
/// taxonomy class like `author-jane-doe`.
const AUTHOR_BOX_SUFFIXES: &[&str] = &[
    "box", "bio", "info", "avatar", "meta", "wrap", "description", "details", "card", "profile",
];

/// Whether a class or id attribute value names a boilerplate block.
///
/// Each whitespace-separated token is checked on its own, so one content
/// class next to a layout class does not hide a boilerplate match.
#[must_use]
pub fn is_boilerplate_name(name: &str) -> bool {
    for token in name.split_whitespace() {
        if NAVIGATION_CLASS.is_match(token) || BOILERPLATE_CLASS.is_match(token) {
            return true;
        }

        let parts: Vec<&str> = token.split(['-', '_']).collect();
        for (i, part) in parts.iter().enumerate() {
            let part = part.to_ascii_lowercase();
            match part.as_str() {
                "sidebar" => {
                    if i == 0 || SIDEBAR_POSITION_WORDS.contains(&parts[i - 1]) {
                        return true;
                    }
                }
                "author" => {
                    if parts.len() == 1
                        || parts.get(i + 1).is_some_and(|next| AUTHOR_BOX_SUFFIXES.contains(next))
                    {
                        return true;
                    }
                }
                "widget" => {
                    // Elementor wraps real content in `elementor-widget-*`.
                    if i == 0 || parts[i - 1] != "elementor" {
                        return true;
                    }
                }
                _ => {}
            }
        }
    }

    // Only the first token can be an ad marker: `body-ad-wrapper` is not an ad.
    name.split(|c: char| !c.is_ascii_alphanumeric())
        .next()
        .is_some_and(|token| !token.is_empty() && ADVERTISEMENT_CLASS.is_match(token))
}
