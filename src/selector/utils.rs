//! Helpers used throughout selector rules.
//!
//! Attribute getters return an empty string when the attribute is missing,
//! so rules can chain string tests without unwrapping.

use crate::dom;
use dom_query::Selection;

// === String Utilities ===

/// Case-sensitive contains check.
#[inline]
#[must_use]
pub fn contains(haystack: &str, needle: &str) -> bool {
    haystack.contains(needle)
}

/// Case-sensitive starts-with check.
#[inline]
#[must_use]
pub fn starts_with(s: &str, prefix: &str) -> bool {
    s.starts_with(prefix)
}

/// Lowercase copy.
#[inline]
#[must_use]
pub fn lower(s: &str) -> String {
    s.to_lowercase()
}

/// Whether the space-separated attribute value contains `token` exactly.
#[must_use]
pub fn has_token(value: &str, token: &str) -> bool {
    value.split_whitespace().any(|t| t.eq_ignore_ascii_case(token))
}

// === Element Attribute Helpers ===

/// Element id (empty string if missing).
#[inline]
#[must_use]
pub fn id(sel: &Selection) -> String {
    dom::id(sel).unwrap_or_default()
}

/// Element class (empty string if missing).
#[inline]
#[must_use]
pub fn class(sel: &Selection) -> String {
    dom::class_name(sel).unwrap_or_default()
}

/// Any attribute (empty string if missing).
#[inline]
#[must_use]
pub fn attr(sel: &Selection, name: &str) -> String {
    dom::get_attribute(sel, name).unwrap_or_default()
}

/// Tag name (empty string if missing).
#[inline]
#[must_use]
pub fn tag(sel: &Selection) -> String {
    dom::tag_name(sel).unwrap_or_default()
}

// === Element Type Checks ===

/// Whether the element is one of the specified tags.
///
/// ```rust
/// use news_extract::selector::utils;
/// use news_extract::dom;
///
/// let doc = dom::parse("<article>content</article>");
/// let article = doc.select("article");
///
/// assert!(utils::is_one_of_tags(&article, &["article", "div", "section"]));
/// assert!(!utils::is_one_of_tags(&article, &["div", "span", "p"]));
/// ```
#[inline]
#[must_use]
pub fn is_one_of_tags(sel: &Selection, tags: &[&str]) -> bool {
    let t = tag(sel);
    tags.contains(&t.as_str())
}
