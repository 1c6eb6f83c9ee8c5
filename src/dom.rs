//! DOM operations adapter.
//!
//! Thin helpers over `dom_query` so the engines read in terms of tags,
//! attributes and text rather than raw selection plumbing.

pub use dom_query::{Document, NodeRef, Selection};
pub use tendril::StrTendril;

// === Parsing ===

/// Parse an HTML string into a document.
///
/// Parsing never fails: malformed markup is repaired the way browsers do.
#[inline]
#[must_use]
pub fn parse(html: &str) -> Document {
    Document::from(html)
}

// === Attribute Operations ===

/// Element id attribute.
#[inline]
#[must_use]
pub fn id(sel: &Selection) -> Option<String> {
    sel.attr("id").map(|s| s.to_string())
}

/// Element class attribute.
#[inline]
#[must_use]
pub fn class_name(sel: &Selection) -> Option<String> {
    sel.attr("class").map(|s| s.to_string())
}

/// Any attribute value.
#[inline]
#[must_use]
pub fn get_attribute(sel: &Selection, name: &str) -> Option<String> {
    sel.attr(name).map(|s| s.to_string())
}

/// Whether the attribute is present, even if empty.
#[inline]
#[must_use]
pub fn has_attribute(sel: &Selection, name: &str) -> bool {
    sel.has_attr(name)
}

// === Tag/Node Information ===

/// Lowercase tag name of the first node in the selection.
#[must_use]
pub fn tag_name(sel: &Selection) -> Option<String> {
    sel.nodes()
        .first()
        .and_then(NodeRef::node_name)
        .map(|t| t.to_ascii_lowercase())
}

// === Text Content ===

/// All text of the node and its descendants.
///
/// Returns `StrTendril` for zero-copy passing; call `.to_string()` only when
/// owned storage is needed.
#[inline]
#[must_use]
pub fn text_content(sel: &Selection) -> StrTendril {
    sel.text()
}

/// Character count of the trimmed text content.
#[must_use]
pub fn text_len(sel: &Selection) -> usize {
    text_content(sel).trim().chars().count()
}

// === Tree Navigation ===

/// Whether any ancestor of the node carries one of `tags`.
///
/// The walk stops at `<body>`.
#[must_use]
pub fn has_ancestor_tag(node: &NodeRef, tags: &[&str]) -> bool {
    let mut current = node.parent();
    while let Some(parent) = current {
        if let Some(name) = parent.node_name() {
            if name.eq_ignore_ascii_case("body") {
                return false;
            }
            if tags.iter().any(|t| name.eq_ignore_ascii_case(t)) {
                return true;
            }
        }
        current = parent.parent();
    }
    false
}

// === Tree Manipulation ===

/// Remove every HTML comment node below the document root.
pub fn remove_comments(doc: &Document) {
    let root = doc.root();
    let comments: Vec<NodeRef> = root
        .descendants()
        .into_iter()
        .filter(|node| node.is_comment())
        .collect();
    for comment in comments {
        comment.remove_from_parent();
    }
}
