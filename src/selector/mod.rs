//! Selector infrastructure.
//!
//! Rules are plain predicate functions over a `Selection`. The content rules
//! locate the article container; the discard rules mark boilerplate blocks.

use dom_query::Selection;

pub mod content;
pub mod discard;
pub mod utils;

/// A rule that tests whether an element matches some criteria.
pub type Rule = fn(&Selection) -> bool;

/// First element, in document order, for which `rule` returns true.
///
/// ```rust
/// use news_extract::selector::{self, utils};
/// use news_extract::dom;
///
/// let doc = dom::parse(r#"<div><p class="content">text</p></div>"#);
/// let root = doc.select("div");
///
/// fn has_content_class(sel: &dom_query::Selection) -> bool {
///     utils::class(sel).contains("content")
/// }
///
/// assert!(selector::query(&root, has_content_class).is_some());
/// ```
#[must_use]
pub fn query<'a>(root: &Selection<'a>, rule: Rule) -> Option<Selection<'a>> {
    root.select("*")
        .nodes()
        .iter()
        .map(|node| Selection::from(*node))
        .find(|sel| rule(sel))
}

/// All elements, in document order, for which `rule` returns true.
#[must_use]
pub fn query_all<'a>(root: &Selection<'a>, rule: Rule) -> Vec<Selection<'a>> {
    root.select("*")
        .nodes()
        .iter()
        .map(|node| Selection::from(*node))
        .filter(|sel| rule(sel))
        .collect()
}
