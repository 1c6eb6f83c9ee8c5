//! Discard rules.
//!
//! Identify boilerplate elements (navigation, footers, sidebars, share bars,
//! ads, hidden blocks) that should be removed before text is collected.

use dom_query::Selection;

use crate::dom;
use crate::patterns;
use crate::selector::utils::{attr, class, contains, id, lower, tag};
use crate::selector::{query_all, Rule};

/// Discard rules, any match removes the element.
pub static DISCARD_RULES: &[Rule] = &[discard_rule_1, discard_rule_2, discard_rule_3];

/// Rule 1: boilerplate class/id names on block containers.
///
/// Only `div`, `section`, `ul`, `ol`, `li`, `p`, `span`, `dl`, `dd`, `dt`
/// are tested; an `<article>` with a stray "share" class is never dropped.
#[must_use]
pub fn discard_rule_1(sel: &Selection) -> bool {
    let tag_val = tag(sel);
    if !matches!(
        tag_val.as_str(),
        "div" | "section" | "ul" | "ol" | "li" | "p" | "span" | "dl" | "dd" | "dt"
    ) {
        return false;
    }

    let id_val = id(sel);
    let class_val = class(sel);
    let role = attr(sel, "role");

    patterns::is_boilerplate_name(&class_val)
        || patterns::is_boilerplate_name(&id_val)
        || contains(&lower(&id_val), "footer")
        || matches!(role.as_str(), "navigation" | "banner" | "contentinfo" | "complementary")
}

/// Rule 2: hidden elements.
#[must_use]
pub fn discard_rule_2(sel: &Selection) -> bool {
    let style = lower(&attr(sel, "style")).replace(' ', "");

    attr(sel, "aria-hidden") == "true"
        || dom::has_attribute(sel, "hidden")
        || contains(&style, "display:none")
        || contains(&style, "visibility:hidden")
}

/// Rule 3: structural chrome (`header`, `nav`, `aside`).
#[must_use]
pub fn discard_rule_3(sel: &Selection) -> bool {
    matches!(tag(sel).as_str(), "header" | "nav" | "aside")
}

/// Whether the element matches any discard rule.
///
/// ```rust
/// use news_extract::selector::discard;
/// use news_extract::dom;
///
/// let doc = dom::parse(r#"<div class="share-buttons">Share</div>"#);
/// assert!(discard::should_discard(&doc.select("div")));
/// ```
#[must_use]
pub fn should_discard(sel: &Selection) -> bool {
    DISCARD_RULES.iter().any(|rule| rule(sel))
}

/// All elements below `root` that match a discard rule, in document order.
#[must_use]
pub fn find_discardable<'a>(root: &Selection<'a>) -> Vec<Selection<'a>> {
    query_all(root, should_discard)
}
