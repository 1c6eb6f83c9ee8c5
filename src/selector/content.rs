//! Content selector rules.
//!
//! These rules identify the main article container on a page. They are
//! checked in priority order: the first rule with an acceptable match wins.

use dom_query::{NodeRef, Selection};

use crate::dom;
use crate::patterns;
use crate::selector::utils::{attr, class, contains, id, lower, starts_with, tag};
use crate::selector::{query_all, Rule};

/// Content selector rules in priority order.
pub static CONTENT_RULES: &[Rule] = &[
    content_rule_1,
    content_rule_2,
    content_rule_3,
    content_rule_4,
    content_rule_5,
];

/// Minimum trimmed text length for a matched container.
///
/// A shorter match (often an `itemprop="articleBody"` wrapper holding only
/// meta tags) is replaced by its parent when the parent has real text.
const MIN_CONTENT_TEXT_LEN: usize = 100;

/// Structural tags whose contents never hold the article.
const BOILERPLATE_ANCESTORS: &[&str] = &["header", "nav", "aside", "footer"];

/// Sibling `<article>` elements under one parent that make a listing page.
const LISTING_MIN_ARTICLES: usize = 3;

/// Rule 1: explicit article body markers.
///
/// Matches `itemprop="articleBody"`, `class*="article-body"`,
/// `class*="entry-content"`, `class*="post-content"` and the like on
/// `article`, `div`, `main` and `section` elements.
#[must_use]
pub fn content_rule_1(sel: &Selection) -> bool {
    let tag = tag(sel);
    if !matches!(tag.as_str(), "article" | "div" | "main" | "section") {
        return false;
    }

    let id = id(sel);
    let class = class(sel);
    let id_lower = lower(&id);
    let class_lower = lower(&class);

    attr(sel, "itemprop") == "articleBody"
        || class == "post"
        || class == "entry"
        || contains(&class, "post-text")
        || contains(&class, "post-body")
        || contains(&class, "post-content")
        || contains(&class, "post_content")
        || contains(&class_lower, "postcontent")
        || contains(&class, "entry-content")
        || contains(&id, "entry-content")
        || contains(&class, "article-text")
        || contains(&class_lower, "articletext")
        || contains(&class, "article-content")
        || contains(&id, "article-content")
        || contains(&class, "article__content")
        || contains(&class, "article-body")
        || contains(&id, "article-body")
        || contains(&class, "article__body")
        || contains(&class, "article_body")
        || contains(&id_lower, "articlebody")
        || contains(&class_lower, "articlebody")
        || contains(&class, "story-body")
        || contains(&id, "story-body")
        || contains(&id_lower, "storybody")
        || contains(&class_lower, "storybody")
        || contains(&class, "body-text")
        || contains(&class, "text-content")
        || contains(&class, "news-text")
        || contains(&class, "news-body")
        || contains(&class, "blog-content")
        || contains(&class, "wysiwyg")
}

/// Rule 2: the `<article>` element.
#[must_use]
pub fn content_rule_2(sel: &Selection) -> bool {
    tag(sel) == "article"
}

/// Rule 3: story content markers and `role="article"`.
#[must_use]
pub fn content_rule_3(sel: &Selection) -> bool {
    let tag = tag(sel);
    if !matches!(tag.as_str(), "div" | "main" | "section") {
        return false;
    }

    let id = id(sel);
    let class = class(sel);

    attr(sel, "role") == "article"
        || contains(&class, "story-content")
        || contains(&lower(&class), "storycontent")
        || contains(&class, "single-post")
        || contains(&class, "single-content")
        || contains(&lower(&class), "fulltext")
        || starts_with(&class, "article")
        || id == "article"
        || id == "story"
        || class == "story"
}

/// Rule 4: `<main>` and `role="main"`.
#[must_use]
pub fn content_rule_4(sel: &Selection) -> bool {
    let tag = tag(sel);
    tag == "main"
        || (matches!(tag.as_str(), "div" | "section") && starts_with(&attr(sel, "role"), "main"))
}

/// Rule 5: generic content ids and classes.
#[must_use]
pub fn content_rule_5(sel: &Selection) -> bool {
    let tag = tag(sel);
    if !matches!(tag.as_str(), "article" | "div" | "section") {
        return false;
    }

    let id_lower = lower(&id(sel));
    let class_lower = lower(&class(sel));

    id_lower == "content"
        || class_lower == "content"
        || id_lower == "main"
        || contains(&id_lower, "main-content")
        || contains(&class_lower, "main-content")
        || contains(&id_lower, "content-body")
        || contains(&class_lower, "content-body")
        || contains(&class_lower, "page-content")
}

/// Whether the node sits inside site chrome: a structural header, nav, aside
/// or footer, or an element whose class/id names boilerplate.
fn is_inside_boilerplate(node: &NodeRef) -> bool {
    if dom::has_ancestor_tag(node, BOILERPLATE_ANCESTORS) {
        return true;
    }

    let mut current = node.parent();
    while let Some(parent) = current {
        if parent.node_name().is_some_and(|n| n.eq_ignore_ascii_case("body")) {
            break;
        }
        let sel = Selection::from(parent);
        if class_or_id_is_boilerplate(&sel) {
            return true;
        }
        current = parent.parent();
    }
    false
}

fn class_or_id_is_boilerplate(sel: &Selection) -> bool {
    sel.attr("class").is_some_and(|c| patterns::is_boilerplate_name(&c))
        || sel.attr("id").is_some_and(|i| patterns::is_boilerplate_name(&i))
}

/// Whether a generic wrapper holds a sidebar next to a more specific
/// article container, in which case the inner container should win.
fn is_layout_wrapper(element: &Selection) -> bool {
    if !matches!(tag(element).as_str(), "div" | "section") {
        return false;
    }
    let has_sidebar = element.select("aside, nav, [class*='sidebar']").length() > 0;
    let has_inner_article = element
        .select("article, [itemprop='articleBody'], [class*='article-body'], [class*='entry-content']")
        .length()
        > 0;
    has_sidebar && has_inner_article
}

/// Whether `root` is a listing page: one parent holding several `<article>`
/// teasers side by side.
///
/// Teaser groups inside site chrome or boilerplate-named blocks (a
/// "related posts" strip under a story) do not count.
///
/// ```rust
/// use news_extract::{dom, selector::content};
///
/// let doc = dom::parse("<main><article>a</article><article>b</article><article>c</article></main>");
/// assert!(content::is_listing_page(&doc.select("body")));
/// ```
#[must_use]
pub fn is_listing_page(root: &Selection) -> bool {
    root.select("article")
        .nodes()
        .iter()
        .filter_map(NodeRef::parent)
        .any(|parent| {
            let article_children = parent
                .children()
                .iter()
                .filter(|child| child.node_name().is_some_and(|n| n.eq_ignore_ascii_case("article")))
                .count();
            article_children >= LISTING_MIN_ARTICLES
                && !class_or_id_is_boilerplate(&Selection::from(parent))
                && !is_inside_boilerplate(&parent)
        })
}

/// Find the main content element using the prioritized rules.
///
/// Matches inside site chrome and layout wrappers are skipped. A match with
/// too little text is replaced by its parent when the parent holds at least
/// twice as much text, otherwise the search continues.
#[must_use]
pub fn find_content<'a>(root: &Selection<'a>) -> Option<Selection<'a>> {
    for rule in CONTENT_RULES {
        for element in query_all(root, *rule) {
            let Some(node) = element.nodes().first().copied() else {
                continue;
            };
            if is_inside_boilerplate(&node) || class_or_id_is_boilerplate(&element) {
                continue;
            }
            if is_layout_wrapper(&element) {
                continue;
            }

            let text_len = dom::text_len(&element);
            if text_len >= MIN_CONTENT_TEXT_LEN {
                return Some(element);
            }

            let parent = element.parent();
            let Some(parent_node) = parent.nodes().first().copied() else {
                continue;
            };
            if tag(&parent) == "body" || is_inside_boilerplate(&parent_node) {
                continue;
            }
            let parent_len = dom::text_len(&parent);
            if parent_len > text_len * 2 && parent_len >= MIN_CONTENT_TEXT_LEN {
                return Some(parent);
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filler(words: usize) -> String {
        vec!["lorem"; words].join(" ")
    }

    #[test]
    fn test_content_rule_1_article_body() {
        let doc = dom::parse(r#"<div class="article-body">Content</div>"#);
        assert!(content_rule_1(&doc.select("div")));
        let doc = dom::parse(r#"<section itemprop="articleBody">Content</section>"#);
        assert!(content_rule_1(&doc.select("section")));
    }

    #[test]
    fn test_content_rule_1_wrong_tag() {
        let doc = dom::parse(r#"<span class="article-body">Content</span>"#);
        assert!(!content_rule_1(&doc.select("span")));
    }

    #[test]
    fn test_content_rule_3_role_article() {
        let doc = dom::parse(r#"<div role="article">Content</div>"#);
        assert!(content_rule_3(&doc.select("div")));
    }

    #[test]
    fn test_content_rule_4_main() {
        let doc = dom::parse(r#"<main>Content</main><div role="main">x</div>"#);
        assert!(content_rule_4(&doc.select("main")));
        assert!(content_rule_4(&doc.select("div")));
    }

    #[test]
    fn test_find_content_priority_order() {
        let html = format!(
            r#"<body><main><article><div class="entry-content"><p>{}</p></div></article></main></body>"#,
            filler(40)
        );
        let doc = dom::parse(&html);
        let found = find_content(&doc.select("body")).unwrap();
        assert_eq!(class(&found), "entry-content");
    }

    #[test]
    fn test_find_content_skips_header() {
        let html = format!(
            r#"<body><header><article><p>{}</p></article></header><article id="real"><p>{}</p></article></body>"#,
            filler(40),
            filler(40)
        );
        let doc = dom::parse(&html);
        let found = find_content(&doc.select("body")).unwrap();
        assert_eq!(id(&found), "real");
    }

    #[test]
    fn test_find_content_promotes_parent_of_thin_match() {
        let html = format!(
            r#"<body><div id="story"><div itemprop="articleBody"><meta content="x">Short.</div><p>{}</p></div></body>"#,
            filler(40)
        );
        let doc = dom::parse(&html);
        let found = find_content(&doc.select("body")).unwrap();
        assert_eq!(id(&found), "story");
    }

    #[test]
    fn test_listing_page_detection() {
        let teasers: String = (0..10)
            .map(|i| format!(r#"<article class="teaser"><h2><a href="/s/{i}">Story {i}</a></h2><p>{}</p></article>"#, filler(25)))
            .collect();
        let doc = dom::parse(&format!("<body><main>{teasers}</main></body>"));
        assert!(is_listing_page(&doc.select("body")));

        let related: String = (0..4).map(|i| format!("<article>Related {i}</article>")).collect();
        let doc = dom::parse(&format!(
            r#"<body><article><p>{}</p></article><div class="related-posts">{related}</div></body>"#,
            filler(40)
        ));
        assert!(!is_listing_page(&doc.select("body")));

        let doc = dom::parse("<body><article>One</article><article>Two</article></body>");
        assert!(!is_listing_page(&doc.select("body")));
    }

    #[test]
    fn test_find_content_none_without_containers() {
        let doc = dom::parse("<body><div><p>Just a page.</p></div></body>");
        assert!(find_content(&doc.select("body")).is_none());
    }
}
