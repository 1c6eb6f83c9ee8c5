//! Link density testing.
//!
//! Blocks that are mostly link text are menus, tag clouds and "read next"
//! lists rather than article prose.

use dom_query::Selection;

use crate::dom;
use crate::Options;

/// Collect heuristics on link text.
///
/// Returns `(total_link_length, num_short_links, non_empty_links)`.
fn collect_link_info(links: &Selection) -> (usize, usize, usize) {
    let mut link_length = 0;
    let mut n_short_links = 0;
    let mut n_non_empty_links = 0;

    for link in links.iter() {
        let text_length = dom::text_len(&link);
        if text_length == 0 {
            continue;
        }

        link_length += text_length;
        if text_length < 10 {
            n_short_links += 1;
        }
        n_non_empty_links += 1;
    }

    (link_length, n_short_links, n_non_empty_links)
}

/// Share of the element's text that sits inside links, between 0 and 1.
#[must_use]
pub fn link_density(element: &Selection) -> f64 {
    let text_length = dom::text_len(element);
    if text_length == 0 {
        return 0.0;
    }
    let (link_length, _, _) = collect_link_info(&element.select("a"));
    (link_length as f64 / text_length as f64).min(1.0)
}

/// Whether a block should be dropped because it is rich in links.
///
/// Short blocks are judged strictly: more than 80% link text, or more than
/// 80% of the links under ten characters, marks navigation.
#[must_use]
pub fn link_density_test(element: &Selection, options: &Options) -> bool {
    let links = element.select("a");
    let n_links = links.length();

    if n_links == 0 {
        return false;
    }

    let text_length = dom::text_len(element);

    // A block that is one long link is a teaser.
    if n_links == 1 {
        let threshold: usize = if options.favor_precision { 10 } else { 100 };
        let link_text_length = dom::text_len(&links);
        if link_text_length > threshold && (link_text_length as f64) > (text_length as f64) * 0.9 {
            return true;
        }
    }

    let tag_name = dom::tag_name(element).unwrap_or_default();
    let has_next_sibling = element
        .nodes()
        .first()
        .and_then(dom_query::NodeRef::next_element_sibling)
        .is_some();

    let limit_length: usize = match (tag_name.as_str(), has_next_sibling) {
        ("p", true) => 30,
        ("p", false) => 60,
        (_, true) => 100,
        (_, false) => 300,
    };

    if text_length >= limit_length {
        return false;
    }

    let (link_length, n_short_links, n_non_empty_links) = collect_link_info(&links);

    if n_non_empty_links == 0 {
        return true;
    }

    if (link_length as f64) > (text_length as f64) * 0.8 {
        return true;
    }

    n_non_empty_links > 1 && (n_short_links as f64) / (n_non_empty_links as f64) > 0.8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn menu_list_is_link_dense() {
        let doc = dom::parse(
            r#"<ul><li><a href="/">Home</a></li><li><a href="/a">About</a></li><li><a href="/c">Contact</a></li></ul>"#,
        );
        assert!(link_density_test(&doc.select("ul"), &Options::default()));
    }

    #[test]
    fn prose_with_one_link_is_kept() {
        let doc = dom::parse(
            r#"<div><p>The council approved the budget after a long debate on Tuesday evening, with most members
            citing the need for new schools and road repairs across the district, according to
            <a href="/minutes">the published minutes</a>.</p></div>"#,
        );
        assert!(!link_density_test(&doc.select("div"), &Options::default()));
    }

    #[test]
    fn long_single_link_is_teaser() {
        let doc = dom::parse(r#"<div><a href="/next">Read the full story about the election results</a></div>"#);
        assert!(link_density_test(&doc.select("div"), &Options::default()));
    }

    #[test]
    fn density_ratio() {
        let doc = dom::parse(r#"<div>abcde<a href="/x">fghij</a></div>"#);
        let density = link_density(&doc.select("div"));
        assert!((density - 0.5).abs() < f64::EPSILON);
        assert_eq!(link_density(&dom::parse("<div></div>").select("div")), 0.0);
    }
}
