//! HTML cleaning and filtered text collection.
//!
//! `doc_cleaning` strips everything that can never be article text.
//! `collect_text` walks a content container and gathers its visible text,
//! skipping boilerplate found inside it.

use dom_query::{Document, NodeRef, Selection};

use crate::dom;
use crate::etree;
use crate::link_density::link_density_test;
use crate::patterns;
use crate::selector::discard;
use crate::text;
use crate::Options;

/// Tags removed with their children during cleaning.
const TAGS_TO_CLEAN: &[&str] = &[
    // important
    "script", "style", "noscript", "nav", "aside", "form", "iframe", "embed", "object", "menu",
    // media and widgets
    "svg", "canvas", "audio", "video", "picture", "figure", "map", "applet",
    // controls
    "button", "input", "select", "textarea", "label", "fieldset", "dialog", "template", "link",
];

/// Consent and modal overlays. `[class~="modal"]` is an exact-token match so
/// `js-modal-gallery` survives.
const OVERLAY_SELECTORS: &[&str] = &[
    ".modal-dialog",
    ".modal-content",
    ".modal-backdrop",
    "[class~=\"modal\"]",
    "[role=\"dialog\"]",
    "[role=\"alertdialog\"]",
    "[id*=\"gdpr\"]",
    "[class*=\"gdpr\"]",
    "[id*=\"consent\"]",
    "[class*=\"consent\"]",
    "[class*=\"cookie-banner\"]",
    "[id*=\"cookie-banner\"]",
    "[class*=\"cookiebanner\"]",
    "[id*=\"cookiebanner\"]",
];

/// Tags that are dropped during collection even if cleaning missed them.
const EXCLUDED_TAGS: &[&str] = &["script", "style", "noscript", "nav", "aside", "iframe", "svg", "template"];

/// Tags whose text starts a new paragraph.
const BLOCK_TAGS: &[&str] = &[
    "p", "div", "section", "article", "main", "blockquote", "pre", "ul", "ol", "dl", "table",
    "header", "footer", "h1", "h2", "h3", "h4", "h5", "h6",
];

/// Tags whose text starts a new line.
const LINE_TAGS: &[&str] = &["li", "br", "tr", "dt", "dd"];

/// Clean the document by discarding unwanted elements.
///
/// Removes scripts, styles, navigation, asides, forms, embeds, consent and
/// modal overlays, and HTML comments. Must run after metadata and JSON-LD
/// have been read: `<script>` elements do not survive it.
pub fn doc_cleaning(doc: &Document) {
    let mut selectors: Vec<&str> = TAGS_TO_CLEAN.to_vec();
    selectors.extend_from_slice(OVERLAY_SELECTORS);
    doc.select(&selectors.join(", ")).remove();

    // Presentational wrappers carry no meaning but split text runs.
    for node in doc.select("font, small, big, mark").nodes() {
        etree::strip(&Selection::from(*node));
    }

    dom::remove_comments(doc);
}

/// Check if text matches share button / social media patterns.
///
/// Matches lines that are just a network name ("Facebook", "WhatsApp (12)"),
/// "More on this", standalone "Comments" headings and newsletter calls to
/// action.
#[must_use]
pub fn is_share_button_text(text: &str) -> bool {
    const NETWORKS: &[&str] = &[
        "Email", "E-Mail", "Facebook", "Flipboard", "Instagram", "LinkedIn", "Linkedin", "Mail",
        "PDF", "Pinterest", "Pocket", "Print", "Reddit", "Telegram", "Twitter", "VK", "WhatsApp",
        "Whatsapp", "Xing",
    ];

    let test_str = text
        .trim()
        .trim_start_matches(|c: char| !c.is_alphanumeric() && c != '_');

    for network in NETWORKS {
        if let Some(rest) = test_str.strip_prefix(network) {
            if rest.chars().all(|c| !c.is_alphabetic()) {
                return true;
            }
        }
    }

    let lower = test_str.to_lowercase();
    lower.starts_with("more on this")
        || matches!(lower.as_str(), "comments" | "comment" | "share" | "subscribe" | "advertisement")
        || (lower.contains("subscribe") && lower.contains("newsletter"))
        || lower.starts_with("sign up for")
        || lower.starts_with("click here to subscribe")
        || lower.starts_with("share this")
}

/// Whether an h1 repeats the page title.
///
/// Handles `<title>` values with a site suffix, like "Headline - Site".
#[must_use]
pub fn titles_match(heading: &str, page_title: &str) -> bool {
    let h_norm = normalize_title(heading);
    let t_norm = normalize_title(page_title);

    if h_norm.is_empty() || t_norm.is_empty() {
        return false;
    }
    if h_norm == t_norm {
        return true;
    }

    [" - ", " | ", " – ", " — ", ": "]
        .iter()
        .filter_map(|sep| t_norm.split(sep).next())
        .any(|prefix| !prefix.is_empty() && normalize_title(prefix) == h_norm)
}

fn normalize_title(s: &str) -> String {
    text::collapse_whitespace(&s.to_lowercase())
}

/// Gather the visible text of `root`, skipping boilerplate inside it.
///
/// Skipped: boilerplate-named or hidden descendants, headers and footers
/// outside `article`/`main`, link-dense `div`/`ul`/`ol` blocks, share-button
/// lines, headline markers and an h1 that repeats `page_title`. Block
/// elements become paragraph breaks. The result is normalized.
#[must_use]
pub fn collect_text(root: &Selection, options: &Options, page_title: Option<&str>) -> String {
    let Some(root_node) = root.nodes().first().copied() else {
        return String::new();
    };

    let mut collector = TextCollector {
        options,
        page_title,
        filter: true,
        out: String::new(),
    };
    let root_is_article = is_article_or_main(&root_node);
    collector.walk(&root_node, root_is_article);

    text::normalize(&collector.out)
}

/// Visible text of `root` with paragraph breaks, without boilerplate
/// filtering. Only script-like tags are dropped.
#[must_use]
pub fn visible_text(root: &Selection) -> String {
    let Some(root_node) = root.nodes().first().copied() else {
        return String::new();
    };

    let options = Options::default();
    let mut collector = TextCollector {
        options: &options,
        page_title: None,
        filter: false,
        out: String::new(),
    };
    collector.walk(&root_node, true);

    text::normalize(&collector.out)
}

struct TextCollector<'o> {
    options: &'o Options,
    page_title: Option<&'o str>,
    filter: bool,
    out: String,
}

/// Pending work in the text walk.
enum Step<'a> {
    Visit(NodeRef<'a>, bool),
    Close(&'static str),
}

impl TextCollector<'_> {
    /// Depth-first walk over the descendants of `root` with an explicit
    /// stack, so nesting depth is bounded by the heap rather than the call
    /// stack.
    fn walk(&mut self, root: &NodeRef, inside_article: bool) {
        let mut stack = Vec::new();
        push_children(&mut stack, root, inside_article);

        while let Some(step) = stack.pop() {
            match step {
                Step::Close(separator) => self.out.push_str(separator),
                Step::Visit(node, inside) => {
                    if node.is_text() {
                        self.push_text(&node.text());
                    } else if node.is_element() {
                        self.visit_element(&node, inside, &mut stack);
                    }
                }
            }
        }
    }

    fn visit_element<'a>(&mut self, node: &NodeRef<'a>, inside_article: bool, stack: &mut Vec<Step<'a>>) {
        let Some(name) = node.node_name() else {
            return;
        };
        let tag = name.to_ascii_lowercase();
        let sel = Selection::from(*node);

        if self.should_skip(&tag, &sel, node, inside_article) {
            return;
        }

        if tag == "br" {
            self.out.push('\n');
            return;
        }

        let separator = if BLOCK_TAGS.contains(&tag.as_str()) {
            Some("\n\n")
        } else if LINE_TAGS.contains(&tag.as_str()) {
            Some("\n")
        } else {
            None
        };

        if let Some(separator) = separator {
            self.out.push_str(separator);
            stack.push(Step::Close(separator));
        } else if matches!(tag.as_str(), "td" | "th") {
            self.out.push(' ');
        }

        let inside_article = inside_article || is_article_or_main(node);
        push_children(stack, node, inside_article);
    }

    fn should_skip(&self, tag: &str, sel: &Selection, node: &NodeRef, inside_article: bool) -> bool {
        if EXCLUDED_TAGS.contains(&tag) {
            return true;
        }
        if !self.filter {
            return false;
        }
        if matches!(tag, "header" | "footer") && !inside_article {
            return true;
        }
        if discard::discard_rule_2(sel) {
            return true;
        }
        if sel.attr("class").is_some_and(|c| patterns::is_boilerplate_name(&c))
            || sel.attr("id").is_some_and(|i| patterns::is_boilerplate_name(&i))
        {
            return true;
        }
        // Subtree tests only run on leaf blocks; wrappers are judged through
        // their children.
        let is_wrapper = tag == "div" && has_block_child(node);
        if matches!(tag, "div" | "ul" | "ol") && !is_wrapper && link_density_test(sel, self.options) {
            return true;
        }

        let is_heading = tag.len() == 2 && tag.starts_with('h') && tag.as_bytes()[1].is_ascii_digit();
        if is_heading {
            let heading = etree::iter_text(sel, " ");
            let heading = heading.trim();
            if is_share_button_text(heading) || is_headline_marker(sel) {
                return true;
            }
            if tag == "h1" && self.page_title.is_some_and(|title| titles_match(heading, title)) {
                return true;
            }
        }

        if matches!(tag, "p" | "div") && !is_wrapper {
            let content = etree::iter_text(sel, " ");
            let content = content.trim();
            let limit = if tag == "p" { 50 } else { 80 };
            if content.len() < limit && is_share_button_text(content) {
                return true;
            }
        }

        false
    }

    /// Append a text node, collapsing source whitespace to single spaces.
    fn push_text(&mut self, raw: &str) {
        let mut last_space = self.out.is_empty() || self.out.ends_with(char::is_whitespace);
        for ch in raw.chars() {
            if ch.is_whitespace() {
                if !last_space {
                    self.out.push(' ');
                    last_space = true;
                }
            } else {
                self.out.push(ch);
                last_space = false;
            }
        }
    }
}

/// Queue the children of `node` so they pop in document order.
fn push_children<'a>(stack: &mut Vec<Step<'a>>, node: &NodeRef<'a>, inside_article: bool) {
    for child in node.children().into_iter().rev() {
        stack.push(Step::Visit(child, inside_article));
    }
}

/// Whether any direct child starts a paragraph of its own.
fn has_block_child(node: &NodeRef) -> bool {
    node.children().iter().any(|child| {
        child
            .node_name()
            .is_some_and(|name| BLOCK_TAGS.iter().any(|t| name.eq_ignore_ascii_case(t)))
    })
}

fn is_article_or_main(node: &NodeRef) -> bool {
    node.node_name()
        .is_some_and(|n| n.eq_ignore_ascii_case("article") || n.eq_ignore_ascii_case("main"))
}

/// Headings marked as the page headline, which the title already carries.
fn is_headline_marker(sel: &Selection) -> bool {
    let class = sel.attr("class").map(|c| c.to_ascii_lowercase()).unwrap_or_default();
    let itemprop = sel.attr("itemprop").map(|c| c.to_ascii_lowercase()).unwrap_or_default();
    itemprop == "headline"
        || ["entry-title", "post-title", "article-title", "story-title", "headline"]
            .iter()
            .any(|marker| class.contains(marker))
}
