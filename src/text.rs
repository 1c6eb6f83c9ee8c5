//! Text normalization.
//!
//! Every strategy's output goes through [`normalize`] before it is
//! validated, so word counts and thresholds are computed on the same text
//! the caller receives.

use std::sync::LazyLock;

use dom_query::Document;
use regex::Regex;

/// Horizontal whitespace runs (anything but line breaks).
#[allow(clippy::expect_used)]
static HORIZONTAL_SPACE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[^\S\n]+").expect("HORIZONTAL_SPACE regex")
});

/// Sentence terminator followed by whitespace.
#[allow(clippy::expect_used)]
static SENTENCE_END: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[.!?]\s+").expect("SENTENCE_END regex")
});

/// Normalize extracted text while keeping paragraph structure.
///
/// Runs of spaces and tabs become one space, every line is trimmed, at most
/// one blank line separates paragraphs, and the result is trimmed.
///
/// ```rust
/// use news_extract::text::normalize;
///
/// assert_eq!(normalize("  a \t b\n\n\n\n  c  "), "a b\n\nc");
/// ```
#[must_use]
pub fn normalize(text: &str) -> String {
    let text = text.replace("\r\n", "\n").replace('\r', "\n");
    let mut out = String::with_capacity(text.len());
    let mut pending_blank = false;

    for line in text.lines() {
        let line = HORIZONTAL_SPACE.replace_all(line, " ");
        let line = line.trim();
        if line.is_empty() {
            pending_blank = !out.is_empty();
            continue;
        }
        if !out.is_empty() {
            out.push('\n');
            if pending_blank {
                out.push('\n');
            }
        }
        pending_blank = false;
        out.push_str(line);
    }

    out
}

/// Collapse all whitespace, line breaks included, into single spaces.
#[must_use]
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Number of whitespace-separated tokens.
#[must_use]
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Whether `text` is non-empty and has at least `min_words` words.
#[must_use]
pub fn is_substantial(text: &str, min_words: usize) -> bool {
    let words = word_count(text);
    words > 0 && words >= min_words
}

/// Remove tags and decode entities from a metadata value.
///
/// Plain values are returned unchanged (apart from whitespace collapsing).
#[must_use]
pub fn strip_markup(text: &str) -> String {
    if !text.contains('<') && !text.contains('&') {
        return collapse_whitespace(text);
    }
    let doc = Document::from(format!("<html><body>{text}</body></html>"));
    collapse_whitespace(&doc.select("body").text())
}

/// Shorten `text` to at most `max_chars` characters on a sentence boundary.
///
/// Cuts after the last sentence end inside the limit. Without one, cuts at
/// the last space past 70% of the limit and appends `...`; failing that,
/// hard-cuts at the limit and appends `...`.
#[must_use]
pub fn truncate_by_sentences(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }

    let cut = text
        .char_indices()
        .nth(max_chars)
        .map_or(text.len(), |(idx, _)| idx);
    let truncated = &text[..cut];

    if let Some(last) = SENTENCE_END.find_iter(truncated).last() {
        return truncated[..last.end()].trim().to_string();
    }

    if let Some(space) = truncated.rfind(' ') {
        let space_chars = truncated[..space].chars().count();
        if space_chars * 10 > max_chars * 7 {
            return format!("{}...", truncated[..space].trim());
        }
    }

    format!("{}...", truncated.trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_keeps_single_blank_line_between_paragraphs() {
        let input = "First   paragraph\t line.\n   \n\n\nSecond paragraph.\nSame paragraph.";
        assert_eq!(
            normalize(input),
            "First paragraph line.\n\nSecond paragraph.\nSame paragraph."
        );
    }

    #[test]
    fn normalize_handles_blank_input() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize(" \n\t \n"), "");
        assert_eq!(normalize("\u{a0}word\u{a0}"), "word");
    }

    #[test]
    fn normalize_is_idempotent() {
        let once = normalize("  a  b \n\n\n c\r\nd ");
        assert_eq!(normalize(&once), once);
    }

    #[test]
    fn collapse_and_count() {
        assert_eq!(collapse_whitespace(" a\n\n b\tc "), "a b c");
        assert_eq!(word_count("a\n\nb c"), 3);
        assert_eq!(word_count("   "), 0);
    }

    #[test]
    fn substantial_requires_threshold_and_content() {
        assert!(is_substantial("one two three", 3));
        assert!(!is_substantial("one two", 3));
        assert!(!is_substantial("", 0));
    }

    #[test]
    fn strip_markup_removes_tags_and_entities() {
        assert_eq!(strip_markup("<p>Tom &amp; Jerry</p> <b>again</b>"), "Tom & Jerry again");
        assert_eq!(strip_markup("plain  text"), "plain text");
    }

    #[test]
    fn truncate_prefers_sentence_boundary() {
        let text = "One. Two three four five six seven";
        assert_eq!(truncate_by_sentences(text, 20), "One.");
    }

    #[test]
    fn truncate_falls_back_to_word_boundary() {
        let text = "alpha beta gamma delta epsilon";
        assert_eq!(truncate_by_sentences(text, 20), "alpha beta gamma...");
    }

    #[test]
    fn truncate_hard_cuts_without_spaces() {
        assert_eq!(truncate_by_sentences("abcdefghij", 4), "abcd...");
        assert_eq!(truncate_by_sentences("short", 10), "short");
    }
}
