//! Character encoding detection and transcoding of fetched pages.
//!
//! News sites still serve legacy charsets (windows-1251, Shift_JIS,
//! ISO-8859-x). The charset is taken from, in order: a byte order mark, the
//! `Content-Type` response header, a `<meta>` declaration in the first bytes
//! of the document. UTF-8 is the default.

use encoding_rs::{Encoding, UTF_8};
use regex::Regex;
use std::sync::LazyLock;

/// How much of the document is scanned for a `<meta>` charset declaration.
const META_SNIFF_LEN: usize = 1024;

/// `<meta charset="...">`
#[allow(clippy::expect_used)]
static CHARSET_META_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta[^>]+charset\s*=\s*["']?([^"'\s/>;]+)"#).expect("valid regex")
});

/// `charset=...` parameter of a Content-Type value.
#[allow(clippy::expect_used)]
static CHARSET_PARAM_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)charset\s*=\s*["']?([^"'\s;]+)"#).expect("valid regex")
});

/// Charset named by a `Content-Type` header value, if recognised.
#[must_use]
pub fn charset_from_content_type(content_type: &str) -> Option<&'static Encoding> {
    CHARSET_PARAM_RE
        .captures(content_type)
        .and_then(|c| c.get(1))
        .and_then(|m| Encoding::for_label(m.as_str().as_bytes()))
}

/// Detect the charset declared inside the HTML bytes.
///
/// Looks at a byte order mark, then at `<meta charset>` or
/// `<meta http-equiv="Content-Type">` within the first 1024 bytes.
/// Defaults to UTF-8.
#[must_use]
pub fn detect_encoding(html: &[u8]) -> &'static Encoding {
    if let Some((encoding, _)) = Encoding::for_bom(html) {
        return encoding;
    }

    let head = &html[..html.len().min(META_SNIFF_LEN)];
    let head_str = String::from_utf8_lossy(head);

    CHARSET_META_RE
        .captures(&head_str)
        .and_then(|c| c.get(1))
        .and_then(|m| Encoding::for_label(m.as_str().as_bytes()))
        .unwrap_or(UTF_8)
}

/// Transcode HTML bytes to a UTF-8 string using the in-document charset.
///
/// Invalid sequences become U+FFFD rather than failing.
///
/// ```
/// use news_extract::encoding::transcode_to_utf8;
///
/// let html = b"<html><body>Hello, World!</body></html>";
/// assert!(transcode_to_utf8(html).contains("Hello, World!"));
/// ```
#[must_use]
pub fn transcode_to_utf8(html: &[u8]) -> String {
    decode_with(detect_encoding(html), html)
}

/// Decode a response body, preferring the charset of the `Content-Type`
/// header over the one declared in the document.
///
/// A byte order mark still wins over both.
#[must_use]
pub fn decode_body(body: &[u8], content_type: Option<&str>) -> String {
    if Encoding::for_bom(body).is_none() {
        if let Some(encoding) = content_type.and_then(charset_from_content_type) {
            return decode_with(encoding, body);
        }
    }
    transcode_to_utf8(body)
}

fn decode_with(encoding: &'static Encoding, bytes: &[u8]) -> String {
    if encoding == UTF_8 {
        return String::from_utf8_lossy(bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes))
            .into_owned();
    }
    let (decoded, _encoding_used, _had_errors) = encoding.decode(bytes);
    decoded.into_owned()
}
