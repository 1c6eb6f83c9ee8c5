//! URL utility functions.
//!
//! Validation of article URLs and hostname helpers used in logs.

use url::Url;

/// Check if a string is a valid absolute http(s) URL.
///
/// The scheme is matched case-insensitively, as URI schemes are.
///
/// # Returns
/// * `(is_absolute, parsed_url)` - Whether URL is absolute and the parsed URL if valid
#[must_use]
pub fn is_absolute_url(s: &str) -> (bool, Option<Url>) {
    let s = s.trim();

    if s.is_empty() {
        return (false, None);
    }

    match Url::parse(s) {
        Ok(url) if matches!(url.scheme(), "http" | "https") && url.host().is_some() => (true, Some(url)),
        _ => (false, None),
    }
}

/// Parse a URL string into a `Url`.
///
/// # Returns
/// * `Some(Url)` if valid absolute http(s) URL, `None` otherwise
#[must_use]
pub fn parse_url(url_str: &str) -> Option<Url> {
    match is_absolute_url(url_str) {
        (true, parsed) => parsed,
        _ => None,
    }
}

/// Hostname without a leading `www.`.
#[must_use]
pub fn extract_hostname(url: &Url) -> Option<String> {
    let host = url.host_str()?;
    let host = host.strip_prefix("www.").unwrap_or(host);
    if host.is_empty() {
        None
    } else {
        Some(host.to_ascii_lowercase())
    }
}
