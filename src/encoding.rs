//! Character encoding detection and transcoding.
//!
//! Fetched pages arrive as bytes. The charset is taken from the HTTP
//! `Content-Type` header when present, then from the page's own meta tags,
//! and defaults to UTF-8.

use encoding_rs::{Encoding, UTF_8};
use regex::Regex;
use std::sync::LazyLock;

/// `<meta charset="...">`
#[allow(clippy::expect_used)]
static CHARSET_META_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta[^>]+charset\s*=\s*["']?([^"'\s>;]+)"#).expect("valid regex")
});

/// `charset=...` parameter of a `Content-Type` value.
#[allow(clippy::expect_used)]
static CONTENT_TYPE_CHARSET_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)charset\s*=\s*["']?([^"'\s;]+)"#).expect("valid regex")
});

fn lookup(label: &str) -> Option<&'static Encoding> {
    Encoding::for_label(label.trim().as_bytes())
}

/// Detect the character encoding of a page.
///
/// Only the first 1024 bytes are inspected for meta declarations.
#[must_use]
pub fn detect_encoding(html: &[u8], content_type: Option<&str>) -> &'static Encoding {
    let from_header = content_type
        .and_then(|ct| CONTENT_TYPE_CHARSET_RE.captures(ct))
        .and_then(|c| lookup(&c[1]));
    if let Some(encoding) = from_header {
        return encoding;
    }

    let head = String::from_utf8_lossy(&html[..html.len().min(1024)]);
    CHARSET_META_RE
        .captures(&head)
        .and_then(|c| lookup(&c[1]))
        .unwrap_or(UTF_8)
}

/// Transcode page bytes to a UTF-8 string.
///
/// Invalid sequences become U+FFFD rather than errors.
#[must_use]
pub fn transcode_to_utf8(html: &[u8], content_type: Option<&str>) -> String {
    let encoding = detect_encoding(html, content_type);

    if encoding == UTF_8 {
        return String::from_utf8_lossy(html).into_owned();
    }

    let (decoded, _encoding_used, _had_errors) = encoding.decode(html);
    decoded.into_owned()
}
