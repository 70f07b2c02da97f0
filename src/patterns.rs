//! Compiled regex patterns used by the pipeline.
//!
//! All patterns are compiled once on first use with `LazyLock`.

#![allow(clippy::expect_used)]

use std::sync::LazyLock;

use regex::Regex;

/// Blocks whose contents are not markup: raw-text and RCDATA elements,
/// templates and comments (an unterminated comment runs to end of input).
/// Heading-like strings inside them are ignored by the integrity check.
pub static NON_MARKUP_BLOCKS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?is)<script\b.*?</script\s*>|<style\b.*?</style\s*>|<title\b.*?</title\s*>|<textarea\b.*?</textarea\s*>|<noscript\b.*?</noscript\s*>|<xmp\b.*?</xmp\s*>|<template\b.*?</template\s*>|<!--.*?(?:-->|\z)",
    )
    .expect("NON_MARKUP_BLOCKS regex")
});

/// Start tag of any `h1`-`h6` heading.
pub static HEADING_OPEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<h[1-6](?:[\s/][^>]*)?>").expect("HEADING_OPEN regex"));

/// End tag of any `h1`-`h6` heading. Any of them closes whichever heading is open.
pub static HEADING_CLOSE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)</h[1-6]\s*>").expect("HEADING_CLOSE regex"));
