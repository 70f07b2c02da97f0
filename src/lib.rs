//! # article-press
//!
//! Turns an arbitrary web article into a clean, print-ready HTML document.
//!
//! The heart of the crate is a pure, deterministic extraction pipeline: pick a
//! site profile from the URL, strip navigation/ad/boilerplate subtrees, find
//! the article root, collect headings, paragraphs, lists and images with
//! deduplication, retry once with stricter thresholds when too little was
//! found, and wrap the result in a styled standalone document. Fetching,
//! rendering to PDF and webhook notification live in [`service`].
//!
//! ## Quick Start
//!
//! ```rust
//! use article_press::extract;
//!
//! let html = r#"<html><body><article>
//!     <h1>Test Article</h1>
//!     <p>This is a test paragraph.</p>
//!     <aside class="ad">Advertisement</aside>
//! </article></body></html>"#;
//!
//! let out = extract(html, "https://example.com/post");
//! assert_eq!(out.title, "Test Article");
//! assert!(out.document.contains("test paragraph"));
//! assert!(!out.document.contains("Advertisement"));
//! ```
//!
//! ## Failure handling
//!
//! [`extract`] never fails. Sparse pages are handled by the quality gate;
//! anything worse yields a fixed fallback document titled `"Article"`.

mod error;
mod extract;
mod options;
mod patterns;
mod result;

/// DOM operations adapter over `dom_query`.
pub mod dom;

/// Site profiles and URL-based profile selection.
pub mod profile;

/// Content-root resolution and noise removal.
pub mod selector;

/// Content normalization and the quality gate.
pub mod normalize;

/// Final document assembly and templates.
pub mod assemble;

/// Character encoding detection and transcoding.
pub mod encoding;

/// Fetch, render and notify plumbing around the pipeline.
pub mod service;

/// `tracing` subscriber setup for binaries.
pub mod logging;

// Public API - re-exports
pub use error::{Error, Result};
pub use extract::fallback;
pub use normalize::{ContentNode, ImageRef, NodeKind};
pub use options::Options;
pub use profile::{select_profile, SiteProfile};
pub use result::{ExtractedDocument, Extraction, ExtractionStats};

/// Extracts the article from `html` fetched from `url` using default options.
///
/// Always returns a non-empty document and title.
#[must_use]
pub fn extract(html: &str, url: &str) -> Extraction {
    extract_with_options(html, url, &Options::default())
}

/// Extracts the article with custom thresholds.
///
/// # Example
///
/// ```rust
/// use article_press::{extract_with_options, Options};
///
/// let options = Options { min_nodes: 1, ..Options::default() };
/// let out = extract_with_options(
///     "<article><h1>Short</h1><p>Tiny but real paragraph.</p></article>",
///     "https://example.com",
///     &options,
/// );
/// assert!(out.document.contains("<h1>Short</h1>"));
/// ```
#[must_use]
pub fn extract_with_options(html: &str, url: &str, options: &Options) -> Extraction {
    extract::extract_content(html, url, options)
}

/// Runs the pipeline up to assembly, exposing the selected nodes.
///
/// Unlike [`extract`], this surfaces internal failures as errors instead of
/// substituting the fallback document.
pub fn extract_document(html: &str, url: &str, options: &Options) -> Result<ExtractedDocument> {
    extract::extract_document(html, select_profile(url), options)
}

/// Extracts from raw bytes, detecting the charset from meta tags.
#[must_use]
pub fn extract_bytes(html: &[u8], url: &str) -> Extraction {
    let html = encoding::transcode_to_utf8(html, None);
    extract(&html, url)
}
