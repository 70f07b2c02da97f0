//! Result types for extraction output.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::dom;
use crate::normalize::ContentNode;
use crate::profile::SiteProfile;

/// Title plus the ordered content nodes selected for one page.
///
/// Built once per request and handed to the assembler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedDocument {
    pub title: String,
    pub nodes: Vec<ContentNode>,
    pub profile: SiteProfile,
}

/// Final output of [`crate::extract`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    /// Complete, self-contained HTML document.
    pub document: String,
    /// Article title, never empty.
    pub title: String,
    /// Profile chosen for the source URL.
    pub profile: SiteProfile,
    /// Number of content nodes in the document body.
    pub node_count: usize,
    /// True when the fixed fallback document was returned.
    pub used_fallback: bool,
}

/// Size and structure figures for an assembled document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExtractionStats {
    /// Character count of the assembled document.
    pub document_len: usize,
    /// Character count of its visible text.
    pub text_len: usize,
    /// Count of block elements by tag name.
    pub elements: BTreeMap<String, usize>,
}

const COUNTED_TAGS: &[&str] = &["h1", "h2", "h3", "p", "ul", "ol"];

impl Extraction {
    /// Visible text of the document body, one text run per line.
    #[must_use]
    pub fn text(&self) -> String {
        let doc = dom::parse(&self.document);
        dom::text_lines(&doc.select("body")).join("\n")
    }

    /// Compute size figures and an element breakdown of the document.
    #[must_use]
    pub fn stats(&self) -> ExtractionStats {
        let doc = dom::parse(&self.document);
        let mut elements = BTreeMap::new();
        for tag in COUNTED_TAGS {
            let count = doc.select(tag).length();
            if count > 0 {
                elements.insert((*tag).to_string(), count);
            }
        }

        ExtractionStats {
            document_len: self.document.chars().count(),
            text_len: self.text().chars().count(),
            elements,
        }
    }
}
