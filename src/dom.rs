//! DOM Operations Adapter
//!
//! Thin layer over `dom_query` giving the pipeline the handful of operations
//! it needs: parsing, deep copies, tag and attribute access, and the
//! whitespace-collapsed text projection used for length and dedup checks.

// Re-export core types for external use
pub use dom_query::{Document, Selection};

pub use tendril::StrTendril;

// === Parsing ===

/// Parse HTML string into document.
///
/// The underlying html5ever parser is lenient: it never fails and repairs
/// unclosed or misnested markup the way browsers do.
#[inline]
#[must_use]
pub fn parse(html: &str) -> Document {
    Document::from(html)
}

/// Deep-copy a document by serializing and re-parsing it.
///
/// Noise removal works on the copy so the caller's tree is never mutated.
#[must_use]
pub fn clone_document(doc: &Document) -> Document {
    Document::from(doc.html().to_string())
}

// === Tag/Node Information ===

/// Get tag name (lowercase)
#[must_use]
pub fn tag_name(sel: &Selection) -> Option<String> {
    sel.nodes()
        .first()
        .and_then(dom_query::NodeRef::node_name)
        .map(|t| t.to_string())
}

/// Check whether the selection's first node has one of the given tag names.
#[must_use]
pub fn is_one_of(sel: &Selection, tags: &[&str]) -> bool {
    tag_name(sel).is_some_and(|t| tags.contains(&t.as_str()))
}

// === Attributes ===

/// Get any attribute value
#[inline]
#[must_use]
pub fn get_attribute(sel: &Selection, name: &str) -> Option<String> {
    sel.attr(name).map(|s| s.to_string())
}

/// Whitespace-separated tokens of the `class` attribute.
#[must_use]
pub fn class_tokens(sel: &Selection) -> Vec<String> {
    sel.attr("class")
        .map(|c| c.split_whitespace().map(str::to_string).collect())
        .unwrap_or_default()
}

// === Text Content ===

/// Get all text content of node and descendants.
///
/// Returns `StrTendril` for zero-copy passing.
#[inline]
#[must_use]
pub fn text_content(sel: &Selection) -> StrTendril {
    sel.text()
}

/// Plain-text projection of a subtree: descendant text with every whitespace
/// run collapsed to a single space, trimmed at both ends.
#[must_use]
pub fn text_projection(sel: &Selection) -> String {
    collapse_whitespace(&text_content(sel))
}

/// Collapse whitespace runs to single spaces and trim.
#[must_use]
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Non-empty text runs below `sel`, each whitespace-collapsed, in document order.
///
/// Text inside `script` and `style` elements is skipped.
#[must_use]
pub fn text_lines(sel: &Selection) -> Vec<String> {
    let mut lines = Vec::new();
    let Some(root) = sel.nodes().first() else {
        return lines;
    };

    for node in root.descendants() {
        if !node.is_text() {
            continue;
        }
        let in_code = node
            .parent()
            .and_then(|p| p.node_name())
            .is_some_and(|name| matches!(&*name, "script" | "style"));
        if in_code {
            continue;
        }
        let line = collapse_whitespace(&node.text());
        if !line.is_empty() {
            lines.push(line);
        }
    }

    lines
}

/// Get outer HTML content
#[inline]
#[must_use]
pub fn outer_html(sel: &Selection) -> StrTendril {
    sel.html()
}

// === Tree Manipulation ===

/// Remove elements (and their whole subtrees) from the tree.
#[inline]
pub fn remove(sel: &Selection) {
    sel.remove();
}

// === Querying ===

/// Query all descendants by CSS selector, in document order.
#[inline]
#[must_use]
pub fn query_selector_all<'a>(sel: &Selection<'a>, selector: &str) -> Selection<'a> {
    sel.select(selector)
}

/// First element of the document matching a CSS selector, if any.
#[must_use]
pub fn select_first<'a>(doc: &'a Document, selector: &str) -> Option<Selection<'a>> {
    doc.select(selector)
        .nodes()
        .first()
        .map(|node| Selection::from(*node))
}

/// The document node itself, wrapped as a selection.
#[must_use]
pub fn document_node(doc: &Document) -> Selection<'_> {
    Selection::from(doc.root())
}
