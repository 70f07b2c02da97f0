//! Selector Infrastructure
//!
//! Ordered-candidate resolution for the main-content root, plus rule-based
//! queries used by the noise filter.

use dom_query::Selection;
use tracing::debug;

use crate::dom::{self, Document};

pub mod noise;

/// A selector rule that tests if a selection matches certain criteria.
pub type Rule<'r> = &'r dyn Fn(&Selection) -> bool;

/// Which candidate produced the content root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RootSource {
    /// One of the profile's selectors matched.
    Selector(&'static str),
    /// No selector matched; the `<body>` element was used.
    Body,
    /// No body either; the whole document node was used.
    Document,
}

/// Return the first candidate selector that matches anything in `doc`,
/// together with its first matching element.
///
/// Candidates are tried strictly in order, so earlier entries win even when a
/// later one would match an element that appears earlier in the page.
#[must_use]
pub fn first_match<'a>(
    candidates: &[&'static str],
    doc: &'a Document,
) -> Option<(&'static str, Selection<'a>)> {
    candidates
        .iter()
        .find_map(|candidate| dom::select_first(doc, candidate).map(|sel| (*candidate, sel)))
}

/// Resolve the main-content root.
///
/// Never fails: the profile selectors are tried first, then `<body>`, then the
/// document node itself.
#[must_use]
pub fn resolve_root<'a>(doc: &'a Document, selectors: &[&'static str]) -> (Selection<'a>, RootSource) {
    if let Some((selector, root)) = first_match(selectors, doc) {
        debug!(selector, "content root matched selector");
        return (root, RootSource::Selector(selector));
    }

    if let Some(body) = dom::select_first(doc, "body") {
        debug!("no content selector matched, using body");
        return (body, RootSource::Body);
    }

    debug!("document has no body, using document node");
    (dom::document_node(doc), RootSource::Document)
}

/// Query for all descendant elements matching the rule, in document order.
#[must_use]
pub fn query_all<'a>(root: &Selection<'a>, rule: Rule<'_>) -> Vec<Selection<'a>> {
    let mut matches = Vec::new();

    for node in root.select("*").nodes() {
        let sel = Selection::from(*node);
        if rule(&sel) {
            matches.push(sel);
        }
    }

    matches
}
