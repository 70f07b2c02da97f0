//! Noise Removal
//!
//! Deletes boilerplate subtrees (navigation, ads, edit links, infoboxes)
//! before content is collected. Rules are independent subtree deletions, so
//! the order they run in does not change the result.

use dom_query::Selection;
use tracing::debug;

use crate::dom::{self, Document};
use crate::selector;

/// Where a profile's noise rules are applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoiseScope {
    /// Strip the whole document before the content root and title are resolved.
    Document,
    /// Strip only inside the resolved content root.
    ContentRoot,
}

/// Profile-specific description of what counts as noise.
#[derive(Debug, Clone, Copy)]
pub struct NoiseRuleSet {
    /// CSS selectors; every match is removed with its subtree.
    pub selectors: &'static [&'static str],
    /// Case-insensitive substrings tested against each class token.
    pub class_substrings: &'static [&'static str],
    /// Tags the class-substring rules are checked on.
    pub class_tags: &'static [&'static str],
}

impl NoiseRuleSet {
    /// Whether a single element is noise under the class-substring rules.
    #[must_use]
    pub fn matches_class(&self, sel: &Selection) -> bool {
        if self.class_substrings.is_empty() || !dom::is_one_of(sel, self.class_tags) {
            return false;
        }

        dom::class_tokens(sel).iter().any(|token| {
            let token = token.to_lowercase();
            self.class_substrings
                .iter()
                .any(|pattern| token.contains(&pattern.to_lowercase()))
        })
    }
}

/// Remove every noise subtree below `root`, mutating the tree it belongs to.
///
/// Returns the number of matched elements. Matches nested inside an already
/// removed subtree are counted but removing them again changes nothing.
pub fn strip_noise_in_place(root: &Selection, rules: &NoiseRuleSet) -> usize {
    let mut removed = 0;

    for selector in rules.selectors {
        let matches = dom::query_selector_all(root, selector);
        if matches.exists() {
            removed += matches.length();
            dom::remove(&matches);
        }
    }

    let class_matches = selector::query_all(root, &|sel| rules.matches_class(sel));
    removed += class_matches.len();
    for sel in &class_matches {
        dom::remove(sel);
    }

    debug!(removed, "stripped noise elements");
    removed
}

/// Copy-semantics variant: returns a new document with noise stripped from
/// everything under `<html>`, leaving `doc` untouched.
#[must_use]
pub fn strip_noise(doc: &Document, rules: &NoiseRuleSet) -> Document {
    let copy = dom::clone_document(doc);
    let root = dom::select_first(&copy, "html").unwrap_or_else(|| dom::document_node(&copy));
    strip_noise_in_place(&root, rules);
    copy
}
