//! Content normalization and the quality gate.
//!
//! [`normalize`] walks a filtered content root once, in document order, and
//! keeps the elements whose kind is allowed and whose text carries enough
//! substance. [`ensure_sufficient`] decides whether that result is good enough
//! or whether a single relaxed pass should replace it.

use std::collections::HashSet;

use dom_query::Selection;
use tracing::{debug, info};

use crate::dom;
use crate::options::Options;
use crate::profile::SiteProfile;

/// Kind of a retained content element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Heading1,
    Heading2,
    Heading3,
    Paragraph,
    UnorderedList,
    OrderedList,
    ListItem,
    Image,
}

impl NodeKind {
    /// Map an HTML tag name to a node kind.
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "h1" => Some(Self::Heading1),
            "h2" => Some(Self::Heading2),
            "h3" => Some(Self::Heading3),
            "p" => Some(Self::Paragraph),
            "ul" => Some(Self::UnorderedList),
            "ol" => Some(Self::OrderedList),
            "li" => Some(Self::ListItem),
            "img" => Some(Self::Image),
            _ => None,
        }
    }

    /// HTML tag name for this kind.
    #[must_use]
    pub fn tag(self) -> &'static str {
        match self {
            Self::Heading1 => "h1",
            Self::Heading2 => "h2",
            Self::Heading3 => "h3",
            Self::Paragraph => "p",
            Self::UnorderedList => "ul",
            Self::OrderedList => "ol",
            Self::ListItem => "li",
            Self::Image => "img",
        }
    }
}

/// Kinds collected by the relaxed pass.
pub const RELAXED_KINDS: &[NodeKind] = &[
    NodeKind::Heading1,
    NodeKind::Heading2,
    NodeKind::Heading3,
    NodeKind::Paragraph,
];

/// Resolved image reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRef {
    /// Absolute-or-relative source, with protocol-relative URLs made `https:`.
    pub src: String,
    /// Alt text, empty when absent.
    pub alt: String,
}

/// A retained element: its serialized markup and its plain-text projection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentNode {
    pub kind: NodeKind,
    /// Outer HTML of the original element.
    pub markup: String,
    /// Whitespace-collapsed text of the element. Empty for images, which
    /// carry their alt text in [`ImageRef`] and are exempt from dedup.
    pub text: String,
    /// Present for [`NodeKind::Image`] only.
    pub image: Option<ImageRef>,
}

/// Parameters of one normalization pass.
#[derive(Debug, Clone, Copy)]
pub struct PassConfig<'a> {
    pub allowed_kinds: &'a [NodeKind],
    pub min_text_len: usize,
    /// Lowercase phrases that disqualify a text block.
    pub nav_markers: &'a [&'a str],
}

impl PassConfig<'static> {
    /// First-pass configuration for a profile.
    #[must_use]
    pub fn primary(profile: SiteProfile, options: &Options) -> Self {
        let config = profile.config();
        Self {
            allowed_kinds: config.allowed_kinds,
            min_text_len: options.min_text_len,
            nav_markers: config.nav_markers,
        }
    }

    /// Relaxed configuration used by the quality gate: headings and
    /// paragraphs only, with a higher length floor.
    #[must_use]
    pub fn relaxed(profile: SiteProfile, options: &Options) -> Self {
        Self {
            allowed_kinds: RELAXED_KINDS,
            min_text_len: options.relaxed_min_text_len,
            nav_markers: profile.config().nav_markers,
        }
    }
}

/// Rewrite a protocol-relative URL (`//host/path`) to explicit `https:`.
#[must_use]
pub fn resolve_image_src(src: &str) -> String {
    let src = src.trim();
    if src.starts_with("//") {
        format!("https:{src}")
    } else {
        src.to_string()
    }
}

fn image_node(sel: &Selection) -> ContentNode {
    let src = dom::get_attribute(sel, "src")
        .filter(|s| !s.trim().is_empty())
        .or_else(|| dom::get_attribute(sel, "data-src"))
        .unwrap_or_default();
    let alt = dom::get_attribute(sel, "alt").unwrap_or_default();

    ContentNode {
        kind: NodeKind::Image,
        markup: dom::outer_html(sel).to_string(),
        text: String::new(),
        image: Some(ImageRef {
            src: resolve_image_src(&src),
            alt,
        }),
    }
}

/// Walk `root`'s descendants once and collect content nodes.
///
/// Non-image nodes are skipped when their text is shorter than
/// `config.min_text_len` characters, repeats an earlier node's text exactly,
/// or contains a navigational marker. Images are always kept.
#[must_use]
pub fn normalize(root: &Selection, config: &PassConfig) -> Vec<ContentNode> {
    let mut nodes = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();

    for node in root.select("*").nodes() {
        let sel = Selection::from(*node);
        let Some(kind) = dom::tag_name(&sel).and_then(|t| NodeKind::from_tag(&t)) else {
            continue;
        };
        if !config.allowed_kinds.contains(&kind) {
            continue;
        }

        if kind == NodeKind::Image {
            nodes.push(image_node(&sel));
            continue;
        }

        let text = dom::text_projection(&sel);
        if text.is_empty() || text.chars().count() < config.min_text_len {
            continue;
        }
        if seen.contains(&text) {
            continue;
        }

        let lower = text.to_lowercase();
        if config.nav_markers.iter().any(|marker| lower.contains(marker)) {
            continue;
        }

        seen.insert(text.clone());
        nodes.push(ContentNode {
            kind,
            markup: dom::outer_html(&sel).to_string(),
            text,
            image: None,
        });
    }

    nodes
}

/// Quality gate: keep `nodes` when there are at least `options.min_nodes` of
/// them, otherwise replace them with one relaxed pass over `root`.
///
/// The two passes are never merged, and there is never a third. Profiles
/// without a quality gate keep their first pass unconditionally.
#[must_use]
pub fn ensure_sufficient(
    nodes: Vec<ContentNode>,
    root: &Selection,
    profile: SiteProfile,
    options: &Options,
) -> Vec<ContentNode> {
    if !profile.config().quality_gate {
        return nodes;
    }
    if nodes.len() >= options.min_nodes {
        debug!(nodes = nodes.len(), "first pass sufficient");
        return nodes;
    }

    info!(
        nodes = nodes.len(),
        min = options.min_nodes,
        %profile,
        "sparse extraction, rerunning with relaxed thresholds"
    );
    let relaxed = normalize(root, &PassConfig::relaxed(profile, options));
    debug!(nodes = relaxed.len(), "relaxed pass finished");
    relaxed
}
