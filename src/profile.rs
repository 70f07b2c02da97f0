//! Site profiles.
//!
//! A profile bundles everything that differs between classes of site: where
//! the article body usually lives, what counts as noise, which element kinds
//! are worth keeping, and how the final document looks. The set of profiles is
//! closed; adding one means adding a variant and a [`ProfileConfig`] value.

use std::fmt;

use url::Url;

use crate::assemble::{Template, GENERIC_TEMPLATE, WIKIPEDIA_TEMPLATE};
use crate::normalize::NodeKind;
use crate::selector::noise::{NoiseRuleSet, NoiseScope};

/// Ordered main-content selectors, evaluated first to last.
pub type SelectorSet = &'static [&'static str];

/// Class of site an article URL belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SiteProfile {
    /// Any `wikipedia.org` page.
    Wikipedia,
    /// Everything else.
    Generic,
}

impl SiteProfile {
    /// Static extraction configuration for this profile.
    #[must_use]
    pub fn config(self) -> &'static ProfileConfig {
        match self {
            Self::Wikipedia => &WIKIPEDIA,
            Self::Generic => &GENERIC,
        }
    }

    /// Short lowercase name, used in logs.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Wikipedia => "wikipedia",
            Self::Generic => "generic",
        }
    }
}

impl fmt::Display for SiteProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything the pipeline needs to know about one profile.
#[derive(Debug)]
pub struct ProfileConfig {
    /// Candidate main-content roots, first match wins.
    pub content_selectors: SelectorSet,
    /// Subtrees to delete before extraction.
    pub noise: NoiseRuleSet,
    /// Whether noise is stripped from the whole document or only the content root.
    pub noise_scope: NoiseScope,
    /// Element kinds collected by the first normalization pass.
    pub allowed_kinds: &'static [NodeKind],
    /// Lowercase phrases that mark a text block as site navigation.
    pub nav_markers: &'static [&'static str],
    /// Whether a sparse first pass is replaced by the relaxed pass.
    pub quality_gate: bool,
    /// Visual template for the assembled document.
    pub template: &'static Template,
    /// Title used when the page has neither an `h1` nor a `<title>`.
    pub default_title: &'static str,
}

static WIKIPEDIA: ProfileConfig = ProfileConfig {
    content_selectors: &[
        "#mw-content-text",
        ".mw-parser-output",
        ".mw-body-content",
        "#bodyContent",
    ],
    noise: NoiseRuleSet {
        selectors: &[
            ".mw-jump-link",
            ".mw-editsection",
            ".reference",
            ".references",
            ".navbox",
            ".infobox",
            ".vertical-navbox",
            ".quotebox",
            ".metadata",
            ".ambox",
            ".sistersitebox",
            ".printfooter",
            "#siteSub",
            "#jump-to-nav",
            ".catlinks",
            "#External_links",
            "#References",
            "#Further_reading",
            "#Notes",
            ".sidebar",
            ".mw-redirect",
            ".external",
            "[role=\"navigation\"]",
            ".mw-headline",
            ".toc",
            "#toc",
            ".hatnote",
            ".shortdescription",
            ".nomobile",
        ],
        class_substrings: &["edit"],
        class_tags: &["span", "div"],
    },
    noise_scope: NoiseScope::ContentRoot,
    allowed_kinds: &[
        NodeKind::Heading1,
        NodeKind::Heading2,
        NodeKind::Heading3,
        NodeKind::Paragraph,
        NodeKind::UnorderedList,
        NodeKind::OrderedList,
        NodeKind::ListItem,
    ],
    nav_markers: &["jump to", "navigation", "menu", "search"],
    quality_gate: true,
    template: &WIKIPEDIA_TEMPLATE,
    default_title: "Wikipedia Article",
};

static GENERIC: ProfileConfig = ProfileConfig {
    content_selectors: &[
        "article",
        "main",
        "[role=\"main\"]",
        ".content",
        ".article",
        ".post",
        ".story",
        ".entry-content",
        ".post-content",
        "#content",
        "#main",
        "#article",
    ],
    noise: NoiseRuleSet {
        selectors: &[
            "script", "style", "nav", "header", "footer", "aside", "iframe", "noscript",
        ],
        class_substrings: &[
            "ad",
            "advertisement",
            "banner",
            "sidebar",
            "comment",
            "social",
            "share",
            "menu",
            "popup",
        ],
        class_tags: &["span", "div"],
    },
    noise_scope: NoiseScope::Document,
    allowed_kinds: &[
        NodeKind::Heading1,
        NodeKind::Heading2,
        NodeKind::Heading3,
        NodeKind::Paragraph,
        NodeKind::UnorderedList,
        NodeKind::OrderedList,
        NodeKind::Image,
    ],
    nav_markers: &[],
    quality_gate: false,
    template: &GENERIC_TEMPLATE,
    default_title: "Article",
};

/// Map an article URL to its site profile.
///
/// Pure string inspection, no network access. URLs that do not parse (even
/// after assuming `https://`) fall back to [`SiteProfile::Generic`].
#[must_use]
pub fn select_profile(url: &str) -> SiteProfile {
    let trimmed = url.trim();
    let parsed = Url::parse(trimmed).or_else(|_| Url::parse(&format!("https://{trimmed}")));

    let Ok(parsed) = parsed else {
        return SiteProfile::Generic;
    };

    let host = parsed.host_str().unwrap_or_default().to_ascii_lowercase();
    let path = parsed.path().to_ascii_lowercase();

    if host.contains("wikipedia.org") || path.contains("wikipedia.org") {
        SiteProfile::Wikipedia
    } else {
        SiteProfile::Generic
    }
}
