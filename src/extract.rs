//! Extraction orchestrator.
//!
//! Runs profile selection, noise removal, root resolution, normalization, the
//! quality gate and assembly in sequence. Any internal failure is absorbed
//! into a fixed fallback document: extraction never aborts the caller.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use tracing::{debug, info, warn};

use crate::assemble::{self, FALLBACK_DOCUMENT, FALLBACK_TITLE};
use crate::dom::{self, Document};
use crate::error::{Error, Result};
use crate::normalize::{self, PassConfig};
use crate::options::Options;
use crate::patterns::{HEADING_CLOSE, HEADING_OPEN, NON_MARKUP_BLOCKS};
use crate::profile::{select_profile, SiteProfile};
use crate::result::{ExtractedDocument, Extraction};
use crate::selector::{self, noise, noise::NoiseScope};

/// Main entry point: always returns a usable document.
pub(crate) fn extract_content(html: &str, url: &str, options: &Options) -> Extraction {
    let profile = select_profile(url);
    debug!(%profile, html_len = html.len(), "starting extraction");

    guarded(profile, || {
        let extracted = extract_document(html, profile, options)?;
        let document = assemble::assemble(&extracted.title, &extracted.nodes, profile);
        info!(
            %profile,
            nodes = extracted.nodes.len(),
            title = %extracted.title,
            "extraction complete"
        );
        Ok(Extraction {
            document,
            title: extracted.title,
            profile,
            node_count: extracted.nodes.len(),
            used_fallback: false,
        })
    })
}

/// Run `pipeline`, turning both errors and panics into [`fallback`].
pub(crate) fn guarded<F>(profile: SiteProfile, pipeline: F) -> Extraction
where
    F: FnOnce() -> Result<Extraction>,
{
    match panic::catch_unwind(AssertUnwindSafe(pipeline)) {
        Ok(Ok(extraction)) => extraction,
        Ok(Err(err)) => {
            warn!(%profile, error = %err, "extraction failed, returning fallback document");
            fallback(profile)
        }
        Err(payload) => {
            warn!(
                %profile,
                panic = panic_message(payload.as_ref()),
                "extraction panicked, returning fallback document"
            );
            fallback(profile)
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("non-string panic payload")
}

/// The fixed minimal document used when the pipeline fails internally.
#[must_use]
pub fn fallback(profile: SiteProfile) -> Extraction {
    Extraction {
        document: FALLBACK_DOCUMENT.to_string(),
        title: FALLBACK_TITLE.to_string(),
        profile,
        node_count: 0,
        used_fallback: true,
    }
}

/// Run the pipeline up to (not including) assembly.
///
/// This is the only place errors surface; [`extract_content`] turns them,
/// and any panic, into the fallback document.
pub(crate) fn extract_document(
    html: &str,
    profile: SiteProfile,
    options: &Options,
) -> Result<ExtractedDocument> {
    let config = profile.config();
    let parsed = dom::parse(html);
    check_markup(html, &parsed)?;
    let doc = match config.noise_scope {
        NoiseScope::Document => noise::strip_noise(&parsed, &config.noise),
        NoiseScope::ContentRoot => parsed,
    };

    let title = resolve_title(&doc, config.default_title);
    let (root, source) = selector::resolve_root(&doc, config.content_selectors);
    debug!(?source, "resolved content root");

    if config.noise_scope == NoiseScope::ContentRoot {
        noise::strip_noise_in_place(&root, &config.noise);
    }

    let first_pass = normalize::normalize(&root, &PassConfig::primary(profile, options));
    debug!(nodes = first_pass.len(), "first normalization pass");
    let nodes = normalize::ensure_sufficient(first_pass, &root, profile, options);

    Ok(ExtractedDocument {
        title,
        nodes,
        profile,
    })
}

/// First `h1`, else `<title>`, else the profile default. Never empty.
fn resolve_title(doc: &Document, default_title: &str) -> String {
    ["h1", "title"]
        .iter()
        .filter_map(|selector| dom::select_first(doc, selector))
        .map(|sel| dom::text_projection(&sel))
        .find(|text| !text.is_empty())
        .unwrap_or_else(|| default_title.to_string())
}

/// Headings that ended up holding block content. Authors never nest these
/// on purpose; the parser does it when a heading is left open.
const SWALLOWED_BLOCKS: &str = "h1 p, h1 ul, h1 ol, h1 table, h1 blockquote, h1 pre, \
     h2 p, h2 ul, h2 ol, h2 table, h2 blockquote, h2 pre, \
     h3 p, h3 ul, h3 ol, h3 table, h3 blockquote, h3 pre";

/// Reject markup the parser could not repair into a sensible tree.
///
/// A heading left open folds the rest of the page into itself. The parsed
/// tree shows this as an `h1`-`h3` holding block content; the source must
/// also have more heading start tags than end tags (any `</hN>` closes any
/// open heading), so a page that really nests a paragraph in a heading
/// still goes through.
fn check_markup(html: &str, parsed: &Document) -> Result<()> {
    if !parsed.select(SWALLOWED_BLOCKS).exists() {
        return Ok(());
    }

    let markup = NON_MARKUP_BLOCKS.replace_all(html, "");
    let opened = HEADING_OPEN.find_iter(&markup).count();
    let closed = HEADING_CLOSE.find_iter(&markup).count();
    if opened > closed {
        return Err(Error::Malformed(format!(
            "{} unterminated heading element(s) swallowed block content",
            opened - closed
        )));
    }

    Ok(())
}
