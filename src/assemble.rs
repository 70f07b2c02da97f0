//! Document assembly.
//!
//! Wraps the title and the normalized nodes into one self-contained HTML
//! document with embedded print styles, ready for a headless renderer. The
//! template only changes presentation; it never influences which nodes appear.

use std::fmt::Write as _;

use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::normalize::{ContentNode, NodeKind};
use crate::profile::SiteProfile;

/// Visual template for one profile.
#[derive(Debug)]
pub struct Template {
    /// Appended to the `<title>` element, after the page title.
    pub title_suffix: &'static str,
    /// Embedded stylesheet.
    pub stylesheet: &'static str,
    /// Footer markup, emitted only when there is content.
    pub footer: Option<&'static str>,
}

/// Serif encyclopedia layout with a source footer.
pub static WIKIPEDIA_TEMPLATE: Template = Template {
    title_suffix: " - Wikipedia",
    stylesheet: r#"
        @page { size: A4; margin: 20mm; }
        body {
            font-family: 'Georgia', 'Times New Roman', serif;
            line-height: 1.7;
            max-width: 800px;
            margin: 40px auto;
            padding: 20px;
            color: #333;
            -webkit-print-color-adjust: exact;
            print-color-adjust: exact;
        }
        h1 {
            font-size: 32px;
            margin-bottom: 30px;
            color: #1a1a1a;
            border-bottom: 3px solid #2c5282;
            padding-bottom: 15px;
            text-align: center;
        }
        h2 {
            font-size: 24px;
            margin-top: 40px;
            margin-bottom: 20px;
            color: #2d3748;
            border-bottom: 1px solid #cbd5e0;
            padding-bottom: 8px;
        }
        h3 {
            font-size: 20px;
            margin-top: 30px;
            margin-bottom: 15px;
            color: #4a5568;
        }
        p {
            margin-bottom: 20px;
            text-align: justify;
            font-size: 16px;
            line-height: 1.8;
        }
        ul, ol {
            margin-bottom: 20px;
            padding-left: 40px;
        }
        li {
            margin-bottom: 10px;
            font-size: 16px;
            line-height: 1.6;
        }
        .source-footer {
            margin-top: 50px;
            padding-top: 20px;
            border-top: 1px solid #e2e8f0;
            font-size: 14px;
            color: #718096;
            text-align: center;
        }
"#,
    footer: Some(
        r#"<div class="source-footer">Source: Wikipedia - The Free Encyclopedia</div>"#,
    ),
};

/// Narrow single-column article layout, no footer.
pub static GENERIC_TEMPLATE: Template = Template {
    title_suffix: "",
    stylesheet: r#"
        @page { size: A4; margin: 20mm; }
        body {
            font-family: 'Georgia', serif;
            line-height: 1.6;
            max-width: 700px;
            margin: 40px auto;
            padding: 20px;
            color: #333;
            -webkit-print-color-adjust: exact;
            print-color-adjust: exact;
        }
        h1 {
            font-size: 28px;
            margin-bottom: 20px;
            color: #1a1a1a;
            border-bottom: 2px solid #4a5568;
            padding-bottom: 10px;
        }
        h2 {
            font-size: 22px;
            margin-top: 30px;
            margin-bottom: 15px;
            color: #2d3748;
        }
        h3 {
            font-size: 18px;
            margin-top: 25px;
            margin-bottom: 12px;
            color: #4a5568;
        }
        p {
            margin-bottom: 16px;
            text-align: justify;
        }
        img {
            max-width: 100%;
            height: auto;
            display: block;
            margin: 20px auto;
        }
        ul, ol {
            margin-bottom: 16px;
            padding-left: 30px;
        }
"#,
    footer: None,
};

/// Body emitted when nothing could be extracted, so the rendered page is never blank.
pub const EMPTY_PLACEHOLDER: &str = r#"<div class="empty-placeholder" style="text-align: center; color: #666; margin-top: 100px;">
        <h3>No content could be extracted</h3>
        <p>Sorry, no content could be extracted from this page. It might have a different structure than expected.</p>
    </div>"#;

/// Title of the fixed fallback document.
pub const FALLBACK_TITLE: &str = "Article";

/// Minimal document returned when extraction fails internally.
pub const FALLBACK_DOCUMENT: &str = "<!DOCTYPE html>
<html>
<head><meta charset=\"UTF-8\"><title>Article</title></head>
<body>
    <h1>Article Content</h1>
    <p>Unable to parse the article content properly.</p>
</body>
</html>
";

/// Serialize one node. Images are re-emitted as a bare `<img>` carrying only
/// the resolved `src` and `alt`; everything else keeps its original markup.
fn render_node(node: &ContentNode) -> Option<String> {
    if node.kind != NodeKind::Image {
        return Some(node.markup.clone());
    }

    let image = node.image.as_ref()?;
    if image.src.is_empty() {
        return None;
    }
    Some(format!(
        r#"<img src="{}" alt="{}" />"#,
        encode_double_quoted_attribute(&image.src),
        encode_double_quoted_attribute(&image.alt)
    ))
}

/// Build the complete, self-contained document.
#[must_use]
pub fn assemble(title: &str, nodes: &[ContentNode], profile: SiteProfile) -> String {
    let template = profile.config().template;
    let escaped_title = encode_text(title);

    let mut html = String::with_capacity(4096 + nodes.iter().map(|n| n.markup.len()).sum::<usize>());
    html.push_str("<!DOCTYPE html>\n<html>\n<head>\n    <meta charset=\"UTF-8\">\n");
    let _ = writeln!(html, "    <title>{escaped_title}{}</title>", template.title_suffix);
    let _ = writeln!(html, "    <style>{}    </style>", template.stylesheet);
    html.push_str("</head>\n<body>\n");
    let _ = writeln!(html, "    <h1>{escaped_title}</h1>");

    for markup in nodes.iter().filter_map(render_node) {
        html.push_str(&markup);
        html.push('\n');
    }

    if nodes.is_empty() {
        html.push_str("    ");
        html.push_str(EMPTY_PLACEHOLDER);
        html.push('\n');
    } else if let Some(footer) = template.footer {
        html.push_str("    ");
        html.push_str(footer);
        html.push('\n');
    }

    html.push_str("</body>\n</html>\n");
    html
}
