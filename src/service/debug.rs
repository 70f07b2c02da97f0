//! Debug artifacts for inspecting what the pipeline kept.
//!
//! For each request four files land in the debug directory: the original
//! HTML, the assembled document, its plain text, and a short stats report.

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::result::Extraction;

/// Group digits in thousands: `1234567` → `1,234,567`.
fn group_thousands(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

fn stats_report(request_id: &str, original_html: &str, extraction: &Extraction) -> String {
    let stats = extraction.stats();
    let total: usize = stats.elements.values().sum();

    let mut report = String::new();
    let _ = writeln!(report, "Request ID: {request_id}");
    let _ = writeln!(report, "Title: {}", extraction.title);
    let _ = writeln!(report, "Profile: {}", extraction.profile);
    let _ = writeln!(
        report,
        "Original HTML length: {} characters",
        group_thousands(original_html.chars().count())
    );
    let _ = writeln!(
        report,
        "Cleaned HTML length: {} characters",
        group_thousands(stats.document_len)
    );
    let _ = writeln!(report, "Text length: {} characters", group_thousands(stats.text_len));
    let _ = writeln!(report, "Total elements: {total}");
    if extraction.used_fallback {
        report.push_str("Fallback document: yes\n");
    }
    report.push_str("\nElement breakdown:\n");
    for (tag, count) in &stats.elements {
        let _ = writeln!(report, "  {tag}: {count}");
    }
    report
}

/// Write all artifacts for one request into `dir`, returning the paths written.
pub fn write_debug_artifacts(
    dir: &Path,
    request_id: &str,
    original_html: &str,
    extraction: &Extraction,
) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir)?;

    let text = format!(
        "TITLE: {}\n{}\n\n{}",
        extraction.title,
        "=".repeat(80),
        extraction.text()
    );
    let files = [
        (format!("{request_id}_original.html"), original_html.to_string()),
        (format!("{request_id}_cleaned.html"), extraction.document.clone()),
        (format!("{request_id}_text.txt"), text),
        (
            format!("{request_id}_stats.txt"),
            stats_report(request_id, original_html, extraction),
        ),
    ];

    let mut written = Vec::with_capacity(files.len());
    for (name, contents) in files {
        let path = dir.join(name);
        fs::write(&path, contents)?;
        written.push(path);
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(1_234_567), "1,234,567");
    }

    #[test]
    fn test_writes_four_artifacts() {
        let tmp = tempfile::tempdir().unwrap();
        let html = "<html><body><article><h1>Debug Title</h1>\
                    <p>A paragraph that is long enough to keep.</p></article></body></html>";
        let extraction = crate::extract(html, "https://example.com/post");

        let written = write_debug_artifacts(tmp.path(), "req-9", html, &extraction).unwrap();
        assert_eq!(written.len(), 4);

        let text = fs::read_to_string(tmp.path().join("req-9_text.txt")).unwrap();
        assert!(text.starts_with("TITLE: Debug Title\n"));
        assert!(text.contains("A paragraph that is long enough to keep."));

        let stats = fs::read_to_string(tmp.path().join("req-9_stats.txt")).unwrap();
        assert!(stats.contains("Request ID: req-9"));
        assert!(stats.contains("  p: 1"));

        let original = fs::read_to_string(tmp.path().join("req-9_original.html")).unwrap();
        assert_eq!(original, html);
    }
}
