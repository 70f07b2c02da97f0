use article_press::{extract, extract_document, Options, SiteProfile};

const GENERIC_URL: &str = "https://example.com/posts/hello";
const WIKI_URL: &str = "https://en.wikipedia.org/wiki/Rust_(programming_language)";

#[test]
fn extract_generic_article_drops_aside_ad() {
    let html = r#"<html><body><article>
        <h1>Test Article</h1>
        <p>This is a test paragraph.</p>
        <aside class="ad">Advertisement</aside>
    </article></body></html>"#;

    let result = extract(html, GENERIC_URL);
    assert_eq!(result.profile, SiteProfile::Generic);
    assert!(result.title.contains("Test Article"));
    assert!(result.document.contains("test paragraph"));
    assert!(!result.document.contains("Advertisement"));
    assert!(!result.used_fallback);
}

#[test]
fn extract_wikipedia_article_drops_navbox_and_edit_links() {
    let html = r#"<html><head><title>Rust - Wikipedia</title></head><body>
        <h1 id="firstHeading">Rust (programming language)</h1>
        <div id="mw-content-text"><div class="mw-parser-output">
            <p>Rust is a general-purpose programming language emphasizing performance.</p>
            <div class="navbox">Navigation content</div>
            <p>The language <span class="mw-editsection">Edit section</span> was designed by Graydon Hoare.</p>
        </div></div>
    </body></html>"#;

    let result = extract(html, WIKI_URL);
    assert_eq!(result.profile, SiteProfile::Wikipedia);
    assert_eq!(result.title, "Rust (programming language)");
    assert!(result
        .document
        .contains("Rust is a general-purpose programming language emphasizing performance."));
    assert!(result.document.contains("was designed by Graydon Hoare."));
    assert!(!result.document.contains("Navigation content"));
    assert!(!result.document.contains("Edit section"));
}

#[test]
fn extract_wikipedia_uses_encyclopedia_template() {
    let html = r#"<div id="mw-content-text">
        <p>Paragraph number one has enough words.</p>
        <p>Paragraph number two has enough words.</p>
    </div>"#;

    let result = extract(html, WIKI_URL);
    assert!(result.document.contains("<title>Wikipedia Article - Wikipedia</title>"));
    assert!(result.document.contains("Source: Wikipedia"));
}

#[test]
fn extract_empty_body_yields_placeholder() {
    let result = extract("<html><body></body></html>", GENERIC_URL);
    assert!(!result.document.is_empty());
    assert!(!result.title.is_empty());
    assert!(result.document.contains("no content could be extracted"));
    assert_eq!(result.node_count, 0);
}

#[test]
fn extract_rewrites_protocol_relative_image() {
    let html = r#"<html><body><article>
        <h1>Gallery</h1>
        <p>Some descriptive text about the picture below.</p>
        <img src="//example.com/a.jpg" alt="x">
    </article></body></html>"#;

    let result = extract(html, GENERIC_URL);
    assert!(result.document.contains(r#"src="https://example.com/a.jpg""#));
    assert!(!result.document.contains(r#"src="//example.com"#));
    assert!(result.document.contains(r#"alt="x""#));
}

#[test]
fn extract_uses_lazy_image_source() {
    let html = r#"<article>
        <p>Lazy loaded images keep their real source elsewhere.</p>
        <img data-src="//cdn.example.com/lazy.png" alt="lazy">
    </article>"#;

    let result = extract(html, GENERIC_URL);
    assert!(result.document.contains(r#"src="https://cdn.example.com/lazy.png""#));
}

#[test]
fn extract_prefers_article_over_main() {
    let html = r#"
        <html>
          <body>
            <main><p>MAIN_ONLY_TEXT is here</p></main>
            <nav>NAV_TEXT</nav>
            <article><p>ARTICLE_ONLY_TEXT is here</p></article>
            <footer>FOOTER_TEXT</footer>
          </body>
        </html>
    "#;

    let result = extract(html, GENERIC_URL);
    assert!(result.document.contains("ARTICLE_ONLY_TEXT"));
    assert!(!result.document.contains("MAIN_ONLY_TEXT"));
    assert!(!result.document.contains("NAV_TEXT"));
    assert!(!result.document.contains("FOOTER_TEXT"));
}

#[test]
fn extract_falls_back_to_body_without_known_root() {
    let html = r#"<html><body>
        <div id="wrapper"><p>Body level paragraph that should be kept.</p></div>
    </body></html>"#;

    let result = extract(html, GENERIC_URL);
    assert!(result.document.contains("Body level paragraph that should be kept."));
}

#[test]
fn extract_title_prefers_h1_then_title_element() {
    let with_h1 = "<html><head><title>Page Title</title></head>\
                   <body><article><h1>Heading Title</h1></article></body></html>";
    assert_eq!(extract(with_h1, GENERIC_URL).title, "Heading Title");

    let without_h1 = "<html><head><title>Page Title</title></head>\
                      <body><article><p>Some paragraph content.</p></article></body></html>";
    assert_eq!(extract(without_h1, GENERIC_URL).title, "Page Title");

    let neither = "<html><body><article><p>Some paragraph content.</p></article></body></html>";
    assert_eq!(extract(neither, GENERIC_URL).title, "Article");
    assert_eq!(extract(neither, WIKI_URL).title, "Wikipedia Article");
}

#[test]
fn extract_escapes_title_markup() {
    let html = "<html><body><article><h1>Fish &amp; Chips &lt;3</h1>\
                <p>A paragraph about fish and chips.</p></article></body></html>";

    let result = extract(html, GENERIC_URL);
    assert_eq!(result.title, "Fish & Chips <3");
    assert!(result.document.contains("<h1>Fish &amp; Chips &lt;3</h1>"));
}

#[test]
fn extract_keeps_document_order() {
    let html = r#"<article>
        <h2>First section heading</h2>
        <p>First paragraph of the article.</p>
        <h2>Second section heading</h2>
        <p>Second paragraph of the article.</p>
    </article>"#;

    let result = extract(html, GENERIC_URL);
    let positions: Vec<usize> = [
        "First section heading",
        "First paragraph of the article.",
        "Second section heading",
        "Second paragraph of the article.",
    ]
    .iter()
    .map(|needle| result.document.find(needle).unwrap())
    .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn extract_skips_duplicate_paragraphs() {
    let html = r#"<article>
        <p>Repeated paragraph text for testing.</p>
        <p>Another distinct paragraph here.</p>
        <p>Repeated paragraph text for testing.</p>
    </article>"#;

    let result = extract(html, GENERIC_URL);
    assert_eq!(result.document.matches("Repeated paragraph text for testing.").count(), 1);
}

#[test]
fn extract_is_deterministic() {
    let html = r#"<html><body><article>
        <h1>Determinism</h1>
        <p>The same input always gives the same output.</p>
        <img src="//example.com/b.png" alt="b">
    </article></body></html>"#;

    assert_eq!(extract(html, GENERIC_URL), extract(html, GENERIC_URL));
    assert_eq!(extract(html, WIKI_URL), extract(html, WIKI_URL));
}

#[test]
fn extract_document_exposes_nodes() {
    let html = r#"<article>
        <h1>Exposed Title</h1>
        <p>The first paragraph is long enough.</p>
        <ul><li>first item</li><li>second item</li></ul>
    </article>"#;

    let extracted = extract_document(html, GENERIC_URL, &Options::default()).unwrap();
    assert_eq!(extracted.title, "Exposed Title");
    assert_eq!(extracted.profile, SiteProfile::Generic);
    assert_eq!(extracted.nodes.len(), 3);
    assert_eq!(extracted.nodes[2].markup, "<ul><li>first item</li><li>second item</li></ul>");
}

#[test]
fn extraction_stats_count_elements() {
    let html = r#"<article>
        <h1>Stats Title</h1>
        <p>First paragraph for the stats.</p>
        <p>Second paragraph for the stats.</p>
    </article>"#;

    let stats = extract(html, GENERIC_URL).stats();
    assert_eq!(stats.elements.get("p"), Some(&2));
    assert_eq!(stats.elements.get("h1"), Some(&2));
    assert!(stats.text_len > 0);
    assert!(stats.document_len > stats.text_len);
}
