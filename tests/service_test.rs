use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use article_press::service::{
    HtmlFetcher, HttpFetcher, JobOutcome, JobStatus, PdfRequest, Renderer, Service, ServiceConfig,
    WebhookNotifier,
};
use article_press::{Error, Result};
use async_trait::async_trait;
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ARTICLE: &str = r#"<html><body><article>
    <h1>Test Article</h1>
    <p>This is a test paragraph.</p>
    <aside class="ad">Advertisement</aside>
</article></body></html>"#;

/// Writes the assembled HTML where the PDF would go.
struct FileRenderer;

#[async_trait]
impl Renderer for FileRenderer {
    async fn render(&self, html: &str, output: &Path) -> Result<()> {
        tokio::fs::write(output, html).await?;
        Ok(())
    }
}

struct BrokenRenderer;

#[async_trait]
impl Renderer for BrokenRenderer {
    async fn render(&self, _html: &str, _output: &Path) -> Result<()> {
        Err(Error::Render("printer on fire".to_string()))
    }
}

fn config(server: &MockServer, dir: &TempDir, save_debug: bool) -> ServiceConfig {
    ServiceConfig {
        output_dir: dir.path().join("pdfs"),
        backend_url: server.uri(),
        fetch_timeout: Duration::from_secs(5),
        notify_timeout: Duration::from_secs(5),
        save_debug,
        ..ServiceConfig::default()
    }
}

fn service(config: ServiceConfig, renderer: Arc<dyn Renderer>) -> Service {
    let fetcher = Arc::new(HttpFetcher::new(config.fetch_timeout).unwrap());
    let notifier = Arc::new(WebhookNotifier::new(config.notify_endpoint(), config.notify_timeout).unwrap());
    Service::new(config, fetcher, renderer, notifier)
}

async fn mount_article(server: &MockServer, body: &str) {
    Mock::given(method("GET"))
        .and(path("/article"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(body.to_string(), "text/html; charset=utf-8"),
        )
        .mount(server)
        .await;
}

#[tokio::test]
async fn process_writes_output_and_notifies_completion() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    mount_article(&server, ARTICLE).await;
    Mock::given(method("POST"))
        .and(path("/api/update-pdf"))
        .and(body_partial_json(json!({"requestId": "job-1", "status": "completed"})))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let config = config(&server, &dir, true);
    let expected_path = config.output_path("job-1");
    let debug_dir = config.debug_dir();
    let service = service(config, Arc::new(FileRenderer));

    let request = PdfRequest::new("job-1", format!("{}/article", server.uri()));
    let outcome = service.process(&request).await;

    assert_eq!(
        outcome,
        JobOutcome::Completed {
            pdf_path: expected_path.clone(),
            title: "Test Article".to_string(),
        }
    );
    let rendered = std::fs::read_to_string(&expected_path).unwrap();
    assert!(rendered.contains("test paragraph"));
    assert!(!rendered.contains("Advertisement"));

    for suffix in ["_original.html", "_cleaned.html", "_text.txt", "_stats.txt"] {
        assert!(debug_dir.join(format!("job-1{suffix}")).exists(), "missing {suffix}");
    }
}

#[tokio::test]
async fn process_skips_debug_files_when_disabled() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    mount_article(&server, ARTICLE).await;
    Mock::given(method("POST"))
        .and(path("/api/update-pdf"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let config = config(&server, &dir, false);
    let debug_dir = config.debug_dir();
    let service = service(config, Arc::new(FileRenderer));

    let request = PdfRequest::new("job-2", format!("{}/article", server.uri()));
    let outcome = service.process(&request).await;

    assert!(matches!(outcome, JobOutcome::Completed { .. }));
    assert!(!debug_dir.join("job-2_original.html").exists());
}

#[tokio::test]
async fn process_reports_http_status_failure() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/update-pdf"))
        .and(body_partial_json(json!({"requestId": "job-3", "status": "failed"})))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let config = config(&server, &dir, true);
    let output = config.output_path("job-3");
    let service = service(config, Arc::new(FileRenderer));

    let request = PdfRequest::new("job-3", format!("{}/missing", server.uri()));
    match service.process(&request).await {
        JobOutcome::Failed { error } => assert!(error.contains("HTTP 404"), "got {error}"),
        other => panic!("expected failure, got {other:?}"),
    }
    assert!(!output.exists());
}

#[tokio::test]
async fn process_reports_render_failure() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    mount_article(&server, ARTICLE).await;
    Mock::given(method("POST"))
        .and(path("/api/update-pdf"))
        .and(body_partial_json(json!({"requestId": "job-4", "status": "failed"})))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let service = service(config(&server, &dir, false), Arc::new(BrokenRenderer));

    let request = PdfRequest::new("job-4", format!("{}/article", server.uri()));
    match service.process(&request).await {
        JobOutcome::Failed { error } => assert!(error.contains("printer on fire")),
        other => panic!("expected failure, got {other:?}"),
    }
}

#[tokio::test]
async fn notification_failure_does_not_change_outcome() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    mount_article(&server, ARTICLE).await;
    Mock::given(method("POST"))
        .and(path("/api/update-pdf"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let service = service(config(&server, &dir, false), Arc::new(FileRenderer));

    let request = PdfRequest::new("job-5", format!("{}/article", server.uri()));
    assert!(matches!(
        service.process(&request).await,
        JobOutcome::Completed { .. }
    ));
}

#[tokio::test]
async fn submit_acknowledges_then_runs_in_background() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    mount_article(&server, ARTICLE).await;
    Mock::given(method("POST"))
        .and(path("/api/update-pdf"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let service = Arc::new(service(config(&server, &dir, false), Arc::new(FileRenderer)));

    let request = PdfRequest::new("job-6", format!("{}/article", server.uri()));
    let submission = service.submit(request).unwrap();
    assert_eq!(submission.ack.status, JobStatus::Processing);
    assert_eq!(submission.ack.request_id, "job-6");

    let outcome = submission.handle.await.unwrap();
    assert!(matches!(outcome, JobOutcome::Completed { .. }));
}

#[tokio::test(flavor = "current_thread")]
async fn large_pages_do_not_stall_other_jobs() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let mut large = String::from("<html><body><article><h1>Large Page</h1>");
    for i in 0..3_000 {
        large.push_str(&format!("<p>Paragraph number {i} with some filler words.</p>"));
    }
    large.push_str("</article></body></html>");
    mount_article(&server, &large).await;
    Mock::given(method("POST"))
        .and(path("/api/update-pdf"))
        .respond_with(ResponseTemplate::new(200))
        .expect(2)
        .mount(&server)
        .await;

    let service = service(config(&server, &dir, true), Arc::new(FileRenderer));
    let first = PdfRequest::new("job-8", format!("{}/article", server.uri()));
    let second = PdfRequest::new("job-9", format!("{}/article", server.uri()));

    let (a, b) = tokio::join!(service.process(&first), service.process(&second));
    assert!(matches!(a, JobOutcome::Completed { .. }));
    assert!(matches!(b, JobOutcome::Completed { .. }));
}

#[tokio::test]
async fn submit_rejects_invalid_requests_synchronously() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let service = Arc::new(service(config(&server, &dir, false), Arc::new(FileRenderer)));

    let bad_id = PdfRequest::new("", "https://example.com/article");
    assert!(matches!(service.submit(bad_id), Err(Error::InvalidRequest(_))));

    let bad_url = PdfRequest::new("job-7", "not a url");
    assert!(matches!(service.submit(bad_url), Err(Error::InvalidRequest(_))));

    assert!(server.received_requests().await.unwrap_or_default().is_empty());
}

#[tokio::test]
async fn fetcher_transcodes_using_content_type_charset() {
    let server = MockServer::start().await;
    let mut body = b"<html><body><h1>Caf".to_vec();
    body.push(0xE9);
    body.extend_from_slice(b"</h1></body></html>");
    Mock::given(method("GET"))
        .and(path("/latin1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(body, "text/html; charset=ISO-8859-1"),
        )
        .mount(&server)
        .await;

    let fetcher = HttpFetcher::new(Duration::from_secs(5)).unwrap();
    let html = fetcher.fetch(&format!("{}/latin1", server.uri())).await.unwrap();
    assert!(html.contains("<h1>Café</h1>"));
}

#[tokio::test]
async fn fetcher_maps_unreachable_host_to_fetch_error() {
    let fetcher = HttpFetcher::new(Duration::from_secs(2)).unwrap();
    let result = fetcher.fetch("http://127.0.0.1:9/unreachable").await;
    assert!(matches!(result, Err(Error::Fetch { .. })));
}
