//! The job around the pipeline: fetch → extract → debug → render → notify.
//!
//! Each request is an independent unit of work. [`Service::submit`] validates
//! and acknowledges synchronously, then runs the job on the tokio runtime
//! without the caller waiting for it. Fetch and render failures only ever
//! reach the requester through the completion notice.

use std::path::PathBuf;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::task::JoinHandle;
use tracing::{error, info, warn};
use url::Url;

use crate::error::{Error, Result};

pub mod config;
pub mod debug;
pub mod fetch;
pub mod notify;
pub mod render;

pub use config::ServiceConfig;
pub use fetch::{HtmlFetcher, HttpFetcher};
pub use notify::{CompletionNotice, JobStatus, Notifier, WebhookNotifier};
pub use render::{ChromeRenderer, Renderer};

/// Longest accepted request identifier, in characters.
pub const MAX_REQUEST_ID_LEN: usize = 100;

/// Incoming request to turn `url` into a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PdfRequest {
    pub request_id: String,
    pub url: String,
}

impl PdfRequest {
    #[must_use]
    pub fn new(request_id: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            request_id: request_id.into(),
            url: url.into(),
        }
    }

    /// Check the request id (non-empty, at most 100 characters, usable as a
    /// file name) and that the URL is absolute http(s).
    pub fn validate(&self) -> Result<()> {
        let id = &self.request_id;
        if id.trim().is_empty() || id.chars().count() > MAX_REQUEST_ID_LEN {
            return Err(Error::InvalidRequest("Invalid request ID".to_string()));
        }
        if id.contains(['/', '\\']) || id.starts_with('.') {
            return Err(Error::InvalidRequest(
                "request ID must not contain path components".to_string(),
            ));
        }

        let url = Url::parse(&self.url)
            .map_err(|e| Error::InvalidRequest(format!("invalid URL {:?}: {e}", self.url)))?;
        if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
            return Err(Error::InvalidRequest(format!(
                "URL must be http(s) with a host: {}",
                self.url
            )));
        }
        Ok(())
    }
}

/// Immediate reply to an accepted request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Acknowledgement {
    pub status: JobStatus,
    pub request_id: String,
    pub message: Option<String>,
}

/// How a job ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobOutcome {
    Completed { pdf_path: PathBuf, title: String },
    Failed { error: String },
}

/// An accepted request and the handle of its background job.
#[derive(Debug)]
pub struct Submission {
    pub ack: Acknowledgement,
    /// Dropping the handle detaches the job; it keeps running.
    pub handle: JoinHandle<JobOutcome>,
}

/// Wires the external collaborators around the extraction pipeline.
pub struct Service {
    config: ServiceConfig,
    fetcher: Arc<dyn HtmlFetcher>,
    renderer: Arc<dyn Renderer>,
    notifier: Arc<dyn Notifier>,
}

impl Service {
    #[must_use]
    pub fn new(
        config: ServiceConfig,
        fetcher: Arc<dyn HtmlFetcher>,
        renderer: Arc<dyn Renderer>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            config,
            fetcher,
            renderer,
            notifier,
        }
    }

    /// Build the production collaborators (reqwest fetcher, headless Chromium,
    /// webhook notifier) from configuration.
    pub fn from_config(config: ServiceConfig) -> Result<Self> {
        let fetcher = Arc::new(HttpFetcher::new(config.fetch_timeout)?);
        let renderer = Arc::new(ChromeRenderer::new(
            config.chrome_binary.clone(),
            config.render_timeout,
        ));
        let notifier = Arc::new(WebhookNotifier::new(
            config.notify_endpoint(),
            config.notify_timeout,
        )?);
        Ok(Self::new(config, fetcher, renderer, notifier))
    }

    #[must_use]
    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// Validate, acknowledge, and start the job in the background.
    ///
    /// Must be called from within a tokio runtime.
    pub fn submit(self: &Arc<Self>, request: PdfRequest) -> Result<Submission> {
        info!(request_id = %request.request_id, url = %request.url, "received request");
        request.validate()?;

        let ack = Acknowledgement {
            status: JobStatus::Processing,
            request_id: request.request_id.clone(),
            message: Some("PDF generation started".to_string()),
        };

        let service = Arc::clone(self);
        let handle = tokio::spawn(async move { service.process(&request).await });

        Ok(Submission { ack, handle })
    }

    /// Run one job to completion and notify the backend. Never fails.
    pub async fn process(&self, request: &PdfRequest) -> JobOutcome {
        info!(request_id = %request.request_id, "starting PDF generation");

        let (outcome, notice) = match self.run(request).await {
            Ok((pdf_path, title)) => {
                info!(request_id = %request.request_id, path = %pdf_path.display(), "PDF generation completed");
                let notice =
                    CompletionNotice::completed(&request.request_id, pdf_path.display().to_string());
                (JobOutcome::Completed { pdf_path, title }, notice)
            }
            Err(e) => {
                error!(request_id = %request.request_id, error = %e, "PDF generation failed");
                let message = e.to_string();
                let notice = CompletionNotice::failed(&request.request_id, message.clone());
                (JobOutcome::Failed { error: message }, notice)
            }
        };

        if let Err(e) = self.notifier.notify(&notice).await {
            warn!(request_id = %request.request_id, error = %e, "could not notify backend");
        }

        outcome
    }

    async fn run(&self, request: &PdfRequest) -> Result<(PathBuf, String)> {
        let html = self.fetcher.fetch(&request.url).await?;

        // Extraction and the debug writer are CPU and disk bound.
        let url = request.url.clone();
        let request_id = request.request_id.clone();
        let debug_dir = self.config.save_debug.then(|| self.config.debug_dir());
        let extraction = tokio::task::spawn_blocking(move || {
            let extraction = crate::extract(&html, &url);
            if let Some(dir) = debug_dir {
                match debug::write_debug_artifacts(&dir, &request_id, &html, &extraction) {
                    Ok(_) => info!(request_id = %request_id, "debug files saved"),
                    Err(e) => warn!(request_id = %request_id, error = %e, "could not save debug files"),
                }
            }
            extraction
        })
        .await?;

        self.config.ensure_dirs()?;
        let pdf_path = self.config.output_path(&request.request_id);
        self.renderer.render(&extraction.document, &pdf_path).await?;

        Ok((pdf_path, extraction.title))
    }
}
