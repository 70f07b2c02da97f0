//! Completion webhook.

use std::time::Duration;

use async_trait::async_trait;
use chrono::Local;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{Error, Result};

/// Lifecycle state of a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Processing,
    Completed,
    Failed,
}

/// Payload posted to the backend when a job finishes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionNotice {
    pub request_id: String,
    pub pdf_path: Option<String>,
    pub status: JobStatus,
    pub error: Option<String>,
    pub timestamp: String,
}

impl CompletionNotice {
    #[must_use]
    pub fn completed(request_id: &str, pdf_path: String) -> Self {
        Self {
            request_id: request_id.to_string(),
            pdf_path: Some(pdf_path),
            status: JobStatus::Completed,
            error: None,
            timestamp: Local::now().to_rfc3339(),
        }
    }

    #[must_use]
    pub fn failed(request_id: &str, error: String) -> Self {
        Self {
            request_id: request_id.to_string(),
            pdf_path: None,
            status: JobStatus::Failed,
            error: Some(error),
            timestamp: Local::now().to_rfc3339(),
        }
    }
}

/// Receives job completion notices.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Deliver a notice. Callers log and swallow the error.
    async fn notify(&self, notice: &CompletionNotice) -> Result<()>;
}

/// Posts notices as JSON to the backend's update endpoint.
#[derive(Debug, Clone)]
pub struct WebhookNotifier {
    client: Client,
    endpoint: String,
}

impl WebhookNotifier {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Notify(format!("client setup failed: {e}")))?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }
}

#[async_trait]
impl Notifier for WebhookNotifier {
    async fn notify(&self, notice: &CompletionNotice) -> Result<()> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(notice)
            .send()
            .await
            .map_err(|e| Error::Notify(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            info!(request_id = %notice.request_id, "notified backend");
            Ok(())
        } else {
            warn!(request_id = %notice.request_id, status = status.as_u16(), "backend notification rejected");
            Err(Error::Notify(format!("backend returned {status}")))
        }
    }
}
