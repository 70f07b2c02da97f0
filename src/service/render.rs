//! Rendering assembled documents to PDF.
//!
//! The renderer is an external collaborator. [`ChromeRenderer`] drives a
//! headless Chromium binary; page size and margins come from the `@page`
//! rule embedded by the assembler, and backgrounds are kept through
//! `print-color-adjust: exact`.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, error, info};
use url::Url;

use crate::error::{Error, Result};

/// Turns an HTML document into a paginated artifact on disk.
#[async_trait]
pub trait Renderer: Send + Sync {
    /// Render `html` to `output`. Failures are reported, never retried.
    async fn render(&self, html: &str, output: &Path) -> Result<()>;
}

/// Headless Chromium `--print-to-pdf` renderer.
#[derive(Debug, Clone)]
pub struct ChromeRenderer {
    binary: String,
    timeout: Duration,
}

impl ChromeRenderer {
    #[must_use]
    pub fn new(binary: impl Into<String>, timeout: Duration) -> Self {
        Self {
            binary: binary.into(),
            timeout,
        }
    }

    fn args(output: &Path, source: &Url) -> Vec<String> {
        vec![
            "--headless=new".to_string(),
            "--no-sandbox".to_string(),
            "--disable-setuid-sandbox".to_string(),
            "--disable-dev-shm-usage".to_string(),
            "--disable-gpu".to_string(),
            "--no-pdf-header-footer".to_string(),
            // Give images and fonts time to load before printing.
            "--virtual-time-budget=2000".to_string(),
            format!("--print-to-pdf={}", output.display()),
            source.to_string(),
        ]
    }

    async fn run(&self, output: &Path, source: &Path) -> Result<()> {
        let source_url = Url::from_file_path(source)
            .map_err(|()| Error::Render(format!("not an absolute path: {}", source.display())))?;

        let mut command = Command::new(&self.binary);
        command
            .args(Self::args(output, &source_url))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        debug!(binary = %self.binary, output = %output.display(), "launching renderer");

        let finished = tokio::time::timeout(self.timeout, command.output())
            .await
            .map_err(|_| Error::Render(format!("renderer timed out after {:?}", self.timeout)))?
            .map_err(|e| Error::Render(format!("failed to launch {}: {e}", self.binary)))?;

        if !finished.status.success() {
            let stderr = String::from_utf8_lossy(&finished.stderr);
            let tail: String = stderr.lines().rev().take(5).collect::<Vec<_>>().join(" | ");
            return Err(Error::Render(format!(
                "renderer exited with {}: {tail}",
                finished.status
            )));
        }

        if !tokio::fs::try_exists(output).await.unwrap_or(false) {
            return Err(Error::Render("renderer produced no output file".to_string()));
        }

        Ok(())
    }
}

fn staging_path(output: &Path) -> PathBuf {
    let mut name = output
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".render.html");
    output.with_file_name(name)
}

#[async_trait]
impl Renderer for ChromeRenderer {
    async fn render(&self, html: &str, output: &Path) -> Result<()> {
        let staging = staging_path(output);
        tokio::fs::write(&staging, html).await?;
        let staging = tokio::fs::canonicalize(&staging).await?;
        let output = std::path::absolute(output)?;

        let result = self.run(&output, &staging).await;
        if let Err(e) = tokio::fs::remove_file(&staging).await {
            debug!(path = %staging.display(), error = %e, "could not remove staging file");
        }

        match &result {
            Ok(()) => info!(output = %output.display(), "PDF generated"),
            Err(e) => error!(output = %output.display(), error = %e, "PDF generation failed"),
        }
        result
    }
}
