//! Service configuration.
//!
//! Values come from the environment with sensible local defaults, and can be
//! overridden field by field since everything is public.

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::Result;

/// Runtime settings for the fetch → extract → render → notify job.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Directory receiving `<request-id>.pdf` files (`PDF_OUTPUT_DIR`).
    pub output_dir: PathBuf,
    /// Base URL of the backend receiving completion notices (`BACKEND_URL`).
    pub backend_url: String,
    /// Total timeout for fetching the article.
    pub fetch_timeout: Duration,
    /// Total timeout for the completion webhook.
    pub notify_timeout: Duration,
    /// Upper bound for one renderer invocation.
    pub render_timeout: Duration,
    /// Headless Chromium executable (`CHROME_BIN`).
    pub chrome_binary: String,
    /// Write debug artifacts next to the output (`SAVE_DEBUG_FILES`).
    pub save_debug: bool,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("./pdfs"),
            backend_url: "http://localhost:5000".to_string(),
            fetch_timeout: Duration::from_secs(30),
            notify_timeout: Duration::from_secs(10),
            render_timeout: Duration::from_secs(60),
            chrome_binary: "chromium".to_string(),
            save_debug: true,
        }
    }
}

fn env_non_empty(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

impl ServiceConfig {
    /// Defaults overlaid with `PDF_OUTPUT_DIR`, `BACKEND_URL`, `CHROME_BIN`
    /// and `SAVE_DEBUG_FILES`.
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(dir) = env_non_empty("PDF_OUTPUT_DIR") {
            config.output_dir = PathBuf::from(dir);
        }
        if let Some(url) = env_non_empty("BACKEND_URL") {
            config.backend_url = url;
        }
        if let Some(bin) = env_non_empty("CHROME_BIN") {
            config.chrome_binary = bin;
        }
        if let Some(flag) = env_non_empty("SAVE_DEBUG_FILES").and_then(|v| parse_bool(&v)) {
            config.save_debug = flag;
        }
        config
    }

    /// Directory for debug artifacts.
    #[must_use]
    pub fn debug_dir(&self) -> PathBuf {
        self.output_dir.join("debug")
    }

    /// Output path of the rendered artifact for a request.
    #[must_use]
    pub fn output_path(&self, request_id: &str) -> PathBuf {
        self.output_dir.join(format!("{request_id}.pdf"))
    }

    /// Endpoint receiving completion notices.
    #[must_use]
    pub fn notify_endpoint(&self) -> String {
        format!("{}/api/update-pdf", self.backend_url.trim_end_matches('/'))
    }

    /// Create the output and debug directories.
    pub fn ensure_dirs(&self) -> Result<()> {
        create_dir(&self.output_dir)?;
        create_dir(&self.debug_dir())
    }
}

fn create_dir(path: &Path) -> Result<()> {
    std::fs::create_dir_all(path)?;
    Ok(())
}
