//! Article fetching over HTTP.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, CONTENT_TYPE};
use reqwest::{Client, StatusCode};
use tracing::{error, info};

use crate::encoding;
use crate::error::{Error, Result};

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

/// Source of raw article HTML.
#[async_trait]
pub trait HtmlFetcher: Send + Sync {
    /// Fetch the page at `url` as text. Any failure is terminal for the request.
    async fn fetch(&self, url: &str) -> Result<String>;
}

/// `reqwest`-backed fetcher with browser-like headers and a total timeout.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(timeout: Duration) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8"),
        );
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.5"));

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Fetch {
                url: String::new(),
                reason: format!("client setup failed: {e}"),
            })?;

        Ok(Self { client })
    }
}

#[async_trait]
impl HtmlFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        let transport = |e: reqwest::Error| {
            let reason = if e.is_timeout() {
                "Request timeout".to_string()
            } else {
                format!("Network error: {e}")
            };
            error!(url, %reason, "fetching HTML failed");
            Error::Fetch {
                url: url.to_string(),
                reason,
            }
        };

        let response = self.client.get(url).send().await.map_err(transport)?;

        let status = response.status();
        if status != StatusCode::OK {
            error!(url, status = status.as_u16(), "unexpected status fetching HTML");
            return Err(Error::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let bytes = response.bytes().await.map_err(transport)?;
        let html = encoding::transcode_to_utf8(&bytes, content_type.as_deref());

        info!(url, chars = html.chars().count(), "fetched HTML");
        Ok(html)
    }
}
