//! Error types for article-press.
//!
//! The extraction pipeline only ever produces [`Error::Malformed`] internally,
//! and the orchestrator absorbs it into the fallback document. The remaining
//! variants belong to the service plumbing around the pipeline.

/// Error type for extraction and service operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Markup that the pipeline refuses to trust.
    #[error("Malformed HTML: {0}")]
    Malformed(String),

    /// Network failure or timeout while fetching the article.
    #[error("Failed to fetch {url}: {reason}")]
    Fetch {
        /// URL that was being fetched.
        url: String,
        /// Underlying failure description.
        reason: String,
    },

    /// The article server answered with a non-200 status.
    #[error("HTTP {status}: Failed to fetch {url}")]
    HttpStatus {
        /// URL that was being fetched.
        url: String,
        /// Status code returned by the server.
        status: u16,
    },

    /// The external renderer failed to produce the output artifact.
    #[error("PDF generation failed: {0}")]
    Render(String),

    /// The incoming request did not pass validation.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Completion webhook could not be delivered.
    #[error("Notification failed: {0}")]
    Notify(String),

    /// A blocking job stage was cancelled or could not be joined.
    #[error("Background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    /// Filesystem failure (output directory, debug artifacts, temp files).
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Result type alias for article-press operations.
pub type Result<T> = std::result::Result<T, Error>;
