//! Typed errors for the scrape-merge pipeline.
//!
//! Uses `thiserror` for library errors (not `anyhow`) to keep the
//! failure taxonomy explicit: per-page fetch problems, sink problems,
//! and run-level problems never share a variant.

use thiserror::Error;

/// Errors that can occur fetching or parsing a single page.
///
/// These are always recovered locally inside an extractor — a fetch
/// error degrades one hero (or one source), never the run.
#[derive(Debug, Error)]
pub enum FetchError {
    /// HTTP request failed (connect, TLS, body read)
    #[error("HTTP error fetching {url}: {source}")]
    Http {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Non-success status code
    #[error("HTTP {status} from {url}")]
    Status { url: String, status: u16 },

    /// Request timed out
    #[error("timeout fetching {url}")]
    Timeout { url: String },
}

/// Errors from a persistence sink.
#[derive(Debug, Error)]
pub enum PersistError {
    /// Filesystem operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Record (de)serialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Run-level errors surfaced by the orchestrator.
///
/// Extractor failures never appear here; they degrade to empty
/// per-source contributions. Only systemic failures (persistence,
/// overlapping triggers) reach the caller.
#[derive(Debug, Error)]
pub enum ScrapeError {
    /// Another run currently holds the run lock
    #[error("a scrape run is already in progress")]
    RunInProgress,

    /// Persisting the canonical set failed
    #[error("persistence failed: {0}")]
    Persist(#[from] PersistError),
}

/// Result type alias for fetch operations.
pub type FetchResult<T> = std::result::Result<T, FetchError>;

/// Result type alias for sink operations.
pub type PersistResult<T> = std::result::Result<T, PersistError>;

/// Result type alias for orchestrator operations.
pub type Result<T> = std::result::Result<T, ScrapeError>;
