//! Error types for the Bookhaul crawler.
//!
//! Uses `thiserror` for structured error definitions that provide
//! clear context about what went wrong.

use thiserror::Error;

/// Error type for fetch operations.
///
/// Retries and backoff happen inside the fetcher; a returned error means
/// the request has definitively failed. Callers decide whether that skips
/// one book or aborts the crawl.
#[derive(Error, Debug)]
pub enum FetchError {
    /// HTTP transport failure (connection, TLS, timeout, body read)
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("unexpected status {status} for {url}")]
    Status { status: u16, url: String },

    /// URL parsing or resolution failed
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

/// Error type for configuration operations.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    /// Failed to parse config file
    #[error("Failed to parse config: {0}")]
    ParseError(String),

    /// Invalid configuration value
    #[error("Invalid config value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Config directory not found
    #[error("Could not determine config directory")]
    NoConfigDir,
}

/// Error type for writing export artifacts.
#[derive(Error, Debug)]
pub enum ExportError {
    /// Filesystem write failed
    #[error("Failed to write export file: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization failed
    #[error("Failed to serialize JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV serialization failed
    #[error("Failed to write CSV: {0}")]
    Csv(#[from] csv::Error),
}

/// Errors that abort a whole crawl.
///
/// Per-book and per-image failures are handled inside the pipeline and
/// never surface here; these variants are the fatal cases.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// The category index could not be fetched; no work is possible
    #[error("category discovery failed: {0}")]
    CategoryDiscovery(#[from] FetchError),

    /// The index page yielded no categories
    #[error("no categories found at {0}")]
    NoCategories(String),

    /// Persisting an export artifact failed
    #[error("export failed: {0}")]
    Export(#[from] ExportError),
}

/// Result type alias using anyhow for application-level error handling.
pub type Result<T> = anyhow::Result<T>;
