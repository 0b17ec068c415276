//! Bookhaul - book catalog crawler and extractor.
//!
//! This library provides functionality for:
//! - Discovering catalog categories and walking their paginated listings
//! - Extracting structured book records from detail pages
//! - Downloading cover images and persisting JSON/CSV exports

pub mod assets;
pub mod catalog;
pub mod config;
pub mod console;
pub mod error;
pub mod export;
pub mod extract;
pub mod fetcher;
pub mod paginate;
pub mod pipeline;

// Re-export commonly used types
pub use assets::AssetStore;
pub use catalog::{Book, Category};
pub use config::Config;
pub use console::Console;
pub use error::{ConfigError, ExportError, FetchError, PipelineError};
pub use export::Exporter;
pub use extract::Extractor;
pub use fetcher::{Fetch, HttpFetcher};
pub use paginate::PageWalk;
pub use pipeline::{CrawlSummary, Pipeline};
