//! Bookhaul CLI - book catalog crawler.

use anyhow::{Context, Result};
use bookhaul::assets::AssetStore;
use bookhaul::config::Config;
use bookhaul::console::Console;
use bookhaul::export::Exporter;
use bookhaul::fetcher::HttpFetcher;
use bookhaul::pipeline::Pipeline;
use clap::Parser;
use std::path::PathBuf;
use url::Url;

/// Book catalog crawler: categories, listings, details, cover images.
#[derive(Parser, Debug)]
#[command(name = "bookhaul")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Catalog front page URL (overrides the configured base URL).
    catalog_url: Option<String>,

    /// Directory for JSON/CSV exports (overrides config).
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Directory for downloaded cover images (overrides config).
    #[arg(long)]
    images_dir: Option<PathBuf>,

    /// Re-crawl even if exports already exist.
    #[arg(long)]
    force: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let console = Console::new();

    console.section("Bookhaul - Book Catalog Crawler");

    // Load configuration
    console.step("Loading configuration...");
    let mut config = Config::load().context("Failed to load configuration")?;
    if let Some(url) = args.catalog_url {
        config.scraping.base_url = url;
    }
    if let Some(dir) = args.data_dir {
        config.paths.data_directory = dir;
    }
    if let Some(dir) = args.images_dir {
        config.paths.images_directory = dir;
    }
    config.validate().context("Invalid configuration")?;
    console.success("Configuration loaded");

    let base_url = Url::parse(&config.scraping.base_url).context("Invalid catalog URL")?;

    let exporter =
        Exporter::new(&config.paths.data_directory).context("Failed to create data directory")?;

    // Skip the crawl when exports are already present
    if exporter.all_books_path().exists() && !args.force {
        console.info(&format!(
            "Data already exists at {}. Pass --force to re-crawl.",
            config.paths.data_directory.display()
        ));
        return Ok(());
    }

    let fetcher =
        HttpFetcher::new(config.scraping.clone()).context("Failed to create HTTP client")?;
    let assets = AssetStore::new(&config.paths.images_directory)
        .context("Failed to create image directory")?;

    let pipeline = Pipeline::new(
        &fetcher,
        assets,
        exporter,
        console.clone(),
        config.scraping.max_concurrent_requests,
    );

    console.section(&format!("Crawling {}", base_url));
    let summary = pipeline.run(&base_url).await.context("Crawl failed")?;

    console.section("Crawl complete");
    console.success(&format!(
        "{} categories, {} books",
        summary.categories, summary.books
    ));
    if summary.skipped_books > 0 {
        console.warning(&format!("{} detail pages skipped", summary.skipped_books));
    }
    if summary.skipped_categories > 0 {
        console.warning(&format!(
            "{} categories skipped",
            summary.skipped_categories
        ));
    }
    if summary.failed_images > 0 {
        console.warning(&format!(
            "{} cover images failed to download",
            summary.failed_images
        ));
    }
    if summary.duplicate_upcs > 0 {
        console.warning(&format!("{} duplicate UPCs dropped", summary.duplicate_upcs));
    }
    if summary.cycles_detected > 0 {
        console.warning(&format!(
            "{} pagination cycles detected",
            summary.cycles_detected
        ));
    }

    Ok(())
}
