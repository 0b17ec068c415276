//! Crawl orchestration: category discovery, listing traversal, detail
//! extraction, image download, and persistence of the results.
//!
//! A single failed detail page or image never aborts the run; it is logged
//! and the crawl moves on. Only a failed or empty category index is fatal,
//! since without categories there is no work to do.

use crate::assets::AssetStore;
use crate::catalog::{sanitize_name, Book, Category};
use crate::console::Console;
use crate::error::{FetchError, PipelineError};
use crate::export::Exporter;
use crate::extract::Extractor;
use crate::fetcher::Fetch;
use crate::paginate;
use futures::StreamExt;
use scraper::Html;
use std::collections::HashSet;
use url::Url;

/// Counters reported at the end of a crawl.
#[derive(Debug, Default)]
pub struct CrawlSummary {
    pub categories: usize,
    pub books: usize,

    /// Detail pages that failed and were skipped.
    pub skipped_books: usize,

    /// Categories whose listing walk failed entirely.
    pub skipped_categories: usize,

    /// Books whose cover image could not be downloaded.
    pub failed_images: usize,

    /// Books dropped from the aggregate because their UPC was already seen.
    pub duplicate_upcs: usize,

    /// Categories whose pagination looped back on itself.
    pub cycles_detected: usize,
}

/// Drives the full crawl and owns persistence of its results.
pub struct Pipeline<'a> {
    fetcher: &'a dyn Fetch,
    extractor: Extractor,
    assets: AssetStore,
    exporter: Exporter,
    console: Console,
    max_concurrent_details: usize,
}

impl<'a> Pipeline<'a> {
    pub fn new(
        fetcher: &'a dyn Fetch,
        assets: AssetStore,
        exporter: Exporter,
        console: Console,
        max_concurrent_details: usize,
    ) -> Self {
        Self {
            fetcher,
            extractor: Extractor::new(),
            assets,
            exporter,
            console,
            max_concurrent_details,
        }
    }

    /// Runs the crawl from the catalog's front page.
    ///
    /// Categories are processed in discovery order. The aggregate keeps the
    /// first book seen for each UPC; later duplicates are dropped with a
    /// warning so the export stays a duplicate-free union.
    pub async fn run(&self, base_url: &Url) -> Result<CrawlSummary, PipelineError> {
        let mut summary = CrawlSummary::default();

        self.console.step("Extracting categories...");
        let categories = self.discover_categories(base_url).await?;
        if categories.is_empty() {
            return Err(PipelineError::NoCategories(base_url.to_string()));
        }
        self.exporter.save_categories(&categories)?;
        summary.categories = categories.len();
        self.console
            .success(&format!("Found {} categories", categories.len()));

        let mut all_books: Vec<Book> = Vec::new();
        let mut seen_upcs: HashSet<String> = HashSet::new();

        for category in &categories {
            self.console
                .step(&format!("Scraping category: {}", category.name));

            let books = match self.scrape_category(category, &mut summary).await {
                Ok(books) => books,
                Err(e) => {
                    summary.skipped_categories += 1;
                    self.console
                        .warning(&format!("Skipping category {}: {}", category.name, e));
                    continue;
                }
            };

            self.exporter.save_category_books(&category.slug, &books)?;
            self.console
                .success(&format!("{}: {} books", category.name, books.len()));

            for book in books {
                // Books without a UPC cannot be deduplicated; keep them all.
                if book.upc.is_empty() || seen_upcs.insert(book.upc.clone()) {
                    all_books.push(book);
                } else {
                    summary.duplicate_upcs += 1;
                    self.console.warning(&format!(
                        "Duplicate UPC {} ({}), keeping first",
                        book.upc, book.title
                    ));
                }
            }
        }

        summary.books = all_books.len();
        self.exporter.save_all_books(&all_books)?;

        Ok(summary)
    }

    async fn discover_categories(&self, base_url: &Url) -> Result<Vec<Category>, FetchError> {
        let body = self.fetcher.fetch_html(base_url).await?;
        let doc = Html::parse_document(&body);
        Ok(self.extractor.categories(&doc, base_url))
    }

    /// Walks one category's listings and scrapes every book found.
    ///
    /// Detail pages are fetched through a bounded worker pool; the global
    /// request limits live in the fetcher, so the pool only shapes how far
    /// ahead this category runs. Result order is not significant.
    async fn scrape_category(
        &self,
        category: &Category,
        summary: &mut CrawlSummary,
    ) -> Result<Vec<Book>, FetchError> {
        let start =
            Url::parse(&category.url).map_err(|e| FetchError::InvalidUrl(e.to_string()))?;

        let walk = paginate::collect_detail_urls(self.fetcher, &self.extractor, &start).await?;
        if walk.cycle_detected {
            summary.cycles_detected += 1;
            self.console.warning(&format!(
                "Pagination cycle in {}, stopping after {} pages",
                category.name, walk.pages_visited
            ));
        }

        let results: Vec<Result<Book, (Url, FetchError)>> = futures::stream::iter(
            walk.detail_urls.into_iter().map(move |url| async move {
                match self.scrape_book(&url, category).await {
                    Ok(book) => Ok(book),
                    Err(e) => Err((url, e)),
                }
            }),
        )
        .buffer_unordered(self.max_concurrent_details.max(1))
        .collect()
        .await;

        let mut books = Vec::new();
        for result in results {
            match result {
                Ok(book) => {
                    if !book.image_url.is_empty() && book.image_filename.is_none() {
                        summary.failed_images += 1;
                        self.console
                            .warning(&format!("No cover image saved for {}", book.title));
                    }
                    books.push(book);
                }
                Err((url, e)) => {
                    summary.skipped_books += 1;
                    self.console.warning(&format!("Skipping {url}: {e}"));
                }
            }
        }

        Ok(books)
    }

    /// Fetches one detail page and builds its book record.
    ///
    /// The owning category is attached here; the image download is best
    /// effort and a failure leaves `image_filename` empty.
    async fn scrape_book(&self, url: &Url, category: &Category) -> Result<Book, FetchError> {
        let body = self.fetcher.fetch_html(url).await?;
        let mut book = {
            let doc = Html::parse_document(&body);
            self.extractor.book(&doc, url)
        };
        book.category_name = category.name.clone();
        book.category_slug = category.slug.clone();

        if let Ok(image_url) = Url::parse(&book.image_url) {
            let filename = format!("{}.jpg", sanitize_name(&book.title));
            book.image_filename = self
                .assets
                .download(self.fetcher, &image_url, &filename)
                .await;
        }

        Ok(book)
    }
}
