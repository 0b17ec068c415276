//! HTTP fetching with politeness controls.
//!
//! Every outbound request goes through [`HttpFetcher`], which enforces a
//! cap on concurrent requests, a delay before each request, a per-request
//! timeout, and bounded retries with exponential backoff. The target site
//! is a shared resource; these limits apply no matter how much parallelism
//! the caller introduces.

use crate::config::ScrapingConfig;
use crate::console::Console;
use crate::error::FetchError;
use async_trait::async_trait;
use std::time::Duration;
use tokio::sync::Semaphore;
use url::Url;

/// Interface for fetching pages and raw assets.
///
/// The paginator and pipeline depend on this trait rather than on a
/// concrete client, so tests can drive them with canned responses.
#[async_trait]
pub trait Fetch: Send + Sync {
    /// Fetches a URL and returns the response body as text.
    async fn fetch_html(&self, url: &Url) -> Result<String, FetchError>;

    /// Fetches a URL and returns the raw response bytes.
    async fn fetch_bytes(&self, url: &Url) -> Result<Vec<u8>, FetchError>;
}

/// Production fetcher backed by a reqwest client.
pub struct HttpFetcher {
    client: reqwest::Client,
    limiter: Semaphore,
    config: ScrapingConfig,
    console: Console,
}

impl HttpFetcher {
    /// Builds the fetcher and its HTTP client from the scraping config.
    pub fn new(config: ScrapingConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("bookhaul/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(config.request_timeout_sec))
            .gzip(true)
            .brotli(true)
            .build()?;

        Ok(Self {
            client,
            limiter: Semaphore::new(config.max_concurrent_requests.max(1)),
            config,
            console: Console::new(),
        })
    }

    /// Single attempt: politeness delay, request, status check.
    async fn get_once(&self, url: &Url) -> Result<reqwest::Response, FetchError> {
        rate_limit(self.config.delay_between_requests_sec).await;

        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        Ok(response)
    }

    /// Requests a URL, retrying transient failures with backoff.
    async fn get_with_retries(&self, url: &Url) -> Result<reqwest::Response, FetchError> {
        let attempts = self.config.retries.max(1);
        let mut attempt = 0;

        loop {
            match self.get_once(url).await {
                Ok(response) => return Ok(response),
                Err(e) => {
                    attempt += 1;
                    if attempt >= attempts || !is_retryable(&e) {
                        return Err(e);
                    }

                    // Exponential backoff
                    let delay = Duration::from_secs(2u64.pow(attempt));
                    self.console.warning(&format!(
                        "Request failed, retrying in {:?} (attempt {}/{}): {}",
                        delay,
                        attempt + 1,
                        attempts,
                        e
                    ));
                    tokio::time::sleep(delay).await;
                }
            }
        }
    }
}

#[async_trait]
impl Fetch for HttpFetcher {
    async fn fetch_html(&self, url: &Url) -> Result<String, FetchError> {
        let _permit = self.limiter.acquire().await.expect("request limiter closed");
        let response = self.get_with_retries(url).await?;
        Ok(response.text().await?)
    }

    async fn fetch_bytes(&self, url: &Url) -> Result<Vec<u8>, FetchError> {
        let _permit = self.limiter.acquire().await.expect("request limiter closed");
        let response = self.get_with_retries(url).await?;
        Ok(response.bytes().await?.to_vec())
    }
}

/// True for failures worth retrying: timeouts, connection errors,
/// throttling, and server errors. Client errors fail immediately.
fn is_retryable(error: &FetchError) -> bool {
    match error {
        FetchError::Http(e) => e.is_timeout() || e.is_connect(),
        FetchError::Status { status, .. } => *status == 429 || *status >= 500,
        FetchError::InvalidUrl(_) => false,
    }
}

/// Applies the politeness delay before a request.
async fn rate_limit(delay_sec: f64) {
    if delay_sec > 0.0 {
        tokio::time::sleep(Duration::from_secs_f64(delay_sec)).await;
    }
}
