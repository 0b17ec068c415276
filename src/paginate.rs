//! Listing-page traversal for a single category.
//!
//! Page N+1's URL is only knowable after parsing page N, so the walk is
//! strictly sequential. A visited-URL set guards against next links that
//! point backwards; without it a malformed page could loop forever.

use crate::error::FetchError;
use crate::extract::Extractor;
use crate::fetcher::Fetch;
use scraper::Html;
use std::collections::HashSet;
use url::Url;

/// Outcome of walking one category's listing pages.
#[derive(Debug)]
pub struct PageWalk {
    /// Detail-page URLs in first-seen order, without duplicates.
    pub detail_urls: Vec<Url>,

    /// Listing pages fetched.
    pub pages_visited: usize,

    /// True when a next link pointed at an already-visited listing page.
    pub cycle_detected: bool,
}

/// Walks a category's listing pages until no next link remains.
///
/// The next href resolves against the current page URL, which places it in
/// the listing page's directory. A fetch failure on any page aborts the
/// walk; the caller decides what that means for the category.
pub async fn collect_detail_urls(
    fetcher: &dyn Fetch,
    extractor: &Extractor,
    start: &Url,
) -> Result<PageWalk, FetchError> {
    let mut detail_urls: Vec<Url> = Vec::new();
    let mut seen_details: HashSet<String> = HashSet::new();
    let mut visited: HashSet<String> = HashSet::new();
    let mut current = start.clone();
    let mut pages_visited = 0;
    let mut cycle_detected = false;

    loop {
        visited.insert(current.to_string());
        let body = fetcher.fetch_html(&current).await?;
        pages_visited += 1;

        let listing = {
            let doc = Html::parse_document(&body);
            extractor.listing(&doc, &current)
        };

        for url in listing.detail_urls {
            if seen_details.insert(url.to_string()) {
                detail_urls.push(url);
            }
        }

        let next = listing
            .next_href
            .as_deref()
            .and_then(|href| current.join(href).ok());

        match next {
            Some(next) if visited.contains(next.as_str()) => {
                cycle_detected = true;
                break;
            }
            Some(next) => current = next,
            None => break,
        }
    }

    Ok(PageWalk {
        detail_urls,
        pages_visited,
        cycle_detected,
    })
}
