//! HTML extraction for the three catalog page roles: the category index,
//! paginated category listings, and per-book detail pages.
//!
//! Catalog pages vary, so every field extraction tolerates a missing
//! element by substituting a documented fallback value instead of failing.
//! That is part of the extraction contract, not incidental behavior.

use crate::catalog::{Book, Category};
use scraper::{ElementRef, Html, Selector};
use std::collections::HashMap;
use url::Url;

/// Fallback values for missing detail-page elements.
const UNKNOWN_TITLE: &str = "Unknown Title";
const UNKNOWN_PRICE: &str = "Unknown Price";
const UNKNOWN_AVAILABILITY: &str = "Unknown Availability";
const UNKNOWN_CATEGORY: &str = "Unknown Category";

/// CSS selectors used for parsing.
struct Selectors {
    /// Anchors in the index sidebar's category list.
    category_link: Selector,
    /// Book link inside a listing-page product block.
    product_link: Selector,
    /// Optional next-page link on a listing page.
    next_page: Selector,
    /// Detail-page title heading.
    title: Selector,
    /// Rows of the product information table.
    info_row: Selector,
    info_header: Selector,
    info_value: Selector,
    /// Display price element.
    price: Selector,
    /// Availability text element.
    availability: Selector,
    /// Paragraph sibling of the description anchor.
    description: Selector,
    /// Breadcrumb entries; the third one names the category.
    breadcrumb: Selector,
    /// Star-rating element; the rating is in its class list.
    star_rating: Selector,
    /// Primary product image.
    image: Selector,
}

impl Selectors {
    fn new() -> Self {
        Self {
            category_link: Selector::parse(".side_categories > ul > li > ul li a").unwrap(),
            product_link: Selector::parse("article.product_pod h3 a").unwrap(),
            next_page: Selector::parse("li.next a").unwrap(),
            title: Selector::parse("h1").unwrap(),
            info_row: Selector::parse("table.table-striped tr").unwrap(),
            info_header: Selector::parse("th").unwrap(),
            info_value: Selector::parse("td").unwrap(),
            price: Selector::parse("p.price_color").unwrap(),
            availability: Selector::parse("p.availability").unwrap(),
            description: Selector::parse("#product_description + p").unwrap(),
            breadcrumb: Selector::parse("ul.breadcrumb li").unwrap(),
            star_rating: Selector::parse("p.star-rating").unwrap(),
            image: Selector::parse("div.item.active img").unwrap(),
        }
    }
}

/// One parsed listing page: resolved detail links plus the raw next href.
///
/// The next href is left unresolved; the paginator owns resolution against
/// the listing page it came from.
#[derive(Debug)]
pub struct Listing {
    pub detail_urls: Vec<Url>,
    pub next_href: Option<String>,
}

/// Extracts structured data from catalog pages.
pub struct Extractor {
    selectors: Selectors,
}

impl Default for Extractor {
    fn default() -> Self {
        Self::new()
    }
}

impl Extractor {
    pub fn new() -> Self {
        Self {
            selectors: Selectors::new(),
        }
    }

    /// Extracts the category list from the index page sidebar.
    ///
    /// Relative hrefs resolve against the index page's URL. Anchors whose
    /// href does not resolve are skipped.
    pub fn categories(&self, doc: &Html, index_url: &Url) -> Vec<Category> {
        doc.select(&self.selectors.category_link)
            .filter_map(|anchor| {
                let href = anchor.value().attr("href")?;
                let url = index_url.join(href).ok()?;
                Some(Category::new(text_of(anchor), url))
            })
            .collect()
    }

    /// Extracts detail-page links and the optional next-page href from a
    /// listing page. Detail hrefs resolve against the listing page's URL.
    pub fn listing(&self, doc: &Html, page_url: &Url) -> Listing {
        let detail_urls = doc
            .select(&self.selectors.product_link)
            .filter_map(|anchor| anchor.value().attr("href"))
            .filter_map(|href| page_url.join(href).ok())
            .collect();

        let next_href = doc
            .select(&self.selectors.next_page)
            .next()
            .and_then(|anchor| anchor.value().attr("href"))
            .map(str::to_string);

        Listing {
            detail_urls,
            next_href,
        }
    }

    /// Builds a [`Book`] from a detail page.
    ///
    /// Every missing element falls back to its documented default. The
    /// owning category and the stored image filename are attached later by
    /// the pipeline; both start empty here.
    pub fn book(&self, doc: &Html, page_url: &Url) -> Book {
        let s = &self.selectors;

        let title = doc
            .select(&s.title)
            .next()
            .map(text_of)
            .unwrap_or_else(|| UNKNOWN_TITLE.to_string());

        let mut info = self.product_info(doc);

        let price = doc
            .select(&s.price)
            .next()
            .map(text_of)
            .unwrap_or_else(|| UNKNOWN_PRICE.to_string());

        let availability = doc
            .select(&s.availability)
            .next()
            .map(text_of)
            .unwrap_or_else(|| UNKNOWN_AVAILABILITY.to_string());

        let description = doc
            .select(&s.description)
            .next()
            .map(text_of)
            .unwrap_or_default();

        let category = doc
            .select(&s.breadcrumb)
            .nth(2)
            .map(text_of)
            .unwrap_or_else(|| UNKNOWN_CATEGORY.to_string());

        let rating = doc
            .select(&s.star_rating)
            .next()
            .map(rating_of)
            .unwrap_or(0);

        let image_url = doc
            .select(&s.image)
            .next()
            .and_then(|img| img.value().attr("src"))
            .and_then(|src| page_url.join(src).ok())
            .map(|url| url.to_string())
            .unwrap_or_default();

        Book {
            title,
            price,
            price_excl_tax: info.remove("Price (excl. tax)").unwrap_or_default(),
            price_incl_tax: info.remove("Price (incl. tax)").unwrap_or_default(),
            availability,
            description,
            category,
            rating,
            upc: info.remove("UPC").unwrap_or_default(),
            product_type: info.remove("Product Type").unwrap_or_default(),
            tax: info.remove("Tax").unwrap_or_default(),
            number_of_reviews: info
                .remove("Number of reviews")
                .unwrap_or_else(|| "0".to_string()),
            image_url,
            image_filename: None,
            product_url: page_url.to_string(),
            category_name: String::new(),
            category_slug: String::new(),
        }
    }

    /// Reads the product information table as a header-to-value map.
    ///
    /// Keyed by header text rather than row position, so row reordering
    /// does not change the result.
    fn product_info(&self, doc: &Html) -> HashMap<String, String> {
        let mut info = HashMap::new();

        for row in doc.select(&self.selectors.info_row) {
            let header = row.select(&self.selectors.info_header).next().map(text_of);
            let value = row.select(&self.selectors.info_value).next().map(text_of);
            if let (Some(header), Some(value)) = (header, value) {
                info.insert(header, value);
            }
        }

        info
    }
}

/// Collects and trims an element's text content.
fn text_of(elem: ElementRef) -> String {
    elem.text().collect::<String>().trim().to_string()
}

/// Reads the star rating from the rating element's class list.
fn rating_of(elem: ElementRef) -> u8 {
    elem.value()
        .classes()
        .find(|class| *class != "star-rating")
        .map(rating_from_word)
        .unwrap_or(0)
}

/// Maps a word-valued rating class to an integer.
fn rating_from_word(word: &str) -> u8 {
    match word {
        "One" => 1,
        "Two" => 2,
        "Three" => 3,
        "Four" => 4,
        "Five" => 5,
        // "Zero" and anything unrecognized
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INDEX_PAGE: &str = r#"
        <html><body>
        <div class="side_categories">
          <ul class="nav nav-list">
            <li>
              <a href="catalogue/category/books_1/index.html">Books</a>
              <ul>
                <li><a href="catalogue/category/books/travel_2/index.html">
                  Travel
                </a></li>
                <li><a href="catalogue/category/books/mystery_3/index.html">
                  Mystery
                </a></li>
              </ul>
            </li>
          </ul>
        </div>
        </body></html>"#;

    const DETAIL_PAGE: &str = r#"
        <html><body>
        <ul class="breadcrumb">
          <li><a href="/">Home</a></li>
          <li><a href="/books">Books</a></li>
          <li><a href="/travel">Travel</a></li>
          <li class="active">Book X</li>
        </ul>
        <div class="item active"><img src="../../media/cache/book-x.jpg"/></div>
        <h1>Book X</h1>
        <p class="price_color">£51.77</p>
        <p class="star-rating Four"></p>
        <p class="instock availability">In stock (22 available)</p>
        <div id="product_description" class="sub-header"><h2>Product Description</h2></div>
        <p>An adventurous tale.</p>
        <table class="table table-striped">
          <tr><th>UPC</th><td>abc123</td></tr>
          <tr><th>Product Type</th><td>Books</td></tr>
          <tr><th>Price (excl. tax)</th><td>£51.77</td></tr>
          <tr><th>Price (incl. tax)</th><td>£51.77</td></tr>
          <tr><th>Tax</th><td>£0.00</td></tr>
          <tr><th>Number of reviews</th><td>3</td></tr>
        </table>
        </body></html>"#;

    fn extractor() -> Extractor {
        Extractor::new()
    }

    #[test]
    fn test_extract_categories() {
        let doc = Html::parse_document(INDEX_PAGE);
        let index_url = Url::parse("https://example.com/index.html").unwrap();

        let categories = extractor().categories(&doc, &index_url);

        assert_eq!(categories.len(), 2);
        assert_eq!(categories[0].name, "Travel");
        assert_eq!(categories[0].slug, "travel");
        assert_eq!(
            categories[0].url,
            "https://example.com/catalogue/category/books/travel_2/index.html"
        );
        assert_eq!(categories[1].slug, "mystery");
    }

    #[test]
    fn test_listing_with_next_link() {
        let page = r#"
            <article class="product_pod">
              <h3><a href="../../../book-1_1/index.html">Book 1</a></h3>
            </article>
            <article class="product_pod">
              <h3><a href="../../../book-2_2/index.html">Book 2</a></h3>
            </article>
            <li class="next"><a href="page-2.html">next</a></li>"#;
        let doc = Html::parse_document(page);
        let page_url =
            Url::parse("https://example.com/catalogue/category/books/travel_2/index.html").unwrap();

        let listing = extractor().listing(&doc, &page_url);

        assert_eq!(listing.detail_urls.len(), 2);
        assert_eq!(
            listing.detail_urls[0].as_str(),
            "https://example.com/catalogue/book-1_1/index.html"
        );
        assert_eq!(listing.next_href.as_deref(), Some("page-2.html"));
    }

    #[test]
    fn test_listing_without_next_link() {
        let page = r#"
            <article class="product_pod">
              <h3><a href="book-1_1/index.html">Book 1</a></h3>
            </article>"#;
        let doc = Html::parse_document(page);
        let page_url = Url::parse("https://example.com/catalogue/index.html").unwrap();

        let listing = extractor().listing(&doc, &page_url);

        assert_eq!(listing.detail_urls.len(), 1);
        assert!(listing.next_href.is_none());
    }

    #[test]
    fn test_extract_book_details() {
        let doc = Html::parse_document(DETAIL_PAGE);
        let page_url = Url::parse("https://example.com/catalogue/book-x_123/index.html").unwrap();

        let book = extractor().book(&doc, &page_url);

        assert_eq!(book.title, "Book X");
        assert_eq!(book.price, "£51.77");
        assert_eq!(book.upc, "abc123");
        assert_eq!(book.rating, 4);
        assert_eq!(book.product_type, "Books");
        assert_eq!(book.price_excl_tax, "£51.77");
        assert_eq!(book.price_incl_tax, "£51.77");
        assert_eq!(book.tax, "£0.00");
        assert_eq!(book.number_of_reviews, "3");
        assert_eq!(book.availability, "In stock (22 available)");
        assert_eq!(book.description, "An adventurous tale.");
        assert_eq!(book.category, "Travel");
        assert_eq!(book.image_url, "https://example.com/media/cache/book-x.jpg");
        assert!(book.image_filename.is_none());
        assert_eq!(
            book.product_url,
            "https://example.com/catalogue/book-x_123/index.html"
        );
    }

    #[test]
    fn test_missing_elements_fall_back() {
        let doc = Html::parse_document("<html><body></body></html>");
        let page_url = Url::parse("https://example.com/catalogue/empty/index.html").unwrap();

        let book = extractor().book(&doc, &page_url);

        assert_eq!(book.title, "Unknown Title");
        assert_eq!(book.price, "Unknown Price");
        assert_eq!(book.availability, "Unknown Availability");
        assert_eq!(book.category, "Unknown Category");
        assert_eq!(book.description, "");
        assert_eq!(book.upc, "");
        assert_eq!(book.number_of_reviews, "0");
        assert_eq!(book.rating, 0);
        assert_eq!(book.image_url, "");
    }

    #[test]
    fn test_rating_word_mapping() {
        assert_eq!(rating_from_word("One"), 1);
        assert_eq!(rating_from_word("Three"), 3);
        assert_eq!(rating_from_word("Five"), 5);
        assert_eq!(rating_from_word("Zero"), 0);
        assert_eq!(rating_from_word("Eleven"), 0);
    }

    #[test]
    fn test_rating_class_unrecognized_defaults_to_zero() {
        let doc =
            Html::parse_document(r#"<p class="star-rating Eleven"></p><h1>t</h1>"#);
        let page_url = Url::parse("https://example.com/x").unwrap();

        let book = extractor().book(&doc, &page_url);
        assert_eq!(book.rating, 0);
    }

    #[test]
    fn test_info_table_tolerates_row_reordering() {
        let page = r#"
            <h1>t</h1>
            <table class="table-striped">
              <tr><th>Number of reviews</th><td>7</td></tr>
              <tr><th>UPC</th><td>xyz789</td></tr>
            </table>"#;
        let doc = Html::parse_document(page);
        let page_url = Url::parse("https://example.com/x").unwrap();

        let book = extractor().book(&doc, &page_url);
        assert_eq!(book.upc, "xyz789");
        assert_eq!(book.number_of_reviews, "7");
    }
}
