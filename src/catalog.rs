//! Catalog data model: categories, book records, and name sanitization.
//!
//! Slugs and image filenames are both derived from human-readable names,
//! so the sanitization rules live here next to the types that use them.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Matches every character that is unsafe in a filename or slug.
static UNSAFE_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_-]").expect("Invalid UNSAFE_CHARS regex"));

/// Replaces filesystem-unsafe characters with underscores.
///
/// Keeps alphanumerics, hyphens, and underscores; everything else becomes
/// an underscore. The result is safe as a filename and as a URL segment.
pub fn sanitize_name(name: &str) -> String {
    UNSAFE_CHARS.replace_all(name, "_").into_owned()
}

/// Derives a lowercase, URL- and filesystem-safe slug from a name.
pub fn slugify(name: &str) -> String {
    sanitize_name(&name.to_lowercase())
}

/// A catalog category discovered from the index sidebar.
///
/// Immutable after discovery; uniquely identified by its slug.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    /// Human-readable category name.
    pub name: String,

    /// Absolute URL of the category's first listing page.
    pub url: String,

    /// Identifier derived from the name, used in export filenames.
    pub slug: String,
}

impl Category {
    /// Creates a category, deriving the slug from the name.
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        let name = name.into();
        let slug = slugify(&name);
        Self {
            name,
            url: url.into(),
            slug,
        }
    }
}

/// A single book record built from one detail-page visit.
///
/// Uniquely identified by `upc`. `category_name` and `category_slug` come
/// from the owning [`Category`], not from the detail page itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Book {
    /// Book title, or "Unknown Title" when the page has no heading.
    pub title: String,

    /// Display price as shown on the page, e.g. "£51.77".
    pub price: String,

    pub price_excl_tax: String,

    pub price_incl_tax: String,

    /// Availability text as shown on the page.
    pub availability: String,

    pub description: String,

    /// Category shown in the detail page's breadcrumb.
    pub category: String,

    /// Star rating, 0 through 5.
    pub rating: u8,

    /// The catalog's stable per-book identifier; primary key of the book set.
    pub upc: String,

    pub product_type: String,

    pub tax: String,

    pub number_of_reviews: String,

    /// Absolute URL of the cover image, empty when the page has none.
    pub image_url: String,

    /// Filename of the stored cover image; `None` when nothing was saved.
    pub image_filename: Option<String>,

    /// Absolute URL of the detail page.
    pub product_url: String,

    /// Name of the owning category.
    pub category_name: String,

    /// Slug of the owning category; foreign key into the category set.
    pub category_slug: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_name() {
        assert_eq!(sanitize_name("Book X"), "Book_X");
        assert_eq!(sanitize_name("Crime & Thriller"), "Crime___Thriller");
        assert_eq!(sanitize_name("already-safe_name"), "already-safe_name");
        assert_eq!(sanitize_name("Tipping the Velvet"), "Tipping_the_Velvet");
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Travel"), "travel");
        assert_eq!(slugify("Science Fiction"), "science_fiction");
        assert_eq!(slugify("Add a comment"), "add_a_comment");
    }

    #[test]
    fn test_slug_charset() {
        for name in ["Crime & Thriller", "Poetry!", "Señor's Picks", "A/B — C"] {
            let slug = slugify(name);
            assert!(
                slug.chars()
                    .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_'),
                "bad slug {:?} for {:?}",
                slug,
                name
            );
        }
    }

    #[test]
    fn test_category_new_derives_slug() {
        let category = Category::new("Historical Fiction", "https://example.com/cat/index.html");
        assert_eq!(category.name, "Historical Fiction");
        assert_eq!(category.slug, "historical_fiction");
        assert_eq!(category.url, "https://example.com/cat/index.html");
    }
}
