//! Export artifacts consumed by the web server and site generator.
//!
//! All exports live under one data directory: `categories.json`, one
//! `category_<slug>.csv` per category, and the aggregate `all_books.json`
//! and `all_books.csv`.

use crate::catalog::{Book, Category};
use crate::error::ExportError;
use std::fs;
use std::path::{Path, PathBuf};

/// Writes category and book exports under one data directory.
pub struct Exporter {
    dir: PathBuf,
}

impl Exporter {
    /// Creates the exporter, making sure the data directory exists.
    pub fn new(dir: impl AsRef<Path>) -> Result<Self, ExportError> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    /// Path of the aggregate JSON export.
    pub fn all_books_path(&self) -> PathBuf {
        self.dir.join("all_books.json")
    }

    /// Writes the category collection as `categories.json`.
    pub fn save_categories(&self, categories: &[Category]) -> Result<PathBuf, ExportError> {
        let path = self.dir.join("categories.json");
        fs::write(&path, serde_json::to_string_pretty(categories)?)?;
        Ok(path)
    }

    /// Writes one category's books as `category_<slug>.csv`.
    pub fn save_category_books(&self, slug: &str, books: &[Book]) -> Result<PathBuf, ExportError> {
        let path = self.dir.join(format!("category_{slug}.csv"));
        write_csv(&path, books)?;
        Ok(path)
    }

    /// Writes the aggregate book set as `all_books.json` and `all_books.csv`.
    pub fn save_all_books(&self, books: &[Book]) -> Result<(), ExportError> {
        fs::write(self.all_books_path(), serde_json::to_string_pretty(books)?)?;
        write_csv(&self.dir.join("all_books.csv"), books)?;
        Ok(())
    }
}

fn write_csv(path: &Path, books: &[Book]) -> Result<(), ExportError> {
    let mut writer = csv::Writer::from_path(path)?;
    for book in books {
        writer.serialize(book)?;
    }
    writer.flush()?;
    Ok(())
}
