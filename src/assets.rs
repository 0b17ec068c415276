//! Cover image storage.
//!
//! Image downloads are best effort. A book without a stored image is still
//! a valid book; the caller treats a `None` filename as "no image".

use crate::fetcher::Fetch;
use std::io;
use std::path::{Path, PathBuf};
use url::Url;

/// Stores downloaded cover images under a single directory.
pub struct AssetStore {
    dir: PathBuf,
}

impl AssetStore {
    /// Creates the store, making sure the directory exists.
    pub fn new(dir: impl AsRef<Path>) -> io::Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    /// The directory images are written to.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Downloads an image and writes it under the store directory.
    ///
    /// Returns the filename on success and `None` on any fetch or write
    /// failure.
    pub async fn download(
        &self,
        fetcher: &dyn Fetch,
        image_url: &Url,
        filename: &str,
    ) -> Option<String> {
        let bytes = fetcher.fetch_bytes(image_url).await.ok()?;
        tokio::fs::write(self.dir.join(filename), bytes).await.ok()?;
        Some(filename.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetcher::testing::StubFetcher;

    #[tokio::test]
    async fn test_download_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = AssetStore::new(dir.path().join("images")).unwrap();
        let fetcher = StubFetcher::new()
            .with_asset("https://example.com/media/book-x.jpg", b"\xff\xd8fake-jpeg");
        let url = Url::parse("https://example.com/media/book-x.jpg").unwrap();

        let saved = store.download(&fetcher, &url, "Book_X.jpg").await;

        assert_eq!(saved.as_deref(), Some("Book_X.jpg"));
        let written = std::fs::read(store.dir().join("Book_X.jpg")).unwrap();
        assert_eq!(written, b"\xff\xd8fake-jpeg");
    }

    #[tokio::test]
    async fn test_failed_download_returns_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = AssetStore::new(dir.path()).unwrap();
        let fetcher = StubFetcher::new();
        let url = Url::parse("https://example.com/media/missing.jpg").unwrap();

        let saved = store.download(&fetcher, &url, "missing.jpg").await;

        assert!(saved.is_none());
        assert!(!store.dir().join("missing.jpg").exists());
    }
}
