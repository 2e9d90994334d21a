//! Durable discovery log for crawled URLs.
//!
//! URLs are appended one per line the moment they are claimed, and each
//! write is flushed so the log survives a crash mid-crawl. After the crawl,
//! `finalize` rewrites the same file as the normalized, deduplicated,
//! lexicographically sorted sitemap.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tokio::fs::{File, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

use super::normalizer::normalize_and_sort;

/// Append-only sitemap log shared by all crawl tasks of one run.
pub struct SitemapLog {
    path: PathBuf,
    file: Mutex<File>,
}

impl SitemapLog {
    /// Create (or truncate) the log file at `path`.
    pub async fn create(path: &Path) -> Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(path)
            .await
            .with_context(|| format!("Failed to create sitemap log at {}", path.display()))?;

        Ok(Self {
            path: path.to_path_buf(),
            file: Mutex::new(file),
        })
    }

    /// Append one URL and flush immediately.
    pub async fn append(&self, url: &str) -> Result<()> {
        let mut file = self.file.lock().await;
        file.write_all(url.as_bytes())
            .await
            .context("Failed to append to sitemap log")?;
        file.write_all(b"\n")
            .await
            .context("Failed to append to sitemap log")?;
        file.flush().await.context("Failed to flush sitemap log")?;
        Ok(())
    }

    /// Replace the raw discovery log with its normalized, sorted,
    /// deduplicated form and return that form.
    pub async fn finalize(&self) -> Result<Vec<String>> {
        // Hold the lock so no late append interleaves with the rewrite.
        let mut file = self.file.lock().await;
        file.flush().await.context("Failed to flush sitemap log")?;

        let raw = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("Failed to read sitemap log {}", self.path.display()))?;

        let sorted = normalize_and_sort(raw.lines());

        let mut contents = sorted.join("\n");
        if !contents.is_empty() {
            contents.push('\n');
        }
        tokio::fs::write(&self.path, contents)
            .await
            .with_context(|| format!("Failed to rewrite sitemap {}", self.path.display()))?;

        Ok(sorted)
    }

    /// Path of the underlying file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}
