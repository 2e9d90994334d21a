//! Product record and failure artifact persistence.
//!
//! One file per product URL, named by the sanitized last path segment.
//! Records are never updated in place: an existing file means the URL was
//! handled by an earlier run and is skipped entirely.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde_json::{Map, Value};
use url::Url;

/// Filename token for a product URL: its last non-empty path segment,
/// sanitized for the filesystem. `None` when the URL has no usable
/// segment (e.g. the site root).
#[must_use]
pub fn product_slug(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let segment = parsed
        .path_segments()?
        .filter(|segment| !segment.is_empty())
        .next_back()?;

    let slug = sanitize_filename::sanitize(segment);
    if slug.is_empty() { None } else { Some(slug) }
}

/// Path of the JSON record for `slug`.
#[must_use]
pub fn record_path(output_dir: &Path, slug: &str) -> PathBuf {
    output_dir.join(format!("{slug}.json"))
}

/// Whether a record already exists (idempotent-resume check).
pub async fn record_exists(path: &Path) -> bool {
    tokio::fs::try_exists(path).await.unwrap_or(false)
}

/// Persist a parsed product object, augmented with its source URL, as
/// pretty-printed JSON.
pub async fn save_product_record(
    path: &Path,
    mut record: Map<String, Value>,
    url: &str,
) -> Result<()> {
    record.insert("url".to_string(), Value::String(url.to_string()));

    let json = serde_json::to_string_pretty(&Value::Object(record))
        .context("Failed to serialize product record")?;

    tokio::fs::write(path, json)
        .await
        .with_context(|| format!("Failed to write product record {}", path.display()))?;

    Ok(())
}

/// Persist the raw, unparseable response text alongside the record slot,
/// tagged with the source URL. The `.txt` suffix on the record path keeps
/// the failed slot from blocking a future re-run.
pub async fn save_failure_artifact(record_path: &Path, url: &str, raw: &str) -> Result<()> {
    let mut artifact_path = record_path.as_os_str().to_owned();
    artifact_path.push(".txt");
    let artifact_path = PathBuf::from(artifact_path);

    let contents = format!("URL: {url}\n\n{raw}");
    tokio::fs::write(&artifact_path, contents)
        .await
        .with_context(|| format!("Failed to write failure artifact {}", artifact_path.display()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slug_takes_last_segment() {
        assert_eq!(
            product_slug("http://example.com/products/hiking-boot").as_deref(),
            Some("hiking-boot")
        );
        assert_eq!(
            product_slug("http://example.com/products/boot/").as_deref(),
            Some("boot")
        );
        assert_eq!(product_slug("http://example.com/"), None);
    }

    #[test]
    fn slug_is_filesystem_safe() {
        let slug = product_slug("http://example.com/products/bad:name*here").expect("slug");
        assert!(!slug.contains(':'));
        assert!(!slug.contains('*'));
    }
}
