//! Product extraction pipeline.
//!
//! Sequential by design: the extraction service's rate limit is global, so
//! URLs go through one at a time under the batch throttle. Every failure
//! mode is scoped to its URL; nothing here aborts the batch.

use std::path::Path;

use anyhow::Result;
use log::{info, warn};
use serde_json::Value;

use super::saver::{
    product_slug, record_exists, record_path, save_failure_artifact, save_product_record,
};
use super::throttle::BatchThrottle;
use crate::crawl_engine::PageFetcher;
use crate::extraction::{
    ExtractionClient, ExtractionError, build_prompt, build_reduced_prompt, strip_code_fences,
};
use crate::sanitizer::{reduce_html, sanitize_html};

/// Counters reported by a completed pipeline run.
#[derive(Debug, Clone, Copy, Default)]
pub struct PipelineSummary {
    /// Product records written
    pub saved: usize,
    /// URLs skipped because their record already existed
    pub skipped: usize,
    /// URLs abandoned on fetch, sanitize, or extraction failure
    pub failed: usize,
    /// Failure artifacts written for unparseable responses
    pub artifacts: usize,
}

/// Select the product-page subset of a normalized URL sequence and restore
/// the fetchable form by re-applying the seed origin's scheme (the sitemap
/// stores scheme-stripped URLs).
#[must_use]
pub fn select_product_urls(normalized: &[String], marker: &str, scheme: &str) -> Vec<String> {
    normalized
        .iter()
        .filter(|url| url.contains(marker))
        .map(|url| format!("{scheme}://{url}"))
        .collect()
}

/// Run the fetch → sanitize → extract → parse → persist loop over
/// `product_urls`, pausing per the throttle's batch cadence.
pub async fn process_product_urls(
    product_urls: &[String],
    output_dir: &Path,
    fetcher: &PageFetcher,
    client: &ExtractionClient,
    throttle: &mut BatchThrottle,
) -> Result<PipelineSummary> {
    let mut summary = PipelineSummary::default();

    for url in product_urls {
        throttle.tick().await;

        let Some(slug) = product_slug(url) else {
            warn!("No usable path segment in {url}; skipping");
            summary.failed += 1;
            continue;
        };
        let path = record_path(output_dir, &slug);

        if record_exists(&path).await {
            info!("File {} already exists. Skipping.", path.display());
            summary.skipped += 1;
            continue;
        }

        let html = match fetcher.fetch(url).await {
            Ok(html) => html,
            Err(e) => {
                warn!("Failed to retrieve {url}: {e}");
                summary.failed += 1;
                continue;
            }
        };

        let response = match extract_with_fallback(client, url, &html).await {
            Ok(text) => text,
            Err(e) => {
                warn!("Extraction failed for {url}: {e}");
                summary.failed += 1;
                continue;
            }
        };

        let stripped = strip_code_fences(&response);
        match serde_json::from_str::<Value>(stripped) {
            Ok(Value::Object(record)) => {
                save_product_record(&path, record, url).await?;
                info!("Saved cleaned content for {}", path.display());
                summary.saved += 1;
            }
            Ok(other) => {
                // Parseable but not a product object; keep the raw text
                // rather than inventing a record shape.
                warn!(
                    "Extraction for {url} returned non-object JSON ({})",
                    json_kind(&other)
                );
                save_failure_artifact(&path, url, &response).await?;
                summary.artifacts += 1;
            }
            Err(e) => {
                warn!("Error parsing JSON for {url}: {e}");
                save_failure_artifact(&path, url, &response).await?;
                info!("Saved raw text for {}.txt due to JSON parsing error", path.display());
                summary.artifacts += 1;
            }
        }
    }

    Ok(summary)
}

/// One extraction call, plus exactly one more with aggressively reduced
/// content when the service rejects the prompt as too large. Any other
/// failure propagates and aborts this URL only.
async fn extract_with_fallback(
    client: &ExtractionClient,
    url: &str,
    html: &str,
) -> Result<String> {
    let sanitized = sanitize_html(html)?;
    match client.extract(&build_prompt(&sanitized)).await {
        Ok(text) => Ok(text),
        Err(ExtractionError::ContextTooLarge) => {
            info!("Context length exceeded for {url}. Retrying with reduced content...");
            let reduced = reduce_html(html)?;
            Ok(client.extract(&build_reduced_prompt(&reduced)).await?)
        }
        Err(e) => Err(e.into()),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
