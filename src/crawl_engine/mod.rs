//! Crawl Engine Module
//!
//! Same-origin link discovery: the bounded worker-pool orchestrator, the
//! HTTP fetcher it drives, the durable discovery log, and the post-crawl
//! URL normalization pass.

// Sub-modules
pub mod crawl_types;
pub mod fetcher;
pub mod link_extractor;
pub mod normalizer;
pub mod orchestrator;
pub mod sitemap_log;

// Re-exports for public API
pub use crawl_types::{CrawlOutcome, ScrapeError, ScrapeResult};
pub use fetcher::{FetchError, PageFetcher};
pub use link_extractor::{extract_links, is_same_origin};
pub use normalizer::{normalize_and_sort, normalize_url};
pub use orchestrator::crawl_site;
pub use sitemap_log::SitemapLog;
