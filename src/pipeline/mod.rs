//! Product Extraction Pipeline Module
//!
//! The sequential, rate-limited loop that turns product-page URLs into
//! persisted JSON records, with per-URL failure isolation.

pub mod processor;
pub mod saver;
pub mod throttle;

pub use processor::{PipelineSummary, process_product_urls, select_product_urls};
pub use saver::{product_slug, record_path, save_failure_artifact, save_product_record};
pub use throttle::BatchThrottle;
