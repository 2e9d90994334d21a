//! Extraction Service Module
//!
//! The prompt-in/text-out boundary to the text-understanding service:
//! prompt templates, the HTTP client, and the retry combinator that wraps
//! every call.

pub mod backoff;
pub mod client;
pub mod prompt;

pub use backoff::{RetryPolicy, retry_with_backoff};
pub use client::{
    DEFAULT_ENDPOINT, DEFAULT_MODEL, ExtractionClient, ExtractionError, ExtractionSettings,
};
pub use prompt::{SYSTEM_PROMPT, build_prompt, build_reduced_prompt, strip_code_fences};
