//! Run configuration: the `ScrapeConfig` struct, its typestate builder,
//! and read accessors.

mod builder;
mod getters;
mod types;

pub use builder::{DEFAULT_USER_AGENT, ScrapeConfigBuilder, WithStartUrl};
pub use types::ScrapeConfig;
