pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::storage::LocalStorage;
pub use config::ScrapeConfig;
pub use crate::core::{engine::ScrapeEngine, pipeline::ScrapePipeline};
pub use utils::error::{Result, ScrapeError};
