//! GSMArena scraper: device listing crawler and model-code extractor
//!
//! This crate crawls a device listing page, visits every device detail page it
//! links to, and extracts brand, model name and manufacturer model codes from
//! each. Results are printed as a readable listing and dumped as JSON.

pub mod config;
pub mod crawler;
pub mod extract;
pub mod output;
pub mod url;

use thiserror::Error;

/// Main error type for scraper operations
#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("Could not fetch the listing page {url}: {reason}")]
    ListingUnavailable { url: String, reason: String },

    #[error("Listing page not fetched within the {secs}s execution ceiling")]
    RunTimeout { secs: u64 },

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for scraper operations
pub type Result<T> = std::result::Result<T, ScraperError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{run_crawl, CrawlReport, FailedPage};
pub use extract::{extract_device, CodeSource, DeviceRecord};
