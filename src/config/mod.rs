//! Configuration module
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every key is optional; the defaults describe a run against the mobile site.
//!
//! # Example
//!
//! ```no_run
//! use gsmarena_scraper::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("scraper.toml")).unwrap();
//! println!("Politeness interval: {}ms", config.crawler.request_delay_ms);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    ClientConfig, Config, CrawlerConfig, ListingConfig, OutputConfig, SiteConfig,
    DEFAULT_USER_AGENT,
};

// Re-export parser functions
pub use parser::{load_config, load_or_default, parse_config};
pub use validation::validate;
