//! Output module for presenting crawl results
//!
//! This module handles:
//! - Printing a readable per-device listing
//! - Dumping the records as JSON
//! - Summarizing the run

mod json;
mod listing;
pub mod stats;

pub use json::{to_json_string, write_json};
pub use listing::{format_device, format_device_listing, print_device_listing};
pub use stats::{format_statistics, CrawlStatistics};

use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to serialize devices: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;
