//! Crawler module for web page fetching and processing
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching with the mobile browser identity
//! - Lenient HTML parsing and device link extraction
//! - Overall crawl coordination
//! - The complete run with output, stopped early by the execution ceiling

mod coordinator;
mod fetcher;
mod parser;

pub use coordinator::{Coordinator, CrawlReport, FailedPage};
pub use fetcher::{build_http_client, fetch_url, FetchResult};
pub use parser::{extract_device_links, parse_lenient};

use crate::config::Config;
use crate::output::{print_device_listing, write_json};
use crate::ScraperError;
use std::path::Path;

/// Runs a complete crawl operation
///
/// This is the main entry point for a run. It will:
/// 1. Build the HTTP client
/// 2. Fetch the listing page and extract device links
/// 3. Fetch and extract every device page
/// 4. Print the device listing to stdout
/// 5. Write the JSON dump
///
/// If the listing page cannot be fetched within `crawler.max_run_secs`,
/// nothing is printed or written. A ceiling reached while visiting device
/// pages only stops the loop; the devices gathered so far are still printed
/// and dumped.
///
/// # Example
///
/// ```no_run
/// use gsmarena_scraper::config::Config;
/// use gsmarena_scraper::crawler::run_crawl;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let report = run_crawl(Config::default()).await?;
/// println!("{} devices", report.records.len());
/// # Ok(())
/// # }
/// ```
pub async fn run_crawl(config: Config) -> Result<CrawlReport, ScraperError> {
    let json_path = config.output.json_path.clone();
    let coordinator = Coordinator::new(config)?;

    let report = coordinator.run().await?;

    print_device_listing(&report);

    write_json(&report.records, Path::new(&json_path))?;
    tracing::info!("Devices dumped to {}", json_path);

    Ok(report)
}
