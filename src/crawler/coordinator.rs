//! Crawler coordinator - main crawl orchestration logic
//!
//! The crawl is strictly sequential: the listing page is fetched, device links
//! are extracted, and every detail page is fetched and extracted in discovery
//! order with a fixed politeness interval between requests.
//!
//! The run ceiling is a deadline, not an abort: once it passes, no further
//! detail page is requested and the records gathered so far are returned.

use crate::config::Config;
use crate::crawler::parser::extract_device_links;
use crate::crawler::{build_http_client, fetch_url, FetchResult};
use crate::extract::{extract_device, DeviceRecord};
use crate::ScraperError;
use chrono::{DateTime, Utc};
use reqwest::Client;
use std::time::Duration;
use tokio::time::Instant;

/// A detail page that could not be fetched
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedPage {
    pub url: String,
    pub reason: String,
}

/// Everything a crawl run produced
#[derive(Debug, Clone)]
pub struct CrawlReport {
    /// The listing page the run started from
    pub listing_url: String,

    /// Number of detail pages found on the listing page (before any limit)
    pub discovered: usize,

    /// Extracted devices, in discovery order
    pub records: Vec<DeviceRecord>,

    /// Detail pages skipped because their fetch failed
    pub failed: Vec<FailedPage>,

    /// Detail pages never requested because the run ceiling was reached
    pub unvisited: usize,

    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

/// Main crawler coordinator structure
pub struct Coordinator {
    config: Config,
    client: Client,
    listing_url: String,
}

impl Coordinator {
    /// Creates a new coordinator instance
    ///
    /// # Arguments
    ///
    /// * `config` - A validated configuration
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Ready to run
    /// * `Err(ScraperError)` - The HTTP client or listing URL could not be built
    pub fn new(config: Config) -> Result<Self, ScraperError> {
        let client = build_http_client(&config.client)?;
        let listing_url = config
            .listing_url()
            .map_err(|e| crate::ConfigError::InvalidUrl(format!("Invalid listing url: {}", e)))?;

        Ok(Self {
            config,
            client,
            listing_url,
        })
    }

    /// The listing page this coordinator will start from
    pub fn listing_url(&self) -> &str {
        &self.listing_url
    }

    /// Runs the crawl
    ///
    /// 1. Fetches the listing page; failure or the run ceiling aborts the run
    /// 2. Extracts detail-page links
    /// 3. Fetches and extracts each detail page in order, skipping failures,
    ///    until the links run out or the run ceiling passes
    pub async fn run(&self) -> Result<CrawlReport, ScraperError> {
        let started_at = Utc::now();
        let ceiling = self.config.crawler.max_run_secs;
        let deadline = Instant::now() + Duration::from_secs(ceiling);

        tracing::info!("Fetching results page: {}", self.listing_url);
        let listing = tokio::time::timeout_at(deadline, fetch_url(&self.client, &self.listing_url))
            .await
            .map_err(|_| ScraperError::RunTimeout { secs: ceiling })?;
        let listing_html = match listing {
            FetchResult::Success { body, .. } => body,
            failure => {
                return Err(ScraperError::ListingUnavailable {
                    url: self.listing_url.clone(),
                    reason: failure.to_string(),
                });
            }
        };

        tracing::info!("Extracting device URLs...");
        let mut device_urls = extract_device_links(&listing_html, &self.config.site.base_url);
        let discovered = device_urls.len();
        tracing::info!("Found {} devices", discovered);

        if let Some(limit) = self.config.crawler.max_devices {
            if limit < device_urls.len() {
                tracing::info!("Limiting crawl to the first {} devices", limit);
                device_urls.truncate(limit);
            }
        }

        let (records, failed) = self.crawl_devices(&device_urls, deadline).await;
        let unvisited = device_urls.len() - records.len() - failed.len();
        if unvisited > 0 {
            tracing::warn!(
                "Run ceiling of {}s reached; {} device pages not visited",
                ceiling,
                unvisited
            );
        }

        let report = CrawlReport {
            listing_url: self.listing_url.clone(),
            discovered,
            records,
            failed,
            unvisited,
            started_at,
            finished_at: Utc::now(),
        };

        tracing::info!(
            "Crawl completed: {} devices extracted, {} failed in {}s",
            report.records.len(),
            report.failed.len(),
            (report.finished_at - report.started_at).num_seconds()
        );

        Ok(report)
    }

    /// Visits `urls` in order; no request is started once `deadline` has passed
    async fn crawl_devices(
        &self,
        urls: &[String],
        deadline: Instant,
    ) -> (Vec<DeviceRecord>, Vec<FailedPage>) {
        let mut records = Vec::with_capacity(urls.len());
        let mut failed = Vec::new();
        let delay = Duration::from_millis(self.config.crawler.request_delay_ms);

        for (index, url) in urls.iter().enumerate() {
            if index > 0 && !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            if Instant::now() >= deadline {
                break;
            }

            tracing::info!("Fetching device {}/{}: {}", index + 1, urls.len(), url);

            match fetch_url(&self.client, url).await {
                FetchResult::Success { body, .. } => {
                    let record =
                        extract_device(&body, url, &self.config.site.model_code_prefix);
                    match record.code_source {
                        Some(source) => {
                            tracing::info!("  - Model code {} ({})", record.model_code, source)
                        }
                        None => tracing::info!("  - No model code found"),
                    }
                    records.push(record);
                }
                failure => {
                    tracing::warn!("  - Error fetching device page {}: {}", url, failure);
                    failed.push(FailedPage {
                        url: url.clone(),
                        reason: failure.to_string(),
                    });
                }
            }
        }

        (records, failed)
    }
}
