use serde::Deserialize;

/// Mobile Safari identity sent with every request
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (iPhone; CPU iPhone OS 14_7_1 like Mac OS X) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/14.1.2 Mobile/15E148 Safari/604.1";

/// Main configuration structure
///
/// Every section is optional; a missing file or an empty one yields the
/// default run against the mobile site.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub site: SiteConfig,
    #[serde(default)]
    pub listing: ListingConfig,
    #[serde(default)]
    pub client: ClientConfig,
    #[serde(default)]
    pub crawler: CrawlerConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    /// Returns the listing page URL to start the crawl from
    ///
    /// An explicit `[listing] url` wins; otherwise the URL is built from the
    /// base URL and the listing filters.
    pub fn listing_url(&self) -> Result<String, ::url::ParseError> {
        if let Some(url) = &self.listing.url {
            return Ok(url.clone());
        }

        let mut url = ::url::Url::parse(&self.site.base_url)?.join("results.php3")?;
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("nYearMin", &self.listing.year_min.to_string());
            if self.listing.esim {
                query.append_pair("chkESIM", "selected");
            }
            query.append_pair("sAvailabilities", &self.listing.availability.to_string());
        }
        Ok(url.to_string())
    }
}

/// Target site configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Base URL prefixed to every discovered detail-page href
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Literal prepended to the numeric page id when a model code has to be
    /// inferred from the URL
    #[serde(rename = "model-code-prefix")]
    pub model_code_prefix: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: "https://m.gsmarena.com/".to_string(),
            model_code_prefix: "GSM-".to_string(),
        }
    }
}

/// Listing page filters
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ListingConfig {
    /// Minimum announcement year
    #[serde(rename = "year-min")]
    pub year_min: u16,

    /// Only devices with eSIM support
    pub esim: bool,

    /// Availability status filter (1 = available)
    pub availability: u8,

    /// Full listing URL, overriding the filters above
    pub url: Option<String>,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            year_min: 2025,
            esim: true,
            availability: 1,
            url: None,
        }
    }
}

/// HTTP client configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// User agent string, fixed for the whole run
    #[serde(rename = "user-agent")]
    pub user_agent: String,

    /// Per-request timeout in seconds
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: u64,

    /// Skip TLS certificate verification
    #[serde(rename = "accept-invalid-certs")]
    pub accept_invalid_certs: bool,

    /// Maximum number of redirects to follow
    #[serde(rename = "max-redirects")]
    pub max_redirects: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: 30,
            accept_invalid_certs: true,
            max_redirects: 10,
        }
    }
}

/// Crawl loop configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Wait between consecutive detail-page requests (milliseconds)
    #[serde(rename = "request-delay-ms")]
    pub request_delay_ms: u64,

    /// Run ceiling in seconds; no device page is requested after it passes
    #[serde(rename = "max-run-secs")]
    pub max_run_secs: u64,

    /// Only visit the first N detail pages
    #[serde(rename = "max-devices")]
    pub max_devices: Option<usize>,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            request_delay_ms: 2000,
            max_run_secs: 300,
            max_devices: None,
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Path of the JSON device dump
    #[serde(rename = "json-path")]
    pub json_path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            json_path: "device.json".to_string(),
        }
    }
}
