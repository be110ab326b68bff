//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler:
//! - Building the HTTP client with the mobile browser identity
//! - GET requests to fetch page content
//! - Classifying failures for diagnostics
//!
//! There is no retry. A failed fetch is final for that URL within the run.

use crate::config::ClientConfig;
use reqwest::{redirect::Policy, Client, StatusCode};
use std::fmt;
use std::time::Duration;

/// Result of a fetch operation
#[derive(Debug)]
pub enum FetchResult {
    /// The server answered 200 OK
    Success {
        /// Final URL after redirects
        final_url: String,
        /// Page body content
        body: String,
    },

    /// The server answered with any status other than 200
    HttpError {
        /// The HTTP status code
        status_code: u16,
    },

    /// Network error (connection refused, timeout, unreadable body, etc.)
    NetworkError {
        /// Error description
        error: String,
    },
}

impl fmt::Display for FetchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchResult::Success { final_url, body } => {
                write!(f, "200 OK from {} ({} bytes)", final_url, body.len())
            }
            FetchResult::HttpError { status_code } => write!(f, "HTTP {}", status_code),
            FetchResult::NetworkError { error } => write!(f, "{}", error),
        }
    }
}

/// Builds an HTTP client with proper configuration
///
/// The client presents the configured mobile user agent for the whole run,
/// follows redirects up to `max_redirects`, and bounds every request by
/// `timeout_secs`. With `accept_invalid_certs` the mobile subdomain's
/// certificate is not verified.
///
/// # Example
///
/// ```no_run
/// use gsmarena_scraper::config::ClientConfig;
/// use gsmarena_scraper::crawler::build_http_client;
///
/// let client = build_http_client(&ClientConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &ClientConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(Duration::from_secs(config.timeout_secs))
        .redirect(Policy::limited(config.max_redirects))
        .danger_accept_invalid_certs(config.accept_invalid_certs)
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a URL with a single GET request
///
/// # Outcome Mapping
///
/// | Condition | Result |
/// |-----------|--------|
/// | HTTP 200 | Success |
/// | Any other status (after redirects) | HttpError |
/// | Timeout, connection or TLS failure | NetworkError |
/// | Body could not be read | NetworkError |
/// | Too many redirects | NetworkError |
pub async fn fetch_url(client: &Client, url: &str) -> FetchResult {
    let response = match client.get(url).send().await {
        Ok(response) => response,
        Err(e) => return classify_error(&e),
    };

    let status = response.status();
    if status != StatusCode::OK {
        return FetchResult::HttpError {
            status_code: status.as_u16(),
        };
    }

    let final_url = response.url().to_string();
    match response.text().await {
        Ok(body) => FetchResult::Success { final_url, body },
        Err(e) => classify_error(&e),
    }
}

fn classify_error(e: &reqwest::Error) -> FetchResult {
    let error = if e.is_timeout() {
        "Request timeout".to_string()
    } else if e.is_connect() {
        format!("Connection failed: {}", e)
    } else if e.is_redirect() {
        "Too many redirects".to_string()
    } else {
        e.to_string()
    };

    FetchResult::NetworkError { error }
}
