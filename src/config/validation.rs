use crate::config::types::{ClientConfig, Config, CrawlerConfig, OutputConfig, SiteConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_site_config(&config.site)?;
    validate_listing_url(config)?;
    validate_client_config(&config.client)?;
    validate_crawler_config(&config.crawler)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates the base URL
fn validate_site_config(config: &SiteConfig) -> Result<(), ConfigError> {
    let url = Url::parse(&config.base_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid base-url: {}", e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::Validation(format!(
            "base-url '{}' must use HTTP or HTTPS",
            config.base_url
        )));
    }

    // Hrefs are appended verbatim
    if !config.base_url.ends_with('/') {
        return Err(ConfigError::Validation(format!(
            "base-url '{}' must end with '/'",
            config.base_url
        )));
    }

    Ok(())
}

/// Validates the listing URL, whether explicit or built from the filters
fn validate_listing_url(config: &Config) -> Result<(), ConfigError> {
    let listing = config
        .listing_url()
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid listing url: {}", e)))?;

    Url::parse(&listing).map_err(|e| {
        ConfigError::InvalidUrl(format!("Invalid listing url '{}': {}", listing, e))
    })?;

    Ok(())
}

/// Validates HTTP client configuration
fn validate_client_config(config: &ClientConfig) -> Result<(), ConfigError> {
    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user-agent cannot be empty".to_string(),
        ));
    }

    if config.timeout_secs == 0 {
        return Err(ConfigError::Validation(
            "timeout-secs must be >= 1".to_string(),
        ));
    }

    Ok(())
}

/// Validates crawl loop configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.max_run_secs == 0 {
        return Err(ConfigError::Validation(
            "max-run-secs must be >= 1".to_string(),
        ));
    }

    if config.max_devices == Some(0) {
        return Err(ConfigError::Validation(
            "max-devices must be >= 1 when set".to_string(),
        ));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.json_path.is_empty() {
        return Err(ConfigError::Validation(
            "json-path cannot be empty".to_string(),
        ));
    }

    Ok(())
}
