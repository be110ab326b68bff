//! GSMArena scraper main entry point
//!
//! This is the command-line interface for the device listing scraper.

use clap::Parser;
use gsmarena_scraper::config::{load_or_default, validate, Config};
use gsmarena_scraper::crawler::run_crawl;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// GSMArena scraper: brand, model and model codes for every listed device
///
/// Fetches the device listing page, visits each device page in turn, prints
/// a readable summary and dumps all devices to a JSON file.
#[derive(Parser, Debug)]
#[command(name = "gsmarena-scraper")]
#[command(version)]
#[command(about = "Scrapes device model codes from GSMArena", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (defaults are used when omitted)
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Write the JSON dump here instead of the configured path
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Only visit the first N device pages
    #[arg(short, long, value_name = "N")]
    limit: Option<usize>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Show the effective configuration and listing URL without crawling
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = match load_effective_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e);
        }
    };

    if cli.dry_run {
        return handle_dry_run(&config);
    }

    tracing::info!("Starting GSMArena scraper...");
    match run_crawl(config).await {
        Ok(_) => Ok(()),
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            Err(e.into())
        }
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("gsmarena_scraper=info,warn"),
            1 => EnvFilter::new("gsmarena_scraper=debug,info"),
            2 => EnvFilter::new("gsmarena_scraper=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Loads the config file (or defaults) and applies CLI overrides
fn load_effective_config(cli: &Cli) -> Result<Config, Box<dyn std::error::Error>> {
    if let Some(path) = &cli.config {
        tracing::info!("Loading configuration from: {}", path.display());
    }
    let mut config = load_or_default(cli.config.as_deref())?;

    if let Some(output) = &cli.output {
        config.output.json_path = output.display().to_string();
    }
    if let Some(limit) = cli.limit {
        config.crawler.max_devices = Some(limit);
    }

    validate(&config)?;
    Ok(config)
}

/// Handles the --dry-run mode: shows what would be crawled
fn handle_dry_run(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    println!("=== GSMArena Scraper Dry Run ===\n");

    println!("Listing page:");
    println!("  {}", config.listing_url()?);

    println!("\nSite:");
    println!("  Base URL: {}", config.site.base_url);
    println!("  Inferred code prefix: {}", config.site.model_code_prefix);

    println!("\nClient:");
    println!("  User agent: {}", config.client.user_agent);
    println!("  Timeout: {}s", config.client.timeout_secs);
    println!("  Max redirects: {}", config.client.max_redirects);
    println!(
        "  TLS verification: {}",
        if config.client.accept_invalid_certs {
            "disabled"
        } else {
            "enabled"
        }
    );

    println!("\nCrawler:");
    println!("  Request delay: {}ms", config.crawler.request_delay_ms);
    println!("  Run ceiling: {}s", config.crawler.max_run_secs);
    match config.crawler.max_devices {
        Some(limit) => println!("  Device limit: {}", limit),
        None => println!("  Device limit: none"),
    }

    println!("\nOutput:");
    println!("  JSON dump: {}", config.output.json_path);

    println!("\n✓ Configuration is valid");

    Ok(())
}
