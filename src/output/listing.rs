//! Human-readable device listing

use crate::crawler::CrawlReport;
use crate::extract::DeviceRecord;
use crate::output::stats::{format_statistics, CrawlStatistics};

const NOT_FOUND: &str = "Not found";

fn or_not_found(value: &str) -> &str {
    if value.is_empty() {
        NOT_FOUND
    } else {
        value
    }
}

/// Formats one device block
pub fn format_device(index: usize, device: &DeviceRecord) -> String {
    let mut out = String::new();

    out.push_str(&format!("Device {}:\n", index + 1));
    out.push_str(&format!("  Brand: {}\n", device.brand));
    out.push_str(&format!("  Model: {}\n", device.model_name));
    out.push_str(&format!(
        "  MISC Model: {}\n",
        or_not_found(&device.misc_model_code)
    ));
    out.push_str(&format!(
        "  Serial Code: {}\n",
        or_not_found(&device.model_code)
    ));
    out.push_str(&format!("  URL: {}\n", device.source_url));
    out.push_str("  ---\n\n");

    out
}

/// Formats the whole run: every device, the failed pages and the statistics
pub fn format_device_listing(report: &CrawlReport) -> String {
    let mut out = String::new();

    out.push_str("Results:\n");
    out.push_str("========\n\n");

    for (index, device) in report.records.iter().enumerate() {
        out.push_str(&format_device(index, device));
    }

    if !report.failed.is_empty() {
        out.push_str(&format!("Failed pages ({}):\n", report.failed.len()));
        for page in &report.failed {
            out.push_str(&format!("  - {} ({})\n", page.url, page.reason));
        }
        out.push('\n');
    }

    if report.unvisited > 0 {
        out.push_str(&format!(
            "Run ceiling reached: {} device pages not visited\n\n",
            report.unvisited
        ));
    }

    out.push_str(&format_statistics(&CrawlStatistics::from_report(report)));

    out
}

/// Prints the device listing to stdout
pub fn print_device_listing(report: &CrawlReport) {
    println!("\n{}", format_device_listing(report));
}
