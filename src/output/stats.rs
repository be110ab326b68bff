//! Run statistics derived from a crawl report

use crate::crawler::CrawlReport;
use crate::extract::CodeSource;
use std::collections::HashMap;

/// Crawl statistics summary
#[derive(Debug, Clone, Default)]
pub struct CrawlStatistics {
    /// Detail pages found on the listing page
    pub discovered: usize,

    /// Detail pages fetched and extracted
    pub extracted: usize,

    /// Detail pages whose fetch failed
    pub failed: usize,

    /// Detail pages left unrequested when the run ceiling was reached
    pub unvisited: usize,

    /// Records whose model code came from each strategy
    pub codes_by_source: HashMap<CodeSource, usize>,

    /// Records with no model code at all
    pub without_code: usize,

    /// Wall-clock duration of the run
    pub duration_seconds: i64,
}

impl CrawlStatistics {
    /// Computes statistics for a finished run
    pub fn from_report(report: &CrawlReport) -> Self {
        let mut codes_by_source = HashMap::new();
        let mut without_code = 0;

        for record in &report.records {
            match record.code_source {
                Some(source) => *codes_by_source.entry(source).or_insert(0) += 1,
                None => without_code += 1,
            }
        }

        Self {
            discovered: report.discovered,
            extracted: report.records.len(),
            failed: report.failed.len(),
            unvisited: report.unvisited,
            codes_by_source,
            without_code,
            duration_seconds: (report.finished_at - report.started_at).num_seconds(),
        }
    }

    /// Percentage of requested detail pages that were extracted
    pub fn success_rate(&self) -> f64 {
        let attempted = self.extracted + self.failed;
        if attempted == 0 {
            0.0
        } else {
            (self.extracted as f64 / attempted as f64) * 100.0
        }
    }
}

/// Formats statistics as plain text
pub fn format_statistics(stats: &CrawlStatistics) -> String {
    let mut out = String::new();

    out.push_str("Statistics:\n");
    out.push_str("===========\n\n");
    out.push_str(&format!("  Devices discovered: {}\n", stats.discovered));
    out.push_str(&format!("  Devices extracted: {}\n", stats.extracted));
    out.push_str(&format!("  Fetch failures: {}\n", stats.failed));
    out.push_str(&format!("  Not visited: {}\n", stats.unvisited));
    out.push_str(&format!(
        "  Success rate: {:.1}%\n",
        stats.success_rate()
    ));
    out.push_str(&format!("  Duration: {}s\n\n", stats.duration_seconds));

    out.push_str("  Model codes by source:\n");
    for source in CodeSource::ALL {
        let count = stats.codes_by_source.get(&source).copied().unwrap_or(0);
        out.push_str(&format!("    {}: {}\n", source, count));
    }
    out.push_str(&format!("    not found: {}\n", stats.without_code));

    out
}
