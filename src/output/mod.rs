//! Output module for crawl reports and summaries
//!
//! This module handles:
//! - Printing the per-page report to stdout
//! - Generating markdown summaries of crawl results
//! - Displaying crawl statistics

mod markdown;
pub mod stats;
mod summary;

pub use markdown::{format_markdown_summary, generate_markdown_summary};
pub use stats::{format_statistics, print_statistics};
pub use summary::{CrawlSummary, OutputError, OutputResult};

use crate::crawler::CrawlReport;
use crate::state::PageRecord;

/// Formats one page record as an indented block
///
/// Headers are listed in the order the server sent them.
pub fn format_record(record: &PageRecord) -> String {
    let mut out = String::new();
    out.push_str(&format!("URL: {}\n", record.url));
    out.push_str(&format!("   - Path: {}\n", record.path));
    out.push_str(&format!("   - Crawled At: {}\n", record.crawled_at));
    out.push_str(&format!("   - Content-Type: {}\n", record.content_type));
    out.push_str(&format!("   - Response Status: {}\n", record.status));
    out.push_str(&format!("   - Response Size (bytes): {}\n", record.size));
    out.push_str(&format!(
        "   - Response Checksum (CRC32-IEEE): {}\n",
        record.checksum
    ));
    out.push_str(&format!(
        "   - Response Headers: ({})\n",
        record.headers.len()
    ));
    for (name, value) in &record.headers {
        out.push_str(&format!("       - {}: {}\n", name, value));
    }
    out
}

/// Formats every page of a report, sorted by URL, each preceded by a blank line
pub fn format_report(report: &CrawlReport) -> String {
    let mut out = String::new();
    for record in report.sorted_pages() {
        out.push('\n');
        out.push_str(&format_record(record));
    }
    out
}

/// Prints the per-page report to stdout
pub fn print_report(report: &CrawlReport) {
    print!("{}", format_report(report));
}
