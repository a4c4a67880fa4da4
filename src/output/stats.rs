//! Crawl statistics display
//!
//! This module renders the counters gathered during a crawl.

use crate::crawler::CrawlStats;
use std::time::Duration;

/// Formats crawl statistics as plain text
///
/// # Arguments
///
/// * `stats` - The counters to display
/// * `elapsed` - Wall-clock duration of the crawl
pub fn format_statistics(stats: &CrawlStats, elapsed: Duration) -> String {
    let mut out = String::new();
    out.push_str("=== Crawl Statistics ===\n\n");

    out.push_str("Overview:\n");
    out.push_str(&format!("  Pages recorded: {}\n", stats.pages_recorded));
    out.push_str(&format!("  Fetch failures: {}\n", stats.fetch_failures));
    out.push_str(&format!("  URLs dispatched: {}\n", stats.dispatched));
    out.push_str(&format!("  Peak concurrent fetches: {}\n", stats.peak_concurrent));
    out.push_str(&format!("  Elapsed: {:.2}s\n\n", elapsed.as_secs_f64()));

    out.push_str("Skipped Links:\n");
    out.push_str(&format!("  Out of scope: {}\n", stats.out_of_scope));
    out.push_str(&format!("  Denied by robots.txt: {}\n", stats.robots_denied));
    out.push_str(&format!("  Already dispatched: {}\n\n", stats.duplicates));

    let attempted = stats.pages_recorded + stats.fetch_failures;
    let success_rate = if attempted > 0 {
        (stats.pages_recorded as f64 / attempted as f64) * 100.0
    } else {
        0.0
    };
    out.push_str(&format!(
        "Success Rate: {:.1}% ({} / {} fetches completed)\n",
        success_rate, stats.pages_recorded, attempted
    ));

    out
}

/// Prints statistics to stdout in a formatted manner
pub fn print_statistics(stats: &CrawlStats, elapsed: Duration) {
    print!("{}", format_statistics(stats, elapsed));
}
