//! Markdown summary generation
//!
//! This module generates a human-readable markdown summary of a finished crawl.

use crate::output::summary::{CrawlSummary, OutputResult};
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Generates a markdown summary from crawl statistics
///
/// # Arguments
///
/// * `summary` - The crawl summary data
/// * `output_path` - Path where the markdown file should be written
///
/// # Returns
///
/// * `Ok(())` - Successfully wrote markdown summary
/// * `Err(OutputError)` - Failed to write summary
pub fn generate_markdown_summary(summary: &CrawlSummary, output_path: &Path) -> OutputResult<()> {
    let markdown = format_markdown_summary(summary);

    let mut file = File::create(output_path)?;
    file.write_all(markdown.as_bytes())?;

    Ok(())
}

/// Formats a crawl summary as markdown
pub fn format_markdown_summary(summary: &CrawlSummary) -> String {
    let mut md = String::new();

    md.push_str("# Spidered Crawl Summary\n\n");

    // Run metadata
    md.push_str("## Run Information\n\n");
    md.push_str(&format!("- **Root URL**: {}\n", summary.root_url));
    md.push_str(&format!("- **User Agent**: {}\n", summary.user_agent));
    md.push_str(&format!("- **Socket Limit**: {}\n", summary.socket_limit));
    md.push_str(&format!("- **Started**: {}\n", summary.started_at));
    md.push_str(&format!("- **Finished**: {}\n", summary.finished_at));
    md.push_str(&format!(
        "- **Duration**: {:.2} seconds\n",
        summary.duration_seconds
    ));
    if let Some(hash) = &summary.config_hash {
        md.push_str(&format!("- **Config Hash**: {}\n", hash));
    }
    md.push('\n');

    // Overall statistics
    md.push_str("## Overall Statistics\n\n");
    md.push_str(&format!("- **Pages Recorded**: {}\n", summary.pages_recorded));
    md.push_str(&format!("- **Fetch Failures**: {}\n", summary.fetch_failures));
    md.push_str(&format!("- **URLs Dispatched**: {}\n", summary.urls_dispatched));
    md.push_str(&format!("- **Total Bytes**: {}\n", summary.total_bytes));
    md.push_str(&format!(
        "- **Peak Concurrent Fetches**: {}\n",
        summary.peak_concurrent
    ));
    md.push_str(&format!(
        "- **Success Rate**: {:.2}%\n\n",
        summary.success_rate()
    ));

    // Skipped links
    md.push_str("## Skipped Links\n\n");
    md.push_str("| Reason | Count |\n");
    md.push_str("|--------|-------|\n");
    md.push_str(&format!("| Out of scope | {} |\n", summary.out_of_scope));
    md.push_str(&format!("| Denied by robots.txt | {} |\n", summary.robots_denied));
    md.push_str(&format!("| Already dispatched | {} |\n\n", summary.duplicates));

    if !summary.status_breakdown.is_empty() {
        md.push_str("## Response Status Breakdown\n\n");
        md.push_str("| Status | Pages |\n");
        md.push_str("|--------|-------|\n");
        for (status, count) in &summary.status_breakdown {
            md.push_str(&format!("| {} | {} |\n", status, count));
        }
        md.push('\n');
    }

    if !summary.content_types.is_empty() {
        md.push_str("## Content Types\n\n");
        md.push_str("| Content-Type | Pages |\n");
        md.push_str("|--------------|-------|\n");
        for (content_type, count) in &summary.content_types {
            md.push_str(&format!("| {} | {} |\n", content_type, count));
        }
        md.push('\n');
    }

    if !summary.largest_pages.is_empty() {
        md.push_str(&format!(
            "## Top {} Largest Pages\n\n",
            summary.largest_pages.len()
        ));
        md.push_str("| URL | Bytes |\n");
        md.push_str("|-----|-------|\n");
        for (url, size) in &summary.largest_pages {
            md.push_str(&format!("| {} | {} |\n", url, size));
        }
        md.push('\n');
    }

    md
}
