//! Crawl summary types
//!
//! A [`CrawlSummary`] is the flattened view of a finished crawl that the
//! markdown writer renders.

use crate::config::CrawlConfig;
use crate::crawler::CrawlReport;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Summary statistics for a crawl
#[derive(Debug, Clone, Default)]
pub struct CrawlSummary {
    // Run metadata
    pub root_url: String,
    pub user_agent: String,
    pub socket_limit: usize,
    pub started_at: String,
    pub finished_at: String,
    pub duration_seconds: f64,
    pub config_hash: Option<String>,

    // Overall statistics
    pub pages_recorded: usize,
    pub fetch_failures: usize,
    pub urls_dispatched: usize,
    pub out_of_scope: usize,
    pub robots_denied: usize,
    pub duplicates: usize,
    pub peak_concurrent: usize,
    pub total_bytes: u64,

    // Status code -> page count
    pub status_breakdown: BTreeMap<u16, usize>,

    // Content type (without parameters) -> page count
    pub content_types: BTreeMap<String, usize>,

    // Largest pages as (url, bytes), biggest first
    pub largest_pages: Vec<(String, usize)>,
}

impl CrawlSummary {
    /// Creates a new empty crawl summary
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a summary from a finished crawl
    ///
    /// # Arguments
    ///
    /// * `report` - The crawl outcome
    /// * `config` - The configuration the crawl ran with
    /// * `config_hash` - Hash of the config file, if one was used
    pub fn from_report(report: &CrawlReport, config: &CrawlConfig, config_hash: Option<&str>) -> Self {
        let finished: DateTime<Utc> = Utc::now();
        let started = chrono::Duration::from_std(report.elapsed)
            .map(|elapsed| finished - elapsed)
            .unwrap_or(finished);

        let mut status_breakdown = BTreeMap::new();
        let mut content_types = BTreeMap::new();
        let mut total_bytes = 0u64;
        let mut largest_pages = Vec::with_capacity(report.pages.len());

        for record in report.pages.values() {
            *status_breakdown.entry(record.status).or_insert(0) += 1;

            let media_type = record
                .content_type
                .split(';')
                .next()
                .unwrap_or("")
                .trim()
                .to_ascii_lowercase();
            let media_type = if media_type.is_empty() {
                "(none)".to_string()
            } else {
                media_type
            };
            *content_types.entry(media_type).or_insert(0) += 1;

            total_bytes += record.size as u64;
            largest_pages.push((record.url.to_string(), record.size));
        }

        largest_pages.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        largest_pages.truncate(10);

        let stats = report.stats;
        Self {
            root_url: config.root_url.to_string(),
            user_agent: config.user_agent.clone(),
            socket_limit: config.socket_limit,
            started_at: started.to_rfc3339(),
            finished_at: finished.to_rfc3339(),
            duration_seconds: report.elapsed.as_secs_f64(),
            config_hash: config_hash.map(str::to_string),
            pages_recorded: stats.pages_recorded,
            fetch_failures: stats.fetch_failures,
            urls_dispatched: stats.dispatched,
            out_of_scope: stats.out_of_scope,
            robots_denied: stats.robots_denied,
            duplicates: stats.duplicates,
            peak_concurrent: stats.peak_concurrent,
            total_bytes,
            status_breakdown,
            content_types,
            largest_pages,
        }
    }

    /// Returns the number of fetches that reached a terminal state
    pub fn total_fetches(&self) -> usize {
        self.pages_recorded + self.fetch_failures
    }

    /// Returns the success rate as a percentage
    pub fn success_rate(&self) -> f64 {
        let total = self.total_fetches();
        if total == 0 {
            return 0.0;
        }
        (self.pages_recorded as f64 / total as f64) * 100.0
    }
}
