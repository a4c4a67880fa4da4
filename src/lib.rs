//! Spidered: a single-domain web crawler
//!
//! This crate discovers every reachable page on one host by following
//! hyperlinks, respecting robots.txt, bounding the number of concurrently open
//! sockets, and recording a [`state::PageRecord`] for every page it fetched.

pub mod config;
pub mod crawler;
pub mod output;
pub mod robots;
pub mod state;
pub mod storage;
pub mod url;

use thiserror::Error;

/// Main error type for crawl operations
///
/// Only errors that abort the whole crawl end up here. Per-page failures are
/// [`crawler::FetchError`]s and never leave the task that produced them.
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to load robots.txt from {url}: {reason}")]
    Robots { url: String, reason: String },

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Provided url is not a root url: {0}")]
    NotRootUrl(String),
}

/// Result type alias for crawl operations
pub type Result<T> = std::result::Result<T, CrawlError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::{Config, CrawlConfig, FailedUrlPolicy};
pub use crawler::{crawl, CrawlReport, CrawlStats};
pub use state::{PageRecord, TaskState};
pub use crate::url::{in_scope, normalize};
