//! Configuration module for Spidered
//!
//! Settings come from an optional TOML file, are overridden by command-line
//! flags, and are finally validated into an immutable [`CrawlConfig`].
//!
//! # Example
//!
//! ```
//! use spidered::config::Config;
//!
//! let mut config = Config::default();
//! config.crawler.root_url = Some("https://example.com".to_string());
//! let crawl = config.validate().unwrap();
//! assert_eq!(crawl.root_url.as_str(), "https://example.com/");
//! ```

mod parser;
mod types;
mod validation;

pub use types::{
    Config, CrawlConfig, CrawlerConfig, FailedUrlPolicy, RobotsConfig, DEFAULT_REQUEST_TIMEOUT,
    DEFAULT_SOCKET_LIMIT, DEFAULT_USER_AGENT,
};

pub use parser::{compute_config_hash, load_config, load_config_with_hash, load_crawl_config};

use crate::ConfigError;

impl Config {
    /// Validates this configuration into a [`CrawlConfig`]
    pub fn validate(&self) -> Result<CrawlConfig, ConfigError> {
        validation::validate(self)
    }
}

impl CrawlConfig {
    /// Builds a validated configuration for `root_url` with every other
    /// setting at its default
    pub fn new(root_url: &str, socket_limit: usize) -> Result<Self, ConfigError> {
        let mut config = Config::default();
        config.crawler.root_url = Some(root_url.to_string());
        config.crawler.socket_limit = i64::try_from(socket_limit).unwrap_or(i64::MAX);
        config.validate()
    }
}
