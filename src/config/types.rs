use serde::Deserialize;
use std::time::Duration;
use url::Url;

/// Default number of concurrently open sockets
pub const DEFAULT_SOCKET_LIMIT: i64 = 15;

/// Default user agent sent with every request
pub const DEFAULT_USER_AGENT: &str = "SpideredBot";

/// Default per-request timeout (seconds)
pub const DEFAULT_REQUEST_TIMEOUT: u64 = 30;

/// Raw configuration as read from a TOML file and/or the command line
///
/// Every field has a default so that a config file may be partial and the CLI
/// can fill in the rest. Use [`Config::validate`] to turn it into a
/// [`CrawlConfig`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub crawler: CrawlerConfig,
    #[serde(default)]
    pub robots: RobotsConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// The domain root to crawl (e.g. "https://example.com/")
    #[serde(rename = "root-url")]
    pub root_url: Option<String>,

    /// Maximum number of concurrently open sockets
    #[serde(rename = "socket-limit")]
    pub socket_limit: i64,

    /// User agent sent with requests and matched against robots.txt
    #[serde(rename = "user-agent")]
    pub user_agent: String,

    /// Per-request timeout in seconds
    #[serde(rename = "request-timeout")]
    pub request_timeout: u64,

    /// What happens to a URL whose fetch failed
    #[serde(rename = "failed-urls")]
    pub failed_urls: FailedUrlPolicy,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            root_url: None,
            socket_limit: DEFAULT_SOCKET_LIMIT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            failed_urls: FailedUrlPolicy::default(),
        }
    }
}

/// Robots.txt handling configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RobotsConfig {
    /// Skip robots.txt entirely
    pub ignore: bool,

    /// Treat a missing robots.txt as "deny all" and an unreachable one as fatal
    pub strict: bool,
}

/// Policy for the dedup membership of a URL whose fetch failed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailedUrlPolicy {
    /// Forget the URL so a later discovery may schedule it again
    #[default]
    Release,
    /// Keep the URL marked as dispatched; it is never tried again
    Retain,
}

/// Validated, immutable crawl configuration
#[derive(Debug, Clone)]
pub struct CrawlConfig {
    /// The crawl root; its path is always "/"
    pub root_url: Url,

    /// Maximum number of simultaneously in-flight fetches (at least 1)
    pub socket_limit: usize,

    pub ignore_robots: bool,

    pub strict_robots: bool,

    pub user_agent: String,

    pub request_timeout: Duration,

    pub failed_urls: FailedUrlPolicy,
}
