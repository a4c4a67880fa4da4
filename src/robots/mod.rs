//! Robots.txt handling module
//!
//! The crawl loads robots.txt once, before the first page fetch, and consults
//! the resulting [`RobotsGate`] for every discovered link.
//!
//! # Unavailable robots.txt
//!
//! | Situation                        | permissive (default) | strict          |
//! |----------------------------------|----------------------|-----------------|
//! | `ignore` configured              | allow all            | allow all       |
//! | 2xx response                     | obey the file        | obey the file   |
//! | non-2xx response                 | allow all            | deny all links  |
//! | transport or body error          | allow all            | abort the crawl |

mod parser;

pub use parser::ParsedRobots;

use crate::config::CrawlConfig;
use crate::crawler::Fetcher;
use crate::CrawlError;
use url::Url;

/// Decides whether a discovered path may be fetched
#[derive(Debug, Clone)]
pub enum RobotsGate {
    /// The crawl was told to ignore robots.txt
    Ignored,

    /// No policy could be loaded for the domain
    Missing {
        /// Deny every path instead of allowing every path
        strict: bool,
    },

    /// A policy was loaded and is obeyed
    Loaded(ParsedRobots),
}

impl RobotsGate {
    /// Checks if a path is allowed for the given user agent
    ///
    /// # Examples
    ///
    /// ```
    /// use spidered::robots::{ParsedRobots, RobotsGate};
    ///
    /// let gate = RobotsGate::Loaded(ParsedRobots::from_content("User-agent: *\nDisallow: /private"));
    /// assert!(gate.allowed("/public", "SpideredBot"));
    /// assert!(!gate.allowed("/private", "SpideredBot"));
    /// ```
    pub fn allowed(&self, path: &str, user_agent: &str) -> bool {
        match self {
            Self::Ignored => true,
            Self::Missing { strict } => !strict,
            Self::Loaded(robots) => robots.is_allowed(path, user_agent),
        }
    }

    /// Returns the loaded policy, if any
    pub fn policy(&self) -> Option<&ParsedRobots> {
        match self {
            Self::Loaded(robots) => Some(robots),
            _ => None,
        }
    }
}

/// Returns the robots.txt location for a crawl root
pub fn robots_url(root: &Url) -> Option<Url> {
    root.join("/robots.txt").ok()
}

/// Loads the robots gate for a crawl
///
/// # Arguments
///
/// * `fetcher` - The fetcher used for page requests
/// * `config` - The crawl configuration
///
/// # Returns
///
/// * `Ok(RobotsGate)` - The gate to consult for discovered links
/// * `Err(CrawlError::Robots)` - robots.txt was unreachable in strict mode
pub async fn load_gate(fetcher: &dyn Fetcher, config: &CrawlConfig) -> Result<RobotsGate, CrawlError> {
    if config.ignore_robots {
        tracing::info!("Ignoring robots.txt as configured");
        return Ok(RobotsGate::Ignored);
    }

    let strict = config.strict_robots;
    let url = robots_url(&config.root_url).ok_or_else(|| CrawlError::Robots {
        url: config.root_url.to_string(),
        reason: "cannot build robots.txt url".to_string(),
    })?;

    tracing::debug!("Fetching robots.txt from {}", url);

    match fetcher.fetch(url.as_str(), &config.user_agent).await {
        Ok(response) if response.is_success() => {
            tracing::info!("Loaded robots.txt ({} bytes)", response.body.len());
            Ok(RobotsGate::Loaded(ParsedRobots::from_bytes(&response.body)))
        }
        Ok(response) => {
            tracing::warn!(
                "Unable to load robots for this domain. Response was {}",
                response.status
            );
            Ok(RobotsGate::Missing { strict })
        }
        Err(e) if strict => Err(CrawlError::Robots {
            url: url.to_string(),
            reason: e.to_string(),
        }),
        Err(e) => {
            tracing::warn!("Unable to load robots for this domain: {}", e);
            Ok(RobotsGate::Missing { strict })
        }
    }
}
