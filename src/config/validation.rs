use crate::config::types::{Config, CrawlConfig, CrawlerConfig};
use crate::url::{is_root_url, parse_root_url};
use crate::ConfigError;
use std::time::Duration;
use tokio::sync::Semaphore;
use url::Url;

/// Validates the entire configuration and freezes it into a [`CrawlConfig`]
pub fn validate(config: &Config) -> Result<CrawlConfig, ConfigError> {
    let crawler = &config.crawler;

    let root_url = validate_root_url(crawler.root_url.as_deref())?;
    let socket_limit = validate_socket_limit(crawler.socket_limit)?;
    validate_user_agent(&crawler.user_agent)?;
    let request_timeout = validate_request_timeout(crawler)?;

    Ok(CrawlConfig {
        root_url,
        socket_limit,
        ignore_robots: config.robots.ignore,
        strict_robots: config.robots.strict,
        user_agent: crawler.user_agent.clone(),
        request_timeout,
        failed_urls: crawler.failed_urls,
    })
}

/// Validates the root URL: must parse, be http(s), and point at the domain root
fn validate_root_url(root_url: Option<&str>) -> Result<Url, ConfigError> {
    let raw = match root_url {
        Some(raw) if !raw.trim().is_empty() => raw.trim(),
        _ => {
            return Err(ConfigError::Validation(
                "a root url must be provided".to_string(),
            ))
        }
    };

    let url = parse_root_url(raw)
        .map_err(|e| ConfigError::InvalidUrl(format!("'{}': {}", raw, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "'{}' must use the http or https scheme",
            raw
        )));
    }

    if url.host_str().map_or(true, str::is_empty) {
        return Err(ConfigError::InvalidUrl(format!("'{}' has no host", raw)));
    }

    if !is_root_url(&url) {
        return Err(ConfigError::NotRootUrl(raw.to_string()));
    }

    Ok(url)
}

fn validate_socket_limit(socket_limit: i64) -> Result<usize, ConfigError> {
    if socket_limit <= 0 {
        return Err(ConfigError::Validation(format!(
            "socket limit must be greater than 0, got {}",
            socket_limit
        )));
    }

    match usize::try_from(socket_limit) {
        Ok(limit) if limit <= Semaphore::MAX_PERMITS => Ok(limit),
        _ => Err(ConfigError::Validation(format!(
            "socket limit {} is too large, the maximum is {}",
            socket_limit,
            Semaphore::MAX_PERMITS
        ))),
    }
}

/// The user agent ends up in an HTTP header, so it must be printable ASCII
fn validate_user_agent(user_agent: &str) -> Result<(), ConfigError> {
    if user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user agent cannot be empty".to_string(),
        ));
    }

    if !user_agent.chars().all(|c| c.is_ascii() && !c.is_ascii_control()) {
        return Err(ConfigError::Validation(format!(
            "user agent must be printable ASCII, got '{}'",
            user_agent
        )));
    }

    Ok(())
}

fn validate_request_timeout(config: &CrawlerConfig) -> Result<Duration, ConfigError> {
    if config.request_timeout == 0 {
        return Err(ConfigError::Validation(
            "request timeout must be at least 1 second".to_string(),
        ));
    }

    Ok(Duration::from_secs(config.request_timeout))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FailedUrlPolicy;

    fn config_for(root: &str) -> Config {
        let mut config = Config::default();
        config.crawler.root_url = Some(root.to_string());
        config
    }

    #[test]
    fn test_validate_defaults() {
        let crawl = validate(&config_for("https://example.com")).unwrap();
        assert_eq!(crawl.root_url.as_str(), "https://example.com/");
        assert_eq!(crawl.socket_limit, 15);
        assert_eq!(crawl.user_agent, "SpideredBot");
        assert_eq!(crawl.request_timeout, Duration::from_secs(30));
        assert_eq!(crawl.failed_urls, FailedUrlPolicy::Release);
        assert!(!crawl.ignore_robots);
        assert!(!crawl.strict_robots);
    }

    #[test]
    fn test_bare_domain_is_accepted() {
        let crawl = validate(&config_for("tomblomfield.com")).unwrap();
        assert_eq!(crawl.root_url.as_str(), "http://tomblomfield.com/");
    }

    #[test]
    fn test_missing_root_url() {
        let result = validate(&Config::default());
        assert!(matches!(result.unwrap_err(), ConfigError::Validation(_)));
    }

    #[test]
    fn test_root_url_with_path_rejected() {
        let result = validate(&config_for("https://example.com/blog"));
        assert!(matches!(result.unwrap_err(), ConfigError::NotRootUrl(_)));
    }

    #[test]
    fn test_non_http_scheme_rejected() {
        let result = validate(&config_for("ftp://example.com/"));
        assert!(matches!(result.unwrap_err(), ConfigError::InvalidUrl(_)));
    }

    #[test]
    fn test_non_positive_socket_limit() {
        for limit in [0, -1, -15] {
            let mut config = config_for("https://example.com/");
            config.crawler.socket_limit = limit;
            let result = validate(&config);
            assert!(
                matches!(result, Err(ConfigError::Validation(_))),
                "limit {} should be rejected",
                limit
            );
        }
    }

    #[test]
    fn test_socket_limit_above_semaphore_capacity() {
        let mut config = config_for("https://example.com/");
        config.crawler.socket_limit = i64::MAX;
        assert!(matches!(validate(&config), Err(ConfigError::Validation(_))));

        let largest = i64::try_from(Semaphore::MAX_PERMITS).unwrap();
        config.crawler.socket_limit = largest;
        assert_eq!(validate(&config).unwrap().socket_limit, Semaphore::MAX_PERMITS);

        config.crawler.socket_limit = largest + 1;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_user_agent_validation() {
        assert!(validate_user_agent("Googlebot").is_ok());
        assert!(validate_user_agent("SpideredBot/1.0 (+https://example.com)").is_ok());

        assert!(validate_user_agent("").is_err());
        assert!(validate_user_agent("   ").is_err());
        assert!(validate_user_agent("bad\nagent").is_err());
        assert!(validate_user_agent("bötli").is_err());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let mut config = config_for("https://example.com/");
        config.crawler.request_timeout = 0;
        assert!(validate(&config).is_err());
    }
}
