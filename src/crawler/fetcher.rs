//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler:
//! - The [`Fetcher`] trait the crawl core talks to
//! - Building the reqwest client with timeouts
//! - Reading the full body and classifying failures

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;

/// A completed HTTP exchange
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResponse {
    /// HTTP status code
    pub status: u16,

    /// Response headers in the order they were received
    pub headers: Vec<(String, String)>,

    /// Raw body bytes
    pub body: Vec<u8>,
}

impl FetchResponse {
    /// Returns the first value of a header, matched case-insensitively
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Returns the Content-Type header, or an empty string
    pub fn content_type(&self) -> &str {
        self.header("content-type").unwrap_or("")
    }

    /// Returns true for 2xx responses
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Why a single fetch failed
///
/// A fetch error never aborts the crawl; it only ends the task for that URL.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("Connection failed for {url}: {message}")]
    Connect { url: String, message: String },

    #[error("HTTP error for {url}: {message}")]
    Transport { url: String, message: String },

    #[error("Failed to read body of {url}: {message}")]
    Body { url: String, message: String },
}

/// Retrieves one URL
///
/// Object safe so the crawl can hold an `Arc<dyn Fetcher>`.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Issues a single GET request and reads the whole body
    async fn fetch(&self, url: &str, user_agent: &str) -> Result<FetchResponse, FetchError>;
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `timeout` - Total time allowed for one request, body included
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client(timeout: Duration) -> Result<Client, reqwest::Error> {
    Client::builder()
        .timeout(timeout)
        .connect_timeout(timeout.min(Duration::from_secs(10)))
        .gzip(true)
        .brotli(true)
        .build()
}

/// [`Fetcher`] backed by a reqwest client
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Wraps an existing client
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Builds a fetcher whose requests time out after `timeout`
    pub fn with_timeout(timeout: Duration) -> Result<Self, reqwest::Error> {
        Ok(Self::new(build_http_client(timeout)?))
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str, user_agent: &str) -> Result<FetchResponse, FetchError> {
        let response = self
            .client
            .get(url)
            .header(reqwest::header::USER_AGENT, user_agent)
            .send()
            .await
            .map_err(|e| classify_error(url, e))?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect();

        let body = response.bytes().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::Timeout {
                    url: url.to_string(),
                }
            } else {
                FetchError::Body {
                    url: url.to_string(),
                    message: e.to_string(),
                }
            }
        })?;

        Ok(FetchResponse {
            status,
            headers,
            body: body.to_vec(),
        })
    }
}

/// Classifies a reqwest send error
fn classify_error(url: &str, e: reqwest::Error) -> FetchError {
    if e.is_timeout() {
        FetchError::Timeout {
            url: url.to_string(),
        }
    } else if e.is_connect() {
        FetchError::Connect {
            url: url.to_string(),
            message: e.to_string(),
        }
    } else {
        FetchError::Transport {
            url: url.to_string(),
            message: e.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response_with(headers: &[(&str, &str)], status: u16) -> FetchResponse {
        FetchResponse {
            status,
            headers: headers
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            body: Vec::new(),
        }
    }

    #[test]
    fn test_build_http_client() {
        let client = build_http_client(Duration::from_secs(30));
        assert!(client.is_ok());
    }

    #[test]
    fn test_header_lookup_is_case_insensitive() {
        let response = response_with(&[("Content-Type", "text/html; charset=utf-8")], 200);
        assert_eq!(response.header("content-type"), Some("text/html; charset=utf-8"));
        assert_eq!(response.content_type(), "text/html; charset=utf-8");
        assert_eq!(response.header("x-missing"), None);
    }

    #[test]
    fn test_missing_content_type_is_empty() {
        let response = response_with(&[], 200);
        assert_eq!(response.content_type(), "");
    }

    #[test]
    fn test_is_success() {
        assert!(response_with(&[], 200).is_success());
        assert!(response_with(&[], 204).is_success());
        assert!(!response_with(&[], 301).is_success());
        assert!(!response_with(&[], 404).is_success());
        assert!(!response_with(&[], 500).is_success());
    }

    #[tokio::test]
    async fn test_connection_refused_is_fetch_error() {
        let fetcher = HttpFetcher::with_timeout(Duration::from_secs(5)).unwrap();
        // Port 9 (discard) is essentially never open on test machines
        let result = fetcher.fetch("http://127.0.0.1:9/", "TestBot").await;
        assert!(matches!(
            result,
            Err(FetchError::Connect { .. })
                | Err(FetchError::Transport { .. })
                | Err(FetchError::Timeout { .. })
        ));
    }
}
