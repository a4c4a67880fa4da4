use crate::crawler::FetchResponse;
use chrono::{DateTime, Utc};
use std::time::Duration;
use url::Url;

/// What the crawl learned about one successfully fetched URL
///
/// Built by the task that fetched the page and never changed once it is in the
/// result table. Non-2xx responses still produce a record; only transport
/// failures do not.
#[derive(Debug, Clone, PartialEq)]
pub struct PageRecord {
    /// The absolute URL that was fetched
    pub url: Url,

    /// The URL's path component
    pub path: String,

    /// Content-Type header value, empty when the server sent none
    pub content_type: String,

    /// When the fetch completed
    pub crawled_at: DateTime<Utc>,

    /// HTTP status code
    pub status: u16,

    /// Body length in bytes
    pub size: usize,

    /// CRC-32 (IEEE) over the raw body bytes
    pub checksum: u32,

    /// Response headers in the order they were received
    pub headers: Vec<(String, String)>,

    /// Time from sending the request to having the whole body
    pub fetch_duration: Duration,
}

impl PageRecord {
    /// Builds a record from a completed fetch
    pub fn from_response(url: Url, response: &FetchResponse, fetch_duration: Duration) -> Self {
        Self {
            path: url.path().to_string(),
            content_type: response.content_type().to_string(),
            crawled_at: Utc::now(),
            status: response.status,
            size: response.body.len(),
            checksum: checksum(&response.body),
            headers: response.headers.clone(),
            fetch_duration,
            url,
        }
    }
}

/// CRC-32/IEEE of a response body
pub fn checksum(body: &[u8]) -> u32 {
    crc32fast::hash(body)
}
