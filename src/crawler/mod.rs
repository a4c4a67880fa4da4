//! Crawler module for web page fetching and processing
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching behind the [`Fetcher`] trait
//! - HTML link extraction
//! - Socket limiting and task accounting
//! - Overall crawl coordination

mod coordinator;
mod fetcher;
mod parser;
mod scheduler;

pub use coordinator::{crawl, Coordinator, CrawlReport, CrawlStats};
pub use fetcher::{build_http_client, FetchError, FetchResponse, Fetcher, HttpFetcher};
pub use parser::{extract_links, Links};
pub use scheduler::{SocketLimiter, SocketPermit, TaskGroup, TaskGuard};
