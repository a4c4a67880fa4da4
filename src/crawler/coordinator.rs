//! Crawler coordinator - main crawl orchestration logic
//!
//! Every dispatched URL becomes its own tokio task. A task waits for a socket
//! permit, fetches its page, gives the permit back, follows the page's links
//! (spawning a child task for each new in-scope URL) and finally stores its
//! page record. The crawl is over when the last task finishes.

use crate::config::{CrawlConfig, FailedUrlPolicy};
use crate::crawler::parser::extract_links;
use crate::crawler::scheduler::{SocketLimiter, TaskGroup};
use crate::crawler::{Fetcher, HttpFetcher};
use crate::robots::{load_gate, RobotsGate};
use crate::state::{PageRecord, TaskState};
use crate::storage::{DispatchedSet, ResultTable};
use crate::url::{in_scope, normalize};
use crate::CrawlError;
use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use url::Url;

/// Counters gathered over one crawl
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CrawlStats {
    /// Page records stored
    pub pages_recorded: usize,

    /// Fetches that ended in a transport error
    pub fetch_failures: usize,

    /// Links dropped because they were unparseable or on another host
    pub out_of_scope: usize,

    /// Links dropped by robots.txt
    pub robots_denied: usize,

    /// Links whose URL had already been dispatched
    pub duplicates: usize,

    /// Tasks spawned, the root included
    pub dispatched: usize,

    /// Most fetches ever in flight at the same time
    pub peak_concurrent: usize,
}

/// The read-only outcome of a finished crawl
#[derive(Debug, Clone)]
pub struct CrawlReport {
    /// Page record of every successfully fetched URL, keyed by URL
    pub pages: HashMap<String, PageRecord>,

    /// Wall-clock time of the whole crawl, robots.txt included
    pub elapsed: Duration,

    pub stats: CrawlStats,
}

impl CrawlReport {
    /// Returns the records ordered by URL
    pub fn sorted_pages(&self) -> Vec<&PageRecord> {
        let mut pages: Vec<&PageRecord> = self.pages.values().collect();
        pages.sort_by(|a, b| a.url.as_str().cmp(b.url.as_str()));
        pages
    }
}

#[derive(Debug, Default)]
struct Counters {
    fetch_failures: AtomicUsize,
    out_of_scope: AtomicUsize,
    robots_denied: AtomicUsize,
    duplicates: AtomicUsize,
    dispatched: AtomicUsize,
}

type TaskFuture = Pin<Box<dyn Future<Output = ()> + Send + 'static>>;

/// Everything the tasks of one crawl share
struct CrawlSession {
    config: CrawlConfig,
    fetcher: Arc<dyn Fetcher>,
    robots: RobotsGate,
    dispatched: DispatchedSet,
    limiter: SocketLimiter,
    results: ResultTable,
    group: Arc<TaskGroup>,
    counters: Counters,
}

impl CrawlSession {
    fn new(config: CrawlConfig, fetcher: Arc<dyn Fetcher>, robots: RobotsGate) -> Self {
        let limiter = SocketLimiter::new(config.socket_limit);
        Self {
            config,
            fetcher,
            robots,
            dispatched: DispatchedSet::new(),
            limiter,
            results: ResultTable::new(),
            group: Arc::new(TaskGroup::new()),
            counters: Counters::default(),
        }
    }

    /// Claims `url` and spawns its task, unless some task already has it
    fn dispatch(self: &Arc<Self>, url: Url) {
        if !self.dispatched.insert_if_absent(url.as_str()) {
            self.counters.duplicates.fetch_add(1, Ordering::Relaxed);
            tracing::trace!("Already dispatched: {}", url);
            return;
        }

        self.counters.dispatched.fetch_add(1, Ordering::Relaxed);
        tracing::trace!("{} -> {}", url, TaskState::Discovered);
        self.group.spawn(Arc::clone(self).visit(url));
    }

    /// The task for one URL
    ///
    /// Boxed because the task spawns further tasks of the same type.
    fn visit(self: Arc<Self>, url: Url) -> TaskFuture {
        Box::pin(async move {
            let state = self.process_url(&url).await;
            debug_assert!(state.is_terminal());
        })
    }

    async fn process_url(self: &Arc<Self>, url: &Url) -> TaskState {
        let state = TaskState::Discovered;

        let permit = match self.limiter.acquire().await {
            Ok(permit) => permit,
            Err(e) => {
                // The limiter is never closed while tasks exist
                tracing::error!("Socket limiter unavailable for {}: {}", url, e);
                self.counters.fetch_failures.fetch_add(1, Ordering::Relaxed);
                return TaskState::FetchFailed;
            }
        };
        let state = advance(url, state, TaskState::Admitted);
        let state = advance(url, state, TaskState::Fetching);

        let started = Instant::now();
        let result = self.fetcher.fetch(url.as_str(), &self.config.user_agent).await;
        drop(permit);

        let response = match result {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!("Error fetching {}: {}", url, e);
                self.counters.fetch_failures.fetch_add(1, Ordering::Relaxed);
                if self.config.failed_urls == FailedUrlPolicy::Release {
                    self.dispatched.release(url.as_str());
                }
                return advance(url, state, TaskState::FetchFailed);
            }
        };

        let record = PageRecord::from_response(url.clone(), &response, started.elapsed());
        tracing::debug!(
            "Fetched {} ({}, {} bytes) in {:?}",
            url,
            record.status,
            record.size,
            record.fetch_duration
        );

        for href in extract_links(&response.body) {
            self.consider_link(url, &href);
        }

        self.results.insert(url.to_string(), record);
        advance(url, state, TaskState::Completed)
    }

    /// Runs one href through normalize, scope, robots and dedup
    ///
    /// Hrefs resolve against the crawl root, not the page they appear on, so
    /// `intro.html` found on `/docs/index.html` becomes `/intro.html`.
    fn consider_link(self: &Arc<Self>, page: &Url, href: &str) {
        let candidate = match normalize(href, &self.config.root_url) {
            Some(candidate) => candidate,
            None => {
                self.counters.out_of_scope.fetch_add(1, Ordering::Relaxed);
                tracing::debug!("Skipping unparseable link {:?} on {}", href, page);
                return;
            }
        };

        if !in_scope(&self.config.root_url, &candidate) {
            self.counters.out_of_scope.fetch_add(1, Ordering::Relaxed);
            tracing::debug!("Skipping out-of-scope link {}", candidate);
            return;
        }

        if !self.robots.allowed(candidate.path(), &self.config.user_agent) {
            self.counters.robots_denied.fetch_add(1, Ordering::Relaxed);
            tracing::debug!("URL {} disallowed by robots.txt", candidate);
            return;
        }

        self.dispatch(candidate);
    }

    fn stats(&self) -> CrawlStats {
        CrawlStats {
            pages_recorded: self.results.len(),
            fetch_failures: self.counters.fetch_failures.load(Ordering::Relaxed),
            out_of_scope: self.counters.out_of_scope.load(Ordering::Relaxed),
            robots_denied: self.counters.robots_denied.load(Ordering::Relaxed),
            duplicates: self.counters.duplicates.load(Ordering::Relaxed),
            dispatched: self.counters.dispatched.load(Ordering::Relaxed),
            peak_concurrent: self.limiter.peak(),
        }
    }
}

fn advance(url: &Url, from: TaskState, to: TaskState) -> TaskState {
    debug_assert!(from.can_transition_to(to), "{} -> {}", from, to);
    tracing::trace!("{}: {} -> {}", url, from, to);
    to
}

/// Main crawler coordinator structure
pub struct Coordinator {
    config: CrawlConfig,
    fetcher: Arc<dyn Fetcher>,
}

impl Coordinator {
    /// Creates a coordinator that fetches over HTTP
    ///
    /// # Arguments
    ///
    /// * `config` - The validated crawl configuration
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Ready to run
    /// * `Err(CrawlError::HttpClient)` - The HTTP client could not be built
    pub fn new(config: CrawlConfig) -> Result<Self, CrawlError> {
        let fetcher = HttpFetcher::with_timeout(config.request_timeout)?;
        Ok(Self::with_fetcher(config, Arc::new(fetcher)))
    }

    /// Creates a coordinator around any [`Fetcher`]
    pub fn with_fetcher(config: CrawlConfig, fetcher: Arc<dyn Fetcher>) -> Self {
        Self { config, fetcher }
    }

    /// Runs the crawl to completion
    ///
    /// This method:
    /// 1. Loads the robots.txt gate
    /// 2. Dispatches the root URL (the root itself is never robots-checked)
    /// 3. Waits until every task, children included, has finished
    /// 4. Returns the collected page records and statistics
    ///
    /// Individual fetch failures never make this fail; only a strict-mode
    /// robots.txt failure does.
    pub async fn run(self) -> Result<CrawlReport, CrawlError> {
        let start_time = Instant::now();
        tracing::info!(
            "Starting crawl of {} with {} sockets",
            self.config.root_url,
            self.config.socket_limit
        );

        let robots = load_gate(self.fetcher.as_ref(), &self.config).await?;
        if let Some(policy) = robots.policy() {
            tracing::debug!("Obeying robots.txt with {} lines", policy.content().lines().count());
        }
        let root = normalize(self.config.root_url.as_str(), &self.config.root_url)
            .unwrap_or_else(|| self.config.root_url.clone());

        let session = Arc::new(CrawlSession::new(self.config, self.fetcher, robots));
        session.dispatch(root);
        session.group.wait().await;

        let stats = session.stats();
        if session.results.is_empty() {
            tracing::warn!("No pages were recorded for {}", session.config.root_url);
        }
        let pages = session.results.take_pages();
        let elapsed = start_time.elapsed();

        tracing::info!(
            "Crawl completed: {} pages recorded, {} fetch failures in {:?}",
            stats.pages_recorded,
            stats.fetch_failures,
            elapsed
        );

        Ok(CrawlReport {
            pages,
            elapsed,
            stats,
        })
    }
}

/// Crawls every reachable page of `config.root_url` over HTTP
pub async fn crawl(config: CrawlConfig) -> Result<CrawlReport, CrawlError> {
    Coordinator::new(config)?.run().await
}
