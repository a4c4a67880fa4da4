//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and test
//! the full crawl cycle end-to-end.

use spidered::config::CrawlConfig;
use spidered::crawler::Coordinator;
use spidered::state::checksum;
use spidered::{crawl, CrawlError};
use std::time::Duration;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration rooted at the mock server
fn create_test_config(server: &MockServer, socket_limit: usize) -> CrawlConfig {
    let mut config =
        CrawlConfig::new(&server.uri(), socket_limit).expect("Failed to build config");
    config.user_agent = "TestBot".to_string();
    config.request_timeout = Duration::from_secs(5);
    config
}

fn html(body: String) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(body, "text/html")
}

async fn mount_page(server: &MockServer, route: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(html(body))
        .mount(server)
        .await;
}

async fn mount_robots(server: &MockServer, content: &str) {
    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_string(content))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_full_crawl_single_domain() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_robots(&mock_server, "User-agent: *\nAllow: /").await;

    let index = format!(
        r#"<html><head><title>Home</title></head><body>
        <a href="{}/page1">Page 1</a>
        <a href="/page2">Page 2</a>
        <a href="/page1#section">Page 1 again</a>
        </body></html>"#,
        base_url
    );
    mount_page(&mock_server, "/", index.clone()).await;

    let page1 = r#"<html><body>Content 1 <a href="page2">sibling</a></body></html>"#;
    Mock::given(method("GET"))
        .and(path("/page1"))
        .respond_with(html(page1.to_string()))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/page2"))
        .respond_with(html(r#"<html><body><a href="/">home</a></body></html>"#.to_string()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let report = crawl(create_test_config(&mock_server, 5))
        .await
        .expect("Crawl failed");

    assert_eq!(report.pages.len(), 3);
    assert_eq!(report.stats.pages_recorded, 3);
    assert_eq!(report.stats.fetch_failures, 0);

    let root = &report.pages[&format!("{}/", base_url)];
    assert_eq!(root.status, 200);
    assert_eq!(root.path, "/");
    assert_eq!(root.content_type, "text/html");
    assert_eq!(root.size, index.len());
    assert_eq!(root.checksum, checksum(index.as_bytes()));
    assert!(root
        .headers
        .iter()
        .any(|(name, value)| name == "content-type" && value == "text/html"));

    let page1_record = &report.pages[&format!("{}/page1", base_url)];
    assert_eq!(page1_record.checksum, checksum(page1.as_bytes()));
}

#[tokio::test]
async fn test_robots_disallowed_path_is_never_requested() {
    let mock_server = MockServer::start().await;

    mount_robots(&mock_server, "User-agent: *\nDisallow: /private").await;
    mount_page(
        &mock_server,
        "/",
        r#"<a href="/private">secret</a><a href="/public">open</a>"#.to_string(),
    )
    .await;
    mount_page(&mock_server, "/public", "<p>public</p>".to_string()).await;

    Mock::given(method("GET"))
        .and(path("/private"))
        .respond_with(html("<p>secret</p>".to_string()))
        .expect(0)
        .mount(&mock_server)
        .await;

    let report = crawl(create_test_config(&mock_server, 2))
        .await
        .expect("Crawl failed");

    assert_eq!(report.pages.len(), 2);
    assert!(report.pages.contains_key(&format!("{}/public", mock_server.uri())));
    assert_eq!(report.stats.robots_denied, 1);
}

#[tokio::test]
async fn test_ignore_robots_crawls_disallowed_paths() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_string("User-agent: *\nDisallow: /"))
        .expect(0)
        .mount(&mock_server)
        .await;
    mount_page(&mock_server, "/", r#"<a href="/private">secret</a>"#.to_string()).await;
    mount_page(&mock_server, "/private", "<p>secret</p>".to_string()).await;

    let mut config = create_test_config(&mock_server, 2);
    config.ignore_robots = true;

    let report = crawl(config).await.expect("Crawl failed");

    assert_eq!(report.pages.len(), 2);
}

#[tokio::test]
async fn test_other_hosts_are_skipped() {
    let mock_server = MockServer::start().await;

    mount_page(
        &mock_server,
        "/",
        r#"<a href="http://other.invalid/b">elsewhere</a>
           <a href="mailto:admin@example.test">mail</a>
           <a href="https://127.0.0.1:1/">other port</a>"#
            .to_string(),
    )
    .await;

    let report = crawl(create_test_config(&mock_server, 2))
        .await
        .expect("Crawl failed");

    assert_eq!(report.pages.len(), 1);
    assert_eq!(report.stats.out_of_scope, 3);
    assert_eq!(report.stats.dispatched, 1);
}

#[tokio::test]
async fn test_error_status_pages_are_recorded() {
    let mock_server = MockServer::start().await;

    mount_page(&mock_server, "/", r#"<a href="/missing">gone</a>"#.to_string()).await;

    let report = crawl(create_test_config(&mock_server, 2))
        .await
        .expect("Crawl failed");

    let missing = &report.pages[&format!("{}/missing", mock_server.uri())];
    assert_eq!(missing.status, 404);
    assert_eq!(report.stats.fetch_failures, 0);
}

#[tokio::test]
async fn test_user_agent_is_sent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .and(header("user-agent", "TestBot"))
        .respond_with(html("<p>hello bot</p>".to_string()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let report = crawl(create_test_config(&mock_server, 1))
        .await
        .expect("Crawl failed");

    assert_eq!(report.pages[&format!("{}/", mock_server.uri())].status, 200);
}

#[tokio::test]
async fn test_timed_out_page_leaves_no_record() {
    let mock_server = MockServer::start().await;

    mount_page(
        &mock_server,
        "/",
        r#"<a href="/slow">slow</a><a href="/fast">fast</a>"#.to_string(),
    )
    .await;
    mount_page(&mock_server, "/fast", "<p>fast</p>".to_string()).await;
    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(html("<p>slow</p>".to_string()).set_delay(Duration::from_secs(3)))
        .mount(&mock_server)
        .await;

    let mut config = create_test_config(&mock_server, 3);
    config.request_timeout = Duration::from_millis(300);

    let report = crawl(config).await.expect("Crawl failed");

    assert_eq!(report.pages.len(), 2);
    assert!(!report.pages.contains_key(&format!("{}/slow", mock_server.uri())));
    assert_eq!(report.stats.fetch_failures, 1);
}

#[tokio::test]
async fn test_strict_robots_unreachable_aborts_crawl() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(3)))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html("<p>root</p>".to_string()))
        .expect(0)
        .mount(&mock_server)
        .await;

    let mut config = create_test_config(&mock_server, 2);
    config.strict_robots = true;
    config.request_timeout = Duration::from_millis(300);

    let result = crawl(config).await;

    assert!(matches!(result, Err(CrawlError::Robots { .. })));
}

#[tokio::test]
async fn test_strict_robots_missing_crawls_root_only() {
    let mock_server = MockServer::start().await;

    mount_page(&mock_server, "/", r#"<a href="/a">a</a>"#.to_string()).await;
    Mock::given(method("GET"))
        .and(path("/a"))
        .respond_with(html("<p>a</p>".to_string()))
        .expect(0)
        .mount(&mock_server)
        .await;

    let mut config = create_test_config(&mock_server, 2);
    config.strict_robots = true;

    let report = Coordinator::new(config)
        .expect("Failed to create coordinator")
        .run()
        .await
        .expect("Crawl failed");

    assert_eq!(report.pages.len(), 1);
    assert_eq!(report.stats.robots_denied, 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_socket_limit_bounds_concurrency() {
    let mock_server = MockServer::start().await;

    let links: String = (1..=6)
        .map(|i| format!(r#"<a href="/p{}">{}</a>"#, i, i))
        .collect();
    mount_page(&mock_server, "/", links).await;
    for i in 1..=6 {
        Mock::given(method("GET"))
            .and(path(format!("/p{}", i)))
            .respond_with(html("<p>slow</p>".to_string()).set_delay(Duration::from_millis(100)))
            .mount(&mock_server)
            .await;
    }

    let report = crawl(create_test_config(&mock_server, 2))
        .await
        .expect("Crawl failed");

    assert_eq!(report.pages.len(), 7);
    assert!(report.stats.peak_concurrent <= 2);
}
