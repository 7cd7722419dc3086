//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and test
//! the full fetch, extract, and recurse cycle end-to-end.

use cache_warmer::config::{Config, CrawlerConfig, UserAgentConfig};
use cache_warmer::crawler::{
    build_http_client, crawl_site, fetch_url, Coordinator, Dispatch, FetchResult, HttpFetcher,
};
use std::time::Duration;
use url::Url;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TOKEN: &str = "bypass-xyz";

fn user_agent_config() -> UserAgentConfig {
    UserAgentConfig {
        crawler_name: "TestWarmer".to_string(),
        crawler_version: "1.0".to_string(),
        bypass_token: Some(TOKEN.to_string()),
    }
}

fn test_fetcher(timeout: Duration) -> HttpFetcher {
    HttpFetcher::from_config(&user_agent_config(), TOKEN, timeout)
        .expect("Failed to build HTTP client")
}

fn html_page(links: &[&str]) -> ResponseTemplate {
    let anchors: String = links
        .iter()
        .map(|href| format!(r#"<a href="{}">link</a>"#, href))
        .collect();
    ResponseTemplate::new(200)
        .set_body_string(format!("<html><body>{}</body></html>", anchors))
        .insert_header("content-type", "text/html")
}

async fn mount_page(server: &MockServer, page: &str, links: &[&str], expected_hits: u64) {
    Mock::given(method("GET"))
        .and(path(page))
        .respond_with(html_page(links))
        .expect(expected_hits)
        .mount(server)
        .await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_full_crawl_single_site() {
    let mock_server = MockServer::start().await;

    mount_page(
        &mock_server,
        "/",
        &[
            "/page1",
            "/page2",
            "#top",
            "/logo.png",
            "/wp-admin/index.php",
            "http://other.test/x",
        ],
        1,
    )
    .await;
    mount_page(&mock_server, "/page1", &["/", "/page2", "/page1#again"], 1).await;
    mount_page(&mock_server, "/page2", &["/page1"], 1).await;
    mount_page(&mock_server, "/logo.png", &[], 0).await;
    mount_page(&mock_server, "/wp-admin/index.php", &[], 0).await;

    let report = crawl_site(
        test_fetcher(Duration::from_secs(10)),
        &mock_server.uri(),
        10,
        Dispatch::Parallel { max_parallelism: 4 },
    )
    .await;

    assert!(report.success);
    assert_eq!(report.pages_visited, 3);
    // Wiremock verifies the expected hit counts when mock_server drops
}

#[tokio::test]
async fn test_requests_carry_bypass_token() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .and(header("user-agent", "TestWarmer/1.0 bypass-xyz"))
        .respond_with(html_page(&["/next"]))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/next"))
        .and(header("user-agent", "TestWarmer/1.0 bypass-xyz"))
        .respond_with(html_page(&[]))
        .expect(1)
        .mount(&mock_server)
        .await;

    let report = crawl_site(
        test_fetcher(Duration::from_secs(10)),
        &mock_server.uri(),
        10,
        Dispatch::Sequential,
    )
    .await;

    assert!(report.success);
    assert_eq!(report.pages_visited, 2);
}

#[tokio::test]
async fn test_not_found_seed_fails_without_recursion() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(404).set_body_string(r#"<a href="/hidden">x</a>"#))
        .expect(1)
        .mount(&mock_server)
        .await;
    mount_page(&mock_server, "/hidden", &[], 0).await;

    let report = crawl_site(
        test_fetcher(Duration::from_secs(10)),
        &mock_server.uri(),
        10,
        Dispatch::Sequential,
    )
    .await;

    assert!(!report.success);
    assert_eq!(report.pages_visited, 1);

    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
}

#[tokio::test]
async fn test_failing_child_does_not_stop_siblings() {
    let mock_server = MockServer::start().await;

    mount_page(&mock_server, "/", &["/broken", "/fine"], 1).await;
    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&mock_server)
        .await;
    mount_page(&mock_server, "/fine", &[], 1).await;

    let report = crawl_site(
        test_fetcher(Duration::from_secs(10)),
        &mock_server.uri(),
        10,
        Dispatch::Sequential,
    )
    .await;

    assert!(report.success);
    assert_eq!(report.pages_visited, 3);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_crawl_with_depth_limit() {
    let mock_server = MockServer::start().await;

    mount_page(&mock_server, "/", &["/level1"], 1).await;
    mount_page(&mock_server, "/level1", &["/level2"], 1).await;
    mount_page(&mock_server, "/level2", &["/level3"], 0).await;

    let report = crawl_site(
        test_fetcher(Duration::from_secs(10)),
        &mock_server.uri(),
        1,
        Dispatch::Parallel { max_parallelism: 2 },
    )
    .await;

    assert!(report.success);
    assert_eq!(report.pages_visited, 2);
}

#[tokio::test]
async fn test_fetch_timeout_is_network_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(html_page(&[]).set_delay(Duration::from_secs(5)))
        .mount(&mock_server)
        .await;

    let client = build_http_client(
        &user_agent_config(),
        TOKEN,
        Duration::from_millis(200),
    )
    .unwrap();
    let url = Url::parse(&format!("{}/slow", mock_server.uri())).unwrap();

    let result = fetch_url(&client, &url).await;
    assert!(matches!(result.outcome, FetchResult::NetworkError { .. }));
}

#[tokio::test]
async fn test_non_ok_success_status_is_not_parsed() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(203).set_body_string(r#"<a href="/x">x</a>"#))
        .mount(&mock_server)
        .await;

    let url = Url::parse(&mock_server.uri()).unwrap();
    let client = build_http_client(
        &user_agent_config(),
        TOKEN,
        Duration::from_secs(10),
    )
    .unwrap();

    let result = fetch_url(&client, &url).await;
    assert!(matches!(
        result.outcome,
        FetchResult::HttpError {
            status_code: 203,
            ..
        }
    ));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_coordinator_runs_every_site() {
    let mock_server = MockServer::start().await;

    mount_page(&mock_server, "/", &["/a"], 1).await;
    mount_page(&mock_server, "/a", &[], 1).await;

    let config = Config {
        crawler: CrawlerConfig {
            max_depth: 3,
            parallel: true,
            max_parallelism: Some(2),
            request_timeout: 5,
        },
        user_agent: user_agent_config(),
        sites: vec![mock_server.uri(), "http://127.0.0.1:9".to_string()],
    };

    let coordinator = Coordinator::new(config).expect("Failed to create coordinator");
    let summary = coordinator.run().await;

    assert_eq!(summary.sites.len(), 2);
    assert_eq!(summary.succeeded(), 1);
    assert_eq!(summary.failed(), 1);
    assert_eq!(summary.sites[0].pages_visited, 2);
    assert!(!summary.sites[1].success);
}
