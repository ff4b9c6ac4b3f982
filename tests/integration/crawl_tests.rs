//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and test
//! the full crawl cycle end-to-end.

use site_mapper::config::Config;
use site_mapper::crawler::{
    build_http_client, create_site_map, create_site_map_with_config, Coordinator,
};
use site_mapper::output::{write_site_map, OutputFormat};
use site_mapper::{CrawlState, SiteMap, SiteMapError, UrlError};
use tempfile::TempDir;
use url::Url;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Mounts an HTML page at `route`
async fn mount_page(server: &MockServer, route: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body.to_string())
                .insert_header("content-type", "text/html"),
        )
        .mount(server)
        .await;
}

fn sorted_urls(site_map: &SiteMap) -> Vec<String> {
    let mut urls: Vec<String> = site_map.pages.iter().map(|p| p.url.to_string()).collect();
    urls.sort();
    urls
}

fn strings(list: &[Url]) -> Vec<String> {
    list.iter().map(|u| u.to_string()).collect()
}

#[tokio::test]
async fn test_single_page_links_and_assets() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/",
        r#"<html><head>
            <link rel="stylesheet" href="/main.css">
            <script src="https://cdn.example.org/app.js"></script>
        </head><body>
            <img src="logo.png">
        </body></html>"#,
    )
    .await;

    let site_map = create_site_map(&base_url, 2).await.unwrap();

    assert_eq!(site_map.len(), 1);
    let page = &site_map.pages[0];
    assert_eq!(page.url.as_str(), format!("{}/", base_url));
    assert!(page.links.is_empty());
    assert_eq!(
        strings(&page.assets),
        vec![
            format!("{}/main.css", base_url),
            "https://cdn.example.org/app.js".to_string(),
            format!("{}/logo.png", base_url),
        ]
    );
}

#[tokio::test]
async fn test_full_crawl_single_domain() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/",
        &format!(
            r#"<html><body>
            <a href="{}/page1">Page 1</a>
            <a href="/page2">Page 2</a>
            </body></html>"#,
            base_url
        ),
    )
    .await;
    mount_page(
        &mock_server,
        "/page1",
        r#"<html><body><a href="page3">Page 3</a>Content 1</body></html>"#,
    )
    .await;
    mount_page(&mock_server, "/page2", "<html><body>Content 2</body></html>").await;
    mount_page(&mock_server, "/page3", "<html><body>Content 3</body></html>").await;

    let site_map = create_site_map(&base_url, 4).await.unwrap();

    assert_eq!(
        sorted_urls(&site_map),
        vec![
            format!("{}/", base_url),
            format!("{}/page1", base_url),
            format!("{}/page2", base_url),
            format!("{}/page3", base_url),
        ]
    );

    let root = site_map.page(&format!("{}/", base_url)).unwrap();
    assert_eq!(
        strings(&root.links),
        vec![format!("{}/page1", base_url), format!("{}/page2", base_url)]
    );
}

#[tokio::test]
async fn test_cycle_terminates() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(&mock_server, "/a", r#"<a href="/b">B</a>"#).await;
    mount_page(&mock_server, "/b", r#"<a href="/a">A</a><a href="/b#self">B</a>"#).await;

    let site_map = create_site_map(&format!("{}/a", base_url), 3)
        .await
        .unwrap();

    assert_eq!(
        sorted_urls(&site_map),
        vec![format!("{}/a", base_url), format!("{}/b", base_url)]
    );

    let b = site_map.page(&format!("{}/b", base_url)).unwrap();
    assert_eq!(
        strings(&b.links),
        vec![format!("{}/a", base_url), format!("{}/b", base_url)]
    );
}

#[tokio::test]
async fn test_each_page_fetched_once() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    // Every page links to every other page, including itself
    let hub = r#"<a href="/">Home</a><a href="/x">X</a><a href="/y">Y</a><a href="/z">Z</a>"#;
    for route in ["/", "/x", "/y", "/z"] {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(ResponseTemplate::new(200).set_body_string(hub))
            .expect(1)
            .mount(&mock_server)
            .await;
    }

    let site_map = create_site_map(&base_url, 8).await.unwrap();
    assert_eq!(site_map.len(), 4);

    mock_server.verify().await;
}

#[tokio::test]
async fn test_duplicate_links_collapse() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/",
        r#"<a href="/about">1</a><a href="/about#team">2</a><a href="about">3</a>"#,
    )
    .await;
    mount_page(&mock_server, "/about", "<p>About</p>").await;

    let site_map = create_site_map(&base_url, 2).await.unwrap();

    let root = site_map.page(&format!("{}/", base_url)).unwrap();
    assert_eq!(strings(&root.links), vec![format!("{}/about", base_url)]);
    assert_eq!(site_map.len(), 2);
}

#[tokio::test]
async fn test_off_domain_and_file_links_not_followed() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/",
        r#"<a href="https://elsewhere.example.com/page">Away</a>
           <a href="/report.pdf">Report</a>
           <a href="mailto:someone@example.com">Mail</a>
           <a href="/guide.html">Guide</a>
           <a>No href</a>"#,
    )
    .await;
    mount_page(&mock_server, "/guide.html", "<p>Guide</p>").await;

    let site_map = create_site_map(&base_url, 2).await.unwrap();

    assert_eq!(
        sorted_urls(&site_map),
        vec![format!("{}/", base_url), format!("{}/guide.html", base_url)]
    );
}

#[tokio::test]
async fn test_fail_fast_on_missing_page() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(&mock_server, "/", r#"<a href="/gone">Gone</a>"#).await;
    Mock::given(method("GET"))
        .and(path("/gone"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let result = create_site_map(&base_url, 2).await;

    match result {
        Err(SiteMapError::Fetch { url, .. }) => assert_eq!(url, format!("{}/gone", base_url)),
        other => panic!("expected fetch error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_fail_fast_on_unreadable_body() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(&mock_server, "/", r#"<a href="/packed">Packed</a>"#).await;
    // Claims gzip but carries plain bytes, so decoding the body fails
    Mock::given(method("GET"))
        .and(path("/packed"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-encoding", "gzip")
                .set_body_bytes(b"<p>not gzip at all</p>".to_vec()),
        )
        .mount(&mock_server)
        .await;

    let result = create_site_map(&base_url, 2).await;

    match result {
        Err(SiteMapError::Parse { url, .. }) => assert_eq!(url, format!("{}/packed", base_url)),
        other => panic!("expected parse error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_fail_fast_on_malformed_link() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(&mock_server, "/", r#"<a href="/fine">Fine</a>"#).await;
    mount_page(&mock_server, "/fine", r#"<a href="http://[::1">Broken</a>"#).await;

    let result = create_site_map(&base_url, 2).await;
    assert!(matches!(
        result,
        Err(SiteMapError::Url(UrlError::Malformed { .. }))
    ));
}

#[tokio::test]
async fn test_unreachable_seed() {
    // Bind and release a port so nothing is listening on it
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };

    let result = create_site_map(&format!("http://127.0.0.1:{}/", port), 1).await;
    assert!(result.unwrap_err().is_fetch_error());
}

#[tokio::test]
async fn test_zero_workers_makes_no_requests() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let result = create_site_map(&mock_server.uri(), 0).await;
    assert!(matches!(result, Err(SiteMapError::InvalidWorkerCount(0))));

    mock_server.verify().await;
}

#[tokio::test]
async fn test_single_worker_completes() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/",
        r#"<a href="/1">1</a><a href="/2">2</a><a href="/3">3</a>"#,
    )
    .await;
    mount_page(&mock_server, "/1", r#"<a href="/2">2</a>"#).await;
    mount_page(&mock_server, "/2", r#"<a href="/3">3</a>"#).await;
    mount_page(&mock_server, "/3", r#"<a href="/">home</a>"#).await;

    let site_map = create_site_map(&base_url, 1).await.unwrap();
    assert_eq!(site_map.len(), 4);
}

#[tokio::test]
async fn test_coordinator_states_and_user_agent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .and(header("user-agent", "TestMapper/9.9"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<p>hi</p>"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut config = Config::default();
    config.crawler.workers = 2;
    config.user_agent.name = "TestMapper".to_string();
    config.user_agent.version = "9.9".to_string();

    let mut coordinator = Coordinator::from_config(&config).unwrap();
    assert_eq!(coordinator.state(), CrawlState::Idle);

    let seed = Url::parse(&mock_server.uri()).unwrap();
    let site_map = coordinator.run(seed.clone()).await.unwrap();
    assert_eq!(site_map.len(), 1);
    assert_eq!(coordinator.state(), CrawlState::Completed);

    // A finished coordinator cannot be started again
    let again = coordinator.run(seed).await;
    assert!(matches!(again, Err(SiteMapError::InvalidTransition { .. })));

    mock_server.verify().await;
}

#[tokio::test]
async fn test_failed_coordinator_state() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let client = build_http_client(&Config::default()).unwrap();
    let mut coordinator = Coordinator::new(client, 3).unwrap();

    let result = coordinator
        .run(Url::parse(&mock_server.uri()).unwrap())
        .await;

    assert!(result.is_err());
    assert_eq!(coordinator.state(), CrawlState::Failed);
}

#[tokio::test]
async fn test_crawl_with_config_and_write_output() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(&mock_server, "/", r#"<a href="/docs/">Docs</a><img src="/a.png">"#).await;
    mount_page(&mock_server, "/docs/", "<p>docs</p>").await;

    let mut config = Config::default();
    config.crawler.workers = 2;
    config.crawler.request_timeout_secs = Some(10);

    let site_map = create_site_map_with_config(&base_url, &config)
        .await
        .unwrap();

    let dir = TempDir::new().unwrap();
    let path = dir.path().join("sitemap.json");
    write_site_map(&site_map, &path, OutputFormat::Json).unwrap();

    let written: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    let pages = written["pages"].as_array().unwrap();
    assert_eq!(pages.len(), 2);
    assert!(pages
        .iter()
        .any(|p| p["url"] == format!("{}/docs/", base_url)));
    assert!(pages.iter().all(|p| p["links"].is_array() && p["assets"].is_array()));
}
