//! Integration tests for the HTTP adapter
//!
//! Each test serves the router on an ephemeral local port and maps a
//! wiremock site through it.

use site_mapper::config::Config;
use site_mapper::server::serve_on;
use site_mapper::SiteMap;
use tempfile::TempDir;
use tokio::net::TcpListener;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Starts the adapter in the background and returns its base address
async fn start_server(config: Config) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let _ = serve_on(listener, config).await;
    });

    format!("http://{}", addr)
}

async fn get(url: &str) -> (u16, String) {
    let response = reqwest::get(url).await.unwrap();
    let status = response.status().as_u16();
    (status, response.text().await.unwrap())
}

#[tokio::test]
async fn test_missing_site_parameter() {
    let api = start_server(Config::default()).await;

    let (status, body) = get(&format!("{}/sitemap?workers=2", api)).await;

    assert_eq!(status, 412);
    assert_eq!(body, "Missing query parameter \"site\"");
}

#[tokio::test]
async fn test_missing_workers_parameter() {
    let api = start_server(Config::default()).await;

    let (status, body) = get(&format!("{}/sitemap?site=https://foo.com", api)).await;

    assert_eq!(status, 412);
    assert_eq!(body, "Missing query parameter \"workers\"");
}

#[tokio::test]
async fn test_non_numeric_workers() {
    let api = start_server(Config::default()).await;

    let (status, body) = get(&format!("{}/sitemap?site=https://foo.com&workers=lots", api)).await;

    assert_eq!(status, 500);
    assert!(body.contains("lots"));
}

#[tokio::test]
async fn test_zero_workers() {
    let api = start_server(Config::default()).await;

    let (status, body) = get(&format!("{}/sitemap?site=https://foo.com&workers=0", api)).await;

    assert_eq!(status, 500);
    assert_eq!(body, "num workers must be greater than 0, got 0");
}

#[tokio::test]
async fn test_workers_above_limit_rejected_before_crawl() {
    let site = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&site)
        .await;

    let api = start_server(Config::default()).await;
    let (status, body) = get(&format!(
        "{}/sitemap?site={}&workers=100000000",
        api,
        site.uri()
    ))
    .await;

    assert_eq!(status, 500);
    assert!(body.contains("at most 1024"));

    site.verify().await;
}

#[tokio::test]
async fn test_unparseable_site() {
    let api = start_server(Config::default()).await;

    let (status, _) = get(&format!("{}/sitemap?site=not%20a%20url&workers=2", api)).await;

    assert_eq!(status, 500);
}

#[tokio::test]
async fn test_crawl_failure_is_internal_error() {
    let site = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&site)
        .await;

    let api = start_server(Config::default()).await;
    let (status, body) = get(&format!("{}/sitemap?site={}&workers=2", api, site.uri())).await;

    assert_eq!(status, 500);
    assert!(body.contains("404"));
}

#[tokio::test]
async fn test_site_map_response() {
    let site = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(r#"<a href="/about">About</a><img src="/logo.png">"#),
        )
        .mount(&site)
        .await;
    Mock::given(method("GET"))
        .and(path("/about"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<p>About</p>"))
        .mount(&site)
        .await;

    let api = start_server(Config::default()).await;
    let response = reqwest::get(format!("{}/sitemap?site={}&workers=3", api, site.uri()))
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 200);
    let content_type = response
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(content_type.starts_with("application/json"));

    let site_map: SiteMap = serde_json::from_str(&response.text().await.unwrap()).unwrap();
    assert_eq!(site_map.len(), 2);

    let root = site_map.page(&format!("{}/", site.uri())).unwrap();
    assert_eq!(root.links.len(), 1);
    assert_eq!(root.assets[0].as_str(), format!("{}/logo.png", site.uri()));
}

#[tokio::test]
async fn test_static_files_served() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("index.html"), "<h1>Site Mapper</h1>").unwrap();

    let mut config = Config::default();
    config.server.static_dir = Some(dir.path().to_string_lossy().into_owned());
    let api = start_server(config).await;

    let (status, body) = get(&format!("{}/index.html", api)).await;
    assert_eq!(status, 200);
    assert_eq!(body, "<h1>Site Mapper</h1>");

    let (status, _) = get(&format!("{}/missing.html", api)).await;
    assert_eq!(status, 404);
}

#[tokio::test]
async fn test_unknown_path_without_static_dir() {
    let api = start_server(Config::default()).await;

    let (status, _) = get(&format!("{}/index.html", api)).await;
    assert_eq!(status, 404);
}
