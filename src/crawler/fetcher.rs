//! HTTP fetcher implementation
//!
//! This module handles the HTTP side of the crawl:
//! - Building the shared HTTP client with the configured user agent
//! - One GET per page, non-success status treated as failure
//! - Handing the body to the extractor

use crate::config::Config;
use crate::crawler::parser::extract_page;
use crate::sitemap::PageRecord;
use crate::SiteMapError;
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// Builds an HTTP client with proper configuration
///
/// The client identifies itself as `name/version` from the user-agent
/// section. A request timeout is only installed when one is configured.
///
/// # Example
///
/// ```
/// use site_mapper::config::Config;
/// use site_mapper::crawler::build_http_client;
///
/// let client = build_http_client(&Config::default()).unwrap();
/// ```
pub fn build_http_client(config: &Config) -> Result<Client, reqwest::Error> {
    let user_agent = format!("{}/{}", config.user_agent.name, config.user_agent.version);

    let mut builder = Client::builder()
        .user_agent(user_agent)
        .gzip(true)
        .brotli(true);

    if let Some(secs) = config.crawler.request_timeout_secs {
        builder = builder.timeout(Duration::from_secs(secs));
    }

    builder.build()
}

/// Fetches one page and extracts its links and assets
///
/// # Errors
///
/// | Condition | Error |
/// |-----------|-------|
/// | Connection, TLS, timeout or redirect failure | `SiteMapError::Fetch` |
/// | Non-success HTTP status | `SiteMapError::Fetch` |
/// | Body cannot be read | `SiteMapError::Parse` |
/// | Malformed reference in the markup | `SiteMapError::Url` |
pub async fn fetch_page(client: &Client, url: &Url) -> Result<PageRecord, SiteMapError> {
    let response = client
        .get(url.clone())
        .send()
        .await
        .and_then(|response| response.error_for_status())
        .map_err(|source| SiteMapError::Fetch {
            url: url.to_string(),
            source,
        })?;

    let body = response.text().await.map_err(|e| SiteMapError::Parse {
        url: url.to_string(),
        message: e.to_string(),
    })?;

    let page = extract_page(&body, url)?;
    tracing::trace!(
        "Extracted {} links and {} assets from {}",
        page.links.len(),
        page.assets.len(),
        url
    );
    Ok(page)
}
