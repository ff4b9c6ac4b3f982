//! Site-Mapper: a concurrent same-domain site crawler
//!
//! This crate crawls a website from a seed address with a fixed-size worker
//! pool and produces a map of every reachable same-domain page, recording the
//! links that lead deeper into the crawl and the assets each page references.

pub mod config;
pub mod crawler;
pub mod dom;
pub mod output;
pub mod server;
pub mod sitemap;
pub mod state;
pub mod url;

use thiserror::Error;

/// Main error type for Site-Mapper operations
#[derive(Debug, Error)]
pub enum SiteMapError {
    #[error("num workers must be greater than 0, got {0}")]
    InvalidWorkerCount(usize),

    #[error("Malformed URL: {0}")]
    Url(#[from] UrlError),

    #[error("Fetch error for {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),

    #[error("HTML parse error for {url}: {message}")]
    Parse { url: String, message: String },

    #[error("Crawl worker failed: {0}")]
    Worker(String),

    #[error("Invalid state transition: {from:?} -> {to:?}")]
    InvalidTransition {
        from: state::CrawlState,
        to: state::CrawlState,
    },

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SiteMapError {
    /// Returns true for network, transport and HTTP status failures
    pub fn is_fetch_error(&self) -> bool {
        matches!(self, Self::Fetch { .. })
    }
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// URL-specific errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UrlError {
    #[error("cannot parse '{reference}': {reason}")]
    Malformed { reference: String, reason: String },

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing host in URL: {0}")]
    MissingHost(String),
}

/// Markup node errors
///
/// These never escape a crawl: a node missing the attribute it needs simply
/// contributes nothing to its page.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomError {
    #[error("<{element}> has no '{key}' attribute")]
    AttributeNotFound { element: String, key: String },
}

/// Result type alias for Site-Mapper operations
pub type Result<T> = std::result::Result<T, SiteMapError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{create_site_map, Coordinator};
pub use sitemap::{PageRecord, SiteMap};
pub use state::CrawlState;
