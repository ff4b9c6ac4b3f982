//! Crawler module for page fetching and site mapping
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching of a single page
//! - HTML parsing and link/asset extraction
//! - The worker pool and the coordinator that detects crawl completion

mod coordinator;
mod fetcher;
mod parser;

pub use coordinator::{create_site_map, create_site_map_with_config, Coordinator, WorkerResult};
pub use fetcher::{build_http_client, fetch_page};
pub use parser::{extract_from_document, extract_page};
