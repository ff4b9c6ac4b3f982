//! Statistics over a finished site map
//!
//! This module provides functionality for summarizing a crawl result and
//! displaying the summary on stdout.

use crate::sitemap::SiteMap;
use std::collections::HashSet;

/// Site map statistics summary
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SiteMapStatistics {
    /// Number of pages visited
    pub total_pages: usize,

    /// Sum of every page's link count
    pub total_links: usize,

    /// Number of distinct link targets across all pages
    pub unique_links: usize,

    /// Sum of every page's asset count
    pub total_assets: usize,

    /// Number of distinct asset addresses across all pages
    pub unique_assets: usize,

    /// Pages that lead nowhere deeper into the site
    pub pages_without_links: usize,
}

impl SiteMapStatistics {
    /// Computes statistics for a site map
    pub fn from_site_map(site_map: &SiteMap) -> Self {
        let mut links = HashSet::new();
        let mut assets = HashSet::new();
        let mut stats = Self {
            total_pages: site_map.len(),
            ..Self::default()
        };

        for page in &site_map.pages {
            stats.total_links += page.links.len();
            stats.total_assets += page.assets.len();
            if page.links.is_empty() {
                stats.pages_without_links += 1;
            }
            links.extend(page.links.iter().map(|u| u.as_str()));
            assets.extend(page.assets.iter().map(|u| u.as_str()));
        }

        stats.unique_links = links.len();
        stats.unique_assets = assets.len();
        stats
    }

    /// Mean number of links per page
    pub fn average_links(&self) -> f64 {
        if self.total_pages == 0 {
            0.0
        } else {
            self.total_links as f64 / self.total_pages as f64
        }
    }
}

/// Prints statistics to stdout in a formatted manner
///
/// # Arguments
///
/// * `stats` - The statistics to display
pub fn print_statistics(stats: &SiteMapStatistics) {
    println!("=== Site Map Statistics ===\n");

    println!("Overview:");
    println!("  Pages visited: {}", stats.total_pages);
    println!(
        "  Links found: {} ({} unique, {:.1} per page)",
        stats.total_links,
        stats.unique_links,
        stats.average_links()
    );
    println!(
        "  Assets found: {} ({} unique)",
        stats.total_assets, stats.unique_assets
    );
    println!("  Pages without links: {}", stats.pages_without_links);
}
