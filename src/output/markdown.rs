//! Markdown report generation
//!
//! Renders a site map as a human-readable document: overview counts first,
//! then one section per page with its links and assets.

use crate::output::stats::SiteMapStatistics;
use crate::sitemap::SiteMap;
use crate::SiteMapError;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Writes a markdown report of the site map to `output_path`
pub fn write_markdown(site_map: &SiteMap, output_path: &Path) -> Result<(), SiteMapError> {
    let markdown = format_markdown(site_map);

    let mut file = File::create(output_path)?;
    file.write_all(markdown.as_bytes())?;

    Ok(())
}

/// Formats a site map as markdown
pub fn format_markdown(site_map: &SiteMap) -> String {
    let stats = SiteMapStatistics::from_site_map(site_map);
    let mut md = String::new();

    md.push_str("# Site Map\n\n");

    if let Some(first) = site_map.pages.first() {
        md.push_str(&format!("- **Seed**: {}\n\n", first.url));
    }

    md.push_str("## Overview\n\n");
    md.push_str("| Metric | Count |\n");
    md.push_str("|--------|-------|\n");
    md.push_str(&format!("| Pages | {} |\n", stats.total_pages));
    md.push_str(&format!("| Links | {} |\n", stats.total_links));
    md.push_str(&format!("| Unique Links | {} |\n", stats.unique_links));
    md.push_str(&format!("| Assets | {} |\n", stats.total_assets));
    md.push_str(&format!("| Unique Assets | {} |\n", stats.unique_assets));
    md.push_str(&format!(
        "| Pages Without Links | {} |\n\n",
        stats.pages_without_links
    ));

    md.push_str("## Pages\n\n");

    for page in &site_map.pages {
        md.push_str(&format!("### {}\n\n", page.url));

        if page.links.is_empty() && page.assets.is_empty() {
            md.push_str("_No links or assets._\n\n");
            continue;
        }

        if !page.links.is_empty() {
            md.push_str(&format!("**Links** ({})\n\n", page.links.len()));
            for link in &page.links {
                md.push_str(&format!("- <{}>\n", link));
            }
            md.push('\n');
        }

        if !page.assets.is_empty() {
            md.push_str(&format!("**Assets** ({})\n\n", page.assets.len()));
            for asset in &page.assets {
                md.push_str(&format!("- <{}>\n", asset));
            }
            md.push('\n');
        }
    }

    md
}
