//! Output module for writing crawl results
//!
//! This module handles:
//! - Serializing a site map to its JSON document
//! - Rendering a human-readable markdown report
//! - Computing and printing site map statistics

mod markdown;
pub mod stats;

pub use markdown::{format_markdown, write_markdown};
pub use stats::{print_statistics, SiteMapStatistics};

use crate::sitemap::SiteMap;
use crate::SiteMapError;
use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::str::FromStr;

/// Format of a written site map file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Json,
    Markdown,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Markdown => "markdown",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            other => Err(format!("unknown output format '{}'", other)),
        }
    }
}

/// Serializes a site map to its JSON document
pub fn to_json(site_map: &SiteMap) -> Result<String, SiteMapError> {
    Ok(serde_json::to_string(site_map)?)
}

/// Writes a site map as JSON to any writer
pub fn write_json<W: Write>(site_map: &SiteMap, writer: W) -> Result<(), SiteMapError> {
    serde_json::to_writer(writer, site_map)?;
    Ok(())
}

/// Writes a site map to `path` in the requested format
///
/// # Arguments
///
/// * `site_map` - The crawl result
/// * `path` - Destination file; created or truncated
/// * `format` - JSON document or markdown report
///
/// # Returns
///
/// * `Ok(())` - Successfully wrote the file
/// * `Err(SiteMapError)` - Failed to create or write the file
pub fn write_site_map(
    site_map: &SiteMap,
    path: &Path,
    format: OutputFormat,
) -> Result<(), SiteMapError> {
    match format {
        OutputFormat::Json => {
            let mut writer = BufWriter::new(File::create(path)?);
            write_json(site_map, &mut writer)?;
            writer.flush()?;
        }
        OutputFormat::Markdown => write_markdown(site_map, path)?,
    }

    tracing::info!(
        "Wrote {} pages to {} ({})",
        site_map.len(),
        path.display(),
        format
    );
    Ok(())
}
