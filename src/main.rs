//! Site-Mapper main entry point
//!
//! This is the command-line interface for the Site-Mapper crawler. It maps a
//! site to a file, or serves the mapper over HTTP.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use site_mapper::config::{check_worker_limit, load_config_or_default, validate, Config};
use site_mapper::crawler::create_site_map_with_config;
use site_mapper::output::{print_statistics, write_site_map, OutputFormat, SiteMapStatistics};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Site-Mapper: a concurrent same-domain site crawler
///
/// Crawls every page reachable from a seed address without leaving its
/// domain, and records the links and assets each page references.
#[derive(Parser, Debug)]
#[command(name = "site-mapper")]
#[command(version)]
#[command(about = "A concurrent same-domain site crawler", long_about = None)]
struct Cli {
    /// Path to an optional TOML configuration file
    #[arg(short, long, value_name = "CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose", global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Crawl a site and write its site map to a file
    Crawl {
        /// Seed address of the site to map
        #[arg(long, default_value = "https://digitalocean.com")]
        site: String,

        /// Number of concurrent workers [default: available parallelism]
        #[arg(long)]
        workers: Option<usize>,

        /// File to write the site map to
        #[arg(long, default_value = "sitemap.json")]
        file: PathBuf,

        /// Output format (json or markdown)
        #[arg(long, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
    },

    /// Serve the site mapper over HTTP
    Serve {
        /// Port to serve the API on
        #[arg(long)]
        port: Option<u16>,

        /// Directory of static files to serve
        #[arg(long, value_name = "DIR")]
        static_dir: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let mut config = load_config_or_default(cli.config.as_deref()).with_context(|| {
        format!(
            "failed to load configuration from {}",
            cli.config
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_default()
        )
    })?;

    match cli.command {
        Command::Crawl {
            site,
            workers,
            file,
            format,
        } => {
            if let Some(workers) = workers {
                check_worker_limit(workers).context("invalid --workers")?;
                config.crawler.workers = workers;
            }
            handle_crawl(&site, config, file, format, cli.quiet).await
        }
        Command::Serve { port, static_dir } => {
            if let Some(port) = port {
                config.server.port = port;
            }
            if static_dir.is_some() {
                config.server.static_dir = static_dir;
            }
            handle_serve(config).await
        }
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("site_mapper=info,warn"),
            1 => EnvFilter::new("site_mapper=debug,info"),
            2 => EnvFilter::new("site_mapper=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the crawl command: maps the site and writes the result
async fn handle_crawl(
    site: &str,
    config: Config,
    file: PathBuf,
    format: OutputFormat,
    quiet: bool,
) -> Result<()> {
    let site_map = match create_site_map_with_config(site, &config).await {
        Ok(site_map) => site_map,
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            return Err(e.into());
        }
    };

    write_site_map(&site_map, &file, format)
        .with_context(|| format!("failed to write site map to {}", file.display()))?;

    if !quiet {
        print_statistics(&SiteMapStatistics::from_site_map(&site_map));
        println!("\n✓ Site map written to: {}", file.display());
    }

    Ok(())
}

/// Handles the serve command: runs the HTTP adapter until interrupted
async fn handle_serve(config: Config) -> Result<()> {
    validate(&config).context("invalid server configuration")?;
    site_mapper::server::serve(config).await?;
    Ok(())
}
