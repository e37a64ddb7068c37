//! harvest-crawl: stage one entry point
//!
//! Walks the dataset index, extracts metadata for every dataset, and writes
//! the metadata CSV. Individual page failures are logged and skipped; the
//! process exits non-zero only for startup errors.

use clap::Parser;
use dataset_harvest::config::{load_config_or_default, load_config_with_hash, Config};
use dataset_harvest::crawler::crawl;
use dataset_harvest::logging::setup_logging;
use dataset_harvest::output::print_crawl_stats;
use dataset_harvest::table::write_metadata;
use std::path::{Path, PathBuf};

/// Harvest-Crawl: dataset index metadata crawler
///
/// Paginates the dataset listing, visits each dataset's detail page, and
/// writes one CSV row of metadata per dataset.
#[derive(Parser, Debug)]
#[command(name = "harvest-crawl")]
#[command(version = "1.0.0")]
#[command(about = "Crawl a dataset index into a metadata CSV", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (built-in defaults when omitted)
    #[arg(value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be crawled without fetching anything
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => {
            tracing::info!("No config given, using built-in defaults");
            load_config_or_default(None)?
        }
    };

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(());
    }

    handle_crawl(config).await
}

/// Handles the --dry-run mode: validates config and shows the crawl plan
fn handle_dry_run(config: &Config) {
    println!("=== Harvest-Crawl Dry Run ===\n");

    println!("Index:");
    println!("  Base URL: {}", config.index.base_url);
    println!("  Listing path: {}", config.index.listing_path);
    println!("  Page size: {}", config.index.page_size);
    println!("  Listing query: {}", config.index.listing_query);

    println!("\nHTTP:");
    println!("  User agent: {}", config.http.user_agent);
    println!("  Request timeout: {}s", config.http.request_timeout_secs);
    println!("  Max retries: {}", config.http.max_retries);
    println!("  Politeness delay: {}ms", config.http.politeness_delay_ms);

    println!("\nOutput:");
    println!("  Metadata CSV: {}", config.output.metadata_path);

    println!("\n✓ Configuration is valid");
}

/// Handles the main crawl operation
async fn handle_crawl(config: Config) -> anyhow::Result<()> {
    tracing::info!("Starting metadata crawl of {}", config.index.base_url);

    let metadata_path = config.output.metadata_path.clone();
    let (records, stats) = crawl(config).await?;

    if records.is_empty() {
        tracing::warn!("No records collected, metadata file not written");
        print_crawl_stats(&stats);
        return Ok(());
    }

    write_metadata(&records, Path::new(&metadata_path))?;
    tracing::info!(
        "Saved metadata for {} datasets to {}",
        records.len(),
        metadata_path
    );

    print_crawl_stats(&stats);
    Ok(())
}
