//! harvest-fetch: stage two entry point
//!
//! Reads the metadata CSV written by harvest-crawl and downloads every
//! referenced file into a per-dataset directory tree. Per-file failures are
//! logged and counted; the process exits non-zero only for startup errors
//! (missing or malformed CSV, unwritable destination).

use clap::Parser;
use dataset_harvest::config::{load_config_or_default, load_config_with_hash};
use dataset_harvest::downloader::download_all;
use dataset_harvest::logging::setup_logging;
use dataset_harvest::output::print_download_stats;
use std::path::PathBuf;

/// Harvest-Fetch: batch dataset downloader
///
/// Downloads every file referenced by the metadata CSV into
/// `<download-dir>/<dataset>/<filename>`, skipping files already present.
#[derive(Parser, Debug)]
#[command(name = "harvest-fetch")]
#[command(version = "1.0.0")]
#[command(about = "Download dataset files listed in a metadata CSV", long_about = None)]
struct Cli {
    /// Path to the metadata CSV produced by harvest-crawl
    #[arg(long, alias = "metadata_csv", value_name = "PATH")]
    metadata_csv: PathBuf,

    /// Destination root directory, created if absent
    #[arg(long, alias = "download_dir", value_name = "PATH", default_value = "./datasets")]
    download_dir: PathBuf,

    /// Path to TOML configuration file (built-in defaults when omitted)
    #[arg(long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
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
        None => load_config_or_default(None)?,
    };

    tracing::info!(
        "Starting dataset download to: {}",
        cli.download_dir.display()
    );

    let stats = download_all(&config, &cli.metadata_csv, &cli.download_dir).await?;

    print_download_stats(&stats);

    if stats.failed > 0 {
        tracing::warn!(
            "{} download(s) failed; see the log above for dataset names and URLs",
            stats.failed
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kebab_case_flags_parse() {
        let cli = Cli::try_parse_from([
            "harvest-fetch",
            "--metadata-csv",
            "meta.csv",
            "--download-dir",
            "out",
        ])
        .unwrap();
        assert_eq!(cli.metadata_csv, PathBuf::from("meta.csv"));
        assert_eq!(cli.download_dir, PathBuf::from("out"));
    }

    #[test]
    fn test_underscore_flag_spellings_accepted() {
        // Both spellings must work; scripts written against the original
        // downloader CLI use underscores
        let cli = Cli::try_parse_from([
            "harvest-fetch",
            "--metadata_csv",
            "meta.csv",
            "--download_dir",
            "out",
        ])
        .unwrap();
        assert_eq!(cli.metadata_csv, PathBuf::from("meta.csv"));
        assert_eq!(cli.download_dir, PathBuf::from("out"));
    }

    #[test]
    fn test_metadata_csv_is_required() {
        assert!(Cli::try_parse_from(["harvest-fetch"]).is_err());
    }
}
