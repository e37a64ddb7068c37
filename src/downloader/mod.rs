//! Stage two: the batch downloader
//!
//! Reads the metadata CSV written by stage one, plans one task per
//! (dataset, download URL) pair, applies the skip-if-exists pre-check, and
//! streams each remaining file to disk under `<root>/<sanitized name>/`.

mod batch;
mod planner;
mod task;

pub use batch::run_batch;
pub use planner::{filename_from_url, mark_existing, plan_downloads};
pub use task::{DownloadTask, TaskState};

use crate::config::Config;
use crate::crawler::build_http_client;
use crate::output::DownloadStats;
use crate::table::read_metadata;
use crate::Result;
use std::path::Path;

/// Runs a complete stage two batch: read table, plan, pre-check, download
///
/// # Arguments
///
/// * `config` - Shared configuration (HTTP policy)
/// * `metadata_csv` - Path to stage one's output table
/// * `download_dir` - Destination root, created if absent
///
/// # Returns
///
/// * `Ok(DownloadStats)` - Per-task outcomes; individual failures are
///   counted here, never returned as errors
/// * `Err(HarvestError)` - Startup failure (unreadable table, client build,
///   unwritable destination root)
pub async fn download_all(
    config: &Config,
    metadata_csv: &Path,
    download_dir: &Path,
) -> Result<DownloadStats> {
    let records = read_metadata(metadata_csv)?;
    tracing::info!(
        "Loaded {} dataset records from {}",
        records.len(),
        metadata_csv.display()
    );

    std::fs::create_dir_all(download_dir)?;

    let mut tasks = plan_downloads(&records, download_dir);
    let pre_skipped = mark_existing(&mut tasks);
    tracing::info!(
        "Planned {} downloads ({} already present)",
        tasks.len(),
        pre_skipped
    );

    let client = build_http_client(&config.http, config.http.download_timeout_secs)?;
    let stats = run_batch(&client, &config.http, &mut tasks).await;

    Ok(stats)
}
