//! Download planning
//!
//! Turns the metadata table into download tasks and applies the
//! skip-if-exists pre-check as an explicit planning step, so idempotent
//! re-runs are a property of the plan rather than a side effect of the
//! download loop.

use crate::downloader::task::DownloadTask;
use crate::record::DatasetRecord;
use crate::sanitize::sanitize_name;
use std::collections::HashSet;
use std::path::Path;
use url::Url;

/// Fallback filename when a download URL has no usable path segment
const FALLBACK_FILENAME: &str = "download.zip";

/// Derives the destination filename from a download URL
///
/// Takes the final path segment with the query stripped; URLs ending in `/`
/// or otherwise lacking a segment fall back to a fixed name.
pub fn filename_from_url(url: &str) -> String {
    let Ok(parsed) = Url::parse(url) else {
        return FALLBACK_FILENAME.to_string();
    };

    parsed
        .path_segments()
        .and_then(|segments| segments.last())
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| FALLBACK_FILENAME.to_string())
}

/// Appends a numeric suffix to a filename until it is unused
///
/// Different URLs of one dataset can share a final path segment; each must
/// still land in its own file (one file per planned URL).
fn disambiguate(filename: &str, used: &HashSet<String>) -> String {
    if !used.contains(filename) {
        return filename.to_string();
    }

    let (stem, ext) = match filename.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => (stem, Some(ext)),
        _ => (filename, None),
    };

    for n in 2u32.. {
        let candidate = match ext {
            Some(ext) => format!("{}-{}.{}", stem, n, ext),
            None => format!("{}-{}", stem, n),
        };
        if !used.contains(&candidate) {
            return candidate;
        }
    }

    unreachable!("finite set of used filenames")
}

/// Builds one task per (record, download URL) pair
///
/// Records without any download URL are logged and produce no tasks.
pub fn plan_downloads(records: &[DatasetRecord], root: &Path) -> Vec<DownloadTask> {
    let mut tasks = Vec::new();

    for record in records {
        if record.download_urls.is_empty() {
            tracing::warn!(
                "No download link recorded for '{}' ({}), skipping",
                record.name,
                record.url
            );
            continue;
        }

        let dir = root.join(sanitize_name(&record.name));
        let mut used = HashSet::new();
        for url in &record.download_urls {
            let filename = disambiguate(&filename_from_url(url), &used);
            used.insert(filename.clone());
            let dest = dir.join(filename);
            tasks.push(DownloadTask::new(record.name.clone(), url.clone(), dest));
        }
    }

    tasks
}

/// Marks tasks whose destination file already exists as skipped
///
/// Returns the number of tasks skipped.
pub fn mark_existing(tasks: &mut [DownloadTask]) -> usize {
    let mut skipped = 0;

    for task in tasks.iter_mut() {
        if task.is_pending() && task.dest.exists() {
            tracing::info!(
                "File already exists at {}, skipping download",
                task.dest.display()
            );
            task.skip();
            skipped += 1;
        }
    }

    skipped
}
