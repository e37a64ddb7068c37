//! Batch download loop - the stage two main loop
//!
//! Processes the planned tasks strictly sequentially: create the per-dataset
//! directory, fetch with bounded retry, stream the body to disk. A failed
//! task is logged with its dataset name and URL and never aborts the batch.

use crate::config::HttpConfig;
use crate::crawler::{backoff_delay, is_retryable_error, is_retryable_status};
use crate::downloader::task::{DownloadTask, TaskState};
use crate::output::DownloadStats;
use reqwest::Client;
use std::path::Path;
use std::time::Duration;
use tokio::io::AsyncWriteExt;

/// Outcome of one download attempt, used to drive the retry loop
enum AttemptError {
    Permanent(String),
    Transient(String),
}

/// Removes a partially written file so a later re-run does not mistake it
/// for a finished download
async fn remove_partial(dest: &Path) {
    if let Err(e) = tokio::fs::remove_file(dest).await {
        tracing::debug!("Could not remove partial file {}: {}", dest.display(), e);
    }
}

/// Streams one URL to the given path
///
/// The destination directory must already exist. A partially written file is
/// removed on error so a later re-run does not mistake it for a finished
/// download.
async fn stream_to_file(client: &Client, url: &str, dest: &Path) -> Result<(), AttemptError> {
    let response = client.get(url).send().await.map_err(|e| {
        if is_retryable_error(&e) {
            AttemptError::Transient(e.to_string())
        } else {
            AttemptError::Permanent(e.to_string())
        }
    })?;

    let status = response.status().as_u16();
    if !(200..300).contains(&status) {
        let message = format!("HTTP status {}", status);
        return Err(if is_retryable_status(status) {
            AttemptError::Transient(message)
        } else {
            AttemptError::Permanent(message)
        });
    }

    let mut file = tokio::fs::File::create(dest)
        .await
        .map_err(|e| AttemptError::Permanent(format!("cannot create file: {}", e)))?;

    let mut response = response;
    loop {
        match response.chunk().await {
            Ok(Some(chunk)) => {
                if let Err(e) = file.write_all(&chunk).await {
                    drop(file);
                    remove_partial(dest).await;
                    return Err(AttemptError::Permanent(format!("write failed: {}", e)));
                }
            }
            Ok(None) => break,
            Err(e) => {
                drop(file);
                remove_partial(dest).await;
                let message = format!("body read failed: {}", e);
                return Err(if is_retryable_error(&e) {
                    AttemptError::Transient(message)
                } else {
                    AttemptError::Permanent(message)
                });
            }
        }
    }

    if let Err(e) = file.flush().await {
        drop(file);
        remove_partial(dest).await;
        return Err(AttemptError::Permanent(format!("flush failed: {}", e)));
    }

    Ok(())
}

/// Downloads one task's file with bounded retry
async fn download_with_retry(
    client: &Client,
    config: &HttpConfig,
    task: &DownloadTask,
) -> Result<(), String> {
    let mut last_error = String::new();

    for attempt in 0..config.max_retries {
        if attempt > 0 {
            let delay = backoff_delay(config, attempt - 1);
            tracing::debug!(
                "Retrying download of {} (attempt {}) after {:?}",
                task.url,
                attempt + 1,
                delay
            );
            tokio::time::sleep(delay).await;
        }

        match stream_to_file(client, &task.url, &task.dest).await {
            Ok(()) => return Ok(()),
            Err(AttemptError::Permanent(message)) => return Err(message),
            Err(AttemptError::Transient(message)) => last_error = message,
        }
    }

    Err(format!("retries exhausted: {}", last_error))
}

/// Runs the batch over all planned tasks, sequentially
///
/// Tasks already marked skipped by the planner are counted but not touched.
/// Every remaining task ends in a terminal state; the returned stats sum to
/// the task count.
pub async fn run_batch(
    client: &Client,
    config: &HttpConfig,
    tasks: &mut [DownloadTask],
) -> DownloadStats {
    let mut stats = DownloadStats::default();
    let total = tasks.len();

    for (i, task) in tasks.iter_mut().enumerate() {
        if task.state() == TaskState::Skipped {
            stats.skipped += 1;
            continue;
        }

        tracing::info!("[{}/{}] Downloading '{}' from {}", i + 1, total, task.dataset, task.url);

        if let Some(parent) = task.dest.parent() {
            if let Err(e) = tokio::fs::create_dir_all(parent).await {
                tracing::error!(
                    "Cannot create directory for '{}' ({}): {}",
                    task.dataset,
                    parent.display(),
                    e
                );
                task.fail();
                stats.failed += 1;
                continue;
            }
        }

        match download_with_retry(client, config, task).await {
            Ok(()) => {
                tracing::info!("Saved to {}", task.dest.display());
                task.complete();
                stats.completed += 1;
            }
            Err(message) => {
                tracing::error!(
                    "Failed to download '{}' from {}: {}",
                    task.dataset,
                    task.url,
                    message
                );
                task.fail();
                stats.failed += 1;
            }
        }

        if config.politeness_delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(config.politeness_delay_ms)).await;
        }
    }

    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crawler::build_http_client;
    use tempfile::TempDir;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn fast_config() -> HttpConfig {
        HttpConfig {
            user_agent: "TestAgent/1.0".to_string(),
            request_timeout_secs: 5,
            download_timeout_secs: 5,
            max_retries: 3,
            retry_backoff_ms: 1,
            politeness_delay_ms: 0,
        }
    }

    #[tokio::test]
    async fn test_remove_partial_deletes_file() {
        let dir = TempDir::new().unwrap();
        let dest = dir.path().join("half.zip");
        std::fs::write(&dest, b"truncated").unwrap();

        remove_partial(&dest).await;
        assert!(!dest.exists());

        // Calling it on an already-absent path is harmless
        remove_partial(&dest).await;
    }

    #[tokio::test]
    async fn test_single_download_writes_file() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/files/iris.zip"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"zip bytes".to_vec()))
            .mount(&server)
            .await;

        let dir = TempDir::new().unwrap();
        let config = fast_config();
        let client = build_http_client(&config, 5).unwrap();
        let mut tasks = vec![DownloadTask::new(
            "Iris",
            format!("{}/files/iris.zip", server.uri()),
            dir.path().join("Iris/iris.zip"),
        )];

        let stats = run_batch(&client, &config, &mut tasks).await;

        assert_eq!(stats.completed, 1);
        assert_eq!(stats.failed, 0);
        assert_eq!(
            std::fs::read(dir.path().join("Iris/iris.zip")).unwrap(),
            b"zip bytes"
        );
    }

    #[tokio::test]
    async fn test_404_fails_task_but_not_batch() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/files/gone.zip"))
            .respond_with(ResponseTemplate::new(404))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/files/here.zip"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"ok".to_vec()))
            .mount(&server)
            .await;

        let dir = TempDir::new().unwrap();
        let config = fast_config();
        let client = build_http_client(&config, 5).unwrap();
        let mut tasks = vec![
            DownloadTask::new(
                "Gone",
                format!("{}/files/gone.zip", server.uri()),
                dir.path().join("Gone/gone.zip"),
            ),
            DownloadTask::new(
                "Here",
                format!("{}/files/here.zip", server.uri()),
                dir.path().join("Here/here.zip"),
            ),
        ];

        let stats = run_batch(&client, &config, &mut tasks).await;

        assert_eq!(stats.failed, 1);
        assert_eq!(stats.completed, 1);
        assert_eq!(tasks[0].state(), TaskState::Failed);
        assert_eq!(tasks[1].state(), TaskState::Completed);
        assert!(!dir.path().join("Gone/gone.zip").exists());
    }

    #[tokio::test]
    async fn test_5xx_then_success_retries() {
        let server = MockServer::start().await;
        // First attempt fails, second succeeds
        Mock::given(method("GET"))
            .and(path("/files/flaky.zip"))
            .respond_with(ResponseTemplate::new(503))
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/files/flaky.zip"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"finally".to_vec()))
            .mount(&server)
            .await;

        let dir = TempDir::new().unwrap();
        let config = fast_config();
        let client = build_http_client(&config, 5).unwrap();
        let mut tasks = vec![DownloadTask::new(
            "Flaky",
            format!("{}/files/flaky.zip", server.uri()),
            dir.path().join("Flaky/flaky.zip"),
        )];

        let stats = run_batch(&client, &config, &mut tasks).await;

        assert_eq!(stats.completed, 1);
        assert_eq!(
            std::fs::read(dir.path().join("Flaky/flaky.zip")).unwrap(),
            b"finally"
        );
    }

    #[tokio::test]
    async fn test_pre_skipped_tasks_are_not_fetched() {
        // No server mounted: any request would fail, proving none is made
        let config = fast_config();
        let client = build_http_client(&config, 5).unwrap();
        let dir = TempDir::new().unwrap();

        let mut tasks = vec![DownloadTask::new(
            "Done",
            "http://127.0.0.1:1/unreachable.zip",
            dir.path().join("Done/file.zip"),
        )];
        tasks[0].skip();

        let stats = run_batch(&client, &config, &mut tasks).await;
        assert_eq!(stats.skipped, 1);
        assert_eq!(stats.completed + stats.failed, 0);
    }
}
