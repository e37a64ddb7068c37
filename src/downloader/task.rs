//! Download tasks and their state machine
//!
//! One task pairs a dataset with one file URL and a destination path. Every
//! task starts `Pending` and ends in exactly one terminal state:
//!
//! ```text
//! Pending -> Completed   (file fetched and written)
//! Pending -> Skipped     (destination already exists)
//! Pending -> Failed      (permanent error or retries exhausted)
//! ```

use std::path::PathBuf;

/// Lifecycle state of a download task
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskState {
    Pending,
    Completed,
    Skipped,
    Failed,
}

/// One (dataset, file URL, destination) unit of work for stage two
#[derive(Debug, Clone)]
pub struct DownloadTask {
    /// Raw dataset name, for log messages
    pub dataset: String,

    /// The file URL to fetch
    pub url: String,

    /// Destination path: `<root>/<sanitized name>/<filename>`
    pub dest: PathBuf,

    state: TaskState,
}

impl DownloadTask {
    pub fn new(dataset: impl Into<String>, url: impl Into<String>, dest: PathBuf) -> Self {
        Self {
            dataset: dataset.into(),
            url: url.into(),
            dest,
            state: TaskState::Pending,
        }
    }

    pub fn state(&self) -> TaskState {
        self.state
    }

    pub fn is_pending(&self) -> bool {
        self.state == TaskState::Pending
    }

    /// Marks the task completed. Only valid from `Pending`.
    pub fn complete(&mut self) {
        debug_assert_eq!(self.state, TaskState::Pending);
        self.state = TaskState::Completed;
    }

    /// Marks the task skipped (destination already present). Only valid from `Pending`.
    pub fn skip(&mut self) {
        debug_assert_eq!(self.state, TaskState::Pending);
        self.state = TaskState::Skipped;
    }

    /// Marks the task failed. Only valid from `Pending`.
    pub fn fail(&mut self) {
        debug_assert_eq!(self.state, TaskState::Pending);
        self.state = TaskState::Failed;
    }
}
