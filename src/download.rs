//! Concurrent download execution.

use std::panic::AssertUnwindSafe;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use futures::{FutureExt, StreamExt, stream};

use crate::config::DownloadConfig;
use crate::error::{Error, Result};
use crate::fetch::Fetcher;
use crate::fs::{FileSystem, TokioFileSystem, temp_path_for};
use crate::task::DownloadTask;

/// Terminal state of one task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskStatus {
    /// Transferred and moved into place.
    Completed {
        /// Bytes written.
        bytes: u64,
    },
    /// The destination already existed; nothing was fetched.
    SkippedExisting,
    /// The transfer or a file operation failed.
    Failed {
        /// Rendered error.
        error: String,
    },
}

/// A task paired with how it ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskOutcome {
    pub task: DownloadTask,
    pub status: TaskStatus,
}

/// Receives download progress updates. All methods default to no-ops and
/// must not influence control flow.
pub trait DownloadProgress: Send + Sync {
    /// Called when a transfer starts (not for skipped files).
    fn on_task_start(&self, _task: &DownloadTask) {}

    /// Called as bytes arrive.
    fn on_bytes(&self, _task: &DownloadTask, _so_far: u64, _total: Option<u64>) {}

    /// Called once per task when it reaches a terminal state.
    fn on_task_finish(&self, _outcome: &TaskOutcome) {}
}

/// A null progress implementation that ignores all events.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl DownloadProgress for NoProgress {}

/// Number of tasks that ended with their file present on disk.
///
/// Shared by every worker of a run. Only completed and skipped tasks
/// increment it; the value never decreases.
#[derive(Debug, Default)]
pub struct ProgressCounter(AtomicUsize);

impl ProgressCounter {
    #[must_use]
    pub const fn new() -> Self {
        Self(AtomicUsize::new(0))
    }

    /// Increments and returns the new value.
    pub fn increment(&self) -> usize {
        self.0.fetch_add(1, Ordering::AcqRel) + 1
    }

    #[must_use]
    pub fn get(&self) -> usize {
        self.0.load(Ordering::Acquire)
    }
}

/// Runs download tasks with bounded concurrency.
pub struct Downloader<F: Fetcher, S: FileSystem = TokioFileSystem> {
    fetcher: F,
    config: DownloadConfig,
    fs: S,
}

impl<F: Fetcher> Downloader<F, TokioFileSystem> {
    /// Creates a new downloader with the default file system.
    #[must_use]
    pub const fn new(fetcher: F, config: DownloadConfig) -> Self {
        Self {
            fetcher,
            config,
            fs: TokioFileSystem,
        }
    }
}

impl<F: Fetcher, S: FileSystem> Downloader<F, S> {
    /// Creates a new downloader with a custom file system implementation.
    #[must_use]
    pub const fn with_fs(fetcher: F, config: DownloadConfig, fs: S) -> Self {
        Self { fetcher, config, fs }
    }

    /// Returns a reference to the download configuration.
    #[must_use]
    pub const fn config(&self) -> &DownloadConfig {
        &self.config
    }

    /// Executes every task once and returns one outcome per task, in
    /// completion order.
    pub async fn execute(
        &self,
        tasks: Vec<DownloadTask>,
        progress: &Arc<dyn DownloadProgress>,
    ) -> Vec<TaskOutcome> {
        self.execute_with_counter(tasks, progress, &ProgressCounter::new())
            .await
    }

    /// Like [`execute`](Self::execute), but accounts into a caller-owned counter.
    ///
    /// At most `concurrent_files` tasks are in flight at once. Tasks start in
    /// submission order. A failing (or panicking) task never affects others;
    /// a panic inside a transfer also removes that task's temp file.
    pub async fn execute_with_counter(
        &self,
        tasks: Vec<DownloadTask>,
        progress: &Arc<dyn DownloadProgress>,
        counter: &ProgressCounter,
    ) -> Vec<TaskOutcome> {
        let limit = self.config.concurrent_files.max(1);

        stream::iter(tasks)
            .map(|task| async move {
                let status = AssertUnwindSafe(self.run_task(&task, progress, counter))
                    .catch_unwind()
                    .await
                    .unwrap_or_else(|_| {
                        log::error!("Worker panicked while downloading {}", task.url);
                        TaskStatus::Failed {
                            error: "download worker panicked".to_string(),
                        }
                    });
                let outcome = TaskOutcome { task, status };
                progress.on_task_finish(&outcome);
                outcome
            })
            .buffer_unordered(limit)
            .collect()
            .await
    }

    /// Drives one task to a terminal state.
    async fn run_task(
        &self,
        task: &DownloadTask,
        progress: &Arc<dyn DownloadProgress>,
        counter: &ProgressCounter,
    ) -> TaskStatus {
        if self.fs.file_exists(&task.destination).await {
            let done = counter.increment();
            log::warn!(
                "Skipping download of existing file ({done} completed): {}",
                task.destination.display()
            );
            return TaskStatus::SkippedExisting;
        }

        match self.download_file(task, progress).await {
            Ok(bytes) => {
                let done = counter.increment();
                log::info!(
                    "Successfully downloaded ({done} completed): {}",
                    task.file_name()
                );
                TaskStatus::Completed { bytes }
            }
            Err(e) => {
                log::error!("Error downloading {}: {e}", task.url);
                TaskStatus::Failed {
                    error: e.to_string(),
                }
            }
        }
    }

    /// Ensures the parent directory exists for a file path.
    async fn ensure_parent_dir(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            self.fs.create_dir_all(parent).await?;
        }
        Ok(())
    }

    /// Downloads one file with atomic temp-file semantics.
    ///
    /// Bytes go to a uniquely named file beside the destination, which is
    /// renamed into place only after the transfer finishes. On any error the
    /// temp file is removed, so the destination never holds partial data.
    async fn download_file(
        &self,
        task: &DownloadTask,
        progress: &Arc<dyn DownloadProgress>,
    ) -> Result<u64> {
        log::info!("Starting download: {}", task.url);
        log::info!("Downloading - {}.", task.metadata);

        self.ensure_parent_dir(&task.destination).await?;
        progress.on_task_start(task);

        let tmp = temp_path_for(&task.destination);
        let result = AssertUnwindSafe(self.transfer_into(task, &tmp, progress))
            .catch_unwind()
            .await
            .unwrap_or_else(|_| {
                Err(Error::Panicked {
                    url: task.url.clone(),
                })
            });

        if result.is_err() {
            // May not exist if the fetch failed before creating it.
            let _ = self.fs.remove_file(&tmp).await;
        }
        result
    }

    /// Fetches into `tmp` under the optional timeout, then renames into place.
    async fn transfer_into(
        &self,
        task: &DownloadTask,
        tmp: &Path,
        progress: &Arc<dyn DownloadProgress>,
    ) -> Result<u64> {
        let on_bytes = |so_far: u64, total: Option<u64>| progress.on_bytes(task, so_far, total);

        let transfer = self.fetcher.fetch(&task.url, tmp, &on_bytes);
        let bytes = match self.config.timeout() {
            Some(limit) => tokio::time::timeout(limit, transfer)
                .await
                .map_err(|_| Error::Timeout {
                    url: task.url.clone(),
                    seconds: limit.as_secs(),
                })??,
            None => transfer.await?,
        };

        self.fs.rename_file(tmp, &task.destination).await?;
        Ok(bytes)
    }
}
