//! Run summary aggregation and reporting.

use std::time::{Duration, Instant};

use crate::download::{TaskOutcome, TaskStatus};

/// A task that ended in failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedTask {
    pub url: String,
    pub error: String,
}

/// Overall result of a run, from the caller's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    /// No task failed (including runs with nothing to do).
    Success,
    /// Some, but not all, tasks failed.
    PartialFailure,
    /// Every task failed.
    Failure,
}

/// Aggregate statistics for one run.
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Number of tasks planned.
    pub total: usize,
    /// Tasks transferred during this run.
    pub completed: usize,
    /// Tasks whose destination already existed.
    pub skipped: usize,
    /// Failed tasks, in the order they were observed.
    pub failed: Vec<FailedTask>,
    /// Bytes written by completed tasks.
    pub total_bytes: u64,
    /// Wall-clock time of the run.
    pub elapsed: Duration,
}

impl RunSummary {
    /// Aggregates a finished set of outcomes.
    ///
    /// No run start is known here, so `elapsed` is near zero. Use
    /// [`from_outcomes_since`](Self::from_outcomes_since) or create a
    /// [`RunSummaryBuilder`] before executing when timing matters.
    #[must_use]
    pub fn from_outcomes(outcomes: &[TaskOutcome]) -> Self {
        Self::from_outcomes_since(outcomes, Instant::now())
    }

    /// Aggregates outcomes of a run that started at `started`.
    #[must_use]
    pub fn from_outcomes_since(outcomes: &[TaskOutcome], started: Instant) -> Self {
        let mut builder = RunSummaryBuilder::starting_at(outcomes.len(), started);
        builder.record_all(outcomes);
        builder.build()
    }

    /// Files present at the end of the run (completed + skipped).
    #[must_use]
    pub const fn successful(&self) -> usize {
        self.completed + self.skipped
    }

    #[must_use]
    pub fn status(&self) -> RunStatus {
        if self.failed.is_empty() {
            RunStatus::Success
        } else if self.failed.len() >= self.total {
            RunStatus::Failure
        } else {
            RunStatus::PartialFailure
        }
    }

    /// Average transfer rate in bytes per second.
    #[must_use]
    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    pub fn average_speed(&self) -> u64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            (self.total_bytes as f64 / secs) as u64
        } else {
            0
        }
    }

    /// Emits the final report through the logger.
    pub fn log_report(&self) {
        log::info!(
            "Download completed! Successfully downloaded: {}/{}",
            self.successful(),
            self.total
        );

        if self.failed.is_empty() {
            log::info!("All downloads completed successfully!");
        } else {
            log::error!("Failed downloads: {}", self.failed.len());
            for failed in &self.failed {
                log::error!("  - {}: {}", failed.url, failed.error);
            }
        }
    }
}

/// Builder for accumulating a [`RunSummary`] while outcomes arrive.
pub struct RunSummaryBuilder {
    total: usize,
    completed: usize,
    skipped: usize,
    failed: Vec<FailedTask>,
    total_bytes: u64,
    start_time: Instant,
}

impl RunSummaryBuilder {
    /// Starts timing a run of `total` planned tasks.
    #[must_use]
    pub fn new(total: usize) -> Self {
        Self::starting_at(total, Instant::now())
    }

    /// Like [`new`](Self::new), for a run that started earlier.
    #[must_use]
    pub const fn starting_at(total: usize, start_time: Instant) -> Self {
        Self {
            total,
            completed: 0,
            skipped: 0,
            failed: Vec::new(),
            total_bytes: 0,
            start_time,
        }
    }

    /// Records one terminal outcome.
    pub fn record(&mut self, outcome: &TaskOutcome) {
        match &outcome.status {
            TaskStatus::Completed { bytes } => {
                self.completed += 1;
                self.total_bytes += bytes;
            }
            TaskStatus::SkippedExisting => self.skipped += 1,
            TaskStatus::Failed { error } => self.failed.push(FailedTask {
                url: outcome.task.url.clone(),
                error: error.clone(),
            }),
        }
    }

    /// Records a batch of outcomes.
    pub fn record_all(&mut self, outcomes: &[TaskOutcome]) {
        for outcome in outcomes {
            self.record(outcome);
        }
    }

    /// Builds the final summary.
    #[must_use]
    pub fn build(self) -> RunSummary {
        RunSummary {
            total: self.total,
            completed: self.completed,
            skipped: self.skipped,
            failed: self.failed,
            total_bytes: self.total_bytes,
            elapsed: self.start_time.elapsed(),
        }
    }
}
