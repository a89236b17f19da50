//! Progress bars and summary reporting for CLI downloads.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;

use console::style;
use indicatif::{HumanBytes, HumanDuration, MultiProgress, ProgressBar, ProgressStyle};

use crate::{DownloadProgress, DownloadTask, RunSummary, TaskOutcome, TaskStatus};

const SEPARATOR: &str = "────────────────────────────────────────────────────────────";

/// Creates a progress bar for a single file download.
pub fn make_progress_bar(name: &str) -> ProgressBar {
    let bar = ProgressBar::new(0);
    bar.set_style(
        ProgressStyle::with_template(
            "{spinner:.cyan} [{bar:40.cyan/blue}] {bytes}/{total_bytes} @ {bytes_per_sec} - {msg}",
        )
        .expect("progress template is valid")
        .progress_chars("━━╌"),
    );
    bar.set_message(name.to_string());
    bar
}

/// Creates a progress bar counting finished tasks.
pub fn make_total_progress_bar(tasks: usize) -> ProgressBar {
    let bar = ProgressBar::new(tasks as u64);
    bar.set_style(
        ProgressStyle::with_template("Files [{bar:40.green/white}] {pos}/{len} ({elapsed})")
            .expect("template valid")
            .progress_chars("━━╌"),
    );
    bar
}

/// [`DownloadProgress`] backed by indicatif bars.
pub struct IndicatifProgress {
    multi: MultiProgress,
    total: ProgressBar,
    bars: Mutex<HashMap<PathBuf, ProgressBar>>,
}

impl IndicatifProgress {
    pub fn new(tasks: usize) -> Self {
        let multi = MultiProgress::new();
        let total = multi.add(make_total_progress_bar(tasks));
        total.enable_steady_tick(Duration::from_millis(250));
        Self {
            multi,
            total,
            bars: Mutex::new(HashMap::new()),
        }
    }

    /// Clears every bar from the terminal.
    pub fn finish(&self) {
        self.total.finish_and_clear();
        self.multi.clear().ok();
    }
}

impl DownloadProgress for IndicatifProgress {
    fn on_task_start(&self, task: &DownloadTask) {
        let bar = self
            .multi
            .insert_before(&self.total, make_progress_bar(task.file_name()));
        bar.enable_steady_tick(Duration::from_millis(250));
        if let Ok(mut bars) = self.bars.lock() {
            bars.insert(task.destination.clone(), bar);
        }
    }

    fn on_bytes(&self, task: &DownloadTask, so_far: u64, total: Option<u64>) {
        if let Ok(bars) = self.bars.lock()
            && let Some(bar) = bars.get(&task.destination)
        {
            if let Some(total) = total {
                bar.set_length(total);
            }
            bar.set_position(so_far);
        }
    }

    fn on_task_finish(&self, outcome: &TaskOutcome) {
        let bar = self
            .bars
            .lock()
            .ok()
            .and_then(|mut bars| bars.remove(&outcome.task.destination));
        if let Some(bar) = bar {
            match outcome.status {
                TaskStatus::Failed { .. } => bar.abandon(),
                _ => bar.finish_and_clear(),
            }
        }
        self.total.inc(1);
    }
}

/// Prints the planned tasks without downloading anything.
pub fn print_task_list(tasks: &[DownloadTask]) {
    if tasks.is_empty() {
        println!("No files selected.");
        return;
    }

    println!("\n{SEPARATOR}");
    println!("Files to download:");
    println!("{SEPARATOR}");

    for task in tasks {
        println!("  {}", task.url);
        println!("    -> {}", task.destination.display());
    }

    println!("{SEPARATOR}");
    println!("  {} file(s)", tasks.len());
    println!("{SEPARATOR}\n");
}

/// Prints a summary of the run.
pub fn print_summary(summary: &RunSummary) {
    println!("\n{SEPARATOR}");
    println!("Download Summary");
    println!("{SEPARATOR}");

    println!("  Files planned:     {}", summary.total);
    if summary.completed > 0 {
        println!("  Files downloaded:  {}", summary.completed);
        println!("  Total size:        {}", HumanBytes(summary.total_bytes));
        println!("  Average speed:     {}/s", HumanBytes(summary.average_speed()));
    }
    if summary.skipped > 0 {
        println!("  Files skipped:     {}", summary.skipped);
    }
    println!("  Total time:        {}", HumanDuration(summary.elapsed));

    if summary.failed.is_empty() {
        println!("  {}", style("All files present.").green());
    } else {
        println!(
            "  {}",
            style(format!("{} file(s) failed:", summary.failed.len())).red().bold()
        );
        for failed in &summary.failed {
            println!("    {} ({})", failed.url, style(&failed.error).dim());
        }
    }

    println!("{SEPARATOR}");
}
