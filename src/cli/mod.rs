//! CLI mode for shift-dl.

mod args;
mod progress;

use std::sync::Arc;

pub use args::Args;

use crate::{
    AppConfig, DownloadConfig, DownloadProgress, Downloader, HttpFetcher, ProgressCounter,
    RunStatus, RunSummaryBuilder, build_http_client, build_tasks,
};

use progress::{IndicatifProgress, print_summary, print_task_list};

/// Exit status for a finished run. Usage errors exit with clap's own code 2.
#[must_use]
pub const fn exit_code(status: RunStatus) -> u8 {
    match status {
        RunStatus::Success => 0,
        RunStatus::PartialFailure => 3,
        RunStatus::Failure => 4,
    }
}

/// Exit status for errors raised before any download starts.
pub const CONFIGURATION_EXIT_CODE: u8 = 1;

fn print_banner() {
    println!(
        "Welcome to the SHIFT Dataset download tool!\n\
         By continuing you confirm that you have agreed to the SHIFT's user license.\n"
    );
}

/// Merges the config file with command-line overrides.
fn download_config(args: &Args) -> crate::Result<DownloadConfig> {
    let mut config = AppConfig::load(args.config.as_deref())?.download;
    if let Some(threads) = args.threads {
        config = config.with_concurrent_files(usize::from(threads));
    }
    if let Some(ref base_url) = args.base_url {
        config = config.with_base_url(base_url.clone());
    }
    if args.timeout.is_some() {
        config = config.with_timeout_secs(args.timeout);
    }
    Ok(config)
}

/// Runs a download session for the given arguments.
///
/// # Errors
///
/// Returns an error if configuration fails (unreadable config file or an
/// axis with nothing selected). Per-file failures are reported in the
/// returned status instead.
pub async fn run(args: Args) -> crate::Result<RunStatus> {
    print_banner();

    let config = download_config(&args)?;
    let facets = args.facets().resolve()?;

    log::info!("Number of files to download: {}", facets.combinations());
    log::info!("Using {} concurrent threads", config.concurrent_files);
    if facets.includes_point_cloud() {
        log::warn!(
            "LiDAR data is only available for 'center' view. LiDAR downloads will be limited to center view only."
        );
    }

    let tasks = build_tasks(&facets, args.shift, &config.base_url, &args.out_dir);

    if args.dry_run {
        print_task_list(&tasks);
        return Ok(RunStatus::Success);
    }

    let http = build_http_client()?;
    let downloader = Downloader::new(HttpFetcher::new(http), config);

    let reporter = Arc::new(IndicatifProgress::new(tasks.len()));
    let progress: Arc<dyn DownloadProgress> = reporter.clone();
    let counter = ProgressCounter::new();
    let mut builder = RunSummaryBuilder::new(tasks.len());

    let outcomes = downloader
        .execute_with_counter(tasks, &progress, &counter)
        .await;
    reporter.finish();

    builder.record_all(&outcomes);
    let summary = builder.build();
    log::debug!("{} task(s) reached a completed state", counter.get());

    summary.log_report();
    print_summary(&summary);

    Ok(summary.status())
}
