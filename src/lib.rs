//! shift-dl - A library for bulk-downloading the SHIFT dataset.
//!
//! The dataset is published as one file per combination of frame rate,
//! split, camera view, and data group, under a discrete or continuous
//! domain-shift family. This crate resolves a facet selection to download
//! tasks and runs them concurrently, skipping files that already exist.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use std::sync::Arc;
//! use std::time::Instant;
//!
//! use shift_dl::{
//!     DownloadConfig, DownloadProgress, Downloader, FacetSelection, HttpFetcher, NoProgress,
//!     RunSummary, Selection, ShiftMode, build_http_client, build_tasks,
//! };
//!
//! # async fn example() -> shift_dl::Result<()> {
//! let selection = FacetSelection {
//!     frame_rates: "[images]".parse()?,
//!     splits: "[val]".parse()?,
//!     views: Selection::All,
//!     groups: "[img, det_2d]".parse()?,
//! };
//! let facets = selection.resolve()?;
//!
//! let config = DownloadConfig::default();
//! let tasks = build_tasks(&facets, ShiftMode::Discrete, &config.base_url, Path::new("shift"));
//!
//! let downloader = Downloader::new(HttpFetcher::new(build_http_client()?), config);
//! let progress: Arc<dyn DownloadProgress> = Arc::new(NoProgress);
//! let started = Instant::now();
//! let outcomes = downloader.execute(tasks, &progress).await;
//!
//! let summary = RunSummary::from_outcomes_since(&outcomes, started);
//! println!("{}/{} files present", summary.successful(), summary.total);
//! # Ok(())
//! # }
//! ```

#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

pub mod catalog;
pub mod config;
pub mod download;
pub mod error;
pub mod fetch;
pub mod fs;
pub mod location;
pub mod shift;
pub mod stats;
pub mod task;

#[cfg(feature = "cli")]
pub mod cli;

// Re-export main types for convenience
pub use catalog::{DataGroup, Facet, FacetSelection, FacetValue, ResolvedFacets, Selection};
pub use config::{AppConfig, DownloadConfig};
pub use download::{
    DownloadProgress, Downloader, NoProgress, ProgressCounter, TaskOutcome, TaskStatus,
};
pub use error::{Error, Result};
pub use fetch::{Fetcher, HttpFetcher, build_http_client};
pub use fs::{FileSystem, TokioFileSystem};
pub use location::{DEFAULT_BASE_URL, Location, locate};
pub use shift::{ShiftLength, ShiftMode};
pub use stats::{FailedTask, RunStatus, RunSummary, RunSummaryBuilder};
pub use task::{DownloadTask, TaskMetadata, build_tasks};
