//! Download task construction from resolved facets.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::catalog::{POINT_CLOUD_GROUP, POINT_CLOUD_VIEW, ResolvedFacets};
use crate::location::locate;
use crate::shift::ShiftMode;

/// Human-readable labels describing a task, for logs and reports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskMetadata {
    pub shift: String,
    pub frame_rate: &'static str,
    pub split: &'static str,
    pub view: &'static str,
    pub group: &'static str,
}

impl fmt::Display for TaskMetadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Shift: {}, Framerate: {}, Split: {}, View: {}, Data group: {}",
            self.shift, self.frame_rate, self.split, self.view, self.group
        )
    }
}

/// One URL to fetch into one destination file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadTask {
    pub url: String,
    /// Absolute or root-relative destination; unique within a run.
    pub destination: PathBuf,
    pub metadata: TaskMetadata,
}

impl DownloadTask {
    /// Final path component of the URL, used to label progress output.
    #[must_use]
    pub fn file_name(&self) -> &str {
        self.url.rsplit('/').next().unwrap_or(&self.url)
    }
}

/// Builds the flat task list for a run.
///
/// Iterates frame rate, split, view, then group (innermost). Point-cloud
/// combinations for any view other than the center view are skipped.
#[must_use]
pub fn build_tasks(
    facets: &ResolvedFacets,
    shift: ShiftMode,
    base_url: &str,
    root: &Path,
) -> Vec<DownloadTask> {
    let shift_label = shift.to_string();
    let mut tasks = Vec::with_capacity(facets.combinations());

    for rate in &facets.frame_rates {
        for split in &facets.splits {
            for view in &facets.views {
                for group in &facets.groups {
                    if group.token == POINT_CLOUD_GROUP && view.token != POINT_CLOUD_VIEW {
                        log::debug!(
                            "Skipping LiDAR data for {} view (only available for center view)",
                            view.label
                        );
                        continue;
                    }

                    let location = locate(base_url, shift, rate, split, view, group);
                    tasks.push(DownloadTask {
                        url: location.url,
                        destination: root.join(location.relative_path),
                        metadata: TaskMetadata {
                            shift: shift_label.clone(),
                            frame_rate: rate.label,
                            split: split.label,
                            view: view.label,
                            group: group.label,
                        },
                    });
                }
            }
        }
    }

    tasks
}
