//! Remote URL and local path resolution for one facet combination.

use std::path::PathBuf;

use crate::catalog::{DataGroup, FacetValue, HIGH_FRAME_RATE, HIGH_RATE_RGB_EXTENSION, RGB_GROUP};
use crate::shift::ShiftMode;

/// Default public origin of the dataset.
pub const DEFAULT_BASE_URL: &str = "https://dl.cv.ethz.ch/shift/";

/// Where one resource lives remotely and where it goes locally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub url: String,
    /// Output path relative to the dataset root.
    pub relative_path: PathBuf,
}

/// File extension for a group at a given frame rate.
///
/// RGB images at the video rate are packed as `tar` rather than the
/// group's default archive.
#[must_use]
pub fn extension_for(frame_rate: &FacetValue, group: &DataGroup) -> &'static str {
    if frame_rate.token == HIGH_FRAME_RATE && group.token == RGB_GROUP {
        HIGH_RATE_RGB_EXTENSION
    } else {
        group.extension
    }
}

/// Resolves a facet combination to its URL and relative output path.
///
/// Segment order is `family / rate / [length] / split / view / group.ext`.
#[must_use]
pub fn locate(
    base_url: &str,
    shift: ShiftMode,
    frame_rate: &FacetValue,
    split: &FacetValue,
    view: &FacetValue,
    group: &DataGroup,
) -> Location {
    let file_name = format!("{}.{}", group.token, extension_for(frame_rate, group));

    let mut segments = vec![shift.family(), frame_rate.token];
    if let Some(length) = shift.length() {
        segments.push(length.as_str());
    }
    segments.extend([split.token, view.token, file_name.as_str()]);

    let url = format!("{}/{}", base_url.trim_end_matches('/'), segments.join("/"));
    let relative_path: PathBuf = segments.iter().collect();

    Location { url, relative_path }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{DATA_GROUPS, FRAME_RATES, SPLITS, VIEWS};
    use crate::shift::ShiftLength;

    fn pick<T: crate::catalog::Facet>(catalog: &[T], token: &str) -> T {
        *catalog.iter().find(|v| v.token() == token).unwrap()
    }

    #[test]
    fn discrete_image_location() {
        let loc = locate(
            DEFAULT_BASE_URL,
            ShiftMode::Discrete,
            &pick(FRAME_RATES, "images"),
            &pick(SPLITS, "val"),
            &pick(VIEWS, "front"),
            &pick(DATA_GROUPS, "img"),
        );
        assert_eq!(loc.url, "https://dl.cv.ethz.ch/shift/discrete/images/val/front/img.zip");
        assert_eq!(loc.relative_path, PathBuf::from("discrete/images/val/front/img.zip"));
    }

    #[test]
    fn continuous_inserts_length_after_rate() {
        let loc = locate(
            "http://mirror.local/data",
            ShiftMode::Continuous(ShiftLength::X10),
            &pick(FRAME_RATES, "images"),
            &pick(SPLITS, "train"),
            &pick(VIEWS, "left_45"),
            &pick(DATA_GROUPS, "det_2d"),
        );
        assert_eq!(loc.url, "http://mirror.local/data/continuous/images/10x/train/left_45/det_2d.json");
        assert_eq!(
            loc.relative_path,
            PathBuf::from("continuous/images/10x/train/left_45/det_2d.json")
        );
    }

    #[test]
    fn video_rgb_uses_tar() {
        let loc = locate(
            DEFAULT_BASE_URL,
            ShiftMode::Discrete,
            &pick(FRAME_RATES, "videos"),
            &pick(SPLITS, "test"),
            &pick(VIEWS, "front"),
            &pick(DATA_GROUPS, "img"),
        );
        assert!(loc.url.ends_with("/discrete/videos/test/front/img.tar"));
        assert_eq!(loc.relative_path.extension().unwrap(), "tar");
    }

    #[test]
    fn override_only_applies_to_rgb_at_video_rate() {
        let videos = pick(FRAME_RATES, "videos");
        let images = pick(FRAME_RATES, "images");
        assert_eq!(extension_for(&videos, &pick(DATA_GROUPS, "semseg")), "zip");
        assert_eq!(extension_for(&videos, &pick(DATA_GROUPS, "seq")), "csv");
        assert_eq!(extension_for(&images, &pick(DATA_GROUPS, "img")), "zip");
    }
}
