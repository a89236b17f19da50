//! Static dataset catalog and facet selection.
//!
//! Each facet axis (frame rate, split, view, data group) has a fixed,
//! ordered list of values. A user [`Selection`] is resolved against that
//! list once, before any task is built.

use std::str::FromStr;

use crate::error::{Error, Result};

/// A single value on a facet axis.
pub trait Facet: Copy {
    /// Machine token used in URLs and on the command line.
    fn token(&self) -> &'static str;

    /// Human-readable label used in logs and reports.
    fn label(&self) -> &'static str;
}

/// A (token, label) pair for frame rates, splits, and views.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FacetValue {
    pub token: &'static str,
    pub label: &'static str,
}

impl Facet for FacetValue {
    fn token(&self) -> &'static str {
        self.token
    }

    fn label(&self) -> &'static str {
        self.label
    }
}

/// A data group, which additionally carries its default file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataGroup {
    pub token: &'static str,
    pub extension: &'static str,
    pub label: &'static str,
}

impl Facet for DataGroup {
    fn token(&self) -> &'static str {
        self.token
    }

    fn label(&self) -> &'static str {
        self.label
    }
}

const fn value(token: &'static str, label: &'static str) -> FacetValue {
    FacetValue { token, label }
}

const fn group(token: &'static str, extension: &'static str, label: &'static str) -> DataGroup {
    DataGroup {
        token,
        extension,
        label,
    }
}

pub const FRAME_RATES: &[FacetValue] = &[
    value("images", "images (1 fps)"),
    value("videos", "videos (10 fps)"),
];

pub const SPLITS: &[FacetValue] = &[
    value("train", "training set"),
    value("val", "validation set"),
    value("minival", "mini validation set (for online evaluation)"),
    value("test", "testing set"),
    value("minitest", "mini testing set (for online evaluation)"),
];

pub const VIEWS: &[FacetValue] = &[
    value("front", "Front"),
    value("left_45", "Left 45°"),
    value("left_90", "Left 90°"),
    value("right_45", "Right 45°"),
    value("right_90", "Right 90°"),
    value("left_stereo", "Front (Stereo)"),
    value("center", "Center (for LiDAR)"),
];

pub const DATA_GROUPS: &[DataGroup] = &[
    group("img", "zip", "RGB Image"),
    group("det_2d", "json", "2D Detection and Tracking"),
    group("det_3d", "json", "3D Detection and Tracking"),
    group("semseg", "zip", "Semantic Segmentation"),
    group("det_insseg_2d", "json", "Instance Segmentation"),
    group("flow", "zip", "Optical Flow"),
    group("depth", "zip", "Depth Maps (24-bit)"),
    group("depth_8bit", "zip", "Depth Maps (8-bit)"),
    group("seq", "csv", "Sequence Info"),
    group("lidar", "zip", "LiDAR Point Cloud"),
];

/// Frame rate whose RGB images ship as a different archive type.
pub const HIGH_FRAME_RATE: &str = "videos";
/// The RGB image data group.
pub const RGB_GROUP: &str = "img";
/// Archive extension used for RGB images at [`HIGH_FRAME_RATE`].
pub const HIGH_RATE_RGB_EXTENSION: &str = "tar";
/// The point-cloud data group, only published for [`POINT_CLOUD_VIEW`].
pub const POINT_CLOUD_GROUP: &str = "lidar";
/// The only view that carries point-cloud data.
pub const POINT_CLOUD_VIEW: &str = "center";

/// Names an axis for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Axis {
    /// Human name, e.g. "frame rate".
    pub name: &'static str,
    /// Command-line flag, e.g. "framerate".
    pub flag: &'static str,
}

pub const FRAME_RATE_AXIS: Axis = Axis {
    name: "frame rate",
    flag: "framerate",
};
pub const SPLIT_AXIS: Axis = Axis {
    name: "split",
    flag: "split",
};
pub const VIEW_AXIS: Axis = Axis {
    name: "view",
    flag: "view",
};
pub const GROUP_AXIS: Axis = Axis {
    name: "data group",
    flag: "group",
};

/// A user's choice for one axis.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selection {
    /// Every value of the axis, in catalog order.
    All,
    /// Explicit machine tokens, in the order given. Duplicates are kept.
    Specific(Vec<String>),
    /// Nothing selected (the command-line default).
    #[default]
    Empty,
}

impl FromStr for Selection {
    type Err = Error;

    /// Parses `all` or a bracketed, comma-separated token list such as
    /// `"[front, left_stereo]"`. Whitespace anywhere is ignored.
    fn from_str(s: &str) -> Result<Self> {
        if s == "all" {
            return Ok(Self::All);
        }
        let compact: String = s.chars().filter(|c| !c.is_whitespace()).collect();
        let inner = compact.trim_start_matches('[').trim_end_matches(']');
        if inner.contains(['[', ']']) {
            return Err(Error::InvalidSelection(format!("unbalanced brackets in '{s}'")));
        }
        let tokens: Vec<String> = inner
            .split(',')
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect();
        if tokens.is_empty() {
            Ok(Self::Empty)
        } else {
            Ok(Self::Specific(tokens))
        }
    }
}

/// Resolves a selection against one axis catalog.
///
/// Unknown tokens are logged and dropped. Lookup is case-sensitive.
///
/// # Errors
///
/// Returns [`Error::Configuration`] if nothing usable remains.
pub fn resolve<T: Facet>(selection: &Selection, catalog: &[T], axis: Axis) -> Result<Vec<T>> {
    let resolved: Vec<T> = match selection {
        Selection::All => catalog.to_vec(),
        Selection::Empty => Vec::new(),
        Selection::Specific(tokens) => tokens
            .iter()
            .filter_map(|token| {
                let found = catalog.iter().find(|v| v.token() == token.as_str()).copied();
                if found.is_none() {
                    log::warn!(
                        "Invalid option '{token}' for '{}'. Please check the download document (https://www.vis.xyz/shift/download/).",
                        axis.name
                    );
                }
                found
            })
            .collect(),
    };

    if resolved.is_empty() {
        return Err(Error::Configuration {
            axis: axis.name.to_string(),
            flag: axis.flag.to_string(),
        });
    }
    Ok(resolved)
}

/// The four per-axis selections of a run.
#[derive(Debug, Clone, Default)]
pub struct FacetSelection {
    pub frame_rates: Selection,
    pub splits: Selection,
    pub views: Selection,
    pub groups: Selection,
}

/// Resolved facet values for every axis.
#[derive(Debug, Clone)]
pub struct ResolvedFacets {
    pub frame_rates: Vec<FacetValue>,
    pub splits: Vec<FacetValue>,
    pub views: Vec<FacetValue>,
    pub groups: Vec<DataGroup>,
}

impl FacetSelection {
    /// Resolves all four axes, failing on the first empty one.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] naming the first axis with nothing selected.
    pub fn resolve(&self) -> Result<ResolvedFacets> {
        Ok(ResolvedFacets {
            frame_rates: resolve(&self.frame_rates, FRAME_RATES, FRAME_RATE_AXIS)?,
            splits: resolve(&self.splits, SPLITS, SPLIT_AXIS)?,
            views: resolve(&self.views, VIEWS, VIEW_AXIS)?,
            groups: resolve(&self.groups, DATA_GROUPS, GROUP_AXIS)?,
        })
    }
}

impl ResolvedFacets {
    /// Size of the raw cross-product, before any exclusions.
    #[must_use]
    pub fn combinations(&self) -> usize {
        self.frame_rates.len() * self.splits.len() * self.views.len() * self.groups.len()
    }

    /// Whether the point-cloud group is among the selected groups.
    #[must_use]
    pub fn includes_point_cloud(&self) -> bool {
        self.groups.iter().any(|g| g.token == POINT_CLOUD_GROUP)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn specific(tokens: &[&str]) -> Selection {
        Selection::Specific(tokens.iter().map(|t| (*t).to_string()).collect())
    }

    #[test]
    fn parse_all() {
        assert_eq!("all".parse::<Selection>().unwrap(), Selection::All);
    }

    #[test]
    fn parse_bracketed_list() {
        let sel: Selection = "[front, left_stereo]".parse().unwrap();
        assert_eq!(sel, specific(&["front", "left_stereo"]));
    }

    #[test]
    fn parse_without_brackets() {
        let sel: Selection = "img,semseg".parse().unwrap();
        assert_eq!(sel, specific(&["img", "semseg"]));
    }

    #[test]
    fn parse_empty_is_empty() {
        assert_eq!("".parse::<Selection>().unwrap(), Selection::Empty);
        assert_eq!("[]".parse::<Selection>().unwrap(), Selection::Empty);
        assert_eq!(" [ , ] ".parse::<Selection>().unwrap(), Selection::Empty);
    }

    #[test]
    fn parse_rejects_nested_brackets() {
        assert!("[a,[b]]".parse::<Selection>().is_err());
    }

    #[test]
    fn all_is_case_sensitive() {
        assert_eq!("ALL".parse::<Selection>().unwrap(), specific(&["ALL"]));
    }

    #[test]
    fn resolve_all_returns_catalog_in_order() {
        let views = resolve(&Selection::All, VIEWS, VIEW_AXIS).unwrap();
        assert_eq!(views, VIEWS.to_vec());
    }

    #[test]
    fn resolve_keeps_user_order() {
        let splits = resolve(&specific(&["test", "train"]), SPLITS, SPLIT_AXIS).unwrap();
        let tokens: Vec<_> = splits.iter().map(|s| s.token).collect();
        assert_eq!(tokens, ["test", "train"]);
    }

    #[test]
    fn resolve_drops_unknown_tokens() {
        let groups = resolve(&specific(&["img", "bogus", "seq"]), DATA_GROUPS, GROUP_AXIS).unwrap();
        let tokens: Vec<_> = groups.iter().map(|g| g.token).collect();
        assert_eq!(tokens, ["img", "seq"]);
    }

    #[test]
    fn resolve_is_case_sensitive() {
        let err = resolve(&specific(&["Front"]), VIEWS, VIEW_AXIS).unwrap_err();
        assert!(matches!(err, Error::Configuration { .. }));
    }

    #[test]
    fn resolve_keeps_duplicates() {
        let rates = resolve(&specific(&["images", "images"]), FRAME_RATES, FRAME_RATE_AXIS).unwrap();
        assert_eq!(rates.len(), 2);
    }

    #[test]
    fn resolve_all_unknown_is_configuration_error() {
        let err = resolve(&specific(&["nope"]), SPLITS, SPLIT_AXIS).unwrap_err();
        match err {
            Error::Configuration { axis, flag } => {
                assert_eq!(axis, "split");
                assert_eq!(flag, "split");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn resolve_empty_is_configuration_error() {
        let err = resolve(&Selection::Empty, FRAME_RATES, FRAME_RATE_AXIS).unwrap_err();
        assert!(matches!(err, Error::Configuration { .. }));
    }

    #[test]
    fn facet_selection_reports_first_empty_axis() {
        let selection = FacetSelection {
            frame_rates: Selection::All,
            splits: Selection::All,
            views: Selection::Empty,
            groups: Selection::All,
        };
        match selection.resolve().unwrap_err() {
            Error::Configuration { axis, .. } => assert_eq!(axis, "view"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn combinations_and_point_cloud_flag() {
        let facets = FacetSelection {
            frame_rates: Selection::All,
            splits: specific(&["val"]),
            views: specific(&["front", "center"]),
            groups: specific(&["img", "lidar"]),
        }
        .resolve()
        .unwrap();
        assert_eq!(facets.combinations(), 2 * 1 * 2 * 2);
        assert!(facets.includes_point_cloud());
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn whitespace_is_ignored(idx in proptest::collection::vec(0usize..7, 1..6), pad in "[ \t]{0,3}") {
                let tokens: Vec<&str> = idx.iter().map(|&i| VIEWS[i].token).collect();
                let sep = format!("{pad},{pad}");
                let input = format!("[{pad}{}{pad}]", tokens.join(sep.as_str()));
                let sel: Selection = input.parse().unwrap();
                let resolved = resolve(&sel, VIEWS, VIEW_AXIS).unwrap();
                let got: Vec<&str> = resolved.iter().map(|v| v.token).collect();
                prop_assert_eq!(got, tokens);
            }

            #[test]
            fn parse_never_panics(input in ".{0,40}") {
                let _ = input.parse::<Selection>();
            }
        }
    }
}
