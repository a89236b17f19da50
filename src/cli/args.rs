use std::path::PathBuf;

use clap::Parser;

use crate::catalog::{FacetSelection, Selection};
use crate::shift::ShiftMode;

/// Downloads the SHIFT dataset public release.
///
/// Each facet option accepts `all` or a bracketed list of tokens, e.g.
/// `--view "[front, left_stereo]"`.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Output directory in which to store the data.
    pub out_dir: PathBuf,

    /// Splits to download (train, val, minival, test, minitest).
    #[arg(long, default_value = "")]
    pub split: Selection,

    /// Views to download (front, left_45, left_90, right_45, right_90, left_stereo, center).
    #[arg(long, default_value = "")]
    pub view: Selection,

    /// Data groups to download (img, det_2d, det_3d, semseg, det_insseg_2d, flow, depth, depth_8bit, seq, lidar).
    #[arg(long, default_value = "")]
    pub group: Selection,

    /// Frame rates to download (images = 1 fps, videos = 10 fps).
    #[arg(long, default_value = "")]
    pub framerate: Selection,

    /// Domain shift type: discrete, continuous/1x, continuous/10x, continuous/100x.
    #[arg(long, default_value = "discrete")]
    pub shift: ShiftMode,

    /// Number of concurrent downloads [default: 8].
    #[arg(short = 't', long, value_parser = clap::value_parser!(u16).range(1..))]
    pub threads: Option<u16>,

    /// Override the dataset origin URL.
    #[arg(long)]
    pub base_url: Option<String>,

    /// Per-file timeout in seconds.
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Path to a TOML config file.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Print the planned downloads and exit.
    #[arg(long)]
    pub dry_run: bool,

    /// Enable debug logging.
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// The four facet selections given on the command line.
    #[must_use]
    pub fn facets(&self) -> FacetSelection {
        FacetSelection {
            frame_rates: self.framerate.clone(),
            splits: self.split.clone(),
            views: self.view.clone(),
            groups: self.group.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_select_nothing() {
        let args = Args::try_parse_from(["shift-dl", "out"]).unwrap();
        assert_eq!(args.out_dir, PathBuf::from("out"));
        assert_eq!(args.split, Selection::Empty);
        assert_eq!(args.shift, ShiftMode::Discrete);
        assert_eq!(args.threads, None);
        assert!(!args.dry_run);
    }

    #[test]
    fn parses_facets_and_shift() {
        let args = Args::try_parse_from([
            "shift-dl",
            "--view",
            "[front, left_stereo]",
            "--group",
            "all",
            "--shift",
            "continuous/10x",
            "--threads",
            "4",
            "data",
        ])
        .unwrap();
        assert_eq!(
            args.view,
            Selection::Specific(vec!["front".to_string(), "left_stereo".to_string()])
        );
        assert_eq!(args.facets().groups, Selection::All);
        assert_eq!(args.shift.to_string(), "continuous/10x");
        assert_eq!(args.threads, Some(4));
    }

    #[test]
    fn rejects_zero_threads() {
        assert!(Args::try_parse_from(["shift-dl", "--threads", "0", "out"]).is_err());
    }

    #[test]
    fn rejects_unknown_shift() {
        assert!(Args::try_parse_from(["shift-dl", "--shift", "continuous/2x", "out"]).is_err());
    }
}
