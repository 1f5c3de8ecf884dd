//! Command-line parsing for the layout tuning search.
//!
//! The goal of this module is to keep **argument parsing** separate from the
//! scoring/search code. Flags are converted into config structs in `app`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::layout::Controller;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(
    name = "isolayout",
    version,
    about = "Search step tunings of 2D isomorphic keyboard layouts against just intervals"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Score every step pair on a grid and write heatmaps.
    ///
    /// Layouts are scored by the sum of the inverse Tenney height of intervals
    /// within an integer limit approximated within an error limit, taking the
    /// center pad as 1/1. Credit for each interval falls off with the square of
    /// the error of its best approximation, down to 0 at the error limit.
    Heatmap(HeatmapArgs),
    /// Print a ranked table combining cached heatmaps of several controllers.
    Table(TableArgs),
    /// Find step pairs that fit an explicit list of ratios.
    Fit(FitArgs),
}

/// Options for the `heatmap` subcommand.
#[derive(Debug, Args, Clone)]
pub struct HeatmapArgs {
    /// Largest numerator/denominator of the target intervals.
    #[arg(long, default_value_t = 16)]
    pub integer_limit: u64,

    /// Error (cents) at which an interval stops scoring.
    #[arg(long, default_value_t = 15.0)]
    pub error_limit: f64,

    /// Restrict intervals to a prime subgroup, e.g. `2.3.7`.
    #[arg(long)]
    pub subgroup: Option<String>,

    /// Only score intervals within [1/R, R], e.g. `2/1`.
    #[arg(long)]
    pub range: Option<String>,

    /// Search the steps of an equal division of the octave instead of 1-cent steps.
    #[arg(long)]
    pub edo: Option<u32>,

    /// Controllers to score (repeatable).
    #[arg(short = 'c', long = "controller", value_enum, default_value = "exquis39")]
    pub controllers: Vec<Controller>,

    /// Skip computation and render the previously cached matrix.
    #[arg(long)]
    pub cached: bool,

    /// Worker threads (0 = one per core).
    #[arg(short = 'j', long, default_value_t = 0)]
    pub jobs: usize,

    /// Share memoized scores between (a, b) and (b, a).
    ///
    /// Exact only for layouts symmetric under swapping their axes.
    #[arg(long)]
    pub symmetric_cache: bool,

    /// Cache file (default: $ISOLAYOUT_CACHE, else `layout_heatmap.json`).
    #[arg(long, value_name = "JSON")]
    pub cache: Option<PathBuf>,

    /// Directory for SVG heatmaps, one per controller.
    #[arg(long, value_name = "DIR")]
    pub svg_dir: Option<PathBuf>,

    /// Directory for CSV exports, one per controller.
    #[arg(long = "export-csv", value_name = "DIR")]
    pub export_csv: Option<PathBuf>,

    /// Print an ASCII preview of each heatmap.
    #[arg(long)]
    pub preview: bool,

    /// Preview width (columns).
    #[arg(long, default_value_t = 78)]
    pub width: usize,

    /// Preview height (rows).
    #[arg(long, default_value_t = 39)]
    pub height: usize,
}

/// Options for the `table` subcommand.
#[derive(Debug, Args, Clone)]
pub struct TableArgs {
    /// Controllers to combine; their cached matrices must share a step range.
    #[arg(short = 'c', long = "controller", value_enum, num_args = 1.., default_values = ["exquis39", "exquis"])]
    pub controllers: Vec<Controller>,

    /// Cache file (default: $ISOLAYOUT_CACHE, else `layout_heatmap.json`).
    #[arg(long, value_name = "JSON")]
    pub cache: Option<PathBuf>,

    /// Only print the N best rows.
    #[arg(long)]
    pub top: Option<usize>,
}

/// Options for the `fit` subcommand.
#[derive(Debug, Args, Clone)]
pub struct FitArgs {
    /// Target pitches in scale order: ratios (`5/4`), harmonics (`3`),
    /// cents (`386.3`), or EDO steps (`7\12`).
    #[arg(required = true, num_args = 1..)]
    pub ratios: Vec<String>,

    /// Controller whose pads are matched.
    #[arg(short = 'c', long, value_enum, default_value = "exquis")]
    pub controller: Controller,

    /// Smallest step (cents) searched.
    #[arg(long, default_value_t = 20)]
    pub min_step: u32,

    /// Search steps below this value (cents).
    #[arg(long, default_value_t = 720)]
    pub max_step: u32,

    /// Number of results to print.
    #[arg(long, default_value_t = 10)]
    pub top: usize,

    /// Write the best result as a 61-note Exquis scale (`.scl`).
    #[arg(long, value_name = "SCL")]
    pub scl: Option<PathBuf>,

    /// Description line of the `.scl` file.
    #[arg(long, requires = "scl")]
    pub scl_description: Option<String>,
}
