//! Shared domain types.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::layout::Controller;
use crate::math::UniverseParams;

/// Step offset `(dy, dx)` from the reference pad to another pad.
///
/// `dy` counts steps along the first basis direction, `dx` along the second.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LatticeVector {
    pub dy: i32,
    pub dx: i32,
}

impl LatticeVector {
    pub const fn new(dy: i32, dx: i32) -> Self {
        Self { dy, dx }
    }

    /// Pitch of this pad in cents under the given step sizes.
    pub fn cents(&self, steps: StepPair) -> f64 {
        steps.first * self.dy as f64 + steps.second * self.dx as f64
    }

    /// `|dy| + |dx|`: how far the pad is from the reference pad.
    pub fn l1_norm(&self) -> u32 {
        self.dy.unsigned_abs() + self.dx.unsigned_abs()
    }

    /// L1 distance between two pads.
    pub fn l1_distance(&self, other: &LatticeVector) -> u32 {
        self.dy.abs_diff(other.dy) + self.dx.abs_diff(other.dx)
    }
}

/// Cents per step along the two basis directions of a layout.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StepPair {
    pub first: f64,
    pub second: f64,
}

impl StepPair {
    pub const fn new(first: f64, second: f64) -> Self {
        Self { first, second }
    }

    pub fn swapped(&self) -> Self {
        Self::new(self.second, self.first)
    }

    /// The pair with the smaller step first.
    pub fn sorted(&self) -> Self {
        if self.first <= self.second {
            *self
        } else {
            self.swapped()
        }
    }
}

/// One ranked candidate of the explicit ratio fitter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitResult {
    pub steps: StepPair,
    /// Worst matching error over all targets, in cents.
    pub max_error: f64,
    /// Largest L1 norm among the matched pads.
    pub pattern_size: u32,
    /// Largest L1 distance between the pads of consecutive targets.
    pub max_step_jump: u32,
}

impl FitResult {
    /// Ranking key, lower is better.
    pub fn composite(&self) -> f64 {
        self.max_error / 2.0 + self.pattern_size as f64 + self.max_step_jump as f64
    }
}

/// Configuration of a `heatmap` run.
#[derive(Debug, Clone)]
pub struct HeatmapConfig {
    pub universe: UniverseParams,
    /// Cents; an interval scores zero at or beyond this error.
    pub error_limit: f64,
    /// Search equal divisions of the octave instead of 1-cent steps.
    pub edo: Option<u32>,
    pub controllers: Vec<Controller>,
    /// Read the stored matrix instead of computing.
    pub cached: bool,
    /// Worker threads for grid search.
    pub jobs: usize,
    /// Treat `(a, b)` and `(b, a)` as the same memoization key.
    pub symmetric_cache: bool,
    pub cache_path: PathBuf,
    pub svg_dir: Option<PathBuf>,
    pub export_csv_dir: Option<PathBuf>,
    pub preview: bool,
    pub preview_width: usize,
    pub preview_height: usize,
}

/// Configuration of a `table` run.
#[derive(Debug, Clone)]
pub struct TableConfig {
    pub controllers: Vec<Controller>,
    pub cache_path: PathBuf,
    pub top_n: Option<usize>,
}

/// Configuration of a `fit` run.
#[derive(Debug, Clone)]
pub struct FitConfig {
    /// Target pitches in cents, in the order given.
    pub targets: Vec<f64>,
    /// Target strings as given, for reports.
    pub target_labels: Vec<String>,
    pub controller: Controller,
    pub min_step: u32,
    pub max_step: u32,
    pub top_n: usize,
    /// Write the best result as an Exquis `.scl` file.
    pub scl_path: Option<PathBuf>,
    pub scl_description: Option<String>,
}
