//! Explicit ratio fitter.
//!
//! Given target pitches (in the caller's order, typically a scale), find step
//! pairs under which every target lands near some pad, with the pattern kept
//! compact and consecutive targets close together on the lattice.
//!
//! Each target is matched greedily to its nearest pad; two targets may share a
//! pad. Candidates are ranked by
//!
//! `max_error / 2 + pattern_size + max_step_jump`
//!
//! ascending.

use crate::domain::{FitResult, LatticeVector, StepPair};
use crate::error::AppError;

/// Search bounds and output size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RatioFitOptions {
    /// First step ranges over `min_step..max_step`; the second over `first..max_step`.
    pub min_step: u32,
    pub max_step: u32,
    pub top_n: usize,
}

impl Default for RatioFitOptions {
    fn default() -> Self {
        Self {
            min_step: 20,
            max_step: 720,
            top_n: 10,
        }
    }
}

impl RatioFitOptions {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.min_step >= self.max_step {
            return Err(AppError::input(format!(
                "Invalid step range {}..{} (min must be < max).",
                self.min_step, self.max_step
            )));
        }
        Ok(())
    }

    /// Every candidate step pair in iteration order.
    pub fn candidates(&self) -> impl Iterator<Item = StepPair> + '_ {
        (self.min_step..self.max_step).flat_map(move |a| {
            (a..self.max_step).map(move |b| StepPair::new(a as f64, b as f64))
        })
    }
}

/// Metrics of one candidate. `None` when there are no targets or no pads.
pub fn evaluate(targets: &[f64], vectors: &[LatticeVector], steps: StepPair) -> Option<FitResult> {
    if targets.is_empty() || vectors.is_empty() {
        return None;
    }

    let pads: Vec<f64> = vectors.iter().map(|v| v.cents(steps)).collect();

    let mut max_error = 0.0_f64;
    let mut matched: Vec<LatticeVector> = Vec::with_capacity(targets.len());
    for &t in targets {
        // First pad in vector order wins ties.
        let mut best = 0;
        for (k, &p) in pads.iter().enumerate().skip(1) {
            if (p - t).abs() < (pads[best] - t).abs() {
                best = k;
            }
        }
        max_error = max_error.max((pads[best] - t).abs());
        matched.push(vectors[best]);
    }

    let pattern_size = matched.iter().map(LatticeVector::l1_norm).max().unwrap_or(0);
    let max_step_jump = matched
        .windows(2)
        .map(|w| w[0].l1_distance(&w[1]))
        .max()
        .unwrap_or(0);

    Some(FitResult {
        steps,
        max_error,
        pattern_size,
        max_step_jump,
    })
}

/// Evaluate every candidate and return the `top_n` best, best first.
///
/// The sort is stable, so equal composites keep iteration order.
pub fn fit_ratios(
    targets: &[f64],
    vectors: &[LatticeVector],
    opts: &RatioFitOptions,
) -> Result<Vec<FitResult>, AppError> {
    opts.validate()?;

    let mut results: Vec<FitResult> = opts
        .candidates()
        .filter_map(|steps| evaluate(targets, vectors, steps))
        .collect();
    results.sort_by(|a, b| a.composite().total_cmp(&b.composite()));
    results.truncate(opts.top_n);
    Ok(results)
}

/// Convert an Exquis `(up-left, up-right)` step pair to the `(up-right, right)`
/// basis used when exporting the full layout as a scale.
pub fn to_scale_basis(steps: StepPair) -> StepPair {
    StepPair::new(steps.second, steps.second - steps.first)
}
