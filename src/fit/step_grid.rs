//! Step-size grids for the heatmap search.
//!
//! Two discretizations of the search axis:
//! - 1-cent steps from the error limit up to a fifth plus the error limit
//! - the nontrivial steps of an equal division of the octave

use crate::error::AppError;

/// Largest step searched, before adding the error limit: a just fifth, rounded.
pub const MAX_LINEAR_STEP: u32 = 702;

/// `error_limit + k` for `k` in `0..702`.
pub fn linear_steps(error_limit: f64) -> Vec<f64> {
    (0..MAX_LINEAR_STEP).map(|k| error_limit + k as f64).collect()
}

/// `1200·k/N` for `k` in `1..N`: every step of N-EDO except the unison and octave.
pub fn edo_steps(edo: u32) -> Result<Vec<f64>, AppError> {
    if edo < 2 {
        return Err(AppError::input(format!("EDO size must be >= 2 (got {edo}).")));
    }
    Ok((1..edo).map(|k| 1200.0 * k as f64 / edo as f64).collect())
}

/// The step range for a run: EDO steps when requested, else linear steps.
pub fn step_range(error_limit: f64, edo: Option<u32>) -> Result<Vec<f64>, AppError> {
    match edo {
        Some(n) => edo_steps(n),
        None => {
            if !(error_limit.is_finite() && error_limit > 0.0) {
                return Err(AppError::input(format!(
                    "Invalid error limit {error_limit} (must be finite and > 0)."
                )));
            }
            Ok(linear_steps(error_limit))
        }
    }
}
