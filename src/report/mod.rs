//! Reporting utilities: matrix tables and formatted terminal output.

pub mod format;

pub use format::*;

use crate::domain::{ScoreMatrix, StepPair};
use crate::error::AppError;

/// One unordered step pair scored across several controllers.
#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    pub steps: StepPair,
    /// One score per input matrix, in input order.
    pub scores: Vec<f64>,
    pub total: f64,
}

/// Combine matrices computed on the same step range into ranked rows.
///
/// Only cells with `j > i` are used, so each unordered pair appears once.
/// Rows are sorted by total score, highest first; ties keep row-major order.
pub fn build_table(matrices: &[ScoreMatrix], top_n: Option<usize>) -> Result<Vec<TableRow>, AppError> {
    let Some(first) = matrices.first() else {
        return Ok(Vec::new());
    };
    if let Some(k) = matrices.iter().position(|m| m.steps() != first.steps()) {
        return Err(AppError::data(format!(
            "Matrix {k} was computed on a different step range than matrix 0; recompute both with the same settings."
        )));
    }

    let n = first.len();
    let mut rows = Vec::with_capacity(n * n.saturating_sub(1) / 2);
    for i in 0..n {
        for j in (i + 1)..n {
            let scores: Vec<f64> = matrices.iter().map(|m| m.get(i, j)).collect();
            let total = scores.iter().sum();
            rows.push(TableRow {
                steps: first.step_pair(i, j),
                scores,
                total,
            });
        }
    }

    rows.sort_by(|a, b| b.total.total_cmp(&a.total));
    if let Some(top) = top_n {
        rows.truncate(top);
    }
    Ok(rows)
}
