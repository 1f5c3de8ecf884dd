//! Score matrix over a square grid of step sizes.

use nalgebra::DMatrix;

use crate::domain::StepPair;
use crate::error::AppError;

/// Round to one decimal digit, the precision scores are persisted at.
pub fn round_to_tenth(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

/// `values[(i, j)]` is the score of `StepPair(steps[i], steps[j])`.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreMatrix {
    steps: Vec<f64>,
    values: DMatrix<f64>,
}

impl ScoreMatrix {
    /// Assemble a matrix from row vectors (row `i` = first step `steps[i]`).
    pub fn from_rows(steps: Vec<f64>, rows: Vec<Vec<f64>>) -> Result<Self, AppError> {
        let n = steps.len();
        if rows.len() != n {
            return Err(AppError::data(format!(
                "Score matrix has {} rows for {n} step values.",
                rows.len()
            )));
        }
        if let Some((i, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != n) {
            return Err(AppError::data(format!(
                "Score matrix row {i} has {} cells, expected {n}.",
                row.len()
            )));
        }
        let flat: Vec<f64> = rows.into_iter().flatten().collect();
        Ok(Self {
            steps,
            values: DMatrix::from_row_slice(n, n, &flat),
        })
    }

    /// Number of step values along each axis.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn steps(&self) -> &[f64] {
        &self.steps
    }

    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.values[(i, j)]
    }

    pub fn step_pair(&self, i: usize, j: usize) -> StepPair {
        StepPair::new(self.steps[i], self.steps[j])
    }

    /// Rows as plain vectors, in step order.
    pub fn rows(&self) -> Vec<Vec<f64>> {
        (0..self.len())
            .map(|i| self.values.row(i).iter().copied().collect())
            .collect()
    }

    /// Every cell rounded to one decimal digit.
    pub fn rounded(&self) -> Self {
        Self {
            steps: self.steps.clone(),
            values: self.values.map(round_to_tenth),
        }
    }

    /// Score range over all cells, `None` for an empty matrix.
    pub fn value_range(&self) -> Option<(f64, f64)> {
        if self.is_empty() {
            return None;
        }
        Some((self.values.min(), self.values.max()))
    }

    /// Highest-scoring cell with `j > i` (axis-swapped duplicates excluded).
    ///
    /// Ties keep the first cell in row-major order.
    pub fn best_upper(&self) -> Option<(usize, usize, f64)> {
        let mut best: Option<(usize, usize, f64)> = None;
        for i in 0..self.len() {
            for j in (i + 1)..self.len() {
                let v = self.get(i, j);
                if best.is_none_or(|(_, _, b)| v > b) {
                    best = Some((i, j, v));
                }
            }
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ScoreMatrix {
        ScoreMatrix::from_rows(
            vec![100.0, 200.0, 300.0],
            vec![
                vec![0.04, 1.26, 2.0],
                vec![1.26, 0.0, 3.55],
                vec![2.0, 3.55, 9.99],
            ],
        )
        .unwrap()
    }

    #[test]
    fn from_rows_is_row_major() {
        let m = sample();
        assert_eq!(m.len(), 3);
        assert_eq!(m.get(0, 2), 2.0);
        assert_eq!(m.get(1, 2), 3.55);
        assert_eq!(m.rows()[1], vec![1.26, 0.0, 3.55]);
        assert_eq!(m.step_pair(1, 2), StepPair::new(200.0, 300.0));
    }

    #[test]
    fn from_rows_rejects_ragged_input() {
        let err = ScoreMatrix::from_rows(vec![1.0, 2.0], vec![vec![0.0, 1.0], vec![0.0]]).unwrap_err();
        assert_eq!(err.exit_code(), 4);
        assert!(ScoreMatrix::from_rows(vec![1.0], vec![]).is_err());
    }

    #[test]
    fn rounding_is_idempotent() {
        let once = sample().rounded();
        assert_eq!(once.get(0, 1), 1.3);
        assert_eq!(once.get(2, 2), 10.0);
        assert_eq!(once.rounded(), once);
    }

    #[test]
    fn best_upper_ignores_diagonal_and_lower_half() {
        let (i, j, v) = sample().best_upper().unwrap();
        assert_eq!((i, j), (1, 2));
        assert_eq!(v, 3.55);
    }
}
