//! Export a score matrix to CSV.
//!
//! The first column holds the first step of each row; the header row holds the
//! second steps. Easy to load into a spreadsheet or plotting script.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::domain::ScoreMatrix;
use crate::error::AppError;

/// Write `matrix` as CSV to `path`.
pub fn write_matrix_csv(path: &Path, matrix: &ScoreMatrix) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::input(format!("Failed to create export CSV '{}': {e}", path.display())))?;
    let mut out = BufWriter::new(file);
    write_matrix(&mut out, matrix)
        .and_then(|()| out.flush())
        .map_err(|e| AppError::input(format!("Failed to write export CSV '{}': {e}", path.display())))
}

fn write_matrix(out: &mut impl Write, matrix: &ScoreMatrix) -> std::io::Result<()> {
    write!(out, "step")?;
    for s in matrix.steps() {
        write!(out, ",{}", fmt_step(*s))?;
    }
    writeln!(out)?;

    for (i, row) in matrix.rows().iter().enumerate() {
        write!(out, "{}", fmt_step(matrix.steps()[i]))?;
        for v in row {
            write!(out, ",{v:.1}")?;
        }
        writeln!(out)?;
    }
    Ok(())
}

/// Integral steps print without decimals; EDO steps keep three.
pub(crate) fn fmt_step(s: f64) -> String {
    if s.fract() == 0.0 {
        format!("{s:.0}")
    } else {
        format!("{s:.3}")
    }
}
