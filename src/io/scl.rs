//! Scala `.scl` export of a full Exquis layout.
//!
//! The file lists one pitch per pad in scale order, unison included, so that a
//! synth mapping pads to scale degrees in order reproduces the layout.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::domain::StepPair;
use crate::error::AppError;
use crate::layout::exquis_scale_vectors;

/// Cents of every pad, given `(up-right, right)` steps (see `to_scale_basis`).
pub fn exquis_scale_notes(scale_steps: StepPair) -> Vec<f64> {
    exquis_scale_vectors()
        .iter()
        .map(|v| v.cents(scale_steps))
        .collect()
}

/// Render a `.scl` document with CRLF line endings.
pub fn format_scl(description: &str, notes: &[f64]) -> String {
    let mut lines = vec![
        format!("! {description}.scl"),
        "!".to_string(),
        description.to_string(),
        notes.len().to_string(),
        "!".to_string(),
    ];
    lines.extend(notes.iter().map(|c| format!("{c:.5}")));
    lines.push(String::new());
    lines.join("\r\n")
}

pub fn write_scl(path: &Path, description: &str, notes: &[f64]) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::input(format!("Failed to create scale file '{}': {e}", path.display())))?;
    let mut out = BufWriter::new(file);
    out.write_all(format_scl(description, notes).as_bytes())
        .and_then(|()| out.flush())
        .map_err(|e| AppError::input(format!("Failed to write scale file '{}': {e}", path.display())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notes_follow_scale_basis() {
        let notes = exquis_scale_notes(StepPair::new(500.0, 200.0));
        assert_eq!(notes.len(), 61);
        assert_eq!(notes[0], 0.0);
        assert_eq!(notes[1], 200.0);
        assert_eq!(notes[6], 500.0);
        // (2, -1): two up-right steps, one step left.
        assert_eq!(notes[11], 800.0);
        // (10, 0) is the top-right pad.
        assert_eq!(notes[60], 5000.0);
    }

    #[test]
    fn scl_layout() {
        let text = format_scl("test", &[0.0, 701.955]);
        assert_eq!(text, "! test.scl\r\n!\r\ntest\r\n2\r\n!\r\n0.00000\r\n701.95500\r\n");
    }

    #[test]
    fn writes_to_disk() {
        let path = std::env::temp_dir().join(format!("iso_layout_scale_{}.scl", std::process::id()));
        write_scl(&path, "d", &[100.0]).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "! d.scl\r\n!\r\nd\r\n1\r\n!\r\n100.00000\r\n");
        let _ = std::fs::remove_file(&path);
    }
}
