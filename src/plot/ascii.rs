//! ASCII heatmap for terminal output.
//!
//! Deliberately simple (fixed-size character grid), optimized for:
//! - a quick look at where good tunings cluster without opening a file
//! - deterministic output
//!
//! Rows run top to bottom by increasing first step, columns left to right by
//! increasing second step. Each character covers a block of cells and shows
//! the block's maximum on the ramp ` .:-=+*#%@`.

use crate::domain::ScoreMatrix;
use crate::io::export::fmt_step;

const RAMP: &[u8] = b" .:-=+*#%@";

/// Render `matrix` into at most `width × height` characters (plus a header).
pub fn render_ascii_heatmap(matrix: &ScoreMatrix, width: usize, height: usize) -> String {
    let n = matrix.len();
    if n == 0 {
        return "Heatmap: (empty)\n".to_string();
    }
    let width = width.clamp(1, n);
    let height = height.clamp(1, n);
    let (lo, hi) = matrix.value_range().unwrap_or((0.0, 0.0));

    let mut out = String::new();
    out.push_str(&format!(
        "Heatmap: steps=[{}, {}] | score=[{lo:.1}, {hi:.1}]\n",
        fmt_step(matrix.steps()[0]),
        fmt_step(matrix.steps()[n - 1]),
    ));

    for r in 0..height {
        let (i0, i1) = block(r, height, n);
        let mut line = String::with_capacity(width);
        for c in 0..width {
            let (j0, j1) = block(c, width, n);
            let mut v = f64::NEG_INFINITY;
            for i in i0..i1 {
                for j in j0..j1 {
                    v = v.max(matrix.get(i, j));
                }
            }
            line.push(shade(v, lo, hi));
        }
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}

/// Cell index range `[start, end)` covered by output position `k` of `slots`.
fn block(k: usize, slots: usize, n: usize) -> (usize, usize) {
    let start = k * n / slots;
    let end = ((k + 1) * n / slots).max(start + 1);
    (start, end.min(n))
}

fn shade(v: f64, lo: f64, hi: f64) -> char {
    if !(v.is_finite() && hi > lo) {
        return RAMP[0] as char;
    }
    let u = ((v - lo) / (hi - lo)).clamp(0.0, 1.0);
    let idx = (u * (RAMP.len() - 1) as f64).round() as usize;
    RAMP[idx] as char
}
