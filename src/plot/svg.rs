//! SVG heatmap via Plotters.
//!
//! One filled rectangle per matrix cell. The x axis is the second step (column
//! index), the y axis the first step (row index); tick labels show step sizes
//! in cents. Colours run from dark violet (lowest score) through teal to
//! yellow (highest score).

use std::path::Path;

use plotters::prelude::*;

use crate::domain::ScoreMatrix;
use crate::error::AppError;
use crate::io::export::fmt_step;

const CELL_LOW: (u8, u8, u8) = (68, 1, 84);
const CELL_MID: (u8, u8, u8) = (33, 145, 140);
const CELL_HIGH: (u8, u8, u8) = (253, 231, 37);

/// Write a heatmap of `matrix` to `path`.
///
/// `axis_labels` are the (first, second) step labels, i.e. (y, x).
pub fn write_heatmap_svg(
    path: &Path,
    matrix: &ScoreMatrix,
    title: &str,
    axis_labels: (&str, &str),
) -> Result<(), AppError> {
    if matrix.is_empty() {
        return Err(AppError::data("Cannot render an empty score matrix."));
    }
    draw(path, matrix, title, axis_labels)
        .map_err(|e| AppError::data(format!("Failed to render heatmap '{}': {e}", path.display())))
}

fn draw(
    path: &Path,
    matrix: &ScoreMatrix,
    title: &str,
    (y_label, x_label): (&str, &str),
) -> Result<(), Box<dyn std::error::Error>> {
    let n = matrix.len();
    let steps = matrix.steps();
    let (lo, hi) = matrix.value_range().unwrap_or((0.0, 0.0));

    let root = SVGBackend::new(path, (900, 860)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 20))
        .margin(12)
        .x_label_area_size(48)
        .y_label_area_size(64)
        .build_cartesian_2d(0.0..n as f64, 0.0..n as f64)?;

    chart.draw_series((0..n).flat_map(|i| (0..n).map(move |j| (i, j))).map(|(i, j)| {
        let (x, y) = (j as f64, i as f64);
        Rectangle::new([(x, y), (x + 1.0, y + 1.0)], cell_color(matrix.get(i, j), lo, hi).filled())
    }))?;

    let tick = |v: &f64| step_label(steps, *v);
    chart
        .configure_mesh()
        .disable_x_mesh()
        .disable_y_mesh()
        .x_desc(x_label)
        .y_desc(y_label)
        .x_labels(10)
        .y_labels(10)
        .x_label_formatter(&tick)
        .y_label_formatter(&tick)
        .draw()?;

    root.present()?;
    Ok(())
}

/// Step size at axis coordinate `v` (cell index, fractional).
fn step_label(steps: &[f64], v: f64) -> String {
    if steps.is_empty() || !v.is_finite() {
        return String::new();
    }
    let idx = (v.floor().max(0.0) as usize).min(steps.len() - 1);
    fmt_step(steps[idx])
}

fn cell_color(v: f64, lo: f64, hi: f64) -> RGBColor {
    let u = if hi > lo && v.is_finite() {
        ((v - lo) / (hi - lo)).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let (a, b, t) = if u < 0.5 {
        (CELL_LOW, CELL_MID, u * 2.0)
    } else {
        (CELL_MID, CELL_HIGH, (u - 0.5) * 2.0)
    };
    let lerp = |x: u8, y: u8| (x as f64 + (y as f64 - x as f64) * t).round() as u8;
    RGBColor(lerp(a.0, b.0), lerp(a.1, b.1), lerp(a.2, b.2))
}
