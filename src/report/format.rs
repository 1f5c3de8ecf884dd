//! Formatted terminal output.
//!
//! Formatting lives here so that scoring and search code stays free of
//! presentation details, and output changes stay localized.

use crate::domain::{FitResult, ScoreMatrix};
use crate::fit::ratio_fit::to_scale_basis;
use crate::io::export::fmt_step;
use crate::layout::Controller;
use crate::report::TableRow;

/// One-paragraph summary of a computed (or loaded) heatmap.
pub fn format_heatmap_summary(controller: Controller, matrix: &ScoreMatrix, title: &str) -> String {
    let mut out = String::new();
    out.push_str(&format!("=== {title} ===\n"));
    out.push_str(&format!(
        "Controller: {} ({} pads)\n",
        controller.display_name(),
        controller.vectors().len()
    ));
    out.push_str(&format!("Grid: {0}x{0} step pairs\n", matrix.len()));
    if let Some((lo, hi)) = matrix.value_range() {
        out.push_str(&format!("Scores: [{lo:.1}, {hi:.1}]\n"));
    }
    if let Some((i, j, v)) = matrix.best_upper() {
        let (label_a, label_b) = controller.axis_labels();
        out.push_str(&format!(
            "Best: {label_a}={} {label_b}={} score={v:.1}\n",
            fmt_step(matrix.steps()[i]),
            fmt_step(matrix.steps()[j]),
        ));
    }
    out
}

/// Ranked multi-controller table (`j > i` cells only).
pub fn format_table(controllers: &[Controller], rows: &[TableRow]) -> String {
    let (label_a, label_b) = controllers
        .first()
        .map(|c| c.axis_labels())
        .unwrap_or(("Step 1", "Step 2"));

    let mut header = vec![label_a.to_string(), label_b.to_string()];
    header.extend(controllers.iter().map(|c| format!("{}-score", c.key())));
    header.push("Total score".to_string());

    let widths: Vec<usize> = header.iter().map(|h| h.len().max(8)).collect();

    let mut out = String::new();
    push_row(&mut out, &header, &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    push_row(&mut out, &rule, &widths);

    for r in rows {
        let mut cells = vec![fmt_step(r.steps.first), fmt_step(r.steps.second)];
        cells.extend(r.scores.iter().map(|s| format!("{s:.1}")));
        cells.push(format!("{:.1}", r.total));
        push_row(&mut out, &cells, &widths);
    }
    out
}

/// Ranked explicit-fit results, best first.
pub fn format_fit_results(controller: Controller, targets: &[String], results: &[FitResult]) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "Targets: {} on {}\n",
        targets.join(" "),
        controller.display_name()
    ));

    if results.is_empty() {
        out.push_str("No candidates.\n");
        return out;
    }

    let (label_a, label_b) = controller.axis_labels();
    let header = [label_a, label_b, "max error", "size", "max jump", "rank score"]
        .map(str::to_string)
        .to_vec();
    let widths: Vec<usize> = header.iter().map(|h| h.len().max(8)).collect();
    push_row(&mut out, &header, &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    push_row(&mut out, &rule, &widths);

    for r in results {
        let cells = vec![
            fmt_step(r.steps.first),
            fmt_step(r.steps.second),
            format!("{:.3}", r.max_error),
            r.pattern_size.to_string(),
            r.max_step_jump.to_string(),
            format!("{:.3}", r.composite()),
        ];
        push_row(&mut out, &cells, &widths);
    }

    if controller.is_hex() {
        let scl = to_scale_basis(results[0].steps);
        out.push_str(&format!(
            "\nBest as scale steps: up-right={} right={}\n",
            fmt_step(scl.first),
            fmt_step(scl.second)
        ));
    }
    out
}

fn push_row(out: &mut String, cells: &[String], widths: &[usize]) {
    let line: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(c, &w)| format!("{c:>w$}"))
        .collect();
    out.push_str(line.join("  ").trim_end());
    out.push('\n');
}
