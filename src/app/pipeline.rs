//! Shared run logic behind the CLI subcommands.
//!
//! Each `run_*` function does the computation and file output of one
//! subcommand and returns what the caller should print:
//! universe -> step range -> grid search per controller -> exports
//!
//! The store is passed in so that tests can run against `MemoryStore`.

use std::path::Path;

use tracing::{info, warn};

use crate::domain::{FitConfig, FitResult, HeatmapConfig, ScoreMatrix, TableConfig};
use crate::error::AppError;
use crate::fit::grid_search::{GridJob, grid_search};
use crate::fit::ratio_fit::{RatioFitOptions, fit_ratios, to_scale_basis};
use crate::fit::score::KeyMode;
use crate::fit::step_grid::step_range;
use crate::io::export::fmt_step;
use crate::io::scl::{exquis_scale_notes, write_scl};
use crate::io::store::{MatrixStore, load_required};
use crate::layout::Controller;
use crate::math::IntervalUniverse;
use crate::report::{TableRow, build_table};

/// One controller's heatmap.
#[derive(Debug, Clone)]
pub struct HeatmapOutput {
    pub controller: Controller,
    pub title: String,
    pub matrix: ScoreMatrix,
}

/// Search (or load) a heatmap for every configured controller and write the
/// requested SVG and CSV files.
pub fn run_heatmaps(config: &HeatmapConfig, store: &mut dyn MatrixStore) -> Result<Vec<HeatmapOutput>, AppError> {
    let steps = step_range(config.error_limit, config.edo)?;
    let universe = IntervalUniverse::build(&config.universe);
    if universe.is_empty() && !config.cached {
        warn!(
            universe = %config.universe.describe(),
            "no intervals to score; every cell will be zero"
        );
    }
    info!(
        universe = %config.universe.describe(),
        intervals = universe.len(),
        steps = steps.len(),
        "interval universe ready"
    );

    let key_mode = if config.symmetric_cache {
        KeyMode::Sorted
    } else {
        KeyMode::Ordered
    };

    let mut outputs = Vec::with_capacity(config.controllers.len());
    for &controller in &config.controllers {
        let job = GridJob {
            controller,
            universe: &universe,
            error_limit: config.error_limit,
            steps: &steps,
            jobs: config.jobs,
            key_mode,
            cached: config.cached,
        };
        let matrix = grid_search(&job, store)?;
        let title = format!(
            "{} approximation by {} note layouts",
            config.universe.describe(),
            controller.display_name()
        );

        if let Some(dir) = &config.svg_dir {
            let path = output_path(dir, controller, "svg")?;
            crate::plot::svg::write_heatmap_svg(&path, &matrix, &title, controller.axis_labels())?;
            info!(path = %path.display(), "wrote heatmap");
        }
        if let Some(dir) = &config.export_csv_dir {
            let path = output_path(dir, controller, "csv")?;
            crate::io::export::write_matrix_csv(&path, &matrix)?;
            info!(path = %path.display(), "wrote csv");
        }

        outputs.push(HeatmapOutput {
            controller,
            title,
            matrix,
        });
    }
    Ok(outputs)
}

/// Combine the stored matrices of `config.controllers` into a ranked table.
pub fn run_table(config: &TableConfig, store: &dyn MatrixStore) -> Result<Vec<TableRow>, AppError> {
    if config.controllers.is_empty() {
        return Err(AppError::input("At least one controller is required."));
    }
    let matrices = config
        .controllers
        .iter()
        .map(|c| load_required(store, c.key())?.to_matrix())
        .collect::<Result<Vec<_>, _>>()?;
    build_table(&matrices, config.top_n)
}

/// Rank step pairs for the configured targets, writing the best one as a
/// scale file when requested.
pub fn run_fit(config: &FitConfig) -> Result<Vec<FitResult>, AppError> {
    if config.scl_path.is_some() && !config.controller.is_hex() {
        return Err(AppError::input(format!(
            "A .scl file can only be written for Exquis layouts, not {}.",
            config.controller.display_name()
        )));
    }
    let opts = RatioFitOptions {
        min_step: config.min_step,
        max_step: config.max_step,
        top_n: config.top_n,
    };
    let vectors = config.controller.vectors();
    info!(
        controller = config.controller.key(),
        targets = config.targets.len(),
        min_step = opts.min_step,
        max_step = opts.max_step,
        "fitting ratios"
    );
    let results = fit_ratios(&config.targets, &vectors, &opts)?;

    if let Some(path) = &config.scl_path {
        let best = results
            .first()
            .ok_or_else(|| AppError::data("No candidate to write as a scale."))?;
        let description = config.scl_description.clone().unwrap_or_else(|| {
            format!(
                "Exquis up-left {} up-right {}",
                fmt_step(best.steps.first),
                fmt_step(best.steps.second)
            )
        });
        let notes = exquis_scale_notes(to_scale_basis(best.steps));
        write_scl(path, &description, &notes)?;
        info!(path = %path.display(), "wrote scale");
    }
    Ok(results)
}

fn output_path(dir: &Path, controller: Controller, ext: &str) -> Result<std::path::PathBuf, AppError> {
    std::fs::create_dir_all(dir)
        .map_err(|e| AppError::input(format!("Failed to create '{}': {e}", dir.display())))?;
    Ok(dir.join(format!("{}.{ext}", controller.key())))
}
