//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - sets up logging and loads `.env`
//! - parses CLI arguments into run configs
//! - runs the heatmap, table, or fit pipeline
//! - prints reports and previews

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Command, FitArgs, HeatmapArgs, TableArgs};
use crate::domain::{FitConfig, HeatmapConfig, TableConfig};
use crate::error::AppError;
use crate::io::store::JsonFileStore;
use crate::math::{Subgroup, UniverseParams, parse_pitch};

pub mod pipeline;

/// Environment variable overriding the default cache file.
pub const CACHE_ENV: &str = "ISOLAYOUT_CACHE";
pub const DEFAULT_CACHE: &str = "layout_heatmap.json";

/// Entry point for the `isolayout` binary.
pub fn run() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();
    match cli.command {
        Command::Heatmap(args) => handle_heatmap(&args),
        Command::Table(args) => handle_table(&args),
        Command::Fit(args) => handle_fit(&args),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    // A second init (e.g. from tests) is harmless.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn handle_heatmap(args: &HeatmapArgs) -> Result<(), AppError> {
    let config = heatmap_config_from_args(args)?;
    let mut store = JsonFileStore::new(&config.cache_path);
    let outputs = pipeline::run_heatmaps(&config, &mut store)?;

    for out in &outputs {
        println!(
            "{}",
            crate::report::format::format_heatmap_summary(out.controller, &out.matrix, &out.title)
        );
        if config.preview {
            println!(
                "{}",
                crate::plot::ascii::render_ascii_heatmap(&out.matrix, config.preview_width, config.preview_height)
            );
        }
    }
    Ok(())
}

fn handle_table(args: &TableArgs) -> Result<(), AppError> {
    let config = table_config_from_args(args);
    let store = JsonFileStore::new(&config.cache_path);
    let rows = pipeline::run_table(&config, &store)?;
    print!("{}", crate::report::format::format_table(&config.controllers, &rows));
    Ok(())
}

fn handle_fit(args: &FitArgs) -> Result<(), AppError> {
    let config = fit_config_from_args(args)?;
    let results = pipeline::run_fit(&config)?;
    print!(
        "{}",
        crate::report::format::format_fit_results(config.controller, &config.target_labels, &results)
    );
    Ok(())
}

pub fn heatmap_config_from_args(args: &HeatmapArgs) -> Result<HeatmapConfig, AppError> {
    if args.integer_limit < 1 {
        return Err(AppError::input("--integer-limit must be >= 1."));
    }
    if !(args.error_limit.is_finite() && args.error_limit > 0.0) {
        return Err(AppError::input(format!(
            "--error-limit must be a positive number of cents (got {}).",
            args.error_limit
        )));
    }

    let subgroup = args
        .subgroup
        .as_deref()
        .map(str::parse::<Subgroup>)
        .transpose()?;

    let range = match args.range.as_deref() {
        None => None,
        Some(s) => {
            let bound = parse_pitch(s)?
                .ratio()
                .ok_or_else(|| AppError::input(format!("--range must be a ratio such as 2/1 (got '{s}').")))?;
            if bound.num() < bound.den() {
                return Err(AppError::input(format!("--range must be >= 1/1 (got {bound}).")));
            }
            Some(bound)
        }
    };

    Ok(HeatmapConfig {
        universe: UniverseParams {
            integer_limit: args.integer_limit,
            subgroup,
            range,
        },
        error_limit: args.error_limit,
        edo: args.edo,
        controllers: dedup_controllers(&args.controllers),
        cached: args.cached,
        jobs: args.jobs,
        symmetric_cache: args.symmetric_cache,
        cache_path: resolve_cache_path(args.cache.as_ref()),
        svg_dir: args.svg_dir.clone(),
        export_csv_dir: args.export_csv.clone(),
        preview: args.preview,
        preview_width: args.width,
        preview_height: args.height,
    })
}

pub fn table_config_from_args(args: &TableArgs) -> TableConfig {
    TableConfig {
        controllers: dedup_controllers(&args.controllers),
        cache_path: resolve_cache_path(args.cache.as_ref()),
        top_n: args.top,
    }
}

pub fn fit_config_from_args(args: &FitArgs) -> Result<FitConfig, AppError> {
    let targets = args
        .ratios
        .iter()
        .map(|s| parse_pitch(s).map(|p| p.cents()))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(FitConfig {
        targets,
        target_labels: args.ratios.clone(),
        controller: args.controller,
        min_step: args.min_step,
        max_step: args.max_step,
        top_n: args.top,
        scl_path: args.scl.clone(),
        scl_description: args.scl_description.clone(),
    })
}

/// `--cache`, then `$ISOLAYOUT_CACHE`, then `layout_heatmap.json`.
pub fn resolve_cache_path(flag: Option<&PathBuf>) -> PathBuf {
    if let Some(p) = flag {
        return p.clone();
    }
    std::env::var_os(CACHE_ENV)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CACHE))
}

/// Keep the first occurrence of each controller, in order.
fn dedup_controllers(controllers: &[crate::layout::Controller]) -> Vec<crate::layout::Controller> {
    let mut out = Vec::with_capacity(controllers.len());
    for &c in controllers {
        if !out.contains(&c) {
            out.push(c);
        }
    }
    out
}
