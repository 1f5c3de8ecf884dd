//! Exhaustive grid search over step pairs.
//!
//! Every cell `(i, j)` of the matrix is `score(steps[i], steps[j])`. Rows are
//! independent, so they are scored in parallel on a bounded rayon pool and
//! collected in row order. Each worker split owns its memoization cache.
//!
//! Results are rounded to one decimal and persisted under the controller key.
//! A cached run reads that entry back instead of computing anything.

use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::domain::{ScoreMatrix, StepPair};
use crate::error::AppError;
use crate::fit::score::{KeyMode, ScoreCache, Scorer};
use crate::io::store::{load_required, MatrixStore, StoredMatrix};
use crate::layout::Controller;
use crate::math::IntervalUniverse;

/// One controller's heatmap search.
#[derive(Debug, Clone, Copy)]
pub struct GridJob<'a> {
    pub controller: Controller,
    pub universe: &'a IntervalUniverse,
    pub error_limit: f64,
    pub steps: &'a [f64],
    /// Worker threads; `0` means one per available core.
    pub jobs: usize,
    pub key_mode: KeyMode,
    /// Read the stored matrix instead of computing.
    pub cached: bool,
}

/// Compute (or load) the rounded score matrix for `job`.
pub fn grid_search(job: &GridJob<'_>, store: &mut dyn MatrixStore) -> Result<ScoreMatrix, AppError> {
    let key = job.controller.key();

    if job.cached {
        let matrix = load_required(store, key)?.to_matrix()?;
        info!(controller = key, size = matrix.len(), "loaded cached score matrix");
        if matrix.steps() != job.steps {
            warn!(
                controller = key,
                "cached matrix was computed on a different step range; using it as stored"
            );
        }
        return Ok(matrix);
    }

    let vectors = job.controller.vectors();
    let scorer = Scorer::new(job.universe, &vectors, job.error_limit)?;
    info!(
        controller = key,
        pads = vectors.len(),
        intervals = job.universe.len(),
        steps = job.steps.len(),
        "scoring grid"
    );

    let matrix = compute_matrix(&scorer, job.steps, job.jobs, job.key_mode)?.rounded();
    store.save(key, &StoredMatrix::from_matrix(key, &matrix))?;
    info!(controller = key, "stored score matrix");

    Ok(matrix)
}

/// Score the full square grid `steps × steps` (unrounded).
pub fn compute_matrix(
    scorer: &Scorer<'_>,
    steps: &[f64],
    jobs: usize,
    key_mode: KeyMode,
) -> Result<ScoreMatrix, AppError> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(jobs)
        .build()
        .map_err(|e| AppError::input(format!("Failed to start worker pool: {e}")))?;
    debug!(threads = pool.current_num_threads(), "worker pool ready");

    let rows: Vec<Vec<f64>> = pool.install(|| {
        steps
            .par_iter()
            .enumerate()
            .map_init(
                || ScoreCache::new(key_mode),
                |cache, (i, &first)| {
                    let row: Vec<f64> = steps
                        .iter()
                        .map(|&second| scorer.score_cached(StepPair::new(first, second), cache))
                        .collect();
                    debug!(row = i, step = first, memo = cache.len(), hits = cache.hits(), "row scored");
                    row
                },
            )
            .collect()
    });

    ScoreMatrix::from_rows(steps.to_vec(), rows)
}
