use std::collections::HashSet;

use iso_layout::app::pipeline::run_heatmaps;
use iso_layout::domain::{HeatmapConfig, StepPair};
use iso_layout::fit::ratio_fit::{RatioFitOptions, evaluate, fit_ratios};
use iso_layout::io::store::{JsonFileStore, MatrixStore};
use iso_layout::layout::Controller;
use iso_layout::math::{Interval, IntervalUniverse, UniverseParams};

fn iv(n: u64, d: u64) -> Interval {
    Interval::new(n, d).unwrap()
}

#[test]
fn five_limit_universe_within_an_octave() {
    let universe = IntervalUniverse::build(&UniverseParams {
        integer_limit: 5,
        subgroup: None,
        range: Some(iv(2, 1)),
    });
    let got: Vec<Interval> = universe.intervals().collect();
    let mut want = vec![
        iv(1, 2),
        iv(3, 5),
        iv(2, 3),
        iv(3, 4),
        iv(4, 5),
        iv(5, 4),
        iv(4, 3),
        iv(3, 2),
        iv(5, 3),
        iv(2, 1),
    ];
    want.sort();
    assert_eq!(got, want);
}

#[test]
fn rectangular_controller_pads_are_a_full_grid() {
    let pads = Controller::Launchpad.vectors();
    assert_eq!(pads.len(), 64);
    let unique: HashSet<(i32, i32)> = pads.iter().map(|v| (v.dy, v.dx)).collect();
    assert_eq!(unique.len(), 64);
    assert!(pads.iter().all(|v| (-4..4).contains(&v.dy) && (-4..4).contains(&v.dx)));
    assert!(unique.contains(&(0, 0)));
}

#[test]
fn best_fit_is_minimal_over_all_candidates() {
    let vectors = Controller::Exquis39.vectors();
    let targets = [0.0, iv(5, 4).cents()];
    let opts = RatioFitOptions {
        min_step: 20,
        max_step: 60,
        top_n: 10,
    };

    let results = fit_ratios(&targets, &vectors, &opts).unwrap();
    assert_eq!(results.len(), 10);

    let best = results[0];
    for steps in opts.candidates() {
        let r = evaluate(&targets, &vectors, steps).unwrap();
        assert!(best.composite() <= r.composite(), "{steps:?} beats the reported best");
        if !results.iter().any(|kept| kept.steps == steps) {
            assert!(
                best.max_error <= r.max_error,
                "{steps:?} was dropped with a smaller max error"
            );
        }
    }
    for r in &results {
        assert_eq!(evaluate(&targets, &vectors, r.steps), Some(*r));
    }
}

#[test]
fn cached_heatmap_reproduces_stored_matrix() {
    let dir = std::env::temp_dir().join(format!("iso_layout_it_{}", std::process::id()));
    let cache = dir.join("cache.json");
    let config = HeatmapConfig {
        universe: UniverseParams::with_limit(6),
        error_limit: 15.0,
        edo: Some(19),
        controllers: vec![Controller::Linnstrument128],
        cached: false,
        jobs: 2,
        symmetric_cache: false,
        cache_path: cache.clone(),
        svg_dir: None,
        export_csv_dir: Some(dir.join("csv")),
        preview: false,
        preview_width: 40,
        preview_height: 20,
    };

    let mut store = JsonFileStore::new(&cache);
    let computed = run_heatmaps(&config, &mut store).unwrap();
    assert_eq!(computed[0].matrix.len(), 18);
    assert!(dir.join("csv").join("linnstrument128.csv").exists());

    let stored = store.load("linnstrument128").unwrap().unwrap();
    assert_eq!(stored.to_matrix().unwrap(), computed[0].matrix);

    // Cell values are already rounded, so a cached run is a fixed point.
    let mut reopened = JsonFileStore::new(&cache);
    let cached = run_heatmaps(&HeatmapConfig { cached: true, ..config }, &mut reopened).unwrap();
    assert_eq!(cached[0].matrix, computed[0].matrix);
    assert_eq!(
        cached[0].matrix.step_pair(0, 1),
        StepPair::new(1200.0 / 19.0, 2400.0 / 19.0)
    );

    let _ = std::fs::remove_dir_all(&dir);
}
