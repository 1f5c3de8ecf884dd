//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - lattice geometry and search coordinates (`LatticeVector`, `StepPair`)
//! - the score matrix produced by grid search (`ScoreMatrix`)
//! - explicit-fit outputs (`FitResult`)
//! - run configurations built from CLI flags

pub mod matrix;
pub mod types;

pub use matrix::*;
pub use types::*;
