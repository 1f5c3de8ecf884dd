//! Scoring and search.
//!
//! Responsibilities:
//!
//! - build the step-size axis of the heatmap (`step_grid`)
//! - score one step pair against an interval universe (`score`)
//! - score the full grid in parallel, with a persistent cache (`grid_search`)
//! - rank step pairs for explicit target ratios (`ratio_fit`)

pub mod grid_search;
pub mod ratio_fit;
pub mod score;
pub mod step_grid;

pub use grid_search::*;
pub use ratio_fit::*;
pub use score::*;
pub use step_grid::*;
