//! Heatmap rendering.
//!
//! - terminal preview (`ascii`)
//! - SVG heatmap file via Plotters (`svg`)

pub mod ascii;
pub mod svg;

pub use ascii::*;
pub use svg::*;
