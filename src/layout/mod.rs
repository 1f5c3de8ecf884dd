//! Controller geometry.
//!
//! Each supported controller is a closed enum variant that knows its display
//! name, axis labels, and how to generate the lattice vectors of its pads.

pub mod controller;
pub mod vectors;

pub use controller::*;
pub use vectors::*;
