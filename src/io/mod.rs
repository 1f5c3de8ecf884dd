//! Input/output helpers.
//!
//! - persistent score-matrix cache (`store`)
//! - CSV export of a score matrix (`export`)
//! - Scala scale export of a fitted Exquis layout (`scl`)

pub mod export;
pub mod scl;
pub mod store;

pub use export::*;
pub use scl::*;
pub use store::*;
