//! Pitch and interval math.
//!
//! - reduced fractions, primes, cents, Tenney height (`interval`)
//! - command-line pitch parsing (`pitch`)
//! - the interval universe a layout is scored against (`universe`)

pub mod interval;
pub mod pitch;
pub mod universe;

pub use interval::*;
pub use pitch::*;
pub use universe::*;
