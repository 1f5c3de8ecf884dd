//! `iso-layout` library crate.
//!
//! The binary (`isolayout`) is a thin wrapper around this library so that:
//!
//! - scoring and search are testable without spawning processes
//! - controller geometry and interval math are reusable on their own
//! - code stays easy to navigate as the project grows

pub mod app;
pub mod cli;
pub mod domain;
pub mod error;
pub mod fit;
pub mod io;
pub mod layout;
pub mod math;
pub mod plot;
pub mod report;
