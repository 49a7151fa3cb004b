//! Common utilities shared by the filter components.
//!
//! This module contains linear algebra helpers, numerical constants and the
//! model simulator used by tests and benchmarks.

pub mod constants;
pub mod linalg;
pub mod simulation;

pub use linalg::InversionMethod;
pub use simulation::{simulate, simulate_seeded, SimulatedSequence};
