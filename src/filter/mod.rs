//! Filter implementations
//!
//! - [`Filter`] - Step-wise trait
//! - [`SwerlingFilter`] - Kalman filter with the Swerling measurement update
//! - [`run_batch`] / [`evaluate_batch`] - Many independent invocations
//! - [`FilterError`] - Error taxonomy shared by every component

pub mod batch;
pub mod errors;
pub mod swerling;
pub mod traits;

pub use batch::{evaluate_batch, run_batch};
pub use errors::{FilterError, Quantity, Result};
pub use swerling::{neg_log_likelihood, run_swerling_filter, SwerlingFilter};
pub use traits::Filter;
