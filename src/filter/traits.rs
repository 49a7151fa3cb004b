//! Core filter trait
//!
//! Step-wise interface over the predict/update recursion. The batch driver
//! ([`SwerlingFilter::run`](super::SwerlingFilter::run)) is built on top of it.

use crate::types::{GaussianState, StepOutput};

use super::errors::FilterError;

/// Recursive filter processing one measurement at a time
pub trait Filter {
    /// Type of measurement consumed per step
    type Measurement;

    /// Predict, then fuse one measurement
    ///
    /// # Arguments
    /// * `measurement` - Observation for the next time step
    ///
    /// # Returns
    /// Step output, or an error. On error the internal state is unchanged.
    fn step(&mut self, measurement: &Self::Measurement) -> Result<StepOutput, FilterError>;

    /// Get current posterior (read-only)
    fn state(&self) -> &GaussianState;

    /// Reset filter to the initial state
    fn reset(&mut self);

    /// Number of successful steps since the last reset
    fn steps_taken(&self) -> usize;

    /// Get state dimension
    fn x_dim(&self) -> usize;

    /// Get measurement dimension
    fn z_dim(&self) -> usize;
}
