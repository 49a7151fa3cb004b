//! State prediction under the linear dynamic model
//!
//! Propagates the posterior of one step into the prior of the next.

use crate::common::linalg::symmetrize;
use crate::types::{GaussianState, MotionModel};

/// Predict a Gaussian state forward one step
///
/// - `X' = F × X`
/// - `P' = F × P × Fᵀ + G × Q × Gᵀ`
///
/// `P'` is symmetrized so that round-off asymmetry does not accumulate over
/// long sequences.
pub fn predict(state: &GaussianState, motion: &MotionModel) -> GaussianState {
    let f = &motion.transition_matrix;

    let mean = f * &state.mean;

    let covariance = f * &state.covariance * f.transpose() + motion.driven_noise();

    GaussianState::new(mean, symmetrize(&covariance))
}
