//! Gaussian state carried between filter steps.

use nalgebra::{DMatrix, DVector};

use crate::common::linalg::all_finite;

/// Mean and error covariance of the state estimate
///
/// This is the only value carried from one step to the next. Each predict or
/// update produces a fresh `GaussianState`; nothing is mutated in place.
#[derive(Debug, Clone, PartialEq)]
pub struct GaussianState {
    /// State mean (X), length n
    pub mean: DVector<f64>,
    /// Error covariance (P), n×n
    pub covariance: DMatrix<f64>,
}

impl GaussianState {
    /// Create a new Gaussian state
    pub fn new(mean: DVector<f64>, covariance: DMatrix<f64>) -> Self {
        Self { mean, covariance }
    }

    /// Zero mean with the given covariance
    pub fn zero_mean(covariance: DMatrix<f64>) -> Self {
        let n = covariance.nrows();
        Self::new(DVector::zeros(n), covariance)
    }

    /// Get state dimension
    #[inline]
    pub fn x_dim(&self) -> usize {
        self.mean.len()
    }

    /// Diagonal of the error covariance (per-component variances)
    pub fn covariance_diagonal(&self) -> DVector<f64> {
        self.covariance.diagonal()
    }

    /// True if mean and covariance contain no NaN or infinity
    pub fn is_finite(&self) -> bool {
        all_finite(&self.mean) && all_finite(&self.covariance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_covariance_diagonal() {
        let state = GaussianState::new(
            DVector::from_vec(vec![1.0, 2.0]),
            DMatrix::from_row_slice(2, 2, &[4.0, 0.5, 0.5, 9.0]),
        );
        assert_eq!(state.x_dim(), 2);
        assert_eq!(state.covariance_diagonal(), DVector::from_vec(vec![4.0, 9.0]));
        assert!(state.is_finite());
    }

    #[test]
    fn test_zero_mean_and_finiteness() {
        let mut state = GaussianState::zero_mean(DMatrix::identity(3, 3));
        assert_eq!(state.mean, DVector::zeros(3));
        state.mean[1] = f64::INFINITY;
        assert!(!state.is_finite());
    }
}
