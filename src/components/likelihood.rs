//! Gaussian innovation likelihood
//!
//! The negative log-likelihood of a measurement sequence under the model is
//!
//! ```text
//! neg_LLF = (m/2)·ln(2π)·N + Σₖ [ 0.5·ln det(Sₖ) + 0.5·eₖᵀ Sₖ⁻¹ eₖ ]
//! ```
//!
//! The constant is added once up front; each step contributes only the
//! bracketed term.

use nalgebra::{DMatrix, DVector};

use crate::common::constants::LN_2PI;
use crate::common::linalg::{cholesky_checked, log_determinant, mahalanobis_squared};
use crate::filter::errors::{FilterError, Quantity, Result};

/// Gaussian normalization term for `num_steps` observations of dimension `z_dim`
#[inline]
pub fn normalization_constant(z_dim: usize, num_steps: usize) -> f64 {
    0.5 * z_dim as f64 * LN_2PI * num_steps as f64
}

/// Per-step term `0.5·ln det(S) + 0.5·eᵀ S⁻¹ e`
///
/// Solves against the Cholesky factor of `S` rather than inverting it.
///
/// # Errors
/// - `SingularMatrix` if `S` is not positive definite within `tolerance`
/// - `NonFiniteResult` if the term is NaN or infinite
pub fn innovation_neg_log_likelihood(
    residual: &DVector<f64>,
    residual_covariance: &DMatrix<f64>,
    tolerance: f64,
) -> Result<f64> {
    let chol = cholesky_checked(residual_covariance, tolerance, Quantity::ResidualCovariance)?;

    let value = 0.5 * log_determinant(&chol) + 0.5 * mahalanobis_squared(&chol, residual);
    if !value.is_finite() {
        return Err(FilterError::non_finite(Quantity::NegLogLikelihood));
    }
    Ok(value)
}
