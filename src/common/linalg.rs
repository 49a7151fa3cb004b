//! Linear algebra utilities
//!
//! Inversion, factorization and Gaussian helpers used by the predictor, the
//! Swerling updater and the likelihood accumulator. Every inversion goes
//! through [`invert`] so the strategy and singularity tolerance are applied
//! consistently.

use nalgebra::linalg::Cholesky;
use nalgebra::storage::RawStorage;
use nalgebra::{DMatrix, DVector, Dim, Dyn, Matrix};
use serde::Serialize;

use crate::filter::errors::{FilterError, Quantity, Result};

/// Strategy used to invert covariance and information matrices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum InversionMethod {
    /// Cholesky factorization of the symmetrized matrix.
    ///
    /// Requires positive definiteness, which every matrix inverted by the
    /// filter has by construction.
    #[default]
    Cholesky,
    /// LU decomposition with partial pivoting.
    ///
    /// Accepts any non-singular matrix; use when the inputs are not exactly
    /// symmetric.
    Lu,
}

/// Check that every entry is finite
pub fn all_finite<R: Dim, C: Dim, S: RawStorage<f64, R, C>>(matrix: &Matrix<f64, R, C, S>) -> bool {
    matrix.iter().all(|v| v.is_finite())
}

/// Make matrix symmetric
///
/// Averages the matrix with its transpose: `(M + Mᵀ) / 2`.
pub fn symmetrize(matrix: &DMatrix<f64>) -> DMatrix<f64> {
    0.5 * (matrix + matrix.transpose())
}

/// Largest absolute entry of `M − Mᵀ`
pub fn asymmetry(matrix: &DMatrix<f64>) -> f64 {
    if matrix.is_empty() {
        return 0.0;
    }
    (matrix - matrix.transpose()).amax()
}

/// Check symmetry within an absolute tolerance
pub fn is_symmetric(matrix: &DMatrix<f64>, tolerance: f64) -> bool {
    matrix.is_square() && asymmetry(matrix) <= tolerance
}

/// Check if matrix is positive definite
pub fn is_positive_definite(matrix: &DMatrix<f64>) -> bool {
    matrix.clone().cholesky().is_some()
}

/// Ratio of the smallest to the largest absolute diagonal entry.
///
/// Returns 0 for an empty or all-zero diagonal.
fn diagonal_ratio(diagonal: &DVector<f64>) -> f64 {
    let (min, max) = diagonal
        .iter()
        .map(|d| d.abs())
        .fold((f64::INFINITY, 0.0_f64), |(lo, hi), d| (lo.min(d), hi.max(d)));
    if max > 0.0 {
        min / max
    } else {
        0.0
    }
}

/// Cholesky-factor a symmetric matrix, rejecting ill-conditioned input.
///
/// The reciprocal condition estimate is `(min Lᵢᵢ / max Lᵢᵢ)²`.
pub fn cholesky_checked(
    matrix: &DMatrix<f64>,
    tolerance: f64,
    quantity: Quantity,
) -> Result<Cholesky<f64, Dyn>> {
    if !all_finite(matrix) {
        return Err(FilterError::non_finite(quantity));
    }

    let chol = symmetrize(matrix)
        .cholesky()
        .ok_or_else(|| FilterError::singular(quantity))?;

    let ratio = diagonal_ratio(&chol.l_dirty().diagonal());
    let rcond = ratio * ratio;
    // NaN fails this comparison too
    if !(rcond >= tolerance) {
        return Err(FilterError::singular(quantity));
    }

    Ok(chol)
}

/// Invert a square matrix with the configured strategy.
///
/// # Errors
/// - `SingularMatrix` if the matrix is not invertible within `tolerance`
/// - `NonFiniteResult` if the input or the computed inverse is not finite
pub fn invert(
    matrix: &DMatrix<f64>,
    method: InversionMethod,
    tolerance: f64,
    quantity: Quantity,
) -> Result<DMatrix<f64>> {
    let inverse = match method {
        InversionMethod::Cholesky => cholesky_checked(matrix, tolerance, quantity)?.inverse(),
        InversionMethod::Lu => {
            if !all_finite(matrix) {
                return Err(FilterError::non_finite(quantity));
            }
            let lu = matrix.clone().lu();
            let rcond = diagonal_ratio(&lu.u().diagonal());
            if !(rcond >= tolerance) {
                return Err(FilterError::singular(quantity));
            }
            lu.try_inverse()
                .ok_or_else(|| FilterError::singular(quantity))?
        }
    };

    if !all_finite(&inverse) {
        return Err(FilterError::singular(quantity));
    }
    Ok(inverse)
}

/// `ln det(A)` from the Cholesky factor of `A`
pub fn log_determinant(chol: &Cholesky<f64, Dyn>) -> f64 {
    2.0 * chol.l_dirty().diagonal().iter().map(|d| d.ln()).sum::<f64>()
}

/// Squared Mahalanobis norm `eᵀ A⁻¹ e`, solved through the Cholesky factor of `A`
pub fn mahalanobis_squared(chol: &Cholesky<f64, Dyn>, residual: &DVector<f64>) -> f64 {
    let solved = chol.solve(residual);
    residual.dot(&solved)
}

/// Symmetric square root `S` of a PSD matrix with `S Sᵀ = A`.
///
/// Uses the eigen-decomposition so that singular (PSD but not PD) matrices,
/// such as a zero process noise, are accepted. Negative eigenvalues from
/// round-off are clamped to zero.
pub fn psd_square_root(matrix: &DMatrix<f64>) -> DMatrix<f64> {
    let eigen = symmetrize(matrix).symmetric_eigen();
    let roots = eigen.eigenvalues.map(|l| l.max(0.0).sqrt());
    &eigen.eigenvectors * DMatrix::from_diagonal(&roots)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-12;

    fn spd_3x3() -> DMatrix<f64> {
        #[rustfmt::skip]
        let m = DMatrix::from_row_slice(3, 3, &[
            4.0, 1.0, 0.5,
            1.0, 3.0, 0.2,
            0.5, 0.2, 2.0,
        ]);
        m
    }

    #[test]
    fn test_symmetrize() {
        let m = DMatrix::from_row_slice(2, 2, &[1.0, 2.0, 4.0, 3.0]);
        let s = symmetrize(&m);
        assert_eq!(s[(0, 1)], 3.0);
        assert_eq!(s[(1, 0)], 3.0);
        assert!(is_symmetric(&s, 0.0));
        assert!((asymmetry(&m) - 2.0).abs() < 1e-15);
    }

    #[test]
    fn test_invert_cholesky_and_lu_agree() {
        let m = spd_3x3();
        let a = invert(&m, InversionMethod::Cholesky, TOL, Quantity::PriorCovariance).unwrap();
        let b = invert(&m, InversionMethod::Lu, TOL, Quantity::PriorCovariance).unwrap();
        assert!((&a - &b).amax() < 1e-12);

        let identity = &m * &a;
        assert!((identity - DMatrix::identity(3, 3)).amax() < 1e-12);
    }

    #[test]
    fn test_invert_zero_matrix_is_singular() {
        let zero = DMatrix::zeros(2, 2);
        for method in [InversionMethod::Cholesky, InversionMethod::Lu] {
            let err = invert(&zero, method, TOL, Quantity::MeasurementNoise).unwrap_err();
            assert!(matches!(
                err,
                FilterError::SingularMatrix {
                    quantity: Quantity::MeasurementNoise,
                    ..
                }
            ));
        }
    }

    #[test]
    fn test_invert_scalar_zero_is_singular() {
        let zero = DMatrix::zeros(1, 1);
        let err = invert(&zero, InversionMethod::Cholesky, TOL, Quantity::MeasurementNoise);
        assert!(err.is_err());
    }

    #[test]
    fn test_invert_rank_deficient_is_singular() {
        let m = DMatrix::from_row_slice(2, 2, &[1.0, 1.0, 1.0, 1.0]);
        assert!(invert(&m, InversionMethod::Cholesky, TOL, Quantity::PriorCovariance).is_err());
        assert!(invert(&m, InversionMethod::Lu, TOL, Quantity::PriorCovariance).is_err());
    }

    #[test]
    fn test_invert_rejects_ill_conditioned() {
        let m = DMatrix::from_diagonal(&DVector::from_vec(vec![1.0, 1e-14]));
        let err = invert(&m, InversionMethod::Lu, 1e-10, Quantity::PriorCovariance);
        assert!(err.is_err());
        // Same matrix is fine with a looser tolerance
        assert!(invert(&m, InversionMethod::Lu, 1e-16, Quantity::PriorCovariance).is_ok());
    }

    #[test]
    fn test_invert_nan_input_is_non_finite() {
        let m = DMatrix::from_row_slice(1, 1, &[f64::NAN]);
        let err = invert(&m, InversionMethod::Cholesky, TOL, Quantity::PriorCovariance).unwrap_err();
        assert!(matches!(err, FilterError::NonFiniteResult { .. }));
    }

    #[test]
    fn test_log_determinant_and_mahalanobis() {
        let m = spd_3x3();
        let chol = cholesky_checked(&m, TOL, Quantity::ResidualCovariance).unwrap();
        assert!((log_determinant(&chol) - m.determinant().ln()).abs() < 1e-12);

        let e = DVector::from_vec(vec![1.0, -2.0, 0.5]);
        let inv = m.clone().try_inverse().unwrap();
        let expected = e.dot(&(&inv * &e));
        assert!((mahalanobis_squared(&chol, &e) - expected).abs() < 1e-12);
    }

    #[test]
    fn test_psd_square_root() {
        let m = spd_3x3();
        let s = psd_square_root(&m);
        assert!((&s * s.transpose() - &m).amax() < 1e-10);

        // Singular PSD input is accepted
        let singular = DMatrix::from_row_slice(2, 2, &[1.0, 1.0, 1.0, 1.0]);
        let s = psd_square_root(&singular);
        assert!((&s * s.transpose() - &singular).amax() < 1e-10);
    }

    #[test]
    fn test_is_positive_definite() {
        assert!(is_positive_definite(&spd_3x3()));
        assert!(!is_positive_definite(&DMatrix::from_row_slice(
            2,
            2,
            &[1.0, 2.0, 2.0, 1.0]
        )));
    }
}
