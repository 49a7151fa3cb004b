//! Measurement update in Swerling (inverse-covariance) form.
//!
//! The posterior covariance comes from inverting a sum of information matrices
//! rather than from the gain/covariance recursion:
//!
//! ```text
//! P⁺ = (P⁻¹ + Hᵀ R⁻¹ H)⁻¹
//! K  = P⁺ Hᵀ R⁻¹
//! X⁺ = X + K (z − H X)
//! ```
//!
//! That is two explicit inversions per update (`P⁻¹`, then the summed
//! information) plus the fixed `R⁻¹`, so conditioning matters more here than
//! in the gain form. All three go through [`invert`] with the configured
//! [`NumericsConfig`], and any failure surfaces as `SingularMatrix`.
//!
//! The innovation covariance `S = R + H P Hᵀ` is computed for the likelihood
//! and returned, but never used to form the gain.
//!
//! [`gain_form_update`] is the textbook update, kept as the reference the
//! Swerling form is cross-checked against.

use nalgebra::{DMatrix, DVector};

use crate::common::linalg::{all_finite, cholesky_checked, invert, symmetrize};
use crate::filter::errors::{FilterError, Quantity, Result};
use crate::types::{GaussianState, NumericsConfig, SensorModel, UpdateOutput};

/// Fuse one measurement into a prior using inverse-covariance arithmetic
///
/// # Arguments
/// * `prior` - Predicted state mean and covariance
/// * `measurement` - Observation z (length m)
/// * `sensor` - Observation matrix H and measurement noise R
/// * `numerics` - Inversion strategy and singularity tolerance
///
/// # Errors
/// - `ShapeMismatch` if `measurement` is not length m
/// - `SingularMatrix` if R, P or `P⁻¹ + HᵀR⁻¹H` cannot be inverted
/// - `NonFiniteResult` if the posterior contains NaN or infinity
///
/// Step indices in returned errors are 0; the driver attaches the real step.
pub fn swerling_update(
    prior: &GaussianState,
    measurement: &DVector<f64>,
    sensor: &SensorModel,
    numerics: &NumericsConfig,
) -> Result<UpdateOutput> {
    let h = &sensor.observation_matrix;
    let r = &sensor.measurement_noise;
    check_measurement(measurement, sensor)?;

    let invert_as = |matrix: &DMatrix<f64>, quantity: Quantity| {
        invert(
            matrix,
            numerics.inversion,
            numerics.singularity_tolerance,
            quantity,
        )
    };

    // Innovation
    let residual = measurement - h * &prior.mean;

    // Innovation covariance (likelihood and output only)
    let residual_covariance = r + h * &prior.covariance * h.transpose();

    // Hᵀ R⁻¹, shared by the information increment and the gain
    let information_term = h.transpose() * invert_as(r, Quantity::MeasurementNoise)?;

    // P⁺ = (P⁻¹ + Hᵀ R⁻¹ H)⁻¹
    let prior_information = invert_as(&prior.covariance, Quantity::PriorCovariance)?;
    let information = prior_information + &information_term * h;
    let covariance = symmetrize(&invert_as(&information, Quantity::PosteriorInformation)?);

    let gain = &covariance * &information_term;
    let mean = &prior.mean + &gain * &residual;

    if !all_finite(&mean) {
        return Err(FilterError::non_finite(Quantity::PosteriorMean));
    }
    if !all_finite(&covariance) {
        return Err(FilterError::non_finite(Quantity::PosteriorCovariance));
    }

    Ok(UpdateOutput {
        posterior: GaussianState::new(mean, covariance),
        residual,
        residual_covariance,
    })
}

/// Standard Kalman gain update (Joseph form)
///
/// ```text
/// S  = H P Hᵀ + R
/// K  = P Hᵀ S⁻¹
/// X⁺ = X + K (z − H X)
/// P⁺ = (I − K H) P (I − K H)ᵀ + K R Kᵀ
/// ```
///
/// Only `S` is factored, so this needs a single inversion per step.
pub fn gain_form_update(
    prior: &GaussianState,
    measurement: &DVector<f64>,
    sensor: &SensorModel,
    numerics: &NumericsConfig,
) -> Result<UpdateOutput> {
    let h = &sensor.observation_matrix;
    let r = &sensor.measurement_noise;
    check_measurement(measurement, sensor)?;

    let residual = measurement - h * &prior.mean;
    let residual_covariance = h * &prior.covariance * h.transpose() + r;

    // K = P Hᵀ S⁻¹ = (S⁻¹ H P)ᵀ with S and P symmetric
    let chol = cholesky_checked(
        &residual_covariance,
        numerics.singularity_tolerance,
        Quantity::ResidualCovariance,
    )?;
    let gain = chol.solve(&(h * &prior.covariance)).transpose();

    let mean = &prior.mean + &gain * &residual;

    let n = prior.x_dim();
    let i_minus_kh = DMatrix::identity(n, n) - &gain * h;
    let covariance = &i_minus_kh * &prior.covariance * i_minus_kh.transpose()
        + &gain * r * gain.transpose();

    Ok(UpdateOutput {
        posterior: GaussianState::new(mean, symmetrize(&covariance)),
        residual,
        residual_covariance,
    })
}

fn check_measurement(measurement: &DVector<f64>, sensor: &SensorModel) -> Result<()> {
    let m = sensor.z_dim();
    if measurement.len() != m {
        return Err(FilterError::shape(
            Quantity::Measurement,
            (m, 1),
            (measurement.len(), 1),
        ));
    }
    Ok(())
}
