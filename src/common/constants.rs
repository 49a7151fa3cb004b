//! Numerical constants used throughout the filter
//!
//! These are defaults; the user-facing knobs live in
//! [`NumericsConfig`](crate::types::NumericsConfig).

/// Default reciprocal-condition threshold for matrix inversion
///
/// A matrix whose reciprocal condition estimate falls below this value is
/// reported as singular instead of being inverted.
///
/// For the Cholesky path the estimate is `(min Lᵢᵢ / max Lᵢᵢ)²`, for the LU
/// path it is `min |Uᵢᵢ| / max |Uᵢᵢ|`.
pub const DEFAULT_SINGULARITY_TOLERANCE: f64 = 1e-12;

/// Absolute tolerance used when checking covariance symmetry
pub const SYMMETRY_TOLERANCE: f64 = 1e-9;

/// `ln(2π)`, the per-dimension Gaussian normalization term
pub const LN_2PI: f64 = 1.837_877_066_409_345_5;
