//! Configuration types for the filter
//!
//! The model is split into focused pieces rather than one positional bundle:
//! [`MotionModel`] (F, G, Q), [`SensorModel`] (H, R), the initial
//! [`GaussianState`] (X0, P0) and [`NumericsConfig`]. [`FilterParams`] ties
//! them together and validates every dimension once, before any step runs.

use nalgebra::{DMatrix, DVector};
use serde::Serialize;

use crate::common::constants::DEFAULT_SINGULARITY_TOLERANCE;
use crate::common::linalg::InversionMethod;
use crate::filter::errors::{FilterError, Quantity, Result};

use super::state::GaussianState;

/// Linear dynamic model with additive Gaussian process noise
///
/// `x[k+1] = F x[k] + G w[k]`, `w[k] ~ N(0, Q)`
#[derive(Debug, Clone)]
pub struct MotionModel {
    /// State transition matrix (F), n×n
    pub transition_matrix: DMatrix<f64>,
    /// Noise input matrix (G), n×q
    pub noise_input: DMatrix<f64>,
    /// Process noise covariance (Q), q×q
    pub process_noise: DMatrix<f64>,
}

impl MotionModel {
    /// Create a new motion model
    pub fn new(
        transition_matrix: DMatrix<f64>,
        noise_input: DMatrix<f64>,
        process_noise: DMatrix<f64>,
    ) -> Self {
        Self {
            transition_matrix,
            noise_input,
            process_noise,
        }
    }

    /// Get state dimension
    #[inline]
    pub fn x_dim(&self) -> usize {
        self.transition_matrix.nrows()
    }

    /// Get process noise dimension
    #[inline]
    pub fn noise_dim(&self) -> usize {
        self.noise_input.ncols()
    }

    /// Process noise as seen by the state: `G Q Gᵀ`
    pub fn driven_noise(&self) -> DMatrix<f64> {
        &self.noise_input * &self.process_noise * self.noise_input.transpose()
    }

    /// Scalar random walk: `x' = x + w`, `w ~ N(0, q)`
    pub fn random_walk(process_variance: f64) -> Self {
        Self::new(
            DMatrix::from_element(1, 1, 1.0),
            DMatrix::from_element(1, 1, 1.0),
            DMatrix::from_element(1, 1, process_variance),
        )
    }

    /// Constant velocity model in 1D
    /// State: [position, velocity]
    ///
    /// Transition matrix F = [1, dt; 0, 1]
    /// Noise input G = [dt²/2; dt] (white acceleration, q = 1)
    pub fn constant_velocity_1d(dt: f64, acceleration_variance: f64) -> Self {
        #[rustfmt::skip]
        let f = DMatrix::from_row_slice(2, 2, &[
            1.0, dt,    // p' = p + dt*v
            0.0, 1.0,   // v' = v
        ]);
        let g = DMatrix::from_column_slice(2, 1, &[0.5 * dt * dt, dt]);
        let q = DMatrix::from_element(1, 1, acceleration_variance);

        Self::new(f, g, q)
    }

    /// Check F, G and Q against each other.
    pub fn validate(&self) -> Result<()> {
        let n = self.x_dim();
        if n == 0 {
            return Err(FilterError::Configuration {
                description: "state dimension must be positive".to_string(),
            });
        }
        let q = self.noise_dim();

        check_shape(Quantity::TransitionMatrix, &self.transition_matrix, (n, n))?;
        check_shape(Quantity::NoiseInput, &self.noise_input, (n, q))?;
        check_shape(Quantity::ProcessNoise, &self.process_noise, (q, q))?;
        Ok(())
    }
}

/// Linear observation model with additive Gaussian measurement noise
///
/// `z[k] = H x[k] + v[k]`, `v[k] ~ N(0, R)`
#[derive(Debug, Clone)]
pub struct SensorModel {
    /// Observation matrix (H), m×n
    pub observation_matrix: DMatrix<f64>,
    /// Measurement noise covariance (R), m×m
    pub measurement_noise: DMatrix<f64>,
}

impl SensorModel {
    /// Create a new sensor model
    pub fn new(observation_matrix: DMatrix<f64>, measurement_noise: DMatrix<f64>) -> Self {
        Self {
            observation_matrix,
            measurement_noise,
        }
    }

    /// Get measurement dimension
    #[inline]
    pub fn z_dim(&self) -> usize {
        self.observation_matrix.nrows()
    }

    /// Get state dimension
    #[inline]
    pub fn x_dim(&self) -> usize {
        self.observation_matrix.ncols()
    }

    /// Direct scalar observation `z = x + v`, `v ~ N(0, r)`
    pub fn scalar(measurement_variance: f64) -> Self {
        Self::new(
            DMatrix::from_element(1, 1, 1.0),
            DMatrix::from_element(1, 1, measurement_variance),
        )
    }

    /// Position-only sensor for the 1D state [position, velocity]
    ///
    /// Observation matrix H = [1, 0]
    pub fn position_sensor_1d(measurement_variance: f64) -> Self {
        Self::new(
            DMatrix::from_row_slice(1, 2, &[1.0, 0.0]),
            DMatrix::from_element(1, 1, measurement_variance),
        )
    }

    /// Check H and R against the state dimension `x_dim`.
    pub fn validate(&self, x_dim: usize) -> Result<()> {
        let m = self.z_dim();
        if m == 0 {
            return Err(FilterError::Configuration {
                description: "measurement dimension must be positive".to_string(),
            });
        }

        check_shape(Quantity::ObservationMatrix, &self.observation_matrix, (m, x_dim))?;
        check_shape(Quantity::MeasurementNoise, &self.measurement_noise, (m, m))?;
        Ok(())
    }
}

/// Numerical settings for the matrix inversions in the update
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NumericsConfig {
    /// Inversion strategy for R, P and the summed information
    pub inversion: InversionMethod,
    /// Reciprocal-condition threshold below which a matrix counts as singular
    pub singularity_tolerance: f64,
}

impl NumericsConfig {
    /// Create a new numerics config
    pub fn new(inversion: InversionMethod, singularity_tolerance: f64) -> Self {
        Self {
            inversion,
            singularity_tolerance,
        }
    }

    /// Check the tolerance is usable
    pub fn validate(&self) -> Result<()> {
        if !self.singularity_tolerance.is_finite() || self.singularity_tolerance < 0.0 {
            return Err(FilterError::Configuration {
                description: format!(
                    "singularity tolerance must be finite and non-negative, got {}",
                    self.singularity_tolerance
                ),
            });
        }
        Ok(())
    }
}

impl Default for NumericsConfig {
    fn default() -> Self {
        Self {
            inversion: InversionMethod::Cholesky,
            singularity_tolerance: DEFAULT_SINGULARITY_TOLERANCE,
        }
    }
}

/// Complete filter parameters
///
/// Constructed through [`FilterParams::new`] or [`FilterParams::builder`], both
/// of which validate every dimension. The fields are public for reading; if
/// you modify them, call [`FilterParams::validate`] again.
#[derive(Debug, Clone)]
pub struct FilterParams {
    /// Motion model (F, G, Q)
    pub motion: MotionModel,
    /// Sensor model (H, R)
    pub sensor: SensorModel,
    /// Initial estimate (X0, P0)
    pub initial: GaussianState,
    /// Inversion settings
    pub numerics: NumericsConfig,
}

impl FilterParams {
    /// Create validated filter params with default numerics
    pub fn new(motion: MotionModel, sensor: SensorModel, initial: GaussianState) -> Result<Self> {
        let params = Self {
            motion,
            sensor,
            initial,
            numerics: NumericsConfig::default(),
        };
        params.validate()?;
        Ok(params)
    }

    /// Create a new filter params builder
    pub fn builder() -> FilterParamsBuilder {
        FilterParamsBuilder::new()
    }

    /// Get state dimension (n)
    #[inline]
    pub fn x_dim(&self) -> usize {
        self.motion.x_dim()
    }

    /// Get measurement dimension (m)
    #[inline]
    pub fn z_dim(&self) -> usize {
        self.sensor.z_dim()
    }

    /// Get process noise dimension (q)
    #[inline]
    pub fn noise_dim(&self) -> usize {
        self.motion.noise_dim()
    }

    /// Check every matrix and the initial state against each other.
    pub fn validate(&self) -> Result<()> {
        self.numerics.validate()?;
        self.motion.validate()?;

        let n = self.x_dim();
        self.sensor.validate(n)?;

        check_vector(Quantity::InitialMean, &self.initial.mean, n)?;
        check_shape(Quantity::InitialCovariance, &self.initial.covariance, (n, n))?;
        Ok(())
    }

    /// Check a measurement sequence (one column per step) and return its length N.
    pub fn validate_measurements(&self, measurements: &DMatrix<f64>) -> Result<usize> {
        let m = self.z_dim();
        let steps = measurements.ncols();
        check_shape(Quantity::Measurements, measurements, (m, steps))?;
        Ok(steps)
    }

    /// Debug snapshot of this configuration
    pub fn snapshot(&self) -> FilterConfigSnapshot {
        FilterConfigSnapshot::from(self)
    }
}

/// Builder for FilterParams
#[derive(Debug, Default)]
pub struct FilterParamsBuilder {
    motion: Option<MotionModel>,
    sensor: Option<SensorModel>,
    initial: Option<GaussianState>,
    numerics: NumericsConfig,
}

impl FilterParamsBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set motion model
    pub fn motion(mut self, motion: MotionModel) -> Self {
        self.motion = Some(motion);
        self
    }

    /// Set sensor model
    pub fn sensor(mut self, sensor: SensorModel) -> Self {
        self.sensor = Some(sensor);
        self
    }

    /// Set initial mean and covariance
    pub fn initial(mut self, mean: DVector<f64>, covariance: DMatrix<f64>) -> Self {
        self.initial = Some(GaussianState::new(mean, covariance));
        self
    }

    /// Set initial state
    pub fn initial_state(mut self, initial: GaussianState) -> Self {
        self.initial = Some(initial);
        self
    }

    /// Set numerics config
    pub fn numerics(mut self, numerics: NumericsConfig) -> Self {
        self.numerics = numerics;
        self
    }

    /// Set inversion strategy
    pub fn inversion(mut self, inversion: InversionMethod) -> Self {
        self.numerics.inversion = inversion;
        self
    }

    /// Set singularity tolerance
    pub fn singularity_tolerance(mut self, tolerance: f64) -> Self {
        self.numerics.singularity_tolerance = tolerance;
        self
    }

    /// Build and validate the filter params
    pub fn build(self) -> Result<FilterParams> {
        let missing = |what: &str| FilterError::Configuration {
            description: format!("{} is required", what),
        };

        let params = FilterParams {
            motion: self.motion.ok_or_else(|| missing("Motion model"))?,
            sensor: self.sensor.ok_or_else(|| missing("Sensor model"))?,
            initial: self.initial.ok_or_else(|| missing("Initial state"))?,
            numerics: self.numerics,
        };
        params.validate()?;
        Ok(params)
    }
}

fn check_shape(quantity: Quantity, matrix: &DMatrix<f64>, expected: (usize, usize)) -> Result<()> {
    let actual = matrix.shape();
    if actual != expected {
        return Err(FilterError::shape(quantity, expected, actual));
    }
    Ok(())
}

fn check_vector(quantity: Quantity, vector: &DVector<f64>, expected: usize) -> Result<()> {
    if vector.len() != expected {
        return Err(FilterError::shape(quantity, (expected, 1), (vector.len(), 1)));
    }
    Ok(())
}

// ============================================================================
// Configuration Snapshots (for debugging/comparison)
// ============================================================================

/// Snapshot of motion model configuration for debugging.
#[derive(Debug, Clone, Serialize)]
pub struct MotionModelSnapshot {
    /// State dimension
    pub x_dim: usize,
    /// Process noise dimension
    pub noise_dim: usize,
    /// State transition matrix F (flattened row-major)
    pub transition_matrix: Vec<f64>,
    /// Noise input matrix G (flattened row-major)
    pub noise_input: Vec<f64>,
    /// Process noise covariance Q (flattened row-major)
    pub process_noise: Vec<f64>,
}

impl From<&MotionModel> for MotionModelSnapshot {
    fn from(m: &MotionModel) -> Self {
        Self {
            x_dim: m.x_dim(),
            noise_dim: m.noise_dim(),
            transition_matrix: row_major(&m.transition_matrix),
            noise_input: row_major(&m.noise_input),
            process_noise: row_major(&m.process_noise),
        }
    }
}

/// Snapshot of sensor model configuration for debugging.
#[derive(Debug, Clone, Serialize)]
pub struct SensorModelSnapshot {
    /// Measurement dimension
    pub z_dim: usize,
    /// State dimension
    pub x_dim: usize,
    /// Observation matrix H (flattened row-major)
    pub observation_matrix: Vec<f64>,
    /// Measurement noise covariance R (flattened row-major)
    pub measurement_noise: Vec<f64>,
}

impl From<&SensorModel> for SensorModelSnapshot {
    fn from(s: &SensorModel) -> Self {
        Self {
            z_dim: s.z_dim(),
            x_dim: s.x_dim(),
            observation_matrix: row_major(&s.observation_matrix),
            measurement_noise: row_major(&s.measurement_noise),
        }
    }
}

/// Complete configuration snapshot, serializable with serde
///
/// # Example
///
/// ```rust,ignore
/// let params = FilterParams::builder()./* ... */.build()?;
/// println!("{}", serde_json::to_string_pretty(&params.snapshot()).unwrap());
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct FilterConfigSnapshot {
    /// Motion model configuration
    pub motion: MotionModelSnapshot,
    /// Sensor configuration
    pub sensor: SensorModelSnapshot,
    /// Initial mean X0
    pub initial_mean: Vec<f64>,
    /// Initial covariance P0 (flattened row-major)
    pub initial_covariance: Vec<f64>,
    /// Inversion settings
    pub numerics: NumericsConfig,
}

impl From<&FilterParams> for FilterConfigSnapshot {
    fn from(p: &FilterParams) -> Self {
        Self {
            motion: (&p.motion).into(),
            sensor: (&p.sensor).into(),
            initial_mean: p.initial.mean.iter().copied().collect(),
            initial_covariance: row_major(&p.initial.covariance),
            numerics: p.numerics,
        }
    }
}

/// nalgebra stores column-major; snapshots are row-major like the matrices are written.
pub(crate) fn row_major(matrix: &DMatrix<f64>) -> Vec<f64> {
    matrix.transpose().iter().copied().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cv_params() -> FilterParams {
        FilterParams::builder()
            .motion(MotionModel::constant_velocity_1d(1.0, 0.1))
            .sensor(SensorModel::position_sensor_1d(0.25))
            .initial(DVector::zeros(2), DMatrix::identity(2, 2))
            .build()
            .unwrap()
    }

    #[test]
    fn test_motion_model_cv_1d() {
        let motion = MotionModel::constant_velocity_1d(2.0, 0.5);
        assert_eq!(motion.x_dim(), 2);
        assert_eq!(motion.noise_dim(), 1);
        assert_eq!(motion.transition_matrix[(0, 1)], 2.0);
        assert_eq!(motion.noise_input[(0, 0)], 2.0);
        assert_eq!(motion.noise_input[(1, 0)], 2.0);

        let gqg = motion.driven_noise();
        assert!((gqg[(0, 0)] - 2.0).abs() < 1e-12);
        assert!((gqg[(0, 1)] - gqg[(1, 0)]).abs() < 1e-15);
    }

    #[test]
    fn test_sensor_model_position() {
        let sensor = SensorModel::position_sensor_1d(0.25);
        assert_eq!(sensor.z_dim(), 1);
        assert_eq!(sensor.x_dim(), 2);
    }

    #[test]
    fn test_filter_params_builder() {
        let params = cv_params();
        assert_eq!(params.x_dim(), 2);
        assert_eq!(params.z_dim(), 1);
        assert_eq!(params.noise_dim(), 1);
        assert_eq!(params.numerics, NumericsConfig::default());
    }

    #[test]
    fn test_builder_requires_parts() {
        let err = FilterParams::builder()
            .sensor(SensorModel::scalar(1.0))
            .build()
            .unwrap_err();
        assert!(matches!(err, FilterError::Configuration { .. }));
        assert!(err.to_string().contains("Motion model"));
    }

    #[test]
    fn test_shape_mismatch_observation_matrix() {
        let err = FilterParams::builder()
            .motion(MotionModel::constant_velocity_1d(1.0, 0.1))
            .sensor(SensorModel::scalar(1.0))
            .initial(DVector::zeros(2), DMatrix::identity(2, 2))
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            FilterError::ShapeMismatch {
                quantity: Quantity::ObservationMatrix,
                expected: (1, 2),
                actual: (1, 1),
            }
        );
    }

    #[test]
    fn test_shape_mismatch_noise_input_and_initial() {
        let mut motion = MotionModel::constant_velocity_1d(1.0, 0.1);
        motion.process_noise = DMatrix::identity(2, 2);
        let err = FilterParams::new(
            motion,
            SensorModel::position_sensor_1d(1.0),
            GaussianState::zero_mean(DMatrix::identity(2, 2)),
        )
        .unwrap_err();
        assert_eq!(err.quantity(), Some(Quantity::ProcessNoise));

        let err = FilterParams::new(
            MotionModel::constant_velocity_1d(1.0, 0.1),
            SensorModel::position_sensor_1d(1.0),
            GaussianState::new(DVector::zeros(3), DMatrix::identity(2, 2)),
        )
        .unwrap_err();
        assert_eq!(err.quantity(), Some(Quantity::InitialMean));
    }

    #[test]
    fn test_validate_measurements() {
        let params = cv_params();
        let z = DMatrix::from_row_slice(1, 3, &[1.0, 2.1, 2.9]);
        assert_eq!(params.validate_measurements(&z).unwrap(), 3);

        let wrong = DMatrix::zeros(2, 3);
        let err = params.validate_measurements(&wrong).unwrap_err();
        assert_eq!(err.quantity(), Some(Quantity::Measurements));
    }

    #[test]
    fn test_invalid_tolerance() {
        let err = FilterParams::builder()
            .motion(MotionModel::random_walk(1.0))
            .sensor(SensorModel::scalar(1.0))
            .initial_state(GaussianState::zero_mean(DMatrix::identity(1, 1)))
            .singularity_tolerance(f64::NAN)
            .build()
            .unwrap_err();
        assert!(matches!(err, FilterError::Configuration { .. }));
    }

    #[test]
    fn test_snapshot_row_major() {
        let params = cv_params();
        let snap = params.snapshot();
        assert_eq!(snap.motion.transition_matrix, vec![1.0, 1.0, 0.0, 1.0]);
        assert_eq!(snap.sensor.observation_matrix, vec![1.0, 0.0]);
        assert_eq!(snap.initial_covariance, vec![1.0, 0.0, 0.0, 1.0]);
    }
}
