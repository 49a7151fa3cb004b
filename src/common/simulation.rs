//! Trajectory and measurement simulation
//!
//! Draws a state trajectory and a measurement sequence from the linear-Gaussian
//! model described by [`FilterParams`]. Used to exercise the filter on data
//! that actually follows the model.

use nalgebra::{DMatrix, DVector};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;

use crate::common::linalg::psd_square_root;
use crate::types::FilterParams;

/// Simulated true states and the measurements taken of them
#[derive(Debug, Clone)]
pub struct SimulatedSequence {
    /// True states, n×(N+1); column 0 is the drawn initial state
    pub states: DMatrix<f64>,
    /// Measurements, m×N; column k−1 observes state column k
    pub measurements: DMatrix<f64>,
}

impl SimulatedSequence {
    /// Number of measurements (N)
    #[inline]
    pub fn num_steps(&self) -> usize {
        self.measurements.ncols()
    }
}

/// Draw a standard-normal vector and colour it with `sqrt`
fn correlated_noise<R: Rng>(rng: &mut R, sqrt: &DMatrix<f64>) -> DVector<f64> {
    let white = DVector::from_fn(sqrt.ncols(), |_, _| rng.sample::<f64, _>(StandardNormal));
    sqrt * white
}

/// Simulate `num_steps` steps of the model
///
/// - `x₀ ~ N(X0, P0)`
/// - `xₖ = F xₖ₋₁ + G wₖ`, `wₖ ~ N(0, Q)`
/// - `zₖ = H xₖ + vₖ`, `vₖ ~ N(0, R)`
///
/// Covariances only need to be PSD; a zero `Q` gives a deterministic trajectory.
pub fn simulate<R: Rng>(params: &FilterParams, num_steps: usize, rng: &mut R) -> SimulatedSequence {
    let motion = &params.motion;
    let sensor = &params.sensor;

    let initial_sqrt = psd_square_root(&params.initial.covariance);
    let process_sqrt = psd_square_root(&motion.process_noise);
    let measurement_sqrt = psd_square_root(&sensor.measurement_noise);

    let mut states = DMatrix::zeros(params.x_dim(), num_steps + 1);
    let mut measurements = DMatrix::zeros(params.z_dim(), num_steps);

    let mut x = &params.initial.mean + correlated_noise(rng, &initial_sqrt);
    states.set_column(0, &x);

    for k in 0..num_steps {
        let w = correlated_noise(rng, &process_sqrt);
        x = &motion.transition_matrix * &x + &motion.noise_input * w;

        let v = correlated_noise(rng, &measurement_sqrt);
        let z = &sensor.observation_matrix * &x + v;

        states.set_column(k + 1, &x);
        measurements.set_column(k, &z);
    }

    SimulatedSequence {
        states,
        measurements,
    }
}

/// [`simulate`] with a `StdRng` seeded from `seed`, for reproducible runs
pub fn simulate_seeded(params: &FilterParams, num_steps: usize, seed: u64) -> SimulatedSequence {
    let mut rng = StdRng::seed_from_u64(seed);
    simulate(params, num_steps, &mut rng)
}
