//! Model and measurement fixtures
//!
//! Reference values for the constant-velocity scenario were produced with an
//! independent gain-form Kalman recursion in double precision.

use nalgebra::{DMatrix, DVector};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use swerling_kalman::{FilterParams, GaussianState, MotionModel, SensorModel};

//=============================================================================
// Constant-velocity scenario
//=============================================================================

/// F = [[1,1],[0,1]], G = [0.5; 1], Q = 0.1, H = [1,0], R = 0.25, X0 = 0, P0 = I
pub fn constant_velocity_params() -> FilterParams {
    FilterParams::new(
        MotionModel::constant_velocity_1d(1.0, 0.1),
        SensorModel::position_sensor_1d(0.25),
        GaussianState::new(DVector::zeros(2), DMatrix::identity(2, 2)),
    )
    .unwrap()
}

pub fn constant_velocity_measurements() -> DMatrix<f64> {
    DMatrix::from_row_slice(1, 3, &[1.0, 2.1, 2.9])
}

pub const CV_STEP1_STATE: [f64; 2] = [0.8901098901098901, 0.46153846153846156];
pub const CV_STEP1_RESIDUAL_VARIANCE: f64 = 2.275;
pub const CV_STEP2_STATE: [f64; 2] = [1.9607646698016765, 0.896381108157841];
pub const CV_FINAL_STATE: [f64; 2] = [2.8896058040872594, 0.9153805336943532];
pub const CV_FINAL_COVARIANCE: [f64; 4] = [
    0.18936305795656855,
    0.11083753613917115,
    0.11083753613917113,
    0.15910657522154614,
];
pub const CV_NEG_LOG_LIKELIHOOD: f64 = 3.7597083659962625;

//=============================================================================
// Scalar random walk
//=============================================================================

/// F = G = H = 1 with the given variances
pub fn random_walk_params(q: f64, r: f64, x0: f64, p0: f64) -> FilterParams {
    FilterParams::new(
        MotionModel::random_walk(q),
        SensorModel::scalar(r),
        GaussianState::new(DVector::from_element(1, x0), DMatrix::from_element(1, 1, p0)),
    )
    .unwrap()
}

/// Scalar recursion written out by hand
///
/// Returns the posterior means, posterior variances and neg_LLF.
pub fn scalar_reference(q: f64, r: f64, x0: f64, p0: f64, z: &[f64]) -> (Vec<f64>, Vec<f64>, f64) {
    let mut x = x0;
    let mut p = p0;
    let mut means = vec![x];
    let mut variances = vec![p];
    let mut nll = 0.5 * z.len() as f64 * (2.0 * std::f64::consts::PI).ln();

    for &zk in z {
        let p_prior = p + q;
        let s = p_prior + r;
        let e = zk - x;
        p = 1.0 / (1.0 / p_prior + 1.0 / r);
        x += p / r * e;
        nll += 0.5 * s.ln() + 0.5 * e * e / s;
        means.push(x);
        variances.push(p);
    }

    (means, variances, nll)
}

//=============================================================================
// Random well-conditioned models
//=============================================================================

fn random_matrix(rng: &mut StdRng, rows: usize, cols: usize) -> DMatrix<f64> {
    DMatrix::from_fn(rows, cols, |_, _| rng.gen_range(-1.0..1.0))
}

/// Bᵀ B + floor·I, positive definite with eigenvalues ≥ floor
fn random_spd(rng: &mut StdRng, dim: usize, floor: f64) -> DMatrix<f64> {
    let b = random_matrix(rng, dim, dim);
    b.transpose() * b + DMatrix::identity(dim, dim) * floor
}

/// Random model with n ≤ 4 and well-conditioned covariances
pub fn random_params(rng: &mut StdRng) -> FilterParams {
    let n = rng.gen_range(1..=4);
    let m = rng.gen_range(1..=n);
    let q = rng.gen_range(1..=n);

    let f = DMatrix::identity(n, n) + random_matrix(rng, n, n) * 0.3;
    let g = random_matrix(rng, n, q);
    let process_noise = random_spd(rng, q, 0.1);
    let h = random_matrix(rng, m, n);
    let measurement_noise = random_spd(rng, m, 0.5);
    let x0 = DVector::from_fn(n, |_, _| rng.gen_range(-2.0..2.0));
    let p0 = random_spd(rng, n, 1.0);

    FilterParams::new(
        MotionModel::new(f, g, process_noise),
        SensorModel::new(h, measurement_noise),
        GaussianState::new(x0, p0),
    )
    .unwrap()
}

/// Random m×N measurements in [-3, 3]
pub fn random_measurements(rng: &mut StdRng, z_dim: usize, num_steps: usize) -> DMatrix<f64> {
    DMatrix::from_fn(z_dim, num_steps, |_, _| rng.gen_range(-3.0..3.0))
}

pub fn seeded_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}
