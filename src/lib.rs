/*!
# Swerling Kalman - linear-Gaussian filtering with an information-form update

Rust implementation of a discrete-time Kalman filter whose measurement
update is computed in Swerling (inverse-covariance) form, together with the
Gaussian negative log-likelihood of the measurement sequence.

## Features

- Prediction `X⁻ = F X`, `P⁻ = F P Fᵀ + G Q Gᵀ`
- Swerling update `P⁺ = (P⁻⁻¹ + Hᵀ R⁻¹ H)⁻¹`, `X⁺ = X⁻ + P⁺ Hᵀ R⁻¹ (z − H X⁻)`
- Negative log-likelihood accumulation suitable as a parameter-search objective
- Full state and covariance-diagonal histories
- Checked inversions (Cholesky or LU) with a reciprocal-condition tolerance
- Batch evaluation of many parameter sets (parallel with the `rayon` feature)

## Modules

- [`filter`] - Filter driver, step-wise trait, batch evaluation, errors
- [`components`] - Shared algorithms: prediction, update, likelihood
- [`types`] - Model parameters, Gaussian state, outputs
- [`reporter`] - Step-level observation hooks
- [`common`] - Low-level utilities (linear algebra, constants, simulation)

## Example

```rust
use swerling_kalman::{run_swerling_filter, FilterParams, MotionModel, SensorModel};
use nalgebra::{DMatrix, DVector};

let params = FilterParams::new(
    MotionModel::constant_velocity_1d(1.0, 0.1),
    SensorModel::position_sensor_1d(0.25),
    swerling_kalman::GaussianState::new(DVector::zeros(2), DMatrix::identity(2, 2)),
)
.unwrap();

let measurements = DMatrix::from_row_slice(1, 3, &[1.0, 2.1, 2.9]);
let output = run_swerling_filter(&params, &measurements).unwrap();

assert_eq!(output.states.shape(), (2, 4));
assert!(output.neg_log_likelihood > 0.0);
```
*/

// ============================================================================
// Core modules
// ============================================================================

/// Filter driver and error taxonomy
pub mod filter;

/// Shared filtering components (prediction, update, likelihood)
pub mod components;

/// Model parameters, states and outputs
pub mod types;

/// Step reporters for debugging and logging
pub mod reporter;

/// Low-level utilities (linear algebra, constants, simulation)
pub mod common;

// ============================================================================
// Re-exports for convenience
// ============================================================================

// Core types
pub use types::{
    FilterConfigSnapshot, FilterOutput, FilterOutputSnapshot, FilterParams, FilterParamsBuilder,
    GaussianState, MotionModel, MotionModelSnapshot, NumericsConfig, SensorModel,
    SensorModelSnapshot, StepOutput, UpdateOutput,
};

// Numerics
pub use common::InversionMethod;

// Errors
pub use filter::{FilterError, Quantity, Result};

// Traits
pub use filter::Filter;
pub use reporter::StepReporter;

// Filters and entry points
pub use filter::{evaluate_batch, neg_log_likelihood, run_batch, run_swerling_filter, SwerlingFilter};

// Components
pub use components::{gain_form_update, predict, swerling_update};

// Reporters
pub use reporter::{CompositeReporter, DebugReporter, LoggingReporter, NoOpReporter};

// Simulation
pub use common::{simulate, simulate_seeded, SimulatedSequence};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
