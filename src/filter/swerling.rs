//! Swerling-form Kalman filter driver
//!
//! Runs the predict → update recursion over a measurement sequence,
//! accumulating the negative log-likelihood and recording the state and
//! covariance-diagonal history.
//!
//! ```text
//! neg_LLF ← (m/2)·ln(2π)·N
//! for k = 1..N:
//!     prior     ← predict(X, P)
//!     posterior ← swerling_update(prior, z[k])
//!     neg_LLF  += 0.5·ln det(S) + 0.5·eᵀ S⁻¹ e
//!     hatX[k], hatDP[k] ← X⁺, diag(P⁺)
//! ```
//!
//! The recursion is strictly sequential. A failure at any step aborts the run;
//! there is no partial result.

use nalgebra::{DMatrix, DVector};

use crate::components::{
    innovation_neg_log_likelihood, normalization_constant, predict, swerling_update,
};
use crate::reporter::{NoOpReporter, StepReporter};
use crate::types::{FilterOutput, FilterParams, GaussianState, StepOutput, UpdateOutput};

use super::errors::{FilterError, Quantity, Result};
use super::traits::Filter;

/// Kalman filter with a Swerling (inverse-covariance) measurement update
///
/// Borrows the model for its lifetime; the caller's matrices are never
/// modified. The only mutable state is the current posterior and the step
/// counter.
///
/// # Example
///
/// ```
/// use swerling_kalman::{FilterParams, MotionModel, SensorModel, SwerlingFilter};
/// use nalgebra::{DMatrix, DVector};
///
/// let params = FilterParams::builder()
///     .motion(MotionModel::constant_velocity_1d(1.0, 0.1))
///     .sensor(SensorModel::position_sensor_1d(0.25))
///     .initial(DVector::zeros(2), DMatrix::identity(2, 2))
///     .build()
///     .unwrap();
///
/// let measurements = DMatrix::from_row_slice(1, 3, &[1.0, 2.1, 2.9]);
/// let output = SwerlingFilter::new(&params).unwrap().run(&measurements).unwrap();
///
/// assert_eq!(output.states.shape(), (2, 4));
/// assert!(output.neg_log_likelihood.is_finite());
/// ```
#[derive(Debug, Clone)]
pub struct SwerlingFilter<'a, R: StepReporter = NoOpReporter> {
    params: &'a FilterParams,
    state: GaussianState,
    steps_taken: usize,
    reporter: R,
}

impl<'a> SwerlingFilter<'a, NoOpReporter> {
    /// Create a filter positioned at the initial state
    pub fn new(params: &'a FilterParams) -> Result<Self> {
        Self::with_reporter(params, NoOpReporter)
    }
}

impl<'a, R: StepReporter> SwerlingFilter<'a, R> {
    /// Create a filter that reports its progress to `reporter`
    pub fn with_reporter(params: &'a FilterParams, reporter: R) -> Result<Self> {
        params.validate()?;
        Ok(Self {
            params,
            state: params.initial.clone(),
            steps_taken: 0,
            reporter,
        })
    }

    /// Model parameters
    pub fn params(&self) -> &FilterParams {
        self.params
    }

    /// Get a reference to the reporter.
    pub fn reporter(&self) -> &R {
        &self.reporter
    }

    /// Get a mutable reference to the reporter.
    pub fn reporter_mut(&mut self) -> &mut R {
        &mut self.reporter
    }

    /// Consume the filter and return its reporter.
    pub fn into_reporter(self) -> R {
        self.reporter
    }

    /// Run the full recursion over an m×N measurement matrix (one column per step)
    ///
    /// Starts from the initial state regardless of any earlier steps. All
    /// shapes are checked before the first step.
    ///
    /// # Returns
    /// `neg_LLF` plus n×(N+1) state and covariance-diagonal histories.
    pub fn run(&mut self, measurements: &DMatrix<f64>) -> Result<FilterOutput> {
        let num_steps = self.params.validate_measurements(measurements)?;
        self.reset();

        let normalization = normalization_constant(self.params.z_dim(), num_steps);
        let mut output = FilterOutput::with_initial(&self.params.initial, num_steps, normalization);

        log::debug!(
            "Swerling filter run: n={}, m={}, q={}, N={}",
            self.params.x_dim(),
            self.params.z_dim(),
            self.params.noise_dim(),
            num_steps
        );
        self.reporter.on_run_start(&self.params.initial, num_steps);

        for column in measurements.column_iter() {
            let step = self.step(&column.into_owned())?;
            output.neg_log_likelihood += step.neg_log_likelihood;
            output.record(step.step, &step.posterior);
        }

        if !output.neg_log_likelihood.is_finite() {
            return Err(FilterError::NonFiniteResult {
                step: num_steps,
                quantity: Quantity::NegLogLikelihood,
            });
        }

        self.reporter.on_run_complete(&output);
        Ok(output)
    }
}

impl<R: StepReporter> Filter for SwerlingFilter<'_, R> {
    type Measurement = DVector<f64>;

    fn step(&mut self, measurement: &DVector<f64>) -> Result<StepOutput> {
        let step = self.steps_taken + 1;

        match filter_step(self.params, &self.state, measurement, step, &mut self.reporter) {
            Ok(output) => {
                self.state = output.posterior.clone();
                self.steps_taken = step;
                self.reporter.on_step_complete(&output);
                Ok(output)
            }
            Err(e) => {
                log::debug!("Swerling filter aborted at step {}: {}", step, e);
                self.reporter.on_step_failed(step, &e);
                Err(e)
            }
        }
    }

    fn state(&self) -> &GaussianState {
        &self.state
    }

    fn reset(&mut self) {
        self.state = self.params.initial.clone();
        self.steps_taken = 0;
    }

    fn steps_taken(&self) -> usize {
        self.steps_taken
    }

    fn x_dim(&self) -> usize {
        self.params.x_dim()
    }

    fn z_dim(&self) -> usize {
        self.params.z_dim()
    }
}

/// One predict/update cycle from `state`, errors tagged with `step`.
fn filter_step<R: StepReporter>(
    params: &FilterParams,
    state: &GaussianState,
    measurement: &DVector<f64>,
    step: usize,
    reporter: &mut R,
) -> Result<StepOutput> {
    let prior = predict(state, &params.motion);
    reporter.on_prediction(step, &prior);

    let update = swerling_update(&prior, measurement, &params.sensor, &params.numerics)
        .map_err(|e| e.at_step(step))?;
    reporter.on_update(step, &update);

    let neg_log_likelihood = innovation_neg_log_likelihood(
        &update.residual,
        &update.residual_covariance,
        params.numerics.singularity_tolerance,
    )
    .map_err(|e| e.at_step(step))?;

    let UpdateOutput {
        posterior,
        residual,
        residual_covariance,
    } = update;

    Ok(StepOutput {
        step,
        prior,
        posterior,
        residual,
        residual_covariance,
        neg_log_likelihood,
    })
}

/// Run the filter over an m×N measurement matrix
///
/// Convenience wrapper around [`SwerlingFilter::run`].
pub fn run_swerling_filter(params: &FilterParams, measurements: &DMatrix<f64>) -> Result<FilterOutput> {
    SwerlingFilter::new(params)?.run(measurements)
}

/// Negative log-likelihood of a measurement sequence under `params`
///
/// This is the objective an external parameter search would minimise.
pub fn neg_log_likelihood(params: &FilterParams, measurements: &DMatrix<f64>) -> Result<f64> {
    run_swerling_filter(params, measurements).map(|o| o.neg_log_likelihood)
}
