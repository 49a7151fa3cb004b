//! Observability for filter execution.
//!
//! This module provides the [`StepReporter`] trait for debugging and research
//! instrumentation. Reporters receive callbacks at key points of the
//! predict/update recursion without polluting the core algorithm logic.
//!
//! # Zero-Cost Abstraction
//!
//! The default [`NoOpReporter`] compiles to zero overhead - all callback
//! methods are empty and will be optimized away by the compiler.
//!
//! # Example
//!
//! ```
//! use swerling_kalman::reporter::DebugReporter;
//! use swerling_kalman::{FilterParams, MotionModel, SensorModel, SwerlingFilter};
//! use nalgebra::{DMatrix, DVector};
//!
//! let params = FilterParams::builder()
//!     .motion(MotionModel::random_walk(0.1))
//!     .sensor(SensorModel::scalar(1.0))
//!     .initial(DVector::zeros(1), DMatrix::identity(1, 1))
//!     .build()
//!     .unwrap();
//!
//! let mut filter = SwerlingFilter::with_reporter(&params, DebugReporter::new()).unwrap();
//! filter.run(&DMatrix::from_row_slice(1, 2, &[0.5, 0.7])).unwrap();
//!
//! assert_eq!(filter.reporter().step_events().len(), 2);
//! ```

use crate::filter::errors::FilterError;
use crate::types::{FilterOutput, GaussianState, StepOutput, UpdateOutput};

// ============================================================================
// StepReporter Trait
// ============================================================================

/// Observability trait for filter step execution.
///
/// All methods have default empty implementations, so you only need to
/// override the events you care about.
///
/// # Thread Safety
///
/// Reporters use `&mut self` for callbacks, so they are NOT required
/// to be `Send + Sync`.
pub trait StepReporter {
    /// Called once before the first step of [`run`](crate::SwerlingFilter::run).
    fn on_run_start(&mut self, _initial: &GaussianState, _num_steps: usize) {}

    /// Called after the prior for `step` has been predicted.
    fn on_prediction(&mut self, _step: usize, _prior: &GaussianState) {}

    /// Called after the measurement of `step` has been fused.
    fn on_update(&mut self, _step: usize, _update: &UpdateOutput) {}

    /// Called once a step is complete, including its likelihood term.
    fn on_step_complete(&mut self, _output: &StepOutput) {}

    /// Called when a step fails; the filter state is left at the previous posterior.
    fn on_step_failed(&mut self, _step: usize, _error: &FilterError) {}

    /// Called after a full run has produced its output.
    fn on_run_complete(&mut self, _output: &FilterOutput) {}
}

impl<R: StepReporter + ?Sized> StepReporter for &mut R {
    fn on_run_start(&mut self, initial: &GaussianState, num_steps: usize) {
        (**self).on_run_start(initial, num_steps);
    }

    fn on_prediction(&mut self, step: usize, prior: &GaussianState) {
        (**self).on_prediction(step, prior);
    }

    fn on_update(&mut self, step: usize, update: &UpdateOutput) {
        (**self).on_update(step, update);
    }

    fn on_step_complete(&mut self, output: &StepOutput) {
        (**self).on_step_complete(output);
    }

    fn on_step_failed(&mut self, step: usize, error: &FilterError) {
        (**self).on_step_failed(step, error);
    }

    fn on_run_complete(&mut self, output: &FilterOutput) {
        (**self).on_run_complete(output);
    }
}

// ============================================================================
// NoOpReporter
// ============================================================================

/// Zero-cost reporter that does nothing.
///
/// This is the default reporter used when no observability is needed.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpReporter;

impl NoOpReporter {
    /// Create a new no-op reporter.
    pub fn new() -> Self {
        Self
    }
}

impl StepReporter for NoOpReporter {}

// ============================================================================
// DebugReporter
// ============================================================================

/// Reporter that captures all events for debugging.
///
/// Stores clones of everything passed to the callbacks, so memory grows
/// linearly with the number of steps.
#[derive(Debug, Clone, Default)]
pub struct DebugReporter {
    /// (step, prior) for each prediction
    predictions: Vec<(usize, GaussianState)>,

    /// (step, update) for each measurement update
    updates: Vec<(usize, UpdateOutput)>,

    /// Completed steps
    steps: Vec<StepOutput>,

    /// (step, error) for each failed step
    failures: Vec<(usize, FilterError)>,

    /// Completed runs
    runs: Vec<FilterOutput>,
}

impl DebugReporter {
    /// Create a new debug reporter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear all captured events.
    pub fn clear(&mut self) {
        self.predictions.clear();
        self.updates.clear();
        self.steps.clear();
        self.failures.clear();
        self.runs.clear();
    }

    /// Get captured prediction events.
    pub fn prediction_events(&self) -> &[(usize, GaussianState)] {
        &self.predictions
    }

    /// Get captured update events.
    pub fn update_events(&self) -> &[(usize, UpdateOutput)] {
        &self.updates
    }

    /// Get captured step-complete events.
    pub fn step_events(&self) -> &[StepOutput] {
        &self.steps
    }

    /// Get captured failures.
    pub fn failure_events(&self) -> &[(usize, FilterError)] {
        &self.failures
    }

    /// Get captured run outputs.
    pub fn run_events(&self) -> &[FilterOutput] {
        &self.runs
    }

    /// Total number of captured events across all types.
    pub fn total_events(&self) -> usize {
        self.predictions.len()
            + self.updates.len()
            + self.steps.len()
            + self.failures.len()
            + self.runs.len()
    }
}

impl StepReporter for DebugReporter {
    fn on_prediction(&mut self, step: usize, prior: &GaussianState) {
        self.predictions.push((step, prior.clone()));
    }

    fn on_update(&mut self, step: usize, update: &UpdateOutput) {
        self.updates.push((step, update.clone()));
    }

    fn on_step_complete(&mut self, output: &StepOutput) {
        self.steps.push(output.clone());
    }

    fn on_step_failed(&mut self, step: usize, error: &FilterError) {
        self.failures.push((step, error.clone()));
    }

    fn on_run_complete(&mut self, output: &FilterOutput) {
        self.runs.push(output.clone());
    }
}

// ============================================================================
// LoggingReporter
// ============================================================================

/// Reporter that emits events through the `log` crate.
///
/// # Log Levels
///
/// - `on_run_start`, `on_step_complete`: DEBUG
/// - `on_prediction`, `on_update`: TRACE
/// - `on_step_failed`: WARN
/// - `on_run_complete`: INFO
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingReporter {
    /// Whether to include state vectors in log messages
    verbose: bool,
}

impl LoggingReporter {
    /// Create a new logging reporter.
    pub fn new() -> Self {
        Self { verbose: false }
    }

    /// Create a verbose logging reporter that includes state details.
    pub fn verbose() -> Self {
        Self { verbose: true }
    }
}

impl StepReporter for LoggingReporter {
    fn on_run_start(&mut self, initial: &GaussianState, num_steps: usize) {
        log::debug!(
            "Run start: {} steps, state dimension {}",
            num_steps,
            initial.x_dim()
        );
    }

    fn on_prediction(&mut self, step: usize, prior: &GaussianState) {
        if self.verbose {
            log::trace!("Step {} prior mean: {:?}", step, prior.mean.as_slice());
        }
    }

    fn on_update(&mut self, step: usize, update: &UpdateOutput) {
        log::trace!(
            "Step {} residual norm {:.4e}",
            step,
            update.residual.norm()
        );
    }

    fn on_step_complete(&mut self, output: &StepOutput) {
        if self.verbose {
            log::debug!(
                "Step {} complete: nll term {:.6}, posterior mean {:?}",
                output.step,
                output.neg_log_likelihood,
                output.posterior.mean.as_slice()
            );
        } else {
            log::debug!(
                "Step {} complete: nll term {:.6}",
                output.step,
                output.neg_log_likelihood
            );
        }
    }

    fn on_step_failed(&mut self, step: usize, error: &FilterError) {
        log::warn!("Step {} failed: {}", step, error);
    }

    fn on_run_complete(&mut self, output: &FilterOutput) {
        log::info!(
            "Run complete: {} steps, neg_LLF = {:.6}",
            output.num_steps(),
            output.neg_log_likelihood
        );
    }
}

// ============================================================================
// CompositeReporter
// ============================================================================

/// Reporter that forwards events to two child reporters.
#[derive(Debug, Clone)]
pub struct CompositeReporter<A: StepReporter, B: StepReporter> {
    first: A,
    second: B,
}

impl<A: StepReporter, B: StepReporter> CompositeReporter<A, B> {
    /// Create a new composite reporter.
    pub fn new(first: A, second: B) -> Self {
        Self { first, second }
    }

    /// Get a reference to the first reporter.
    pub fn first(&self) -> &A {
        &self.first
    }

    /// Get a reference to the second reporter.
    pub fn second(&self) -> &B {
        &self.second
    }

    /// Consume and return both reporters.
    pub fn into_parts(self) -> (A, B) {
        (self.first, self.second)
    }
}

impl<A: StepReporter, B: StepReporter> StepReporter for CompositeReporter<A, B> {
    fn on_run_start(&mut self, initial: &GaussianState, num_steps: usize) {
        self.first.on_run_start(initial, num_steps);
        self.second.on_run_start(initial, num_steps);
    }

    fn on_prediction(&mut self, step: usize, prior: &GaussianState) {
        self.first.on_prediction(step, prior);
        self.second.on_prediction(step, prior);
    }

    fn on_update(&mut self, step: usize, update: &UpdateOutput) {
        self.first.on_update(step, update);
        self.second.on_update(step, update);
    }

    fn on_step_complete(&mut self, output: &StepOutput) {
        self.first.on_step_complete(output);
        self.second.on_step_complete(output);
    }

    fn on_step_failed(&mut self, step: usize, error: &FilterError) {
        self.first.on_step_failed(step, error);
        self.second.on_step_failed(step, error);
    }

    fn on_run_complete(&mut self, output: &FilterOutput) {
        self.first.on_run_complete(output);
        self.second.on_run_complete(output);
    }
}

// ============================================================================
// Tests
// ============================================================================
