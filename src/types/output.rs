//! Output types for filter steps and complete runs.
//!
//! - [`UpdateOutput`] - What the Swerling updater returns for one measurement
//! - [`StepOutput`] - One predict/update cycle, including its likelihood term
//! - [`FilterOutput`] - Complete run: `neg_LLF` plus state and variance histories
//!
//! History matrices have one column per time slot: column 0 holds the initial
//! estimate, column k the posterior after the k-th measurement.

use nalgebra::{DMatrix, DVector};
use serde::Serialize;

use super::state::GaussianState;

/// Result of fusing one measurement into a prior
#[derive(Debug, Clone)]
pub struct UpdateOutput {
    /// Posterior mean and covariance
    pub posterior: GaussianState,
    /// Innovation `z − H·X`
    pub residual: DVector<f64>,
    /// Innovation covariance `R + H·P·Hᵀ`
    pub residual_covariance: DMatrix<f64>,
}

/// Everything produced by a single predict/update cycle
#[derive(Debug, Clone)]
pub struct StepOutput {
    /// Step index (1-based)
    pub step: usize,
    /// Predicted state before the measurement
    pub prior: GaussianState,
    /// Updated state after the measurement
    pub posterior: GaussianState,
    /// Innovation `z − H·X`
    pub residual: DVector<f64>,
    /// Innovation covariance `R + H·P·Hᵀ`
    pub residual_covariance: DMatrix<f64>,
    /// `0.5·ln det(S) + 0.5·eᵀ S⁻¹ e` for this step.
    ///
    /// Excludes the `(m/2)·ln(2π)` normalization, which the driver adds once
    /// for the whole sequence.
    pub neg_log_likelihood: f64,
}

/// Complete output of a filter run over N measurements
#[derive(Debug, Clone, PartialEq)]
pub struct FilterOutput {
    /// Accumulated negative log-likelihood
    pub neg_log_likelihood: f64,
    /// State history, n×(N+1)
    pub states: DMatrix<f64>,
    /// Covariance-diagonal history, n×(N+1)
    pub covariance_diagonals: DMatrix<f64>,
}

impl FilterOutput {
    /// Allocate histories for `num_steps` measurements and fill slot 0 from `initial`.
    pub(crate) fn with_initial(initial: &GaussianState, num_steps: usize, neg_log_likelihood: f64) -> Self {
        let n = initial.x_dim();
        let mut states = DMatrix::zeros(n, num_steps + 1);
        let mut covariance_diagonals = DMatrix::zeros(n, num_steps + 1);
        states.set_column(0, &initial.mean);
        covariance_diagonals.set_column(0, &initial.covariance_diagonal());

        Self {
            neg_log_likelihood,
            states,
            covariance_diagonals,
        }
    }

    /// Write the posterior of step `k` into history slot `k`.
    pub(crate) fn record(&mut self, step: usize, posterior: &GaussianState) {
        self.states.set_column(step, &posterior.mean);
        self.covariance_diagonals
            .set_column(step, &posterior.covariance_diagonal());
    }

    /// Number of measurements processed (N)
    #[inline]
    pub fn num_steps(&self) -> usize {
        self.states.ncols().saturating_sub(1)
    }

    /// Get state dimension
    #[inline]
    pub fn x_dim(&self) -> usize {
        self.states.nrows()
    }

    /// State at history slot `k` (0 = initial)
    pub fn state(&self, k: usize) -> Option<DVector<f64>> {
        (k < self.states.ncols()).then(|| self.states.column(k).into_owned())
    }

    /// Covariance diagonal at history slot `k` (0 = initial)
    pub fn covariance_diagonal(&self, k: usize) -> Option<DVector<f64>> {
        (k < self.covariance_diagonals.ncols()).then(|| self.covariance_diagonals.column(k).into_owned())
    }

    /// Posterior after the last measurement (the initial state when N = 0)
    pub fn final_state(&self) -> DVector<f64> {
        self.states.column(self.num_steps()).into_owned()
    }

    /// Debug snapshot of this output
    pub fn snapshot(&self) -> FilterOutputSnapshot {
        FilterOutputSnapshot::from(self)
    }
}

/// Serializable form of [`FilterOutput`], one inner vector per time slot.
#[derive(Debug, Clone, Serialize)]
pub struct FilterOutputSnapshot {
    /// Accumulated negative log-likelihood
    pub neg_log_likelihood: f64,
    /// Number of measurements processed
    pub num_steps: usize,
    /// State history, `states[k]` = state at slot k
    pub states: Vec<Vec<f64>>,
    /// Covariance-diagonal history, same indexing
    pub covariance_diagonals: Vec<Vec<f64>>,
}

impl From<&FilterOutput> for FilterOutputSnapshot {
    fn from(o: &FilterOutput) -> Self {
        let columns = |m: &DMatrix<f64>| {
            m.column_iter()
                .map(|c| c.iter().copied().collect())
                .collect()
        };
        Self {
            neg_log_likelihood: o.neg_log_likelihood,
            num_steps: o.num_steps(),
            states: columns(&o.states),
            covariance_diagonals: columns(&o.covariance_diagonals),
        }
    }
}
