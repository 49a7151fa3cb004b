//! Independent filter invocations over many parameter sets
//!
//! Each invocation is self-contained, so a set of candidate models can be
//! scored against the same measurements concurrently.
//!
//! With rayon feature: invocations run on the rayon thread pool
//! Without rayon: invocations run sequentially in input order

#[cfg(feature = "rayon")]
use rayon::prelude::*;

use nalgebra::DMatrix;

use crate::types::{FilterOutput, FilterParams};

use super::errors::Result;
use super::swerling::run_swerling_filter;

/// Run the filter for every parameter set against one measurement sequence
///
/// Results are returned in the same order as `params`; a failure for one
/// parameter set does not affect the others.
pub fn run_batch(params: &[FilterParams], measurements: &DMatrix<f64>) -> Vec<Result<FilterOutput>> {
    #[cfg(feature = "rayon")]
    {
        params
            .par_iter()
            .map(|p| run_swerling_filter(p, measurements))
            .collect()
    }

    #[cfg(not(feature = "rayon"))]
    {
        params
            .iter()
            .map(|p| run_swerling_filter(p, measurements))
            .collect()
    }
}

/// Negative log-likelihood for every parameter set, in input order
pub fn evaluate_batch(params: &[FilterParams], measurements: &DMatrix<f64>) -> Vec<Result<f64>> {
    run_batch(params, measurements)
        .into_iter()
        .map(|r| r.map(|o| o.neg_log_likelihood))
        .collect()
}
