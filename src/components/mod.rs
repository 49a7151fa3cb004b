//! Core algorithmic components
//!
//! The pure building blocks composed by the driver:
//!
//! - [`prediction`] - Linear prediction of mean and covariance
//! - [`update`] - Swerling (inverse-covariance) measurement update
//! - [`likelihood`] - Gaussian innovation negative log-likelihood

pub mod likelihood;
pub mod prediction;
pub mod update;

pub use likelihood::{innovation_neg_log_likelihood, normalization_constant};
pub use prediction::predict;
pub use update::{gain_form_update, swerling_update};
