//! Core types for the filter
//!
//! # Types
//!
//! - [`GaussianState`] - Mean and covariance carried between steps
//! - [`MotionModel`], [`SensorModel`], [`NumericsConfig`] - Model pieces
//! - [`FilterParams`] - Validated bundle of the above plus the initial state
//! - [`UpdateOutput`], [`StepOutput`], [`FilterOutput`] - Results

pub mod config;
pub mod output;
pub mod state;

pub use config::{
    FilterConfigSnapshot,
    FilterParams,
    FilterParamsBuilder,
    MotionModel,
    MotionModelSnapshot,
    NumericsConfig,
    SensorModel,
    SensorModelSnapshot,
};

pub use output::{
    FilterOutput,
    FilterOutputSnapshot,
    StepOutput,
    UpdateOutput,
};

pub use state::GaussianState;
