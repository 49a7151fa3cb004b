//! Shared test helpers
//!
//! - [`assertions`] - Tolerance-based comparisons for scalars, vectors, matrices
//! - [`fixtures`] - Model and measurement fixtures

#![allow(dead_code)]

pub mod assertions;
pub mod fixtures;
