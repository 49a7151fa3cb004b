//! Error types for the filter and its components
//!
//! Every failure is unrecoverable for the current invocation. Errors carry the
//! step index and the identity of the offending matrix so the caller can
//! diagnose which part of the model broke.

use std::fmt;

/// Identity of a matrix or vector taking part in the recursion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quantity {
    /// State transition matrix (F)
    TransitionMatrix,
    /// Process noise input matrix (G)
    NoiseInput,
    /// Process noise covariance (Q)
    ProcessNoise,
    /// Observation matrix (H)
    ObservationMatrix,
    /// Measurement noise covariance (R)
    MeasurementNoise,
    /// Initial state mean (X0)
    InitialMean,
    /// Initial error covariance (P0)
    InitialCovariance,
    /// Measurement sequence (m×N)
    Measurements,
    /// Single measurement vector handed to a step
    Measurement,
    /// Predicted error covariance entering the update
    PriorCovariance,
    /// Summed information `P⁻¹ + Hᵀ R⁻¹ H`
    PosteriorInformation,
    /// Updated state mean
    PosteriorMean,
    /// Updated error covariance
    PosteriorCovariance,
    /// Innovation `z − H·X`
    Residual,
    /// Innovation covariance `R + H·P·Hᵀ`
    ResidualCovariance,
    /// Accumulated negative log-likelihood
    NegLogLikelihood,
}

impl Quantity {
    /// Short mathematical symbol
    pub fn symbol(&self) -> &'static str {
        match self {
            Quantity::TransitionMatrix => "F",
            Quantity::NoiseInput => "G",
            Quantity::ProcessNoise => "Q",
            Quantity::ObservationMatrix => "H",
            Quantity::MeasurementNoise => "R",
            Quantity::InitialMean => "X0",
            Quantity::InitialCovariance => "P0",
            Quantity::Measurements => "Z",
            Quantity::Measurement => "z",
            Quantity::PriorCovariance => "P",
            Quantity::PosteriorInformation => "P⁻¹ + HᵀR⁻¹H",
            Quantity::PosteriorMean => "X⁺",
            Quantity::PosteriorCovariance => "P⁺",
            Quantity::Residual => "e",
            Quantity::ResidualCovariance => "S",
            Quantity::NegLogLikelihood => "neg_LLF",
        }
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Quantity::TransitionMatrix => "transition matrix",
            Quantity::NoiseInput => "noise input matrix",
            Quantity::ProcessNoise => "process noise covariance",
            Quantity::ObservationMatrix => "observation matrix",
            Quantity::MeasurementNoise => "measurement noise covariance",
            Quantity::InitialMean => "initial mean",
            Quantity::InitialCovariance => "initial covariance",
            Quantity::Measurements => "measurement sequence",
            Quantity::Measurement => "measurement",
            Quantity::PriorCovariance => "prior covariance",
            Quantity::PosteriorInformation => "posterior information",
            Quantity::PosteriorMean => "posterior mean",
            Quantity::PosteriorCovariance => "posterior covariance",
            Quantity::Residual => "residual",
            Quantity::ResidualCovariance => "residual covariance",
            Quantity::NegLogLikelihood => "negative log-likelihood",
        };
        write!(f, "{} ({})", name, self.symbol())
    }
}

/// Errors that can occur while filtering
///
/// Step indices are 1-based; step 0 means the error was raised outside the
/// recursion (e.g. by a standalone component call).
#[derive(Debug, Clone, PartialEq)]
pub enum FilterError {
    /// Input dimensions are inconsistent
    ShapeMismatch {
        /// Matrix or vector with the wrong shape
        quantity: Quantity,
        /// Expected (rows, cols)
        expected: (usize, usize),
        /// Received (rows, cols)
        actual: (usize, usize),
    },

    /// Matrix inversion failed (singular within tolerance)
    SingularMatrix {
        /// Step at which the inversion was attempted
        step: usize,
        /// Which matrix failed
        quantity: Quantity,
    },

    /// A computed quantity contains NaN or infinity
    NonFiniteResult {
        /// Step that produced the value
        step: usize,
        /// Which quantity blew up
        quantity: Quantity,
    },

    /// Configuration error
    Configuration {
        /// Description of the configuration issue
        description: String,
    },
}

impl FilterError {
    /// Attach a step index to errors raised inside the recursion.
    ///
    /// Shape and configuration errors are step-independent and pass through.
    pub fn at_step(self, step: usize) -> Self {
        match self {
            FilterError::SingularMatrix { quantity, .. } => {
                FilterError::SingularMatrix { step, quantity }
            }
            FilterError::NonFiniteResult { quantity, .. } => {
                FilterError::NonFiniteResult { step, quantity }
            }
            other => other,
        }
    }

    /// Step index, if the error belongs to a step
    pub fn step(&self) -> Option<usize> {
        match self {
            FilterError::SingularMatrix { step, .. } | FilterError::NonFiniteResult { step, .. } => {
                Some(*step)
            }
            _ => None,
        }
    }

    /// Offending quantity, if any
    pub fn quantity(&self) -> Option<Quantity> {
        match self {
            FilterError::ShapeMismatch { quantity, .. }
            | FilterError::SingularMatrix { quantity, .. }
            | FilterError::NonFiniteResult { quantity, .. } => Some(*quantity),
            FilterError::Configuration { .. } => None,
        }
    }

    pub(crate) fn shape(quantity: Quantity, expected: (usize, usize), actual: (usize, usize)) -> Self {
        FilterError::ShapeMismatch {
            quantity,
            expected,
            actual,
        }
    }

    pub(crate) fn singular(quantity: Quantity) -> Self {
        FilterError::SingularMatrix { step: 0, quantity }
    }

    pub(crate) fn non_finite(quantity: Quantity) -> Self {
        FilterError::NonFiniteResult { step: 0, quantity }
    }
}

impl fmt::Display for FilterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterError::ShapeMismatch {
                quantity,
                expected,
                actual,
            } => {
                write!(
                    f,
                    "Shape mismatch for {}: expected {}x{}, got {}x{}",
                    quantity, expected.0, expected.1, actual.0, actual.1
                )
            }
            FilterError::SingularMatrix { step, quantity } => {
                write!(f, "Matrix inversion failed at step {}: {} is singular", step, quantity)
            }
            FilterError::NonFiniteResult { step, quantity } => {
                write!(f, "Non-finite result at step {}: {}", step, quantity)
            }
            FilterError::Configuration { description } => {
                write!(f, "Configuration error: {}", description)
            }
        }
    }
}

impl std::error::Error for FilterError {}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, FilterError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_error_display() {
        let err = FilterError::SingularMatrix {
            step: 3,
            quantity: Quantity::MeasurementNoise,
        };
        let msg = err.to_string();
        assert!(msg.contains("step 3"));
        assert!(msg.contains("measurement noise covariance"));

        let err = FilterError::ShapeMismatch {
            quantity: Quantity::ObservationMatrix,
            expected: (1, 4),
            actual: (1, 6),
        };
        assert!(err.to_string().contains("1x4"));
        assert!(err.to_string().contains("1x6"));
    }

    #[test]
    fn test_at_step_rewrites_recursion_errors_only() {
        let err = FilterError::singular(Quantity::PriorCovariance).at_step(7);
        assert_eq!(err.step(), Some(7));
        assert_eq!(err.quantity(), Some(Quantity::PriorCovariance));

        let err = FilterError::non_finite(Quantity::PosteriorMean).at_step(2);
        assert_eq!(
            err,
            FilterError::NonFiniteResult {
                step: 2,
                quantity: Quantity::PosteriorMean
            }
        );

        let err = FilterError::shape(Quantity::ProcessNoise, (2, 2), (3, 3)).at_step(5);
        assert_eq!(err.step(), None);
    }

    #[test]
    fn test_configuration_error_has_no_quantity() {
        let err = FilterError::Configuration {
            description: "motion model is required".to_string(),
        };
        assert_eq!(err.quantity(), None);
        assert!(err.to_string().contains("motion model"));
    }
}
