//! Error types for structured error handling.
//!
//! This module provides [`SimulationError`], the single error type shared by
//! configuration validation, path generation and metrics computation.
//!
//! Every variant is terminal for the operation in which it occurs. None of
//! them is produced by guardrail clamping, which is ordinary control flow.

use thiserror::Error;

/// Categorised simulation errors.
///
/// # Variants
/// - `ConfigValidation`: Malformed input parameters, detected before any state is generated
/// - `NumericalInstability`: Non-finite price or momentum detected mid-path
/// - `EmptyPath`: Metrics requested on a path with fewer than two states
/// - `NonPositivePrice`: A zero price makes the log return undefined
///
/// # Examples
/// ```
/// use synth_core::types::SimulationError;
///
/// let err = SimulationError::config("dt", "must be positive, got 0");
/// assert_eq!(
///     format!("{}", err),
///     "Invalid configuration for 'dt': must be positive, got 0"
/// );
/// ```
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SimulationError {
    /// Invalid configuration parameter.
    #[error("Invalid configuration for '{field}': {reason}")]
    ConfigValidation {
        /// Name of the offending field.
        field: &'static str,
        /// Human readable description of the violated constraint.
        reason: String,
    },

    /// Divergence detected while advancing a path.
    #[error(
        "Numerical instability on path {path_index} at step {step_index}: \
         price = {price}, momentum = {momentum}"
    )]
    NumericalInstability {
        /// Index of the failing path within its batch.
        path_index: u64,
        /// Step at which the non-finite value was proposed.
        step_index: usize,
        /// Offending price value.
        price: f64,
        /// Offending momentum value.
        momentum: f64,
    },

    /// Path too short to compute returns.
    #[error("Cannot compute metrics on a path of {len} state(s): at least 2 required")]
    EmptyPath {
        /// Number of states in the path.
        len: usize,
    },

    /// Price at or below zero, for which no log return exists.
    #[error("Non-positive price {price} at step {step_index}")]
    NonPositivePrice {
        /// Step holding the offending price.
        step_index: usize,
        /// Offending price value.
        price: f64,
    },
}

impl SimulationError {
    /// Shorthand for a [`SimulationError::ConfigValidation`] error.
    pub fn config(field: &'static str, reason: impl Into<String>) -> Self {
        Self::ConfigValidation {
            field,
            reason: reason.into(),
        }
    }

    /// Returns `true` for errors raised before any simulation begins.
    pub fn is_config_error(&self) -> bool {
        matches!(self, Self::ConfigValidation { .. })
    }
}

/// Result alias used throughout the simulator crates.
pub type Result<T> = std::result::Result<T, SimulationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = SimulationError::config("momentum_damping", "must lie in [0, 1), got 1.5");
        assert!(err.to_string().contains("momentum_damping"));
        assert!(err.to_string().contains("1.5"));
        assert!(err.is_config_error());
    }

    #[test]
    fn test_instability_display() {
        let err = SimulationError::NumericalInstability {
            path_index: 3,
            step_index: 17,
            price: f64::NAN,
            momentum: f64::INFINITY,
        };
        let msg = err.to_string();
        assert!(msg.contains("path 3"));
        assert!(msg.contains("step 17"));
        assert!(msg.contains("NaN"));
        assert!(!err.is_config_error());
    }

    #[test]
    fn test_empty_path_display() {
        let err = SimulationError::EmptyPath { len: 1 };
        assert!(err.to_string().contains("1 state"));
    }

    #[test]
    fn test_non_positive_price_display() {
        let err = SimulationError::NonPositivePrice {
            step_index: 4,
            price: 0.0,
        };
        assert_eq!(err.to_string(), "Non-positive price 0 at step 4");
    }
}
