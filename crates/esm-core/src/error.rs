//! Error types for time series statistics
//!
//! Provides a unified error type for all esm-stats crates.

use thiserror::Error;

/// Core error type for series statistics
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid parameter provided to a function
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Invalid input data (length or coordinate mismatch)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Fewer valid samples than the operation needs
    #[error("Insufficient data: expected at least {expected} valid samples, got {actual}")]
    InsufficientData { expected: usize, actual: usize },

    /// Two series share too few coordinate-aligned valid pairs
    #[error("Insufficient overlap: expected at least {expected} valid pairs, got {actual}")]
    InsufficientOverlap { expected: usize, actual: usize },

    /// An aggregation received no usable input
    #[error("Empty input: {0}")]
    EmptyInput(String),

    /// Numerical computation error
    #[error("Computation error: {0}")]
    Computation(String),

    /// Other errors
    #[error("Other error: {0}")]
    Other(#[from] anyhow::Error),
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

// Helper functions for common error patterns

impl Error {
    /// Create an error for a length mismatch between aligned inputs
    pub fn size_mismatch(expected: usize, actual: usize, context: &str) -> Self {
        Self::InvalidInput(format!(
            "Size mismatch in {context}: expected {expected}, got {actual}"
        ))
    }

    /// Create an error for series that are not on the same coordinate
    pub fn coordinate_mismatch(context: &str) -> Self {
        Self::InvalidInput(format!("Coordinates differ in {context}"))
    }

    /// Create an error for a correlation with a constant input
    pub fn zero_variance(context: &str) -> Self {
        Self::Computation(format!("Cannot compute {context}: zero variance"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InvalidParameter("r1 must be in (-1, 1)".to_string());
        assert_eq!(err.to_string(), "Invalid parameter: r1 must be in (-1, 1)");

        let err = Error::InsufficientData { expected: 2, actual: 1 };
        assert_eq!(
            err.to_string(),
            "Insufficient data: expected at least 2 valid samples, got 1"
        );

        let err = Error::InsufficientOverlap { expected: 3, actual: 2 };
        assert_eq!(
            err.to_string(),
            "Insufficient overlap: expected at least 3 valid pairs, got 2"
        );

        let err = Error::EmptyInput("no series to average".to_string());
        assert_eq!(err.to_string(), "Empty input: no series to average");
    }

    #[test]
    fn test_error_helper_functions() {
        let err = Error::size_mismatch(10, 8, "weights");
        assert_eq!(
            err.to_string(),
            "Invalid input: Size mismatch in weights: expected 10, got 8"
        );

        let err = Error::coordinate_mismatch("correlation");
        assert!(matches!(err, Error::InvalidInput(_)));

        let err = Error::zero_variance("correlation");
        assert_eq!(
            err.to_string(),
            "Computation error: Cannot compute correlation: zero variance"
        );
    }

    #[test]
    fn test_error_from_anyhow() {
        let anyhow_err = anyhow::anyhow!("loader failed");
        let err: Error = anyhow_err.into();

        match err {
            Error::Other(_) => assert!(err.to_string().contains("loader failed")),
            _ => panic!("Wrong error type"),
        }
    }
}
