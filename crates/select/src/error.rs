//! Error types for the gapfill-select crate.

use gapfill_methods::MethodError;
use gapfill_series::SeriesError;

/// Error type for cross-validation, auto-selection and adaptive filling.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SelectError {
    /// Returned when the held-out fraction is not strictly between 0 and 1.
    #[error("test ratio must be in (0, 1), got {test_ratio}")]
    InvalidTestRatio {
        /// The invalid ratio.
        test_ratio: f64,
    },

    /// Returned when the cross-validation weight is outside `[0, 1]`.
    #[error("cv weight must be in [0, 1], got {cv_weight}")]
    InvalidCvWeight {
        /// The invalid weight.
        cv_weight: f64,
    },

    /// Returned when the series has too few observed points to hold any out.
    #[error("need at least {needed} observed points, got {got}")]
    InsufficientData {
        /// Minimum number of observed points.
        needed: usize,
        /// Number of observed points supplied.
        got: usize,
    },

    /// Returned when the registry has no method to evaluate.
    #[error("method registry is empty")]
    EmptyRegistry,

    /// Wraps a method lookup or kernel error.
    #[error(transparent)]
    Method(#[from] MethodError),

    /// Wraps a series invariant violation.
    #[error(transparent)]
    Series(#[from] SeriesError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_invalid_test_ratio() {
        let err = SelectError::InvalidTestRatio { test_ratio: 1.5 };
        assert_eq!(err.to_string(), "test ratio must be in (0, 1), got 1.5");
    }

    #[test]
    fn error_invalid_cv_weight() {
        let err = SelectError::InvalidCvWeight { cv_weight: -0.1 };
        assert_eq!(err.to_string(), "cv weight must be in [0, 1], got -0.1");
    }

    #[test]
    fn error_insufficient_data() {
        let err = SelectError::InsufficientData { needed: 3, got: 2 };
        assert_eq!(err.to_string(), "need at least 3 observed points, got 2");
    }

    #[test]
    fn error_method_is_transparent() {
        let err = SelectError::from(MethodError::DuplicateMethod {
            name: "linear".to_string(),
        });
        assert_eq!(err.to_string(), "method 'linear' is already registered");
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SelectError>();
    }
}
