//! Error types for the gapfill-methods crate.

use gapfill_series::SeriesError;

/// Error type for method lookup, registration and kernel execution.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MethodError {
    /// Returned when a method name is not registered.
    #[error("method '{name}' not found (available: {})", available.join(", "))]
    MethodNotFound {
        /// The requested name.
        name: String,
        /// Names registered at the time of the lookup, sorted.
        available: Vec<String>,
    },

    /// Returned when registering a name that is already taken.
    #[error("method '{name}' is already registered")]
    DuplicateMethod {
        /// The conflicting name.
        name: String,
    },

    /// Returned when registering an empty or whitespace-padded name.
    #[error("invalid method name '{name}': must be non-empty without surrounding whitespace")]
    InvalidName {
        /// The rejected name.
        name: String,
    },

    /// Returned when a kernel has too few observed points to work with.
    #[error("{method}: needs at least {needed} observed point(s), got {got}")]
    InsufficientData {
        /// Kernel that rejected the input.
        method: String,
        /// Minimum number of observed points.
        needed: usize,
        /// Number of observed points supplied.
        got: usize,
    },

    /// Returned when a kernel cannot produce finite values for the input.
    #[error("{method}: {reason}")]
    Kernel {
        /// Kernel that failed.
        method: String,
        /// Description of the failure.
        reason: String,
    },

    /// Wraps a series invariant violation raised while building kernel output.
    #[error("series error: {0}")]
    Series(#[from] SeriesError),
}
