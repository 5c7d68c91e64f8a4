//! Error types for the gapfill-gaps crate.

use chrono::NaiveDate;

/// Error type for gap detection and context analysis.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GapError {
    /// Returned when the series has no observed value.
    #[error("series has no observed values")]
    EmptySeries,

    /// Returned when the context window size is zero.
    #[error("window size must be >= 1, got {window_size}")]
    InvalidWindowSize {
        /// The invalid window size.
        window_size: usize,
    },

    /// Returned when a threshold is non-finite or outside its valid range.
    #[error("threshold '{name}' is invalid: {value}")]
    InvalidThreshold {
        /// Name of the offending threshold.
        name: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// Returned when a gap does not lie within the observed span of the series.
    #[error("gap {start}..={end} lies outside the series span {first}..={last}")]
    GapOutsideSeries {
        /// First missing date of the gap.
        start: NaiveDate,
        /// Last missing date of the gap.
        end: NaiveDate,
        /// First observed date of the series.
        first: NaiveDate,
        /// Last observed date of the series.
        last: NaiveDate,
    },
}
