//! Error types for the gapfill-series crate.

use chrono::NaiveDate;

/// Error type for all fallible operations in the gapfill-series crate.
///
/// Every variant describes a series that breaks the model invariants:
/// strictly increasing unique dates and finite values.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SeriesError {
    /// Returned when two observations are out of order or share a date.
    #[error("dates must be strictly increasing: {previous} is followed by {current} at index {index}")]
    UnorderedDates {
        /// Date of the preceding observation.
        previous: NaiveDate,
        /// Date of the offending observation.
        current: NaiveDate,
        /// Index of the offending observation.
        index: usize,
    },

    /// Returned when a present value is NaN or infinite.
    #[error("non-finite value {value} on {date}")]
    NonFiniteValue {
        /// Date of the offending observation.
        date: NaiveDate,
        /// The rejected value.
        value: f64,
    },

    /// Returned when an index passed to [`crate::TimeSeries::with_hidden`]
    /// does not address a present point.
    #[error("present-point index {index} out of range (series has {n_present} present points)")]
    IndexOutOfRange {
        /// The rejected index.
        index: usize,
        /// Number of present points in the series.
        n_present: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, day).unwrap()
    }

    #[test]
    fn error_unordered_dates() {
        let err = SeriesError::UnorderedDates {
            previous: date(5),
            current: date(4),
            index: 3,
        };
        assert_eq!(
            err.to_string(),
            "dates must be strictly increasing: 2024-03-05 is followed by 2024-03-04 at index 3"
        );
    }

    #[test]
    fn error_non_finite_value() {
        let err = SeriesError::NonFiniteValue {
            date: date(1),
            value: f64::INFINITY,
        };
        assert_eq!(err.to_string(), "non-finite value inf on 2024-03-01");
    }

    #[test]
    fn error_index_out_of_range() {
        let err = SeriesError::IndexOutOfRange {
            index: 9,
            n_present: 4,
        };
        assert_eq!(
            err.to_string(),
            "present-point index 9 out of range (series has 4 present points)"
        );
    }

    #[test]
    fn error_is_std_error() {
        fn assert_impl<T: std::error::Error>() {}
        assert_impl::<SeriesError>();
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_impl<T: Send + Sync>() {}
        assert_impl::<SeriesError>();
    }
}
