//! Linear interpolation kernel.

use gapfill_series::TimeSeries;

use crate::error::MethodError;
use crate::kernel::{DailyFrame, linear_run};
use crate::method::Method;

/// Fills every gap with a straight line between its neighbouring observations.
///
/// # Errors
///
/// Returns [`MethodError::InsufficientData`] if nothing is observed.
pub fn interpolate(series: &TimeSeries) -> Result<TimeSeries, MethodError> {
    DailyFrame::new(series, Method::Linear)?.fill(|frame, run| Ok(linear_run(frame, run)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
    }

    #[test]
    fn fills_single_gap() {
        let s = TimeSeries::from_present(vec![(d(1), 10.0), (d(3), 20.0)]).unwrap();
        let out = interpolate(&s).unwrap();
        assert_eq!(out.len(), 3);
        assert_eq!(out.value_at(d(2)), Some(15.0));
    }

    #[test]
    fn negative_values_not_clipped() {
        let s = TimeSeries::from_present(vec![(d(1), -10.0), (d(3), -20.0)]).unwrap();
        assert_eq!(interpolate(&s).unwrap().value_at(d(2)), Some(-15.0));
    }

    #[test]
    fn single_point_passes_through() {
        let s = TimeSeries::from_present(vec![(d(4), 1.0)]).unwrap();
        let out = interpolate(&s).unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out.value_at(d(4)), Some(1.0));
    }
}
