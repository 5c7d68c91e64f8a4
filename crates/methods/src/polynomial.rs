//! Local quadratic interpolation kernel.

use gapfill_series::TimeSeries;
use gapfill_stats::PolyFit;

use crate::error::MethodError;
use crate::kernel::{DailyFrame, linear_run};
use crate::method::Method;

/// Observations taken on each side of a gap for the quadratic fit.
pub const NEIGHBOURS_PER_SIDE: usize = 3;

const DEGREE: usize = 2;

/// Fills every gap from a degree-2 least-squares fit over up to
/// [`NEIGHBOURS_PER_SIDE`] observations on each side of it.
///
/// Gaps with fewer than 3 neighbouring observations fall back to a straight
/// line. Estimates are floored at 0 when every observed value is
/// non-negative.
///
/// # Errors
///
/// Returns [`MethodError::InsufficientData`] if nothing is observed.
pub fn interpolate(series: &TimeSeries) -> Result<TimeSeries, MethodError> {
    let frame = DailyFrame::new(series, Method::Polynomial)?;
    let floor = frame.non_negative().then_some(0.0);

    frame.fill(|frame, run| {
        let split = frame.split_index(run);
        let lo = split.saturating_sub(NEIGHBOURS_PER_SIDE);
        let hi = (split + NEIGHBOURS_PER_SIDE).min(frame.known_pos().len());
        let x = &frame.known_pos()[lo..hi];
        let y = &frame.known_val()[lo..hi];

        let Some(fit) = PolyFit::fit(x, y, DEGREE) else {
            return Ok(linear_run(frame, run));
        };
        Ok(run
            .clone()
            .map(|pos| {
                let v = fit.predict(pos as f64);
                floor.map_or(v, |f| v.max(f))
            })
            .collect())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::NaiveDate;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
    }

    #[test]
    fn recovers_parabola() {
        let points: Vec<(NaiveDate, f64)> = [1, 2, 3, 7, 8, 9]
            .iter()
            .map(|&day| {
                let x = (day - 1) as f64;
                (d(day), x * x)
            })
            .collect();
        let s = TimeSeries::from_present(points).unwrap();
        let out = interpolate(&s).unwrap();
        for day in 4..=6 {
            let x = (day - 1) as f64;
            assert_relative_eq!(out.value_at(d(day)).unwrap(), x * x, epsilon = 1e-8);
        }
    }

    #[test]
    fn falls_back_to_linear_with_two_neighbours() {
        let s = TimeSeries::from_present(vec![(d(1), 0.0), (d(5), 4.0)]).unwrap();
        let out = interpolate(&s).unwrap();
        assert_relative_eq!(out.value_at(d(3)).unwrap(), 2.0, epsilon = 1e-12);
    }

    #[test]
    fn floors_at_zero_for_non_negative_data() {
        // A V-shaped neighbourhood makes the fitted parabola dip below zero.
        let s = TimeSeries::from_present(vec![
            (d(1), 10.0),
            (d(2), 5.0),
            (d(3), 0.5),
            (d(9), 0.5),
            (d(10), 5.0),
            (d(11), 10.0),
        ])
        .unwrap();
        let out = interpolate(&s).unwrap();
        for day in 4..=8 {
            assert!(out.value_at(d(day)).unwrap() >= 0.0);
        }
    }

    #[test]
    fn observed_values_untouched() {
        let s = TimeSeries::from_present(vec![(d(1), 3.0), (d(2), 1.0), (d(4), 7.0), (d(5), 2.0)])
            .unwrap();
        let out = interpolate(&s).unwrap();
        for (date, value) in s.present() {
            assert_eq!(out.value_at(date), Some(value));
        }
    }
}
