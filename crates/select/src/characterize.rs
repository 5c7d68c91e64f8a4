//! Whole-series shape analysis and heuristic method recommendation.

use gapfill_methods::Method;
use gapfill_series::TimeSeries;
use gapfill_stats::{PolyFit, diff, index_axis, linear_slope, mean, population_sd, r2_score};
use serde::Serialize;

/// Below this many observed values no shape is computed.
pub const MIN_VALUES: usize = 3;

const LOG_R2_MIN: f64 = 0.8;
const POLY_GAIN_MIN: f64 = 0.1;
const POLY_VOLATILITY_MAX: f64 = 0.2;
const SPLINE_VOLATILITY_MIN: f64 = 0.3;

/// Shape statistics of the observed values, fitted against the point index.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SeriesShape {
    /// Slope of the degree-1 fit.
    pub trend_coefficient: f64,
    pub monotonic_increasing: bool,
    pub monotonic_decreasing: bool,
    /// R² of a line fitted to `ln(value)`; 0 unless every value is positive.
    pub log_trend_r2: f64,
    pub linear_r2: f64,
    pub polynomial_r2: f64,
    /// Population sd of first differences over the mean absolute value.
    pub volatility: f64,
    pub positive_values_only: bool,
}

/// Shape of a series and the method it suggests.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesCharacteristics {
    pub data_points: usize,
    /// `None` with fewer than [`MIN_VALUES`] observed values.
    pub shape: Option<SeriesShape>,
    pub recommendation: Method,
    pub reason: String,
}

/// Characterizes the observed values of `series` and recommends a method.
///
/// In order: `log` for a log-linear fit with R² above 0.8 on positive data,
/// `polynomial` when a quadratic beats a line by more than 0.1 R² at low
/// volatility, `spline` for volatility above 0.3, otherwise `linear`.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use gapfill_methods::Method;
/// use gapfill_select::characterize;
/// use gapfill_series::TimeSeries;
///
/// let d = |day| NaiveDate::from_ymd_opt(2024, 1, day).unwrap();
/// let series = TimeSeries::from_present(vec![(d(1), 1.0), (d(3), 2.0)]).unwrap();
///
/// let c = characterize(&series);
/// assert_eq!(c.recommendation, Method::Linear);
/// assert!(c.reason.contains("insufficient data"));
/// ```
pub fn characterize(series: &TimeSeries) -> SeriesCharacteristics {
    let values = series.present_values();
    let data_points = values.len();
    if data_points < MIN_VALUES {
        return SeriesCharacteristics {
            data_points,
            shape: None,
            recommendation: Method::Linear,
            reason: format!("insufficient data ({data_points} observed values)"),
        };
    }

    let shape = shape_of(&values);
    let (recommendation, reason) = recommend(&shape);
    SeriesCharacteristics {
        data_points,
        shape: Some(shape),
        recommendation,
        reason,
    }
}

fn shape_of(values: &[f64]) -> SeriesShape {
    let x = index_axis(values.len());
    let fitted_r2 = |y: &[f64], degree: usize| {
        PolyFit::fit(&x, y, degree).map_or(0.0, |fit| r2_score(y, &fit.predict_all(&x)))
    };

    let diffs = diff(values);
    let positive_values_only = values.iter().all(|&v| v > 0.0);
    let log_trend_r2 = if positive_values_only {
        let logs: Vec<f64> = values.iter().map(|v| v.ln()).collect();
        fitted_r2(&logs, 1)
    } else {
        0.0
    };

    let abs_mean = mean(&values.iter().map(|v| v.abs()).collect::<Vec<_>>());
    let volatility = if abs_mean > 0.0 {
        population_sd(&diffs) / abs_mean
    } else {
        0.0
    };

    SeriesShape {
        trend_coefficient: linear_slope(&x, values).unwrap_or_default(),
        monotonic_increasing: diffs.iter().all(|&d| d >= 0.0),
        monotonic_decreasing: diffs.iter().all(|&d| d <= 0.0),
        log_trend_r2,
        linear_r2: fitted_r2(values, 1),
        polynomial_r2: fitted_r2(values, 2),
        volatility,
        positive_values_only,
    }
}

fn recommend(shape: &SeriesShape) -> (Method, String) {
    if shape.log_trend_r2 > LOG_R2_MIN && shape.positive_values_only {
        (
            Method::Log,
            format!("exponential trend (log R2={:.3})", shape.log_trend_r2),
        )
    } else if shape.polynomial_r2 - shape.linear_r2 > POLY_GAIN_MIN
        && shape.volatility < POLY_VOLATILITY_MAX
    {
        (
            Method::Polynomial,
            format!(
                "non-linear trend (polynomial R2={:.3} vs linear R2={:.3})",
                shape.polynomial_r2, shape.linear_r2
            ),
        )
    } else if shape.volatility > SPLINE_VOLATILITY_MIN {
        (
            Method::Spline,
            format!("high volatility (volatility={:.3})", shape.volatility),
        )
    } else {
        (
            Method::Linear,
            format!("linear trend fits (R2={:.3})", shape.linear_r2),
        )
    }
}
