//! Local-context analysis around a gap.

use chrono::NaiveDate;
use gapfill_series::{TimeSeries, days_between};
use gapfill_stats::{diff, index_axis, linear_slope, mean, population_sd};
use serde::Serialize;

use crate::config::ContextConfig;
use crate::error::GapError;
use crate::gap::Gap;

/// Summary of the observed points on one side of a gap.
///
/// `trend` is the least-squares slope against the point index `0..points`
/// (not calendar days), `volatility` the population standard deviation of
/// first differences. With fewer than 2 points all three statistics are 0;
/// use [`is_estimated`](Self::is_estimated) to tell a real zero apart.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct WindowSummary {
    pub points: usize,
    pub trend: f64,
    pub volatility: f64,
    pub mean: f64,
}

impl WindowSummary {
    fn from_values(values: &[f64]) -> Self {
        let points = values.len();
        if points < 2 {
            return Self {
                points,
                ..Self::default()
            };
        }
        Self {
            points,
            trend: linear_slope(&index_axis(points), values).unwrap_or_default(),
            volatility: population_sd(&diff(values)),
            mean: mean(values),
        }
    }

    /// Returns `true` if the statistics were computed from at least 2 points.
    pub fn is_estimated(&self) -> bool {
        self.points >= 2
    }
}

/// Features of the data around one gap.
///
/// `trend_consistency` and `level_jump` are `+inf` and `is_stable` is false
/// unless both sides have observed points.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocalContext {
    /// Number of missing days in the gap.
    pub gap_size: usize,
    pub before: WindowSummary,
    pub after: WindowSummary,
    pub has_before: bool,
    pub has_after: bool,
    /// `|before.trend - after.trend|`.
    pub trend_consistency: f64,
    /// `|before.mean - after.mean|`.
    pub level_jump: f64,
    pub is_stable: bool,
    /// Offset of the gap start within the observed span, in `[0, 1]`.
    pub gap_position: f64,
    pub is_edge_gap: bool,
}

/// Computes the [`LocalContext`] of `gap` within `series`.
///
/// Uses up to `window_size` observed points strictly before and strictly
/// after the gap.
///
/// # Errors
///
/// Returns [`GapError::InvalidWindowSize`] or [`GapError::InvalidThreshold`]
/// for an invalid config, [`GapError::EmptySeries`] if nothing is observed
/// and [`GapError::GapOutsideSeries`] if the gap is not inside the observed
/// span.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use gapfill_gaps::{ContextConfig, analyze_context, detect_gaps};
/// use gapfill_series::TimeSeries;
///
/// let d = |day| NaiveDate::from_ymd_opt(2024, 1, day).unwrap();
/// let points = (1..=20).filter(|&day| day != 10).map(|day| (d(day), 1.0)).collect();
/// let series = TimeSeries::from_present(points).unwrap();
///
/// let gap = &detect_gaps(&series).unwrap()[0];
/// let ctx = analyze_context(&series, gap, &ContextConfig::default()).unwrap();
/// assert!(ctx.is_stable);
/// assert_eq!(ctx.before.points, 5);
/// ```
pub fn analyze_context(
    series: &TimeSeries,
    gap: &Gap,
    config: &ContextConfig,
) -> Result<LocalContext, GapError> {
    config.validate()?;
    let points: Vec<(NaiveDate, f64)> = series.present().collect();
    context_of(&points, gap, config)
}

/// Context of `gap` over pre-collected observed points in date order.
///
/// `config` must already be valid.
pub(crate) fn context_of(
    points: &[(NaiveDate, f64)],
    gap: &Gap,
    config: &ContextConfig,
) -> Result<LocalContext, GapError> {
    let (Some(&(first, _)), Some(&(last, _))) = (points.first(), points.last()) else {
        return Err(GapError::EmptySeries);
    };
    if gap.start_date() < first || gap.end_date() > last {
        return Err(GapError::GapOutsideSeries {
            start: gap.start_date(),
            end: gap.end_date(),
            first,
            last,
        });
    }

    let window = config.window_size();
    let before_end = points.partition_point(|&(d, _)| d < gap.start_date());
    let after_start = points.partition_point(|&(d, _)| d <= gap.end_date());
    let before: Vec<f64> = points[before_end.saturating_sub(window)..before_end]
        .iter()
        .map(|&(_, v)| v)
        .collect();
    let after_end = after_start.saturating_add(window).min(points.len());
    let after: Vec<f64> = points[after_start..after_end]
        .iter()
        .map(|&(_, v)| v)
        .collect();

    let before_summary = WindowSummary::from_values(&before);
    let after_summary = WindowSummary::from_values(&after);
    let has_before = !before.is_empty();
    let has_after = !after.is_empty();

    let (trend_consistency, level_jump, is_stable) = if has_before && has_after {
        let consistency = (before_summary.trend - after_summary.trend).abs();
        let jump = (before_summary.mean - after_summary.mean).abs();
        let stable = before_summary.volatility < config.stable_volatility()
            && after_summary.volatility < config.stable_volatility()
            && consistency < config.stable_trend_delta();
        (consistency, jump, stable)
    } else {
        (f64::INFINITY, f64::INFINITY, false)
    };

    let span = days_between(first, last);
    let gap_position = if span > 0 {
        days_between(first, gap.start_date()) as f64 / span as f64
    } else {
        0.0
    };
    let edge = config.edge_fraction();
    let is_edge_gap = gap_position < edge || gap_position > 1.0 - edge;

    Ok(LocalContext {
        gap_size: gap.size(),
        before: before_summary,
        after: after_summary,
        has_before,
        has_after,
        trend_consistency,
        level_jump,
        is_stable,
        gap_position,
        is_edge_gap,
    })
}
