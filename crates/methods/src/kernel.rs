//! Shared scaffolding for the default kernels.
//!
//! Every kernel re-indexes its input to the daily axis, estimates the
//! missing runs one at a time and writes the estimates back. Observed
//! values are copied through untouched. Positions on the daily axis double
//! as the day offset from the first observed date.

use std::ops::Range;

use chrono::NaiveDate;
use gapfill_series::TimeSeries;

use crate::error::MethodError;
use crate::method::Method;

/// A series laid out on its daily axis.
#[derive(Debug, Clone)]
pub(crate) struct DailyFrame {
    method: Method,
    start: NaiveDate,
    values: Vec<Option<f64>>,
    known_pos: Vec<f64>,
    known_val: Vec<f64>,
}

impl DailyFrame {
    /// Lays `series` out on its daily axis.
    ///
    /// # Errors
    ///
    /// Returns [`MethodError::InsufficientData`] if nothing is observed.
    pub(crate) fn new(series: &TimeSeries, method: Method) -> Result<Self, MethodError> {
        let daily = series.reindex_daily();
        let start = daily
            .first_date()
            .ok_or_else(|| MethodError::InsufficientData {
                method: method.to_string(),
                needed: 1,
                got: 0,
            })?;

        let values: Vec<Option<f64>> = daily.observations().iter().map(|o| o.value()).collect();
        let (known_pos, known_val): (Vec<f64>, Vec<f64>) = values
            .iter()
            .enumerate()
            .filter_map(|(i, v)| v.map(|v| (i as f64, v)))
            .unzip();

        Ok(Self {
            method,
            start,
            values,
            known_pos,
            known_val,
        })
    }

    /// Day offsets of the observed points.
    pub(crate) fn known_pos(&self) -> &[f64] {
        &self.known_pos
    }

    /// Observed values, aligned with [`known_pos`](Self::known_pos).
    pub(crate) fn known_val(&self) -> &[f64] {
        &self.known_val
    }

    /// Returns `true` if no observed value is negative.
    pub(crate) fn non_negative(&self) -> bool {
        self.known_val.iter().all(|&v| v >= 0.0)
    }

    /// Observed values on either side of a run: `(left, right)`.
    ///
    /// Runs never touch the ends of the daily axis, so both exist.
    pub(crate) fn bracket(&self, run: &Range<usize>) -> (f64, f64) {
        let left = self.values[run.start - 1].unwrap_or_default();
        let right = self.values[run.end].unwrap_or_default();
        (left, right)
    }

    /// Index into the known arrays of the first observation after `run.start`.
    pub(crate) fn split_index(&self, run: &Range<usize>) -> usize {
        let start = run.start as f64;
        self.known_pos.partition_point(|&p| p < start)
    }

    /// Maximal runs of missing positions on the daily axis.
    pub(crate) fn missing_runs(&self) -> Vec<Range<usize>> {
        let mut runs = Vec::new();
        let mut open: Option<usize> = None;
        for (i, v) in self.values.iter().enumerate() {
            match (v, open) {
                (None, None) => open = Some(i),
                (Some(_), Some(start)) => {
                    runs.push(start..i);
                    open = None;
                }
                _ => {}
            }
        }
        runs
    }

    /// Fills every missing run with the values returned by `estimate`.
    ///
    /// `estimate` receives one run and must return one value per position.
    ///
    /// # Errors
    ///
    /// Propagates errors from `estimate`, and returns
    /// [`MethodError::Kernel`] if an estimate is not finite.
    pub(crate) fn fill<F>(mut self, mut estimate: F) -> Result<TimeSeries, MethodError>
    where
        F: FnMut(&Self, &Range<usize>) -> Result<Vec<f64>, MethodError>,
    {
        for run in self.missing_runs() {
            let estimates = estimate(&self, &run)?;
            for (pos, value) in run.zip(estimates) {
                if !value.is_finite() {
                    return Err(MethodError::Kernel {
                        method: self.method.to_string(),
                        reason: format!("non-finite estimate at day offset {pos}"),
                    });
                }
                self.values[pos] = Some(value);
            }
        }
        Ok(TimeSeries::from_daily(self.start, self.values)?)
    }
}

/// Straight-line estimates across `run` between its bracketing observations.
pub(crate) fn linear_run(frame: &DailyFrame, run: &Range<usize>) -> Vec<f64> {
    let (left, right) = frame.bracket(run);
    let x0 = (run.start - 1) as f64;
    let width = (run.end - run.start + 1) as f64;
    run.clone()
        .map(|pos| left + (right - left) * (pos as f64 - x0) / width)
        .collect()
}
