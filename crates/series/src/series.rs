//! Time series container with explicit missing values.

use chrono::NaiveDate;
use serde::Serialize;

use crate::axis::daily_sequence;
use crate::error::SeriesError;

/// A single dated observation. `value` is `None` for a missing day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Observation {
    date: NaiveDate,
    value: Option<f64>,
}

impl Observation {
    /// Returns the observation date.
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Returns the observed value, or `None` for a gap.
    pub fn value(&self) -> Option<f64> {
        self.value
    }

    /// Returns `true` if a value was observed.
    pub fn is_present(&self) -> bool {
        self.value.is_some()
    }
}

/// Ordered sequence of `(date, value)` observations.
///
/// Dates are strictly increasing and unique; present values are finite.
/// Both invariants are checked on construction. Every derived view
/// ([`reindex_daily`](Self::reindex_daily), [`with_hidden`](Self::with_hidden))
/// returns a new series and leaves `self` untouched.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct TimeSeries {
    observations: Vec<Observation>,
}

impl TimeSeries {
    /// Creates a series from dated, possibly missing values.
    ///
    /// # Errors
    ///
    /// Returns [`SeriesError::UnorderedDates`] if dates are not strictly
    /// increasing, or [`SeriesError::NonFiniteValue`] if a present value is
    /// NaN or infinite.
    pub fn new(points: Vec<(NaiveDate, Option<f64>)>) -> Result<Self, SeriesError> {
        for (index, pair) in points.windows(2).enumerate() {
            if pair[1].0 <= pair[0].0 {
                return Err(SeriesError::UnorderedDates {
                    previous: pair[0].0,
                    current: pair[1].0,
                    index: index + 1,
                });
            }
        }
        if let Some(&(date, Some(value))) = points
            .iter()
            .find(|(_, v)| v.is_some_and(|x| !x.is_finite()))
        {
            return Err(SeriesError::NonFiniteValue { date, value });
        }

        let observations = points
            .into_iter()
            .map(|(date, value)| Observation { date, value })
            .collect();
        Ok(Self { observations })
    }

    /// Creates a series in which every point is observed.
    ///
    /// # Errors
    ///
    /// Same as [`TimeSeries::new`].
    pub fn from_present(points: Vec<(NaiveDate, f64)>) -> Result<Self, SeriesError> {
        Self::new(points.into_iter().map(|(d, v)| (d, Some(v))).collect())
    }

    /// Creates a series on consecutive days starting at `start`.
    ///
    /// # Errors
    ///
    /// Returns [`SeriesError::NonFiniteValue`] if a present value is not finite.
    pub fn from_daily(start: NaiveDate, values: Vec<Option<f64>>) -> Result<Self, SeriesError> {
        let points = start.iter_days().zip(values).collect();
        Self::new(points)
    }

    /// Returns all observations, present and missing.
    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    /// Returns the number of observations, including missing ones.
    pub fn len(&self) -> usize {
        self.observations.len()
    }

    /// Returns `true` if the series holds no observations at all.
    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// Iterates over the observed `(date, value)` points in date order.
    pub fn present(&self) -> impl Iterator<Item = (NaiveDate, f64)> + '_ {
        self.observations
            .iter()
            .filter_map(|o| o.value.map(|v| (o.date, v)))
    }

    /// Returns the number of observed points.
    pub fn n_present(&self) -> usize {
        self.observations.iter().filter(|o| o.is_present()).count()
    }

    /// Returns the observed values in date order.
    pub fn present_values(&self) -> Vec<f64> {
        self.present().map(|(_, v)| v).collect()
    }

    /// Returns the dates of the observed points.
    pub fn present_dates(&self) -> Vec<NaiveDate> {
        self.present().map(|(d, _)| d).collect()
    }

    /// Returns the earliest date carrying an observed value.
    pub fn first_date(&self) -> Option<NaiveDate> {
        self.present().next().map(|(d, _)| d)
    }

    /// Returns the latest date carrying an observed value.
    pub fn last_date(&self) -> Option<NaiveDate> {
        self.observations
            .iter()
            .rev()
            .find(|o| o.is_present())
            .map(|o| o.date)
    }

    /// Number of days between the first and last observed points.
    ///
    /// `Some(0)` for a single observed point, `None` when nothing is observed.
    pub fn span_days(&self) -> Option<i64> {
        let first = self.first_date()?;
        let last = self.last_date()?;
        Some((last - first).num_days())
    }

    /// Returns the observed value on `date`, if any.
    pub fn value_at(&self, date: NaiveDate) -> Option<f64> {
        self.observations
            .binary_search_by(|o| o.date.cmp(&date))
            .ok()
            .and_then(|i| self.observations[i].value)
    }

    /// Returns the observation whose date is closest to `date`, present or not.
    ///
    /// On a tie the earlier date wins. `None` for an empty series.
    pub fn nearest(&self, date: NaiveDate) -> Option<Observation> {
        self.observations
            .iter()
            .min_by_key(|o| (o.date - date).num_days().abs())
            .copied()
    }

    /// Every calendar day between the first and last observed points.
    pub fn daily_axis(&self) -> Vec<NaiveDate> {
        match (self.first_date(), self.last_date()) {
            (Some(first), Some(last)) => daily_sequence(first, last),
            _ => Vec::new(),
        }
    }

    /// Returns a series with one observation per day of [`daily_axis`](Self::daily_axis).
    ///
    /// Days without an observed value are `None`. Missing observations
    /// outside the observed span are dropped.
    pub fn reindex_daily(&self) -> TimeSeries {
        let mut present = self.present().peekable();
        let observations = self
            .daily_axis()
            .into_iter()
            .map(|date| {
                let value = match present.peek() {
                    Some(&(d, v)) if d == date => {
                        present.next();
                        Some(v)
                    }
                    _ => None,
                };
                Observation { date, value }
            })
            .collect();
        TimeSeries { observations }
    }

    /// Returns a copy in which the given present points are marked missing.
    ///
    /// `indices` address observed points in date order (0 is the first
    /// observed point), not raw observations.
    ///
    /// # Errors
    ///
    /// Returns [`SeriesError::IndexOutOfRange`] if an index does not address
    /// an observed point.
    pub fn with_hidden(&self, indices: &[usize]) -> Result<TimeSeries, SeriesError> {
        let n_present = self.n_present();
        if let Some(&index) = indices.iter().find(|&&i| i >= n_present) {
            return Err(SeriesError::IndexOutOfRange { index, n_present });
        }

        let mut hidden = vec![false; n_present];
        for &i in indices {
            hidden[i] = true;
        }

        let mut present_idx = 0;
        let observations = self
            .observations
            .iter()
            .map(|o| {
                if o.is_present() {
                    let hide = hidden[present_idx];
                    present_idx += 1;
                    if hide {
                        return Observation {
                            date: o.date,
                            value: None,
                        };
                    }
                }
                *o
            })
            .collect();
        Ok(TimeSeries { observations })
    }
}
