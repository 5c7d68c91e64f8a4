//! Gap model and detection.

use chrono::NaiveDate;
use gapfill_series::{TimeSeries, daily_sequence, days_between};
use serde::Serialize;
use tracing::debug;

use crate::error::GapError;

/// A maximal run of consecutive calendar days without an observed value.
///
/// `size == dates.len() == end_date - start_date + 1`, and a gap is never
/// empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Gap {
    start_date: NaiveDate,
    end_date: NaiveDate,
    size: usize,
    dates: Vec<NaiveDate>,
}

impl Gap {
    /// Creates the gap covering every day from `start` to `end` inclusive.
    ///
    /// Returns `None` when `end < start`.
    pub fn spanning(start: NaiveDate, end: NaiveDate) -> Option<Self> {
        Self::from_run(daily_sequence(start, end))
    }

    /// Builds a gap from consecutive dates. `None` if `dates` is empty.
    fn from_run(dates: Vec<NaiveDate>) -> Option<Self> {
        let start_date = *dates.first()?;
        let end_date = *dates.last()?;
        Some(Self {
            start_date,
            end_date,
            size: dates.len(),
            dates,
        })
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    pub fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    /// Number of missing days.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Every missing day, in order.
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// Returns `true` if `date` falls inside this gap.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }
}

/// Lists every run of missing days between the first and last observed dates.
///
/// The result is ordered by date; the union of the gaps' dates is exactly
/// the set of unobserved days in the span, and no two gaps are adjacent.
/// A series without missing days yields an empty list.
///
/// # Errors
///
/// Returns [`GapError::EmptySeries`] if nothing is observed.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use gapfill_gaps::detect_gaps;
/// use gapfill_series::TimeSeries;
///
/// let d = |day| NaiveDate::from_ymd_opt(2024, 1, day).unwrap();
/// let series = TimeSeries::from_present(vec![(d(1), 1.0), (d(2), 2.0), (d(6), 6.0)]).unwrap();
///
/// let gaps = detect_gaps(&series).unwrap();
/// assert_eq!(gaps.len(), 1);
/// assert_eq!(gaps[0].start_date(), d(3));
/// assert_eq!(gaps[0].size(), 3);
/// ```
pub fn detect_gaps(series: &TimeSeries) -> Result<Vec<Gap>, GapError> {
    if series.n_present() == 0 {
        return Err(GapError::EmptySeries);
    }

    let mut observed = series.present_dates().into_iter().peekable();
    let missing = series.daily_axis().into_iter().filter(|date| {
        if observed.peek() == Some(date) {
            observed.next();
            false
        } else {
            true
        }
    });

    let mut gaps = Vec::new();
    let mut run: Vec<NaiveDate> = Vec::new();
    for date in missing {
        if let Some(&prev) = run.last() {
            if days_between(prev, date) > 1 {
                gaps.extend(Gap::from_run(std::mem::take(&mut run)));
            }
        }
        run.push(date);
    }
    gaps.extend(Gap::from_run(run));

    debug!(n_gaps = gaps.len(), "detected gaps");
    Ok(gaps)
}
