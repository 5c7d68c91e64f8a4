//! Per-series coverage summary of a multi-series input.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use serde::Serialize;

use crate::input::Dataset;

/// Coverage of one series, counting only days with an observed value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesSummary {
    /// `None` when the input has no id column.
    pub id: Option<String>,
    pub unique_days: usize,
    pub first_date: NaiveDate,
    pub last_date: NaiveDate,
    /// Calendar days from first to last observed day, inclusive.
    pub span_days: i64,
    /// `unique_days / span_days`, in `(0, 1]`.
    pub completeness: f64,
}

/// Summarizes every series of `dataset`, best covered first.
///
/// Series are ranked by observed days, then completeness, both descending;
/// remaining ties are broken by id. Series without any observed value are
/// left out. `top` keeps only the first `top` entries.
pub fn rank_series(dataset: &Dataset, top: Option<usize>) -> Vec<SeriesSummary> {
    let mut days: BTreeMap<Option<&str>, BTreeSet<NaiveDate>> = BTreeMap::new();
    for row in dataset.rows().iter().filter(|r| r.value.is_some()) {
        days.entry(row.id.as_deref()).or_default().insert(row.day());
    }

    let mut summaries: Vec<SeriesSummary> = days
        .into_iter()
        .filter_map(|(id, days)| {
            let first_date = *days.first()?;
            let last_date = *days.last()?;
            let span_days = (last_date - first_date).num_days() + 1;
            Some(SeriesSummary {
                id: id.map(str::to_string),
                unique_days: days.len(),
                first_date,
                last_date,
                span_days,
                completeness: days.len() as f64 / span_days as f64,
            })
        })
        .collect();

    summaries.sort_by(|a, b| {
        b.unique_days
            .cmp(&a.unique_days)
            .then(b.completeness.total_cmp(&a.completeness))
            .then_with(|| a.id.cmp(&b.id))
    });
    if let Some(top) = top {
        summaries.truncate(top);
    }
    summaries
}
