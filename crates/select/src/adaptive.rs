//! Per-gap adaptive filling from a gap plan.

use std::collections::BTreeMap;

use gapfill_gaps::GapReport;
use gapfill_methods::{Method, MethodRegistry};
use gapfill_series::TimeSeries;
use rayon::prelude::*;
use serde::Serialize;
use tracing::debug;

use crate::error::SelectError;

/// A series filled gap by gap.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdaptiveFill {
    /// The input re-indexed to its daily axis with every planned gap filled.
    pub series: TimeSeries,
    /// Method applied to each gap, in gap order.
    pub applied: Vec<Method>,
}

/// Fills every gap of `series` with the method planned for it in `report`.
///
/// Each distinct planned method runs once over the whole series, in
/// parallel; each gap then takes the values its own method produced on its
/// dates. Observed values pass through unchanged.
///
/// # Errors
///
/// Returns [`SelectError::Method`] if a planned method is not registered or
/// its kernel fails.
#[tracing::instrument(skip_all, fields(n_gaps = report.total_gaps()))]
pub fn adaptive_fill(
    series: &TimeSeries,
    registry: &MethodRegistry,
    report: &GapReport,
) -> Result<AdaptiveFill, SelectError> {
    let methods: Vec<Method> = report.methods_used().keys().copied().collect();
    let outputs: BTreeMap<Method, TimeSeries> = methods
        .into_par_iter()
        .map(|method| {
            registry
                .dispatch(method.as_str(), series)
                .map(|filled| (method, filled))
        })
        .collect::<Result<_, _>>()?;

    let daily = series.reindex_daily();
    let points = daily
        .observations()
        .iter()
        .map(|o| {
            let value = o.value().or_else(|| {
                let method = report.method_on(o.date())?;
                outputs.get(&method)?.value_at(o.date())
            });
            (o.date(), value)
        })
        .collect();
    let filled = TimeSeries::new(points)?;

    let applied: Vec<Method> = report
        .plans()
        .iter()
        .map(|p| p.selection.method)
        .collect();
    debug!(
        n_methods = outputs.len(),
        n_missing = filled.len() - filled.n_present(),
        "adaptive fill complete"
    );
    Ok(AdaptiveFill {
        series: filled,
        applied,
    })
}
