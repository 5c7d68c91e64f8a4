//! Per-gap method plans for a whole series.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use gapfill_methods::Method;
use gapfill_series::TimeSeries;
use rayon::prelude::*;
use serde::Serialize;
use tracing::debug;

use crate::config::{ContextConfig, RuleThresholds};
use crate::context::{LocalContext, context_of};
use crate::error::GapError;
use crate::gap::{Gap, detect_gaps};
use crate::rules::{MethodSelection, select_method_with};

/// One gap with its context and the method selected for it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GapPlan {
    /// Position of the gap in date order.
    pub index: usize,
    pub gap: Gap,
    pub context: LocalContext,
    pub selection: MethodSelection,
}

/// Plans for every gap of a series.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct GapReport {
    plans: Vec<GapPlan>,
    methods_used: BTreeMap<Method, usize>,
    primary_method: Option<Method>,
}

impl GapReport {
    fn new(plans: Vec<GapPlan>) -> Self {
        let mut methods_used = BTreeMap::new();
        let mut first_seen = Vec::new();
        for plan in &plans {
            let count = methods_used.entry(plan.selection.method).or_insert(0);
            if *count == 0 {
                first_seen.push(plan.selection.method);
            }
            *count += 1;
        }

        // Most frequent method; on a tie the one planned first wins.
        let mut primary_method: Option<(Method, usize)> = None;
        for method in first_seen {
            let count = methods_used.get(&method).copied().unwrap_or_default();
            if primary_method.is_none_or(|(_, best)| count > best) {
                primary_method = Some((method, count));
            }
        }

        Self {
            plans,
            methods_used,
            primary_method: primary_method.map(|(m, _)| m),
        }
    }

    /// Plans in gap order.
    pub fn plans(&self) -> &[GapPlan] {
        &self.plans
    }

    pub fn total_gaps(&self) -> usize {
        self.plans.len()
    }

    /// Number of gaps planned with each method.
    pub fn methods_used(&self) -> &BTreeMap<Method, usize> {
        &self.methods_used
    }

    /// Most frequently planned method, `None` if there are no gaps.
    pub fn primary_method(&self) -> Option<Method> {
        self.primary_method
    }

    /// Method planned for the gap covering `date`, if any.
    pub fn method_on(&self, date: NaiveDate) -> Option<Method> {
        let i = self.plans.partition_point(|p| p.gap.end_date() < date);
        self.plans
            .get(i)
            .filter(|p| p.gap.contains(date))
            .map(|p| p.selection.method)
    }
}

/// Detects every gap, analyses its context and selects a method for it.
///
/// Gaps are analysed in parallel; plans come back in gap order.
///
/// # Errors
///
/// Returns [`GapError`] for an invalid config or a series with no observed
/// value.
#[tracing::instrument(skip_all, fields(n_present = series.n_present()))]
pub fn plan_gaps(
    series: &TimeSeries,
    config: &ContextConfig,
    thresholds: &RuleThresholds,
) -> Result<GapReport, GapError> {
    config.validate()?;
    thresholds.validate()?;

    let gaps = detect_gaps(series)?;
    let points: Vec<(NaiveDate, f64)> = series.present().collect();

    let plans = gaps
        .into_par_iter()
        .enumerate()
        .map(|(index, gap)| {
            let context = context_of(&points, &gap, config)?;
            let selection = select_method_with(&context, thresholds);
            debug!(
                index,
                start = %gap.start_date(),
                size = gap.size(),
                method = %selection.method,
                "planned gap"
            );
            Ok(GapPlan {
                index,
                gap,
                context,
                selection,
            })
        })
        .collect::<Result<Vec<_>, GapError>>()?;

    let report = GapReport::new(plans);
    debug!(
        n_gaps = report.total_gaps(),
        primary = ?report.primary_method(),
        "gap plan complete"
    );
    Ok(report)
}
