//! Fill command: interpolate the series and write it as CSV.

use std::io::Write;

use anyhow::{Context, Result, bail};
use tracing::{info, info_span};

use gapfill_gaps::{RuleThresholds, plan_gaps};
use gapfill_methods::MethodRegistry;
use gapfill_select::{adaptive_fill, auto_select_method};
use gapfill_series::TimeSeries;

use crate::cli::FillArgs;
use crate::config::GapfillConfig;
use crate::input;

/// Fills `args.input` and writes `date,value` CSV to stdout.
///
/// `auto` fills with the whole-series recommendation, `adaptive` fills each
/// gap with its own planned method, `all` writes one column per registered
/// method, and any other value names a registered method.
pub fn run(args: FillArgs, config: &GapfillConfig) -> Result<()> {
    let _cmd = info_span!("fill").entered();
    let series = input::read_series(&args.input, args.id.as_deref())?;
    let registry = MethodRegistry::with_defaults();

    if args.method == "all" {
        return compare_all(&series, &registry, std::io::stdout().lock());
    }

    let filled: TimeSeries = match args.method.as_str() {
        "auto" => {
            let auto = config.select.auto_select_config(false, None, None, None);
            let selection = auto_select_method(&series, &registry, &auto)
                .context("method selection failed")?;
            info!(
                method = %selection.method,
                confidence = ?selection.confidence,
                "auto-selected method"
            );
            registry
                .dispatch(&selection.method, &series)
                .with_context(|| format!("{} interpolation failed", selection.method))?
        }
        "adaptive" => {
            let context = config.gaps.context_config(None);
            let report = plan_gaps(&series, &context, &RuleThresholds::default())
                .context("gap analysis failed")?;
            adaptive_fill(&series, &registry, &report)
                .context("adaptive fill failed")?
                .series
        }
        name => registry
            .dispatch(name, &series)
            .with_context(|| format!("{name} interpolation failed"))?,
    };
    info!(
        n_days = filled.len(),
        n_present = filled.n_present(),
        "filled series"
    );

    input::write_series(&filled, std::io::stdout().lock())
}

/// Runs every registered method and writes one column per method that
/// succeeded; failed methods are logged and left out.
fn compare_all<W: Write>(series: &TimeSeries, registry: &MethodRegistry, out: W) -> Result<()> {
    let filled: Vec<(String, TimeSeries)> = registry
        .dispatch_all(series)
        .into_iter()
        .filter_map(|(name, result)| result.ok().map(|s| (name, s)))
        .collect();
    if filled.is_empty() {
        bail!("every interpolation method failed");
    }
    info!(
        n_methods = filled.len(),
        n_failed = registry.len() - filled.len(),
        "compared methods"
    );
    input::write_comparison(&series.daily_axis(), &filled, out)
}
