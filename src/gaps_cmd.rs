//! Gaps command: detect gaps and plan a method for each.

use anyhow::{Context, Result};
use tracing::{info, info_span};

use gapfill_gaps::{RuleThresholds, plan_gaps};

use crate::cli::GapsArgs;
use crate::config::GapfillConfig;
use crate::input;

/// Writes the JSON gap report for `args.input` to stdout.
pub fn run(args: GapsArgs, config: &GapfillConfig) -> Result<()> {
    let _cmd = info_span!("gaps").entered();
    let series = input::read_series(&args.input, args.id.as_deref())?;

    let context = config.gaps.context_config(args.window);
    let report = plan_gaps(&series, &context, &RuleThresholds::default())
        .context("gap analysis failed")?;
    info!(
        n_gaps = report.total_gaps(),
        primary = ?report.primary_method(),
        "planned gaps"
    );

    serde_json::to_writer_pretty(std::io::stdout().lock(), &report)
        .context("failed to write gap report")?;
    println!();
    Ok(())
}
