//! Select command: recommend one method for the whole series.

use anyhow::{Context, Result};
use tracing::info_span;

use gapfill_methods::MethodRegistry;
use gapfill_select::auto_select_method;

use crate::cli::SelectArgs;
use crate::config::GapfillConfig;
use crate::input;

/// Writes the JSON auto-selection for `args.input` to stdout.
pub fn run(args: SelectArgs, config: &GapfillConfig) -> Result<()> {
    let _cmd = info_span!("select").entered();
    let series = input::read_series(&args.input, args.id.as_deref())?;

    let auto = config
        .select
        .auto_select_config(args.no_cv, args.cv_weight, args.test_ratio, args.seed);
    let selection = auto_select_method(&series, &MethodRegistry::with_defaults(), &auto)
        .context("method selection failed")?;

    serde_json::to_writer_pretty(std::io::stdout().lock(), &selection)
        .context("failed to write selection")?;
    println!();
    Ok(())
}
