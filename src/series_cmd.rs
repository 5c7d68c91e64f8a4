//! Series command: rank the series of an input file by coverage.

use anyhow::{Context, Result};
use tracing::{info, info_span};

use crate::cli::SeriesArgs;
use crate::input;
use crate::inventory::rank_series;

/// Writes the JSON coverage ranking of `args.input` to stdout.
pub fn run(args: SeriesArgs) -> Result<()> {
    let _cmd = info_span!("series").entered();
    let dataset = input::read_dataset(&args.input)?;

    let ranked = rank_series(&dataset, args.top);
    info!(
        n_series = dataset.ids().len(),
        n_reported = ranked.len(),
        "ranked series"
    );

    serde_json::to_writer_pretty(std::io::stdout().lock(), &ranked)
        .context("failed to write series ranking")?;
    println!();
    Ok(())
}
