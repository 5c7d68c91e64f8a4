use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Adaptive gap filling for daily time series.
#[derive(Parser)]
#[command(
    name = "gapfill",
    version,
    about = "Adaptive interpolation method selection for gappy daily time series"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Path to an optional TOML configuration file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Rank the series of a multi-series file by coverage.
    Series(SeriesArgs),
    /// Detect gaps and plan a method for each one.
    Gaps(GapsArgs),
    /// Recommend one method for the whole series.
    Select(SelectArgs),
    /// Fill the series and write it as CSV.
    Fill(FillArgs),
}

/// Arguments for the `series` subcommand.
#[derive(clap::Args)]
pub struct SeriesArgs {
    /// Path to a CSV file.
    #[arg(short, long)]
    pub input: PathBuf,

    /// Keep only the best covered N series.
    #[arg(short, long)]
    pub top: Option<usize>,
}

/// Arguments for the `gaps` subcommand.
#[derive(clap::Args)]
pub struct GapsArgs {
    /// Path to a CSV file.
    #[arg(short, long)]
    pub input: PathBuf,

    /// Series to read when the file holds several.
    #[arg(long)]
    pub id: Option<String>,

    /// Override the context window size (observed points per side).
    #[arg(short, long)]
    pub window: Option<usize>,
}

/// Arguments for the `select` subcommand.
#[derive(clap::Args)]
pub struct SelectArgs {
    /// Path to a CSV file.
    #[arg(short, long)]
    pub input: PathBuf,

    /// Series to read when the file holds several.
    #[arg(long)]
    pub id: Option<String>,

    /// Override the cross-validation seed.
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Skip cross-validation and use series characteristics only.
    #[arg(long = "no-cv")]
    pub no_cv: bool,

    /// Override the weight given to cross-validation (0 to 1).
    #[arg(long = "cv-weight")]
    pub cv_weight: Option<f64>,

    /// Override the fraction of interior points held out.
    #[arg(long = "test-ratio")]
    pub test_ratio: Option<f64>,
}

/// Arguments for the `fill` subcommand.
#[derive(clap::Args)]
pub struct FillArgs {
    /// Path to a CSV file.
    #[arg(short, long)]
    pub input: PathBuf,

    /// Series to read when the file holds several.
    #[arg(long)]
    pub id: Option<String>,

    /// `auto`, `adaptive`, `all`, or a registered method name.
    #[arg(short, long, default_value = "auto")]
    pub method: String,
}
