mod cli;
mod config;
mod fill_cmd;
mod gaps_cmd;
mod input;
mod inventory;
mod logging;
mod select_cmd;
mod series_cmd;

use std::process;

use anyhow::Result;
use clap::Parser;

use crate::cli::{Cli, Command};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = config::load(cli.config.as_deref())?;
    match cli.command {
        Command::Series(args) => series_cmd::run(args),
        Command::Gaps(args) => gaps_cmd::run(args, &config),
        Command::Select(args) => select_cmd::run(args, &config),
        Command::Fill(args) => fill_cmd::run(args, &config),
    }
}
