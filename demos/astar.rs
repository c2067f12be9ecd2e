//! Animated A* search in the terminal.
//!
//! Run: cargo run --bin astar -- --rows 20 --cols 40 --max-fps 60

use anyhow::Result;
use clap::Parser;
use gridstar_demos::{Cli, DemoConfig, logpane, run_batch, run_interactive};
use log::LevelFilter;

fn main() -> Result<()> {
    let config = DemoConfig::try_from(Cli::parse())?;

    if config.batch {
        print!("{}", run_batch(&config)?);
        return Ok(());
    }

    let level = if config.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    logpane::init(level)?;
    run_interactive(&config)
}
