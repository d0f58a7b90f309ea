//! textlens - descriptive statistics for a single text file
//!
//! textlens provides:
//! - Line, word, character and unique-word counts
//! - Average word length and per-line ratios
//! - A ranked word frequency table with top-N and predicate filtering
//! - A text report, a CSV export and a PNG bar chart

use anyhow::Result;
use clap::Parser;

mod cli;
mod core;
mod report;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli::run(cli)
}
