//! patternbook - A runnable catalogue of design pattern exercises
//!
//! patternbook provides:
//! - Eighteen small exercises, one per classic design pattern
//! - A C/C++ comment-stripping state machine usable on real files
//! - Unified report output (text/jsonl/json/md)

use anyhow::Result;
use clap::Parser;

mod cli;
mod core;
mod patterns;
mod runner;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli::run(cli)
}
