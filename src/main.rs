//! # Credits CLI
//!
//! Binary entry point for the `credits` command-line tool.
//!
//! Responsibilities:
//! - Parsing command-line arguments using `clap`.
//! - Initializing logging.
//! - Executing the selected command and reporting its failure as the
//!   process exit status.
//!
//! The credit database logic lives in the library crate; the binary is a
//! thin wrapper around it.

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli.execute()
}
