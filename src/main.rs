//! # Librarian Reconcile CLI
//!
//! This is the binary entry point for the `librarian-reconcile` tool.
//!
//! Its primary responsibilities are:
//! - Parsing command-line arguments using `clap`.
//! - Setting up logging for the library.
//! - Dispatching to the requested command and turning library errors into a
//!   non-zero exit.
//!
//! All reconciliation logic lives in the library crate; the binary only wires
//! it to the command line.

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli.execute()
}
