//! # Copy Command Implementation
//!
//! Copies a library's generated output into the repository. Only the
//! library's source roots are copied, symlinks are recreated as symlinks, and
//! the generator-input directory is never written.

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use librarian_reconcile::output::{OutputConfig, Status};
use librarian_reconcile::reconcile::copy_library;

use super::LibraryArgs;

/// Copy generated output for a library into the repository
#[derive(Args, Debug)]
pub struct CopyArgs {
    #[command(flatten)]
    pub target: LibraryArgs,

    /// Directory holding the generator's output
    #[arg(short, long, value_name = "DIR")]
    pub output: PathBuf,

    /// Suppress all output except errors
    #[arg(short, long)]
    pub quiet: bool,
}

/// Execute the `copy` command.
pub fn execute(args: CopyArgs, color_flag: &str) -> Result<()> {
    let out = OutputConfig::from_env_and_flag(color_flag);
    let repo_dir = args.target.repo_dir()?;
    let state = args.target.load_state(&repo_dir)?;

    if !args.output.is_dir() {
        anyhow::bail!("Output directory not found: {}", args.output.display());
    }

    let summary = copy_library(&repo_dir, &args.output, &state, &args.target.library)?;

    if !args.quiet {
        println!(
            "{} Copied {}: {} files, {} symlinks",
            out.marker(Status::Copy),
            args.target.library,
            summary.files.len(),
            summary.symlinks.len()
        );
    }

    Ok(())
}
