//! # Sync Command Implementation
//!
//! Runs the two reconciliation steps back to back for one library: remove
//! stale generated files, then copy the new output in. If the clean fails the
//! copy is not attempted.

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

use librarian_reconcile::output::{OutputConfig, Status};
use librarian_reconcile::reconcile::{copy_generated_output, reconcile_library};

use super::LibraryArgs;

/// Clean a library, then copy fresh generated output into it
#[derive(Args, Debug)]
pub struct SyncArgs {
    #[command(flatten)]
    pub target: LibraryArgs,

    /// Directory holding the generator's output
    #[arg(short, long, value_name = "DIR")]
    pub output: PathBuf,

    /// Suppress all output except errors
    #[arg(short, long)]
    pub quiet: bool,
}

/// Execute the `sync` command.
pub fn execute(args: SyncArgs, color_flag: &str) -> Result<()> {
    let out = OutputConfig::from_env_and_flag(color_flag);
    let repo_dir = args.target.repo_dir()?;
    let state = args.target.load_state(&repo_dir)?;
    let library = state.library(&args.target.library)?;

    if !args.output.is_dir() {
        anyhow::bail!("Output directory not found: {}", args.output.display());
    }

    let removed = reconcile_library(&repo_dir, library)
        .with_context(|| format!("Failed to clean library {}", library.id))?;
    let copied = copy_generated_output(&repo_dir, &args.output, &library.source_roots)
        .with_context(|| format!("Failed to copy output for library {}", library.id))?;

    if !args.quiet {
        println!(
            "{} Synced {}: {} removed, {} copied, {} symlinks",
            out.marker(Status::Ok),
            library.id,
            removed.removed_files.len(),
            copied.files.len(),
            copied.symlinks.len()
        );
    }

    Ok(())
}
