//! # Prune Command Implementation
//!
//! Empties a directory except for an explicit keep list. Used on generator
//! output directories where only a few files must survive between runs. Every
//! keep entry must exist; a missing one fails the command before anything is
//! deleted.

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use librarian_reconcile::output::{OutputConfig, Status};
use librarian_reconcile::reconcile::clean_with_keep_list;

/// Remove everything in a directory except a list of kept paths
#[derive(Args, Debug)]
pub struct PruneArgs {
    /// Directory to prune
    #[arg(short, long, value_name = "DIR")]
    pub dir: PathBuf,

    /// Path to keep, relative to the directory (repeatable)
    #[arg(short, long, value_name = "PATH", required = true)]
    pub keep: Vec<String>,

    /// Suppress all output except errors
    #[arg(short, long)]
    pub quiet: bool,
}

/// Execute the `prune` command.
pub fn execute(args: PruneArgs, color_flag: &str) -> Result<()> {
    let out = OutputConfig::from_env_and_flag(color_flag);

    if !args.dir.is_dir() {
        anyhow::bail!("Directory not found: {}", args.dir.display());
    }

    let summary = clean_with_keep_list(&args.dir, &args.keep)?;

    if !args.quiet {
        println!(
            "{} Pruned {}: {} files, {} directories removed",
            out.marker(Status::Remove),
            args.dir.display(),
            summary.removed_files.len(),
            summary.removed_dirs.len()
        );
    }

    Ok(())
}
