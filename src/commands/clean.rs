//! # Clean Command Implementation
//!
//! Removes stale generated files for one library. The library's source roots,
//! remove patterns and preserve patterns come from the state file. With
//! `--dry-run` the deletion set is printed and nothing is touched.

use anyhow::Result;
use clap::Args;

use librarian_reconcile::output::{OutputConfig, Status};
use librarian_reconcile::reconcile::{plan_library, reconcile_library};

use super::LibraryArgs;

/// Remove stale generated files for a library
#[derive(Args, Debug)]
pub struct CleanArgs {
    #[command(flatten)]
    pub target: LibraryArgs,

    /// Show what would be removed without removing anything
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Suppress all output except errors
    #[arg(short, long)]
    pub quiet: bool,
}

/// Execute the `clean` command.
pub fn execute(args: CleanArgs, color_flag: &str) -> Result<()> {
    let out = OutputConfig::from_env_and_flag(color_flag);
    let repo_dir = args.target.repo_dir()?;
    let state = args.target.load_state(&repo_dir)?;
    let library = state.library(&args.target.library)?;

    if args.dry_run {
        let removals = plan_library(&repo_dir, library)?;
        if !args.quiet {
            println!(
                "{} DRY RUN: {} paths would be removed for {}",
                out.marker(Status::DryRun),
                removals.len(),
                library.id
            );
            for path in &removals {
                println!("   {}", out.path(path));
            }
        }
        return Ok(());
    }

    let summary = reconcile_library(&repo_dir, library)?;

    if !args.quiet {
        println!(
            "{} Cleaned {}: {} files, {} directories removed",
            out.marker(Status::Remove),
            library.id,
            summary.removed_files.len(),
            summary.removed_dirs.len()
        );
        if !summary.kept_dirs.is_empty() {
            println!(
                "{} {} directories kept because they still hold files",
                out.marker(Status::Warn),
                summary.kept_dirs.len()
            );
        }
    }

    Ok(())
}
