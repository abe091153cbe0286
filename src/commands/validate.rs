//! # Validate Command Implementation
//!
//! Checks the state file without touching the repository: it must parse, ids
//! must be unique and non-empty, versions must be semver, source roots must
//! stay inside the repository and every regex must compile. Source roots that
//! do not exist in the checkout are reported as warnings.

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use librarian_reconcile::output::{OutputConfig, Status};

use super::{load_state, resolve_repo_dir};

/// Validate the library state file
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Repository root (defaults to the current directory)
    #[arg(short, long, value_name = "DIR")]
    pub repo: Option<PathBuf>,

    /// State file (defaults to <repo>/.librarian/state.yaml)
    #[arg(long, value_name = "FILE", env = "LIBRARIAN_STATE")]
    pub state: Option<PathBuf>,

    /// Treat warnings as errors
    #[arg(long)]
    pub strict: bool,
}

/// Execute the `validate` command.
pub fn execute(args: ValidateArgs, color_flag: &str) -> Result<()> {
    let out = OutputConfig::from_env_and_flag(color_flag);
    let repo_dir = resolve_repo_dir(args.repo.as_deref())?;
    let state = load_state(args.state.as_deref(), &repo_dir)?;

    println!(
        "{} State file parsed: {} libraries",
        out.marker(Status::Scan),
        state.libraries.len()
    );

    let issues = state.validate();
    for issue in &issues {
        println!("{} {}", out.marker(Status::Error), issue);
    }

    let mut warnings = 0;
    for library in &state.libraries {
        for root in &library.source_roots {
            if !repo_dir.join(root).exists() {
                println!(
                    "{} {}: source root '{}' does not exist",
                    out.marker(Status::Warn),
                    library.id,
                    root
                );
                warnings += 1;
            }
        }
    }

    if !issues.is_empty() {
        anyhow::bail!("Validation failed with {} errors", issues.len());
    }
    if args.strict && warnings > 0 {
        anyhow::bail!("Validation failed with {} warnings (strict mode)", warnings);
    }

    println!("{} State file is valid", out.marker(Status::Ok));
    Ok(())
}
