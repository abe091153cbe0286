//! # Plan Command Implementation
//!
//! Prints the deletion set a `clean` would apply, in text or JSON. This is a
//! read-only command; it is the way to check new remove/preserve patterns
//! against a real checkout before trusting them.

use anyhow::Result;
use clap::{Args, ValueEnum};
use serde::Serialize;

use librarian_reconcile::output::{OutputConfig, Status};
use librarian_reconcile::reconcile::plan_library;

use super::LibraryArgs;

/// Output format for the plan
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum PlanFormat {
    /// One path per line
    #[default]
    Text,
    /// A JSON object with the library id and its removals
    Json,
}

/// Show which paths a clean would remove, without removing them
#[derive(Args, Debug)]
pub struct PlanArgs {
    #[command(flatten)]
    pub target: LibraryArgs,

    /// Output format
    #[arg(long, value_enum, default_value_t = PlanFormat::Text)]
    pub format: PlanFormat,
}

#[derive(Serialize)]
struct PlanReport<'a> {
    library: &'a str,
    source_roots: &'a [String],
    removals: Vec<&'a str>,
}

/// Execute the `plan` command.
pub fn execute(args: PlanArgs, color_flag: &str) -> Result<()> {
    let out = OutputConfig::from_env_and_flag(color_flag);
    let repo_dir = args.target.repo_dir()?;
    let state = args.target.load_state(&repo_dir)?;
    let library = state.library(&args.target.library)?;

    let removals = plan_library(&repo_dir, library)?;

    match args.format {
        PlanFormat::Json => {
            let report = PlanReport {
                library: &library.id,
                source_roots: &library.source_roots,
                removals: removals.iter().map(String::as_str).collect(),
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        PlanFormat::Text => {
            if removals.is_empty() {
                println!("{} Nothing to remove for {}", out.marker(Status::Ok), library.id);
            } else {
                println!(
                    "{} {} paths would be removed for {}:",
                    out.marker(Status::Scan),
                    removals.len(),
                    library.id
                );
                for path in &removals {
                    println!("   {}", out.path(path));
                }
            }
        }
    }

    Ok(())
}
