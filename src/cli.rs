//! CLI argument parsing and command dispatch

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::commands;

/// Librarian Reconcile - clean and refresh generated client-library code
#[derive(Parser, Debug)]
#[command(name = "librarian-reconcile")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Colorize output (always, never, auto)
    #[arg(
        long,
        global = true,
        value_name = "WHEN",
        default_value = "auto",
        value_parser = ["always", "never", "auto"],
        ignore_case = true
    )]
    color: String,

    /// Set log level (error, warn, info, debug, trace)
    #[arg(long, global = true, value_name = "LEVEL", default_value = "warn")]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Remove stale generated files for a library
    Clean(commands::clean::CleanArgs),

    /// Copy generated output for a library into the repository
    Copy(commands::copy::CopyArgs),

    /// Clean a library, then copy fresh generated output into it
    Sync(commands::sync::SyncArgs),

    /// Show which paths a clean would remove, without removing them
    Plan(commands::plan::PlanArgs),

    /// Remove everything in a directory except a list of kept paths
    Prune(commands::prune::PruneArgs),

    /// Validate the library state file
    Validate(commands::validate::ValidateArgs),

    /// Generate shell completion scripts
    Completions(commands::completions::CompletionsArgs),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        init_logging(&self.log_level);

        match self.command {
            Commands::Clean(args) => commands::clean::execute(args, &self.color),
            Commands::Copy(args) => commands::copy::execute(args, &self.color),
            Commands::Sync(args) => commands::sync::execute(args, &self.color),
            Commands::Plan(args) => commands::plan::execute(args, &self.color),
            Commands::Prune(args) => commands::prune::execute(args, &self.color),
            Commands::Validate(args) => commands::validate::execute(args, &self.color),
            Commands::Completions(args) => commands::completions::execute(args),
        }
    }
}

/// Route `log` output to stderr. `RUST_LOG` takes precedence over `--log-level`.
fn init_logging(level: &str) {
    let env = env_logger::Env::default().default_filter_or(level);
    // A logger may already be installed when commands run inside tests.
    let _ = env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .try_init();
}
