//! # CLI Command Implementations
//!
//! Each subcommand of `librarian-reconcile` lives in its own file with an
//! `Args` struct derived with `clap` and an `execute` function that calls into
//! the `librarian_reconcile` library.
//!
//! Commands that act on one configured library share [`LibraryArgs`], which
//! locates the repository and its state file.

pub mod clean;
pub mod completions;
pub mod copy;
pub mod plan;
pub mod prune;
pub mod sync;
pub mod validate;

use anyhow::{bail, Context, Result};
use clap::Args;
use std::path::{Path, PathBuf};

use librarian_reconcile::config::{self, LibrarianState};
use librarian_reconcile::defaults::default_state_path;

/// Arguments selecting a library from a repository's state file.
#[derive(Args, Debug, Clone)]
pub struct LibraryArgs {
    /// ID of the library in the state file
    #[arg(short, long, value_name = "ID")]
    pub library: String,

    /// Repository root (defaults to the current directory)
    #[arg(short, long, value_name = "DIR")]
    pub repo: Option<PathBuf>,

    /// State file (defaults to <repo>/.librarian/state.yaml)
    #[arg(long, value_name = "FILE", env = "LIBRARIAN_STATE")]
    pub state: Option<PathBuf>,
}

impl LibraryArgs {
    /// The repository root to operate on.
    pub fn repo_dir(&self) -> Result<PathBuf> {
        resolve_repo_dir(self.repo.as_deref())
    }

    /// Load the state file for `repo_dir`.
    pub fn load_state(&self, repo_dir: &Path) -> Result<LibrarianState> {
        load_state(self.state.as_deref(), repo_dir)
    }
}

pub(crate) fn resolve_repo_dir(repo: Option<&Path>) -> Result<PathBuf> {
    match repo {
        Some(dir) => Ok(dir.to_path_buf()),
        None => std::env::current_dir().context("Failed to determine current directory"),
    }
}

pub(crate) fn load_state(state: Option<&Path>, repo_dir: &Path) -> Result<LibrarianState> {
    let path = state
        .map(Path::to_path_buf)
        .unwrap_or_else(|| default_state_path(repo_dir));

    if !path.exists() {
        bail!("State file not found: {}", path.display());
    }

    config::from_file(&path)
        .with_context(|| format!("Failed to load state file {}", path.display()))
}
