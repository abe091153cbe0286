//! Reserved paths and default locations.
//!
//! These values are shared across the library and the CLI so that every
//! component agrees on where the state file lives and which directory is
//! off-limits to cleanup and copy.

use std::path::{Path, PathBuf};

/// Directory holding librarian configuration inside a repository.
pub const LIBRARIAN_DIR: &str = ".librarian";

/// Directory holding generator configuration and inputs.
///
/// Nothing at or below this path is ever deleted or overwritten.
pub const GENERATOR_INPUT_DIR: &str = ".librarian/generator-input";

/// File name of the library state file inside [`LIBRARIAN_DIR`].
pub const STATE_FILE_NAME: &str = "state.yaml";

/// Returns the default state file location for a repository checkout.
pub fn default_state_path(repo_dir: &Path) -> PathBuf {
    repo_dir.join(LIBRARIAN_DIR).join(STATE_FILE_NAME)
}

/// Returns true if a `/`-separated relative path is the generator-input
/// directory or lies below it.
pub fn is_generator_input(relative: &str) -> bool {
    let relative = relative.trim_start_matches("./");
    relative == GENERATOR_INPUT_DIR
        || relative
            .strip_prefix(GENERATOR_INPUT_DIR)
            .is_some_and(|rest| rest.starts_with('/'))
}
