//! # Error Handling
//!
//! This module defines the centralized error type for the reconciliation
//! engine. It uses the `thiserror` library to create an `Error` enum covering
//! every failure mode of enumeration, pattern compilation, deletion, copying
//! and state loading.
//!
//! ## Key Components
//!
//! - **`Error`**: The main enum. Every variant carries the offending path,
//!   pattern or library id so a failure can be diagnosed without re-running.
//!
//! - **`Result<T>`**: A type alias for `std::result::Result<T, Error>`.
//!
//! Nothing in this crate retries or recovers. Errors are surfaced to the caller
//! verbatim and the caller decides whether a failing library aborts a
//! multi-library run.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for reconciliation operations
#[derive(Error, Debug)]
pub enum Error {
    /// A remove or preserve regex failed to compile.
    ///
    /// Compilation is all-or-nothing, so this is reported before any
    /// filesystem access.
    #[error("Invalid pattern '{pattern}': {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// A subdirectory is not the root itself or nested under it.
    #[error("Path relation error: '{}' is not within '{}'", path.display(), root.display())]
    PathRelation { root: PathBuf, path: PathBuf },

    /// The directory walk hit a directory it is not allowed to read.
    #[error("Unreadable directory '{}': {source}", path.display())]
    UnreadableDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A filesystem operation failed on a specific path.
    #[error("I/O error at '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A path on disk has a name that is not valid UTF-8 and so cannot be
    /// matched against patterns.
    #[error("Path is not valid UTF-8: '{}'", path.display())]
    NonUtf8Path { path: PathBuf },

    /// The requested library id is not present in the state file.
    #[error("Library not found: {id}")]
    LibraryNotFound { id: String },

    /// A keep-list entry does not exist on disk.
    #[error("Keep list entry does not exist: {}", path.display())]
    KeepList { path: PathBuf },

    /// An error occurred while interpreting the state file.
    #[error("State file error: {message}{}", hint.as_ref().map(|h| format!("\n  hint: {}", h)).unwrap_or_default())]
    ConfigParse {
        message: String,
        /// Optional hint for how to fix the state file
        hint: Option<String>,
    },

    /// A YAML parsing error, wrapped from `serde_yaml::Error`.
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl Error {
    /// Wrap an I/O error together with the path it happened on.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
