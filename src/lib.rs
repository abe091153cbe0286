//! # Librarian Reconcile
//!
//! This library reconciles freshly generated client-library code with a
//! checked-out repository. It is used by the `librarian-reconcile`
//! command-line tool but can be driven directly by any generation workflow
//! that hands it directory paths and pattern lists.
//!
//! ## Quick Example
//!
//! ```no_run
//! use librarian_reconcile::reconcile::{copy_generated_output, reconcile};
//! use std::path::Path;
//!
//! let repo = Path::new("/work/google-cloud-rust");
//! let output = Path::new("/work/output");
//! let roots = ["src/generated/secretmanager"];
//!
//! // Remove stale generated files, keeping the hand-written changelog.
//! reconcile(repo, &roots, &[".*"], &[r"CHANGELOG\.md$"]).unwrap();
//!
//! // Bring in the new output.
//! copy_generated_output(repo, output, &roots).unwrap();
//! ```
//!
//! ## Core Concepts
//!
//! - **Source roots**: directories declared as holding generated code. Cleanup
//!   never looks outside them.
//! - **Remove and preserve patterns (`patterns`)**: regex lists matched against
//!   `/`-separated paths relative to the repository root. An empty list matches
//!   nothing.
//! - **Generator-input directory (`defaults`)**: `.librarian/generator-input`,
//!   never deleted and never overwritten.
//! - **State file (`config`)**: `.librarian/state.yaml`, listing libraries with
//!   their source roots and patterns.
//!
//! ## Execution Flow
//!
//! 1.  **Resolve**: enumerate the source roots (`path`), select removals and
//!     subtract preserved paths (`reconcile`).
//! 2.  **Delete**: remove files, then emptied directories deepest first
//!     (`filesystem`).
//! 3.  **Copy**: copy the generated tree into the repository, recreating
//!     symlinks (`filesystem`).

pub mod config;
pub mod defaults;
pub mod error;
pub mod filesystem;
pub mod output;
pub mod path;
pub mod patterns;
pub mod reconcile;

#[cfg(test)]
mod path_proptest;
