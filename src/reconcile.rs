//! # Reconciliation
//!
//! Decides which paths of a library checkout are stale generated output and
//! removes them, then copies fresh output in.
//!
//! ## Resolving the deletion set
//!
//! 1.  Enumerate every path below each source root. No source roots means no
//!     candidates, so nothing can be removed.
//! 2.  Apply the remove patterns to the candidates.
//! 3.  Apply the preserve patterns to the *full* candidate set and subtract the
//!     matches from the removal candidates.
//! 4.  Drop anything at or under the generator-input directory.
//!
//! Patterns are compiled before the tree is touched, so a bad pattern fails the
//! call with the filesystem unchanged. A pattern that only matches paths
//! outside every source root is silently a no-op: those paths were never
//! candidates.

use std::collections::{BTreeSet, HashSet};
use std::fs;
use std::path::Path;

use log::{debug, info, warn};

use crate::config::{LibrarianState, LibraryState};
use crate::defaults::is_generator_input;
use crate::error::{Error, Result};
use crate::filesystem::{copy_tree, delete_paths, CopySummary, DeletionSummary};
use crate::path::{enumerate, relative_within, symlinked_prefix, to_slash};
use crate::patterns::PatternSet;

/// Collect every path below the given source roots, relative to `root_dir`.
///
/// Source roots that do not exist are skipped, and so are roots that are, or
/// sit below, a symlink.
pub fn collect_candidates<S: AsRef<str>>(root_dir: &Path, source_roots: &[S]) -> Result<BTreeSet<String>> {
    let mut candidates = BTreeSet::new();

    for source_root in source_roots {
        let source_root = source_root.as_ref();
        let relative = relative_within(root_dir, Path::new(source_root))?;
        if fs::symlink_metadata(root_dir.join(&relative)).is_err() {
            warn!("Source root '{}' does not exist, skipping", source_root);
            continue;
        }
        if let Some(link) = symlinked_prefix(root_dir, &relative)? {
            warn!(
                "Source root '{}' goes through symlink '{}', skipping",
                source_root,
                link.display()
            );
            continue;
        }
        candidates.extend(enumerate(root_dir, Path::new(source_root))?);
    }

    Ok(candidates)
}

/// Pure core of the resolver: removal matches minus preserve matches minus
/// the generator-input directory.
pub fn plan_removals(
    candidates: &BTreeSet<String>,
    remove: &PatternSet,
    preserve: &PatternSet,
) -> BTreeSet<String> {
    let to_remove = remove.filter(candidates.iter().map(String::as_str));
    let preserved: HashSet<&str> = preserve
        .filter(candidates.iter().map(String::as_str))
        .into_iter()
        .collect();

    to_remove
        .into_iter()
        .filter(|path| !preserved.contains(path))
        .filter(|path| !is_generator_input(path))
        .map(str::to_string)
        .collect()
}

/// Compute the set of paths under `root_dir` that reconciliation would delete.
pub fn resolve_removals<S: AsRef<str>>(
    root_dir: &Path,
    source_roots: &[S],
    remove_patterns: &[S],
    preserve_patterns: &[S],
) -> Result<BTreeSet<String>> {
    let remove = PatternSet::compile(remove_patterns)?;
    let preserve = PatternSet::compile(preserve_patterns)?;

    let candidates = collect_candidates(root_dir, source_roots)?;
    let removals = plan_removals(&candidates, &remove, &preserve);
    debug!(
        "{} candidates, {} scheduled for removal",
        candidates.len(),
        removals.len()
    );

    Ok(removals)
}

/// Resolve and delete stale generated paths under `root_dir`.
pub fn reconcile<S: AsRef<str>>(
    root_dir: &Path,
    source_roots: &[S],
    remove_patterns: &[S],
    preserve_patterns: &[S],
) -> Result<DeletionSummary> {
    let removals = resolve_removals(root_dir, source_roots, remove_patterns, preserve_patterns)?;
    let summary = delete_paths(root_dir, &removals)?;
    info!(
        "Removed {} files and {} directories under {}",
        summary.removed_files.len(),
        summary.removed_dirs.len(),
        root_dir.display()
    );
    Ok(summary)
}

/// Deletion set for a configured library, without touching the filesystem.
pub fn plan_library(repo_dir: &Path, library: &LibraryState) -> Result<BTreeSet<String>> {
    resolve_removals(
        repo_dir,
        &library.source_roots,
        &library.remove_regex,
        &library.preserve_regex,
    )
}

/// Reconcile a configured library.
pub fn reconcile_library(repo_dir: &Path, library: &LibraryState) -> Result<DeletionSummary> {
    debug!("Reconciling library '{}'", library.id);
    reconcile(
        repo_dir,
        &library.source_roots,
        &library.remove_regex,
        &library.preserve_regex,
    )
}

/// Copy generated output for each source root into the repository.
///
/// Roots missing from the output are skipped.
pub fn copy_generated_output<S: AsRef<str>>(
    repo_dir: &Path,
    output_dir: &Path,
    source_roots: &[S],
) -> Result<CopySummary> {
    let mut summary = CopySummary::default();

    for source_root in source_roots {
        let relative = relative_within(output_dir, Path::new(source_root.as_ref()))?;
        summary.merge(copy_tree(output_dir, repo_dir, &relative)?);
    }

    info!(
        "Copied {} files and {} symlinks into {}",
        summary.files.len(),
        summary.symlinks.len(),
        repo_dir.display()
    );
    Ok(summary)
}

/// Copy generated output for the library `library_id` listed in `state`.
pub fn copy_library(
    repo_dir: &Path,
    output_dir: &Path,
    state: &LibrarianState,
    library_id: &str,
) -> Result<CopySummary> {
    let library = state.library(library_id)?;
    copy_generated_output(repo_dir, output_dir, &library.source_roots)
}

/// Remove everything under `dir` except the entries in `keep`.
///
/// Keep entries are relative to `dir` or absolute paths inside it; a directory
/// entry keeps its whole subtree, and an entry naming `dir` itself keeps
/// everything. Every entry is checked before anything is deleted.
///
/// # Errors
///
/// - [`Error::PathRelation`] if an entry lies outside `dir`.
/// - [`Error::KeepList`] if an entry does not exist.
pub fn clean_with_keep_list<S: AsRef<str>>(dir: &Path, keep: &[S]) -> Result<DeletionSummary> {
    let mut kept = Vec::with_capacity(keep.len());
    let mut keep_all = false;
    for entry in keep {
        let relative = relative_within(dir, Path::new(entry.as_ref()))?;
        let full = dir.join(&relative);
        if fs::symlink_metadata(&full).is_err() {
            return Err(Error::KeepList { path: full });
        }
        if relative.as_os_str().is_empty() {
            keep_all = true;
        } else {
            kept.push(to_slash(&relative)?);
        }
    }

    if keep_all {
        debug!("Keep list covers '{}', nothing to remove", dir.display());
        return Ok(DeletionSummary::default());
    }

    let is_kept = |path: &str| {
        kept.iter().any(|k| {
            path == k.as_str()
                || path.strip_prefix(k.as_str()).is_some_and(|rest| rest.starts_with('/'))
                || k.strip_prefix(path).is_some_and(|rest| rest.starts_with('/'))
        })
    };

    let doomed: Vec<String> = enumerate(dir, dir)?
        .into_iter()
        .filter(|path| !is_kept(path))
        .collect();

    delete_paths(dir, &doomed)
}
