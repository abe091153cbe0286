//! Path utilities for reconciliation
//!
//! Everything the reconciler compares is a `/`-separated path relative to the
//! reconciliation root. This module converts between that form and host paths,
//! checks that a subdirectory really lives under the root, and walks a tree
//! without following symlinks.

use crate::error::{Error, Result};
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

/// Lexical path normalization without filesystem access.
///
/// Removes `.` components and resolves `..` against the preceding component.
/// Leading `..` components that cannot be resolved are kept.
pub fn lexical_normalize(path: &Path) -> PathBuf {
    let mut components: Vec<Component> = Vec::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match components.last() {
                Some(Component::Normal(_)) => {
                    components.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => components.push(component),
            },
            _ => components.push(component),
        }
    }

    components.iter().collect()
}

/// Resolve `sub_dir` against `root_dir` and return it relative to the root.
///
/// `sub_dir` may be absolute or relative to `root_dir`. The result is empty
/// when both refer to the same directory.
///
/// # Errors
///
/// Returns [`Error::PathRelation`] if `sub_dir` is neither `root_dir` nor
/// nested under it.
pub fn relative_within(root_dir: &Path, sub_dir: &Path) -> Result<PathBuf> {
    let root = lexical_normalize(root_dir);
    let sub = if sub_dir.is_absolute() {
        lexical_normalize(sub_dir)
    } else {
        lexical_normalize(&root_dir.join(sub_dir))
    };

    match sub.strip_prefix(&root) {
        Ok(relative) => Ok(relative.to_path_buf()),
        Err(_) => Err(Error::PathRelation {
            root: root_dir.to_path_buf(),
            path: sub_dir.to_path_buf(),
        }),
    }
}

/// Render a relative path with `/` separators. The empty path renders as `.`.
///
/// # Errors
///
/// Returns [`Error::NonUtf8Path`] if any component is not valid UTF-8.
pub fn to_slash(relative: &Path) -> Result<String> {
    let mut parts = Vec::new();
    for component in relative.components() {
        match component {
            Component::Normal(part) => match part.to_str() {
                Some(part) => parts.push(part),
                None => {
                    return Err(Error::NonUtf8Path {
                        path: relative.to_path_buf(),
                    })
                }
            },
            Component::ParentDir => parts.push(".."),
            _ => {}
        }
    }

    if parts.is_empty() {
        Ok(".".to_string())
    } else {
        Ok(parts.join("/"))
    }
}

/// Number of components in a `/`-separated relative path.
pub fn depth(relative: &str) -> usize {
    relative.split('/').filter(|s| !s.is_empty() && *s != ".").count()
}

/// List every file and directory below `sub_dir`, relative to `root_dir`.
///
/// The starting directory itself is not included. Entries are yielded in
/// depth-first order with siblings sorted by name, so two walks over an
/// unchanged tree return identical lists. Symlinks are listed but never
/// followed, including when `sub_dir` itself is a symlink.
///
/// # Errors
///
/// - [`Error::PathRelation`] if `sub_dir` is outside `root_dir`.
/// - [`Error::UnreadableDirectory`] if any directory cannot be read due to
///   permissions. Partial results are discarded.
/// - [`Error::NonUtf8Path`] if an entry's name is not valid UTF-8.
/// - [`Error::Io`] for any other walk failure, including a missing `sub_dir`.
pub fn enumerate(root_dir: &Path, sub_dir: &Path) -> Result<Vec<String>> {
    let relative = relative_within(root_dir, sub_dir)?;
    let start = root_dir.join(&relative);

    let mut paths = Vec::new();
    let walker = WalkDir::new(&start)
        .min_depth(1)
        .follow_links(false)
        .follow_root_links(false)
        .sort_by_file_name();

    for entry in walker {
        let entry = entry.map_err(|e| walk_error(&start, e))?;
        let below = entry
            .path()
            .strip_prefix(&start)
            .map_err(|_| Error::PathRelation {
                root: start.clone(),
                path: entry.path().to_path_buf(),
            })?;
        let rel = to_slash(&relative.join(below)).map_err(|_| Error::NonUtf8Path {
            path: entry.path().to_path_buf(),
        })?;
        paths.push(rel);
    }

    Ok(paths)
}

/// First prefix of `relative` (itself included) that is a symlink under
/// `root_dir`.
///
/// The check stops at the first component that does not exist.
pub fn symlinked_prefix(root_dir: &Path, relative: &Path) -> Result<Option<PathBuf>> {
    let mut prefix = PathBuf::new();
    for component in relative.components() {
        prefix.push(component);
        let full = root_dir.join(&prefix);
        match fs::symlink_metadata(&full) {
            Ok(meta) if meta.file_type().is_symlink() => return Ok(Some(prefix)),
            Ok(_) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(Error::io(full, e)),
        }
    }
    Ok(None)
}

fn walk_error(start: &Path, err: walkdir::Error) -> Error {
    let path = err.path().unwrap_or(start).to_path_buf();
    let permission_denied = err
        .io_error()
        .is_some_and(|e| e.kind() == io::ErrorKind::PermissionDenied);

    match err.into_io_error() {
        Some(source) if permission_denied => Error::UnreadableDirectory { path, source },
        Some(source) => Error::io(path, source),
        None => Error::io(path, io::Error::other("filesystem loop detected")),
    }
}
