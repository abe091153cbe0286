//! On-disk file operations for reconciliation
//!
//! Two operations live here:
//!
//! - [`delete_paths`] removes a precomputed set of relative paths, files first
//!   and then directories from the deepest up.
//! - [`copy_tree`] copies a generated tree into a repository, recreating
//!   symlinks instead of copying through them.
//!
//! Neither operation is transactional. The first failure is returned and
//! anything already deleted or written stays that way.

use std::fs;
use std::io;
use std::path::Path;

use log::debug;
use serde::Serialize;
use walkdir::WalkDir;

use crate::defaults::is_generator_input;
use crate::error::{Error, Result};
use crate::path::{depth, symlinked_prefix, to_slash};

/// What [`delete_paths`] did.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DeletionSummary {
    /// Files and symlinks removed.
    pub removed_files: Vec<String>,
    /// Directories removed, deepest first.
    pub removed_dirs: Vec<String>,
    /// Scheduled directories left in place because they still held content.
    pub kept_dirs: Vec<String>,
}

impl DeletionSummary {
    pub fn is_empty(&self) -> bool {
        self.removed_files.is_empty() && self.removed_dirs.is_empty()
    }
}

/// What [`copy_tree`] did.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CopySummary {
    /// Regular files written.
    pub files: Vec<String>,
    /// Symlinks recreated.
    pub symlinks: Vec<String>,
    /// Directories that had to be created.
    pub created_dirs: Vec<String>,
}

impl CopySummary {
    pub fn merge(&mut self, other: CopySummary) {
        self.files.extend(other.files);
        self.symlinks.extend(other.symlinks);
        self.created_dirs.extend(other.created_dirs);
    }
}

/// Split relative paths into files and directories by looking at disk.
///
/// Symlinks count as files whatever they point at. Paths that no longer exist
/// are dropped.
pub fn separate_files_and_dirs<I, S>(root_dir: &Path, paths: I) -> Result<(Vec<String>, Vec<String>)>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut files = Vec::new();
    let mut dirs = Vec::new();

    for path in paths {
        let relative = path.as_ref();
        let full = root_dir.join(relative);
        match fs::symlink_metadata(&full) {
            Ok(meta) if meta.is_dir() => dirs.push(relative.to_string()),
            Ok(_) => files.push(relative.to_string()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("Skipping '{}': no longer exists", relative);
            }
            Err(e) => return Err(Error::io(full, e)),
        }
    }

    Ok((files, dirs))
}

/// Delete relative paths under `root_dir`.
///
/// Files (and symlinks, removed as themselves) go first. Directories are then
/// removed deepest first; one that still has entries after that, such as a
/// directory holding preserved files, is left in place and reported in
/// [`DeletionSummary::kept_dirs`].
pub fn delete_paths<I, S>(root_dir: &Path, paths: I) -> Result<DeletionSummary>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let (files, mut dirs) = separate_files_and_dirs(root_dir, paths)?;
    let mut summary = DeletionSummary::default();

    for file in files {
        let full = root_dir.join(&file);
        fs::remove_file(&full).map_err(|e| Error::io(&full, e))?;
        debug!("Removed file '{}'", file);
        summary.removed_files.push(file);
    }

    dirs.sort_by(|a, b| depth(b).cmp(&depth(a)).then_with(|| a.cmp(b)));

    for dir in dirs {
        let full = root_dir.join(&dir);
        if !dir_is_empty(&full)? {
            debug!("Keeping directory '{}': still has content", dir);
            summary.kept_dirs.push(dir);
            continue;
        }
        fs::remove_dir(&full).map_err(|e| Error::io(&full, e))?;
        debug!("Removed directory '{}'", dir);
        summary.removed_dirs.push(dir);
    }

    Ok(summary)
}

fn dir_is_empty(dir: &Path) -> Result<bool> {
    let mut entries = fs::read_dir(dir).map_err(|e| Error::io(dir, e))?;
    Ok(entries.next().is_none())
}

/// Copy `src_root/relative` into `dest_root/relative`.
///
/// Reported paths are relative to the roots. A missing source directory copies
/// nothing. Destinations at or under the generator-input directory are
/// skipped. Symlinks are recreated with their original target string, and an
/// existing file or symlink at the destination is replaced rather than written
/// through. A symlink where a directory is needed is replaced by a real
/// directory.
///
/// # Errors
///
/// Returns [`Error::Io`] if a directory above `relative` in `dest_root` is a
/// symlink, or on the first failure to read the source tree or write the
/// destination.
pub fn copy_tree(src_root: &Path, dest_root: &Path, relative: &Path) -> Result<CopySummary> {
    let src = src_root.join(relative);
    let mut summary = CopySummary::default();

    if fs::symlink_metadata(&src).is_err() {
        debug!("Nothing to copy from '{}'", src.display());
        return Ok(summary);
    }

    if let Some(parent) = relative.parent() {
        if let Some(link) = symlinked_prefix(dest_root, parent)? {
            let full = dest_root.join(link);
            return Err(Error::io(
                &full,
                io::Error::other("destination passes through a symlink"),
            ));
        }
    }

    let mut walker = WalkDir::new(&src)
        .follow_links(false)
        .follow_root_links(false)
        .sort_by_file_name()
        .into_iter();

    while let Some(entry) = walker.next() {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(src.as_path()).to_path_buf();
            let source = e
                .into_io_error()
                .unwrap_or_else(|| io::Error::other("filesystem loop detected"));
            Error::io(path, source)
        })?;
        let rel = match entry.path().strip_prefix(&src) {
            Ok(below) if !below.as_os_str().is_empty() => relative.join(below),
            _ => relative.to_path_buf(),
        };
        let rel_str = to_slash(&rel)?;

        if is_generator_input(&rel_str) {
            debug!("Skipping generator input '{}'", rel_str);
            if entry.file_type().is_dir() {
                walker.skip_current_dir();
            }
            continue;
        }

        let dest = dest_root.join(&rel);
        let file_type = entry.file_type();

        if file_type.is_dir() {
            if prepare_directory(&dest)? {
                summary.created_dirs.push(rel_str);
            }
        } else if file_type.is_symlink() {
            let target = fs::read_link(entry.path()).map_err(|e| Error::io(entry.path(), e))?;
            prepare_destination(&dest)?;
            create_symlink(&target, &dest).map_err(|e| Error::io(&dest, e))?;
            debug!("Linked '{}' -> '{}'", rel_str, target.display());
            summary.symlinks.push(rel_str);
        } else {
            prepare_destination(&dest)?;
            fs::copy(entry.path(), &dest).map_err(|e| Error::io(&dest, e))?;
            debug!("Copied '{}'", rel_str);
            summary.files.push(rel_str);
        }
    }

    Ok(summary)
}

/// Make sure `dest` is a real directory. Returns whether one was created.
fn prepare_directory(dest: &Path) -> Result<bool> {
    match fs::symlink_metadata(dest) {
        Ok(meta) if meta.is_dir() => Ok(false),
        Ok(meta) if meta.file_type().is_symlink() => {
            remove_symlink(dest).map_err(|e| Error::io(dest, e))?;
            debug!("Replaced symlink '{}' with a directory", dest.display());
            fs::create_dir(dest).map_err(|e| Error::io(dest, e))?;
            Ok(true)
        }
        Ok(_) => Err(Error::io(
            dest,
            io::Error::new(io::ErrorKind::AlreadyExists, "a file is in the way"),
        )),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            fs::create_dir_all(dest).map_err(|e| Error::io(dest, e))?;
            Ok(true)
        }
        Err(e) => Err(Error::io(dest, e)),
    }
}

/// Create the parent directory and clear any file or symlink in the way.
fn prepare_destination(dest: &Path) -> Result<()> {
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }

    match fs::symlink_metadata(dest) {
        Ok(meta) if meta.is_dir() => Err(Error::io(
            dest,
            io::Error::new(io::ErrorKind::AlreadyExists, "a directory is in the way"),
        )),
        Ok(meta) if meta.file_type().is_symlink() => {
            remove_symlink(dest).map_err(|e| Error::io(dest, e))
        }
        Ok(_) => fs::remove_file(dest).map_err(|e| Error::io(dest, e)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(Error::io(dest, e)),
    }
}

#[cfg(unix)]
fn remove_symlink(link: &Path) -> io::Result<()> {
    fs::remove_file(link)
}

#[cfg(windows)]
fn remove_symlink(link: &Path) -> io::Result<()> {
    fs::remove_file(link).or_else(|_| fs::remove_dir(link))
}

#[cfg(unix)]
fn create_symlink(target: &Path, link: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(target, link)
}

#[cfg(windows)]
fn create_symlink(target: &Path, link: &Path) -> io::Result<()> {
    let resolved = match link.parent() {
        Some(parent) => parent.join(target),
        None => target.to_path_buf(),
    };
    if resolved.is_dir() {
        std::os::windows::fs::symlink_dir(target, link)
    } else {
        std::os::windows::fs::symlink_file(target, link)
    }
}
