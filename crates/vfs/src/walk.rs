//! Recursive traversal over any [`Filesystem`].

use crate::error::{Error, Result};
use crate::filesystem::Filesystem;
use crate::metadata::FileInfo;
use crate::path;
use diagnostics::*;
use std::path::{Path, PathBuf};

/// What the walk callback wants to happen next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkAction {
    Continue,
    /// On a directory: do not descend into it. On a file: skip the
    /// remaining entries of the containing directory.
    Skip,
}

/// Visit `root` and everything below it, calling `callback` for each
/// entry. Directories are reported before their contents and siblings are
/// visited in byte-wise name order. Symbolic links are not followed.
///
/// The callback receives the entry's path, its info when the lookup
/// succeeded, and the error when it did not (or when a directory could not
/// be listed). Returning `Err` aborts the walk with that error; a `Skip`
/// reaching the top is a clean finish.
///
/// ```
/// use std::path::Path;
/// use vfs::{Filesystem, MemFs, WalkAction, walk};
///
/// let fs = MemFs::new();
/// fs.mkdir(Path::new("/docs"), 0o755).unwrap();
/// fs.create(Path::new("/docs/readme")).unwrap();
///
/// let mut seen = Vec::new();
/// walk(&fs, Path::new("/"), |path, _info, err| {
///     if let Some(err) = err {
///         return Err(err);
///     }
///     seen.push(path.to_path_buf());
///     Ok(WalkAction::Continue)
/// })
/// .unwrap();
/// assert_eq!(seen.len(), 3);
/// ```
pub fn walk<F, C>(fs: &F, root: &Path, mut callback: C) -> Result<()>
where
    F: Filesystem + ?Sized,
    C: FnMut(&Path, Option<&FileInfo>, Option<Error>) -> Result<WalkAction>,
{
    let action = match fs.lstat(root) {
        Ok(info) => walk_entry(fs, root, &info, &mut callback)?,
        Err(err) => callback(root, None, Some(err))?,
    };
    if action == WalkAction::Skip {
        let root_str = root.display().to_string();
        debug!("walk of {root} stopped by skip", root: root_str);
    }
    Ok(())
}

fn walk_entry<F, C>(fs: &F, path: &Path, info: &FileInfo, callback: &mut C) -> Result<WalkAction>
where
    F: Filesystem + ?Sized,
    C: FnMut(&Path, Option<&FileInfo>, Option<Error>) -> Result<WalkAction>,
{
    if !info.is_dir() {
        return callback(path, Some(info), None);
    }

    let (names, list_err) = match read_dir_names(fs, path) {
        Ok(names) => (names, None),
        Err(err) => (Vec::new(), Some(err)),
    };
    let listing_failed = list_err.is_some();
    let action = callback(path, Some(info), list_err)?;
    if listing_failed || action == WalkAction::Skip {
        return Ok(action);
    }

    let sep = fs.path_separator();
    for name in names {
        let child = path::join(path, &name, sep);
        match fs.lstat(&child) {
            Err(err) => {
                // Continue and Skip both move on to the next sibling.
                callback(&child, None, Some(err))?;
            }
            Ok(child_info) => {
                if walk_entry(fs, &child, &child_info, callback)? == WalkAction::Skip {
                    if child_info.is_dir() {
                        let child_str = child.display().to_string();
                        debug!("pruned {dir}", dir: child_str);
                    } else {
                        let path_str = path.display().to_string();
                        debug!("skipping rest of {dir}", dir: path_str);
                        return Ok(WalkAction::Skip);
                    }
                }
            }
        }
    }
    Ok(WalkAction::Continue)
}

fn read_dir_names<F: Filesystem + ?Sized>(fs: &F, dir: &Path) -> Result<Vec<String>> {
    let mut names: Vec<String> = fs
        .read_dir(dir)?
        .into_iter()
        .map(|info| info.name)
        .collect();
    names.sort_unstable();
    Ok(names)
}

/// Collect every path under `root` in visit order. Errors abort.
pub fn walk_paths<F: Filesystem + ?Sized>(fs: &F, root: &Path) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    walk(fs, root, |path, _, err| match err {
        Some(err) => Err(err),
        None => {
            paths.push(path.to_path_buf());
            Ok(WalkAction::Continue)
        }
    })?;
    Ok(paths)
}
