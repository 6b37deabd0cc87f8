//! In-memory filesystem.
//!
//! All structure lives in one [`Tree`] behind a single `RwLock`: mutations
//! and opens take it exclusively, lookups share it. File content has its own
//! lock inside each [`Buffer`], so reads and writes through open handles
//! never touch the structural lock. The structural lock may be held while a
//! content lock is taken (stat, truncate), never the other way round.

pub(crate) mod buffer;
mod file;
mod node;
mod tree;

use crate::config::{MemFsConfig, RemovePolicy};
use crate::error::{Error, ErrorKind, Result};
use crate::file::{File, ReadOnlyFile, WriteOnlyFile};
use crate::filesystem::Filesystem;
use crate::flags::{AccessMode, OpenFlags, Whence};
use crate::metadata::{FileInfo, Mode};
use crate::path::CleanPath;
use diagnostics::*;
use parking_lot::RwLock;
use std::path::{Path, PathBuf};

pub use file::MemFile;
use node::{Node, NodeID};
use tree::{ParentMissing, Resolved, Tree};

pub struct MemFs {
    tree: RwLock<Tree>,
    config: MemFsConfig,
}

impl MemFs {
    /// Empty filesystem (root only) with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(MemFsConfig::default())
    }

    #[must_use]
    pub fn with_config(config: MemFsConfig) -> Self {
        Self {
            tree: RwLock::new(Tree::new(config.default_dir_mode)),
            config,
        }
    }

    #[must_use]
    pub fn config(&self) -> &MemFsConfig {
        &self.config
    }

    /// Make `path` the directory relative paths resolve from.
    pub fn chdir<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let mut tree = self.tree.write();
        let id = lookup(&tree, "chdir", path)?;
        if !tree.get(id).is_some_and(Node::is_dir) {
            return Err(Error::not_a_directory("chdir", path));
        }
        tree.set_working_dir(id);
        let wd = tree.abs_path(id).display().to_string();
        debug!("chdir to {wd}", wd: wd);
        Ok(())
    }

    /// Absolute path of the working directory.
    #[must_use]
    pub fn working_dir(&self) -> PathBuf {
        let tree = self.tree.read();
        tree.abs_path(tree.working_dir())
    }

    fn open_locked(
        &self,
        tree: &mut Tree,
        path: &Path,
        flags: OpenFlags,
        mode: Mode,
    ) -> Result<Box<dyn File>> {
        let access = flags.access_mode(path)?;
        let resolved = resolve(tree, "open", path)?;

        let id = match (resolved.target, resolved.parent) {
            (Some(id), _) => {
                if flags.contains(OpenFlags::CREATE) && !flags.contains(OpenFlags::TRUNCATE) {
                    return Err(Error::already_exists("open", path));
                }
                id
            }
            (None, Some(parent)) if flags.contains(OpenFlags::CREATE) => {
                let node = Node::file(
                    resolved.base.clone(),
                    mode,
                    parent,
                    self.config.min_buffer_size,
                );
                let id = tree.insert(parent, resolved.base, node);
                let path_str = path.display().to_string();
                debug!("created file {path}", path: path_str);
                id
            }
            _ => return Err(Error::not_found("open", path)),
        };

        let name = tree.abs_path(id);
        let node = tree
            .get_mut(id)
            .ok_or_else(|| Error::not_found("open", path))?;
        let Some(buffer) = node.buffer().cloned() else {
            return Err(Error::is_directory("open", path));
        };
        if flags.contains(OpenFlags::TRUNCATE) {
            buffer.truncate();
        }
        if access != AccessMode::ReadOnly || flags.contains(OpenFlags::TRUNCATE) {
            node.touch();
        }

        let mut file = MemFile::new(name, buffer);
        if flags.contains(OpenFlags::APPEND) {
            File::seek(&mut file, 0, Whence::End)?;
        }

        Ok(match access {
            AccessMode::ReadWrite => Box::new(file),
            AccessMode::ReadOnly => Box::new(ReadOnlyFile::new(file)),
            AccessMode::WriteOnly => Box::new(WriteOnlyFile::new(file)),
        })
    }
}

impl Default for MemFs {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for MemFs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemFs")
            .field("nodes", &self.tree.read().node_count())
            .field("config", &self.config)
            .finish()
    }
}

fn resolve(tree: &Tree, op: &'static str, path: &Path) -> Result<Resolved> {
    let clean = CleanPath::parse(op, path)?;
    tree.resolve(&clean)
        .map_err(|ParentMissing| Error::not_found(op, path))
}

/// Resolve `path` to an existing node.
fn lookup(tree: &Tree, op: &'static str, path: &Path) -> Result<NodeID> {
    resolve(tree, op, path)?
        .target
        .ok_or_else(|| Error::not_found(op, path))
}

fn info_of(tree: &Tree, op: &'static str, path: &Path) -> Result<FileInfo> {
    let id = lookup(tree, op, path)?;
    tree.get(id)
        .map(Node::info)
        .ok_or_else(|| Error::not_found(op, path))
}

impl Filesystem for MemFs {
    fn create(&self, path: &Path) -> Result<Box<dyn File>> {
        self.open_file(
            path,
            OpenFlags::CREATE | OpenFlags::TRUNCATE | OpenFlags::READ_WRITE,
            self.config.default_file_mode,
        )
    }

    fn open_file(&self, path: &Path, flags: OpenFlags, mode: Mode) -> Result<Box<dyn File>> {
        let mut tree = self.tree.write();
        self.open_locked(&mut tree, path, flags, mode)
    }

    fn remove(&self, path: &Path) -> Result<()> {
        let mut tree = self.tree.write();
        let resolved = resolve(&tree, "remove", path)?;
        let Some(parent) = resolved.parent else {
            return Err(Error::invalid_argument("remove", path));
        };
        let id = resolved
            .target
            .ok_or_else(|| Error::not_found("remove", path))?;

        if self.config.remove_policy == RemovePolicy::RequireEmpty
            && tree
                .get(id)
                .and_then(Node::children)
                .is_some_and(|children| !children.is_empty())
        {
            return Err(Error::new("remove", path, ErrorKind::DirectoryNotEmpty));
        }

        if let Some(detached) = tree.detach(parent, &resolved.base) {
            let freed = tree.purge(detached);
            let path_str = path.display().to_string();
            debug!("removed {path} ({freed} nodes)", path: path_str, freed: freed);
        }
        Ok(())
    }

    fn rename(&self, from: &Path, to: &Path) -> Result<()> {
        let mut tree = self.tree.write();

        let old = resolve(&tree, "rename", from)?;
        let Some(old_parent) = old.parent else {
            return Err(Error::invalid_argument("rename", from));
        };
        let id = old.target.ok_or_else(|| Error::not_found("rename", from))?;

        let new = resolve(&tree, "rename", to)?;
        let Some(new_parent) = new.parent else {
            return Err(Error::already_exists("rename", to));
        };
        if new.target.is_some() {
            return Err(Error::already_exists("rename", to));
        }
        if tree.is_ancestor(id, new_parent) {
            return Err(Error::invalid_argument("rename", to));
        }

        if let Some(detached) = tree.detach(old_parent, &old.base) {
            tree.attach(new_parent, new.base, detached);
        }
        let from_str = from.display().to_string();
        let to_str = to.display().to_string();
        debug!("renamed {from} to {to}", from: from_str, to: to_str);
        Ok(())
    }

    fn mkdir(&self, path: &Path, mode: Mode) -> Result<()> {
        let mut tree = self.tree.write();
        let resolved = resolve(&tree, "mkdir", path)?;
        if resolved.target.is_some() {
            return Err(Error::already_exists("mkdir", path));
        }
        let Some(parent) = resolved.parent else {
            return Err(Error::not_found("mkdir", path));
        };
        let node = Node::directory(resolved.base.clone(), mode, Some(parent));
        tree.insert(parent, resolved.base, node);
        let path_str = path.display().to_string();
        debug!("created directory {path}", path: path_str);
        Ok(())
    }

    fn stat(&self, path: &Path) -> Result<FileInfo> {
        let tree = self.tree.read();
        info_of(&tree, "stat", path)
    }

    fn lstat(&self, path: &Path) -> Result<FileInfo> {
        let tree = self.tree.read();
        info_of(&tree, "lstat", path)
    }

    fn read_dir(&self, path: &Path) -> Result<Vec<FileInfo>> {
        let tree = self.tree.read();
        let id = lookup(&tree, "readdir", path)?;
        let children = tree
            .get(id)
            .ok_or_else(|| Error::not_found("readdir", path))?
            .children()
            .ok_or_else(|| Error::not_a_directory("readdir", path))?;
        Ok(children
            .values()
            .filter_map(|child| tree.get(*child).map(Node::info))
            .collect())
    }
}
