use crate::error::{Error, ErrorKind, Result};
use crate::file::{File, ReadOnlyFile};
use crate::filesystem::Filesystem;
use crate::flags::OpenFlags;
use crate::metadata::{FileInfo, Mode};
use std::path::Path;

/// Exposes `delegate` without any way to modify it.
///
/// Mutating operations fail with `ReadOnly`; opens that would create,
/// truncate or write are refused, and every handle handed out rejects
/// writes.
#[derive(Debug, Clone)]
pub struct ReadOnlyFs<F> {
    delegate: F,
}

impl<F: Filesystem> ReadOnlyFs<F> {
    pub fn new(delegate: F) -> Self {
        Self { delegate }
    }

    pub fn into_inner(self) -> F {
        self.delegate
    }
}

fn read_only(op: &'static str, path: &Path) -> Error {
    Error::new(op, path, ErrorKind::ReadOnly)
}

impl<F: Filesystem> Filesystem for ReadOnlyFs<F> {
    fn path_separator(&self) -> char {
        self.delegate.path_separator()
    }

    fn create(&self, path: &Path) -> Result<Box<dyn File>> {
        Err(read_only("create", path))
    }

    fn open_file(&self, path: &Path, flags: OpenFlags, mode: Mode) -> Result<Box<dyn File>> {
        if flags.intersects(
            OpenFlags::CREATE | OpenFlags::TRUNCATE | OpenFlags::APPEND | OpenFlags::WRITE_ONLY,
        ) {
            return Err(read_only("open", path));
        }
        let file = self.delegate.open_file(path, flags, mode)?;
        Ok(Box::new(ReadOnlyFile::new(file)))
    }

    fn remove(&self, path: &Path) -> Result<()> {
        Err(read_only("remove", path))
    }

    fn rename(&self, from: &Path, _to: &Path) -> Result<()> {
        Err(read_only("rename", from))
    }

    fn mkdir(&self, path: &Path, _mode: Mode) -> Result<()> {
        Err(read_only("mkdir", path))
    }

    fn stat(&self, path: &Path) -> Result<FileInfo> {
        self.delegate.stat(path)
    }

    fn lstat(&self, path: &Path) -> Result<FileInfo> {
        self.delegate.lstat(path)
    }

    fn read_dir(&self, path: &Path) -> Result<Vec<FileInfo>> {
        self.delegate.read_dir(path)
    }
}
