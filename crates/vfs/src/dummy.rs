//! Stand-ins that fail every operation with a chosen error kind. Useful for
//! exercising error paths in code written against the traits.

use crate::error::{Error, ErrorKind, Result};
use crate::file::File;
use crate::filesystem::Filesystem;
use crate::flags::{OpenFlags, Whence};
use crate::metadata::{FileInfo, Mode};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy)]
pub struct DummyFs {
    kind: ErrorKind,
}

impl DummyFs {
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self { kind }
    }
}

impl Filesystem for DummyFs {
    fn create(&self, path: &Path) -> Result<Box<dyn File>> {
        Err(Error::new("create", path, self.kind))
    }

    fn open_file(&self, path: &Path, _flags: OpenFlags, _mode: Mode) -> Result<Box<dyn File>> {
        Err(Error::new("open", path, self.kind))
    }

    fn remove(&self, path: &Path) -> Result<()> {
        Err(Error::new("remove", path, self.kind))
    }

    fn rename(&self, from: &Path, _to: &Path) -> Result<()> {
        Err(Error::new("rename", from, self.kind))
    }

    fn mkdir(&self, path: &Path, _mode: Mode) -> Result<()> {
        Err(Error::new("mkdir", path, self.kind))
    }

    fn stat(&self, path: &Path) -> Result<FileInfo> {
        Err(Error::new("stat", path, self.kind))
    }

    fn lstat(&self, path: &Path) -> Result<FileInfo> {
        Err(Error::new("lstat", path, self.kind))
    }

    fn read_dir(&self, path: &Path) -> Result<Vec<FileInfo>> {
        Err(Error::new("readdir", path, self.kind))
    }
}

#[derive(Debug, Clone)]
pub struct DummyFile {
    name: PathBuf,
    kind: ErrorKind,
}

impl DummyFile {
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            name: PathBuf::from("dummy"),
            kind,
        }
    }
}

impl File for DummyFile {
    fn name(&self) -> &Path {
        &self.name
    }

    fn read(&mut self, _buf: &mut [u8]) -> Result<usize> {
        Err(Error::new("read", &self.name, self.kind))
    }

    fn write(&mut self, _buf: &[u8]) -> Result<usize> {
        Err(Error::new("write", &self.name, self.kind))
    }

    fn seek(&mut self, _offset: i64, _whence: Whence) -> Result<u64> {
        Err(Error::new("seek", &self.name, self.kind))
    }

    fn close(&mut self) -> Result<()> {
        Err(Error::new("close", &self.name, self.kind))
    }
}
