mod walk;

use crate::{Error, ErrorKind, File, FileInfo, Filesystem, Mode, OpenFlags, Result};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Fixture tree, parents before children. A trailing `/` marks a directory.
pub(crate) const TREE: &[&str] = &[
    "testdata/",
    "testdata/a",
    "testdata/b/",
    "testdata/c",
    "testdata/d/",
    "testdata/d/x",
    "testdata/d/y/",
    "testdata/d/z/",
    "testdata/d/z/u",
    "testdata/d/z/v",
];

pub(crate) fn p(s: &str) -> &Path {
    Path::new(s)
}

/// Build [`TREE`] under `base` and return the paths in visit order.
pub(crate) fn make_tree<F: Filesystem + ?Sized>(fs: &F, base: &Path) -> Vec<PathBuf> {
    let sep = fs.path_separator();
    let mut paths = Vec::new();
    for entry in TREE {
        let rel = entry.trim_end_matches('/').replace('/', &sep.to_string());
        let path = if base.as_os_str().is_empty() {
            PathBuf::from(rel)
        } else {
            crate::path::join(base, &rel, sep)
        };
        if entry.ends_with('/') {
            fs.mkdir(&path, 0o770).unwrap();
        } else {
            let mut f = fs.open_file(&path, OpenFlags::CREATE, 0o666).unwrap();
            f.close().unwrap();
        }
        paths.push(path);
    }
    paths
}

/// Delegates to `inner` but fails `lstat` and `read_dir` for chosen paths,
/// the way a permission problem would on a host filesystem.
pub(crate) struct FaultyFs<F> {
    pub inner: F,
    pub fail_lstat: HashSet<PathBuf>,
    pub fail_read_dir: HashSet<PathBuf>,
}

impl<F: Filesystem> FaultyFs<F> {
    pub fn new(inner: F) -> Self {
        Self {
            inner,
            fail_lstat: HashSet::new(),
            fail_read_dir: HashSet::new(),
        }
    }
}

impl<F: Filesystem> Filesystem for FaultyFs<F> {
    fn create(&self, path: &Path) -> Result<Box<dyn File>> {
        self.inner.create(path)
    }

    fn open_file(&self, path: &Path, flags: OpenFlags, mode: Mode) -> Result<Box<dyn File>> {
        self.inner.open_file(path, flags, mode)
    }

    fn remove(&self, path: &Path) -> Result<()> {
        self.inner.remove(path)
    }

    fn rename(&self, from: &Path, to: &Path) -> Result<()> {
        self.inner.rename(from, to)
    }

    fn mkdir(&self, path: &Path, mode: Mode) -> Result<()> {
        self.inner.mkdir(path, mode)
    }

    fn stat(&self, path: &Path) -> Result<FileInfo> {
        self.inner.stat(path)
    }

    fn lstat(&self, path: &Path) -> Result<FileInfo> {
        if self.fail_lstat.contains(path) {
            return Err(Error::new("lstat", path, ErrorKind::PermissionDenied));
        }
        self.inner.lstat(path)
    }

    fn read_dir(&self, path: &Path) -> Result<Vec<FileInfo>> {
        if self.fail_read_dir.contains(path) {
            return Err(Error::new("readdir", path, ErrorKind::PermissionDenied));
        }
        self.inner.read_dir(path)
    }
}
