use crate::error::{Error, Result};
use crate::file::File;
use crate::filesystem::Filesystem;
use crate::flags::OpenFlags;
use crate::metadata::{FileInfo, Mode};
use crate::path;
use std::path::{Path, PathBuf};

/// Roots every path under `prefix` on `delegate`.
///
/// `/a/b` on a `PrefixFs` with prefix `/srv` becomes `/srv/a/b` on the
/// delegate. Handles report the delegate's (prefixed) name.
#[derive(Debug, Clone)]
pub struct PrefixFs<F> {
    delegate: F,
    prefix: PathBuf,
}

impl<F: Filesystem> PrefixFs<F> {
    pub fn new<P: Into<PathBuf>>(delegate: F, prefix: P) -> Self {
        Self {
            delegate,
            prefix: prefix.into(),
        }
    }

    #[must_use]
    pub fn prefix(&self) -> &Path {
        &self.prefix
    }

    fn prefixed(&self, op: &'static str, path: &Path) -> Result<PathBuf> {
        let sep = self.delegate.path_separator();
        let rel = path
            .to_str()
            .ok_or_else(|| Error::invalid_argument(op, path))?;
        Ok(path::join(&self.prefix, rel.trim_start_matches(sep), sep))
    }
}

impl<F: Filesystem> Filesystem for PrefixFs<F> {
    fn path_separator(&self) -> char {
        self.delegate.path_separator()
    }

    fn create(&self, path: &Path) -> Result<Box<dyn File>> {
        self.delegate.create(&self.prefixed("create", path)?)
    }

    fn open_file(&self, path: &Path, flags: OpenFlags, mode: Mode) -> Result<Box<dyn File>> {
        self.delegate
            .open_file(&self.prefixed("open", path)?, flags, mode)
    }

    fn remove(&self, path: &Path) -> Result<()> {
        self.delegate.remove(&self.prefixed("remove", path)?)
    }

    fn rename(&self, from: &Path, to: &Path) -> Result<()> {
        let from = self.prefixed("rename", from)?;
        let to = self.prefixed("rename", to)?;
        self.delegate.rename(&from, &to)
    }

    fn mkdir(&self, path: &Path, mode: Mode) -> Result<()> {
        self.delegate.mkdir(&self.prefixed("mkdir", path)?, mode)
    }

    fn stat(&self, path: &Path) -> Result<FileInfo> {
        self.delegate.stat(&self.prefixed("stat", path)?)
    }

    fn lstat(&self, path: &Path) -> Result<FileInfo> {
        self.delegate.lstat(&self.prefixed("lstat", path)?)
    }

    fn read_dir(&self, path: &Path) -> Result<Vec<FileInfo>> {
        self.delegate.read_dir(&self.prefixed("readdir", path)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemFs;

    #[test]
    fn test_prefixed_paths() {
        let fs = PrefixFs::new(MemFs::new(), "/srv");
        let prefixed = |p: &str| fs.prefixed("stat", Path::new(p)).unwrap();
        assert_eq!(prefixed("/a/b"), PathBuf::from("/srv/a/b"));
        assert_eq!(prefixed("a"), PathBuf::from("/srv/a"));
        assert_eq!(prefixed("/"), PathBuf::from("/srv/"));
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_path_is_rejected() {
        use crate::error::ErrorKind;
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let fs = PrefixFs::new(MemFs::new(), "/srv");
        let bad = Path::new(OsStr::from_bytes(b"/\xff"));
        let err = fs.stat(bad).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert_eq!(err.path(), bad);
    }
}
