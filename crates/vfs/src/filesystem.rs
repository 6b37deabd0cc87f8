use crate::error::Result;
use crate::file::File;
use crate::flags::OpenFlags;
use crate::metadata::{FileInfo, Mode};
use crate::path::SEPARATOR;
use std::path::Path;
use std::sync::Arc;

/// A hierarchical filesystem: files and directories addressed by path.
///
/// Implementations are shared across threads; every operation takes
/// `&self`.
pub trait Filesystem: Send + Sync {
    /// Separator used when building child paths.
    fn path_separator(&self) -> char {
        SEPARATOR
    }

    /// Create or truncate `path` and open it read-write.
    fn create(&self, path: &Path) -> Result<Box<dyn File>>;

    /// Open `path` with explicit flags. `mode` is recorded on a newly
    /// created file.
    fn open_file(&self, path: &Path, flags: OpenFlags, mode: Mode) -> Result<Box<dyn File>>;

    fn remove(&self, path: &Path) -> Result<()>;

    fn rename(&self, from: &Path, to: &Path) -> Result<()>;

    fn mkdir(&self, path: &Path, mode: Mode) -> Result<()>;

    fn stat(&self, path: &Path) -> Result<FileInfo>;

    /// Like `stat`, but does not follow a final symbolic link on
    /// filesystems that have them.
    fn lstat(&self, path: &Path) -> Result<FileInfo>;

    /// Entries of a directory, sorted by name.
    fn read_dir(&self, path: &Path) -> Result<Vec<FileInfo>>;
}

macro_rules! forward_filesystem {
    () => {
        fn path_separator(&self) -> char {
            (**self).path_separator()
        }

        fn create(&self, path: &Path) -> Result<Box<dyn File>> {
            (**self).create(path)
        }

        fn open_file(&self, path: &Path, flags: OpenFlags, mode: Mode) -> Result<Box<dyn File>> {
            (**self).open_file(path, flags, mode)
        }

        fn remove(&self, path: &Path) -> Result<()> {
            (**self).remove(path)
        }

        fn rename(&self, from: &Path, to: &Path) -> Result<()> {
            (**self).rename(from, to)
        }

        fn mkdir(&self, path: &Path, mode: Mode) -> Result<()> {
            (**self).mkdir(path, mode)
        }

        fn stat(&self, path: &Path) -> Result<FileInfo> {
            (**self).stat(path)
        }

        fn lstat(&self, path: &Path) -> Result<FileInfo> {
            (**self).lstat(path)
        }

        fn read_dir(&self, path: &Path) -> Result<Vec<FileInfo>> {
            (**self).read_dir(path)
        }
    };
}

impl<T: Filesystem + ?Sized> Filesystem for &T {
    forward_filesystem!();
}

impl<T: Filesystem + ?Sized> Filesystem for Box<T> {
    forward_filesystem!();
}

impl<T: Filesystem + ?Sized> Filesystem for Arc<T> {
    forward_filesystem!();
}
