//! Pass-through to the host filesystem.

use crate::EntryType;
use crate::error::{Error, Result};
use crate::file::{File, ReadOnlyFile, WriteOnlyFile};
use crate::filesystem::Filesystem;
use crate::flags::{AccessMode, OpenFlags, Whence};
use crate::metadata::{FileInfo, Mode};
use chrono::{DateTime, Utc};
use std::fs;
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

/// Forwards every operation to `std::fs`. Paths are used as given, relative
/// ones against the process working directory.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsFs;

impl OsFs {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

/// Open host file.
#[derive(Debug)]
pub struct OsFile {
    name: PathBuf,
    inner: fs::File,
}

impl File for OsFile {
    fn name(&self) -> &Path {
        &self.name
    }

    fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }
        match self.inner.read(buf) {
            Ok(0) => Err(Error::end_of_stream(&self.name)),
            Ok(n) => Ok(n),
            Err(e) => Err(Error::from_io("read", &self.name, e)),
        }
    }

    fn write(&mut self, buf: &[u8]) -> Result<usize> {
        self.inner
            .write(buf)
            .map_err(|e| Error::from_io("write", &self.name, e))
    }

    fn seek(&mut self, offset: i64, whence: Whence) -> Result<u64> {
        let pos = match whence {
            Whence::Start => SeekFrom::Start(
                u64::try_from(offset).map_err(|_| Error::invalid_argument("seek", &self.name))?,
            ),
            Whence::Current => SeekFrom::Current(offset),
            Whence::End => SeekFrom::End(offset),
        };
        self.inner
            .seek(pos)
            .map_err(|e| Error::from_io("seek", &self.name, e))
    }

    fn close(&mut self) -> Result<()> {
        self.inner
            .flush()
            .map_err(|e| Error::from_io("close", &self.name, e))
    }
}

fn file_info(name: String, meta: &fs::Metadata) -> FileInfo {
    let entry_type = if meta.is_dir() {
        EntryType::Directory
    } else {
        EntryType::File
    };
    FileInfo {
        name,
        size: if meta.is_dir() { 0 } else { meta.len() },
        mode: mode_of(meta),
        entry_type,
        modified: meta.modified().map(DateTime::<Utc>::from).unwrap_or_default(),
    }
}

#[cfg(unix)]
fn mode_of(meta: &fs::Metadata) -> Mode {
    use std::os::unix::fs::PermissionsExt;
    meta.permissions().mode()
}

#[cfg(not(unix))]
fn mode_of(meta: &fs::Metadata) -> Mode {
    if meta.permissions().readonly() {
        0o444
    } else {
        0o666
    }
}

/// Final component, or the whole path when there is none (`/`, `.`).
/// Names that are not UTF-8 are rejected.
fn name_of(op: &'static str, path: &Path) -> Result<String> {
    path.file_name()
        .unwrap_or(path.as_os_str())
        .to_str()
        .map(str::to_string)
        .ok_or_else(|| Error::invalid_argument(op, path))
}

impl Filesystem for OsFs {
    fn path_separator(&self) -> char {
        std::path::MAIN_SEPARATOR
    }

    fn create(&self, path: &Path) -> Result<Box<dyn File>> {
        self.open_file(
            path,
            OpenFlags::CREATE | OpenFlags::TRUNCATE | OpenFlags::READ_WRITE,
            0o666,
        )
    }

    fn open_file(&self, path: &Path, flags: OpenFlags, mode: Mode) -> Result<Box<dyn File>> {
        let access = flags.access_mode(path)?;
        let create = flags.contains(OpenFlags::CREATE);
        let truncate = flags.contains(OpenFlags::TRUNCATE);

        let mut options = fs::OpenOptions::new();
        options
            .read(access != AccessMode::WriteOnly)
            .write(access != AccessMode::ReadOnly || create || truncate)
            .append(flags.contains(OpenFlags::APPEND))
            .truncate(truncate);
        // Same rule as the in-memory backend: creating over an existing
        // entry needs TRUNCATE.
        if create && truncate {
            options.create(true);
        } else if create {
            options.create_new(true);
        }
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(mode);
        }
        #[cfg(not(unix))]
        let _ = mode;

        let inner = options
            .open(path)
            .map_err(|e| Error::from_io("open", path, e))?;
        if inner
            .metadata()
            .map_err(|e| Error::from_io("open", path, e))?
            .is_dir()
        {
            return Err(Error::is_directory("open", path));
        }

        let file = OsFile {
            name: path.to_path_buf(),
            inner,
        };
        Ok(match access {
            AccessMode::ReadWrite => Box::new(file),
            AccessMode::ReadOnly => Box::new(ReadOnlyFile::new(file)),
            AccessMode::WriteOnly => Box::new(WriteOnlyFile::new(file)),
        })
    }

    fn remove(&self, path: &Path) -> Result<()> {
        let meta = fs::symlink_metadata(path).map_err(|e| Error::from_io("remove", path, e))?;
        let result = if meta.is_dir() {
            fs::remove_dir(path)
        } else {
            fs::remove_file(path)
        };
        result.map_err(|e| Error::from_io("remove", path, e))
    }

    fn rename(&self, from: &Path, to: &Path) -> Result<()> {
        fs::rename(from, to).map_err(|e| Error::from_io("rename", from, e))
    }

    fn mkdir(&self, path: &Path, mode: Mode) -> Result<()> {
        let mut builder = fs::DirBuilder::new();
        #[cfg(unix)]
        {
            use std::os::unix::fs::DirBuilderExt;
            builder.mode(mode);
        }
        #[cfg(not(unix))]
        let _ = mode;
        builder
            .create(path)
            .map_err(|e| Error::from_io("mkdir", path, e))
    }

    fn stat(&self, path: &Path) -> Result<FileInfo> {
        let meta = fs::metadata(path).map_err(|e| Error::from_io("stat", path, e))?;
        Ok(file_info(name_of("stat", path)?, &meta))
    }

    fn lstat(&self, path: &Path) -> Result<FileInfo> {
        let meta = fs::symlink_metadata(path).map_err(|e| Error::from_io("lstat", path, e))?;
        Ok(file_info(name_of("lstat", path)?, &meta))
    }

    fn read_dir(&self, path: &Path) -> Result<Vec<FileInfo>> {
        let mut infos = Vec::new();
        for entry in fs::read_dir(path).map_err(|e| Error::from_io("readdir", path, e))? {
            let entry = entry.map_err(|e| Error::from_io("readdir", path, e))?;
            let meta = entry
                .metadata()
                .map_err(|e| Error::from_io("readdir", entry.path(), e))?;
            let name = entry
                .file_name()
                .into_string()
                .map_err(|_| Error::invalid_argument("readdir", entry.path()))?;
            infos.push(file_info(name, &meta));
        }
        infos.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(infos)
    }
}
