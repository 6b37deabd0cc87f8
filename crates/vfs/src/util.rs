//! Whole-file and whole-tree helpers built only on the traits, so they work
//! with any backend.

use crate::error::{Error, ErrorKind, Result};
use crate::filesystem::Filesystem;
use crate::flags::OpenFlags;
use crate::metadata::Mode;
use crate::path;
use std::path::Path;

/// Write `data` to `path`, creating it with `mode` or truncating it.
pub fn write_file<F: Filesystem + ?Sized>(
    fs: &F,
    path: &Path,
    data: &[u8],
    mode: Mode,
) -> Result<()> {
    let mut file = fs.open_file(
        path,
        OpenFlags::WRITE_ONLY | OpenFlags::CREATE | OpenFlags::TRUNCATE,
        mode,
    )?;
    let mut written = 0;
    let result = loop {
        if written == data.len() {
            break Ok(());
        }
        match file.write(&data[written..]) {
            Ok(0) => break Err(Error::new("write", path, ErrorKind::Other)),
            Ok(n) => written += n,
            Err(e) => break Err(e),
        }
    };
    let closed = file.close();
    result.and(closed)
}

/// Read the whole content of `path`.
pub fn read_file<F: Filesystem + ?Sized>(fs: &F, path: &Path) -> Result<Vec<u8>> {
    let mut file = fs.open_file(path, OpenFlags::READ_ONLY, 0)?;
    let mut data = Vec::new();
    let mut chunk = [0u8; 4096];
    loop {
        match file.read(&mut chunk) {
            Ok(0) => break,
            Ok(n) => data.extend_from_slice(&chunk[..n]),
            Err(e) if e.is_eof() => break,
            Err(e) => return Err(e),
        }
    }
    file.close()?;
    Ok(data)
}

/// Create `path` and any missing parents. Existing directories along the
/// way are fine; an existing file is `NotADirectory`.
pub fn mkdir_all<F: Filesystem + ?Sized>(fs: &F, path: &Path, mode: Mode) -> Result<()> {
    let mut ancestors: Vec<&Path> = path
        .ancestors()
        .filter(|p| !p.as_os_str().is_empty())
        .collect();
    ancestors.reverse();

    for dir in ancestors {
        match fs.stat(dir) {
            Ok(info) if info.is_dir() => continue,
            Ok(_) => return Err(Error::not_a_directory("mkdir", dir)),
            Err(e) if e.is_not_found() => {}
            Err(e) => return Err(e),
        }
        match fs.mkdir(dir, mode) {
            // Lost a race with another creator.
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {}
            other => other?,
        }
    }
    Ok(())
}

/// Remove `path` and everything below it. A missing `path` is not an error.
pub fn remove_all<F: Filesystem + ?Sized>(fs: &F, path: &Path) -> Result<()> {
    let info = match fs.lstat(path) {
        Ok(info) => info,
        Err(e) if e.is_not_found() => return Ok(()),
        Err(e) => return Err(e),
    };
    if info.is_dir() {
        let sep = fs.path_separator();
        for child in fs.read_dir(path)? {
            remove_all(fs, &path::join(path, &child.name, sep))?;
        }
    }
    fs.remove(path)
}
