//! A small virtual filesystem layer.
//!
//! [`Filesystem`] and [`File`] describe what a backend can do. [`MemFs`]
//! keeps everything in memory and is safe to share between threads;
//! [`OsFs`] forwards to the host. [`ReadOnlyFs`] and [`PrefixFs`] wrap any
//! backend, and [`walk`] traverses any of them.
//!
//! ```
//! use std::path::Path;
//! use vfs::{Filesystem, MemFs, read_file, write_file};
//!
//! let fs = MemFs::new();
//! fs.mkdir(Path::new("/etc"), 0o755).unwrap();
//! write_file(&fs, Path::new("/etc/motd"), b"hello", 0o644).unwrap();
//! assert_eq!(read_file(&fs, Path::new("/etc/motd")).unwrap(), b"hello");
//! ```

mod config;
mod dummy;
mod entry_type;
mod error;
mod file;
mod filesystem;
mod flags;
mod memory;
mod metadata;
mod os;
pub mod path;
mod prefix;
mod readonly;
mod util;
mod walk;

pub use config::{MemFsConfig, RemovePolicy};
pub use dummy::{DummyFile, DummyFs};
pub use entry_type::EntryType;
pub use error::{Error, ErrorKind, Result};
pub use file::{File, ReadOnlyFile, WriteOnlyFile};
pub use filesystem::Filesystem;
pub use flags::{AccessMode, OpenFlags, Whence};
pub use memory::{MemFile, MemFs};
pub use metadata::{FileInfo, Mode};
pub use os::{OsFile, OsFs};
pub use prefix::PrefixFs;
pub use readonly::ReadOnlyFs;
pub use util::{mkdir_all, read_file, remove_all, write_file};
pub use walk::{WalkAction, walk, walk_paths};

#[cfg(test)]
mod tests;
