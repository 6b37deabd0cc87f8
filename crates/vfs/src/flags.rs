use crate::error::{Error, ErrorKind, Result};
use std::path::Path;

bitflags::bitflags! {
    /// Flags accepted by `Filesystem::open_file`.
    ///
    /// Only the combinations matter; the bit values are not a stable encoding.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct OpenFlags: u32 {
        const CREATE = 1 << 0;
        const TRUNCATE = 1 << 1;
        const APPEND = 1 << 2;
        const READ_ONLY = 1 << 3;
        const WRITE_ONLY = 1 << 4;
        const READ_WRITE = 1 << 5;
    }
}

/// Capability of an opened handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessMode {
    ReadOnly,
    WriteOnly,
    ReadWrite,
}

impl OpenFlags {
    /// Derive the handle capability. `READ_WRITE` wins over the single-direction
    /// flags; no access flag at all means read-only.
    pub fn access_mode(self, path: &Path) -> Result<AccessMode> {
        if self.contains(OpenFlags::READ_WRITE) {
            return Ok(AccessMode::ReadWrite);
        }
        match (
            self.contains(OpenFlags::READ_ONLY),
            self.contains(OpenFlags::WRITE_ONLY),
        ) {
            (true, true) => Err(Error::invalid_argument("open", path)),
            (false, true) => Ok(AccessMode::WriteOnly),
            _ => Ok(AccessMode::ReadOnly),
        }
    }
}

/// Reference point for `File::seek`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Whence {
    Start,
    Current,
    End,
}

impl TryFrom<u32> for Whence {
    type Error = ErrorKind;

    /// Numeric whence as in POSIX `lseek`: 0, 1, 2.
    fn try_from(value: u32) -> std::result::Result<Self, Self::Error> {
        match value {
            0 => Ok(Whence::Start),
            1 => Ok(Whence::Current),
            2 => Ok(Whence::End),
            _ => Err(ErrorKind::InvalidArgument),
        }
    }
}
