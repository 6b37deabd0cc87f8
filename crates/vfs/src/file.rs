use crate::error::{Error, ErrorKind, Result};
use crate::flags::Whence;
use std::path::Path;

/// An open file: a cursor over some byte content.
///
/// Metadata is not reachable from the handle; use `Filesystem::stat` with
/// [`File::name`] instead.
pub trait File: Send {
    /// Path the file was opened with.
    fn name(&self) -> &Path;

    /// Read into `buf` from the cursor. Fails with `EndOfStream` once the
    /// cursor is at or past the end; an empty `buf` reads nothing.
    fn read(&mut self, buf: &mut [u8]) -> Result<usize>;

    fn write(&mut self, buf: &[u8]) -> Result<usize>;

    /// Move the cursor and return the new absolute position.
    fn seek(&mut self, offset: i64, whence: Whence) -> Result<u64>;

    fn close(&mut self) -> Result<()>;
}

impl std::fmt::Debug for dyn File + '_ {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("File").field("name", &self.name()).finish()
    }
}

impl<F: File + ?Sized> File for Box<F> {
    fn name(&self) -> &Path {
        (**self).name()
    }

    fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        (**self).read(buf)
    }

    fn write(&mut self, buf: &[u8]) -> Result<usize> {
        (**self).write(buf)
    }

    fn seek(&mut self, offset: i64, whence: Whence) -> Result<u64> {
        (**self).seek(offset, whence)
    }

    fn close(&mut self) -> Result<()> {
        (**self).close()
    }
}

/// Wraps a file and rejects every write with `ReadOnly`.
pub struct ReadOnlyFile<F> {
    delegate: F,
}

impl<F: File> ReadOnlyFile<F> {
    pub fn new(delegate: F) -> Self {
        Self { delegate }
    }

    pub fn into_inner(self) -> F {
        self.delegate
    }
}

impl<F: File> File for ReadOnlyFile<F> {
    fn name(&self) -> &Path {
        self.delegate.name()
    }

    fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        self.delegate.read(buf)
    }

    fn write(&mut self, _buf: &[u8]) -> Result<usize> {
        Err(Error::new("write", self.delegate.name(), ErrorKind::ReadOnly))
    }

    fn seek(&mut self, offset: i64, whence: Whence) -> Result<u64> {
        self.delegate.seek(offset, whence)
    }

    fn close(&mut self) -> Result<()> {
        self.delegate.close()
    }
}

/// Wraps a file and rejects every read with `WriteOnly`.
pub struct WriteOnlyFile<F> {
    delegate: F,
}

impl<F: File> WriteOnlyFile<F> {
    pub fn new(delegate: F) -> Self {
        Self { delegate }
    }

    pub fn into_inner(self) -> F {
        self.delegate
    }
}

impl<F: File> File for WriteOnlyFile<F> {
    fn name(&self) -> &Path {
        self.delegate.name()
    }

    fn read(&mut self, _buf: &mut [u8]) -> Result<usize> {
        Err(Error::new("read", self.delegate.name(), ErrorKind::WriteOnly))
    }

    fn write(&mut self, buf: &[u8]) -> Result<usize> {
        self.delegate.write(buf)
    }

    fn seek(&mut self, offset: i64, whence: Whence) -> Result<u64> {
        self.delegate.seek(offset, whence)
    }

    fn close(&mut self) -> Result<()> {
        self.delegate.close()
    }
}
