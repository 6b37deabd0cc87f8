use crate::error::{Error, Result};
use crate::file::File;
use crate::flags::Whence;
use crate::memory::buffer::Buffer;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Read-write handle over an in-memory file's content.
///
/// The content and its lock are shared with every other handle on the same
/// node; the cursor is private to this handle. A `MemFile` itself is not
/// meant to be shared between threads: open one per thread instead.
#[derive(Debug)]
pub struct MemFile {
    name: PathBuf,
    buffer: Arc<Buffer>,
    cursor: u64,
}

impl MemFile {
    pub(crate) fn new(name: PathBuf, buffer: Arc<Buffer>) -> Self {
        Self {
            name,
            buffer,
            cursor: 0,
        }
    }

    #[must_use]
    pub fn position(&self) -> u64 {
        self.cursor
    }
}

impl File for MemFile {
    fn name(&self) -> &Path {
        &self.name
    }

    fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }
        let n = self.buffer.read_at(self.cursor, buf);
        if n == 0 {
            return Err(Error::end_of_stream(&self.name));
        }
        self.cursor += n as u64;
        Ok(n)
    }

    fn write(&mut self, buf: &[u8]) -> Result<usize> {
        let n = self
            .buffer
            .write_at(self.cursor, buf)
            .map_err(|kind| Error::new("write", &self.name, kind))?;
        self.cursor += n as u64;
        Ok(n)
    }

    fn seek(&mut self, offset: i64, whence: Whence) -> Result<u64> {
        let len = self.buffer.len();
        let base = match whence {
            Whence::Start => 0,
            Whence::Current => self.cursor,
            Whence::End => len,
        };
        let target = i128::from(base) + i128::from(offset);
        // Unlike host files, positions past the end are refused.
        if target < 0 || target > i128::from(len) {
            return Err(Error::invalid_argument("seek", &self.name));
        }
        self.cursor = target as u64;
        Ok(self.cursor)
    }

    fn close(&mut self) -> Result<()> {
        Ok(())
    }
}

impl io::Read for MemFile {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match File::read(self, buf) {
            Err(e) if e.is_eof() => Ok(0),
            other => other.map_err(io::Error::from),
        }
    }
}

impl io::Write for MemFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        File::write(self, buf).map_err(io::Error::from)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl io::Seek for MemFile {
    fn seek(&mut self, pos: io::SeekFrom) -> io::Result<u64> {
        let (offset, whence) = match pos {
            io::SeekFrom::Start(n) => (
                i64::try_from(n).map_err(|_| io::Error::from(io::ErrorKind::InvalidInput))?,
                Whence::Start,
            ),
            io::SeekFrom::Current(n) => (n, Whence::Current),
            io::SeekFrom::End(n) => (n, Whence::End),
        };
        File::seek(self, offset, whence).map_err(io::Error::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::memory::buffer::MIN_BUFFER_SIZE;
    use std::io::{Read, Seek, SeekFrom, Write};

    fn pair() -> (MemFile, MemFile) {
        let buffer = Arc::new(Buffer::new(MIN_BUFFER_SIZE));
        (
            MemFile::new("/f".into(), buffer.clone()),
            MemFile::new("/f".into(), buffer),
        )
    }

    #[test]
    fn test_round_trip() {
        let (mut f, _) = pair();
        assert_eq!(File::write(&mut f, b"hello world").unwrap(), 11);
        assert_eq!(File::seek(&mut f, 0, Whence::Start).unwrap(), 0);
        let mut out = [0u8; 11];
        assert_eq!(File::read(&mut f, &mut out).unwrap(), 11);
        assert_eq!(&out, b"hello world");
    }

    #[test]
    fn test_seek_bounds() {
        let (mut f, _) = pair();
        File::write(&mut f, b"...").unwrap();

        let err = File::seek(&mut f, -1, Whence::Start).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        let err = File::seek(&mut f, 1, Whence::End).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);

        assert_eq!(File::seek(&mut f, 0, Whence::End).unwrap(), 3);
        assert_eq!(File::seek(&mut f, -2, Whence::Current).unwrap(), 1);
    }

    #[test]
    fn test_read_at_end_is_end_of_stream() {
        let (mut f, _) = pair();
        File::write(&mut f, b"abc").unwrap();
        let mut out = [0u8; 4];
        let err = File::read(&mut f, &mut out).unwrap_err();
        assert!(err.is_eof());
        assert_eq!(f.position(), 3);

        // Empty reads are not EOF
        assert_eq!(File::read(&mut f, &mut []).unwrap(), 0);
    }

    #[test]
    fn test_handles_share_content_not_cursor() {
        let (mut v1, mut v2) = pair();
        File::write(&mut v1, b"...").unwrap();

        let mut p = [0u8; 3];
        assert_eq!(File::read(&mut v2, &mut p).unwrap(), 3);
        assert_eq!(&p, b"...");

        File::write(&mut v2, b"abc").unwrap();
        assert_eq!(File::read(&mut v1, &mut p).unwrap(), 3);
        assert_eq!(&p, b"abc");
    }

    #[test]
    fn test_std_io_traits() {
        let (mut f, _) = pair();
        f.write_all(b"std io").unwrap();
        Seek::seek(&mut f, SeekFrom::Start(0)).unwrap();
        let mut s = String::new();
        f.read_to_string(&mut s).unwrap();
        assert_eq!(s, "std io");
    }
}
