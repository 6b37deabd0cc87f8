use std::path::{Path, PathBuf};

pub type Result<T> = std::result::Result<T, Error>;

type Source = Box<dyn std::error::Error + Send + Sync + 'static>;

/// The kinds of failure a filesystem operation can report.
///
/// Callers match on the kind, never on the message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
pub enum ErrorKind {
    #[error("no such file or directory")]
    NotFound,
    #[error("entry already exists")]
    AlreadyExists,
    #[error("is a directory")]
    IsDirectory,
    #[error("not a directory")]
    NotADirectory,
    #[error("directory not empty")]
    DirectoryNotEmpty,
    #[error("file is read-only")]
    ReadOnly,
    #[error("file is write-only")]
    WriteOnly,
    #[error("invalid argument")]
    InvalidArgument,
    #[error("resource exhausted")]
    ResourceExhausted,
    /// A read found no more bytes. Not a failure of the handle.
    #[error("end of stream")]
    EndOfStream,
    #[error("permission denied")]
    PermissionDenied,
    #[error("other error")]
    Other,
}

/// An operation failure: which operation, on which path, and why.
#[derive(Debug, thiserror::Error)]
#[error("{op} {}: {kind}", .path.display())]
pub struct Error {
    op: &'static str,
    path: PathBuf,
    kind: ErrorKind,
    #[source]
    source: Option<Source>,
}

impl Error {
    pub fn new<P: AsRef<Path>>(op: &'static str, path: P, kind: ErrorKind) -> Self {
        Self {
            op,
            path: path.as_ref().to_path_buf(),
            kind,
            source: None,
        }
    }

    /// Attach the lower-level error that caused this one.
    pub fn with_source<E>(mut self, source: E) -> Self
    where
        E: Into<Source>,
    {
        self.source = Some(source.into());
        self
    }

    pub fn not_found<P: AsRef<Path>>(op: &'static str, path: P) -> Self {
        Self::new(op, path, ErrorKind::NotFound)
    }

    pub fn already_exists<P: AsRef<Path>>(op: &'static str, path: P) -> Self {
        Self::new(op, path, ErrorKind::AlreadyExists)
    }

    pub fn is_directory<P: AsRef<Path>>(op: &'static str, path: P) -> Self {
        Self::new(op, path, ErrorKind::IsDirectory)
    }

    pub fn not_a_directory<P: AsRef<Path>>(op: &'static str, path: P) -> Self {
        Self::new(op, path, ErrorKind::NotADirectory)
    }

    pub fn invalid_argument<P: AsRef<Path>>(op: &'static str, path: P) -> Self {
        Self::new(op, path, ErrorKind::InvalidArgument)
    }

    pub fn end_of_stream<P: AsRef<Path>>(path: P) -> Self {
        Self::new("read", path, ErrorKind::EndOfStream)
    }

    /// Wrap an error from the host OS, keeping it as the source.
    pub fn from_io<P: AsRef<Path>>(op: &'static str, path: P, err: std::io::Error) -> Self {
        let kind = ErrorKind::from(err.kind());
        Self::new(op, path, kind).with_source(err)
    }

    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    #[must_use]
    pub fn op(&self) -> &'static str {
        self.op
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn is_eof(&self) -> bool {
        self.kind == ErrorKind::EndOfStream
    }

    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.kind == ErrorKind::NotFound
    }
}

impl From<std::io::ErrorKind> for ErrorKind {
    fn from(kind: std::io::ErrorKind) -> Self {
        use std::io::ErrorKind as Io;
        match kind {
            Io::NotFound => ErrorKind::NotFound,
            Io::AlreadyExists => ErrorKind::AlreadyExists,
            Io::IsADirectory => ErrorKind::IsDirectory,
            Io::NotADirectory => ErrorKind::NotADirectory,
            Io::DirectoryNotEmpty => ErrorKind::DirectoryNotEmpty,
            Io::PermissionDenied | Io::ReadOnlyFilesystem => ErrorKind::PermissionDenied,
            Io::InvalidInput => ErrorKind::InvalidArgument,
            Io::OutOfMemory | Io::StorageFull => ErrorKind::ResourceExhausted,
            Io::UnexpectedEof => ErrorKind::EndOfStream,
            _ => ErrorKind::Other,
        }
    }
}

impl From<ErrorKind> for std::io::ErrorKind {
    fn from(kind: ErrorKind) -> Self {
        use std::io::ErrorKind as Io;
        match kind {
            ErrorKind::NotFound => Io::NotFound,
            ErrorKind::AlreadyExists => Io::AlreadyExists,
            ErrorKind::IsDirectory => Io::IsADirectory,
            ErrorKind::NotADirectory => Io::NotADirectory,
            ErrorKind::DirectoryNotEmpty => Io::DirectoryNotEmpty,
            ErrorKind::ReadOnly | ErrorKind::WriteOnly | ErrorKind::PermissionDenied => {
                Io::PermissionDenied
            }
            ErrorKind::InvalidArgument => Io::InvalidInput,
            ErrorKind::ResourceExhausted => Io::OutOfMemory,
            ErrorKind::EndOfStream => Io::UnexpectedEof,
            ErrorKind::Other => Io::Other,
        }
    }
}

impl From<Error> for std::io::Error {
    fn from(err: Error) -> Self {
        std::io::Error::new(err.kind.into(), err)
    }
}
