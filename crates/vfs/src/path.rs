use crate::error::{Error, Result};
use std::fmt;
use std::path::{Component, Path, PathBuf};

pub const SEPARATOR: char = '/';

/// Where a cleaned path starts resolving from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    Root,
    WorkingDir,
}

/// A path split into normalized segments relative to an anchor.
///
/// `/` is `Root` with no segments, `.` is `WorkingDir` with no segments,
/// `a/b` and `./a/b` are `WorkingDir` with `["a", "b"]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanPath {
    anchor: Anchor,
    segments: Vec<String>,
}

impl CleanPath {
    /// Clean `path`: trim whitespace, drop empty and `.` components and
    /// trailing separators, collapse `name/..`. A `..` above `/` stays at `/`;
    /// a relative path climbing above the working directory is rejected as
    /// not found, since that parent is never reachable. Names must be UTF-8.
    pub fn parse<P: AsRef<Path>>(op: &'static str, path: P) -> Result<Self> {
        let original = path.as_ref();
        let text = original
            .to_str()
            .ok_or_else(|| Error::invalid_argument(op, original))?;
        let trimmed = Path::new(text.trim());

        let mut anchor = Anchor::WorkingDir;
        let mut segments: Vec<String> = Vec::new();

        for component in trimmed.components() {
            match component {
                Component::RootDir => {
                    anchor = Anchor::Root;
                    segments.clear();
                }
                Component::CurDir => {}
                Component::ParentDir => {
                    if segments.pop().is_none() && anchor == Anchor::WorkingDir {
                        return Err(Error::not_found(op, original));
                    }
                }
                Component::Normal(name) => {
                    let name = name
                        .to_str()
                        .ok_or_else(|| Error::invalid_argument(op, original))?;
                    segments.push(name.to_string());
                }
                Component::Prefix(_) => return Err(Error::invalid_argument(op, original)),
            }
        }

        Ok(Self { anchor, segments })
    }

    #[must_use]
    pub fn anchor(&self) -> Anchor {
        self.anchor
    }

    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Split off the final segment: (`dir` segments, base name).
    #[must_use]
    pub fn split_last(&self) -> Option<(&[String], &str)> {
        self.segments
            .split_last()
            .map(|(base, dir)| (dir, base.as_str()))
    }
}

impl fmt::Display for CleanPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.anchor, self.segments.is_empty()) {
            (Anchor::Root, true) => write!(f, "{}", SEPARATOR),
            (Anchor::WorkingDir, true) => write!(f, "."),
            (Anchor::Root, false) => {
                for seg in &self.segments {
                    write!(f, "{}{}", SEPARATOR, seg)?;
                }
                Ok(())
            }
            (Anchor::WorkingDir, false) => {
                write!(f, "{}", self.segments.join(&SEPARATOR.to_string()))
            }
        }
    }
}

/// Join a child name onto a directory path with `sep`, without doubling
/// the separator when `dir` already ends in one.
/// `dir` is kept byte for byte.
pub fn join<P: AsRef<Path>>(dir: P, name: &str, sep: char) -> PathBuf {
    let dir = dir.as_ref().as_os_str();
    let sep = sep.to_string();
    let mut joined = dir.to_os_string();
    if !dir.as_encoded_bytes().ends_with(sep.as_bytes()) {
        joined.push(&sep);
    }
    joined.push(name);
    PathBuf::from(joined)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn segs(p: &CleanPath) -> Vec<&str> {
        p.segments().iter().map(String::as_str).collect()
    }

    #[test]
    fn test_parse_anchors() {
        let root = CleanPath::parse("t", "/").unwrap();
        assert_eq!(root.anchor(), Anchor::Root);
        assert!(root.segments().is_empty());

        let wd = CleanPath::parse("t", ".").unwrap();
        assert_eq!(wd.anchor(), Anchor::WorkingDir);
        assert!(wd.segments().is_empty());

        let empty = CleanPath::parse("t", "").unwrap();
        assert_eq!(empty, wd);
    }

    #[test]
    fn test_parse_segments() {
        let p = CleanPath::parse("t", "/usr/src/linux/").unwrap();
        assert_eq!(p.anchor(), Anchor::Root);
        assert_eq!(segs(&p), ["usr", "src", "linux"]);

        let p = CleanPath::parse("t", "./file").unwrap();
        assert_eq!(p.anchor(), Anchor::WorkingDir);
        assert_eq!(segs(&p), ["file"]);

        let p = CleanPath::parse("t", "file").unwrap();
        assert_eq!(p, CleanPath::parse("t", "./file").unwrap());

        let p = CleanPath::parse("t", "  /a//b/./c/../d  ").unwrap();
        assert_eq!(segs(&p), ["a", "b", "d"]);
    }

    #[test]
    fn test_parent_dir_handling() {
        let p = CleanPath::parse("t", "/../a").unwrap();
        assert_eq!(p.to_string(), "/a");

        let p = CleanPath::parse("t", "a/../b").unwrap();
        assert_eq!(p.to_string(), "b");

        let err = CleanPath::parse("stat", "../escape").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(err.op(), "stat");
    }

    #[test]
    fn test_split_last() {
        let p = CleanPath::parse("t", "/a/b/c").unwrap();
        let (dir, base) = p.split_last().unwrap();
        assert_eq!(dir, ["a".to_string(), "b".to_string()]);
        assert_eq!(base, "c");
        assert!(CleanPath::parse("t", "/").unwrap().split_last().is_none());
    }

    #[test]
    fn test_join() {
        assert_eq!(join("/", "a", '/'), PathBuf::from("/a"));
        assert_eq!(join("/a", "b", '/'), PathBuf::from("/a/b"));
        assert_eq!(join("rel", "b", '/'), PathBuf::from("rel/b"));
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_is_rejected() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        for raw in [&b"/\xff"[..], b"/ok/\xfe", b"\xc3"] {
            let path = Path::new(OsStr::from_bytes(raw));
            let err = CleanPath::parse("open", path).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidArgument);
            assert_eq!(err.path(), path);
        }

        let dir = Path::new(OsStr::from_bytes(b"/\xff"));
        let joined = join(dir, "a", '/');
        assert_eq!(joined.as_os_str().as_bytes(), b"/\xff/a");
    }
}
