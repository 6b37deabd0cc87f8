use super::{FaultyFs, make_tree, p};
use crate::{
    Error, ErrorKind, FileInfo, Filesystem, MemFs, OpenFlags, WalkAction, mkdir_all, walk, walk_paths,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// One callback invocation.
#[derive(Debug)]
struct Visit {
    path: PathBuf,
    info: Option<FileInfo>,
    err: Option<ErrorKind>,
}

fn record<F: Filesystem + ?Sized>(
    fs: &F,
    root: &Path,
    mut decide: impl FnMut(&Path, Option<&FileInfo>, Option<Error>) -> crate::Result<WalkAction>,
) -> (crate::Result<()>, Vec<Visit>) {
    let mut visits = Vec::new();
    let result = walk(fs, root, |path, info, err| {
        visits.push(Visit {
            path: path.to_path_buf(),
            info: info.cloned(),
            err: err.as_ref().map(Error::kind),
        });
        decide(path, info, err)
    });
    (result, visits)
}

fn paths(visits: &[Visit]) -> Vec<PathBuf> {
    visits.iter().map(|v| v.path.clone()).collect()
}

fn continue_all(_: &Path, _: Option<&FileInfo>, err: Option<Error>) -> crate::Result<WalkAction> {
    match err {
        Some(err) => Err(err),
        None => Ok(WalkAction::Continue),
    }
}

#[test]
fn test_walk_visits_every_node_once() {
    let fs = MemFs::new();
    let expected = make_tree(&fs, p(""));

    let (result, visits) = record(&fs, p("testdata"), continue_all);
    result.unwrap();

    assert_eq!(paths(&visits), expected);
    assert_eq!(visits[0].path, p("testdata"));
    assert!(visits.iter().all(|v| v.info.is_some() && v.err.is_none()));
}

#[test]
fn test_walk_from_absolute_root() {
    let fs = MemFs::new();
    make_tree(&fs, p("/"));

    let visited = walk_paths(&fs, p("/")).unwrap();
    assert_eq!(visited[0], p("/"));
    assert_eq!(visited[1], p("/testdata"));
    assert_eq!(visited[2], p("/testdata/a"));
    assert_eq!(visited.len(), 11);
}

#[test]
fn test_skip_on_directory_prunes_only_that_directory() {
    let fs = MemFs::new();
    make_tree(&fs, p(""));

    let (result, visits) = record(&fs, p("testdata"), |path, _, _| {
        if path == p("testdata/d") {
            Ok(WalkAction::Skip)
        } else {
            Ok(WalkAction::Continue)
        }
    });
    result.unwrap();

    let expected: Vec<PathBuf> = ["testdata", "testdata/a", "testdata/b", "testdata/c", "testdata/d"]
        .iter()
        .map(PathBuf::from)
        .collect();
    assert_eq!(paths(&visits), expected);
}

#[test]
fn test_skip_on_nested_directory_resumes_with_sibling() {
    let fs = MemFs::new();
    make_tree(&fs, p(""));

    let (result, visits) = record(&fs, p("testdata"), |path, _, _| {
        if path == p("testdata/b") {
            Ok(WalkAction::Skip)
        } else {
            Ok(WalkAction::Continue)
        }
    });
    result.unwrap();
    assert_eq!(visits.len(), 10);
}

#[test]
fn test_skip_on_file_skips_remaining_siblings() {
    let fs = MemFs::new();
    mkdir_all(&fs, p("/walk/dir"), 0o755).unwrap();
    for name in ["/walk/dir/foo1", "/walk/dir/foo2", "/walk/last"] {
        fs.open_file(p(name), OpenFlags::CREATE, 0o644).unwrap();
    }

    let (result, visits) = record(&fs, p("/walk"), |path, _, _| {
        if path.ends_with("foo1") {
            Ok(WalkAction::Skip)
        } else {
            Ok(WalkAction::Continue)
        }
    });
    result.unwrap();

    let seen = paths(&visits);
    assert!(!seen.iter().any(|s| s.ends_with("foo2")));
    // The skip is absorbed by "dir"; its parent carries on.
    assert!(seen.contains(&PathBuf::from("/walk/last")));
}

#[test]
fn test_skip_on_root_file_is_clean() {
    let fs = MemFs::new();
    fs.create(p("/lonely")).unwrap();
    let (result, visits) = record(&fs, p("/lonely"), |_, _, _| Ok(WalkAction::Skip));
    result.unwrap();
    assert_eq!(visits.len(), 1);
}

#[test]
fn test_lstat_error_is_reported_and_swallowed() {
    let mut fs = FaultyFs::new(MemFs::new());
    make_tree(&fs, p(""));
    fs.fail_lstat.insert(PathBuf::from("testdata/b"));
    fs.fail_lstat.insert(PathBuf::from("testdata/d"));

    let (result, visits) = record(&fs, p("testdata"), |_, _, _| Ok(WalkAction::Continue));
    result.unwrap();

    let failed: Vec<&Visit> = visits.iter().filter(|v| v.err.is_some()).collect();
    assert_eq!(failed.len(), 2);
    assert!(failed.iter().all(|v| v.info.is_none()));
    assert_eq!(failed[0].err, Some(ErrorKind::PermissionDenied));

    // b and d are reported once each; nothing below d is visited.
    assert_eq!(
        paths(&visits),
        ["testdata", "testdata/a", "testdata/b", "testdata/c", "testdata/d"]
            .iter()
            .map(PathBuf::from)
            .collect::<Vec<_>>()
    );
}

#[test]
fn test_lstat_error_returned_by_callback_stops_walk() {
    let mut fs = FaultyFs::new(MemFs::new());
    make_tree(&fs, p(""));
    fs.fail_lstat.insert(PathBuf::from("testdata/b"));
    fs.fail_lstat.insert(PathBuf::from("testdata/d"));

    let (result, visits) = record(&fs, p("testdata"), continue_all);
    let err = result.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::PermissionDenied);
    assert_eq!(err.path(), p("testdata/b"));
    assert_eq!(visits.last().map(|v| v.path.clone()), Some(PathBuf::from("testdata/b")));
}

#[test]
fn test_read_dir_error_is_passed_with_directory() {
    let mut fs = FaultyFs::new(MemFs::new());
    make_tree(&fs, p(""));
    fs.fail_read_dir.insert(PathBuf::from("testdata/d"));

    let (result, visits) = record(&fs, p("testdata"), |_, _, _| Ok(WalkAction::Continue));
    result.unwrap();

    let d = visits
        .iter()
        .find(|v| v.path == p("testdata/d"))
        .unwrap();
    assert!(d.info.as_ref().is_some_and(FileInfo::is_dir));
    assert_eq!(d.err, Some(ErrorKind::PermissionDenied));
    assert!(
        !visits
            .iter()
            .any(|v| v.path.starts_with("testdata/d") && v.path != p("testdata/d"))
    );
}

#[test]
fn test_missing_root() {
    let fs = MemFs::new();

    let (result, visits) = record(&fs, p("/missing"), |_, _, _| Ok(WalkAction::Skip));
    result.unwrap();
    assert_eq!(visits.len(), 1);
    assert!(visits[0].info.is_none());
    assert_eq!(visits[0].err, Some(ErrorKind::NotFound));

    let (result, _) = record(&fs, p("/missing"), continue_all);
    assert!(result.unwrap_err().is_not_found());
}

#[test]
fn test_callback_error_aborts() {
    let fs = MemFs::new();
    make_tree(&fs, p(""));

    let (result, visits) = record(&fs, p("testdata"), |path, _, _| {
        if path == p("testdata/c") {
            Err(Error::new("visit", path, ErrorKind::Other))
        } else {
            Ok(WalkAction::Continue)
        }
    });
    assert_eq!(result.unwrap_err().op(), "visit");
    assert_eq!(visits.len(), 4);
}

#[test]
fn test_walk_through_shared_handles() {
    let fs = Arc::new(MemFs::new());
    make_tree(&*fs, p(""));

    let boxed: Box<dyn Filesystem> = Box::new(Arc::clone(&fs));
    assert_eq!(walk_paths(&boxed, p("testdata")).unwrap().len(), 10);
    assert_eq!(walk_paths(&&*fs, p("testdata")).unwrap().len(), 10);
}
