//! Move integration tests
//!
//! Runs whole moves against the in-memory filesystem and against a temporary
//! directory on disk.

use modmove_core::{
    DiskFs, FileSystem, MemoryFs, ModmoveError, MoveStep, Mover, find_dependents,
};
use std::path::Path;
use tempfile::tempdir;

#[tokio::test]
async fn test_move_file_from_one_place_to_another() {
    let from = Path::new("/test/move/a.js");
    let to = Path::new("/test/move/b.js");

    let fs = MemoryFs::new();
    fs.write(from, "some text").await.unwrap();

    let mover = Mover::new(fs);
    mover.move_file(from, to).await.unwrap();

    assert_eq!(mover.fs().read(to).await.unwrap(), "some text");
    match mover.fs().read(from).await {
        Err(ModmoveError::NotFound(path)) => assert_eq!(path, from),
        other => panic!("expected NotFound, got {:?}", other),
    }
}

#[tokio::test]
async fn test_move_fixes_required_dependencies() {
    let from = Path::new("/test/move/parse/a.js");
    let to = Path::new("/test/move/b.js");

    let contents = [
        r#"require("./foo");"#,
        r#"require("../bar");"#,
        r#"require("../../qux");"#,
    ]
    .join("\n");
    let expected = [
        r#"require("./parse/foo");"#,
        r#"require("./bar");"#,
        r#"require("../qux");"#,
    ]
    .join("\n");

    let fs = MemoryFs::new();
    fs.insert(from, contents);
    let mover = Mover::new(fs);

    let outcome = mover.move_file(from, to).await.unwrap();
    assert_eq!(outcome.changes.len(), 3);
    assert_eq!(mover.fs().get(to).as_deref(), Some(expected.as_str()));
    assert!(!mover.fs().contains(from));
}

#[tokio::test]
async fn test_same_directory_rename_keeps_requires() {
    let contents = r#"const a = require("./a"); const b = require('../b/c');"#;

    let fs = MemoryFs::new();
    fs.insert("/p/lib/old.js", contents);
    let mover = Mover::new(fs);

    let outcome = mover
        .move_file(Path::new("/p/lib/old.js"), Path::new("/p/lib/new.js"))
        .await
        .unwrap();

    assert!(outcome.changes.is_empty());
    assert_eq!(mover.fs().get(Path::new("/p/lib/new.js")).as_deref(), Some(contents));
}

#[tokio::test]
async fn test_missing_source_fails_before_any_write() {
    let mover = Mover::new(MemoryFs::new());

    let err = mover
        .move_file(Path::new("/test/move/missing.js"), Path::new("/test/move/b.js"))
        .await
        .unwrap_err();

    assert_eq!(err.step(), Some(MoveStep::Read));
    assert!(matches!(err.root(), ModmoveError::NotFound(p) if p == Path::new("/test/move/missing.js")));
    assert!(!mover.fs().contains(Path::new("/test/move/b.js")));
}

#[tokio::test]
async fn test_failed_write_keeps_original() {
    let fs = MemoryFs::new();
    fs.insert("/p/a.js", "keep me");
    fs.deny_write("/p/b.js");
    let mover = Mover::new(fs);

    let err = mover
        .move_file(Path::new("/p/a.js"), Path::new("/p/b.js"))
        .await
        .unwrap_err();

    assert_eq!(err.step(), Some(MoveStep::Write));
    assert!(matches!(err.root(), ModmoveError::Io { .. }));
    assert_eq!(mover.fs().get(Path::new("/p/a.js")).as_deref(), Some("keep me"));
    assert!(!mover.fs().contains(Path::new("/p/b.js")));
}

#[tokio::test]
async fn test_failed_delete_leaves_duplicate() {
    let fs = MemoryFs::new();
    fs.insert("/p/sub/a.js", r#"require("./x");"#);
    fs.deny_remove("/p/sub/a.js");
    let mover = Mover::new(fs);

    let err = mover
        .move_file(Path::new("/p/sub/a.js"), Path::new("/p/a.js"))
        .await
        .unwrap_err();

    assert_eq!(err.step(), Some(MoveStep::Delete));
    assert!(mover.fs().contains(Path::new("/p/sub/a.js")));
    assert_eq!(
        mover.fs().get(Path::new("/p/a.js")).as_deref(),
        Some(r#"require("./sub/x");"#)
    );
}

#[tokio::test]
async fn test_move_on_disk() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    std::fs::create_dir_all(root.join("lib/parse")).unwrap();
    std::fs::write(
        root.join("lib/parse/a.js"),
        "var foo = require('./foo');\nvar _ = require('lodash');\n",
    )
    .unwrap();
    std::fs::write(root.join("index.js"), "require('./lib/parse/a');\n").unwrap();

    let mover = Mover::new(DiskFs::default());
    let from = root.join("lib/parse/a.js");
    let to = root.join("lib/a.js");
    mover.move_file(&from, &to).await.unwrap();

    assert!(!from.exists());
    assert_eq!(
        std::fs::read_to_string(&to).unwrap(),
        "var foo = require('./parse/foo');\nvar _ = require('lodash');\n"
    );

    // The requiring file is reported, not rewritten.
    let stale = find_dependents(mover.fs(), root, &from).await.unwrap();
    assert_eq!(stale.len(), 1);
    assert_eq!(stale[0].file, root.join("index.js"));
    assert_eq!(stale[0].specifier, "./lib/parse/a");
}

#[tokio::test]
async fn test_move_into_missing_directory_on_disk() {
    let dir = tempdir().unwrap();
    let from = dir.path().join("a.js");
    std::fs::write(&from, "x").unwrap();

    let mover = Mover::new(DiskFs::default());
    let err = mover
        .move_file(&from, &dir.path().join("missing/a.js"))
        .await
        .unwrap_err();

    assert_eq!(err.step(), Some(MoveStep::Write));
    assert!(from.exists());
}

#[tokio::test]
async fn test_scan_skips_non_utf8_files() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    std::fs::write(root.join("a.js"), "module.exports = 1;\n").unwrap();
    std::fs::write(root.join("index.js"), "require('./a');\n").unwrap();
    std::fs::write(root.join("latin1.js"), [0x63, 0xff, 0xfe]).unwrap();

    let mover = Mover::new(DiskFs::default());
    let from = root.join("a.js");
    mover.move_file(&from, &root.join("b.js")).await.unwrap();

    let stale = find_dependents(mover.fs(), root, &from).await.unwrap();
    assert_eq!(stale.len(), 1);
    assert_eq!(stale[0].file, root.join("index.js"));
}
