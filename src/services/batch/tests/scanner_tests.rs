use super::*;
use crate::test_utils::{capture_logger, test_logger};
use crate::types::events::LogKind;
use std::fs;
use tempfile::TempDir;

#[tokio::test]
async fn finds_top_level_and_one_level_nested_archives() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("a.zip"), "x").unwrap();
    fs::create_dir(dir.path().join("sub")).unwrap();
    fs::write(dir.path().join("sub/b.zip"), "x").unwrap();
    fs::create_dir_all(dir.path().join("sub/deep")).unwrap();
    fs::write(dir.path().join("sub/deep/c.zip"), "x").unwrap();

    let mut found = find_archives(dir.path(), &test_logger()).await;
    found.sort();

    assert_eq!(
        found,
        vec![PathBuf::from("a.zip"), PathBuf::from("sub/b.zip")]
    );
}

#[tokio::test]
async fn extension_match_is_case_insensitive() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("UPPER.ZIP"), "x").unwrap();
    fs::write(dir.path().join("notes.txt"), "x").unwrap();

    let found = find_archives(dir.path(), &test_logger()).await;
    assert_eq!(found, vec![PathBuf::from("UPPER.ZIP")]);
}

#[tokio::test]
async fn a_directory_named_like_an_archive_is_scanned_not_returned() {
    let dir = TempDir::new().unwrap();
    fs::create_dir(dir.path().join("folder.zip")).unwrap();
    fs::write(dir.path().join("folder.zip/inner.zip"), "x").unwrap();

    let found = find_archives(dir.path(), &test_logger()).await;
    assert_eq!(found, vec![PathBuf::from("folder.zip/inner.zip")]);
}

#[tokio::test]
async fn missing_root_yields_empty_and_an_error_event() {
    let (logger, events) = capture_logger();

    let found = find_archives(Path::new("/nonexistent/rezip-scan"), &logger).await;

    assert!(found.is_empty());
    let events = events.lock().unwrap();
    assert!(events.iter().any(|event| event.kind == LogKind::Error));
}
