use super::*;
use crate::test_utils::{capture_logger, test_logger, write_fake_archive, FakeArchiver};
use crate::types::events::LogKind;
use std::fs;
use std::path::Path;
use std::sync::Mutex;
use tempfile::TempDir;

fn config_for(input: &Path) -> BatchConfig {
    BatchConfig {
        suffix: "_done".into(),
        input_path: input.to_path_buf(),
        ..BatchConfig::default()
    }
}

/// Fixture tree whose single non-matching subdirectory is the payload.
fn simple_fixture(fixtures: &TempDir) -> PathBuf {
    let tree = fixtures.path().join("tree");
    fs::create_dir_all(tree.join("Payload")).unwrap();
    fs::write(tree.join("Payload/data.txt"), "x").unwrap();
    tree
}

#[tokio::test]
async fn empty_input_is_success_with_only_the_probe() {
    let input = TempDir::new().unwrap();
    let archiver = Arc::new(FakeArchiver::new());
    let runner =
        BatchRunner::with_archiver(config_for(input.path()), test_logger(), archiver.clone());

    let result = runner.run().await;

    assert!(result.success);
    assert_eq!(archiver.call_count(), 1, "only the availability probe ran");
}

#[tokio::test]
async fn unavailable_archiver_fails_the_run_before_any_job() {
    let input = TempDir::new().unwrap();
    fs::write(input.path().join("a.zip"), "x").unwrap();

    let archiver = Arc::new(FakeArchiver::unavailable());
    let runner =
        BatchRunner::with_archiver(config_for(input.path()), test_logger(), archiver.clone());

    let result = runner.run().await;

    assert!(!result.success);
    assert_eq!(archiver.call_count(), 1);
}

#[tokio::test]
async fn missing_input_path_fails_the_run() {
    let config = config_for(Path::new("/nonexistent/rezip-run"));
    let archiver = Arc::new(FakeArchiver::new());
    let runner = BatchRunner::with_archiver(config, test_logger(), archiver);

    assert!(!runner.run().await.success);
}

#[tokio::test]
async fn one_failure_does_not_stop_the_batch() {
    let fixtures = TempDir::new().unwrap();
    let tree = simple_fixture(&fixtures);

    let input = TempDir::new().unwrap();
    write_fake_archive(&input.path().join("a.zip"), &tree);
    write_fake_archive(&input.path().join("b.zip"), &tree);
    write_fake_archive(&input.path().join("c.zip"), &tree);

    let archiver = Arc::new(FakeArchiver::failing_extract(&["b.zip"]));
    let runner =
        BatchRunner::with_archiver(config_for(input.path()), test_logger(), archiver.clone());

    let result = runner.run().await;

    assert!(!result.success);
    assert_eq!(result.message, "2 succeeded, 1 failed");
    assert_eq!(
        archiver.calls_matching("extract"),
        3,
        "every archive is attempted"
    );
}

#[tokio::test]
async fn a_panicking_job_counts_as_that_archives_failure() {
    let fixtures = TempDir::new().unwrap();
    let tree = simple_fixture(&fixtures);

    let input = TempDir::new().unwrap();
    write_fake_archive(&input.path().join("a.zip"), &tree);
    write_fake_archive(&input.path().join("b.zip"), &tree);

    let mut archiver = FakeArchiver::new();
    archiver.panic_extract.insert("a.zip".to_string());
    let archiver = Arc::new(archiver);

    let (logger, events) = capture_logger();
    let runner = BatchRunner::with_archiver(config_for(input.path()), logger, archiver.clone());

    let result = runner.run().await;

    assert!(!result.success);
    assert_eq!(result.message, "1 succeeded, 1 failed");
    let events = events.lock().unwrap();
    assert!(events
        .iter()
        .any(|event| event.kind == LogKind::Error && event.message.contains("crashed")));
}

#[tokio::test]
async fn stop_flag_prevents_scheduling_further_archives() {
    let fixtures = TempDir::new().unwrap();
    let tree = simple_fixture(&fixtures);

    let input = TempDir::new().unwrap();
    write_fake_archive(&input.path().join("a.zip"), &tree);
    write_fake_archive(&input.path().join("b.zip"), &tree);

    let archiver = Arc::new(FakeArchiver::new());

    // The sink flips the stop flag as soon as the first job reports
    // completion, so the second archive must never be scheduled.
    let stop_slot: Arc<Mutex<Option<Arc<AtomicBool>>>> = Arc::new(Mutex::new(None));
    let sink_slot = stop_slot.clone();
    let logger = BatchLogger::new(move |event| {
        if event.message.contains("Finished:") {
            if let Some(stop) = sink_slot.lock().unwrap().as_ref() {
                stop.store(true, Ordering::SeqCst);
            }
        }
    });

    let runner = BatchRunner::with_archiver(config_for(input.path()), logger, archiver.clone());
    *stop_slot.lock().unwrap() = Some(runner.stop_flag());

    let result = runner.run().await;

    assert!(result.success);
    assert_eq!(result.message, "1 succeeded, 0 failed");
    assert_eq!(archiver.calls_matching("extract"), 1);
}
