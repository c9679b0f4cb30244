//! Shared test fixtures: a scripted archiver double, tree helpers, and
//! event-capturing loggers.

use crate::services::archive::Archiver;
use crate::services::logger::BatchLogger;
use crate::types::events::LogEvent;
use async_trait::async_trait;
use std::collections::HashSet;
use std::path::Path;
use std::sync::{Arc, Mutex};

/// Archiver double with scripted outcomes.
///
/// Fake "archives" are plain text files whose content is the absolute
/// path of a fixture directory; `extract` copies that directory's
/// contents into the requested output, so orchestration code sees real
/// files appear exactly where a real extraction would put them.
/// Failures and panics are scripted per archive file name, and every call
/// is recorded for assertions.
pub struct FakeArchiver {
    pub available: bool,
    pub fail_extract: HashSet<String>,
    pub panic_extract: HashSet<String>,
    pub fail_create: bool,
    pub calls: Mutex<Vec<String>>,
}

impl FakeArchiver {
    pub fn new() -> Self {
        Self {
            available: true,
            fail_extract: HashSet::new(),
            panic_extract: HashSet::new(),
            fail_create: false,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing_extract(names: &[&str]) -> Self {
        let mut fake = Self::new();
        fake.fail_extract = names.iter().map(|name| name.to_string()).collect();
        fake
    }

    pub fn unavailable() -> Self {
        let mut fake = Self::new();
        fake.available = false;
        fake
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn calls_matching(&self, prefix: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|call| call.starts_with(prefix))
            .count()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

impl Default for FakeArchiver {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Archiver for FakeArchiver {
    async fn is_available(&self) -> bool {
        self.record("is_available".to_string());
        self.available
    }

    async fn extract(&self, archive: &Path, output_dir: &Path, password: Option<&str>) -> bool {
        let name = archive
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_default();
        self.record(format!(
            "extract {name} (password: {})",
            password.unwrap_or("-")
        ));

        if self.panic_extract.contains(&name) {
            panic!("scripted panic for {name}");
        }
        if self.fail_extract.contains(&name) {
            return false;
        }

        let fixture = std::fs::read_to_string(archive).expect("fake archive should be readable");
        copy_tree(Path::new(fixture.trim()), output_dir);
        true
    }

    async fn create(&self, source_dir: &Path, archive: &Path) -> bool {
        self.record(format!(
            "create {}",
            archive
                .file_name()
                .map(|name| name.to_string_lossy().to_string())
                .unwrap_or_default()
        ));

        if self.fail_create {
            return false;
        }

        // The produced "archive" lists the packaged entries so tests can
        // assert on content.
        let mut entries: Vec<String> = walkdir::WalkDir::new(source_dir)
            .min_depth(1)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .map(|entry| {
                entry
                    .path()
                    .strip_prefix(source_dir)
                    .unwrap()
                    .to_string_lossy()
                    .to_string()
            })
            .collect();
        entries.sort();
        std::fs::write(archive, entries.join("\n")).unwrap();
        true
    }
}

/// Copy `source`'s contents (not the directory itself) into `dest`.
pub fn copy_tree(source: &Path, dest: &Path) {
    for entry in walkdir::WalkDir::new(source).min_depth(1) {
        let entry = entry.unwrap();
        let relative = entry.path().strip_prefix(source).unwrap();
        let target = dest.join(relative);
        if entry.file_type().is_dir() {
            std::fs::create_dir_all(&target).unwrap();
        } else {
            if let Some(parent) = target.parent() {
                std::fs::create_dir_all(parent).unwrap();
            }
            std::fs::copy(entry.path(), &target).unwrap();
        }
    }
}

/// Write a fake archive file at `path` that extracts to a copy of
/// `fixture`.
pub fn write_fake_archive(path: &Path, fixture: &Path) {
    std::fs::write(path, fixture.to_string_lossy().as_bytes()).unwrap();
}

/// Logger capturing every event for assertions.
pub fn capture_logger() -> (BatchLogger, Arc<Mutex<Vec<LogEvent>>>) {
    let events = Arc::new(Mutex::new(Vec::new()));
    let sink_events = events.clone();
    let logger = BatchLogger::new(move |event| sink_events.lock().unwrap().push(event));
    (logger, events)
}

/// Logger for tests that do not assert on events.
pub fn test_logger() -> BatchLogger {
    BatchLogger::new(|_| {})
}
