//! Logged filesystem helpers shared by the pipeline steps.
//!
//! Each returns `true` on success. Failures are logged and swallowed;
//! callers decide whether the step was load-bearing.

use super::logger::BatchLogger;
use std::path::Path;

/// Final path component for log lines, falling back to the full path.
pub fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

pub async fn copy_file(source: &Path, dest: &Path, logger: &BatchLogger) -> bool {
    match tokio::fs::copy(source, dest).await {
        Ok(_) => {
            logger.output(format!("Copied file: {}", file_name(source)));
            true
        }
        Err(e) => {
            logger.error(format!("File copy failed: {e}"));
            false
        }
    }
}

pub async fn remove_file(path: &Path, logger: &BatchLogger) -> bool {
    match tokio::fs::remove_file(path).await {
        Ok(()) => {
            logger.output(format!("Deleted file: {}", file_name(path)));
            true
        }
        Err(e) => {
            logger.error(format!("Failed to delete file: {e}"));
            false
        }
    }
}

pub async fn remove_dir(path: &Path, logger: &BatchLogger) -> bool {
    match tokio::fs::remove_dir_all(path).await {
        Ok(()) => {
            logger.output(format!("Deleted directory: {}", file_name(path)));
            true
        }
        Err(e) => {
            logger.error(format!("Failed to delete directory: {e}"));
            false
        }
    }
}
