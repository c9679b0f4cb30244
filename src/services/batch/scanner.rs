//! Discovery of candidate archives under the input root.

use crate::services::logger::BatchLogger;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

/// Extension handled by the pipeline.
pub const ARCHIVE_EXTENSION: &str = "zip";

/// True when `path` carries the archive extension, matched
/// case-insensitively.
pub fn has_archive_extension(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().eq_ignore_ascii_case(ARCHIVE_EXTENSION))
        .unwrap_or(false)
}

/// Scan `root` for archives: every `.zip` directly inside it, plus `.zip`
/// files one level down inside each immediate subdirectory. Deeper levels
/// are ignored. Returned paths are relative to `root`, in listing order.
///
/// An unreadable subdirectory is logged and skipped (partial results); an
/// unreadable root is logged and yields an empty result.
pub async fn find_archives(root: &Path, logger: &BatchLogger) -> Vec<PathBuf> {
    let mut entries = match tokio::fs::read_dir(root).await {
        Ok(entries) => entries,
        Err(e) => {
            logger.error(format!("Failed to read directory {}: {e}", root.display()));
            return Vec::new();
        }
    };

    let mut archives = Vec::new();

    loop {
        let entry = match entries.next_entry().await {
            Ok(Some(entry)) => entry,
            Ok(None) => break,
            Err(e) => {
                logger.error(format!("Failed to read directory {}: {e}", root.display()));
                break;
            }
        };

        let path = entry.path();
        match entry.file_type().await {
            Ok(file_type) if file_type.is_file() => {
                if has_archive_extension(&path) {
                    archives.push(PathBuf::from(entry.file_name()));
                }
            }
            Ok(file_type) if file_type.is_dir() => {
                scan_subdirectory(&path, &entry.file_name(), &mut archives, logger).await;
            }
            Ok(_) => {}
            Err(e) => {
                logger.error(format!("Failed to stat {}: {e}", path.display()));
            }
        }
    }

    archives
}

/// One level only: archives directly inside `subdir`, pushed as
/// `subdir_name/file_name`.
async fn scan_subdirectory(
    subdir: &Path,
    subdir_name: &OsStr,
    archives: &mut Vec<PathBuf>,
    logger: &BatchLogger,
) {
    let mut entries = match tokio::fs::read_dir(subdir).await {
        Ok(entries) => entries,
        Err(e) => {
            logger.error(format!(
                "Failed to read subdirectory {}: {e}",
                subdir.display()
            ));
            return;
        }
    };

    while let Ok(Some(entry)) = entries.next_entry().await {
        let path = entry.path();
        let is_file = entry
            .file_type()
            .await
            .map(|file_type| file_type.is_file())
            .unwrap_or(false);

        if is_file && has_archive_extension(&path) {
            archives.push(Path::new(subdir_name).join(entry.file_name()));
        }
    }
}

#[cfg(test)]
#[path = "tests/scanner_tests.rs"]
mod tests;
