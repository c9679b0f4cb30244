//! In-place resolution of archives nested inside an extracted tree.

use super::scanner::has_archive_extension;
use crate::services::archive::Archiver;
use crate::services::fs_utils::{self, file_name};
use crate::services::logger::BatchLogger;
use std::path::{Path, PathBuf};

/// Walk `directory` depth-first, extracting every nested archive in place
/// with the batch password and deleting it once its contents are out. A
/// failed extraction leaves the archive where it was and the walk moves
/// on.
///
/// Subdirectories are re-listed after the extractions, so directories the
/// extractions just produced are themselves visited; chains of
/// archives-inside-archives unpack in one pass, bounded only by the
/// nesting depth of the data.
pub async fn resolve_nested(
    directory: &Path,
    password: Option<&str>,
    archiver: &dyn Archiver,
    logger: &BatchLogger,
) {
    let mut pending = vec![directory.to_path_buf()];

    while let Some(current) = pending.pop() {
        for archive in list_archives(&current, logger).await {
            logger.output(format!("Nested archive: {}", file_name(&archive)));
            if archiver.extract(&archive, &current, password).await {
                fs_utils::remove_file(&archive, logger).await;
            }
        }

        let mut subdirs = list_subdirs(&current, logger).await;
        // Stack order: reverse so subdirectories are visited in listing
        // order.
        subdirs.reverse();
        pending.extend(subdirs);
    }
}

async fn list_archives(directory: &Path, logger: &BatchLogger) -> Vec<PathBuf> {
    let mut entries = match tokio::fs::read_dir(directory).await {
        Ok(entries) => entries,
        Err(e) => {
            logger.error(format!(
                "Failed to read directory {}: {e}",
                directory.display()
            ));
            return Vec::new();
        }
    };

    let mut archives = Vec::new();
    while let Ok(Some(entry)) = entries.next_entry().await {
        let path = entry.path();
        let is_file = entry
            .file_type()
            .await
            .map(|file_type| file_type.is_file())
            .unwrap_or(false);

        if is_file && has_archive_extension(&path) {
            archives.push(path);
        }
    }
    archives
}

async fn list_subdirs(directory: &Path, logger: &BatchLogger) -> Vec<PathBuf> {
    let mut entries = match tokio::fs::read_dir(directory).await {
        Ok(entries) => entries,
        Err(e) => {
            logger.error(format!(
                "Failed to read directory {}: {e}",
                directory.display()
            ));
            return Vec::new();
        }
    };

    let mut subdirs = Vec::new();
    while let Ok(Some(entry)) = entries.next_entry().await {
        let is_dir = entry
            .file_type()
            .await
            .map(|file_type| file_type.is_dir())
            .unwrap_or(false);

        if is_dir {
            subdirs.push(entry.path());
        }
    }
    subdirs
}

#[cfg(test)]
#[path = "tests/nested_tests.rs"]
mod tests;
