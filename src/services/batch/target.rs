//! Payload directory discovery beneath self-named wrapper folders.

use crate::services::logger::BatchLogger;
use std::path::{Path, PathBuf};

/// Locate the payload directory under `extracted_dir`.
///
/// Archives frequently unpack to a wrapper folder carrying the archive's
/// own base name, sometimes several levels deep. Subdirectories are
/// examined in listing order and the first one decides: a name equal to
/// `source_name` descends one level, any other name is the payload. A
/// directory with no subdirectories but at least one file is its own
/// payload. Anything else resolves to `None`, as does any filesystem
/// error during the walk.
pub async fn resolve_target(
    extracted_dir: &Path,
    source_name: &str,
    logger: &BatchLogger,
) -> Option<PathBuf> {
    let mut current = extracted_dir.to_path_buf();

    loop {
        logger.output(format!("Analyzing directory: {}", current.display()));

        let (subdirs, has_files) = match list_directory(&current).await {
            Ok(listing) => listing,
            Err(e) => {
                logger.error(format!("Failed to analyze {}: {e}", current.display()));
                return None;
            }
        };

        let names: Vec<String> = subdirs
            .iter()
            .filter_map(|dir| dir.file_name())
            .map(|name| name.to_string_lossy().to_string())
            .collect();
        logger.output(format!("Subdirectories: {}", names.join(", ")));

        if let Some(first) = subdirs.first() {
            let name = first
                .file_name()
                .map(|name| name.to_string_lossy().to_string())
                .unwrap_or_default();

            if name == source_name {
                logger.output(format!(
                    "Wrapper folder matches the archive name, descending: {name}"
                ));
                current = first.clone();
                continue;
            }

            logger.output(format!("Payload directory found: {name}"));
            return Some(first.clone());
        }

        if has_files {
            logger.output("No subdirectories, using the directory itself as payload");
            return Some(current);
        }

        return None;
    }
}

/// Immediate subdirectories (in listing order) and whether the directory
/// holds any file directly.
async fn list_directory(directory: &Path) -> std::io::Result<(Vec<PathBuf>, bool)> {
    let mut entries = tokio::fs::read_dir(directory).await?;

    let mut subdirs = Vec::new();
    let mut has_files = false;

    while let Some(entry) = entries.next_entry().await? {
        let file_type = entry.file_type().await?;
        if file_type.is_dir() {
            subdirs.push(entry.path());
        } else if file_type.is_file() {
            has_files = true;
        }
    }

    Ok((subdirs, has_files))
}

#[cfg(test)]
#[path = "tests/target_tests.rs"]
mod tests;
