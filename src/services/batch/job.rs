//! Single-archive lifecycle: extract, resolve, inject, repackage, clean.

use super::{nested, target};
use crate::services::archive::Archiver;
use crate::services::fs_utils::{self, file_name};
use crate::services::logger::BatchLogger;
use crate::types::config::BatchConfig;
use std::path::{Path, PathBuf};

/// Transient per-archive state: every path the pipeline derives from the
/// source archive and the config. Built at the start of a job, dropped at
/// the end; owns nothing beyond the paths themselves.
struct ArchiveJob {
    source: PathBuf,
    base_name: String,
    temp_dir: PathBuf,
    final_archive: PathBuf,
}

impl ArchiveJob {
    fn plan(archive_path: &Path, config: &BatchConfig) -> Self {
        let base_name = archive_path
            .file_stem()
            .map(|stem| stem.to_string_lossy().to_string())
            .unwrap_or_default();

        // Repacked output lands next to the source unless a distinct
        // output root is configured.
        let output_root = if !config.output_path.as_os_str().is_empty()
            && config.output_path != config.input_path
        {
            config.output_path.clone()
        } else {
            archive_path
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_default()
        };

        let staged_name = format!("{base_name}{}", config.suffix);
        let temp_dir = output_root.join(&staged_name);
        let final_archive = output_root.join(format!("{staged_name}.zip"));

        Self {
            source: archive_path.to_path_buf(),
            base_name,
            temp_dir,
            final_archive,
        }
    }
}

/// Run one archive through the full pipeline. Returns true only when the
/// final archive was produced; any step failure ends this job without
/// touching the rest of the batch.
///
/// On extraction, payload-resolution, or repackaging failure the temp
/// extraction directory is left on disk. The success path always removes
/// it, and removes the source archive only when `delete_original` is set.
pub async fn process_archive(
    archive_path: &Path,
    config: &BatchConfig,
    archiver: &dyn Archiver,
    logger: &BatchLogger,
) -> bool {
    let job = ArchiveJob::plan(archive_path, config);

    logger.output(format!("Processing file: {}", file_name(&job.source)));
    logger.output(format!(
        "Temp extraction directory: {}",
        job.temp_dir.display()
    ));

    if let Err(e) = tokio::fs::create_dir_all(&job.temp_dir).await {
        logger.error(format!("Failed to create extraction directory: {e}"));
        return false;
    }

    if !archiver
        .extract(&job.source, &job.temp_dir, config.password())
        .await
    {
        logger.error("Extraction failed, stopping this job");
        return false;
    }

    if config.extract_nested {
        logger.output(format!(
            "Scanning for nested archives: {}",
            job.temp_dir.display()
        ));
        nested::resolve_nested(&job.temp_dir, config.password(), archiver, logger).await;
    }

    let target_dir = match target::resolve_target(&job.temp_dir, &job.base_name, logger).await {
        Some(dir) => dir,
        None => {
            logger.error(format!(
                "No payload directory found under {}",
                job.temp_dir.display()
            ));
            return false;
        }
    };
    logger.output(format!("Payload directory: {}", target_dir.display()));

    inject_copy_file(config, &target_dir, logger).await;

    if !archiver.create(&target_dir, &job.final_archive).await {
        logger.error("Archive creation failed, stopping this job");
        return false;
    }

    // Success-path cleanup. Deletions are best-effort: a leftover temp
    // dir or original is logged, not a job failure.
    fs_utils::remove_dir(&job.temp_dir, logger).await;
    if config.delete_original {
        fs_utils::remove_file(&job.source, logger).await;
    } else {
        logger.output(format!("Keeping original archive: {}", file_name(&job.source)));
    }

    logger.output(format!("Finished: {}", file_name(&job.final_archive)));
    true
}

/// Best-effort injection of the configured file into the payload. A
/// missing source is logged and the job carries on.
async fn inject_copy_file(config: &BatchConfig, target_dir: &Path, logger: &BatchLogger) {
    let Some(source) = config.copy_file() else {
        return;
    };

    if !source.exists() {
        logger.error(format!(
            "Configured file does not exist: {}",
            source.display()
        ));
        return;
    }

    let Some(name) = source.file_name() else {
        logger.error(format!("Invalid file to copy: {}", source.display()));
        return;
    };

    let dest = target_dir.join(name);
    logger.output(format!("Copying file into payload: {}", dest.display()));
    fs_utils::copy_file(source, &dest, logger).await;
}

#[cfg(test)]
#[path = "tests/job_tests.rs"]
mod tests;
