//! Whole-batch orchestration and result aggregation.

use super::{job, scanner};
use crate::services::archive::{Archiver, SevenZip};
use crate::services::logger::BatchLogger;
use crate::types::config::BatchConfig;
use crate::types::events::BatchResult;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Orchestrates one batch run: precondition checks, scan, then one job at
/// a time in scan order. Individual job failures are tallied, never
/// propagated; only failed preconditions end a run early.
pub struct BatchRunner {
    config: BatchConfig,
    archiver: Arc<dyn Archiver>,
    logger: BatchLogger,
    stop: Arc<AtomicBool>,
}

impl BatchRunner {
    /// Runner wired to the real 7-Zip binary.
    pub fn new(config: BatchConfig, logger: BatchLogger) -> Self {
        let archiver = Arc::new(SevenZip::new(logger.clone()));
        Self::with_archiver(config, logger, archiver)
    }

    /// Runner with a caller-supplied archiver. Tests use this to simulate
    /// exit codes without spawning processes.
    pub fn with_archiver(
        mut config: BatchConfig,
        logger: BatchLogger,
        archiver: Arc<dyn Archiver>,
    ) -> Self {
        config.normalize();
        Self {
            config,
            archiver,
            logger,
            stop: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Handle a host UI can set to stop scheduling further archives. The
    /// archive currently being processed always runs to completion.
    pub fn stop_flag(&self) -> Arc<AtomicBool> {
        self.stop.clone()
    }

    pub async fn run(&self) -> BatchResult {
        self.log_config();

        if !self.archiver.is_available().await {
            return BatchResult {
                success: false,
                message: "7-Zip not found or not working".into(),
            };
        }

        if !self.config.input_path.exists() {
            self.logger.error(format!(
                "Input path does not exist: {}",
                self.config.input_path.display()
            ));
            return BatchResult {
                success: false,
                message: "Input path does not exist".into(),
            };
        }

        let archives = scanner::find_archives(&self.config.input_path, &self.logger).await;
        if archives.is_empty() {
            self.logger.output("No ZIP files found in the input path");
            return BatchResult {
                success: true,
                message: "No ZIP files to process".into(),
            };
        }

        self.logger
            .output(format!("Found {} ZIP file(s)", archives.len()));

        let mut succeeded = 0usize;
        let mut failed = 0usize;

        for relative in archives {
            if self.stop.load(Ordering::SeqCst) {
                self.logger
                    .output("Stop requested, not scheduling further archives");
                break;
            }

            let archive_path = self.config.input_path.join(&relative);
            if self.process_contained(archive_path).await {
                succeeded += 1;
            } else {
                failed += 1;
            }
        }

        let message = format!("{succeeded} succeeded, {failed} failed");
        self.logger.output(format!("Batch finished: {message}"));

        BatchResult {
            success: failed == 0,
            message,
        }
    }

    /// Run one job inside its own task so a panic in the pipeline is this
    /// archive's failure, not the batch's.
    async fn process_contained(&self, archive_path: PathBuf) -> bool {
        let config = self.config.clone();
        let archiver = self.archiver.clone();
        let logger = self.logger.clone();

        let handle = tokio::spawn(async move {
            job::process_archive(&archive_path, &config, archiver.as_ref(), &logger).await
        });

        match handle.await {
            Ok(result) => result,
            Err(e) => {
                self.logger.error(format!("Archive job crashed: {e}"));
                false
            }
        }
    }

    /// Echo the effective configuration so operators can see what the run
    /// will do before the first subprocess spawns.
    fn log_config(&self) {
        let config = &self.config;
        self.logger.output("Starting batch run");
        self.logger
            .output(format!("Input path: {}", config.input_path.display()));
        self.logger
            .output(format!("Output path: {}", config.output_path.display()));
        self.logger.output(format!("Password: {}", config.password));
        self.logger.output(format!("Suffix: {}", config.suffix));
        self.logger
            .output(format!("Delete originals: {}", config.delete_original));
        self.logger.output(format!(
            "Extract nested archives: {}",
            config.extract_nested
        ));
        self.logger.output(format!(
            "File injection enabled: {}",
            config.copy_file_enabled
        ));
        self.logger
            .output(format!("File to inject: {}", config.copy_file_path));
    }
}

#[cfg(test)]
#[path = "tests/runner_tests.rs"]
mod tests;
