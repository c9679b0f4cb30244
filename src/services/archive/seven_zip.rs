use crate::services::fs_utils::file_name;
use crate::services::logger::BatchLogger;
use async_trait::async_trait;
use std::ffi::OsString;
use std::path::Path;
use std::process::Stdio;
use tokio::io::AsyncReadExt;
use tokio::process::Command;

const SEVEN_ZIP_BIN: &str = "7z";

/// Capability seam over the external archiver.
///
/// Expected failures surface as `false`, never as errors; retry/abort
/// decisions belong to the orchestrator. Object-safe so orchestration
/// logic can run against a double that fabricates exit codes without
/// spawning anything.
#[async_trait]
pub trait Archiver: Send + Sync {
    /// Probe the archiver binary. True iff the help command exits 0.
    async fn is_available(&self) -> bool;

    /// Extract `archive` into `output_dir`, overwriting without
    /// prompting. True iff the archiver exited 0.
    async fn extract(&self, archive: &Path, output_dir: &Path, password: Option<&str>) -> bool;

    /// Pack the entire contents of `source_dir` into a new archive at
    /// `archive`. True iff the archiver exited 0.
    async fn create(&self, source_dir: &Path, archive: &Path) -> bool;
}

/// Production implementation shelling out to `7z`, one subprocess per
/// call, no state between calls.
pub struct SevenZip {
    logger: BatchLogger,
}

impl SevenZip {
    pub fn new(logger: BatchLogger) -> Self {
        Self { logger }
    }
}

#[async_trait]
impl Archiver for SevenZip {
    async fn is_available(&self) -> bool {
        let status = Command::new(SEVEN_ZIP_BIN)
            .arg("--help")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await;

        match status {
            Ok(status) if status.success() => {
                self.logger.output("7-Zip is available");
                true
            }
            _ => {
                self.logger.error("7-Zip not found or not working");
                false
            }
        }
    }

    async fn extract(&self, archive: &Path, output_dir: &Path, password: Option<&str>) -> bool {
        let name = file_name(archive);
        self.logger.output(format!("Extracting: {name}"));

        let mut command = Command::new(SEVEN_ZIP_BIN);
        command.args(extract_args(archive, output_dir, password));

        match run_captured(command).await {
            Ok((status, _)) if status.success() => {
                self.logger.output(format!("Extraction finished: {name}"));
                true
            }
            Ok((status, stderr_text)) => {
                self.logger.error(format!(
                    "Extraction failed: {name}, exit code {}",
                    status.code().unwrap_or(-1)
                ));
                if !stderr_text.trim().is_empty() {
                    self.logger
                        .error(format!("Archiver output: {}", stderr_text.trim()));
                }
                false
            }
            Err(e) => {
                self.logger.error(format!("Extraction error: {e}"));
                false
            }
        }
    }

    async fn create(&self, source_dir: &Path, archive: &Path) -> bool {
        let name = file_name(archive);
        self.logger.output(format!("Creating archive: {name}"));

        let mut command = Command::new(SEVEN_ZIP_BIN);
        command.args(create_args(archive)).current_dir(source_dir);

        match run_captured(command).await {
            Ok((status, _)) if status.success() => {
                self.logger.output(format!("Archive created: {name}"));
                true
            }
            Ok((status, stderr_text)) => {
                self.logger.error(format!(
                    "Archive creation failed: {name}, exit code {}",
                    status.code().unwrap_or(-1)
                ));
                if !stderr_text.trim().is_empty() {
                    self.logger
                        .error(format!("Archiver output: {}", stderr_text.trim()));
                }
                false
            }
            Err(e) => {
                self.logger.error(format!("Archive creation error: {e}"));
                false
            }
        }
    }
}

/// `x <archive> -o<dir> -y -mmt=on -bb0 [-p<password>]`: overwrite
/// without prompting, multi-threaded, minimal log output, password only
/// when one is configured.
fn extract_args(archive: &Path, output_dir: &Path, password: Option<&str>) -> Vec<OsString> {
    let mut args: Vec<OsString> = vec![
        "x".into(),
        archive.as_os_str().to_os_string(),
        format!("-o{}", output_dir.display()).into(),
        "-y".into(),
        "-mmt=on".into(),
        "-bb0".into(),
    ];
    if let Some(password) = password {
        args.push(format!("-p{password}").into());
    }
    args
}

/// `a <archive> * -r -mx=1 -mmt=on -bb0`: fastest compression level;
/// the wildcard is resolved by 7z itself relative to the working
/// directory, so the caller sets `current_dir` to the source.
fn create_args(archive: &Path) -> Vec<OsString> {
    vec![
        "a".into(),
        archive.as_os_str().to_os_string(),
        "*".into(),
        "-r".into(),
        "-mx=1".into(),
        "-mmt=on".into(),
        "-bb0".into(),
    ]
}

/// Spawn with stdout discarded and stderr captured. Stderr text is only
/// retained for the failure path; the success path never logs it.
async fn run_captured(
    mut command: Command,
) -> std::io::Result<(std::process::ExitStatus, String)> {
    command
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::piped());

    let mut child = command.spawn()?;

    let mut stderr_text = String::new();
    if let Some(mut stderr) = child.stderr.take() {
        let _ = stderr.read_to_string(&mut stderr_text).await;
    }

    let status = child.wait().await?;
    Ok((status, stderr_text))
}

#[cfg(test)]
#[path = "tests/seven_zip_tests.rs"]
mod tests;
