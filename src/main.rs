//! Standalone CLI for the batch repacker.

use anyhow::Context;
use clap::Parser;
use rezip::services::batch::BatchRunner;
use rezip::services::logger::BatchLogger;
use rezip::types::config::BatchConfig;
use std::path::PathBuf;
use std::process::ExitCode;

/// Repack directories of password-protected ZIP archives with 7-Zip.
#[derive(Parser, Debug)]
#[command(name = "rezip", version)]
struct Cli {
    /// Directory to scan for ZIP files
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Destination for repacked archives (defaults to the input path)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Extraction password; pass an empty string for none
    #[arg(short, long)]
    password: Option<String>,

    /// Suffix appended to produced archive names
    #[arg(short, long)]
    suffix: Option<String>,

    /// File to copy into each payload before repackaging
    #[arg(long)]
    copy_file: Option<PathBuf>,

    /// Delete each source archive after a successful repack
    #[arg(long)]
    delete_original: bool,

    /// Do not unpack archives nested inside the extracted tree
    #[arg(long)]
    no_nested: bool,

    /// JSON config file; explicit flags override its values
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl Cli {
    fn into_config(self) -> anyhow::Result<BatchConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let json = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read config file {}", path.display()))?;
                BatchConfig::from_json(&json).context("Failed to parse config file")?
            }
            None => BatchConfig::default(),
        };

        if let Some(input) = self.input {
            config.input_path = input;
        }
        if let Some(output) = self.output {
            config.output_path = output;
        }
        if let Some(password) = self.password {
            config.password = password;
        }
        if let Some(suffix) = self.suffix {
            config.suffix = suffix;
        }
        if let Some(copy_file) = self.copy_file {
            config.copy_file_path = copy_file.to_string_lossy().to_string();
            config.copy_file_enabled = true;
        }
        if self.delete_original {
            config.delete_original = true;
        }
        if self.no_nested {
            config.extract_nested = false;
        }

        if config.input_path.as_os_str().is_empty() {
            anyhow::bail!("An input path is required (--input or the config file)");
        }

        config.normalize();
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();

    let config = match Cli::parse().into_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e:#}");
            return ExitCode::FAILURE;
        }
    };

    let runner = BatchRunner::new(config, BatchLogger::to_console());
    let result = runner.run().await;

    if result.success {
        ExitCode::SUCCESS
    } else {
        eprintln!("{}", result.message);
        ExitCode::FAILURE
    }
}
