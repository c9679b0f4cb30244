//! Batch run configuration and its ingestion contract.

use super::errors::ConfigResult;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Password applied when the config does not supply one.
pub const DEFAULT_PASSWORD: &str = "3y@Ef!YzJNmY";

/// Suffix appended to produced archive names when the config does not
/// supply one.
pub const DEFAULT_SUFFIX: &str = "_installguider.com";

/// Immutable configuration for one batch run.
///
/// Host UIs send this as JSON with loosely typed booleans; every flag
/// accepts a literal boolean, a case-insensitive `"true"`/`"false"`
/// string, or numeric 1/0, and is a strict `bool` from construction
/// onward. `normalize` must run before the config reaches the pipeline so
/// `output_path` is never empty downstream.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BatchConfig {
    /// Extraction password; empty means the archives are unprotected.
    pub password: String,
    /// Appended to the base name of every temp directory and produced
    /// archive.
    pub suffix: String,
    /// File copied into each payload directory before repackaging.
    pub copy_file_path: String,
    #[serde(deserialize_with = "truthy")]
    pub copy_file_enabled: bool,
    /// Destructive: source archives are only deleted when this is
    /// explicitly enabled.
    #[serde(deserialize_with = "truthy")]
    pub delete_original: bool,
    #[serde(deserialize_with = "truthy")]
    pub extract_nested: bool,
    pub input_path: PathBuf,
    pub output_path: PathBuf,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            password: DEFAULT_PASSWORD.to_string(),
            suffix: DEFAULT_SUFFIX.to_string(),
            copy_file_path: String::new(),
            copy_file_enabled: false,
            delete_original: false,
            extract_nested: true,
            input_path: PathBuf::new(),
            output_path: PathBuf::new(),
        }
    }
}

impl BatchConfig {
    /// Parse a JSON config as sent by a host UI, then normalize it.
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let mut config: Self = serde_json::from_str(json)?;
        config.normalize();
        Ok(config)
    }

    /// Apply construction-time invariants: an empty output path falls
    /// back to the input path.
    pub fn normalize(&mut self) {
        if self.output_path.as_os_str().is_empty() {
            self.output_path = self.input_path.clone();
        }
    }

    /// Password for archiver calls; empty means none.
    pub fn password(&self) -> Option<&str> {
        if self.password.is_empty() {
            None
        } else {
            Some(&self.password)
        }
    }

    /// File to inject into each payload, when injection is enabled and a
    /// path is set.
    pub fn copy_file(&self) -> Option<&Path> {
        if self.copy_file_enabled && !self.copy_file_path.is_empty() {
            Some(Path::new(&self.copy_file_path))
        } else {
            None
        }
    }
}

/// Accept the boolean encodings host UIs have historically produced.
fn truthy<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    struct TruthyVisitor;

    impl serde::de::Visitor<'_> for TruthyVisitor {
        type Value = bool;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a boolean, \"true\"/\"false\", or 0/1")
        }

        fn visit_bool<E>(self, value: bool) -> Result<bool, E>
        where
            E: serde::de::Error,
        {
            Ok(value)
        }

        fn visit_str<E>(self, value: &str) -> Result<bool, E>
        where
            E: serde::de::Error,
        {
            Ok(value.eq_ignore_ascii_case("true"))
        }

        fn visit_u64<E>(self, value: u64) -> Result<bool, E>
        where
            E: serde::de::Error,
        {
            Ok(value == 1)
        }

        fn visit_i64<E>(self, value: i64) -> Result<bool, E>
        where
            E: serde::de::Error,
        {
            Ok(value == 1)
        }

        fn visit_unit<E>(self) -> Result<bool, E>
        where
            E: serde::de::Error,
        {
            Ok(false)
        }
    }

    deserializer.deserialize_any(TruthyVisitor)
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
