//! Wire types the host UI consumes: progress events and the batch result.

use serde::{Deserialize, Serialize};

/// Which channel a log message belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LogKind {
    Output,
    Error,
}

/// A single progress message pushed to the registered sink.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEvent {
    pub kind: LogKind,
    pub message: String,
}

/// Aggregate outcome of one batch run. `success` is true only when every
/// attempted archive succeeded.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchResult {
    pub success: bool,
    pub message: String,
}
