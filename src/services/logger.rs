//! The single log sink every pipeline component reports through.

use crate::types::events::{LogEvent, LogKind};
use std::sync::Arc;

type LogSink = Arc<dyn Fn(LogEvent) + Send + Sync>;

/// Cheap-to-clone handle that timestamps messages and forwards them to
/// the registered sink, mirroring each one to the `log` crate. Delivery
/// happens in the order operations complete and can neither block nor
/// fail the operation that produced the message.
#[derive(Clone)]
pub struct BatchLogger {
    sink: LogSink,
}

impl BatchLogger {
    pub fn new<F>(sink: F) -> Self
    where
        F: Fn(LogEvent) + Send + Sync + 'static,
    {
        Self {
            sink: Arc::new(sink),
        }
    }

    /// Sink printing events to stdout/stderr by kind. Used by the CLI and
    /// anywhere a host UI has not registered its own callback.
    pub fn to_console() -> Self {
        Self::new(|event| match event.kind {
            LogKind::Output => println!("{}", event.message),
            LogKind::Error => eprintln!("{}", event.message),
        })
    }

    pub fn output(&self, message: impl Into<String>) {
        let message = message.into();
        log::info!("{message}");
        self.emit(LogKind::Output, format!("[{}] {message}", timestamp()));
    }

    pub fn error(&self, message: impl Into<String>) {
        let message = message.into();
        log::error!("{message}");
        self.emit(LogKind::Error, format!("[{}] error: {message}", timestamp()));
    }

    fn emit(&self, kind: LogKind, message: String) {
        (self.sink)(LogEvent { kind, message });
    }
}

fn timestamp() -> String {
    chrono::Local::now().format("%H:%M:%S").to_string()
}

#[cfg(test)]
#[path = "tests/logger_tests.rs"]
mod tests;
