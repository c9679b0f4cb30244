//! Batch ZIP processing pipeline.
//!
//! One run walks the input root for archives, then takes each through
//! extract → nested unpack → payload discovery → inject → repackage →
//! cleanup, strictly one archive at a time. Every component reports
//! through the run's [`BatchLogger`](crate::services::logger::BatchLogger).

pub mod job;
pub mod nested;
pub mod runner;
pub mod scanner;
pub mod target;

pub use runner::BatchRunner;
