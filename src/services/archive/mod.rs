//! External archiver integration.
//!
//! All compression work is delegated to the `7z` binary; this crate only
//! builds command lines and reads exit codes.

mod seven_zip;

pub use seven_zip::{Archiver, SevenZip};
