//! Sink trait and output errors
//!
//! A sink receives the complete record set once, after every product has been
//! processed, and persists it to a single file.

use crate::extract::ProductRecord;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to write JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to write CSV: {0}")]
    Csv(#[from] csv::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Trait for record sinks
///
/// Sink failures are terminal for the run: there is no partial output worth
/// keeping, so errors propagate to the caller.
pub trait RecordSink {
    /// Writes the full record set, replacing any previous file
    ///
    /// # Arguments
    ///
    /// * `records` - The records in output order
    fn write(&self, records: &[ProductRecord]) -> OutputResult<()>;

    /// Destination path of the sink
    fn path(&self) -> &Path;
}

/// Creates the parent directory of `path` if it has one
pub(crate) fn ensure_parent_dir(path: &Path) -> OutputResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}
