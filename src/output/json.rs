//! JSON sink
//!
//! Writes the record set as a single UTF-8 JSON array with 4-space
//! indentation. Non-ASCII text is written as-is.

use crate::extract::ProductRecord;
use crate::output::traits::{ensure_parent_dir, OutputResult, RecordSink};
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

const INDENT: &[u8] = b"    ";

/// Writes records to a JSON file
#[derive(Debug, Clone)]
pub struct JsonSink {
    path: PathBuf,
}

impl JsonSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl RecordSink for JsonSink {
    fn write(&self, records: &[ProductRecord]) -> OutputResult<()> {
        ensure_parent_dir(&self.path)?;
        let mut writer = BufWriter::new(File::create(&self.path)?);

        let formatter = PrettyFormatter::with_indent(INDENT);
        let mut serializer = Serializer::with_formatter(&mut writer, formatter);
        records.serialize(&mut serializer)?;

        writer.write_all(b"\n")?;
        writer.flush()?;

        tracing::debug!("Wrote {} records to {}", records.len(), self.path.display());
        Ok(())
    }

    fn path(&self) -> &Path {
        &self.path
    }
}
