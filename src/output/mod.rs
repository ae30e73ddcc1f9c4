//! Output module for persisting harvested records
//!
//! This module handles:
//! - Writing the record set as JSON or CSV
//! - Recording and printing run statistics

mod csv_output;
mod json;
pub mod stats;
mod traits;

pub use csv_output::{CsvSink, CSV_HEADER};
pub use json::JsonSink;
pub use stats::{print_statistics, HarvestStatistics};
pub use traits::{OutputError, OutputResult, RecordSink};

use crate::config::OutputFormat;
use std::path::PathBuf;

/// Creates the sink for the given format
///
/// # Arguments
///
/// * `format` - Output format
/// * `path` - Destination file
pub fn sink_for(format: OutputFormat, path: impl Into<PathBuf>) -> Box<dyn RecordSink> {
    match format {
        OutputFormat::Json => Box::new(JsonSink::new(path)),
        OutputFormat::Csv => Box::new(CsvSink::new(path)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_sink_for_keeps_path() {
        let sink = sink_for(OutputFormat::Csv, "out/products.csv");
        assert_eq!(sink.path(), Path::new("out/products.csv"));
    }
}
