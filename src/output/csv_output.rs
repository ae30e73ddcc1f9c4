//! CSV sink
//!
//! One row per record with a fixed header. Multi-value fields are flattened
//! into a single delimiter-joined cell.

use crate::extract::ProductRecord;
use crate::output::traits::{ensure_parent_dir, OutputResult, RecordSink};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Column order of the CSV file
pub const CSV_HEADER: [&str; 7] = ["name", "SKU", "category", "brand", "description", "images", "url"];

const CATEGORY_SEPARATOR: &str = " > ";
const BRAND_SEPARATOR: &str = ", ";
const IMAGE_SEPARATOR: &str = ",";

/// Flattened view of a record, fields in `CSV_HEADER` order
#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    name: &'a str,
    sku: &'a str,
    category: String,
    brand: String,
    description: &'a str,
    images: String,
    url: &'a str,
}

impl<'a> From<&'a ProductRecord> for CsvRow<'a> {
    fn from(record: &'a ProductRecord) -> Self {
        Self {
            name: record.title.as_deref().unwrap_or_default(),
            sku: &record.sku,
            category: record.categories.join(CATEGORY_SEPARATOR),
            brand: record.brand.join(BRAND_SEPARATOR),
            description: record.description.as_deref().unwrap_or_default(),
            images: record.images.join(IMAGE_SEPARATOR),
            url: &record.url,
        }
    }
}

/// Writes records to a CSV file
#[derive(Debug, Clone)]
pub struct CsvSink {
    path: PathBuf,
}

impl CsvSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl RecordSink for CsvSink {
    fn write(&self, records: &[ProductRecord]) -> OutputResult<()> {
        ensure_parent_dir(&self.path)?;

        // Header is written explicitly so an empty record set still gets one
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_path(&self.path)?;
        writer.write_record(CSV_HEADER)?;

        for record in records {
            writer.serialize(CsvRow::from(record))?;
        }
        writer.flush()?;

        tracing::debug!("Wrote {} rows to {}", records.len(), self.path.display());
        Ok(())
    }

    fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn read_rows(path: &Path) -> Vec<Vec<String>> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .from_path(path)
            .unwrap();
        reader
            .records()
            .map(|r| r.unwrap().iter().map(str::to_string).collect())
            .collect()
    }

    #[test]
    fn test_row_flattening() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("products.csv");
        let record = ProductRecord {
            url: "https://shop.example.com/produto/tinta/".to_string(),
            title: Some("Tinta Eco-Solvente".to_string()),
            description: Some("Curta | Longa, com vírgula".to_string()),
            categories: vec!["Suprimentos".to_string(), "Tintas".to_string()],
            brand: vec!["Acme".to_string(), "Roland".to_string()],
            sku: "T-1".to_string(),
            images: vec!["images/tinta/a.jpg".to_string(), "images/tinta/b.jpg".to_string()],
            ..ProductRecord::default()
        };

        CsvSink::new(&path).write(&[record]).unwrap();

        let rows = read_rows(&path);
        assert_eq!(rows[0], CSV_HEADER.map(str::to_string).to_vec());
        assert_eq!(
            rows[1],
            vec![
                "Tinta Eco-Solvente",
                "T-1",
                "Suprimentos > Tintas",
                "Acme, Roland",
                "Curta | Longa, com vírgula",
                "images/tinta/a.jpg,images/tinta/b.jpg",
                "https://shop.example.com/produto/tinta/",
            ]
        );
    }

    #[test]
    fn test_placeholder_row() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("products.csv");

        CsvSink::new(&path)
            .write(&[ProductRecord::placeholder("https://shop.example.com/produto/x/")])
            .unwrap();

        let rows = read_rows(&path);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1][0], "");
        assert_eq!(rows[1][6], "https://shop.example.com/produto/x/");
    }

    #[test]
    fn test_header_only_when_empty() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("products.csv");

        CsvSink::new(&path).write(&[]).unwrap();

        assert_eq!(read_rows(&path).len(), 1);
    }
}
