//! Loaders turning scraped tabular files into tables

mod csv;
mod json;

use std::path::Path;

use anyhow::{bail, Result};

use crate::config::Config;
use crate::model::{CellValue, ColumnData, Table};

pub use self::csv::CsvParser;
pub use self::json::JsonParser;

/// Trait for loading tabular data files
pub trait Parser: Send + Sync {
    /// Parse a file and return a Table
    fn parse(&self, path: &Path, config: &Config) -> Result<Table>;

    /// Check if this parser can handle the given file extension
    fn supports_extension(&self, ext: &str) -> bool;
}

/// Factory for creating parsers based on file extension
pub struct ParserFactory {
    parsers: Vec<Box<dyn Parser>>,
}

impl Default for ParserFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl ParserFactory {
    /// Create a new parser factory with all supported parsers
    pub fn new() -> Self {
        Self {
            parsers: vec![Box::new(CsvParser), Box::new(JsonParser)],
        }
    }

    /// Get a parser for the given file path
    pub fn get_parser(&self, path: &Path) -> Result<&dyn Parser> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        for parser in &self.parsers {
            if parser.supports_extension(&ext) {
                return Ok(parser.as_ref());
            }
        }

        bail!(
            "Unsupported file format: {}",
            path.extension()
                .and_then(|e| e.to_str())
                .unwrap_or("unknown")
        )
    }

    /// Parse a file using the appropriate parser
    pub fn parse(&self, path: &Path, config: &Config) -> Result<Table> {
        let parser = self.get_parser(path)?;
        parser.parse(path, config)
    }
}

/// Declare a loaded column's storage kind
///
/// A column is numeric only when it has present values and all of them are
/// already numbers. Everything else is handed over as text.
fn into_column(cells: Vec<CellValue>) -> ColumnData {
    let mut numbers = Vec::with_capacity(cells.len());
    let mut any_present = false;

    for cell in &cells {
        if cell.is_missing() {
            numbers.push(None);
            continue;
        }
        match cell {
            CellValue::Int(_) | CellValue::Float(_) => {
                any_present = true;
                numbers.push(cell.as_number());
            }
            _ => return ColumnData::Text(cells),
        }
    }

    if any_present {
        ColumnData::Numeric(numbers)
    } else {
        ColumnData::Text(cells)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_column() {
        assert_eq!(
            into_column(vec![CellValue::Int(1), CellValue::Null, CellValue::Float(2.5)]),
            ColumnData::Numeric(vec![Some(1.0), None, Some(2.5)])
        );
        assert_eq!(
            into_column(vec![CellValue::Int(1), CellValue::from("2")]).storage_kind(),
            crate::model::StorageKind::Text
        );
        assert_eq!(
            into_column(vec![CellValue::Null, CellValue::Null]),
            ColumnData::Text(vec![CellValue::Null, CellValue::Null])
        );
        assert_eq!(
            into_column(vec![CellValue::Bool(true)]).storage_kind(),
            crate::model::StorageKind::Text
        );
    }

    #[test]
    fn test_factory_dispatch() {
        let factory = ParserFactory::new();
        assert!(factory.get_parser(Path::new("table.csv")).is_ok());
        assert!(factory.get_parser(Path::new("rows.JSON")).is_ok());
        assert!(factory.get_parser(Path::new("sheet.xlsx")).is_err());
    }
}
