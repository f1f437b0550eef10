//! CSV file parser

use std::borrow::Cow;
use std::collections::HashSet;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::config::Config;
use crate::model::{CellValue, ColumnData, Table};

use super::Parser;

/// Parser for CSV files
pub struct CsvParser;

impl CsvParser {
    /// Parse CSV text from any reader
    pub fn parse_reader<R: Read>(&self, reader: R, delimiter: u8, config: &Config) -> Result<Table> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .delimiter(delimiter)
            .from_reader(reader);

        // Read headers
        let headers = csv_reader
            .headers()
            .context("Failed to read CSV headers")?
            .clone();

        let mut columns: Vec<Vec<Option<String>>> = vec![Vec::new(); headers.len()];

        // Read rows
        for (line_num, result) in csv_reader.records().enumerate() {
            let record = result.with_context(|| format!("Failed to read CSV row {}", line_num + 2))?; // +2 for 1-indexing and header

            // Short rows pad with missing, long rows drop the extra fields
            for (i, column) in columns.iter_mut().enumerate() {
                let cell = record
                    .get(i)
                    .filter(|raw| !config.is_missing_marker(raw))
                    .map(|raw| raw.trim().to_string());
                column.push(cell);
            }
        }

        let mut table = Table::new();
        for (name, raw) in unique_headers(headers.iter()).into_iter().zip(columns) {
            table
                .push_column(name.clone(), declare_column(raw))
                .with_context(|| format!("Invalid CSV column '{}'", name))?;
        }

        Ok(table)
    }
}

impl Parser for CsvParser {
    fn parse(&self, path: &Path, config: &Config) -> Result<Table> {
        let file =
            File::open(path).with_context(|| format!("Failed to open file: {}", path.display()))?;
        let delimiter = match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("tsv") => b'\t',
            _ => b',',
        };

        let table = self.parse_reader(BufReader::new(file), delimiter, config)?;
        info!(
            path = %path.display(),
            columns = table.column_count(),
            rows = table.row_count(),
            "loaded CSV"
        );
        Ok(table)
    }

    fn supports_extension(&self, ext: &str) -> bool {
        matches!(ext.to_lowercase().as_str(), "csv" | "tsv" | "txt")
    }
}

/// Rename repeated headers `name.1`, `name.2`, ... skipping names already taken
fn unique_headers<'a>(headers: impl Iterator<Item = &'a str>) -> Vec<String> {
    let headers: Vec<&str> = headers.collect();
    let mut taken: HashSet<String> = headers.iter().map(|h| h.to_string()).collect();
    let mut seen: HashSet<&str> = HashSet::new();

    headers
        .iter()
        .map(|&name| {
            if seen.insert(name) {
                return name.to_string();
            }
            let renamed = (1..)
                .map(|n| format!("{}.{}", name, n))
                .find(|candidate| !taken.contains(candidate))
                .unwrap_or_else(|| name.to_string());
            warn!(header = name, renamed = %renamed, "renamed duplicate CSV header");
            taken.insert(renamed.clone());
            renamed
        })
        .collect()
}

/// Numeric storage when every present cell is a plain float, text otherwise
fn declare_column(raw: Vec<Option<String>>) -> ColumnData {
    let parsed: Option<Vec<Option<f64>>> = raw
        .iter()
        .map(|cell| match cell {
            None => Some(None),
            Some(s) => parse_plain(s).map(Some),
        })
        .collect();

    match parsed {
        Some(values) if values.iter().any(Option::is_some) => ColumnData::Numeric(values),
        _ => ColumnData::Text(
            raw.into_iter()
                .map(|cell| match cell {
                    Some(s) => CellValue::String(Cow::Owned(s)),
                    None => CellValue::Null,
                })
                .collect(),
        ),
    }
}

fn parse_plain(s: &str) -> Option<f64> {
    s.parse::<f64>().ok().filter(|f| !f.is_nan())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::StorageKind;

    fn parse(text: &str) -> Table {
        CsvParser
            .parse_reader(text.as_bytes(), b',', &Config::default())
            .unwrap()
    }

    #[test]
    fn test_storage_kinds() {
        let table = parse("id,price,name\n1,\"$1,000\",foo\n2,$20,bar\n,NA,baz\n");

        assert_eq!(
            table.column("id"),
            Some(&ColumnData::Numeric(vec![Some(1.0), Some(2.0), None]))
        );
        assert_eq!(
            table.column("price"),
            Some(&ColumnData::Text(vec![
                CellValue::from("$1,000"),
                CellValue::from("$20"),
                CellValue::Null,
            ]))
        );
        assert_eq!(table.column("name").map(|c| c.storage_kind()), Some(StorageKind::Text));
    }

    #[test]
    fn test_short_rows_pad() {
        let table = parse("a,b,c\n1,x\n2,y,z\n");
        assert_eq!(table.row_count(), 2);
        assert_eq!(
            table.column("c"),
            Some(&ColumnData::Text(vec![CellValue::Null, CellValue::from("z")]))
        );
    }

    #[test]
    fn test_all_missing_is_text() {
        let table = parse("a,b\n1,\n2,null\n");
        assert_eq!(table.column("b").map(|c| c.storage_kind()), Some(StorageKind::Text));
    }

    #[test]
    fn test_header_only() {
        let table = parse("a,b\n");
        assert_eq!(table.column_count(), 2);
        assert_eq!(table.row_count(), 0);
    }

    #[test]
    fn test_duplicate_headers_renamed() {
        let table = parse("a,a,b,a\n1,2,3,4\n");
        assert_eq!(table.column_names().collect::<Vec<_>>(), vec!["a", "a.1", "b", "a.2"]);
        assert_eq!(table.column("a.1"), Some(&ColumnData::Numeric(vec![Some(2.0)])));

        // An existing `a.1` header is not reused
        let table = parse("a,a.1,a\nx,y,z\n");
        assert_eq!(table.column_names().collect::<Vec<_>>(), vec!["a", "a.1", "a.2"]);
        assert_eq!(table.column("a.2"), Some(&ColumnData::Text(vec![CellValue::from("z")])));
    }

    #[test]
    fn test_tsv_delimiter() {
        let table = CsvParser
            .parse_reader("a\tb\n1\t2%\n".as_bytes(), b'\t', &Config::default())
            .unwrap();
        assert_eq!(table.column("b"), Some(&ColumnData::Text(vec![CellValue::from("2%")])));
    }
}
