//! JSON record-array parser
//!
//! Scraped tables usually arrive as an array of row objects whose values are
//! the cell texts, e.g. `[{"State": "California", "Population": "39,538,223[4]"}]`.

use std::borrow::Cow;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{bail, Context, Result};
use indexmap::IndexSet;
use serde_json::Value;
use tracing::info;

use crate::config::Config;
use crate::model::{CellValue, Table};

use super::{into_column, Parser};

/// Parser for JSON array files
pub struct JsonParser;

impl JsonParser {
    /// Parse JSON text
    pub fn parse_str(&self, json: &str, config: &Config) -> Result<Table> {
        let value: Value = serde_json::from_str(json).context("Failed to parse JSON")?;
        self.parse_value(value, config)
    }

    /// Build a table from an already decoded JSON document
    pub fn parse_value(&self, value: Value, config: &Config) -> Result<Table> {
        // Handle both arrays and single objects
        let array = match value {
            Value::Array(arr) => arr,
            Value::Object(_) => vec![value],
            _ => bail!("JSON must be an array or object"),
        };

        // Collect all unique keys across all objects to build column list
        let mut column_names: IndexSet<String> = IndexSet::new();
        for item in &array {
            if let Value::Object(obj) = item {
                for key in obj.keys() {
                    column_names.insert(key.clone());
                }
            }
        }

        let mut columns: Vec<Vec<CellValue>> =
            vec![Vec::with_capacity(array.len()); column_names.len()];
        for (row_num, item) in array.iter().enumerate() {
            let Value::Object(obj) = item else {
                bail!("JSON row {} is not an object", row_num + 1);
            };
            for (key, column) in column_names.iter().zip(columns.iter_mut()) {
                column.push(json_value_to_cell(obj.get(key), config));
            }
        }

        let mut table = Table::new();
        for (name, cells) in column_names.into_iter().zip(columns) {
            table.push_column(name, into_column(cells))?;
        }

        Ok(table)
    }
}

impl Parser for JsonParser {
    fn parse(&self, path: &Path, config: &Config) -> Result<Table> {
        let file = File::open(path)
            .with_context(|| format!("Failed to open JSON file: {}", path.display()))?;
        let reader = BufReader::new(file);

        let value: Value =
            serde_json::from_reader(reader).context("Failed to parse JSON file")?;

        let table = self.parse_value(value, config)?;
        info!(
            path = %path.display(),
            columns = table.column_count(),
            rows = table.row_count(),
            "loaded JSON"
        );
        Ok(table)
    }

    fn supports_extension(&self, ext: &str) -> bool {
        matches!(ext.to_lowercase().as_str(), "json")
    }
}

fn json_value_to_cell(value: Option<&Value>, config: &Config) -> CellValue {
    match value {
        None | Some(Value::Null) => CellValue::Null,
        Some(Value::Bool(b)) => CellValue::Bool(*b),
        Some(Value::Number(n)) => {
            if let Some(i) = n.as_i64() {
                CellValue::Int(i)
            } else if let Some(f) = n.as_f64() {
                CellValue::Float(f)
            } else {
                CellValue::String(Cow::Owned(n.to_string()))
            }
        }
        Some(Value::String(s)) if config.is_missing_marker(s) => CellValue::Null,
        Some(Value::String(s)) => CellValue::String(Cow::Owned(s.clone())),
        Some(other) => {
            // Nested arrays and objects are kept as their JSON text
            CellValue::String(Cow::Owned(other.to_string()))
        }
    }
}
