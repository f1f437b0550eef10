//! JSON output format

use std::io::Write;

use anyhow::Result;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::infer::{ColumnReport, Conversion};
use crate::model::{CellValue, Table};

use super::OutputFormatter;

/// JSON output formatter
pub struct JsonOutput {
    pretty: bool,
}

impl JsonOutput {
    pub fn new() -> Self {
        Self { pretty: true }
    }

    pub fn compact() -> Self {
        Self { pretty: false }
    }
}

impl Default for JsonOutput {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Serialize)]
struct JsonConversionOutput<'a> {
    columns: &'a [ColumnReport],
    rows: Vec<Map<String, Value>>,
}

impl OutputFormatter for JsonOutput {
    fn render(&self, conversion: &Conversion, writer: &mut dyn Write) -> Result<()> {
        let output = JsonConversionOutput {
            columns: &conversion.report.columns,
            rows: table_to_records(&conversion.table),
        };

        if self.pretty {
            serde_json::to_writer_pretty(&mut *writer, &output)?;
        } else {
            serde_json::to_writer(&mut *writer, &output)?;
        }
        writeln!(writer)?;

        Ok(())
    }
}

/// One JSON object per row, keyed by column name
pub fn table_to_records(table: &Table) -> Vec<Map<String, Value>> {
    (0..table.row_count())
        .map(|row| {
            table
                .columns()
                .map(|(name, column)| {
                    let cell = column.get(row).unwrap_or(CellValue::Null);
                    (name.clone(), cell_value_to_json(&cell))
                })
                .collect()
        })
        .collect()
}

fn cell_value_to_json(value: &CellValue) -> Value {
    match value {
        CellValue::Null => Value::Null,
        CellValue::Bool(b) => Value::Bool(*b),
        CellValue::Int(i) => Value::Number((*i).into()),
        // Non-finite floats have no JSON form
        CellValue::Float(f) => serde_json::Number::from_f64(*f)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        CellValue::String(s) => Value::String(s.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infer::TableConverter;
    use crate::model::ColumnData;

    #[test]
    fn test_render_records() {
        let table = Table::from_columns([
            ("price", ColumnData::text(["$5", "$7", "n/a"])),
            ("label", ColumnData::text(["a", "b", "c"])),
        ])
        .unwrap();
        let conversion = TableConverter::default().convert(&table);

        let mut buf = Vec::new();
        JsonOutput::compact().render(&conversion, &mut buf).unwrap();
        let parsed: Value = serde_json::from_slice(&buf).unwrap();

        assert_eq!(parsed["rows"][0]["price"], Value::from(5.0));
        assert_eq!(parsed["rows"][2]["price"], Value::Null);
        assert_eq!(parsed["rows"][1]["label"], Value::from("b"));
        assert_eq!(parsed["columns"][0]["name"], Value::from("price"));
        assert_eq!(parsed["columns"][0]["decision"], Value::from("converted"));
        assert_eq!(parsed["columns"][1]["decision"], Value::from("kept_as_text"));
    }

    #[test]
    fn test_records_keep_column_order() {
        let table = Table::from_columns([
            ("zeta", ColumnData::text(["z"])),
            ("alpha", ColumnData::numeric([Some(1.0)])),
        ])
        .unwrap();
        let records = table_to_records(&table);
        assert_eq!(
            records[0].keys().map(String::as_str).collect::<Vec<_>>(),
            vec!["zeta", "alpha"]
        );

        let conversion = TableConverter::default().convert(&table);
        let mut buf = Vec::new();
        JsonOutput::compact().render(&conversion, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains(r#"{"zeta":"z","alpha":1.0}"#));
    }

    #[test]
    fn test_non_finite_becomes_null() {
        assert_eq!(cell_value_to_json(&CellValue::Float(f64::INFINITY)), Value::Null);
        assert_eq!(cell_value_to_json(&CellValue::Int(3)), Value::from(3));
    }
}
