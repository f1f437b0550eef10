//! Terminal summary of a conversion

use std::io::Write;

use anyhow::Result;
use tabled::builder::Builder;
use tabled::settings::Style;
use tabled::{Table as TextTable, Tabled};

use crate::infer::{ColumnReport, Conversion};
use crate::model::Table;

use super::OutputFormatter;

/// Plain-text output: per-column decisions plus a preview of the result
pub struct TerminalOutput {
    preview_rows: usize,
}

#[derive(Tabled)]
struct ReportRow {
    #[tabled(rename = "Column")]
    name: String,
    #[tabled(rename = "Storage")]
    storage: String,
    #[tabled(rename = "Decision")]
    decision: String,
    #[tabled(rename = "Present")]
    present: usize,
    #[tabled(rename = "Numeric")]
    converted: usize,
    #[tabled(rename = "Rate")]
    rate: String,
}

impl From<&ColumnReport> for ReportRow {
    fn from(report: &ColumnReport) -> Self {
        let outcome = &report.outcome;
        Self {
            name: report.name.clone(),
            storage: outcome.storage.to_string(),
            decision: outcome.decision.to_string(),
            present: outcome.present,
            converted: outcome.converted,
            rate: outcome
                .success_rate()
                .map(|r| format!("{:.1}%", r * 100.0))
                .unwrap_or_else(|| "-".to_string()),
        }
    }
}

impl TerminalOutput {
    pub fn new() -> Self {
        Self { preview_rows: 5 }
    }

    /// Show up to `rows` rows of the converted table (0 disables the preview)
    pub fn with_preview_rows(rows: usize) -> Self {
        Self { preview_rows: rows }
    }

    fn write_report(&self, conversion: &Conversion, writer: &mut dyn Write) -> Result<()> {
        let rows: Vec<ReportRow> = conversion.report.columns.iter().map(ReportRow::from).collect();
        let mut table = TextTable::new(rows);
        table.with(Style::sharp());
        writeln!(writer, "{}", table)?;
        Ok(())
    }

    fn write_summary(&self, conversion: &Conversion, writer: &mut dyn Write) -> Result<()> {
        let report = &conversion.report;
        writeln!(
            writer,
            "Summary: {} converted, {} kept as text, {} columns, {} rows",
            report.converted_count(),
            report.kept_count(),
            report.columns.len(),
            report.row_count
        )?;
        Ok(())
    }

    fn write_preview(&self, table: &Table, writer: &mut dyn Write) -> Result<()> {
        if self.preview_rows == 0 || table.row_count() == 0 {
            return Ok(());
        }

        let mut builder = Builder::default();
        builder.push_record(table.column_names().map(str::to_string));
        for row in (0..table.row_count().min(self.preview_rows)).filter_map(|i| table.row(i)) {
            builder.push_record(row.iter().map(|c| c.display().into_owned()));
        }

        let mut preview = builder.build();
        preview.with(Style::sharp());
        writeln!(writer)?;
        writeln!(writer, "Preview:")?;
        writeln!(writer, "{}", preview)?;
        Ok(())
    }
}

impl Default for TerminalOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputFormatter for TerminalOutput {
    fn render(&self, conversion: &Conversion, writer: &mut dyn Write) -> Result<()> {
        if conversion.report.columns.is_empty() {
            writeln!(writer, "No columns to convert.")?;
            return Ok(());
        }

        self.write_report(conversion, writer)?;
        self.write_summary(conversion, writer)?;
        self.write_preview(&conversion.table, writer)?;

        Ok(())
    }
}
