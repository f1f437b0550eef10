//! Table-level driver: classify every text column

use indexmap::IndexMap;
use rayon::prelude::*;
use tracing::{debug, info};

use super::{ColumnClassifier, ColumnReport, Conversion, ConversionReport};
use crate::config::Config;
use crate::error::ConfigError;
use crate::model::{ColumnData, Table};

/// Convert a table with the default policy
pub fn convert_table(table: &Table) -> Table {
    TableConverter::default().convert(table).table
}

/// Converts the text columns of a table, leaving numeric ones untouched
#[derive(Debug, Clone, Default)]
pub struct TableConverter {
    classifier: ColumnClassifier,
    parallel: bool,
}

impl TableConverter {
    /// Create a converter from configuration
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        Ok(Self {
            classifier: ColumnClassifier::new(config)?,
            parallel: config.parallel,
        })
    }

    /// Build a converted copy of `table` and a report of each decision
    pub fn convert(&self, table: &Table) -> Conversion {
        let results: Vec<(String, ColumnData, ColumnReport)> = if self.parallel {
            let columns: Vec<_> = table.columns().collect();
            columns
                .into_par_iter()
                .map(|(name, data)| self.convert_column(name, data))
                .collect()
        } else {
            table
                .columns()
                .map(|(name, data)| self.convert_column(name, data))
                .collect()
        };

        let mut columns = IndexMap::with_capacity(results.len());
        let mut report = ConversionReport {
            columns: Vec::with_capacity(results.len()),
            row_count: table.row_count(),
        };
        for (name, data, column_report) in results {
            columns.insert(name, data);
            report.columns.push(column_report);
        }
        let converted = Table::from_parts(columns, table.row_count());

        info!(
            columns = report.columns.len(),
            converted = report.converted_count(),
            rows = report.row_count,
            "converted table"
        );

        Conversion {
            table: converted,
            report,
        }
    }

    fn convert_column(&self, name: &str, data: &ColumnData) -> (String, ColumnData, ColumnReport) {
        let classification = self.classifier.classify(data);
        debug!(column = name, decision = %classification.outcome.decision, "column done");

        let report = ColumnReport {
            name: name.to_string(),
            outcome: classification.outcome,
        };
        (name.to_string(), classification.data.into_owned(), report)
    }
}
