//! Column type inference for tables of scraped values

mod column;
mod table;

use serde::{Deserialize, Serialize};

use crate::model::{StorageKind, Table};

pub use column::{infer_column, Classification, ColumnClassifier};
pub use table::{convert_table, TableConverter};

/// What the classifier did with a column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    /// Column was already numeric and was not examined
    AlreadyNumeric,
    /// Column had no present values to decide on
    NoPresentValues,
    /// Column was replaced with its normalized numeric form
    Converted,
    /// Column stayed text because too few values normalized
    KeptAsText,
}

impl Decision {
    /// Whether the column data was replaced
    pub fn is_converted(self) -> bool {
        matches!(self, Decision::Converted)
    }
}

impl std::fmt::Display for Decision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Decision::AlreadyNumeric => write!(f, "already numeric"),
            Decision::NoPresentValues => write!(f, "no values"),
            Decision::Converted => write!(f, "converted"),
            Decision::KeptAsText => write!(f, "kept as text"),
        }
    }
}

/// Counts behind a column decision
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColumnOutcome {
    pub decision: Decision,
    /// Storage kind before classification
    pub storage: StorageKind,
    /// Entries that were not the missing marker
    pub present: usize,
    /// Entries that normalized to a number
    pub converted: usize,
}

impl ColumnOutcome {
    /// `converted / present`, when the column was actually evaluated
    pub fn success_rate(&self) -> Option<f64> {
        match self.decision {
            Decision::Converted | Decision::KeptAsText => {
                Some(self.converted as f64 / self.present as f64)
            }
            Decision::AlreadyNumeric | Decision::NoPresentValues => None,
        }
    }
}

/// Outcome for one named column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnReport {
    pub name: String,
    #[serde(flatten)]
    pub outcome: ColumnOutcome,
}

/// Per-column outcomes of a table conversion, in column order
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionReport {
    pub columns: Vec<ColumnReport>,
    pub row_count: usize,
}

impl ConversionReport {
    /// Number of columns that were converted
    pub fn converted_count(&self) -> usize {
        self.columns
            .iter()
            .filter(|c| c.outcome.decision.is_converted())
            .count()
    }

    /// Number of text columns left as text
    pub fn kept_count(&self) -> usize {
        self.columns
            .iter()
            .filter(|c| c.outcome.decision == Decision::KeptAsText)
            .count()
    }

    /// Check if any column changed
    pub fn has_conversions(&self) -> bool {
        self.converted_count() > 0
    }

    /// Look up the report of a column
    pub fn column(&self, name: &str) -> Option<&ColumnReport> {
        self.columns.iter().find(|c| c.name == name)
    }
}

/// A converted table together with its report
#[derive(Debug, Clone)]
pub struct Conversion {
    pub table: Table,
    pub report: ConversionReport,
}
