//! Column storage and storage kinds

use serde::{Deserialize, Serialize};

use super::cell::CellValue;

/// How a column is currently held
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageKind {
    Numeric,
    Text,
}

impl std::fmt::Display for StorageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageKind::Numeric => write!(f, "numeric"),
            StorageKind::Text => write!(f, "text"),
        }
    }
}

/// The values of one column
///
/// `Numeric` entries use `None` as the missing marker. `Text` columns keep
/// whatever the loader produced, which may mix strings, numbers and nulls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "values", rename_all = "lowercase")]
pub enum ColumnData {
    Numeric(Vec<Option<f64>>),
    Text(Vec<CellValue>),
}

impl ColumnData {
    /// Build a numeric column, folding NaN into the missing marker
    pub fn numeric(values: impl IntoIterator<Item = Option<f64>>) -> Self {
        ColumnData::Numeric(
            values
                .into_iter()
                .map(|v| v.filter(|f| !f.is_nan()))
                .collect(),
        )
    }

    /// Build a text column from anything convertible to cells
    pub fn text<T: Into<CellValue>>(values: impl IntoIterator<Item = T>) -> Self {
        ColumnData::Text(values.into_iter().map(Into::into).collect())
    }

    pub fn storage_kind(&self) -> StorageKind {
        match self {
            ColumnData::Numeric(_) => StorageKind::Numeric,
            ColumnData::Text(_) => StorageKind::Text,
        }
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        match self {
            ColumnData::Numeric(v) => v.len(),
            ColumnData::Text(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of entries that are not the missing marker
    pub fn present_count(&self) -> usize {
        match self {
            ColumnData::Numeric(v) => v.iter().filter(|x| x.is_some()).count(),
            ColumnData::Text(v) => v.iter().filter(|x| !x.is_missing()).count(),
        }
    }

    /// Cell at a row, with numeric entries widened back to cells
    pub fn get(&self, row: usize) -> Option<CellValue> {
        match self {
            ColumnData::Numeric(v) => v.get(row).map(|x| CellValue::from(*x)),
            ColumnData::Text(v) => v.get(row).cloned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_folds_nan() {
        let col = ColumnData::numeric([Some(1.0), Some(f64::NAN), None]);
        assert_eq!(col, ColumnData::Numeric(vec![Some(1.0), None, None]));
        assert_eq!(col.present_count(), 1);
        assert_eq!(col.storage_kind(), StorageKind::Numeric);
    }

    #[test]
    fn test_text_present_count() {
        let col = ColumnData::text([Some("a"), None, Some("")]);
        assert_eq!(col.len(), 3);
        assert_eq!(col.present_count(), 2);
        assert_eq!(col.get(1), Some(CellValue::Null));
        assert_eq!(col.get(3), None);
    }
}
