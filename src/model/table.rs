//! Column-oriented table

use indexmap::map::Iter;
use indexmap::IndexMap;
use serde::Serialize;

use super::cell::CellValue;
use super::column::ColumnData;
use crate::error::TableError;

/// An ordered mapping from column name to column data
///
/// Every column holds the same number of rows.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Table {
    columns: IndexMap<String, ColumnData>,
    row_count: usize,
}

impl Table {
    /// Create a new empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from `(name, column)` pairs, in order
    pub fn from_columns<N: Into<String>>(
        columns: impl IntoIterator<Item = (N, ColumnData)>,
    ) -> Result<Self, TableError> {
        let mut table = Self::new();
        for (name, data) in columns {
            table.push_column(name, data)?;
        }
        Ok(table)
    }

    /// Append a column at the end
    pub fn push_column(&mut self, name: impl Into<String>, data: ColumnData) -> Result<(), TableError> {
        let name = name.into();
        if self.columns.contains_key(&name) {
            return Err(TableError::DuplicateColumn(name));
        }
        if !self.columns.is_empty() && data.len() != self.row_count {
            return Err(TableError::LengthMismatch {
                name,
                expected: self.row_count,
                actual: data.len(),
            });
        }

        self.row_count = data.len();
        self.columns.insert(name, data);
        Ok(())
    }

    /// Reassemble a table whose columns keep the names and row count of a source table
    pub(crate) fn from_parts(columns: IndexMap<String, ColumnData>, row_count: usize) -> Self {
        debug_assert!(columns.values().all(|c| c.len() == row_count));
        Self { columns, row_count }
    }

    /// Get column by name
    pub fn column(&self, name: &str) -> Option<&ColumnData> {
        self.columns.get(name)
    }

    /// Get column index by name
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.get_index_of(name)
    }

    /// Column names in order
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    /// Iterate `(name, column)` pairs in order
    pub fn columns(&self) -> Iter<'_, String, ColumnData> {
        self.columns.iter()
    }

    /// Cells of one row, in column order
    pub fn row(&self, index: usize) -> Option<Vec<CellValue>> {
        if index >= self.row_count {
            return None;
        }
        self.columns.values().map(|c| c.get(index)).collect()
    }

    /// Number of rows
    pub fn row_count(&self) -> usize {
        self.row_count
    }

    /// Number of columns
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

impl<'a> IntoIterator for &'a Table {
    type Item = (&'a String, &'a ColumnData);
    type IntoIter = Iter<'a, String, ColumnData>;

    fn into_iter(self) -> Self::IntoIter {
        self.columns.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Table {
        Table::from_columns([
            ("name", ColumnData::text(["a", "b"])),
            ("score", ColumnData::numeric([Some(1.0), None])),
        ])
        .unwrap()
    }

    #[test]
    fn test_shape() {
        let table = sample();
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.column_count(), 2);
        assert_eq!(table.column_names().collect::<Vec<_>>(), vec!["name", "score"]);
        assert_eq!(table.column_index("score"), Some(1));
    }

    #[test]
    fn test_row_access() {
        let table = sample();
        assert_eq!(
            table.row(1),
            Some(vec![CellValue::from("b"), CellValue::Null])
        );
        assert_eq!(table.row(2), None);
    }

    #[test]
    fn test_length_mismatch() {
        let mut table = sample();
        let err = table
            .push_column("extra", ColumnData::text(["x"]))
            .unwrap_err();
        assert_eq!(
            err,
            TableError::LengthMismatch {
                name: "extra".to_string(),
                expected: 2,
                actual: 1,
            }
        );
    }

    #[test]
    fn test_duplicate_column() {
        let mut table = sample();
        assert_eq!(
            table.push_column("name", ColumnData::text(["x", "y"])),
            Err(TableError::DuplicateColumn("name".to_string()))
        );
    }
}
