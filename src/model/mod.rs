//! Data model for tabular data representation

mod cell;
mod column;
mod table;

pub use cell::CellValue;
pub use column::{ColumnData, StorageKind};
pub use table::Table;
