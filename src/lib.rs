//! numclean - Numeric normalization for scraped tabular data
//!
//! Cleans human-authored numeric text (currency symbols, thousands
//! separators, percentages, footnote markers, unicode minus signs, trailing
//! units) into floats, and decides per column whether a text column is
//! really numeric.
//!
//! ```
//! use numclean::{convert_table, normalize_value, CellValue, ColumnData, Table};
//!
//! assert_eq!(normalize_value(&CellValue::from("$1,000")), Some(1000.0));
//!
//! let table = Table::from_columns([
//!     ("price", ColumnData::text(["$10", "$20", "N/A", "$30"])),
//!     ("name", ColumnData::text(["a", "b", "c", "d"])),
//! ])
//! .unwrap();
//! let converted = convert_table(&table);
//! assert_eq!(
//!     converted.column("price"),
//!     Some(&ColumnData::Numeric(vec![Some(10.0), Some(20.0), None, Some(30.0)]))
//! );
//! assert_eq!(converted.column("name"), table.column("name"));
//! ```

pub mod config;
pub mod error;
pub mod infer;
pub mod model;
pub mod normalize;
pub mod output;
pub mod parser;

pub use config::Config;
pub use error::{ConfigError, TableError};
pub use infer::{convert_table, infer_column, Conversion, TableConverter};
pub use model::{CellValue, ColumnData, StorageKind, Table};
pub use normalize::{normalize_value, ValueNormalizer};
