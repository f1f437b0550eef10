//! Error types for configuration and table construction
//!
//! Malformed cell text is never an error; these only cover invalid policy
//! settings and inconsistent table shapes.

use thiserror::Error;

/// Invalid normalization or inference settings
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("threshold must be a finite value in [0, 1], got {0}")]
    InvalidThreshold(f64),

    #[error("footnote {side} delimiter must not be empty")]
    EmptyDelimiter { side: &'static str },

    #[error("{field} contains '{symbol}', which is part of numeric syntax")]
    ReservedSymbol { field: &'static str, symbol: char },

    #[error("invalid footnote pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("invalid config document: {0}")]
    Document(#[from] serde_json::Error),
}

/// Inconsistent table construction
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TableError {
    #[error("column '{name}' has {actual} rows, table has {expected}")]
    LengthMismatch {
        name: String,
        expected: usize,
        actual: usize,
    },

    #[error("duplicate column name '{0}'")]
    DuplicateColumn(String),
}
