//! Error types for DataScope

use thiserror::Error;

pub type Result<T> = std::result::Result<T, DatascopeError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DatascopeError {
    #[error("Schema error: {0}")]
    Schema(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Column not found: {0}")]
    ColumnNotFound(String),

    #[error("Column is not numeric: {0}")]
    NotNumeric(String),

    #[error("Duplicate column name: {0}")]
    DuplicateColumn(String),
}

impl DatascopeError {
    /// Schema error for a dataset whose columns disagree on row count.
    pub fn ragged(column: &str, expected: usize, actual: usize) -> Self {
        DatascopeError::Schema(format!(
            "column '{}' has {} rows, expected {}",
            column, actual, expected
        ))
    }
}
