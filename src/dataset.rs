//! In-memory tabular dataset model
//!
//! A [`Dataset`] is an ordered sequence of named columns of equal length.
//! Cells are stored as raw strings the way a delimited-file reader hands
//! them over; classifying a cell as missing is this module's job, so that
//! empty strings and null-ish sentinels coming out of real CSV exports are
//! treated uniformly.

use crate::{DatascopeError, Result};
use once_cell::sync::Lazy;
use std::collections::HashSet;

/// Sentinels treated as a missing cell, compared case-insensitively after
/// trimming. An all-whitespace cell is missing as well.
static MISSING_MARKERS: Lazy<HashSet<&'static str>> =
    Lazy::new(|| ["null", "nan", "na", "n/a"].into_iter().collect());

/// Returns true if the cell holds no usable value.
pub fn is_missing(cell: &str) -> bool {
    let trimmed = cell.trim();
    trimmed.is_empty() || MISSING_MARKERS.contains(trimmed.to_ascii_lowercase().as_str())
}

/// A named column of raw cell values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub name: String,
    pub values: Vec<String>,
}

impl Column {
    pub fn new(name: &str, values: Vec<&str>) -> Self {
        Self {
            name: name.to_string(),
            values: values.into_iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn from_values(name: impl Into<String>, values: Vec<String>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterator over present (non-missing) cell values.
    pub fn present_values(&self) -> impl Iterator<Item = &str> {
        self.values
            .iter()
            .map(|s| s.as_str())
            .filter(|s| !is_missing(s))
    }

    pub fn missing_count(&self) -> usize {
        self.values.iter().filter(|s| is_missing(s)).count()
    }
}

/// An ordered collection of equally sized columns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dataset {
    pub columns: Vec<Column>,
}

impl Dataset {
    pub fn new(columns: Vec<Column>) -> Self {
        Self { columns }
    }

    pub fn ncols(&self) -> usize {
        self.columns.len()
    }

    pub fn nrows(&self) -> usize {
        self.columns.first().map(|c| c.len()).unwrap_or(0)
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn column_mut(&mut self, name: &str) -> Option<&mut Column> {
        self.columns.iter_mut().find(|c| c.name == name)
    }

    /// Appends a column, rejecting duplicate names and row-count mismatches.
    pub fn push_column(&mut self, column: Column) -> Result<()> {
        if self.column(&column.name).is_some() {
            return Err(DatascopeError::DuplicateColumn(column.name));
        }
        if !self.columns.is_empty() && column.len() != self.nrows() {
            return Err(DatascopeError::ragged(
                &column.name,
                self.nrows(),
                column.len(),
            ));
        }
        self.columns.push(column);
        Ok(())
    }

    /// Checks the invariants the profiler relies on: at least one column,
    /// and every column agreeing on the row count.
    pub fn validate(&self) -> Result<()> {
        if self.columns.is_empty() {
            return Err(DatascopeError::InvalidInput(
                "dataset has no columns".to_string(),
            ));
        }
        let expected = self.columns[0].len();
        for column in &self.columns[1..] {
            if column.len() != expected {
                return Err(DatascopeError::ragged(&column.name, expected, column.len()));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_markers() {
        assert!(is_missing(""));
        assert!(is_missing("   "));
        assert!(is_missing("null"));
        assert!(is_missing("NULL"));
        assert!(is_missing("NaN"));
        assert!(is_missing("n/a"));
        assert!(!is_missing("0"));
        assert!(!is_missing("none at all"));
    }

    #[test]
    fn test_present_values_skip_missing() {
        let column = Column::new("cases", vec!["12", "", "7", "null"]);
        let present: Vec<&str> = column.present_values().collect();
        assert_eq!(present, vec!["12", "7"]);
        assert_eq!(column.missing_count(), 2);
    }

    #[test]
    fn test_push_column_rejects_ragged() {
        let mut dataset = Dataset::default();
        dataset
            .push_column(Column::new("a", vec!["1", "2", "3"]))
            .unwrap();
        let err = dataset
            .push_column(Column::new("b", vec!["1", "2"]))
            .unwrap_err();
        assert!(matches!(err, DatascopeError::Schema(_)));
    }

    #[test]
    fn test_push_column_rejects_duplicate_name() {
        let mut dataset = Dataset::default();
        dataset.push_column(Column::new("a", vec!["1"])).unwrap();
        let err = dataset
            .push_column(Column::new("a", vec!["2"]))
            .unwrap_err();
        assert_eq!(err, DatascopeError::DuplicateColumn("a".to_string()));
    }

    #[test]
    fn test_validate_empty_dataset() {
        let dataset = Dataset::default();
        assert!(matches!(
            dataset.validate(),
            Err(DatascopeError::InvalidInput(_))
        ));
    }
}
