//! Dataset cleaning operations
//!
//! The usual pre-profiling pipeline for messy exports: normalize column
//! names, fill missing cells with type-appropriate defaults, and derive
//! percentage metrics from pairs of numeric columns. All operations work
//! on the in-memory [`Dataset`]; file IO stays with the caller.

use crate::dataset::{is_missing, Column, Dataset};
use crate::infer::{infer_type, parse_float};
use crate::{DatascopeError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{debug, info};

/// Normalizes a raw header into a safe identifier-style name.
fn sanitize_name(name: &str) -> String {
    let mut cleaned: String = name
        .trim()
        .chars()
        .filter_map(|c| match c {
            ' ' => Some('_'),
            '-' | '/' | '(' | ')' => None,
            c => Some(c),
        })
        .collect();
    while cleaned.contains("__") {
        cleaned = cleaned.replace("__", "_");
    }
    cleaned
}

/// Rewrites every column name with [`sanitize_name`], returning how many
/// names changed. Fails with `DuplicateColumn` when two headers would
/// collapse to the same name, leaving the dataset untouched.
pub fn clean_column_names(dataset: &mut Dataset) -> Result<usize> {
    let cleaned: Vec<String> = dataset
        .columns
        .iter()
        .map(|c| sanitize_name(&c.name))
        .collect();
    let mut unique = HashSet::new();
    for name in &cleaned {
        if !unique.insert(name.as_str()) {
            return Err(DatascopeError::DuplicateColumn(name.clone()));
        }
    }
    let mut renamed = 0;
    for (column, name) in dataset.columns.iter_mut().zip(cleaned) {
        if column.name != name {
            debug!("Renamed column '{}' to '{}'", column.name, name);
            column.name = name;
            renamed += 1;
        }
    }
    Ok(renamed)
}

/// Per-column record of how many cells [`fill_missing`] replaced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnFill {
    pub column: String,
    pub filled: usize,
    pub replacement: String,
}

/// Outcome of a [`fill_missing`] pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FillReport {
    pub fills: Vec<ColumnFill>,
}

impl FillReport {
    pub fn total_filled(&self) -> usize {
        self.fills.iter().map(|f| f.filled).sum()
    }
}

/// Replaces missing cells with `"0"` in numeric-inferred columns and
/// `"Unknown"` everywhere else. Columns with nothing missing are left out
/// of the report.
pub fn fill_missing(dataset: &mut Dataset) -> FillReport {
    let mut report = FillReport::default();
    for column in &mut dataset.columns {
        let replacement = if infer_type(column.present_values()).is_numeric() {
            "0"
        } else {
            "Unknown"
        };
        let mut filled = 0;
        for value in &mut column.values {
            if is_missing(value) {
                *value = replacement.to_string();
                filled += 1;
            }
        }
        if filled > 0 {
            report.fills.push(ColumnFill {
                column: column.name.clone(),
                filled,
                replacement: replacement.to_string(),
            });
        }
    }
    if report.total_filled() > 0 {
        info!(
            "Filled {} missing cells across {} columns",
            report.total_filled(),
            report.fills.len()
        );
    }
    report
}

/// Appends a derived percentage column `numerator / denominator * 100`,
/// rounded to two decimals per row. Rows with a non-positive denominator
/// yield `0`; rows where either operand is missing stay missing.
pub fn add_ratio_column(
    dataset: &mut Dataset,
    numerator: &str,
    denominator: &str,
    name: &str,
) -> Result<()> {
    if dataset.column(name).is_some() {
        return Err(DatascopeError::DuplicateColumn(name.to_string()));
    }
    let num = numeric_column(dataset, numerator)?;
    let den = numeric_column(dataset, denominator)?;

    let values: Vec<String> = num
        .values
        .iter()
        .zip(&den.values)
        .map(|(n, d)| match (parse_float(n), parse_float(d)) {
            (Some(n), Some(d)) if d > 0.0 => format!("{:.2}", n / d * 100.0),
            (Some(_), Some(_)) => "0".to_string(),
            _ => String::new(),
        })
        .collect();

    dataset.push_column(Column::from_values(name, values))?;
    debug!(
        "Derived column '{}' from '{}' / '{}'",
        name, numerator, denominator
    );
    Ok(())
}

fn numeric_column<'a>(dataset: &'a Dataset, name: &str) -> Result<&'a Column> {
    let column = dataset
        .column(name)
        .ok_or_else(|| DatascopeError::ColumnNotFound(name.to_string()))?;
    if !infer_type(column.present_values()).is_numeric() {
        return Err(DatascopeError::NotNumeric(name.to_string()));
    }
    Ok(column)
}

/// Projects the dataset onto the named columns, in the order given. Names
/// not present in the dataset are skipped.
pub fn select_columns(dataset: &Dataset, names: &[&str]) -> Dataset {
    let columns = names
        .iter()
        .filter_map(|name| dataset.column(name).cloned())
        .collect();
    Dataset::new(columns)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_name() {
        assert_eq!(sanitize_name(" Cases - newly reported "), "Cases_newly_reported");
        assert_eq!(sanitize_name("Growth (%) / week"), "Growth_%_week");
        assert_eq!(sanitize_name("Name"), "Name");
    }

    #[test]
    fn test_clean_column_names_counts_renames() {
        let mut dataset = Dataset::new(vec![
            Column::new("WHO Region", vec!["eu"]),
            Column::new("Name", vec!["x"]),
        ]);
        assert_eq!(clean_column_names(&mut dataset).unwrap(), 1);
        assert_eq!(dataset.columns[0].name, "WHO_Region");
    }

    #[test]
    fn test_clean_column_names_rejects_collision() {
        let mut dataset = Dataset::new(vec![
            Column::new("a b", vec!["1"]),
            Column::new("a_b", vec!["2"]),
        ]);
        let err = clean_column_names(&mut dataset).unwrap_err();
        assert_eq!(err, DatascopeError::DuplicateColumn("a_b".to_string()));
        // untouched on failure
        assert_eq!(dataset.columns[0].name, "a b");
    }

    #[test]
    fn test_fill_missing_by_inferred_type() {
        let mut dataset = Dataset::new(vec![
            Column::new("cases", vec!["1", "", "3"]),
            Column::new("region", vec!["eu", "null", "af"]),
        ]);
        let report = fill_missing(&mut dataset);
        assert_eq!(dataset.columns[0].values[1], "0");
        assert_eq!(dataset.columns[1].values[1], "Unknown");
        assert_eq!(report.total_filled(), 2);
    }

    #[test]
    fn test_add_ratio_column() {
        let mut dataset = Dataset::new(vec![
            Column::new("deaths", vec!["5", "0", ""]),
            Column::new("cases", vec!["200", "0", "10"]),
        ]);
        add_ratio_column(&mut dataset, "deaths", "cases", "fatality_rate").unwrap();
        let derived = dataset.column("fatality_rate").unwrap();
        assert_eq!(derived.values, vec!["2.50", "0", ""]);
    }

    #[test]
    fn test_add_ratio_column_rejects_text_operand() {
        let mut dataset = Dataset::new(vec![
            Column::new("name", vec!["Chile"]),
            Column::new("cases", vec!["10"]),
        ]);
        let err = add_ratio_column(&mut dataset, "name", "cases", "r").unwrap_err();
        assert_eq!(err, DatascopeError::NotNumeric("name".to_string()));
    }

    #[test]
    fn test_select_columns_keeps_requested_order() {
        let dataset = Dataset::new(vec![
            Column::new("a", vec!["1"]),
            Column::new("b", vec!["2"]),
            Column::new("c", vec!["3"]),
        ]);
        let selected = select_columns(&dataset, &["c", "a", "missing"]);
        let names: Vec<&str> = selected.columns.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["c", "a"]);
    }
}
