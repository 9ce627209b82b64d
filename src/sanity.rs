//! Post-cleaning sanity checks
//!
//! Quick answers to "does this cleaned dataset look right": an extended
//! numeric summary per column and scans for rows holding suspicious
//! values (a fatality rate above 50%, a negative growth rate).

use crate::dataset::Dataset;
use crate::infer::parse_float;
use crate::stats::{median_of_sorted, percentile_of_sorted};
use crate::{DatascopeError, Result};
use serde::{Deserialize, Serialize};

/// Extended descriptive summary of one numeric column, the shape of a
/// dataframe `describe()` block.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NumericSummary {
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub q25: f64,
    pub median: f64,
    pub q75: f64,
    pub max: f64,
}

/// Summarizes the parseable values of the named column. Returns `None`
/// when no cell parses as a number.
pub fn describe(dataset: &Dataset, column: &str) -> Result<Option<NumericSummary>> {
    let column = dataset
        .column(column)
        .ok_or_else(|| DatascopeError::ColumnNotFound(column.to_string()))?;
    let mut values: Vec<f64> = column.present_values().filter_map(parse_float).collect();
    if values.is_empty() {
        return Ok(None);
    }
    values.sort_by(f64::total_cmp);

    let count = values.len();
    let mean = values.iter().sum::<f64>() / count as f64;
    // Sample standard deviation, ddof=1, matching the usual describe()
    let std = if count > 1 {
        let variance = values
            .iter()
            .map(|v| (v - mean) * (v - mean))
            .sum::<f64>()
            / (count - 1) as f64;
        variance.sqrt()
    } else {
        0.0
    };

    Ok(Some(NumericSummary {
        count,
        mean,
        std,
        min: values[0],
        q25: percentile_of_sorted(&values, 0.25),
        median: median_of_sorted(&values),
        q75: percentile_of_sorted(&values, 0.75),
        max: values[count - 1],
    }))
}

/// Row indices whose value in the named column exceeds `threshold`.
/// Missing and unparseable cells are skipped.
pub fn rows_above(dataset: &Dataset, column: &str, threshold: f64) -> Result<Vec<usize>> {
    scan(dataset, column, |v| v > threshold)
}

/// Row indices whose value in the named column falls below `threshold`.
pub fn rows_below(dataset: &Dataset, column: &str, threshold: f64) -> Result<Vec<usize>> {
    scan(dataset, column, |v| v < threshold)
}

fn scan(
    dataset: &Dataset,
    column: &str,
    predicate: impl Fn(f64) -> bool,
) -> Result<Vec<usize>> {
    let column = dataset
        .column(column)
        .ok_or_else(|| DatascopeError::ColumnNotFound(column.to_string()))?;
    Ok(column
        .values
        .iter()
        .enumerate()
        .filter_map(|(index, value)| {
            parse_float(value).and_then(|v| predicate(v).then_some(index))
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Column;

    fn rates() -> Dataset {
        Dataset::new(vec![Column::new(
            "rate",
            vec!["1.0", "2.0", "3.0", "4.0", ""],
        )])
    }

    #[test]
    fn test_describe_matches_dataframe_conventions() {
        let summary = describe(&rates(), "rate").unwrap().unwrap();
        assert_eq!(summary.count, 4);
        assert_eq!(summary.mean, 2.5);
        assert_eq!(summary.median, 2.5);
        assert_eq!(summary.q25, 1.75);
        assert_eq!(summary.q75, 3.25);
        assert!((summary.std - 1.2909944487).abs() < 1e-9);
    }

    #[test]
    fn test_describe_text_column_is_none() {
        let dataset = Dataset::new(vec![Column::new("name", vec!["Chile", "Peru"])]);
        assert_eq!(describe(&dataset, "name").unwrap(), None);
    }

    #[test]
    fn test_rows_above_and_below() {
        let dataset = rates();
        assert_eq!(rows_above(&dataset, "rate", 2.5).unwrap(), vec![2, 3]);
        assert_eq!(rows_below(&dataset, "rate", 0.0).unwrap(), Vec::<usize>::new());
    }

    #[test]
    fn test_unknown_column() {
        let err = rows_above(&rates(), "nope", 0.0).unwrap_err();
        assert_eq!(err, DatascopeError::ColumnNotFound("nope".to_string()));
    }
}
