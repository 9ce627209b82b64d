//! Column profiling engine
//!
//! Turns a [`Dataset`] into per-column descriptive metadata: inferred type,
//! missing ratio, distinct count, example values, and numeric statistics.
//! Profiling is a pure function of the dataset; running it twice yields
//! identical results.

use crate::dataset::{is_missing, Column, Dataset};
use crate::infer::{infer_type, parse_boolean, parse_float, parse_integer, DataType};
use crate::stats::NumericStats;
use crate::Result;
use ordered_float::NotNan;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::info;

/// Configuration for the profiler
#[derive(Debug, Clone)]
pub struct ProfileConfig {
    /// How many example values to keep per column
    pub max_examples: usize,
    /// Profile columns on the rayon thread pool. Output order is the
    /// dataset's column order either way.
    pub parallel: bool,
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            max_examples: 3,
            parallel: false,
        }
    }
}

/// Descriptive metadata for one column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnProfile {
    pub name: String,
    pub data_type: DataType,
    pub row_count: usize,
    pub missing_count: usize,
    /// `missing_count / row_count`, unrounded; 0.0 for an empty column.
    pub missing_ratio: f64,
    /// Unique present values, compared by parsed value for typed columns.
    pub distinct_count: usize,
    /// First distinct present values in row order.
    pub examples: Vec<String>,
    /// Present-value statistics; `None` for non-numeric columns and for
    /// numeric-named columns that turned out to hold no values.
    pub stats: Option<NumericStats>,
}

impl ColumnProfile {
    /// Missing percentage rounded to two decimals, the form reports use.
    pub fn missing_percent(&self) -> f64 {
        (self.missing_ratio * 10_000.0).round() / 100.0
    }
}

/// Main profiling interface
pub struct Profiler {
    config: ProfileConfig,
}

impl Profiler {
    pub fn new(config: ProfileConfig) -> Self {
        Self { config }
    }

    /// Profiles every column of the dataset, in column order.
    ///
    /// Fails with [`crate::DatascopeError::InvalidInput`] when the dataset
    /// has no columns and with [`crate::DatascopeError::Schema`] when
    /// columns disagree on row count. No partial result is returned.
    pub fn profile(&self, dataset: &Dataset) -> Result<Vec<ColumnProfile>> {
        dataset.validate()?;
        let profiles: Vec<ColumnProfile> = if self.config.parallel {
            dataset
                .columns
                .par_iter()
                .map(|column| profile_column(column, self.config.max_examples))
                .collect()
        } else {
            dataset
                .columns
                .iter()
                .map(|column| profile_column(column, self.config.max_examples))
                .collect()
        };
        info!(
            "Profiled {} columns over {} rows",
            profiles.len(),
            dataset.nrows()
        );
        Ok(profiles)
    }
}

impl Default for Profiler {
    fn default() -> Self {
        Self::new(ProfileConfig::default())
    }
}

/// Profiles a dataset with the default configuration.
pub fn profile(dataset: &Dataset) -> Result<Vec<ColumnProfile>> {
    Profiler::default().profile(dataset)
}

/// Normalized cell value used for distinct counting, so that `"2"` and
/// `"2.0"` collapse in a float column while staying apart in a text one.
#[derive(PartialEq, Eq, Hash)]
enum ValueKey {
    Int(i64),
    Float(NotNan<f64>),
    Bool(bool),
    Text(String),
}

fn value_key(value: &str, data_type: DataType) -> ValueKey {
    let parsed = match data_type {
        DataType::Integer => parse_integer(value).map(ValueKey::Int),
        DataType::Float => float_key(value),
        DataType::Boolean => parse_boolean(value).map(ValueKey::Bool),
        DataType::Mixed => float_key(value).or_else(|| parse_boolean(value).map(ValueKey::Bool)),
        DataType::Text => None,
    };
    parsed.unwrap_or_else(|| ValueKey::Text(value.to_string()))
}

fn float_key(value: &str) -> Option<ValueKey> {
    parse_float(value)
        .and_then(|v| NotNan::new(v).ok())
        .map(ValueKey::Float)
}

fn profile_column(column: &Column, max_examples: usize) -> ColumnProfile {
    let row_count = column.len();
    let missing_count = column.missing_count();
    let missing_ratio = if row_count == 0 {
        0.0
    } else {
        missing_count as f64 / row_count as f64
    };

    let data_type = infer_type(column.present_values());

    let mut seen = HashSet::new();
    let mut examples = Vec::new();
    let mut numeric = Vec::new();
    for value in &column.values {
        if is_missing(value) {
            continue;
        }
        if seen.insert(value_key(value, data_type)) && examples.len() < max_examples {
            examples.push(value.trim().to_string());
        }
        if data_type.is_numeric() {
            if let Some(parsed) = parse_float(value) {
                numeric.push(parsed);
            }
        }
    }

    let stats = if data_type.is_numeric() {
        NumericStats::from_values(&numeric)
    } else {
        None
    };

    ColumnProfile {
        name: column.name.clone(),
        data_type,
        row_count,
        missing_count,
        missing_ratio,
        distinct_count: seen.len(),
        examples,
        stats,
    }
}
