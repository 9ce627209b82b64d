//! DataScope: column-level profiling for in-memory tabular data
//!
//! Feed it a [`Dataset`] (ordered, equally sized named columns of raw
//! string cells, the way a delimited-file reader hands them over) and get
//! back one [`ColumnProfile`] per column: inferred type, missing ratio,
//! distinct count, example values, and numeric statistics. The [`clean`]
//! module covers the usual pre-profiling cleanup (header normalization,
//! missing-value fills, derived percentage columns) and [`sanity`] the
//! post-cleaning checks.
//!
//! Reading files and rendering reports belong to the caller; every public
//! result type derives `Serialize` so a renderer can pick the output up
//! as-is.

pub mod clean;
pub mod dataset;
pub mod errors;
pub mod infer;
pub mod profiler;
pub mod sanity;
pub mod stats;

// Re-exports
pub use clean::{add_ratio_column, clean_column_names, fill_missing, select_columns, FillReport};
pub use dataset::{Column, Dataset};
pub use errors::{DatascopeError, Result};
pub use infer::DataType;
pub use profiler::{profile, ColumnProfile, ProfileConfig, Profiler};
pub use sanity::NumericSummary;
pub use stats::NumericStats;
