//! Column type inference
//!
//! Parse attempts run in a fixed order (integer, float, boolean) and the
//! first rule that covers every present value wins. A column whose values
//! all parse as *some* scalar but under no single rule is `Mixed`; anything
//! containing free text is `Text`.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

static TRUE_TOKENS: Lazy<HashSet<&'static str>> =
    Lazy::new(|| ["true", "yes", "t", "y"].into_iter().collect());
static FALSE_TOKENS: Lazy<HashSet<&'static str>> =
    Lazy::new(|| ["false", "no", "f", "n"].into_iter().collect());

/// Inferred type of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    Integer,
    Float,
    Boolean,
    Text,
    Mixed,
}

impl DataType {
    pub fn is_numeric(&self) -> bool {
        matches!(self, DataType::Integer | DataType::Float)
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DataType::Integer => "integer",
            DataType::Float => "float",
            DataType::Boolean => "boolean",
            DataType::Text => "text",
            DataType::Mixed => "mixed",
        };
        f.write_str(name)
    }
}

pub fn parse_integer(value: &str) -> Option<i64> {
    value.trim().parse::<i64>().ok()
}

pub fn parse_float(value: &str) -> Option<f64> {
    let parsed = value.trim().parse::<f64>().ok()?;
    if parsed.is_finite() {
        Some(parsed)
    } else {
        None
    }
}

pub fn parse_boolean(value: &str) -> Option<bool> {
    let token = value.trim().to_ascii_lowercase();
    if TRUE_TOKENS.contains(token.as_str()) {
        Some(true)
    } else if FALSE_TOKENS.contains(token.as_str()) {
        Some(false)
    } else {
        None
    }
}

/// Infers the type of a column from its present values.
///
/// A column with no present values is typed [`DataType::Text`] by
/// convention. Integer takes precedence over float, so `["1","2"]` is
/// integer while `["1.5","2"]` is float (any fractional component demotes
/// the whole column to float).
pub fn infer_type<'a>(values: impl IntoIterator<Item = &'a str>) -> DataType {
    let mut seen_any = false;
    let mut all_integer = true;
    let mut all_float = true;
    let mut all_boolean = true;
    let mut any_text = false;

    for value in values {
        seen_any = true;
        let is_integer = parse_integer(value).is_some();
        let is_float = parse_float(value).is_some();
        let is_boolean = parse_boolean(value).is_some();
        all_integer &= is_integer;
        all_float &= is_float;
        all_boolean &= is_boolean;
        if !is_integer && !is_float && !is_boolean {
            any_text = true;
        }
    }

    if !seen_any || any_text {
        return DataType::Text;
    }
    if all_integer {
        DataType::Integer
    } else if all_float {
        DataType::Float
    } else if all_boolean {
        DataType::Boolean
    } else {
        DataType::Mixed
    }
}
