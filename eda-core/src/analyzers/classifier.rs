//! Column classification into numeric, categorical and other kinds.
//!
//! Classification is driven by the Arrow storage type of a column and runs exactly
//! once per column. The result carries a per-kind payload of extracted values so
//! that downstream analyzers dispatch on [`ColumnValues`] instead of re-inspecting
//! Arrow types.
//!
//! | Arrow type                                          | Kind          |
//! |-----------------------------------------------------|---------------|
//! | integers, unsigned integers, floats, decimals       | `Numeric`     |
//! | `Utf8`, `LargeUtf8`, `Utf8View`, `Boolean`, dicts   | `Categorical` |
//! | anything else (temporal, binary, nested, `Null`)    | `Other`       |
//!
//! Floating-point `NaN` slots are treated as missing, the same as Arrow nulls.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use arrow::array::{Array, ArrayRef, AsArray};
use arrow::compute::cast;
use arrow::datatypes::{DataType, Decimal128Type, Float64Type, Int64Type, UInt64Type};
use arrow::error::ArrowError;
use arrow::util::display::{ArrayFormatter, FormatOptions};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// The kind of a column, as used to select applicable statistics and heuristics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    Numeric,
    Categorical,
    Other,
}

impl ColumnKind {
    /// Classifies an Arrow data type.
    pub fn from_data_type(data_type: &DataType) -> Self {
        match data_type {
            dt if dt.is_numeric() => ColumnKind::Numeric,
            DataType::Utf8 | DataType::LargeUtf8 | DataType::Utf8View | DataType::Boolean => {
                ColumnKind::Categorical
            }
            DataType::Dictionary(_, value_type) => match Self::from_data_type(value_type) {
                ColumnKind::Categorical => ColumnKind::Categorical,
                _ => ColumnKind::Other,
            },
            _ => ColumnKind::Other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnKind::Numeric => "numeric",
            ColumnKind::Categorical => "categorical",
            ColumnKind::Other => "other",
        }
    }
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Extracted column values, tagged by kind. `None` marks a missing slot.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnValues {
    Numeric(Vec<Option<f64>>),
    Categorical(Vec<Option<String>>),
    /// Display-rendered values of a column that is neither numeric nor categorical.
    Other(Vec<Option<String>>),
}

impl ColumnValues {
    pub fn kind(&self) -> ColumnKind {
        match self {
            ColumnValues::Numeric(_) => ColumnKind::Numeric,
            ColumnValues::Categorical(_) => ColumnKind::Categorical,
            ColumnValues::Other(_) => ColumnKind::Other,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            ColumnValues::Numeric(v) => v.len(),
            ColumnValues::Categorical(v) | ColumnValues::Other(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of missing slots.
    pub fn missing_count(&self) -> usize {
        match self {
            ColumnValues::Numeric(v) => v.iter().filter(|x| x.is_none()).count(),
            ColumnValues::Categorical(v) | ColumnValues::Other(v) => {
                v.iter().filter(|x| x.is_none()).count()
            }
        }
    }

    /// Number of distinct non-missing values.
    pub fn n_distinct(&self) -> usize {
        match self {
            ColumnValues::Numeric(v) => v
                .iter()
                .flatten()
                .map(|x| float_key(*x))
                .collect::<HashSet<_>>()
                .len(),
            ColumnValues::Categorical(v) | ColumnValues::Other(v) => v
                .iter()
                .flatten()
                .map(String::as_str)
                .collect::<HashSet<_>>()
                .len(),
        }
    }

    /// Up to `limit` distinct non-missing values in first-seen order, rendered as strings.
    pub fn example_values(&self, limit: usize) -> Vec<String> {
        let mut examples: Vec<String> = Vec::new();
        match self {
            ColumnValues::Numeric(v) => {
                let mut seen = HashSet::new();
                for x in v.iter().flatten() {
                    if examples.len() >= limit {
                        break;
                    }
                    if seen.insert(float_key(*x)) {
                        examples.push(x.to_string());
                    }
                }
            }
            ColumnValues::Categorical(v) | ColumnValues::Other(v) => {
                for s in v.iter().flatten() {
                    if examples.len() >= limit {
                        break;
                    }
                    if !examples.contains(s) {
                        examples.push(s.clone());
                    }
                }
            }
        }
        examples
    }
}

/// Hash key for a float: bit pattern with `-0.0` folded into `0.0`.
pub(crate) fn float_key(value: f64) -> u64 {
    if value == 0.0 {
        0.0f64.to_bits()
    } else {
        value.to_bits()
    }
}

/// A named column after classification.
///
/// Integer and `Decimal128` columns also keep exact `i128` keys of their values,
/// since their `f64` rendition cannot tell apart integers beyond 2^53.
#[derive(Debug, Clone)]
pub struct ClassifiedColumn {
    name: String,
    array: ArrayRef,
    values: ColumnValues,
    exact_keys: Option<Vec<Option<i128>>>,
}

impl ClassifiedColumn {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn data_type(&self) -> &DataType {
        self.array.data_type()
    }

    pub fn kind(&self) -> ColumnKind {
        self.values.kind()
    }

    pub fn values(&self) -> &ColumnValues {
        &self.values
    }

    /// Number of rows, including missing slots.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn missing_count(&self) -> usize {
        self.values.missing_count()
    }

    /// Number of non-missing values.
    pub fn count(&self) -> usize {
        self.len() - self.missing_count()
    }

    /// Number of distinct non-missing values, exact for integer storage.
    pub fn n_distinct(&self) -> usize {
        match &self.exact_keys {
            Some(keys) => keys.iter().flatten().collect::<HashSet<_>>().len(),
            None => self.values.n_distinct(),
        }
    }

    /// Up to `limit` distinct non-missing values in first-seen order.
    ///
    /// Exactly keyed columns are rendered from their Arrow storage.
    pub fn example_values(&self, limit: usize) -> Vec<String> {
        let Some(keys) = &self.exact_keys else {
            return self.values.example_values(limit);
        };
        let options = FormatOptions::default();
        let Ok(formatter) = ArrayFormatter::try_new(self.array.as_ref(), &options) else {
            return self.values.example_values(limit);
        };

        let mut seen = HashSet::new();
        let mut examples = Vec::new();
        for (i, key) in keys.iter().enumerate() {
            if examples.len() >= limit {
                break;
            }
            if let Some(key) = key {
                if seen.insert(*key) {
                    examples.push(formatter.value(i).to_string());
                }
            }
        }
        examples
    }
}

/// Classifies a single Arrow column and extracts its values.
///
/// Never fails: a column whose values cannot be extracted for its nominal kind
/// degrades to [`ColumnKind::Other`].
pub fn classify_column(name: &str, array: &ArrayRef) -> ClassifiedColumn {
    let data_type = array.data_type();
    let extracted = match ColumnKind::from_data_type(data_type) {
        ColumnKind::Numeric => extract_numeric(array).map(ColumnValues::Numeric),
        ColumnKind::Categorical => extract_categorical(array).map(ColumnValues::Categorical),
        ColumnKind::Other => Ok(ColumnValues::Other(render_values(array))),
    };

    let values = extracted.unwrap_or_else(|e| {
        warn!(
            column = name,
            data_type = %data_type,
            error = %e,
            "Column could not be extracted for its kind, treating as other"
        );
        ColumnValues::Other(render_values(array))
    });
    let exact_keys = match values {
        ColumnValues::Numeric(_) => extract_exact_keys(array),
        _ => None,
    };

    ClassifiedColumn {
        name: name.to_string(),
        array: Arc::clone(array),
        values,
        exact_keys,
    }
}

fn extract_exact_keys(array: &ArrayRef) -> Option<Vec<Option<i128>>> {
    match array.data_type() {
        dt if dt.is_signed_integer() => {
            let casted = cast(array.as_ref(), &DataType::Int64).ok()?;
            let ints = casted.as_primitive_opt::<Int64Type>()?;
            Some(ints.iter().map(|v| v.map(i128::from)).collect())
        }
        dt if dt.is_unsigned_integer() => {
            let casted = cast(array.as_ref(), &DataType::UInt64).ok()?;
            let ints = casted.as_primitive_opt::<UInt64Type>()?;
            Some(ints.iter().map(|v| v.map(i128::from)).collect())
        }
        DataType::Decimal128(_, _) => {
            let decimals = array.as_primitive_opt::<Decimal128Type>()?;
            Some(decimals.iter().collect())
        }
        _ => None,
    }
}

fn extract_numeric(array: &ArrayRef) -> Result<Vec<Option<f64>>, ArrowError> {
    let casted = cast(array.as_ref(), &DataType::Float64)?;
    let floats = casted
        .as_primitive_opt::<Float64Type>()
        .ok_or_else(|| ArrowError::CastError("expected Float64 after cast".to_string()))?;
    Ok(floats
        .iter()
        .map(|v| v.filter(|x| !x.is_nan()))
        .collect())
}

fn extract_categorical(array: &ArrayRef) -> Result<Vec<Option<String>>, ArrowError> {
    let casted = cast(array.as_ref(), &DataType::Utf8)?;
    let strings = casted
        .as_string_opt::<i32>()
        .ok_or_else(|| ArrowError::CastError("expected Utf8 after cast".to_string()))?;
    Ok(strings.iter().map(|v| v.map(str::to_string)).collect())
}

/// Renders every slot with Arrow's display formatter. Slots that cannot be
/// rendered are reported as missing.
fn render_values(array: &ArrayRef) -> Vec<Option<String>> {
    let nulls = array.logical_nulls();
    let is_null = |i: usize| nulls.as_ref().is_some_and(|n| n.is_null(i));

    let options = FormatOptions::default();
    match ArrayFormatter::try_new(array.as_ref(), &options) {
        Ok(formatter) => (0..array.len())
            .map(|i| {
                if is_null(i) {
                    None
                } else {
                    Some(formatter.value(i).to_string())
                }
            })
            .collect(),
        Err(e) => {
            warn!(
                data_type = %array.data_type(),
                error = %e,
                "Column values cannot be rendered"
            );
            vec![None; array.len()]
        }
    }
}
