//! The in-memory tabular dataset analyzed by the EDA core.
//!
//! A [`Dataset`] is a thin wrapper around an Arrow [`RecordBatch`]. Arrow already
//! guarantees that every column has the same length; the wrapper adds the
//! requirement that column names are unique, since every result is keyed by name.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use arrow::array::{ArrayRef, Int64Array, StringArray};
//! use eda_core::dataset::Dataset;
//!
//! let dataset = Dataset::try_from_columns(vec![
//!     ("age", Arc::new(Int64Array::from(vec![Some(10), Some(20), None])) as ArrayRef),
//!     ("city", Arc::new(StringArray::from(vec![Some("A"), None, Some("B")])) as ArrayRef),
//! ])
//! .unwrap();
//!
//! assert_eq!(dataset.n_rows(), 3);
//! assert_eq!(dataset.n_cols(), 2);
//! ```

use std::collections::HashSet;
use std::sync::Arc;

use arrow::array::ArrayRef;
use arrow::datatypes::{Field, Schema};
use arrow::record_batch::{RecordBatch, RecordBatchOptions};
use tracing::debug;

use crate::analyzers::classifier::{classify_column, ClassifiedColumn};
use crate::error::{EdaError, EdaResult};

/// An ordered collection of named, equal-length columns.
#[derive(Debug, Clone)]
pub struct Dataset {
    batch: RecordBatch,
}

impl Dataset {
    /// Wraps a record batch, rejecting duplicate column names.
    pub fn try_new(batch: RecordBatch) -> EdaResult<Self> {
        let mut seen = HashSet::new();
        for field in batch.schema_ref().fields() {
            if !seen.insert(field.name().as_str()) {
                return Err(EdaError::invalid_input(format!(
                    "duplicate column name '{}'",
                    field.name()
                )));
            }
        }
        Ok(Self { batch })
    }

    /// Builds a dataset from `(name, array)` pairs.
    ///
    /// All arrays must have the same length. An empty iterator yields a dataset
    /// with zero columns and zero rows.
    pub fn try_from_columns<I, S>(columns: I) -> EdaResult<Self>
    where
        I: IntoIterator<Item = (S, ArrayRef)>,
        S: Into<String>,
    {
        let mut fields = Vec::new();
        let mut arrays = Vec::new();
        let mut n_rows: Option<usize> = None;

        for (name, array) in columns {
            let name = name.into();
            match n_rows {
                None => n_rows = Some(array.len()),
                Some(expected) if expected != array.len() => {
                    return Err(EdaError::invalid_input(format!(
                        "column '{name}' has {} values, expected {expected}",
                        array.len()
                    )));
                }
                Some(_) => {}
            }
            fields.push(Field::new(name, array.data_type().clone(), true));
            arrays.push(array);
        }

        let schema = Arc::new(Schema::new(fields));
        let options = RecordBatchOptions::new().with_row_count(Some(n_rows.unwrap_or(0)));
        let batch = RecordBatch::try_new_with_options(schema, arrays, &options)?;
        Self::try_new(batch)
    }

    /// Number of rows.
    pub fn n_rows(&self) -> usize {
        self.batch.num_rows()
    }

    /// Number of columns.
    pub fn n_cols(&self) -> usize {
        self.batch.num_columns()
    }

    /// True when there is nothing to analyze (zero rows or zero columns).
    pub fn is_empty(&self) -> bool {
        self.n_rows() == 0 || self.n_cols() == 0
    }

    /// Column names in dataset order.
    pub fn column_names(&self) -> Vec<String> {
        self.batch
            .schema_ref()
            .fields()
            .iter()
            .map(|f| f.name().clone())
            .collect()
    }

    /// Looks up a column by name.
    pub fn column(&self, name: &str) -> Option<&ArrayRef> {
        self.batch.column_by_name(name)
    }

    /// The underlying record batch.
    pub fn record_batch(&self) -> &RecordBatch {
        &self.batch
    }

    /// Classifies every column once, in dataset order.
    pub fn classify_columns(&self) -> Vec<ClassifiedColumn> {
        if self.is_empty() {
            debug!(
                rows = self.n_rows(),
                cols = self.n_cols(),
                "Classifying an empty dataset"
            );
        }
        self.batch
            .schema_ref()
            .fields()
            .iter()
            .zip(self.batch.columns())
            .map(|(field, array)| classify_column(field.name(), array))
            .collect()
    }
}

impl TryFrom<RecordBatch> for Dataset {
    type Error = EdaError;

    fn try_from(batch: RecordBatch) -> EdaResult<Self> {
        Self::try_new(batch)
    }
}
