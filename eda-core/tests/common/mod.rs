//! Shared dataset builders for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use arrow::array::{ArrayRef, Float64Array, Int64Array, StringArray};
use eda_core::dataset::Dataset;

pub fn ints(values: Vec<Option<i64>>) -> ArrayRef {
    Arc::new(Int64Array::from(values))
}

pub fn floats(values: Vec<Option<f64>>) -> ArrayRef {
    Arc::new(Float64Array::from(values))
}

pub fn strings(values: Vec<Option<&str>>) -> ArrayRef {
    Arc::new(StringArray::from(values))
}

pub fn owned_strings(values: Vec<String>) -> ArrayRef {
    Arc::new(StringArray::from(values))
}

pub fn dataset(columns: Vec<(&str, ArrayRef)>) -> Dataset {
    Dataset::try_from_columns(columns).unwrap()
}

pub fn sample_dataset() -> Dataset {
    dataset(vec![
        ("age", ints(vec![Some(10), Some(20), Some(30), None])),
        ("height", ints(vec![Some(140), Some(150), Some(160), Some(170)])),
        ("city", strings(vec![Some("A"), Some("B"), Some("A"), None])),
    ])
}
