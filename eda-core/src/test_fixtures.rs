//! Canonical datasets for tests and benchmarks.

use std::sync::Arc;

use arrow::array::{ArrayRef, Float64Array, Int64Array, StringArray};

use crate::dataset::Dataset;

fn build(columns: Vec<(&str, ArrayRef)>) -> Dataset {
    Dataset::try_from_columns(columns).expect("fixture columns are well formed")
}

fn ints(values: Vec<Option<i64>>) -> ArrayRef {
    Arc::new(Int64Array::from(values))
}

fn floats(values: Vec<f64>) -> ArrayRef {
    Arc::new(Float64Array::from(values))
}

fn strings<S: AsRef<str>>(values: Vec<Option<S>>) -> ArrayRef {
    Arc::new(StringArray::from_iter(values))
}

fn present<T>(values: impl IntoIterator<Item = T>) -> Vec<Option<T>> {
    values.into_iter().map(Some).collect()
}

/// `age=[10,20,30,null]`, `height=[140,150,160,170]`, `city=["A","B","A",null]`.
pub fn sample_dataset() -> Dataset {
    build(vec![
        ("age", ints(vec![Some(10), Some(20), Some(30), None])),
        ("height", ints(present([140, 150, 160, 170]))),
        ("city", strings(vec![Some("A"), Some("B"), Some("A"), None])),
    ])
}

/// Two constant columns (numeric and string) next to a strictly increasing one.
pub fn constant_dataset() -> Dataset {
    build(vec![
        ("constant_col", ints(present([1, 1, 1, 1]))),
        ("normal_col", ints(present([1, 2, 3, 4]))),
        ("another_constant", strings(present(["A", "A", "A", "A"]))),
    ])
}

/// An all-unique string column, a two-valued string column and a numeric column.
pub fn high_cardinality_dataset(n_rows: usize) -> Dataset {
    let unique = present((0..n_rows).map(|i| format!("value_{i}")));
    let alternating = present((0..n_rows).map(|i| if i % 2 == 0 { "A" } else { "B" }));

    build(vec![
        ("high_card_col", strings(unique)),
        ("low_card_col", strings(alternating)),
        ("numeric_col", ints(present(0..n_rows as i64))),
    ])
}

/// Numeric columns with 50%, 10% and 0% zeros plus a string column.
pub fn zero_values_dataset() -> Dataset {
    let labels = ["A", "B", "C", "A", "B", "C", "A", "B", "C", "D"];

    build(vec![
        ("many_zeros", ints(present([0, 0, 0, 0, 0, 1, 2, 3, 4, 5]))),
        ("few_zeros", ints(present(0..10))),
        ("no_zeros", ints(present(1..=10))),
        ("string_col", strings(present(labels))),
    ])
}

/// A dataset that triggers every column heuristic at once.
pub fn all_heuristics_dataset(n_rows: usize) -> Dataset {
    let zeros = n_rows * 7 / 12;
    let many_zeros = present((0..n_rows).map(|i| i64::from(i >= zeros)));
    let high_card = present((0..n_rows).map(|i| format!("cat_{i}")));

    build(vec![
        ("constant", ints(vec![Some(5); n_rows])),
        ("high_card", strings(high_card)),
        ("many_zeros", ints(many_zeros)),
        ("normal", ints(present(0..n_rows as i64))),
    ])
}

/// Three numeric columns: `x`, `y = 2x + 1` and `z = -x`, plus a constant `c`.
pub fn linear_dataset(n_rows: usize) -> Dataset {
    let x: Vec<f64> = (0..n_rows).map(|i| i as f64).collect();
    let y: Vec<f64> = x.iter().map(|v| 2.0 * v + 1.0).collect();
    let z: Vec<f64> = x.iter().map(|v| -v).collect();

    build(vec![
        ("x", floats(x)),
        ("y", floats(y)),
        ("z", floats(z)),
        ("c", floats(vec![3.0; n_rows])),
    ])
}

/// Columns of every kind with zero rows.
pub fn empty_rows_dataset() -> Dataset {
    build(vec![
        ("n", ints(Vec::new())),
        ("s", strings(Vec::<Option<&str>>::new())),
    ])
}

/// A dataset with no columns at all.
pub fn no_columns_dataset() -> Dataset {
    build(Vec::new())
}
