//! Per-column descriptive statistics.
//!
//! [`summarize_dataset`] produces one [`ColumnSummary`] per column, in dataset
//! order. Every summary carries the kind-independent counts (non-missing count,
//! missing count and share, distinct count) plus a [`KindStats`] payload:
//!
//! - **Numeric**: mean, sample standard deviation (n-1 denominator), min, max and
//!   the 25th/50th/75th percentiles with linear interpolation.
//! - **Categorical**: the most frequent value and its frequency. Ties go to the
//!   value seen first.
//! - **Other**: no kind-specific statistics.
//!
//! Statistics that are undefined for the data at hand (a mean over zero values,
//! a standard deviation over fewer than two) are `None`, never `0` or `NaN`.

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::analyzers::classifier::{ClassifiedColumn, ColumnKind, ColumnValues};
use crate::analyzers::missing::share;
use crate::analyzers::top_categories::value_counts;
use crate::dataset::Dataset;

/// Number of example values kept per column.
pub const EXAMPLE_VALUES: usize = 3;

/// The 25th, 50th and 75th percentiles.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Quantiles {
    pub q25: Option<f64>,
    pub q50: Option<f64>,
    pub q75: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NumericStats {
    pub mean: Option<f64>,
    /// Sample standard deviation.
    pub std: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub quantiles: Quantiles,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CategoricalStats {
    pub mode: Option<String>,
    pub mode_frequency: usize,
}

/// Kind-specific statistics of a column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum KindStats {
    Numeric(NumericStats),
    Categorical(CategoricalStats),
    Other,
}

impl KindStats {
    pub fn kind(&self) -> ColumnKind {
        match self {
            KindStats::Numeric(_) => ColumnKind::Numeric,
            KindStats::Categorical(_) => ColumnKind::Categorical,
            KindStats::Other => ColumnKind::Other,
        }
    }

    pub fn as_numeric(&self) -> Option<&NumericStats> {
        match self {
            KindStats::Numeric(stats) => Some(stats),
            _ => None,
        }
    }

    pub fn as_categorical(&self) -> Option<&CategoricalStats> {
        match self {
            KindStats::Categorical(stats) => Some(stats),
            _ => None,
        }
    }
}

/// Statistical record of a single column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnSummary {
    pub name: String,
    /// Arrow storage type, e.g. `Int64` or `Utf8`.
    pub dtype: String,
    pub count: usize,
    pub missing_count: usize,
    pub missing_share: f64,
    pub n_distinct: usize,
    pub example_values: Vec<String>,
    pub stats: KindStats,
}

impl ColumnSummary {
    pub fn kind(&self) -> ColumnKind {
        self.stats.kind()
    }

    /// Summarizes an already classified column. `n_rows` is the dataset row count.
    pub fn from_column(column: &ClassifiedColumn, n_rows: usize) -> Self {
        let missing_count = column.missing_count();
        let stats = match column.values() {
            ColumnValues::Numeric(values) => KindStats::Numeric(numeric_stats(values)),
            ColumnValues::Categorical(values) => {
                KindStats::Categorical(categorical_stats(values))
            }
            ColumnValues::Other(_) => KindStats::Other,
        };

        Self {
            name: column.name().to_string(),
            dtype: column.data_type().to_string(),
            count: column.count(),
            missing_count,
            missing_share: share(missing_count, n_rows),
            n_distinct: column.n_distinct(),
            example_values: column.example_values(EXAMPLE_VALUES),
            stats,
        }
    }
}

/// Dataset-level summary: shape plus one [`ColumnSummary`] per column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetSummary {
    pub n_rows: usize,
    pub n_cols: usize,
    pub columns: Vec<ColumnSummary>,
}

impl DatasetSummary {
    pub fn column(&self, name: &str) -> Option<&ColumnSummary> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn columns_of_kind(&self, kind: ColumnKind) -> impl Iterator<Item = &ColumnSummary> {
        self.columns.iter().filter(move |c| c.kind() == kind)
    }

    pub fn count_of_kind(&self, kind: ColumnKind) -> usize {
        self.columns_of_kind(kind).count()
    }
}

/// Produces one statistical record per column, preserving column order.
#[instrument(skip(dataset), fields(rows = dataset.n_rows(), cols = dataset.n_cols()))]
pub fn summarize_dataset(dataset: &Dataset) -> DatasetSummary {
    summarize_columns(dataset.n_rows(), &dataset.classify_columns())
}

pub(crate) fn summarize_columns(n_rows: usize, classified: &[ClassifiedColumn]) -> DatasetSummary {
    let columns: Vec<ColumnSummary> = classified
        .iter()
        .map(|column| {
            let summary = ColumnSummary::from_column(column, n_rows);
            debug!(
                column = %summary.name,
                kind = %summary.kind(),
                count = summary.count,
                n_distinct = summary.n_distinct,
                "Summarized column"
            );
            summary
        })
        .collect();

    DatasetSummary {
        n_rows,
        n_cols: classified.len(),
        columns,
    }
}

fn numeric_stats(values: &[Option<f64>]) -> NumericStats {
    let mut present: Vec<f64> = values.iter().flatten().copied().collect();
    if present.is_empty() {
        return NumericStats::default();
    }

    // Welford update
    let mut mean = 0.0;
    let mut m2 = 0.0;
    for (i, x) in present.iter().enumerate() {
        let delta = x - mean;
        mean += delta / (i + 1) as f64;
        m2 += delta * (x - mean);
    }
    let std = if present.len() < 2 {
        None
    } else {
        Some((m2 / (present.len() - 1) as f64).sqrt())
    };

    present.sort_by(f64::total_cmp);

    NumericStats {
        mean: finite(mean),
        std: std.and_then(finite),
        min: present.first().copied(),
        max: present.last().copied(),
        quantiles: Quantiles {
            q25: percentile(&present, 0.25),
            q50: percentile(&present, 0.50),
            q75: percentile(&present, 0.75),
        },
    }
}

fn finite(value: f64) -> Option<f64> {
    value.is_finite().then_some(value)
}

/// Linear-interpolated percentile of sorted values, at position `p * (n - 1)`.
pub(crate) fn percentile(sorted: &[f64], p: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    let position = p.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let fraction = position - lower as f64;
    let (a, b) = (sorted[lower], sorted[upper]);
    let value = a + fraction * (b - a);
    if value.is_finite() {
        Some(value)
    } else {
        // b - a overflowed
        finite(a * (1.0 - fraction) + b * fraction)
    }
}

fn categorical_stats(values: &[Option<String>]) -> CategoricalStats {
    match value_counts(values).into_iter().next() {
        Some((mode, mode_frequency)) => CategoricalStats {
            mode: Some(mode.to_string()),
            mode_frequency,
        },
        None => CategoricalStats::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::{empty_rows_dataset, no_columns_dataset, sample_dataset};
    use arrow::array::{ArrayRef, Float64Array, Int64Array, StringArray};
    use std::sync::Arc;

    fn approx(a: Option<f64>, b: f64) -> bool {
        a.is_some_and(|a| (a - b).abs() < 1e-9)
    }

    #[test]
    fn test_summarize_sample_dataset() {
        let summary = summarize_dataset(&sample_dataset());

        assert_eq!(summary.n_rows, 4);
        assert_eq!(summary.n_cols, 3);
        let names: Vec<&str> = summary.columns.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["age", "height", "city"]);

        let age = summary.column("age").unwrap();
        assert_eq!(age.kind(), ColumnKind::Numeric);
        assert_eq!(age.dtype, "Int64");
        assert_eq!(age.count, 3);
        assert_eq!(age.missing_count, 1);
        assert_eq!(age.missing_share, 0.25);
        assert_eq!(age.n_distinct, 3);

        let stats = age.stats.as_numeric().unwrap();
        assert!(approx(stats.mean, 20.0));
        assert!(approx(stats.std, 10.0));
        assert_eq!(stats.min, Some(10.0));
        assert_eq!(stats.max, Some(30.0));
        assert!(approx(stats.quantiles.q25, 15.0));
        assert!(approx(stats.quantiles.q50, 20.0));
        assert!(approx(stats.quantiles.q75, 25.0));

        let city = summary.column("city").unwrap();
        assert_eq!(city.kind(), ColumnKind::Categorical);
        let stats = city.stats.as_categorical().unwrap();
        assert_eq!(stats.mode.as_deref(), Some("A"));
        assert_eq!(stats.mode_frequency, 2);
        assert_eq!(city.example_values, vec!["A", "B"]);
    }

    #[test]
    fn test_all_missing_numeric_is_undefined() {
        let dataset = Dataset::try_from_columns(vec![(
            "x",
            Arc::new(Float64Array::from(vec![None, None, Some(f64::NAN)])) as ArrayRef,
        )])
        .unwrap();
        let summary = summarize_dataset(&dataset);
        let x = &summary.columns[0];

        assert_eq!(x.count, 0);
        assert_eq!(x.missing_share, 1.0);
        assert_eq!(x.n_distinct, 0);
        assert_eq!(x.stats, KindStats::Numeric(NumericStats::default()));
    }

    #[test]
    fn test_single_value_has_no_std() {
        let dataset = Dataset::try_from_columns(vec![(
            "x",
            Arc::new(Float64Array::from(vec![Some(4.0), None])) as ArrayRef,
        )])
        .unwrap();
        let stats = summarize_dataset(&dataset).columns[0]
            .stats
            .as_numeric()
            .cloned()
            .unwrap();

        assert_eq!(stats.mean, Some(4.0));
        assert_eq!(stats.std, None);
        assert_eq!(stats.quantiles.q75, Some(4.0));
    }

    #[test]
    fn test_mode_tie_prefers_first_seen() {
        let dataset = Dataset::try_from_columns(vec![(
            "s",
            Arc::new(StringArray::from(vec!["b", "a", "a", "b", "c"])) as ArrayRef,
        )])
        .unwrap();
        let summary = summarize_dataset(&dataset);
        let stats = summary.columns[0].stats.as_categorical().unwrap();

        assert_eq!(stats.mode.as_deref(), Some("b"));
        assert_eq!(stats.mode_frequency, 2);
    }

    #[test]
    fn test_all_missing_categorical_has_no_mode() {
        let dataset = Dataset::try_from_columns(vec![(
            "s",
            Arc::new(StringArray::from(vec![None::<&str>, None])) as ArrayRef,
        )])
        .unwrap();
        let summary = summarize_dataset(&dataset);
        assert_eq!(
            summary.columns[0].stats,
            KindStats::Categorical(CategoricalStats::default())
        );
    }

    #[test]
    fn test_percentile_interpolation() {
        let sorted = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(percentile(&sorted, 0.0), Some(1.0));
        assert_eq!(percentile(&sorted, 1.0), Some(4.0));
        assert_eq!(percentile(&sorted, 0.5), Some(2.5));
        assert_eq!(percentile(&sorted, 0.25), Some(1.75));
        assert_eq!(percentile(&[], 0.5), None);
    }

    #[test]
    fn test_empty_datasets() {
        let summary = summarize_dataset(&empty_rows_dataset());
        assert_eq!(summary.n_rows, 0);
        assert_eq!(summary.n_cols, 2);
        assert!(summary.columns.iter().all(|c| c.missing_share == 0.0));

        let summary = summarize_dataset(&no_columns_dataset());
        assert_eq!(summary.n_cols, 0);
        assert!(summary.columns.is_empty());
    }

    #[test]
    fn test_kind_counts() {
        let summary = summarize_dataset(&sample_dataset());
        assert_eq!(summary.count_of_kind(ColumnKind::Numeric), 2);
        assert_eq!(summary.count_of_kind(ColumnKind::Categorical), 1);
        assert_eq!(summary.count_of_kind(ColumnKind::Other), 0);
    }

    #[test]
    fn test_extreme_values_do_not_overflow() {
        let dataset = Dataset::try_from_columns(vec![
            (
                "big",
                Arc::new(Float64Array::from(vec![f64::MAX, f64::MAX])) as ArrayRef,
            ),
            (
                "wide",
                Arc::new(Float64Array::from(vec![f64::MAX, -f64::MAX])) as ArrayRef,
            ),
        ])
        .unwrap();
        let summary = summarize_dataset(&dataset);

        let big = summary.columns[0].stats.as_numeric().unwrap();
        assert_eq!(big.mean, Some(f64::MAX));
        assert_eq!(big.std, Some(0.0));
        assert_eq!(big.quantiles.q50, Some(f64::MAX));

        let wide = summary.columns[1].stats.as_numeric().unwrap();
        for value in [wide.mean, wide.std, wide.quantiles.q25, wide.quantiles.q75] {
            assert!(value.map_or(true, f64::is_finite));
        }
        assert_eq!(wide.min, Some(-f64::MAX));
        assert_eq!(wide.quantiles.q50, Some(0.0));
    }

    #[test]
    fn test_large_integer_distinct_count() {
        let base: i64 = 1 << 53;
        let dataset = Dataset::try_from_columns(vec![(
            "id",
            Arc::new(Int64Array::from(vec![base, base + 1, base, base + 1])) as ArrayRef,
        )])
        .unwrap();
        let summary = summarize_dataset(&dataset);

        assert_eq!(summary.columns[0].n_distinct, 2);
        assert_eq!(summary.columns[0].example_values.len(), 2);
    }
}
