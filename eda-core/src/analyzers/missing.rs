//! Missing-value accounting per column.

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::analyzers::classifier::ClassifiedColumn;
use crate::dataset::Dataset;

/// Missing-value counts for one column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissingEntry {
    pub column: String,
    pub missing_count: usize,
    /// `missing_count / n_rows`, or 0 when the dataset has no rows.
    pub missing_share: f64,
}

/// One [`MissingEntry`] per column, in dataset column order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissingTable {
    pub n_rows: usize,
    pub entries: Vec<MissingEntry>,
}

impl MissingTable {
    pub(crate) fn from_columns(n_rows: usize, columns: &[ClassifiedColumn]) -> Self {
        let entries = columns
            .iter()
            .map(|column| {
                let missing_count = column.missing_count();
                MissingEntry {
                    column: column.name().to_string(),
                    missing_count,
                    missing_share: share(missing_count, n_rows),
                }
            })
            .collect();
        Self { n_rows, entries }
    }

    /// Looks up the entry for a column.
    pub fn get(&self, column: &str) -> Option<&MissingEntry> {
        self.entries.iter().find(|e| e.column == column)
    }

    pub fn iter(&self) -> impl Iterator<Item = &MissingEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total missing cells across all columns.
    pub fn total_missing(&self) -> usize {
        self.entries.iter().map(|e| e.missing_count).sum()
    }

    /// Share of missing cells over the whole table, 0 for an empty table.
    pub fn overall_missing_share(&self) -> f64 {
        share(self.total_missing(), self.n_rows * self.entries.len())
    }

    /// Largest per-column missing share, 0 for an empty table.
    pub fn max_missing_share(&self) -> f64 {
        self.entries
            .iter()
            .map(|e| e.missing_share)
            .fold(0.0, f64::max)
    }

    /// Entries sorted by descending missing count; ties keep column order.
    pub fn sorted_by_missing(&self) -> Vec<&MissingEntry> {
        let mut sorted: Vec<&MissingEntry> = self.entries.iter().collect();
        sorted.sort_by(|a, b| b.missing_count.cmp(&a.missing_count));
        sorted
    }
}

pub(crate) fn share(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64
    }
}

/// Counts missing values per column.
#[instrument(skip(dataset), fields(rows = dataset.n_rows(), cols = dataset.n_cols()))]
pub fn missing_table(dataset: &Dataset) -> MissingTable {
    let table = MissingTable::from_columns(dataset.n_rows(), &dataset.classify_columns());
    debug!(
        total_missing = table.total_missing(),
        "Computed missing-value table"
    );
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::{empty_rows_dataset, sample_dataset};

    #[test]
    fn test_missing_counts() {
        let table = missing_table(&sample_dataset());

        assert_eq!(table.n_rows, 4);
        assert_eq!(table.len(), 3);
        assert_eq!(table.get("age").unwrap().missing_count, 1);
        assert_eq!(table.get("age").unwrap().missing_share, 0.25);
        assert_eq!(table.get("height").unwrap().missing_count, 0);
        assert_eq!(table.get("city").unwrap().missing_count, 1);
        assert!(table.get("nope").is_none());
    }

    #[test]
    fn test_overall_and_max_share() {
        let table = missing_table(&sample_dataset());
        assert_eq!(table.total_missing(), 2);
        assert!((table.overall_missing_share() - 2.0 / 12.0).abs() < 1e-12);
        assert_eq!(table.max_missing_share(), 0.25);
    }

    #[test]
    fn test_sorted_by_missing_is_stable() {
        let table = missing_table(&sample_dataset());
        let order: Vec<&str> = table
            .sorted_by_missing()
            .iter()
            .map(|e| e.column.as_str())
            .collect();
        assert_eq!(order, vec!["age", "city", "height"]);
    }

    #[test]
    fn test_zero_rows_share_is_zero() {
        let table = missing_table(&empty_rows_dataset());
        assert!(table.iter().all(|e| e.missing_share == 0.0));
        assert_eq!(table.overall_missing_share(), 0.0);
    }
}
