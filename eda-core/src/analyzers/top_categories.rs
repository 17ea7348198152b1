//! Most frequent values of categorical columns.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::analyzers::classifier::{ClassifiedColumn, ColumnValues};
use crate::dataset::Dataset;
use crate::error::{EdaError, EdaResult};

/// A value and the number of times it occurs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub value: String,
    pub count: usize,
}

/// Top values of a single categorical column, by descending frequency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnTopValues {
    pub column: String,
    pub values: Vec<CategoryCount>,
}

/// Top values per categorical column, in dataset column order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TopCategoriesResult {
    pub columns: Vec<ColumnTopValues>,
}

impl TopCategoriesResult {
    pub fn get(&self, column: &str) -> Option<&[CategoryCount]> {
        self.columns
            .iter()
            .find(|c| c.column == column)
            .map(|c| c.values.as_slice())
    }

    pub fn contains(&self, column: &str) -> bool {
        self.get(column).is_some()
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.column.as_str())
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// Frequency of each distinct non-missing value, sorted by descending count.
/// Equal counts keep first-occurrence order.
pub(crate) fn value_counts(values: &[Option<String>]) -> Vec<(&str, usize)> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<(&str, usize)> = Vec::new();

    for value in values.iter().flatten() {
        match index.get(value.as_str()) {
            Some(&i) => counts[i].1 += 1,
            None => {
                index.insert(value.as_str(), counts.len());
                counts.push((value.as_str(), 1));
            }
        }
    }

    // sort_by is stable
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

/// Returns the `top_k` most frequent values of the first `max_columns`
/// categorical columns.
///
/// Missing values are not counted. Both limits must be positive.
#[instrument(skip(dataset), fields(cols = dataset.n_cols()))]
pub fn top_categories(
    dataset: &Dataset,
    max_columns: usize,
    top_k: usize,
) -> EdaResult<TopCategoriesResult> {
    if max_columns == 0 {
        return Err(EdaError::invalid_input("max_columns must be positive"));
    }
    if top_k == 0 {
        return Err(EdaError::invalid_input("top_k must be positive"));
    }

    let columns = top_values_of(&dataset.classify_columns(), max_columns, top_k);
    debug!(columns = columns.len(), "Extracted top categories");
    Ok(TopCategoriesResult { columns })
}

/// Top values of already classified columns. Limits are assumed positive.
pub(crate) fn top_values_of(
    classified: &[ClassifiedColumn],
    max_columns: usize,
    top_k: usize,
) -> Vec<ColumnTopValues> {
    classified
        .iter()
        .filter_map(|column| match column.values() {
            ColumnValues::Categorical(values) => {
                let mut counts = value_counts(values);
                counts.truncate(top_k);
                Some(ColumnTopValues {
                    column: column.name().to_string(),
                    values: counts
                        .into_iter()
                        .map(|(value, count)| CategoryCount {
                            value: value.to_string(),
                            count,
                        })
                        .collect(),
                })
            }
            _ => None,
        })
        .take(max_columns)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::{sample_dataset, zero_values_dataset};
    use arrow::array::{ArrayRef, StringArray};
    use std::sync::Arc;

    fn strings(values: &[Option<&str>]) -> Vec<Option<String>> {
        values.iter().map(|v| v.map(str::to_string)).collect()
    }

    #[test]
    fn test_value_counts_stable_ties() {
        let values = strings(&[Some("x"), Some("y"), None, Some("y"), Some("z"), Some("x")]);
        assert_eq!(value_counts(&values), vec![("x", 2), ("y", 2), ("z", 1)]);
    }

    #[test]
    fn test_sample_city() {
        let result = top_categories(&sample_dataset(), 5, 2).unwrap();

        assert_eq!(result.len(), 1);
        let city = result.get("city").unwrap();
        assert!(city.len() <= 2);
        assert_eq!(
            city[0],
            CategoryCount {
                value: "A".to_string(),
                count: 2
            }
        );
        assert!(!result.contains("age"));
    }

    #[test]
    fn test_truncates_to_top_k() {
        let result = top_categories(&zero_values_dataset(), 5, 1).unwrap();
        let values = result.get("string_col").unwrap();
        assert_eq!(values.len(), 1);
        assert_eq!(values[0].value, "A");
        assert_eq!(values[0].count, 3);
    }

    #[test]
    fn test_max_columns_in_dataset_order() {
        let dataset = Dataset::try_from_columns(vec![
            ("s1", Arc::new(StringArray::from(vec!["a"])) as ArrayRef),
            ("s2", Arc::new(StringArray::from(vec!["b"])) as ArrayRef),
            ("s3", Arc::new(StringArray::from(vec!["c"])) as ArrayRef),
        ])
        .unwrap();
        let result = top_categories(&dataset, 2, 10).unwrap();
        assert_eq!(result.column_names().collect::<Vec<_>>(), vec!["s1", "s2"]);
    }

    #[test]
    fn test_non_positive_limits_rejected() {
        let dataset = sample_dataset();
        assert!(top_categories(&dataset, 0, 2).unwrap_err().is_invalid_input());
        assert!(top_categories(&dataset, 2, 0).unwrap_err().is_invalid_input());
    }
}
