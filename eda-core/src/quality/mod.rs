//! Quality-flag engine.
//!
//! The engine combines a [`DatasetSummary`], its [`MissingTable`] and, when
//! available, the raw [`Dataset`] into [`QualityFlags`]:
//!
//! - **Missing values** always run, since they only need the missing table.
//! - **Constant columns**, **high-cardinality categoricals** and **zero-heavy
//!   numeric columns** inspect raw values and run only when a dataset is given.
//!
//! [`QualityFlags::coverage`] and [`QualityFlags::heuristics_run`] report which
//! heuristics contributed, so a caller can tell a clean dataset apart from one
//! that was never inspected.
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use arrow::array::{ArrayRef, Int64Array};
//! use eda_core::prelude::*;
//!
//! let dataset = Dataset::try_from_columns(vec![
//!     ("constant", Arc::new(Int64Array::from(vec![1, 1, 1, 1])) as ArrayRef),
//!     ("varying", Arc::new(Int64Array::from(vec![1, 2, 3, 4])) as ArrayRef),
//! ])
//! .unwrap();
//!
//! let summary = summarize_dataset(&dataset);
//! let missing = missing_table(&dataset);
//! let flags = compute_quality_flags(&summary, &missing, Some(&dataset)).unwrap();
//!
//! assert!(flags.has_constant_columns);
//! assert_eq!(flags.constant_columns, vec!["constant"]);
//! assert_eq!(flags.coverage, HeuristicCoverage::Full);
//! ```

pub mod config;
pub mod rules;
pub mod scoring;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::analyzers::classifier::{ClassifiedColumn, ColumnKind};
use crate::analyzers::missing::MissingTable;
use crate::analyzers::summary::DatasetSummary;
use crate::dataset::Dataset;
use crate::error::{EdaError, EdaResult};

pub use config::{QualityConfig, ScoreWeights};
pub use rules::{
    default_rules, ConstantColumnRule, HighCardinalityRule, Heuristic, QualityRule,
    ZeroValueRule,
};
pub use scoring::{quality_score, ScoreBreakdown};

/// Which heuristics had the data they need.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeuristicCoverage {
    /// The raw dataset was supplied; every heuristic ran.
    Full,
    /// No raw dataset; only missing-value accounting ran.
    MissingOnly,
}

/// Outcome of the quality heuristics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityFlags {
    pub has_constant_columns: bool,
    pub constant_columns: Vec<String>,
    pub has_high_cardinality_categoricals: bool,
    pub high_cardinality_columns: Vec<String>,
    pub has_many_zero_values: bool,
    pub zero_columns: Vec<String>,
    /// In [0, 1]; 1.0 means no issues were detected.
    pub quality_score: f64,
    pub score_breakdown: ScoreBreakdown,

    // Informational, not part of the score.
    pub max_missing_share: f64,
    pub too_many_missing: bool,
    pub too_few_rows: bool,
    pub too_many_columns: bool,

    pub coverage: HeuristicCoverage,
    pub heuristics_run: Vec<Heuristic>,
}

impl QualityFlags {
    /// True if the given heuristic contributed to these flags.
    pub fn ran(&self, heuristic: Heuristic) -> bool {
        self.heuristics_run.contains(&heuristic)
    }

    /// True if any column-level heuristic flagged something.
    pub fn has_issues(&self) -> bool {
        self.has_constant_columns
            || self.has_high_cardinality_categoricals
            || self.has_many_zero_values
            || self.too_many_missing
    }
}

/// Runs the quality heuristics under a configuration.
pub struct QualityEngine {
    config: QualityConfig,
    rules: Vec<Box<dyn QualityRule>>,
}

impl QualityEngine {
    /// Creates an engine with the default rule set built from `config`.
    ///
    /// Fails if `config` does not pass [`QualityConfig::validate`].
    pub fn new(config: QualityConfig) -> EdaResult<Self> {
        config.validate()?;
        let rules = default_rules(&config);
        Ok(Self { config, rules })
    }

    /// Creates an engine with no column rules.
    pub fn empty(config: QualityConfig) -> EdaResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            rules: Vec::new(),
        })
    }

    /// Add a rule to the engine
    pub fn add_rule(mut self, rule: Box<dyn QualityRule>) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn config(&self) -> &QualityConfig {
        &self.config
    }

    pub fn rules(&self) -> &[Box<dyn QualityRule>] {
        &self.rules
    }

    /// Computes quality flags.
    ///
    /// `dataset` must be the dataset `summary` was computed from; a shape or
    /// column-name mismatch is rejected. Without it, only missing-value
    /// accounting contributes to the score.
    #[instrument(
        skip_all,
        fields(rows = summary.n_rows, cols = summary.n_cols, with_dataset = dataset.is_some())
    )]
    pub fn evaluate(
        &self,
        summary: &DatasetSummary,
        missing: &MissingTable,
        dataset: Option<&Dataset>,
    ) -> EdaResult<QualityFlags> {
        check_missing_table(summary, missing)?;
        let classified = match dataset {
            Some(dataset) => {
                check_dataset(summary, dataset)?;
                Some(dataset.classify_columns())
            }
            None => None,
        };
        Ok(self.flags_from_columns(summary, missing, classified.as_deref()))
    }

    /// Computes quality flags from columns classified for `summary`.
    pub(crate) fn flags_from_columns(
        &self,
        summary: &DatasetSummary,
        missing: &MissingTable,
        classified: Option<&[ClassifiedColumn]>,
    ) -> QualityFlags {
        let mut constant_columns = Vec::new();
        let mut high_cardinality_columns = Vec::new();
        let mut zero_columns = Vec::new();
        let mut heuristics_run = vec![Heuristic::MissingValues];

        let coverage = match classified {
            Some(columns) => {
                for rule in &self.rules {
                    let heuristic = rule.heuristic();
                    if !heuristics_run.contains(&heuristic) {
                        heuristics_run.push(heuristic);
                    }
                }

                for column in columns {
                    for rule in &self.rules {
                        if !rule.evaluate(column) {
                            continue;
                        }
                        debug!(rule = rule.name(), column = column.name(), "Column flagged");
                        let flagged = match rule.heuristic() {
                            Heuristic::ConstantColumns => &mut constant_columns,
                            Heuristic::HighCardinality => &mut high_cardinality_columns,
                            Heuristic::ZeroValues => &mut zero_columns,
                            Heuristic::MissingValues => continue,
                        };
                        let name = column.name().to_string();
                        if !flagged.contains(&name) {
                            flagged.push(name);
                        }
                    }
                }
                HeuristicCoverage::Full
            }
            None => {
                debug!("No dataset supplied, running missing-value accounting only");
                HeuristicCoverage::MissingOnly
            }
        };

        let score_breakdown = ScoreBreakdown::from_counts(
            missing.total_missing(),
            summary.n_rows * summary.n_cols,
            constant_columns.len(),
            summary.n_cols,
            high_cardinality_columns.len(),
            summary.count_of_kind(ColumnKind::Categorical),
            zero_columns.len(),
            summary.count_of_kind(ColumnKind::Numeric),
        );

        let quality_score = if summary.n_rows == 0 || summary.n_cols == 0 {
            debug!("Empty dataset, nothing to penalize");
            1.0
        } else {
            quality_score(&score_breakdown, &self.config.weights)
        };

        let max_missing_share = missing.max_missing_share();
        let flags = QualityFlags {
            has_constant_columns: !constant_columns.is_empty(),
            constant_columns,
            has_high_cardinality_categoricals: !high_cardinality_columns.is_empty(),
            high_cardinality_columns,
            has_many_zero_values: !zero_columns.is_empty(),
            zero_columns,
            quality_score,
            score_breakdown,
            max_missing_share,
            too_many_missing: max_missing_share > self.config.too_many_missing_share,
            too_few_rows: summary.n_rows > 0 && summary.n_rows < self.config.min_rows,
            too_many_columns: summary.n_cols > self.config.max_columns,
            coverage,
            heuristics_run,
        };

        info!(
            quality_score = flags.quality_score,
            constant = flags.constant_columns.len(),
            high_cardinality = flags.high_cardinality_columns.len(),
            zero = flags.zero_columns.len(),
            coverage = ?flags.coverage,
            "Computed quality flags"
        );
        flags
    }
}

impl Default for QualityEngine {
    fn default() -> Self {
        let config = QualityConfig::default();
        Self {
            rules: default_rules(&config),
            config,
        }
    }
}

fn check_missing_table(summary: &DatasetSummary, missing: &MissingTable) -> EdaResult<()> {
    if missing.n_rows != summary.n_rows || missing.len() != summary.n_cols {
        return Err(EdaError::invalid_input(format!(
            "missing table ({} rows, {} columns) does not match summary ({} rows, {} columns)",
            missing.n_rows,
            missing.len(),
            summary.n_rows,
            summary.n_cols
        )));
    }
    for (entry, column) in missing.iter().zip(&summary.columns) {
        if entry.column != column.name {
            return Err(EdaError::invalid_input(format!(
                "missing table column '{}' does not match summary column '{}'",
                entry.column, column.name
            )));
        }
    }
    Ok(())
}

fn check_dataset(summary: &DatasetSummary, dataset: &Dataset) -> EdaResult<()> {
    if dataset.n_rows() != summary.n_rows || dataset.n_cols() != summary.n_cols {
        return Err(EdaError::invalid_input(format!(
            "dataset ({} rows, {} columns) does not match summary ({} rows, {} columns)",
            dataset.n_rows(),
            dataset.n_cols(),
            summary.n_rows,
            summary.n_cols
        )));
    }
    let names = dataset.column_names();
    for (name, column) in names.iter().zip(&summary.columns) {
        if *name != column.name {
            return Err(EdaError::invalid_input(format!(
                "dataset column '{name}' does not match summary column '{}'",
                column.name
            )));
        }
    }
    Ok(())
}

/// Computes quality flags with the default configuration.
pub fn compute_quality_flags(
    summary: &DatasetSummary,
    missing: &MissingTable,
    dataset: Option<&Dataset>,
) -> EdaResult<QualityFlags> {
    QualityEngine::default().evaluate(summary, missing, dataset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::missing::missing_table;
    use crate::analyzers::summary::summarize_dataset;
    use crate::test_fixtures::{
        all_heuristics_dataset, constant_dataset, empty_rows_dataset, high_cardinality_dataset,
        no_columns_dataset, sample_dataset, zero_values_dataset,
    };

    fn flags_for(dataset: &Dataset) -> QualityFlags {
        let summary = summarize_dataset(dataset);
        let missing = missing_table(dataset);
        compute_quality_flags(&summary, &missing, Some(dataset)).unwrap()
    }

    #[test]
    fn test_missing_only_coverage() {
        let dataset = sample_dataset();
        let summary = summarize_dataset(&dataset);
        let missing = missing_table(&dataset);
        let flags = compute_quality_flags(&summary, &missing, None).unwrap();

        assert_eq!(flags.coverage, HeuristicCoverage::MissingOnly);
        assert_eq!(flags.heuristics_run, vec![Heuristic::MissingValues]);
        assert!(!flags.ran(Heuristic::ConstantColumns));
        assert!(!flags.has_constant_columns);
        assert!(flags.constant_columns.is_empty());
        assert!(flags.zero_columns.is_empty());
        assert!((0.0..=1.0).contains(&flags.quality_score));
        assert!(flags.quality_score < 1.0);
        assert_eq!(flags.max_missing_share, 0.25);
        assert!(flags.too_few_rows);
    }

    #[test]
    fn test_full_coverage_runs_every_heuristic() {
        let flags = flags_for(&sample_dataset());
        assert_eq!(flags.coverage, HeuristicCoverage::Full);
        assert!(flags.ran(Heuristic::MissingValues));
        assert!(flags.ran(Heuristic::ConstantColumns));
        assert!(flags.ran(Heuristic::HighCardinality));
        assert!(flags.ran(Heuristic::ZeroValues));
    }

    #[test]
    fn test_constant_columns() {
        let flags = flags_for(&constant_dataset());
        assert!(flags.has_constant_columns);
        assert_eq!(
            flags.constant_columns,
            vec!["constant_col", "another_constant"]
        );
    }

    #[test]
    fn test_high_cardinality() {
        let flags = flags_for(&high_cardinality_dataset(100));
        assert!(flags.has_high_cardinality_categoricals);
        assert_eq!(flags.high_cardinality_columns, vec!["high_card_col"]);
    }

    #[test]
    fn test_zero_values() {
        let flags = flags_for(&zero_values_dataset());
        assert!(flags.has_many_zero_values);
        assert_eq!(flags.zero_columns, vec!["many_zeros"]);
    }

    #[test]
    fn test_all_heuristics_lower_the_score() {
        let flags = flags_for(&all_heuristics_dataset(120));
        assert!(flags.has_constant_columns);
        assert!(flags.has_high_cardinality_categoricals);
        assert!(flags.has_many_zero_values);
        assert!(flags.has_issues());
        assert!((0.0..=1.0).contains(&flags.quality_score));
        assert!(flags.quality_score < 0.8);
    }

    #[test]
    fn test_empty_datasets_score_one() {
        for dataset in [empty_rows_dataset(), no_columns_dataset()] {
            let flags = flags_for(&dataset);
            assert_eq!(flags.quality_score, 1.0);
            assert!(!flags.has_constant_columns);
            assert!(!flags.too_few_rows);
        }
    }

    #[test]
    fn test_mismatched_dataset_rejected() {
        let summary = summarize_dataset(&sample_dataset());
        let missing = missing_table(&sample_dataset());
        let other = constant_dataset();

        let err = compute_quality_flags(&summary, &missing, Some(&other)).unwrap_err();
        assert!(err.is_invalid_input());

        let other_missing = missing_table(&other);
        let err = compute_quality_flags(&summary, &other_missing, None).unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[test]
    fn test_custom_config_changes_thresholds() {
        let dataset = zero_values_dataset();
        let summary = summarize_dataset(&dataset);
        let missing = missing_table(&dataset);

        let config = QualityConfig::default().with_zero_share_threshold(0.05);
        let engine = QualityEngine::new(config).unwrap();
        let flags = engine.evaluate(&summary, &missing, Some(&dataset)).unwrap();
        assert_eq!(flags.zero_columns, vec!["many_zeros", "few_zeros"]);
    }

    #[test]
    fn test_empty_engine_flags_nothing() {
        let dataset = constant_dataset();
        let summary = summarize_dataset(&dataset);
        let missing = missing_table(&dataset);

        let engine = QualityEngine::empty(QualityConfig::default()).unwrap();
        let flags = engine.evaluate(&summary, &missing, Some(&dataset)).unwrap();
        assert!(!flags.has_constant_columns);
        assert_eq!(flags.quality_score, 1.0);
        assert_eq!(flags.heuristics_run, vec![Heuristic::MissingValues]);

        let engine = engine.add_rule(Box::new(ConstantColumnRule::new()));
        assert_eq!(engine.rules().len(), 1);
        let flags = engine.evaluate(&summary, &missing, Some(&dataset)).unwrap();
        assert!(flags.has_constant_columns);
    }

    #[test]
    fn test_negative_weight_rejected() {
        let weights = ScoreWeights {
            constant: -0.5,
            ..ScoreWeights::default()
        };
        let config = QualityConfig::default().with_weights(weights);

        assert!(QualityEngine::new(config.clone())
            .err()
            .is_some_and(|e| e.is_invalid_input()));
        assert!(QualityEngine::empty(config).is_err());
    }

    #[test]
    fn test_large_integer_column_is_not_constant() {
        let base: i64 = 1 << 53;
        let dataset = Dataset::try_from_columns(vec![(
            "id",
            std::sync::Arc::new(arrow::array::Int64Array::from(vec![
                base,
                base + 1,
                base,
                base + 1,
            ])) as arrow::array::ArrayRef,
        )])
        .unwrap();

        let flags = flags_for(&dataset);
        assert!(!flags.has_constant_columns);
        assert!(flags.constant_columns.is_empty());
    }
}
