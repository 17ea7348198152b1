//! Column-level quality heuristics.
//!
//! Each heuristic implements [`QualityRule`] and decides, for one classified
//! column, whether that column should be flagged. Rules are independent of each
//! other and of the score aggregation.

use serde::{Deserialize, Serialize};

use crate::analyzers::classifier::{ClassifiedColumn, ColumnValues};
use crate::quality::config::QualityConfig;

/// Identifies a heuristic of the quality-flag engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Heuristic {
    /// Missing-data accounting. Needs only the missing table.
    MissingValues,
    ConstantColumns,
    HighCardinality,
    ZeroValues,
}

impl Heuristic {
    /// True if the heuristic inspects raw column values.
    pub fn requires_dataset(&self) -> bool {
        !matches!(self, Heuristic::MissingValues)
    }
}

/// A per-column quality heuristic.
pub trait QualityRule: Send + Sync {
    /// Which heuristic this rule implements.
    fn heuristic(&self) -> Heuristic;

    /// Returns true if the column should be flagged.
    fn evaluate(&self, column: &ClassifiedColumn) -> bool;

    /// Get a human-readable name for this rule
    fn name(&self) -> &str;

    /// Get a description of what this rule analyzes
    fn description(&self) -> &str;
}

/// Flags numeric or categorical columns with exactly one distinct non-missing value.
#[derive(Debug, Clone, Default)]
pub struct ConstantColumnRule;

impl ConstantColumnRule {
    pub fn new() -> Self {
        Self
    }
}

impl QualityRule for ConstantColumnRule {
    fn heuristic(&self) -> Heuristic {
        Heuristic::ConstantColumns
    }

    fn evaluate(&self, column: &ClassifiedColumn) -> bool {
        match column.values() {
            ColumnValues::Numeric(_) | ColumnValues::Categorical(_) => column.n_distinct() == 1,
            ColumnValues::Other(_) => false,
        }
    }

    fn name(&self) -> &str {
        "ConstantColumnRule"
    }

    fn description(&self) -> &str {
        "Flags columns holding a single distinct value"
    }
}

/// Flags categorical columns whose distinct-value ratio is close to one.
#[derive(Debug, Clone)]
pub struct HighCardinalityRule {
    ratio_threshold: f64,
    min_count: usize,
}

impl HighCardinalityRule {
    pub fn new(ratio_threshold: f64, min_count: usize) -> Self {
        Self {
            ratio_threshold: ratio_threshold.clamp(0.0, 1.0),
            min_count,
        }
    }

    pub fn from_config(config: &QualityConfig) -> Self {
        Self::new(
            config.high_cardinality_ratio,
            config.high_cardinality_min_count,
        )
    }
}

impl Default for HighCardinalityRule {
    fn default() -> Self {
        Self::from_config(&QualityConfig::default())
    }
}

impl QualityRule for HighCardinalityRule {
    fn heuristic(&self) -> Heuristic {
        Heuristic::HighCardinality
    }

    fn evaluate(&self, column: &ClassifiedColumn) -> bool {
        if !matches!(column.values(), ColumnValues::Categorical(_)) {
            return false;
        }
        let count = column.count();
        if count <= self.min_count {
            return false;
        }
        column.n_distinct() as f64 / count as f64 > self.ratio_threshold
    }

    fn name(&self) -> &str {
        "HighCardinalityRule"
    }

    fn description(&self) -> &str {
        "Flags categorical columns where nearly every value is distinct"
    }
}

/// Flags numeric columns where exact zeros dominate.
#[derive(Debug, Clone)]
pub struct ZeroValueRule {
    share_threshold: f64,
}

impl ZeroValueRule {
    pub fn new(share_threshold: f64) -> Self {
        Self {
            share_threshold: share_threshold.clamp(0.0, 1.0),
        }
    }

    pub fn from_config(config: &QualityConfig) -> Self {
        Self::new(config.zero_share_threshold)
    }
}

impl Default for ZeroValueRule {
    fn default() -> Self {
        Self::from_config(&QualityConfig::default())
    }
}

impl QualityRule for ZeroValueRule {
    fn heuristic(&self) -> Heuristic {
        Heuristic::ZeroValues
    }

    fn evaluate(&self, column: &ClassifiedColumn) -> bool {
        let ColumnValues::Numeric(values) = column.values() else {
            return false;
        };
        let present: Vec<f64> = values.iter().flatten().copied().collect();
        if present.is_empty() {
            return false;
        }
        let zeros = present.iter().filter(|v| **v == 0.0).count();
        zeros as f64 / present.len() as f64 > self.share_threshold
    }

    fn name(&self) -> &str {
        "ZeroValueRule"
    }

    fn description(&self) -> &str {
        "Flags numeric columns with an excessive share of zero values"
    }
}

/// The default rule set, configured from `config`.
pub fn default_rules(config: &QualityConfig) -> Vec<Box<dyn QualityRule>> {
    vec![
        Box::new(ConstantColumnRule::new()),
        Box::new(HighCardinalityRule::from_config(config)),
        Box::new(ZeroValueRule::from_config(config)),
    ]
}
