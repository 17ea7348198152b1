//! Aggregation of heuristic results into a single quality score.
//!
//! The score starts at 1.0 and loses `weight * fraction` for each heuristic,
//! where every fraction lies in [0, 1]:
//!
//! | Heuristic        | Fraction                                          |
//! |------------------|---------------------------------------------------|
//! | missing values   | missing cells / all cells                         |
//! | constant columns | constant columns / all columns                    |
//! | high cardinality | high-cardinality columns / categorical columns    |
//! | zero values      | zero-heavy columns / numeric columns              |
//!
//! Weights are non-negative, so flagging more columns or adding missing cells
//! can never raise the score. The result is clamped to [0, 1].

use serde::{Deserialize, Serialize};

use crate::analyzers::missing::share;
use crate::quality::config::ScoreWeights;

/// Per-heuristic fractions feeding the score.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub missing_fraction: f64,
    pub constant_fraction: f64,
    pub high_cardinality_fraction: f64,
    pub zero_fraction: f64,
}

impl ScoreBreakdown {
    /// Builds the fractions from flagged/eligible counts. Empty denominators give 0.
    #[allow(clippy::too_many_arguments)]
    pub fn from_counts(
        missing_cells: usize,
        total_cells: usize,
        constant: usize,
        n_cols: usize,
        high_cardinality: usize,
        n_categorical: usize,
        zero: usize,
        n_numeric: usize,
    ) -> Self {
        Self {
            missing_fraction: share(missing_cells, total_cells),
            constant_fraction: share(constant, n_cols),
            high_cardinality_fraction: share(high_cardinality, n_categorical),
            zero_fraction: share(zero, n_numeric),
        }
    }

    /// Total deduction under the given weights. Negative weights count as 0.
    pub fn deduction(&self, weights: &ScoreWeights) -> f64 {
        weight(weights.missing) * unit(self.missing_fraction)
            + weight(weights.constant) * unit(self.constant_fraction)
            + weight(weights.high_cardinality) * unit(self.high_cardinality_fraction)
            + weight(weights.zero) * unit(self.zero_fraction)
    }
}

fn weight(value: f64) -> f64 {
    if value.is_finite() {
        value.max(0.0)
    } else {
        0.0
    }
}

fn unit(fraction: f64) -> f64 {
    if fraction.is_nan() {
        0.0
    } else {
        fraction.clamp(0.0, 1.0)
    }
}

/// Quality score in [0, 1]; 1.0 means no issues were detected.
pub fn quality_score(breakdown: &ScoreBreakdown, weights: &ScoreWeights) -> f64 {
    let score = 1.0 - breakdown.deduction(weights);
    if score.is_nan() {
        return 0.0;
    }
    score.clamp(0.0, 1.0)
}
