//! Thresholds and score weights of the quality heuristics.

use serde::{Deserialize, Serialize};

use crate::error::{EdaError, EdaResult};

/// A categorical column is high-cardinality when `n_distinct / count` exceeds this.
pub const HIGH_CARDINALITY_RATIO: f64 = 0.9;
/// ...and its non-missing count exceeds this.
pub const HIGH_CARDINALITY_MIN_COUNT: usize = 20;
/// A numeric column has too many zeros when `zero_count / count` exceeds this.
pub const ZERO_SHARE_THRESHOLD: f64 = 0.3;
/// Informational: a column missing more than this share is flagged.
pub const TOO_MANY_MISSING_SHARE: f64 = 0.5;
/// Informational: datasets with fewer rows are flagged as small.
pub const MIN_ROWS: usize = 100;
/// Informational: datasets with more columns are flagged as wide.
pub const MAX_COLUMNS: usize = 100;

pub const MISSING_WEIGHT: f64 = 0.4;
pub const CONSTANT_WEIGHT: f64 = 0.2;
pub const HIGH_CARDINALITY_WEIGHT: f64 = 0.2;
pub const ZERO_WEIGHT: f64 = 0.2;

/// Deductions applied to the quality score, each scaled by a fraction in [0, 1].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreWeights {
    pub missing: f64,
    pub constant: f64,
    pub high_cardinality: f64,
    pub zero: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            missing: MISSING_WEIGHT,
            constant: CONSTANT_WEIGHT,
            high_cardinality: HIGH_CARDINALITY_WEIGHT,
            zero: ZERO_WEIGHT,
        }
    }
}

/// Configuration of the quality-flag heuristics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QualityConfig {
    pub high_cardinality_ratio: f64,
    pub high_cardinality_min_count: usize,
    pub zero_share_threshold: f64,
    pub too_many_missing_share: f64,
    pub min_rows: usize,
    pub max_columns: usize,
    pub weights: ScoreWeights,
}

impl Default for QualityConfig {
    fn default() -> Self {
        Self {
            high_cardinality_ratio: HIGH_CARDINALITY_RATIO,
            high_cardinality_min_count: HIGH_CARDINALITY_MIN_COUNT,
            zero_share_threshold: ZERO_SHARE_THRESHOLD,
            too_many_missing_share: TOO_MANY_MISSING_SHARE,
            min_rows: MIN_ROWS,
            max_columns: MAX_COLUMNS,
            weights: ScoreWeights::default(),
        }
    }
}

impl QualityConfig {
    /// Parses a configuration from JSON. Absent fields take their defaults.
    pub fn from_json(json: &str) -> EdaResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects ratios outside [0, 1] and negative or non-finite weights.
    pub fn validate(&self) -> EdaResult<()> {
        let ratios = [
            ("high_cardinality_ratio", self.high_cardinality_ratio),
            ("zero_share_threshold", self.zero_share_threshold),
            ("too_many_missing_share", self.too_many_missing_share),
        ];
        for (name, value) in ratios {
            if !(0.0..=1.0).contains(&value) {
                return Err(EdaError::invalid_input(format!(
                    "{name} must be within [0, 1], got {value}"
                )));
            }
        }

        let weights = [
            ("missing", self.weights.missing),
            ("constant", self.weights.constant),
            ("high_cardinality", self.weights.high_cardinality),
            ("zero", self.weights.zero),
        ];
        for (name, value) in weights {
            if !value.is_finite() || value < 0.0 {
                return Err(EdaError::invalid_input(format!(
                    "weight '{name}' must be a non-negative number, got {value}"
                )));
            }
        }
        Ok(())
    }

    pub fn with_high_cardinality_ratio(mut self, ratio: f64) -> Self {
        self.high_cardinality_ratio = ratio.clamp(0.0, 1.0);
        self
    }

    pub fn with_high_cardinality_min_count(mut self, count: usize) -> Self {
        self.high_cardinality_min_count = count;
        self
    }

    pub fn with_zero_share_threshold(mut self, threshold: f64) -> Self {
        self.zero_share_threshold = threshold.clamp(0.0, 1.0);
        self
    }

    pub fn with_too_many_missing_share(mut self, share: f64) -> Self {
        self.too_many_missing_share = share.clamp(0.0, 1.0);
        self
    }

    pub fn with_min_rows(mut self, rows: usize) -> Self {
        self.min_rows = rows;
        self
    }

    pub fn with_max_columns(mut self, columns: usize) -> Self {
        self.max_columns = columns;
        self
    }

    pub fn with_weights(mut self, weights: ScoreWeights) -> Self {
        self.weights = weights;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_constants() {
        let config = QualityConfig::default();
        assert_eq!(config.high_cardinality_ratio, HIGH_CARDINALITY_RATIO);
        assert_eq!(config.high_cardinality_min_count, HIGH_CARDINALITY_MIN_COUNT);
        assert_eq!(config.zero_share_threshold, ZERO_SHARE_THRESHOLD);
        assert_eq!(config.weights, ScoreWeights::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_json_partial() {
        let config =
            QualityConfig::from_json(r#"{"zero_share_threshold": 0.6, "weights": {"zero": 0.5}}"#)
                .unwrap();
        assert_eq!(config.zero_share_threshold, 0.6);
        assert_eq!(config.weights.zero, 0.5);
        assert_eq!(config.weights.missing, MISSING_WEIGHT);
        assert_eq!(config.min_rows, MIN_ROWS);
    }

    #[test]
    fn test_from_json_rejects_bad_values() {
        let err = QualityConfig::from_json(r#"{"high_cardinality_ratio": 1.5}"#).unwrap_err();
        assert!(err.is_invalid_input());

        let err = QualityConfig::from_json(r#"{"weights": {"constant": -1.0}}"#).unwrap_err();
        assert!(err.is_invalid_input());

        let err = QualityConfig::from_json("not json").unwrap_err();
        assert!(matches!(err, EdaError::Serialization(_)));
    }

    #[test]
    fn test_builder_clamps_ratios() {
        let config = QualityConfig::default()
            .with_high_cardinality_ratio(2.0)
            .with_zero_share_threshold(-0.5)
            .with_min_rows(10)
            .with_max_columns(5);
        assert_eq!(config.high_cardinality_ratio, 1.0);
        assert_eq!(config.zero_share_threshold, 0.0);
        assert_eq!(config.min_rows, 10);
        assert_eq!(config.max_columns, 5);
    }
}
