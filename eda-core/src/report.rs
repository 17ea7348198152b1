//! One-call analysis producing every EDA result for a dataset.
//!
//! [`EdaReport::generate`] classifies every column once and feeds the result to
//! the summarizer, the missing-value analyzer, the quality engine, and the
//! correlation and top-categories analyzers.

use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::analyzers::correlation::{correlation_from_columns, CorrelationMatrix};
use crate::analyzers::missing::MissingTable;
use crate::analyzers::summary::{summarize_columns, DatasetSummary};
use crate::analyzers::top_categories::{top_values_of, TopCategoriesResult};
use crate::dataset::Dataset;
use crate::error::{EdaError, EdaResult};
use crate::logging::{truncate_field, LogConfig};
use crate::quality::{QualityConfig, QualityEngine, QualityFlags};
use crate::{log_column, perf_debug};

/// Options for [`EdaReport::generate`].
#[derive(Debug, Clone)]
pub struct ReportOptions {
    /// Categorical columns covered by the top-categories section
    pub max_category_columns: usize,
    /// Values listed per categorical column
    pub top_k: usize,
    pub quality: QualityConfig,
    pub log: LogConfig,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            max_category_columns: 5,
            top_k: 5,
            quality: QualityConfig::default(),
            log: LogConfig::default(),
        }
    }
}

impl ReportOptions {
    pub fn with_max_category_columns(mut self, max_columns: usize) -> Self {
        self.max_category_columns = max_columns;
        self
    }

    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    pub fn with_quality(mut self, quality: QualityConfig) -> Self {
        self.quality = quality;
        self
    }

    pub fn with_log(mut self, log: LogConfig) -> Self {
        self.log = log;
        self
    }
}

/// All EDA results for one dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdaReport {
    pub summary: DatasetSummary,
    pub missing: MissingTable,
    pub correlation: CorrelationMatrix,
    pub top_categories: TopCategoriesResult,
    pub quality: QualityFlags,
}

impl EdaReport {
    /// Runs every analysis over `dataset`.
    #[instrument(skip_all, fields(rows = dataset.n_rows(), cols = dataset.n_cols()))]
    pub fn generate(dataset: &Dataset, options: &ReportOptions) -> EdaResult<Self> {
        if options.max_category_columns == 0 || options.top_k == 0 {
            return Err(EdaError::invalid_input(
                "max_category_columns and top_k must both be positive",
            ));
        }
        let engine = QualityEngine::new(options.quality.clone())?;

        let classified = dataset.classify_columns();
        let summary = summarize_columns(dataset.n_rows(), &classified);
        let missing = MissingTable::from_columns(dataset.n_rows(), &classified);

        for column in &summary.columns {
            log_column!(
                options.log,
                column = %truncate_field(&column.name, options.log.max_field_length),
                kind = %column.kind(),
                missing_share = column.missing_share,
                "Column summary"
            );
        }

        let quality = engine.flags_from_columns(&summary, &missing, Some(classified.as_slice()));
        let correlation = correlation_from_columns(&classified);
        let top_categories = TopCategoriesResult {
            columns: top_values_of(&classified, options.max_category_columns, options.top_k),
        };

        perf_debug!(
            options.log,
            numeric_columns = correlation.len(),
            categorical_columns = top_categories.len(),
            "Computed correlation and top categories"
        );
        info!(quality_score = quality.quality_score, "Generated EDA report");

        Ok(Self {
            summary,
            missing,
            correlation,
            top_categories,
            quality,
        })
    }

    /// Serializes the report as pretty-printed JSON.
    pub fn to_json(&self) -> EdaResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
