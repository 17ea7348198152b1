//! Prelude for commonly used types and functions in eda-core.

pub use crate::analyzers::{
    correlation_matrix, missing_table, summarize_dataset, top_categories, ColumnKind,
    ColumnSummary, CorrelationMatrix, DatasetSummary, KindStats, MissingTable,
    TopCategoriesResult,
};
pub use crate::dataset::Dataset;
pub use crate::error::{EdaError, EdaResult};
pub use crate::formatters::{flatten_summary_for_print, SummaryTable, TableFormatter};
pub use crate::logging::LogConfig;
pub use crate::quality::{
    compute_quality_flags, Heuristic, HeuristicCoverage, QualityConfig, QualityEngine,
    QualityFlags,
};
pub use crate::report::{EdaReport, ReportOptions};
