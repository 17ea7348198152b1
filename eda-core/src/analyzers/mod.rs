//! Statistics engine: column classification and per-dataset analyzers.
//!
//! Every analyzer is a pure function over a [`Dataset`](crate::dataset::Dataset):
//!
//! - **Column Classifier** (`classifier`): numeric / categorical / other, with the
//!   extracted values carried in a tagged [`ColumnValues`] payload
//! - **Missing-Value Analyzer** (`missing`): missing counts and shares per column
//! - **Dataset Summarizer** (`summary`): per-column descriptive statistics
//! - **Correlation Engine** (`correlation`): pairwise-complete Pearson matrix
//! - **Top-Categories Extractor** (`top_categories`): most frequent values
//!
//! Columns are classified once per call and the classification is threaded
//! through the analyzers; no analyzer inspects Arrow types on its own.

pub mod classifier;
pub mod correlation;
pub mod missing;
pub mod summary;
pub mod top_categories;

pub use classifier::{classify_column, ClassifiedColumn, ColumnKind, ColumnValues};
pub use correlation::{correlation_matrix, CorrelationMatrix, CorrelationState};
pub use missing::{missing_table, MissingEntry, MissingTable};
pub use summary::{
    summarize_dataset, CategoricalStats, ColumnSummary, DatasetSummary, KindStats, NumericStats,
    Quantiles,
};
pub use top_categories::{top_categories, CategoryCount, ColumnTopValues, TopCategoriesResult};
