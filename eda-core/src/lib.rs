//! # eda-core - Exploratory Data Analysis for Arrow datasets
//!
//! eda-core summarizes an arbitrary tabular dataset before further processing.
//! It computes per-column descriptive statistics, missing-value accounting,
//! pairwise numeric correlations and top categorical values, and it runs a set
//! of independent data-quality heuristics that aggregate into a single score.
//!
//! The crate is the statistics engine only. Loading data and rendering reports
//! belong to the caller (a CLI, a notebook), which hands over an in-memory
//! Arrow [`RecordBatch`](arrow::record_batch::RecordBatch) and consumes plain
//! structured results.
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use arrow::array::{ArrayRef, Int64Array, StringArray};
//! use eda_core::prelude::*;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let age: ArrayRef = Arc::new(Int64Array::from(vec![Some(10), Some(20), Some(30), None]));
//! let height: ArrayRef = Arc::new(Int64Array::from(vec![140, 150, 160, 170]));
//! let city: ArrayRef = Arc::new(StringArray::from(vec![Some("A"), Some("B"), Some("A"), None]));
//! let dataset =
//!     Dataset::try_from_columns(vec![("age", age), ("height", height), ("city", city)])?;
//!
//! let summary = summarize_dataset(&dataset);
//! let missing = missing_table(&dataset);
//! let flags = compute_quality_flags(&summary, &missing, Some(&dataset))?;
//! let top = top_categories(&dataset, 5, 2)?;
//!
//! assert_eq!(summary.n_rows, 4);
//! assert_eq!(missing.get("age").map(|e| e.missing_count), Some(1));
//! assert!((0.0..=1.0).contains(&flags.quality_score));
//! assert_eq!(top.get("city").map(|v| v[0].value.as_str()), Some("A"));
//!
//! let table = flatten_summary_for_print(&summary);
//! assert!(SummaryTable::has_column("missing_share"));
//! assert_eq!(table.len(), 3);
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! - **`dataset`**: the [`Dataset`](dataset::Dataset) wrapper and its invariants
//! - **`analyzers`**: column classifier, summarizer, missing values, correlation,
//!   top categories
//! - **`quality`**: quality heuristics, their configuration and score aggregation
//! - **`formatters`**: flat summary table and text/Markdown/JSON renderers
//! - **`report`**: one-call report bundling every result
//! - **`logging`**: `tracing` configuration helpers
//!
//! ## Empty input
//!
//! Zero rows or zero columns are not errors. Shares are 0, the correlation
//! matrix is empty, flag sets are empty and the quality score is 1.0.

pub mod analyzers;
pub mod dataset;
pub mod error;
pub mod formatters;
pub mod logging;
pub mod prelude;
pub mod quality;
pub mod report;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_fixtures;

pub use analyzers::{correlation_matrix, missing_table, summarize_dataset, top_categories};
pub use formatters::flatten_summary_for_print;
pub use quality::compute_quality_flags;
