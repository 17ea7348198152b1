//! Flattening and rendering of dataset summaries.
//!
//! [`flatten_summary_for_print`] projects a [`DatasetSummary`] onto a flat,
//! row-per-column [`SummaryTable`]. The table can then be rendered with one of
//! the [`TableFormatter`] implementations:
//!
//! - [`HumanFormatter`]: aligned plain text for terminals
//! - [`MarkdownFormatter`]: a Markdown table for reports
//! - [`JsonFormatter`]: structured JSON for programmatic consumers
//!
//! # Examples
//!
//! ```rust
//! use eda_core::formatters::{flatten_summary_for_print, HumanFormatter, TableFormatter};
//! # use std::sync::Arc;
//! # use arrow::array::{ArrayRef, Int64Array};
//! # use eda_core::{dataset::Dataset, summarize_dataset};
//! # let dataset = Dataset::try_from_columns(vec![
//! #     ("age", Arc::new(Int64Array::from(vec![10, 20])) as ArrayRef),
//! # ]).unwrap();
//!
//! let table = flatten_summary_for_print(&summarize_dataset(&dataset));
//! let output = HumanFormatter::new().format(&table).unwrap();
//! assert!(output.contains("age"));
//! ```

use std::fmt::Write;

use serde::{Deserialize, Serialize};

use crate::analyzers::summary::{DatasetSummary, KindStats};
use crate::error::{EdaError, EdaResult};

/// One flattened [`ColumnSummary`](crate::analyzers::summary::ColumnSummary).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryRow {
    pub name: String,
    pub dtype: String,
    pub kind: String,
    pub count: usize,
    pub missing_count: usize,
    pub missing_share: f64,
    pub n_distinct: usize,
    pub mean: Option<f64>,
    pub std: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub q25: Option<f64>,
    pub q50: Option<f64>,
    pub q75: Option<f64>,
    pub mode: Option<String>,
    pub mode_frequency: Option<usize>,
    pub example_values: Vec<String>,
}

impl SummaryRow {
    /// Cell values in [`SummaryTable::COLUMNS`] order. Undefined values are empty.
    pub fn cells(&self, precision: usize) -> Vec<String> {
        let float = |v: Option<f64>| v.map(|x| format!("{x:.precision$}")).unwrap_or_default();
        vec![
            self.name.clone(),
            self.dtype.clone(),
            self.kind.clone(),
            self.count.to_string(),
            self.missing_count.to_string(),
            format!("{:.precision$}", self.missing_share),
            self.n_distinct.to_string(),
            float(self.mean),
            float(self.std),
            float(self.min),
            float(self.max),
            float(self.q25),
            float(self.q50),
            float(self.q75),
            self.mode.clone().unwrap_or_default(),
            self.mode_frequency
                .map(|f| f.to_string())
                .unwrap_or_default(),
            self.example_values.join(", "),
        ]
    }
}

/// Row-per-column projection of a dataset summary, in column order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SummaryTable {
    pub rows: Vec<SummaryRow>,
}

impl SummaryTable {
    /// Field names of every row, in cell order.
    pub const COLUMNS: [&'static str; 17] = [
        "name",
        "dtype",
        "kind",
        "count",
        "missing_count",
        "missing_share",
        "n_distinct",
        "mean",
        "std",
        "min",
        "max",
        "q25",
        "q50",
        "q75",
        "mode",
        "mode_frequency",
        "example_values",
    ];

    pub fn has_column(name: &str) -> bool {
        Self::COLUMNS.contains(&name)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row(&self, name: &str) -> Option<&SummaryRow> {
        self.rows.iter().find(|r| r.name == name)
    }

    fn visible_rows(&self, config: &FormatterConfig) -> &[SummaryRow] {
        match config.max_rows {
            Some(max) => &self.rows[..max.min(self.rows.len())],
            None => &self.rows,
        }
    }
}

/// Flattens a summary into a print-ready table. Pure projection.
pub fn flatten_summary_for_print(summary: &DatasetSummary) -> SummaryTable {
    let rows = summary
        .columns
        .iter()
        .map(|column| {
            let mut row = SummaryRow {
                name: column.name.clone(),
                dtype: column.dtype.clone(),
                kind: column.kind().to_string(),
                count: column.count,
                missing_count: column.missing_count,
                missing_share: column.missing_share,
                n_distinct: column.n_distinct,
                mean: None,
                std: None,
                min: None,
                max: None,
                q25: None,
                q50: None,
                q75: None,
                mode: None,
                mode_frequency: None,
                example_values: column.example_values.clone(),
            };
            match &column.stats {
                KindStats::Numeric(stats) => {
                    row.mean = stats.mean;
                    row.std = stats.std;
                    row.min = stats.min;
                    row.max = stats.max;
                    row.q25 = stats.quantiles.q25;
                    row.q50 = stats.quantiles.q50;
                    row.q75 = stats.quantiles.q75;
                }
                KindStats::Categorical(stats) => {
                    row.mode = stats.mode.clone();
                    row.mode_frequency = Some(stats.mode_frequency);
                }
                KindStats::Other => {}
            }
            row
        })
        .collect();

    SummaryTable { rows }
}

/// Configuration options for rendering summary tables.
#[derive(Debug, Clone, PartialEq)]
pub struct FormatterConfig {
    /// Digits after the decimal point for floating-point cells
    pub precision: usize,
    /// Maximum number of rows to render (`None` for all)
    pub max_rows: Option<usize>,
}

impl Default for FormatterConfig {
    fn default() -> Self {
        Self {
            precision: 3,
            max_rows: None,
        }
    }
}

impl FormatterConfig {
    /// Creates a compact configuration for quick looks.
    pub fn minimal() -> Self {
        Self {
            precision: 2,
            max_rows: Some(20),
        }
    }

    /// Creates a configuration showing every row at full precision.
    pub fn detailed() -> Self {
        Self {
            precision: 6,
            max_rows: None,
        }
    }

    pub fn with_precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    pub fn with_max_rows(mut self, max_rows: usize) -> Self {
        self.max_rows = Some(max_rows);
        self
    }
}

/// Trait for rendering summary tables into different output formats.
pub trait TableFormatter {
    /// Formats a table into a string representation.
    fn format(&self, table: &SummaryTable) -> EdaResult<String>;

    /// Formats a table with custom configuration.
    fn format_with_config(
        &self,
        table: &SummaryTable,
        _config: &FormatterConfig,
    ) -> EdaResult<String> {
        self.format(table)
    }
}

/// Renders tables as aligned plain text.
#[derive(Debug, Clone, Default)]
pub struct HumanFormatter {
    config: FormatterConfig,
}

impl HumanFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: FormatterConfig) -> Self {
        Self { config }
    }
}

impl TableFormatter for HumanFormatter {
    fn format(&self, table: &SummaryTable) -> EdaResult<String> {
        self.format_with_config(table, &self.config)
    }

    fn format_with_config(
        &self,
        table: &SummaryTable,
        config: &FormatterConfig,
    ) -> EdaResult<String> {
        let rows: Vec<Vec<String>> = table
            .visible_rows(config)
            .iter()
            .map(|r| r.cells(config.precision))
            .collect();

        let mut widths: Vec<usize> = SummaryTable::COLUMNS.iter().map(|c| c.len()).collect();
        for row in &rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.chars().count());
            }
        }

        let mut output = String::new();
        let header: Vec<String> = SummaryTable::COLUMNS.iter().map(|c| c.to_string()).collect();
        write_aligned(&mut output, &header, &widths);
        let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        write_aligned(&mut output, &rule, &widths);
        for row in &rows {
            write_aligned(&mut output, row, &widths);
        }

        if rows.len() < table.len() {
            writeln!(output, "... {} more columns", table.len() - rows.len()).unwrap();
        }
        Ok(output)
    }
}

fn write_aligned(output: &mut String, cells: &[String], widths: &[usize]) {
    let line: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{cell:<width$}"))
        .collect();
    writeln!(output, "{}", line.join("  ").trim_end()).unwrap();
}

/// Renders tables as Markdown.
#[derive(Debug, Clone, Default)]
pub struct MarkdownFormatter {
    config: FormatterConfig,
}

impl MarkdownFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: FormatterConfig) -> Self {
        Self { config }
    }
}

impl TableFormatter for MarkdownFormatter {
    fn format(&self, table: &SummaryTable) -> EdaResult<String> {
        self.format_with_config(table, &self.config)
    }

    fn format_with_config(
        &self,
        table: &SummaryTable,
        config: &FormatterConfig,
    ) -> EdaResult<String> {
        let mut output = String::new();
        writeln!(output, "| {} |", SummaryTable::COLUMNS.join(" | ")).unwrap();
        writeln!(
            output,
            "|{}",
            SummaryTable::COLUMNS.iter().map(|_| "---|").collect::<String>()
        )
        .unwrap();

        for row in table.visible_rows(config) {
            let cells: Vec<String> = row
                .cells(config.precision)
                .into_iter()
                .map(|c| c.replace('|', "\\|"))
                .collect();
            writeln!(output, "| {} |", cells.join(" | ")).unwrap();
        }
        Ok(output)
    }
}

/// Renders tables as JSON.
#[derive(Debug, Clone)]
pub struct JsonFormatter {
    config: FormatterConfig,
    pretty: bool,
}

impl JsonFormatter {
    pub fn new() -> Self {
        Self {
            config: FormatterConfig::default(),
            pretty: true,
        }
    }

    pub fn with_config(config: FormatterConfig) -> Self {
        Self {
            config,
            pretty: true,
        }
    }

    /// Sets whether to use pretty-printed JSON.
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl TableFormatter for JsonFormatter {
    fn format(&self, table: &SummaryTable) -> EdaResult<String> {
        self.format_with_config(table, &self.config)
    }

    fn format_with_config(
        &self,
        table: &SummaryTable,
        config: &FormatterConfig,
    ) -> EdaResult<String> {
        let rows = table.visible_rows(config);
        let result = if self.pretty {
            serde_json::to_string_pretty(rows)
        } else {
            serde_json::to_string(rows)
        };
        result.map_err(|e| {
            EdaError::Serialization(format!("Failed to serialize table to JSON: {e}"))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::summary::summarize_dataset;
    use crate::test_fixtures::sample_dataset;

    fn sample_table() -> SummaryTable {
        flatten_summary_for_print(&summarize_dataset(&sample_dataset()))
    }

    #[test]
    fn test_flatten_preserves_order_and_fields() {
        let table = sample_table();
        assert_eq!(table.len(), 3);
        let names: Vec<&str> = table.rows.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["age", "height", "city"]);
        assert!(SummaryTable::has_column("name"));
        assert!(SummaryTable::has_column("missing_share"));

        let age = table.row("age").unwrap();
        assert_eq!(age.kind, "numeric");
        assert_eq!(age.missing_share, 0.25);
        assert_eq!(age.mean, Some(20.0));
        assert_eq!(age.mode, None);

        let city = table.row("city").unwrap();
        assert_eq!(city.kind, "categorical");
        assert_eq!(city.mode.as_deref(), Some("A"));
        assert_eq!(city.mode_frequency, Some(2));
        assert_eq!(city.mean, None);
    }

    #[test]
    fn test_cells_match_columns() {
        let table = sample_table();
        for row in &table.rows {
            assert_eq!(row.cells(2).len(), SummaryTable::COLUMNS.len());
        }
        assert_eq!(table.row("age").unwrap().cells(1)[7], "20.0");
    }

    #[test]
    fn test_human_formatter() {
        let output = HumanFormatter::new().format(&sample_table()).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 5);
        assert!(lines[0].starts_with("name"));
        assert!(lines[2].starts_with("age"));
        assert!(lines[4].starts_with("city"));
    }

    #[test]
    fn test_human_formatter_max_rows() {
        let formatter = HumanFormatter::with_config(FormatterConfig::default().with_max_rows(1));
        let output = formatter.format(&sample_table()).unwrap();
        assert!(output.contains("... 2 more columns"));
        assert!(!output.contains("city"));
    }

    #[test]
    fn test_markdown_formatter() {
        let output = MarkdownFormatter::new().format(&sample_table()).unwrap();
        assert!(output.starts_with("| name | dtype |"));
        assert_eq!(output.lines().count(), 5);
    }

    #[test]
    fn test_json_formatter_round_trips_rows() {
        let table = sample_table();
        let output = JsonFormatter::new().with_pretty(false).format(&table).unwrap();
        let rows: Vec<SummaryRow> = serde_json::from_str(&output).unwrap();
        assert_eq!(rows, table.rows);
    }
}
