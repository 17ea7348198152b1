//! Pairwise Pearson correlation between numeric columns.
//!
//! Each pair is computed over pairwise-complete observations: only rows where
//! both columns hold a value take part. A coefficient is undefined (`None`) when
//! fewer than two such rows exist or either side has zero variance over them.

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::analyzers::classifier::{ClassifiedColumn, ColumnValues};
use crate::dataset::Dataset;

/// Running co-moments for one column pair.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CorrelationState {
    /// Number of valid pairs (both values non-null)
    pub n: u64,
    pub mean_x: f64,
    pub mean_y: f64,
    /// Sum of squared deviations of x
    pub m2_x: f64,
    /// Sum of squared deviations of y
    pub m2_y: f64,
    /// Sum of co-deviations of x and y
    pub c_xy: f64,
}

impl CorrelationState {
    /// Accumulates the pairwise-complete observations of two columns.
    pub fn from_pairs(xs: &[Option<f64>], ys: &[Option<f64>]) -> Self {
        let mut state = Self::default();
        for (x, y) in xs.iter().zip(ys) {
            if let (Some(x), Some(y)) = (x, y) {
                state.update(*x, *y);
            }
        }
        state
    }

    pub fn update(&mut self, x: f64, y: f64) {
        self.n += 1;
        let n = self.n as f64;
        let dx = x - self.mean_x;
        self.mean_x += dx / n;
        let dy = y - self.mean_y;
        self.mean_y += dy / n;
        self.m2_x += dx * (x - self.mean_x);
        self.m2_y += dy * (y - self.mean_y);
        self.c_xy += dx * (y - self.mean_y);
    }

    /// Pearson coefficient clamped to [-1, 1], or `None` when undefined.
    pub fn pearson(&self) -> Option<f64> {
        if self.n < 2 || self.m2_x <= 0.0 || self.m2_y <= 0.0 {
            return None;
        }
        let r = self.c_xy / (self.m2_x.sqrt() * self.m2_y.sqrt());
        r.is_finite().then(|| r.clamp(-1.0, 1.0))
    }
}

/// Square, symmetric correlation matrix over numeric columns.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CorrelationMatrix {
    /// Numeric column names, in dataset order. Row and column index of `values`.
    pub columns: Vec<String>,
    pub values: Vec<Vec<Option<f64>>>,
}

impl CorrelationMatrix {
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    fn index_of(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == column)
    }

    /// Coefficient for a column pair; `None` if either column is absent or the
    /// coefficient is undefined.
    pub fn get(&self, a: &str, b: &str) -> Option<f64> {
        let i = self.index_of(a)?;
        let j = self.index_of(b)?;
        self.values[i][j]
    }

    /// All defined off-diagonal pairs `(a, b, r)` with `a` before `b`, by
    /// descending absolute correlation.
    pub fn strongest_pairs(&self) -> Vec<(&str, &str, f64)> {
        let mut pairs = Vec::new();
        for i in 0..self.columns.len() {
            for j in (i + 1)..self.columns.len() {
                if let Some(r) = self.values[i][j] {
                    pairs.push((self.columns[i].as_str(), self.columns[j].as_str(), r));
                }
            }
        }
        pairs.sort_by(|a, b| b.2.abs().total_cmp(&a.2.abs()));
        pairs
    }
}

/// Computes the Pearson correlation matrix of all numeric columns.
///
/// Returns an empty matrix when fewer than two numeric columns exist.
#[instrument(skip(dataset), fields(rows = dataset.n_rows(), cols = dataset.n_cols()))]
pub fn correlation_matrix(dataset: &Dataset) -> CorrelationMatrix {
    correlation_from_columns(&dataset.classify_columns())
}

pub(crate) fn correlation_from_columns(columns: &[ClassifiedColumn]) -> CorrelationMatrix {
    let numeric: Vec<(&str, &[Option<f64>])> = columns
        .iter()
        .filter_map(|column| match column.values() {
            ColumnValues::Numeric(values) => Some((column.name(), values.as_slice())),
            _ => None,
        })
        .collect();

    if numeric.len() < 2 {
        debug!(
            numeric_columns = numeric.len(),
            "Fewer than two numeric columns, correlation matrix is empty"
        );
        return CorrelationMatrix::default();
    }

    let k = numeric.len();
    let mut values = vec![vec![None; k]; k];
    for i in 0..k {
        let diagonal = CorrelationState::from_pairs(numeric[i].1, numeric[i].1);
        values[i][i] = diagonal.pearson().map(|_| 1.0);

        for j in (i + 1)..k {
            let r = CorrelationState::from_pairs(numeric[i].1, numeric[j].1).pearson();
            values[i][j] = r;
            values[j][i] = r;
        }
    }

    debug!(numeric_columns = k, "Computed correlation matrix");
    CorrelationMatrix {
        columns: numeric.iter().map(|(name, _)| name.to_string()).collect(),
        values,
    }
}
