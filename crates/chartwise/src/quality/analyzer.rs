//! Dataset-wide quality statistics.

use std::collections::HashSet;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::config::QualityConfig;
use crate::schema::{row_signature, ColumnType, Dataset};

use super::profile::ColumnProfile;
use super::stats::{self, OutlierBounds};

/// One value of a frequency distribution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrequencyEntry {
    pub value: String,
    pub count: usize,
}

/// Aggregate statistics over a whole dataset.
///
/// Always recomputed from the dataset it describes; never cached.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatisticsSnapshot {
    pub total_rows: usize,
    pub total_columns: usize,
    pub numeric_columns: usize,
    pub string_columns: usize,
    pub date_columns: usize,
    pub boolean_columns: usize,
    /// Missing cells across every row and schema column.
    pub missing_values: usize,
    /// Rows whose signature repeats an earlier row.
    pub duplicate_rows: usize,
}

impl StatisticsSnapshot {
    /// Total cells in the rectangular projection of the dataset.
    pub fn total_cells(&self) -> usize {
        self.total_rows * self.total_columns
    }

    /// Share of cells that are missing, as a percentage.
    pub fn missing_percent(&self) -> f64 {
        match self.total_cells() {
            0 => 0.0,
            cells => self.missing_values as f64 / cells as f64 * 100.0,
        }
    }
}

/// Computes quality statistics over a dataset.
///
/// No operation fails: insufficient data yields 0 or an empty result, and a
/// column absent from the schema is logged and treated the same way.
pub struct DataQualityAnalyzer {
    config: QualityConfig,
}

impl DataQualityAnalyzer {
    /// Create an analyzer with default settings.
    pub fn new() -> Self {
        Self {
            config: QualityConfig::default(),
        }
    }

    /// Create an analyzer with custom settings.
    pub fn with_config(config: QualityConfig) -> Self {
        Self { config }
    }

    /// Get the analyzer settings.
    pub fn config(&self) -> &QualityConfig {
        &self.config
    }

    /// Count missing cells over every row and schema column.
    pub fn count_missing(&self, dataset: &Dataset) -> usize {
        dataset
            .rows
            .iter()
            .map(|row| dataset.missing_in_row(row))
            .sum()
    }

    /// Count rows whose canonical signature was already seen.
    pub fn count_duplicates(&self, dataset: &Dataset) -> usize {
        let mut seen = HashSet::with_capacity(dataset.row_count());
        dataset
            .rows
            .iter()
            .filter(|row| !seen.insert(row_signature(row)))
            .count()
    }

    /// Mean of the column's numeric values.
    pub fn mean(&self, dataset: &Dataset, column: &str) -> f64 {
        if !self.require_column(dataset, column, "mean") {
            return 0.0;
        }
        stats::mean(&dataset.numeric_values(column, None))
    }

    /// Median of the column's numeric values.
    pub fn median(&self, dataset: &Dataset, column: &str) -> f64 {
        if !self.require_column(dataset, column, "median") {
            return 0.0;
        }
        stats::median(&dataset.numeric_values(column, None))
    }

    /// IQR outlier bounds over the sampled rows of a column.
    pub fn outliers(&self, dataset: &Dataset, column: &str) -> OutlierBounds {
        if !self.require_column(dataset, column, "outliers") {
            return OutlierBounds::default();
        }
        let values = dataset.numeric_values(column, Some(self.config.sample_size));
        stats::iqr_bounds(&values, self.config.iqr_multiplier).unwrap_or_default()
    }

    /// Pearson correlation between two columns over the sampled rows.
    pub fn correlation(&self, dataset: &Dataset, a: &str, b: &str) -> f64 {
        if !self.require_column(dataset, a, "correlation")
            || !self.require_column(dataset, b, "correlation")
        {
            return 0.0;
        }

        let pairs: Vec<(f64, f64)> = dataset
            .rows
            .iter()
            .take(self.config.sample_size)
            .filter_map(|row| {
                let x = row.get(a)?.as_f64()?;
                let y = row.get(b)?.as_f64()?;
                Some((x, y))
            })
            .collect();

        stats::pearson(&pairs)
    }

    /// Most frequent stringified values, descending by count.
    ///
    /// Ties keep the order in which values were first encountered.
    pub fn frequency(&self, dataset: &Dataset, column: &str, top_k: usize) -> Vec<FrequencyEntry> {
        if !self.require_column(dataset, column, "frequency") {
            return Vec::new();
        }

        let mut counts: IndexMap<String, usize> = IndexMap::new();
        for cell in dataset.column_cells(column) {
            *counts.entry(cell.to_string()).or_insert(0) += 1;
        }

        let mut entries: Vec<FrequencyEntry> = counts
            .into_iter()
            .map(|(value, count)| FrequencyEntry { value, count })
            .collect();
        entries.sort_by(|a, b| b.count.cmp(&a.count));
        entries.truncate(top_k);
        entries
    }

    /// Frequency distribution using the configured `frequency_top_k`.
    pub fn top_values(&self, dataset: &Dataset, column: &str) -> Vec<FrequencyEntry> {
        self.frequency(dataset, column, self.config.frequency_top_k)
    }

    /// Compute the dataset-wide statistics snapshot.
    pub fn statistics(&self, dataset: &Dataset) -> StatisticsSnapshot {
        let of_type = |t: ColumnType| dataset.columns_of_type(t).count();

        let snapshot = StatisticsSnapshot {
            total_rows: dataset.row_count(),
            total_columns: dataset.column_count(),
            numeric_columns: of_type(ColumnType::Number),
            string_columns: of_type(ColumnType::String),
            date_columns: of_type(ColumnType::Date),
            boolean_columns: of_type(ColumnType::Boolean),
            missing_values: self.count_missing(dataset),
            duplicate_rows: self.count_duplicates(dataset),
        };

        tracing::debug!(
            rows = snapshot.total_rows,
            missing = snapshot.missing_values,
            duplicates = snapshot.duplicate_rows,
            "Computed statistics"
        );

        snapshot
    }

    /// Profile every schema column.
    pub fn profiles(&self, dataset: &Dataset) -> Vec<ColumnProfile> {
        dataset
            .columns
            .iter()
            .map(|column| ColumnProfile::build(self, dataset, column))
            .collect()
    }

    fn require_column(&self, dataset: &Dataset, column: &str, operation: &str) -> bool {
        let known = dataset.has_column(column);
        if !known {
            tracing::warn!(column, operation, "Column not in schema, returning default");
        }
        known
    }
}

impl Default for DataQualityAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}
