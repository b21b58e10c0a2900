//! Pure cleaning transformations.

use std::collections::{BTreeSet, HashSet};

use crate::config::CleaningConfig;
use crate::quality::stats;
use crate::schema::{row_signature, Cell, ColumnMeta, Dataset, Row};

use super::operations::{CleaningOperation, CleaningOutcome, FillStrategy};

/// Placeholder written into missing non-numeric cells.
pub const TEXT_PLACEHOLDER: &str = "-";

/// Applies cleaning operations, each producing a new dataset.
///
/// Operations never compose on their own; callers choose the order.
pub struct CleaningPipeline {
    config: CleaningConfig,
}

impl CleaningPipeline {
    /// Create a pipeline with default settings.
    pub fn new() -> Self {
        Self {
            config: CleaningConfig::default(),
        }
    }

    /// Create a pipeline with custom settings.
    pub fn with_config(config: CleaningConfig) -> Self {
        Self { config }
    }

    /// Apply a single operation.
    pub fn apply(&self, dataset: &Dataset, operation: &CleaningOperation) -> CleaningOutcome {
        match operation {
            CleaningOperation::Deduplicate => self.deduplicate(dataset),
            CleaningOperation::FillMissing { strategy } => self.fill_missing(dataset, *strategy),
            CleaningOperation::DropIncomplete { threshold } => {
                self.drop_incomplete(dataset, *threshold)
            }
            CleaningOperation::RemoveOutliers => self.remove_outliers(dataset),
        }
    }

    /// Drop-incomplete using the configured threshold.
    pub fn default_drop_incomplete(&self) -> CleaningOperation {
        CleaningOperation::DropIncomplete {
            threshold: self.config.incomplete_threshold,
        }
    }

    /// Keep the first row of each signature, preserving order.
    pub fn deduplicate(&self, dataset: &Dataset) -> CleaningOutcome {
        let mut seen = HashSet::with_capacity(dataset.row_count());
        let rows: Vec<Row> = dataset
            .rows
            .iter()
            .filter(|row| seen.insert(row_signature(row)))
            .cloned()
            .collect();

        self.outcome(
            dataset,
            rows,
            dataset.row_count() - seen.len(),
            CleaningOperation::Deduplicate,
        )
    }

    /// Fill missing cells of every schema column.
    pub fn fill_missing(&self, dataset: &Dataset, strategy: FillStrategy) -> CleaningOutcome {
        let fills: Vec<(&str, Cell)> = dataset
            .columns
            .iter()
            .map(|column| (column.name.as_str(), self.fill_value(dataset, column, strategy)))
            .collect();

        let mut filled = 0;
        let rows: Vec<Row> = dataset
            .rows
            .iter()
            .map(|row| {
                let mut row = row.clone();
                for (name, fill) in &fills {
                    if row.get(*name).is_none_or(Cell::is_missing) {
                        row.insert(name.to_string(), fill.clone());
                        filled += 1;
                    }
                }
                row
            })
            .collect();

        self.outcome(
            dataset,
            rows,
            filled,
            CleaningOperation::FillMissing { strategy },
        )
    }

    /// Remove rows whose missing-cell count exceeds `threshold` of the column count.
    pub fn drop_incomplete(&self, dataset: &Dataset, threshold: f64) -> CleaningOutcome {
        let limit = threshold * dataset.column_count() as f64;
        let rows: Vec<Row> = dataset
            .rows
            .iter()
            .filter(|row| dataset.missing_in_row(row) as f64 <= limit)
            .cloned()
            .collect();

        let removed = dataset.row_count() - rows.len();
        self.outcome(
            dataset,
            rows,
            removed,
            CleaningOperation::DropIncomplete { threshold },
        )
    }

    /// Remove every row that lies outside the IQR fences of any number column.
    pub fn remove_outliers(&self, dataset: &Dataset) -> CleaningOutcome {
        let mut marked = BTreeSet::new();

        for column in dataset.columns.iter().filter(|c| c.column_type.is_numeric()) {
            let indexed: Vec<(usize, f64)> = dataset
                .column_cells(&column.name)
                .enumerate()
                .filter_map(|(idx, cell)| cell.as_f64().map(|v| (idx, v)))
                .collect();
            let values: Vec<f64> = indexed.iter().map(|(_, v)| *v).collect();

            let Some(bounds) = stats::iqr_bounds(&values, self.config.iqr_multiplier) else {
                continue;
            };

            marked.extend(
                indexed
                    .iter()
                    .filter(|(_, v)| bounds.is_outlier(*v))
                    .map(|(idx, _)| *idx),
            );
        }

        let rows: Vec<Row> = dataset
            .rows
            .iter()
            .enumerate()
            .filter(|(idx, _)| !marked.contains(idx))
            .map(|(_, row)| row.clone())
            .collect();

        self.outcome(
            dataset,
            rows,
            marked.len(),
            CleaningOperation::RemoveOutliers,
        )
    }

    fn fill_value(&self, dataset: &Dataset, column: &ColumnMeta, strategy: FillStrategy) -> Cell {
        if !column.column_type.is_numeric() {
            return Cell::from(TEXT_PLACEHOLDER);
        }

        let value = match strategy {
            FillStrategy::Default => return Cell::Number(0.0),
            FillStrategy::Mean => stats::mean(&dataset.numeric_values(&column.name, None)),
            FillStrategy::Median => stats::median(&dataset.numeric_values(&column.name, None)),
        };
        Cell::Number(stats::round_to(value, self.config.fill_decimals))
    }

    fn outcome(
        &self,
        dataset: &Dataset,
        rows: Vec<Row>,
        affected: usize,
        operation: CleaningOperation,
    ) -> CleaningOutcome {
        tracing::debug!(
            operation = %operation.description(),
            affected,
            rows = rows.len(),
            "Applied cleaning operation"
        );

        CleaningOutcome {
            dataset: dataset.with_rows(rows),
            affected,
            operation,
        }
    }
}

impl Default for CleaningPipeline {
    fn default() -> Self {
        Self::new()
    }
}
