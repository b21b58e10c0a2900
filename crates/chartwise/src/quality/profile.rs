//! Per-column summaries for summary panels and reports.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::schema::{Cell, ColumnMeta, ColumnType, Dataset};

use super::analyzer::DataQualityAnalyzer;

/// Summary of a single column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnProfile {
    pub name: String,
    #[serde(rename = "type")]
    pub column_type: ColumnType,
    /// Missing cells, absent keys included.
    pub missing: usize,
    /// Distinct non-missing values, compared as text.
    pub distinct: usize,
    // Numeric fields are only set for number columns with a valid value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mean: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub median: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outliers: Option<usize>,
}

impl ColumnProfile {
    /// Build the profile of `column` using the analyzer's estimators.
    pub fn build(analyzer: &DataQualityAnalyzer, dataset: &Dataset, column: &ColumnMeta) -> Self {
        let name = column.name.as_str();

        let missing = dataset.column_cells(name).filter(|c| c.is_missing()).count();
        let distinct = dataset
            .column_cells(name)
            .filter(|c| !c.is_missing())
            .map(Cell::to_string)
            .collect::<HashSet<_>>()
            .len();

        let mut profile = Self {
            name: column.name.clone(),
            column_type: column.column_type,
            missing,
            distinct,
            mean: None,
            median: None,
            min: None,
            max: None,
            outliers: None,
        };

        if column.column_type.is_numeric() {
            let values = dataset.numeric_values(name, None);
            if !values.is_empty() {
                profile.mean = Some(analyzer.mean(dataset, name));
                profile.median = Some(analyzer.median(dataset, name));
                profile.min = values.iter().copied().reduce(f64::min);
                profile.max = values.iter().copied().reduce(f64::max);
                profile.outliers = Some(analyzer.outliers(dataset, name).count);
            }
        }

        profile
    }
}
