//! Column type inference by thresholded voting over a value sample.

use indexmap::IndexSet;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::InferenceConfig;
use crate::schema::{parse_number, Cell, ColumnMeta, ColumnType, Dataset, Row};

// =============================================================================
// LAZY STATIC PATTERNS
// =============================================================================
// Date patterns compiled once on first use.

static DATE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap(),     // 2025-01-15
        Regex::new(r"^\d{2}/\d{2}/\d{4}$").unwrap(),     // 15/01/2025
        Regex::new(r"^\d{4}/\d{2}/\d{2}$").unwrap(),     // 2025/01/15
        Regex::new(r"^\d{1,2}-\d{1,2}-\d{4}$").unwrap(), // 15-1-2025
    ]
});

/// Boolean literals, compared case-insensitively. Includes Persian yes/no.
const BOOLEAN_TOKENS: &[&str] = &["true", "false", "yes", "no", "بله", "خیر"];

/// Category a single sampled value votes for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Boolean,
    Number,
    Date,
    Other,
}

/// Classify one value. Checks run in priority order: boolean, number, date.
pub fn classify_value(cell: &Cell) -> ValueKind {
    match cell {
        Cell::Boolean(_) => ValueKind::Boolean,
        Cell::Number(n) if n.is_finite() => ValueKind::Number,
        Cell::Number(_) | Cell::Null => ValueKind::Other,
        Cell::Text(text) => {
            let trimmed = text.trim();
            if is_boolean_token(trimmed) {
                ValueKind::Boolean
            } else if parse_number(trimmed).is_some() {
                ValueKind::Number
            } else if is_date_text(trimmed) {
                ValueKind::Date
            } else {
                ValueKind::Other
            }
        }
    }
}

fn is_boolean_token(value: &str) -> bool {
    let lower = value.to_lowercase();
    BOOLEAN_TOKENS.contains(&lower.as_str())
}

fn is_date_text(value: &str) -> bool {
    DATE_PATTERNS.iter().any(|pattern| pattern.is_match(value))
}

/// Per-category tallies over one column's sample.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TypeVote {
    /// Non-missing values sampled.
    pub sampled: usize,
    pub numbers: usize,
    pub booleans: usize,
    pub dates: usize,
}

impl TypeVote {
    /// Resolve the vote: the first of number, boolean, date whose share
    /// exceeds `threshold` wins; anything else is a string.
    pub fn resolve(&self, threshold: f64) -> ColumnType {
        if self.sampled == 0 {
            return ColumnType::String;
        }

        let total = self.sampled as f64;
        let exceeds = |count: usize| count as f64 / total > threshold;

        if exceeds(self.numbers) {
            ColumnType::Number
        } else if exceeds(self.booleans) {
            ColumnType::Boolean
        } else if exceeds(self.dates) {
            ColumnType::Date
        } else {
            ColumnType::String
        }
    }
}

/// Builds the ordered schema for a set of rows.
pub struct TypeInferencer {
    config: InferenceConfig,
}

impl TypeInferencer {
    /// Create an inferencer with default settings.
    pub fn new() -> Self {
        Self {
            config: InferenceConfig::default(),
        }
    }

    /// Create an inferencer with custom settings.
    pub fn with_config(config: InferenceConfig) -> Self {
        Self { config }
    }

    /// Infer the schema and pair it with the rows.
    pub fn infer_dataset(&self, rows: Vec<Row>) -> Dataset {
        let columns = self.infer_columns(&rows);
        Dataset::new(rows, columns)
    }

    /// Infer metadata for every column, in first-seen order.
    pub fn infer_columns(&self, rows: &[Row]) -> Vec<ColumnMeta> {
        let columns: Vec<ColumnMeta> = column_names(rows)
            .into_iter()
            .map(|name| {
                let column_type = self.infer_column_type(rows, &name);
                ColumnMeta::new(name, column_type)
            })
            .collect();

        tracing::debug!(
            rows = rows.len(),
            columns = columns.len(),
            "Inferred column types"
        );

        columns
    }

    /// Infer the type of a single column.
    pub fn infer_column_type(&self, rows: &[Row], column: &str) -> ColumnType {
        self.vote(rows, column).resolve(self.config.threshold)
    }

    /// Tally value categories over the first `sample_size` rows.
    pub fn vote(&self, rows: &[Row], column: &str) -> TypeVote {
        let mut vote = TypeVote::default();

        let sample = rows
            .iter()
            .take(self.config.sample_size)
            .filter_map(|row| row.get(column))
            .filter(|cell| !cell.is_missing());

        for cell in sample {
            vote.sampled += 1;
            match classify_value(cell) {
                ValueKind::Number => vote.numbers += 1,
                ValueKind::Boolean => vote.booleans += 1,
                ValueKind::Date => vote.dates += 1,
                ValueKind::Other => {}
            }
        }

        vote
    }
}

impl Default for TypeInferencer {
    fn default() -> Self {
        Self::new()
    }
}

/// Union of row keys: the first row's order, then unseen keys as they appear.
fn column_names(rows: &[Row]) -> IndexSet<String> {
    let mut names = IndexSet::new();
    for row in rows {
        for key in row.keys() {
            if !names.contains(key) {
                names.insert(key.clone());
            }
        }
    }
    names
}
