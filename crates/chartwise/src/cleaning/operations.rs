//! Cleaning operations that can be applied to a dataset.

use serde::{Deserialize, Serialize};

use crate::schema::Dataset;

/// How missing cells of number columns are filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FillStrategy {
    /// 0 for number columns, `"-"` for everything else.
    Default,
    /// Column mean, rounded.
    Mean,
    /// Column median, rounded.
    Median,
}

impl FillStrategy {
    /// Get a human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            FillStrategy::Default => "default values",
            FillStrategy::Mean => "column mean",
            FillStrategy::Median => "column median",
        }
    }
}

/// A cleaning operation to apply to a dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum CleaningOperation {
    /// Drop rows whose signature repeats an earlier row.
    Deduplicate,

    /// Fill missing cells.
    FillMissing { strategy: FillStrategy },

    /// Drop rows whose share of missing cells exceeds `threshold`.
    DropIncomplete { threshold: f64 },

    /// Drop rows that are IQR outliers in any number column.
    RemoveOutliers,
}

impl CleaningOperation {
    /// Get a human-readable description of the operation.
    pub fn description(&self) -> String {
        match self {
            CleaningOperation::Deduplicate => "Remove duplicate rows".to_string(),
            CleaningOperation::FillMissing { strategy } => {
                format!("Fill missing values with {}", strategy.label())
            }
            CleaningOperation::DropIncomplete { threshold } => {
                format!(
                    "Drop rows with more than {}% missing cells",
                    (threshold * 100.0).round()
                )
            }
            CleaningOperation::RemoveOutliers => {
                "Remove rows with outliers in any numeric column".to_string()
            }
        }
    }
}

/// Result of applying one cleaning operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CleaningOutcome {
    /// The cleaned dataset. The input dataset is left untouched.
    pub dataset: Dataset,

    /// Rows removed, or cells filled for fill operations.
    pub affected: usize,

    /// The operation that produced this outcome.
    pub operation: CleaningOperation,
}

impl CleaningOutcome {
    /// Check whether the operation changed anything.
    pub fn is_noop(&self) -> bool {
        self.affected == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptions() {
        assert_eq!(
            CleaningOperation::DropIncomplete { threshold: 0.5 }.description(),
            "Drop rows with more than 50% missing cells"
        );
        assert_eq!(
            CleaningOperation::FillMissing {
                strategy: FillStrategy::Median
            }
            .description(),
            "Fill missing values with column median"
        );
    }

    #[test]
    fn test_serialized_shape() {
        let op = CleaningOperation::FillMissing {
            strategy: FillStrategy::Mean,
        };
        let json = serde_json::to_string(&op).unwrap();
        assert_eq!(json, r#"{"op":"fill_missing","strategy":"mean"}"#);
    }
}
