//! At-a-glance findings for a dashboard summary panel.

use serde::{Deserialize, Serialize};

use crate::schema::{ColumnType, Dataset};

use super::analyzer::StatisticsSnapshot;

/// Tone of an insight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightKind {
    Info,
    Warning,
    Success,
}

/// A short finding about the dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insight {
    pub kind: InsightKind,
    pub title: String,
    pub description: String,
}

impl Insight {
    fn new(kind: InsightKind, title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            description: description.into(),
        }
    }
}

/// Derive quick insights from a dataset and its statistics.
///
/// An empty dataset has no insights.
pub fn quick_insights(dataset: &Dataset, statistics: &StatisticsSnapshot) -> Vec<Insight> {
    if dataset.is_empty() {
        return Vec::new();
    }

    let mut insights = vec![Insight::new(
        InsightKind::Info,
        "Dataset size",
        format!("{} × {}", statistics.total_rows, statistics.total_columns),
    )];

    let empty_kind = if statistics.missing_values > 0 {
        InsightKind::Warning
    } else {
        InsightKind::Success
    };
    insights.push(Insight::new(
        empty_kind,
        "Empty cells",
        format!("{:.1}%", statistics.missing_percent()),
    ));

    if let Some(column) = dataset.columns_of_type(ColumnType::Number).next() {
        let values = dataset.numeric_values(&column.name, None);
        let max = values.iter().copied().reduce(f64::max);
        let min = values.iter().copied().reduce(f64::min);
        if let (Some(max), Some(min)) = (max, min) {
            insights.push(Insight::new(
                InsightKind::Info,
                format!("Highest {}", column.name),
                max.to_string(),
            ));
            insights.push(Insight::new(
                InsightKind::Info,
                format!("Lowest {}", column.name),
                min.to_string(),
            ));
        }
    }

    if statistics.duplicate_rows > 0 {
        insights.push(Insight::new(
            InsightKind::Warning,
            "Duplicate rows",
            format!("{} row(s) repeat an earlier row", statistics.duplicate_rows),
        ));
    }

    insights
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quality::DataQualityAnalyzer;
    use crate::schema::{Cell, ColumnMeta, Row};

    fn dataset() -> Dataset {
        let rows: Vec<Row> = [("a", "5"), ("b", "12"), ("b", "12"), ("c", "")]
            .iter()
            .map(|(k, v)| {
                [
                    ("name".to_string(), Cell::from(*k)),
                    ("score".to_string(), Cell::from(*v)),
                ]
                .into_iter()
                .collect()
            })
            .collect();
        Dataset::new(
            rows,
            vec![
                ColumnMeta::new("name", ColumnType::String),
                ColumnMeta::new("score", ColumnType::Number),
            ],
        )
    }

    #[test]
    fn test_quick_insights() {
        let dataset = dataset();
        let statistics = DataQualityAnalyzer::new().statistics(&dataset);
        let insights = quick_insights(&dataset, &statistics);

        let titles: Vec<&str> = insights.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(
            titles,
            vec!["Dataset size", "Empty cells", "Highest score", "Lowest score", "Duplicate rows"]
        );
        assert_eq!(insights[0].description, "4 × 2");
        assert_eq!(insights[1].description, "12.5%");
        assert_eq!(insights[1].kind, InsightKind::Warning);
        assert_eq!(insights[2].description, "12");
        assert_eq!(insights[3].description, "5");
    }

    #[test]
    fn test_empty_dataset_has_no_insights() {
        let dataset = Dataset::default();
        let statistics = DataQualityAnalyzer::new().statistics(&dataset);
        assert!(quick_insights(&dataset, &statistics).is_empty());
    }
}
