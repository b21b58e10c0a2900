//! Rule-based chart suggestion generation.
//!
//! Every rule in the table contributes all the suggestions it matches, not
//! just the best one. Ranking is by the rule's fixed priority.

use crate::config::SuggestionConfig;
use crate::schema::Dataset;

use super::rules::{RuleContext, RULES};
use super::ChartSuggestion;

/// Generates ranked chart suggestions from a dataset's schema and contents.
pub struct SuggestionEngine {
    config: SuggestionConfig,
}

impl SuggestionEngine {
    /// Create an engine with default settings.
    pub fn new() -> Self {
        Self {
            config: SuggestionConfig::default(),
        }
    }

    /// Create an engine with custom settings.
    pub fn with_config(config: SuggestionConfig) -> Self {
        Self { config }
    }

    /// Generate, rank and truncate suggestions for a dataset.
    pub fn suggest(&self, dataset: &Dataset) -> Vec<ChartSuggestion> {
        let mut suggestions = self.candidates(dataset);

        // Stable: equal priorities keep rule order, then column order.
        suggestions.sort_by(|a, b| b.priority.cmp(&a.priority));
        suggestions.truncate(self.config.max_suggestions);

        suggestions
    }

    /// Every matching candidate in rule-table order, before ranking.
    pub fn candidates(&self, dataset: &Dataset) -> Vec<ChartSuggestion> {
        let ctx = RuleContext::new(dataset, &self.config);
        let mut candidates = Vec::new();

        for rule in RULES {
            if !(rule.applies)(&ctx) {
                continue;
            }

            let generated = (rule.generate)(&ctx);
            tracing::debug!(rule = rule.name, count = generated.len(), "Rule matched");

            candidates.extend(
                generated
                    .into_iter()
                    .map(|s| s.with_priority(rule.priority).with_rule(rule.name)),
            );
        }

        candidates
    }
}

impl Default for SuggestionEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{Cell, ColumnMeta, ColumnType, Row};
    use crate::suggestion::ChartType;

    /// One date column (12 distinct), one category (3 distinct), two numbers.
    fn sales_dataset() -> Dataset {
        let regions = ["north", "south", "east"];
        let rows: Vec<Row> = (0..12)
            .map(|i| {
                [
                    ("day".to_string(), Cell::from(format!("2024-01-{:02}", i + 1))),
                    ("region".to_string(), Cell::from(regions[i % 3])),
                    ("sales".to_string(), Cell::from(100 + i as i32)),
                    ("profit".to_string(), Cell::from(10 + i as i32)),
                ]
                .into_iter()
                .collect()
            })
            .collect();

        Dataset::new(
            rows,
            vec![
                ColumnMeta::new("day", ColumnType::Date),
                ColumnMeta::new("region", ColumnType::String),
                ColumnMeta::new("sales", ColumnType::Number),
                ColumnMeta::new("profit", ColumnType::Number),
            ],
        )
    }

    #[test]
    fn test_line_ranks_first() {
        let suggestions = SuggestionEngine::new().suggest(&sales_dataset());

        assert_eq!(suggestions.len(), 12);
        assert_eq!(suggestions[0].chart_type, ChartType::Line);
        assert_eq!(suggestions[0].priority, 10);

        for expected in [
            ChartType::Line,
            ChartType::Bar,
            ChartType::Pie,
            ChartType::Scatter,
            ChartType::Area,
        ] {
            assert!(
                suggestions.iter().any(|s| s.chart_type == expected),
                "missing {}",
                expected
            );
        }
    }

    #[test]
    fn test_sorted_by_descending_priority() {
        let suggestions = SuggestionEngine::new().suggest(&sales_dataset());
        assert!(suggestions.windows(2).all(|w| w[0].priority >= w[1].priority));
    }

    #[test]
    fn test_ties_keep_rule_then_column_order() {
        let suggestions = SuggestionEngine::new().suggest(&sales_dataset());
        let sevens: Vec<(ChartType, &str)> = suggestions
            .iter()
            .filter(|s| s.priority == 7)
            .map(|s| (s.chart_type, s.y_columns[0].as_str()))
            .collect();

        assert_eq!(
            sevens,
            vec![
                (ChartType::Scatter, "profit"),
                (ChartType::Area, "sales"),
                (ChartType::Area, "profit"),
            ]
        );
    }

    #[test]
    fn test_pie_requires_moderate_cardinality() {
        let suggestions = SuggestionEngine::new().candidates(&sales_dataset());
        let pies: Vec<&str> = suggestions
            .iter()
            .filter(|s| s.chart_type == ChartType::Pie)
            .map(|s| s.x_column.as_str())
            .collect();

        // 12 distinct days is too many; 3 regions qualifies.
        assert_eq!(pies, vec!["region", "region"]);
    }

    #[test]
    fn test_truncation_drops_lowest_priority() {
        let candidates = SuggestionEngine::new().candidates(&sales_dataset());
        assert_eq!(candidates.len(), 15);

        let ranked = SuggestionEngine::new().suggest(&sales_dataset());
        assert!(ranked.iter().all(|s| s.priority >= 6));
    }

    #[test]
    fn test_radar_caps_metrics() {
        let numbers = ["a", "b", "c", "d", "e", "f"];
        let mut columns = vec![ColumnMeta::new("team", ColumnType::String)];
        columns.extend(numbers.iter().map(|n| ColumnMeta::new(*n, ColumnType::Number)));
        let dataset = Dataset::new(Vec::new(), columns);

        let radar: Vec<ChartSuggestion> = SuggestionEngine::new()
            .candidates(&dataset)
            .into_iter()
            .filter(|s| s.chart_type == ChartType::Radar)
            .collect();

        assert_eq!(radar.len(), 1);
        assert_eq!(radar[0].x_column, "team");
        assert_eq!(radar[0].y_columns, vec!["a", "b", "c", "d", "e"]);
    }

    #[test]
    fn test_no_numeric_columns_yields_nothing() {
        let dataset = Dataset::new(
            Vec::new(),
            vec![ColumnMeta::new("name", ColumnType::String)],
        );
        assert!(SuggestionEngine::new().suggest(&dataset).is_empty());
    }

    #[test]
    fn test_deterministic() {
        let dataset = sales_dataset();
        let engine = SuggestionEngine::new();
        assert_eq!(engine.suggest(&dataset), engine.suggest(&dataset));
    }
}
