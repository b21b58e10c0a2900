//! The chart suggestion rule table.
//!
//! Rules are evaluated in table order. Each contributes every suggestion it
//! matches; the engine ranks them by the rule's priority.

use std::collections::HashSet;

use crate::config::SuggestionConfig;
use crate::quality::stats;
use crate::schema::{Cell, ColumnMeta, ColumnType, Dataset};

use super::suggestion::{ChartSuggestion, ChartType};

/// Schema columns grouped by role, each in schema order.
pub struct ColumnPartition<'a> {
    pub numeric: Vec<&'a ColumnMeta>,
    /// String and date columns.
    pub categorical: Vec<&'a ColumnMeta>,
    pub dates: Vec<&'a ColumnMeta>,
}

impl<'a> ColumnPartition<'a> {
    pub fn of(dataset: &'a Dataset) -> Self {
        let filter = |pred: fn(&ColumnType) -> bool| -> Vec<&'a ColumnMeta> {
            dataset
                .columns
                .iter()
                .filter(|c| pred(&c.column_type))
                .collect()
        };

        Self {
            numeric: filter(ColumnType::is_numeric),
            categorical: filter(ColumnType::is_categorical),
            dates: filter(ColumnType::is_temporal),
        }
    }
}

/// Everything a rule may inspect.
pub struct RuleContext<'a> {
    pub dataset: &'a Dataset,
    pub columns: ColumnPartition<'a>,
    pub config: &'a SuggestionConfig,
}

impl<'a> RuleContext<'a> {
    pub fn new(dataset: &'a Dataset, config: &'a SuggestionConfig) -> Self {
        Self {
            dataset,
            columns: ColumnPartition::of(dataset),
            config,
        }
    }

    /// Distinct non-missing values of a column over all rows, compared as text.
    pub fn distinct_count(&self, column: &str) -> usize {
        self.dataset
            .column_cells(column)
            .filter(|c| !c.is_missing())
            .map(Cell::to_string)
            .collect::<HashSet<_>>()
            .len()
    }
}

/// One row of the rule table.
pub struct SuggestionRule {
    pub name: &'static str,
    pub chart_type: ChartType,
    pub priority: u8,
    pub applies: fn(&RuleContext) -> bool,
    pub generate: fn(&RuleContext) -> Vec<ChartSuggestion>,
}

/// Rules in evaluation order. Ties in priority keep this order.
pub static RULES: &[SuggestionRule] = &[
    SuggestionRule {
        name: "trend",
        chart_type: ChartType::Line,
        priority: 10,
        applies: has_dates_and_numbers,
        generate: trend,
    },
    SuggestionRule {
        name: "category_comparison",
        chart_type: ChartType::Bar,
        priority: 9,
        applies: has_categories_and_numbers,
        generate: category_comparison,
    },
    SuggestionRule {
        name: "share_of_whole",
        chart_type: ChartType::Pie,
        priority: 8,
        applies: has_categories_and_numbers,
        generate: share_of_whole,
    },
    SuggestionRule {
        name: "correlation",
        chart_type: ChartType::Scatter,
        priority: 7,
        applies: has_two_numbers,
        generate: correlation,
    },
    SuggestionRule {
        name: "cumulative_trend",
        chart_type: ChartType::Area,
        priority: 7,
        applies: has_dates_and_numbers,
        generate: cumulative_trend,
    },
    SuggestionRule {
        name: "multi_dimension",
        chart_type: ChartType::Radar,
        priority: 6,
        applies: has_radar_shape,
        generate: multi_dimension,
    },
    SuggestionRule {
        name: "hierarchical_share",
        chart_type: ChartType::Treemap,
        priority: 6,
        applies: has_two_categories_and_numbers,
        generate: hierarchical_share,
    },
    SuggestionRule {
        name: "single_metric",
        chart_type: ChartType::Gauge,
        priority: 5,
        applies: has_numbers,
        generate: single_metric,
    },
    SuggestionRule {
        name: "process_funnel",
        chart_type: ChartType::Funnel,
        priority: 5,
        applies: has_categories_and_numbers,
        generate: process_funnel,
    },
];

fn has_dates_and_numbers(ctx: &RuleContext) -> bool {
    !ctx.columns.dates.is_empty() && !ctx.columns.numeric.is_empty()
}

fn has_categories_and_numbers(ctx: &RuleContext) -> bool {
    !ctx.columns.categorical.is_empty() && !ctx.columns.numeric.is_empty()
}

fn has_two_categories_and_numbers(ctx: &RuleContext) -> bool {
    ctx.columns.categorical.len() >= 2 && !ctx.columns.numeric.is_empty()
}

fn has_numbers(ctx: &RuleContext) -> bool {
    !ctx.columns.numeric.is_empty()
}

fn has_two_numbers(ctx: &RuleContext) -> bool {
    ctx.columns.numeric.len() >= 2
}

fn has_radar_shape(ctx: &RuleContext) -> bool {
    ctx.columns.numeric.len() >= 3 && !ctx.columns.categorical.is_empty()
}

/// Every (x, y) pair of the given column groups, x-major.
fn pairs<'a>(
    xs: &'a [&'a ColumnMeta],
    ys: &'a [&'a ColumnMeta],
) -> impl Iterator<Item = (&'a str, &'a str)> + 'a {
    xs.iter()
        .flat_map(move |x| ys.iter().map(move |y| (x.name.as_str(), y.name.as_str())))
}

fn trend(ctx: &RuleContext) -> Vec<ChartSuggestion> {
    pairs(&ctx.columns.dates, &ctx.columns.numeric)
        .map(|(x, y)| {
            ChartSuggestion::new(ChartType::Line, x, vec![y.to_string()], format!("{} over {}", y, x))
                .with_description(format!("Trend of {} across {}", y, x))
        })
        .collect()
}

fn category_comparison(ctx: &RuleContext) -> Vec<ChartSuggestion> {
    pairs(&ctx.columns.categorical, &ctx.columns.numeric)
        .map(|(x, y)| {
            ChartSuggestion::new(ChartType::Bar, x, vec![y.to_string()], format!("{} by {}", y, x))
                .with_description(format!("Compare {} across {} categories", y, x))
        })
        .collect()
}

fn share_of_whole(ctx: &RuleContext) -> Vec<ChartSuggestion> {
    let range = ctx.config.pie_min_categories..=ctx.config.pie_max_categories;
    let mut suggestions = Vec::new();

    for category in &ctx.columns.categorical {
        let distinct = ctx.distinct_count(&category.name);
        if !range.contains(&distinct) {
            continue;
        }
        for value in &ctx.columns.numeric {
            suggestions.push(
                ChartSuggestion::new(
                    ChartType::Pie,
                    &category.name,
                    vec![value.name.clone()],
                    format!("Share of {} by {}", value.name, category.name),
                )
                .with_description(format!(
                    "How {} splits across {} {} values",
                    value.name, distinct, category.name
                )),
            );
        }
    }

    suggestions
}

fn correlation(ctx: &RuleContext) -> Vec<ChartSuggestion> {
    let numeric = &ctx.columns.numeric;
    let mut suggestions = Vec::new();

    for (i, a) in numeric.iter().enumerate() {
        for b in &numeric[i + 1..] {
            suggestions.push(
                ChartSuggestion::new(
                    ChartType::Scatter,
                    &a.name,
                    vec![b.name.clone()],
                    format!("{} vs {}", a.name, b.name),
                )
                .with_description(format!("Relationship between {} and {}", a.name, b.name)),
            );
        }
    }

    suggestions
}

fn cumulative_trend(ctx: &RuleContext) -> Vec<ChartSuggestion> {
    pairs(&ctx.columns.dates, &ctx.columns.numeric)
        .map(|(x, y)| {
            ChartSuggestion::new(
                ChartType::Area,
                x,
                vec![y.to_string()],
                format!("Cumulative {} over {}", y, x),
            )
            .with_description(format!("Volume of {} accumulated across {}", y, x))
        })
        .collect()
}

fn multi_dimension(ctx: &RuleContext) -> Vec<ChartSuggestion> {
    let Some(category) = ctx.columns.categorical.first() else {
        return Vec::new();
    };
    let metrics: Vec<String> = ctx
        .columns
        .numeric
        .iter()
        .take(ctx.config.radar_max_metrics)
        .map(|c| c.name.clone())
        .collect();

    let description = format!("Compare {} across {}", metrics.join(", "), category.name);
    vec![
        ChartSuggestion::new(
            ChartType::Radar,
            &category.name,
            metrics,
            format!("Profile by {}", category.name),
        )
        .with_description(description),
    ]
}

fn hierarchical_share(ctx: &RuleContext) -> Vec<ChartSuggestion> {
    let (Some(outer), Some(inner), Some(value)) = (
        ctx.columns.categorical.first(),
        ctx.columns.categorical.get(1),
        ctx.columns.numeric.first(),
    ) else {
        return Vec::new();
    };

    vec![
        ChartSuggestion::new(
            ChartType::Treemap,
            format!("{},{}", outer.name, inner.name),
            vec![value.name.clone()],
            format!("{} by {} and {}", value.name, outer.name, inner.name),
        )
        .with_description(format!(
            "Nested share of {} within {} and {}",
            value.name, outer.name, inner.name
        )),
    ]
}

fn single_metric(ctx: &RuleContext) -> Vec<ChartSuggestion> {
    ctx.columns
        .numeric
        .iter()
        .filter_map(|column| {
            let values = ctx.dataset.numeric_values(&column.name, None);
            if values.is_empty() {
                return None;
            }
            let mean = stats::mean(&values);
            Some(
                ChartSuggestion::new(
                    ChartType::Gauge,
                    &column.name,
                    vec![column.name.clone()],
                    format!("Average {}", column.name),
                )
                .with_description(format!("Mean {} is {:.2}", column.name, mean)),
            )
        })
        .collect()
}

fn process_funnel(ctx: &RuleContext) -> Vec<ChartSuggestion> {
    let (Some(stage), Some(value)) = (ctx.columns.categorical.first(), ctx.columns.numeric.first())
    else {
        return Vec::new();
    };

    vec![
        ChartSuggestion::new(
            ChartType::Funnel,
            &stage.name,
            vec![value.name.clone()],
            format!("{} funnel by {}", value.name, stage.name),
        )
        .with_description(format!("Stages of {} ordered by {}", stage.name, value.name)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_table_priorities() {
        let table: Vec<(ChartType, u8)> = RULES.iter().map(|r| (r.chart_type, r.priority)).collect();
        assert_eq!(
            table,
            vec![
                (ChartType::Line, 10),
                (ChartType::Bar, 9),
                (ChartType::Pie, 8),
                (ChartType::Scatter, 7),
                (ChartType::Area, 7),
                (ChartType::Radar, 6),
                (ChartType::Treemap, 6),
                (ChartType::Gauge, 5),
                (ChartType::Funnel, 5),
            ]
        );
    }

    #[test]
    fn test_partition_treats_dates_as_categories() {
        let dataset = Dataset::new(
            Vec::new(),
            vec![
                ColumnMeta::new("day", ColumnType::Date),
                ColumnMeta::new("name", ColumnType::String),
                ColumnMeta::new("flag", ColumnType::Boolean),
                ColumnMeta::new("n", ColumnType::Number),
            ],
        );
        let partition = ColumnPartition::of(&dataset);
        fn names(cols: &[&ColumnMeta]) -> Vec<String> {
            cols.iter().map(|c| c.name.clone()).collect()
        }

        assert_eq!(names(&partition.categorical), vec!["day", "name"]);
        assert_eq!(names(&partition.dates), vec!["day"]);
        assert_eq!(names(&partition.numeric), vec!["n"]);
    }

    #[test]
    fn test_scatter_uses_unordered_pairs() {
        let dataset = Dataset::new(
            Vec::new(),
            ["a", "b", "c"]
                .iter()
                .map(|n| ColumnMeta::new(*n, ColumnType::Number))
                .collect(),
        );
        let config = SuggestionConfig::default();
        let ctx = RuleContext::new(&dataset, &config);

        let pairs: Vec<(String, String)> = correlation(&ctx)
            .into_iter()
            .map(|s| (s.x_column, s.y_columns[0].clone()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("a".to_string(), "b".to_string()),
                ("a".to_string(), "c".to_string()),
                ("b".to_string(), "c".to_string()),
            ]
        );
    }

    #[test]
    fn test_gauge_skips_columns_without_values() {
        let rows = vec![
            [
                ("full".to_string(), Cell::from(4)),
                ("empty".to_string(), Cell::from("")),
            ]
            .into_iter()
            .collect(),
        ];
        let dataset = Dataset::new(
            rows,
            vec![
                ColumnMeta::new("full", ColumnType::Number),
                ColumnMeta::new("empty", ColumnType::Number),
            ],
        );
        let config = SuggestionConfig::default();
        let gauges = single_metric(&RuleContext::new(&dataset, &config));

        assert_eq!(gauges.len(), 1);
        assert_eq!(gauges[0].x_column, "full");
        assert_eq!(gauges[0].description, "Mean full is 4.00");
    }
}
