//! Chart types and ranked chart suggestions.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ChartwiseError;

/// Kind of chart a specification describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartType {
    Bar,
    Line,
    Scatter,
    Area,
    Pie,
    Radar,
    Treemap,
    Gauge,
    Funnel,
    Heatmap,
}

impl ChartType {
    /// Every chart type, in display order.
    pub const ALL: [ChartType; 10] = [
        ChartType::Bar,
        ChartType::Line,
        ChartType::Scatter,
        ChartType::Area,
        ChartType::Pie,
        ChartType::Radar,
        ChartType::Treemap,
        ChartType::Gauge,
        ChartType::Funnel,
        ChartType::Heatmap,
    ];

    /// Get the identifier used in requests and JSON.
    pub fn as_str(&self) -> &'static str {
        match self {
            ChartType::Bar => "bar",
            ChartType::Line => "line",
            ChartType::Scatter => "scatter",
            ChartType::Area => "area",
            ChartType::Pie => "pie",
            ChartType::Radar => "radar",
            ChartType::Treemap => "treemap",
            ChartType::Gauge => "gauge",
            ChartType::Funnel => "funnel",
            ChartType::Heatmap => "heatmap",
        }
    }
}

impl fmt::Display for ChartType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChartType {
    type Err = ChartwiseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();
        ChartType::ALL
            .into_iter()
            .find(|t| t.as_str() == name)
            .ok_or_else(|| ChartwiseError::UnknownChartType(s.to_string()))
    }
}

/// A recommended chart over specific columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSuggestion {
    pub chart_type: ChartType,

    /// Category (or first value) axis column. Treemaps join two columns.
    pub x_column: String,

    /// Value columns; radar suggestions carry several.
    pub y_columns: Vec<String>,

    pub title: String,

    pub description: String,

    /// Ranking priority (higher = shown first).
    pub priority: u8,

    /// Name of the rule that produced this suggestion.
    pub rule: String,
}

impl ChartSuggestion {
    /// Create a new suggestion.
    pub fn new(
        chart_type: ChartType,
        x_column: impl Into<String>,
        y_columns: Vec<String>,
        title: impl Into<String>,
    ) -> Self {
        Self {
            chart_type,
            x_column: x_column.into(),
            y_columns,
            title: title.into(),
            description: String::new(),
            priority: 0,
            rule: String::new(),
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the priority.
    pub fn with_priority(mut self, priority: u8) -> Self {
        self.priority = priority;
        self
    }

    /// Set the producing rule's name.
    pub fn with_rule(mut self, rule: impl Into<String>) -> Self {
        self.rule = rule.into();
        self
    }

    /// The value columns as one comma-joined string.
    pub fn y_column(&self) -> String {
        self.y_columns.join(",")
    }
}
