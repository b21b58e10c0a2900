//! Renderer-agnostic chart specifications.

use serde::{Deserialize, Serialize};

use crate::suggestion::{ChartSuggestion, ChartType};

/// A request to render a chart over specific columns.
///
/// `x_column` and `y_column` may hold comma-joined column lists: treemaps
/// nest several x columns and radar charts plot several y columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartRequest {
    /// Chart type name, e.g. `"bar"`.
    pub chart_type: String,
    pub x_column: String,
    pub y_column: String,
    /// Measure summed per heatmap cell; cells count rows without it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_column: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl ChartRequest {
    /// Create a request.
    pub fn new(
        chart_type: impl Into<String>,
        x_column: impl Into<String>,
        y_column: impl Into<String>,
    ) -> Self {
        Self {
            chart_type: chart_type.into(),
            x_column: x_column.into(),
            y_column: y_column.into(),
            value_column: None,
            title: None,
        }
    }

    /// Set the heatmap value column.
    pub fn with_value_column(mut self, column: impl Into<String>) -> Self {
        self.value_column = Some(column.into());
        self
    }

    /// Set the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Split `x_column` into its column names.
    pub fn x_columns(&self) -> Vec<&str> {
        split_columns(&self.x_column)
    }

    /// Split `y_column` into its column names.
    pub fn y_columns(&self) -> Vec<&str> {
        split_columns(&self.y_column)
    }

    /// The explicit title, or one derived from the columns.
    pub fn display_title(&self) -> String {
        if let Some(title) = &self.title {
            return title.clone();
        }
        match (self.x_column.trim(), self.y_column.trim()) {
            ("", "") => String::new(),
            (x, "") => x.to_string(),
            ("", y) => y.to_string(),
            (x, y) => format!("{} by {}", y, x),
        }
    }
}

impl From<&ChartSuggestion> for ChartRequest {
    fn from(suggestion: &ChartSuggestion) -> Self {
        ChartRequest::new(
            suggestion.chart_type.as_str(),
            suggestion.x_column.clone(),
            suggestion.y_column(),
        )
        .with_title(suggestion.title.clone())
    }
}

fn split_columns(list: &str) -> Vec<&str> {
    list.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .collect()
}

/// How series values were derived from rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Aggregation {
    /// One value per row.
    None,
    Sum,
    Mean,
    Count,
}

/// Axis scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisKind {
    Category,
    Value,
}

/// A chart axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Axis {
    pub kind: AxisKind,
    pub name: String,
    /// Category labels; empty for value axes.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub data: Vec<String>,
}

impl Axis {
    pub fn category(name: impl Into<String>, data: Vec<String>) -> Self {
        Self {
            kind: AxisKind::Category,
            name: name.into(),
            data,
        }
    }

    pub fn value(name: impl Into<String>) -> Self {
        Self {
            kind: AxisKind::Value,
            name: name.into(),
            data: Vec::new(),
        }
    }
}

/// A labelled scalar, used by share and gauge charts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedValue {
    pub name: String,
    pub value: f64,
}

/// A labelled vector, one per radar polygon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedVector {
    pub name: String,
    pub value: Vec<f64>,
}

/// One heatmap cell, addressed by axis bucket indices.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeatCell {
    pub x: usize,
    pub y: usize,
    pub value: f64,
}

/// Series payload; the shape depends on the chart type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SeriesData {
    Values(Vec<f64>),
    Points(Vec<[f64; 2]>),
    Named(Vec<NamedValue>),
    Vectors(Vec<NamedVector>),
    Cells(Vec<HeatCell>),
}

impl SeriesData {
    /// Number of data points.
    pub fn len(&self) -> usize {
        match self {
            SeriesData::Values(v) => v.len(),
            SeriesData::Points(v) => v.len(),
            SeriesData::Named(v) => v.len(),
            SeriesData::Vectors(v) => v.len(),
            SeriesData::Cells(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A data series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub name: String,
    pub kind: ChartType,
    pub data: SeriesData,
}

/// Radar axis definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RadarIndicator {
    pub name: String,
    pub max: f64,
}

/// Observed range of heatmap cell values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
}

/// Declarative chart description handed to a renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    pub title: String,

    /// `None` for the base spec produced on bad requests.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chart_type: Option<ChartType>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub x_axis: Option<Axis>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub y_axis: Option<Axis>,

    pub series: Vec<Series>,

    pub aggregation: Aggregation,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub indicators: Vec<RadarIndicator>,

    /// Gauge ceiling.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub value_range: Option<ValueRange>,
}

impl ChartSpec {
    /// A spec with a title and nothing to draw.
    pub fn base(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            chart_type: None,
            x_axis: None,
            y_axis: None,
            series: Vec::new(),
            aggregation: Aggregation::None,
            indicators: Vec::new(),
            max: None,
            value_range: None,
        }
    }

    /// A spec of the given type with no series yet.
    pub fn of_type(title: impl Into<String>, chart_type: ChartType, aggregation: Aggregation) -> Self {
        Self {
            chart_type: Some(chart_type),
            aggregation,
            ..Self::base(title)
        }
    }

    /// Check whether there is anything to draw.
    pub fn is_empty(&self) -> bool {
        self.series.iter().all(|s| s.data.is_empty())
    }
}
