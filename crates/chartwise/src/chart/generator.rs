//! Turns chart requests into chart specifications.
//!
//! Generation never fails. Unknown chart types, columns missing from the
//! schema and empty datasets all produce the base spec. Sampling is always
//! the first N rows, so output is reproducible.

use indexmap::{IndexMap, IndexSet};

use crate::config::ChartConfig;
use crate::quality::stats;
use crate::schema::{Cell, Dataset, Row};
use crate::suggestion::ChartType;

use super::spec::{
    Aggregation, Axis, ChartRequest, ChartSpec, HeatCell, NamedValue, NamedVector,
    RadarIndicator, Series, SeriesData, ValueRange,
};

/// Separator between category labels in treemap keys.
pub const TREEMAP_SEPARATOR: &str = " / ";

/// Fallback gauge ceiling when no positive maximum exists.
const DEFAULT_GAUGE_MAX: f64 = 100.0;

/// Builds chart specifications from requests and datasets.
pub struct ChartOptionGenerator {
    config: ChartConfig,
    preview: bool,
}

/// Columns a request resolved to, checked against the schema.
struct Resolved<'a> {
    chart_type: ChartType,
    x: Vec<&'a str>,
    y: Vec<&'a str>,
    value: Option<&'a str>,
    title: String,
}

impl ChartOptionGenerator {
    /// Create a generator with default settings.
    pub fn new() -> Self {
        Self {
            config: ChartConfig::default(),
            preview: false,
        }
    }

    /// Create a generator with custom settings.
    pub fn with_config(config: ChartConfig) -> Self {
        Self {
            config,
            preview: false,
        }
    }

    /// Use the smaller preview sample for axis charts.
    pub fn preview(mut self, preview: bool) -> Self {
        self.preview = preview;
        self
    }

    /// Rows rendered by axis charts.
    pub fn sample_limit(&self) -> usize {
        if self.preview {
            self.config.preview_sample_size
        } else {
            self.config.sample_size
        }
    }

    /// Generate the spec for a request.
    pub fn generate(&self, request: &ChartRequest, dataset: &Dataset) -> ChartSpec {
        let Some(resolved) = self.resolve(request, dataset) else {
            return ChartSpec::base(request.display_title());
        };

        if dataset.is_empty() {
            tracing::debug!(chart_type = %resolved.chart_type, "Empty dataset, using base spec");
            return ChartSpec::base(resolved.title);
        }

        let spec = match resolved.chart_type {
            ChartType::Bar | ChartType::Line | ChartType::Area => self.axis_chart(&resolved, dataset),
            ChartType::Scatter => self.scatter(&resolved, dataset),
            ChartType::Pie | ChartType::Funnel | ChartType::Treemap => {
                self.category_sums(&resolved, dataset)
            }
            ChartType::Radar => self.radar(&resolved, dataset),
            ChartType::Gauge => self.gauge(&resolved, dataset),
            ChartType::Heatmap => self.heatmap(&resolved, dataset),
        };

        tracing::debug!(
            chart_type = %resolved.chart_type,
            series = spec.series.len(),
            "Generated chart spec"
        );

        spec
    }

    /// Parse the chart type and check every referenced column exists.
    fn resolve<'a>(&self, request: &'a ChartRequest, dataset: &Dataset) -> Option<Resolved<'a>> {
        let chart_type = match request.chart_type.parse::<ChartType>() {
            Ok(chart_type) => chart_type,
            Err(e) => {
                tracing::warn!(error = %e, "Cannot generate chart, using base spec");
                return None;
            }
        };

        let x = request.x_columns();
        let mut y = request.y_columns();
        let value = request
            .value_column
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty());

        // A gauge only needs one column; accept it on either axis.
        if chart_type == ChartType::Gauge && y.is_empty() {
            y = x.clone();
        }

        let needs_x = chart_type != ChartType::Gauge;
        if (needs_x && x.is_empty()) || y.is_empty() {
            tracing::warn!(chart_type = %chart_type, "Chart request is missing columns, using base spec");
            return None;
        }

        if let Some(missing) = x
            .iter()
            .chain(y.iter())
            .chain(value.iter())
            .find(|name| !dataset.has_column(name))
        {
            tracing::warn!(
                chart_type = %chart_type,
                column = *missing,
                "Column not in schema, using base spec"
            );
            return None;
        }

        Some(Resolved {
            chart_type,
            x,
            y,
            value,
            title: request.display_title(),
        })
    }

    fn sample<'d>(&self, dataset: &'d Dataset) -> &'d [Row] {
        let limit = self.sample_limit().min(dataset.row_count());
        &dataset.rows[..limit]
    }

    /// Bar, line and area: category x axis, one series per y column.
    fn axis_chart(&self, req: &Resolved, dataset: &Dataset) -> ChartSpec {
        let rows = self.sample(dataset);
        let x = req.x[0];

        let mut spec = ChartSpec::of_type(&req.title, req.chart_type, Aggregation::None);
        spec.x_axis = Some(Axis::category(
            x,
            rows.iter().map(|row| cell(row, x).to_string()).collect(),
        ));
        spec.y_axis = Some(Axis::value(req.y.join(", ")));
        spec.series = req
            .y
            .iter()
            .map(|&y| Series {
                name: y.to_string(),
                kind: req.chart_type,
                data: SeriesData::Values(rows.iter().map(|row| number_or_zero(row, y)).collect()),
            })
            .collect();
        spec
    }

    fn scatter(&self, req: &Resolved, dataset: &Dataset) -> ChartSpec {
        let rows = self.sample(dataset);
        let x = req.x[0];

        let mut spec = ChartSpec::of_type(&req.title, ChartType::Scatter, Aggregation::None);
        spec.x_axis = Some(Axis::value(x));
        spec.y_axis = Some(Axis::value(req.y.join(", ")));
        spec.series = req
            .y
            .iter()
            .map(|&y| Series {
                name: y.to_string(),
                kind: ChartType::Scatter,
                data: SeriesData::Points(
                    rows.iter()
                        .map(|row| [number_or_zero(row, x), number_or_zero(row, y)])
                        .collect(),
                ),
            })
            .collect();
        spec
    }

    /// Pie, funnel and treemap: sum of y per distinct x key, first-seen order.
    fn category_sums(&self, req: &Resolved, dataset: &Dataset) -> ChartSpec {
        let y = req.y[0];
        let mut sums: IndexMap<String, f64> = IndexMap::new();

        for row in &dataset.rows {
            let key = if req.chart_type == ChartType::Treemap {
                req.x
                    .iter()
                    .map(|x| cell(row, x).to_string())
                    .collect::<Vec<_>>()
                    .join(TREEMAP_SEPARATOR)
            } else {
                cell(row, req.x[0]).to_string()
            };

            let entry = sums.entry(key).or_insert(0.0);
            if let Some(value) = cell(row, y).as_f64() {
                *entry += value;
            }
        }

        let mut spec = ChartSpec::of_type(&req.title, req.chart_type, Aggregation::Sum);
        spec.series = vec![Series {
            name: y.to_string(),
            kind: req.chart_type,
            data: SeriesData::Named(
                sums.into_iter()
                    .map(|(name, value)| NamedValue { name, value })
                    .collect(),
            ),
        }];
        spec
    }

    /// Radar: one indicator per metric, one polygon per sampled row.
    fn radar(&self, req: &Resolved, dataset: &Dataset) -> ChartSpec {
        let name_column = req.x[0];

        let mut spec = ChartSpec::of_type(&req.title, ChartType::Radar, Aggregation::None);
        spec.indicators = req
            .y
            .iter()
            .map(|&metric| RadarIndicator {
                name: metric.to_string(),
                max: self.config.radar_max,
            })
            .collect();
        spec.series = vec![Series {
            name: req.y.join(", "),
            kind: ChartType::Radar,
            data: SeriesData::Vectors(
                dataset
                    .rows
                    .iter()
                    .take(self.config.radar_rows)
                    .map(|row| NamedVector {
                        name: cell(row, name_column).to_string(),
                        value: req.y.iter().map(|metric| number_or_zero(row, metric)).collect(),
                    })
                    .collect(),
            ),
        }];
        spec
    }

    /// Gauge: mean of the valid values, ceiling at the largest one.
    fn gauge(&self, req: &Resolved, dataset: &Dataset) -> ChartSpec {
        let column = req.y[0];
        let values = dataset.numeric_values(column, None);
        let ceiling = values
            .iter()
            .copied()
            .reduce(f64::max)
            .filter(|max| *max > 0.0)
            .unwrap_or(DEFAULT_GAUGE_MAX);

        let mut spec = ChartSpec::of_type(&req.title, ChartType::Gauge, Aggregation::Mean);
        spec.max = Some(ceiling);
        spec.series = vec![Series {
            name: column.to_string(),
            kind: ChartType::Gauge,
            data: SeriesData::Named(vec![NamedValue {
                name: column.to_string(),
                value: stats::mean(&values),
            }]),
        }];
        spec
    }

    /// Heatmap: bucket the first distinct values of each axis and aggregate
    /// the rows falling into each (x, y) bucket.
    fn heatmap(&self, req: &Resolved, dataset: &Dataset) -> ChartSpec {
        let (x, y) = (req.x[0], req.y[0]);
        let x_buckets = self.buckets(dataset, x);
        let y_buckets = self.buckets(dataset, y);

        let mut grid = vec![vec![0.0; y_buckets.len()]; x_buckets.len()];
        for row in &dataset.rows {
            let xi = x_buckets.get_index_of(&cell(row, x).to_string());
            let yi = y_buckets.get_index_of(&cell(row, y).to_string());
            let (Some(xi), Some(yi)) = (xi, yi) else {
                continue;
            };

            match req.value {
                Some(value_column) => {
                    if let Some(v) = cell(row, value_column).as_f64() {
                        grid[xi][yi] += v;
                    }
                }
                None => grid[xi][yi] += 1.0,
            }
        }

        let cells: Vec<HeatCell> = grid
            .iter()
            .enumerate()
            .flat_map(|(xi, column)| {
                column
                    .iter()
                    .enumerate()
                    .map(move |(yi, &value)| HeatCell { x: xi, y: yi, value })
            })
            .collect();

        let aggregation = if req.value.is_some() {
            Aggregation::Sum
        } else {
            Aggregation::Count
        };

        let mut spec = ChartSpec::of_type(&req.title, ChartType::Heatmap, aggregation);
        spec.x_axis = Some(Axis::category(x, x_buckets.into_iter().collect()));
        spec.y_axis = Some(Axis::category(y, y_buckets.into_iter().collect()));
        spec.value_range = cells
            .iter()
            .map(|c| c.value)
            .fold(None, |range: Option<ValueRange>, v| {
                Some(match range {
                    None => ValueRange { min: v, max: v },
                    Some(r) => ValueRange {
                        min: r.min.min(v),
                        max: r.max.max(v),
                    },
                })
            });
        spec.series = vec![Series {
            name: req.value.unwrap_or("count").to_string(),
            kind: ChartType::Heatmap,
            data: SeriesData::Cells(cells),
        }];
        spec
    }

    /// First `heatmap_buckets` distinct labels of a column, first-seen order.
    fn buckets(&self, dataset: &Dataset, column: &str) -> IndexSet<String> {
        let mut buckets = IndexSet::new();
        for cell in dataset.column_cells(column) {
            if buckets.len() >= self.config.heatmap_buckets {
                break;
            }
            buckets.insert(cell.to_string());
        }
        buckets
    }
}

impl Default for ChartOptionGenerator {
    fn default() -> Self {
        Self::new()
    }
}

static NULL_CELL: Cell = Cell::Null;

fn cell<'r>(row: &'r Row, column: &str) -> &'r Cell {
    row.get(column).unwrap_or(&NULL_CELL)
}

fn number_or_zero(row: &Row, column: &str) -> f64 {
    cell(row, column).as_f64().unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{ColumnMeta, ColumnType};

    fn dataset() -> Dataset {
        let data = [
            ("north", "a", "10", "1"),
            ("south", "b", "20", "2"),
            ("north", "a", "x", "3"),
            ("east", "b", "5", "4"),
        ];
        let rows = data
            .iter()
            .map(|(region, kind, sales, units)| {
                [
                    ("region".to_string(), Cell::from(*region)),
                    ("kind".to_string(), Cell::from(*kind)),
                    ("sales".to_string(), Cell::from(*sales)),
                    ("units".to_string(), Cell::from(*units)),
                ]
                .into_iter()
                .collect()
            })
            .collect();
        Dataset::new(
            rows,
            vec![
                ColumnMeta::new("region", ColumnType::String),
                ColumnMeta::new("kind", ColumnType::String),
                ColumnMeta::new("sales", ColumnType::Number),
                ColumnMeta::new("units", ColumnType::Number),
            ],
        )
    }

    fn generate(request: ChartRequest) -> ChartSpec {
        ChartOptionGenerator::new().generate(&request, &dataset())
    }

    #[test]
    fn test_bar_coerces_non_numeric_to_zero() {
        let spec = generate(ChartRequest::new("bar", "region", "sales"));

        assert_eq!(spec.chart_type, Some(ChartType::Bar));
        assert_eq!(spec.x_axis.unwrap().data, vec!["north", "south", "north", "east"]);
        assert_eq!(
            spec.series[0].data,
            SeriesData::Values(vec![10.0, 20.0, 0.0, 5.0])
        );
    }

    #[test]
    fn test_preview_limits_rows() {
        let generator = ChartOptionGenerator::with_config(ChartConfig {
            preview_sample_size: 2,
            ..ChartConfig::default()
        })
        .preview(true);
        let spec = generator.generate(&ChartRequest::new("line", "region", "units"), &dataset());
        assert_eq!(spec.series[0].data.len(), 2);
    }

    #[test]
    fn test_scatter_points() {
        let spec = generate(ChartRequest::new("scatter", "units", "sales"));
        assert_eq!(
            spec.series[0].data,
            SeriesData::Points(vec![[1.0, 10.0], [2.0, 20.0], [3.0, 0.0], [4.0, 5.0]])
        );
    }

    #[test]
    fn test_pie_skips_non_numeric_contributions() {
        let spec = generate(ChartRequest::new("pie", "region", "sales"));
        assert_eq!(spec.aggregation, Aggregation::Sum);
        assert_eq!(
            spec.series[0].data,
            SeriesData::Named(vec![
                NamedValue { name: "north".into(), value: 10.0 },
                NamedValue { name: "south".into(), value: 20.0 },
                NamedValue { name: "east".into(), value: 5.0 },
            ])
        );
    }

    #[test]
    fn test_treemap_joins_categories() {
        let spec = generate(ChartRequest::new("treemap", "region,kind", "units"));
        let SeriesData::Named(entries) = &spec.series[0].data else {
            panic!("expected named values");
        };
        assert_eq!(entries[0].name, "north / a");
        assert_eq!(entries[0].value, 4.0);
        assert_eq!(entries.len(), 3);
    }

    #[test]
    fn test_radar_indicators() {
        let spec = generate(ChartRequest::new("radar", "region", "sales,units"));
        assert_eq!(spec.indicators.len(), 2);
        assert!(spec.indicators.iter().all(|i| i.max == 100.0));
        let SeriesData::Vectors(polygons) = &spec.series[0].data else {
            panic!("expected vectors");
        };
        assert_eq!(polygons.len(), 4);
        assert_eq!(polygons[1].value, vec![20.0, 2.0]);
    }

    #[test]
    fn test_gauge_mean_and_ceiling() {
        let spec = generate(ChartRequest::new("gauge", "", "sales"));
        assert_eq!(spec.max, Some(20.0));
        assert_eq!(
            spec.series[0].data,
            SeriesData::Named(vec![NamedValue {
                name: "sales".into(),
                value: 35.0 / 3.0
            }])
        );
    }

    #[test]
    fn test_gauge_ceiling_defaults_without_positive_values() {
        let dataset = Dataset::new(
            vec![[("v".to_string(), Cell::from(-5))].into_iter().collect()],
            vec![ColumnMeta::new("v", ColumnType::Number)],
        );
        let spec = ChartOptionGenerator::new().generate(&ChartRequest::new("gauge", "v", ""), &dataset);
        assert_eq!(spec.max, Some(100.0));
    }

    #[test]
    fn test_heatmap_counts_rows_per_bucket() {
        let spec = generate(ChartRequest::new("heatmap", "region", "kind"));
        assert_eq!(spec.aggregation, Aggregation::Count);
        assert_eq!(spec.x_axis.as_ref().unwrap().data, vec!["north", "south", "east"]);
        assert_eq!(spec.y_axis.as_ref().unwrap().data, vec!["a", "b"]);

        let SeriesData::Cells(cells) = &spec.series[0].data else {
            panic!("expected cells");
        };
        assert_eq!(cells.len(), 6);
        assert_eq!(cells[0], HeatCell { x: 0, y: 0, value: 2.0 });
        assert_eq!(spec.value_range, Some(ValueRange { min: 0.0, max: 2.0 }));
    }

    #[test]
    fn test_heatmap_sums_value_column() {
        let spec = generate(ChartRequest::new("heatmap", "region", "kind").with_value_column("units"));
        let SeriesData::Cells(cells) = &spec.series[0].data else {
            panic!("expected cells");
        };
        assert_eq!(spec.aggregation, Aggregation::Sum);
        assert_eq!(cells[0].value, 4.0);
    }

    #[test]
    fn test_unknown_type_and_columns_fall_back() {
        let spec = generate(ChartRequest::new("sankey", "region", "sales"));
        assert_eq!(spec, ChartSpec::base("sales by region"));

        let spec = generate(ChartRequest::new("bar", "region", "revenue"));
        assert!(spec.chart_type.is_none());
        assert!(spec.is_empty());
    }

    #[test]
    fn test_empty_dataset_gives_base_spec() {
        let empty = dataset().with_rows(Vec::new());
        let spec = ChartOptionGenerator::new().generate(&ChartRequest::new("bar", "region", "sales"), &empty);
        assert!(spec.series.is_empty());
        assert_eq!(spec.title, "sales by region");
    }

    #[test]
    fn test_deterministic() {
        let request = ChartRequest::new("heatmap", "region", "kind");
        assert_eq!(generate(request.clone()), generate(request));
    }
}
