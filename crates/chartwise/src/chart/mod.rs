//! Declarative chart specification generation.

mod generator;
mod spec;

pub use generator::{ChartOptionGenerator, TREEMAP_SEPARATOR};
pub use spec::{
    Aggregation, Axis, AxisKind, ChartRequest, ChartSpec, HeatCell, NamedValue, NamedVector,
    RadarIndicator, Series, SeriesData, ValueRange,
};
