//! Data quality analysis.
//!
//! The analyzer answers dataset-wide and per-column questions (missing
//! cells, duplicates, central tendency, outlier fences, correlation,
//! frequency). Profiles and insights are summaries built on top of it.

mod analyzer;
mod insights;
mod profile;
pub mod stats;

pub use analyzer::{DataQualityAnalyzer, FrequencyEntry, StatisticsSnapshot};
pub use insights::{quick_insights, Insight, InsightKind};
pub use profile::ColumnProfile;
pub use stats::OutlierBounds;
