//! Chartwise: tabular data analysis and chart recommendation.
//!
//! Chartwise takes an arbitrary rectangular dataset, infers a logical schema
//! from value samples, computes data-quality statistics, cleans the data on
//! request and recommends renderer-agnostic chart specifications.
//!
//! # Core Principles
//!
//! - **Degrade, don't fail**: sparse or malformed data yields neutral defaults
//! - **Immutable datasets**: every transformation returns a new dataset
//! - **Deterministic**: sampling is always first-N, never random
//!
//! # Example
//!
//! ```no_run
//! use chartwise::{ChartRequest, Chartwise};
//!
//! let chartwise = Chartwise::new();
//! let result = chartwise.analyze_file("sales.csv").unwrap();
//!
//! println!("Columns: {}", result.dataset.column_count());
//! for suggestion in &result.suggestions {
//!     println!("{} ({})", suggestion.title, suggestion.chart_type);
//! }
//!
//! let spec = chartwise.chart(&ChartRequest::new("bar", "region", "sales"), &result.dataset);
//! println!("{}", serde_json::to_string_pretty(&spec).unwrap());
//! ```

pub mod chart;
pub mod cleaning;
pub mod config;
pub mod error;
pub mod inference;
pub mod input;
pub mod quality;
pub mod schema;
pub mod suggestion;

mod chartwise;

pub use crate::chartwise::{AnalysisResult, Chartwise};
pub use chart::{ChartOptionGenerator, ChartRequest, ChartSpec};
pub use cleaning::{CleaningLog, CleaningOperation, CleaningOutcome, CleaningPipeline, FillStrategy};
pub use config::ChartwiseConfig;
pub use error::{ChartwiseError, Result};
pub use inference::TypeInferencer;
pub use input::{detect_delimiter, Delimiter, Parser, SourceMetadata};
pub use quality::{DataQualityAnalyzer, StatisticsSnapshot};
pub use schema::{Cell, ColumnMeta, ColumnType, Dataset, Row};
pub use suggestion::{ChartSuggestion, ChartType, SuggestionEngine};
