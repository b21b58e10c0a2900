//! Main Chartwise struct and public API.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::chart::{ChartOptionGenerator, ChartRequest, ChartSpec};
use crate::cleaning::{CleaningOperation, CleaningOutcome, CleaningPipeline};
use crate::config::ChartwiseConfig;
use crate::error::Result;
use crate::inference::TypeInferencer;
use crate::input::{Parser, SourceMetadata};
use crate::quality::{quick_insights, ColumnProfile, DataQualityAnalyzer, Insight, StatisticsSnapshot};
use crate::schema::{Dataset, Row};
use crate::suggestion::{ChartSuggestion, SuggestionEngine};

/// Result of analyzing a dataset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Metadata about the source file, when the data came from one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<SourceMetadata>,
    /// Rows with their inferred schema.
    pub dataset: Dataset,
    /// Dataset-wide statistics.
    pub statistics: StatisticsSnapshot,
    /// Per-column summaries.
    pub profiles: Vec<ColumnProfile>,
    /// At-a-glance findings.
    pub insights: Vec<Insight>,
    /// Ranked chart suggestions.
    pub suggestions: Vec<ChartSuggestion>,
}

/// The main Chartwise analysis engine.
pub struct Chartwise {
    config: ChartwiseConfig,
    parser: Parser,
    inferencer: TypeInferencer,
    analyzer: DataQualityAnalyzer,
    cleaning: CleaningPipeline,
    suggestions: SuggestionEngine,
}

impl Chartwise {
    /// Create a new Chartwise instance with default configuration.
    pub fn new() -> Self {
        Self::with_config(ChartwiseConfig::default())
    }

    /// Create a Chartwise instance with custom configuration.
    pub fn with_config(config: ChartwiseConfig) -> Self {
        Self {
            parser: Parser::with_config(config.parser.clone()),
            inferencer: TypeInferencer::with_config(config.inference.clone()),
            analyzer: DataQualityAnalyzer::with_config(config.quality.clone()),
            cleaning: CleaningPipeline::with_config(config.cleaning.clone()),
            suggestions: SuggestionEngine::with_config(config.suggestion.clone()),
            config,
        }
    }

    /// Get the configuration.
    pub fn config(&self) -> &ChartwiseConfig {
        &self.config
    }

    /// Get the quality analyzer for on-demand column statistics.
    pub fn analyzer(&self) -> &DataQualityAnalyzer {
        &self.analyzer
    }

    /// Get the cleaning pipeline.
    pub fn cleaning(&self) -> &CleaningPipeline {
        &self.cleaning
    }

    /// Parse a delimited file and analyze it.
    pub fn analyze_file(&self, path: impl AsRef<Path>) -> Result<AnalysisResult> {
        let (rows, source) = self.parser.parse_file(path)?;
        let mut result = self.analyze_rows(rows);
        result.source = Some(source);
        Ok(result)
    }

    /// Analyze rows from any source.
    pub fn analyze_rows(&self, rows: Vec<Row>) -> AnalysisResult {
        self.analyze_dataset(self.infer(rows))
    }

    /// Analyze a dataset whose schema is already known.
    pub fn analyze_dataset(&self, dataset: Dataset) -> AnalysisResult {
        let statistics = self.analyzer.statistics(&dataset);
        let profiles = self.analyzer.profiles(&dataset);
        let insights = quick_insights(&dataset, &statistics);
        let suggestions = self.suggestions.suggest(&dataset);

        tracing::debug!(
            rows = statistics.total_rows,
            columns = statistics.total_columns,
            suggestions = suggestions.len(),
            "Analysis complete"
        );

        AnalysisResult {
            source: None,
            dataset,
            statistics,
            profiles,
            insights,
            suggestions,
        }
    }

    /// Infer the schema of raw rows.
    pub fn infer(&self, rows: Vec<Row>) -> Dataset {
        self.inferencer.infer_dataset(rows)
    }

    /// Rank chart suggestions for a dataset.
    pub fn suggest(&self, dataset: &Dataset) -> Vec<ChartSuggestion> {
        self.suggestions.suggest(dataset)
    }

    /// Apply one cleaning operation.
    pub fn clean(&self, dataset: &Dataset, operation: &CleaningOperation) -> CleaningOutcome {
        self.cleaning.apply(dataset, operation)
    }

    /// Generate a full chart specification.
    pub fn chart(&self, request: &ChartRequest, dataset: &Dataset) -> ChartSpec {
        ChartOptionGenerator::with_config(self.config.chart.clone()).generate(request, dataset)
    }

    /// Generate a chart specification on the smaller preview sample.
    pub fn preview_chart(&self, request: &ChartRequest, dataset: &Dataset) -> ChartSpec {
        ChartOptionGenerator::with_config(self.config.chart.clone())
            .preview(true)
            .generate(request, dataset)
    }
}

impl Default for Chartwise {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{Cell, ColumnType};

    fn rows() -> Vec<Row> {
        [("a", "1"), ("b", "2"), ("c", "3"), ("c", "3")]
            .iter()
            .map(|(k, v)| {
                [
                    ("key".to_string(), Cell::from(*k)),
                    ("value".to_string(), Cell::from(*v)),
                ]
                .into_iter()
                .collect()
            })
            .collect()
    }

    #[test]
    fn test_analyze_rows() {
        let result = Chartwise::new().analyze_rows(rows());

        assert!(result.source.is_none());
        assert_eq!(result.dataset.column("value").unwrap().column_type, ColumnType::Number);
        assert_eq!(result.statistics.duplicate_rows, 1);
        assert_eq!(result.profiles.len(), 2);
        assert!(!result.insights.is_empty());
        assert_eq!(result.suggestions[0].priority, 9);
    }

    #[test]
    fn test_clean_then_chart() {
        let chartwise = Chartwise::new();
        let dataset = chartwise.infer(rows());

        let outcome = chartwise.clean(&dataset, &CleaningOperation::Deduplicate);
        assert_eq!(outcome.dataset.row_count(), 3);

        let spec = chartwise.chart(&ChartRequest::new("pie", "key", "value"), &outcome.dataset);
        assert_eq!(spec.series[0].data.len(), 3);
    }
}
