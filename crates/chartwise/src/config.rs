//! Configuration for every analysis stage.
//!
//! Each stage has its own section with defaults matching the engine's
//! documented sampling caps. Sections can be overridden from a JSON file;
//! missing fields keep their defaults.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ChartwiseError, Result};
use crate::input::ParserConfig;

/// Column type inference settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InferenceConfig {
    /// Rows sampled per column.
    pub sample_size: usize,
    /// Fraction of sampled values a type must exceed to win.
    pub threshold: f64,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            sample_size: 100,
            threshold: 0.7,
        }
    }
}

/// Data quality analyzer settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QualityConfig {
    /// Rows considered for outlier bounds and correlation.
    pub sample_size: usize,
    /// IQR multiplier for outlier bounds.
    pub iqr_multiplier: f64,
    /// Entries returned by frequency distributions.
    pub frequency_top_k: usize,
}

impl Default for QualityConfig {
    fn default() -> Self {
        Self {
            sample_size: 2000,
            iqr_multiplier: 1.5,
            frequency_top_k: 10,
        }
    }
}

/// Cleaning pipeline settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CleaningConfig {
    /// Fraction of missing cells above which a row is incomplete.
    pub incomplete_threshold: f64,
    /// Decimal places used when imputing mean/median values.
    pub fill_decimals: u32,
    /// IQR multiplier used when stripping outliers.
    pub iqr_multiplier: f64,
}

impl Default for CleaningConfig {
    fn default() -> Self {
        Self {
            incomplete_threshold: 0.5,
            fill_decimals: 2,
            iqr_multiplier: 1.5,
        }
    }
}

/// Chart suggestion settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuggestionConfig {
    /// Maximum suggestions returned after ranking.
    pub max_suggestions: usize,
    /// Inclusive distinct-value range for share-of-whole charts.
    pub pie_min_categories: usize,
    pub pie_max_categories: usize,
    /// Maximum metrics on a radar suggestion.
    pub radar_max_metrics: usize,
}

impl Default for SuggestionConfig {
    fn default() -> Self {
        Self {
            max_suggestions: 12,
            pie_min_categories: 3,
            pie_max_categories: 10,
            radar_max_metrics: 5,
        }
    }
}

/// Chart option generation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// Rows rendered by axis charts.
    pub sample_size: usize,
    /// Rows rendered by preview cards.
    pub preview_sample_size: usize,
    /// Distinct values kept per heatmap axis.
    pub heatmap_buckets: usize,
    /// Rows drawn as radar series.
    pub radar_rows: usize,
    /// Fixed ceiling for every radar indicator.
    pub radar_max: f64,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            sample_size: 500,
            preview_sample_size: 100,
            heatmap_buckets: 10,
            radar_rows: 5,
            radar_max: 100.0,
        }
    }
}

/// Configuration for a Chartwise engine.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartwiseConfig {
    /// Parser configuration.
    #[serde(skip)]
    pub parser: ParserConfig,
    pub inference: InferenceConfig,
    pub quality: QualityConfig,
    pub cleaning: CleaningConfig,
    pub suggestion: SuggestionConfig,
    pub chart: ChartConfig,
}

impl ChartwiseConfig {
    /// Load configuration overrides from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| ChartwiseError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: Self = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings that would make sampling or thresholds meaningless.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.inference.threshold) {
            return Err(ChartwiseError::Config(format!(
                "inference.threshold must be within 0..=1, got {}",
                self.inference.threshold
            )));
        }
        if !(0.0..=1.0).contains(&self.cleaning.incomplete_threshold) {
            return Err(ChartwiseError::Config(format!(
                "cleaning.incomplete_threshold must be within 0..=1, got {}",
                self.cleaning.incomplete_threshold
            )));
        }
        if self.suggestion.pie_min_categories > self.suggestion.pie_max_categories {
            return Err(ChartwiseError::Config(
                "suggestion.pie_min_categories exceeds pie_max_categories".to_string(),
            ));
        }
        let counts = [
            ("inference.sample_size", self.inference.sample_size),
            ("quality.sample_size", self.quality.sample_size),
            ("chart.sample_size", self.chart.sample_size),
            ("chart.preview_sample_size", self.chart.preview_sample_size),
            ("chart.heatmap_buckets", self.chart.heatmap_buckets),
            ("chart.radar_rows", self.chart.radar_rows),
        ];
        if let Some((name, _)) = counts.iter().find(|(_, value)| *value == 0) {
            return Err(ChartwiseError::Config(format!(
                "{} must be greater than zero",
                name
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults_match_sampling_caps() {
        let config = ChartwiseConfig::default();
        assert_eq!(config.inference.sample_size, 100);
        assert_eq!(config.quality.sample_size, 2000);
        assert_eq!(config.chart.sample_size, 500);
        assert_eq!(config.chart.preview_sample_size, 100);
        assert_eq!(config.suggestion.max_suggestions, 12);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_override_from_json() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(br#"{"chart": {"sample_size": 50}, "suggestion": {"max_suggestions": 3}}"#)
            .unwrap();

        let config = ChartwiseConfig::from_json_file(file.path()).unwrap();
        assert_eq!(config.chart.sample_size, 50);
        assert_eq!(config.chart.heatmap_buckets, 10);
        assert_eq!(config.suggestion.max_suggestions, 3);
        assert_eq!(config.inference.threshold, 0.7);
    }

    #[test]
    fn test_invalid_threshold_rejected() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(br#"{"inference": {"threshold": 1.5}}"#).unwrap();

        let err = ChartwiseConfig::from_json_file(file.path()).unwrap_err();
        assert!(matches!(err, ChartwiseError::Config(_)));
    }

    #[test]
    fn test_zero_sampling_caps_rejected() {
        for name in ["quality", "preview", "buckets", "radar_rows"] {
            let mut config = ChartwiseConfig::default();
            match name {
                "quality" => config.quality.sample_size = 0,
                "preview" => config.chart.preview_sample_size = 0,
                "buckets" => config.chart.heatmap_buckets = 0,
                _ => config.chart.radar_rows = 0,
            }
            let err = config.validate().unwrap_err();
            assert!(matches!(err, ChartwiseError::Config(_)), "{} accepted", name);
        }

        let mut file = NamedTempFile::new().unwrap();
        file.write_all(br#"{"chart": {"heatmap_buckets": 0}}"#).unwrap();
        let err = ChartwiseConfig::from_json_file(file.path()).unwrap_err();
        assert!(err.to_string().contains("chart.heatmap_buckets"));
    }
}
