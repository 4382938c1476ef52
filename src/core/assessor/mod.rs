//! # Assessor Module
//!
//! Orchestrates a full assessment: acquire the buffer through the provider,
//! extract raw metrics, classify each dimension, aggregate the score, and
//! generate feedback.
//!
//! ## Failure handling
//! `assess` never surfaces an error. Any acquisition failure collapses into
//! a fixed fallback result (score 0, invalid, "Failed to analyze image") so
//! callers handle exactly one result shape. Internally the stages run on
//! `Result` and the collapse happens once, here.

use crate::core::feedback::{self, Feedback};
use crate::core::metrics::RawMetrics;
use crate::core::provider::{PixelBuffer, PixelBufferProvider};
use crate::core::score;
use crate::core::thresholds::{MetricClassification, MetricStatus, ThresholdConfig};
use crate::error::AcquisitionError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Issue string reported when acquisition or extraction fails
pub const FAILED_ISSUE: &str = "Failed to analyze image";
/// Suggestion string reported when acquisition or extraction fails
pub const FAILED_SUGGESTION: &str = "Please try selecting a different image";

/// Per-dimension classifications for one capture.
///
/// `file_size` is present only when the provider reported a byte size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QualityDetails {
    pub brightness: MetricClassification,
    pub contrast: MetricClassification,
    pub sharpness: MetricClassification,
    pub resolution: MetricClassification,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub file_size: Option<MetricClassification>,
}

/// The terminal quality verdict for one capture.
///
/// Serializes with camelCase field names (`isValid`, `score`, `feedback`,
/// `details`, `issues`, `suggestions`) for cross-language consumers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QualityResult {
    /// True iff score >= 60 and no issues were raised
    pub is_valid: bool,
    /// Aggregate quality score, 0-100
    pub score: u8,
    /// One-line summary for the capturing user
    pub feedback: String,
    /// Per-metric breakdown
    pub details: QualityDetails,
    /// Poor-metric messages in evaluation order
    pub issues: Vec<String>,
    /// One actionable suggestion per issue
    pub suggestions: Vec<String>,
}

/// Assesses captures against an injected threshold table.
///
/// Stateless between calls: every assessment is independent, so one
/// assessor can serve arbitrarily many concurrent callers.
pub struct QualityAssessor {
    config: ThresholdConfig,
}

impl Default for QualityAssessor {
    fn default() -> Self {
        Self::new(ThresholdConfig::default())
    }
}

impl QualityAssessor {
    /// Create an assessor with the given threshold table
    pub fn new(config: ThresholdConfig) -> Self {
        Self { config }
    }

    /// The active threshold table
    pub fn config(&self) -> &ThresholdConfig {
        &self.config
    }

    /// Assess the capture behind `handle`, loading pixels through `provider`.
    ///
    /// Never fails: acquisition errors become the fallback result.
    pub fn assess(&self, provider: &dyn PixelBufferProvider, handle: &Path) -> QualityResult {
        match provider.load(handle) {
            Ok(buffer) => self.assess_buffer(&buffer),
            Err(error) => {
                tracing::warn!(
                    path = %handle.display(),
                    %error,
                    "image acquisition failed, returning fallback result"
                );
                Self::failed_result()
            }
        }
    }

    /// Assess an already-acquired pixel buffer
    pub fn assess_buffer(&self, buffer: &PixelBuffer) -> QualityResult {
        let metrics = RawMetrics::extract(buffer);

        tracing::debug!(
            brightness = metrics.brightness,
            contrast = metrics.contrast,
            blur_score = metrics.blur_score,
            megapixels = metrics.megapixels,
            "extracted raw metrics"
        );

        self.assess_metrics(&metrics)
    }

    /// Classify, aggregate and generate feedback for extracted metrics
    pub fn assess_metrics(&self, metrics: &RawMetrics) -> QualityResult {
        let details = QualityDetails {
            brightness: self.config.classify_brightness(metrics.brightness),
            contrast: self.config.classify_contrast(metrics.contrast),
            sharpness: self.config.classify_sharpness(metrics.blur_score),
            resolution: self.config.classify_resolution(metrics.megapixels),
            file_size: metrics
                .file_size_bytes
                .map(|bytes| self.config.classify_file_size(bytes)),
        };

        let score = score::aggregate(&details, &self.config.weights);
        let Feedback {
            issues,
            suggestions,
            message,
        } = feedback::generate(score, &details, &self.config);

        QualityResult {
            is_valid: feedback::is_valid(score, &issues),
            score,
            feedback: message,
            details,
            issues,
            suggestions,
        }
    }

    /// The uniform terminal result for a failed acquisition
    pub fn failed_result() -> QualityResult {
        let failed = |raw_value: f64| MetricClassification {
            status: MetricStatus::Poor,
            message: "Analysis failed".to_string(),
            raw_value,
        };

        QualityResult {
            is_valid: false,
            score: 0,
            feedback: format!("{}. {}", FAILED_ISSUE, FAILED_SUGGESTION),
            details: QualityDetails {
                brightness: failed(0.0),
                contrast: failed(0.0),
                sharpness: failed(0.0),
                resolution: failed(0.0),
                file_size: None,
            },
            issues: vec![FAILED_ISSUE.to_string()],
            suggestions: vec![FAILED_SUGGESTION.to_string()],
        }
    }
}
