//! # Thresholds Module
//!
//! Table-driven classification of raw metrics into Good / Fair / Poor.
//!
//! The table lives in [`ThresholdConfig`] - configuration injected into the
//! assessor at construction, not a module-level constant - so boundary
//! values can be tested and callers can tune the gate. The config is
//! overridable only as a whole table; `Default` is the production table.
//!
//! Poor cutoffs are strict (`<` / `>`), Good ranges are inclusive: a
//! brightness of exactly 0.20 is Fair, not Poor.

use crate::core::score::Weights;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Classification of a single metric
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricStatus {
    /// Within the optimal range
    Good,
    /// Usable but not optimal
    Fair,
    /// Outside acceptable bounds; contributes an issue
    Poor,
}

impl fmt::Display for MetricStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricStatus::Good => write!(f, "good"),
            MetricStatus::Fair => write!(f, "fair"),
            MetricStatus::Poor => write!(f, "poor"),
        }
    }
}

/// One evaluated dimension: status, a fixed human-readable message, and the
/// raw value that produced it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricClassification {
    pub status: MetricStatus,
    pub message: String,
    pub raw_value: f64,
}

impl MetricClassification {
    fn new(status: MetricStatus, message: impl Into<String>, raw_value: f64) -> Self {
        Self {
            status,
            message: message.into(),
            raw_value,
        }
    }
}

/// Poor/Good bounds for brightness (mean relative luminance, 0-1)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrightnessRange {
    /// Poor when strictly below
    pub poor_below: f64,
    /// Good range lower bound (inclusive)
    pub good_min: f64,
    /// Good range upper bound (inclusive)
    pub good_max: f64,
    /// Poor when strictly above
    pub poor_above: f64,
}

/// Poor/Good bounds for the optional file-size dimension, in bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileSizeRange {
    /// Poor when strictly below (likely corrupted)
    pub poor_below: u64,
    /// Good range lower bound (inclusive)
    pub good_min: u64,
    /// Good range upper bound (inclusive)
    pub good_max: u64,
    /// Poor when strictly above
    pub poor_above: u64,
}

/// The full classification table plus aggregation weights.
///
/// This is the engine's entire tuning surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThresholdConfig {
    pub brightness_range: BrightnessRange,
    /// Contrast is Poor strictly below this
    pub contrast_min: f64,
    /// Contrast is Good at or above this
    pub contrast_optimal: f64,
    /// Sharpness (blur score) is Poor strictly below this
    pub sharpness_min: f64,
    /// Sharpness is Good at or above this
    pub sharpness_optimal: f64,
    /// Resolution is Poor strictly below this many megapixels
    pub resolution_min_mp: f64,
    /// Resolution is Good at or above this many megapixels
    pub resolution_optimal_mp: f64,
    pub file_size_range: FileSizeRange,
    pub weights: Weights,
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            brightness_range: BrightnessRange {
                poor_below: 0.20,
                good_min: 0.30,
                good_max: 0.80,
                poor_above: 0.90,
            },
            contrast_min: 0.15,
            contrast_optimal: 0.30,
            sharpness_min: 100.0,
            sharpness_optimal: 300.0,
            resolution_min_mp: 1.0,
            resolution_optimal_mp: 2.0,
            file_size_range: FileSizeRange {
                poor_below: 50_000,
                good_min: 100_000,
                good_max: 5_000_000,
                poor_above: 10_000_000,
            },
            weights: Weights::default(),
        }
    }
}

impl ThresholdConfig {
    /// Classify mean relative luminance
    pub fn classify_brightness(&self, value: f64) -> MetricClassification {
        let r = &self.brightness_range;
        if value < r.poor_below {
            MetricClassification::new(MetricStatus::Poor, "Image is too dark", value)
        } else if value > r.poor_above {
            MetricClassification::new(MetricStatus::Poor, "Image is too bright", value)
        } else if value >= r.good_min && value <= r.good_max {
            MetricClassification::new(MetricStatus::Good, "Brightness is good", value)
        } else if value < r.good_min {
            MetricClassification::new(MetricStatus::Fair, "Image is a little dark", value)
        } else {
            MetricClassification::new(MetricStatus::Fair, "Image is a little bright", value)
        }
    }

    /// Classify normalized luminance standard deviation
    pub fn classify_contrast(&self, value: f64) -> MetricClassification {
        if value < self.contrast_min {
            MetricClassification::new(MetricStatus::Poor, "Contrast is too low", value)
        } else if value >= self.contrast_optimal {
            MetricClassification::new(MetricStatus::Good, "Contrast is good", value)
        } else {
            MetricClassification::new(MetricStatus::Fair, "Contrast is acceptable", value)
        }
    }

    /// Classify the Laplacian blur score
    pub fn classify_sharpness(&self, value: f64) -> MetricClassification {
        if value < self.sharpness_min {
            MetricClassification::new(MetricStatus::Poor, "Image is too blurry", value)
        } else if value >= self.sharpness_optimal {
            MetricClassification::new(MetricStatus::Good, "Image is sharp", value)
        } else {
            MetricClassification::new(MetricStatus::Fair, "Image is slightly soft", value)
        }
    }

    /// Classify resolution in megapixels
    pub fn classify_resolution(&self, megapixels: f64) -> MetricClassification {
        if megapixels < self.resolution_min_mp {
            MetricClassification::new(
                MetricStatus::Poor,
                format!("Resolution too low ({:.1}MP)", megapixels),
                megapixels,
            )
        } else if megapixels >= self.resolution_optimal_mp {
            MetricClassification::new(
                MetricStatus::Good,
                format!("Resolution is good ({:.1}MP)", megapixels),
                megapixels,
            )
        } else {
            MetricClassification::new(
                MetricStatus::Fair,
                format!("Resolution is acceptable ({:.1}MP)", megapixels),
                megapixels,
            )
        }
    }

    /// Classify the optional file-size dimension
    pub fn classify_file_size(&self, bytes: u64) -> MetricClassification {
        let r = &self.file_size_range;
        let raw = bytes as f64;
        if bytes < r.poor_below {
            MetricClassification::new(
                MetricStatus::Poor,
                format!("File size too small ({})", format_bytes(bytes)),
                raw,
            )
        } else if bytes > r.poor_above {
            MetricClassification::new(
                MetricStatus::Poor,
                format!("File size too large ({})", format_bytes(bytes)),
                raw,
            )
        } else if bytes >= r.good_min && bytes <= r.good_max {
            MetricClassification::new(
                MetricStatus::Good,
                format!("File size is good ({})", format_bytes(bytes)),
                raw,
            )
        } else {
            MetricClassification::new(
                MetricStatus::Fair,
                format!("File size is acceptable ({})", format_bytes(bytes)),
                raw,
            )
        }
    }
}

/// Format a byte count for human-readable messages
pub fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.1} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} bytes", bytes)
    }
}
