//! # Score Module
//!
//! Collapses per-metric classifications into a single 0-100 score.
//!
//! Each status maps to a fixed point value (Good 100, Fair 70, Poor 30) and
//! the score is a weighted mean. The file-size weight only enters the
//! denominator when a file size was actually supplied, so an unavailable
//! size never drags the score down.

use crate::core::assessor::QualityDetails;
use crate::core::thresholds::MetricStatus;
use serde::{Deserialize, Serialize};

/// Point value of a Good classification
const GOOD_POINTS: f64 = 100.0;
/// Point value of a Fair classification
const FAIR_POINTS: f64 = 70.0;
/// Point value of a Poor classification
const POOR_POINTS: f64 = 30.0;

/// Relative weight of each dimension in the final score
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Weights {
    pub brightness: f64,
    pub contrast: f64,
    pub sharpness: f64,
    pub resolution: f64,
    pub file_size: f64,
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            brightness: 0.20,
            contrast: 0.15,
            sharpness: 0.35,
            resolution: 0.25,
            file_size: 0.05,
        }
    }
}

/// Point value for a status
fn points(status: MetricStatus) -> f64 {
    match status {
        MetricStatus::Good => GOOD_POINTS,
        MetricStatus::Fair => FAIR_POINTS,
        MetricStatus::Poor => POOR_POINTS,
    }
}

/// Weighted aggregation of the classified dimensions.
///
/// Rounds to the nearest integer and clamps to [0, 100]. The clamp is
/// unreachable with the default weights but enforced as an invariant.
pub fn aggregate(details: &QualityDetails, weights: &Weights) -> u8 {
    let mut total = weights.brightness * points(details.brightness.status)
        + weights.contrast * points(details.contrast.status)
        + weights.sharpness * points(details.sharpness.status)
        + weights.resolution * points(details.resolution.status);

    let mut denominator =
        weights.brightness + weights.contrast + weights.sharpness + weights.resolution;

    if let Some(file_size) = &details.file_size {
        total += weights.file_size * points(file_size.status);
        denominator += weights.file_size;
    }

    if denominator <= 0.0 {
        return 0;
    }

    (total / denominator).round().clamp(0.0, 100.0) as u8
}
