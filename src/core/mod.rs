//! # Core Module
//!
//! The UI-agnostic capture quality engine.
//!
//! ## Modules
//! - `provider` - The pixel buffer boundary and the filesystem implementation
//! - `metrics` - Extracts brightness, contrast and blur score from pixels
//! - `thresholds` - Classifies each metric as Good / Fair / Poor
//! - `score` - Aggregates classifications into a 0-100 score
//! - `feedback` - Turns classifications into issues and suggestions
//! - `assessor` - Orchestrates the full assessment

pub mod assessor;
pub mod feedback;
pub mod metrics;
pub mod provider;
pub mod score;
pub mod thresholds;

// Re-export commonly used types
pub use assessor::{QualityAssessor, QualityDetails, QualityResult};
pub use metrics::RawMetrics;
pub use provider::{FsPixelBufferProvider, PixelBuffer, PixelBufferProvider};
pub use score::Weights;
pub use thresholds::{MetricClassification, MetricStatus, ThresholdConfig};
