//! # Capture Quality
//!
//! An explainable quality gate for captured documents (bills, receipts).
//!
//! ## Core Philosophy
//! - **Actionable feedback** - "too blurry", "too dark", never a bare rejection
//! - **Deterministic** - the same pixels always produce the same verdict
//! - **One result shape** - even a failed analysis returns a normal result
//!
//! ## Architecture
//! The library is split into a core engine (UI-agnostic) and presentation layers:
//! - `core` - The quality assessment engine
//! - `error` - User-friendly error types
//! - `cli` - Command-line interface

pub mod core;
pub mod error;

// Re-export commonly used types at the crate root
pub use crate::core::{QualityAssessor, QualityResult, ThresholdConfig};
pub use error::{CaptureQualityError, Result};

/// Initialize tracing for the library
///
/// This should be called by the application entry point (CLI or GUI).
pub fn init_tracing() {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set global default tracing subscriber");
}
