//! # Error Module
//!
//! User-friendly error types for the capture quality engine.
//!
//! ## Design Principles
//! - **Never panic** on user data - return errors instead
//! - **Include context** - paths, file names, what went wrong
//! - **User-friendly messages** - non-technical users should understand
//! - **Recoverable at the boundary** - the assessor collapses acquisition
//!   failures into a uniform fallback result; callers of `assess` never
//!   need a separate error path

use std::path::PathBuf;
use thiserror::Error;

/// Top-level application error
#[derive(Error, Debug)]
pub enum CaptureQualityError {
    #[error("Image acquisition error: {0}")]
    Acquisition(#[from] AcquisitionError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Errors that occur while acquiring a pixel buffer for analysis.
///
/// These are the only failures the engine can encounter; the assessment
/// stages themselves are pure arithmetic and cannot fail.
#[derive(Error, Debug)]
pub enum AcquisitionError {
    #[error("Image file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("Failed to decode image {path}: {reason}")]
    DecodeError { path: PathBuf, reason: String },

    #[error("Image is empty or corrupted: {path}")]
    EmptyImage { path: PathBuf },

    #[error("Failed to open image file {path}: {source}")]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors that occur loading a threshold configuration override
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid threshold config in {path}: {reason}")]
    ParseFailed { path: PathBuf, reason: String },
}

/// Convenience Result type alias
pub type Result<T> = std::result::Result<T, CaptureQualityError>;
