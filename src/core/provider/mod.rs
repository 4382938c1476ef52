//! # Provider Module
//!
//! The boundary between the quality engine and whatever supplies pixels.
//!
//! The engine never decodes images itself - it consumes an already-decoded
//! RGBA8 buffer through the [`PixelBufferProvider`] trait. The filesystem
//! implementation lives in [`fs`]; GUI or mobile hosts can plug in their own
//! provider without touching the engine.

mod fs;

pub use fs::FsPixelBufferProvider;

use crate::error::AcquisitionError;
use std::path::Path;

/// A decoded image ready for analysis.
///
/// `data` is RGBA8, row-major, `width * height * 4` bytes. When a provider
/// downsamples before analysis, `source_width`/`source_height` keep the
/// original capture dimensions so the resolution metric is judged on what
/// the camera produced, not on the analysis copy.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelBuffer {
    /// RGBA8 pixel data, row-major
    pub data: Vec<u8>,
    /// Width of `data` in pixels
    pub width: u32,
    /// Height of `data` in pixels
    pub height: u32,
    /// Width of the original capture
    pub source_width: u32,
    /// Height of the original capture
    pub source_height: u32,
    /// On-disk size of the source file, when the provider can report it
    pub file_size_bytes: Option<u64>,
}

impl PixelBuffer {
    /// Create a buffer whose analysis and source dimensions are the same
    pub fn new(data: Vec<u8>, width: u32, height: u32) -> Self {
        Self {
            data,
            width,
            height,
            source_width: width,
            source_height: height,
            file_size_bytes: None,
        }
    }

    /// Attach the source file size
    pub fn with_file_size(mut self, bytes: u64) -> Self {
        self.file_size_bytes = Some(bytes);
        self
    }

    /// Number of pixels in the analysis buffer
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

/// Capability interface for resolving an image handle into pixels.
///
/// This is the engine's only required dependency. Implementations may be
/// I/O-bound; everything after `load` is pure, synchronous computation.
pub trait PixelBufferProvider: Send + Sync {
    /// Resolve a handle into a decoded pixel buffer
    fn load(&self, handle: &Path) -> Result<PixelBuffer, AcquisitionError>;
}
