//! # Metrics Module
//!
//! Pixel-level metric extraction: brightness, contrast and a
//! Laplacian-variance sharpness proxy, plus resolution in megapixels.
//!
//! All functions here are pure and deterministic - the same buffer always
//! produces bit-for-bit identical metrics. They operate on the flat RGBA8
//! buffer directly, with no per-pixel wrapper types.
//!
//! ## Sampling
//! Brightness and contrast sample every 4th pixel of the flattened buffer
//! to bound cost on large captures. The Laplacian is evaluated on a 10 px
//! grid, never within 10 px of an edge so the 3x3 kernel stays in bounds.
//! The strides are fixed rather than derived from image size; very large
//! images get proportionally sparser coverage.

use crate::core::provider::PixelBuffer;
use serde::{Deserialize, Serialize};

/// Stride over pixels for brightness/contrast sampling (1 in 4 pixels)
const PIXEL_SAMPLE_STRIDE: usize = 4;

/// Spacing between Laplacian evaluation sites, in pixels
const LAPLACIAN_GRID_STEP: usize = 10;

/// Margin kept clear of every image edge when evaluating the Laplacian
const LAPLACIAN_EDGE_MARGIN: usize = 10;

/// ITU-R BT.601 luminance weights for R, G, B
const LUMA_R: f64 = 0.299;
const LUMA_G: f64 = 0.587;
const LUMA_B: f64 = 0.114;

/// Raw numeric signals extracted from a single capture.
///
/// Produced once per assessment and never mutated. `width`/`height` are the
/// source capture dimensions (pre-downsample), which is what the resolution
/// metric is judged on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawMetrics {
    /// Mean relative luminance, 0.0 (black) to 1.0 (white)
    pub brightness: f64,
    /// Luminance standard deviation normalized by 128, clamped to [0, 1]
    pub contrast: f64,
    /// Mean squared Laplacian response (higher = sharper), >= 0
    pub blur_score: f64,
    /// Source capture width in pixels
    pub width: u32,
    /// Source capture height in pixels
    pub height: u32,
    /// Source resolution in megapixels
    pub megapixels: f64,
    /// Source file size, when the provider could report it
    pub file_size_bytes: Option<u64>,
}

impl RawMetrics {
    /// Extract all raw metrics from a decoded buffer
    pub fn extract(buffer: &PixelBuffer) -> Self {
        let (brightness, contrast) =
            brightness_and_contrast(&buffer.data, buffer.width, buffer.height);
        let blur_score = laplacian_blur_score(&buffer.data, buffer.width, buffer.height);

        Self {
            brightness,
            contrast,
            blur_score,
            width: buffer.source_width,
            height: buffer.source_height,
            megapixels: megapixels(buffer.source_width, buffer.source_height),
            file_size_bytes: buffer.file_size_bytes,
        }
    }
}

/// Resolution in megapixels
pub fn megapixels(width: u32, height: u32) -> f64 {
    (width as f64 * height as f64) / 1_000_000.0
}

/// Mean relative luminance and normalized luminance standard deviation.
///
/// Samples every [`PIXEL_SAMPLE_STRIDE`]th pixel of the flattened RGBA
/// array. Brightness is the mean of `luma / 255` over the samples; contrast
/// is the population standard deviation of the 0-255 luma values divided by
/// 128 and clamped to [0, 1]. A degenerate buffer with no samples yields
/// (0.0, 0.0).
pub fn brightness_and_contrast(data: &[u8], width: u32, height: u32) -> (f64, f64) {
    let pixel_count = (width as usize * height as usize).min(data.len() / 4);

    let mut sum = 0.0f64;
    let mut sum_sq = 0.0f64;
    let mut samples = 0usize;

    let mut px = 0;
    while px < pixel_count {
        let base = px * 4;
        let luma = LUMA_R * data[base] as f64
            + LUMA_G * data[base + 1] as f64
            + LUMA_B * data[base + 2] as f64;
        sum += luma;
        sum_sq += luma * luma;
        samples += 1;
        px += PIXEL_SAMPLE_STRIDE;
    }

    if samples == 0 {
        return (0.0, 0.0);
    }

    let n = samples as f64;
    let mean = sum / n;
    // Population variance; guard against tiny negative rounding residue
    let variance = (sum_sq / n - mean * mean).max(0.0);

    let brightness = mean / 255.0;
    let contrast = (variance.sqrt() / 128.0).min(1.0);

    (brightness, contrast)
}

/// Mean squared response of the 3x3 discrete Laplacian kernel
/// `[[0,1,0],[1,-4,1],[0,1,0]]`, evaluated on a coarse grid.
///
/// The buffer is converted to a flat grayscale plane first; evaluation
/// sites step [`LAPLACIAN_GRID_STEP`] pixels in both axes and stay
/// [`LAPLACIAN_EDGE_MARGIN`] pixels clear of every edge. Images too small
/// to host a single site (under ~20x20) score 0.
pub fn laplacian_blur_score(data: &[u8], width: u32, height: u32) -> f64 {
    let w = width as usize;
    let h = height as usize;

    if w <= 2 * LAPLACIAN_EDGE_MARGIN || h <= 2 * LAPLACIAN_EDGE_MARGIN {
        return 0.0;
    }

    let mut gray = vec![0.0f64; w * h];
    for (i, px) in data.chunks_exact(4).take(w * h).enumerate() {
        gray[i] = LUMA_R * px[0] as f64 + LUMA_G * px[1] as f64 + LUMA_B * px[2] as f64;
    }

    let mut sum_sq = 0.0f64;
    let mut sites = 0usize;

    let mut y = LAPLACIAN_EDGE_MARGIN;
    while y < h - LAPLACIAN_EDGE_MARGIN {
        let mut x = LAPLACIAN_EDGE_MARGIN;
        while x < w - LAPLACIAN_EDGE_MARGIN {
            let center = gray[y * w + x];
            let top = gray[(y - 1) * w + x];
            let bottom = gray[(y + 1) * w + x];
            let left = gray[y * w + x - 1];
            let right = gray[y * w + x + 1];

            let response = top + bottom + left + right - 4.0 * center;
            sum_sq += response * response;
            sites += 1;

            x += LAPLACIAN_GRID_STEP;
        }
        y += LAPLACIAN_GRID_STEP;
    }

    if sites == 0 {
        return 0.0;
    }

    sum_sq / sites as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uniform_buffer(size: u32, value: u8) -> PixelBuffer {
        let data = (0..size as usize * size as usize)
            .flat_map(|_| [value, value, value, 255])
            .collect();
        PixelBuffer::new(data, size, size)
    }

    /// 1 px black/white checkerboard
    fn checkerboard_buffer(size: u32) -> PixelBuffer {
        let mut data = Vec::with_capacity(size as usize * size as usize * 4);
        for y in 0..size {
            for x in 0..size {
                let value = if (x + y) % 2 == 0 { 0u8 } else { 255u8 };
                data.extend_from_slice(&[value, value, value, 255]);
            }
        }
        PixelBuffer::new(data, size, size)
    }

    #[test]
    fn uniform_gray_brightness_is_mid() {
        let buffer = uniform_buffer(64, 128);
        let metrics = RawMetrics::extract(&buffer);

        // 128/255, the luma weights sum to 1.0
        assert!((metrics.brightness - 128.0 / 255.0).abs() < 1e-9);
    }

    #[test]
    fn uniform_image_has_near_zero_contrast_and_blur_score() {
        let buffer = uniform_buffer(64, 128);
        let metrics = RawMetrics::extract(&buffer);

        // Accumulated rounding can leave a sub-epsilon residue
        assert!(metrics.contrast < 1e-6, "contrast was {}", metrics.contrast);
        assert!(
            metrics.blur_score < 1e-9,
            "blur_score was {}",
            metrics.blur_score
        );
    }

    #[test]
    fn black_and_white_extremes() {
        let black = RawMetrics::extract(&uniform_buffer(32, 0));
        let white = RawMetrics::extract(&uniform_buffer(32, 255));

        assert_eq!(black.brightness, 0.0);
        assert!((white.brightness - 1.0).abs() < 1e-9);
    }

    #[test]
    fn checkerboard_has_high_contrast_and_blur_score() {
        let metrics = RawMetrics::extract(&checkerboard_buffer(64));

        // Half the samples at 0, half at 255: stddev 127.5, saturating close to 1
        assert!(metrics.contrast > 0.9, "contrast was {}", metrics.contrast);
        // Every Laplacian site has four opposite-valued neighbors (|response| = 1020)
        assert!(
            metrics.blur_score > 100_000.0,
            "blur_score was {}",
            metrics.blur_score
        );
    }

    #[test]
    fn tiny_image_blur_score_is_zero() {
        // 16x16 cannot host a Laplacian site inside the 10 px margins
        let metrics = RawMetrics::extract(&checkerboard_buffer(16));
        assert_eq!(metrics.blur_score, 0.0);
    }

    #[test]
    fn empty_buffer_yields_zero_metrics() {
        let buffer = PixelBuffer::new(Vec::new(), 0, 0);
        let metrics = RawMetrics::extract(&buffer);

        assert_eq!(metrics.brightness, 0.0);
        assert_eq!(metrics.contrast, 0.0);
        assert_eq!(metrics.blur_score, 0.0);
        assert_eq!(metrics.megapixels, 0.0);
    }

    #[test]
    fn megapixels_from_dimensions() {
        assert!((megapixels(1920, 1080) - 2.0736).abs() < 1e-9);
        assert!((megapixels(640, 480) - 0.3072).abs() < 1e-9);
    }

    #[test]
    fn resolution_uses_source_dimensions_not_analysis_copy() {
        let mut buffer = uniform_buffer(64, 128);
        buffer.source_width = 1920;
        buffer.source_height = 1080;

        let metrics = RawMetrics::extract(&buffer);
        assert_eq!(metrics.width, 1920);
        assert_eq!(metrics.height, 1080);
        assert!((metrics.megapixels - 2.0736).abs() < 1e-9);
    }

    #[test]
    fn extraction_is_deterministic() {
        let buffer = checkerboard_buffer(48);
        let first = RawMetrics::extract(&buffer);
        let second = RawMetrics::extract(&buffer);
        assert_eq!(first, second);
    }

    #[test]
    fn file_size_passes_through() {
        let buffer = uniform_buffer(32, 100).with_file_size(123_456);
        let metrics = RawMetrics::extract(&buffer);
        assert_eq!(metrics.file_size_bytes, Some(123_456));
    }
}
