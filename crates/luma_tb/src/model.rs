//! The reference model: the arithmetic the hardware is checked against.

use luma_common::{Pixel, Weights, NORM_SHIFT};

/// The expected luma value for one sample: per-channel integer multiply,
/// sum, arithmetic right shift by the normalization width.
///
/// The result is not truncated to 8 bits; a value above 255 means the
/// hardware must assert overflow for this sample.
pub fn expected_luma(pixel: Pixel, weights: Weights) -> u32 {
    let sum = weights.r as u32 * pixel.r as u32
        + weights.g as u32 * pixel.g as u32
        + weights.b as u32 * pixel.b as u32;
    sum >> NORM_SHIFT
}

/// Whether this sample's weighted sum exceeds the 8-bit output range.
pub fn would_overflow(pixel: Pixel, weights: Weights) -> bool {
    expected_luma(pixel, weights) > 255
}
