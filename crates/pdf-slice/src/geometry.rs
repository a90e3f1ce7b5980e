//! A3 ratio arithmetic
//!
//! Pure functions shared by line seeding, padding and statistics.

use crate::constants::A3_RATIO;

/// Height of one A3-proportioned chunk for an image `width` pixels wide.
#[inline]
pub fn chunk_height(width: u32) -> f64 {
    width as f64 / A3_RATIO
}

/// Whole-pixel A3 height for a slice `width` pixels wide.
#[inline]
pub fn target_height_for_width(width: u32) -> u32 {
    chunk_height(width).round() as u32
}

/// Height a slice is padded to. Never smaller than the slice itself, so
/// content is never cropped.
#[inline]
pub fn padded_height(width: u32, height: u32) -> u32 {
    target_height_for_width(width).max(height)
}

/// A slice is "tall" when its own width/height ratio is already below A3,
/// meaning padding cannot bring it to A3 proportions.
pub fn is_taller_than_a3(width: u32, height: u32) -> bool {
    height as f64 > chunk_height(width)
}

/// Clamp a proposed vertical offset into `[0, max]`. NaN collapses to 0.
#[inline]
pub(crate) fn clamp_offset(y: f64, max: f64) -> f64 {
    if y.is_nan() { 0.0 } else { y.clamp(0.0, max) }
}
