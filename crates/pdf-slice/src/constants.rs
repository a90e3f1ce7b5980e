//! Shared constants for slicing and export
//!
//! This module centralizes the magic numbers used by the geometry engine
//! and the PDF pipeline.

// =============================================================================
// Paper Ratio
// =============================================================================

/// A3 width in millimeters
pub const A3_WIDTH_MM: f64 = 297.0;

/// A3 height in millimeters
pub const A3_HEIGHT_MM: f64 = 420.0;

/// A3 aspect ratio (width / height ≈ 0.7071)
pub const A3_RATIO: f64 = A3_WIDTH_MM / A3_HEIGHT_MM;

// =============================================================================
// Input
// =============================================================================

/// Largest decoded image accepted, in pixels
pub const MAX_IMAGE_PIXELS: u64 = 200_000_000;

// =============================================================================
// Padding
// =============================================================================

/// Fill color for the padding added below each slice
pub const PADDING_RGB: [u8; 3] = [255, 255, 255];

// =============================================================================
// Export
// =============================================================================

/// Points per inch in PDF user space
pub const POINTS_PER_INCH: f32 = 72.0;

/// Default resolution used to map image pixels onto PDF points
pub const DEFAULT_DPI: f32 = 96.0;

/// Prefix of the per-export staging directory
pub const STAGING_DIR_PREFIX: &str = "pdf-slice-";

/// Resource name of the image XObject drawn on every page
pub const PAGE_IMAGE_NAME: &str = "Im0";

/// Producer string written to the document info dictionary
pub const PRODUCER: &str = concat!("pdf-slice ", env!("CARGO_PKG_VERSION"));

/// File name of the staged intermediate for a slice index
pub fn staged_file_name(index: usize) -> String {
    format!("slice_{index:04}.png")
}
