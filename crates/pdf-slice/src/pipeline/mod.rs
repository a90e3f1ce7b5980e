//! Image pipeline - from a tall scan to an A3-padded PDF
//!
//! 1. Split the source image at the cut positions
//! 2. Pad each slice with white below it up to the A3 ratio
//! 3. Stage every padded slice as a lossless PNG
//! 4. Assemble the staged files into one PDF, one page per slice
//! 5. Remove the staged files on every exit path

mod assemble;
mod io;
mod pad;
mod split;
mod staging;

pub use io::{export_pdf, load_image};
pub(crate) use io::export_pdf_sync;
pub use pad::{diagnose_slice, pad_to_a3};
pub use split::{slice_bounds, split_image};
pub use staging::StagingArea;

use image::RgbImage;
use std::path::PathBuf;
use std::sync::Arc;

/// A decoded source image
#[derive(Debug, Clone)]
pub struct LoadedImage {
    pub path: PathBuf,
    pub image: Arc<RgbImage>,
}

impl LoadedImage {
    pub fn new(path: impl Into<PathBuf>, image: RgbImage) -> Self {
        Self {
            path: path.into(),
            image: Arc::new(image),
        }
    }

    pub fn dimensions(&self) -> crate::ImageDimensions {
        crate::ImageDimensions::new(self.image.width(), self.image.height())
    }
}

/// Non-fatal observations made while preparing pages
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SliceDiagnostic {
    /// The slice is already narrower than A3 proportions; it is exported
    /// without reaching the A3 ratio.
    TallSlice {
        index: usize,
        height: u32,
        target_height: u32,
    },
}

/// One exported page
#[derive(Debug, Clone, PartialEq)]
pub struct PageReport {
    pub index: usize,
    pub width: u32,
    pub padded_height: u32,
    pub width_pt: f32,
    pub height_pt: f32,
}

/// Result of a successful export
#[derive(Debug, Clone, PartialEq)]
pub struct ExportReport {
    pub output_path: PathBuf,
    pub page_count: usize,
    pub pages: Vec<PageReport>,
    pub diagnostics: Vec<SliceDiagnostic>,
}

/// Split `source` at `cut_positions`, then pad every slice to A3.
/// Slices already past the A3 ratio are reported before padding.
pub fn prepare_pages(
    source: &RgbImage,
    cut_positions: &[f64],
) -> (Vec<RgbImage>, Vec<SliceDiagnostic>) {
    let slices = split_image(source, cut_positions);
    let mut diagnostics = Vec::new();

    let padded = slices
        .iter()
        .enumerate()
        .map(|(index, slice)| {
            if let Some(diagnostic) = diagnose_slice(index, slice) {
                if let SliceDiagnostic::TallSlice {
                    height,
                    target_height,
                    ..
                } = &diagnostic
                {
                    log::warn!(
                        "Slice {} is {}px tall, past A3 proportions (A3 height {}px); exporting without reaching A3",
                        index + 1,
                        height,
                        target_height
                    );
                }
                diagnostics.push(diagnostic);
            }
            pad_to_a3(slice)
        })
        .collect();

    (padded, diagnostics)
}
