use crate::geometry::{chunk_height, is_taller_than_a3, padded_height};
use crate::pipeline::slice_bounds;
use crate::types::ImageDimensions;

/// Planned page for one slice
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SlicePlan {
    pub top: u32,
    pub bottom: u32,
    pub padded_height: u32,
    /// Already past the A3 ratio before padding
    pub tall: bool,
}

impl SlicePlan {
    pub fn height(&self) -> u32 {
        self.bottom - self.top
    }

    pub fn padding_rows(&self) -> u32 {
        self.padded_height - self.height()
    }
}

/// Summary of what an export would produce
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SliceStatistics {
    pub image: ImageDimensions,
    pub chunk_height: f64,
    /// Interior cut-lines actually used
    pub line_count: usize,
    pub page_count: usize,
    pub slices: Vec<SlicePlan>,
    pub total_padding_rows: u64,
}

/// Plan the pages for `cut_positions` without touching any pixels
pub fn calculate_statistics(image: ImageDimensions, cut_positions: &[f64]) -> SliceStatistics {
    let slices: Vec<SlicePlan> = slice_bounds(cut_positions, image.height)
        .into_iter()
        .map(|(top, bottom)| {
            let height = bottom - top;
            SlicePlan {
                top,
                bottom,
                padded_height: padded_height(image.width, height),
                tall: is_taller_than_a3(image.width, height),
            }
        })
        .collect();

    let line_count = cut_positions
        .iter()
        .filter(|&&y| y > 0.0 && y < image.height as f64)
        .count();
    let total_padding_rows = slices.iter().map(|s| s.padding_rows() as u64).sum();

    SliceStatistics {
        image,
        chunk_height: chunk_height(image.width),
        line_count,
        page_count: slices.len(),
        slices,
        total_padding_rows,
    }
}
