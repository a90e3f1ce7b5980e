//! Cropping the source image at cut positions

use image::{RgbImage, imageops};

/// Row ranges `(top, bottom)` produced by a cut-position sequence.
///
/// Positions are truncated to whole pixels and clamped to `height`; pairs
/// with `bottom <= top` are skipped. When nothing survives the whole image
/// is returned as a single range.
pub fn slice_bounds(cut_positions: &[f64], height: u32) -> Vec<(u32, u32)> {
    let rows: Vec<u32> = cut_positions
        .iter()
        .map(|&y| {
            if y.is_nan() || y <= 0.0 {
                0
            } else {
                (y.trunc() as u32).min(height)
            }
        })
        .collect();

    let bounds: Vec<(u32, u32)> = rows
        .windows(2)
        .map(|pair| (pair[0], pair[1]))
        .filter(|&(top, bottom)| bottom > top)
        .collect();

    if bounds.is_empty() {
        vec![(0, height)]
    } else {
        bounds
    }
}

/// Split `source` into full-width horizontal slices, top to bottom.
pub fn split_image(source: &RgbImage, cut_positions: &[f64]) -> Vec<RgbImage> {
    let bounds = slice_bounds(cut_positions, source.height());

    if bounds.len() == 1 && bounds[0] == (0, source.height()) {
        return vec![source.clone()];
    }

    bounds
        .into_iter()
        .map(|(top, bottom)| {
            imageops::crop_imm(source, 0, top, source.width(), bottom - top).to_image()
        })
        .collect()
}
