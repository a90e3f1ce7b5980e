//! Padding slices to the A3 ratio

use super::SliceDiagnostic;
use crate::constants::PADDING_RGB;
use crate::geometry::{is_taller_than_a3, padded_height, target_height_for_width};
use image::{Rgb, RgbImage, imageops};

/// Place `slice` at the top-left of a white canvas whose height matches the
/// A3 ratio for the slice width. Width is unchanged; a slice already taller
/// than the target keeps its own height.
pub fn pad_to_a3(slice: &RgbImage) -> RgbImage {
    let (width, height) = slice.dimensions();
    let target = padded_height(width, height);

    if target == height {
        return slice.clone();
    }

    let mut canvas = RgbImage::from_pixel(width, target, Rgb(PADDING_RGB));
    imageops::replace(&mut canvas, slice, 0, 0);
    canvas
}

/// Report slices whose own proportions are already past A3.
pub fn diagnose_slice(index: usize, slice: &RgbImage) -> Option<SliceDiagnostic> {
    let (width, height) = slice.dimensions();
    if is_taller_than_a3(width, height) {
        Some(SliceDiagnostic::TallSlice {
            index,
            height,
            target_height: target_height_for_width(width),
        })
    } else {
        None
    }
}
