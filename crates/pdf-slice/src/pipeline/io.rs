//! Image loading and PDF export

use super::assemble::assemble_document;
use super::{ExportReport, LoadedImage, StagingArea};
use crate::constants::MAX_IMAGE_PIXELS;
use crate::options::ExportOptions;
use crate::types::*;
use image::{ImageReader, RgbImage};
use std::io::{BufRead, Cursor, Seek, Write};
use std::path::{Path, PathBuf};

/// Decode an image file (PNG, JPEG, BMP, GIF) into RGB.
pub async fn load_image(path: impl AsRef<Path>) -> Result<LoadedImage> {
    let path = path.as_ref().to_owned();
    let bytes = tokio::fs::read(&path).await.map_err(|e| SliceError::Load {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let decode_path = path.clone();
    let image = tokio::task::spawn_blocking(move || decode_image(&decode_path, &bytes)).await??;

    log::info!(
        "Loaded {} ({}x{})",
        path.display(),
        image.width(),
        image.height()
    );
    Ok(LoadedImage::new(path, image))
}

fn decode_image(path: &Path, bytes: &[u8]) -> Result<RgbImage> {
    let load_error = |reason: String| SliceError::Load {
        path: path.to_owned(),
        reason,
    };

    let format = image::guess_format(bytes)
        .or_else(|_| image::ImageFormat::from_path(path))
        .map_err(|e| load_error(e.to_string()))?;

    let (width, height) = ImageReader::with_format(Cursor::new(bytes), format)
        .into_dimensions()
        .map_err(|e| load_error(e.to_string()))?;
    check_pixel_count(width, height).map_err(load_error)?;

    decode_rgb(ImageReader::with_format(Cursor::new(bytes), format))
        .map_err(|e| load_error(e.to_string()))
}

/// Reject empty images and images above [`MAX_IMAGE_PIXELS`].
fn check_pixel_count(width: u32, height: u32) -> std::result::Result<(), String> {
    let pixels = width as u64 * height as u64;
    if pixels == 0 {
        return Err("image has no pixels".to_string());
    }
    if pixels > MAX_IMAGE_PIXELS {
        return Err(format!(
            "image has {} pixels ({}x{}), more than the {} supported",
            pixels, width, height, MAX_IMAGE_PIXELS
        ));
    }
    Ok(())
}

/// Decode to RGB without the decoder's default allocation cap.
///
/// Callers bound the image size themselves.
pub(super) fn decode_rgb<R: BufRead + Seek>(
    mut reader: ImageReader<R>,
) -> image::ImageResult<RgbImage> {
    reader.no_limits();
    Ok(reader.decode()?.into_rgb8())
}

/// Write padded slices to `output_path` as a PDF, one page per slice.
///
/// Slices are staged as PNG files first; the staging directory is removed
/// whether or not assembly succeeds. The destination only appears once the
/// whole document has been written.
pub async fn export_pdf(
    slices: Vec<RgbImage>,
    output_path: impl AsRef<Path>,
    options: &ExportOptions,
) -> Result<ExportReport> {
    let output_path = output_path.as_ref().to_owned();
    let options = options.clone();

    tokio::task::spawn_blocking(move || export_pdf_sync(&slices, &output_path, &options)).await?
}

pub(crate) fn export_pdf_sync(
    slices: &[RgbImage],
    output_path: &Path,
    options: &ExportOptions,
) -> Result<ExportReport> {
    options.validate()?;
    if slices.is_empty() {
        return Err(SliceError::NoSlices);
    }

    let mut staging = StagingArea::create(options.staging_dir.as_deref())?;
    let result = stage_and_write(&mut staging, slices, output_path, options);

    if let Err(e) = staging.cleanup() {
        log::warn!("Failed to clean up staged slices: {}", e);
    }

    let report = result?;
    log::info!(
        "Exported {} page(s) to {}",
        report.page_count,
        output_path.display()
    );
    Ok(report)
}

fn stage_and_write(
    staging: &mut StagingArea,
    slices: &[RgbImage],
    output_path: &Path,
    options: &ExportOptions,
) -> Result<ExportReport> {
    for (index, slice) in slices.iter().enumerate() {
        staging.stage(index, slice)?;
    }

    let (mut doc, pages) = assemble_document(staging.files(), options)?;
    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)?;
    write_atomically(&bytes, output_path)?;

    Ok(ExportReport {
        output_path: output_path.to_owned(),
        page_count: pages.len(),
        pages,
        diagnostics: Vec::new(),
    })
}

/// Write into a sibling temp file, then rename it onto `path`.
fn write_atomically(bytes: &[u8], path: &Path) -> Result<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_owned(),
        _ => PathBuf::from("."),
    };

    let mut file = tempfile::NamedTempFile::new_in(&parent)?;
    file.write_all(bytes)?;
    file.as_file().sync_all()?;
    file.persist(path).map_err(|e| e.error)?;
    Ok(())
}
