//! Staging of intermediate rasters
//!
//! Every export gets its own uniquely named directory. Staged files are
//! deleted by [`StagingArea::cleanup`] on the success path and by `Drop`
//! on every other path, including panics inside the assembly step.

use crate::constants::{STAGING_DIR_PREFIX, staged_file_name};
use crate::types::Result;
use image::{ImageFormat, RgbImage};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub struct StagingArea {
    dir: Option<TempDir>,
    files: Vec<PathBuf>,
}

impl StagingArea {
    /// Create a staging directory under `root`, or the OS temp dir.
    pub fn create(root: Option<&Path>) -> Result<Self> {
        let mut builder = tempfile::Builder::new();
        builder.prefix(STAGING_DIR_PREFIX);
        let dir = match root {
            Some(root) => builder.tempdir_in(root)?,
            None => builder.tempdir()?,
        };
        log::debug!("Staging export in {}", dir.path().display());
        Ok(Self {
            dir: Some(dir),
            files: Vec::new(),
        })
    }

    pub fn path(&self) -> Option<&Path> {
        self.dir.as_ref().map(|dir| dir.path())
    }

    /// Staged files in slice order
    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    /// Write `image` losslessly as the intermediate for slice `index`.
    pub fn stage(&mut self, index: usize, image: &RgbImage) -> Result<PathBuf> {
        let dir = self
            .dir
            .as_ref()
            .ok_or_else(|| std::io::Error::other("staging area already cleaned up"))?;
        let path = dir.path().join(staged_file_name(index));
        // Record before writing so a half-written file is still removed.
        self.files.push(path.clone());
        image.save_with_format(&path, ImageFormat::Png)?;
        Ok(path)
    }

    /// Remove every staged file and the directory itself.
    pub fn cleanup(&mut self) -> Result<()> {
        let mut first_error = None;
        for file in self.files.drain(..) {
            if let Err(e) = std::fs::remove_file(&file) {
                if e.kind() != std::io::ErrorKind::NotFound {
                    first_error.get_or_insert(e);
                }
            }
        }
        if let Some(dir) = self.dir.take() {
            if let Err(e) = dir.close() {
                first_error.get_or_insert(e);
            }
        }
        match first_error {
            Some(e) => Err(e.into()),
            None => Ok(()),
        }
    }
}

impl Drop for StagingArea {
    fn drop(&mut self) {
        if let Err(e) = self.cleanup() {
            log::warn!("Failed to clean up staged slices: {}", e);
        }
    }
}
