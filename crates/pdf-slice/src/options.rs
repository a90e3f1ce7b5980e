use crate::constants::{DEFAULT_DPI, POINTS_PER_INCH};
use crate::types::*;
use std::path::PathBuf;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Export configuration
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ExportOptions {
    /// Resolution used to size PDF pages from slice pixels
    pub dpi: f32,

    /// Document title written to the PDF info dictionary
    pub title: Option<String>,

    /// Root under which the per-export staging directory is created.
    /// Defaults to the OS temp directory.
    pub staging_dir: Option<PathBuf>,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            dpi: DEFAULT_DPI,
            title: None,
            staging_dir: None,
        }
    }
}

impl ExportOptions {
    /// Load options from JSON file
    #[cfg(feature = "serde")]
    pub async fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let options: Self = serde_json::from_slice(&bytes)
            .map_err(|e| SliceError::Config(format!("Failed to parse config: {}", e)))?;
        options.validate()?;
        Ok(options)
    }

    /// Save options to JSON file
    #[cfg(feature = "serde")]
    pub async fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| SliceError::Config(format!("Failed to serialize config: {}", e)))?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }

    /// Validate options
    pub fn validate(&self) -> Result<()> {
        if !self.dpi.is_finite() || self.dpi <= 0.0 {
            return Err(SliceError::Config(format!(
                "DPI must be a positive number, got {}",
                self.dpi
            )));
        }
        Ok(())
    }

    /// Convert a pixel length to PDF points at the configured resolution
    pub fn px_to_pt(&self, px: u32) -> f32 {
        px as f32 * POINTS_PER_INCH / self.dpi
    }
}
