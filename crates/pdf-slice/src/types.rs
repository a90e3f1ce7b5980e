use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SliceError {
    #[error("Cannot load image {path}: {reason}")]
    Load { path: PathBuf, reason: String },
    #[error("Open an image first")]
    NoImage,
    #[error("No slices to export")]
    NoSlices,
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}

pub type Result<T> = std::result::Result<T, SliceError>;

/// Failure classes reported across the core boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Image path unreadable or format undecodable
    Load,
    /// Action needs a loaded image and none is present
    Precondition,
    /// Writing intermediates or the final document failed
    ExportIo,
    /// Export options rejected by validation
    Config,
}

impl SliceError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SliceError::Load { .. } => ErrorKind::Load,
            SliceError::NoImage => ErrorKind::Precondition,
            SliceError::Config(_) => ErrorKind::Config,
            SliceError::NoSlices
            | SliceError::Image(_)
            | SliceError::Pdf(_)
            | SliceError::Io(_)
            | SliceError::TaskJoin(_) => ErrorKind::ExportIo,
        }
    }
}

/// Pixel dimensions captured when an image is decoded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ImageDimensions {
    pub width: u32,
    pub height: u32,
}

impl ImageDimensions {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Handle to a cut-line inside a [`crate::LineRegistry`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LineId(pub u64);
