//! Editing session: one loaded image, its cut-lines and the export entry point

use crate::controller::{InteractionController, InteractionEvent};
use crate::lines::LineRegistry;
use crate::options::ExportOptions;
use crate::pipeline::{self, ExportReport, LoadedImage};
use crate::stats::{SliceStatistics, calculate_statistics};
use crate::types::*;
use image::RgbImage;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Outward notifications of the session
#[derive(Debug, Clone, PartialEq)]
pub enum SessionSignal {
    LoadFailed { path: PathBuf, reason: String },
    ExportCompleted { path: PathBuf, page_count: usize },
    ExportFailed { reason: String },
}

impl SessionSignal {
    pub fn from_load(path: &Path, result: &Result<ImageDimensions>) -> Option<Self> {
        match result {
            Ok(_) => None,
            Err(e) => Some(SessionSignal::LoadFailed {
                path: path.to_owned(),
                reason: e.to_string(),
            }),
        }
    }

    pub fn from_export(result: &Result<ExportReport>) -> Self {
        match result {
            Ok(report) => SessionSignal::ExportCompleted {
                path: report.output_path.clone(),
                page_count: report.page_count,
            },
            Err(e) => SessionSignal::ExportFailed {
                reason: e.to_string(),
            },
        }
    }

    pub fn message(&self) -> String {
        match self {
            SessionSignal::LoadFailed { path, reason } => {
                format!("Cannot load {}: {}", path.display(), reason)
            }
            SessionSignal::ExportCompleted { path, page_count } => {
                format!("Saved {} page(s) to {}", page_count, path.display())
            }
            SessionSignal::ExportFailed { reason } => {
                format!("An error occurred while exporting PDF: {}", reason)
            }
        }
    }
}

struct SliceDocument {
    source: LoadedImage,
    registry: LineRegistry,
}

/// Snapshot of everything an export needs, detached from the session so it
/// can run on a worker while the session stays untouched.
#[derive(Debug, Clone)]
pub struct ExportJob {
    pub image: Arc<RgbImage>,
    pub cut_positions: Vec<f64>,
    pub output_path: PathBuf,
    pub options: ExportOptions,
}

impl ExportJob {
    pub async fn run(self) -> Result<ExportReport> {
        tokio::task::spawn_blocking(move || self.run_blocking()).await?
    }

    fn run_blocking(self) -> Result<ExportReport> {
        self.options.validate()?;
        let (pages, diagnostics) = pipeline::prepare_pages(&self.image, &self.cut_positions);
        let mut report = pipeline::export_pdf_sync(&pages, &self.output_path, &self.options)?;
        report.diagnostics = diagnostics;
        Ok(report)
    }
}

#[derive(Default)]
pub struct SliceSession {
    document: Option<SliceDocument>,
    controller: InteractionController,
    options: ExportOptions,
}

impl SliceSession {
    pub fn new(options: ExportOptions) -> Self {
        Self {
            document: None,
            controller: InteractionController::new(),
            options,
        }
    }

    pub fn options(&self) -> &ExportOptions {
        &self.options
    }

    pub fn set_options(&mut self, options: ExportOptions) {
        self.options = options;
    }

    pub fn is_loaded(&self) -> bool {
        self.document.is_some()
    }

    pub fn image(&self) -> Option<&LoadedImage> {
        self.document.as_ref().map(|doc| &doc.source)
    }

    pub fn dimensions(&self) -> Option<ImageDimensions> {
        self.image().map(LoadedImage::dimensions)
    }

    pub fn registry(&self) -> Option<&LineRegistry> {
        self.document.as_ref().map(|doc| &doc.registry)
    }

    /// Load an image from disk. On failure the current image and its lines
    /// are left as they were.
    pub async fn open(&mut self, path: impl AsRef<Path>) -> Result<ImageDimensions> {
        let image = pipeline::load_image(path).await?;
        Ok(self.install(image))
    }

    /// Replace the current image with an already decoded one and seed
    /// automatic cut-lines for it.
    pub fn install(&mut self, source: LoadedImage) -> ImageDimensions {
        let dimensions = source.dimensions();
        let mut registry = LineRegistry::new(dimensions);
        registry.seed_automatic_lines(dimensions.width, dimensions.height);
        registry.drain_events();

        self.controller = InteractionController::new();
        self.document = Some(SliceDocument { source, registry });
        dimensions
    }

    pub fn add_line(&mut self, y: f64) -> Result<LineId> {
        let doc = self.document_mut()?;
        Ok(doc.registry.add_line(y))
    }

    pub fn remove_line(&mut self, id: LineId) -> Result<bool> {
        let doc = self.document.as_mut().ok_or(SliceError::NoImage)?;
        let removed = doc.registry.remove_line(id);
        self.controller.pump(&mut doc.registry);
        Ok(removed)
    }

    /// Drop every cut-line, automatic ones included
    pub fn clear_lines(&mut self) -> Result<()> {
        let doc = self.document.as_mut().ok_or(SliceError::NoImage)?;
        doc.registry.clear();
        self.controller.pump(&mut doc.registry);
        Ok(())
    }

    /// Move a line while it is being dragged. Returns its clamped position.
    pub fn drag_line(&mut self, id: LineId, x: f64, y: f64) -> Result<Option<f64>> {
        let doc = self.document.as_mut().ok_or(SliceError::NoImage)?;
        self.controller.handle(
            &mut doc.registry,
            InteractionEvent::DragMoved { line: id, x, y },
        );
        Ok(doc.registry.get(id).map(|line| line.y()))
    }

    /// Finish a drag; lines below the dropped one are re-spaced.
    pub fn finish_drag(&mut self, id: LineId) -> Result<usize> {
        let doc = self.document.as_mut().ok_or(SliceError::NoImage)?;
        Ok(self
            .controller
            .handle(&mut doc.registry, InteractionEvent::DragFinished { line: id }))
    }

    pub fn cut_positions(&self) -> Result<Vec<f64>> {
        Ok(self.document()?.registry.cut_positions())
    }

    pub fn statistics(&self) -> Result<SliceStatistics> {
        let doc = self.document()?;
        Ok(calculate_statistics(
            doc.source.dimensions(),
            &doc.registry.cut_positions(),
        ))
    }

    pub fn export_job(&self, output_path: impl Into<PathBuf>) -> Result<ExportJob> {
        let doc = self.document()?;
        Ok(ExportJob {
            image: Arc::clone(&doc.source.image),
            cut_positions: doc.registry.cut_positions(),
            output_path: output_path.into(),
            options: self.options.clone(),
        })
    }

    pub async fn export(&self, output_path: impl Into<PathBuf>) -> Result<ExportReport> {
        self.export_job(output_path)?.run().await
    }

    fn document(&self) -> Result<&SliceDocument> {
        self.document.as_ref().ok_or(SliceError::NoImage)
    }

    fn document_mut(&mut self) -> Result<&mut SliceDocument> {
        self.document.as_mut().ok_or(SliceError::NoImage)
    }
}
