use eframe::egui;
use pdf_slice::{ExportReport, SliceSession};
use pdf_slice_runtime::{SessionSignal, SliceCommand, SliceUpdate};
use std::path::{Path, PathBuf};
use tokio::sync::mpsc;

use crate::logger::AppLogger;
use crate::views::{
    CanvasAction, CanvasState, ToolbarAction, ToolbarState, show_canvas, show_statistics,
    show_toolbar,
};

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp", "gif"];

pub struct SliceApp {
    session: SliceSession,
    canvas: CanvasState,
    status: String,
    /// Set while the worker is loading or exporting
    busy: bool,
    last_report: Option<ExportReport>,

    // Async infrastructure
    command_tx: mpsc::UnboundedSender<SliceCommand>,
    update_rx: mpsc::UnboundedReceiver<SliceUpdate>,

    logger: AppLogger,
    _tokio_handle: tokio::runtime::Handle,
}

impl SliceApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        tokio_handle: tokio::runtime::Handle,
        logger: AppLogger,
    ) -> Self {
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (update_tx, update_rx) = mpsc::unbounded_channel();

        // Spawn worker task
        tokio_handle.spawn(crate::worker::worker_task(
            command_rx,
            update_tx,
            cc.egui_ctx.clone(),
        ));

        Self {
            session: SliceSession::default(),
            canvas: CanvasState::default(),
            status: String::new(),
            busy: false,
            last_report: None,
            command_tx,
            update_rx,
            logger,
            _tokio_handle: tokio_handle,
        }
    }

    fn request_load(&mut self, path: PathBuf) {
        self.status = format!("Loading {}...", path.display());
        self.busy = true;
        let _ = self.command_tx.send(SliceCommand::LoadImage { path });
    }

    fn process_updates(&mut self, ctx: &egui::Context) {
        while let Ok(update) = self.update_rx.try_recv() {
            match update {
                SliceUpdate::ImageLoaded { image } => {
                    self.canvas.set_image(ctx, &image);
                    let path = image.path.clone();
                    let dims = self.session.install(image);
                    let lines = self.session.registry().map_or(0, |r| r.len());
                    log::info!("Opened {}", path.display());
                    self.status = format!(
                        "Loaded {}x{} image, {} cut-line(s)",
                        dims.width, dims.height, lines
                    );
                    self.last_report = None;
                    self.busy = false;
                }
                SliceUpdate::ExportFinished { report } => {
                    self.last_report = Some(report);
                }
                SliceUpdate::Signal { signal } => {
                    self.apply_signal(signal);
                }
            }
        }
    }

    fn apply_signal(&mut self, signal: SessionSignal) {
        match &signal {
            SessionSignal::ExportCompleted { .. } => log::info!("{}", signal.message()),
            SessionSignal::LoadFailed { .. } | SessionSignal::ExportFailed { .. } => {
                log::warn!("{}", signal.message())
            }
        }
        self.status = signal.message();
        self.busy = false;
    }

    fn apply_toolbar(&mut self, action: ToolbarAction) {
        match action {
            ToolbarAction::Open => {
                if let Some(path) = rfd::FileDialog::new()
                    .add_filter("Images", IMAGE_EXTENSIONS)
                    .pick_file()
                {
                    self.request_load(path);
                }
            }
            ToolbarAction::AddLine => {
                let y = self
                    .canvas
                    .visible_center
                    .or_else(|| self.session.dimensions().map(|d| d.height as f64 / 2.0))
                    .unwrap_or(0.0);
                match self.session.add_line(y) {
                    Ok(id) => self.canvas.selected = Some(id),
                    Err(e) => self.status = e.to_string(),
                }
            }
            ToolbarAction::RemoveSelected => {
                if let Some(id) = self.canvas.selected.take() {
                    if let Err(e) = self.session.remove_line(id) {
                        self.status = e.to_string();
                    }
                }
            }
            ToolbarAction::SavePdf => self.save_pdf(),
        }
    }

    fn save_pdf(&mut self) {
        let file_name = self
            .session
            .image()
            .and_then(|image| image.path.file_stem())
            .map(|stem| format!("{}.pdf", stem.to_string_lossy()))
            .unwrap_or_else(|| "sliced.pdf".to_string());

        let Some(path) = rfd::FileDialog::new()
            .add_filter("PDF", &["pdf"])
            .set_file_name(file_name)
            .save_file()
        else {
            return;
        };

        match self.session.export_job(path) {
            Ok(job) => {
                self.status = format!("Exporting to {}...", job.output_path.display());
                self.busy = true;
                let _ = self.command_tx.send(SliceCommand::Export { job });
            }
            Err(e) => {
                self.apply_signal(SessionSignal::ExportFailed {
                    reason: e.to_string(),
                });
            }
        }
    }

    fn apply_canvas(&mut self, action: CanvasAction) {
        let result = match action {
            CanvasAction::Select(line) => {
                self.canvas.selected = line;
                Ok(())
            }
            CanvasAction::DragMoved { line, x, y } => {
                self.session.drag_line(line, x, y).map(|_| ())
            }
            CanvasAction::DragFinished { line } => {
                self.session.finish_drag(line).map(|respaced| {
                    if respaced > 0 {
                        log::info!("Re-spaced {} line(s) below", respaced);
                    }
                })
            }
        };

        if let Err(e) = result {
            self.status = e.to_string();
        }
    }

    fn status_text(&self) -> String {
        if !self.status.is_empty() {
            self.status.clone()
        } else {
            self.logger
                .latest()
                .map(|entry| entry.status_line())
                .unwrap_or_else(|| "Open an image to begin".to_string())
        }
    }
}

fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

impl eframe::App for SliceApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Handle drag-and-drop for image files
        let dropped: Option<PathBuf> = ctx.input(|i| {
            i.raw
                .dropped_files
                .iter()
                .filter_map(|file| file.path.clone())
                .find(|path| is_image(path))
        });
        if let Some(path) = dropped {
            if !self.busy {
                self.request_load(path);
            }
        }

        // Process all pending updates from worker
        self.process_updates(ctx);

        let toolbar_state = ToolbarState {
            has_image: self.session.is_loaded(),
            has_selection: self.canvas.selected.is_some(),
            busy: self.busy,
        };
        let toolbar_action = egui::TopBottomPanel::top("toolbar")
            .show(ctx, |ui| show_toolbar(ui, &toolbar_state))
            .inner;
        if let Some(action) = toolbar_action {
            self.apply_toolbar(action);
        }

        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(self.status_text());
            });
        });

        egui::SidePanel::right("slice_details")
            .min_width(220.0)
            .show(ctx, |ui| {
                let stats = self.session.statistics().ok();
                show_statistics(ui, stats.as_ref(), self.last_report.as_ref());

                ui.separator();
                let mut options = self.session.options().clone();
                ui.horizontal(|ui| {
                    ui.label("Resolution:");
                    ui.add_enabled(
                        !self.busy,
                        egui::DragValue::new(&mut options.dpi)
                            .range(1.0..=1200.0)
                            .suffix(" dpi"),
                    );
                });
                if options != *self.session.options() {
                    self.session.set_options(options);
                }

                let problems = self.logger.problems(5);
                if !problems.is_empty() {
                    ui.separator();
                    for entry in problems {
                        ui.label(entry.status_line());
                    }
                }
            });

        let image_width = self.session.dimensions().map_or(0, |d| d.width);
        let actions = egui::CentralPanel::default()
            .show(ctx, |ui| {
                show_canvas(
                    ui,
                    &mut self.canvas,
                    self.session.registry(),
                    image_width,
                    !self.busy,
                )
            })
            .inner;
        for action in actions {
            self.apply_canvas(action);
        }

        if self.busy {
            ctx.request_repaint();
        }
    }
}
