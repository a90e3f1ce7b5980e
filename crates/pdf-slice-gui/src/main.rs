#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use eframe::egui;

mod app;
mod handlers;
mod logger;
mod views;
mod worker;

fn main() -> anyhow::Result<()> {
    let logger = logger::AppLogger::new(500);
    logger.clone().init()?;

    // Worker tasks run here; the UI stays on the main thread
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    let tokio_handle = runtime.handle().clone();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1024.0, 768.0])
            .with_title("PDF Slice"),
        ..Default::default()
    };

    eframe::run_native(
        "PDF Slice",
        options,
        Box::new(move |cc| Ok(Box::new(app::SliceApp::new(cc, tokio_handle, logger)))),
    )
    .map_err(|e| anyhow::anyhow!("Failed to start UI: {e}"))?;

    Ok(())
}
