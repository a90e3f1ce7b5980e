use eframe::egui;
use pdf_slice_runtime::{SliceCommand, SliceUpdate};
use tokio::sync::mpsc;

use crate::handlers;

/// Async worker task that processes slice commands one at a time and sends updates
pub async fn worker_task(
    mut command_rx: mpsc::UnboundedReceiver<SliceCommand>,
    update_tx: mpsc::UnboundedSender<SliceUpdate>,
    ctx: egui::Context,
) {
    while let Some(cmd) = command_rx.recv().await {
        process_command(cmd, &mut command_rx, &update_tx).await;
        ctx.request_repaint();
    }
    log::debug!("Command channel closed, worker exiting");
}

async fn process_command(
    cmd: SliceCommand,
    command_rx: &mut mpsc::UnboundedReceiver<SliceCommand>,
    update_tx: &mpsc::UnboundedSender<SliceUpdate>,
) {
    match cmd {
        SliceCommand::LoadImage { mut path } => {
            // Only the most recently requested image matters
            while let Ok(next_cmd) = command_rx.try_recv() {
                if let SliceCommand::LoadImage { path: newer } = next_cmd {
                    log::debug!("Discarding queued load of {}", path.display());
                    path = newer;
                } else {
                    Box::pin(process_command(next_cmd, command_rx, update_tx)).await;
                }
            }

            handlers::load::handle_load(path, update_tx).await;
        }
        SliceCommand::Export { job } => {
            handlers::export::handle_export(job, update_tx).await;
        }
    }
}
