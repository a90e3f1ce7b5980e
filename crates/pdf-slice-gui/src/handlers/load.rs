use pdf_slice_runtime::{SessionSignal, SliceUpdate};
use std::path::PathBuf;
use tokio::sync::mpsc;

pub async fn handle_load(path: PathBuf, update_tx: &mpsc::UnboundedSender<SliceUpdate>) {
    match pdf_slice::load_image(&path).await {
        Ok(image) => {
            let _ = update_tx.send(SliceUpdate::ImageLoaded { image });
        }
        Err(e) => {
            log::error!("Failed to load {}: {}", path.display(), e);
            let _ = update_tx.send(SliceUpdate::Signal {
                signal: SessionSignal::LoadFailed {
                    path,
                    reason: e.to_string(),
                },
            });
        }
    }
}
