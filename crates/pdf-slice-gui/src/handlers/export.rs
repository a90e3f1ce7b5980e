use pdf_slice_runtime::{ExportJob, SessionSignal, SliceUpdate};
use tokio::sync::mpsc;

pub async fn handle_export(job: ExportJob, update_tx: &mpsc::UnboundedSender<SliceUpdate>) {
    log::info!("Exporting PDF to {}", job.output_path.display());

    let result = job.run().await;
    let signal = SessionSignal::from_export(&result);

    match result {
        Ok(report) => {
            let _ = update_tx.send(SliceUpdate::ExportFinished { report });
        }
        Err(e) => {
            log::error!("Export failed: {}", e);
        }
    }

    let _ = update_tx.send(SliceUpdate::Signal { signal });
}
