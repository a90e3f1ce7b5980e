use std::path::PathBuf;

// Re-export types from the library crate
pub use pdf_slice::{ExportJob, ExportReport, LoadedImage, SessionSignal};

/// Commands sent from UI to worker
#[derive(Debug)]
pub enum SliceCommand {
    LoadImage { path: PathBuf },
    /// Export a snapshot of the session; the session itself is never touched
    Export { job: ExportJob },
}

/// Updates sent from worker to UI
#[derive(Debug, Clone)]
pub enum SliceUpdate {
    ImageLoaded { image: LoadedImage },
    ExportFinished { report: ExportReport },
    Signal { signal: SessionSignal },
}
