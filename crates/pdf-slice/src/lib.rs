pub mod constants;
mod controller;
pub mod geometry;
mod lines;
mod options;
pub mod pipeline;
mod session;
mod stats;
mod types;

pub use controller::{InteractionController, InteractionEvent};
pub use lines::{CutLine, LineEvent, LineRegistry, LineState};
pub use options::*;
pub use pipeline::{
    ExportReport, LoadedImage, PageReport, SliceDiagnostic, export_pdf, load_image, pad_to_a3,
    prepare_pages, split_image,
};
pub use session::{ExportJob, SessionSignal, SliceSession};
pub use stats::{SlicePlan, SliceStatistics, calculate_statistics};
pub use types::*;
