pub mod canvas;
pub mod statistics;
pub mod toolbar;

pub use canvas::{CanvasAction, CanvasState, show_canvas};
pub use statistics::show_statistics;
pub use toolbar::{ToolbarAction, ToolbarState, show_toolbar};
