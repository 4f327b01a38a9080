pub mod canvas;
pub mod layout;
pub mod summary;

pub use canvas::{DocumentCanvas, TextStyle, UnconfiguredCanvasFactory};
#[cfg(any(test, feature = "test-mocks"))]
pub use canvas::RecordingCanvas;
pub use layout::{ExportBundle, render_timeline};
