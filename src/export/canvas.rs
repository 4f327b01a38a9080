//! Drawing surface contract for the timeline exporter.
//!
//! The actual PDF engine is an external collaborator; the layout code only
//! needs these primitives. Coordinates are page-relative millimeters with
//! the origin at the top-left corner.

/// A4 portrait metrics used by the layout pass.
pub const PAGE_WIDTH_MM: f32 = 210.0;
pub const PAGE_HEIGHT_MM: f32 = 297.0;
pub const MARGIN_MM: f32 = 15.0;

/// Printable height between the top and bottom margins.
pub const PRINTABLE_HEIGHT_MM: f32 = PAGE_HEIGHT_MM - 2.0 * MARGIN_MM;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextStyle {
    pub size_pt: f32,
    pub bold: bool,
}

impl TextStyle {
    pub const TITLE: TextStyle = TextStyle {
        size_pt: 18.0,
        bold: true,
    };
    pub const HEADING: TextStyle = TextStyle {
        size_pt: 12.0,
        bold: true,
    };
    pub const BODY: TextStyle = TextStyle {
        size_pt: 10.0,
        bold: false,
    };
}

/// Minimal drawing surface the exporter renders onto.
pub trait DocumentCanvas {
    fn draw_text(&mut self, x_mm: f32, y_mm: f32, text: &str, style: TextStyle);
    fn draw_rect(&mut self, x_mm: f32, y_mm: f32, width_mm: f32, height_mm: f32);
    fn draw_image(&mut self, x_mm: f32, y_mm: f32, width_mm: f32, height_mm: f32, data: &[u8]);
    /// Starts a fresh page; subsequent draws land on it.
    fn new_page(&mut self);
    /// Finalizes the document under the given filename.
    fn save(&mut self, filename: &str) -> std::io::Result<()>;
}

/// Opens a fresh canvas per export; the server keeps one factory in app
/// data so the PDF engine is swappable.
pub trait CanvasFactory: Send + Sync {
    fn open(&self) -> Box<dyn DocumentCanvas>;
}

/// Placeholder for deployments without a PDF engine; drawing is discarded
/// and `save` fails with a clear message instead of reporting a document
/// that was never produced.
pub struct UnconfiguredCanvasFactory;

impl CanvasFactory for UnconfiguredCanvasFactory {
    fn open(&self) -> Box<dyn DocumentCanvas> {
        Box::new(UnconfiguredCanvas)
    }
}

pub struct UnconfiguredCanvas;

impl DocumentCanvas for UnconfiguredCanvas {
    fn draw_text(&mut self, _x_mm: f32, _y_mm: f32, _text: &str, _style: TextStyle) {}
    fn draw_rect(&mut self, _x_mm: f32, _y_mm: f32, _width_mm: f32, _height_mm: f32) {}
    fn draw_image(&mut self, _x_mm: f32, _y_mm: f32, _width_mm: f32, _height_mm: f32, _data: &[u8]) {
    }
    fn new_page(&mut self) {}

    fn save(&mut self, _filename: &str) -> std::io::Result<()> {
        Err(std::io::Error::new(
            std::io::ErrorKind::Unsupported,
            "no document engine configured",
        ))
    }
}

/// Factory for [`RecordingCanvas`] surfaces.
#[cfg(any(test, feature = "test-mocks"))]
pub struct RecordingCanvasFactory;

#[cfg(any(test, feature = "test-mocks"))]
impl CanvasFactory for RecordingCanvasFactory {
    fn open(&self) -> Box<dyn DocumentCanvas> {
        Box::new(RecordingCanvas::new())
    }
}

/// Canvas that records every operation; layout tests assert on the op list.
#[cfg(any(test, feature = "test-mocks"))]
#[derive(Debug, Default)]
pub struct RecordingCanvas {
    pub ops: Vec<CanvasOp>,
}

#[cfg(any(test, feature = "test-mocks"))]
#[derive(Clone, Debug, PartialEq)]
pub enum CanvasOp {
    Text {
        x_mm: f32,
        y_mm: f32,
        text: String,
        style: TextStyle,
    },
    Rect {
        x_mm: f32,
        y_mm: f32,
        width_mm: f32,
        height_mm: f32,
    },
    Image {
        x_mm: f32,
        y_mm: f32,
        width_mm: f32,
        height_mm: f32,
        bytes: usize,
    },
    NewPage,
    Save {
        filename: String,
    },
}

#[cfg(any(test, feature = "test-mocks"))]
impl RecordingCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page_count(&self) -> usize {
        1 + self
            .ops
            .iter()
            .filter(|op| matches!(op, CanvasOp::NewPage))
            .count()
    }

    pub fn texts(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                CanvasOp::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

#[cfg(any(test, feature = "test-mocks"))]
impl DocumentCanvas for RecordingCanvas {
    fn draw_text(&mut self, x_mm: f32, y_mm: f32, text: &str, style: TextStyle) {
        self.ops.push(CanvasOp::Text {
            x_mm,
            y_mm,
            text: text.to_string(),
            style,
        });
    }

    fn draw_rect(&mut self, x_mm: f32, y_mm: f32, width_mm: f32, height_mm: f32) {
        self.ops.push(CanvasOp::Rect {
            x_mm,
            y_mm,
            width_mm,
            height_mm,
        });
    }

    fn draw_image(&mut self, x_mm: f32, y_mm: f32, width_mm: f32, height_mm: f32, data: &[u8]) {
        self.ops.push(CanvasOp::Image {
            x_mm,
            y_mm,
            width_mm,
            height_mm,
            bytes: data.len(),
        });
    }

    fn new_page(&mut self) {
        self.ops.push(CanvasOp::NewPage);
    }

    fn save(&mut self, filename: &str) -> std::io::Result<()> {
        self.ops.push(CanvasOp::Save {
            filename: filename.to_string(),
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unconfigured_canvas_refuses_to_save() {
        let mut canvas = UnconfiguredCanvasFactory.open();
        canvas.draw_text(0.0, 0.0, "Timeline", TextStyle::TITLE);
        let err = canvas.save("jamie-timeline.pdf").unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::Unsupported);
    }
}
