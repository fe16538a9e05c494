//! Paint sink used by the gutter.

use horizon_codeedit_core::{Color, Rect};
use horizon_codeedit_style::TextFormat;

/// Horizontal placement of text inside its rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    #[default]
    Left,
    Right,
}

/// The drawing operations the gutter needs from the host renderer.
pub trait Painter {
    /// Fill a rectangle with a solid color.
    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// Draw a single line of text inside `rect`.
    fn draw_text(&mut self, rect: Rect, text: &str, align: TextAlign, format: &TextFormat);
}

/// A recorded paint operation.
#[derive(Debug, Clone, PartialEq)]
pub enum PaintCommand {
    FillRect {
        rect: Rect,
        color: Color,
    },
    DrawText {
        rect: Rect,
        text: String,
        align: TextAlign,
        format: TextFormat,
    },
}

/// A painter that records operations instead of drawing them.
///
/// Useful for headless hosts and for inspecting what the gutter paints.
#[derive(Debug, Clone, Default)]
pub struct PaintRecorder {
    commands: Vec<PaintCommand>,
}

impl PaintRecorder {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded operations in paint order.
    pub fn commands(&self) -> &[PaintCommand] {
        &self.commands
    }

    /// Texts drawn so far, in paint order.
    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|command| match command {
                PaintCommand::DrawText { text, .. } => Some(text.as_str()),
                PaintCommand::FillRect { .. } => None,
            })
            .collect()
    }

    /// Forget recorded operations.
    pub fn clear(&mut self) {
        self.commands.clear();
    }
}

impl Painter for PaintRecorder {
    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.commands.push(PaintCommand::FillRect { rect, color });
    }

    fn draw_text(&mut self, rect: Rect, text: &str, align: TextAlign, format: &TextFormat) {
        self.commands.push(PaintCommand::DrawText {
            rect,
            text: text.to_string(),
            align,
            format: *format,
        });
    }
}
