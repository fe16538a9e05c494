//! Character formats applied to text ranges.

use horizon_codeedit_core::Color;

/// Visual attributes for a run of text or a decoration.
///
/// Unset colors inherit from whatever the host paints underneath.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextFormat {
    /// Text color.
    pub foreground: Option<Color>,
    /// Background fill.
    pub background: Option<Color>,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
}

impl TextFormat {
    /// Create an empty format.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the foreground color using builder pattern.
    pub fn with_foreground(mut self, color: Color) -> Self {
        self.foreground = Some(color);
        self
    }

    /// Set the background color using builder pattern.
    pub fn with_background(mut self, color: Color) -> Self {
        self.background = Some(color);
        self
    }

    /// Make the format bold.
    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    /// Make the format italic.
    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    /// Make the format underlined.
    pub fn underline(mut self) -> Self {
        self.underline = true;
        self
    }

    /// Returns true if the format changes nothing.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
