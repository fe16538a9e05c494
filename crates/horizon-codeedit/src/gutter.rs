//! Line-number gutter.
//!
//! The gutter sits left of the text viewport. Its width follows the number of
//! digits in the line count, and the editor reserves that width as the
//! viewport's left margin so text never renders underneath it.

use horizon_codeedit_core::logging::{span_names, targets};
use horizon_codeedit_core::{Color, PerfSpan, Rect, Signal};
use horizon_codeedit_style::{SyntaxStyle, TextFormat, format_names};

use crate::coords::CoordinateAdapter;
use crate::painter::{Painter, TextAlign};
use crate::surface::TextSurface;

/// Gutter sizing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GutterConfig {
    /// Minimum number of digit cells reserved.
    pub min_digits: usize,
    /// Advance of one digit in the gutter font.
    pub digit_width: f32,
    /// Space left of the numbers.
    pub padding_left: f32,
    /// Space between the numbers and the text.
    pub padding_right: f32,
}

impl Default for GutterConfig {
    fn default() -> Self {
        Self {
            min_digits: 1,
            digit_width: 8.0,
            padding_left: 8.0,
            padding_right: 5.0,
        }
    }
}

impl GutterConfig {
    /// Create a new GutterConfig with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the minimum digit count.
    pub fn with_min_digits(mut self, digits: usize) -> Self {
        self.min_digits = digits.max(1);
        self
    }

    /// Set the digit advance, normally measured from the host font.
    pub fn with_digit_width(mut self, width: f32) -> Self {
        self.digit_width = width.max(0.0);
        self
    }

    /// Set the paddings around the numbers.
    pub fn with_padding(mut self, left: f32, right: f32) -> Self {
        self.padding_left = left.max(0.0);
        self.padding_right = right.max(0.0);
        self
    }

    /// Horizontal space not taken by digits.
    pub fn margin(&self) -> f32 {
        self.padding_left + self.padding_right
    }
}

/// Formats the gutter paints with, resolved from a [`SyntaxStyle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GutterFormats {
    pub number: TextFormat,
    pub current_number: TextFormat,
}

impl Default for GutterFormats {
    fn default() -> Self {
        Self {
            number: TextFormat::new()
                .with_foreground(Color::GRAY)
                .with_background(Color::from_rgb8(245, 245, 245)),
            current_number: TextFormat::new().with_foreground(Color::from_rgb8(64, 64, 64)),
        }
    }
}

impl GutterFormats {
    /// Resolve formats from a style, keeping defaults for what it lacks.
    pub fn from_style(style: &SyntaxStyle) -> Self {
        let defaults = Self::default();
        let number = style
            .format(format_names::LINE_NUMBER)
            .copied()
            .unwrap_or(defaults.number);
        let current_number = style
            .format(format_names::CURRENT_LINE_NUMBER)
            .copied()
            .unwrap_or(defaults.current_number);
        Self {
            number,
            current_number,
        }
    }
}

/// Count the number of decimal digits in a number.
pub fn digit_count(n: usize) -> usize {
    let mut digits = 1;
    let mut n = n / 10;
    while n > 0 {
        digits += 1;
        n /= 10;
    }
    digits
}

/// The line-number side panel.
pub struct LineNumberArea {
    config: GutterConfig,
    formats: GutterFormats,
    width: f32,

    /// Emitted with the new width when it changes.
    pub width_changed: Signal<f32>,
}

impl Default for LineNumberArea {
    fn default() -> Self {
        Self::new(GutterConfig::default())
    }
}

impl LineNumberArea {
    pub fn new(config: GutterConfig) -> Self {
        let mut area = Self {
            config,
            formats: GutterFormats::default(),
            width: 0.0,
            width_changed: Signal::new(),
        };
        area.width = area.width_for(1);
        area
    }

    pub fn config(&self) -> &GutterConfig {
        &self.config
    }

    /// Replace the sizing. Takes effect on the next [`update_width`](Self::update_width).
    pub fn set_config(&mut self, config: GutterConfig) {
        self.config = config;
    }

    pub fn formats(&self) -> &GutterFormats {
        &self.formats
    }

    pub fn set_formats(&mut self, formats: GutterFormats) {
        self.formats = formats;
    }

    /// Current width in pixels.
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Width needed for a document of `line_count` lines.
    pub fn width_for(&self, line_count: usize) -> f32 {
        let digits = digit_count(line_count.max(1)).max(self.config.min_digits);
        digits as f32 * self.config.digit_width + self.config.margin()
    }

    /// Recompute the width from the surface's line count and reserve it as
    /// the viewport margin. Returns true if the width changed.
    pub fn update_width<S: TextSurface + ?Sized>(&mut self, surface: &mut S) -> bool {
        let width = self.width_for(surface.document().len_lines());
        surface.set_viewport_margins(width);
        if width == self.width {
            return false;
        }

        tracing::debug!(target: targets::GUTTER, old = self.width, new = width, "gutter width changed");
        self.width = width;
        self.width_changed.emit(width);
        true
    }

    /// Paint the line numbers intersecting `rect`.
    ///
    /// Returns the number of line numbers drawn.
    pub fn paint<S: TextSurface + ?Sized>(&self, surface: &S, painter: &mut dyn Painter, rect: Rect) -> usize {
        let _span = PerfSpan::new(span_names::GUTTER_PAINT);

        if let Some(background) = self.formats.number.background {
            painter.fill_rect(rect, background);
        }

        let adapter = CoordinateAdapter::new(surface);
        let Some(first) = adapter.first_visible_block() else {
            return 0;
        };
        let Some(first_rect) = adapter.block_bounding_rect(first) else {
            return 0;
        };

        let count = adapter.block_count();
        let current = adapter.block_at_offset(surface.cursor().position());
        let text_width = (self.width - self.config.padding_right).max(0.0);

        let mut drawn = 0;
        let mut top = first_rect.top();
        for block in first..count {
            if top > rect.bottom() {
                break;
            }
            if !surface.is_block_visible(block) {
                continue;
            }

            let height = surface.block_height(block);
            if top + height >= rect.top() {
                let format = if block == current {
                    &self.formats.current_number
                } else {
                    &self.formats.number
                };
                let number = (block + 1).to_string();
                painter.draw_text(Rect::new(0.0, top, text_width, height), &number, TextAlign::Right, format);
                drawn += 1;
            }
            top += height;
        }

        tracing::trace!(target: targets::GUTTER, first, drawn, "painted gutter");
        drawn
    }
}

impl std::fmt::Debug for LineNumberArea {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LineNumberArea")
            .field("config", &self.config)
            .field("width", &self.width)
            .finish_non_exhaustive()
    }
}
