//! Buffer coordinate adapter.
//!
//! Translates between character offsets, block (line) indices and viewport
//! rectangles. Everything here is a pure function of the document, the
//! viewport and the block geometry the surface reports.

use ropey::Rope;

use horizon_codeedit_core::Rect;

use crate::surface::TextSurface;

/// Coordinate queries over a borrowed surface.
pub struct CoordinateAdapter<'a, S: TextSurface + ?Sized> {
    surface: &'a S,
}

impl<'a, S: TextSurface + ?Sized> CoordinateAdapter<'a, S> {
    pub fn new(surface: &'a S) -> Self {
        Self { surface }
    }

    pub fn block_count(&self) -> usize {
        self.surface.document().len_lines()
    }

    /// The first block intersecting the viewport at the current scroll offset.
    ///
    /// Returns `None` for an empty document. When scrolled past the end, the
    /// last block is returned.
    pub fn first_visible_block(&self) -> Option<usize> {
        let document = self.surface.document();
        if document.len_chars() == 0 {
            return None;
        }

        let count = self.block_count();
        let scroll_y = self.surface.viewport().scroll_y;

        // Block bottoms are non-decreasing, so binary search for the first
        // one below the scroll offset.
        let (mut lo, mut hi) = (0, count);
        while lo < hi {
            let mid = lo + (hi - lo) / 2;
            if self.block_bottom(mid) <= scroll_y {
                lo = mid + 1;
            } else {
                hi = mid;
            }
        }

        let mut block = lo;
        while block < count && !self.surface.is_block_visible(block) {
            block += 1;
        }
        Some(block.min(count - 1))
    }

    /// Where a block is drawn, in editor coordinates.
    ///
    /// Folded blocks get a zero-height rectangle. Returns `None` past the
    /// last block.
    pub fn block_bounding_rect(&self, block: usize) -> Option<Rect> {
        if block >= self.block_count() {
            return None;
        }
        let viewport = self.surface.viewport();
        let top = viewport.rect.top() + self.surface.block_top(block) - viewport.scroll_y;
        Some(Rect::new(
            viewport.rect.left(),
            top,
            viewport.rect.width(),
            self.visible_height(block),
        ))
    }

    /// Block containing `offset`, clamped to the document.
    pub fn block_at_offset(&self, offset: usize) -> usize {
        block_at_offset(self.surface.document(), offset)
    }

    pub fn offset_to_line_col(&self, offset: usize) -> (usize, usize) {
        offset_to_line_col(self.surface.document(), offset)
    }

    pub fn line_col_to_offset(&self, line: usize, column: usize) -> usize {
        line_col_to_offset(self.surface.document(), line, column)
    }

    fn visible_height(&self, block: usize) -> f32 {
        if self.surface.is_block_visible(block) {
            self.surface.block_height(block)
        } else {
            0.0
        }
    }

    fn block_bottom(&self, block: usize) -> f32 {
        self.surface.block_top(block) + self.visible_height(block)
    }
}

/// Block containing `offset`, clamped to the document.
pub fn block_at_offset(document: &Rope, offset: usize) -> usize {
    document.char_to_line(offset.min(document.len_chars()))
}

/// Zero-based line and character column of `offset`, clamped to the document.
pub fn offset_to_line_col(document: &Rope, offset: usize) -> (usize, usize) {
    let offset = offset.min(document.len_chars());
    let line = document.char_to_line(offset);
    (line, offset - document.line_to_char(line))
}

/// Offset of a line and column, both clamped; the column never passes the
/// line break.
pub fn line_col_to_offset(document: &Rope, line: usize, column: usize) -> usize {
    let line = line.min(document.len_lines().saturating_sub(1));
    let start = document.line_to_char(line);
    start + column.min(line_end(document, line) - start)
}

/// Offset of the first character of a line, clamped.
pub fn line_start(document: &Rope, line: usize) -> usize {
    document.line_to_char(line.min(document.len_lines().saturating_sub(1)))
}

/// Offset just before the line break of a line, clamped.
pub fn line_end(document: &Rope, line: usize) -> usize {
    let line = line.min(document.len_lines().saturating_sub(1));
    let start = document.line_to_char(line);
    let slice = document.line(line);
    let mut len = slice.len_chars();
    while len > 0 && is_line_break(slice.char(len - 1)) {
        len -= 1;
    }
    start + len
}

/// The spaces and tabs a line starts with.
pub fn leading_whitespace(document: &Rope, line: usize) -> String {
    let line = line.min(document.len_lines().saturating_sub(1));
    document
        .line(line)
        .chars()
        .take_while(|&c| c == ' ' || c == '\t')
        .collect()
}

/// Character at `offset`, if inside the document.
pub fn char_at(document: &Rope, offset: usize) -> Option<char> {
    (offset < document.len_chars()).then(|| document.char(offset))
}

/// Character just before `offset`, if any.
pub fn char_before(document: &Rope, offset: usize) -> Option<char> {
    let offset = offset.min(document.len_chars());
    (offset > 0).then(|| document.char(offset - 1))
}

fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r' | '\u{000B}' | '\u{000C}' | '\u{0085}' | '\u{2028}' | '\u{2029}'
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::PlainTextSurface;

    fn surface(text: &str) -> PlainTextSurface {
        PlainTextSurface::new(text).with_line_height(10.0).with_size(100.0, 50.0)
    }

    #[test]
    fn test_empty_document_has_no_visible_block() {
        let surface = surface("");
        assert_eq!(CoordinateAdapter::new(&surface).first_visible_block(), None);
    }

    #[test]
    fn test_first_visible_block_follows_scroll() {
        let mut surface = surface("0\n1\n2\n3\n4\n5\n6\n7");
        let adapter = CoordinateAdapter::new(&surface);
        assert_eq!(adapter.first_visible_block(), Some(0));

        surface.set_scroll_y(25.0);
        assert_eq!(CoordinateAdapter::new(&surface).first_visible_block(), Some(2));

        surface.set_scroll_y(30.0);
        assert_eq!(CoordinateAdapter::new(&surface).first_visible_block(), Some(3));

        surface.set_scroll_y(10_000.0);
        assert_eq!(CoordinateAdapter::new(&surface).first_visible_block(), Some(7));
    }

    #[test]
    fn test_first_visible_block_skips_folded() {
        let mut surface = surface("0\n1\n2\n3");
        surface.set_block_folded(1, true);
        surface.set_block_folded(2, true);
        surface.set_scroll_y(10.0);
        assert_eq!(CoordinateAdapter::new(&surface).first_visible_block(), Some(3));
    }

    #[test]
    fn test_block_bounding_rect() {
        let mut surface = surface("a\nb\nc");
        surface.set_viewport_margins(20.0);
        surface.set_scroll_y(5.0);
        let adapter = CoordinateAdapter::new(&surface);

        let rect = adapter.block_bounding_rect(1).unwrap();
        assert_eq!(rect.left(), 20.0);
        assert_eq!(rect.top(), 5.0);
        assert_eq!(rect.height(), 10.0);
        assert_eq!(adapter.block_bounding_rect(3), None);
    }

    #[test]
    fn test_line_col_conversions() {
        let doc = Rope::from_str("ab\ncdef\n");
        assert_eq!(offset_to_line_col(&doc, 0), (0, 0));
        assert_eq!(offset_to_line_col(&doc, 5), (1, 2));
        assert_eq!(offset_to_line_col(&doc, 99), (2, 0));

        assert_eq!(line_col_to_offset(&doc, 1, 2), 5);
        assert_eq!(line_col_to_offset(&doc, 0, 10), 2);
        assert_eq!(line_col_to_offset(&doc, 10, 0), 8);
    }

    #[test]
    fn test_line_bounds_with_crlf() {
        let doc = Rope::from_str("ab\r\ncd");
        assert_eq!(line_end(&doc, 0), 2);
        assert_eq!(line_start(&doc, 1), 4);
        assert_eq!(line_end(&doc, 1), 6);
    }

    #[test]
    fn test_leading_whitespace() {
        let doc = Rope::from_str("  \tfoo\nbar");
        assert_eq!(leading_whitespace(&doc, 0), "  \t");
        assert_eq!(leading_whitespace(&doc, 1), "");
    }

    #[test]
    fn test_char_helpers() {
        let doc = Rope::from_str("()");
        assert_eq!(char_at(&doc, 0), Some('('));
        assert_eq!(char_at(&doc, 2), None);
        assert_eq!(char_before(&doc, 0), None);
        assert_eq!(char_before(&doc, 2), Some(')'));
    }
}
