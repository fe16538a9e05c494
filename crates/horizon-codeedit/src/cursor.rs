//! Cursor position and selection.

use std::ops::Range;

/// A cursor in the document, in character offsets.
///
/// When `anchor` is set and differs from `position`, the text between them is
/// selected. The position is the end that moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct TextCursor {
    position: usize,
    anchor: Option<usize>,
}

impl TextCursor {
    /// Create a cursor without a selection.
    pub const fn new(position: usize) -> Self {
        Self {
            position,
            anchor: None,
        }
    }

    /// Create a cursor selecting from `anchor` to `position`.
    pub fn with_selection(anchor: usize, position: usize) -> Self {
        Self {
            position,
            anchor: (anchor != position).then_some(anchor),
        }
    }

    /// The moving end of the cursor.
    pub fn position(&self) -> usize {
        self.position
    }

    /// The fixed end of the selection, or the position when nothing is selected.
    pub fn anchor(&self) -> usize {
        self.anchor.unwrap_or(self.position)
    }

    /// Check if any text is selected.
    pub fn has_selection(&self) -> bool {
        self.anchor.is_some_and(|anchor| anchor != self.position)
    }

    /// The selected range in ascending order, if any.
    pub fn selection_range(&self) -> Option<Range<usize>> {
        self.has_selection().then(|| self.selection_start()..self.selection_end())
    }

    /// The selected range, or an empty range at the position.
    pub fn span(&self) -> Range<usize> {
        self.selection_start()..self.selection_end()
    }

    /// Start of the selection, or the position.
    pub fn selection_start(&self) -> usize {
        self.position.min(self.anchor())
    }

    /// End of the selection, or the position.
    pub fn selection_end(&self) -> usize {
        self.position.max(self.anchor())
    }

    /// Check if the selection runs backwards from its anchor.
    pub fn is_reversed(&self) -> bool {
        self.position < self.anchor()
    }

    /// Move the position, dropping any selection.
    pub fn move_to(&mut self, position: usize) {
        self.position = position;
        self.anchor = None;
    }

    /// Move the position, keeping or starting a selection at the old position.
    pub fn select_to(&mut self, position: usize) {
        let anchor = self.anchor();
        *self = Self::with_selection(anchor, position);
    }

    /// Drop the selection without moving.
    pub fn clear_selection(&mut self) {
        self.anchor = None;
    }

    /// Clamp both ends into `[0, len]`.
    pub fn clamped(self, len: usize) -> Self {
        match self.anchor {
            Some(anchor) => Self::with_selection(anchor.min(len), self.position.min(len)),
            None => Self::new(self.position.min(len)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_without_selection() {
        let cursor = TextCursor::new(5);
        assert_eq!(cursor.position(), 5);
        assert_eq!(cursor.anchor(), 5);
        assert!(!cursor.has_selection());
        assert_eq!(cursor.selection_range(), None);
        assert_eq!(cursor.span(), 5..5);
    }

    #[test]
    fn test_equal_anchor_is_no_selection() {
        let cursor = TextCursor::with_selection(3, 3);
        assert!(!cursor.has_selection());
        assert_eq!(cursor, TextCursor::new(3));
    }

    #[test]
    fn test_reversed_selection() {
        let cursor = TextCursor::with_selection(8, 2);
        assert!(cursor.is_reversed());
        assert_eq!(cursor.selection_range(), Some(2..8));
    }

    #[test]
    fn test_select_to_keeps_anchor() {
        let mut cursor = TextCursor::new(4);
        cursor.select_to(6);
        cursor.select_to(9);
        assert_eq!(cursor.anchor(), 4);
        assert_eq!(cursor.position(), 9);

        cursor.move_to(1);
        assert!(!cursor.has_selection());
    }

    #[test]
    fn test_clamped() {
        let cursor = TextCursor::with_selection(20, 30).clamped(10);
        assert_eq!(cursor, TextCursor::new(10));

        let cursor = TextCursor::with_selection(2, 30).clamped(10);
        assert_eq!(cursor.selection_range(), Some(2..10));
    }
}
