//! Atomic text edits.

use std::ops::Range;

use ropey::Rope;

use crate::cursor::TextCursor;

/// One atomic mutation: replace `range` with `text`, then place the cursor.
///
/// An edit with an empty range and empty text only moves the cursor. Hosts
/// apply each edit as a single undo step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextEdit {
    /// Character range replaced by the edit.
    pub range: Range<usize>,
    /// Replacement text.
    pub text: String,
    /// Cursor after the edit, in post-edit offsets.
    pub cursor: TextCursor,
}

impl TextEdit {
    /// Replace a range.
    pub fn replace(range: Range<usize>, text: impl Into<String>, cursor: TextCursor) -> Self {
        Self {
            range,
            text: text.into(),
            cursor,
        }
    }

    /// Insert text at an offset.
    pub fn insert(at: usize, text: impl Into<String>, cursor: TextCursor) -> Self {
        Self::replace(at..at, text, cursor)
    }

    /// Delete a range.
    pub fn delete(range: Range<usize>, cursor: TextCursor) -> Self {
        Self::replace(range, String::new(), cursor)
    }

    /// Move the cursor without touching text.
    pub fn move_cursor(cursor: TextCursor) -> Self {
        let at = cursor.position();
        Self::replace(at..at, String::new(), cursor)
    }

    /// Check if applying the edit leaves the text unchanged.
    pub fn is_cursor_only(&self) -> bool {
        self.range.is_empty() && self.text.is_empty()
    }

    /// Apply the edit's text change to a rope, returning the removed text.
    ///
    /// The range is clamped to the rope and reordered if reversed.
    pub fn apply_to(&self, rope: &mut Rope) -> String {
        let len = rope.len_chars();
        let start = self.range.start.min(self.range.end).min(len);
        let end = self.range.start.max(self.range.end).min(len);

        let removed = rope.slice(start..end).to_string();
        if start < end {
            rope.remove(start..end);
        }
        if !self.text.is_empty() {
            rope.insert(start, &self.text);
        }
        removed
    }
}
