//! The host text surface.
//!
//! [`TextSurface`] is everything the editing core needs from the widget that
//! stores, lays out and renders the text. [`PlainTextSurface`] is a headless
//! implementation with uniform line heights, used by tests and by hosts that
//! render elsewhere.

use std::collections::BTreeSet;

use ropey::Rope;

use horizon_codeedit_core::Rect;

use crate::cursor::TextCursor;
use crate::edit::TextEdit;
use crate::highlight::{ExtraSelection, HighlightSet};

/// The visible part of the document.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Text area in editor coordinates, right of the gutter.
    pub rect: Rect,
    /// Vertical scroll offset in pixels from the top of the document.
    pub scroll_y: f32,
}

impl Viewport {
    /// Create a viewport.
    pub fn new(rect: Rect, scroll_y: f32) -> Self {
        Self { rect, scroll_y }
    }
}

/// Storage, layout and rendering services provided by the host widget.
///
/// Blocks are the document's lines, indexed from zero. Offsets are character
/// offsets into [`document`](Self::document).
pub trait TextSurface {
    /// The document text.
    fn document(&self) -> &Rope;

    fn cursor(&self) -> TextCursor;

    fn set_cursor(&mut self, cursor: TextCursor);

    /// Apply an edit as one undo step and move the cursor to `edit.cursor`.
    fn apply_edit(&mut self, edit: &TextEdit);

    /// The visible area and scroll offset.
    fn viewport(&self) -> Viewport;

    /// Laid-out height of a block in pixels.
    fn block_height(&self, block: usize) -> f32;

    /// Check if a block is shown; folded blocks are not.
    fn is_block_visible(&self, _block: usize) -> bool {
        true
    }

    /// Document-space top of a block, before scrolling.
    ///
    /// The default sums the heights of the visible blocks above it.
    fn block_top(&self, block: usize) -> f32 {
        (0..block)
            .filter(|&b| self.is_block_visible(b))
            .map(|b| self.block_height(b))
            .sum()
    }

    /// Rectangle of the cursor in editor coordinates.
    fn cursor_rect(&self) -> Rect;

    /// Reserve space left of the text for the gutter.
    fn set_viewport_margins(&mut self, left: f32);

    /// Replace the decorations painted over the text.
    fn set_extra_selections(&mut self, selections: &HighlightSet);
}

/// One undoable edit, recorded with the text it removed.
#[derive(Debug, Clone, PartialEq)]
struct EditRecord {
    start: usize,
    removed: String,
    inserted: String,
    cursor_before: TextCursor,
    cursor_after: TextCursor,
}

/// Manages undo/redo history.
#[derive(Debug, Clone)]
struct UndoStack {
    records: Vec<EditRecord>,
    index: usize,
    max_size: usize,
}

impl UndoStack {
    fn new() -> Self {
        Self {
            records: Vec::new(),
            index: 0,
            max_size: 100,
        }
    }

    fn push(&mut self, record: EditRecord) {
        self.records.truncate(self.index);
        self.records.push(record);
        if self.records.len() > self.max_size {
            self.records.remove(0);
        }
        self.index = self.records.len();
    }

    fn undo(&mut self) -> Option<EditRecord> {
        if self.index > 0 {
            self.index -= 1;
            Some(self.records[self.index].clone())
        } else {
            None
        }
    }

    fn redo(&mut self) -> Option<EditRecord> {
        if self.index < self.records.len() {
            let record = self.records[self.index].clone();
            self.index += 1;
            Some(record)
        } else {
            None
        }
    }

    fn clear(&mut self) {
        self.records.clear();
        self.index = 0;
    }

    fn can_undo(&self) -> bool {
        self.index > 0
    }

    fn can_redo(&self) -> bool {
        self.index < self.records.len()
    }
}

/// A headless surface over a rope with fixed line and character metrics.
#[derive(Debug, Clone)]
pub struct PlainTextSurface {
    rope: Rope,
    cursor: TextCursor,
    line_height: f32,
    char_width: f32,
    size: (f32, f32),
    scroll_y: f32,
    left_margin: f32,
    folded: BTreeSet<usize>,
    extra_selections: Vec<ExtraSelection>,
    undo_stack: UndoStack,
}

impl Default for PlainTextSurface {
    fn default() -> Self {
        Self::new("")
    }
}

impl PlainTextSurface {
    /// Create a surface holding `text`, cursor at the start.
    pub fn new(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
            cursor: TextCursor::new(0),
            line_height: 16.0,
            char_width: 8.0,
            size: (640.0, 480.0),
            scroll_y: 0.0,
            left_margin: 0.0,
            folded: BTreeSet::new(),
            extra_selections: Vec::new(),
            undo_stack: UndoStack::new(),
        }
    }

    /// Set the height of every line using builder pattern.
    pub fn with_line_height(mut self, height: f32) -> Self {
        self.line_height = height.max(1.0);
        self
    }

    /// Set the width of every character using builder pattern.
    pub fn with_char_width(mut self, width: f32) -> Self {
        self.char_width = width.max(1.0);
        self
    }

    /// Set the widget size using builder pattern.
    pub fn with_size(mut self, width: f32, height: f32) -> Self {
        self.size = (width, height);
        self
    }

    /// The whole document as a string.
    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    /// Replace the whole document as one undo step, cursor at the end.
    pub fn set_text(&mut self, text: &str) {
        let end = text.chars().count();
        let edit = TextEdit::replace(0..self.rope.len_chars(), text, TextCursor::new(end));
        self.apply_edit(&edit);
    }

    pub fn line_height(&self) -> f32 {
        self.line_height
    }

    pub fn char_width(&self) -> f32 {
        self.char_width
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.size = (width, height);
    }

    /// Scroll so the document-space `y` is at the top of the viewport.
    pub fn set_scroll_y(&mut self, y: f32) {
        self.scroll_y = y.max(0.0);
    }

    pub fn scroll_y(&self) -> f32 {
        self.scroll_y
    }

    /// Left margin set by the gutter.
    pub fn left_margin(&self) -> f32 {
        self.left_margin
    }

    /// Hide or show a block, as folding would.
    pub fn set_block_folded(&mut self, block: usize, folded: bool) {
        if folded {
            self.folded.insert(block);
        } else {
            self.folded.remove(&block);
        }
    }

    /// Decorations last set by the editor.
    pub fn extra_selections(&self) -> &[ExtraSelection] {
        &self.extra_selections
    }

    /// Revert the last edit. Returns false when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        let Some(record) = self.undo_stack.undo() else {
            return false;
        };
        let end = record.start + record.inserted.chars().count();
        Self::splice(&mut self.rope, record.start..end, &record.removed);
        self.cursor = record.cursor_before.clamped(self.rope.len_chars());
        true
    }

    /// Reapply the last undone edit. Returns false when there is nothing to redo.
    pub fn redo(&mut self) -> bool {
        let Some(record) = self.undo_stack.redo() else {
            return false;
        };
        let end = record.start + record.removed.chars().count();
        Self::splice(&mut self.rope, record.start..end, &record.inserted);
        self.cursor = record.cursor_after.clamped(self.rope.len_chars());
        true
    }

    pub fn can_undo(&self) -> bool {
        self.undo_stack.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.undo_stack.can_redo()
    }

    /// Drop the undo history.
    pub fn clear_undo_history(&mut self) {
        self.undo_stack.clear();
    }

    fn splice(rope: &mut Rope, range: std::ops::Range<usize>, text: &str) {
        let len = rope.len_chars();
        let range = range.start.min(len)..range.end.min(len);
        if !range.is_empty() {
            rope.remove(range.clone());
        }
        if !text.is_empty() {
            rope.insert(range.start, text);
        }
    }
}

impl TextSurface for PlainTextSurface {
    fn document(&self) -> &Rope {
        &self.rope
    }

    fn cursor(&self) -> TextCursor {
        self.cursor
    }

    fn set_cursor(&mut self, cursor: TextCursor) {
        self.cursor = cursor.clamped(self.rope.len_chars());
    }

    fn apply_edit(&mut self, edit: &TextEdit) {
        let cursor_before = self.cursor;
        if !edit.is_cursor_only() {
            let start = edit.range.start.min(edit.range.end).min(self.rope.len_chars());
            let removed = edit.apply_to(&mut self.rope);
            if removed != edit.text {
                self.undo_stack.push(EditRecord {
                    start,
                    removed,
                    inserted: edit.text.clone(),
                    cursor_before,
                    cursor_after: edit.cursor,
                });
            }
        }
        self.cursor = edit.cursor.clamped(self.rope.len_chars());
    }

    fn viewport(&self) -> Viewport {
        let (width, height) = self.size;
        Viewport::new(
            Rect::new(self.left_margin, 0.0, (width - self.left_margin).max(0.0), height),
            self.scroll_y,
        )
    }

    fn block_height(&self, block: usize) -> f32 {
        if block < self.rope.len_lines() {
            self.line_height
        } else {
            0.0
        }
    }

    fn is_block_visible(&self, block: usize) -> bool {
        !self.folded.contains(&block)
    }

    fn block_top(&self, block: usize) -> f32 {
        let hidden = self.folded.range(..block).count();
        block.saturating_sub(hidden) as f32 * self.line_height
    }

    fn cursor_rect(&self) -> Rect {
        let position = self.cursor.position().min(self.rope.len_chars());
        let line = self.rope.char_to_line(position);
        let column = position - self.rope.line_to_char(line);
        let viewport = self.viewport();
        Rect::new(
            viewport.rect.left() + column as f32 * self.char_width,
            viewport.rect.top() + self.block_top(line) - self.scroll_y,
            1.0,
            self.line_height,
        )
    }

    fn set_viewport_margins(&mut self, left: f32) {
        self.left_margin = left.max(0.0);
    }

    fn set_extra_selections(&mut self, selections: &HighlightSet) {
        self.extra_selections = selections.as_slice().to_vec();
    }
}
