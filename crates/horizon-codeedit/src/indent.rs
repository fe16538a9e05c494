//! Smart indentation and auto-pairing.
//!
//! On structural keys the engine computes one atomic [`TextEdit`]. Returning
//! `None` leaves the key to the editor's default handling.

use ropey::Rope;

use horizon_codeedit_core::logging::targets;

use crate::bracket::BRACKET_PAIRS;
use crate::config::EditorConfig;
use crate::coords::{block_at_offset, char_at, char_before, leading_whitespace, line_end, line_start};
use crate::cursor::TextCursor;
use crate::edit::TextEdit;
use crate::events::{Key, KeyPressEvent};
use crate::highlighter::SyntaxHighlighter;

/// Pairs inserted together when the opener is typed.
pub const AUTO_PAIRS: [(char, char); 5] = [('(', ')'), ('[', ']'), ('{', '}'), ('"', '"'), ('\'', '\'')];

/// Computes indentation and pairing edits.
#[derive(Debug, Clone, Copy, Default)]
pub struct IndentationEngine;

impl IndentationEngine {
    pub fn new() -> Self {
        Self
    }

    /// Compute the edit for a key press, if the engine handles it.
    pub fn handle_key(
        &self,
        event: &KeyPressEvent,
        document: &Rope,
        cursor: TextCursor,
        config: &EditorConfig,
        highlighter: &dyn SyntaxHighlighter,
    ) -> Option<TextEdit> {
        if event.modifiers.is_command() {
            return None;
        }
        let cursor = cursor.clamped(document.len_chars());

        let edit = match event.key {
            Key::Enter => self.newline(document, cursor, config),
            Key::Tab if event.modifiers.shift => self.backtab(document, cursor, config),
            Key::Tab => Some(self.tab(document, cursor, config)),
            Key::Backspace => self.backspace(document, cursor, config),
            _ => {
                let ch = event.typed_char()?;
                let in_literal = highlighter.is_in_string_or_comment(document, cursor.selection_start());
                self.typed_char(ch, document, cursor, config, in_literal)
            }
        };

        if let Some(edit) = &edit {
            tracing::trace!(
                target: targets::INDENT,
                key = ?event.key,
                range = ?edit.range,
                text = %edit.text.escape_debug(),
                "indentation edit"
            );
        }
        edit
    }

    /// Newline carrying the current line's indentation.
    ///
    /// Between an adjacent opener and closer the closer moves to its own line
    /// and the cursor lands on an extra-indented middle line.
    pub fn newline(&self, document: &Rope, cursor: TextCursor, config: &EditorConfig) -> Option<TextEdit> {
        if !config.auto_indentation {
            return None;
        }

        let span = cursor.span();
        let line = block_at_offset(document, span.start);
        let column = span.start - line_start(document, line);
        let indent: String = leading_whitespace(document, line).chars().take(column).collect();

        let between_pair = match (char_before(document, span.start), char_at(document, span.end)) {
            (Some(open), Some(close)) => BRACKET_PAIRS.contains(&(open, close)),
            _ => false,
        };

        if between_pair {
            let unit = config.indent_unit();
            let position = span.start + 1 + indent.chars().count() + unit.chars().count();
            let text = format!("\n{indent}{unit}\n{indent}");
            Some(TextEdit::replace(span, text, TextCursor::new(position)))
        } else {
            let text = format!("\n{indent}");
            let position = span.start + text.chars().count();
            Some(TextEdit::replace(span, text, TextCursor::new(position)))
        }
    }

    /// Tab: spaces to the next tab stop, a literal tab, or indent every line
    /// of a multi-line selection.
    pub fn tab(&self, document: &Rope, cursor: TextCursor, config: &EditorConfig) -> TextEdit {
        if let Some(range) = cursor.selection_range() {
            let (first, last) = touched_lines(document, range.start, range.end);
            if first != last {
                return self.indent_lines(document, cursor, first, last, config);
            }
        }

        let span = cursor.span();
        let text = if config.tab_replace {
            let width = config.tab_width();
            let column = visual_column(document, span.start, width);
            " ".repeat(width - column % width)
        } else {
            "\t".to_string()
        };
        let position = span.start + text.chars().count();
        TextEdit::replace(span, text, TextCursor::new(position))
    }

    /// Shift+Tab: remove one indent unit from every touched line.
    ///
    /// Returns `None` when no line has indentation to remove.
    pub fn backtab(&self, document: &Rope, cursor: TextCursor, config: &EditorConfig) -> Option<TextEdit> {
        let width = config.tab_width();
        let (first, last) = touched_lines(document, cursor.selection_start(), cursor.selection_end());
        let region_start = line_start(document, first);
        let region_end = line_end(document, last);

        let mut text = String::new();
        let mut removed = 0;
        for line in first..=last {
            let content = line_content(document, line, last, region_end);
            let strip = leading_indent_len(&content, width);
            text.push_str(&content[strip..]);
            removed += strip;
        }
        if removed == 0 {
            return None;
        }

        let cursor = if cursor.has_selection() {
            block_selection(cursor, region_start, region_start + text.chars().count())
        } else {
            let column = cursor.position() - region_start;
            TextCursor::new(region_start + column.saturating_sub(removed))
        };
        Some(TextEdit::replace(region_start..region_end, text, cursor))
    }

    /// A typed printable character: pairing, closer skipping and brace dedent.
    pub fn typed_char(
        &self,
        ch: char,
        document: &Rope,
        cursor: TextCursor,
        config: &EditorConfig,
        in_literal: bool,
    ) -> Option<TextEdit> {
        let span = cursor.span();

        if config.auto_parentheses
            && !cursor.has_selection()
            && is_closer(ch)
            && char_at(document, span.start) == Some(ch)
        {
            return Some(TextEdit::move_cursor(TextCursor::new(span.start + 1)));
        }

        if ch == '}' && config.auto_indentation && !in_literal && !cursor.has_selection() {
            if let Some(edit) = dedent_closing_brace(document, span.start, config) {
                return Some(edit);
            }
        }

        if !config.auto_parentheses || in_literal {
            return None;
        }
        let close = closer_for(ch)?;

        match cursor.selection_range() {
            Some(range) => {
                let selected = document.slice(range.clone()).to_string();
                let text = format!("{ch}{selected}{close}");
                let cursor = block_selection(cursor, range.start + 1, range.end + 1);
                Some(TextEdit::replace(range, text, cursor))
            }
            None => Some(TextEdit::insert(
                span.start,
                format!("{ch}{close}"),
                TextCursor::new(span.start + 1),
            )),
        }
    }

    /// Backspace between an auto-pair removes both halves.
    pub fn backspace(&self, document: &Rope, cursor: TextCursor, config: &EditorConfig) -> Option<TextEdit> {
        if !config.auto_parentheses || cursor.has_selection() {
            return None;
        }
        let position = cursor.position();
        match (char_before(document, position), char_at(document, position)) {
            (Some(open), Some(close)) if AUTO_PAIRS.contains(&(open, close)) => Some(TextEdit::delete(
                position - 1..position + 1,
                TextCursor::new(position - 1),
            )),
            _ => None,
        }
    }

    fn indent_lines(
        &self,
        document: &Rope,
        cursor: TextCursor,
        first: usize,
        last: usize,
        config: &EditorConfig,
    ) -> TextEdit {
        let unit = config.indent_unit();
        let region_start = line_start(document, first);
        let region_end = line_end(document, last);

        let mut text = String::new();
        for line in first..=last {
            text.push_str(&unit);
            text.push_str(&line_content(document, line, last, region_end));
        }

        let cursor = block_selection(cursor, region_start, region_start + text.chars().count());
        TextEdit::replace(region_start..region_end, text, cursor)
    }
}

/// First and last line touched by `start..end`. A selection ending at the
/// start of a line does not touch that line.
fn touched_lines(document: &Rope, start: usize, end: usize) -> (usize, usize) {
    let first = block_at_offset(document, start);
    let mut last = block_at_offset(document, end);
    if last > first && line_start(document, last) == end {
        last -= 1;
    }
    (first, last)
}

/// A line's text including its line break, except for the last line of a
/// region which stops at `region_end`.
fn line_content(document: &Rope, line: usize, last: usize, region_end: usize) -> String {
    let start = line_start(document, line);
    let end = if line == last {
        region_end
    } else {
        line_start(document, line + 1)
    };
    document.slice(start..end).to_string()
}

/// Select `start..end`, keeping the direction of `cursor`.
fn block_selection(cursor: TextCursor, start: usize, end: usize) -> TextCursor {
    if cursor.is_reversed() {
        TextCursor::with_selection(end, start)
    } else {
        TextCursor::with_selection(start, end)
    }
}

/// Column of `offset` with tabs expanded to `width`.
fn visual_column(document: &Rope, offset: usize, width: usize) -> usize {
    let start = line_start(document, block_at_offset(document, offset));
    document.slice(start..offset).chars().fold(0, |column, ch| {
        if ch == '\t' {
            column + width - column % width
        } else {
            column + 1
        }
    })
}

/// Length of the indentation one dedent removes from the start of `line`.
fn leading_indent_len(line: &str, width: usize) -> usize {
    if line.starts_with('\t') {
        1
    } else {
        line.chars().take(width).take_while(|&c| c == ' ').count()
    }
}

/// `}` typed after nothing but whitespace drops one indent unit first.
fn dedent_closing_brace(document: &Rope, position: usize, config: &EditorConfig) -> Option<TextEdit> {
    let start = line_start(document, block_at_offset(document, position));
    let prefix = document.slice(start..position).to_string();
    if prefix.is_empty() || !prefix.chars().all(|c| c == ' ' || c == '\t') {
        return None;
    }

    let strip = if prefix.ends_with('\t') {
        1
    } else {
        prefix
            .chars()
            .rev()
            .take(config.tab_width())
            .take_while(|&c| c == ' ')
            .count()
    };
    let kept = &prefix[..prefix.len() - strip];
    let position = start + kept.chars().count() + 1;
    Some(TextEdit::replace(start..start + prefix.chars().count(), format!("{kept}}}"), TextCursor::new(position)))
}

fn closer_for(ch: char) -> Option<char> {
    AUTO_PAIRS.iter().find(|&&(open, _)| open == ch).map(|&(_, close)| close)
}

fn is_closer(ch: char) -> bool {
    AUTO_PAIRS.iter().any(|&(_, close)| close == ch)
}
