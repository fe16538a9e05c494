//! The editor orchestrator.
//!
//! [`CodeEditor`] owns a host [`TextSurface`] and the behavior components,
//! and routes every event through them in a fixed order. For a key press:
//!
//! 1. the completion controller, which may consume the key,
//! 2. the indentation engine,
//! 3. default handling (text insertion, deletion, cursor movement),
//! 4. completion prefix tracking,
//! 5. highlight rebuild and gutter width.
//!
//! # Example
//!
//! ```
//! use horizon_codeedit::{CodeEditor, KeyPressEvent, PlainTextSurface};
//!
//! let mut editor = CodeEditor::new(PlainTextSurface::new(""));
//! for ch in "fn main(".chars() {
//!     editor.key_press_event(&KeyPressEvent::character(ch));
//! }
//! assert_eq!(editor.text(), "fn main()");
//! assert_eq!(editor.cursor().position(), 8);
//! ```

use horizon_codeedit_core::logging::{span_names, targets};
use horizon_codeedit_core::{Color, PerfSpan, Rect, Signal, codeedit_debug, codeedit_warn};
use horizon_codeedit_style::{SyntaxStyle, TextFormat, format_names};

use crate::bracket::{BracketFormats, BracketMatcher};
use crate::completion::{
    CompletionController, CompletionList, CompletionPopup, CompletionProvider, CompletionRequest, KeyOutcome,
};
use crate::config::EditorConfig;
use crate::coords::{self, CoordinateAdapter};
use crate::cursor::TextCursor;
use crate::edit::TextEdit;
use crate::events::{EditorEvent, Key, KeyPressEvent, ResizeEvent, UpdateRequest};
use crate::gutter::{GutterConfig, GutterFormats, LineNumberArea};
use crate::highlight::{ExtraSelection, HighlightKind, HighlightSet};
use crate::highlighter::{PlainHighlighter, SyntaxHighlighter};
use crate::indent::IndentationEngine;
use crate::painter::Painter;
use crate::surface::TextSurface;

/// Formats resolved from the style, cached until the next style update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ResolvedFormats {
    current_line: TextFormat,
    brackets: BracketFormats,
    gutter: GutterFormats,
}

impl ResolvedFormats {
    fn from_style(style: &SyntaxStyle) -> Self {
        let current_line = style
            .format(format_names::CURRENT_LINE)
            .copied()
            .unwrap_or_else(|| TextFormat::new().with_background(Color::from_rgb8(0xf5, 0xf5, 0xdc)));
        Self {
            current_line,
            brackets: BracketFormats::from_style(style),
            gutter: GutterFormats::from_style(style),
        }
    }
}

/// A code editor over a host text surface.
///
/// # Signals
///
/// - `text_changed()`: the document changed
/// - `cursor_position_changed((line, column))`: the cursor moved, zero-based
/// - `gutter_update_requested(Rect)`: the host should repaint this part of the
///   gutter, in gutter-local coordinates
pub struct CodeEditor<S: TextSurface> {
    surface: S,
    config: EditorConfig,
    style: SyntaxStyle,
    formats: ResolvedFormats,
    highlighter: Box<dyn SyntaxHighlighter>,

    gutter: LineNumberArea,
    gutter_rect: Rect,
    brackets: BracketMatcher,
    indentation: IndentationEngine,
    completion: CompletionController,
    provider: Option<Box<dyn CompletionProvider>>,
    popup: Box<dyn CompletionPopup>,

    highlights: HighlightSet,
    focused: bool,
    revision: u64,
    seen_revision: u64,
    last_position: usize,

    /// Emitted when the document changes.
    pub text_changed: Signal<()>,
    /// Emitted with the zero-based (line, column) when the cursor moves.
    pub cursor_position_changed: Signal<(usize, usize)>,
    /// Emitted with the gutter area that needs repainting.
    pub gutter_update_requested: Signal<Rect>,
}

impl<S: TextSurface> CodeEditor<S> {
    /// Create an editor with the default configuration and built-in style.
    pub fn new(surface: S) -> Self {
        let style = SyntaxStyle::default_style().clone();
        let formats = ResolvedFormats::from_style(&style);
        let last_position = surface.cursor().position();

        let mut editor = Self {
            surface,
            config: EditorConfig::default(),
            style,
            formats,
            highlighter: Box::new(PlainHighlighter),
            gutter: LineNumberArea::default(),
            gutter_rect: Rect::ZERO,
            brackets: BracketMatcher::new(),
            indentation: IndentationEngine::new(),
            completion: CompletionController::new(),
            provider: None,
            popup: Box::new(CompletionList::new()),
            highlights: HighlightSet::new(),
            focused: false,
            revision: 0,
            seen_revision: 0,
            last_position,
            text_changed: Signal::new(),
            cursor_position_changed: Signal::new(),
            gutter_update_requested: Signal::new(),
        };
        editor.gutter.set_formats(formats.gutter);
        editor.update_gutter_width();
        editor.update_extra_selection();
        editor
    }

    /// Set the configuration using builder pattern.
    pub fn with_config(mut self, config: EditorConfig) -> Self {
        self.set_config(config);
        self
    }

    /// Set the style using builder pattern.
    pub fn with_syntax_style(mut self, style: SyntaxStyle) -> Self {
        self.set_syntax_style(style);
        self
    }

    /// Set the completion provider using builder pattern.
    pub fn with_completer(mut self, provider: impl CompletionProvider + 'static) -> Self {
        self.set_completer(Some(Box::new(provider)));
        self
    }

    /// Set the completion popup using builder pattern.
    pub fn with_completion_popup(mut self, popup: impl CompletionPopup + 'static) -> Self {
        self.set_completion_popup(Box::new(popup));
        self
    }

    /// Set the syntax highlighter using builder pattern.
    pub fn with_highlighter(mut self, highlighter: impl SyntaxHighlighter + 'static) -> Self {
        self.set_highlighter(Box::new(highlighter));
        self
    }

    /// Set the gutter sizing using builder pattern.
    pub fn with_gutter_config(mut self, config: GutterConfig) -> Self {
        self.set_gutter_config(config);
        self
    }

    /// Set the bracket matcher using builder pattern.
    pub fn with_bracket_matcher(mut self, matcher: BracketMatcher) -> Self {
        self.brackets = matcher;
        self.update_extra_selection();
        self
    }

    // =========================================================================
    // Surface and Document
    // =========================================================================

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Mutable access to the surface.
    ///
    /// Changes made this way are not seen until the matching
    /// [`EditorEvent::TextChanged`] or [`EditorEvent::CursorMoved`] is handled.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }

    /// The whole document as a string.
    pub fn text(&self) -> String {
        self.surface.document().to_string()
    }

    pub fn cursor(&self) -> TextCursor {
        self.surface.cursor()
    }

    /// Move the cursor programmatically.
    pub fn set_cursor(&mut self, cursor: TextCursor) {
        let len = self.surface.document().len_chars();
        self.surface.set_cursor(cursor.clamped(len));
        self.finish_dispatch();
    }

    /// Replace the whole document, cursor at the start.
    pub fn set_plain_text(&mut self, text: &str) {
        let len = self.surface.document().len_chars();
        self.completion.cancel(self.popup.as_mut());
        self.apply_edit(&TextEdit::replace(0..len, text, TextCursor::new(0)));
        self.finish_dispatch();
    }

    /// Line and column of the cursor, zero-based.
    pub fn cursor_line_col(&self) -> (usize, usize) {
        coords::offset_to_line_col(self.surface.document(), self.surface.cursor().position())
    }

    /// First block intersecting the viewport, `None` for an empty document.
    pub fn first_visible_block(&self) -> Option<usize> {
        CoordinateAdapter::new(&self.surface).first_visible_block()
    }

    // =========================================================================
    // Configuration
    // =========================================================================

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Replace the configuration. It applies from the next event.
    pub fn set_config(&mut self, mut config: EditorConfig) {
        config.tab_replace_size = config.tab_width();
        codeedit_debug!(?config, "editor config changed");
        self.config = config;
    }

    pub fn set_auto_parentheses(&mut self, enabled: bool) {
        self.config.auto_parentheses = enabled;
    }

    pub fn auto_parentheses(&self) -> bool {
        self.config.auto_parentheses
    }

    pub fn set_tab_replace(&mut self, enabled: bool) {
        self.config.tab_replace = enabled;
    }

    pub fn tab_replace(&self) -> bool {
        self.config.tab_replace
    }

    /// Set the tab width. Zero is raised to 1.
    pub fn set_tab_replace_size(&mut self, size: usize) {
        self.config.tab_replace_size = size.max(1);
    }

    pub fn tab_replace_size(&self) -> usize {
        self.config.tab_replace_size
    }

    pub fn set_auto_indentation(&mut self, enabled: bool) {
        self.config.auto_indentation = enabled;
    }

    pub fn auto_indentation(&self) -> bool {
        self.config.auto_indentation
    }

    // =========================================================================
    // Collaborators
    // =========================================================================

    pub fn syntax_style(&self) -> &SyntaxStyle {
        &self.style
    }

    /// Replace the style and re-read its formats.
    pub fn set_syntax_style(&mut self, style: SyntaxStyle) {
        self.style = style;
        self.update_style();
    }

    /// Mutable access to the style. Call [`update_style`](Self::update_style)
    /// afterwards.
    pub fn syntax_style_mut(&mut self) -> &mut SyntaxStyle {
        &mut self.style
    }

    /// Replace the syntax highlighter. It is notified of the current text.
    pub fn set_highlighter(&mut self, mut highlighter: Box<dyn SyntaxHighlighter>) {
        highlighter.on_text_changed(self.surface.document());
        self.highlighter = highlighter;
    }

    /// Set or remove the completion provider. Any open session ends.
    pub fn set_completer(&mut self, provider: Option<Box<dyn CompletionProvider>>) {
        self.completion.cancel(self.popup.as_mut());
        self.provider = provider;
    }

    pub fn completer(&self) -> Option<&dyn CompletionProvider> {
        self.provider.as_deref()
    }

    pub fn set_completion_popup(&mut self, popup: Box<dyn CompletionPopup>) {
        self.completion.cancel(self.popup.as_mut());
        self.popup = popup;
    }

    pub fn completion_popup(&self) -> &dyn CompletionPopup {
        self.popup.as_ref()
    }

    pub fn completion_popup_mut(&mut self) -> &mut dyn CompletionPopup {
        self.popup.as_mut()
    }

    pub fn completion(&self) -> &CompletionController {
        &self.completion
    }

    /// Mutable access to completion settings.
    pub fn completion_mut(&mut self) -> &mut CompletionController {
        &mut self.completion
    }

    pub fn gutter(&self) -> &LineNumberArea {
        &self.gutter
    }

    pub fn set_gutter_config(&mut self, config: GutterConfig) {
        self.gutter.set_config(config);
        self.update_gutter_width();
    }

    /// Gutter geometry in editor coordinates, as of the last resize.
    pub fn gutter_rect(&self) -> Rect {
        self.gutter_rect
    }

    pub fn bracket_matcher(&self) -> &BracketMatcher {
        &self.brackets
    }

    /// Decorations last handed to the surface.
    pub fn highlights(&self) -> &HighlightSet {
        &self.highlights
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    // =========================================================================
    // Event Handling
    // =========================================================================

    /// Dispatch an event. Returns true if it was handled.
    ///
    /// A choice made in the completion popup since the last event is spliced
    /// in first.
    pub fn handle_event(&mut self, event: EditorEvent<'_>) -> bool {
        let accepted = self.accept_popup_choice();
        match event {
            EditorEvent::KeyPress(key) => self.key_press_event(&key),
            EditorEvent::GutterPaint(paint, painter) => {
                self.paint_gutter(painter, paint.rect);
                true
            }
            EditorEvent::Resize(resize) => {
                self.resize_event(&resize);
                true
            }
            EditorEvent::Update(request) => {
                self.update_request(&request);
                true
            }
            EditorEvent::FocusIn => {
                self.focus_in_event();
                true
            }
            EditorEvent::FocusOut => {
                self.focus_out_event();
                true
            }
            EditorEvent::CursorMoved => {
                self.finish_dispatch();
                true
            }
            EditorEvent::TextChanged => {
                self.revision += 1;
                self.finish_dispatch();
                true
            }
            EditorEvent::PopupClosed => {
                self.completion.cancel(self.popup.as_mut());
                true
            }
            EditorEvent::PopupActivated => accepted,
            EditorEvent::StyleChanged => {
                self.update_style();
                true
            }
        }
    }

    /// Handle a key press. Returns true if the key was used.
    pub fn key_press_event(&mut self, event: &KeyPressEvent) -> bool {
        let _span = PerfSpan::new(span_names::KEY_PRESS);
        self.accept_popup_choice();

        let cursor = self.surface.cursor();
        match self
            .completion
            .handle_key_begin(event, self.surface.document(), cursor, self.popup.as_mut())
        {
            KeyOutcome::Accept(edit) => {
                self.apply_edit(&edit);
                self.finish_dispatch();
                return true;
            }
            KeyOutcome::Consumed => {
                self.finish_dispatch();
                return true;
            }
            KeyOutcome::Ignored => {}
        }

        let edit = self.indentation.handle_key(
            event,
            self.surface.document(),
            self.surface.cursor(),
            &self.config,
            self.highlighter.as_ref(),
        );
        let handled = match edit {
            Some(edit) => {
                self.apply_edit(&edit);
                true
            }
            None => self.default_key_handling(event),
        };

        if let Some(provider) = self.provider.as_deref() {
            let anchor = self.surface.cursor_rect();
            self.completion.handle_key_end(
                event,
                self.surface.document(),
                self.surface.cursor(),
                anchor,
                provider,
                self.popup.as_mut(),
            );
        }

        tracing::trace!(target: targets::EDITOR, key = ?event.key, handled, "key press");
        self.finish_dispatch();
        handled
    }

    /// Paint the gutter region `rect`. Returns the number of line numbers drawn.
    pub fn paint_gutter(&self, painter: &mut dyn Painter, rect: Rect) -> usize {
        self.gutter.paint(&self.surface, painter, rect)
    }

    /// The contents area was resized.
    pub fn resize_event(&mut self, event: &ResizeEvent) {
        self.update_gutter_width();
        let contents = event.contents_rect;
        self.gutter_rect = Rect::new(contents.left(), contents.top(), self.gutter.width(), contents.height());
        self.request_full_gutter_update();
    }

    /// The viewport repainted `request.rect` or scrolled by `request.dy`.
    pub fn update_request(&mut self, request: &UpdateRequest) {
        if request.dy != 0.0 {
            self.request_full_gutter_update();
        } else {
            let rect = Rect::new(0.0, request.rect.top(), self.gutter.width(), request.rect.height());
            self.gutter_update_requested.emit(rect);
        }

        if covers(&request.rect, &self.surface.viewport().rect) {
            self.update_gutter_width();
        }
    }

    pub fn focus_in_event(&mut self) {
        self.focused = true;
    }

    /// Losing focus ends any completion session.
    pub fn focus_out_event(&mut self) {
        self.focused = false;
        self.completion.cancel(self.popup.as_mut());
    }

    /// Re-read formats from the style and rebuild highlights.
    pub fn update_style(&mut self) {
        self.formats = ResolvedFormats::from_style(&self.style);
        self.gutter.set_formats(self.formats.gutter);
        tracing::debug!(target: targets::EDITOR, style = %self.style.name(), "style updated");
        self.update_extra_selection();
        self.request_full_gutter_update();
    }

    /// Splice a completion chosen outside the key path, e.g. from a host-owned list.
    pub fn insert_completion(&mut self, completion: &str) {
        let edit = self.completion.accept(
            completion,
            self.surface.document(),
            self.surface.cursor(),
            self.popup.as_mut(),
        );
        self.apply_edit(&edit);
        self.finish_dispatch();
    }

    /// Splice the candidate chosen in the popup, if any. Returns true if one
    /// was pending.
    pub fn accept_popup_choice(&mut self) -> bool {
        match self.popup.take_activated() {
            Some(choice) => {
                self.insert_completion(&choice);
                true
            }
            None => false,
        }
    }

    /// Deliver candidates from a deferred provider.
    ///
    /// Returns false when `request` no longer matches the open session; the
    /// candidates are then dropped.
    pub fn deliver_completions(&mut self, request: &CompletionRequest, candidates: Vec<String>) -> bool {
        let anchor = self.surface.cursor_rect();
        self.completion
            .deliver(request, candidates, anchor, self.popup.as_mut())
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn apply_edit(&mut self, edit: &TextEdit) {
        if !edit.is_cursor_only() {
            self.revision += 1;
        }
        self.surface.apply_edit(edit);
    }

    fn replace_selection(&mut self, text: &str) {
        let span = self.surface.cursor().span();
        let position = span.start + text.chars().count();
        self.apply_edit(&TextEdit::replace(span, text, TextCursor::new(position)));
    }

    fn move_cursor(&mut self, target: usize, extend: bool) {
        let mut cursor = self.surface.cursor();
        if extend {
            cursor.select_to(target);
        } else {
            cursor.move_to(target);
        }
        self.surface.set_cursor(cursor);
    }

    /// Text insertion, deletion and cursor movement.
    fn default_key_handling(&mut self, event: &KeyPressEvent) -> bool {
        if event.modifiers.is_command() {
            return false;
        }

        let document = self.surface.document();
        let len = document.len_chars();
        let cursor = self.surface.cursor().clamped(len);
        let position = cursor.position();
        let extend = event.modifiers.shift;
        let (line, column) = coords::offset_to_line_col(document, position);

        match event.key {
            Key::Enter => {
                self.replace_selection("\n");
                true
            }
            Key::Backspace => {
                let range = match cursor.selection_range() {
                    Some(range) => range,
                    None if position > 0 => position - 1..position,
                    None => return false,
                };
                self.apply_edit(&TextEdit::delete(range.clone(), TextCursor::new(range.start)));
                true
            }
            Key::Delete => {
                let range = match cursor.selection_range() {
                    Some(range) => range,
                    None if position < len => position..position + 1,
                    None => return false,
                };
                self.apply_edit(&TextEdit::delete(range.clone(), TextCursor::new(range.start)));
                true
            }
            Key::ArrowLeft => {
                let target = if cursor.has_selection() && !extend {
                    cursor.selection_start()
                } else {
                    position.saturating_sub(1)
                };
                self.move_cursor(target, extend);
                true
            }
            Key::ArrowRight => {
                let target = if cursor.has_selection() && !extend {
                    cursor.selection_end()
                } else {
                    (position + 1).min(len)
                };
                self.move_cursor(target, extend);
                true
            }
            Key::ArrowUp => {
                let target = if line == 0 {
                    0
                } else {
                    coords::line_col_to_offset(document, line - 1, column)
                };
                self.move_cursor(target, extend);
                true
            }
            Key::ArrowDown => {
                let target = if line + 1 >= document.len_lines() {
                    len
                } else {
                    coords::line_col_to_offset(document, line + 1, column)
                };
                self.move_cursor(target, extend);
                true
            }
            Key::Home => {
                let target = coords::line_start(document, line);
                self.move_cursor(target, extend);
                true
            }
            Key::End => {
                let target = coords::line_end(document, line);
                self.move_cursor(target, extend);
                true
            }
            Key::Character | Key::Space if event.is_text_input() => {
                let text = event.text.clone();
                self.replace_selection(&text);
                true
            }
            _ => false,
        }
    }

    /// Bring derived state up to date after an event.
    fn finish_dispatch(&mut self) {
        let len = self.surface.document().len_chars();
        let cursor = self.surface.cursor();
        if cursor.clamped(len) != cursor {
            codeedit_warn!(position = cursor.position(), len, "clamping out-of-range cursor");
            self.surface.set_cursor(cursor.clamped(len));
        }

        let text_changed = self.revision != self.seen_revision;
        if text_changed {
            self.seen_revision = self.revision;
            self.highlighter.on_text_changed(self.surface.document());
            self.update_gutter_width();
        }

        let cursor = self.surface.cursor();
        self.completion
            .validate(self.surface.document(), cursor, self.popup.as_mut());
        self.update_extra_selection();

        let position = cursor.position();
        let cursor_moved = position != self.last_position;
        self.last_position = position;

        if text_changed || cursor_moved {
            self.request_full_gutter_update();
        }
        if text_changed {
            self.text_changed.emit(());
        }
        if cursor_moved {
            self.cursor_position_changed.emit(self.cursor_line_col());
        }
    }

    fn update_gutter_width(&mut self) {
        if self.gutter.update_width(&mut self.surface) {
            self.gutter_rect.size.width = self.gutter.width();
            self.request_full_gutter_update();
        }
    }

    fn request_full_gutter_update(&self) {
        let height = self.gutter_rect.height().max(self.surface.viewport().rect.height());
        self.gutter_update_requested
            .emit(Rect::new(0.0, 0.0, self.gutter.width(), height));
    }

    /// Rebuild the current-line and bracket decorations.
    fn update_extra_selection(&mut self) {
        let _span = PerfSpan::new(span_names::HIGHLIGHT);

        let document = self.surface.document();
        let position = self.surface.cursor().position().min(document.len_chars());

        let mut highlights = HighlightSet::new();
        highlights.push(ExtraSelection::line(
            position,
            HighlightKind::CurrentLine,
            self.formats.current_line,
        ));
        self.brackets
            .highlight(document, position, &self.formats.brackets, &mut highlights);

        self.surface.set_extra_selections(&highlights);
        self.highlights = highlights;
    }
}

/// Check if `outer` covers `inner` completely.
fn covers(outer: &Rect, inner: &Rect) -> bool {
    outer.left() <= inner.left()
        && outer.top() <= inner.top()
        && outer.right() >= inner.right()
        && outer.bottom() >= inner.bottom()
}

impl<S: TextSurface> std::fmt::Debug for CodeEditor<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CodeEditor")
            .field("config", &self.config)
            .field("style", &self.style.name())
            .field("gutter", &self.gutter)
            .field("completion", self.completion.state())
            .field("focused", &self.focused)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::completion::StringListModel;
    use crate::events::KeyboardModifiers;
    use crate::surface::PlainTextSurface;
    use parking_lot::Mutex;
    use std::sync::Arc;

    fn editor(text: &str) -> CodeEditor<PlainTextSurface> {
        CodeEditor::new(PlainTextSurface::new(text))
    }

    fn type_str(editor: &mut CodeEditor<PlainTextSurface>, text: &str) {
        for ch in text.chars() {
            editor.key_press_event(&KeyPressEvent::character(ch));
        }
    }

    #[test]
    fn test_plain_typing() {
        let mut editor = editor("");
        type_str(&mut editor, "abc");
        assert_eq!(editor.text(), "abc");
        assert_eq!(editor.cursor().position(), 3);
    }

    #[test]
    fn test_highlights_include_current_line() {
        let editor = editor("abc");
        assert_eq!(editor.highlights().of_kind(HighlightKind::CurrentLine).count(), 1);
        assert_eq!(editor.surface().extra_selections().len(), 1);
    }

    #[test]
    fn test_bracket_highlights_follow_cursor() {
        let mut editor = editor("f(x)");
        editor.set_cursor(TextCursor::new(1));
        assert_eq!(editor.highlights().of_kind(HighlightKind::MatchedBracket).count(), 2);

        editor.set_cursor(TextCursor::new(0));
        assert_eq!(editor.highlights().of_kind(HighlightKind::MatchedBracket).count(), 0);
    }

    #[test]
    fn test_signals() {
        let mut editor = editor("");
        let texts = Arc::new(Mutex::new(0));
        let positions = Arc::new(Mutex::new(Vec::new()));
        let texts_clone = texts.clone();
        let positions_clone = positions.clone();
        editor.text_changed.connect(move |_| *texts_clone.lock() += 1);
        editor
            .cursor_position_changed
            .connect(move |pos| positions_clone.lock().push(*pos));

        type_str(&mut editor, "a");
        editor.key_press_event(&KeyPressEvent::key(Key::Enter));
        editor.key_press_event(&KeyPressEvent::key(Key::ArrowUp));

        assert_eq!(*texts.lock(), 2);
        assert_eq!(*positions.lock(), vec![(0, 1), (1, 0), (0, 0)]);
    }

    #[test]
    fn test_arrow_movement_and_selection() {
        let mut editor = editor("ab\ncdef");
        editor.set_cursor(TextCursor::new(6));
        editor.key_press_event(&KeyPressEvent::key(Key::ArrowUp));
        assert_eq!(editor.cursor().position(), 2);

        editor.key_press_event(&KeyPressEvent::key_with(Key::End, KeyboardModifiers::SHIFT));
        editor.key_press_event(&KeyPressEvent::key_with(Key::Home, KeyboardModifiers::SHIFT));
        assert_eq!(editor.cursor().selection_range(), Some(0..2));

        editor.key_press_event(&KeyPressEvent::key(Key::ArrowRight));
        assert_eq!(editor.cursor(), TextCursor::new(2));
    }

    #[test]
    fn test_delete_keys() {
        let mut editor = editor("abc");
        editor.set_cursor(TextCursor::new(1));
        editor.key_press_event(&KeyPressEvent::key(Key::Delete));
        assert_eq!(editor.text(), "ac");
        editor.key_press_event(&KeyPressEvent::key(Key::Backspace));
        assert_eq!(editor.text(), "c");
        assert!(!editor.key_press_event(&KeyPressEvent::key(Key::Backspace)));
    }

    #[test]
    fn test_typing_replaces_selection() {
        let mut editor = editor("hello world");
        editor.set_cursor(TextCursor::with_selection(6, 11));
        type_str(&mut editor, "x");
        assert_eq!(editor.text(), "hello x");
    }

    #[test]
    fn test_shortcuts_are_not_inserted() {
        let mut editor = editor("");
        let handled = editor.key_press_event(&KeyPressEvent::new(Key::Character, KeyboardModifiers::CTRL, "s", false));
        assert!(!handled);
        assert_eq!(editor.text(), "");
    }

    #[test]
    fn test_config_setters() {
        let mut editor = editor("");
        editor.set_tab_replace_size(0);
        assert_eq!(editor.tab_replace_size(), 1);
        editor.set_auto_parentheses(false);
        type_str(&mut editor, "(");
        assert_eq!(editor.text(), "(");
    }

    #[test]
    fn test_focus_out_cancels_completion() {
        let mut editor = editor("").with_completer(StringListModel::from_iter(["print"]));
        editor.focus_in_event();
        type_str(&mut editor, "pr");
        assert!(editor.completion().is_composing());
        assert!(editor.completion_popup().is_visible());

        editor.handle_event(EditorEvent::FocusOut);
        assert!(!editor.completion().is_composing());
        assert!(!editor.completion_popup().is_visible());
        assert!(!editor.is_focused());
    }

    #[test]
    fn test_style_change_rereads_formats() {
        let mut editor = editor("x");
        let format = TextFormat::new().with_background(Color::BLACK);
        editor.set_syntax_style(SyntaxStyle::new("Dark").with_format(format_names::CURRENT_LINE, format));
        let line = editor.highlights().of_kind(HighlightKind::CurrentLine).next().unwrap();
        assert_eq!(line.format, format);
    }

    #[test]
    fn test_set_plain_text_resets_cursor() {
        let mut editor = editor("abc");
        editor.set_cursor(TextCursor::new(3));
        editor.set_plain_text("xy\nz");
        assert_eq!(editor.text(), "xy\nz");
        assert_eq!(editor.cursor().position(), 0);
    }
}
