//! Completion controller.
//!
//! A small state machine tracking the word being typed:
//!
//! - **Idle**: no session.
//! - **Composing**: a [`CompletionSession`] holds the prefix and where it
//!   starts. Each word keystroke re-queries the provider.
//!
//! The controller sees every key twice. Before the key is dispatched it may
//! consume it for the popup (accept, cancel, navigate); after dispatch it
//! re-reads the prefix from the document.

mod popup;
mod provider;

pub use popup::{CompletionList, CompletionPopup};
pub use provider::{CaseSensitivity, Candidates, CompletionProvider, CompletionRequest, QueuedProvider, StringListModel};

use std::ops::Range;

use ropey::Rope;

use horizon_codeedit_core::Rect;
use horizon_codeedit_core::logging::targets;

use crate::cursor::TextCursor;
use crate::edit::TextEdit;
use crate::events::{Key, KeyPressEvent};

/// The word being completed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionSession {
    prefix: String,
    start: usize,
}

impl CompletionSession {
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Offset where the prefix begins; never past the cursor.
    pub fn start(&self) -> usize {
        self.start
    }

    fn answers(&self, request: &CompletionRequest) -> bool {
        self.prefix == request.prefix && self.start == request.start
    }
}

/// Controller state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CompletionState {
    #[default]
    Idle,
    Composing(CompletionSession),
}

/// What the controller did with a key before dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyOutcome {
    /// Dispatch the key normally.
    Ignored,
    /// The key was used by the popup.
    Consumed,
    /// The key accepted a candidate; apply the edit and stop.
    Accept(TextEdit),
}

/// Drives the completion popup from key input.
#[derive(Debug, Clone)]
pub struct CompletionController {
    state: CompletionState,
    case_sensitivity: CaseSensitivity,
    min_chars: usize,
}

impl Default for CompletionController {
    fn default() -> Self {
        Self::new()
    }
}

impl CompletionController {
    pub fn new() -> Self {
        Self {
            state: CompletionState::Idle,
            case_sensitivity: CaseSensitivity::default(),
            min_chars: 1,
        }
    }

    /// Set the minimum prefix length that opens a session.
    pub fn with_min_chars(mut self, min_chars: usize) -> Self {
        self.set_min_chars(min_chars);
        self
    }

    pub fn set_min_chars(&mut self, min_chars: usize) {
        self.min_chars = min_chars.max(1);
    }

    pub fn min_chars(&self) -> usize {
        self.min_chars
    }

    /// Set case sensitivity using builder pattern.
    pub fn with_case_sensitivity(mut self, case_sensitivity: CaseSensitivity) -> Self {
        self.case_sensitivity = case_sensitivity;
        self
    }

    pub fn set_case_sensitivity(&mut self, case_sensitivity: CaseSensitivity) {
        self.case_sensitivity = case_sensitivity;
    }

    pub fn case_sensitivity(&self) -> CaseSensitivity {
        self.case_sensitivity
    }

    pub fn state(&self) -> &CompletionState {
        &self.state
    }

    pub fn session(&self) -> Option<&CompletionSession> {
        match &self.state {
            CompletionState::Composing(session) => Some(session),
            CompletionState::Idle => None,
        }
    }

    pub fn is_composing(&self) -> bool {
        matches!(self.state, CompletionState::Composing(_))
    }

    /// Pre-dispatch handling while the popup is visible.
    pub fn handle_key_begin(
        &mut self,
        event: &KeyPressEvent,
        document: &Rope,
        cursor: TextCursor,
        popup: &mut dyn CompletionPopup,
    ) -> KeyOutcome {
        if !self.is_composing() || !popup.is_visible() {
            return KeyOutcome::Ignored;
        }

        match event.key {
            Key::Enter | Key::Tab if event.modifiers.is_empty() => match popup.current() {
                Some(completion) => KeyOutcome::Accept(self.accept(&completion, document, cursor, popup)),
                None => {
                    self.cancel(popup);
                    KeyOutcome::Ignored
                }
            },
            Key::Escape => {
                self.cancel(popup);
                KeyOutcome::Consumed
            }
            Key::ArrowUp => {
                popup.move_up();
                KeyOutcome::Consumed
            }
            Key::ArrowDown => {
                popup.move_down();
                KeyOutcome::Consumed
            }
            Key::PageUp => {
                popup.page_up();
                KeyOutcome::Consumed
            }
            Key::PageDown => {
                popup.page_down();
                KeyOutcome::Consumed
            }
            _ => KeyOutcome::Ignored,
        }
    }

    /// Post-dispatch prefix tracking.
    ///
    /// Word input (or Backspace/Delete inside a session) refreshes the prefix
    /// and queries `provider`; Ctrl+Space forces a query; anything else ends
    /// the session. Bare modifier presses change nothing.
    pub fn handle_key_end(
        &mut self,
        event: &KeyPressEvent,
        document: &Rope,
        cursor: TextCursor,
        anchor: Rect,
        provider: &dyn CompletionProvider,
        popup: &mut dyn CompletionPopup,
    ) {
        if event.key.is_modifier() && event.text.is_empty() {
            return;
        }

        let forced = event.key == Key::Space && event.modifiers.control;
        let word_input = event.is_text_input() && event.text.chars().all(is_word_char);
        let editing = self.is_composing() && matches!(event.key, Key::Backspace | Key::Delete);

        if forced || word_input || editing {
            self.refresh(document, cursor, forced, anchor, provider, popup);
        } else {
            self.cancel(popup);
        }
    }

    /// Splice `completion` over the prefix and end the session.
    ///
    /// Without a session the word before the cursor is replaced.
    pub fn accept(
        &mut self,
        completion: &str,
        document: &Rope,
        cursor: TextCursor,
        popup: &mut dyn CompletionPopup,
    ) -> TextEdit {
        let position = cursor.position().min(document.len_chars());
        let start = match &self.state {
            CompletionState::Composing(session) => session.start.min(position),
            CompletionState::Idle => word_start(document, position),
        };

        tracing::debug!(target: targets::COMPLETION, start, position, completion, "accepting completion");
        self.state = CompletionState::Idle;
        popup.hide();

        let end = start + completion.chars().count();
        TextEdit::replace(start..position, completion, TextCursor::new(end))
    }

    /// Show candidates that arrived for `request`.
    ///
    /// Returns false, discarding them, when the session that asked has ended
    /// or moved to a different prefix.
    pub fn deliver(
        &mut self,
        request: &CompletionRequest,
        candidates: Vec<String>,
        anchor: Rect,
        popup: &mut dyn CompletionPopup,
    ) -> bool {
        match self.session() {
            Some(session) if session.answers(request) => {
                present(candidates, anchor, popup);
                true
            }
            _ => {
                tracing::trace!(
                    target: targets::COMPLETION,
                    prefix = %request.prefix,
                    start = request.start,
                    "discarding stale completion result"
                );
                false
            }
        }
    }

    /// End the session and hide the popup. Safe to call in any state.
    pub fn cancel(&mut self, popup: &mut dyn CompletionPopup) {
        if self.is_composing() {
            tracing::trace!(target: targets::COMPLETION, "completion cancelled");
        }
        self.state = CompletionState::Idle;
        if popup.is_visible() {
            popup.hide();
        }
    }

    /// Cancel if the session no longer describes the text before the cursor.
    pub fn validate(&mut self, document: &Rope, cursor: TextCursor, popup: &mut dyn CompletionPopup) {
        let Some(session) = self.session() else {
            return;
        };
        let position = cursor.position();
        let valid = !cursor.has_selection()
            && session.start <= position
            && position <= document.len_chars()
            && document.slice(session.start..position).to_string() == session.prefix;
        if !valid {
            self.cancel(popup);
        }
    }

    fn refresh(
        &mut self,
        document: &Rope,
        cursor: TextCursor,
        forced: bool,
        anchor: Rect,
        provider: &dyn CompletionProvider,
        popup: &mut dyn CompletionPopup,
    ) {
        let position = cursor.position().min(document.len_chars());
        let start = word_start(document, position);
        let prefix = document.slice(start..position).to_string();

        if !forced && prefix.chars().count() < self.min_chars {
            self.cancel(popup);
            return;
        }

        let request = CompletionRequest {
            prefix: prefix.clone(),
            start,
            case_sensitivity: self.case_sensitivity,
        };
        tracing::trace!(target: targets::COMPLETION, prefix = %prefix, start, forced, "completion prefix");
        self.state = CompletionState::Composing(CompletionSession { prefix, start });

        match provider.candidates(&request) {
            Candidates::Ready(candidates) => present(candidates, anchor, popup),
            // A visible list answers an older prefix until the results arrive.
            Candidates::Deferred => popup.hide(),
        }
    }
}

fn present(candidates: Vec<String>, anchor: Rect, popup: &mut dyn CompletionPopup) {
    if candidates.is_empty() {
        popup.hide();
    } else {
        popup.show(candidates, anchor);
    }
}

/// Characters that make up a completable word.
pub fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_'
}

/// Start of the word ending at `offset`.
pub fn word_start(document: &Rope, offset: usize) -> usize {
    let offset = offset.min(document.len_chars());
    let mut chars = document.chars_at(offset);
    let mut start = offset;
    while let Some(ch) = chars.prev() {
        if !is_word_char(ch) {
            break;
        }
        start -= 1;
    }
    start
}

/// End of the word starting at `offset`.
pub fn word_end(document: &Rope, offset: usize) -> usize {
    let offset = offset.min(document.len_chars());
    offset + document.chars_at(offset).take_while(|&ch| is_word_char(ch)).count()
}

/// The word around `offset`.
pub fn word_range(document: &Rope, offset: usize) -> Range<usize> {
    word_start(document, offset)..word_end(document, offset)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ANCHOR: Rect = Rect::ZERO;

    fn provider() -> StringListModel {
        ["print", "println", "private", "let"].into_iter().collect()
    }

    /// Type `text` at the end of `doc`, running the end phase after each key.
    fn type_text(
        controller: &mut CompletionController,
        doc: &mut Rope,
        text: &str,
        popup: &mut CompletionList,
    ) {
        for ch in text.chars() {
            let at = doc.len_chars();
            doc.insert_char(at, ch);
            controller.handle_key_end(
                &KeyPressEvent::character(ch),
                doc,
                TextCursor::new(doc.len_chars()),
                ANCHOR,
                &provider(),
                popup,
            );
        }
    }

    #[test]
    fn test_word_boundaries() {
        let doc = Rope::from_str("let foo_bar2 = x;");
        assert_eq!(word_start(&doc, 12), 4);
        assert_eq!(word_end(&doc, 4), 12);
        assert_eq!(word_range(&doc, 7), 4..12);
        assert_eq!(word_start(&doc, 0), 0);
        assert_eq!(word_end(&doc, 17), 17);
    }

    #[test]
    fn test_typing_opens_session() {
        let mut controller = CompletionController::new();
        let mut popup = CompletionList::new();
        let mut doc = Rope::new();

        type_text(&mut controller, &mut doc, "pri", &mut popup);
        let session = controller.session().unwrap();
        assert_eq!(session.prefix(), "pri");
        assert_eq!(session.start(), 0);
        assert!(popup.is_visible());
        assert_eq!(popup.items(), ["print", "println", "private"]);
    }

    #[test]
    fn test_non_word_key_cancels() {
        let mut controller = CompletionController::new();
        let mut popup = CompletionList::new();
        let mut doc = Rope::new();

        type_text(&mut controller, &mut doc, "pri ", &mut popup);
        assert_eq!(controller.state(), &CompletionState::Idle);
        assert!(!popup.is_visible());
        assert_eq!(doc.to_string(), "pri ");
    }

    #[test]
    fn test_min_chars() {
        let mut controller = CompletionController::new().with_min_chars(3);
        let mut popup = CompletionList::new();
        let mut doc = Rope::new();

        type_text(&mut controller, &mut doc, "pr", &mut popup);
        assert!(!controller.is_composing());
        type_text(&mut controller, &mut doc, "i", &mut popup);
        assert!(controller.is_composing());
    }

    #[test]
    fn test_ctrl_space_forces_request() {
        let mut controller = CompletionController::new().with_min_chars(5);
        let mut popup = CompletionList::new();
        let doc = Rope::from_str("pr");
        let event = KeyPressEvent::new(Key::Space, crate::events::KeyboardModifiers::CTRL, " ", false);

        controller.handle_key_end(&event, &doc, TextCursor::new(2), ANCHOR, &provider(), &mut popup);
        assert_eq!(controller.session().map(|s| s.prefix()), Some("pr"));
        assert!(popup.is_visible());
    }

    #[test]
    fn test_bare_modifier_keeps_session() {
        let mut controller = CompletionController::new();
        let mut popup = CompletionList::new();
        let mut doc = Rope::new();
        type_text(&mut controller, &mut doc, "pr", &mut popup);

        controller.handle_key_end(
            &KeyPressEvent::key(Key::Shift),
            &doc,
            TextCursor::new(2),
            ANCHOR,
            &provider(),
            &mut popup,
        );
        assert!(controller.is_composing());
    }

    #[test]
    fn test_accept_replaces_prefix() {
        let mut controller = CompletionController::new();
        let mut popup = CompletionList::new();
        let mut doc = Rope::from_str("let x = 1;");
        type_text(&mut controller, &mut doc, "pri", &mut popup);
        assert_eq!(controller.session().map(|s| s.start()), Some(10));

        let edit = controller.accept("print", &doc, TextCursor::new(13), &mut popup);
        assert_eq!(edit.range, 10..13);
        assert_eq!(edit.text, "print");
        assert_eq!(edit.cursor.position(), 15);
        assert!(!controller.is_composing());
        assert!(!popup.is_visible());
    }

    #[test]
    fn test_enter_accepts_current() {
        let mut controller = CompletionController::new();
        let mut popup = CompletionList::new();
        let mut doc = Rope::new();
        type_text(&mut controller, &mut doc, "pri", &mut popup);
        popup.move_down();

        let outcome = controller.handle_key_begin(&KeyPressEvent::key(Key::Enter), &doc, TextCursor::new(3), &mut popup);
        match outcome {
            KeyOutcome::Accept(edit) => {
                assert_eq!(edit.range, 0..3);
                assert_eq!(edit.text, "println");
            }
            other => panic!("expected acceptance, got {other:?}"),
        }
    }

    #[test]
    fn test_escape_and_navigation_consumed() {
        let mut controller = CompletionController::new();
        let mut popup = CompletionList::new();
        let mut doc = Rope::new();
        type_text(&mut controller, &mut doc, "pri", &mut popup);

        let down = controller.handle_key_begin(&KeyPressEvent::key(Key::ArrowDown), &doc, TextCursor::new(3), &mut popup);
        assert_eq!(down, KeyOutcome::Consumed);
        assert_eq!(popup.selected_index(), Some(1));

        let escape = controller.handle_key_begin(&KeyPressEvent::key(Key::Escape), &doc, TextCursor::new(3), &mut popup);
        assert_eq!(escape, KeyOutcome::Consumed);
        assert!(!controller.is_composing());

        let again = controller.handle_key_begin(&KeyPressEvent::key(Key::Escape), &doc, TextCursor::new(3), &mut popup);
        assert_eq!(again, KeyOutcome::Ignored);
    }

    #[test]
    fn test_keys_pass_through_without_popup() {
        let mut controller = CompletionController::new();
        let mut popup = CompletionList::new();
        let doc = Rope::new();
        let outcome = controller.handle_key_begin(&KeyPressEvent::key(Key::Enter), &doc, TextCursor::new(0), &mut popup);
        assert_eq!(outcome, KeyOutcome::Ignored);
    }

    #[test]
    fn test_backspace_keeps_session_until_empty() {
        let mut controller = CompletionController::new();
        let mut popup = CompletionList::new();
        let mut doc = Rope::new();
        type_text(&mut controller, &mut doc, "pr", &mut popup);

        doc.remove(1..2);
        controller.handle_key_end(&KeyPressEvent::key(Key::Backspace), &doc, TextCursor::new(1), ANCHOR, &provider(), &mut popup);
        assert_eq!(controller.session().map(|s| s.prefix()), Some("p"));

        doc.remove(0..1);
        controller.handle_key_end(&KeyPressEvent::key(Key::Backspace), &doc, TextCursor::new(0), ANCHOR, &provider(), &mut popup);
        assert!(!controller.is_composing());
    }

    #[test]
    fn test_deferred_results() {
        let queued = QueuedProvider::new();
        let mut controller = CompletionController::new();
        let mut popup = CompletionList::new();
        let doc = Rope::from_str("pr");

        controller.handle_key_end(&KeyPressEvent::character('r'), &doc, TextCursor::new(2), ANCHOR, &queued, &mut popup);
        assert!(controller.is_composing());
        assert!(!popup.is_visible());

        let request = queued.take_latest().unwrap();
        let stale = CompletionRequest {
            prefix: "p".to_string(),
            ..request.clone()
        };
        assert!(!controller.deliver(&stale, vec!["print".into()], ANCHOR, &mut popup));
        assert!(!popup.is_visible());

        assert!(controller.deliver(&request, vec!["print".into()], ANCHOR, &mut popup));
        assert!(popup.is_visible());

        controller.cancel(&mut popup);
        assert!(!controller.deliver(&request, vec!["print".into()], ANCHOR, &mut popup));
    }

    #[test]
    fn test_deferred_refresh_hides_older_list() {
        let queued = QueuedProvider::new();
        let mut controller = CompletionController::new();
        let mut popup = CompletionList::new();
        let mut doc = Rope::from_str("pr");

        controller.handle_key_end(&KeyPressEvent::character('r'), &doc, TextCursor::new(2), ANCHOR, &queued, &mut popup);
        let request = queued.take_latest().unwrap();
        controller.deliver(&request, vec!["print".into(), "private".into()], ANCHOR, &mut popup);
        assert!(popup.is_visible());

        doc.insert(2, "i");
        controller.handle_key_end(&KeyPressEvent::character('i'), &doc, TextCursor::new(3), ANCHOR, &queued, &mut popup);
        assert_eq!(controller.session().map(|s| s.prefix()), Some("pri"));
        assert!(!popup.is_visible());

        let enter = KeyPressEvent::key(Key::Enter);
        assert!(matches!(
            controller.handle_key_begin(&enter, &doc, TextCursor::new(3), &mut popup),
            KeyOutcome::Ignored
        ));
    }

    #[test]
    fn test_validate_cancels_when_cursor_leaves() {
        let mut controller = CompletionController::new();
        let mut popup = CompletionList::new();
        let mut doc = Rope::from_str("x ");
        type_text(&mut controller, &mut doc, "pr", &mut popup);

        controller.validate(&doc, TextCursor::new(4), &mut popup);
        assert!(controller.is_composing());

        controller.validate(&doc, TextCursor::new(0), &mut popup);
        assert!(!controller.is_composing());
        assert!(!popup.is_visible());
    }

    #[test]
    fn test_accept_without_session_replaces_word() {
        let mut controller = CompletionController::new();
        let mut popup = CompletionList::new();
        let doc = Rope::from_str("a pri");
        let edit = controller.accept("print", &doc, TextCursor::new(5), &mut popup);
        assert_eq!(edit.range, 2..5);
        assert_eq!(edit.cursor.position(), 7);
    }
}
