//! Input and notification events routed through the editor.
//!
//! The host translates its native events into these types and hands them to
//! [`CodeEditor::handle_event`](crate::CodeEditor::handle_event).

use horizon_codeedit_core::{Rect, Size};

use crate::painter::Painter;

/// Keyboard modifier state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct KeyboardModifiers {
    /// The Shift key is held.
    pub shift: bool,
    /// The Control key is held (Cmd on macOS).
    pub control: bool,
    /// The Alt key is held (Option on macOS).
    pub alt: bool,
    /// The Meta/Super key is held.
    pub meta: bool,
}

impl KeyboardModifiers {
    /// No modifiers pressed.
    pub const NONE: Self = Self {
        shift: false,
        control: false,
        alt: false,
        meta: false,
    };

    /// Shift modifier only.
    pub const SHIFT: Self = Self {
        shift: true,
        control: false,
        alt: false,
        meta: false,
    };

    /// Control modifier only.
    pub const CTRL: Self = Self {
        shift: false,
        control: true,
        alt: false,
        meta: false,
    };

    /// Alt modifier only.
    pub const ALT: Self = Self {
        shift: false,
        control: false,
        alt: true,
        meta: false,
    };

    /// Check if no modifiers are pressed.
    pub fn is_empty(&self) -> bool {
        !self.shift && !self.control && !self.alt && !self.meta
    }

    /// Check if a modifier that turns keys into shortcuts is held.
    pub fn is_command(&self) -> bool {
        self.control || self.alt || self.meta
    }
}

/// Keys the editing core reacts to.
///
/// Printable input arrives as [`Key::Character`] with the typed text in
/// [`KeyPressEvent::text`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Any key producing printable text other than space.
    Character,
    Space,

    // Editing
    Enter,
    Tab,
    Backspace,
    Delete,
    Escape,

    // Navigation
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Home,
    End,
    PageUp,
    PageDown,

    // Modifiers pressed on their own
    Shift,
    Control,
    Alt,
    Meta,

    /// A key the editor has no binding for.
    Unknown,
}

impl Key {
    /// Check if this is a bare modifier key.
    pub fn is_modifier(&self) -> bool {
        matches!(self, Key::Shift | Key::Control | Key::Alt | Key::Meta)
    }
}

/// Key press event, sent when a key is pressed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPressEvent {
    /// The key that was pressed.
    pub key: Key,
    /// Keyboard modifiers held during the event.
    pub modifiers: KeyboardModifiers,
    /// The text input from this key press (if any).
    ///
    /// For non-printable keys this is empty.
    pub text: String,
    /// Whether this is a key repeat event (key held down).
    pub is_repeat: bool,
}

impl KeyPressEvent {
    /// Create a new key press event.
    pub fn new(key: Key, modifiers: KeyboardModifiers, text: impl Into<String>, is_repeat: bool) -> Self {
        Self {
            key,
            modifiers,
            text: text.into(),
            is_repeat,
        }
    }

    /// A press of a non-printable key.
    pub fn key(key: Key) -> Self {
        Self::new(key, KeyboardModifiers::NONE, String::new(), false)
    }

    /// A press of a non-printable key with modifiers.
    pub fn key_with(key: Key, modifiers: KeyboardModifiers) -> Self {
        Self::new(key, modifiers, String::new(), false)
    }

    /// A press producing a single character.
    pub fn character(ch: char) -> Self {
        let key = if ch == ' ' { Key::Space } else { Key::Character };
        Self::new(key, KeyboardModifiers::NONE, ch.to_string(), false)
    }

    /// The typed character, when the press produced exactly one printable one.
    pub fn typed_char(&self) -> Option<char> {
        let mut chars = self.text.chars();
        match (chars.next(), chars.next()) {
            (Some(ch), None) if !ch.is_control() => Some(ch),
            _ => None,
        }
    }

    /// Check if the press inserts text rather than acting as a shortcut.
    pub fn is_text_input(&self) -> bool {
        !self.text.is_empty()
            && !self.modifiers.is_command()
            && !self.text.chars().any(char::is_control)
    }
}

/// Request to repaint part of the gutter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaintEvent {
    /// Region to repaint, in gutter coordinates.
    pub rect: Rect,
}

impl PaintEvent {
    /// Create a new paint event.
    pub fn new(rect: Rect) -> Self {
        Self { rect }
    }
}

/// The editor's contents area changed size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizeEvent {
    /// Area available to the gutter and the text viewport.
    pub contents_rect: Rect,
    /// Previous size.
    pub old_size: Size,
}

impl ResizeEvent {
    /// Create a new resize event.
    pub fn new(contents_rect: Rect, old_size: Size) -> Self {
        Self {
            contents_rect,
            old_size,
        }
    }
}

/// The viewport repainted or scrolled.
///
/// `dy` is the vertical scroll delta in pixels; zero means a repaint of
/// `rect` without scrolling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UpdateRequest {
    pub rect: Rect,
    pub dy: f32,
}

impl UpdateRequest {
    /// Create a new update request.
    pub fn new(rect: Rect, dy: f32) -> Self {
        Self { rect, dy }
    }
}

/// Everything the editor orchestrator dispatches.
pub enum EditorEvent<'a> {
    KeyPress(KeyPressEvent),
    /// Paint the gutter into the given painter.
    GutterPaint(PaintEvent, &'a mut dyn Painter),
    Resize(ResizeEvent),
    Update(UpdateRequest),
    FocusIn,
    FocusOut,
    /// The cursor moved by means other than a key press (mouse, API).
    CursorMoved,
    /// The document changed outside the editor (paste, programmatic edits).
    TextChanged,
    /// The completion popup was dismissed by the host.
    PopupClosed,
    /// An entry was chosen directly in the completion popup.
    PopupActivated,
    /// The syntax style was replaced or modified in place.
    StyleChanged,
}

impl std::fmt::Debug for EditorEvent<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::KeyPress(event) => f.debug_tuple("KeyPress").field(event).finish(),
            Self::GutterPaint(event, _) => f.debug_tuple("GutterPaint").field(event).finish(),
            Self::Resize(event) => f.debug_tuple("Resize").field(event).finish(),
            Self::Update(request) => f.debug_tuple("Update").field(request).finish(),
            Self::FocusIn => f.write_str("FocusIn"),
            Self::FocusOut => f.write_str("FocusOut"),
            Self::CursorMoved => f.write_str("CursorMoved"),
            Self::TextChanged => f.write_str("TextChanged"),
            Self::PopupClosed => f.write_str("PopupClosed"),
            Self::PopupActivated => f.write_str("PopupActivated"),
            Self::StyleChanged => f.write_str("StyleChanged"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_character_event() {
        let event = KeyPressEvent::character('x');
        assert_eq!(event.key, Key::Character);
        assert_eq!(event.typed_char(), Some('x'));
        assert!(event.is_text_input());

        assert_eq!(KeyPressEvent::character(' ').key, Key::Space);
    }

    #[test]
    fn test_shortcut_is_not_text_input() {
        let event = KeyPressEvent::new(Key::Space, KeyboardModifiers::CTRL, " ", false);
        assert!(!event.is_text_input());
    }

    #[test]
    fn test_control_text_is_not_typed() {
        let event = KeyPressEvent::new(Key::Enter, KeyboardModifiers::NONE, "\r", false);
        assert_eq!(event.typed_char(), None);
        assert!(!event.is_text_input());
    }

    #[test]
    fn test_modifier_keys() {
        assert!(Key::Shift.is_modifier());
        assert!(!Key::Tab.is_modifier());
        assert!(KeyboardModifiers::NONE.is_empty());
        assert!(!KeyboardModifiers::SHIFT.is_command());
        assert!(KeyboardModifiers::ALT.is_command());
    }
}
