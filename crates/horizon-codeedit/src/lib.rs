//! Horizon CodeEdit - the editing core of a source-code widget.
//!
//! This is the main crate. It layers four behaviors over a host text surface:
//!
//! - **Gutter**: line numbers kept in sync with the document and viewport
//! - **Bracket matching**: highlights the partner of the delimiter at the cursor
//! - **Completion**: prefix tracking, popup driving and completion splicing
//! - **Smart indentation**: auto-indent, tab expansion and auto-pairing
//!
//! The host supplies a [`TextSurface`]; [`PlainTextSurface`] is a headless one.
//!
//! # Example
//!
//! ```
//! use horizon_codeedit::{CodeEditor, Key, KeyPressEvent, PlainTextSurface};
//!
//! let mut editor = CodeEditor::new(PlainTextSurface::new("    if ok {"));
//! editor.key_press_event(&KeyPressEvent::key(Key::End));
//! editor.key_press_event(&KeyPressEvent::key(Key::Enter));
//! assert_eq!(editor.text(), "    if ok {\n    ");
//! ```

pub use horizon_codeedit_core::*;

/// Text formats and style schemes.
pub mod style {
    pub use horizon_codeedit_style::*;
}

pub mod bracket;
pub mod completion;
mod config;
pub mod coords;
mod cursor;
mod edit;
mod editor;
mod error;
mod events;
pub mod gutter;
mod highlight;
mod highlighter;
pub mod indent;
mod painter;
mod surface;

pub use bracket::{BracketFormats, BracketMatch, BracketMatcher};
pub use completion::{
    CaseSensitivity, Candidates, CompletionController, CompletionList, CompletionPopup, CompletionProvider,
    CompletionRequest, CompletionSession, CompletionState, QueuedProvider, StringListModel,
};
pub use config::{DEFAULT_TAB_REPLACE_SIZE, EditorConfig};
pub use coords::CoordinateAdapter;
pub use cursor::TextCursor;
pub use edit::TextEdit;
pub use editor::CodeEditor;
pub use error::{ConfigError, Result};
pub use events::{
    EditorEvent, Key, KeyPressEvent, KeyboardModifiers, PaintEvent, ResizeEvent, UpdateRequest,
};
pub use gutter::{GutterConfig, GutterFormats, LineNumberArea};
pub use highlight::{ExtraSelection, HighlightKind, HighlightSet};
pub use highlighter::{PlainHighlighter, SyntaxHighlighter};
pub use indent::IndentationEngine;
pub use painter::{PaintCommand, PaintRecorder, Painter, TextAlign};
pub use surface::{PlainTextSurface, TextSurface, Viewport};
