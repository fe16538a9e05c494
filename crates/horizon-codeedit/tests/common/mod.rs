// Shared helpers for driving a CodeEditor over a PlainTextSurface.
#![allow(dead_code)]

use horizon_codeedit::{
    CodeEditor, CompletionProvider, Key, KeyPressEvent, KeyboardModifiers, PlainTextSurface, TextCursor,
};

/// Marker for the cursor position in fixtures.
pub const CURSOR: char = '|';

/// Install a test-friendly subscriber once. Honors `RUST_LOG`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub struct EditorHarness {
    pub editor: CodeEditor<PlainTextSurface>,
}

impl EditorHarness {
    /// Create a harness from a fixture; a `|` marks the cursor, defaulting
    /// to the end of the text.
    pub fn new(fixture: &str) -> Self {
        init_tracing();
        let (text, position) = split_fixture(fixture);
        let surface = PlainTextSurface::new(&text)
            .with_line_height(10.0)
            .with_size(400.0, 100.0);
        let mut editor = CodeEditor::new(surface);
        editor.set_cursor(TextCursor::new(position));
        Self { editor }
    }

    pub fn with_completer(mut self, provider: impl CompletionProvider + 'static) -> Self {
        self.editor.set_completer(Some(Box::new(provider)));
        self
    }

    pub fn type_text(&mut self, text: &str) {
        for ch in text.chars() {
            self.editor.key_press_event(&KeyPressEvent::character(ch));
        }
    }

    pub fn press(&mut self, key: Key) -> bool {
        self.editor.key_press_event(&KeyPressEvent::key(key))
    }

    pub fn press_with(&mut self, key: Key, modifiers: KeyboardModifiers) -> bool {
        self.editor.key_press_event(&KeyPressEvent::key_with(key, modifiers))
    }

    pub fn select(&mut self, anchor: usize, position: usize) {
        self.editor.set_cursor(TextCursor::with_selection(anchor, position));
    }

    pub fn text(&self) -> String {
        self.editor.text()
    }

    pub fn position(&self) -> usize {
        self.editor.cursor().position()
    }

    /// The text with `|` inserted at the cursor.
    pub fn rendered(&self) -> String {
        let mut chars: Vec<char> = self.text().chars().collect();
        chars.insert(self.position(), CURSOR);
        chars.into_iter().collect()
    }
}

fn split_fixture(fixture: &str) -> (String, usize) {
    match fixture.chars().position(|c| c == CURSOR) {
        Some(position) => (fixture.chars().filter(|&c| c != CURSOR).collect(), position),
        None => (fixture.to_string(), fixture.chars().count()),
    }
}
