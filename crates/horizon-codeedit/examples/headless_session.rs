//! Horizon CodeEdit Headless Session
//!
//! Drives an editor over the in-memory surface and prints what a host would
//! see: document text, gutter paint output and active highlights.
//!
//! Run with: RUST_LOG=horizon_codeedit=trace cargo run -p horizon-codeedit --example headless_session

use horizon_codeedit::{
    CodeEditor, EditorEvent, Key, KeyPressEvent, PaintEvent, PaintRecorder, PlainTextSurface, Rect,
    StringListModel,
};

fn type_text(editor: &mut CodeEditor<PlainTextSurface>, text: &str) {
    for ch in text.chars() {
        editor.key_press_event(&KeyPressEvent::character(ch));
    }
}

fn press(editor: &mut CodeEditor<PlainTextSurface>, key: Key) {
    editor.handle_event(EditorEvent::KeyPress(KeyPressEvent::key(key)));
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let surface = PlainTextSurface::new("").with_size(480.0, 160.0);
    let words: StringListModel = ["println", "print", "panic"].into_iter().collect();
    let mut editor = CodeEditor::new(surface).with_completer(words);

    editor.cursor_position_changed.connect(|(line, column)| {
        println!("cursor -> {}:{}", line + 1, column + 1);
    });

    type_text(&mut editor, "fn main() {");
    press(&mut editor, Key::Enter);
    type_text(&mut editor, "pri");
    press(&mut editor, Key::ArrowDown);
    press(&mut editor, Key::Enter);
    type_text(&mut editor, "(\"hi\");");

    println!("--- document ---");
    println!("{}", editor.text());

    let mut painter = PaintRecorder::new();
    let rect = Rect::new(0.0, 0.0, editor.gutter().width(), 160.0);
    editor.handle_event(EditorEvent::GutterPaint(PaintEvent::new(rect), &mut painter));
    println!("--- gutter ({}px) ---", editor.gutter().width());
    for number in painter.texts() {
        println!("{number:>3}");
    }

    println!("--- highlights ---");
    for selection in editor.highlights() {
        println!("{:?} {:?}", selection.kind, selection.range);
    }
}
