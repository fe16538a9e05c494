//! Syntax highlighter integration.
//!
//! The editing core does not tokenize. It only asks the host's highlighter
//! whether an offset sits inside a string or comment, to suppress
//! auto-pairing there.

use ropey::Rope;

/// Hooks the editor calls on the host's syntax highlighter.
pub trait SyntaxHighlighter {
    /// The document changed; re-highlight as needed.
    fn on_text_changed(&mut self, _document: &Rope) {}

    /// Check if `offset` lies inside a string literal or comment.
    fn is_in_string_or_comment(&self, _document: &Rope, _offset: usize) -> bool {
        false
    }
}

/// A highlighter that classifies nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainHighlighter;

impl SyntaxHighlighter for PlainHighlighter {}
