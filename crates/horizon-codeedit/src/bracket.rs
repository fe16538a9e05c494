//! Bracket matching.
//!
//! Looks at the characters at and before the cursor. An opener scans forward
//! and a closer scans backward, counting nesting of the same delimiter kind
//! until the depth returns to zero.

use ropey::Rope;

use horizon_codeedit_core::logging::{span_names, targets};
use horizon_codeedit_core::{Color, PerfSpan};
use horizon_codeedit_style::{SyntaxStyle, TextFormat, format_names};

use crate::coords::{char_at, char_before};
use crate::highlight::{ExtraSelection, HighlightKind, HighlightSet};

/// Delimiter pairs the matcher understands.
pub const BRACKET_PAIRS: [(char, char); 3] = [('(', ')'), ('[', ']'), ('{', '}')];

/// Outcome of matching around the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BracketMatch {
    /// Offsets of an opener and its closer.
    Matched { open: usize, close: usize },
    /// A delimiter at `at` without a partner.
    Unmatched { at: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Forward,
    Backward,
}

/// Formats for bracket highlights.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BracketFormats {
    pub matched: TextFormat,
    pub mismatched: TextFormat,
}

impl Default for BracketFormats {
    fn default() -> Self {
        Self {
            matched: TextFormat::new().with_foreground(Color::RED).bold(),
            mismatched: TextFormat::new().with_background(Color::RED),
        }
    }
}

impl BracketFormats {
    /// Resolve formats from a style, keeping defaults for what it lacks.
    pub fn from_style(style: &SyntaxStyle) -> Self {
        let defaults = Self::default();
        Self {
            matched: style
                .format(format_names::PARENTHESES)
                .copied()
                .unwrap_or(defaults.matched),
            mismatched: style
                .format(format_names::PARENTHESES_MISMATCH)
                .copied()
                .unwrap_or(defaults.mismatched),
        }
    }
}

/// Finds the partner of the delimiter next to the cursor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BracketMatcher {
    scan_limit: Option<usize>,
}

impl BracketMatcher {
    /// A matcher that scans to the document bounds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Give up after examining `limit` characters and report a mismatch.
    pub fn with_scan_limit(mut self, limit: usize) -> Self {
        self.scan_limit = Some(limit);
        self
    }

    pub fn scan_limit(&self) -> Option<usize> {
        self.scan_limit
    }

    /// Match the delimiter at or before `cursor`.
    ///
    /// Candidates are tried in order: an opener at the cursor, a closer before
    /// it, an opener before it, then a closer at it. Returns `None` when the
    /// cursor is not next to a delimiter.
    pub fn match_at(&self, document: &Rope, cursor: usize) -> Option<BracketMatch> {
        let cursor = cursor.min(document.len_chars());
        let at = char_at(document, cursor);
        let before = char_before(document, cursor);

        let candidates = [
            (at.and_then(opener_pair), cursor, Direction::Forward),
            (before.and_then(closer_pair), cursor.wrapping_sub(1), Direction::Backward),
            (before.and_then(opener_pair), cursor.wrapping_sub(1), Direction::Forward),
            (at.and_then(closer_pair), cursor, Direction::Backward),
        ];

        let (pair, offset, direction) = candidates
            .into_iter()
            .find_map(|(pair, offset, direction)| pair.map(|pair| (pair, offset, direction)))?;

        let _span = PerfSpan::new(span_names::BRACKET_SCAN);
        let partner = match direction {
            Direction::Forward => self.scan_forward(document, offset, pair),
            Direction::Backward => self.scan_backward(document, offset, pair),
        };

        let result = match partner {
            Some(partner) => match direction {
                Direction::Forward => BracketMatch::Matched {
                    open: offset,
                    close: partner,
                },
                Direction::Backward => BracketMatch::Matched {
                    open: partner,
                    close: offset,
                },
            },
            None => BracketMatch::Unmatched { at: offset },
        };
        tracing::trace!(target: targets::BRACKET, cursor, ?result, "bracket match");
        Some(result)
    }

    /// Push the highlights for the delimiter next to `cursor`.
    pub fn highlight(&self, document: &Rope, cursor: usize, formats: &BracketFormats, set: &mut HighlightSet) {
        match self.match_at(document, cursor) {
            Some(BracketMatch::Matched { open, close }) => {
                set.push(ExtraSelection::new(open..open + 1, HighlightKind::MatchedBracket, formats.matched));
                set.push(ExtraSelection::new(close..close + 1, HighlightKind::MatchedBracket, formats.matched));
            }
            Some(BracketMatch::Unmatched { at }) => {
                set.push(ExtraSelection::new(at..at + 1, HighlightKind::MismatchedBracket, formats.mismatched));
            }
            None => {}
        }
    }

    /// Scan forward from the opener at `from` for its closer.
    fn scan_forward(&self, document: &Rope, from: usize, (open, close): (char, char)) -> Option<usize> {
        let mut depth = 1usize;
        for (scanned, (offset, ch)) in (from + 1..).zip(document.chars_at(from + 1)).enumerate() {
            if self.limit_reached(scanned) {
                return None;
            }
            if ch == open {
                depth += 1;
            } else if ch == close {
                depth -= 1;
                if depth == 0 {
                    return Some(offset);
                }
            }
        }
        None
    }

    /// Scan backward from the closer at `from` for its opener.
    fn scan_backward(&self, document: &Rope, from: usize, (open, close): (char, char)) -> Option<usize> {
        let mut depth = 1usize;
        let mut chars = document.chars_at(from);
        let mut offset = from;
        let mut scanned = 0;
        while let Some(ch) = chars.prev() {
            offset -= 1;
            if self.limit_reached(scanned) {
                return None;
            }
            scanned += 1;
            if ch == close {
                depth += 1;
            } else if ch == open {
                depth -= 1;
                if depth == 0 {
                    return Some(offset);
                }
            }
        }
        None
    }

    fn limit_reached(&self, scanned: usize) -> bool {
        self.scan_limit.is_some_and(|limit| scanned >= limit)
    }
}

fn opener_pair(ch: char) -> Option<(char, char)> {
    BRACKET_PAIRS.into_iter().find(|&(open, _)| open == ch)
}

fn closer_pair(ch: char) -> Option<(char, char)> {
    BRACKET_PAIRS.into_iter().find(|&(_, close)| close == ch)
}
