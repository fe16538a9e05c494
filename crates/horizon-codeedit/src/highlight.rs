//! Decorations layered over the text.
//!
//! A [`HighlightSet`] is rebuilt from scratch whenever the cursor, the text or
//! the style changes, then handed to the surface in one call.

use std::ops::Range;

use horizon_codeedit_style::TextFormat;

/// What a decoration marks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HighlightKind {
    CurrentLine,
    MatchedBracket,
    MismatchedBracket,
}

/// A formatted range painted on top of the text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtraSelection {
    /// Character range; empty for full-width line decorations.
    pub range: Range<usize>,
    pub kind: HighlightKind,
    pub format: TextFormat,
    /// Paint across the whole width of the line containing `range.start`.
    pub full_width: bool,
}

impl ExtraSelection {
    /// A decoration over a character range.
    pub fn new(range: Range<usize>, kind: HighlightKind, format: TextFormat) -> Self {
        Self {
            range,
            kind,
            format,
            full_width: false,
        }
    }

    /// A zero-width, full-width decoration for the line containing `offset`.
    pub fn line(offset: usize, kind: HighlightKind, format: TextFormat) -> Self {
        Self {
            range: offset..offset,
            kind,
            format,
            full_width: true,
        }
    }

    fn overlaps(&self, other: &ExtraSelection) -> bool {
        !self.range.is_empty()
            && !other.range.is_empty()
            && self.range.start < other.range.end
            && other.range.start < self.range.end
    }
}

/// An ordered, non-overlapping list of decorations.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HighlightSet {
    selections: Vec<ExtraSelection>,
}

impl HighlightSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a decoration. Returns false and drops it if it overlaps one
    /// already present.
    pub fn push(&mut self, selection: ExtraSelection) -> bool {
        if self.selections.iter().any(|s| s.overlaps(&selection)) {
            horizon_codeedit_core::codeedit_trace!(
                range = ?selection.range,
                kind = ?selection.kind,
                "dropping overlapping highlight"
            );
            return false;
        }
        self.selections.push(selection);
        true
    }

    /// Iterate decorations in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, ExtraSelection> {
        self.selections.iter()
    }

    /// Decorations of one kind.
    pub fn of_kind(&self, kind: HighlightKind) -> impl Iterator<Item = &ExtraSelection> {
        self.selections.iter().filter(move |s| s.kind == kind)
    }

    pub fn as_slice(&self) -> &[ExtraSelection] {
        &self.selections
    }

    pub fn len(&self) -> usize {
        self.selections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selections.is_empty()
    }

    pub fn clear(&mut self) {
        self.selections.clear();
    }
}

impl<'a> IntoIterator for &'a HighlightSet {
    type Item = &'a ExtraSelection;
    type IntoIter = std::slice::Iter<'a, ExtraSelection>;

    fn into_iter(self) -> Self::IntoIter {
        self.selections.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlapping_ranges_rejected() {
        let mut set = HighlightSet::new();
        assert!(set.push(ExtraSelection::new(2..3, HighlightKind::MatchedBracket, TextFormat::new())));
        assert!(!set.push(ExtraSelection::new(2..3, HighlightKind::MismatchedBracket, TextFormat::new())));
        assert!(set.push(ExtraSelection::new(3..4, HighlightKind::MatchedBracket, TextFormat::new())));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_line_decoration_never_overlaps() {
        let mut set = HighlightSet::new();
        assert!(set.push(ExtraSelection::line(2, HighlightKind::CurrentLine, TextFormat::new())));
        assert!(set.push(ExtraSelection::new(2..3, HighlightKind::MatchedBracket, TextFormat::new())));
        assert_eq!(set.of_kind(HighlightKind::CurrentLine).count(), 1);
        assert!(set.iter().next().is_some_and(|s| s.full_width));
    }
}
