// Property-based tests using proptest
// These tests generate random documents and key sequences and verify invariants

mod common;

use common::EditorHarness;
use horizon_codeedit::{
    BracketMatch, BracketMatcher, EditorEvent, Key, KeyboardModifiers, LineNumberArea, StringListModel, TextSurface,
};
use proptest::prelude::*;
use ropey::Rope;

/// Documents whose delimiters are all balanced.
fn balanced_strategy() -> impl Strategy<Value = String> {
    let leaf = "[a-z ]{0,3}";
    leaf.prop_recursive(4, 32, 4, |inner| {
        prop_oneof![
            inner.clone().prop_map(|s| format!("({s})")),
            inner.clone().prop_map(|s| format!("[{s}]")),
            inner.clone().prop_map(|s| format!("{{{s}}}")),
            prop::collection::vec(inner, 1..4).prop_map(|parts| parts.concat()),
        ]
    })
}

/// Partner of every opener, computed with a stack.
fn partners(text: &str) -> Vec<(usize, usize)> {
    let mut stack = Vec::new();
    let mut pairs = Vec::new();
    for (i, ch) in text.chars().enumerate() {
        match ch {
            '(' | '[' | '{' => stack.push(i),
            ')' | ']' | '}' => {
                if let Some(open) = stack.pop() {
                    pairs.push((open, i));
                }
            }
            _ => {}
        }
    }
    pairs
}

/// Random key presses
#[derive(Debug, Clone)]
enum EditOp {
    Type(char),
    Key(Key),
    BackTab,
    Select(usize, usize),
    Undo,
}

impl EditOp {
    fn apply(&self, harness: &mut EditorHarness) {
        match self {
            Self::Type(ch) => harness.type_text(&ch.to_string()),
            Self::Key(key) => {
                harness.press(*key);
            }
            Self::BackTab => {
                harness.press_with(Key::Tab, KeyboardModifiers::SHIFT);
            }
            Self::Select(anchor, position) => {
                let len = harness.text().chars().count();
                harness.select((*anchor).min(len), (*position).min(len));
            }
            Self::Undo => {
                if harness.editor.surface_mut().undo() {
                    harness.editor.handle_event(EditorEvent::TextChanged);
                }
            }
        }
    }
}

fn edit_op_strategy() -> impl Strategy<Value = EditOp> {
    prop_oneof![
        // Typing operations (more common)
        4 => prop::sample::select(vec!['a', 'b', 'x', ' ', '(', ')', '[', ']', '{', '}', '"', '\''])
            .prop_map(EditOp::Type),
        // Editing operations
        2 => Just(EditOp::Key(Key::Enter)),
        2 => Just(EditOp::Key(Key::Backspace)),
        1 => Just(EditOp::Key(Key::Delete)),
        1 => Just(EditOp::Key(Key::Tab)),
        1 => Just(EditOp::BackTab),
        // Navigation operations
        1 => Just(EditOp::Key(Key::ArrowLeft)),
        1 => Just(EditOp::Key(Key::ArrowRight)),
        1 => Just(EditOp::Key(Key::ArrowUp)),
        1 => Just(EditOp::Key(Key::ArrowDown)),
        1 => Just(EditOp::Key(Key::Home)),
        1 => Just(EditOp::Key(Key::End)),
        1 => (0usize..40, 0usize..40).prop_map(|(a, p)| EditOp::Select(a, p)),
        1 => Just(EditOp::Undo),
    ]
}

proptest! {
    #[test]
    fn prop_openers_match_their_partner(text in balanced_strategy()) {
        let document = Rope::from_str(&text);
        let matcher = BracketMatcher::new();
        for (open, close) in partners(&text) {
            prop_assert_eq!(
                matcher.match_at(&document, open),
                Some(BracketMatch::Matched { open, close })
            );
        }
    }

    #[test]
    fn prop_closer_before_cursor_matches_backward(text in balanced_strategy()) {
        let document = Rope::from_str(&text);
        let matcher = BracketMatcher::new();
        let chars: Vec<char> = text.chars().collect();
        for (open, close) in partners(&text) {
            let next_is_opener = matches!(chars.get(close + 1), Some('(' | '[' | '{'));
            if !next_is_opener {
                prop_assert_eq!(
                    matcher.match_at(&document, close + 1),
                    Some(BracketMatch::Matched { open, close })
                );
            }
        }
    }

    #[test]
    fn prop_typed_pair_then_closer_steps_over(
        prefix in "[a-z ]{0,8}",
        pair in prop::sample::select(vec![('(', ')'), ('[', ']'), ('{', '}')]),
    ) {
        let mut h = EditorHarness::new(&prefix);
        h.type_text(&pair.0.to_string());
        prop_assert_eq!(h.rendered(), format!("{prefix}{}|{}", pair.0, pair.1));

        h.type_text(&pair.1.to_string());
        prop_assert_eq!(h.rendered(), format!("{prefix}{}{}|", pair.0, pair.1));
    }

    #[test]
    fn prop_tab_reaches_next_stop(line in "[a-z ]{0,12}", width in 1usize..9) {
        let mut h = EditorHarness::new(&line);
        h.editor.set_tab_replace_size(width);

        let before = h.position();
        h.press(Key::Tab);
        let inserted = h.position() - before;

        prop_assert!(inserted >= 1 && inserted <= width);
        prop_assert_eq!(h.position() % width, 0);
        prop_assert_eq!(h.text(), format!("{line}{}", " ".repeat(inserted)));
    }

    #[test]
    fn prop_newline_keeps_indentation(indent in " {0,8}", word in "[a-z]{1,6}") {
        let mut h = EditorHarness::new(&format!("{indent}{word}"));
        h.press(Key::Enter);
        prop_assert_eq!(h.rendered(), format!("{indent}{word}\n{indent}|"));
    }

    #[test]
    fn prop_gutter_width_grows_with_digits(lines in 1usize..200_000) {
        let gutter = LineNumberArea::default();
        let here = gutter.width_for(lines);
        let next = gutter.width_for(lines + 1);
        prop_assert!(next >= here);
        if (lines + 1).to_string().len() > lines.to_string().len() {
            prop_assert!(next > here);
        }
    }

    #[test]
    fn prop_accept_replaces_prefix(lead in "[a-z]{0,4} ", word in "[a-z]{1,5}") {
        let completion = format!("{word}_tail");
        let model: StringListModel = [completion.clone()].into_iter().collect();
        let mut h = EditorHarness::new(&lead).with_completer(model);

        h.type_text(&word);
        prop_assert!(h.editor.completion_popup().is_visible());
        h.press(Key::Enter);

        prop_assert_eq!(h.rendered(), format!("{lead}{completion}|"));
    }

    #[test]
    fn prop_random_keys_keep_editor_consistent(
        ops in prop::collection::vec(edit_op_strategy(), 1..60)
    ) {
        let mut h = EditorHarness::new("fn main() {\n    body\n}");
        for op in &ops {
            op.apply(&mut h);

            let len = h.text().chars().count();
            prop_assert!(h.position() <= len);
            prop_assert!(h.editor.cursor().anchor() <= len);
            prop_assert_eq!(h.editor.surface().left_margin(), h.editor.gutter().width());

            let lines = h.editor.surface().document().len_lines();
            prop_assert_eq!(h.editor.gutter().width(), h.editor.gutter().width_for(lines));

            let ranges: Vec<_> = h.editor.highlights().iter()
                .map(|selection| selection.range.clone())
                .filter(|range| !range.is_empty())
                .collect();
            for (i, a) in ranges.iter().enumerate() {
                for b in &ranges[i + 1..] {
                    prop_assert!(a.end <= b.start || b.end <= a.start);
                }
            }
        }
    }
}
