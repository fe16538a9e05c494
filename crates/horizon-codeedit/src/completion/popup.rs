//! Completion popup.

use horizon_codeedit_core::{Rect, Signal};

/// The list widget showing candidates.
///
/// The controller shows, hides and navigates it. An entry picked directly in
/// the list (a click) is held until the editor collects it with
/// [`take_activated`](CompletionPopup::take_activated) on its next event.
pub trait CompletionPopup {
    /// Show `candidates` near `anchor`, selecting the first.
    fn show(&mut self, candidates: Vec<String>, anchor: Rect);
    fn hide(&mut self);
    fn is_visible(&self) -> bool;
    /// The selected candidate.
    fn current(&self) -> Option<String>;
    fn move_up(&mut self);
    fn move_down(&mut self);
    fn page_up(&mut self);
    fn page_down(&mut self);
    /// Choose the selected candidate and hide.
    fn activate_current(&mut self) -> Option<String>;
    /// The candidate chosen since the last call, if any.
    fn take_activated(&mut self) -> Option<String>;
}

/// Popup list state without any rendering.
pub struct CompletionList {
    visible: bool,
    items: Vec<String>,
    selected: Option<usize>,
    scroll_offset: usize,
    max_visible_items: usize,
    anchor: Rect,
    chosen: Option<String>,

    /// Emitted with the chosen candidate.
    pub activated: Signal<String>,
    /// Emitted when the selection moves.
    pub highlighted: Signal<String>,
}

impl Default for CompletionList {
    fn default() -> Self {
        Self::new()
    }
}

impl CompletionList {
    pub fn new() -> Self {
        Self {
            visible: false,
            items: Vec::new(),
            selected: None,
            scroll_offset: 0,
            max_visible_items: 7,
            anchor: Rect::ZERO,
            chosen: None,
            activated: Signal::new(),
            highlighted: Signal::new(),
        }
    }

    /// Set how many rows the list shows at once.
    pub fn with_max_visible_items(mut self, count: usize) -> Self {
        self.max_visible_items = count.max(1);
        self
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    /// Where the list was last anchored.
    pub fn anchor(&self) -> Rect {
        self.anchor
    }

    /// Calculate the visible range of items.
    pub fn visible_range(&self) -> std::ops::Range<usize> {
        let start = self.scroll_offset;
        let end = (start + self.max_visible_items).min(self.items.len());
        start..end
    }

    /// Choose the item at `index`, emit `activated` and hide.
    pub fn activate(&mut self, index: usize) -> Option<String> {
        let item = self.items.get(index).cloned()?;
        self.hide();
        self.chosen = Some(item.clone());
        self.activated.emit(item.clone());
        Some(item)
    }

    fn select(&mut self, index: usize) {
        self.selected = Some(index);
        self.ensure_selected_visible();
        if let Some(item) = self.items.get(index) {
            self.highlighted.emit(item.clone());
        }
    }

    /// Ensure the selected item is visible (scroll if needed).
    fn ensure_selected_visible(&mut self) {
        let Some(index) = self.selected else {
            return;
        };
        if index < self.scroll_offset {
            self.scroll_offset = index;
        } else if index >= self.scroll_offset + self.max_visible_items {
            self.scroll_offset = index + 1 - self.max_visible_items;
        }
    }

    fn can_navigate(&self) -> bool {
        self.visible && !self.items.is_empty()
    }
}

impl CompletionPopup for CompletionList {
    fn show(&mut self, candidates: Vec<String>, anchor: Rect) {
        self.visible = !candidates.is_empty();
        self.selected = self.visible.then_some(0);
        self.items = candidates;
        self.scroll_offset = 0;
        self.anchor = anchor;
    }

    fn hide(&mut self) {
        self.visible = false;
        self.selected = None;
        self.scroll_offset = 0;
    }

    fn is_visible(&self) -> bool {
        self.visible
    }

    fn current(&self) -> Option<String> {
        self.selected.and_then(|index| self.items.get(index).cloned())
    }

    fn move_up(&mut self) {
        if !self.can_navigate() {
            return;
        }
        // Wrap to bottom
        let index = match self.selected {
            Some(index) if index > 0 => index - 1,
            _ => self.items.len() - 1,
        };
        self.select(index);
    }

    fn move_down(&mut self) {
        if !self.can_navigate() {
            return;
        }
        // Wrap to top
        let index = match self.selected {
            Some(index) if index + 1 < self.items.len() => index + 1,
            _ => 0,
        };
        self.select(index);
    }

    fn page_up(&mut self) {
        if !self.can_navigate() {
            return;
        }
        let index = self.selected.unwrap_or(0).saturating_sub(self.max_visible_items);
        self.select(index);
    }

    fn page_down(&mut self) {
        if !self.can_navigate() {
            return;
        }
        let last = self.items.len() - 1;
        let index = (self.selected.unwrap_or(0) + self.max_visible_items).min(last);
        self.select(index);
    }

    fn activate_current(&mut self) -> Option<String> {
        self.selected.and_then(|index| self.activate(index))
    }

    fn take_activated(&mut self) -> Option<String> {
        self.chosen.take()
    }
}

impl std::fmt::Debug for CompletionList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompletionList")
            .field("visible", &self.visible)
            .field("items", &self.items)
            .field("selected", &self.selected)
            .finish_non_exhaustive()
    }
}
