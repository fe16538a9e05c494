//! Completion candidate sources.

use std::collections::VecDeque;
use std::sync::Arc;

use parking_lot::Mutex;

/// Case sensitivity for completion matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CaseSensitivity {
    /// Case-sensitive matching (e.g., "Pri" won't match "print").
    CaseSensitive,
    /// Case-insensitive matching (e.g., "Pri" will match "print").
    #[default]
    CaseInsensitive,
}

/// What the controller asks a provider for.
///
/// Deferred answers are delivered back with the request they answer, so a
/// result for a session that has since moved on can be recognized and
/// dropped.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CompletionRequest {
    /// The word fragment before the cursor.
    pub prefix: String,
    /// Offset where the prefix begins.
    pub start: usize,
    pub case_sensitivity: CaseSensitivity,
}

/// A provider's answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Candidates {
    /// Candidates in display order.
    Ready(Vec<String>),
    /// Candidates arrive later through
    /// [`CodeEditor::deliver_completions`](crate::CodeEditor::deliver_completions).
    Deferred,
}

/// Maps a prefix to completion candidates.
pub trait CompletionProvider {
    fn candidates(&self, request: &CompletionRequest) -> Candidates;
}

/// A provider backed by a fixed list of words.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StringListModel {
    items: Vec<String>,
}

impl StringListModel {
    /// Create a new string list model with the given items.
    pub fn new(items: Vec<String>) -> Self {
        Self { items }
    }

    /// Create an empty string list model.
    pub fn empty() -> Self {
        Self { items: Vec::new() }
    }

    /// Get a reference to the items.
    pub fn items(&self) -> &[String] {
        &self.items
    }

    /// Set the items.
    pub fn set_items(&mut self, items: Vec<String>) {
        self.items = items;
    }

    /// Add an item to the list.
    pub fn add_item(&mut self, item: impl Into<String>) {
        self.items.push(item.into());
    }

    /// Remove an item from the list by value.
    pub fn remove_item(&mut self, item: &str) {
        self.items.retain(|i| i != item);
    }

    /// Get completions matching the given prefix.
    pub fn completions(&self, prefix: &str, case_sensitivity: CaseSensitivity) -> Vec<String> {
        if prefix.is_empty() {
            return self.items.clone();
        }

        match case_sensitivity {
            CaseSensitivity::CaseSensitive => self
                .items
                .iter()
                .filter(|item| item.starts_with(prefix))
                .cloned()
                .collect(),
            CaseSensitivity::CaseInsensitive => {
                let prefix_lower = prefix.to_lowercase();
                self.items
                    .iter()
                    .filter(|item| item.to_lowercase().starts_with(&prefix_lower))
                    .cloned()
                    .collect()
            }
        }
    }
}

impl CompletionProvider for StringListModel {
    fn candidates(&self, request: &CompletionRequest) -> Candidates {
        Candidates::Ready(self.completions(&request.prefix, request.case_sensitivity))
    }
}

impl<S: Into<String>> FromIterator<S> for StringListModel {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter.into_iter().map(Into::into).collect())
    }
}

/// A provider that answers later.
///
/// Every request is queued; whoever computes candidates takes the queue from
/// a clone of this handle and delivers results to the editor.
#[derive(Debug, Clone, Default)]
pub struct QueuedProvider {
    pending: Arc<Mutex<VecDeque<CompletionRequest>>>,
}

impl QueuedProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove and return all queued requests, oldest first.
    pub fn take_pending(&self) -> Vec<CompletionRequest> {
        self.pending.lock().drain(..).collect()
    }

    /// The most recent request, leaving the queue empty.
    pub fn take_latest(&self) -> Option<CompletionRequest> {
        let mut pending = self.pending.lock();
        let latest = pending.pop_back();
        pending.clear();
        latest
    }

    pub fn pending_count(&self) -> usize {
        self.pending.lock().len()
    }
}

impl CompletionProvider for QueuedProvider {
    fn candidates(&self, request: &CompletionRequest) -> Candidates {
        self.pending.lock().push_back(request.clone());
        Candidates::Deferred
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(prefix: &str, case_sensitivity: CaseSensitivity) -> CompletionRequest {
        CompletionRequest {
            prefix: prefix.to_string(),
            start: 0,
            case_sensitivity,
        }
    }

    #[test]
    fn test_string_list_prefix_match() {
        let model: StringListModel = ["print", "println", "Printer", "panic"].into_iter().collect();
        assert_eq!(
            model.candidates(&request("pri", CaseSensitivity::CaseSensitive)),
            Candidates::Ready(vec!["print".to_string(), "println".to_string()])
        );
        assert_eq!(
            model.candidates(&request("pri", CaseSensitivity::CaseInsensitive)),
            Candidates::Ready(vec!["print".to_string(), "println".to_string(), "Printer".to_string()])
        );
    }

    #[test]
    fn test_string_list_empty_prefix_returns_all() {
        let mut model = StringListModel::empty();
        model.add_item("a");
        model.add_item("b");
        model.remove_item("a");
        assert_eq!(model.completions("", CaseSensitivity::CaseSensitive), vec!["b".to_string()]);
    }

    #[test]
    fn test_queued_provider() {
        let provider = QueuedProvider::new();
        let handle = provider.clone();
        assert_eq!(
            provider.candidates(&request("a", CaseSensitivity::CaseSensitive)),
            Candidates::Deferred
        );
        provider.candidates(&request("ab", CaseSensitivity::CaseSensitive));
        assert_eq!(handle.pending_count(), 2);

        let latest = handle.take_latest().unwrap();
        assert_eq!(latest.prefix, "ab");
        assert_eq!(handle.pending_count(), 0);
        assert!(handle.take_pending().is_empty());
    }
}
