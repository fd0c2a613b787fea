//! Row selection bookkeeping.
//!
//! [`SelectionController`] stores selected ids only. Records are resolved
//! against whatever row slice the caller passes in, so the controller can never
//! hand out a record that is no longer in the view.

use crate::domain::Record;
use std::collections::BTreeSet;

/// State of a "select all" checkbox over a group of rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckState {
    /// Every row in the group is selected (and the group is non-empty).
    All,
    /// At least one, but not every, row is selected.
    Some,
    /// No row in the group is selected.
    None,
}

impl CheckState {
    /// Derives the state from a count of selected rows within a group.
    #[must_use]
    pub const fn from_counts(selected: usize, total: usize) -> Self {
        if selected == 0 || total == 0 {
            Self::None
        } else if selected >= total {
            Self::All
        } else {
            Self::Some
        }
    }

    /// Checkbox glyph used by the table header.
    #[must_use]
    pub const fn glyph(self) -> &'static str {
        match self {
            Self::All => "[x]",
            Self::Some => "[-]",
            Self::None => "[ ]",
        }
    }
}

/// Tracks which record ids are checked.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionController {
    selected: BTreeSet<String>,
}

impl SelectionController {
    /// Creates an empty selection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of selected ids.
    #[must_use]
    pub fn count(&self) -> usize {
        self.selected.len()
    }

    /// Whether nothing is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Whether `id` is selected.
    ///
    /// # Parameters
    ///
    /// * `id` - Record id as returned by [`Record::id`]
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.selected.contains(id)
    }

    /// Selected ids in sorted order.
    #[must_use]
    pub fn ids(&self) -> Vec<String> {
        self.selected.iter().cloned().collect()
    }

    /// Resolves the selection against `rows`, preserving row order.
    #[must_use]
    pub fn items<R: Record>(&self, rows: &[R]) -> Vec<R> {
        rows.iter()
            .filter(|r| self.selected.contains(r.id()))
            .cloned()
            .collect()
    }

    /// Empties the selection. Returns whether anything was removed.
    pub fn clear(&mut self) -> bool {
        let changed = !self.selected.is_empty();
        self.selected.clear();
        changed
    }

    /// Sets the flag for `id`.
    ///
    /// # Returns
    ///
    /// Whether the set changed. Selecting an id twice changes nothing.
    ///
    /// ```
    /// use shopdash::view::SelectionController;
    ///
    /// let mut selection = SelectionController::new();
    /// assert!(selection.set("7", true));
    /// assert!(!selection.set("7", true));
    /// assert!(selection.contains("7"));
    /// assert_eq!(selection.count(), 1);
    /// assert!(selection.set("7", false));
    /// assert!(selection.is_empty());
    /// ```
    pub fn set(&mut self, id: &str, selected: bool) -> bool {
        if selected {
            self.selected.insert(id.to_string())
        } else {
            self.selected.remove(id)
        }
    }

    /// Drops every id not accepted by `keep`. Returns whether anything was pruned.
    pub fn retain<F>(&mut self, mut keep: F) -> bool
    where
        F: FnMut(&str) -> bool,
    {
        let before = self.selected.len();
        self.selected.retain(|id| keep(id));
        before != self.selected.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_state_from_counts() {
        assert_eq!(CheckState::from_counts(0, 10), CheckState::None);
        assert_eq!(CheckState::from_counts(3, 10), CheckState::Some);
        assert_eq!(CheckState::from_counts(10, 10), CheckState::All);
        assert_eq!(CheckState::from_counts(0, 0), CheckState::None);
    }

    #[test]
    fn clear_always_empties() {
        let mut selection = SelectionController::new();
        for id in ["a", "b", "c"] {
            selection.set(id, true);
        }
        assert_eq!(selection.count(), 3);
        assert!(selection.clear());
        assert!(selection.is_empty());
        assert!(!selection.clear());
    }

    #[test]
    fn retain_prunes_missing_ids() {
        let mut selection = SelectionController::new();
        selection.set("keep", true);
        selection.set("drop", true);
        assert!(selection.retain(|id| id == "keep"));
        assert_eq!(selection.ids(), vec!["keep".to_string()]);
    }
}
