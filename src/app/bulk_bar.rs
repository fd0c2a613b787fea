//! Bulk action bar: the confirm-then-delete lifecycle over a selection.
//!
//! ```text
//! Hidden ──count>0──▶ Visible ──d──▶ ConfirmPending ──y──▶ Deleting ──ok──▶ Hidden
//!   ▲                  │  ▲                │                   │
//!   └────count=0/c─────┘  └──────n─────────┘                   │
//!                         ▲──────────────────failed────────────┘
//! ```

use crate::domain::EntityKind;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum BulkBarState {
    #[default]
    Hidden,
    /// Selection is non-empty.
    Visible { count: usize },
    /// The confirm dialog is open for these ids.
    ConfirmPending { ids: Vec<String> },
    /// Delete was confirmed and is in flight.
    Deleting { ids: Vec<String> },
}

/// Title and body of the delete confirmation dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmPrompt {
    pub title: String,
    pub body: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BulkActionBar {
    state: BulkBarState,
}

impl BulkActionBar {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current lifecycle state.
    #[must_use]
    pub const fn state(&self) -> &BulkBarState {
        &self.state
    }

    /// Whether the bar is shown: rows are selected or a delete is under way.
    #[must_use]
    pub const fn is_visible(&self) -> bool {
        !matches!(self.state, BulkBarState::Hidden)
    }

    /// Whether the delete confirmation dialog is open.
    #[must_use]
    pub const fn is_confirming(&self) -> bool {
        matches!(self.state, BulkBarState::ConfirmPending { .. })
    }

    /// Whether a delete is in flight. Selection input is ignored meanwhile.
    #[must_use]
    pub const fn is_busy(&self) -> bool {
        matches!(self.state, BulkBarState::Deleting { .. })
    }

    /// Follows the selection count. Ignored while the dialog is open or a
    /// delete is in flight.
    pub fn sync(&mut self, count: usize) {
        match self.state {
            BulkBarState::Hidden | BulkBarState::Visible { .. } => {
                self.state = if count == 0 {
                    BulkBarState::Hidden
                } else {
                    BulkBarState::Visible { count }
                };
            }
            BulkBarState::ConfirmPending { .. } | BulkBarState::Deleting { .. } => {}
        }
    }

    /// Opens the confirm dialog for `ids`. Only valid while visible.
    pub fn request_delete(&mut self, ids: Vec<String>) -> bool {
        if !matches!(self.state, BulkBarState::Visible { .. }) || ids.is_empty() {
            return false;
        }
        self.state = BulkBarState::ConfirmPending { ids };
        true
    }

    /// Confirms the dialog and returns the ids to delete.
    pub fn confirm(&mut self) -> Option<Vec<String>> {
        let BulkBarState::ConfirmPending { ids } = &self.state else {
            return None;
        };
        let ids = ids.clone();
        self.state = BulkBarState::Deleting { ids: ids.clone() };
        Some(ids)
    }

    /// Closes the dialog, keeping the selection.
    pub fn cancel_confirm(&mut self) -> bool {
        let BulkBarState::ConfirmPending { ids } = &self.state else {
            return false;
        };
        self.state = BulkBarState::Visible { count: ids.len() };
        true
    }

    /// Hides the bar. Returns true when the owner must clear the selection.
    pub fn cancel(&mut self) -> bool {
        match self.state {
            BulkBarState::Visible { .. } | BulkBarState::ConfirmPending { .. } => {
                self.state = BulkBarState::Hidden;
                true
            }
            BulkBarState::Hidden | BulkBarState::Deleting { .. } => false,
        }
    }

    /// The store deleted the selected rows. Hides the bar.
    pub fn delete_succeeded(&mut self) {
        if self.is_busy() {
            self.state = BulkBarState::Hidden;
        }
    }

    /// Returns to the bar with the selection intact.
    pub fn delete_failed(&mut self) {
        if let BulkBarState::Deleting { ids } = &self.state {
            self.state = BulkBarState::Visible { count: ids.len() };
        }
    }

    fn count(&self) -> usize {
        match &self.state {
            BulkBarState::Hidden => 0,
            BulkBarState::Visible { count } => *count,
            BulkBarState::ConfirmPending { ids } | BulkBarState::Deleting { ids } => ids.len(),
        }
    }

    /// "3 products selected", or `None` while hidden.
    #[must_use]
    pub fn summary(&self, kind: EntityKind) -> Option<String> {
        if !self.is_visible() {
            return None;
        }
        let n = self.count();
        Some(format!("{n} {} selected", kind.label_for(n)))
    }

    /// Dialog texts while confirming.
    #[must_use]
    pub fn confirm_prompt(&self, kind: EntityKind) -> Option<ConfirmPrompt> {
        let BulkBarState::ConfirmPending { ids } = &self.state else {
            return None;
        };
        let n = ids.len();
        Some(ConfirmPrompt {
            title: format!("Delete {}", kind.plural()),
            body: format!(
                "Are you sure you want to delete {n} {}? This action cannot be undone.",
                kind.label_for(n)
            ),
        })
    }
}
