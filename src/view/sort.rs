//! Column sorting: the toggle cycle and the value-aware comparator.

use crate::domain::FieldValue;
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// Active sort of a data view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortState {
    pub key: String,
    pub direction: SortDirection,
}

impl SortState {
    /// Computes the sort that results from choosing `key` while `current` is active.
    ///
    /// Choosing the active key walks ascending, descending, unsorted. Choosing
    /// any other key starts over at ascending.
    ///
    /// ```
    /// use shopdash::view::{SortDirection, SortState};
    ///
    /// let asc = SortState::toggled(None, "price");
    /// assert_eq!(asc.as_ref().map(|s| s.direction), Some(SortDirection::Ascending));
    /// let desc = SortState::toggled(asc.as_ref(), "price");
    /// assert_eq!(desc.as_ref().map(|s| s.direction), Some(SortDirection::Descending));
    /// assert_eq!(SortState::toggled(desc.as_ref(), "price"), None);
    /// ```
    #[must_use]
    pub fn toggled(current: Option<&Self>, key: &str) -> Option<Self> {
        match current {
            Some(state) if state.key == key => match state.direction {
                SortDirection::Ascending => Some(Self {
                    key: key.to_string(),
                    direction: SortDirection::Descending,
                }),
                SortDirection::Descending => None,
            },
            _ => Some(Self {
                key: key.to_string(),
                direction: SortDirection::Ascending,
            }),
        }
    }

    /// Arrow shown next to the header of the sorted column.
    #[must_use]
    pub const fn indicator(&self) -> &'static str {
        match self.direction {
            SortDirection::Ascending => "▲",
            SortDirection::Descending => "▼",
        }
    }
}

/// Rank used when two values are of different kinds. Empty sorts last.
const fn kind_rank(value: &FieldValue) -> u8 {
    match value {
        FieldValue::Number(_) => 0,
        FieldValue::Text(_) => 1,
        FieldValue::Empty => 2,
    }
}

/// Compares two cell values in ascending order.
///
/// Numbers compare numerically. Text that parses as an ISO date compares
/// chronologically and sorts before any text that does not; the remaining text
/// compares lexicographically. Values of different kinds order by kind, so the
/// result is a total order over any mix of cells.
#[must_use]
pub fn compare_values(a: &FieldValue, b: &FieldValue) -> Ordering {
    match (a, b) {
        (FieldValue::Number(x), FieldValue::Number(y)) => x.total_cmp(y),
        (FieldValue::Text(x), FieldValue::Text(y)) => match (a.as_date(), b.as_date()) {
            (Some(dx), Some(dy)) => dx.cmp(&dy),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => x.cmp(y),
        },
        _ => kind_rank(a).cmp(&kind_rank(b)),
    }
}
