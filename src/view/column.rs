//! Column definitions for data views.

use crate::domain::{Record, Result, ShopdashError};

/// Declares how one field of `R` is displayed and whether it can be sorted.
pub struct ColumnDef<R> {
    /// Field key passed to [`Record::field`], or a synthetic key.
    pub key: &'static str,
    /// Header text.
    pub header: &'static str,
    /// Preferred display width in cells.
    pub width: usize,
    pub sortable: bool,
    /// Produces the cell text for a row.
    pub render: fn(&R) -> String,
}

impl<R> ColumnDef<R> {
    pub const fn new(key: &'static str, header: &'static str, width: usize, render: fn(&R) -> String) -> Self {
        Self {
            key,
            header,
            width,
            sortable: true,
            render,
        }
    }

    /// Marks the column as not sortable. Its header ignores sort requests.
    #[must_use]
    pub const fn unsortable(mut self) -> Self {
        self.sortable = false;
        self
    }
}

impl<R> Clone for ColumnDef<R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R> Copy for ColumnDef<R> {}

impl<R> std::fmt::Debug for ColumnDef<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ColumnDef")
            .field("key", &self.key)
            .field("header", &self.header)
            .field("width", &self.width)
            .field("sortable", &self.sortable)
            .finish_non_exhaustive()
    }
}

/// Checks that every column key exists on `R` or is synthetic.
///
/// # Errors
///
/// Returns [`ShopdashError::InvalidColumn`] naming the first unknown key.
pub fn validate_columns<R: Record>(columns: &[ColumnDef<R>]) -> Result<()> {
    columns
        .iter()
        .find(|c| !R::has_key(c.key))
        .map_or(Ok(()), |c| Err(ShopdashError::InvalidColumn(c.key.to_string())))
}
