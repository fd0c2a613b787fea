//! Client-side tabular view over an in-memory row set.
//!
//! A [`DataView`] owns the rows of one collection and derives the ordered,
//! filtered, paginated subset that the table renders. The derived order is
//! kept as a list of indices into the row vector, so rows themselves are never
//! reordered and filtering or sorting never rewrites the data.
//!
//! # Pipeline
//!
//! ```text
//! rows ──filter(filter_field ∋ filter_text)──▶ sort(stable, value-aware)──▶ visible
//! visible ──page(page_size, page)──▶ page_rows
//! ```
//!
//! Every mutation that can change `visible` re-runs the pipeline, clamps the
//! page and cursor, and prunes the selection down to visible ids.

use super::column::{validate_columns, ColumnDef};
use super::selection::{CheckState, SelectionController};
use super::sort::{compare_values, SortDirection, SortState};
use crate::domain::{FieldValue, Record, Result, ShopdashError};
use std::collections::HashSet;
use std::sync::Arc;

/// Receives the full list of selected records after every selection change.
pub type SelectionCallback<R> = Arc<dyn Fn(&[R]) + Send + Sync>;

/// Filter, sort, paginate and select over one collection's rows.
pub struct DataView<R: Record> {
    rows: Vec<R>,
    columns: Vec<ColumnDef<R>>,
    filter_field: String,
    filter_text: String,
    sort: Option<SortState>,
    page_size: usize,
    page: usize,
    cursor: usize,
    focused_column: usize,
    selectable: bool,
    selection: SelectionController,
    /// Indices into `rows` in display order.
    visible: Vec<usize>,
    on_selection_change: Option<SelectionCallback<R>>,
}

impl<R: Record> DataView<R> {
    /// Creates an empty view.
    ///
    /// `page_size` is raised to 1 if zero.
    ///
    /// # Errors
    ///
    /// Returns [`ShopdashError::InvalidColumn`] if a column key or the filter
    /// field is not a field of `R`.
    pub fn new(columns: Vec<ColumnDef<R>>, filter_field: &str, page_size: usize) -> Result<Self> {
        validate_columns(&columns)?;
        if !R::FIELD_KEYS.contains(&filter_field) {
            return Err(ShopdashError::InvalidColumn(filter_field.to_string()));
        }

        let focused_column = columns.iter().position(|c| c.sortable).unwrap_or(0);

        Ok(Self {
            rows: Vec::new(),
            columns,
            filter_field: filter_field.to_string(),
            filter_text: String::new(),
            sort: None,
            page_size: page_size.max(1),
            page: 0,
            cursor: 0,
            focused_column,
            selectable: false,
            selection: SelectionController::new(),
            visible: Vec::new(),
            on_selection_change: None,
        })
    }

    /// Enables or disables row selection.
    #[must_use]
    pub fn with_selection(mut self, selectable: bool) -> Self {
        self.selectable = selectable;
        self
    }

    /// Registers the callback invoked with the selected records on every change.
    pub fn on_selection_change(&mut self, callback: SelectionCallback<R>) {
        self.on_selection_change = Some(callback);
    }

    // ----- rows -------------------------------------------------------------

    /// Replaces the row set.
    pub fn set_rows(&mut self, rows: Vec<R>) {
        self.rows = rows;
        self.refresh();
    }

    /// Removes rows whose id is in `ids`. Returns how many were removed.
    pub fn remove_rows(&mut self, ids: &[String]) -> usize {
        let doomed: HashSet<&str> = ids.iter().map(String::as_str).collect();
        let before = self.rows.len();
        self.rows = self
            .rows
            .iter()
            .filter(|r| !doomed.contains(r.id()))
            .cloned()
            .collect();
        let removed = before - self.rows.len();

        tracing::debug!(requested = ids.len(), removed, "rows removed from view");
        self.refresh();
        removed
    }

    /// Appends `row` and re-derives the visible set.
    ///
    /// The caller is responsible for id uniqueness; the store hands out ids.
    pub fn insert_row(&mut self, row: R) {
        tracing::debug!(id = row.id(), "row added to view");
        self.rows.push(row);
        self.refresh();
    }

    /// Applies `update` to the row with `id`. Returns whether the row was found.
    ///
    /// The view is re-derived afterwards, so an edit to the sorted or filtered
    /// field can move the row or hide it. Use [`focus_row`](Self::focus_row) to
    /// keep the cursor on it.
    pub fn update_row<F>(&mut self, id: &str, update: F) -> bool
    where
        F: FnOnce(&mut R),
    {
        let Some(row) = self.rows.iter_mut().find(|r| r.id() == id) else {
            return false;
        };
        update(row);
        self.refresh();
        true
    }

    /// Looks up a row by id, visible or not.
    #[must_use]
    pub fn row(&self, id: &str) -> Option<&R> {
        self.rows.iter().find(|r| r.id() == id)
    }

    /// Every row in load order, ignoring filter and sort.
    #[must_use]
    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    /// Number of rows held, visible or not. See [`visible_count`](Self::visible_count).
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Column definitions in display order, the `select` column included.
    #[must_use]
    pub fn columns(&self) -> &[ColumnDef<R>] {
        &self.columns
    }

    /// Restores the freshly-mounted state: no filter, no sort, first page,
    /// nothing selected. Rows are kept.
    pub fn reset(&mut self) {
        self.filter_text.clear();
        self.sort = None;
        self.page = 0;
        self.cursor = 0;
        let cleared = self.selection.clear();
        self.refresh();
        if cleared {
            self.notify_selection();
        }
    }

    // ----- filter -----------------------------------------------------------

    /// Current filter text, as typed.
    #[must_use]
    pub fn filter_text(&self) -> &str {
        &self.filter_text
    }

    /// Field the filter text is matched against.
    #[must_use]
    pub fn filter_field(&self) -> &str {
        &self.filter_field
    }

    /// Sets the filter text. Returns whether it changed.
    pub fn set_filter(&mut self, text: &str) -> bool {
        if self.filter_text == text {
            return false;
        }
        self.filter_text = text.to_string();
        self.page = 0;
        self.cursor = 0;
        self.refresh();
        true
    }

    /// Appends one character to the filter text.
    ///
    /// # Parameters
    ///
    /// * `c` - The typed character
    ///
    /// # Returns
    ///
    /// Always `true`; the text grows on every call.
    pub fn push_filter_char(&mut self, c: char) -> bool {
        let mut text = self.filter_text.clone();
        text.push(c);
        self.set_filter(&text)
    }

    /// Removes the last character of the filter text.
    ///
    /// # Returns
    ///
    /// `false` if the filter was already empty.
    pub fn pop_filter_char(&mut self) -> bool {
        let mut text = self.filter_text.clone();
        if text.pop().is_none() {
            return false;
        }
        self.set_filter(&text)
    }

    /// Empties the filter. Returns whether there was anything to clear.
    pub fn clear_filter(&mut self) -> bool {
        self.set_filter("")
    }

    // ----- sort -------------------------------------------------------------

    /// Active sort, or `None` for load order.
    #[must_use]
    pub fn sort_state(&self) -> Option<&SortState> {
        self.sort.as_ref()
    }

    /// Advances the sort cycle for `key` and returns the resulting sort.
    ///
    /// Unknown or unsortable keys leave the sort untouched.
    pub fn toggle_sort(&mut self, key: &str) -> Option<SortState> {
        let sortable = self.columns.iter().any(|c| c.key == key && c.sortable);
        if !sortable {
            tracing::debug!(key, "ignoring sort on unsortable column");
            return self.sort.clone();
        }

        self.sort = SortState::toggled(self.sort.as_ref(), key);
        tracing::debug!(sort = ?self.sort, "sort changed");
        self.refresh();
        self.sort.clone()
    }

    /// Column that keyboard sorting acts on.
    #[must_use]
    pub fn focused_column(&self) -> Option<&ColumnDef<R>> {
        self.columns.get(self.focused_column).filter(|c| c.sortable)
    }

    /// Moves keyboard focus to the next sortable column, wrapping.
    pub fn focus_next_column(&mut self) {
        self.shift_focus(1);
    }

    /// Moves keyboard focus to the previous sortable column, wrapping.
    pub fn focus_prev_column(&mut self) {
        self.shift_focus(self.columns.len().saturating_sub(1));
    }

    fn shift_focus(&mut self, step: usize) {
        let n = self.columns.len();
        if n == 0 || !self.columns.iter().any(|c| c.sortable) {
            return;
        }
        let mut idx = self.focused_column;
        loop {
            idx = (idx + step) % n;
            if self.columns[idx].sortable {
                break;
            }
        }
        self.focused_column = idx;
    }

    /// Toggles the sort of the focused column.
    pub fn toggle_focused_sort(&mut self) -> Option<SortState> {
        match self.focused_column().map(|c| c.key) {
            Some(key) => self.toggle_sort(key),
            None => self.sort.clone(),
        }
    }

    // ----- derived rows -----------------------------------------------------

    /// All rows passing the filter, in display order.
    #[must_use]
    pub fn visible_rows(&self) -> Vec<&R> {
        self.visible.iter().map(|&i| &self.rows[i]).collect()
    }

    /// Rows passing the filter, across all pages.
    #[must_use]
    pub fn visible_count(&self) -> usize {
        self.visible.len()
    }

    /// Rows of the current page, in display order.
    #[must_use]
    pub fn page_rows(&self) -> Vec<&R> {
        self.page_indices().iter().map(|&i| &self.rows[i]).collect()
    }

    fn page_indices(&self) -> &[usize] {
        let start = (self.page * self.page_size).min(self.visible.len());
        let end = (start + self.page_size).min(self.visible.len());
        &self.visible[start..end]
    }

    /// `ceil(visible_count / page_size)`.
    #[must_use]
    pub fn page_count(&self) -> usize {
        self.visible.len().div_ceil(self.page_size)
    }

    /// Zero-based current page. Always 0 when there are no pages.
    #[must_use]
    pub const fn page_index(&self) -> usize {
        self.page
    }

    #[must_use]
    pub const fn page_size(&self) -> usize {
        self.page_size
    }

    /// Advances one page and puts the cursor on its first row.
    ///
    /// # Returns
    ///
    /// `false` on the last page, where nothing changes.
    pub fn next_page(&mut self) -> bool {
        if self.page + 1 < self.page_count() {
            self.page += 1;
            self.cursor = 0;
            true
        } else {
            false
        }
    }

    /// Goes back one page. Returns `false` on the first page.
    pub fn prev_page(&mut self) -> bool {
        if self.page > 0 {
            self.page -= 1;
            self.cursor = 0;
            true
        } else {
            false
        }
    }

    /// Jumps to `page`, clamped into range.
    pub fn set_page(&mut self, page: usize) {
        self.page = page.min(self.page_count().saturating_sub(1));
        self.cursor = 0;
    }

    // ----- cursor -----------------------------------------------------------

    /// Cursor position within the current page.
    #[must_use]
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    /// Moves the cursor down, wrapping to the top of the page.
    pub fn move_cursor_down(&mut self) {
        let len = self.page_indices().len();
        if len > 0 {
            self.cursor = (self.cursor + 1) % len;
        }
    }

    /// Moves the cursor up, wrapping to the bottom of the page.
    pub fn move_cursor_up(&mut self) {
        let len = self.page_indices().len();
        if len > 0 {
            self.cursor = if self.cursor == 0 { len - 1 } else { self.cursor - 1 };
        }
    }

    /// Row under the cursor.
    #[must_use]
    pub fn cursor_row(&self) -> Option<&R> {
        self.page_indices().get(self.cursor).map(|&i| &self.rows[i])
    }

    /// Moves page and cursor to the visible row `id`.
    ///
    /// # Returns
    ///
    /// `false`, leaving the cursor alone, if no visible row has that id.
    pub fn focus_row(&mut self, id: &str) -> bool {
        let Some(position) = self.visible.iter().position(|&i| self.rows[i].id() == id) else {
            return false;
        };
        self.page = position / self.page_size;
        self.cursor = position % self.page_size;
        true
    }

    // ----- selection --------------------------------------------------------

    /// Whether rows can be selected at all.
    #[must_use]
    pub const fn is_selectable(&self) -> bool {
        self.selectable
    }

    /// Rows ticked for bulk actions.
    #[must_use]
    pub const fn selection(&self) -> &SelectionController {
        &self.selection
    }

    /// Whether the row `id` is selected.
    #[must_use]
    pub fn is_selected(&self, id: &str) -> bool {
        self.selection.contains(id)
    }

    /// Selected records in row order.
    #[must_use]
    pub fn selected_records(&self) -> Vec<R> {
        self.selection.items(&self.rows)
    }

    fn is_visible(&self, id: &str) -> bool {
        self.visible.iter().any(|&i| self.rows[i].id() == id)
    }

    /// Selects `id` programmatically. Ids outside the visible set are ignored.
    pub fn select(&mut self, id: &str) -> bool {
        if !self.selectable || !self.is_visible(id) {
            tracing::debug!(id, "ignoring selection of row outside the visible set");
            return false;
        }
        let changed = self.selection.set(id, true);
        if changed {
            self.notify_selection();
        }
        changed
    }

    /// Flips the selection of one visible row.
    pub fn toggle_row(&mut self, id: &str) -> bool {
        if !self.selectable || !self.is_visible(id) {
            return false;
        }
        let now = !self.selection.contains(id);
        self.selection.set(id, now);
        self.notify_selection();
        true
    }

    /// Flips the selection of the row under the cursor.
    ///
    /// # Returns
    ///
    /// `false` if the page is empty or selection is disabled.
    pub fn toggle_cursor_row(&mut self) -> bool {
        match self.cursor_row().map(|r| r.id().to_string()) {
            Some(id) => self.toggle_row(&id),
            None => false,
        }
    }

    /// Selects every row on the page, or deselects them all if they already are.
    pub fn toggle_all_on_page(&mut self) -> bool {
        let ids = self.ids_of(self.page_indices());
        self.toggle_group(&ids)
    }

    /// Selects every filtered row, or deselects them all if they already are.
    pub fn toggle_all_visible(&mut self) -> bool {
        let ids = self.ids_of(&self.visible);
        self.toggle_group(&ids)
    }

    fn ids_of(&self, indices: &[usize]) -> Vec<String> {
        indices.iter().map(|&i| self.rows[i].id().to_string()).collect()
    }

    fn toggle_group(&mut self, ids: &[String]) -> bool {
        if !self.selectable || ids.is_empty() {
            return false;
        }
        let select = !ids.iter().all(|id| self.selection.contains(id));
        for id in ids {
            self.selection.set(id, select);
        }
        self.notify_selection();
        true
    }

    /// Empties the selection. Returns whether anything was selected.
    pub fn clear_selection(&mut self) -> bool {
        let changed = self.selection.clear();
        if changed {
            self.notify_selection();
        }
        changed
    }

    /// Header checkbox state for the current page.
    #[must_use]
    pub fn header_check_state(&self) -> CheckState {
        let page = self.page_indices();
        let selected = page
            .iter()
            .filter(|&&i| self.selection.contains(self.rows[i].id()))
            .count();
        CheckState::from_counts(selected, page.len())
    }

    fn notify_selection(&self) {
        if let Some(callback) = &self.on_selection_change {
            let records = self.selected_records();
            callback(&records);
        }
    }

    // ----- derivation -------------------------------------------------------

    fn refresh(&mut self) {
        let _span = tracing::debug_span!("data_view_refresh",
            total_rows = self.rows.len(),
            filter_len = self.filter_text.len(),
            sort = ?self.sort
        )
        .entered();

        let needle = self.filter_text.to_lowercase();
        let field = self.filter_field.as_str();

        let mut visible: Vec<usize> = self
            .rows
            .iter()
            .enumerate()
            .filter(|(_, row)| {
                needle.is_empty()
                    || row
                        .field(field)
                        .is_some_and(|v| v.as_text().to_lowercase().contains(&needle))
            })
            .map(|(i, _)| i)
            .collect();

        if let Some(sort) = &self.sort {
            let rows = &self.rows;
            let key = sort.key.as_str();
            // sort_by is stable, so ties keep their original relative order.
            visible.sort_by(|&a, &b| {
                let va = rows[a].field(key).unwrap_or(FieldValue::Empty);
                let vb = rows[b].field(key).unwrap_or(FieldValue::Empty);
                let ordering = compare_values(&va, &vb);
                match sort.direction {
                    SortDirection::Ascending => ordering,
                    SortDirection::Descending => ordering.reverse(),
                }
            });
        }

        self.visible = visible;

        if self.page >= self.page_count() {
            self.page = 0;
        }
        let page_len = self.page_indices().len();
        if self.cursor >= page_len {
            self.cursor = page_len.saturating_sub(1);
        }

        let visible_ids: HashSet<&str> = self.visible.iter().map(|&i| self.rows[i].id()).collect();
        let pruned = self.selection.retain(|id| visible_ids.contains(id));

        tracing::debug!(
            visible = self.visible.len(),
            page = self.page,
            pruned_selection = pruned,
            "view derived"
        );

        if pruned {
            self.notify_selection();
        }
    }
}

impl<R: Record> Clone for DataView<R> {
    fn clone(&self) -> Self {
        Self {
            rows: self.rows.clone(),
            columns: self.columns.clone(),
            filter_field: self.filter_field.clone(),
            filter_text: self.filter_text.clone(),
            sort: self.sort.clone(),
            page_size: self.page_size,
            page: self.page,
            cursor: self.cursor,
            focused_column: self.focused_column,
            selectable: self.selectable,
            selection: self.selection.clone(),
            visible: self.visible.clone(),
            on_selection_change: self.on_selection_change.clone(),
        }
    }
}

impl<R: Record> std::fmt::Debug for DataView<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DataView")
            .field("rows", &self.rows.len())
            .field("filter_field", &self.filter_field)
            .field("filter_text", &self.filter_text)
            .field("sort", &self.sort)
            .field("page", &self.page)
            .field("page_size", &self.page_size)
            .field("selected", &self.selection.count())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Debug, Clone, PartialEq)]
    struct Item {
        id: String,
        name: String,
        price: f64,
        added: String,
    }

    impl Record for Item {
        const FIELD_KEYS: &'static [&'static str] = &["id", "name", "price", "added"];

        fn id(&self) -> &str {
            &self.id
        }

        fn field(&self, key: &str) -> Option<FieldValue> {
            Some(match key {
                "id" => FieldValue::text(&self.id),
                "name" => FieldValue::text(&self.name),
                "price" => FieldValue::Number(self.price),
                "added" => FieldValue::text(&self.added),
                _ => return None,
            })
        }
    }

    fn item(id: usize, name: &str, price: f64) -> Item {
        Item {
            id: id.to_string(),
            name: name.to_string(),
            price,
            added: format!("2024-01-{:02}", (id % 28) + 1),
        }
    }

    fn columns() -> Vec<ColumnDef<Item>> {
        vec![
            ColumnDef::new("select", "", 3, |_| String::new()).unsortable(),
            ColumnDef::new("name", "Name", 20, |i: &Item| i.name.clone()),
            ColumnDef::new("price", "Price", 8, |i: &Item| format!("{:.2}", i.price)),
            ColumnDef::new("added", "Added", 10, |i: &Item| i.added.clone()),
        ]
    }

    fn view_with(n: usize) -> DataView<Item> {
        let mut view = DataView::new(columns(), "name", 10).unwrap().with_selection(true);
        view.set_rows((0..n).map(|i| item(i, &format!("Product {i}"), i as f64)).collect());
        view
    }

    fn visible_ids(view: &DataView<Item>) -> Vec<String> {
        view.visible_rows().iter().map(|r| r.id.clone()).collect()
    }

    #[test]
    fn rejects_unknown_column_key() {
        let bad = vec![ColumnDef::new("colour", "Colour", 5, |_: &Item| String::new())];
        let err = DataView::new(bad, "name", 10).unwrap_err();
        assert!(matches!(err, ShopdashError::InvalidColumn(key) if key == "colour"));
    }

    #[test]
    fn rejects_unknown_filter_field() {
        assert!(DataView::new(columns(), "select", 10).is_err());
    }

    #[test]
    fn twenty_five_rows_paginate_into_three_pages() {
        let view = view_with(25);
        assert_eq!(view.page_count(), 3);
        assert_eq!(view.page_index(), 0);
        let first: Vec<String> = view.page_rows().iter().map(|r| r.id.clone()).collect();
        let expected: Vec<String> = (0..10).map(|i| i.to_string()).collect();
        assert_eq!(first, expected);
    }

    #[test]
    fn empty_view_has_zero_pages_and_page_zero() {
        let mut view = view_with(0);
        assert_eq!(view.page_count(), 0);
        assert_eq!(view.page_index(), 0);
        assert!(!view.next_page());
        view.set_page(5);
        assert_eq!(view.page_index(), 0);
    }

    #[test]
    fn filter_is_case_insensitive_substring() {
        let mut view = DataView::new(columns(), "name", 10).unwrap();
        view.set_rows(vec![
            item(1, "Blue Widget", 5.0),
            item(2, "widget-2", 6.0),
            item(3, "Gadget", 7.0),
        ]);

        view.set_filter("widget");
        assert_eq!(visible_ids(&view), vec!["1", "2"]);

        view.set_filter("WIDGET");
        assert_eq!(visible_ids(&view), vec!["1", "2"]);

        view.clear_filter();
        assert_eq!(view.visible_count(), 3);
    }

    #[test]
    fn filter_result_is_subset_matching_needle() {
        let mut view = view_with(40);
        view.set_filter("1");
        for row in view.visible_rows() {
            assert!(row.name.to_lowercase().contains('1'));
        }
        assert!(view.visible_count() <= view.len());
    }

    #[test]
    fn page_resets_when_out_of_range() {
        let mut view = view_with(25);
        assert!(view.next_page());
        assert!(view.next_page());
        assert_eq!(view.page_index(), 2);

        view.set_filter("Product 1");
        // "Product 1", "Product 10".."Product 19" = 11 rows, 2 pages
        assert_eq!(view.page_count(), 2);
        assert!(view.page_index() < view.page_count());
    }

    #[test]
    fn removing_rows_clamps_page() {
        let mut view = view_with(25);
        view.set_page(2);
        assert_eq!(view.page_index(), 2);
        let ids: Vec<String> = (20..25).map(|i| i.to_string()).collect();
        view.remove_rows(&ids);
        assert_eq!(view.page_count(), 2);
        assert_eq!(view.page_index(), 0);
    }

    #[test]
    fn sort_cycles_and_is_stable() {
        let mut view = DataView::new(columns(), "name", 10).unwrap();
        view.set_rows(vec![
            item(1, "b", 2.0),
            item(2, "a", 1.0),
            item(3, "c", 2.0),
            item(4, "d", 1.0),
        ]);

        view.toggle_sort("price");
        assert_eq!(visible_ids(&view), vec!["2", "4", "1", "3"]);

        view.toggle_sort("price");
        assert_eq!(visible_ids(&view), vec!["1", "3", "2", "4"]);

        assert_eq!(view.toggle_sort("price"), None);
        assert_eq!(visible_ids(&view), vec!["1", "2", "3", "4"]);
    }

    #[test]
    fn sorting_numbers_and_dates_by_value() {
        let mut view = DataView::new(columns(), "name", 10).unwrap();
        let mut late = item(1, "late", 100.0);
        late.added = "2024-02-01".into();
        let mut early = item(2, "early", 9.0);
        early.added = "2023-12-31".into();
        view.set_rows(vec![late, early]);

        view.toggle_sort("price");
        assert_eq!(visible_ids(&view), vec!["2", "1"]);

        view.toggle_sort("added");
        assert_eq!(visible_ids(&view), vec!["2", "1"]);
    }

    #[test]
    fn unsortable_column_is_ignored() {
        let mut view = view_with(3);
        assert_eq!(view.toggle_sort("select"), None);
        assert_eq!(view.toggle_sort("nope"), None);
    }

    #[test]
    fn focus_skips_unsortable_columns() {
        let mut view = view_with(3);
        assert_eq!(view.focused_column().map(|c| c.key), Some("name"));
        view.focus_prev_column();
        assert_eq!(view.focused_column().map(|c| c.key), Some("added"));
        view.focus_next_column();
        assert_eq!(view.focused_column().map(|c| c.key), Some("name"));
        view.focus_next_column();
        assert_eq!(view.toggle_focused_sort().map(|s| s.key), Some("price".to_string()));
    }

    #[test]
    fn header_check_state_tracks_page() {
        let mut view = view_with(25);
        assert_eq!(view.header_check_state(), CheckState::None);

        view.toggle_row("3");
        assert_eq!(view.header_check_state(), CheckState::Some);

        view.toggle_all_on_page();
        assert_eq!(view.header_check_state(), CheckState::All);
        assert_eq!(view.selection().count(), 10);

        view.toggle_all_on_page();
        assert_eq!(view.header_check_state(), CheckState::None);
        assert_eq!(view.selection().count(), 0);
    }

    #[test]
    fn select_all_visible_spans_pages() {
        let mut view = view_with(25);
        view.toggle_all_visible();
        assert_eq!(view.selection().count(), 25);
        view.next_page();
        assert_eq!(view.header_check_state(), CheckState::All);
    }

    #[test]
    fn selecting_invisible_row_is_ignored() {
        let mut view = view_with(5);
        view.set_filter("Product 1");
        assert!(!view.select("2"));
        assert!(!view.select("missing"));
        assert!(view.select("1"));
        assert_eq!(view.selection().ids(), vec!["1".to_string()]);
    }

    #[test]
    fn filtering_prunes_selection() {
        let mut view = view_with(5);
        view.toggle_row("1");
        view.toggle_row("2");
        view.set_filter("Product 2");
        assert_eq!(view.selection().ids(), vec!["2".to_string()]);
    }

    #[test]
    fn deleting_selected_rows_leaves_difference_and_empty_selection() {
        let mut view = view_with(25);
        for id in ["1", "5", "9"] {
            view.toggle_row(id);
        }
        let selected: Vec<String> = view.selected_records().iter().map(|r| r.id.clone()).collect();
        view.remove_rows(&selected);

        assert_eq!(view.len(), 22);
        assert!(view.selection().is_empty());
        assert!(view.rows().iter().all(|r| !selected.contains(&r.id)));
    }

    #[test]
    fn callback_receives_full_records() {
        let seen: Arc<Mutex<Vec<Vec<String>>>> = Arc::default();
        let sink = Arc::clone(&seen);

        let mut view = view_with(5);
        view.on_selection_change(Arc::new(move |records: &[Item]| {
            let names = records.iter().map(|r| r.name.clone()).collect();
            sink.lock().unwrap().push(names);
        }));

        view.toggle_row("2");
        view.toggle_row("4");
        view.clear_selection();

        let calls = seen.lock().unwrap();
        assert_eq!(calls.len(), 3);
        assert_eq!(calls[0], vec!["Product 2".to_string()]);
        assert_eq!(calls[1], vec!["Product 2".to_string(), "Product 4".to_string()]);
        assert!(calls[2].is_empty());
    }

    #[test]
    fn selection_disabled_view_ignores_toggles() {
        let mut view = DataView::new(columns(), "name", 10).unwrap();
        view.set_rows(vec![item(1, "a", 1.0)]);
        assert!(!view.toggle_row("1"));
        assert!(!view.toggle_all_on_page());
        assert!(view.selection().is_empty());
    }

    #[test]
    fn cursor_wraps_within_page() {
        let mut view = view_with(12);
        view.move_cursor_up();
        assert_eq!(view.cursor(), 9);
        view.move_cursor_down();
        assert_eq!(view.cursor(), 0);
        view.next_page();
        view.move_cursor_up();
        assert_eq!(view.cursor(), 1);
        assert_eq!(view.cursor_row().map(|r| r.id.as_str()), Some("11"));
    }

    #[test]
    fn update_row_applies_in_place() {
        let mut view = view_with(3);
        assert!(view.update_row("1", |r| r.price = 42.0));
        assert_eq!(view.row("1").map(|r| r.price), Some(42.0));
        assert!(!view.update_row("missing", |r| r.price = 0.0));
    }

    #[test]
    fn insert_row_lands_in_sorted_position() {
        let mut view = view_with(3);
        view.toggle_sort("price");
        view.insert_row(item(9, "cheap", -1.0));
        assert_eq!(view.len(), 4);
        assert_eq!(visible_ids(&view), vec!["9", "0", "1", "2"]);
    }

    #[test]
    fn focus_row_follows_a_row_across_pages() {
        let mut view = view_with(25);
        assert!(view.focus_row("23"));
        assert_eq!(view.page_index(), 2);
        assert_eq!(view.cursor_row().map(|r| r.id.as_str()), Some("23"));

        view.set_filter("Product 1");
        assert!(!view.focus_row("23"));
        assert_eq!(view.page_index(), 0);
    }

    #[test]
    fn cursor_can_follow_a_row_moved_by_an_edit() {
        let mut view = view_with(12);
        view.toggle_sort("price");
        view.move_cursor_down();
        assert_eq!(view.cursor_row().map(|r| r.id.as_str()), Some("1"));

        view.update_row("1", |r| r.price = 100.0);
        assert_ne!(view.cursor_row().map(|r| r.id.as_str()), Some("1"));
        assert!(view.focus_row("1"));
        assert_eq!(view.page_index(), 1);
        assert_eq!(view.cursor_row().map(|r| r.id.as_str()), Some("1"));
    }

    #[test]
    fn reset_clears_view_state_but_keeps_rows() {
        let mut view = view_with(25);
        view.set_filter("Product 2");
        view.toggle_sort("price");
        view.toggle_all_visible();
        view.reset();

        assert_eq!(view.filter_text(), "");
        assert!(view.sort_state().is_none());
        assert!(view.selection().is_empty());
        assert_eq!(view.visible_count(), 25);
    }
}
