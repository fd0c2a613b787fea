//! One list screen: a [`DataView`] plus its load lifecycle.
//!
//! [`ListControl`] erases the record type so the event handler can drive the
//! active list without knowing whether it holds users, products or orders.

use super::modes::LoadState;
use crate::domain::{EntityKind, Record, Result};
use crate::ui::viewmodel::{
    ColumnHeader, EmptyState, FilterBarInfo, PagerInfo, TableRow, TableViewModel,
};
use crate::view::{ColumnDef, DataView, SortState};
use std::sync::Arc;

/// Rows of one collection and the state of fetching them.
#[derive(Debug, Clone)]
pub struct ListScreen<R: Record> {
    kind: EntityKind,
    pub view: DataView<R>,
    pub load: LoadState,
    /// Identifies the current mount; responses for older mounts are dropped.
    generation: u64,
}

impl<R: Record + 'static> ListScreen<R> {
    /// # Errors
    ///
    /// Returns an error if a column or the kind's filter field is not a field of `R`.
    pub fn new(kind: EntityKind, columns: Vec<ColumnDef<R>>, page_size: usize, selectable: bool) -> Result<Self> {
        let mut view = DataView::new(columns, kind.filter_field(), page_size)?.with_selection(selectable);
        view.on_selection_change(Arc::new(move |records: &[R]| {
            let ids: Vec<&str> = records.iter().map(|r| r.id()).collect();
            tracing::debug!(%kind, count = records.len(), ?ids, "selection changed");
        }));

        Ok(Self {
            kind,
            view,
            load: LoadState::Idle,
            generation: 0,
        })
    }
}

impl<R: Record> ListScreen<R> {
    /// Mount counter. Rows loaded under an older value are discarded.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Starts a fresh mount: resets filter, sort and selection, bumps the
    /// generation and marks the list loading. Returns the new generation.
    pub fn mount(&mut self) -> u64 {
        self.generation += 1;
        self.view.reset();
        self.load = LoadState::Loading;
        tracing::debug!(kind = %self.kind, generation = self.generation, "list mounted");
        self.generation
    }

    /// Invalidates any fetch still in flight for this mount.
    pub fn unmount(&mut self) {
        self.generation += 1;
        if self.load.is_loading() {
            self.load = LoadState::Idle;
        }
    }

    /// Applies fetched rows if they belong to the current mount.
    pub fn accept_rows(&mut self, generation: u64, rows: Vec<R>) -> bool {
        if generation != self.generation {
            tracing::debug!(kind = %self.kind, generation, current = self.generation, "dropping stale rows");
            return false;
        }
        self.view.set_rows(rows);
        self.load = LoadState::Loaded;
        true
    }

    /// Records a failed fetch if it belongs to the current mount. Rows are kept.
    pub fn accept_failure(&mut self, generation: u64, message: &str) -> bool {
        if generation != self.generation {
            tracing::debug!(kind = %self.kind, generation, "dropping stale load failure");
            return false;
        }
        self.load = LoadState::Failed(message.to_string());
        true
    }
}

/// Record-type-erased operations on a list screen.
///
/// Methods returning `bool` report whether anything changed, which the event
/// handler turns into its re-render flag. Each one forwards to the
/// [`DataView`] method of the same name.
pub trait ListControl {
    /// Collection this list shows.
    fn kind(&self) -> EntityKind;
    fn load_state(&self) -> &LoadState;
    /// Rows held, before filtering.
    fn row_count(&self) -> usize;

    /// Moves the cursor down one row, wrapping within the page.
    fn cursor_down(&mut self);
    /// Moves the cursor up one row, wrapping within the page.
    fn cursor_up(&mut self);
    fn next_page(&mut self) -> bool;
    fn prev_page(&mut self) -> bool;

    /// Moves sort focus to the next sortable column.
    fn focus_next_column(&mut self);
    /// Moves sort focus to the previous sortable column.
    fn focus_prev_column(&mut self);
    /// Advances the ascending, descending, unsorted cycle of the focused column.
    fn toggle_focused_sort(&mut self) -> Option<SortState>;

    /// Current filter text.
    fn filter_text(&self) -> &str;
    fn push_filter_char(&mut self, c: char) -> bool;
    fn pop_filter_char(&mut self) -> bool;
    fn clear_filter(&mut self) -> bool;

    /// Whether rows of this list can be selected for bulk delete.
    fn is_selectable(&self) -> bool;
    /// Flips the row under the cursor.
    fn toggle_cursor_row(&mut self) -> bool;
    /// Selects the whole page, or clears it if fully selected.
    fn toggle_all_on_page(&mut self) -> bool;
    /// Selects every filtered row, or clears them if all are selected.
    fn toggle_all_visible(&mut self) -> bool;
    fn clear_selection(&mut self) -> bool;
    /// Selected ids in sorted order.
    fn selected_ids(&self) -> Vec<String>;
    fn selected_count(&self) -> usize;

    /// Drops rows the store has deleted. Returns how many were held.
    fn remove_rows(&mut self, ids: &[String]) -> usize;

    /// Table view model for the current page.
    fn table(&self, filter_active: bool) -> TableViewModel;
}

impl<R: Record> ListControl for ListScreen<R> {
    fn kind(&self) -> EntityKind {
        self.kind
    }

    fn load_state(&self) -> &LoadState {
        &self.load
    }

    fn row_count(&self) -> usize {
        self.view.len()
    }

    fn cursor_down(&mut self) {
        self.view.move_cursor_down();
    }

    fn cursor_up(&mut self) {
        self.view.move_cursor_up();
    }

    fn next_page(&mut self) -> bool {
        self.view.next_page()
    }

    fn prev_page(&mut self) -> bool {
        self.view.prev_page()
    }

    fn focus_next_column(&mut self) {
        self.view.focus_next_column();
    }

    fn focus_prev_column(&mut self) {
        self.view.focus_prev_column();
    }

    fn toggle_focused_sort(&mut self) -> Option<SortState> {
        self.view.toggle_focused_sort()
    }

    fn filter_text(&self) -> &str {
        self.view.filter_text()
    }

    fn push_filter_char(&mut self, c: char) -> bool {
        self.view.push_filter_char(c)
    }

    fn pop_filter_char(&mut self) -> bool {
        self.view.pop_filter_char()
    }

    fn clear_filter(&mut self) -> bool {
        self.view.clear_filter()
    }

    fn is_selectable(&self) -> bool {
        self.view.is_selectable()
    }

    fn toggle_cursor_row(&mut self) -> bool {
        self.view.toggle_cursor_row()
    }

    fn toggle_all_on_page(&mut self) -> bool {
        self.view.toggle_all_on_page()
    }

    fn toggle_all_visible(&mut self) -> bool {
        self.view.toggle_all_visible()
    }

    fn clear_selection(&mut self) -> bool {
        self.view.clear_selection()
    }

    fn selected_ids(&self) -> Vec<String> {
        self.view.selection().ids()
    }

    fn selected_count(&self) -> usize {
        self.view.selection().count()
    }

    fn remove_rows(&mut self, ids: &[String]) -> usize {
        self.view.remove_rows(ids)
    }

    fn table(&self, filter_active: bool) -> TableViewModel {
        let view = &self.view;
        let selectable = view.is_selectable();
        let sort = view.sort_state();
        let focused_key = view.focused_column().map(|c| c.key);

        // The checkbox is drawn by the table itself, not as a cell.
        let data_columns: Vec<&ColumnDef<R>> = view.columns().iter().filter(|c| c.key != "select").collect();

        let columns = data_columns
            .iter()
            .map(|c| ColumnHeader {
                label: c.header.to_string(),
                width: c.width,
                sort_indicator: sort.filter(|s| s.key == c.key).map(SortState::indicator),
                focused: focused_key == Some(c.key),
            })
            .collect();

        let rows = view
            .page_rows()
            .into_iter()
            .enumerate()
            .map(|(idx, row)| {
                let is_selected = view.is_selected(row.id());
                TableRow {
                    cells: data_columns.iter().map(|c| (c.render)(row)).collect(),
                    checkbox: selectable.then_some(if is_selected { "[x]" } else { "[ ]" }),
                    is_cursor: idx == view.cursor(),
                    is_selected,
                }
            })
            .collect();

        let empty_state = (view.visible_count() == 0 && !self.load.is_loading()).then(|| {
            if view.filter_text().is_empty() {
                EmptyState {
                    message: format!("No {} yet", self.kind.plural()),
                    subtitle: "Press r to reload".to_string(),
                }
            } else {
                EmptyState {
                    message: format!("No {} match \"{}\"", self.kind.plural(), view.filter_text()),
                    subtitle: "Press / then Esc to clear the filter".to_string(),
                }
            }
        });

        let error = match &self.load {
            LoadState::Failed(message) => Some(format!(
                "Failed to load {}: {message} (press r to retry)",
                self.kind.plural()
            )),
            _ => None,
        };

        let page_count = view.page_count();
        TableViewModel {
            filter: FilterBarInfo {
                placeholder: format!("Filter by {}...", self.kind.filter_field()),
                query: view.filter_text().to_string(),
                active: filter_active,
            },
            header_checkbox: selectable.then(|| view.header_check_state().glyph()),
            columns,
            rows,
            pager: PagerInfo {
                page: if page_count == 0 { 0 } else { view.page_index() + 1 },
                page_count,
                visible: view.visible_count(),
                total: view.len(),
            },
            empty_state,
            error,
            summary: None,
            loading: self.load.is_loading(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::columns::product_columns;
    use crate::storage::seed;

    fn products() -> ListScreen<crate::domain::Product> {
        ListScreen::new(EntityKind::Products, product_columns(), 4, true).unwrap()
    }

    #[test]
    fn stale_generation_is_ignored() {
        let mut list = products();
        let first = list.mount();
        list.unmount();
        let second = list.mount();
        assert_ne!(first, second);

        let rows = seed::demo_data().unwrap().products;
        assert!(!list.accept_rows(first, rows.clone()));
        assert!(list.view.is_empty());
        assert!(list.accept_rows(second, rows));
        assert_eq!(list.load, LoadState::Loaded);
    }

    #[test]
    fn failure_keeps_previous_rows() {
        let mut list = products();
        let generation = list.mount();
        list.accept_rows(generation, seed::demo_data().unwrap().products);
        let generation = list.mount();
        assert!(list.accept_failure(generation, "disk on fire"));
        assert_eq!(list.view.len(), 10);

        let table = list.table(false);
        assert!(table.error.unwrap().starts_with("Failed to load products"));
    }

    #[test]
    fn table_view_model_reflects_paging_and_selection() {
        let mut list = products();
        let generation = list.mount();
        list.accept_rows(generation, seed::demo_data().unwrap().products);
        list.toggle_cursor_row();

        let table = list.table(false);
        assert_eq!(table.rows.len(), 4);
        assert_eq!(table.pager.page, 1);
        assert_eq!(table.pager.page_count, 3);
        assert_eq!(table.header_checkbox, Some("[-]"));
        assert_eq!(table.rows[0].checkbox, Some("[x]"));
        assert!(table.rows[0].is_cursor);
        assert_eq!(table.columns.len(), 5);
    }

    #[test]
    fn filtered_out_list_explains_itself() {
        let mut list = products();
        let generation = list.mount();
        list.accept_rows(generation, seed::demo_data().unwrap().products);
        for c in "zzz".chars() {
            list.push_filter_char(c);
        }
        let table = list.table(true);
        assert!(table.rows.is_empty());
        assert_eq!(table.empty_state.unwrap().message, "No products match \"zzz\"");
        assert_eq!(table.pager.page, 0);
    }
}
