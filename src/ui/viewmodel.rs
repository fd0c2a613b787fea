//! View models: immutable, display-ready snapshots of application state.
//!
//! Built by [`AppState::compute_viewmodel`](crate::app::AppState::compute_viewmodel)
//! and consumed by the renderer. Nothing here holds domain objects or makes
//! decisions; every string is already formatted.

use crate::app::NotificationLevel;

/// Everything the renderer needs for one frame.
#[derive(Debug, Clone)]
pub struct UIViewModel {
    pub header: HeaderInfo,
    pub nav: NavInfo,
    pub body: BodyViewModel,
    /// Present while rows are selected.
    pub bulk_bar: Option<BulkBarInfo>,
    /// Present while the delete confirmation is open.
    pub confirm: Option<ConfirmInfo>,
    /// Present while the order or product detail modal is open.
    pub modal: Option<ModalInfo>,
    /// Present while the product form is open.
    pub form: Option<FormInfo>,
    pub notification: Option<NotificationInfo>,
    pub footer: FooterInfo,
}

#[derive(Debug, Clone)]
pub struct HeaderInfo {
    pub title: String,
    pub subtitle: String,
}

#[derive(Debug, Clone)]
pub struct NavInfo {
    pub items: Vec<NavItem>,
    /// Collapsed navigation shows hotkeys only.
    pub collapsed: bool,
}

#[derive(Debug, Clone)]
pub struct NavItem {
    pub hotkey: char,
    pub label: &'static str,
    pub active: bool,
}

/// Main content area.
#[derive(Debug, Clone)]
pub enum BodyViewModel {
    Dashboard(DashboardInfo),
    Table(TableViewModel),
    Settings(SettingsInfo),
    /// Nothing to show yet; `message` explains why.
    Placeholder(EmptyState),
}

#[derive(Debug, Clone)]
pub struct DashboardInfo {
    pub cards: Vec<MetricCard>,
    pub status_breakdown: Vec<(String, usize)>,
    pub recent_orders: Vec<RecentOrderRow>,
}

#[derive(Debug, Clone)]
pub struct MetricCard {
    pub label: String,
    pub value: String,
    pub hint: String,
}

#[derive(Debug, Clone)]
pub struct RecentOrderRow {
    pub id: String,
    pub customer: String,
    pub total: String,
    pub status: String,
    pub date: String,
}

#[derive(Debug, Clone)]
pub struct TableViewModel {
    pub filter: FilterBarInfo,
    /// Header checkbox glyph; `None` when the list is not selectable.
    pub header_checkbox: Option<&'static str>,
    pub columns: Vec<ColumnHeader>,
    pub rows: Vec<TableRow>,
    pub pager: PagerInfo,
    /// Shown in place of rows when nothing is visible.
    pub empty_state: Option<EmptyState>,
    /// Shown above the table when the last load failed.
    pub error: Option<String>,
    /// One-line overview above the column headers, such as order status counts.
    pub summary: Option<String>,
    pub loading: bool,
}

#[derive(Debug, Clone)]
pub struct FilterBarInfo {
    pub placeholder: String,
    pub query: String,
    /// The filter is receiving keystrokes.
    pub active: bool,
}

#[derive(Debug, Clone)]
pub struct ColumnHeader {
    pub label: String,
    pub width: usize,
    /// Sort arrow when this column is sorted.
    pub sort_indicator: Option<&'static str>,
    /// Keyboard sorting acts on this column.
    pub focused: bool,
}

#[derive(Debug, Clone)]
pub struct TableRow {
    pub cells: Vec<String>,
    pub checkbox: Option<&'static str>,
    pub is_cursor: bool,
    pub is_selected: bool,
}

#[derive(Debug, Clone)]
pub struct PagerInfo {
    /// One-based for display; 0 when there are no pages.
    pub page: usize,
    pub page_count: usize,
    pub visible: usize,
    pub total: usize,
}

#[derive(Debug, Clone)]
pub struct BulkBarInfo {
    pub summary: String,
    pub hint: String,
    pub busy: bool,
}

#[derive(Debug, Clone)]
pub struct ConfirmInfo {
    pub title: String,
    pub body: String,
    pub hint: String,
}

#[derive(Debug, Clone)]
pub struct ModalInfo {
    pub title: String,
    pub subtitle: String,
    pub sections: Vec<(String, Vec<String>)>,
    pub hint: String,
}

#[derive(Debug, Clone)]
pub struct FormInfo {
    pub title: String,
    pub fields: Vec<FormFieldRow>,
    /// Store failure from the last save attempt.
    pub error: Option<String>,
    pub hint: String,
    pub saving: bool,
}

#[derive(Debug, Clone)]
pub struct FormFieldRow {
    pub label: &'static str,
    pub value: String,
    pub focused: bool,
    /// Picked with Left/Right rather than typed.
    pub choice: bool,
    pub error: Option<&'static str>,
}

#[derive(Debug, Clone)]
pub struct NotificationInfo {
    pub level: NotificationLevel,
    pub message: String,
}

#[derive(Debug, Clone)]
pub struct SettingsInfo {
    pub entries: Vec<SettingsEntry>,
}

#[derive(Debug, Clone)]
pub struct SettingsEntry {
    pub label: String,
    pub value: String,
    pub key_hint: String,
}

#[derive(Debug, Clone)]
pub struct FooterInfo {
    pub keybindings: String,
}

#[derive(Debug, Clone)]
pub struct EmptyState {
    pub message: String,
    pub subtitle: String,
}
