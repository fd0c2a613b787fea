//! Composable UI component renderers.
//!
//! Each component draws one part of the pane at absolute positions and
//! returns the next free row where that is useful.
//!
//! # Components
//!
//! - [`header`]: Title bar
//! - [`nav`]: Screen list sidebar
//! - [`dashboard`]: Metric cards and recent orders
//! - [`filter`]: Filter input box
//! - [`table`]: Column headers, rows, pager
//! - [`settings`]: Appearance settings
//! - [`bulk_bar`]: Selection summary and delete action
//! - [`dialog`]: Delete confirmation, detail modal and product form overlays
//! - [`notification`]: Status line
//! - [`footer`]: Keybinding hints
//! - [`empty`]: Centered empty-state message
//!
//! # Layout
//!
//! ```text
//! row 1          [Header                                 ]
//! row 2          [Border                                 ]
//!                [Nav │ Body (dashboard | table | ...)   ]
//!                [    │ Bulk bar, when rows are selected ]
//! rows - 2       [Notification                           ]
//! rows - 1       [Border                                 ]
//! rows           [Footer                                 ]
//! ```
//!
//! Overlays are drawn last, over the body.

mod bulk_bar;
mod dashboard;
mod dialog;
mod empty;
mod filter;
mod footer;
mod header;
mod nav;
mod notification;
mod settings;
mod table;

pub use table::layout_columns;

use crate::ui::helpers::render_border;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{BodyViewModel, UIViewModel};

/// Smallest pane the full layout is drawn in.
const MIN_ROWS: usize = 10;

/// Rows above the body: header and border.
const TOP_CHROME: usize = 2;
/// Rows below the body: notification, border, footer.
const BOTTOM_CHROME: usize = 3;

/// Draws the whole pane for one frame.
pub fn render_layout(vm: &UIViewModel, theme: &Theme, rows: usize, cols: usize) {
    if rows < MIN_ROWS {
        header::render_header(1, &vm.header, theme, cols);
        footer::render_footer(2, &vm.footer, theme, cols);
        return;
    }

    let row = header::render_header(1, &vm.header, theme, cols);
    render_border(row, 1, &theme.colors.border, cols);

    let body_top = TOP_CHROME + 1;
    let mut body_bottom = rows - BOTTOM_CHROME;

    let nav_width = nav::render_nav(body_top, body_bottom, &vm.nav, theme);
    let col = nav_width + 2;
    let width = cols.saturating_sub(col);

    if let Some(bar) = &vm.bulk_bar {
        bulk_bar::render_bulk_bar(body_bottom, col, width, bar, theme);
        body_bottom -= 1;
    }

    render_body(&vm.body, body_top, body_bottom, col, width, theme);

    notification::render_notification(rows - 2, vm.notification.as_ref(), theme, cols);
    render_border(rows - 1, 1, &theme.colors.border, cols);
    footer::render_footer(rows, &vm.footer, theme, cols);

    if let Some(modal) = &vm.modal {
        dialog::render_modal(modal, theme, rows, cols);
    }
    if let Some(form) = &vm.form {
        dialog::render_form(form, theme, rows, cols);
    }
    if let Some(confirm) = &vm.confirm {
        dialog::render_confirm(confirm, theme, rows, cols);
    }
}

fn render_body(body: &BodyViewModel, top: usize, bottom: usize, col: usize, width: usize, theme: &Theme) {
    match body {
        BodyViewModel::Dashboard(info) => dashboard::render_dashboard(top + 1, bottom, col, width, info, theme),
        BodyViewModel::Table(table) => {
            let row = filter::render_filter_bar(top, col, width, &table.filter, theme);
            table::render_table(row, bottom, col, width, table, theme);
        }
        BodyViewModel::Settings(info) => settings::render_settings(top, col, width, info, theme),
        BodyViewModel::Placeholder(empty) => empty::render_empty_state(top + 2, col, width, empty, theme),
    }
}
