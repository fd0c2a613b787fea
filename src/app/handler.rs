//! Event handling and state transition logic.
//!
//! [`handle_event`] is the only place [`AppState`] changes. It takes one
//! [`Event`], applies it, and returns whether the pane needs a re-render plus
//! the [`Action`]s the plugin shim must execute.
//!
//! # Event Types
//!
//! - **Navigation**: `SwitchScreen`, `CursorDown`/`CursorUp`, `NextPage`/`PrevPage`
//! - **Sorting and filtering**: `FocusNextColumn`, `ToggleSort`, `StartFilter`, `Char`, `Backspace`
//! - **Selection and bulk delete**: `ToggleRow`, `TogglePage`, `RequestDelete`, `Confirm`, `CancelConfirm`
//! - **Detail modal**: `Enter` on a list, `NextStatus`/`PrevStatus` for orders, `Escape`
//! - **Product form**: `NewProduct`, `EditProduct`, `NextField`/`PrevField`,
//!   `NextChoice`/`PrevChoice`, `Char`, `Backspace`, `Enter`, `Escape`
//! - **System**: `Init`, `Tick`, `WorkerResponse`
//!
//! Keys are mapped to events by the shim according to what is on screen, but
//! every handler still checks its own preconditions, so an event arriving in
//! the wrong context is a no-op rather than an error.

use super::modes::{InputMode, Screen};
use super::notifications::NOTIFICATION_TTL_SECS;
use super::product_form::ProductForm;
use crate::app::{Action, AppState};
use crate::domain::error::Result;
use crate::domain::EntityKind;
use crate::worker::{WorkerMessage, WorkerResponse};
use chrono::{DateTime, Utc};

/// Events triggered by user input, timers, or worker responses.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Permissions were granted; configure the worker and mount the first screen.
    Init,
    SwitchScreen(Screen),

    CursorDown,
    CursorUp,
    NextPage,
    PrevPage,

    /// Moves keyboard sort focus to the next sortable column.
    FocusNextColumn,
    FocusPrevColumn,
    /// Cycles the sort of the focused column.
    ToggleSort,

    /// Starts typing into the filter of the active list.
    StartFilter,
    Char(char),
    Backspace,
    /// Closes whatever is topmost: confirm dialog, form, modal, filter, selection.
    Escape,
    /// Confirms the dialog, submits the form, leaves the filter, or opens the
    /// row under the cursor in the detail modal.
    Enter,

    ToggleRow,
    TogglePage,
    ToggleAllVisible,
    /// Bulk bar "Cancel": drop the selection without deleting.
    ClearSelection,

    RequestDelete,
    Confirm,
    CancelConfirm,

    NextStatus,
    PrevStatus,

    /// Opens an empty product form on the products screen.
    NewProduct,
    /// Opens the form for the product in the modal, or under the cursor.
    EditProduct,
    NextField,
    PrevField,
    /// Steps a choice field of the form.
    NextChoice,
    PrevChoice,

    /// Re-fetches the current screen.
    Reload,
    ToggleTheme,
    CycleAccent,
    ToggleSidebar,
    /// Hides the plugin pane.
    Hide,

    /// Timer fired; expire old notifications.
    Tick {
        now: DateTime<Utc>,
    },

    WorkerResponse(WorkerResponse),
}

/// Processes an event, mutates application state, and returns actions to execute.
///
/// Returns `(should_render, actions)`. When the event pushed a notification a
/// [`Action::SetTimeout`] is appended so that it can expire.
///
/// # Errors
///
/// Currently infallible; the `Result` leaves room for handlers that can fail.
///
/// # Example
///
/// ```
/// use shopdash::app::{handle_event, AppState, Event, Screen};
/// use shopdash::ui::theme::ThemeSource;
/// use shopdash::worker::StoreLocation;
/// use std::path::PathBuf;
///
/// let location = StoreLocation {
///     store_file: PathBuf::from("/tmp/store.json"),
///     settings_file: PathBuf::from("/tmp/settings.toml"),
///     seed_demo: true,
/// };
/// let mut state = AppState::new(location, 10, ThemeSource::FollowSettings)?;
/// let (render, actions) = handle_event(&mut state, &Event::SwitchScreen(Screen::Orders))?;
/// assert!(render);
/// assert_eq!(actions.len(), 1);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[allow(clippy::too_many_lines)]
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = ?event).entered();
    let pushed_before = state.notifications.pushed();

    let (render, mut actions) = match event {
        Event::Init => {
            let mut actions = state.startup_actions();
            actions.extend(state.mount_screen());
            (true, actions)
        }
        Event::SwitchScreen(screen) => {
            let actions = state.switch_screen(*screen);
            (!actions.is_empty() || *screen == Screen::Settings, actions)
        }

        Event::CursorDown => (with_list(state, |list| list.cursor_down()), vec![]),
        Event::CursorUp => (with_list(state, |list| list.cursor_up()), vec![]),
        Event::NextPage => (with_list_changed(state, |list| list.next_page()), vec![]),
        Event::PrevPage => (with_list_changed(state, |list| list.prev_page()), vec![]),

        Event::FocusNextColumn => (with_list(state, |list| list.focus_next_column()), vec![]),
        Event::FocusPrevColumn => (with_list(state, |list| list.focus_prev_column()), vec![]),
        Event::ToggleSort => {
            let render = with_list(state, |list| {
                let sort = list.toggle_focused_sort();
                tracing::debug!(kind = %list.kind(), ?sort, "sort toggled");
            });
            (render, vec![])
        }

        Event::StartFilter => {
            if state.active_list().is_some() && !state.bulk_bar.is_confirming() {
                state.input_mode = InputMode::Filter;
                (true, vec![])
            } else {
                (false, vec![])
            }
        }
        Event::Char(c) => match state.input_mode {
            InputMode::Filter => (with_list_changed(state, |list| list.push_filter_char(*c)), vec![]),
            InputMode::Form => (with_form(state, |form| form.push_char(*c)), vec![]),
            InputMode::Normal => (false, vec![]),
        },
        Event::Backspace => match state.input_mode {
            InputMode::Filter => (with_list_changed(state, |list| list.pop_filter_char()), vec![]),
            InputMode::Form => (with_form(state, ProductForm::pop_char), vec![]),
            InputMode::Normal => (false, vec![]),
        },
        Event::Escape => (handle_escape(state), vec![]),
        Event::Enter => handle_enter(state),

        Event::ToggleRow => (with_selection(state, |list| list.toggle_cursor_row()), vec![]),
        Event::TogglePage => (with_selection(state, |list| list.toggle_all_on_page()), vec![]),
        Event::ToggleAllVisible => (with_selection(state, |list| list.toggle_all_visible()), vec![]),
        Event::ClearSelection => (clear_selection(state), vec![]),

        Event::RequestDelete => {
            if state.bulk_bar.is_busy() {
                (false, vec![])
            } else {
                let ids = state.active_list().map(|list| list.selected_ids()).unwrap_or_default();
                (state.bulk_bar.request_delete(ids), vec![])
            }
        }
        Event::Confirm => handle_confirm(state),
        Event::CancelConfirm => (state.bulk_bar.cancel_confirm(), vec![]),

        Event::NextStatus => {
            let change = state.modal.cycle_status_forward();
            status_change_actions(change)
        }
        Event::PrevStatus => {
            let change = state.modal.cycle_status_backward();
            status_change_actions(change)
        }

        Event::NewProduct => (open_form(state, None), vec![]),
        Event::EditProduct => {
            let product = state
                .modal
                .product()
                .or_else(|| state.products.view.cursor_row())
                .cloned();
            (product.is_some_and(|product| open_form(state, Some(&product))), vec![])
        }
        Event::NextField => (with_form(state, ProductForm::focus_next), vec![]),
        Event::PrevField => (with_form(state, ProductForm::focus_prev), vec![]),
        Event::NextChoice => (with_form(state, |form| form.cycle_choice(true)), vec![]),
        Event::PrevChoice => (with_form(state, |form| form.cycle_choice(false)), vec![]),

        Event::Reload => {
            if state.bulk_bar.is_busy() {
                (false, vec![])
            } else if state.screen == Screen::Settings {
                (false, vec![Action::PostToWorker(WorkerMessage::load_settings())])
            } else {
                tracing::debug!(screen = ?state.screen, "reloading");
                state.unmount_screen();
                (true, state.mount_screen())
            }
        }
        Event::ToggleTheme => {
            let mode = state.settings.toggle_theme_mode();
            tracing::debug!(mode = mode.as_str(), "theme mode toggled");
            (true, vec![state.settings_changed()])
        }
        Event::CycleAccent => {
            let accent = state.settings.cycle_accent();
            tracing::debug!(accent = accent.label(), "accent changed");
            (true, vec![state.settings_changed()])
        }
        Event::ToggleSidebar => {
            state.settings.toggle_sidebar();
            (true, vec![state.settings_changed()])
        }
        Event::Hide => (false, vec![Action::CloseFocus]),

        Event::Tick { now } => (state.notifications.expire(*now), vec![]),

        Event::WorkerResponse(response) => handle_worker_response(state, response),
    };

    state.sync_bulk_bar();

    if state.notifications.pushed() != pushed_before {
        #[allow(clippy::cast_precision_loss)]
        actions.push(Action::SetTimeout(NOTIFICATION_TTL_SECS as f64));
        return Ok((true, actions));
    }

    Ok((render, actions))
}

/// Runs `f` on the active list. Returns whether there was one.
fn with_list<F>(state: &mut AppState, f: F) -> bool
where
    F: FnOnce(&mut dyn super::list::ListControl),
{
    state.active_list_mut().map(f).is_some()
}

/// Runs `f` on the active list and passes its "changed" flag through.
fn with_list_changed<F>(state: &mut AppState, f: F) -> bool
where
    F: FnOnce(&mut dyn super::list::ListControl) -> bool,
{
    state.active_list_mut().is_some_and(f)
}

/// Like [`with_list_changed`], but only while selection input is accepted.
fn with_selection<F>(state: &mut AppState, f: F) -> bool
where
    F: FnOnce(&mut dyn super::list::ListControl) -> bool,
{
    if state.bulk_bar.is_busy() || state.bulk_bar.is_confirming() {
        tracing::debug!("selection input ignored while a delete is pending");
        return false;
    }
    with_list_changed(state, f)
}

/// Runs `f` on the open product form. Returns whether there was one.
fn with_form<F>(state: &mut AppState, f: F) -> bool
where
    F: FnOnce(&mut ProductForm),
{
    state.product_form.as_mut().map(f).is_some()
}

/// Opens the product form to edit `product`, or to add one when `None`.
///
/// Only on the products screen and only when no delete is pending. The detail
/// modal gives way to the form.
fn open_form(state: &mut AppState, product: Option<&crate::domain::Product>) -> bool {
    if state.screen != Screen::Products
        || state.product_form.is_some()
        || state.bulk_bar.is_busy()
        || state.bulk_bar.is_confirming()
    {
        return false;
    }
    let form = product.map_or_else(ProductForm::create, ProductForm::edit);
    tracing::debug!(mode = ?form.mode(), "product form opened");
    state.modal.close();
    state.product_form = Some(form);
    state.input_mode = InputMode::Form;
    true
}

fn close_form(state: &mut AppState) {
    state.product_form = None;
    state.input_mode = InputMode::Normal;
}

fn clear_selection(state: &mut AppState) -> bool {
    if !state.bulk_bar.cancel() {
        return false;
    }
    with_list_changed(state, |list| list.clear_selection());
    true
}

fn handle_escape(state: &mut AppState) -> bool {
    if state.bulk_bar.cancel_confirm() {
        return true;
    }
    if let Some(form) = &state.product_form {
        if form.is_saving() {
            return false;
        }
        tracing::debug!("product form cancelled");
        close_form(state);
        return true;
    }
    if state.modal.is_open() {
        state.modal.close();
        return true;
    }
    if state.input_mode == InputMode::Filter {
        state.input_mode = InputMode::Normal;
        with_list_changed(state, |list| list.clear_filter());
        return true;
    }
    clear_selection(state)
}

fn handle_enter(state: &mut AppState) -> (bool, Vec<Action>) {
    if state.bulk_bar.is_confirming() {
        return handle_confirm(state);
    }
    if let Some(form) = state.product_form.as_mut() {
        return match form.submit() {
            Some(message) => (true, vec![Action::PostToWorker(message)]),
            None => (true, vec![]),
        };
    }
    if state.input_mode == InputMode::Filter {
        state.input_mode = InputMode::Normal;
        return (true, vec![]);
    }
    if state.modal.is_open() {
        return (false, vec![]);
    }
    match state.screen {
        Screen::Orders => {
            let order = state.orders.view.cursor_row().cloned();
            if let Some(order) = &order {
                tracing::debug!(order_id = %order.id, "opening order details");
            }
            state.modal.open(order, true);
            (state.modal.is_open(), vec![])
        }
        Screen::Products => {
            let product = state.products.view.cursor_row().cloned();
            if let Some(product) = &product {
                tracing::debug!(product_id = %product.id, "opening product details");
            }
            state.modal.open_product(product);
            (state.modal.is_open(), vec![])
        }
        _ => (false, vec![]),
    }
}

fn handle_confirm(state: &mut AppState) -> (bool, Vec<Action>) {
    let Some(kind) = state.screen.entity() else {
        return (false, vec![]);
    };
    let Some(ids) = state.bulk_bar.confirm() else {
        return (false, vec![]);
    };
    tracing::info!(%kind, count = ids.len(), "bulk delete confirmed");
    (true, vec![Action::PostToWorker(WorkerMessage::delete_records(kind, ids))])
}

fn status_change_actions(change: Option<super::detail_modal::StatusChange>) -> (bool, Vec<Action>) {
    change.map_or((false, vec![]), |change| {
        tracing::debug!(
            order_id = %change.id,
            from = change.previous.as_str(),
            to = change.next.as_str(),
            "order status change requested"
        );
        (
            true,
            vec![Action::PostToWorker(WorkerMessage::update_order_status(change.id, change.next))],
        )
    })
}

fn handle_worker_response(state: &mut AppState, response: &WorkerResponse) -> (bool, Vec<Action>) {
    match response {
        WorkerResponse::Configured => {
            tracing::debug!("worker configured");
            (false, vec![])
        }
        WorkerResponse::RowsLoaded { generation, rows } => (state.accept_rows(*generation, rows.clone()), vec![]),
        WorkerResponse::LoadFailed {
            kind,
            generation,
            message,
        } => {
            if state.accept_load_failure(*kind, *generation, message) {
                let what = kind.map_or("dashboard", EntityKind::plural);
                state.notifications.error(format!("Failed to load {what}"));
                (true, vec![])
            } else {
                (false, vec![])
            }
        }
        WorkerResponse::MetricsLoaded {
            generation,
            metrics,
            recent_orders,
        } => (
            state.accept_metrics(*generation, metrics.clone(), recent_orders.clone()),
            vec![],
        ),
        WorkerResponse::RecordsDeleted { kind, ids, count } => {
            let list = state.list_mut(*kind);
            let removed = list.remove_rows(ids);
            list.clear_selection();
            if removed != *count {
                tracing::debug!(%kind, removed, count, "local rows differed from store");
            }
            state.bulk_bar.delete_succeeded();
            state
                .notifications
                .success(format!("Deleted {count} {}", kind.label_for(*count)));
            (true, vec![])
        }
        WorkerResponse::DeleteFailed { kind, ids, message } => {
            state.bulk_bar.delete_failed();
            state.notifications.error(format!(
                "Failed to delete {} {}: {message}",
                ids.len(),
                kind.label_for(ids.len())
            ));
            (true, vec![])
        }
        WorkerResponse::OrderStatusUpdated { order } => {
            let view = &mut state.orders.view;
            let followed = view.cursor_row().is_some_and(|row| row.id == order.id)
                || state.modal.order().is_some_and(|shown| shown.id == order.id);
            view.update_row(&order.id, |row| row.clone_from(order));
            // Re-sorting may have moved the row away from the cursor.
            if followed {
                view.focus_row(&order.id);
            }
            if let Some(recent) = state.recent_orders.iter_mut().find(|o| o.id == order.id) {
                recent.clone_from(order);
            }
            state.modal.status_committed(&order.id, order.status);
            state
                .notifications
                .success(format!("Order {} is now {}", order.id, order.status.label()));
            (true, vec![])
        }
        WorkerResponse::StatusUpdateFailed { id, message } => {
            state.modal.status_rejected(id);
            state
                .notifications
                .error(format!("Failed to update order {id}: {message}"));
            (true, vec![])
        }
        WorkerResponse::ProductSaved { product, created } => {
            let view = &mut state.products.view;
            if *created || !view.update_row(&product.id, |row| row.clone_from(product)) {
                view.insert_row(product.clone());
            }
            view.focus_row(&product.id);
            state.modal.product_saved(product);

            let key = (!*created).then_some(product.id.as_str());
            if state.product_form.as_ref().is_some_and(|form| form.awaits(key)) {
                close_form(state);
            }
            let verb = if *created { "Added" } else { "Saved" };
            state.notifications.success(format!("{verb} product {}", product.name));
            (true, vec![])
        }
        WorkerResponse::ProductSaveFailed { id, message } => {
            if let Some(form) = state.product_form.as_mut().filter(|form| form.awaits(id.as_deref())) {
                form.save_failed(message);
            }
            state.notifications.error(format!("Failed to save product: {message}"));
            (true, vec![])
        }
        WorkerResponse::SettingsLoaded { settings } => {
            state.apply_settings(*settings);
            (true, vec![])
        }
        WorkerResponse::SettingsSaved => (false, vec![]),
        WorkerResponse::Error { message } => {
            tracing::error!(%message, "worker error");
            state.notifications.error(message.clone());
            (true, vec![])
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::BulkBarState;
    use crate::domain::{Accent, Settings, ThemeMode};
    use crate::storage::{seed, RowSet};
    use crate::ui::theme::ThemeSource;
    use crate::worker::StoreLocation;
    use std::path::PathBuf;

    fn state() -> AppState {
        let location = StoreLocation {
            store_file: PathBuf::from("/tmp/store.json"),
            settings_file: PathBuf::from("/tmp/settings.toml"),
            seed_demo: true,
        };
        AppState::new(location, 4, ThemeSource::FollowSettings).unwrap()
    }

    fn on_screen(screen: Screen) -> AppState {
        let mut state = state();
        handle_event(&mut state, &Event::SwitchScreen(screen)).unwrap();
        let data = seed::demo_data().unwrap();
        let rows = match screen {
            Screen::Users => RowSet::Users(data.users),
            Screen::Orders => RowSet::Orders(data.orders),
            _ => RowSet::Products(data.products),
        };
        let generation = match screen {
            Screen::Users => state.users.generation(),
            Screen::Orders => state.orders.generation(),
            _ => state.products.generation(),
        };
        let event = Event::WorkerResponse(WorkerResponse::RowsLoaded { generation, rows });
        handle_event(&mut state, &event).unwrap();
        state
    }

    fn send(state: &mut AppState, event: Event) -> (bool, Vec<Action>) {
        handle_event(state, &event).unwrap()
    }

    #[test]
    fn init_configures_worker_before_loading() {
        let mut state = state();
        let (render, actions) = send(&mut state, Event::Init);
        assert!(render);
        assert!(matches!(
            actions.as_slice(),
            [
                Action::PostToWorker(WorkerMessage::Configure { .. }),
                Action::PostToWorker(WorkerMessage::LoadSettings { .. }),
                Action::PostToWorker(WorkerMessage::LoadMetrics { .. }),
            ]
        ));
    }

    #[test]
    fn confirmed_delete_removes_rows_after_store_success() {
        let mut state = on_screen(Screen::Products);
        for _ in 0..3 {
            send(&mut state, Event::ToggleRow);
            send(&mut state, Event::CursorDown);
        }
        assert_eq!(state.bulk_bar.state(), &BulkBarState::Visible { count: 3 });

        send(&mut state, Event::RequestDelete);
        assert!(state.bulk_bar.is_confirming());
        let (_, actions) = send(&mut state, Event::Confirm);
        let [Action::PostToWorker(WorkerMessage::DeleteRecords { kind, ids, .. })] = actions.as_slice() else {
            panic!("unexpected actions: {actions:?}");
        };
        assert_eq!(*kind, EntityKind::Products);
        assert_eq!(state.products.view.len(), 10);

        // Selection input is ignored while the delete is in flight.
        assert!(!send(&mut state, Event::ToggleRow).0);

        let response = WorkerResponse::RecordsDeleted {
            kind: EntityKind::Products,
            ids: ids.clone(),
            count: 3,
        };
        let (_, actions) = send(&mut state, Event::WorkerResponse(response));
        assert_eq!(state.products.view.len(), 7);
        assert!(state.products.view.selection().is_empty());
        assert_eq!(state.bulk_bar.state(), &BulkBarState::Hidden);
        assert!(actions.iter().any(|a| matches!(a, Action::SetTimeout(_))));
    }

    #[test]
    fn failed_delete_keeps_rows_and_selection() {
        let mut state = on_screen(Screen::Users);
        send(&mut state, Event::TogglePage);
        send(&mut state, Event::RequestDelete);
        let (_, actions) = send(&mut state, Event::Enter);
        let [Action::PostToWorker(WorkerMessage::DeleteRecords { ids, .. })] = actions.as_slice() else {
            panic!("unexpected actions: {actions:?}");
        };

        let response = WorkerResponse::DeleteFailed {
            kind: EntityKind::Users,
            ids: ids.clone(),
            message: "disk full".to_string(),
        };
        send(&mut state, Event::WorkerResponse(response));
        assert_eq!(state.users.view.len(), 10);
        assert_eq!(state.users.view.selection().count(), 4);
        assert_eq!(state.bulk_bar.state(), &BulkBarState::Visible { count: 4 });
        assert!(state.notifications.latest().unwrap().message.contains("disk full"));
    }

    #[test]
    fn cancel_in_dialog_keeps_selection_but_bar_cancel_clears_it() {
        let mut state = on_screen(Screen::Products);
        send(&mut state, Event::ToggleRow);
        send(&mut state, Event::RequestDelete);
        send(&mut state, Event::CancelConfirm);
        assert_eq!(state.bulk_bar.state(), &BulkBarState::Visible { count: 1 });

        send(&mut state, Event::ClearSelection);
        assert!(state.products.view.selection().is_empty());
        assert_eq!(state.bulk_bar.state(), &BulkBarState::Hidden);
    }

    #[test]
    fn filter_mode_routes_characters() {
        let mut state = on_screen(Screen::Products);
        assert!(!send(&mut state, Event::Char('x')).0);

        send(&mut state, Event::StartFilter);
        for c in "shirt".chars() {
            send(&mut state, Event::Char(c));
        }
        assert_eq!(state.products.view.visible_count(), 1);

        send(&mut state, Event::Enter);
        assert_eq!(state.input_mode, InputMode::Normal);
        assert_eq!(state.products.view.filter_text(), "shirt");

        send(&mut state, Event::StartFilter);
        send(&mut state, Event::Escape);
        assert_eq!(state.products.view.filter_text(), "");
        assert_eq!(state.products.view.visible_count(), 10);
    }

    #[test]
    fn status_change_applies_to_row_only_after_commit() {
        let mut state = on_screen(Screen::Orders);
        send(&mut state, Event::Enter);
        assert!(state.modal.is_open());
        let id = state.modal.order().unwrap().id.clone();
        let before = state.orders.view.row(&id).unwrap().status;

        let (_, actions) = send(&mut state, Event::NextStatus);
        let [Action::PostToWorker(WorkerMessage::UpdateOrderStatus { status, .. })] = actions.as_slice() else {
            panic!("unexpected actions: {actions:?}");
        };
        let next = *status;
        assert_eq!(state.orders.view.row(&id).unwrap().status, before);

        let mut updated = state.orders.view.row(&id).unwrap().clone();
        updated.status = next;
        send(
            &mut state,
            Event::WorkerResponse(WorkerResponse::OrderStatusUpdated { order: updated }),
        );
        assert_eq!(state.orders.view.row(&id).unwrap().status, next);
        assert!(state.modal.pending().is_none());
    }

    #[test]
    fn rejected_status_change_reverts_modal() {
        let mut state = on_screen(Screen::Orders);
        send(&mut state, Event::Enter);
        let id = state.modal.order().unwrap().id.clone();
        let before = state.modal.order().unwrap().status;

        send(&mut state, Event::PrevStatus);
        assert_ne!(state.modal.order().unwrap().status, before);

        send(
            &mut state,
            Event::WorkerResponse(WorkerResponse::StatusUpdateFailed {
                id,
                message: "locked".to_string(),
            }),
        );
        assert_eq!(state.modal.order().unwrap().status, before);

        send(&mut state, Event::Escape);
        assert!(!state.modal.is_open());
        assert!(!send(&mut state, Event::Escape).0);
    }

    #[test]
    fn settings_changes_are_persisted() {
        let mut state = state();
        let (_, actions) = send(&mut state, Event::CycleAccent);
        assert_eq!(state.settings.accent(), Accent::Blue);
        assert_eq!(state.theme.colors.accent, Accent::Blue.hex());
        assert!(matches!(
            actions.as_slice(),
            [Action::PostToWorker(WorkerMessage::SaveSettings { .. })]
        ));

        let loaded = Settings::new(ThemeMode::Light, Accent::Red, true);
        send(&mut state, Event::WorkerResponse(WorkerResponse::SettingsLoaded { settings: loaded }));
        assert_eq!(state.theme.name, "shopdash-light");
        assert!(state.compute_viewmodel(30, 120).nav.collapsed);
    }

    #[test]
    fn notifications_expire_on_tick() {
        let mut state = state();
        send(
            &mut state,
            Event::WorkerResponse(WorkerResponse::Error {
                message: "boom".to_string(),
            }),
        );
        assert_eq!(state.notifications.len(), 1);
        let later = Utc::now() + chrono::Duration::seconds(NOTIFICATION_TTL_SECS + 1);
        assert!(send(&mut state, Event::Tick { now: later }).0);
        assert!(state.notifications.is_empty());
    }

    fn submitted_product(actions: &[Action]) -> crate::domain::ProductDraft {
        match actions {
            [Action::PostToWorker(
                WorkerMessage::CreateProduct { draft, .. } | WorkerMessage::UpdateProduct { draft, .. },
            )] => draft.clone(),
            other => panic!("unexpected actions: {other:?}"),
        }
    }

    fn type_text(state: &mut AppState, text: &str) {
        for c in text.chars() {
            send(state, Event::Char(c));
        }
    }

    #[test]
    fn status_change_keeps_cursor_on_the_order() {
        let mut state = on_screen(Screen::Orders);
        while state.orders.view.focused_column().map(|c| c.key) != Some("status") {
            send(&mut state, Event::FocusNextColumn);
        }
        send(&mut state, Event::ToggleSort);
        send(&mut state, Event::Enter);
        let mut order = state.modal.order().unwrap().clone();
        assert_eq!(state.orders.view.cursor_row().unwrap().id, order.id);

        send(&mut state, Event::NextStatus);
        order.status = state.modal.order().unwrap().status;
        send(&mut state, Event::WorkerResponse(WorkerResponse::OrderStatusUpdated { order: order.clone() }));

        assert_eq!(state.orders.view.cursor_row().unwrap().id, order.id);
        assert_eq!(state.orders.view.cursor_row().unwrap().status, order.status);
    }

    #[test]
    fn new_product_joins_list_only_after_store_success() {
        let mut state = on_screen(Screen::Products);
        assert!(send(&mut state, Event::NewProduct).0);
        assert_eq!(state.input_mode, InputMode::Form);

        // Blank submit: every required field is flagged, nothing is sent.
        let (_, actions) = send(&mut state, Event::Enter);
        assert!(actions.is_empty());
        let form = state.product_form.as_ref().unwrap();
        assert_eq!(form.error(crate::domain::ProductField::Price), Some("Valid price is required"));

        type_text(&mut state, "Desk Lamp");
        send(&mut state, Event::NextField);
        type_text(&mut state, "Adjustable LED lamp");
        send(&mut state, Event::NextField);
        type_text(&mut state, "34.50");
        send(&mut state, Event::NextField);
        type_text(&mut state, "12");
        send(&mut state, Event::NextField);
        send(&mut state, Event::NextChoice);
        send(&mut state, Event::NextField);
        type_text(&mut state, "Lumen");

        let (_, actions) = send(&mut state, Event::Enter);
        let draft = submitted_product(&actions);
        assert_eq!(draft.brand, "Lumen");
        assert_eq!(state.products.view.len(), 10);
        assert!(!send(&mut state, Event::Escape).0);

        let product = draft.into_product("11".to_string(), "2024-03-01".to_string());
        send(
            &mut state,
            Event::WorkerResponse(WorkerResponse::ProductSaved { product, created: true }),
        );
        assert_eq!(state.products.view.len(), 11);
        assert_eq!(state.products.view.cursor_row().unwrap().id, "11");
        assert!(state.product_form.is_none());
        assert_eq!(state.input_mode, InputMode::Normal);
    }

    #[test]
    fn failed_product_save_keeps_form_open() {
        let mut state = on_screen(Screen::Products);
        send(&mut state, Event::EditProduct);
        let (_, actions) = send(&mut state, Event::Enter);
        submitted_product(&actions);

        let id = state.products.view.cursor_row().unwrap().id.clone();
        send(
            &mut state,
            Event::WorkerResponse(WorkerResponse::ProductSaveFailed {
                id: Some(id),
                message: "disk full".to_string(),
            }),
        );
        let form = state.product_form.as_ref().unwrap();
        assert!(!form.is_saving());
        assert_eq!(form.save_error(), Some("disk full"));
        assert_eq!(state.input_mode, InputMode::Form);

        assert!(send(&mut state, Event::Escape).0);
        assert!(state.product_form.is_none());
        assert_eq!(state.input_mode, InputMode::Normal);
    }

    #[test]
    fn product_detail_leads_to_a_saved_edit() {
        let mut state = on_screen(Screen::Products);
        send(&mut state, Event::CursorDown);
        send(&mut state, Event::Enter);
        let shown = state.modal.product().unwrap().clone();
        assert!(!state.modal.is_editable());
        assert!(!send(&mut state, Event::NextStatus).0);

        send(&mut state, Event::EditProduct);
        assert!(!state.modal.is_open());
        for _ in 0..3 {
            send(&mut state, Event::NextField);
        }
        send(&mut state, Event::Backspace);
        send(&mut state, Event::Backspace);
        type_text(&mut state, "0");

        let (_, actions) = send(&mut state, Event::Enter);
        let draft = submitted_product(&actions);
        assert_eq!(draft.stock, 0);
        assert_eq!(draft.name, shown.name);

        let mut saved = shown.clone();
        draft.apply_to(&mut saved, "2024-03-01".to_string());
        send(
            &mut state,
            Event::WorkerResponse(WorkerResponse::ProductSaved { product: saved, created: false }),
        );
        let row = state.products.view.row(&shown.id).unwrap();
        assert_eq!(row.stock, 0);
        assert_eq!(row.created_at, shown.created_at);
        assert_eq!(state.products.view.len(), 10);
        assert!(state.product_form.is_none());
    }

    #[test]
    fn product_form_only_opens_on_products_screen() {
        let mut state = on_screen(Screen::Orders);
        assert!(!send(&mut state, Event::NewProduct).0);
        assert!(!send(&mut state, Event::EditProduct).0);
        assert!(state.product_form.is_none());
    }
}
