//! End-to-end flows: plugin state and store worker wired together the way the
//! Zellij shim wires them, with every request serialized across the boundary.

use shopdash::app::ListControl;
use shopdash::domain::{ProductField, ThemeMode};
use shopdash::worker::{StoreWorker, WorkerMessage};
use shopdash::{handle_event, initialize, Action, AppState, Config, EntityKind, Event, InputMode, Screen};
use std::collections::VecDeque;
use std::path::Path;

struct Harness {
    state: AppState,
    worker: StoreWorker,
}

impl Harness {
    fn start(dir: &Path) -> Self {
        let config = Config {
            data_dir: dir.to_path_buf(),
            page_size: 5,
            ..Config::default()
        };
        let mut harness = Self {
            state: initialize(&config).unwrap(),
            worker: StoreWorker::default(),
        };
        harness.send(Event::Init);
        harness
    }

    /// Handles `event` and every worker round trip it causes.
    fn send(&mut self, event: Event) {
        let mut queue = VecDeque::from([event]);
        while let Some(event) = queue.pop_front() {
            let (_, actions) = handle_event(&mut self.state, &event).unwrap();
            for action in actions {
                if let Action::PostToWorker(message) = action {
                    let wire = serde_json::to_string(&message).unwrap();
                    let message: WorkerMessage = serde_json::from_str(&wire).unwrap();
                    let response = self.worker.handle_message(message);
                    queue.push_back(Event::WorkerResponse(response));
                }
            }
        }
    }

    fn users(&self) -> &dyn ListControl {
        self.state.list(EntityKind::Users)
    }
}

#[test]
fn dashboard_loads_seeded_metrics_on_start() {
    let dir = tempfile::tempdir().unwrap();
    let harness = Harness::start(dir.path());

    let metrics = harness.state.metrics.as_ref().unwrap();
    assert_eq!(metrics.total_users, 10);
    assert_eq!(metrics.total_products, 10);
    assert_eq!(metrics.total_orders, 8);
    assert_eq!(harness.state.recent_orders.len(), 5);
    assert_eq!(harness.state.recent_orders[0].id, "ORD-001");
}

#[test]
fn confirmed_bulk_delete_removes_rows_and_persists() {
    let dir = tempfile::tempdir().unwrap();
    let mut harness = Harness::start(dir.path());

    harness.send(Event::SwitchScreen(Screen::Users));
    assert_eq!(harness.users().row_count(), 10);

    harness.send(Event::ToggleRow);
    harness.send(Event::CursorDown);
    harness.send(Event::ToggleRow);
    assert_eq!(harness.users().selected_count(), 2);
    assert!(harness.state.bulk_bar.is_visible());

    harness.send(Event::RequestDelete);
    assert!(harness.state.bulk_bar.is_confirming());
    let prompt = harness.state.bulk_bar.confirm_prompt(EntityKind::Users).unwrap();
    assert!(prompt.body.contains("delete 2 users"));

    harness.send(Event::Confirm);
    assert_eq!(harness.users().row_count(), 8);
    assert_eq!(harness.users().selected_count(), 0);
    assert!(!harness.state.bulk_bar.is_visible());
    assert_eq!(
        harness.state.notifications.latest().map(|n| n.message.as_str()),
        Some("Deleted 2 users")
    );

    let mut reopened = Harness::start(dir.path());
    assert_eq!(reopened.state.metrics.as_ref().map(|m| m.total_users), Some(8));
    reopened.send(Event::SwitchScreen(Screen::Users));
    assert_eq!(reopened.users().row_count(), 8);
}

#[test]
fn cancelled_delete_keeps_rows_and_selection() {
    let dir = tempfile::tempdir().unwrap();
    let mut harness = Harness::start(dir.path());

    harness.send(Event::SwitchScreen(Screen::Users));
    harness.send(Event::TogglePage);
    assert_eq!(harness.users().selected_count(), 5);

    harness.send(Event::RequestDelete);
    harness.send(Event::CancelConfirm);

    assert_eq!(harness.users().row_count(), 10);
    assert_eq!(harness.users().selected_count(), 5);
    assert!(harness.state.bulk_bar.is_visible());
    assert!(!harness.state.bulk_bar.is_confirming());
}

#[test]
fn filtered_selection_only_deletes_matching_rows() {
    let dir = tempfile::tempdir().unwrap();
    let mut harness = Harness::start(dir.path());

    harness.send(Event::SwitchScreen(Screen::Products));
    harness.send(Event::StartFilter);
    for c in "shirt".chars() {
        harness.send(Event::Char(c));
    }
    harness.send(Event::Enter);
    harness.send(Event::ToggleAllVisible);

    let products = harness.state.list(EntityKind::Products);
    assert_eq!(products.selected_count(), 1);

    harness.send(Event::RequestDelete);
    harness.send(Event::Confirm);

    let products = harness.state.list(EntityKind::Products);
    assert_eq!(products.filter_text(), "shirt");
    assert_eq!(products.row_count(), 9);
    assert_eq!(harness.state.products.view.visible_count(), 0);
}

#[test]
fn order_status_change_round_trips_through_the_store() {
    let dir = tempfile::tempdir().unwrap();
    let mut harness = Harness::start(dir.path());

    harness.send(Event::SwitchScreen(Screen::Orders));
    harness.send(Event::Enter);
    assert!(harness.state.modal.is_open());

    let order = harness.state.modal.order().cloned().unwrap();
    let expected = order.status.next();
    harness.send(Event::NextStatus);

    assert_eq!(harness.state.modal.order().map(|o| o.status), Some(expected));
    assert!(harness.state.modal.pending().is_none());
    let row = harness.state.orders.view.rows().iter().find(|o| o.id == order.id).unwrap();
    assert_eq!(row.status, expected);

    harness.send(Event::Escape);
    assert!(!harness.state.modal.is_open());

    let mut reopened = Harness::start(dir.path());
    reopened.send(Event::SwitchScreen(Screen::Orders));
    let stored = reopened.state.orders.view.rows().iter().find(|o| o.id == order.id).unwrap();
    assert_eq!(stored.status, expected);
}

#[test]
fn appearance_changes_survive_a_restart() {
    let dir = tempfile::tempdir().unwrap();
    let mut harness = Harness::start(dir.path());
    let initial = harness.state.settings.theme_mode();

    harness.send(Event::ToggleTheme);
    let toggled = harness.state.settings.theme_mode();
    assert_ne!(initial, toggled);

    let reopened = Harness::start(dir.path());
    assert_eq!(reopened.state.settings.theme_mode(), toggled);
    let expected_name = match toggled {
        ThemeMode::Light => "shopdash-light",
        ThemeMode::Dark => "shopdash-dark",
    };
    assert_eq!(reopened.state.theme.name, expected_name);
}

fn type_text(harness: &mut Harness, text: &str) {
    for c in text.chars() {
        harness.send(Event::Char(c));
    }
}

#[test]
fn product_edit_round_trips_through_the_store() {
    let dir = tempfile::tempdir().unwrap();
    let mut harness = Harness::start(dir.path());

    harness.send(Event::SwitchScreen(Screen::Products));
    harness.send(Event::Enter);
    let original = harness.state.modal.product().cloned().unwrap();

    harness.send(Event::EditProduct);
    assert_eq!(harness.state.input_mode, InputMode::Form);
    // Name, Description, then Price.
    harness.send(Event::NextField);
    harness.send(Event::NextField);
    for _ in 0..original.price.to_string().len() + 3 {
        harness.send(Event::Backspace);
    }
    type_text(&mut harness, "149.50");
    harness.send(Event::Enter);

    assert!(harness.state.product_form.is_none());
    let row = harness.state.products.view.row(&original.id).unwrap();
    assert_eq!(row.price, 149.5);
    assert_eq!(row.created_at, original.created_at);

    let mut reopened = Harness::start(dir.path());
    reopened.send(Event::SwitchScreen(Screen::Products));
    let stored = reopened.state.products.view.row(&original.id).unwrap();
    assert_eq!(stored.price, 149.5);
    assert_eq!(stored.name, original.name);
}

#[test]
fn invalid_new_product_never_reaches_the_store() {
    let dir = tempfile::tempdir().unwrap();
    let mut harness = Harness::start(dir.path());

    harness.send(Event::SwitchScreen(Screen::Products));
    harness.send(Event::NewProduct);
    type_text(&mut harness, "Desk Lamp");
    harness.send(Event::NextField);
    type_text(&mut harness, "Adjustable LED lamp");
    harness.send(Event::NextField);
    type_text(&mut harness, "0");
    harness.send(Event::Enter);

    let form = harness.state.product_form.as_ref().unwrap();
    assert_eq!(form.error(ProductField::Price), Some("Valid price is required"));
    assert_eq!(form.error(ProductField::Stock), Some("Valid stock quantity is required"));
    assert!(!form.is_saving());

    // Fix the price and fill in the rest, then save.
    harness.send(Event::Backspace);
    type_text(&mut harness, "34.5");
    harness.send(Event::NextField);
    type_text(&mut harness, "7");
    harness.send(Event::NextField);
    harness.send(Event::PrevChoice);
    harness.send(Event::NextField);
    harness.send(Event::NextChoice);
    harness.send(Event::Enter);

    assert!(harness.state.product_form.is_none());
    assert_eq!(harness.state.products.view.len(), 11);
    let added = harness.state.products.view.cursor_row().unwrap();
    assert_eq!((added.category.as_str(), added.brand.as_str()), ("Toys", "LEGO"));

    let mut reopened = Harness::start(dir.path());
    reopened.send(Event::SwitchScreen(Screen::Products));
    assert_eq!(reopened.state.products.view.len(), 11);
}
