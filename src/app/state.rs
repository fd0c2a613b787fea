//! Application state and view model computation.
//!
//! [`AppState`] is the single owner of everything the plugin shows: one
//! [`ListScreen`] per collection, the dashboard figures, the bulk action bar,
//! the detail modal, the product form, notifications and the appearance
//! settings. It is mutated
//! only by [`handle_event`](crate::app::handle_event) and turned into a
//! [`UIViewModel`] on every render.

use super::bulk_bar::BulkActionBar;
use super::columns::{order_columns, product_columns, user_columns};
use super::detail_modal::DetailModal;
use super::list::{ListControl, ListScreen};
use super::modes::{InputMode, LoadState, Screen};
use super::notifications::Notifications;
use super::product_form::ProductForm;
use super::Action;
use crate::domain::{
    display_date, DashboardMetrics, EntityKind, Order, Product, ProductField, Result, Settings, ThemeMode, User,
};
use crate::infrastructure::strip_host_prefix;
use crate::storage::RowSet;
use crate::ui::theme::{Theme, ThemeSource};
use crate::ui::viewmodel::{
    BodyViewModel, BulkBarInfo, ConfirmInfo, DashboardInfo, EmptyState, FooterInfo, FormFieldRow, FormInfo,
    HeaderInfo, MetricCard, ModalInfo, NavInfo, NavItem, NotificationInfo, RecentOrderRow, SettingsEntry,
    SettingsInfo, UIViewModel,
};
use crate::worker::{StoreLocation, WorkerMessage};

/// Below this width the navigation is drawn collapsed regardless of settings.
const NAV_MIN_COLS: usize = 70;

/// Rows taken by everything on the dashboard except the recent orders list.
const DASHBOARD_CHROME_ROWS: usize = 14;

/// Central application state container.
#[derive(Debug, Clone)]
pub struct AppState {
    pub screen: Screen,
    pub input_mode: InputMode,

    pub users: ListScreen<User>,
    pub products: ListScreen<Product>,
    pub orders: ListScreen<Order>,

    pub metrics: Option<DashboardMetrics>,
    pub recent_orders: Vec<Order>,
    pub metrics_load: LoadState,
    metrics_generation: u64,

    pub bulk_bar: BulkActionBar,
    pub modal: DetailModal,
    /// Open while a product is being added or edited.
    pub product_form: Option<ProductForm>,
    pub notifications: Notifications,

    pub settings: Settings,
    pub theme_source: ThemeSource,
    /// Resolved from `theme_source` and `settings`.
    pub theme: Theme,

    pub store_location: StoreLocation,
}

impl AppState {
    /// Creates the state for a freshly loaded plugin. Nothing is mounted yet.
    ///
    /// # Errors
    ///
    /// Returns an error if a built-in column set does not match its record type.
    pub fn new(store_location: StoreLocation, page_size: usize, theme_source: ThemeSource) -> Result<Self> {
        let settings = Settings::default();
        let theme = theme_source.resolve(&settings);

        Ok(Self {
            screen: Screen::default(),
            input_mode: InputMode::Normal,
            users: ListScreen::new(EntityKind::Users, user_columns(), page_size, true)?,
            products: ListScreen::new(EntityKind::Products, product_columns(), page_size, true)?,
            orders: ListScreen::new(EntityKind::Orders, order_columns(), page_size, false)?,
            metrics: None,
            recent_orders: Vec::new(),
            metrics_load: LoadState::Idle,
            metrics_generation: 0,
            bulk_bar: BulkActionBar::new(),
            modal: DetailModal::new(),
            product_form: None,
            notifications: Notifications::new(),
            settings,
            theme_source,
            theme,
            store_location,
        })
    }

    /// Requests the worker needs before the first screen can load.
    #[must_use]
    pub fn startup_actions(&self) -> Vec<Action> {
        vec![
            Action::PostToWorker(WorkerMessage::configure(self.store_location.clone())),
            Action::PostToWorker(WorkerMessage::load_settings()),
        ]
    }

    // ----- screens ----------------------------------------------------------

    /// Table controller for the given entity.
    #[must_use]
    pub fn list(&self, kind: EntityKind) -> &dyn ListControl {
        match kind {
            EntityKind::Users => &self.users,
            EntityKind::Products => &self.products,
            EntityKind::Orders => &self.orders,
        }
    }

    pub fn list_mut(&mut self, kind: EntityKind) -> &mut dyn ListControl {
        match kind {
            EntityKind::Users => &mut self.users,
            EntityKind::Products => &mut self.products,
            EntityKind::Orders => &mut self.orders,
        }
    }

    /// The list shown by the current screen, if it is a list screen.
    #[must_use]
    pub fn active_list(&self) -> Option<&dyn ListControl> {
        self.screen.entity().map(|kind| self.list(kind))
    }

    /// Table controller of the current screen, if it has one.
    pub fn active_list_mut(&mut self) -> Option<&mut dyn ListControl> {
        let kind = self.screen.entity()?;
        Some(self.list_mut(kind))
    }

    /// Bumped on every dashboard mount and unmount. Metrics replies carrying an older value are stale.
    #[must_use]
    pub const fn metrics_generation(&self) -> u64 {
        self.metrics_generation
    }

    /// Mounts the current screen and returns the load request it needs.
    pub fn mount_screen(&mut self) -> Vec<Action> {
        match self.screen {
            Screen::Users => vec![Self::load_rows(EntityKind::Users, self.users.mount())],
            Screen::Products => vec![Self::load_rows(EntityKind::Products, self.products.mount())],
            Screen::Orders => vec![Self::load_rows(EntityKind::Orders, self.orders.mount())],
            Screen::Dashboard => {
                self.metrics_generation += 1;
                self.metrics_load = LoadState::Loading;
                vec![Action::PostToWorker(WorkerMessage::load_metrics(self.metrics_generation))]
            }
            Screen::Settings => vec![],
        }
    }

    fn load_rows(kind: EntityKind, generation: u64) -> Action {
        Action::PostToWorker(WorkerMessage::load_rows(kind, generation))
    }

    /// Leaves the current screen. Pending loads for it become stale.
    pub fn unmount_screen(&mut self) {
        match self.screen {
            Screen::Users => self.users.unmount(),
            Screen::Products => self.products.unmount(),
            Screen::Orders => self.orders.unmount(),
            Screen::Dashboard => {
                self.metrics_generation += 1;
                if self.metrics_load.is_loading() {
                    self.metrics_load = LoadState::Idle;
                }
            }
            Screen::Settings => {}
        }
        self.input_mode = InputMode::Normal;
        self.modal.close();
        self.product_form = None;
        self.bulk_bar = BulkActionBar::new();
    }

    /// Switches to `screen` and mounts it. Selecting the current screen does nothing.
    pub fn switch_screen(&mut self, screen: Screen) -> Vec<Action> {
        if self.screen == screen {
            return vec![];
        }
        tracing::debug!(from = ?self.screen, to = ?screen, "switching screen");
        self.unmount_screen();
        self.screen = screen;
        self.mount_screen()
    }

    // ----- data -------------------------------------------------------------

    /// Applies rows loaded for `generation`. Returns false if they are stale.
    pub fn accept_rows(&mut self, generation: u64, rows: RowSet) -> bool {
        match rows {
            RowSet::Users(rows) => self.users.accept_rows(generation, rows),
            RowSet::Products(rows) => self.products.accept_rows(generation, rows),
            RowSet::Orders(rows) => self.orders.accept_rows(generation, rows),
        }
    }

    /// Records a failed load. `None` means the dashboard metrics.
    pub fn accept_load_failure(&mut self, kind: Option<EntityKind>, generation: u64, message: &str) -> bool {
        match kind {
            Some(EntityKind::Users) => self.users.accept_failure(generation, message),
            Some(EntityKind::Products) => self.products.accept_failure(generation, message),
            Some(EntityKind::Orders) => self.orders.accept_failure(generation, message),
            None => {
                if generation != self.metrics_generation {
                    tracing::debug!(generation, "dropping stale metrics failure");
                    return false;
                }
                self.metrics_load = LoadState::Failed(message.to_string());
                true
            }
        }
    }

    /// Applies dashboard figures loaded for `generation`. Returns false if stale.
    pub fn accept_metrics(&mut self, generation: u64, metrics: DashboardMetrics, recent_orders: Vec<Order>) -> bool {
        if generation != self.metrics_generation {
            tracing::debug!(generation, current = self.metrics_generation, "dropping stale metrics");
            return false;
        }
        self.metrics = Some(metrics);
        self.recent_orders = recent_orders;
        self.metrics_load = LoadState::Loaded;
        true
    }

    // ----- settings ---------------------------------------------------------

    /// Replaces the settings and re-resolves the theme.
    pub fn apply_settings(&mut self, settings: Settings) {
        self.settings = settings;
        self.theme = self.theme_source.resolve(&self.settings);
    }

    /// Re-resolves the theme and returns the request that persists the settings.
    pub fn settings_changed(&mut self) -> Action {
        self.theme = self.theme_source.resolve(&self.settings);
        Action::PostToWorker(WorkerMessage::save_settings(self.settings))
    }

    /// Brings the bulk bar in line with the active list's selection.
    pub fn sync_bulk_bar(&mut self) {
        let count = self.active_list().map_or(0, |list| list.selected_count());
        self.bulk_bar.sync(count);
    }

    // ----- view model -------------------------------------------------------

    /// Builds the display snapshot for a pane of `rows` x `cols` cells.
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize, cols: usize) -> UIViewModel {
        let kind = self.screen.entity();

        UIViewModel {
            header: self.compute_header(),
            nav: self.compute_nav(cols),
            body: self.compute_body(rows),
            bulk_bar: kind.and_then(|kind| self.compute_bulk_bar(kind)),
            confirm: kind.and_then(|kind| {
                self.bulk_bar.confirm_prompt(kind).map(|prompt| ConfirmInfo {
                    title: prompt.title,
                    body: prompt.body,
                    hint: "y/Enter: delete  n/Esc: cancel".to_string(),
                })
            }),
            modal: self.compute_modal(),
            form: self.compute_form(),
            notification: self.notifications.latest().map(|n| NotificationInfo {
                level: n.level,
                message: n.message.clone(),
            }),
            footer: self.compute_footer(),
        }
    }

    fn compute_header(&self) -> HeaderInfo {
        let subtitle = match self.active_list() {
            Some(list) => {
                let total = list.row_count();
                format!("{total} {}", list.kind().label_for(total))
            }
            None if self.screen == Screen::Dashboard => "Store overview".to_string(),
            None => "Appearance and layout".to_string(),
        };
        HeaderInfo {
            title: format!(" {} ", self.screen.title()),
            subtitle,
        }
    }

    fn compute_nav(&self, cols: usize) -> NavInfo {
        NavInfo {
            items: Screen::ALL
                .iter()
                .map(|&screen| NavItem {
                    hotkey: screen.hotkey(),
                    label: screen.title(),
                    active: screen == self.screen,
                })
                .collect(),
            collapsed: self.settings.sidebar_collapsed() || cols < NAV_MIN_COLS,
        }
    }

    fn compute_body(&self, rows: usize) -> BodyViewModel {
        match self.screen {
            Screen::Dashboard => self.compute_dashboard(rows),
            Screen::Settings => BodyViewModel::Settings(self.compute_settings()),
            Screen::Users | Screen::Products | Screen::Orders => self.active_list().map_or_else(
                || {
                    BodyViewModel::Placeholder(EmptyState {
                        message: "Nothing to show".to_string(),
                        subtitle: String::new(),
                    })
                },
                |list| {
                    let mut table = list.table(self.input_mode == InputMode::Filter);
                    if self.screen == Screen::Orders {
                        table.summary = self.order_status_summary();
                    }
                    BodyViewModel::Table(table)
                },
            ),
        }
    }

    /// "Pending: 1  Delivered: 2  Cancelled: 1" over every loaded order, filter or not.
    fn order_status_summary(&self) -> Option<String> {
        let orders = self.orders.view.rows();
        if orders.is_empty() {
            return None;
        }
        let counts = DashboardMetrics::compute(&[], &[], orders);
        Some(format!(
            "Pending: {}  Delivered: {}  Cancelled: {}",
            counts.pending_orders, counts.delivered_orders, counts.cancelled_orders
        ))
    }

    fn compute_dashboard(&self, rows: usize) -> BodyViewModel {
        let Some(metrics) = &self.metrics else {
            let (message, subtitle) = match &self.metrics_load {
                LoadState::Failed(message) => (
                    "Failed to load dashboard".to_string(),
                    format!("{message} (press r to retry)"),
                ),
                _ => ("Loading dashboard...".to_string(), String::new()),
            };
            return BodyViewModel::Placeholder(EmptyState { message, subtitle });
        };

        let in_progress = metrics
            .total_orders
            .saturating_sub(metrics.pending_orders + metrics.delivered_orders + metrics.cancelled_orders);

        let cards = vec![
            MetricCard {
                label: "Total Orders".to_string(),
                value: metrics.total_orders.to_string(),
                hint: format!("{} pending", metrics.pending_orders),
            },
            MetricCard {
                label: "Total Revenue".to_string(),
                value: format!("${:.2}", metrics.total_revenue),
                hint: "excluding cancelled".to_string(),
            },
            MetricCard {
                label: "Total Users".to_string(),
                value: metrics.total_users.to_string(),
                hint: "registered accounts".to_string(),
            },
            MetricCard {
                label: "Total Products".to_string(),
                value: metrics.total_products.to_string(),
                hint: format!("{} low on stock", metrics.low_stock_products),
            },
        ];

        let status_breakdown = vec![
            ("Pending".to_string(), metrics.pending_orders),
            ("In progress".to_string(), in_progress),
            ("Delivered".to_string(), metrics.delivered_orders),
            ("Cancelled".to_string(), metrics.cancelled_orders),
        ];

        let room = rows.saturating_sub(DASHBOARD_CHROME_ROWS).max(1);
        let recent_orders = self
            .recent_orders
            .iter()
            .take(room)
            .map(|order| RecentOrderRow {
                id: order.id.clone(),
                customer: order.customer_name.clone(),
                total: format!("${:.2}", order.total_price),
                status: order.status.label().to_string(),
                date: display_date(&order.order_date),
            })
            .collect();

        BodyViewModel::Dashboard(DashboardInfo {
            cards,
            status_breakdown,
            recent_orders,
        })
    }

    fn compute_settings(&self) -> SettingsInfo {
        let mode = match self.settings.theme_mode() {
            ThemeMode::Light => "Light",
            ThemeMode::Dark => "Dark",
        };
        let mut entries = vec![
            SettingsEntry {
                label: "Theme".to_string(),
                value: mode.to_string(),
                key_hint: "t".to_string(),
            },
            SettingsEntry {
                label: "Accent colour".to_string(),
                value: self.settings.accent().label().to_string(),
                key_hint: "p".to_string(),
            },
            SettingsEntry {
                label: "Sidebar".to_string(),
                value: if self.settings.sidebar_collapsed() { "Collapsed" } else { "Expanded" }.to_string(),
                key_hint: "b".to_string(),
            },
        ];
        if self.theme_source != ThemeSource::FollowSettings {
            entries.push(SettingsEntry {
                label: "Palette".to_string(),
                value: format!("{} (from plugin config)", self.theme.name),
                key_hint: String::new(),
            });
        }
        entries.push(SettingsEntry {
            label: "Data file".to_string(),
            value: strip_host_prefix(&self.store_location.store_file.to_string_lossy()),
            key_hint: String::new(),
        });
        SettingsInfo { entries }
    }

    fn compute_bulk_bar(&self, kind: EntityKind) -> Option<BulkBarInfo> {
        let summary = self.bulk_bar.summary(kind)?;
        let busy = self.bulk_bar.is_busy();
        let hint = if busy {
            "Deleting...".to_string()
        } else {
            "d: delete  c: cancel".to_string()
        };
        Some(BulkBarInfo { summary, hint, busy })
    }

    fn compute_modal(&self) -> Option<ModalInfo> {
        let (title, subtitle) = self.modal.heading()?;
        let hint = if self.modal.is_editable() {
            "s/S: change status  Esc/q: close"
        } else if self.modal.product().is_some() {
            "e: edit  Esc/q: close"
        } else {
            "Esc/q: close"
        };
        Some(ModalInfo {
            title,
            subtitle,
            sections: self
                .modal
                .sections()
                .into_iter()
                .map(|section| (section.title, section.lines))
                .collect(),
            hint: hint.to_string(),
        })
    }

    fn compute_form(&self) -> Option<FormInfo> {
        let form = self.product_form.as_ref()?;
        let fields = ProductField::ALL
            .into_iter()
            .map(|field| FormFieldRow {
                label: field.label(),
                value: form.value(field).to_string(),
                focused: field == form.focused(),
                choice: !field.is_text(),
                error: form.error(field),
            })
            .collect();
        let hint = if form.is_saving() {
            "Saving..."
        } else {
            "Tab/Up/Down: field  Left/Right: pick  Enter: save  Esc: cancel"
        };
        Some(FormInfo {
            title: form.title().to_string(),
            fields,
            error: form.save_error().map(|e| format!("Failed to save product: {e}")),
            hint: hint.to_string(),
            saving: form.is_saving(),
        })
    }

    fn compute_footer(&self) -> FooterInfo {
        let keybindings = if self.bulk_bar.is_confirming() {
            "y/Enter: confirm delete  n/Esc: cancel"
        } else if self.input_mode == InputMode::Form {
            "Type to edit  Tab: next field  Enter: save  Esc: cancel"
        } else if self.modal.product().is_some() {
            "e: edit  Esc/q: close"
        } else if self.modal.is_open() {
            "s/S: status  Esc/q: close"
        } else if self.input_mode == InputMode::Filter {
            "Type to filter  Enter: keep  Esc: clear"
        } else {
            match self.screen {
                Screen::Dashboard => "1-5: screens  r: reload  t: theme  b: sidebar  q: hide",
                Screen::Settings => "1-5: screens  t: theme  p: accent  b: sidebar  q: hide",
                Screen::Orders => "j/k: move  h/l: page  Tab/s: sort  /: filter  Enter: details  r: reload  q: hide",
                Screen::Products => {
                    "j/k: move  Tab/s: sort  /: filter  Enter: details  n: new  e: edit  Space/a/A: select  d: delete"
                }
                Screen::Users => {
                    "j/k: move  h/l: page  Tab/s: sort  /: filter  Space/a/A: select  d: delete  q: hide"
                }
            }
        };
        FooterInfo {
            keybindings: keybindings.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::seed;
    use crate::ui::viewmodel::BodyViewModel;
    use std::path::PathBuf;

    fn state() -> AppState {
        let location = StoreLocation {
            store_file: PathBuf::from("/tmp/store.json"),
            settings_file: PathBuf::from("/tmp/settings.toml"),
            seed_demo: true,
        };
        AppState::new(location, 4, ThemeSource::FollowSettings).unwrap()
    }

    #[test]
    fn mounting_a_list_requests_its_rows() {
        let mut state = state();
        let actions = state.switch_screen(Screen::Products);
        assert_eq!(actions.len(), 1);
        let Action::PostToWorker(WorkerMessage::LoadRows { kind, generation, .. }) = &actions[0] else {
            panic!("unexpected action: {actions:?}");
        };
        assert_eq!(*kind, EntityKind::Products);
        assert_eq!(*generation, state.products.generation());
        assert!(state.products.load.is_loading());
    }

    #[test]
    fn rows_for_an_unmounted_screen_are_dropped() {
        let mut state = state();
        state.switch_screen(Screen::Users);
        let stale = state.users.generation();
        state.switch_screen(Screen::Dashboard);

        let rows = RowSet::Users(seed::demo_data().unwrap().users);
        assert!(!state.accept_rows(stale, rows));
        assert!(state.users.view.is_empty());
    }

    #[test]
    fn dashboard_view_model_after_metrics() {
        let mut state = state();
        state.mount_screen();
        let data = seed::demo_data().unwrap();
        let metrics = DashboardMetrics::compute(&data.users, &data.products, &data.orders);
        assert!(state.accept_metrics(state.metrics_generation(), metrics, data.orders.clone()));

        let vm = state.compute_viewmodel(40, 120);
        let BodyViewModel::Dashboard(dashboard) = vm.body else {
            panic!("expected dashboard body");
        };
        assert_eq!(dashboard.cards.len(), 4);
        assert_eq!(dashboard.cards[0].value, "8");
        assert_eq!(dashboard.status_breakdown.iter().map(|(_, n)| n).sum::<usize>(), 8);
        assert_eq!(dashboard.recent_orders[0].id, "ORD-001");
    }

    #[test]
    fn narrow_pane_collapses_navigation() {
        let state = state();
        assert!(!state.compute_viewmodel(30, 120).nav.collapsed);
        assert!(state.compute_viewmodel(30, 40).nav.collapsed);
    }

    #[test]
    fn orders_table_carries_status_summary() {
        let mut state = state();
        state.switch_screen(Screen::Orders);
        let rows = RowSet::Orders(seed::demo_data().unwrap().orders);
        assert!(state.accept_rows(state.orders.generation(), rows));

        let BodyViewModel::Table(table) = state.compute_viewmodel(30, 120).body else {
            panic!("expected table body");
        };
        assert_eq!(table.summary.as_deref(), Some("Pending: 1  Delivered: 2  Cancelled: 1"));

        state.switch_screen(Screen::Users);
        let BodyViewModel::Table(table) = state.compute_viewmodel(30, 120).body else {
            panic!("expected table body");
        };
        assert!(table.summary.is_none());
    }

    #[test]
    fn open_form_is_part_of_the_view_model() {
        let mut state = state();
        assert!(state.compute_viewmodel(30, 120).form.is_none());

        state.product_form = Some(ProductForm::create());
        state.input_mode = InputMode::Form;
        let vm = state.compute_viewmodel(30, 120);
        let form = vm.form.unwrap();
        assert_eq!(form.title, "Add New Product");
        assert_eq!(form.fields.len(), ProductField::ALL.len());
        assert!(form.fields[0].focused);
        assert_eq!(form.fields[6].value, "In Stock");
        assert!(vm.footer.keybindings.contains("Enter: save"));

        state.unmount_screen();
        assert!(state.product_form.is_none());
    }
}
