//! Application layer coordinating state, events, and actions.
//!
//! Sits between the plugin runtime (`main.rs`) and the domain, view, and
//! worker layers.
//!
//! ```text
//! Key / Timer → Event → handle_event → AppState mutation → Actions → shim
//!                  ↑                                           ↓
//!                  └───────────── WorkerResponse ◀──── store worker
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effects emitted by the event handler
//! - [`handler`]: Event processing
//! - [`state`]: Central state container and view model computation
//! - [`list`]: One list screen and its load lifecycle
//! - [`columns`]: Column sets for users, products, and orders
//! - [`bulk_bar`]: Confirm-then-delete lifecycle over a selection
//! - [`detail_modal`]: Order and product detail modal, with an order status editor
//! - [`product_form`]: Product create/edit form and its validation state
//! - [`notifications`]: Expiring status-line messages
//! - [`modes`]: Screens, input mode, and load state

pub mod actions;
pub mod bulk_bar;
pub mod columns;
pub mod detail_modal;
pub mod handler;
pub mod list;
pub mod modes;
pub mod notifications;
pub mod product_form;
pub mod state;

pub use actions::Action;
pub use bulk_bar::{BulkActionBar, BulkBarState, ConfirmPrompt};
pub use columns::{order_columns, product_columns, user_columns};
pub use detail_modal::{DetailModal, ModalSection, StatusChange};
pub use handler::{handle_event, Event};
pub use list::{ListControl, ListScreen};
pub use modes::{InputMode, LoadState, Screen};
pub use notifications::{Notification, NotificationLevel, Notifications};
pub use product_form::{FormMode, ProductForm};
pub use state::AppState;
