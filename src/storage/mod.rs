//! Persistence for dashboard data and user settings.
//!
//! Everything here runs on the background worker.
//!
//! # Modules
//!
//! - `backend`: [`DocumentStore`] trait and the [`RowSet`] transfer type
//! - `json`: JSON file document store
//! - `settings`: TOML settings file
//! - `seed`: Bundled demo data for fresh stores

pub mod backend;
pub mod json;
pub mod seed;
pub mod settings;

pub use backend::{DocumentStore, RowSet, RECENT_ORDERS_LIMIT};
pub use json::JsonDocumentStore;
pub use settings::SettingsStore;
