//! Domain layer for the shopdash plugin.
//!
//! Holds the record types of the three managed collections, the value model
//! used for filtering and sorting, dashboard aggregates, and the crate error
//! type. Nothing here depends on Zellij or on storage.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`entity`]: Collection kinds and their labels
//! - [`record`]: The [`Record`] trait and [`FieldValue`]
//! - [`user`], [`product`], [`order`]: Concrete records
//! - [`product_draft`]: Product form input and validation
//! - [`metrics`]: Dashboard aggregates
//! - [`settings`]: Appearance preferences

pub mod entity;
pub mod error;
pub mod metrics;
pub mod order;
pub mod product;
pub mod product_draft;
pub mod record;
pub mod settings;
pub mod user;

pub use entity::EntityKind;
pub use error::{Result, ShopdashError};
pub use metrics::DashboardMetrics;
pub use order::{Order, OrderItem, OrderStatus, PaymentMethod, ShippingAddress};
pub use product::{Product, ProductStatus, StockLevel, LOW_STOCK_THRESHOLD};
pub use product_draft::{brands_for, check_field, parse_price, parse_stock, ProductDraft, ProductField, CATEGORIES};
pub use record::{display_date, parse_iso_date, FieldValue, Record};
pub use settings::{Accent, Settings, ThemeMode};
pub use user::{User, UserRole, UserStatus};
