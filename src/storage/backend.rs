//! Storage backend abstraction.
//!
//! [`DocumentStore`] is the only way the worker touches persisted dashboard
//! data. Each method maps to one worker message, so the trait stays as small as
//! the set of things the UI can ask for.

use crate::domain::{
    parse_iso_date, DashboardMetrics, EntityKind, Order, OrderStatus, Product, ProductDraft, Result, User,
};
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;

/// Orders listed under "Recent orders" on the dashboard.
pub const RECENT_ORDERS_LIMIT: usize = 5;

/// Rows of one collection, tagged with their kind so they can cross the
/// worker boundary as a single JSON value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RowSet {
    Users(Vec<User>),
    Products(Vec<Product>),
    Orders(Vec<Order>),
}

impl RowSet {
    #[must_use]
    pub const fn kind(&self) -> EntityKind {
        match self {
            Self::Users(_) => EntityKind::Users,
            Self::Products(_) => EntityKind::Products,
            Self::Orders(_) => EntityKind::Orders,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Users(rows) => rows.len(),
            Self::Products(rows) => rows.len(),
            Self::Orders(rows) => rows.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Abstraction over the persisted document holding every collection.
///
/// Implementations are used from the single worker thread, hence `Send` only.
///
/// # Implementations
///
/// - [`JsonDocumentStore`](crate::storage::JsonDocumentStore): one JSON file, atomic writes
///
/// # Examples
///
/// ```no_run
/// use shopdash::domain::EntityKind;
/// use shopdash::storage::{DocumentStore, JsonDocumentStore};
/// use std::path::PathBuf;
///
/// let mut store = JsonDocumentStore::open(PathBuf::from("/tmp/store.json"), true)?;
/// let removed = store.delete_many(EntityKind::Products, &["3".to_string()])?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub trait DocumentStore: Send {
    /// All users in stored order.
    ///
    /// # Errors
    ///
    /// Returns an error if the read operation fails.
    fn users(&self) -> Result<Vec<User>>;

    /// All products in stored order.
    ///
    /// # Errors
    ///
    /// Returns an error if the read operation fails.
    fn products(&self) -> Result<Vec<Product>>;

    /// All orders in stored order.
    ///
    /// # Errors
    ///
    /// Returns an error if the read operation fails.
    fn orders(&self) -> Result<Vec<Order>>;

    /// Loads one collection as a [`RowSet`].
    ///
    /// # Errors
    ///
    /// Returns an error if the read operation fails.
    fn load(&self, kind: EntityKind) -> Result<RowSet> {
        Ok(match kind {
            EntityKind::Users => RowSet::Users(self.users()?),
            EntityKind::Products => RowSet::Products(self.products()?),
            EntityKind::Orders => RowSet::Orders(self.orders()?),
        })
    }

    /// Deletes every record of `kind` whose id is in `ids`.
    ///
    /// All or nothing: if any id is unknown, nothing is deleted and
    /// [`ShopdashError::NotFound`](crate::domain::ShopdashError::NotFound) names
    /// the first missing id. Returns the number of deleted records.
    ///
    /// # Errors
    ///
    /// Returns an error if an id is unknown or the write fails.
    fn delete_many(&mut self, kind: EntityKind, ids: &[String]) -> Result<usize>;

    /// Sets the status of one order and returns the updated order.
    ///
    /// # Errors
    ///
    /// Returns an error if the order does not exist or the write fails.
    fn update_order_status(&mut self, id: &str, status: OrderStatus) -> Result<Order>;

    /// Adds a product built from `draft` and returns it with its new id.
    ///
    /// The draft is validated again before anything is written.
    ///
    /// # Errors
    ///
    /// Returns [`ShopdashError::Validation`](crate::domain::ShopdashError::Validation)
    /// for an invalid draft, or an error if the write fails.
    fn insert_product(&mut self, draft: &ProductDraft) -> Result<Product>;

    /// Replaces the editable fields of product `id` and returns the result.
    ///
    /// # Parameters
    ///
    /// * `id` - Id of the product to edit; it is kept
    /// * `draft` - The new field values
    ///
    /// # Errors
    ///
    /// Returns an error if the product does not exist, the draft is invalid or
    /// the write fails.
    fn update_product(&mut self, id: &str, draft: &ProductDraft) -> Result<Product>;

    /// Computes dashboard aggregates over all collections.
    ///
    /// # Errors
    ///
    /// Returns an error if the read operation fails.
    fn metrics(&self) -> Result<DashboardMetrics> {
        Ok(DashboardMetrics::compute(&self.users()?, &self.products()?, &self.orders()?))
    }

    /// The `limit` newest orders by order date. Undated orders come last.
    ///
    /// # Errors
    ///
    /// Returns an error if the read operation fails.
    fn recent_orders(&self, limit: usize) -> Result<Vec<Order>> {
        let mut orders = self.orders()?;
        orders.sort_by_key(|o| Reverse(parse_iso_date(&o.order_date)));
        orders.truncate(limit);
        Ok(orders)
    }
}
