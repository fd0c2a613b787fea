//! JSON file-based document store.
//!
//! Keeps every collection in one human-readable JSON document, loaded fully into
//! memory on open and rewritten on every mutation. Writes go to a temporary file
//! that is then renamed over the target, so a crash never leaves a truncated
//! document behind.
//!
//! # File Format
//!
//! ```json
//! {
//!   "version": 1,
//!   "users": [ { "id": "1", "name": "John Doe", "email": "john.doe@example.com", ... } ],
//!   "products": [ { "id": "1", "name": "Wireless Bluetooth Headphones", "price": 199.99, ... } ],
//!   "orders": [ { "id": "ORD-001", "customerName": "John Doe", "status": "delivered", ... } ]
//! }
//! ```

use crate::domain::{
    EntityKind, Order, OrderStatus, Product, ProductDraft, Record, Result, ShopdashError, User,
};
use crate::storage::backend::DocumentStore;
use crate::storage::seed;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

const DOCUMENT_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoreDocument {
    /// Format version for future migrations.
    version: u32,
    #[serde(default)]
    users: Vec<User>,
    #[serde(default)]
    products: Vec<Product>,
    #[serde(default)]
    orders: Vec<Order>,
}

impl Default for StoreDocument {
    fn default() -> Self {
        Self {
            version: DOCUMENT_VERSION,
            users: Vec::new(),
            products: Vec::new(),
            orders: Vec::new(),
        }
    }
}

/// JSON file document store.
///
/// `Send` but not `Sync`; owned by the worker thread.
pub struct JsonDocumentStore {
    file_path: PathBuf,
    data: StoreDocument,
    /// Set by mutations, cleared by a successful save.
    dirty: bool,
}

impl JsonDocumentStore {
    /// Opens the document at `file_path`, creating parent directories.
    ///
    /// A missing file starts empty, or with the bundled demo data when
    /// `seed_demo` is set. The seeded document is written immediately.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created, the file exists but
    /// is not a valid document, or the seeded document cannot be written.
    pub fn open(file_path: PathBuf, seed_demo: bool) -> Result<Self> {
        let _span = tracing::debug_span!("json_store_open", path = ?file_path, seed_demo).entered();

        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let (data, dirty) = if file_path.exists() {
            (Self::load_from_file(&file_path)?, false)
        } else if seed_demo {
            tracing::info!("store file missing, seeding demo data");
            let demo = seed::demo_data()?;
            let data = StoreDocument {
                version: DOCUMENT_VERSION,
                users: demo.users,
                products: demo.products,
                orders: demo.orders,
            };
            (data, true)
        } else {
            tracing::debug!("store file missing, starting empty");
            (StoreDocument::default(), false)
        };

        let mut store = Self {
            file_path,
            data,
            dirty,
        };
        store.save_to_file()?;

        tracing::debug!(
            users = store.data.users.len(),
            products = store.data.products.len(),
            orders = store.data.orders.len(),
            "store opened"
        );
        Ok(store)
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.file_path
    }

    fn load_from_file(path: &Path) -> Result<StoreDocument> {
        let contents = std::fs::read_to_string(path)?;
        let data: StoreDocument = serde_json::from_str(&contents)
            .map_err(|e| ShopdashError::Storage(format!("failed to parse JSON: {e}")))?;

        if data.version > DOCUMENT_VERSION {
            tracing::warn!(version = data.version, "store written by a newer version");
        }
        Ok(data)
    }

    /// Writes the document if dirty, via temp file and rename.
    fn save_to_file(&mut self) -> Result<()> {
        if !self.dirty {
            tracing::trace!("skipping save, no changes");
            return Ok(());
        }

        let json = serde_json::to_string_pretty(&self.data)?;
        let tmp_path = self.file_path.with_extension("tmp");
        std::fs::write(&tmp_path, json)?;
        std::fs::rename(&tmp_path, &self.file_path)?;

        self.dirty = false;
        tracing::debug!(path = ?self.file_path, "store saved");
        Ok(())
    }

    /// Persists a mutation, restoring `snapshot` if the write fails.
    fn commit(&mut self, snapshot: StoreDocument) -> Result<()> {
        self.dirty = true;
        if let Err(e) = self.save_to_file() {
            tracing::warn!(error = %e, "save failed, rolling back in-memory change");
            self.data = snapshot;
            self.dirty = false;
            return Err(e);
        }
        Ok(())
    }
}

/// Next free product id: one past the largest numeric id.
fn next_product_id(products: &[Product]) -> String {
    let max = products.iter().filter_map(|p| p.id.parse::<u64>().ok()).max().unwrap_or(0);
    let mut next = max + 1;
    while products.iter().any(|p| p.id == next.to_string()) {
        next += 1;
    }
    next.to_string()
}

fn today() -> String {
    chrono::Utc::now().date_naive().to_string()
}

/// Removes every row whose id is in `ids`, or none if any id is missing.
fn remove_all<R: Record>(rows: &mut Vec<R>, kind: EntityKind, ids: &[String]) -> Result<usize> {
    let present: HashSet<&str> = rows.iter().map(|r| r.id()).collect();
    if let Some(missing) = ids.iter().find(|id| !present.contains(id.as_str())) {
        return Err(ShopdashError::NotFound {
            kind,
            id: missing.clone(),
        });
    }

    let doomed: HashSet<&str> = ids.iter().map(String::as_str).collect();
    let before = rows.len();
    rows.retain(|r| !doomed.contains(r.id()));
    Ok(before - rows.len())
}

impl DocumentStore for JsonDocumentStore {
    fn users(&self) -> Result<Vec<User>> {
        Ok(self.data.users.clone())
    }

    fn products(&self) -> Result<Vec<Product>> {
        Ok(self.data.products.clone())
    }

    fn orders(&self) -> Result<Vec<Order>> {
        Ok(self.data.orders.clone())
    }

    fn delete_many(&mut self, kind: EntityKind, ids: &[String]) -> Result<usize> {
        let _span = tracing::debug_span!("json_delete_many", %kind, count = ids.len()).entered();

        let snapshot = self.data.clone();
        let removed = match kind {
            EntityKind::Users => remove_all(&mut self.data.users, kind, ids)?,
            EntityKind::Products => remove_all(&mut self.data.products, kind, ids)?,
            EntityKind::Orders => remove_all(&mut self.data.orders, kind, ids)?,
        };

        if removed > 0 {
            self.commit(snapshot)?;
        }

        tracing::debug!(removed, "records deleted");
        Ok(removed)
    }

    fn update_order_status(&mut self, id: &str, status: OrderStatus) -> Result<Order> {
        let _span =
            tracing::debug_span!("json_update_order_status", id, status = status.as_str()).entered();

        let snapshot = self.data.clone();
        let order = self
            .data
            .orders
            .iter_mut()
            .find(|o| o.id == id)
            .ok_or_else(|| ShopdashError::NotFound {
                kind: EntityKind::Orders,
                id: id.to_string(),
            })?;

        let previous = order.status;
        order.status = status;
        let updated = order.clone();

        if previous != status {
            self.commit(snapshot)?;
        }

        tracing::debug!(previous = previous.as_str(), "order status updated");
        Ok(updated)
    }

    fn insert_product(&mut self, draft: &ProductDraft) -> Result<Product> {
        let _span = tracing::debug_span!("json_insert_product", name = %draft.name).entered();
        draft.validate()?;

        let snapshot = self.data.clone();
        let id = next_product_id(&self.data.products);
        let product = draft.clone().into_product(id, today());
        self.data.products.push(product.clone());
        self.commit(snapshot)?;

        tracing::debug!(id = %product.id, "product inserted");
        Ok(product)
    }

    fn update_product(&mut self, id: &str, draft: &ProductDraft) -> Result<Product> {
        let _span = tracing::debug_span!("json_update_product", id).entered();
        draft.validate()?;

        let snapshot = self.data.clone();
        let product = self
            .data
            .products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| ShopdashError::NotFound {
                kind: EntityKind::Products,
                id: id.to_string(),
            })?;

        draft.apply_to(product, today());
        let updated = product.clone();
        self.commit(snapshot)?;

        tracing::debug!("product updated");
        Ok(updated)
    }
}

impl Drop for JsonDocumentStore {
    fn drop(&mut self) {
        if self.dirty {
            tracing::debug!("saving dirty data on drop");
            if let Err(e) = self.save_to_file() {
                tracing::error!(error = %e, "failed to save on drop");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ProductStatus;

    fn open_seeded(dir: &tempfile::TempDir) -> JsonDocumentStore {
        JsonDocumentStore::open(dir.path().join("store.json"), true).unwrap()
    }

    #[test]
    fn missing_file_is_seeded_and_written() {
        let dir = tempfile::tempdir().unwrap();
        let store = open_seeded(&dir);
        assert!(store.path().exists());
        assert_eq!(store.users().unwrap().len(), 10);
    }

    #[test]
    fn missing_file_without_seed_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonDocumentStore::open(dir.path().join("nested/store.json"), false).unwrap();
        assert!(store.orders().unwrap().is_empty());
    }

    #[test]
    fn delete_many_is_all_or_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = open_seeded(&dir);

        let err = store
            .delete_many(EntityKind::Products, &["1".to_string(), "nope".to_string()])
            .unwrap_err();
        assert!(matches!(err, ShopdashError::NotFound { id, .. } if id == "nope"));
        assert_eq!(store.products().unwrap().len(), 10);

        let removed = store
            .delete_many(EntityKind::Products, &["1".to_string(), "2".to_string()])
            .unwrap();
        assert_eq!(removed, 2);
        assert_eq!(store.products().unwrap().len(), 8);
    }

    #[test]
    fn changes_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        {
            let mut store = open_seeded(&dir);
            store.delete_many(EntityKind::Users, &["3".to_string()]).unwrap();
            store.update_order_status("ORD-004", OrderStatus::Shipped).unwrap();
        }

        let store = open_seeded(&dir);
        assert!(store.users().unwrap().iter().all(|u| u.id != "3"));
        let order = store.orders().unwrap().into_iter().find(|o| o.id == "ORD-004").unwrap();
        assert_eq!(order.status, OrderStatus::Shipped);
    }

    #[test]
    fn failed_save_leaves_memory_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("nested");
        let mut store = JsonDocumentStore::open(nested.join("store.json"), true).unwrap();
        std::fs::remove_dir_all(&nested).unwrap();

        assert!(store.delete_many(EntityKind::Users, &["1".to_string()]).is_err());
        assert_eq!(store.users().unwrap().len(), 10);
        assert!(store.update_order_status("ORD-004", OrderStatus::Shipped).is_err());
        let order = store.orders().unwrap().into_iter().find(|o| o.id == "ORD-004").unwrap();
        assert_eq!(order.status, OrderStatus::Pending);
    }

    #[test]
    fn unknown_order_status_update_fails() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = open_seeded(&dir);
        let err = store.update_order_status("ORD-999", OrderStatus::Pending).unwrap_err();
        assert_eq!(err.to_string(), "order not found: ORD-999");
    }

    fn lamp() -> ProductDraft {
        ProductDraft {
            name: "Desk Lamp".to_string(),
            description: "Adjustable LED lamp".to_string(),
            price: 34.5,
            stock: 12,
            image: String::new(),
            category: "Home & Garden".to_string(),
            brand: "Philips".to_string(),
            status: ProductStatus::InStock,
        }
    }

    #[test]
    fn inserted_product_gets_next_id_and_persists() {
        let dir = tempfile::tempdir().unwrap();
        {
            let mut store = open_seeded(&dir);
            let product = store.insert_product(&lamp()).unwrap();
            assert_eq!(product.id, "11");
            assert_eq!(product.created_at, product.updated_at);
        }

        let store = open_seeded(&dir);
        let products = store.products().unwrap();
        assert_eq!(products.len(), 11);
        assert_eq!(products.last().unwrap().name, "Desk Lamp");
    }

    #[test]
    fn product_edit_keeps_id_and_creation_date() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = open_seeded(&dir);
        let before = store.products().unwrap().into_iter().find(|p| p.id == "2").unwrap();

        let mut draft = ProductDraft::from(&before);
        draft.price = 149.0;
        draft.stock = 0;
        draft.status = ProductStatus::OutOfStock;
        let after = store.update_product("2", &draft).unwrap();

        assert_eq!(after.id, "2");
        assert_eq!(after.created_at, before.created_at);
        assert_eq!(after.price, 149.0);
        assert_eq!(after.status, ProductStatus::OutOfStock);
        assert_eq!(store.products().unwrap()[1], after);
    }

    #[test]
    fn invalid_or_unknown_product_is_not_written() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = open_seeded(&dir);

        let mut bad = lamp();
        bad.price = 0.0;
        assert!(matches!(store.insert_product(&bad), Err(ShopdashError::Validation(_))));
        assert!(matches!(store.update_product("1", &bad), Err(ShopdashError::Validation(_))));
        assert_eq!(store.products().unwrap().len(), 10);

        let err = store.update_product("999", &lamp()).unwrap_err();
        assert_eq!(err.to_string(), "product not found: 999");
    }

    #[test]
    fn failed_product_save_rolls_back() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("nested");
        let mut store = JsonDocumentStore::open(nested.join("store.json"), true).unwrap();
        let original = store.products().unwrap();
        std::fs::remove_dir_all(&nested).unwrap();

        assert!(store.insert_product(&lamp()).is_err());
        assert!(store.update_product("1", &lamp()).is_err());
        assert_eq!(store.products().unwrap(), original);
    }

    #[test]
    fn corrupt_document_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            JsonDocumentStore::open(path, true),
            Err(ShopdashError::Storage(_))
        ));
    }
}
