//! Demo fixture used to populate a fresh store.

use crate::domain::{Order, Product, Result, ShopdashError, User};
use serde::Deserialize;

const DEMO_DOCUMENT: &str = include_str!("../../data/demo.json");

/// The three collections of the bundled demo document.
#[derive(Debug, Clone, Deserialize)]
pub struct DemoData {
    pub users: Vec<User>,
    pub products: Vec<Product>,
    pub orders: Vec<Order>,
}

/// Parses the bundled demo document.
///
/// # Errors
///
/// Returns [`ShopdashError::Storage`] if the bundled JSON does not match the
/// record types.
pub fn demo_data() -> Result<DemoData> {
    serde_json::from_str(DEMO_DOCUMENT)
        .map_err(|e| ShopdashError::Storage(format!("failed to parse demo data: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{OrderStatus, StockLevel};

    #[test]
    fn demo_document_parses() {
        let data = demo_data().unwrap();
        assert_eq!(data.users.len(), 10);
        assert_eq!(data.products.len(), 10);
        assert_eq!(data.orders.len(), 8);
    }

    #[test]
    fn demo_document_covers_interesting_states() {
        let data = demo_data().unwrap();
        assert!(data.orders.iter().any(|o| o.status == OrderStatus::Cancelled));
        assert!(data.orders.iter().any(|o| o.tracking_number.is_none()));
        assert!(data.products.iter().any(|p| p.stock_level() == StockLevel::Out));
        assert!(data.products.iter().any(|p| p.stock_level() == StockLevel::Low));
    }
}
