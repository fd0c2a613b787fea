//! Catalogue products.

use super::record::{FieldValue, Record};
use serde::{Deserialize, Serialize};

/// Stock below this count is reported as low.
pub const LOW_STOCK_THRESHOLD: u32 = 15;

/// Availability flag stored with the product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProductStatus {
    #[serde(rename = "In Stock")]
    InStock,
    #[serde(rename = "Out of Stock")]
    OutOfStock,
}

impl ProductStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InStock => "In Stock",
            Self::OutOfStock => "Out of Stock",
        }
    }
}

/// Stock classification used for colouring the stock column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockLevel {
    Out,
    Low,
    Healthy,
}

/// A product as stored in the `products` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    pub stock: u32,
    #[serde(default)]
    pub image: String,
    pub category: String,
    pub brand: String,
    pub status: ProductStatus,
    pub created_at: String,
    pub updated_at: String,
}

impl Product {
    /// Classifies the current stock count.
    ///
    /// ```
    /// use shopdash::domain::{Product, StockLevel};
    /// # use shopdash::domain::ProductStatus;
    /// # let mut p = Product { id: "1".into(), name: "Mug".into(), description: String::new(),
    /// #     price: 9.5, stock: 0, image: String::new(), category: "Home".into(),
    /// #     brand: "IKEA".into(), status: ProductStatus::OutOfStock,
    /// #     created_at: "2024-01-01".into(), updated_at: "2024-01-01".into() };
    /// assert_eq!(p.stock_level(), StockLevel::Out);
    /// p.stock = 14;
    /// assert_eq!(p.stock_level(), StockLevel::Low);
    /// p.stock = 15;
    /// assert_eq!(p.stock_level(), StockLevel::Healthy);
    /// ```
    #[must_use]
    pub const fn stock_level(&self) -> StockLevel {
        if self.stock == 0 {
            StockLevel::Out
        } else if self.stock < LOW_STOCK_THRESHOLD {
            StockLevel::Low
        } else {
            StockLevel::Healthy
        }
    }
}

impl Record for Product {
    const FIELD_KEYS: &'static [&'static str] = &[
        "id",
        "name",
        "description",
        "price",
        "stock",
        "image",
        "category",
        "brand",
        "status",
        "createdAt",
        "updatedAt",
    ];

    fn id(&self) -> &str {
        &self.id
    }

    fn field(&self, key: &str) -> Option<FieldValue> {
        Some(match key {
            "id" => FieldValue::text(&self.id),
            "name" => FieldValue::text(&self.name),
            "description" => FieldValue::text(&self.description),
            "price" => FieldValue::Number(self.price),
            "stock" => FieldValue::Number(f64::from(self.stock)),
            "image" => FieldValue::text(&self.image),
            "category" => FieldValue::text(&self.category),
            "brand" => FieldValue::text(&self.brand),
            "status" => FieldValue::text(self.status.as_str()),
            "createdAt" => FieldValue::text(&self.created_at),
            "updatedAt" => FieldValue::text(&self.updated_at),
            _ => return None,
        })
    }
}
