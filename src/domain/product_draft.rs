//! Product create/edit input and its validation rules.
//!
//! [`ProductDraft`] is what the product form submits and what the store
//! accepts for inserts and updates. The per-field rules live in
//! [`check_field`] so the form can report an error next to the offending field
//! while the store re-checks the whole draft before writing it.

use super::error::{Result, ShopdashError};
use super::product::{Product, ProductStatus};
use serde::{Deserialize, Serialize};

/// Catalogue categories offered by the form, each with its suggested brands.
pub const CATEGORIES: &[(&str, &[&str])] = &[
    (
        "Electronics",
        &["Apple", "Samsung", "Sony", "LG", "Dell", "HP", "Lenovo", "Microsoft", "Huawei", "Xiaomi"],
    ),
    (
        "Clothing",
        &["Nike", "Adidas", "Zara", "H&M", "Uniqlo", "Gucci", "Louis Vuitton", "Under Armour", "Levi's", "Puma"],
    ),
    (
        "Home & Garden",
        &["IKEA", "Home Depot", "Wayfair", "Ashley Furniture", "Philips", "Dyson", "Whirlpool", "Bosch", "KitchenAid", "GE Appliances"],
    ),
    (
        "Sports",
        &["Nike", "Adidas", "Puma", "Under Armour", "Reebok", "Columbia", "The North Face", "Wilson", "Asics", "New Balance"],
    ),
    (
        "Accessories",
        &["Ray-Ban", "Fossil", "Michael Kors", "Coach", "Prada", "Gucci", "Hermès", "Cartier", "Tiffany & Co.", "Rolex"],
    ),
    (
        "Books",
        &["Penguin Random House", "HarperCollins", "Simon & Schuster", "Macmillan", "Hachette", "Scholastic", "Pearson", "Bloomsbury", "Oxford University Press", "Cambridge University Press"],
    ),
    (
        "Toys",
        &["LEGO", "Mattel", "Hasbro", "Fisher-Price", "NERF", "Playmobil", "Hot Wheels", "Barbie", "Disney", "Melissa & Doug"],
    ),
];

/// Suggested brands for `category`. Empty for unknown categories.
///
/// ```
/// use shopdash::domain::brands_for;
///
/// assert!(brands_for("Toys").contains(&"LEGO"));
/// assert!(brands_for("Groceries").is_empty());
/// ```
#[must_use]
pub fn brands_for(category: &str) -> &'static [&'static str] {
    CATEGORIES
        .iter()
        .find(|(name, _)| *name == category)
        .map_or(&[], |(_, brands)| brands)
}

/// Editable fields of a product, in form order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ProductField {
    Name,
    Description,
    Price,
    Stock,
    Category,
    Brand,
    Status,
    Image,
}

impl ProductField {
    pub const ALL: [Self; 8] = [
        Self::Name,
        Self::Description,
        Self::Price,
        Self::Stock,
        Self::Category,
        Self::Brand,
        Self::Status,
        Self::Image,
    ];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Name => "Product Name",
            Self::Description => "Description",
            Self::Price => "Price",
            Self::Stock => "Stock",
            Self::Category => "Category",
            Self::Brand => "Brand",
            Self::Status => "Status",
            Self::Image => "Image URL",
        }
    }

    /// Whether the field is edited by typing. The others pick from a list.
    #[must_use]
    pub const fn is_text(self) -> bool {
        !matches!(self, Self::Category | Self::Status)
    }
}

/// Checks one raw form input against the rules for `field`.
///
/// Text fields other than the image must not be blank, the price must parse
/// to a number above zero and the stock to a whole number of at least zero.
///
/// # Returns
///
/// The message shown under the field when the input is rejected.
///
/// ```
/// use shopdash::domain::{check_field, ProductField};
///
/// assert_eq!(check_field(ProductField::Price, "0"), Err("Valid price is required"));
/// assert_eq!(check_field(ProductField::Price, "19.90"), Ok(()));
/// assert_eq!(check_field(ProductField::Stock, "-1"), Err("Valid stock quantity is required"));
/// assert_eq!(check_field(ProductField::Image, ""), Ok(()));
/// ```
pub fn check_field(field: ProductField, raw: &str) -> std::result::Result<(), &'static str> {
    let raw = raw.trim();
    let ok = match field {
        ProductField::Price => parse_price(raw).is_some(),
        ProductField::Stock => parse_stock(raw).is_some(),
        ProductField::Image | ProductField::Status => true,
        ProductField::Name | ProductField::Description | ProductField::Category | ProductField::Brand => {
            !raw.is_empty()
        }
    };
    if ok {
        return Ok(());
    }
    Err(match field {
        ProductField::Name => "Product name is required",
        ProductField::Description => "Description is required",
        ProductField::Price => "Valid price is required",
        ProductField::Stock => "Valid stock quantity is required",
        ProductField::Category => "Category is required",
        ProductField::Brand => "Brand is required",
        ProductField::Status | ProductField::Image => "Invalid value",
    })
}

/// Parses a price input. Only finite values above zero are accepted.
#[must_use]
pub fn parse_price(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|p| p.is_finite() && *p > 0.0)
}

/// Parses a stock input. Negative and fractional counts are rejected.
#[must_use]
pub fn parse_stock(raw: &str) -> Option<u32> {
    raw.trim().parse::<u32>().ok()
}

/// The user-editable part of a [`Product`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDraft {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub stock: u32,
    #[serde(default)]
    pub image: String,
    pub category: String,
    pub brand: String,
    pub status: ProductStatus,
}

impl ProductDraft {
    /// Re-checks the draft as a whole.
    ///
    /// # Errors
    ///
    /// Returns [`ShopdashError::Validation`] with the first failing rule.
    pub fn validate(&self) -> Result<()> {
        let price_ok = self.price.is_finite() && self.price > 0.0;
        let checks = [
            check_field(ProductField::Name, &self.name),
            check_field(ProductField::Description, &self.description),
            if price_ok { Ok(()) } else { Err("Valid price is required") },
            check_field(ProductField::Category, &self.category),
            check_field(ProductField::Brand, &self.brand),
        ];
        match checks.into_iter().find_map(std::result::Result::err) {
            Some(message) => Err(ShopdashError::Validation(message.to_string())),
            None => Ok(()),
        }
    }

    /// Builds a stored product. Text fields are trimmed.
    #[must_use]
    pub fn into_product(self, id: String, created_at: String) -> Product {
        Product {
            id,
            name: self.name.trim().to_string(),
            description: self.description.trim().to_string(),
            price: self.price,
            stock: self.stock,
            image: self.image.trim().to_string(),
            category: self.category.trim().to_string(),
            brand: self.brand.trim().to_string(),
            status: self.status,
            updated_at: created_at.clone(),
            created_at,
        }
    }

    /// Copies the draft onto `product`, keeping its id and creation date.
    pub fn apply_to(&self, product: &mut Product, updated_at: String) {
        let Product { id, created_at, .. } = product.clone();
        *product = self.clone().into_product(id, created_at);
        product.updated_at = updated_at;
    }
}

impl From<&Product> for ProductDraft {
    fn from(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            description: product.description.clone(),
            price: product.price,
            stock: product.stock,
            image: product.image.clone(),
            category: product.category.clone(),
            brand: product.brand.clone(),
            status: product.status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> ProductDraft {
        ProductDraft {
            name: "Desk Lamp".to_string(),
            description: "Adjustable LED lamp".to_string(),
            price: 34.5,
            stock: 0,
            image: String::new(),
            category: "Home & Garden".to_string(),
            brand: "Philips".to_string(),
            status: ProductStatus::OutOfStock,
        }
    }

    #[test]
    fn required_text_fields_reject_blank_input() {
        assert_eq!(check_field(ProductField::Name, "   "), Err("Product name is required"));
        assert_eq!(check_field(ProductField::Description, ""), Err("Description is required"));
        assert_eq!(check_field(ProductField::Category, ""), Err("Category is required"));
        assert_eq!(check_field(ProductField::Brand, ""), Err("Brand is required"));
        assert_eq!(check_field(ProductField::Name, "Mug"), Ok(()));
    }

    #[test]
    fn price_must_be_positive_and_stock_non_negative() {
        for bad in ["", "0", "-3", "abc", "NaN", "inf"] {
            assert!(check_field(ProductField::Price, bad).is_err(), "price {bad:?}");
        }
        assert_eq!(parse_price(" 12.5 "), Some(12.5));

        for bad in ["", "-1", "2.5", "many"] {
            assert!(check_field(ProductField::Stock, bad).is_err(), "stock {bad:?}");
        }
        assert_eq!(parse_stock("0"), Some(0));
    }

    #[test]
    fn draft_validation_reports_first_failure() {
        assert!(draft().validate().is_ok());

        let mut bad = draft();
        bad.price = 0.0;
        bad.brand = String::new();
        let err = bad.validate().unwrap_err();
        assert_eq!(err.to_string(), "Validation error: Valid price is required");
    }

    #[test]
    fn apply_keeps_identity_and_creation_date() {
        let mut product = draft().into_product("11".to_string(), "2024-02-01".to_string());
        let mut edit = ProductDraft::from(&product);
        edit.name = "  Floor Lamp ".to_string();
        edit.stock = 8;
        edit.apply_to(&mut product, "2024-03-01".to_string());

        assert_eq!(product.id, "11");
        assert_eq!(product.name, "Floor Lamp");
        assert_eq!(product.stock, 8);
        assert_eq!(product.created_at, "2024-02-01");
        assert_eq!(product.updated_at, "2024-03-01");
    }
}
