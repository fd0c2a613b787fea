//! Customer orders and their line items.

use super::record::{FieldValue, Record};
use serde::{Deserialize, Serialize};

/// Fulfilment status of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    /// All statuses in workflow order.
    pub const ALL: [Self; 5] = [
        Self::Pending,
        Self::Processing,
        Self::Shipped,
        Self::Delivered,
        Self::Cancelled,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Processing => "processing",
            Self::Shipped => "shipped",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
        }
    }

    /// Capitalized label for display.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Processing => "Processing",
            Self::Shipped => "Shipped",
            Self::Delivered => "Delivered",
            Self::Cancelled => "Cancelled",
        }
    }

    fn position(self) -> usize {
        Self::ALL.iter().position(|s| *s == self).unwrap_or(0)
    }

    /// Next status in [`OrderStatus::ALL`], wrapping around.
    #[must_use]
    pub fn next(self) -> Self {
        Self::ALL[(self.position() + 1) % Self::ALL.len()]
    }

    /// Previous status in [`OrderStatus::ALL`], wrapping around.
    #[must_use]
    pub fn prev(self) -> Self {
        Self::ALL[(self.position() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// How the customer paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    CreditCard,
    Paypal,
    BankTransfer,
    CashOnDelivery,
}

impl PaymentMethod {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::CreditCard => "Credit Card",
            Self::Paypal => "PayPal",
            Self::BankTransfer => "Bank Transfer",
            Self::CashOnDelivery => "Cash on Delivery",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingAddress {
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
}

/// One line of an order. `price` is the line total, not the unit price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub id: String,
    pub product_id: String,
    pub product_name: String,
    #[serde(default)]
    pub product_image: String,
    pub quantity: u32,
    pub price: f64,
}

impl OrderItem {
    /// Unit price derived from the line total.
    #[must_use]
    pub fn unit_price(&self) -> f64 {
        if self.quantity == 0 {
            self.price
        } else {
            self.price / f64::from(self.quantity)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    pub customer_name: String,
    pub customer_email: String,
    pub total_price: f64,
    pub status: OrderStatus,
    pub payment_method: PaymentMethod,
    pub shipping_address: ShippingAddress,
    #[serde(default)]
    pub items: Vec<OrderItem>,
    pub order_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_delivery: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tracking_number: Option<String>,
}

impl Record for Order {
    const FIELD_KEYS: &'static [&'static str] = &[
        "id",
        "customerName",
        "customerEmail",
        "totalPrice",
        "status",
        "paymentMethod",
        "items",
        "orderDate",
        "estimatedDelivery",
        "trackingNumber",
    ];

    fn id(&self) -> &str {
        &self.id
    }

    fn field(&self, key: &str) -> Option<FieldValue> {
        Some(match key {
            "id" => FieldValue::text(&self.id),
            "customerName" => FieldValue::text(&self.customer_name),
            "customerEmail" => FieldValue::text(&self.customer_email),
            "totalPrice" => FieldValue::Number(self.total_price),
            "status" => FieldValue::text(self.status.as_str()),
            "paymentMethod" => FieldValue::text(self.payment_method.label()),
            #[allow(clippy::cast_precision_loss)]
            "items" => FieldValue::Number(self.items.len() as f64),
            "orderDate" => FieldValue::text(&self.order_date),
            "estimatedDelivery" => FieldValue::optional(self.estimated_delivery.as_deref()),
            "trackingNumber" => FieldValue::optional(self.tracking_number.as_deref()),
            _ => return None,
        })
    }
}
