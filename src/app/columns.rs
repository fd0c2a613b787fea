//! Table layouts for the three list screens.

use crate::domain::{display_date, Order, Product, StockLevel, User};
use crate::view::ColumnDef;

fn money(amount: f64) -> String {
    format!("${amount:.2}")
}

/// Columns of the Users table, in display order.
#[must_use]
pub fn user_columns() -> Vec<ColumnDef<User>> {
    vec![
        ColumnDef::new("select", "", 3, |_| String::new()).unsortable(),
        ColumnDef::new("name", "User", 22, |u: &User| u.name.clone()),
        ColumnDef::new("email", "Email", 28, |u: &User| u.email.clone()),
        ColumnDef::new("role", "Role", 10, |u: &User| u.role.as_str().to_string()),
        ColumnDef::new("status", "Status", 10, |u: &User| u.status.as_str().to_string()),
        ColumnDef::new("registrationDate", "Registration Date", 17, |u: &User| {
            display_date(&u.registration_date)
        }),
        ColumnDef::new("lastLogin", "Last Login", 13, |u: &User| display_date(&u.last_login)),
    ]
}

/// Columns of the Products table. The leading selection column is not sortable.
#[must_use]
pub fn product_columns() -> Vec<ColumnDef<Product>> {
    vec![
        ColumnDef::new("select", "", 3, |_| String::new()).unsortable(),
        ColumnDef::new("name", "Product", 30, |p: &Product| p.name.clone()),
        ColumnDef::new("category", "Category", 14, |p: &Product| p.category.clone()),
        ColumnDef::new("price", "Price", 10, |p: &Product| money(p.price)),
        ColumnDef::new("stock", "Stock", 10, |p: &Product| match p.stock_level() {
            StockLevel::Out => "0 (out)".to_string(),
            StockLevel::Low => format!("{} (low)", p.stock),
            StockLevel::Healthy => p.stock.to_string(),
        }),
        ColumnDef::new("status", "Status", 12, |p: &Product| p.status.as_str().to_string()),
    ]
}

/// Columns of the Orders table.
#[must_use]
pub fn order_columns() -> Vec<ColumnDef<Order>> {
    vec![
        ColumnDef::new("id", "Order ID", 10, |o: &Order| o.id.clone()),
        ColumnDef::new("customerName", "Customer", 20, |o: &Order| o.customer_name.clone()),
        ColumnDef::new("totalPrice", "Total", 10, |o: &Order| money(o.total_price)),
        ColumnDef::new("status", "Status", 11, |o: &Order| o.status.label().to_string()),
        ColumnDef::new("paymentMethod", "Payment", 16, |o: &Order| o.payment_method.label().to_string()),
        ColumnDef::new("orderDate", "Order Date", 13, |o: &Order| display_date(&o.order_date)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::validate_columns;

    #[test]
    fn every_layout_validates() {
        validate_columns(&user_columns()).unwrap();
        validate_columns(&product_columns()).unwrap();
        validate_columns(&order_columns()).unwrap();
    }
}
