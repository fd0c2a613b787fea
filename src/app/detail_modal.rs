//! Detail modal for one order or one product.
//!
//! Orders get an optional inline status editor; products are read-only here
//! and are edited through the product form. The modal shows the status it has
//! been asked to display. A status change is
//! shown at once but marked pending until the store confirms it; a rejection
//! puts the previous status back. The order row in the list is not touched
//! here at all, the owner updates it once the store has accepted the change.

use crate::domain::{display_date, Order, OrderStatus, Product, StockLevel};

/// A status change the owner must send to the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusChange {
    pub id: String,
    pub previous: OrderStatus,
    pub next: OrderStatus,
}

/// One titled block of the modal body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModalSection {
    pub title: String,
    pub lines: Vec<String>,
}

impl ModalSection {
    fn new(title: &str, lines: Vec<String>) -> Self {
        Self {
            title: title.to_string(),
            lines,
        }
    }
}

/// What the modal is showing.
#[derive(Debug, Clone)]
enum Subject {
    Order(Order),
    Product(Product),
}

#[derive(Debug, Clone, Default)]
pub struct DetailModal {
    subject: Option<Subject>,
    editable: bool,
    pending: Option<StatusChange>,
}

impl DetailModal {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Shows `order`. Opening with `None` leaves the modal closed.
    ///
    /// # Parameters
    ///
    /// * `order` - The order to show, usually the row under the cursor
    /// * `editable` - Whether the status editor is enabled
    pub fn open(&mut self, order: Option<Order>, editable: bool) {
        self.pending = None;
        self.editable = editable && order.is_some();
        self.subject = order.map(Subject::Order);
    }

    /// Shows `product` read-only. `None` leaves the modal closed.
    pub fn open_product(&mut self, product: Option<Product>) {
        self.pending = None;
        self.editable = false;
        self.subject = product.map(Subject::Product);
    }

    /// Closes the modal. Closing a closed modal does nothing.
    pub fn close(&mut self) {
        if self.subject.take().is_some() {
            tracing::debug!("detail modal closed");
        }
        self.editable = false;
        self.pending = None;
    }

    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.subject.is_some()
    }

    /// Whether the order status editor is enabled. Always false for products.
    #[must_use]
    pub const fn is_editable(&self) -> bool {
        self.editable
    }

    /// The order on display, if the modal shows an order.
    #[must_use]
    pub const fn order(&self) -> Option<&Order> {
        match &self.subject {
            Some(Subject::Order(order)) => Some(order),
            _ => None,
        }
    }

    /// The product on display, if the modal shows a product.
    #[must_use]
    pub const fn product(&self) -> Option<&Product> {
        match &self.subject {
            Some(Subject::Product(product)) => Some(product),
            _ => None,
        }
    }

    fn order_mut(&mut self) -> Option<&mut Order> {
        match &mut self.subject {
            Some(Subject::Order(order)) => Some(order),
            _ => None,
        }
    }

    /// Replaces the product on display if it is the one that was saved.
    pub fn product_saved(&mut self, saved: &Product) {
        if let Some(Subject::Product(product)) = &mut self.subject {
            if product.id == saved.id {
                product.clone_from(saved);
            }
        }
    }

    /// Status change sent to the worker and not yet confirmed.
    #[must_use]
    pub const fn pending(&self) -> Option<&StatusChange> {
        self.pending.as_ref()
    }

    /// Displays `next` as pending and returns the change to send.
    ///
    /// Returns `None` if the modal is closed or read-only, a change is already
    /// in flight, or `next` is the current status.
    pub fn change_status(&mut self, next: OrderStatus) -> Option<StatusChange> {
        if !self.editable || self.pending.is_some() {
            return None;
        }
        let order = self.order_mut()?;
        if order.status == next {
            return None;
        }

        let change = StatusChange {
            id: order.id.clone(),
            previous: order.status,
            next,
        };
        order.status = next;
        self.pending = Some(change.clone());
        Some(change)
    }

    /// Moves the order to the next status in workflow order.
    pub fn cycle_status_forward(&mut self) -> Option<StatusChange> {
        let next = self.order()?.status.next();
        self.change_status(next)
    }

    /// Moves the order to the previous status in workflow order.
    pub fn cycle_status_backward(&mut self) -> Option<StatusChange> {
        let prev = self.order()?.status.prev();
        self.change_status(prev)
    }

    /// The store accepted the change for `id`.
    pub fn status_committed(&mut self, id: &str, status: OrderStatus) {
        if self.pending.as_ref().is_some_and(|p| p.id == id) {
            self.pending = None;
        }
        if let Some(order) = self.order_mut().filter(|o| o.id == id) {
            order.status = status;
        }
    }

    /// The store refused the change for `id`; show the previous status again.
    pub fn status_rejected(&mut self, id: &str) {
        if !self.pending.as_ref().is_some_and(|p| p.id == id) {
            return;
        }
        let Some(change) = self.pending.take() else {
            return;
        };
        if let Some(order) = self.order_mut().filter(|o| o.id == id) {
            order.status = change.previous;
        }
    }

    /// Title and subtitle: "Order Details - ORD-001" and "Placed on Jan 15, 2024"
    /// for an order, "Product Details - #3" and the product name for a product.
    #[must_use]
    pub fn heading(&self) -> Option<(String, String)> {
        match self.subject.as_ref()? {
            Subject::Order(order) => Some((
                format!("Order Details - {}", order.id),
                format!("Placed on {}", display_date(&order.order_date)),
            )),
            Subject::Product(product) => Some((
                format!("Product Details - #{}", product.id),
                product.name.clone(),
            )),
        }
    }

    /// Body sections in display order. Empty while closed.
    #[must_use]
    pub fn sections(&self) -> Vec<ModalSection> {
        match &self.subject {
            None => Vec::new(),
            Some(Subject::Order(order)) => self.order_sections(order),
            Some(Subject::Product(product)) => product_sections(product),
        }
    }

    fn order_sections(&self, order: &Order) -> Vec<ModalSection> {

        let item_count = order.items.len();
        let mut status = order.status.label().to_string();
        if self.pending.is_some() {
            status.push_str(" (saving...)");
        }

        let items = order
            .items
            .iter()
            .map(|item| {
                format!(
                    "{}  x{}  ${:.2} each  ${:.2}",
                    item.product_name,
                    item.quantity,
                    item.unit_price(),
                    item.price
                )
            })
            .collect();

        let address = &order.shipping_address;
        let mut shipping = vec![
            address.street.clone(),
            format!("{}, {} {}", address.city, address.state, address.zip_code),
            address.country.clone(),
        ];
        if let Some(eta) = &order.estimated_delivery {
            shipping.push(format!("Estimated delivery: {}", display_date(eta)));
        }
        if let Some(tracking) = &order.tracking_number {
            shipping.push(format!("Tracking: {tracking}"));
        }

        vec![
            ModalSection::new(
                "Customer",
                vec![order.customer_name.clone(), order.customer_email.clone()],
            ),
            ModalSection::new(
                "Total Amount",
                vec![
                    format!("${:.2}", order.total_price),
                    format!("{item_count} {}", if item_count == 1 { "item" } else { "items" }),
                ],
            ),
            ModalSection::new("Status", vec![status]),
            ModalSection::new("Order Items", items),
            ModalSection::new("Shipping Address", shipping),
            ModalSection::new(
                "Payment Information",
                vec![
                    format!("Method: {}", order.payment_method.label()),
                    format!("Total: ${:.2}", order.total_price),
                ],
            ),
        ]
    }
}

fn product_sections(product: &Product) -> Vec<ModalSection> {
    let level = match product.stock_level() {
        StockLevel::Out => "out of stock",
        StockLevel::Low => "low stock",
        StockLevel::Healthy => "healthy",
    };
    let mut sections = vec![
        ModalSection::new("Price", vec![format!("${:.2}", product.price)]),
        ModalSection::new(
            "Inventory",
            vec![
                format!("{} units ({level})", product.stock),
                product.status.as_str().to_string(),
            ],
        ),
        ModalSection::new(
            "Catalogue",
            vec![
                format!("Category: {}", product.category),
                format!("Brand: {}", product.brand),
            ],
        ),
        ModalSection::new("Description", vec![product.description.clone()]),
    ];
    if !product.image.is_empty() {
        sections.push(ModalSection::new("Image", vec![product.image.clone()]));
    }
    sections.push(ModalSection::new(
        "History",
        vec![
            format!("Added {}", display_date(&product.created_at)),
            format!("Updated {}", display_date(&product.updated_at)),
        ],
    ));
    sections
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::seed;

    fn product(id: &str) -> Product {
        seed::demo_data()
            .unwrap()
            .products
            .into_iter()
            .find(|p| p.id == id)
            .unwrap()
    }

    fn order(id: &str) -> Order {
        seed::demo_data()
            .unwrap()
            .orders
            .into_iter()
            .find(|o| o.id == id)
            .unwrap()
    }

    #[test]
    fn opening_with_nothing_renders_nothing() {
        let mut modal = DetailModal::new();
        modal.open(None, true);
        assert!(!modal.is_open());
        assert!(modal.sections().is_empty());
        assert!(modal.heading().is_none());
        assert_eq!(modal.change_status(OrderStatus::Shipped), None);
    }

    #[test]
    fn close_is_idempotent() {
        let mut modal = DetailModal::new();
        modal.open(Some(order("ORD-001")), false);
        modal.close();
        modal.close();
        assert!(!modal.is_open());
    }

    #[test]
    fn read_only_modal_refuses_changes() {
        let mut modal = DetailModal::new();
        modal.open(Some(order("ORD-001")), false);
        assert_eq!(modal.change_status(OrderStatus::Pending), None);
    }

    #[test]
    fn rejected_change_reverts_displayed_status() {
        let mut modal = DetailModal::new();
        modal.open(Some(order("ORD-004")), true);
        let change = modal.change_status(OrderStatus::Processing).unwrap();
        assert_eq!(change.previous, OrderStatus::Pending);
        assert_eq!(modal.order().unwrap().status, OrderStatus::Processing);
        assert_eq!(modal.change_status(OrderStatus::Shipped), None);

        modal.status_rejected("ORD-004");
        assert_eq!(modal.order().unwrap().status, OrderStatus::Pending);
        assert!(modal.pending().is_none());
    }

    #[test]
    fn committed_change_clears_pending_marker() {
        let mut modal = DetailModal::new();
        modal.open(Some(order("ORD-004")), true);
        modal.cycle_status_forward().unwrap();
        assert!(modal.sections()[2].lines[0].ends_with("(saving...)"));
        modal.status_committed("ORD-004", OrderStatus::Processing);
        assert_eq!(modal.sections()[2].lines, vec!["Processing".to_string()]);
    }

    #[test]
    fn sections_follow_fixed_layout() {
        let mut modal = DetailModal::new();
        modal.open(Some(order("ORD-001")), false);
        let titles: Vec<String> = modal.sections().into_iter().map(|s| s.title).collect();
        assert_eq!(
            titles,
            [
                "Customer",
                "Total Amount",
                "Status",
                "Order Items",
                "Shipping Address",
                "Payment Information"
            ]
        );
        let (title, placed) = modal.heading().unwrap();
        assert_eq!(title, "Order Details - ORD-001");
        assert_eq!(placed, "Placed on Jan 15, 2024");
        let items = &modal.sections()[3].lines;
        assert!(items[1].contains("x2") && items[1].contains("$24.99 each"));
    }

    #[test]
    fn product_detail_is_read_only() {
        let mut modal = DetailModal::new();
        modal.open_product(Some(product("3")));
        assert!(modal.is_open());
        assert!(!modal.is_editable());
        assert!(modal.order().is_none());
        assert_eq!(modal.cycle_status_forward(), None);

        let (title, name) = modal.heading().unwrap();
        assert_eq!(title, "Product Details - #3");
        assert_eq!(name, modal.product().unwrap().name);
        let sections = modal.sections();
        assert_eq!(sections[1].title, "Inventory");
        assert_eq!(sections[1].lines, ["0 units (out of stock)", "Out of Stock"]);
        assert_eq!(sections.last().unwrap().title, "History");
    }

    #[test]
    fn saved_product_refreshes_only_its_own_detail() {
        let mut modal = DetailModal::new();
        modal.open_product(Some(product("1")));

        let mut other = product("2");
        other.name = "Renamed".to_string();
        modal.product_saved(&other);
        assert_ne!(modal.product().unwrap().name, "Renamed");

        let mut same = product("1");
        same.price = 10.0;
        modal.product_saved(&same);
        assert_eq!(modal.sections()[0].lines, ["$10.00"]);
    }
}
