//! Entity kinds shown by the dashboard.
//!
//! Every list view in the plugin is backed by exactly one collection. The
//! [`EntityKind`] enum names those collections and carries the labels and the
//! filter field each view uses.

use serde::{Deserialize, Serialize};

/// The collections managed by the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EntityKind {
    /// Registered customers and staff accounts.
    Users,
    /// Catalogue entries.
    Products,
    /// Customer orders.
    Orders,
}

impl EntityKind {
    /// All kinds in navigation order.
    pub const ALL: [Self; 3] = [Self::Users, Self::Products, Self::Orders];

    /// Collection name used as the key in the document store.
    #[must_use]
    pub const fn collection(self) -> &'static str {
        match self {
            Self::Users => "users",
            Self::Products => "products",
            Self::Orders => "orders",
        }
    }

    /// Lowercase singular label ("user").
    #[must_use]
    pub const fn singular(self) -> &'static str {
        match self {
            Self::Users => "user",
            Self::Products => "product",
            Self::Orders => "order",
        }
    }

    /// Lowercase plural label ("users").
    #[must_use]
    pub const fn plural(self) -> &'static str {
        self.collection()
    }

    /// Returns the singular label when `count == 1`, the plural otherwise.
    ///
    /// ```
    /// use shopdash::domain::EntityKind;
    ///
    /// assert_eq!(EntityKind::Products.label_for(1), "product");
    /// assert_eq!(EntityKind::Products.label_for(0), "products");
    /// assert_eq!(EntityKind::Products.label_for(3), "products");
    /// ```
    #[must_use]
    pub const fn label_for(self, count: usize) -> &'static str {
        if count == 1 {
            self.singular()
        } else {
            self.plural()
        }
    }

    /// Capitalized plural used in titles ("Products").
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Users => "Users",
            Self::Products => "Products",
            Self::Orders => "Orders",
        }
    }

    /// Field searched by the free-text filter of this collection's view.
    #[must_use]
    pub const fn filter_field(self) -> &'static str {
        match self {
            Self::Users | Self::Products => "name",
            Self::Orders => "customerName",
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.collection())
    }
}
