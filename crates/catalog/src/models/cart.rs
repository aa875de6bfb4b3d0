//! Cart aggregate and cart line entities.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use tamarind_core::{CartId, CartItemId, DiscountPercent, ProductId};

use crate::models::Product;

/// A shopping cart.
///
/// The cart exclusively owns its lines and is persisted as one aggregate:
/// after any completed operation, `total` equals the sum of each line's
/// snapshot price times quantity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cart {
    pub id: CartId,
    pub items: Vec<CartItem>,
    pub total: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Cart {
    /// Sum of line totals over all lines.
    #[must_use]
    pub fn computed_total(&self) -> Decimal {
        self.items.iter().map(CartItem::line_total).sum()
    }
}

/// One priced line in a cart.
///
/// References a product by id, but the billed `unit_price` and the
/// identity fields (`product_name`, `image`, `discount`) are a snapshot of
/// the product taken when the line was last priced. Snapshots are
/// refreshed when the referenced product changes and the line is destroyed
/// when the product leaves the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartItem {
    pub id: CartItemId,
    pub product_id: ProductId,
    /// Product name at the time the line was last priced.
    pub product_name: String,
    /// Product image reference at the time the line was last priced.
    pub image: String,
    /// Sale price used for billing this line.
    pub unit_price: Decimal,
    /// Discount percentage that was in effect when the line was priced.
    pub discount: DiscountPercent,
    pub quantity: u32,
}

impl CartItem {
    /// New unsaved line snapshotting `product`'s current identity and sale
    /// price. The store assigns the line id on first save.
    #[must_use]
    pub fn snapshot(product: &Product, quantity: u32) -> Self {
        Self {
            id: CartItemId::new(0),
            product_id: product.id,
            product_name: product.name.clone(),
            image: product.image.clone(),
            unit_price: product.sale_price,
            discount: product.discount,
            quantity,
        }
    }

    /// Re-take the denormalized snapshot from the product's current state.
    pub fn refresh_from(&mut self, product: &Product) {
        self.product_name = product.name.clone();
        self.image = product.image.clone();
        self.unit_price = product.sale_price;
        self.discount = product.discount;
    }

    /// Snapshot price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}
