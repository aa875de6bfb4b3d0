//! Product entity.

use core::cmp::Ordering;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use tamarind_core::{CategoryId, DiscountPercent, ProductId};

use crate::page::SortKey;

/// A catalog product.
///
/// Belongs to exactly one category; the product name is unique within that
/// category only, not globally. `sale_price` is derived from `price` and
/// `discount` (see [`crate::pricing::sale_price`]) and is recomputed on
/// every create or update that touches either input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    pub id: ProductId,
    pub category_id: CategoryId,
    pub name: String,
    pub description: String,
    /// Units on hand.
    pub quantity: u32,
    /// Base price before any discount.
    pub price: Decimal,
    pub discount: DiscountPercent,
    /// Post-discount price; derived, never accepted from callers.
    pub sale_price: Decimal,
    /// Reference to the stored product image.
    pub image: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Field set for inserting a product; the store assigns id and timestamps.
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub category_id: CategoryId,
    pub name: String,
    pub description: String,
    pub quantity: u32,
    pub price: Decimal,
    pub discount: DiscountPercent,
    pub sale_price: Decimal,
    pub image: String,
}

impl SortKey for Product {
    fn comparator(field: &str) -> Option<fn(&Self, &Self) -> Ordering> {
        match field {
            "id" => Some(|a, b| a.id.cmp(&b.id)),
            "name" => Some(|a, b| a.name.cmp(&b.name)),
            "quantity" => Some(|a, b| a.quantity.cmp(&b.quantity)),
            "price" => Some(|a, b| a.price.cmp(&b.price)),
            "discount" => Some(|a, b| a.discount.cmp(&b.discount)),
            "sale_price" => Some(|a, b| a.sale_price.cmp(&b.sale_price)),
            _ => None,
        }
    }
}
