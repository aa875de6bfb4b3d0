//! Transport-facing data shapes.
//!
//! Services accept and return these instead of the persisted entities in
//! [`crate::models`]. Mapping is plain `From` conversions plus
//! [`crate::page::Page::map`] for list results.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use tamarind_core::{CartId, CartItemId, CategoryId, DiscountPercent, ProductId};

use crate::models::{Cart, CartItem, Category, Product};

/// Category as exposed to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryPayload {
    pub id: CategoryId,
    pub name: String,
}

impl From<Category> for CategoryPayload {
    fn from(category: Category) -> Self {
        Self {
            id: category.id,
            name: category.name,
        }
    }
}

/// Product as exposed to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductPayload {
    pub id: ProductId,
    pub category_id: CategoryId,
    pub name: String,
    pub description: String,
    pub quantity: u32,
    pub price: Decimal,
    pub discount: DiscountPercent,
    pub sale_price: Decimal,
    pub image: String,
}

impl From<Product> for ProductPayload {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            category_id: product.category_id,
            name: product.name,
            description: product.description,
            quantity: product.quantity,
            price: product.price,
            discount: product.discount,
            sale_price: product.sale_price,
            image: product.image,
        }
    }
}

/// Caller-supplied product fields for create and update.
///
/// The sale price is deliberately absent: it is derived from `price` and
/// `discount` inside the catalog and never accepted from outside.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductDraft {
    pub name: String,
    pub description: String,
    pub quantity: u32,
    pub price: Decimal,
    pub discount: DiscountPercent,
}

/// Cart as exposed to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartPayload {
    pub id: CartId,
    pub items: Vec<CartItemPayload>,
    pub total: Decimal,
}

impl From<Cart> for CartPayload {
    fn from(cart: Cart) -> Self {
        Self {
            id: cart.id,
            items: cart.items.into_iter().map(Into::into).collect(),
            total: cart.total,
        }
    }
}

/// Cart line as exposed to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItemPayload {
    pub id: CartItemId,
    pub product_id: ProductId,
    pub product_name: String,
    pub image: String,
    pub unit_price: Decimal,
    pub discount: DiscountPercent,
    pub quantity: u32,
}

impl From<CartItem> for CartItemPayload {
    fn from(item: CartItem) -> Self {
        Self {
            id: item.id,
            product_id: item.product_id,
            product_name: item.product_name,
            image: item.image,
            unit_price: item.unit_price,
            discount: item.discount,
            quantity: item.quantity,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::Utc;

    use super::*;

    #[test]
    fn test_cart_payload_carries_lines() {
        let now = Utc::now();
        let cart = Cart {
            id: CartId::new(1),
            items: vec![CartItem {
                id: CartItemId::new(5),
                product_id: ProductId::new(9),
                product_name: "Phone".to_owned(),
                image: "default.png".to_owned(),
                unit_price: Decimal::from(900),
                discount: DiscountPercent::new(Decimal::from(10)).unwrap(),
                quantity: 2,
            }],
            total: Decimal::from(1800),
            created_at: now,
            updated_at: now,
        };

        let payload = CartPayload::from(cart);
        assert_eq!(payload.items.len(), 1);
        assert_eq!(payload.items[0].product_name, "Phone");
        assert_eq!(payload.total, Decimal::from(1800));
    }

    #[test]
    fn test_product_draft_deserializes_without_sale_price() {
        let draft: ProductDraft = serde_json::from_str(
            r#"{"name":"Phone","description":"A phone","quantity":3,"price":"1000","discount":"10"}"#,
        )
        .unwrap();
        assert_eq!(draft.price, Decimal::from(1000));
        assert_eq!(draft.discount.as_decimal(), Decimal::from(10));
    }
}
