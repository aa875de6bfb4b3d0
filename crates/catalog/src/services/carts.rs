//! Cart service.
//!
//! User-facing cart operations. Lines are priced from the product's current
//! sale price at the moment they are added; keeping them consistent with
//! later catalog changes is [`super::propagation::CartPropagation`]'s job.

use std::sync::Arc;

use tamarind_core::{CartId, ProductId};

use crate::error::{CatalogError, Result};
use crate::models::CartItem;
use crate::payload::CartPayload;
use crate::store::{CartStore, ProductStore};

/// Cart creation, lookup and line management.
pub struct CartService {
    products: Arc<dyn ProductStore>,
    carts: Arc<dyn CartStore>,
}

impl CartService {
    pub fn new(products: Arc<dyn ProductStore>, carts: Arc<dyn CartStore>) -> Self {
        Self { products, carts }
    }

    /// Create a new empty cart with a zero total.
    pub async fn create_cart(&self) -> Result<CartPayload> {
        let cart = self.carts.create().await?;
        tracing::info!(cart_id = %cart.id, "created cart");
        Ok(cart.into())
    }

    /// Look up a cart.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] if the id is absent.
    pub async fn get(&self, cart_id: CartId) -> Result<CartPayload> {
        let cart = self
            .carts
            .find_by_id(cart_id)
            .await?
            .ok_or_else(|| CatalogError::not_found("cart", "id", cart_id))?;
        Ok(cart.into())
    }

    /// Add a product to a cart.
    ///
    /// The new line snapshots the product's current name, image, discount
    /// and sale price; the cart total grows by `sale_price * quantity`.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] if the cart or product is absent,
    /// [`CatalogError::Conflict`] if the cart already holds a line for this
    /// product, [`CatalogError::InvalidArgument`] for a zero quantity, an
    /// out-of-stock product, or a quantity above the units on hand.
    pub async fn add_product(
        &self,
        cart_id: CartId,
        product_id: ProductId,
        quantity: u32,
    ) -> Result<CartPayload> {
        let mut cart = self
            .carts
            .find_by_id(cart_id)
            .await?
            .ok_or_else(|| CatalogError::not_found("cart", "id", cart_id))?;

        let product = self
            .products
            .find_by_id(product_id)
            .await?
            .ok_or_else(|| CatalogError::not_found("product", "id", product_id))?;

        if cart.items.iter().any(|item| item.product_id == product_id) {
            return Err(CatalogError::Conflict(format!(
                "product {} already exists in the cart",
                product.name
            )));
        }
        if quantity == 0 {
            return Err(CatalogError::InvalidArgument(
                "quantity must be greater than zero".to_owned(),
            ));
        }
        if product.quantity == 0 {
            return Err(CatalogError::InvalidArgument(format!(
                "{} is not available",
                product.name
            )));
        }
        if quantity > product.quantity {
            return Err(CatalogError::InvalidArgument(format!(
                "please make an order of {} less than or equal to the quantity {}",
                product.name, product.quantity
            )));
        }

        cart.items.push(CartItem::snapshot(&product, quantity));
        cart.total = cart.computed_total();
        let saved = self.carts.save(cart).await?;

        tracing::info!(cart_id = %cart_id, product_id = %product_id, quantity, "added product to cart");
        Ok(saved.into())
    }

    /// Remove a product's line from a cart and recompute the total.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] if the cart is absent or holds no
    /// line for this product.
    pub async fn remove_product(&self, cart_id: CartId, product_id: ProductId) -> Result<CartPayload> {
        let mut cart = self
            .carts
            .find_by_id(cart_id)
            .await?
            .ok_or_else(|| CatalogError::not_found("cart", "id", cart_id))?;

        let before = cart.items.len();
        cart.items.retain(|item| item.product_id != product_id);
        if cart.items.len() == before {
            return Err(CatalogError::not_found("product", "id", product_id));
        }

        cart.total = cart.computed_total();
        let saved = self.carts.save(cart).await?;

        tracing::info!(cart_id = %cart_id, product_id = %product_id, "removed product from cart");
        Ok(saved.into())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;

    use tamarind_core::DiscountPercent;

    use crate::models::NewProduct;
    use crate::pricing::sale_price;
    use crate::store::{CategoryStore, MemoryStore};

    use super::*;

    struct Fixture {
        store: Arc<MemoryStore>,
        service: CartService,
    }

    fn fixture() -> Fixture {
        let store = Arc::new(MemoryStore::new());
        let service = CartService::new(store.clone(), store.clone());
        Fixture { store, service }
    }

    async fn seed_product(store: &Arc<MemoryStore>, name: &str, price: i64, stock: u32) -> ProductId {
        let category = match CategoryStore::find_by_name(store.as_ref(), "Electronics")
            .await
            .unwrap()
        {
            Some(category) => category,
            None => CategoryStore::create(store.as_ref(), "Electronics")
                .await
                .unwrap(),
        };
        let discount = DiscountPercent::new(Decimal::from(10)).unwrap();
        let price = Decimal::from(price);
        ProductStore::create(
            store.as_ref(),
            NewProduct {
                category_id: category.id,
                name: name.to_owned(),
                description: format!("{name} description"),
                quantity: stock,
                price,
                discount,
                sale_price: sale_price(price, discount),
                image: "default.png".to_owned(),
            },
        )
        .await
        .unwrap()
        .id
    }

    #[tokio::test]
    async fn test_new_cart_is_empty_with_zero_total() {
        let fixture = fixture();
        let cart = fixture.service.create_cart().await.unwrap();
        assert!(cart.items.is_empty());
        assert_eq!(cart.total, Decimal::ZERO);
    }

    #[tokio::test]
    async fn test_add_product_snapshots_sale_price() {
        let fixture = fixture();
        let product_id = seed_product(&fixture.store, "Phone", 1000, 10).await;
        let cart = fixture.service.create_cart().await.unwrap();

        let cart = fixture
            .service
            .add_product(cart.id, product_id, 2)
            .await
            .unwrap();

        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.items[0].unit_price, Decimal::from(900));
        assert_eq!(cart.total, Decimal::from(1800));
    }

    #[tokio::test]
    async fn test_add_same_product_twice_conflicts() {
        let fixture = fixture();
        let product_id = seed_product(&fixture.store, "Phone", 1000, 10).await;
        let cart = fixture.service.create_cart().await.unwrap();

        fixture
            .service
            .add_product(cart.id, product_id, 1)
            .await
            .unwrap();
        let result = fixture.service.add_product(cart.id, product_id, 1).await;
        assert!(matches!(result, Err(CatalogError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_add_zero_quantity_is_invalid() {
        let fixture = fixture();
        let product_id = seed_product(&fixture.store, "Phone", 1000, 10).await;
        let cart = fixture.service.create_cart().await.unwrap();

        let result = fixture.service.add_product(cart.id, product_id, 0).await;
        assert!(matches!(result, Err(CatalogError::InvalidArgument(_))));
    }

    #[tokio::test]
    async fn test_add_out_of_stock_product_is_invalid() {
        let fixture = fixture();
        let product_id = seed_product(&fixture.store, "Phone", 1000, 0).await;
        let cart = fixture.service.create_cart().await.unwrap();

        let result = fixture.service.add_product(cart.id, product_id, 1).await;
        assert!(matches!(result, Err(CatalogError::InvalidArgument(_))));
    }

    #[tokio::test]
    async fn test_add_more_than_stock_is_invalid() {
        let fixture = fixture();
        let product_id = seed_product(&fixture.store, "Phone", 1000, 3).await;
        let cart = fixture.service.create_cart().await.unwrap();

        let result = fixture.service.add_product(cart.id, product_id, 4).await;
        assert!(matches!(result, Err(CatalogError::InvalidArgument(_))));
    }

    #[tokio::test]
    async fn test_remove_product_recomputes_total() {
        let fixture = fixture();
        let phone = seed_product(&fixture.store, "Phone", 1000, 10).await;
        let cable = seed_product(&fixture.store, "Cable", 10, 10).await;
        let cart = fixture.service.create_cart().await.unwrap();

        fixture.service.add_product(cart.id, phone, 1).await.unwrap();
        fixture.service.add_product(cart.id, cable, 2).await.unwrap();

        let cart = fixture.service.remove_product(cart.id, phone).await.unwrap();
        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.total, Decimal::from(18));
    }

    #[tokio::test]
    async fn test_remove_absent_line_is_not_found() {
        let fixture = fixture();
        let product_id = seed_product(&fixture.store, "Phone", 1000, 10).await;
        let cart = fixture.service.create_cart().await.unwrap();

        let result = fixture.service.remove_product(cart.id, product_id).await;
        assert!(matches!(result, Err(CatalogError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_get_missing_cart_is_not_found() {
        let fixture = fixture();
        let result = fixture.service.get(CartId::new(5)).await;
        assert!(matches!(result, Err(CatalogError::NotFound { .. })));
    }
}
