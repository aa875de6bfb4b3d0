//! Cart consistency propagation.
//!
//! Carts hold denormalized snapshots of product identity and pricing, so a
//! catalog mutation that changes a product's price or removes it must repair
//! every cart referencing it. Repair runs synchronously inside the mutating
//! operation: the product row write happens first, then this walk, and the
//! operation only counts as complete when the walk reports full success.

use std::sync::Arc;

use tamarind_core::{CartId, ProductId};

use crate::error::{CatalogError, Result};
use crate::store::{CartStore, ProductStore};

/// Repairs cart snapshots after a product update or deletion.
///
/// Both operations are idempotent: a second invocation for the same product
/// finds nothing stale and converges to the same end state.
#[derive(Clone)]
pub struct CartPropagation {
    products: Arc<dyn ProductStore>,
    carts: Arc<dyn CartStore>,
}

impl CartPropagation {
    pub fn new(products: Arc<dyn ProductStore>, carts: Arc<dyn CartStore>) -> Self {
        Self { products, carts }
    }

    /// Reprice every cart line referencing `product_id`.
    ///
    /// Reads the product's post-update state, refreshes each matching line's
    /// snapshot from it, recomputes the owning cart's total over all lines
    /// and saves the aggregate. A cart that fails to save is recorded and
    /// the walk continues with the remaining carts.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::PropagationIncomplete`] carrying the ids of
    /// every cart that could not be repaired; [`CatalogError::NotFound`] if
    /// the product row is gone.
    pub async fn product_updated(&self, product_id: ProductId) -> Result<()> {
        let product = self
            .products
            .find_by_id(product_id)
            .await?
            .ok_or_else(|| CatalogError::not_found("product", "id", product_id))?;

        let carts = self.carts.find_with_product(product_id).await?;
        let cart_count = carts.len();

        let mut failed = Vec::new();
        for mut cart in carts {
            let cart_id = cart.id;
            for item in cart
                .items
                .iter_mut()
                .filter(|item| item.product_id == product_id)
            {
                item.refresh_from(&product);
            }
            cart.total = cart.computed_total();

            if let Err(error) = self.carts.save(cart).await {
                tracing::warn!(
                    cart_id = %cart_id,
                    product_id = %product_id,
                    error = %error,
                    "failed to reprice cart"
                );
                failed.push(cart_id);
            }
        }

        self.finish(product_id, cart_count, failed, "repriced")
    }

    /// Remove every cart line referencing `product_id`.
    ///
    /// Callers must not delete the product row unless this returns `Ok`,
    /// otherwise a cart could keep a line pointing at a product that no
    /// longer exists.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::PropagationIncomplete`] carrying the ids of
    /// every cart that could not be repaired.
    pub async fn product_deleted(&self, product_id: ProductId) -> Result<()> {
        let carts = self.carts.find_with_product(product_id).await?;
        let cart_count = carts.len();

        let mut failed = Vec::new();
        for mut cart in carts {
            let cart_id = cart.id;
            cart.items.retain(|item| item.product_id != product_id);
            cart.total = cart.computed_total();

            if let Err(error) = self.carts.save(cart).await {
                tracing::warn!(
                    cart_id = %cart_id,
                    product_id = %product_id,
                    error = %error,
                    "failed to drop product from cart"
                );
                failed.push(cart_id);
            }
        }

        self.finish(product_id, cart_count, failed, "cleared")
    }

    fn finish(
        &self,
        product_id: ProductId,
        cart_count: usize,
        failed: Vec<CartId>,
        action: &'static str,
    ) -> Result<()> {
        if failed.is_empty() {
            if cart_count > 0 {
                tracing::info!(product_id = %product_id, carts = cart_count, action, "propagated product change to carts");
            }
            Ok(())
        } else {
            Err(CatalogError::PropagationIncomplete {
                product: product_id,
                failed,
            })
        }
    }
}
