//! Product catalog service.
//!
//! Performs the authoritative product mutations and hands the affected
//! product id to [`CartPropagation`] so every cart snapshot is repaired
//! before the operation reports success.

use std::collections::HashMap;
use std::sync::Arc;

use rust_decimal::Decimal;
use tokio::sync::Mutex;

use tamarind_core::{CategoryId, ProductId};

use crate::error::{CatalogError, Result};
use crate::image::ImageStore;
use crate::models::NewProduct;
use crate::page::{Page, PageRequest, paginate};
use crate::payload::{ProductDraft, ProductPayload};
use crate::pricing::sale_price;
use crate::services::propagation::CartPropagation;
use crate::store::{CategoryStore, ProductStore, StoreError};

/// CRUD and search over products.
///
/// Mutations of the same product are serialized through a per-product lock,
/// so two concurrent updates cannot race to propagate conflicting sale
/// prices. Different products proceed in parallel.
pub struct ProductService {
    categories: Arc<dyn CategoryStore>,
    products: Arc<dyn ProductStore>,
    images: Arc<dyn ImageStore>,
    propagation: CartPropagation,
    placeholder_image: String,
    locks: Mutex<HashMap<ProductId, Arc<Mutex<()>>>>,
}

impl ProductService {
    pub fn new(
        categories: Arc<dyn CategoryStore>,
        products: Arc<dyn ProductStore>,
        images: Arc<dyn ImageStore>,
        propagation: CartPropagation,
        placeholder_image: impl Into<String>,
    ) -> Self {
        Self {
            categories,
            products,
            images,
            propagation,
            placeholder_image: placeholder_image.into(),
            locks: Mutex::new(HashMap::new()),
        }
    }

    /// Add a product to a category.
    ///
    /// The image defaults to the configured placeholder and the sale price
    /// is derived from the draft's price and discount.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] if the category is absent,
    /// [`CatalogError::Conflict`] if the category already has a product
    /// with this name, [`CatalogError::InvalidArgument`] for a negative
    /// price.
    pub async fn add_product(
        &self,
        category_id: CategoryId,
        draft: ProductDraft,
    ) -> Result<ProductPayload> {
        validate_price(draft.price)?;

        self.categories
            .find_by_id(category_id)
            .await?
            .ok_or_else(|| CatalogError::not_found("category", "id", category_id))?;

        let name = draft.name.clone();
        let product = NewProduct {
            category_id,
            sale_price: sale_price(draft.price, draft.discount),
            image: self.placeholder_image.clone(),
            name: draft.name,
            description: draft.description,
            quantity: draft.quantity,
            price: draft.price,
            discount: draft.discount,
        };

        match self.products.create(product).await {
            Ok(created) => {
                tracing::info!(product_id = %created.id, category_id = %category_id, name, "added product");
                Ok(created.into())
            }
            Err(StoreError::Duplicate { .. }) => Err(CatalogError::Conflict(format!(
                "product with the name {name} already exists in this category"
            ))),
            Err(error) => Err(error.into()),
        }
    }

    /// List all products as a sorted page. An empty catalog is an empty
    /// page, not an error.
    pub async fn list(&self, request: &PageRequest) -> Result<Page<ProductPayload>> {
        let products = self.products.find_all().await?;
        Ok(paginate(products, request)?.map(Into::into))
    }

    /// List a category's products, cheapest base price first before the
    /// requested sort is applied (the sort is stable, so the price order
    /// survives as the tie-break).
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] if the category is absent and
    /// [`CatalogError::EmptyResult`] if it has zero products.
    pub async fn search_by_category(
        &self,
        category_id: CategoryId,
        request: &PageRequest,
    ) -> Result<Page<ProductPayload>> {
        let category = self
            .categories
            .find_by_id(category_id)
            .await?
            .ok_or_else(|| CatalogError::not_found("category", "id", category_id))?;

        let products = self.products.find_by_category(category_id).await?;
        if products.is_empty() {
            return Err(CatalogError::EmptyResult(format!(
                "{} category does not have any products",
                category.name
            )));
        }
        Ok(paginate(products, request)?.map(Into::into))
    }

    /// Search products by a case-insensitive substring of the name.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::EmptyResult`] if nothing matches.
    pub async fn search_by_keyword(
        &self,
        keyword: &str,
        request: &PageRequest,
    ) -> Result<Page<ProductPayload>> {
        let products = self.products.find_by_name_containing(keyword).await?;
        if products.is_empty() {
            return Err(CatalogError::EmptyResult(format!(
                "no products found with keyword: {keyword}"
            )));
        }
        Ok(paginate(products, request)?.map(Into::into))
    }

    /// Update a product and reprice every cart line referencing it.
    ///
    /// Overwrites name, description, quantity, price and discount; the sale
    /// price is recomputed here, never taken from the caller. The row write
    /// and the cart repricing form one unit: if any cart cannot be
    /// repaired, the whole operation reports
    /// [`CatalogError::PropagationIncomplete`].
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] if the product is absent,
    /// [`CatalogError::InvalidArgument`] for a negative price,
    /// [`CatalogError::PropagationIncomplete`] if a cart repair failed.
    pub async fn update_product(
        &self,
        product_id: ProductId,
        draft: ProductDraft,
    ) -> Result<ProductPayload> {
        validate_price(draft.price)?;

        let lock = self.product_lock(product_id).await;
        let _guard = lock.lock().await;

        let mut product = self
            .products
            .find_by_id(product_id)
            .await?
            .ok_or_else(|| CatalogError::not_found("product", "id", product_id))?;

        product.name = draft.name;
        product.description = draft.description;
        product.quantity = draft.quantity;
        product.price = draft.price;
        product.discount = draft.discount;
        product.sale_price = sale_price(draft.price, draft.discount);

        let updated = self.products.update(product).await?;

        // The row write is visible before the walk starts, so carts are
        // repriced from the post-update sale price.
        self.propagation.product_updated(product_id).await?;

        tracing::info!(product_id = %product_id, sale_price = %updated.sale_price, "updated product");
        Ok(updated.into())
    }

    /// Delete a product, returning the deleted snapshot.
    ///
    /// Every cart line referencing the product is removed first; the row is
    /// only deleted once no cart references it, so no cart can observe a
    /// dangling product id.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] if the product is absent and
    /// [`CatalogError::PropagationIncomplete`] if a cart could not be
    /// repaired (the row is left in place).
    pub async fn delete_product(&self, product_id: ProductId) -> Result<ProductPayload> {
        let lock = self.product_lock(product_id).await;
        let _guard = lock.lock().await;

        let product = self
            .products
            .find_by_id(product_id)
            .await?
            .ok_or_else(|| CatalogError::not_found("product", "id", product_id))?;

        self.propagation.product_deleted(product_id).await?;
        self.products.delete(product_id).await?;

        self.locks.lock().await.remove(&product_id);
        tracing::info!(product_id = %product_id, "deleted product");
        Ok(product.into())
    }

    /// Store a new image for the product and persist the returned
    /// reference.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] if the product is absent;
    /// [`CatalogError::Image`] if storage fails (the product keeps its
    /// previous image).
    pub async fn update_product_image(
        &self,
        product_id: ProductId,
        file_name: &str,
        bytes: &[u8],
    ) -> Result<ProductPayload> {
        let lock = self.product_lock(product_id).await;
        let _guard = lock.lock().await;

        let mut product = self
            .products
            .find_by_id(product_id)
            .await?
            .ok_or_else(|| CatalogError::not_found("product", "id", product_id))?;

        let reference = self.images.store(file_name, bytes).await?;
        product.image = reference;

        let updated = self.products.update(product).await?;
        tracing::info!(product_id = %product_id, image = %updated.image, "updated product image");
        Ok(updated.into())
    }

    async fn product_lock(&self, product_id: ProductId) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().await;
        locks.entry(product_id).or_default().clone()
    }
}

fn validate_price(price: Decimal) -> Result<()> {
    if price < Decimal::ZERO {
        return Err(CatalogError::InvalidArgument(
            "price must not be negative".to_owned(),
        ));
    }
    Ok(())
}
