//! Persistent store interfaces for the catalog and carts.
//!
//! Services reach storage only through these traits, injected at
//! construction as `Arc<dyn …>` handles. Each method is transactional at
//! the single-entity-write granularity; the cart aggregate (cart plus its
//! lines) counts as one entity and is saved as a unit through
//! [`CartStore::save`].
//!
//! The shipped implementation is [`memory::MemoryStore`], used for
//! embedding and tests.

pub mod memory;

use async_trait::async_trait;
use thiserror::Error;

use tamarind_core::{CartId, CategoryId, ProductId};

use crate::models::{Cart, Category, NewProduct, Product};

pub use memory::MemoryStore;

/// Error type for store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A uniqueness constraint was violated on insert.
    #[error("duplicate {entity} {field}: {value}")]
    Duplicate {
        entity: &'static str,
        field: &'static str,
        value: String,
    },
    /// A write referenced a row that does not exist.
    #[error("missing {entity} with id {id}")]
    MissingRow { entity: &'static str, id: i32 },
    /// The storage backend failed.
    #[error("storage backend failure: {0}")]
    Backend(String),
}

/// Storage for categories.
#[async_trait]
pub trait CategoryStore: Send + Sync {
    async fn find_by_id(&self, id: CategoryId) -> Result<Option<Category>, StoreError>;

    /// All categories in insertion order.
    async fn find_all(&self) -> Result<Vec<Category>, StoreError>;

    /// Exact, case-sensitive name lookup.
    async fn find_by_name(&self, name: &str) -> Result<Option<Category>, StoreError>;

    /// Insert a category, enforcing name uniqueness atomically.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Duplicate`] if a category with this name
    /// already exists.
    async fn create(&self, name: &str) -> Result<Category, StoreError>;

    /// Overwrite an existing category and refresh its `updated_at`.
    async fn update(&self, category: Category) -> Result<Category, StoreError>;

    async fn delete(&self, id: CategoryId) -> Result<(), StoreError>;
}

/// Storage for products.
#[async_trait]
pub trait ProductStore: Send + Sync {
    async fn find_by_id(&self, id: ProductId) -> Result<Option<Product>, StoreError>;

    /// All products in insertion order.
    async fn find_all(&self) -> Result<Vec<Product>, StoreError>;

    /// Products in a category, ordered by ascending base price.
    async fn find_by_category(&self, category_id: CategoryId) -> Result<Vec<Product>, StoreError>;

    /// Case-insensitive substring match on the product name, in insertion
    /// order.
    async fn find_by_name_containing(&self, keyword: &str) -> Result<Vec<Product>, StoreError>;

    /// Insert a product, enforcing per-category name uniqueness atomically.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Duplicate`] if the owning category already has
    /// a product with this name.
    async fn create(&self, product: NewProduct) -> Result<Product, StoreError>;

    /// Overwrite an existing product and refresh its `updated_at`.
    async fn update(&self, product: Product) -> Result<Product, StoreError>;

    async fn delete(&self, id: ProductId) -> Result<(), StoreError>;
}

/// Storage for cart aggregates.
#[async_trait]
pub trait CartStore: Send + Sync {
    async fn find_by_id(&self, id: CartId) -> Result<Option<Cart>, StoreError>;

    /// Insert a new empty cart.
    async fn create(&self) -> Result<Cart, StoreError>;

    /// Every cart holding a line that references `product_id`.
    async fn find_with_product(&self, product_id: ProductId) -> Result<Vec<Cart>, StoreError>;

    /// Persist the whole aggregate (cart plus lines) as one write, assigning
    /// ids to lines that do not have one yet and refreshing `updated_at`.
    async fn save(&self, cart: Cart) -> Result<Cart, StoreError>;
}
