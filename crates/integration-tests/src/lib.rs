//! Integration test harness for Tamarind.
//!
//! Wires the catalog services over a shared in-memory store, the way an
//! embedding application would, and provides a cart store test double that
//! fails on demand for exercising the partial-propagation contract.
//!
//! # Test Categories
//!
//! - `catalog_queries` - Category/product CRUD and the paginated query flows
//! - `cart_consistency` - Cart snapshot repair on product update/delete

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;

use tamarind_catalog::image::FsImageStore;
use tamarind_catalog::models::Cart;
use tamarind_catalog::store::{CartStore, MemoryStore, StoreError};
use tamarind_catalog::{CartPropagation, CartService, CatalogConfig, CategoryService, ProductService};
use tamarind_core::{CartId, ProductId};

/// All services wired over one shared store.
pub struct TestContext {
    pub store: Arc<MemoryStore>,
    pub categories: CategoryService,
    pub products: ProductService,
    pub carts: CartService,
}

impl TestContext {
    /// Wire every service over a fresh in-memory store.
    #[must_use]
    pub fn new() -> Self {
        let store = Arc::new(MemoryStore::new());
        Self::with_cart_store(store.clone(), store)
    }

    /// Wire the services with a custom cart store (e.g. [`FlakyCartStore`]),
    /// keeping categories and products in `store`.
    #[must_use]
    pub fn with_cart_store(store: Arc<MemoryStore>, cart_store: Arc<dyn CartStore>) -> Self {
        init_tracing();

        // Images land in the system temp dir; everything else is defaults.
        let config = CatalogConfig::default();
        let propagation = CartPropagation::new(store.clone(), cart_store.clone());
        let products = ProductService::new(
            store.clone(),
            store.clone(),
            Arc::new(FsImageStore::new(std::env::temp_dir())),
            propagation,
            config.placeholder_image,
        );
        let categories = CategoryService::new(store.clone());
        let carts = CartService::new(store.clone(), cart_store);

        Self {
            store,
            categories,
            products,
            carts,
        }
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Cart store wrapper that fails `save` for chosen cart ids.
pub struct FlakyCartStore {
    inner: Arc<MemoryStore>,
    failing: std::sync::Mutex<HashSet<i32>>,
}

impl FlakyCartStore {
    #[must_use]
    pub fn new(inner: Arc<MemoryStore>) -> Self {
        Self {
            inner,
            failing: std::sync::Mutex::new(HashSet::new()),
        }
    }

    /// Make `save` fail for this cart from now on.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn fail_saves_for(&self, cart_id: CartId) {
        self.failing
            .lock()
            .expect("lock poisoned")
            .insert(cart_id.as_i32());
    }

    /// Let `save` succeed again for this cart.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn heal(&self, cart_id: CartId) {
        self.failing
            .lock()
            .expect("lock poisoned")
            .remove(&cart_id.as_i32());
    }

    fn is_failing(&self, cart_id: CartId) -> bool {
        self.failing
            .lock()
            .expect("lock poisoned")
            .contains(&cart_id.as_i32())
    }
}

#[async_trait]
impl CartStore for FlakyCartStore {
    async fn find_by_id(&self, id: CartId) -> Result<Option<Cart>, StoreError> {
        CartStore::find_by_id(self.inner.as_ref(), id).await
    }

    async fn create(&self) -> Result<Cart, StoreError> {
        CartStore::create(self.inner.as_ref()).await
    }

    async fn find_with_product(&self, product_id: ProductId) -> Result<Vec<Cart>, StoreError> {
        self.inner.find_with_product(product_id).await
    }

    async fn save(&self, cart: Cart) -> Result<Cart, StoreError> {
        if self.is_failing(cart.id) {
            return Err(StoreError::Backend("injected save failure".to_owned()));
        }
        self.inner.save(cart).await
    }
}

/// Install a test subscriber once; later calls are no-ops.
fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
