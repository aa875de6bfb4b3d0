//! In-memory store implementation.
//!
//! Backs all three store traits with a single `RwLock`-guarded state, so a
//! multi-entity read sees one consistent snapshot. Rows are keyed by
//! monotonically assigned ids in `BTreeMap`s, which makes iteration order
//! equal insertion order.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use tamarind_core::{CartId, CartItemId, CategoryId, ProductId};

use crate::models::{Cart, Category, NewProduct, Product};

use super::{CartStore, CategoryStore, ProductStore, StoreError};

/// Line id value meaning "not persisted yet"; [`CartStore::save`] replaces it.
const UNASSIGNED: i32 = 0;

#[derive(Debug, Default)]
struct State {
    categories: BTreeMap<i32, Category>,
    products: BTreeMap<i32, Product>,
    carts: BTreeMap<i32, Cart>,
    next_category_id: i32,
    next_product_id: i32,
    next_cart_id: i32,
    next_item_id: i32,
}

impl State {
    fn next_category_id(&mut self) -> CategoryId {
        self.next_category_id += 1;
        CategoryId::new(self.next_category_id)
    }

    fn next_product_id(&mut self) -> ProductId {
        self.next_product_id += 1;
        ProductId::new(self.next_product_id)
    }

    fn next_cart_id(&mut self) -> CartId {
        self.next_cart_id += 1;
        CartId::new(self.next_cart_id)
    }

    fn next_item_id(&mut self) -> CartItemId {
        self.next_item_id += 1;
        CartItemId::new(self.next_item_id)
    }
}

/// In-memory implementation of every store trait.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: RwLock<State>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CategoryStore for MemoryStore {
    async fn find_by_id(&self, id: CategoryId) -> Result<Option<Category>, StoreError> {
        let state = self.state.read().await;
        Ok(state.categories.get(&id.as_i32()).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Category>, StoreError> {
        let state = self.state.read().await;
        Ok(state.categories.values().cloned().collect())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Category>, StoreError> {
        let state = self.state.read().await;
        Ok(state
            .categories
            .values()
            .find(|category| category.name == name)
            .cloned())
    }

    async fn create(&self, name: &str) -> Result<Category, StoreError> {
        let mut state = self.state.write().await;

        // Uniqueness check and insert under one write lock, so two
        // concurrent creates for the same name cannot both pass.
        if state.categories.values().any(|category| category.name == name) {
            return Err(StoreError::Duplicate {
                entity: "category",
                field: "name",
                value: name.to_owned(),
            });
        }

        let now = Utc::now();
        let category = Category {
            id: state.next_category_id(),
            name: name.to_owned(),
            created_at: now,
            updated_at: now,
        };
        state
            .categories
            .insert(category.id.as_i32(), category.clone());
        Ok(category)
    }

    async fn update(&self, mut category: Category) -> Result<Category, StoreError> {
        let mut state = self.state.write().await;
        if !state.categories.contains_key(&category.id.as_i32()) {
            return Err(StoreError::MissingRow {
                entity: "category",
                id: category.id.as_i32(),
            });
        }
        category.updated_at = Utc::now();
        state
            .categories
            .insert(category.id.as_i32(), category.clone());
        Ok(category)
    }

    async fn delete(&self, id: CategoryId) -> Result<(), StoreError> {
        let mut state = self.state.write().await;
        state
            .categories
            .remove(&id.as_i32())
            .map(|_| ())
            .ok_or(StoreError::MissingRow {
                entity: "category",
                id: id.as_i32(),
            })
    }
}

#[async_trait]
impl ProductStore for MemoryStore {
    async fn find_by_id(&self, id: ProductId) -> Result<Option<Product>, StoreError> {
        let state = self.state.read().await;
        Ok(state.products.get(&id.as_i32()).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Product>, StoreError> {
        let state = self.state.read().await;
        Ok(state.products.values().cloned().collect())
    }

    async fn find_by_category(&self, category_id: CategoryId) -> Result<Vec<Product>, StoreError> {
        let state = self.state.read().await;
        let mut products: Vec<Product> = state
            .products
            .values()
            .filter(|product| product.category_id == category_id)
            .cloned()
            .collect();
        // Query-level default ordering; stable, so ties keep insertion order.
        products.sort_by(|a, b| a.price.cmp(&b.price));
        Ok(products)
    }

    async fn find_by_name_containing(&self, keyword: &str) -> Result<Vec<Product>, StoreError> {
        let needle = keyword.to_lowercase();
        let state = self.state.read().await;
        Ok(state
            .products
            .values()
            .filter(|product| product.name.to_lowercase().contains(&needle))
            .cloned()
            .collect())
    }

    async fn create(&self, product: NewProduct) -> Result<Product, StoreError> {
        let mut state = self.state.write().await;

        // Per-category uniqueness, checked under the write lock.
        let duplicate = state.products.values().any(|existing| {
            existing.category_id == product.category_id && existing.name == product.name
        });
        if duplicate {
            return Err(StoreError::Duplicate {
                entity: "product",
                field: "name",
                value: product.name,
            });
        }

        let now = Utc::now();
        let product = Product {
            id: state.next_product_id(),
            category_id: product.category_id,
            name: product.name,
            description: product.description,
            quantity: product.quantity,
            price: product.price,
            discount: product.discount,
            sale_price: product.sale_price,
            image: product.image,
            created_at: now,
            updated_at: now,
        };
        state.products.insert(product.id.as_i32(), product.clone());
        Ok(product)
    }

    async fn update(&self, mut product: Product) -> Result<Product, StoreError> {
        let mut state = self.state.write().await;
        if !state.products.contains_key(&product.id.as_i32()) {
            return Err(StoreError::MissingRow {
                entity: "product",
                id: product.id.as_i32(),
            });
        }
        product.updated_at = Utc::now();
        state.products.insert(product.id.as_i32(), product.clone());
        Ok(product)
    }

    async fn delete(&self, id: ProductId) -> Result<(), StoreError> {
        let mut state = self.state.write().await;
        state
            .products
            .remove(&id.as_i32())
            .map(|_| ())
            .ok_or(StoreError::MissingRow {
                entity: "product",
                id: id.as_i32(),
            })
    }
}

#[async_trait]
impl CartStore for MemoryStore {
    async fn find_by_id(&self, id: CartId) -> Result<Option<Cart>, StoreError> {
        let state = self.state.read().await;
        Ok(state.carts.get(&id.as_i32()).cloned())
    }

    async fn create(&self) -> Result<Cart, StoreError> {
        let mut state = self.state.write().await;
        let now = Utc::now();
        let cart = Cart {
            id: state.next_cart_id(),
            items: Vec::new(),
            total: rust_decimal::Decimal::ZERO,
            created_at: now,
            updated_at: now,
        };
        state.carts.insert(cart.id.as_i32(), cart.clone());
        Ok(cart)
    }

    async fn find_with_product(&self, product_id: ProductId) -> Result<Vec<Cart>, StoreError> {
        let state = self.state.read().await;
        Ok(state
            .carts
            .values()
            .filter(|cart| cart.items.iter().any(|item| item.product_id == product_id))
            .cloned()
            .collect())
    }

    async fn save(&self, mut cart: Cart) -> Result<Cart, StoreError> {
        let mut state = self.state.write().await;
        if !state.carts.contains_key(&cart.id.as_i32()) {
            return Err(StoreError::MissingRow {
                entity: "cart",
                id: cart.id.as_i32(),
            });
        }

        for item in &mut cart.items {
            if item.id.as_i32() == UNASSIGNED {
                item.id = state.next_item_id();
            }
        }
        cart.updated_at = Utc::now();
        state.carts.insert(cart.id.as_i32(), cart.clone());
        Ok(cart)
    }
}
