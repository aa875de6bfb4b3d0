//! Catalog and cart services.
//!
//! Each service receives its collaborators (store handles, image storage,
//! propagation) at construction; there is no ambient state.
//!
//! # Services
//!
//! - [`categories`] - Category CRUD with name-uniqueness enforcement
//! - [`products`] - Product CRUD and search, delegating pricing and pagination
//! - [`carts`] - Cart creation and line management
//! - [`propagation`] - Repair of cart snapshots after catalog mutations

pub mod carts;
pub mod categories;
pub mod products;
pub mod propagation;

pub use carts::CartService;
pub use categories::CategoryService;
pub use products::ProductService;
pub use propagation::CartPropagation;
