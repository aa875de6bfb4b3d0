//! Persisted entity shapes for the catalog and carts.

pub mod cart;
pub mod category;
pub mod product;

pub use cart::{Cart, CartItem};
pub use category::Category;
pub use product::{NewProduct, Product};
