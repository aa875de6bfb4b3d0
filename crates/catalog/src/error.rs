//! Typed error taxonomy for catalog and cart operations.
//!
//! Every service operation returns `Result<T, CatalogError>`. Errors carry
//! enough structured context (entity kind, field, value) for a transport
//! layer to render a precise message; nothing is retried internally.

use thiserror::Error;

use tamarind_core::{CartId, ProductId};

use crate::image::ImageError;
use crate::store::StoreError;

/// Application-level error type for the catalog core.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// A referenced entity id does not exist.
    #[error("{entity} not found with {field}: {value}")]
    NotFound {
        /// Entity kind, e.g. `"category"` or `"product"`.
        entity: &'static str,
        /// Field the lookup used.
        field: &'static str,
        /// Value that failed to resolve.
        value: String,
    },

    /// Uniqueness violation (category name, product name within category,
    /// duplicate cart line).
    #[error("{0}")]
    Conflict(String),

    /// A business-meaningful "no data matches" condition, distinct from a
    /// page past the end of a non-empty collection.
    #[error("{0}")]
    EmptyResult(String),

    /// A product update or deletion left one or more carts unrepaired.
    ///
    /// The originating mutation is reported as failed even when the product
    /// row write itself succeeded; a stale or dangling cart line is a
    /// correctness violation, never swallowed.
    #[error("product {product} changed but {} cart(s) could not be repaired", failed.len())]
    PropagationIncomplete {
        /// Product whose change was being propagated.
        product: ProductId,
        /// Carts that could not be repaired.
        failed: Vec<CartId>,
    },

    /// Malformed pagination, sort or payload parameters.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Store operation failed.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// Image storage operation failed.
    #[error("image storage error: {0}")]
    Image(#[from] ImageError),
}

impl CatalogError {
    /// Build a [`CatalogError::NotFound`] for an entity looked up by `field`.
    pub fn not_found(
        entity: &'static str,
        field: &'static str,
        value: impl ToString,
    ) -> Self {
        Self::NotFound {
            entity,
            field,
            value: value.to_string(),
        }
    }
}

/// Result type alias for `CatalogError`.
pub type Result<T> = std::result::Result<T, CatalogError>;
