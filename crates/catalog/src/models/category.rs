//! Category entity.

use core::cmp::Ordering;

use chrono::{DateTime, Utc};

use tamarind_core::CategoryId;

use crate::page::SortKey;

/// A product category.
///
/// Category names are unique across the catalog (case-sensitive). Products
/// belong to exactly one category and are reached through the product
/// store, not an owned collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SortKey for Category {
    fn comparator(field: &str) -> Option<fn(&Self, &Self) -> Ordering> {
        match field {
            "id" => Some(|a, b| a.id.cmp(&b.id)),
            "name" => Some(|a, b| a.name.cmp(&b.name)),
            _ => None,
        }
    }
}
