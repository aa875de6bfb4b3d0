//! Category service.

use std::sync::Arc;

use tamarind_core::CategoryId;

use crate::error::{CatalogError, Result};
use crate::page::{Page, PageRequest, paginate};
use crate::payload::CategoryPayload;
use crate::store::{CategoryStore, StoreError};

/// CRUD over categories with name-uniqueness enforcement.
pub struct CategoryService {
    categories: Arc<dyn CategoryStore>,
}

impl CategoryService {
    pub fn new(categories: Arc<dyn CategoryStore>) -> Self {
        Self { categories }
    }

    /// List categories as a sorted page.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::EmptyResult`] if the store holds zero
    /// categories. A page past the end of a non-empty store is an empty
    /// page, not an error.
    pub async fn list(&self, request: &PageRequest) -> Result<Page<CategoryPayload>> {
        let categories = self.categories.find_all().await?;
        if categories.is_empty() {
            return Err(CatalogError::EmptyResult(
                "no categories have been created yet".to_owned(),
            ));
        }
        Ok(paginate(categories, request)?.map(Into::into))
    }

    /// Create a category.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Conflict`] if a category with this name
    /// already exists (case-sensitive).
    pub async fn create(&self, name: &str) -> Result<CategoryPayload> {
        if self.categories.find_by_name(name).await?.is_some() {
            return Err(name_conflict(name));
        }

        // The store re-checks under its own write lock, so two concurrent
        // creates for the same name cannot both pass the lookup above.
        match self.categories.create(name).await {
            Ok(category) => {
                tracing::info!(category_id = %category.id, name, "created category");
                Ok(category.into())
            }
            Err(StoreError::Duplicate { .. }) => Err(name_conflict(name)),
            Err(error) => Err(error.into()),
        }
    }

    /// Rename a category. The name is overwritten unconditionally.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] if the id is absent.
    pub async fn update(&self, id: CategoryId, name: &str) -> Result<CategoryPayload> {
        let mut category = self
            .categories
            .find_by_id(id)
            .await?
            .ok_or_else(|| CatalogError::not_found("category", "id", id))?;

        category.name = name.to_owned();
        let updated = self.categories.update(category).await?;
        tracing::info!(category_id = %id, name, "renamed category");
        Ok(updated.into())
    }

    /// Delete a category, returning the deleted snapshot.
    ///
    /// Does not cascade to the category's products.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] if the id is absent.
    pub async fn delete(&self, id: CategoryId) -> Result<CategoryPayload> {
        let category = self
            .categories
            .find_by_id(id)
            .await?
            .ok_or_else(|| CatalogError::not_found("category", "id", id))?;

        self.categories.delete(id).await?;
        tracing::info!(category_id = %id, "deleted category");
        Ok(category.into())
    }
}

fn name_conflict(name: &str) -> CatalogError {
    CatalogError::Conflict(format!("category with the name {name} already exists"))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use crate::page::SortDirection;
    use crate::store::MemoryStore;

    use super::*;

    fn service() -> CategoryService {
        CategoryService::new(Arc::new(MemoryStore::new()))
    }

    fn by_name(page: u32, size: u32) -> PageRequest {
        PageRequest::new(page, size, "name", SortDirection::Ascending)
    }

    #[tokio::test]
    async fn test_list_with_zero_categories_is_an_error() {
        let service = service();
        let result = service.list(&by_name(0, 10)).await;
        assert!(matches!(result, Err(CatalogError::EmptyResult(_))));
    }

    #[tokio::test]
    async fn test_list_page_past_the_end_is_an_empty_page() {
        let service = service();
        service.create("Electronics").await.unwrap();

        let page = service.list(&by_name(7, 10)).await.unwrap();
        assert!(page.items.is_empty());
        assert_eq!(page.total_elements, 1);
        assert!(page.last);
    }

    #[tokio::test]
    async fn test_list_sorts_by_requested_field() {
        let service = service();
        service.create("Electronics").await.unwrap();
        service.create("Books").await.unwrap();

        let page = service.list(&by_name(0, 10)).await.unwrap();
        let names: Vec<_> = page.items.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Books", "Electronics"]);
    }

    #[tokio::test]
    async fn test_create_duplicate_name_conflicts() {
        let service = service();
        service.create("Electronics").await.unwrap();

        let result = service.create("Electronics").await;
        assert!(matches!(result, Err(CatalogError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_update_renames() {
        let service = service();
        let created = service.create("Electronics").await.unwrap();

        let updated = service.update(created.id, "Gadgets").await.unwrap();
        assert_eq!(updated.name, "Gadgets");
        assert_eq!(updated.id, created.id);
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let service = service();
        let result = service.update(CategoryId::new(42), "Gadgets").await;
        assert!(matches!(result, Err(CatalogError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_delete_returns_snapshot() {
        let service = service();
        let created = service.create("Electronics").await.unwrap();

        let deleted = service.delete(created.id).await.unwrap();
        assert_eq!(deleted.name, "Electronics");

        let result = service.delete(created.id).await;
        assert!(matches!(result, Err(CatalogError::NotFound { .. })));
    }
}
