//! Catalog operations: browsing for everyone, mutation for admins.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use stockroom_core::AppResult;
use stockroom_core::error::AppError;
use stockroom_entity::item::{CreateItem, Item, UpdateItem};
use stockroom_entity::session::Session;
use stockroom_entity::store::CatalogStore;

/// Shortest query that triggers a filtered search instead of a full listing.
const MIN_SEARCH_LEN: usize = 2;

/// Manages the item catalog.
#[derive(Clone)]
pub struct CatalogService {
    /// Catalog persistence.
    catalog: Arc<dyn CatalogStore>,
}

impl CatalogService {
    /// Creates a new catalog service.
    pub fn new(catalog: Arc<dyn CatalogStore>) -> Self {
        Self { catalog }
    }

    /// Lists all active items, newest first.
    pub async fn list_items(&self) -> AppResult<Vec<Item>> {
        self.catalog.list_active().await
    }

    /// Looks up an active item by its SKU code (case-insensitive).
    pub async fn find_by_code(&self, code: &str) -> AppResult<Item> {
        let code = code.trim();
        if code.is_empty() {
            return Err(AppError::empty_input("SKU code must not be empty"));
        }

        self.catalog
            .find_by_code(code)
            .await?
            .ok_or_else(|| AppError::not_found(format!("No item with code '{code}'")))
    }

    /// Searches active items by code, name, model, or location.
    ///
    /// Queries shorter than two characters fall back to the full listing,
    /// matching the behavior of the catalog search box.
    pub async fn search(&self, query: &str) -> AppResult<Vec<Item>> {
        let query = query.trim();
        if query.len() < MIN_SEARCH_LEN {
            return self.catalog.list_active().await;
        }
        self.catalog.search(query).await
    }

    /// Creates a new catalog item. Admin only.
    pub async fn create_item(&self, session: &Session, item: CreateItem) -> AppResult<Item> {
        session.require_admin()?;
        Self::validate_item_fields(&item.code, &item.name)?;

        let mut item = item;
        item.code = item.code.trim().to_string();
        item.name = item.name.trim().to_string();

        let created = self.catalog.create(&item).await?;
        info!(code = %created.code, max_quantity = created.max_quantity, "Catalog item created");
        Ok(created)
    }

    /// Updates an item's descriptive and capacity fields. Admin only.
    ///
    /// `lent_quantity` is untouched; only borrow and return flows move it.
    pub async fn update_item(
        &self,
        session: &Session,
        id: Uuid,
        fields: UpdateItem,
    ) -> AppResult<Item> {
        session.require_admin()?;
        Self::validate_item_fields(&fields.code, &fields.name)?;

        let mut fields = fields;
        fields.code = fields.code.trim().to_string();
        fields.name = fields.name.trim().to_string();

        let updated = self.catalog.update(id, &fields).await?;
        info!(code = %updated.code, "Catalog item updated");
        Ok(updated)
    }

    /// Soft-deactivates an item so it leaves listings and searches. Admin
    /// only. Existing borrow history keeps resolving the item's fields.
    pub async fn deactivate_item(&self, session: &Session, id: Uuid) -> AppResult<()> {
        session.require_admin()?;

        // Surface a clear not-found instead of silently deactivating nothing.
        self.catalog
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Item not found"))?;

        self.catalog.deactivate(id).await?;
        info!(item_id = %id, "Catalog item deactivated");
        Ok(())
    }

    fn validate_item_fields(code: &str, name: &str) -> AppResult<()> {
        if code.trim().is_empty() {
            return Err(AppError::validation("SKU code is required"));
        }
        if name.trim().is_empty() {
            return Err(AppError::validation("Item name is required"));
        }
        Ok(())
    }
}
