//! Item repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use stockroom_core::error::{AppError, ErrorKind};
use stockroom_core::result::AppResult;
use stockroom_entity::item::{CreateItem, Item, UpdateItem};
use stockroom_entity::store::CatalogStore;

/// Repository for catalog item CRUD and inventory reconciliation.
#[derive(Debug, Clone)]
pub struct ItemRepository {
    pool: PgPool,
}

impl ItemRepository {
    /// Create a new item repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CatalogStore for ItemRepository {
    async fn list_active(&self) -> AppResult<Vec<Item>> {
        sqlx::query_as::<_, Item>(
            "SELECT * FROM items WHERE is_active = TRUE ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::StoreUnavailable, "Failed to list items", e)
        })
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Item>> {
        sqlx::query_as::<_, Item>("SELECT * FROM items WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::StoreUnavailable, "Failed to find item by id", e)
            })
    }

    async fn find_by_code(&self, code: &str) -> AppResult<Option<Item>> {
        sqlx::query_as::<_, Item>(
            "SELECT * FROM items WHERE is_active = TRUE AND LOWER(code) = LOWER($1)",
        )
        .bind(code)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::StoreUnavailable, "Failed to find item by code", e)
        })
    }

    async fn search(&self, query: &str) -> AppResult<Vec<Item>> {
        let pattern = format!("%{query}%");

        sqlx::query_as::<_, Item>(
            "SELECT * FROM items WHERE is_active = TRUE \
             AND (code ILIKE $1 OR name ILIKE $1 OR model ILIKE $1 OR location ILIKE $1) \
             ORDER BY created_at DESC",
        )
        .bind(&pattern)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::StoreUnavailable, "Failed to search items", e)
        })
    }

    async fn create(&self, item: &CreateItem) -> AppResult<Item> {
        sqlx::query_as::<_, Item>(
            "INSERT INTO items (code, name, model, color_code, season, location, max_quantity, image_url) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING *",
        )
        .bind(&item.code)
        .bind(&item.name)
        .bind(&item.model)
        .bind(&item.color_code)
        .bind(&item.season)
        .bind(&item.location)
        .bind(item.effective_max_quantity())
        .bind(&item.image_url)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.constraint() == Some("items_code_key") => {
                AppError::conflict(format!("Item code '{}' already exists", item.code))
            }
            _ => AppError::with_source(ErrorKind::StoreUnavailable, "Failed to create item", e),
        })
    }

    async fn update(&self, id: Uuid, fields: &UpdateItem) -> AppResult<Item> {
        sqlx::query_as::<_, Item>(
            "UPDATE items SET code = $2, name = $3, model = $4, color_code = $5, \
                              season = $6, location = $7, max_quantity = $8, \
                              image_url = $9, updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(&fields.code)
        .bind(&fields.name)
        .bind(&fields.model)
        .bind(&fields.color_code)
        .bind(&fields.season)
        .bind(&fields.location)
        .bind(fields.effective_max_quantity())
        .bind(&fields.image_url)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.constraint() == Some("items_code_key") => {
                AppError::conflict(format!("Item code '{}' already exists", fields.code))
            }
            _ => AppError::with_source(ErrorKind::StoreUnavailable, "Failed to update item", e),
        })?
        .ok_or_else(|| AppError::not_found(format!("Item {id} not found")))
    }

    async fn deactivate(&self, id: Uuid) -> AppResult<()> {
        let result = sqlx::query(
            "UPDATE items SET is_active = FALSE, updated_at = NOW() WHERE id = $1",
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::StoreUnavailable, "Failed to deactivate item", e)
        })?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("Item {id} not found")));
        }
        Ok(())
    }

    async fn increment_lent(&self, item_id: Uuid, amount: i32) -> AppResult<()> {
        // Single conditional statement so two concurrent borrows cannot
        // both claim the last unit (lost-update guard).
        let result = sqlx::query(
            "UPDATE items SET lent_quantity = lent_quantity + $2, updated_at = NOW() \
             WHERE id = $1 AND lent_quantity + $2 <= max_quantity",
        )
        .bind(item_id)
        .bind(amount)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(
                ErrorKind::StoreUnavailable,
                "Failed to increment lent quantity",
                e,
            )
        })?;

        if result.rows_affected() == 0 {
            let item = self.find_by_id(item_id).await?;
            return match item {
                Some(item) => Err(AppError::insufficient_stock(format!(
                    "Only {} unit(s) of '{}' remain",
                    item.available_quantity(),
                    item.code
                ))),
                None => Err(AppError::not_found(format!("Item {item_id} not found"))),
            };
        }
        Ok(())
    }

    async fn decrement_lent(&self, item_id: Uuid, amount: i32) -> AppResult<()> {
        let result = sqlx::query(
            "UPDATE items SET lent_quantity = GREATEST(0, lent_quantity - $2), \
                              updated_at = NOW() \
             WHERE id = $1",
        )
        .bind(item_id)
        .bind(amount)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(
                ErrorKind::StoreUnavailable,
                "Failed to decrement lent quantity",
                e,
            )
        })?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("Item {item_id} not found")));
        }
        Ok(())
    }
}
