//! User repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use stockroom_core::error::{AppError, ErrorKind};
use stockroom_core::result::AppResult;
use stockroom_entity::store::UserStore;
use stockroom_entity::user::User;

/// Repository for user account CRUD and query operations.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Create a new user repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for UserRepository {
    async fn list(&self) -> AppResult<Vec<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::StoreUnavailable, "Failed to list users", e)
            })
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::StoreUnavailable, "Failed to find user by id", e)
            })
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE LOWER(username) = LOWER($1)")
            .bind(username)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::StoreUnavailable,
                    "Failed to find user by username",
                    e,
                )
            })
    }

    async fn create(&self, user: &User) -> AppResult<User> {
        sqlx::query_as::<_, User>(
            "INSERT INTO users (id, username, password_hash, fullname, department, phone, email, is_active) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING *",
        )
        .bind(user.id)
        .bind(&user.username)
        .bind(&user.password_hash)
        .bind(&user.fullname)
        .bind(&user.department)
        .bind(&user.phone)
        .bind(&user.email)
        .bind(user.is_active)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err)
                if db_err.constraint() == Some("users_username_key") =>
            {
                AppError::conflict(format!("Username '{}' already exists", user.username))
            }
            _ => AppError::with_source(ErrorKind::StoreUnavailable, "Failed to create user", e),
        })
    }

    async fn update(&self, user: &User) -> AppResult<User> {
        sqlx::query_as::<_, User>(
            "UPDATE users SET username = $2, password_hash = $3, fullname = $4, \
                              department = $5, phone = $6, email = $7, updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(user.id)
        .bind(&user.username)
        .bind(&user.password_hash)
        .bind(&user.fullname)
        .bind(&user.department)
        .bind(&user.phone)
        .bind(&user.email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err)
                if db_err.constraint() == Some("users_username_key") =>
            {
                AppError::conflict(format!("Username '{}' already exists", user.username))
            }
            _ => AppError::with_source(ErrorKind::StoreUnavailable, "Failed to update user", e),
        })?
        .ok_or_else(|| AppError::not_found(format!("User {} not found", user.id)))
    }

    async fn set_active(&self, id: Uuid, active: bool) -> AppResult<User> {
        sqlx::query_as::<_, User>(
            "UPDATE users SET is_active = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(active)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::StoreUnavailable, "Failed to update user status", e)
        })?
        .ok_or_else(|| AppError::not_found(format!("User {id} not found")))
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::StoreUnavailable, "Failed to delete user", e)
            })?;

        Ok(result.rows_affected() > 0)
    }
}
