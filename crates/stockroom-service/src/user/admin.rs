//! Administrator-facing user account management.

use std::sync::Arc;

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use stockroom_auth::password::{PasswordHasher, PasswordValidator};
use stockroom_core::AppResult;
use stockroom_core::error::AppError;
use stockroom_entity::session::Session;
use stockroom_entity::store::UserStore;
use stockroom_entity::user::{CreateUser, UpdateUser, User};

/// Shortest username an admin may assign.
const MIN_USERNAME_LEN: usize = 3;

/// Manages borrower login accounts. Every operation is admin-gated.
#[derive(Clone)]
pub struct AdminUserService {
    /// Account persistence.
    users: Arc<dyn UserStore>,
    /// Password hashing.
    hasher: Arc<PasswordHasher>,
    /// Password policy.
    validator: Arc<PasswordValidator>,
}

impl AdminUserService {
    /// Creates a new user administration service.
    pub fn new(
        users: Arc<dyn UserStore>,
        hasher: Arc<PasswordHasher>,
        validator: Arc<PasswordValidator>,
    ) -> Self {
        Self {
            users,
            hasher,
            validator,
        }
    }

    /// Lists all accounts, newest first.
    pub async fn list_users(&self, session: &Session) -> AppResult<Vec<User>> {
        session.require_admin()?;
        self.users.list().await
    }

    /// Creates a new account with a hashed password.
    pub async fn create_user(&self, session: &Session, input: CreateUser) -> AppResult<User> {
        session.require_admin()?;

        let username = Self::normalize_username(&input.username)?;
        if self.users.find_by_username(&username).await?.is_some() {
            return Err(AppError::conflict(format!(
                "Username '{username}' already exists"
            )));
        }

        if input.fullname.trim().is_empty() {
            return Err(AppError::validation("Full name is required"));
        }

        self.validator.validate(&input.password)?;
        let password_hash = self.hasher.hash_password(&input.password)?;

        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            username,
            password_hash,
            fullname: input.fullname.trim().to_string(),
            department: input.department,
            phone: input.phone,
            email: input.email,
            is_active: true,
            created_at: now,
            updated_at: now,
        };

        let created = self.users.create(&user).await?;
        info!(username = %created.username, "User account created");
        Ok(created)
    }

    /// Updates an account's profile, and optionally its username or
    /// password.
    pub async fn update_user(
        &self,
        session: &Session,
        id: Uuid,
        input: UpdateUser,
    ) -> AppResult<User> {
        session.require_admin()?;

        let mut user = self
            .users
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))?;

        if input.fullname.trim().is_empty() {
            return Err(AppError::validation("Full name is required"));
        }

        if let Some(new_username) = &input.username {
            let new_username = Self::normalize_username(new_username)?;
            if let Some(existing) = self.users.find_by_username(&new_username).await? {
                if existing.id != user.id {
                    return Err(AppError::conflict(format!(
                        "Username '{new_username}' already exists"
                    )));
                }
            }
            user.username = new_username;
        }

        if let Some(new_password) = &input.password {
            self.validator.validate(new_password)?;
            user.password_hash = self.hasher.hash_password(new_password)?;
        }

        user.fullname = input.fullname.trim().to_string();
        user.department = input.department;
        user.phone = input.phone;
        user.email = input.email;
        user.updated_at = Utc::now();

        let updated = self.users.update(&user).await?;
        info!(username = %updated.username, "User account updated");
        Ok(updated)
    }

    /// Flips an account's active flag, locking it out of or readmitting it
    /// to login.
    pub async fn toggle_active(&self, session: &Session, id: Uuid) -> AppResult<User> {
        session.require_admin()?;

        let user = self
            .users
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))?;

        let updated = self.users.set_active(id, !user.is_active).await?;
        info!(username = %updated.username, is_active = updated.is_active, "User active flag toggled");
        Ok(updated)
    }

    /// Permanently deletes an account. Borrow history is unaffected; it
    /// references borrower profiles, not accounts.
    pub async fn delete_user(&self, session: &Session, id: Uuid) -> AppResult<()> {
        session.require_admin()?;

        if !self.users.delete(id).await? {
            return Err(AppError::not_found("User not found"));
        }

        info!(user_id = %id, "User account deleted");
        Ok(())
    }

    fn normalize_username(username: &str) -> AppResult<String> {
        let username = username.trim();
        if username.len() < MIN_USERNAME_LEN {
            return Err(AppError::validation(format!(
                "Username must be at least {MIN_USERNAME_LEN} characters long"
            )));
        }
        Ok(username.to_string())
    }
}
