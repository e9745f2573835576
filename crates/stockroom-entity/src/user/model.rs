//! User account entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A login account for borrowing, managed by the administrator.
///
/// The profile fields (fullname, department, phone) auto-fill the borrower
/// form when the user is logged in.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Unique user identifier.
    pub id: Uuid,
    /// Unique login name.
    pub username: String,
    /// Argon2id password hash.
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Full name.
    pub fullname: String,
    /// Department (optional).
    pub department: Option<String>,
    /// Phone number (optional).
    pub phone: Option<String>,
    /// Email address (optional).
    pub email: Option<String>,
    /// Whether the account can log in.
    pub is_active: bool,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
    /// When the account was last updated.
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Check if the user can log in right now.
    pub fn can_login(&self) -> bool {
        self.is_active
    }
}

/// Data required to create a new user account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    /// Desired username (unique).
    pub username: String,
    /// Initial plaintext password; hashed before storage.
    pub password: String,
    /// Full name.
    pub fullname: String,
    /// Department (optional).
    pub department: Option<String>,
    /// Phone number (optional).
    pub phone: Option<String>,
    /// Email address (optional).
    pub email: Option<String>,
}

/// Data for updating an existing user account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateUser {
    /// New full name.
    pub fullname: String,
    /// New department.
    pub department: Option<String>,
    /// New phone number.
    pub phone: Option<String>,
    /// New email address.
    pub email: Option<String>,
    /// New username, when changing it (uniqueness re-checked).
    pub username: Option<String>,
    /// New plaintext password, when changing it; hashed before storage.
    pub password: Option<String>,
}
