//! Username/password login with a demo-credential fallback.

use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use stockroom_core::AppResult;
use stockroom_core::config::AuthConfig;
use stockroom_core::error::AppError;
use stockroom_entity::session::{Role, Session};
use stockroom_entity::store::UserStore;

use crate::password::PasswordHasher;
use crate::session::SessionStore;

/// Authenticates callers and manages the persisted session lifecycle.
#[derive(Clone)]
pub struct Authenticator {
    /// User account store.
    users: Arc<dyn UserStore>,
    /// Password hasher.
    hasher: Arc<PasswordHasher>,
    /// Session persistence.
    sessions: Arc<SessionStore>,
    /// Auth configuration (demo credential).
    config: AuthConfig,
}

impl Authenticator {
    /// Creates a new authenticator.
    pub fn new(
        users: Arc<dyn UserStore>,
        hasher: Arc<PasswordHasher>,
        sessions: Arc<SessionStore>,
        config: AuthConfig,
    ) -> Self {
        Self {
            users,
            hasher,
            sessions,
            config,
        }
    }

    /// Authenticates a borrower against the users table.
    ///
    /// Unknown username, wrong password, and deactivated account all fail
    /// with the same message so the form does not leak which part was
    /// wrong.
    pub async fn login(&self, username: &str, password: &str) -> AppResult<Session> {
        let user = self
            .users
            .find_by_username(username.trim())
            .await?
            .ok_or_else(|| AppError::authentication("Invalid username or password"))?;

        if !user.can_login() {
            return Err(AppError::authentication("Invalid username or password"));
        }

        if !self.hasher.verify_password(password, &user.password_hash)? {
            return Err(AppError::authentication("Invalid username or password"));
        }

        let session = Session {
            user_id: Some(user.id),
            username: user.username.clone(),
            fullname: user.fullname.clone(),
            department: user.department.clone(),
            phone: user.phone.clone(),
            email: user.email.clone(),
            role: Role::Borrower,
            started_at: Utc::now(),
        };

        self.sessions.persist(&session)?;
        info!(username = %session.username, "Borrower logged in");

        Ok(session)
    }

    /// Authenticates against the built-in demo administrator credential.
    ///
    /// The demo credential never touches the database; it exists so the
    /// admin screens work before any accounts are provisioned.
    pub fn login_demo(&self, username: &str, password: &str) -> AppResult<Session> {
        if username != self.config.demo_username || password != self.config.demo_password {
            return Err(AppError::authentication("Invalid username or password"));
        }

        let session = Session {
            user_id: None,
            username: self.config.demo_username.clone(),
            fullname: "Administrator".to_string(),
            department: None,
            phone: None,
            email: None,
            role: Role::Admin,
            started_at: Utc::now(),
        };

        self.sessions.persist(&session)?;
        info!(username = %session.username, "Demo administrator logged in");

        Ok(session)
    }

    /// Restores the persisted session from the last run, if any.
    pub fn restore_session(&self) -> AppResult<Option<Session>> {
        self.sessions.restore()
    }

    /// Ends the current session and clears the persisted state.
    pub fn logout(&self) -> AppResult<()> {
        self.sessions.clear()?;
        info!("Session cleared");
        Ok(())
    }
}
