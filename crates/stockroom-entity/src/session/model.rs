//! Session model and role enumeration.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use stockroom_core::AppResult;
use stockroom_core::error::AppError;

use crate::borrow::NewBorrower;

/// Roles a session can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Manages the catalog and user accounts, views return history.
    Admin,
    /// Submits borrow requests.
    Borrower,
}

impl Role {
    /// Check if this role is an admin.
    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }

    /// Return the role as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Borrower => "borrower",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The current caller's identity, passed by reference into services.
///
/// Built on login, persisted by the session store so it survives a
/// restart, and cleared on logout. There is no ambient lookup; any
/// operation needing identity takes a `&Session` parameter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// The account behind this session. `None` for the demo administrator.
    pub user_id: Option<Uuid>,
    /// Login name.
    pub username: String,
    /// Full name, used to auto-fill the borrower form.
    pub fullname: String,
    /// Department, used to auto-fill the borrower form.
    pub department: Option<String>,
    /// Phone number, used to auto-fill the borrower form.
    pub phone: Option<String>,
    /// Email address (optional).
    pub email: Option<String>,
    /// Role carried by this session.
    pub role: Role,
    /// When the session started.
    pub started_at: DateTime<Utc>,
}

impl Session {
    /// Returns whether this session carries admin privileges.
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// Fails with an authorization error unless this is an admin session.
    pub fn require_admin(&self) -> AppResult<()> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(AppError::authorization(
                "This operation requires administrator privileges",
            ))
        }
    }

    /// Borrower details pre-filled from this session's profile.
    pub fn borrower_profile(&self) -> NewBorrower {
        NewBorrower {
            fullname: self.fullname.clone(),
            department: self.department.clone().unwrap_or_default(),
            phone: self.phone.clone().unwrap_or_default(),
            email: self.email.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(role: Role) -> Session {
        Session {
            user_id: Some(Uuid::new_v4()),
            username: "somchai".to_string(),
            fullname: "Somchai J.".to_string(),
            department: Some("QA".to_string()),
            phone: Some("081-234-5678".to_string()),
            email: None,
            role,
            started_at: Utc::now(),
        }
    }

    #[test]
    fn test_require_admin() {
        assert!(session(Role::Admin).require_admin().is_ok());
        let err = session(Role::Borrower).require_admin().unwrap_err();
        assert_eq!(err.kind, stockroom_core::error::ErrorKind::Authorization);
    }

    #[test]
    fn test_borrower_profile_autofill() {
        let profile = session(Role::Borrower).borrower_profile();
        assert_eq!(profile.fullname, "Somchai J.");
        assert_eq!(profile.department, "QA");
        assert_eq!(profile.phone, "081-234-5678");
    }
}
