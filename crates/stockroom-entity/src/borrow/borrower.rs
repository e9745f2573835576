//! Borrower profile entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A borrower profile attached to exactly one borrow record.
///
/// Profiles are created fresh on each borrow submission; they are not
/// deduplicated against prior borrowers. The phone number doubles as the
/// return-verification secret.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Borrower {
    /// Unique borrower identifier.
    pub id: Uuid,
    /// Full name.
    pub fullname: String,
    /// Department.
    pub department: String,
    /// Phone number, checked on return.
    pub phone: String,
    /// Email address (optional).
    pub email: Option<String>,
    /// When the profile was created.
    pub created_at: DateTime<Utc>,
}

/// Borrower details supplied with a borrow submission.
///
/// Either typed in by the borrower or auto-filled from the authenticated
/// session's profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewBorrower {
    /// Full name.
    pub fullname: String,
    /// Department.
    pub department: String,
    /// Phone number.
    pub phone: String,
    /// Email address (optional).
    pub email: Option<String>,
}
