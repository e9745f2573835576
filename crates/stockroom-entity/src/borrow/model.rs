//! Borrow record entity model and joined read views.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::borrower::Borrower;
use super::status::BorrowStatus;

/// One borrow transaction: a borrower taking one or more items out.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct BorrowRecord {
    /// Unique record identifier.
    pub id: Uuid,
    /// The borrower profile owned by this record.
    pub borrower_id: Uuid,
    /// Date the items went out.
    pub borrow_date: NaiveDate,
    /// Date the items came back. Set iff status is `Returned`.
    pub actual_return_date: Option<NaiveDate>,
    /// Current status of the record.
    pub status: BorrowStatus,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
}

impl BorrowRecord {
    /// Check whether the record has been returned.
    pub fn is_returned(&self) -> bool {
        self.status == BorrowStatus::Returned
    }
}

/// A borrow line joined with the fields of its item.
///
/// Item fields resolve even when the item has since been deactivated, so
/// historical records stay readable.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct BorrowLineDetail {
    /// The borrowed item's identifier.
    pub item_id: Uuid,
    /// The item's SKU code.
    pub code: String,
    /// The item's name.
    pub name: String,
    /// The item's model designation.
    pub model: Option<String>,
    /// The item's storage location.
    pub location: Option<String>,
    /// The item's image reference.
    pub image_url: Option<String>,
    /// Number of units borrowed.
    pub quantity: i32,
}

/// A borrow record with its borrower and resolved item lines joined in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BorrowRecordDetail {
    /// Unique record identifier.
    pub id: Uuid,
    /// The borrower profile.
    pub borrower: Borrower,
    /// The record's lines with item fields resolved.
    pub lines: Vec<BorrowLineDetail>,
    /// Date the items went out.
    pub borrow_date: NaiveDate,
    /// Date the items came back, if returned.
    pub actual_return_date: Option<NaiveDate>,
    /// Current status of the record.
    pub status: BorrowStatus,
}

impl BorrowRecordDetail {
    /// Check whether the record has been returned.
    pub fn is_returned(&self) -> bool {
        self.status == BorrowStatus::Returned
    }
}
