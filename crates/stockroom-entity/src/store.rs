//! Store contracts implemented by the database crate.
//!
//! Services depend on these traits rather than on concrete repositories,
//! so the consistency rules can be exercised against in-memory doubles in
//! tests. All operations are async; any store-layer fault surfaces as a
//! `StoreUnavailable` error, propagated unmodified (no local retry).

use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use stockroom_core::AppResult;

use crate::borrow::{
    BorrowLine, BorrowLineInput, BorrowRecord, BorrowRecordDetail, Borrower, NewBorrower,
};
use crate::item::{CreateItem, Item, UpdateItem};
use crate::user::User;

/// Catalog persistence, including the inventory reconciliation primitives.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// All non-deactivated items, newest-created first.
    async fn list_active(&self) -> AppResult<Vec<Item>>;

    /// Find an item by primary key, active or not.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Item>>;

    /// Case-insensitive exact match on SKU code over active items.
    /// The caller trims the input first.
    async fn find_by_code(&self, code: &str) -> AppResult<Option<Item>>;

    /// Substring search over code/name/model/location of active items.
    async fn search(&self, query: &str) -> AppResult<Vec<Item>>;

    /// Create an item with `lent_quantity` = 0.
    async fn create(&self, item: &CreateItem) -> AppResult<Item>;

    /// Update descriptive/capacity fields. Never touches `lent_quantity`.
    async fn update(&self, id: Uuid, fields: &UpdateItem) -> AppResult<Item>;

    /// Soft-deactivate an item. Idempotent.
    async fn deactivate(&self, id: Uuid) -> AppResult<()>;

    /// Atomically add `amount` to `lent_quantity`, but only when the
    /// result stays within `max_quantity`. Fails with `InsufficientStock`
    /// otherwise. Not safe to retry blindly for the same logical event.
    async fn increment_lent(&self, item_id: Uuid, amount: i32) -> AppResult<()>;

    /// Subtract `amount` from `lent_quantity`, clamped at zero so drifted
    /// bookkeeping never goes negative.
    async fn decrement_lent(&self, item_id: Uuid, amount: i32) -> AppResult<()>;
}

/// Borrow ledger persistence.
#[async_trait]
pub trait LedgerStore: Send + Sync {
    /// Persist a fresh borrower profile.
    async fn insert_borrower(&self, borrower: &NewBorrower) -> AppResult<Borrower>;

    /// Persist a borrow record with status `lent`.
    async fn insert_record(
        &self,
        borrower_id: Uuid,
        borrow_date: NaiveDate,
    ) -> AppResult<BorrowRecord>;

    /// Persist the record's lines.
    async fn insert_lines(&self, record_id: Uuid, lines: &[BorrowLineInput]) -> AppResult<()>;

    /// Find a borrow record by primary key.
    async fn find_record(&self, id: Uuid) -> AppResult<Option<BorrowRecord>>;

    /// The borrower profile owned by a record.
    async fn find_record_borrower(&self, record_id: Uuid) -> AppResult<Option<Borrower>>;

    /// The lines of a record.
    async fn find_lines(&self, record_id: Uuid) -> AppResult<Vec<BorrowLine>>;

    /// All records with borrower and item lines joined in, newest first.
    /// Line items resolve even when deactivated.
    async fn list_details(&self) -> AppResult<Vec<BorrowRecordDetail>>;

    /// Mark a record returned with the given return date.
    async fn mark_returned(&self, record_id: Uuid, returned_on: NaiveDate) -> AppResult<()>;
}

/// User account persistence.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// All user accounts, newest-created first.
    async fn list(&self) -> AppResult<Vec<User>>;

    /// Find a user by primary key.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    /// Find a user by username (case-insensitive).
    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>>;

    /// Persist a new user. Duplicate usernames surface as `Conflict`.
    async fn create(&self, user: &User) -> AppResult<User>;

    /// Persist updated account fields. Duplicate usernames surface as
    /// `Conflict`.
    async fn update(&self, user: &User) -> AppResult<User>;

    /// Flip an account's active flag.
    async fn set_active(&self, id: Uuid, active: bool) -> AppResult<User>;

    /// Delete an account. Returns `true` if a row was deleted.
    async fn delete(&self, id: Uuid) -> AppResult<bool>;
}
